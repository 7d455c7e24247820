use std::collections::BTreeMap;

use crate::callbacks::{CallbackRegistry, InputId, OutputId};
use crate::color::{BOOSTER_TONE, ColorMap, SITE_TONE};
use crate::data::filter::{PayloadRange, Selection, SiteFilter};
use crate::data::model::{LaunchDataset, LaunchSite};
use crate::figure::{Figure, PieFigure, ScatterFigure};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub dataset: LaunchDataset,

    /// Current dropdown and slider values.
    pub selection: Selection,

    /// Which outputs recompute when an input changes.
    registry: CallbackRegistry,

    /// Last computed figure per output.
    figures: BTreeMap<OutputId, Figure>,

    /// Colour per booster version category (scatter colour channel).
    pub booster_colors: ColorMap<String>,

    /// Colour per launch site (all-sites pie).
    pub site_colors: ColorMap<LaunchSite>,

    /// Whether the records table is shown.
    pub show_records: bool,
}

impl AppState {
    /// Wrap a loaded dataset, start from the default selection and compute
    /// every output once.
    pub fn new(dataset: LaunchDataset) -> Self {
        let selection = Selection::default_for(&dataset);
        let booster_colors = ColorMap::new(dataset.booster_categories(), BOOSTER_TONE);
        let site_colors = ColorMap::new(&LaunchSite::ALL, SITE_TONE);

        let mut state = Self {
            dataset,
            selection,
            registry: CallbackRegistry::dashboard(),
            figures: BTreeMap::new(),
            booster_colors,
            site_colors,
            show_records: false,
        };
        state.recompute_all();
        state
    }

    /// Slider bounds: the dataset's observed payload extremes.
    pub fn payload_bounds(&self) -> PayloadRange {
        PayloadRange::bounds_of(&self.dataset)
    }

    /// Dropdown change. No-op when the value is unchanged.
    pub fn select_site(&mut self, site: SiteFilter) {
        if self.selection.site == site {
            return;
        }
        self.selection.site = site;
        self.input_changed(InputId::SiteDropdown);
    }

    /// Dropdown change from a raw value; unknown values select no data.
    pub fn select_site_value(&mut self, value: &str) {
        self.select_site(SiteFilter::from_value(value));
    }

    /// Move the low end of the payload range, pushing `high` up if needed.
    pub fn set_payload_low(&mut self, low: f64) {
        let high = self.selection.payload.high().max(low);
        self.set_payload_range(low, high);
    }

    /// Move the high end of the payload range, pushing `low` down if needed.
    pub fn set_payload_high(&mut self, high: f64) {
        let low = self.selection.payload.low().min(high);
        self.set_payload_range(low, high);
    }

    /// Slider change. The range is clamped into the dataset bounds; ranges
    /// with `low > high` or NaN ends are ignored.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        let Some(range) = PayloadRange::new(low, high) else {
            log::warn!("Ignoring payload range [{low}, {high}]");
            return;
        };
        let range = range.clamped_to(&self.payload_bounds());
        if self.selection.payload == range {
            return;
        }
        self.selection.payload = range;
        self.input_changed(InputId::PayloadSlider);
    }

    /// Back to all sites and the full payload range.
    pub fn reset(&mut self) {
        self.selection = Selection::default_for(&self.dataset);
        self.recompute_all();
    }

    /// Rerun every callback watching `input`.
    fn input_changed(&mut self, input: InputId) {
        for cb in self.registry.triggered_by(input) {
            let figure = cb.compute(&self.dataset, &self.selection);
            log::debug!(
                "{input} changed → recomputed {} ({} rows)",
                cb.output,
                figure_rows(&figure)
            );
            self.figures.insert(cb.output, figure);
        }
    }

    fn recompute_all(&mut self) {
        for cb in self.registry.all() {
            let figure = cb.compute(&self.dataset, &self.selection);
            self.figures.insert(cb.output, figure);
        }
    }

    pub fn figure(&self, output: OutputId) -> Option<&Figure> {
        self.figures.get(&output)
    }

    pub fn pie(&self) -> Option<&PieFigure> {
        match self.figure(OutputId::SuccessPieChart)? {
            Figure::Pie(pie) => Some(pie),
            Figure::Scatter(_) => None,
        }
    }

    pub fn scatter(&self) -> Option<&ScatterFigure> {
        match self.figure(OutputId::SuccessPayloadScatterChart)? {
            Figure::Scatter(scatter) => Some(scatter),
            Figure::Pie(_) => None,
        }
    }
}

fn figure_rows(figure: &Figure) -> usize {
    match figure {
        Figure::Pie(pie) => pie.slices.len(),
        Figure::Scatter(scatter) => scatter.points.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn state() -> AppState {
        AppState::new(
            LaunchDataset::from_records(vec![
                LaunchRecord::new(LaunchSite::CcafsLc40, Outcome::Success, 500.0, "v1.0"),
                LaunchRecord::new(LaunchSite::CcafsLc40, Outcome::Failure, 1500.0, "v1.1"),
                LaunchRecord::new(LaunchSite::VafbSlc4e, Outcome::Success, 3000.0, "FT"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn starts_with_all_sites_full_range_and_both_figures() {
        let s = state();
        assert_eq!(s.selection.site, SiteFilter::All);
        assert_eq!(s.selection.payload, PayloadRange::new(500.0, 3000.0).unwrap());
        assert_eq!(s.pie().unwrap().slices.len(), 2);
        assert_eq!(s.scatter().unwrap().points.len(), 3);
    }

    #[test]
    fn slider_change_leaves_pie_untouched() {
        let mut s = state();
        let pie_before = s.pie().cloned();
        s.set_payload_range(0.0, 1000.0);
        assert_eq!(s.pie().cloned(), pie_before);
        let masses: Vec<f64> = s
            .scatter()
            .unwrap()
            .points
            .iter()
            .map(|p| p.payload_mass_kg)
            .collect();
        assert_eq!(masses, vec![500.0]);
    }

    #[test]
    fn dropdown_change_recomputes_both_charts() {
        let mut s = state();
        s.select_site(SiteFilter::Site(LaunchSite::VafbSlc4e));
        assert_eq!(
            s.pie().unwrap().title,
            "Total Success Launches for Site VAFB SLC-4E"
        );
        assert_eq!(s.scatter().unwrap().points.len(), 1);
    }

    #[test]
    fn unknown_dropdown_value_shows_no_data() {
        let mut s = state();
        s.select_site_value("Vandenberg");
        assert!(s.pie().unwrap().slices.is_empty());
        assert!(s.scatter().unwrap().points.is_empty());
    }

    #[test]
    fn range_edits_are_clamped_and_kept_ordered() {
        let mut s = state();
        s.set_payload_range(-100.0, 99999.0);
        assert_eq!(s.selection.payload, s.payload_bounds());

        s.set_payload_high(1000.0);
        s.set_payload_low(2000.0);
        assert_eq!(s.selection.payload, PayloadRange::new(2000.0, 2000.0).unwrap());

        s.set_payload_high(700.0);
        assert_eq!(s.selection.payload, PayloadRange::new(700.0, 700.0).unwrap());

        let before = s.selection.payload;
        s.set_payload_range(10.0, 5.0);
        assert_eq!(s.selection.payload, before);
    }

    #[test]
    fn reset_restores_default_selection() {
        let mut s = state();
        s.select_site(SiteFilter::Site(LaunchSite::CcafsLc40));
        s.set_payload_range(600.0, 2000.0);
        s.reset();
        assert_eq!(s.selection, Selection::default_for(&s.dataset));
        assert_eq!(s.scatter().unwrap().points.len(), 3);
        assert_eq!(s.pie().unwrap().title, "Total Success Launches By Site");
    }
}
