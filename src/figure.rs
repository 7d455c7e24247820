use std::f64::consts::{FRAC_PI_2, TAU};

use crate::data::filter::{
    OutcomeSummary, PayloadRange, ScatterPoint, SiteFilter, outcome_summary, payload_scatter,
};
use crate::data::model::{LaunchDataset, LaunchSite, Outcome};

// ---------------------------------------------------------------------------
// Chart specifications handed to the plotting widgets
// ---------------------------------------------------------------------------

/// What a pie slice stands for; decides its colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliceKey {
    Site(LaunchSite),
    Outcome(Outcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub key: SliceKey,
    pub label: String,
    pub value: f64,
}

/// One laid-out slice: angles in radians, clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub key: SliceKey,
    pub label: String,
    pub share: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieFigure {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieFigure {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Lay the slices out around the circle. Zero-valued slices are skipped
    /// and a zero total yields no wedges.
    pub fn wedges(&self) -> Vec<Wedge> {
        let total = self.total();
        if total <= 0.0 {
            return Vec::new();
        }
        let mut angle = FRAC_PI_2;
        self.slices
            .iter()
            .filter(|s| s.value > 0.0)
            .map(|s| {
                let share = s.value / total;
                let start_angle = angle;
                angle -= share * TAU;
                Wedge {
                    key: s.key,
                    label: s.label.clone(),
                    share,
                    start_angle,
                    end_angle: angle,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub title: String,
    pub points: Vec<ScatterPoint>,
    pub range: PayloadRange,
}

impl ScatterFigure {
    /// Fraction of visible launches that succeeded, `None` without points.
    pub fn success_rate(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let successes = self
            .points
            .iter()
            .filter(|p| p.outcome == Outcome::Success)
            .count();
        Some(successes as f64 / self.points.len() as f64)
    }
}

/// A computed chart, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Pie(PieFigure),
    Scatter(ScatterFigure),
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Pie chart of launch outcomes for the selected site.
pub fn success_pie(dataset: &LaunchDataset, site: &SiteFilter) -> PieFigure {
    let title = match site {
        SiteFilter::All => "Total Success Launches By Site".to_string(),
        other => format!("Total Success Launches for Site {other}"),
    };

    let slices = match outcome_summary(dataset.records(), site) {
        OutcomeSummary::BySite(rows) => rows
            .into_iter()
            .map(|r| PieSlice {
                key: SliceKey::Site(r.site),
                label: r.site.to_string(),
                value: r.mean_outcome,
            })
            .collect(),
        OutcomeSummary::ByOutcome(rows) => rows
            .into_iter()
            .map(|r| PieSlice {
                key: SliceKey::Outcome(r.outcome),
                label: r.outcome.label().to_string(),
                value: r.count as f64,
            })
            .collect(),
    };

    PieFigure { title, slices }
}

/// Scatter chart of payload mass against launch outcome.
pub fn success_payload_scatter(
    dataset: &LaunchDataset,
    site: &SiteFilter,
    range: &PayloadRange,
) -> ScatterFigure {
    let title = match site {
        SiteFilter::All => "Correlation between Payload and Success for all Sites".to_string(),
        other => format!("Correlation between Payload and Success for Site {other}"),
    };

    ScatterFigure {
        title,
        points: payload_scatter(dataset.records(), site, range),
        range: *range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new(LaunchSite::CcafsLc40, Outcome::Success, 500.0, "v1.0"),
            LaunchRecord::new(LaunchSite::CcafsLc40, Outcome::Failure, 1500.0, "v1.1"),
            LaunchRecord::new(LaunchSite::VafbSlc4e, Outcome::Success, 3000.0, "FT"),
            LaunchRecord::new(LaunchSite::KscLc39a, Outcome::Failure, 4000.0, "FT"),
        ])
        .unwrap()
    }

    #[test]
    fn all_sites_pie_has_site_slices() {
        let pie = success_pie(&dataset(), &SiteFilter::All);
        assert_eq!(pie.title, "Total Success Launches By Site");
        let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(pie.total(), 1.5);
        // KSC has a mean of zero and gets no wedge.
        assert_eq!(pie.wedges().len(), 2);
    }

    #[test]
    fn site_pie_has_outcome_slices() {
        let pie = success_pie(&dataset(), &SiteFilter::Site(LaunchSite::CcafsLc40));
        assert_eq!(pie.title, "Total Success Launches for Site CCAFS LC-40");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice {
                    key: SliceKey::Outcome(Outcome::Failure),
                    label: "Failure".to_string(),
                    value: 1.0,
                },
                PieSlice {
                    key: SliceKey::Outcome(Outcome::Success),
                    label: "Success".to_string(),
                    value: 1.0,
                },
            ]
        );
    }

    #[test]
    fn wedges_cover_the_full_circle_clockwise() {
        let pie = success_pie(&dataset(), &SiteFilter::Site(LaunchSite::CcafsLc40));
        let wedges = pie.wedges();
        assert_eq!(wedges.len(), 2);
        assert_eq!(wedges[0].start_angle, FRAC_PI_2);
        assert!(wedges[0].end_angle < wedges[0].start_angle);
        assert_eq!(wedges[0].end_angle, wedges[1].start_angle);
        let swept = wedges[0].start_angle - wedges[1].end_angle;
        assert!((swept - TAU).abs() < 1e-9);
        let shares: f64 = wedges.iter().map(|w| w.share).sum();
        assert!((shares - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_site_pie_has_no_wedges() {
        let pie = success_pie(&dataset(), &SiteFilter::Site(LaunchSite::CcafsSlc40));
        assert!(pie.slices.is_empty());
        assert!(pie.wedges().is_empty());
    }

    #[test]
    fn scatter_title_and_success_rate() {
        let ds = dataset();
        let range = PayloadRange::new(0.0, 3500.0).unwrap();
        let scatter = success_payload_scatter(&ds, &SiteFilter::All, &range);
        assert_eq!(
            scatter.title,
            "Correlation between Payload and Success for all Sites"
        );
        assert_eq!(scatter.points.len(), 3);
        assert!((scatter.success_rate().unwrap() - 2.0 / 3.0).abs() < 1e-9);

        let none = PayloadRange::new(9000.0, 9500.0).unwrap();
        let site = SiteFilter::Site(LaunchSite::VafbSlc4e);
        let scatter = success_payload_scatter(&ds, &site, &none);
        assert_eq!(
            scatter.title,
            "Correlation between Payload and Success for Site VAFB SLC-4E"
        );
        assert_eq!(scatter.success_rate(), None);
    }
}
