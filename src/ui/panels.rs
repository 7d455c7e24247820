use eframe::egui::{self, RichText, ScrollArea, Slider, Ui};

use crate::color::outcome_color;
use crate::data::filter::{ALL_SITES, SiteFilter};
use crate::data::model::{LaunchSite, Outcome};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left control panel: site dropdown, payload range, legend.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Site dropdown ----
            ui.strong("Launch Site");
            let mut value = state.selection.site.value().to_string();
            egui::ComboBox::from_id_salt("site-dropdown")
                .selected_text(site_label(&state.selection.site))
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    ui.selectable_value(&mut value, ALL_SITES.to_string(), "All Sites");
                    for s in LaunchSite::ALL {
                        let label = format!("{s}  ({})", state.dataset.count_for_site(s));
                        ui.selectable_value(&mut value, s.as_str().to_string(), label);
                    }
                });
            state.select_site_value(&value);
            ui.separator();

            // ---- Payload range ----
            ui.strong("Payload range (Kg)");
            let bounds = state.payload_bounds();
            let mut low = state.selection.payload.low();
            let mut high = state.selection.payload.high();
            let low_changed = ui
                .add(
                    Slider::new(&mut low, bounds.low()..=bounds.high())
                        .text("min")
                        .fixed_decimals(0),
                )
                .changed();
            if low_changed {
                state.set_payload_low(low);
            }
            let high_changed = ui
                .add(
                    Slider::new(&mut high, bounds.low()..=bounds.high())
                        .text("max")
                        .fixed_decimals(0),
                )
                .changed();
            if high_changed {
                state.set_payload_high(high);
            }
            ui.separator();

            // ---- Booster legend ----
            egui::CollapsingHeader::new(RichText::new("Booster Version Category").strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for (label, color) in state.booster_colors.legend_entries() {
                        ui.label(RichText::new(format!("● {label}")).color(color));
                    }
                });
        });
}

fn site_label(site: &SiteFilter) -> String {
    match site {
        SiteFilter::All => "All Sites".to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar: counts, success rate, toggles.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("View", |ui: &mut Ui| {
            if ui.button("Reset selection").clicked() {
                state.reset();
                ui.close_menu();
            }
        });

        ui.separator();

        let visible = state.scatter().map_or(0, |s| s.points.len());
        ui.label(format!(
            "{} launches loaded, {visible} in selection",
            state.dataset.record_count()
        ));

        if let Some(rate) = state.scatter().and_then(|s| s.success_rate()) {
            ui.separator();
            ui.label(
                RichText::new(format!("success rate {:.1}%", rate * 100.0))
                    .color(outcome_color(Outcome::Success)),
            );
        }

        ui.separator();

        if ui
            .selectable_label(state.show_records, "Records")
            .clicked()
        {
            state.show_records = !state.show_records;
        }
    });
}
