use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::outcome_color;
use crate::state::AppState;

/// Rows currently plotted in the scatter chart, in source order.
pub fn records_table(ui: &mut Ui, state: &AppState, row_height: f32) {
    let Some(scatter) = state.scatter() else {
        return;
    };
    let points = &scatter.points;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(40.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["#", "Payload Mass (kg)", "class", "Booster Version Category"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, points.len(), |mut row| {
                let i = row.index();
                let p = &points[i];
                row.col(|ui| {
                    ui.label(i.to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", p.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(RichText::new(p.outcome.to_string()).color(outcome_color(p.outcome)));
                });
                row.col(|ui| {
                    ui.label(
                        RichText::new(&p.booster_category)
                            .color(state.booster_colors.color_for(p.booster_category.as_str())),
                    );
                });
            });
        });
}
