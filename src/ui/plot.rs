use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_2;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::outcome_color;
use crate::config::DashboardConfig;
use crate::figure::{ScatterFigure, SliceKey, Wedge};
use crate::state::AppState;

/// Arc resolution for pie wedges.
const ARC_STEP: f64 = 0.02;

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Render the outcome pie chart with the given height.
pub fn success_pie(ui: &mut Ui, state: &AppState, height: f32) {
    let Some(pie) = state.pie() else {
        return;
    };
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&pie.title);
    });

    let wedges = pie.wedges();
    if wedges.is_empty() {
        no_data(ui, height);
        return;
    }

    Plot::new("success-pie-chart")
        .height(height)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            for wedge in &wedges {
                let color = slice_color(state, wedge.key);
                for segment in wedge_segments(wedge) {
                    let points: PlotPoints = segment.into_iter().collect();
                    plot_ui.polygon(
                        Polygon::new(points)
                            .name(&wedge.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let mid = (wedge.start_angle + wedge.end_angle) / 2.0;
                let label = RichText::new(format!("{:.1}%", wedge.share * 100.0))
                    .color(Color32::WHITE)
                    .strong();
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    label,
                ));
            }
        });
}

fn slice_color(state: &AppState, key: SliceKey) -> Color32 {
    match key {
        SliceKey::Site(site) => state.site_colors.color_for(&site),
        SliceKey::Outcome(outcome) => outcome_color(outcome),
    }
}

/// Split a wedge into pieces of at most a quarter turn each; polygon fills
/// require convex shapes. Every piece starts at the centre.
pub fn wedge_segments(wedge: &Wedge) -> Vec<Vec<[f64; 2]>> {
    let sweep = wedge.start_angle - wedge.end_angle;
    let pieces = (sweep / FRAC_PI_2 - 1e-9).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f64;

    (0..pieces)
        .map(|i| {
            let from = wedge.start_angle - i as f64 * piece_sweep;
            let steps = (piece_sweep / ARC_STEP).ceil().max(1.0) as usize;
            let mut points = Vec::with_capacity(steps + 2);
            points.push([0.0, 0.0]);
            for s in 0..=steps {
                let a = from - piece_sweep * s as f64 / steps as f64;
                points.push([a.cos(), a.sin()]);
            }
            points
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Payload / success scatter chart
// ---------------------------------------------------------------------------

/// Render the payload-vs-outcome scatter chart, one series per booster
/// version category.
pub fn success_payload_scatter(
    ui: &mut Ui,
    state: &AppState,
    config: &DashboardConfig,
    height: f32,
) {
    let Some(scatter) = state.scatter() else {
        return;
    };
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&scatter.title);
    });

    let series = series_by_category(scatter);

    Plot::new("success-payload-scatter-chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(scatter.range.low())
        .include_x(scatter.range.high())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, coords) in series {
                let points: PlotPoints = coords.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(state.booster_colors.color_for(category))
                        .shape(MarkerShape::Circle)
                        .radius(config.marker_radius)
                        .filled(true),
                );
            }
        });
}

/// Group scatter coordinates by booster category, keeping source order
/// within each category.
fn series_by_category(scatter: &ScatterFigure) -> BTreeMap<&str, Vec<[f64; 2]>> {
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &scatter.points {
        series
            .entry(p.booster_category.as_str())
            .or_default()
            .push([p.payload_mass_kg, f64::from(p.outcome.class())]);
    }
    series
}

fn no_data(ui: &mut Ui, height: f32) {
    ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("No data").weak());
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;
    use std::f64::consts::TAU;

    fn wedge(share: f64) -> Wedge {
        Wedge {
            key: SliceKey::Outcome(Outcome::Success),
            label: "Success".to_string(),
            share,
            start_angle: FRAC_PI_2,
            end_angle: FRAC_PI_2 - share * TAU,
        }
    }

    #[test]
    fn small_wedge_is_one_piece() {
        let pieces = wedge_segments(&wedge(0.2));
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0][0], [0.0, 0.0]);
    }

    #[test]
    fn full_circle_is_split_into_quarter_turns() {
        let pieces = wedge_segments(&wedge(1.0));
        assert_eq!(pieces.len(), 4);
        for piece in &pieces {
            assert_eq!(piece[0], [0.0, 0.0]);
            for p in &piece[1..] {
                let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
                assert!((r - 1.0).abs() < 1e-9);
            }
        }
        // First arc point sits at 12 o'clock.
        let top = pieces[0][1];
        assert!(top[0].abs() < 1e-9 && (top[1] - 1.0).abs() < 1e-9);
    }
}
