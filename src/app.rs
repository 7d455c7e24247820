use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
    pub config: DashboardConfig,
}

impl LaunchDashApp {
    pub fn new(state: AppState, config: DashboardConfig) -> Self {
        Self { state, config }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: toolbar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dropdown + payload range ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: records table (optional) ----
        if self.state.show_records {
            egui::TopBottomPanel::bottom("records_panel")
                .resizable(true)
                .default_height(200.0)
                .show(ctx, |ui| {
                    table::records_table(ui, &self.state, self.config.table_row_height);
                });
        }

        // ---- Central panel: both charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(
                    egui::RichText::new(&self.config.window_title)
                        .size(28.0)
                        .color(egui::Color32::from_rgb(0x50, 0x3d, 0x36)),
                );
            });
            ui.separator();

            // Two headings plus spacing share the height with the plots.
            let chart_height = ((ui.available_height() - 80.0) / 2.0).max(120.0);
            plot::success_pie(ui, &self.state, chart_height);
            ui.add_space(8.0);
            plot::success_payload_scatter(ui, &self.state, &self.config, chart_height);
        });
    }
}
