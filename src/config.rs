use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup settings. There are no flags or config files: a fresh process
/// always starts from these defaults.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Launch records file, resolved against the working directory.
    pub dataset_path: PathBuf,
    pub window_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    /// Scatter marker radius in points.
    pub marker_radius: f32,
    /// Row height of the records table.
    pub table_row_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("spacex_launch_dash.csv"),
            window_title: "SpaceX Launch Records Dashboard".to_string(),
            inner_size: [1200.0, 900.0],
            min_inner_size: [600.0, 500.0],
            marker_radius: 4.0,
            table_row_height: 18.0,
        }
    }
}
