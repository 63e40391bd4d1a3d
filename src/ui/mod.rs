// UI module: dashboard rendering and the input/presentation loop

pub mod dashboard;
pub mod event;
pub mod render;
pub mod widgets;

pub use dashboard::{run_tracker_app, DashboardApp};
