pub mod dashboard;
pub mod state;

pub use dashboard::DashboardOrchestrator;
pub use state::{DashboardSnapshot, DashboardState, RequestOutcome};
