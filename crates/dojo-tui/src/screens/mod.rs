//! Screens. The learner dashboard is the only one.

pub mod dashboard;

pub use dashboard::DashboardScreen;
