//! Terminal dashboard for a construction-management REST API: works
//! (obras), employees, materials and projects.

pub mod api;
pub mod app;
pub mod config;
pub mod format;
pub mod logging;
pub mod models;
pub mod ui;
