//! HTTP API for the payroll engine.
//!
//! This module wires the engine components behind a REST-style axum
//! router: record listing and generation, single and bulk workflow
//! transitions, CSV export/import, and payslip rendering.

pub mod handlers;
pub mod request;
pub mod response;
pub mod state;

pub use handlers::create_router;
pub use state::AppState;
