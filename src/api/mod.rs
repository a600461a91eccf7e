//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for calculating a single
//! employee's payslip and for running a batch payroll.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BatchSalaryRequest, CalculateSalaryRequest};
pub use response::{ApiError, ApiErrorResponse, HealthResponse};
pub use state::AppState;
