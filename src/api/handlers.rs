//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::{BatchSalaryRequest, CalculateSalaryRequest};
use super::response::{ApiError, ApiErrorResponse, HealthResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/salary/calculate", post(calculate_handler))
        .route("/salary/batch", post(batch_handler))
        .with_state(state)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Handler for `POST /salary/calculate`.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateSalaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let period = match request.validate() {
        Ok(period) => period,
        Err(error) => {
            warn!(correlation_id = %correlation_id, code = %error.code, "Invalid request");
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let engine = state.engine().clone();
    let employee_id = request.employee_id.clone();
    let start_time = Instant::now();
    let outcome = tokio::task::spawn_blocking(move || {
        engine.calculate_employee_salary(&employee_id, period)
    })
    .await;

    match outcome {
        Ok(Ok(payslip)) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %payslip.employee_id,
                period = %period,
                gross_earnings = %payslip.gross_earnings,
                net_pay = %payslip.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Salary calculation completed"
            );
            (StatusCode::OK, Json(payslip)).into_response()
        }
        Ok(Err(err)) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                error = %err,
                "Salary calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
        Err(join_error) => {
            warn!(correlation_id = %correlation_id, error = %join_error, "Calculation task failed");
            ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("CALCULATION_ERROR", "Calculation task did not complete"),
            }
            .into_response()
        }
    }
}

/// Handler for `POST /salary/batch`.
///
/// Per-employee failures are part of the 200 body; only request or listing
/// errors produce an error status.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchSalaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch payroll request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let (period, department_id) = match request.validate() {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!(correlation_id = %correlation_id, code = %error.code, "Invalid request");
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let start_time = Instant::now();
    match state
        .engine()
        .batch_calculate_salary_concurrent(period, department_id, None)
        .await
    {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                period = %period,
                succeeded = result.succeeded.len(),
                failed = result.failed.len(),
                total_net = %result.total_net,
                duration_us = start_time.elapsed().as_micros(),
                "Batch payroll completed"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Batch payroll failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
