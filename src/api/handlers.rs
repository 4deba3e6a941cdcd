//! HTTP request handlers for the Commission Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::CommissionPolicy;
use crate::error::EngineError;
use crate::models::{
    CommissionBreakdown, EmployeeFigures, FieldUpdate, FlatRecord, MonthlyFigures,
};

use super::request::{
    EmployeeFiguresRequest, FieldUpdateRequest, MonthlyFiguresRequest, NewMonthRequest,
    OvertimeUpdateRequest, RebuildRequest,
};
use super::response::{ApiError, ApiErrorResponse, CalculationEnvelope};
use super::state::AppState;

type ApiResult<T> = Result<CalculationEnvelope<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/policy", get(policy_handler))
        .route("/monthly-figures", post(new_month_handler))
        .route("/monthly-figures/calculate", post(monthly_figures_handler))
        .route("/monthly-figures/update", post(field_update_handler))
        .route("/monthly-figures/overtime", post(overtime_update_handler))
        .route("/employee-figures/calculate", post(employee_figures_handler))
        .route("/records/flatten", post(flatten_handler))
        .route("/records/rebuild", post(rebuild_handler))
        .route("/records/months", post(months_handler))
        .with_state(state)
}

/// Handler for GET /policy.
async fn policy_handler(State(state): State<AppState>) -> ApiResult<CommissionPolicy> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Serving commission policy");
    Ok(CalculationEnvelope::new(
        correlation_id,
        state.engine().policy().clone(),
    ))
}

/// Handler for POST /monthly-figures.
///
/// Returns a zeroed month, optionally already labelled.
async fn new_month_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewMonthRequest>, JsonRejection>,
) -> ApiResult<MonthlyFigures> {
    let correlation_id = Uuid::new_v4();
    let request = parse_payload(payload, correlation_id)?;
    let engine = state.engine();

    let mut month = engine.new_month();
    if let Some(label) = request.month {
        month = engine
            .apply_field_update(&month, FieldUpdate::Month(label))
            .map_err(|err| engine_error(correlation_id, err))?;
    }

    info!(
        correlation_id = %correlation_id,
        month = %month.month(),
        entries = month.entries().len(),
        "Created month"
    );
    Ok(CalculationEnvelope::new(correlation_id, month))
}

/// Handler for POST /monthly-figures/calculate.
async fn monthly_figures_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyFiguresRequest>, JsonRejection>,
) -> ApiResult<CommissionBreakdown> {
    let correlation_id = Uuid::new_v4();
    let request = parse_payload(payload, correlation_id)?;
    let engine = state.engine();

    let vat_percent = request
        .vat_percent
        .unwrap_or(engine.policy().default_vat_percent);
    let breakdown = engine
        .compute_monthly_figures(request.total_sales, vat_percent)
        .map_err(|err| engine_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        total_sales = %request.total_sales,
        vat_percent = %vat_percent,
        net_shared = %breakdown.net_shared_commission_per_person,
        "Calculated monthly figures"
    );
    Ok(CalculationEnvelope::new(correlation_id, breakdown))
}

/// Handler for POST /monthly-figures/update.
async fn field_update_handler(
    State(state): State<AppState>,
    payload: Result<Json<FieldUpdateRequest>, JsonRejection>,
) -> ApiResult<MonthlyFigures> {
    let correlation_id = Uuid::new_v4();
    let request = parse_payload(payload, correlation_id)?;

    let update = request
        .to_update()
        .map_err(|err| engine_error(correlation_id, err))?;
    let field = update.field_name();
    let recalculated = update.triggers_recalculation();
    let month = state
        .engine()
        .apply_field_update(&request.figures, update)
        .map_err(|err| engine_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        field,
        recalculated,
        "Applied field update"
    );
    Ok(CalculationEnvelope::new(correlation_id, month))
}

/// Handler for POST /monthly-figures/overtime.
async fn overtime_update_handler(
    State(state): State<AppState>,
    payload: Result<Json<OvertimeUpdateRequest>, JsonRejection>,
) -> ApiResult<MonthlyFigures> {
    let correlation_id = Uuid::new_v4();
    let request = parse_payload(payload, correlation_id)?;

    let month = state
        .engine()
        .apply_overtime_update(&request.figures, request.employee_id, request.overtime)
        .map_err(|err| engine_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Applied overtime update"
    );
    Ok(CalculationEnvelope::new(correlation_id, month))
}

/// Handler for POST /employee-figures/calculate.
async fn employee_figures_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeFiguresRequest>, JsonRejection>,
) -> ApiResult<EmployeeFigures> {
    let correlation_id = Uuid::new_v4();
    let request = parse_payload(payload, correlation_id)?;

    let figures = state
        .engine()
        .compute_employee_figures(request.net_shared_commission_per_person, request.overtime)
        .map_err(|err| engine_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        final_amount = %figures.final_amount,
        "Calculated employee figures"
    );
    Ok(CalculationEnvelope::new(correlation_id, figures))
}

/// Handler for POST /records/flatten.
async fn flatten_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyFigures>, JsonRejection>,
) -> ApiResult<Vec<FlatRecord>> {
    let correlation_id = Uuid::new_v4();
    let figures = parse_payload(payload, correlation_id)?;

    let records = state.engine().to_flat_records(&figures);
    if records.len() < figures.entries().len() {
        warn!(
            correlation_id = %correlation_id,
            month = %figures.month(),
            skipped = figures.entries().len() - records.len(),
            "Skipped entries without a month label or roster match"
        );
    }

    info!(correlation_id = %correlation_id, records = records.len(), "Flattened month");
    Ok(CalculationEnvelope::new(correlation_id, records))
}

/// Handler for POST /records/rebuild.
async fn rebuild_handler(
    State(state): State<AppState>,
    payload: Result<Json<RebuildRequest>, JsonRejection>,
) -> ApiResult<MonthlyFigures> {
    let correlation_id = Uuid::new_v4();
    let request = parse_payload(payload, correlation_id)?;
    let engine = state.engine();

    let month = match &request.month {
        Some(label) => engine.load_month(&request.records, label),
        None => engine.from_flat_records(&request.records),
    }
    .map_err(|err| engine_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        month = %month.month(),
        entries = month.entries().len(),
        "Rebuilt month from records"
    );
    Ok(CalculationEnvelope::new(correlation_id, month))
}

/// Handler for POST /records/months.
async fn months_handler(
    State(state): State<AppState>,
    payload: Result<Json<Vec<FlatRecord>>, JsonRejection>,
) -> ApiResult<Vec<String>> {
    let correlation_id = Uuid::new_v4();
    let records = parse_payload(payload, correlation_id)?;

    let months = state.engine().available_months(&records);
    info!(correlation_id = %correlation_id, months = months.len(), "Listed months");
    Ok(CalculationEnvelope::new(correlation_id, months))
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn parse_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse::bad_request(error))
}

fn engine_error(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request rejected");
    err.into()
}
