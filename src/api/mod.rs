//! HTTP API module for the Commission Engine.
//!
//! This module exposes the engine's calculations and record mapping as JSON
//! endpoints for the commission form front end.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    EmployeeFiguresRequest, FieldUpdateRequest, MonthlyFiguresRequest, NewMonthRequest,
    OvertimeUpdateRequest, RebuildRequest,
};
pub use response::{ApiError, ApiErrorResponse, CalculationEnvelope};
pub use state::AppState;
