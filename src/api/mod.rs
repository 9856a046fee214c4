//! HTTP API module for the leave ledger.
//!
//! This module exposes balances, request submission and review, roster
//! duty, settlements and the admin overview as REST endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AsOfQuery, ReviewRequest, RosterRequest, SettlementRequest, SubmitRecordRequest, VerifyRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, CalendarResponse, SettlementResponse, SummaryResponse,
};
pub use state::AppState;
