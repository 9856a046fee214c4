//! Response types for the leave ledger API.
//!
//! This module defines the error response structures and the mapping from
//! [`LedgerError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::ledger::{LedgerSummary, SettlementCandidate};
use crate::models::Record;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying a validation error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<LedgerError> for ApiErrorResponse {
    fn from(error: LedgerError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            LedgerError::InvalidAmount { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_AMOUNT", message),
            ),
            LedgerError::InvalidRecord { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_RECORD", message),
            ),
            LedgerError::MissingHireDate { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "MISSING_HIRE_DATE",
                    message,
                    "A hire date is required to resolve the entitlement cycle",
                ),
            ),
            LedgerError::AuthorizationFailed => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("AUTHORIZATION_FAILED", message),
            ),
            LedgerError::NotPermitted { .. } => (
                StatusCode::FORBIDDEN,
                ApiError::new("NOT_PERMITTED", message),
            ),
            LedgerError::UserNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("USER_NOT_FOUND", message),
            ),
            LedgerError::RecordNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("RECORD_NOT_FOUND", message),
            ),
            LedgerError::RecordFinalized { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("RECORD_FINALIZED", message),
            ),
            LedgerError::InsufficientBalance { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("INSUFFICIENT_BALANCE", message),
            ),
            LedgerError::PersistenceUnavailable { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::with_details(
                    "PERSISTENCE_UNAVAILABLE",
                    message,
                    "The store is unavailable; no changes were made. Retry later",
                ),
            ),
            LedgerError::ConfigNotFound { .. } | LedgerError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// Body of a successful settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementResponse {
    /// The emitted record.
    pub record: Record,
    /// Hourly rate used for a cash-out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    /// Amount paid for a cash-out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_value: Option<Decimal>,
}

/// Body of `GET /summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Ledger-wide totals.
    #[serde(flatten)]
    pub summary: LedgerSummary,
    /// Members and the settlements open to them.
    pub settlement_candidates: Vec<SettlementCandidate>,
}

/// Body of `GET /calendar/:date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarResponse {
    /// The requested day.
    pub date: chrono::NaiveDate,
    /// Approved records and roster duty on that day.
    pub entries: Vec<Record>,
}
