//! HTTP request handlers for the leave ledger API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::LedgerResult;

use super::request::{
    AsOfQuery, ReviewRequest, RosterRequest, SettlementRequest, SubmitRecordRequest, VerifyRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, CalendarResponse, SettlementResponse, SummaryResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/users/:id/balance", get(balance_handler))
        .route("/records", post(submit_record_handler))
        .route("/records/:id/review", post(review_handler))
        .route("/roster", post(roster_handler))
        .route("/settlements", post(settlement_handler))
        .route("/auth/verify", post(verify_handler))
        .route("/summary", get(summary_handler))
        .route("/calendar/:date", get(calendar_handler))
        .with_state(state)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a ledger result to a response, logging the failure.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    status: StatusCode,
    result: LedgerResult<T>,
) -> Response {
    match result {
        Ok(body) => json_response(status, body),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                retryable = err.is_retryable(),
                "Request failed"
            );
            error_response(err.into())
        }
    }
}

/// Turns a body rejection into a 400 with a descriptive error.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
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
    error_response(ApiErrorResponse::bad_request(error))
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %rejection.body_text(),
        "Query string error"
    );
    error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
        rejection.body_text(),
    )))
}

/// Handler for GET /users/:id/balance.
async fn balance_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<AsOfQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = %user_id, "Processing balance request");

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    let as_of = query.as_of.unwrap_or_else(today);

    let result = state.service().balance(&user_id, as_of).await;
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /records.
async fn submit_record_handler(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRecordRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing record submission");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let actor_id = request.actor_id.clone();
    let target_id = request.target_id().to_string();
    let result = state
        .service()
        .submit_request(&actor_id, &target_id, request.into())
        .await;
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for POST /records/:id/review.
async fn review_handler(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, record_id = %record_id, "Processing review");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = state
        .service()
        .review(&request.actor_id, &record_id, request.decision)
        .await;
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /roster.
async fn roster_handler(
    State(state): State<AppState>,
    payload: Result<Json<RosterRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing roster entry");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = state
        .service()
        .add_roster(&request.actor_id, &request.user_id, request.date, &request.note)
        .await;
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for POST /settlements.
async fn settlement_handler(
    State(state): State<AppState>,
    payload: Result<Json<SettlementRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settlement");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = state
        .service()
        .settle(
            &request.actor_id,
            &request.command(),
            request.secret.as_deref(),
            request.as_of.unwrap_or_else(today),
        )
        .await
        .map(|outcome| SettlementResponse {
            record: outcome.record,
            hourly_rate: outcome.hourly_rate,
            cash_value: outcome.cash_value,
        });
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for POST /auth/verify.
async fn verify_handler(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, user_id = %request.user_id, "Verifying admin access");

    let result = state
        .service()
        .verify_admin(&request.user_id, &request.secret)
        .await
        .map(|()| serde_json::json!({ "verified": true }));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /summary.
async fn summary_handler(
    State(state): State<AppState>,
    query: Result<Query<AsOfQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    let as_of = query.as_of.unwrap_or_else(today);

    let service = state.service();
    let result = match service.summary(as_of).await {
        Ok(summary) => service
            .settlement_candidates(as_of)
            .await
            .map(|settlement_candidates| SummaryResponse {
                summary,
                settlement_candidates,
            }),
        Err(err) => Err(err),
    };
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /calendar/:date.
async fn calendar_handler(State(state): State<AppState>, Path(date): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, date = %date, "Processing calendar request");

    let Ok(date) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
        return error_response(ApiErrorResponse::bad_request(ApiError::with_details(
            "VALIDATION_ERROR",
            format!("Invalid date: {}", date),
            "Dates must be formatted as YYYY-MM-DD",
        )));
    };

    let result = state
        .service()
        .calendar(date)
        .await
        .map(|entries| CalendarResponse { date, entries });
    respond(correlation_id, StatusCode::OK, result)
}
