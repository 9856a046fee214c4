//! Request types for the leave ledger API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! endpoints, and their conversion into ledger types.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{RequestDraft, ReviewDecision, SettlementAction, SettlementCommand};
use crate::models::{Amount, Bucket, Category};

/// Optional `as_of` query parameter. Defaults to today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AsOfQuery {
    /// The day to evaluate the ledger on.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Request body for `POST /records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRecordRequest {
    /// The user filing the request.
    pub actor_id: String,
    /// The user the request is for. Defaults to the actor.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Leave or overtime.
    pub category: Category,
    /// Bucket to draw leave from.
    #[serde(default = "default_bucket", rename = "type")]
    pub bucket: Bucket,
    /// Requested hours.
    #[serde(default)]
    pub amount: Amount,
    /// The day of the leave or overtime.
    pub date: NaiveDate,
    /// Clock start.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// Clock end.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

fn default_bucket() -> Bucket {
    Bucket::Annual
}

impl SubmitRecordRequest {
    /// The user the request is filed for.
    pub fn target_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or(&self.actor_id)
    }
}

impl From<SubmitRecordRequest> for RequestDraft {
    fn from(req: SubmitRecordRequest) -> Self {
        RequestDraft {
            category: req.category,
            bucket: req.bucket,
            amount: req.amount,
            date: req.date,
            start_time: req.start_time,
            end_time: req.end_time,
            reason: req.reason,
        }
    }
}

/// Request body for `POST /records/:id/review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// The reviewing admin.
    pub actor_id: String,
    /// Approve or reject.
    pub decision: ReviewDecision,
}

/// Request body for `POST /roster`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRequest {
    /// The admin assigning duty.
    pub actor_id: String,
    /// The user put on duty.
    pub user_id: String,
    /// The duty day.
    pub date: NaiveDate,
    /// Optional note shown on the calendar.
    #[serde(default)]
    pub note: String,
}

/// Request body for `POST /settlements`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRequest {
    /// The admin running the settlement.
    pub actor_id: String,
    /// Defer or cash out.
    pub action: SettlementAction,
    /// The user whose hours are settled.
    pub user_id: String,
    /// The bucket to settle.
    #[serde(rename = "type")]
    pub bucket: Bucket,
    /// Hours to settle.
    pub amount: Decimal,
    /// Admin secret. Required for a deferral.
    #[serde(default)]
    pub secret: Option<String>,
    /// Day whose cycle is settled. Defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl SettlementRequest {
    /// The settlement command carried by this request.
    pub fn command(&self) -> SettlementCommand {
        SettlementCommand {
            action: self.action,
            user_id: self.user_id.clone(),
            bucket: self.bucket,
            amount: self.amount,
        }
    }
}

/// Request body for `POST /auth/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// The user asking for the admin area.
    pub user_id: String,
    /// The admin secret.
    pub secret: String,
}
