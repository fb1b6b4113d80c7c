use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LeaveStatus::Pending)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LeaveAction {
    Approve,
    Reject,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, derive_more::Display)]
pub enum TransitionError {
    /// The request was resolved earlier and the action disagrees with that resolution.
    #[display(fmt = "request already resolved as {}", _0)]
    AlreadyResolved(LeaveStatus),
}

/// Status state machine. Allowed pairs:
/// pending -> approved, pending -> rejected,
/// approved + approve and rejected + reject are no-ops;
/// everything else is a transition error.
pub fn transition(current: LeaveStatus, action: LeaveAction) -> Result<LeaveStatus, TransitionError> {
    match (current, action) {
        (LeaveStatus::Pending, LeaveAction::Approve) => Ok(LeaveStatus::Approved),
        (LeaveStatus::Pending, LeaveAction::Reject) => Ok(LeaveStatus::Rejected),
        (LeaveStatus::Approved, LeaveAction::Approve) => Ok(LeaveStatus::Approved),
        (LeaveStatus::Rejected, LeaveAction::Reject) => Ok(LeaveStatus::Rejected),
        (resolved, _) => Err(TransitionError::AlreadyResolved(resolved)),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "5b9f9a2e-8a77-4d37-9e41-2b1d9a6f01c3",
        "user_id": "4",
        "user_name": "Employee 1",
        "store_id": "1",
        "store_name": "Paris Store",
        "start_date": "2026-01-05",
        "end_date": "2026-01-09",
        "reason": "Vacances d'été",
        "status": "pending",
        "created_at": "2026-01-01T00:00:00Z"
    })
)]
pub struct LeaveRequest {
    pub id: String,

    pub user_id: String,
    pub user_name: String,

    pub store_id: String,
    pub store_name: String,

    /// Inclusive range start
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    /// Inclusive range end
    #[schema(example = "2026-01-09", format = "date", value_type = String)]
    pub end_date: NaiveDate,

    pub reason: String,

    pub status: LeaveStatus,

    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Inclusive on both ends.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}
