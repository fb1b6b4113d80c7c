use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::model::role::Role;
use crate::model::user::User;
use serde::Serialize;
use utoipa::ToSchema;

/// Review-table visibility (the management view).
///
/// Admins see everything, optionally narrowed by an explicit store filter;
/// managers see their own store regardless of the filter; everyone else sees
/// nothing. A manager without a store resolves to nothing as well.
pub fn review_scope(
    user: &User,
    store_filter: Option<&str>,
    requests: &[LeaveRequest],
) -> Vec<LeaveRequest> {
    requests
        .iter()
        .filter(|request| match user.role {
            Role::Admin => store_filter.is_none_or(|id| request.store_id == id),
            Role::Manager => user
                .store_id
                .as_deref()
                .is_some_and(|id| request.store_id == id),
            Role::Employee => false,
        })
        .cloned()
        .collect()
}

/// The caller's own requests, in collection order (newest first).
pub fn personal_scope(user: &User, requests: &[LeaveRequest]) -> Vec<LeaveRequest> {
    requests
        .iter()
        .filter(|request| request.user_id == user.id)
        .cloned()
        .collect()
}

/// Calendar visibility: store-wide for managers and employees so the whole
/// team's coverage shows, all stores (or an explicit filter) for admins.
pub fn calendar_scope(
    user: &User,
    store_filter: Option<&str>,
    requests: &[LeaveRequest],
) -> Vec<LeaveRequest> {
    let scope: Option<Option<&str>> = match user.role {
        Role::Admin => Some(store_filter),
        Role::Manager | Role::Employee => user.store_id.as_deref().map(Some),
    };

    let Some(store_filter) = scope else {
        // No resolvable store context: fail closed.
        return Vec::new();
    };

    requests
        .iter()
        .filter(|request| store_filter.is_none_or(|id| request.store_id == id))
        .cloned()
        .collect()
}

/// Pending requests first, then most recently created first within each
/// partition. Approved and rejected are not ordered against each other by
/// status.
pub fn sort_for_review(requests: &mut [LeaveRequest]) {
    requests.sort_by(|a, b| {
        b.status
            .is_pending()
            .cmp(&a.status.is_pending())
            .then(b.created_at.cmp(&a.created_at))
    });
}

pub fn pending_count(requests: &[LeaveRequest]) -> usize {
    requests.iter().filter(|r| r.status.is_pending()).count()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Counters {
    /// Requests submitted by the caller
    #[schema(example = 2)]
    pub my_requests: usize,
    /// Caller's requests that were approved
    #[schema(example = 1)]
    pub my_approved: usize,
    /// Pending requests within the caller's store scope (all stores for an
    /// admin without a store)
    #[schema(example = 3)]
    pub pending: usize,
}

pub fn counters(user: &User, requests: &[LeaveRequest]) -> Counters {
    let mine = personal_scope(user, requests);

    let in_scope = requests
        .iter()
        .filter(|request| match user.store_id.as_deref() {
            Some(id) => request.store_id == id,
            None => true,
        });

    Counters {
        my_requests: mine.len(),
        my_approved: mine
            .iter()
            .filter(|r| r.status == LeaveStatus::Approved)
            .count(),
        pending: in_scope.filter(|r| r.status.is_pending()).count(),
    }
}
