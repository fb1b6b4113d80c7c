use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::model::leave_request::{LeaveAction, LeaveRequest, LeaveStatus, transition};
use crate::model::user::User;

#[derive(Debug, Eq, PartialEq, derive_more::Display)]
pub enum CreateError {
    #[display(fmt = "A reason is required")]
    MissingReason,
    #[display(fmt = "The requester is not attached to a store")]
    MissingStore,
    #[display(fmt = "The end date cannot be before the start date")]
    InvertedRange,
}

/// What a resolve attempt actually did. Not-found and already-resolved are
/// surfaced here for logging but are not errors.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResolveOutcome {
    Updated,
    Unchanged,
    NotFound,
}

/// In-memory collection of leave requests shared across workers.
///
/// Consumers poll `revision()` to detect changes; every mutation bumps it.
/// All operations complete synchronously and leave the collection either
/// fully updated or untouched.
#[derive(Default)]
pub struct LeaveStore {
    requests: RwLock<Vec<LeaveRequest>>,
    revision: AtomicU64,
}

impl LeaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_requests(requests: Vec<LeaveRequest>) -> Self {
        Self {
            requests: RwLock::new(requests),
            revision: AtomicU64::new(0),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::Release);
    }

    pub fn len(&self) -> usize {
        self.requests.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cloned view of the collection in insertion order (newest first).
    pub fn snapshot(&self) -> Vec<LeaveRequest> {
        self.requests.read().unwrap().clone()
    }

    /// Boot-time load from the persistence collaborator.
    pub fn replace_all(&self, requests: Vec<LeaveRequest>) {
        *self.requests.write().unwrap() = requests;
        self.bump();
    }

    /// Validates a submission and builds the pending record without touching
    /// the collection, so the collaborator write can go first.
    pub fn prepare(
        user: &User,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: &str,
    ) -> Result<LeaveRequest, CreateError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(CreateError::MissingReason);
        }

        let store_id = user.store_id.clone().ok_or(CreateError::MissingStore)?;
        let store_name = user
            .store
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_default();

        if end_date < start_date {
            return Err(CreateError::InvertedRange);
        }

        Ok(LeaveRequest {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            store_id,
            store_name,
            start_date,
            end_date,
            reason: reason.to_string(),
            status: LeaveStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Newest-first insertion order: new records go to the head.
    pub fn insert_head(&self, request: LeaveRequest) {
        self.requests.write().unwrap().insert(0, request);
        self.bump();
    }

    /// Validate and insert in one step (fixture/demo path with no
    /// collaborator in between).
    pub fn create(
        &self,
        user: &User,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: &str,
    ) -> Result<LeaveRequest, CreateError> {
        let request = Self::prepare(user, start_date, end_date, reason)?;
        self.insert_head(request.clone());
        Ok(request)
    }

    pub fn find(&self, id: &str) -> Option<LeaveRequest> {
        self.requests.read().unwrap().iter().find(|r| r.id == id).cloned()
    }

    /// Store the given request belongs to, if it exists.
    pub fn request_store(&self, id: &str) -> Option<String> {
        self.requests
            .read()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.store_id.clone())
    }

    /// What `resolve` would do, without mutating. Used to decide whether the
    /// persistence collaborator needs a write at all.
    pub fn peek_resolution(&self, id: &str, action: LeaveAction) -> ResolveOutcome {
        match self.find(id) {
            None => ResolveOutcome::NotFound,
            Some(request) => match transition(request.status, action) {
                Ok(next) if next != request.status => ResolveOutcome::Updated,
                Ok(_) => ResolveOutcome::Unchanged,
                Err(_) => ResolveOutcome::Unchanged,
            },
        }
    }

    /// Applies an approve/reject action. Unknown ids and already-resolved
    /// requests are silent no-ops; the first resolution wins.
    pub fn resolve(&self, id: &str, action: LeaveAction) -> ResolveOutcome {
        let mut requests = self.requests.write().unwrap();

        let Some(request) = requests.iter_mut().find(|r| r.id == id) else {
            return ResolveOutcome::NotFound;
        };

        match transition(request.status, action) {
            Ok(next) if next != request.status => {
                request.status = next;
                drop(requests);
                self.bump();
                ResolveOutcome::Updated
            }
            Ok(_) => ResolveOutcome::Unchanged,
            Err(err) => {
                tracing::debug!(id, %err, "resolution ignored");
                ResolveOutcome::Unchanged
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;
    use crate::model::store::find_store;

    fn employee() -> User {
        User {
            id: "4".into(),
            name: "Employee 1".into(),
            email: "emp1@example.com".into(),
            role: Role::Employee,
            store_id: Some("1".into()),
            store: find_store("1"),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn inverted_range_is_rejected_without_state_change() {
        let store = LeaveStore::new();
        let err = store.create(&employee(), day(9), day(5), "x").unwrap_err();
        assert_eq!(err, CreateError::InvertedRange);
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn blank_reason_is_rejected() {
        let store = LeaveStore::new();
        let err = store.create(&employee(), day(5), day(9), "   ").unwrap_err();
        assert_eq!(err, CreateError::MissingReason);
        assert!(store.is_empty());
    }

    #[test]
    fn requester_without_store_is_rejected() {
        let store = LeaveStore::new();
        let mut user = employee();
        user.store_id = None;
        user.store = None;
        let err = store.create(&user, day(5), day(9), "x").unwrap_err();
        assert_eq!(err, CreateError::MissingStore);
    }

    #[test]
    fn single_day_range_is_accepted() {
        let store = LeaveStore::new();
        let created = store.create(&employee(), day(5), day(5), "x").unwrap();
        assert_eq!(created.status, LeaveStatus::Pending);
        assert_eq!(created.store_name, "Paris Store");
    }

    #[test]
    fn new_requests_land_at_the_head() {
        let store = LeaveStore::new();
        let first = store.create(&employee(), day(5), day(9), "first").unwrap();
        let second = store.create(&employee(), day(10), day(12), "second").unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].id, second.id);
        assert_eq!(snapshot[1].id, first.id);
    }

    #[test]
    fn approve_then_reject_keeps_the_first_resolution() {
        let store = LeaveStore::new();
        let created = store.create(&employee(), day(5), day(9), "x").unwrap();

        assert_eq!(store.resolve(&created.id, LeaveAction::Approve), ResolveOutcome::Updated);
        assert_eq!(store.resolve(&created.id, LeaveAction::Reject), ResolveOutcome::Unchanged);
        assert_eq!(store.find(&created.id).unwrap().status, LeaveStatus::Approved);
    }

    #[test]
    fn re_approving_is_a_silent_noop() {
        let store = LeaveStore::new();
        let created = store.create(&employee(), day(5), day(9), "x").unwrap();

        store.resolve(&created.id, LeaveAction::Approve);
        let revision = store.revision();
        assert_eq!(store.resolve(&created.id, LeaveAction::Approve), ResolveOutcome::Unchanged);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn unknown_id_is_a_silent_noop() {
        let store = LeaveStore::new();
        store.create(&employee(), day(5), day(9), "x").unwrap();
        let before = store.snapshot();

        assert_eq!(store.resolve("missing", LeaveAction::Approve), ResolveOutcome::NotFound);
        assert_eq!(store.snapshot().len(), before.len());
    }

    #[test]
    fn mutations_bump_the_revision() {
        let store = LeaveStore::new();
        assert_eq!(store.revision(), 0);

        let created = store.create(&employee(), day(5), day(9), "x").unwrap();
        assert_eq!(store.revision(), 1);

        store.resolve(&created.id, LeaveAction::Reject);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn peek_matches_resolve() {
        let store = LeaveStore::new();
        let created = store.create(&employee(), day(5), day(9), "x").unwrap();

        assert_eq!(store.peek_resolution(&created.id, LeaveAction::Approve), ResolveOutcome::Updated);
        assert_eq!(store.peek_resolution("missing", LeaveAction::Approve), ResolveOutcome::NotFound);

        store.resolve(&created.id, LeaveAction::Approve);
        assert_eq!(store.peek_resolution(&created.id, LeaveAction::Reject), ResolveOutcome::Unchanged);
    }

    #[test]
    fn overlapping_requests_by_the_same_user_are_both_accepted() {
        let store = LeaveStore::new();
        store.create(&employee(), day(5), day(9), "first").unwrap();
        store.create(&employee(), day(7), day(11), "second").unwrap();
        assert_eq!(store.len(), 2);
    }
}
