use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use futures_util::StreamExt;
use sqlx::MySqlPool;
use sqlx::prelude::FromRow;

use crate::model::leave_request::{LeaveRequest, LeaveStatus};

#[derive(Debug, derive_more::Display)]
pub enum RepositoryError {
    #[display(fmt = "leave request collaborator unavailable: {}", _0)]
    Unavailable(String),
}

impl std::error::Error for RepositoryError {}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::Unavailable(err.to_string())
    }
}

/// Persistence seam for the leave request collection.
///
/// The in-memory container stays the source the views read from; this trait
/// only loads it at boot and mirrors mutations to the collaborator.
#[async_trait]
pub trait LeaveRepository: Send + Sync {
    async fn load_all(&self) -> Result<Vec<LeaveRequest>, RepositoryError>;

    async fn insert(&self, request: &LeaveRequest) -> Result<(), RepositoryError>;

    async fn set_status(&self, id: &str, status: LeaveStatus) -> Result<(), RepositoryError>;
}

/// Demo/test collection mirroring the hosted service's seed data.
pub fn mock_leave_requests() -> Vec<LeaveRequest> {
    let today = Utc::now();
    let day = |offset: i64| (today + Duration::days(offset)).date_naive();

    let request = |id: &str,
                   user_id: &str,
                   user_name: &str,
                   store_id: &str,
                   store_name: &str,
                   start: NaiveDate,
                   end: NaiveDate,
                   reason: &str,
                   status: LeaveStatus| LeaveRequest {
        id: id.to_string(),
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        store_id: store_id.to_string(),
        store_name: store_name.to_string(),
        start_date: start,
        end_date: end,
        reason: reason.to_string(),
        status,
        created_at: today,
    };

    vec![
        request(
            "1",
            "4",
            "Employee 1",
            "1",
            "Paris Store",
            day(5),
            day(9),
            "Vacances d'été",
            LeaveStatus::Pending,
        ),
        request(
            "2",
            "5",
            "Employee 2",
            "1",
            "Paris Store",
            day(8),
            day(12),
            "Raison familiale",
            LeaveStatus::Approved,
        ),
        request(
            "3",
            "6",
            "Employee 3",
            "2",
            "Lyon Store",
            day(3),
            day(7),
            "Maladie",
            LeaveStatus::Rejected,
        ),
        request(
            "4",
            "4",
            "Employee 1",
            "1",
            "Paris Store",
            day(20),
            day(25),
            "Congés personnels",
            LeaveStatus::Pending,
        ),
    ]
}

/// In-memory repository used for demos and tests. Writes always succeed.
#[derive(Default)]
pub struct FixtureLeaveRepository {
    records: Mutex<Vec<LeaveRequest>>,
}

impl FixtureLeaveRepository {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        Self {
            records: Mutex::new(mock_leave_requests()),
        }
    }
}

#[async_trait]
impl LeaveRepository for FixtureLeaveRepository {
    async fn load_all(&self) -> Result<Vec<LeaveRequest>, RepositoryError> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn insert(&self, request: &LeaveRequest) -> Result<(), RepositoryError> {
        self.records.lock().unwrap().insert(0, request.clone());
        Ok(())
    }

    async fn set_status(&self, id: &str, status: LeaveStatus) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            record.status = status;
        }
        Ok(())
    }
}

#[derive(FromRow)]
struct LeaveRow {
    id: String,
    user_id: String,
    user_name: String,
    store_id: String,
    store_name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<LeaveRow> for LeaveRequest {
    fn from(row: LeaveRow) -> Self {
        LeaveRequest {
            id: row.id,
            user_id: row.user_id,
            user_name: row.user_name,
            store_id: row.store_id,
            store_name: row.store_name,
            start_date: row.start_date,
            end_date: row.end_date,
            reason: row.reason,
            status: row.status.parse().unwrap_or(LeaveStatus::Pending),
            created_at: row.created_at,
        }
    }
}

const LEAVE_COLUMNS: &str =
    "id, user_id, user_name, store_id, store_name, start_date, end_date, reason, status, created_at";

/// Hosted-database collaborator.
pub struct MySqlLeaveRepository {
    pool: MySqlPool,
}

impl MySqlLeaveRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaveRepository for MySqlLeaveRepository {
    async fn load_all(&self) -> Result<Vec<LeaveRequest>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM leave_requests ORDER BY created_at DESC",
            LEAVE_COLUMNS
        );

        let mut stream = sqlx::query_as::<_, LeaveRow>(&sql).fetch(&self.pool);
        let mut requests = Vec::new();
        while let Some(row) = stream.next().await {
            requests.push(row?.into());
        }
        Ok(requests)
    }

    async fn insert(&self, request: &LeaveRequest) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO leave_requests
                (id, user_id, user_name, store_id, store_name, start_date, end_date, reason, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.id)
        .bind(&request.user_id)
        .bind(&request.user_name)
        .bind(&request.store_id)
        .bind(&request.store_name)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.reason)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_status(&self, id: &str, status: LeaveStatus) -> Result<(), RepositoryError> {
        // Unknown ids fall through with zero affected rows, matching the
        // in-memory no-op.
        sqlx::query("UPDATE leave_requests SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
