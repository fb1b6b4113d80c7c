use async_trait::async_trait;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;

use crate::auth::password::verify_password;
use crate::model::role::Role;
use crate::model::store::{DEFAULT_STORES, Store, find_store};
use crate::model::user::User;
use crate::models::UserSql;
use crate::utils::store_cache;

#[derive(Debug, derive_more::Display)]
pub enum DirectoryError {
    #[display(fmt = "identity collaborator unavailable: {}", _0)]
    Unavailable(String),
}

impl std::error::Error for DirectoryError {}

impl From<sqlx::Error> for DirectoryError {
    fn from(err: sqlx::Error) -> Self {
        DirectoryError::Unavailable(err.to_string())
    }
}

/// Identity and store-directory collaborator.
///
/// `authenticate` is a single request/response call: `Ok(Some(user))` opens a
/// session, `Ok(None)` rejects the credentials, `Err` means the collaborator
/// itself failed. There are no partial states.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str)
    -> Result<Option<User>, DirectoryError>;

    /// Ordered store list.
    async fn stores(&self) -> Result<Vec<Store>, DirectoryError>;
}

/// Demo account set mirroring the hosted directory.
pub static MOCK_USERS: Lazy<Vec<User>> = Lazy::new(|| {
    let user = |id: &str, name: &str, email: &str, role: Role, store_id: Option<&str>| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        store_id: store_id.map(str::to_string),
        store: store_id.and_then(find_store),
    };

    vec![
        user("1", "Admin", "admin@example.com", Role::Admin, None),
        user("2", "Paris Manager", "paris@example.com", Role::Manager, Some("1")),
        user("3", "Lyon Manager", "lyon@example.com", Role::Manager, Some("2")),
        user("4", "Employee 1", "emp1@example.com", Role::Employee, Some("1")),
        user("5", "Employee 2", "emp2@example.com", Role::Employee, Some("1")),
        user("6", "Employee 3", "emp3@example.com", Role::Employee, Some("2")),
    ]
});

/// In-memory directory for demos and tests. Matches on email only; any
/// non-empty password is accepted, like the hosted demo accounts.
#[derive(Default)]
pub struct FixtureDirectory;

impl FixtureDirectory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserDirectory for FixtureDirectory {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DirectoryError> {
        if password.is_empty() {
            return Ok(None);
        }

        Ok(MOCK_USERS
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn stores(&self) -> Result<Vec<Store>, DirectoryError> {
        Ok(DEFAULT_STORES.clone())
    }
}

/// Hosted-database directory: argon2-verified credentials, store rows
/// cached with a short TTL.
pub struct MySqlDirectory {
    pool: MySqlPool,
}

impl MySqlDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn store_by_id(&self, id: &str) -> Result<Option<Store>, DirectoryError> {
        let store = sqlx::query_as::<_, Store>(
            "SELECT id, name, location FROM stores WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }
}

#[async_trait]
impl UserDirectory for MySqlDirectory {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DirectoryError> {
        let row = sqlx::query_as::<_, UserSql>(
            r#"
            SELECT id, name, email, password, role_id, store_id
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if verify_password(password, &row.password).is_err() {
            return Ok(None);
        }

        let Some(role) = Role::from_id(row.role_id) else {
            tracing::warn!(user_id = %row.id, role_id = row.role_id, "unknown role id in directory");
            return Ok(None);
        };

        let store = match &row.store_id {
            Some(id) => self.store_by_id(id).await?,
            None => None,
        };

        Ok(Some(User {
            id: row.id,
            name: row.name,
            email: row.email,
            role,
            store_id: row.store_id,
            store,
        }))
    }

    async fn stores(&self) -> Result<Vec<Store>, DirectoryError> {
        if let Some(stores) = store_cache::get().await {
            return Ok(stores);
        }

        let stores = sqlx::query_as::<_, Store>(
            "SELECT id, name, location FROM stores ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        store_cache::put(stores.clone()).await;
        Ok(stores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn fixture_matches_email_case_insensitively() {
        let directory = FixtureDirectory::new();

        let user = directory
            .authenticate("EMP1@example.com", "anything")
            .await
            .unwrap()
            .expect("known account");
        assert_eq!(user.id, "4");
        assert_eq!(user.store.as_ref().unwrap().name, "Paris Store");
    }

    #[actix_web::test]
    async fn fixture_rejects_unknown_accounts_and_empty_passwords() {
        let directory = FixtureDirectory::new();

        assert!(directory.authenticate("nobody@example.com", "x").await.unwrap().is_none());
        assert!(directory.authenticate("emp1@example.com", "").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn fixture_store_list_is_ordered() {
        let directory = FixtureDirectory::new();
        let stores = directory.stores().await.unwrap();

        assert_eq!(stores.len(), 7);
        assert!(stores.windows(2).all(|w| w[0].id < w[1].id));
    }
}
