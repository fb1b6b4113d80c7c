use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "emp1@example.com", format = "email")]
    pub email: String,
    pub password: String,
}

/// Directory row shape; role/store are resolved into a `User` after fetch.
#[derive(sqlx::FromRow)]
pub struct UserSql {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: u8,
    pub store_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    /// Login email
    pub sub: String,
    pub name: String,
    pub role: u8, // role id
    pub exp: usize,
    pub jti: String,

    /// Present only if this user is attached to a store
    pub store_id: Option<String>,
}
