use crate::model::role::Role;
use crate::model::store::Store;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = "4")]
    pub id: String,

    #[schema(example = "Employee 1")]
    pub name: String,

    #[schema(example = "emp1@example.com", format = "email")]
    pub email: String,

    pub role: Role,

    /// Present only if this user is attached to a store
    #[schema(example = "1", nullable = true)]
    pub store_id: Option<String>,

    #[schema(nullable = true)]
    pub store: Option<Store>,
}
