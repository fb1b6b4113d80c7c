use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "1",
        "name": "Paris Store",
        "location": "Paris"
    })
)]
pub struct Store {
    #[schema(example = "1")]
    pub id: String,

    #[schema(example = "Paris Store")]
    pub name: String,

    #[schema(example = "Paris")]
    pub location: String,
}

/// Built-in directory served when the store collaborator is unreachable.
pub static DEFAULT_STORES: Lazy<Vec<Store>> = Lazy::new(|| {
    fn store(id: &str, name: &str, location: &str) -> Store {
        Store {
            id: id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
        }
    }

    vec![
        store("1", "Paris Store", "Paris"),
        store("2", "Lyon Store", "Lyon"),
        store("3", "Marseille Store", "Marseille"),
        store("4", "Bordeaux Store", "Bordeaux"),
        store("5", "Lille Store", "Lille"),
        store("6", "Strasbourg Store", "Strasbourg"),
        store("7", "Nice Store", "Nice"),
    ]
});

pub fn find_store(id: &str) -> Option<Store> {
    DEFAULT_STORES.iter().find(|s| s.id == id).cloned()
}
