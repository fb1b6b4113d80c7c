use std::time::Duration;

use moka::future::Cache;
use once_cell::sync::Lazy;

use crate::model::store::Store;

const DIRECTORY_KEY: &str = "directory";

/// Store reference data is static; a short TTL keeps the collaborator from
/// being hit on every calendar render while still picking up edits.
static STORE_CACHE: Lazy<Cache<&'static str, Vec<Store>>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(1)
        .time_to_live(Duration::from_secs(300))
        .build()
});

pub async fn get() -> Option<Vec<Store>> {
    STORE_CACHE.get(DIRECTORY_KEY).await
}

pub async fn put(stores: Vec<Store>) {
    STORE_CACHE.insert(DIRECTORY_KEY, stores).await;
}
