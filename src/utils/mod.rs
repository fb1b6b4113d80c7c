pub mod store_cache;
pub mod warmup;
