use anyhow::Result;

use crate::leave::repository::LeaveRepository;
use crate::leave::store::LeaveStore;

/// Load the persisted collection into the in-memory container at boot.
pub async fn warmup_leave_store(
    repository: &dyn LeaveRepository,
    store: &LeaveStore,
) -> Result<usize> {
    let records = repository.load_all().await?;
    let count = records.len();

    store.replace_all(records);

    log::info!("Leave store warmup complete: {} requests loaded", count);

    Ok(count)
}
