use std::collections::HashMap;

use tokio::time::Instant;
use uuid::Uuid;

use claimscope_storage::predicate::TenantIsolation;

use crate::{ClaimStore, Result, paginate};

/// Unread messages from each claim's owner, keyed by claim id.
///
/// Ids are deduplicated before querying. Claims without unread messages are absent from the map.
pub async fn unread_counts(
	store: &dyn ClaimStore,
	tenant: &TenantIsolation,
	claim_ids: &[Uuid],
	deadline: Instant,
) -> Result<HashMap<Uuid, u64>> {
	let mut ids = claim_ids.to_vec();

	ids.sort_unstable();
	ids.dedup();

	if ids.is_empty() {
		return Ok(HashMap::new());
	}

	let rows =
		paginate::with_deadline("unread query", deadline, store.count_unread(tenant, &ids))
			.await?;

	Ok(rows
		.into_iter()
		.filter(|row| ids.binary_search(&row.claim_id).is_ok())
		.map(|row| (row.claim_id, u64::try_from(row.unread_count).unwrap_or(0)))
		.collect())
}
