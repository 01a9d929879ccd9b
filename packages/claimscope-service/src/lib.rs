pub mod compose;
pub mod list;
pub mod paginate;
pub mod permissions;
pub mod redact;
pub mod time_serde;
pub mod unread;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

use uuid::Uuid;

pub use compose::{ComposeInput, compose_predicates, normalize_search};
pub use error::{Error, Result};
pub use list::{
	ClaimListItem, LIST_FAILED_MESSAGE, ListClaimsOutcome, ListClaimsRequest, ListClaimsResponse,
	UNAUTHORIZED_MESSAGE,
};
pub use paginate::{PageRequest, total_pages};
pub use permissions::PermissionsResponse;

use claimscope_config::{Config, Listing};
use claimscope_storage::{
	db::Db,
	models::{ClaimRow, UnreadCount},
	predicate::{PredicateSet, TenantIsolation},
	queries::{self, PageWindow},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read access to the `claims` and `claim_messages` relations.
///
/// Implementations must apply `predicates` exactly as given. The count and page calls for one
/// listing always receive the same set.
pub trait ClaimStore
where
	Self: Send + Sync,
{
	fn count_claims<'a>(&'a self, predicates: &'a PredicateSet) -> BoxFuture<'a, Result<i64>>;

	/// Rows ordered by `created_at` descending.
	fn fetch_claims<'a>(
		&'a self,
		predicates: &'a PredicateSet,
		window: PageWindow,
	) -> BoxFuture<'a, Result<Vec<ClaimRow>>>;

	/// Unread messages sent by each claim's owner. Claims without any may be omitted.
	fn count_unread<'a>(
		&'a self,
		tenant: &'a TenantIsolation,
		claim_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<UnreadCount>>>;
}

pub struct PgClaimStore {
	pub db: Db,
}
impl PgClaimStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}

impl ClaimStore for PgClaimStore {
	fn count_claims<'a>(&'a self, predicates: &'a PredicateSet) -> BoxFuture<'a, Result<i64>> {
		Box::pin(async move { Ok(queries::count_claims(&self.db.pool, predicates).await?) })
	}

	fn fetch_claims<'a>(
		&'a self,
		predicates: &'a PredicateSet,
		window: PageWindow,
	) -> BoxFuture<'a, Result<Vec<ClaimRow>>> {
		Box::pin(async move {
			Ok(queries::fetch_claims_page(&self.db.pool, predicates, window).await?)
		})
	}

	fn count_unread<'a>(
		&'a self,
		tenant: &'a TenantIsolation,
		claim_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<UnreadCount>>> {
		Box::pin(async move {
			Ok(queries::count_unread_messages(&self.db.pool, tenant, claim_ids).await?)
		})
	}
}

pub struct ClaimsService {
	pub listing: Listing,
	pub store: Arc<dyn ClaimStore>,
}
impl ClaimsService {
	pub fn new(cfg: &Config, db: Db) -> Self {
		Self { listing: cfg.listing.clone(), store: Arc::new(PgClaimStore::new(db)) }
	}

	pub fn with_store(listing: Listing, store: Arc<dyn ClaimStore>) -> Self {
		Self { listing, store }
	}
}
