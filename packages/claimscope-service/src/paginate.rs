use std::future::Future;

use serde::Serialize;
use tokio::time::{self, Instant};

use claimscope_config::Listing;
use claimscope_storage::{models::ClaimRow, predicate::PredicateSet, queries::PageWindow};

use crate::{ClaimStore, Error, Result};

/// A 1-based page request, already clamped to the configured bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PageRequest {
	pub page: u32,
	pub per_page: u32,
}
impl PageRequest {
	pub fn normalize(page: u32, per_page: u32, listing: &Listing) -> Self {
		let per_page = match per_page {
			0 => listing.default_per_page,
			value => value.min(listing.max_per_page),
		};

		Self { page: page.max(1), per_page: per_page.max(1) }
	}

	pub fn window(&self) -> PageWindow {
		let limit = i64::from(self.per_page);

		PageWindow { limit, offset: i64::from(self.page.saturating_sub(1)) * limit }
	}
}

#[derive(Debug)]
pub struct Page {
	pub rows: Vec<ClaimRow>,
	pub total_count: u64,
}

/// `max(1, ceil(total_count / per_page))`.
pub fn total_pages(total_count: u64, per_page: u32) -> u64 {
	total_count.div_ceil(u64::from(per_page.max(1))).max(1)
}

/// Runs the count and page queries concurrently from one predicate set.
pub async fn fetch_page(
	store: &dyn ClaimStore,
	predicates: &PredicateSet,
	request: PageRequest,
	deadline: Instant,
) -> Result<Page> {
	let (total_count, rows) = tokio::try_join!(
		with_deadline("count query", deadline, store.count_claims(predicates)),
		with_deadline("page query", deadline, store.fetch_claims(predicates, request.window())),
	)?;

	Ok(Page { rows, total_count: u64::try_from(total_count).unwrap_or(0) })
}

/// Fetches one row through `predicates`, typically narrowed further by id.
pub async fn fetch_one(
	store: &dyn ClaimStore,
	predicates: &PredicateSet,
	deadline: Instant,
) -> Result<Option<ClaimRow>> {
	let rows = with_deadline(
		"selected claim query",
		deadline,
		store.fetch_claims(predicates, PageWindow { limit: 1, offset: 0 }),
	)
	.await?;

	Ok(rows.into_iter().next())
}

pub(crate) async fn with_deadline<T, F>(
	operation: &'static str,
	deadline: Instant,
	future: F,
) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	time::timeout_at(deadline, future).await.map_err(|_| Error::Timeout { operation })?
}
