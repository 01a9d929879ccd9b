use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
	Result,
	models::{ClaimRow, UnreadCount},
	predicate::{PredicateSet, TenantIsolation},
};

const CLAIM_LIST_FROM: &str = "\
FROM claims c
LEFT JOIN users u ON u.id = c.user_id";
const CLAIM_LIST_COLUMNS: &str = "\
SELECT
	c.id,
	c.tenant_id,
	c.branch_id,
	c.agent_id,
	c.staff_id,
	c.user_id,
	c.status,
	c.category,
	c.company_name,
	c.claim_amount,
	c.currency,
	c.title,
	c.created_at,
	u.name AS claimant_name,
	u.email AS claimant_email
";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageWindow {
	pub limit: i64,
	pub offset: i64,
}

pub fn count_query(predicates: &PredicateSet) -> QueryBuilder<'static, Postgres> {
	let mut builder = QueryBuilder::new("SELECT count(*)\n");

	builder.push(CLAIM_LIST_FROM);
	predicates.push_where(&mut builder);

	builder
}

pub fn page_query(
	predicates: &PredicateSet,
	window: PageWindow,
) -> QueryBuilder<'static, Postgres> {
	let mut builder = QueryBuilder::new(CLAIM_LIST_COLUMNS);

	builder.push(CLAIM_LIST_FROM);
	predicates.push_where(&mut builder);
	builder.push("\nORDER BY c.created_at DESC, c.id DESC\nLIMIT ");
	builder.push_bind(window.limit);
	builder.push(" OFFSET ");
	builder.push_bind(window.offset);

	builder
}

/// Counts unread messages sent by each claim's owner, limited to `claim_ids` inside `tenant`.
pub fn unread_query(
	tenant: &TenantIsolation,
	claim_ids: &[Uuid],
) -> QueryBuilder<'static, Postgres> {
	let mut builder = QueryBuilder::new(
		"\
SELECT m.claim_id, count(*) AS unread_count
FROM claim_messages m
JOIN claims c ON c.id = m.claim_id
WHERE m.claim_id = ANY(",
	);

	builder.push_bind(claim_ids.to_vec());
	builder.push(")\n\tAND m.read_at IS NULL\n\tAND m.sender_id = c.user_id");

	if let TenantIsolation::Tenant(tenant_id) = tenant {
		builder.push("\n\tAND c.tenant_id = ");
		builder.push_bind(tenant_id.clone());
	}

	builder.push("\nGROUP BY m.claim_id");

	builder
}

pub async fn count_claims<'e, E>(executor: E, predicates: &PredicateSet) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let mut builder = count_query(predicates);
	let count = builder.build_query_scalar::<i64>().fetch_one(executor).await?;

	Ok(count)
}

pub async fn fetch_claims_page<'e, E>(
	executor: E,
	predicates: &PredicateSet,
	window: PageWindow,
) -> Result<Vec<ClaimRow>>
where
	E: PgExecutor<'e>,
{
	let mut builder = page_query(predicates, window);
	let rows = builder.build_query_as::<ClaimRow>().fetch_all(executor).await?;

	Ok(rows)
}

pub async fn count_unread_messages<'e, E>(
	executor: E,
	tenant: &TenantIsolation,
	claim_ids: &[Uuid],
) -> Result<Vec<UnreadCount>>
where
	E: PgExecutor<'e>,
{
	if claim_ids.is_empty() {
		return Ok(Vec::new());
	}

	let mut builder = unread_query(tenant, claim_ids);
	let rows = builder.build_query_as::<UnreadCount>().fetch_all(executor).await?;

	Ok(rows)
}
