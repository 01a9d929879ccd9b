use time::OffsetDateTime;
use uuid::Uuid;

use claimscope_storage::{
	models::ClaimRow,
	predicate::{ClaimColumn, Predicate, PredicateSet, TenantIsolation, escape_like},
	queries::{self, PageWindow},
};

fn row(tenant_id: &str) -> ClaimRow {
	ClaimRow {
		id: Uuid::new_v4(),
		tenant_id: tenant_id.to_string(),
		branch_id: None,
		agent_id: None,
		staff_id: None,
		user_id: Uuid::new_v4(),
		status: "submitted".to_string(),
		category: Some("travel".to_string()),
		company_name: Some("Acme Air".to_string()),
		claim_amount: Some(12_500),
		currency: Some("EUR".to_string()),
		title: "Delayed flight".to_string(),
		created_at: OffsetDateTime::UNIX_EPOCH,
		claimant_name: Some("Dana Example".to_string()),
		claimant_email: Some("dana@example.com".to_string()),
	}
}

#[test]
fn tenant_predicate_renders_first() {
	let predicates = PredicateSet::new(TenantIsolation::Tenant("t1".to_string()))
		.and(Predicate::eq(ClaimColumn::Status, "court"))
		.and(Predicate::IsNull(ClaimColumn::StaffId));
	let builder = queries::count_query(&predicates);

	assert_eq!(
		builder.sql(),
		concat!(
			"SELECT count(*)\n",
			"FROM claims c\n",
			"LEFT JOIN users u ON u.id = c.user_id",
			" WHERE c.tenant_id = $1 AND c.status = $2 AND c.staff_id IS NULL",
		)
	);
}

#[test]
fn cross_tenant_without_predicates_renders_where_true() {
	let predicates = PredicateSet::new(TenantIsolation::CrossTenant);
	let builder = queries::count_query(&predicates);

	assert!(builder.sql().ends_with(" WHERE TRUE"), "Unexpected SQL: {}", builder.sql());

	let predicates = predicates.and(Predicate::IsNotNull(ClaimColumn::AgentId));
	let builder = queries::count_query(&predicates);

	assert!(
		builder.sql().ends_with(" WHERE c.agent_id IS NOT NULL"),
		"Unexpected SQL: {}",
		builder.sql()
	);
}

#[test]
fn count_and_page_share_the_where_clause() {
	let predicates = PredicateSet::new(TenantIsolation::Tenant("t1".to_string()))
		.and(Predicate::eq(ClaimColumn::UserId, Uuid::new_v4()))
		.and(Predicate::AnyContains {
			columns: vec![ClaimColumn::Title, ClaimColumn::CompanyName],
			needle: "acme".to_string(),
		});
	let count = queries::count_query(&predicates);
	let page = queries::page_query(&predicates, PageWindow { limit: 10, offset: 20 });
	let count_where = count.sql().split_once(" WHERE ").map(|(_, tail)| tail).expect("WHERE");
	let page_where = page.sql().split_once(" WHERE ").map(|(_, tail)| tail).expect("WHERE");

	assert!(page_where.starts_with(count_where), "Diverging WHERE clauses: {page_where}");
	assert!(page.sql().ends_with("ORDER BY c.created_at DESC, c.id DESC\nLIMIT $5 OFFSET $6"));
}

#[test]
fn search_values_are_bound_not_inlined() {
	let predicates = PredicateSet::new(TenantIsolation::Tenant("t1".to_string())).and(
		Predicate::AnyContains {
			columns: vec![ClaimColumn::Title, ClaimColumn::ClaimantEmail],
			needle: "x' OR 1=1 --".to_string(),
		},
	);
	let builder = queries::count_query(&predicates);

	assert!(!builder.sql().contains("OR 1=1"));
	assert!(builder.sql().ends_with("(c.title ILIKE $2 OR u.email ILIKE $3)"));
}

#[test]
fn like_wildcards_are_escaped() {
	assert_eq!(escape_like(r"50%_off\now"), r"50\%\_off\\now");
}

#[test]
fn unread_query_scopes_to_tenant_and_owner() {
	let builder =
		queries::unread_query(&TenantIsolation::Tenant("t1".to_string()), &[Uuid::new_v4()]);
	let sql = builder.sql();

	assert!(sql.contains("m.claim_id = ANY($1)"));
	assert!(sql.contains("AND m.read_at IS NULL"));
	assert!(sql.contains("AND m.sender_id = c.user_id"));
	assert!(sql.contains("AND c.tenant_id = $2"));

	let builder = queries::unread_query(&TenantIsolation::CrossTenant, &[Uuid::new_v4()]);

	assert!(!builder.sql().contains("tenant_id"));
}

#[test]
fn predicates_evaluate_like_sql() {
	let claim = row("t1");
	let tenant = PredicateSet::new(TenantIsolation::Tenant("t1".to_string()));

	assert!(tenant.matches(&claim));
	assert!(!PredicateSet::new(TenantIsolation::Tenant("t2".to_string())).matches(&claim));
	assert!(PredicateSet::new(TenantIsolation::CrossTenant).matches(&claim));
	assert!(tenant.clone().and(Predicate::IsNull(ClaimColumn::StaffId)).matches(&claim));
	assert!(!tenant.clone().and(Predicate::eq(ClaimColumn::BranchId, "b1")).matches(&claim));
	assert!(!tenant.clone().and(Predicate::not_eq(ClaimColumn::BranchId, "b1")).matches(&claim));
	assert!(tenant.clone().and(Predicate::not_eq(ClaimColumn::Status, "draft")).matches(&claim));
	assert!(!tenant.clone().and(Predicate::Never).matches(&claim));
	assert!(
		tenant
			.clone()
			.and(Predicate::AnyContains {
				columns: vec![ClaimColumn::ClaimantName],
				needle: "DANA".to_string(),
			})
			.matches(&claim)
	);
	assert!(
		!tenant
			.and(Predicate::AnyContains {
				columns: vec![ClaimColumn::Title, ClaimColumn::CompanyName],
				needle: "dana".to_string(),
			})
			.matches(&claim)
	);
}
