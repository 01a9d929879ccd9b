//! Predicate composition for claim listings.
//!
//! Output is a [`PredicateSet`]: tenant isolation, then at most one narrowing rule from the
//! actor's scope, then the view predicate, then the optional status and search filters.

use uuid::Uuid;

use claimscope_domain::{
	AccessDecision, ClaimStatus, Narrowing, ScopeFilter, TenantBoundary, ViewScope,
};
use claimscope_storage::predicate::{ClaimColumn, Predicate, PredicateSet, TenantIsolation};

#[derive(Clone, Copy, Debug)]
pub struct ComposeInput<'a> {
	pub scope: &'a ScopeFilter,
	pub view: ViewScope,
	pub decision: AccessDecision,
	pub actor_id: Uuid,
	/// Raw status filter. Values outside the status enum are dropped.
	pub status: Option<&'a str>,
	/// Already normalized with [`normalize_search`].
	pub search: Option<&'a str>,
}

pub fn compose_predicates(input: ComposeInput<'_>) -> PredicateSet {
	let mut predicates = PredicateSet::new(tenant_isolation(input.scope));

	push_narrowing(&mut predicates, &input);
	push_view(&mut predicates, &input);

	if let Some(status) = input.status.and_then(ClaimStatus::from_filter) {
		predicates.push(Predicate::eq(ClaimColumn::Status, status.as_str()));
	}
	if let Some(search) = input.search {
		predicates.push(search_predicate(input.view, search));
	}

	predicates
}

/// Trims, drops empty input and truncates to `max_chars` characters.
pub fn normalize_search(raw: Option<&str>, max_chars: usize) -> Option<String> {
	let trimmed = raw?.trim();

	if trimmed.is_empty() {
		return None;
	}

	Some(trimmed.chars().take(max_chars).collect())
}

fn tenant_isolation(scope: &ScopeFilter) -> TenantIsolation {
	match &scope.tenant {
		TenantBoundary::Tenant(tenant_id) => TenantIsolation::Tenant(tenant_id.clone()),
		TenantBoundary::CrossTenant { .. } => TenantIsolation::CrossTenant,
	}
}

fn push_narrowing(predicates: &mut PredicateSet, input: &ComposeInput<'_>) {
	match &input.scope.narrowing {
		Narrowing::FullTenant => {},
		Narrowing::Branch { branch_id: Some(branch_id) } => {
			predicates.push(Predicate::eq(ClaimColumn::BranchId, branch_id.as_str()));
		},
		// No branch on record. Stricter than leaving the manager unnarrowed inside the tenant:
		// nothing matches until a branch is assigned.
		Narrowing::Branch { branch_id: None } => {
			predicates.push(Predicate::Never);
		},
		// The agent queue carries its own agent predicate.
		Narrowing::Agent { agent_id } if input.view != ViewScope::AgentQueue => {
			predicates.push(Predicate::eq(ClaimColumn::AgentId, *agent_id));
		},
		Narrowing::Agent { .. } => {},
		// The member view applies the same ownership predicate.
		Narrowing::User { user_id } if input.view != ViewScope::Member => {
			predicates.push(Predicate::eq(ClaimColumn::UserId, *user_id));
		},
		Narrowing::User { .. } => {},
	}
}

fn push_view(predicates: &mut PredicateSet, input: &ComposeInput<'_>) {
	match input.view {
		ViewScope::Member => {
			predicates.push(Predicate::eq(ClaimColumn::UserId, input.actor_id));
		},
		// Matches only rows whose staff_id is the actor, including for branch managers.
		ViewScope::StaffQueue => {
			predicates.push(Predicate::eq(ClaimColumn::StaffId, input.actor_id));
		},
		ViewScope::StaffUnassigned => {
			predicates
				.push(Predicate::IsNull(ClaimColumn::StaffId))
				.push(Predicate::not_eq(ClaimColumn::Status, ClaimStatus::Draft.as_str()));
		},
		ViewScope::AgentQueue => {
			let predicate = match (input.decision.is_privileged, input.scope.agent_id()) {
				(true, _) => Predicate::IsNotNull(ClaimColumn::AgentId),
				(false, Some(agent_id)) => Predicate::eq(ClaimColumn::AgentId, agent_id),
				(false, None) => Predicate::Never,
			};

			predicates.push(predicate);
		},
		ViewScope::Admin | ViewScope::StaffAll => {},
	}
}

fn search_predicate(view: ViewScope, needle: &str) -> Predicate {
	let mut columns = vec![ClaimColumn::Title, ClaimColumn::CompanyName];

	if view.searches_claimant_identity() {
		columns.extend([ClaimColumn::ClaimantName, ClaimColumn::ClaimantEmail]);
	}

	Predicate::AnyContains { columns, needle: needle.to_string() }
}
