use serde::Serialize;

use crate::{scope::ScopeFilter, view::ViewScope};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct AccessDecision {
	pub allowed: bool,
	pub is_privileged: bool,
}

/// Decides whether `scope` may look through the requested `view`.
///
/// Privileged scopes are full-tenant scopes and branch scopes. Denials are not broken down by
/// reason; callers surface every denial the same way.
pub fn validate_access(view: ViewScope, scope: &ScopeFilter) -> AccessDecision {
	let is_privileged = scope.is_privileged();
	let allowed = match view {
		ViewScope::Admin => scope.is_full_tenant_scope(),
		ViewScope::StaffQueue | ViewScope::StaffAll | ViewScope::StaffUnassigned => is_privileged,
		ViewScope::AgentQueue => scope.agent_id().is_some() || is_privileged,
		ViewScope::Member => true,
	};

	AccessDecision { allowed, is_privileged }
}
