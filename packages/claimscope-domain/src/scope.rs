use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

pub const CROSS_TENANT_SENTINEL: &str = "*";

/// An authenticated caller, as supplied by the identity provider.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Actor {
	pub id: Uuid,
	pub role: Role,
	pub tenant_id: Option<String>,
	pub branch_id: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TenantBoundary {
	Tenant(String),
	/// Tenant isolation is bypassed entirely.
	CrossTenant { home_tenant_id: Option<String> },
}

/// The single narrowing rule that applies inside the tenant boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Narrowing {
	FullTenant,
	/// A branch manager with no branch on record keeps `branch_id: None`.
	Branch { branch_id: Option<String> },
	Agent { agent_id: Uuid },
	User { user_id: Uuid },
}

/// Derived visibility boundary for one actor. Computed per request and never persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScopeFilter {
	pub tenant: TenantBoundary,
	pub narrowing: Narrowing,
}
impl ScopeFilter {
	/// The tenant id, or `*` for a cross-tenant scope without a home tenant.
	pub fn tenant_id(&self) -> &str {
		match &self.tenant {
			TenantBoundary::Tenant(tenant_id) => tenant_id,
			TenantBoundary::CrossTenant { home_tenant_id } =>
				home_tenant_id.as_deref().unwrap_or(CROSS_TENANT_SENTINEL),
		}
	}

	pub fn is_cross_tenant_scope(&self) -> bool {
		matches!(self.tenant, TenantBoundary::CrossTenant { .. })
	}

	pub fn is_full_tenant_scope(&self) -> bool {
		matches!(self.narrowing, Narrowing::FullTenant)
	}

	/// True for branch scopes even when no branch is on record.
	pub fn has_branch_scope(&self) -> bool {
		matches!(self.narrowing, Narrowing::Branch { .. })
	}

	pub fn branch_id(&self) -> Option<&str> {
		match &self.narrowing {
			Narrowing::Branch { branch_id } => branch_id.as_deref(),
			_ => None,
		}
	}

	pub fn agent_id(&self) -> Option<Uuid> {
		match self.narrowing {
			Narrowing::Agent { agent_id } => Some(agent_id),
			_ => None,
		}
	}

	pub fn is_privileged(&self) -> bool {
		self.is_full_tenant_scope() || self.has_branch_scope()
	}
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ScopeError {
	#[error("No authenticated actor.")]
	Unauthenticated,
	#[error("Actor with role {role} has no tenant_id.")]
	MissingTenant { role: Role },
}

pub fn resolve_scope(actor: Option<&Actor>) -> Result<ScopeFilter, ScopeError> {
	let actor = actor.ok_or(ScopeError::Unauthenticated)?;
	let tenant_id = non_empty(actor.tenant_id.as_deref());

	if actor.role == Role::SuperAdmin {
		return Ok(ScopeFilter {
			tenant: TenantBoundary::CrossTenant { home_tenant_id: tenant_id },
			narrowing: Narrowing::FullTenant,
		});
	}

	let Some(tenant_id) = tenant_id else {
		return Err(ScopeError::MissingTenant { role: actor.role });
	};
	let narrowing = match actor.role {
		Role::SuperAdmin | Role::TenantAdmin | Role::Admin | Role::Staff => Narrowing::FullTenant,
		Role::BranchManager =>
			Narrowing::Branch { branch_id: non_empty(actor.branch_id.as_deref()) },
		Role::Agent => Narrowing::Agent { agent_id: actor.id },
		Role::Member => Narrowing::User { user_id: actor.id },
	};

	Ok(ScopeFilter { tenant: TenantBoundary::Tenant(tenant_id), narrowing })
}

fn non_empty(value: Option<&str>) -> Option<String> {
	value.map(str::trim).filter(|value| !value.is_empty()).map(ToOwned::to_owned)
}
