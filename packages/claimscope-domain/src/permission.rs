//! Static role to permission table.
//!
//! The table is immutable for the lifetime of the process. Lookups by raw role string fail closed.

use serde::{Deserialize, Serialize};

use crate::role::Role;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Permission {
	#[serde(rename = "members.read")]
	MembersRead,
	#[serde(rename = "claims.read")]
	ClaimsRead,
	#[serde(rename = "claims.update")]
	ClaimsUpdate,
	#[serde(rename = "claims.assign")]
	ClaimsAssign,
	#[serde(rename = "roles.manage")]
	RolesManage,
	#[serde(rename = "branches.manage")]
	BranchesManage,
	#[serde(rename = "analytics.read")]
	AnalyticsRead,
	#[serde(rename = "settings.manage")]
	SettingsManage,
}
impl Permission {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::MembersRead => "members.read",
			Self::ClaimsRead => "claims.read",
			Self::ClaimsUpdate => "claims.update",
			Self::ClaimsAssign => "claims.assign",
			Self::RolesManage => "roles.manage",
			Self::BranchesManage => "branches.manage",
			Self::AnalyticsRead => "analytics.read",
			Self::SettingsManage => "settings.manage",
		}
	}
}

const ALL_PERMISSIONS: &[Permission] = &[
	Permission::MembersRead,
	Permission::ClaimsRead,
	Permission::ClaimsUpdate,
	Permission::ClaimsAssign,
	Permission::RolesManage,
	Permission::BranchesManage,
	Permission::AnalyticsRead,
	Permission::SettingsManage,
];
const BRANCH_MANAGER_PERMISSIONS: &[Permission] = &[
	Permission::MembersRead,
	Permission::ClaimsRead,
	Permission::ClaimsUpdate,
	Permission::AnalyticsRead,
];
const STAFF_PERMISSIONS: &[Permission] =
	&[Permission::ClaimsRead, Permission::ClaimsUpdate, Permission::ClaimsAssign];
const AGENT_PERMISSIONS: &[Permission] = &[Permission::MembersRead, Permission::ClaimsRead];
const MEMBER_PERMISSIONS: &[Permission] = &[];

pub fn permissions_for(role: Role) -> &'static [Permission] {
	match role {
		Role::SuperAdmin | Role::Admin | Role::TenantAdmin => ALL_PERMISSIONS,
		Role::BranchManager => BRANCH_MANAGER_PERMISSIONS,
		Role::Staff => STAFF_PERMISSIONS,
		Role::Agent => AGENT_PERMISSIONS,
		Role::Member => MEMBER_PERMISSIONS,
	}
}

pub fn role_has_permission(role: Role, permission: Permission) -> bool {
	permissions_for(role).contains(&permission)
}

/// Unknown role strings hold no permissions.
pub fn has_permission(role: &str, permission: Permission) -> bool {
	role.parse::<Role>().map(|role| role_has_permission(role, permission)).unwrap_or(false)
}
