use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	SuperAdmin,
	/// Legacy alias of `TenantAdmin`.
	Admin,
	TenantAdmin,
	BranchManager,
	Staff,
	Agent,
	Member,
}
impl Role {
	pub const ALL: [Self; 7] = [
		Self::SuperAdmin,
		Self::Admin,
		Self::TenantAdmin,
		Self::BranchManager,
		Self::Staff,
		Self::Agent,
		Self::Member,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::SuperAdmin => "super_admin",
			Self::Admin => "admin",
			Self::TenantAdmin => "tenant_admin",
			Self::BranchManager => "branch_manager",
			Self::Staff => "staff",
			Self::Agent => "agent",
			Self::Member => "member",
		}
	}
}

impl Display for Role {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		self.as_str().fmt(f)
	}
}

impl FromStr for Role {
	type Err = UnknownRole;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let trimmed = raw.trim();

		Self::ALL
			.into_iter()
			.find(|role| role.as_str() == trimmed)
			.ok_or_else(|| UnknownRole(trimmed.to_string()))
	}
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("Unknown role: {0:?}.")]
pub struct UnknownRole(pub String);
