use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

/// The lens a caller requests onto the claims table. Independent of the caller's role.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewScope {
	Member,
	Admin,
	StaffQueue,
	StaffAll,
	StaffUnassigned,
	AgentQueue,
}
impl ViewScope {
	pub const ALL: [Self; 6] = [
		Self::Member,
		Self::Admin,
		Self::StaffQueue,
		Self::StaffAll,
		Self::StaffUnassigned,
		Self::AgentQueue,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Member => "member",
			Self::Admin => "admin",
			Self::StaffQueue => "staff_queue",
			Self::StaffAll => "staff_all",
			Self::StaffUnassigned => "staff_unassigned",
			Self::AgentQueue => "agent_queue",
		}
	}

	/// Whether searches under this view may match claimant identity fields.
	pub fn searches_claimant_identity(&self) -> bool {
		!matches!(self, Self::Member)
	}
}

impl Display for ViewScope {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		self.as_str().fmt(f)
	}
}

impl FromStr for ViewScope {
	type Err = UnknownViewScope;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let trimmed = raw.trim();

		Self::ALL
			.into_iter()
			.find(|scope| scope.as_str() == trimmed)
			.ok_or_else(|| UnknownViewScope(trimmed.to_string()))
	}
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("Unknown view scope: {0:?}.")]
pub struct UnknownViewScope(pub String);

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
	Draft,
	Submitted,
	Verification,
	Evaluation,
	Negotiation,
	Court,
	Resolved,
	Rejected,
}
impl ClaimStatus {
	pub const ALL: [Self; 8] = [
		Self::Draft,
		Self::Submitted,
		Self::Verification,
		Self::Evaluation,
		Self::Negotiation,
		Self::Court,
		Self::Resolved,
		Self::Rejected,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Draft => "draft",
			Self::Submitted => "submitted",
			Self::Verification => "verification",
			Self::Evaluation => "evaluation",
			Self::Negotiation => "negotiation",
			Self::Court => "court",
			Self::Resolved => "resolved",
			Self::Rejected => "rejected",
		}
	}

	/// Parses a caller-supplied status filter.
	///
	/// Anything outside the canonical enum yields `None` and the filter is dropped instead of
	/// rejected, so error responses never reveal which values are members of the enum.
	pub fn from_filter(raw: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|status| status.as_str() == raw)
	}
}

impl Display for ClaimStatus {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		self.as_str().fmt(f)
	}
}
