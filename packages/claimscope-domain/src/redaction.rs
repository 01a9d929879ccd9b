use serde::Serialize;

use crate::{access::AccessDecision, role::Role, view::ViewScope};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowVisibility {
	Full,
	/// Row existence and status only. Case content, amounts and claimant identity are withheld and
	/// unread counts are zeroed.
	StatusOnly,
}

/// Agents looking at their own queue see that assigned claims exist, not what they contain.
/// Privileged actors auditing the same view are not restricted.
pub fn row_visibility(view: ViewScope, role: Role, decision: AccessDecision) -> RowVisibility {
	match (view, role) {
		(ViewScope::AgentQueue, Role::Agent) if !decision.is_privileged =>
			RowVisibility::StatusOnly,
		_ => RowVisibility::Full,
	}
}
