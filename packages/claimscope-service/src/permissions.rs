use serde::Serialize;

use claimscope_domain::{Actor, Permission, Role, permissions_for, resolve_scope};

use crate::{ClaimsService, Error, Result};

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PermissionsResponse {
	pub role: Role,
	pub permissions: Vec<Permission>,
}

impl ClaimsService {
	/// The actor's role and its permissions, in matrix order.
	///
	/// Actors that cannot hold a scope get no answer either.
	pub fn permissions(&self, actor: Option<&Actor>) -> Result<PermissionsResponse> {
		let actor = actor.ok_or(Error::Unauthenticated)?;

		resolve_scope(Some(actor))?;

		Ok(PermissionsResponse {
			role: actor.role,
			permissions: permissions_for(actor.role).to_vec(),
		})
	}
}
