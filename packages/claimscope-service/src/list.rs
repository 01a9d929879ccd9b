use std::collections::HashMap;

use serde::{Serialize, Serializer};
use time::OffsetDateTime;
use tokio::time::{Duration, Instant};
use uuid::Uuid;

use claimscope_domain::{
	Actor, RowVisibility, ViewScope, resolve_scope, row_visibility, validate_access,
};
use claimscope_storage::{
	models::ClaimRow,
	predicate::{ClaimColumn, Predicate},
};

use crate::{
	ClaimsService, Error, Result,
	compose::{self, ComposeInput},
	paginate::{self, Page, PageRequest},
	unread,
};

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
pub const LIST_FAILED_MESSAGE: &str = "Failed to list claims.";

#[derive(Clone, Debug)]
pub struct ListClaimsRequest {
	/// `None` when the identity provider found no session.
	pub actor: Option<Actor>,
	pub scope: ViewScope,
	pub status: Option<String>,
	pub search: Option<String>,
	/// 1-based.
	pub page: u32,
	pub per_page: u32,
	/// Agent workspace: a claim the caller has open, which may sit outside the current page.
	pub selected_claim_id: Option<Uuid>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimListItem {
	pub id: Uuid,
	pub tenant_id: String,
	pub branch_id: Option<String>,
	pub agent_id: Option<Uuid>,
	pub staff_id: Option<Uuid>,
	pub user_id: Uuid,
	pub status: String,
	pub category: Option<String>,
	pub company_name: Option<String>,
	pub claim_amount: Option<i64>,
	pub currency: Option<String>,
	pub title: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	pub claimant_name: Option<String>,
	pub claimant_email: Option<String>,
	pub unread_count: u64,
}
impl From<ClaimRow> for ClaimListItem {
	fn from(row: ClaimRow) -> Self {
		Self {
			id: row.id,
			tenant_id: row.tenant_id,
			branch_id: row.branch_id,
			agent_id: row.agent_id,
			staff_id: row.staff_id,
			user_id: row.user_id,
			status: row.status,
			category: row.category,
			company_name: row.company_name,
			claim_amount: row.claim_amount,
			currency: row.currency,
			title: Some(row.title),
			created_at: row.created_at,
			claimant_name: row.claimant_name,
			claimant_email: row.claimant_email,
			unread_count: 0,
		}
	}
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClaimsResponse {
	pub claims: Vec<ClaimListItem>,
	pub page: u32,
	pub per_page: u32,
	pub total_count: u64,
	pub total_pages: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub selected: Option<ClaimListItem>,
}

/// The externally visible result shape: `{"success": true, ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Clone, Debug)]
pub enum ListClaimsOutcome {
	Success(ListClaimsResponse),
	Failure { error: String },
}
impl ListClaimsOutcome {
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}
}

impl Serialize for ListClaimsOutcome {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		#[derive(Serialize)]
		struct SuccessBody<'a> {
			success: bool,
			#[serde(flatten)]
			response: &'a ListClaimsResponse,
		}

		#[derive(Serialize)]
		struct FailureBody<'a> {
			success: bool,
			error: &'a str,
		}

		match self {
			Self::Success(response) =>
				SuccessBody { success: true, response }.serialize(serializer),
			Self::Failure { error } => FailureBody { success: false, error }.serialize(serializer),
		}
	}
}

struct Assembly {
	request: PageRequest,
	page: Page,
	selected_id: Option<Uuid>,
	selected_row: Option<ClaimRow>,
	unread: HashMap<Uuid, u64>,
	visibility: RowVisibility,
}

impl ClaimsService {
	/// Lists claims visible to the request's actor through the requested view.
	pub async fn list_claims(&self, req: ListClaimsRequest) -> Result<ListClaimsResponse> {
		let Some(actor) = req.actor.as_ref() else {
			return Err(Error::Unauthenticated);
		};
		let scope = resolve_scope(Some(actor))?;
		let decision = validate_access(req.scope, &scope);

		if !decision.allowed {
			return Err(Error::Unauthorized {
				message: format!("View {} is not available to role {}.", req.scope, actor.role),
			});
		}

		tracing::debug!(
			actor_id = %actor.id,
			role = %actor.role,
			view_scope = %req.scope,
			tenant_id = scope.tenant_id(),
			"Listing claims."
		);

		let visibility = row_visibility(req.scope, actor.role, decision);
		let search =
			compose::normalize_search(req.search.as_deref(), self.listing.max_search_chars);
		let predicates = compose::compose_predicates(ComposeInput {
			scope: &scope,
			view: req.scope,
			decision,
			actor_id: actor.id,
			status: req.status.as_deref(),
			search: search.as_deref(),
		});
		let request = PageRequest::normalize(req.page, req.per_page, &self.listing);
		let deadline = Instant::now() + Duration::from_millis(self.listing.query_timeout_ms);
		let page =
			paginate::fetch_page(self.store.as_ref(), &predicates, request, deadline).await?;
		let selected_row = match req.selected_claim_id {
			Some(selected_id) if !page.rows.iter().any(|row| row.id == selected_id) => {
				let narrowed =
					predicates.clone().and(Predicate::eq(ClaimColumn::Id, selected_id));

				paginate::fetch_one(self.store.as_ref(), &narrowed, deadline).await?
			},
			_ => None,
		};
		let unread = if req.scope == ViewScope::Member || visibility == RowVisibility::StatusOnly
		{
			HashMap::new()
		} else {
			let claim_ids = page
				.rows
				.iter()
				.chain(selected_row.as_ref())
				.map(|row| row.id)
				.collect::<Vec<_>>();

			unread::unread_counts(self.store.as_ref(), predicates.tenant(), &claim_ids, deadline)
				.await?
		};

		Ok(assemble(Assembly {
			request,
			page,
			selected_id: req.selected_claim_id,
			selected_row,
			unread,
			visibility,
		}))
	}

	/// [`Self::list_claims`] folded into the external result shape.
	///
	/// Every denial reads `Unauthorized`. Every other failure reads the same generic message.
	pub async fn list_claims_outcome(&self, req: ListClaimsRequest) -> ListClaimsOutcome {
		let actor_id = req.actor.as_ref().map(|actor| actor.id);
		let view_scope = req.scope;

		match self.list_claims(req).await {
			Ok(response) => ListClaimsOutcome::Success(response),
			Err(err) => {
				match &err {
					Error::MissingTenant { role } => tracing::error!(
						actor_id = ?actor_id,
						%role,
						"Tenant-bound actor has no tenant_id."
					),
					Error::Unauthenticated | Error::Unauthorized { .. } => tracing::debug!(
						actor_id = ?actor_id,
						view_scope = %view_scope,
						error = %err,
						"Claim listing denied."
					),
					Error::Storage { .. } | Error::Timeout { .. } => tracing::error!(
						actor_id = ?actor_id,
						view_scope = %view_scope,
						error = %err,
						"Claim listing failed."
					),
				}

				let message =
					if err.is_denial() { UNAUTHORIZED_MESSAGE } else { LIST_FAILED_MESSAGE };

				ListClaimsOutcome::Failure { error: message.to_string() }
			},
		}
	}
}

fn assemble(assembly: Assembly) -> ListClaimsResponse {
	let Assembly { request, page, selected_id, selected_row, unread, visibility } = assembly;
	let finish = |row: ClaimRow| {
		let mut item = ClaimListItem::from(row);

		item.unread_count = unread.get(&item.id).copied().unwrap_or(0);
		item.apply_visibility(visibility);

		item
	};
	let claims = page.rows.into_iter().map(finish).collect::<Vec<_>>();
	let selected = match selected_row {
		Some(row) => Some(finish(row)),
		None => selected_id.and_then(|id| claims.iter().find(|item| item.id == id).cloned()),
	};

	ListClaimsResponse {
		claims,
		page: request.page,
		per_page: request.per_page,
		total_count: page.total_count,
		total_pages: paginate::total_pages(page.total_count, request.per_page),
		selected,
	}
}
