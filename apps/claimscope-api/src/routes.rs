use axum::{
	Json, Router,
	extract::{Request, State, rejection::JsonRejection},
	http::{HeaderMap, StatusCode},
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use claimscope_domain::{Actor, Role, ViewScope};
use claimscope_service::{
	Error as ServiceError, ListClaimsOutcome, ListClaimsRequest, PermissionsResponse,
	UNAUTHORIZED_MESSAGE,
};

use crate::state::AppState;

pub const HEADER_ACTOR_ID: &str = "X-Claimscope-Actor-Id";
pub const HEADER_ROLE: &str = "X-Claimscope-Role";
pub const HEADER_TENANT_ID: &str = "X-Claimscope-Tenant-Id";
pub const HEADER_BRANCH_ID: &str = "X-Claimscope-Branch-Id";

const HEADER_AUTHORIZATION: &str = "Authorization";

/// Mirrors the camelCase response contract.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClaimsBody {
	pub scope: ViewScope,
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub search: Option<String>,
	#[serde(default)]
	pub page: u32,
	#[serde(default)]
	pub per_page: u32,
	#[serde(default)]
	pub selected_claim_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match &err {
			ServiceError::MissingTenant { role } => {
				tracing::error!(%role, "Tenant-bound actor has no tenant_id.");
			},
			ServiceError::Unauthenticated | ServiceError::Unauthorized { .. } => {
				tracing::debug!(error = %err, "Request denied.");
			},
			ServiceError::Storage { .. } | ServiceError::Timeout { .. } => {
				tracing::error!(error = %err, "Request failed.");

				return Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"internal_error",
					"Internal error.",
				);
			},
		}

		// Every denial looks the same from outside.
		Self::new(StatusCode::UNAUTHORIZED, "unauthorized", UNAUTHORIZED_MESSAGE)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/v1/claims/list", post(list_claims))
		.route("/v1/me/permissions", get(permissions))
		.layer(middleware::from_fn_with_state(state.clone(), api_auth))
		.route("/health", get(health))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_claims(
	State(state): State<AppState>,
	headers: HeaderMap,
	payload: Result<Json<ListClaimsBody>, JsonRejection>,
) -> Result<Json<ListClaimsOutcome>, ApiError> {
	let Json(body) = payload.map_err(|rejection| {
		ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", rejection.body_text())
	})?;
	let req = ListClaimsRequest {
		actor: actor_from_headers(&headers),
		scope: body.scope,
		status: body.status,
		search: body.search,
		page: body.page,
		per_page: body.per_page,
		selected_claim_id: body.selected_claim_id,
	};

	Ok(Json(state.service.list_claims_outcome(req).await))
}

async fn permissions(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<PermissionsResponse>, ApiError> {
	let actor = actor_from_headers(&headers);

	Ok(Json(state.service.permissions(actor.as_ref())?))
}

async fn api_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
	if let Some(expected) = state.api_auth_token.as_deref()
		&& read_bearer_token(req.headers()) != Some(expected)
	{
		return ApiError::new(
			StatusCode::UNAUTHORIZED,
			"unauthorized",
			"Authentication required with a Bearer token.",
		)
		.into_response();
	}

	next.run(req).await
}

/// Builds the calling actor from identity headers set by the upstream session layer.
///
/// A missing or malformed id or role yields no actor, which the engine treats as
/// unauthenticated.
pub fn actor_from_headers(headers: &HeaderMap) -> Option<Actor> {
	let id = read_header(headers, HEADER_ACTOR_ID)?;
	let Ok(id) = Uuid::parse_str(id) else {
		tracing::debug!("Ignoring malformed actor id header.");

		return None;
	};
	let role = match read_header(headers, HEADER_ROLE)?.parse::<Role>() {
		Ok(role) => role,
		Err(err) => {
			tracing::debug!(actor_id = %id, error = %err, "Ignoring actor with unknown role.");

			return None;
		},
	};

	Some(Actor {
		id,
		role,
		tenant_id: read_header(headers, HEADER_TENANT_ID).map(ToOwned::to_owned),
		branch_id: read_header(headers, HEADER_BRANCH_ID).map(ToOwned::to_owned),
	})
}

fn read_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
	let value = headers.get(name)?.to_str().ok()?.trim();

	if value.is_empty() { None } else { Some(value) }
}

fn read_bearer_token(headers: &HeaderMap) -> Option<&str> {
	let token = read_header(headers, HEADER_AUTHORIZATION)?.strip_prefix("Bearer ")?.trim();

	if token.is_empty() { None } else { Some(token) }
}
