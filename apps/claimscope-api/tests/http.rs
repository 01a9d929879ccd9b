use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use time::OffsetDateTime;
use tower::util::ServiceExt;
use uuid::Uuid;

use claimscope_api::{
	routes::{self, HEADER_ACTOR_ID, HEADER_BRANCH_ID, HEADER_ROLE, HEADER_TENANT_ID},
	state::AppState,
};
use claimscope_config::Listing;
use claimscope_service::{BoxFuture, ClaimStore, ClaimsService, Result};
use claimscope_storage::{
	models::{ClaimRow, UnreadCount},
	predicate::{PredicateSet, TenantIsolation},
	queries::PageWindow,
};

struct StaticStore {
	rows: Vec<ClaimRow>,
}
impl ClaimStore for StaticStore {
	fn count_claims<'a>(&'a self, predicates: &'a PredicateSet) -> BoxFuture<'a, Result<i64>> {
		let count = self.rows.iter().filter(|row| predicates.matches(row)).count() as i64;

		Box::pin(async move { Ok(count) })
	}

	fn fetch_claims<'a>(
		&'a self,
		predicates: &'a PredicateSet,
		window: PageWindow,
	) -> BoxFuture<'a, Result<Vec<ClaimRow>>> {
		let rows = self
			.rows
			.iter()
			.filter(|row| predicates.matches(row))
			.skip(window.offset as usize)
			.take(window.limit as usize)
			.cloned()
			.collect::<Vec<_>>();

		Box::pin(async move { Ok(rows) })
	}

	fn count_unread<'a>(
		&'a self,
		_tenant: &'a TenantIsolation,
		_claim_ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<UnreadCount>>> {
		Box::pin(async move { Ok(Vec::new()) })
	}
}

struct TestApp {
	app: Router,
	member_id: Uuid,
}

fn claim_row(owner: Uuid, tenant_id: &str, title: &str) -> ClaimRow {
	ClaimRow {
		id: Uuid::new_v4(),
		tenant_id: tenant_id.to_string(),
		branch_id: None,
		agent_id: None,
		staff_id: None,
		user_id: owner,
		status: "submitted".to_string(),
		category: None,
		company_name: Some("Acme Air".to_string()),
		claim_amount: Some(25_000),
		currency: Some("EUR".to_string()),
		title: title.to_string(),
		created_at: OffsetDateTime::UNIX_EPOCH,
		claimant_name: Some("Alice Member".to_string()),
		claimant_email: Some("alice@example.com".to_string()),
	}
}

fn test_app(api_auth_token: Option<&str>) -> TestApp {
	let member_id = Uuid::new_v4();
	let rows = vec![
		claim_row(member_id, "tenant-a", "Delayed flight"),
		claim_row(member_id, "tenant-a", "Lost luggage"),
		claim_row(Uuid::new_v4(), "tenant-a", "Broken phone"),
		claim_row(member_id, "tenant-b", "Impossible row"),
	];
	let service = ClaimsService::with_store(Listing::default(), Arc::new(StaticStore { rows }));
	let state = AppState::with_service(service, api_auth_token.map(ToOwned::to_owned));

	TestApp { app: routes::router(state), member_id }
}

fn list_request(actor: Option<(Uuid, &str)>, body: &str) -> Request<Body> {
	let mut builder = Request::builder()
		.method("POST")
		.uri("/v1/claims/list")
		.header("content-type", "application/json");

	if let Some((id, role)) = actor {
		builder = builder
			.header(HEADER_ACTOR_ID, id.to_string())
			.header(HEADER_ROLE, role)
			.header(HEADER_TENANT_ID, "tenant-a");
	}

	builder.body(Body::from(body.to_string())).expect("Failed to build request.")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
	let response = app.oneshot(request).await.expect("Failed to call router.");
	let status = response.status();
	let bytes =
		body::to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body.");
	let json = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Failed to parse response body.")
	};

	(status, json)
}

#[tokio::test]
async fn health_ok() {
	let TestApp { app, .. } = test_app(Some("secret"));
	let request =
		Request::builder().uri("/health").body(Body::empty()).expect("Failed to build request.");
	let (status, _) = send(app, request).await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn member_listing_returns_owned_claims_in_envelope() {
	let TestApp { app, member_id } = test_app(None);
	let request = list_request(Some((member_id, "member")), r#"{"scope":"member","perPage":10}"#);
	let (status, json) = send(app, request).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["success"], true);
	assert_eq!(json["totalCount"], 2);
	assert_eq!(json["page"], 1);
	assert_eq!(json["perPage"], 10);

	for claim in json["claims"].as_array().expect("Claims must be an array.") {
		assert_eq!(claim["tenantId"], "tenant-a");
		assert_eq!(claim["userId"], member_id.to_string());
	}
}

#[tokio::test]
async fn missing_identity_is_reported_inside_the_envelope() {
	let TestApp { app, .. } = test_app(None);
	let (status, json) = send(app, list_request(None, r#"{"scope":"member"}"#)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json, serde_json::json!({ "success": false, "error": "Unauthorized" }));
}

#[tokio::test]
async fn unknown_role_header_is_unauthorized() {
	let TestApp { app, member_id } = test_app(None);
	let request = list_request(Some((member_id, "owner")), r#"{"scope":"member"}"#);
	let (_, json) = send(app, request).await;

	assert_eq!(json["success"], false);
	assert_eq!(json["error"], "Unauthorized");
}

#[tokio::test]
async fn agent_cannot_open_admin_view() {
	let TestApp { app, .. } = test_app(None);
	let request = list_request(Some((Uuid::new_v4(), "agent")), r#"{"scope":"admin"}"#);
	let (status, json) = send(app, request).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json, serde_json::json!({ "success": false, "error": "Unauthorized" }));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
	let TestApp { app, member_id } = test_app(None);
	let request = list_request(Some((member_id, "member")), r#"{"scope":"everything"}"#);
	let (status, json) = send(app, request).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "invalid_request");
}

#[tokio::test]
async fn bearer_token_gates_v1_routes() {
	let TestApp { app, member_id } = test_app(Some("secret"));
	let (status, json) = send(
		app.clone(),
		list_request(Some((member_id, "member")), r#"{"scope":"member"}"#),
	)
	.await;

	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(json["error_code"], "unauthorized");

	let mut request = list_request(Some((member_id, "member")), r#"{"scope":"member"}"#);

	request.headers_mut().insert("Authorization", "Bearer wrong".parse().expect("valid header"));

	let (status, _) = send(app.clone(), request).await;

	assert_eq!(status, StatusCode::UNAUTHORIZED);

	let mut request = list_request(Some((member_id, "member")), r#"{"scope":"member"}"#);

	request.headers_mut().insert("Authorization", "Bearer secret".parse().expect("valid header"));

	let (status, json) = send(app, request).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["success"], true);
}

#[tokio::test]
async fn permissions_reflect_the_role() {
	let TestApp { app, .. } = test_app(None);
	let request = Request::builder()
		.uri("/v1/me/permissions")
		.header(HEADER_ACTOR_ID, Uuid::new_v4().to_string())
		.header(HEADER_ROLE, "agent")
		.header(HEADER_TENANT_ID, "tenant-a")
		.header(HEADER_BRANCH_ID, "b1")
		.body(Body::empty())
		.expect("Failed to build request.");
	let (status, json) = send(app, request).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		json,
		serde_json::json!({ "role": "agent", "permissions": ["members.read", "claims.read"] })
	);
}

#[tokio::test]
async fn permissions_deny_uniformly() {
	let TestApp { app, .. } = test_app(None);
	let request = Request::builder()
		.uri("/v1/me/permissions")
		.body(Body::empty())
		.expect("Failed to build request.");
	let (anonymous_status, anonymous) = send(app.clone(), request).await;
	let request = Request::builder()
		.uri("/v1/me/permissions")
		.header(HEADER_ACTOR_ID, Uuid::new_v4().to_string())
		.header(HEADER_ROLE, "staff")
		.body(Body::empty())
		.expect("Failed to build request.");
	let (homeless_status, homeless) = send(app, request).await;

	assert_eq!(anonymous_status, StatusCode::UNAUTHORIZED);
	assert_eq!(
		anonymous,
		serde_json::json!({ "error_code": "unauthorized", "message": "Unauthorized" })
	);
	assert_eq!(homeless_status, anonymous_status);
	assert_eq!(homeless, anonymous);
}

#[tokio::test]
async fn camel_case_paging_fields_are_honored() {
	let TestApp { app, member_id } = test_app(None);
	let request = list_request(Some((member_id, "member")), r#"{"scope":"member","perPage":1}"#);
	let (status, json) = send(app.clone(), request).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["perPage"], 1);
	assert_eq!(json["totalCount"], 2);
	assert_eq!(json["totalPages"], 2);
	assert_eq!(json["claims"].as_array().map(Vec::len), Some(1));

	let first = json["claims"][0]["id"].as_str().expect("Claim id must be a string.").to_string();
	let request = list_request(Some((member_id, "member")), r#"{"scope":"member","perPage":2}"#);
	let (_, all) = send(app.clone(), request).await;
	let second = all["claims"]
		.as_array()
		.expect("Claims must be an array.")
		.iter()
		.filter_map(|claim| claim["id"].as_str())
		.find(|id| *id != first)
		.expect("Second member claim must exist.")
		.to_string();
	let body = format!(r#"{{"scope":"member","page":1,"perPage":1,"selectedClaimId":"{second}"}}"#);
	let (status, json) = send(app, list_request(Some((member_id, "member")), &body)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["claims"][0]["id"], first);
	assert_eq!(json["selected"]["id"], second);
}
