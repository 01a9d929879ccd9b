use std::sync::Arc;

use claimscope_config::Config;
use claimscope_service::ClaimsService;
use claimscope_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ClaimsService>,
	/// Bearer token required on `/v1` routes, if any.
	pub api_auth_token: Option<String>,
}
impl AppState {
	pub async fn new(config: Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = ClaimsService::new(&config, db);

		Ok(Self::with_service(service, config.security.api_auth_token))
	}

	pub fn with_service(service: ClaimsService, api_auth_token: Option<String>) -> Self {
		Self { service: Arc::new(service), api_auth_token }
	}
}
