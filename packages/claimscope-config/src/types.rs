use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub listing: Listing,
	pub security: Security,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Listing {
	/// Used when a request asks for zero rows per page.
	pub default_per_page: u32,
	/// Larger requests are clamped, not rejected.
	pub max_per_page: u32,
	/// Deadline applied to every query issued for one listing.
	pub query_timeout_ms: u64,
	/// Search text beyond this many characters is truncated.
	pub max_search_chars: usize,
}
impl Default for Listing {
	fn default() -> Self {
		Self {
			default_per_page: 20,
			max_per_page: 100,
			query_timeout_ms: 5_000,
			max_search_chars: 200,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
	/// Optional bearer token required on every API request. Empty strings disable it.
	pub api_auth_token: Option<String>,
}
