mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Listing, Postgres, Security, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.listing.default_per_page == 0 {
		return Err(Error::Validation {
			message: "listing.default_per_page must be greater than zero.".to_string(),
		});
	}
	if cfg.listing.max_per_page < cfg.listing.default_per_page {
		return Err(Error::Validation {
			message: "listing.max_per_page must be at least listing.default_per_page.".to_string(),
		});
	}
	if cfg.listing.query_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "listing.query_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.listing.max_search_chars == 0 {
		return Err(Error::Validation {
			message: "listing.max_search_chars must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.security.api_auth_token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false)
	{
		cfg.security.api_auth_token = None;
	}
}
