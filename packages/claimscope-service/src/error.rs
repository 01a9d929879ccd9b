use claimscope_domain::{Role, ScopeError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("No authenticated actor.")]
	Unauthenticated,
	#[error("Unauthorized: {message}")]
	Unauthorized { message: String },
	#[error("Actor with role {role} has no tenant_id.")]
	MissingTenant { role: Role },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Timed out while running {operation}.")]
	Timeout { operation: &'static str },
}
impl Error {
	/// Errors that callers only ever see as a generic denial.
	pub fn is_denial(&self) -> bool {
		matches!(
			self,
			Self::Unauthenticated | Self::Unauthorized { .. } | Self::MissingTenant { .. }
		)
	}
}

impl From<ScopeError> for Error {
	fn from(err: ScopeError) -> Self {
		match err {
			ScopeError::Unauthenticated => Self::Unauthenticated,
			ScopeError::MissingTenant { role } => Self::MissingTenant { role },
		}
	}
}

impl From<claimscope_storage::Error> for Error {
	fn from(err: claimscope_storage::Error) -> Self {
		match err {
			claimscope_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
		}
	}
}
