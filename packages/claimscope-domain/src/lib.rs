pub mod access;
pub mod permission;
pub mod redaction;
pub mod role;
pub mod scope;
pub mod view;

pub use access::{AccessDecision, validate_access};
pub use permission::{Permission, has_permission, permissions_for, role_has_permission};
pub use redaction::{RowVisibility, row_visibility};
pub use role::{Role, UnknownRole};
pub use scope::{Actor, Narrowing, ScopeError, ScopeFilter, TenantBoundary, resolve_scope};
pub use view::{ClaimStatus, UnknownViewScope, ViewScope};
