//! Typed, parameterized predicates over the claim listing relation.
//!
//! A [`PredicateSet`] can only be created from a [`TenantIsolation`], so the tenant boundary is
//! decided before any other predicate exists. Every user-supplied value reaches SQL through
//! `push_bind`; nothing is concatenated into the statement text.
//!
//! The same tree can be evaluated against a materialized [`ClaimRow`] with
//! [`PredicateSet::matches`], which keeps SQL-less stores in agreement with Postgres.

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::ClaimRow;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ClaimColumn {
	Id,
	TenantId,
	BranchId,
	AgentId,
	StaffId,
	UserId,
	Status,
	Title,
	CompanyName,
	ClaimantName,
	ClaimantEmail,
}
impl ClaimColumn {
	pub fn sql(&self) -> &'static str {
		match self {
			Self::Id => "c.id",
			Self::TenantId => "c.tenant_id",
			Self::BranchId => "c.branch_id",
			Self::AgentId => "c.agent_id",
			Self::StaffId => "c.staff_id",
			Self::UserId => "c.user_id",
			Self::Status => "c.status",
			Self::Title => "c.title",
			Self::CompanyName => "c.company_name",
			Self::ClaimantName => "u.name",
			Self::ClaimantEmail => "u.email",
		}
	}

	fn value<'a>(&self, row: &'a ClaimRow) -> Option<ColumnValue<'a>> {
		match self {
			Self::Id => Some(ColumnValue::Id(row.id)),
			Self::TenantId => Some(ColumnValue::Text(&row.tenant_id)),
			Self::BranchId => row.branch_id.as_deref().map(ColumnValue::Text),
			Self::AgentId => row.agent_id.map(ColumnValue::Id),
			Self::StaffId => row.staff_id.map(ColumnValue::Id),
			Self::UserId => Some(ColumnValue::Id(row.user_id)),
			Self::Status => Some(ColumnValue::Text(&row.status)),
			Self::Title => Some(ColumnValue::Text(&row.title)),
			Self::CompanyName => row.company_name.as_deref().map(ColumnValue::Text),
			Self::ClaimantName => row.claimant_name.as_deref().map(ColumnValue::Text),
			Self::ClaimantEmail => row.claimant_email.as_deref().map(ColumnValue::Text),
		}
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PredicateValue {
	Text(String),
	Id(Uuid),
}
impl PredicateValue {
	fn push_bind(&self, builder: &mut QueryBuilder<'_, Postgres>) {
		match self {
			Self::Text(value) => builder.push_bind(value.clone()),
			Self::Id(value) => builder.push_bind(*value),
		};
	}

	fn equals(&self, value: Option<ColumnValue<'_>>) -> Option<bool> {
		match (value?, self) {
			(ColumnValue::Text(lhs), Self::Text(rhs)) => Some(lhs == rhs),
			(ColumnValue::Id(lhs), Self::Id(rhs)) => Some(lhs == *rhs),
			_ => Some(false),
		}
	}
}

impl From<&str> for PredicateValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for PredicateValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<Uuid> for PredicateValue {
	fn from(value: Uuid) -> Self {
		Self::Id(value)
	}
}

#[derive(Clone, Copy, Debug)]
enum ColumnValue<'a> {
	Text(&'a str),
	Id(Uuid),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
	Eq(ClaimColumn, PredicateValue),
	NotEq(ClaimColumn, PredicateValue),
	IsNull(ClaimColumn),
	IsNotNull(ClaimColumn),
	/// Case-insensitive substring match against any of the columns.
	AnyContains { columns: Vec<ClaimColumn>, needle: String },
	/// Matches no row.
	Never,
}
impl Predicate {
	pub fn eq(column: ClaimColumn, value: impl Into<PredicateValue>) -> Self {
		Self::Eq(column, value.into())
	}

	pub fn not_eq(column: ClaimColumn, value: impl Into<PredicateValue>) -> Self {
		Self::NotEq(column, value.into())
	}

	pub fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>) {
		match self {
			Self::Eq(column, value) => {
				builder.push(column.sql()).push(" = ");
				value.push_bind(builder);
			},
			Self::NotEq(column, value) => {
				builder.push(column.sql()).push(" <> ");
				value.push_bind(builder);
			},
			Self::IsNull(column) => {
				builder.push(column.sql()).push(" IS NULL");
			},
			Self::IsNotNull(column) => {
				builder.push(column.sql()).push(" IS NOT NULL");
			},
			Self::AnyContains { columns, needle } => {
				if columns.is_empty() {
					builder.push("FALSE");

					return;
				}

				let pattern = format!("%{}%", escape_like(needle));

				builder.push("(");

				for (i, column) in columns.iter().enumerate() {
					if i > 0 {
						builder.push(" OR ");
					}

					builder.push(column.sql()).push(" ILIKE ").push_bind(pattern.clone());
				}

				builder.push(")");
			},
			Self::Never => {
				builder.push("FALSE");
			},
		}
	}

	/// SQL three-valued logic collapses to `false` here: comparisons against NULL never match.
	pub fn matches(&self, row: &ClaimRow) -> bool {
		match self {
			Self::Eq(column, value) => value.equals(column.value(row)).unwrap_or(false),
			Self::NotEq(column, value) =>
				value.equals(column.value(row)).map(|equal| !equal).unwrap_or(false),
			Self::IsNull(column) => column.value(row).is_none(),
			Self::IsNotNull(column) => column.value(row).is_some(),
			Self::AnyContains { columns, needle } => {
				let needle = needle.to_lowercase();

				columns.iter().any(|column| match column.value(row) {
					Some(ColumnValue::Text(text)) => text.to_lowercase().contains(&needle),
					_ => false,
				})
			},
			Self::Never => false,
		}
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TenantIsolation {
	Tenant(String),
	CrossTenant,
}
impl TenantIsolation {
	/// Renders the isolation clause for `column`. Returns `false` when nothing was rendered.
	pub fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>, column: &str) -> bool {
		match self {
			Self::Tenant(tenant_id) => {
				builder.push(column).push(" = ").push_bind(tenant_id.clone());

				true
			},
			Self::CrossTenant => false,
		}
	}

	pub fn admits(&self, tenant_id: &str) -> bool {
		match self {
			Self::Tenant(expected) => expected == tenant_id,
			Self::CrossTenant => true,
		}
	}
}

/// A conjunction of predicates anchored on a tenant boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PredicateSet {
	tenant: TenantIsolation,
	predicates: Vec<Predicate>,
}
impl PredicateSet {
	pub fn new(tenant: TenantIsolation) -> Self {
		Self { tenant, predicates: Vec::new() }
	}

	pub fn push(&mut self, predicate: Predicate) -> &mut Self {
		self.predicates.push(predicate);

		self
	}

	pub fn and(mut self, predicate: Predicate) -> Self {
		self.predicates.push(predicate);

		self
	}

	pub fn tenant(&self) -> &TenantIsolation {
		&self.tenant
	}

	pub fn predicates(&self) -> &[Predicate] {
		&self.predicates
	}

	/// Appends the ` WHERE` clause. An unrestricted cross-tenant set renders ` WHERE TRUE`.
	pub fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
		builder.push(" WHERE ");

		let mut first = !self.tenant.push_sql(builder, ClaimColumn::TenantId.sql());

		if first && self.predicates.is_empty() {
			builder.push("TRUE");

			return;
		}

		for predicate in &self.predicates {
			if !first {
				builder.push(" AND ");
			}

			predicate.push_sql(builder);

			first = false;
		}
	}

	pub fn matches(&self, row: &ClaimRow) -> bool {
		self.tenant.admits(&row.tenant_id)
			&& self.predicates.iter().all(|predicate| predicate.matches(row))
	}
}

pub fn escape_like(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());

	for ch in raw.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}
