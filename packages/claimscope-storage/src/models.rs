use time::OffsetDateTime;
use uuid::Uuid;

/// One `claims` row joined with its owner's identity from `users`.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct ClaimRow {
	pub id: Uuid,
	pub tenant_id: String,
	pub branch_id: Option<String>,
	pub agent_id: Option<Uuid>,
	pub staff_id: Option<Uuid>,
	pub user_id: Uuid,
	pub status: String,
	pub category: Option<String>,
	pub company_name: Option<String>,
	/// Minor currency units.
	pub claim_amount: Option<i64>,
	pub currency: Option<String>,
	pub title: String,
	pub created_at: OffsetDateTime,
	pub claimant_name: Option<String>,
	pub claimant_email: Option<String>,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct UnreadCount {
	pub claim_id: Uuid,
	pub unread_count: i64,
}
