use claimscope_domain::RowVisibility;

use crate::list::ClaimListItem;

impl ClaimListItem {
	/// Keeps identifiers, ownership and status. Everything describing the case is withheld.
	pub fn redact(&mut self) {
		self.title = None;
		self.company_name = None;
		self.claim_amount = None;
		self.currency = None;
		self.category = None;
		self.claimant_name = None;
		self.claimant_email = None;
		self.unread_count = 0;
	}

	pub fn apply_visibility(&mut self, visibility: RowVisibility) {
		match visibility {
			RowVisibility::Full => {},
			RowVisibility::StatusOnly => self.redact(),
		}
	}
}
