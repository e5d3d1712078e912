// ── Account domain types ──

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApprovalStatus {
    PendingApproval,
    Active,
    Rejected,
    Unknown,
}

impl ApprovalStatus {
    pub(crate) fn parse(raw: &str) -> Self {
        match raw {
            "PENDING_APPROVAL" => Self::PendingApproval,
            "ACTIVE" => Self::Active,
            "REJECTED" => Self::Rejected,
            _ => Self::Unknown,
        }
    }
}

/// A user account as the backend owns it. The client holds a read-through
/// cached copy, replaced wholesale on bootstrap and after profile edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub role: String,
    pub approval_status: ApprovalStatus,
    pub email_verified: bool,
}

impl Account {
    /// An admin role marker in `role` is the sole authorization check for
    /// admin-only views and calls.
    pub fn is_admin(&self) -> bool {
        self.role.contains("ADMIN")
    }
}

/// A pending proof-of-ownership check for a contact channel, returned by
/// registration so the caller can complete email verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationChallenge {
    pub id: String,
    pub channel: String,
    pub destination: String,
    pub status: String,
    pub verification_token: Option<String>,
    pub token_expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Outcome of account registration: the created account plus the email
/// verification challenge when the backend issued one.
#[derive(Debug, Clone)]
pub struct Registration {
    pub account: Account,
    pub email_verification: Option<VerificationChallenge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(role: &str) -> Account {
        Account {
            id: "u1".into(),
            email: "u1@example.com".into(),
            name: None,
            phone_number: None,
            role: role.into(),
            approval_status: ApprovalStatus::Active,
            email_verified: true,
        }
    }

    #[test]
    fn admin_marker_in_role_grants_admin() {
        assert!(account("ROLE_ADMIN").is_admin());
        assert!(account("ROLE_USER,ROLE_ADMIN").is_admin());
        assert!(!account("ROLE_USER").is_admin());
    }
}
