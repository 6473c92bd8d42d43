//! Affiliate invitations.
//!
//! An invitation starts `Pending` with a code and an expiry. It either runs
//! out (`Expired`) or is consumed once by a signing-up organization
//! (`Activated`), which clears the code and records the affiliate for good.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use serde::Serialize;

use crate::config::{INVITE_CODE_ALPHABET, INVITE_CODE_LENGTH, MAX_PENDING_INVITES};
use crate::errors::{AppError, AppResult, ConflictKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invitation {
    pub id: i64,
    pub org_id: i64,
    pub code: Option<String>,
    pub expires_at: Option<i64>,
    pub affiliate_org_id: Option<i64>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitationState<'a> {
    Pending { code: &'a str, expires_at: i64 },
    Expired,
    Activated { affiliate_org_id: i64 },
}

impl Invitation {
    pub fn state(&self, now: i64) -> InvitationState<'_> {
        if let Some(affiliate_org_id) = self.affiliate_org_id {
            return InvitationState::Activated { affiliate_org_id };
        }
        match (self.code.as_deref(), self.expires_at) {
            (Some(code), Some(expires_at)) if expires_at > now => {
                InvitationState::Pending { code, expires_at }
            }
            _ => InvitationState::Expired,
        }
    }
}

/// Draw a fresh alphanumeric code from the OS RNG.
pub fn generate_code() -> String {
    let mut bytes = [0u8; INVITE_CODE_LENGTH];
    OsRng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| INVITE_CODE_ALPHABET[*b as usize % INVITE_CODE_ALPHABET.len()] as char)
        .collect()
}

/// Issuing rules: affiliates cannot issue (no chains) and pending
/// invitations are capped.
pub fn ensure_may_issue(issuer_is_affiliate: bool, pending: u64) -> AppResult<()> {
    if issuer_is_affiliate {
        return Err(AppError::Forbidden);
    }
    if pending >= MAX_PENDING_INVITES {
        return Err(AppError::StateConflict(ConflictKind::InviteQuota));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invitation(
        code: Option<&str>,
        expires_at: Option<i64>,
        affiliate: Option<i64>,
    ) -> Invitation {
        Invitation {
            id: 1,
            org_id: 1,
            code: code.map(str::to_string),
            expires_at,
            affiliate_org_id: affiliate,
            created_at: 0,
        }
    }

    #[test]
    fn test_states() {
        let pending = invitation(Some("abc"), Some(100), None);
        assert!(matches!(pending.state(50), InvitationState::Pending { .. }));
        assert_eq!(pending.state(100), InvitationState::Expired);

        let activated = invitation(None, None, Some(9));
        assert_eq!(
            activated.state(1_000),
            InvitationState::Activated { affiliate_org_id: 9 }
        );
    }

    #[test]
    fn test_generated_codes() {
        let a = generate_code();
        let b = generate_code();
        assert_eq!(a.len(), INVITE_CODE_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_issue_rules() {
        assert!(ensure_may_issue(false, 0).is_ok());
        assert!(ensure_may_issue(false, MAX_PENDING_INVITES - 1).is_ok());
        assert!(matches!(
            ensure_may_issue(false, MAX_PENDING_INVITES),
            Err(AppError::StateConflict(ConflictKind::InviteQuota))
        ));
        assert!(matches!(ensure_may_issue(true, 0), Err(AppError::Forbidden)));
    }
}
