//! # Access Checks
//!
//! Role checks run after the session gate has verified the token.
//!
//! | Session | `ensure_admin` | `ensure_full_admin` |
//! |---|---|---|
//! | role `user` | 403 | 403 |
//! | role `admin`, responsibilities `["kyc"]` | ok | 403 |
//! | role `admin`, responsibilities `[]` | ok | ok |

use shared::Role;

use crate::{error::AuthError, token::Claims};

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// An admin without scoped verification responsibilities.
    pub fn is_full_admin(&self) -> bool {
        self.is_admin() && self.verification_responsibilities.is_empty()
    }

    pub fn ensure_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::NotAdmin)
        }
    }

    pub fn ensure_full_admin(&self) -> Result<(), AuthError> {
        self.ensure_admin()?;
        if self.verification_responsibilities.is_empty() {
            Ok(())
        } else {
            Err(AuthError::ScopedVerifier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role, responsibilities: &[&str]) -> Claims {
        Claims {
            sub: "u".to_string(),
            email: "u@ivrex.io".to_string(),
            role,
            verification_responsibilities: responsibilities.iter().map(|s| s.to_string()).collect(),
            access_token: "t".to_string(),
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_full_admin_requires_empty_responsibilities() {
        assert_eq!(claims(Role::Admin, &[]).ensure_full_admin(), Ok(()));
        assert_eq!(
            claims(Role::Admin, &["kyc"]).ensure_full_admin(),
            Err(AuthError::ScopedVerifier)
        );
        assert_eq!(claims(Role::User, &[]).ensure_full_admin(), Err(AuthError::NotAdmin));
    }

    #[test]
    fn test_scoped_verifier_is_still_admin() {
        let verifier = claims(Role::Admin, &["payments"]);
        assert!(verifier.is_admin());
        assert!(!verifier.is_full_admin());
        assert_eq!(verifier.ensure_admin(), Ok(()));
        assert!(AuthError::ScopedVerifier.is_forbidden());
        assert!(!AuthError::Expired.is_forbidden());
    }
}
