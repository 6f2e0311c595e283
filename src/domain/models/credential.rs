use std::fmt;

use crate::domain::{error::DomainError, models::user::EmailAddress};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Plain password as typed by the user.
///
/// Deliberately not `Serialize`; adapters that talk to the identity provider
/// read it through [`Password::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::WeakPassword);
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Account created by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCredential {
    uid: String,
    email: EmailAddress,
}

impl AuthCredential {
    pub fn new(uid: String, email: EmailAddress) -> Self {
        Self { uid, email }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}
