use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

pub type FirstName = String;
pub type LastName = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);
impl Username {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress(String);
impl EmailAddress {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let value = value.trim().to_string();
        if !validator::ValidateEmail::validate_email(&value) {
            return Err(DomainError::InvalidEmail);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Storefront roles. The numeric codes are what the backend stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Role {
    Admin = 1,
    Staff = 2,
    #[default]
    Customer = 3,
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        role as u8
    }
}

impl TryFrom<u8> for Role {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Role::Admin),
            2 => Ok(Role::Staff),
            3 => Ok(Role::Customer),
            other => Err(DomainError::UnknownRole(other)),
        }
    }
}

/// Denormalized profile record kept by the storefront backend.
///
/// The password never lives here; it is handed to the identity provider only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    uid: String,
    username: Username,
    first_name: FirstName,
    last_name: LastName,
    email: EmailAddress,
    last_login: Option<DateTime<Utc>>,
    role: Role,
}

impl UserProfile {
    /// Profile for a fresh signup: names empty, never logged in.
    pub fn new(uid: String, username: Username, email: EmailAddress, role: Role) -> Self {
        Self {
            uid,
            username,
            first_name: String::new(),
            last_name: String::new(),
            email,
            last_login: None,
            role,
        }
    }

    // getterのみ提供
    pub fn uid(&self) -> &str {
        &self.uid
    }
    pub fn username(&self) -> &Username {
        &self.username
    }
    pub fn first_name(&self) -> &str {
        &self.first_name
    }
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }
    pub fn role(&self) -> Role {
        self.role
    }
}
