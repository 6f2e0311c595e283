use thiserror::Error;

use crate::domain::{models::signup_form::FormHints, services::auth_error_message::auth_code};

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Signup form is invalid")]
    InvalidForm(FormHints),

    #[error("Identity provider error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Profile service error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Empty username")]
    EmptyUsername,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Weak password (minimum 6 characters required)")]
    WeakPassword,

    #[error("Unknown role code {0}")]
    UnknownRole(u8),
}

impl DomainError {
    /// Error code used to pick the user-facing message.
    pub fn auth_code(&self) -> &str {
        match self {
            DomainError::Identity(err) => err.code(),
            DomainError::Profile(err) => err.code().unwrap_or(auth_code::INTERNAL_ERROR),
            DomainError::InvalidEmail => auth_code::INVALID_EMAIL,
            DomainError::WeakPassword => auth_code::WEAK_PASSWORD,
            _ => auth_code::INTERNAL_ERROR,
        }
    }
}

/// Failure reported by the identity provider while creating a credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct IdentityError {
    code: String,
    message: String,
}

impl IdentityError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure reported by the profile backend.
///
/// Both fields are optional because remote services do not always send a
/// structured body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("profile creation failed: {}", .message.as_deref().unwrap_or("no message"))]
pub struct ProfileError {
    code: Option<String>,
    message: Option<String>,
}

impl ProfileError {
    pub fn new(code: Option<String>, message: Option<String>) -> Self {
        Self { code, message }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Some(code.into()), Some(message.into()))
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
