use async_trait::async_trait;

use crate::domain::{
    error::IdentityError,
    models::{
        credential::{AuthCredential, Password},
        user::EmailAddress,
    },
};

/// Third-party identity provider that owns credentials
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an email/password account
    async fn sign_up_user(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<AuthCredential, IdentityError>;
}
