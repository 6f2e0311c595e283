use tracing::{info, warn};

use crate::domain::{
    error::DomainError,
    models::{
        credential::{AuthCredential, Password},
        signup_form::SignupForm,
        user::{EmailAddress, Role, UserProfile, Username},
    },
    repositories::user_profile_repository::UserProfileRepository,
    services::identity_provider::IdentityProvider,
};

#[derive(Debug)]
pub struct RegistrationResult {
    pub credential: AuthCredential,
    pub profile: UserProfile,
}

pub struct RegisterUserUsecase<I: IdentityProvider, R: UserProfileRepository> {
    identity_provider: I,
    profile_repository: R,
}

impl<I: IdentityProvider, R: UserProfileRepository> RegisterUserUsecase<I, R> {
    pub fn new(identity_provider: I, profile_repository: R) -> Self {
        Self {
            identity_provider,
            profile_repository,
        }
    }

    /// Create the identity account, then the storefront profile.
    ///
    /// Invalid input returns [`DomainError::InvalidForm`] before any call is made.
    pub async fn create_user(&self, form: &SignupForm) -> Result<RegistrationResult, DomainError> {
        let hints = form.hints();
        if !hints.is_clean() {
            return Err(DomainError::InvalidForm(hints));
        }

        let username = Username::new(form.username.clone())?;
        let email = EmailAddress::new(form.email.clone())?;
        let password = Password::new(form.password.clone())?;

        let credential = self
            .identity_provider
            .sign_up_user(&email, &password)
            .await?;
        info!(
            uid = credential.uid(),
            email = credential.email().as_str(),
            "identity account created"
        );

        // signup always yields a customer; other roles are granted elsewhere
        let profile = UserProfile::new(
            credential.uid().to_string(),
            username,
            email,
            Role::Customer,
        );

        if let Err(err) = self.profile_repository.create_user(&profile).await {
            warn!(
                uid = profile.uid(),
                error = %err,
                "profile creation failed after identity account was created"
            );
            return Err(err.into());
        }
        info!(uid = profile.uid(), username = profile.username().as_str(), "profile created");

        Ok(RegistrationResult {
            credential,
            profile,
        })
    }
}
