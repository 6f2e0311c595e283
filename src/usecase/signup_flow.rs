use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use crate::{
    domain::{
        error::DomainError,
        models::{
            callback_url::CallbackUrl,
            notice::{Notice, SIGNUP_SUCCESS},
            signup_form::{FormHints, SignupForm},
        },
        repositories::user_profile_repository::UserProfileRepository,
        services::{auth_error_message::map_auth_code_to_message, identity_provider::IdentityProvider},
    },
    usecase::register_user_usecase::{RegisterUserUsecase, RegistrationResult},
};

/// Where a signup form currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupState {
    Idle,
    Submitting,
    Redirected { target: String },
    IdleWithError { message: String },
}

impl SignupState {
    /// The spinner replaces the form while this is true.
    pub fn is_loading(&self) -> bool {
        matches!(self, SignupState::Submitting)
    }
}

#[derive(Debug)]
pub enum SignupOutcome {
    /// Input failed validation; nothing was sent anywhere.
    Rejected(FormHints),
    Registered {
        registration: RegistrationResult,
        notice: Notice,
        redirect: CallbackUrl,
    },
    Failed {
        code: String,
        notice: Notice,
    },
}

/// Drives one signup form: validation, the loading flag, and the final notice.
pub struct SignupFlow<I: IdentityProvider, R: UserProfileRepository> {
    usecase: Arc<RegisterUserUsecase<I, R>>,
    state: watch::Sender<SignupState>,
}

impl<I: IdentityProvider, R: UserProfileRepository> SignupFlow<I, R> {
    pub fn new(usecase: Arc<RegisterUserUsecase<I, R>>) -> Self {
        let (state, _) = watch::channel(SignupState::Idle);
        Self::with_state(usecase, state)
    }

    pub fn with_state(usecase: Arc<RegisterUserUsecase<I, R>>, state: watch::Sender<SignupState>) -> Self {
        Self { usecase, state }
    }

    pub fn state(&self) -> SignupState {
        self.state.borrow().clone()
    }

    pub async fn submit(&self, form: &SignupForm, callback: &CallbackUrl) -> SignupOutcome {
        let hints = form.hints();
        if !hints.is_clean() {
            return SignupOutcome::Rejected(hints);
        }

        self.state.send_replace(SignupState::Submitting);
        let _guard = LoadingGuard { state: &self.state };

        match self.usecase.create_user(form).await {
            Ok(registration) => {
                info!(
                    uid = registration.profile.uid(),
                    redirect = callback.as_str(),
                    "signup completed"
                );
                self.state.send_replace(SignupState::Redirected {
                    target: callback.as_str().to_string(),
                });
                SignupOutcome::Registered {
                    registration,
                    notice: Notice::success(SIGNUP_SUCCESS),
                    redirect: callback.clone(),
                }
            }
            Err(DomainError::InvalidForm(hints)) => {
                self.state.send_replace(SignupState::Idle);
                SignupOutcome::Rejected(hints)
            }
            Err(err) => {
                let code = err.auth_code().to_string();
                let message = map_auth_code_to_message(&code);
                match &err {
                    DomainError::Identity(identity_err) => error!(
                        code = %code,
                        provider_message = identity_err.message(),
                        "signup failed at identity provider"
                    ),
                    DomainError::Profile(profile_err) if profile_err.message().is_some() => error!(
                        code = %code,
                        backend_message = profile_err.message(),
                        error = %err,
                        "signup failed"
                    ),
                    _ => error!(code = %code, error = %err, "signup failed"),
                }
                self.state.send_replace(SignupState::IdleWithError {
                    message: message.clone(),
                });
                SignupOutcome::Failed {
                    code,
                    notice: Notice::error(message),
                }
            }
        }
    }
}

/// Clears the loading flag if a submission is dropped mid-flight.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<SignupState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                *state = SignupState::Idle;
                true
            } else {
                false
            }
        });
    }
}
