use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use tokio::{net::TcpListener, sync::watch};

use crate::{
    domain::{
        error::{IdentityError, ProfileError},
        models::{
            credential::{AuthCredential, Password},
            signup_form::SignupForm,
            user::{EmailAddress, UserProfile},
        },
        repositories::user_profile_repository::UserProfileRepository,
        services::identity_provider::IdentityProvider,
    },
    usecase::signup_flow::SignupState,
};

pub fn signup_form(username: &str, email: &str, password: &str, confirm_password: &str) -> SignupForm {
    SignupForm {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: confirm_password.to_string(),
    }
}

/// Serve `router` on an ephemeral local port and return its base url.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

// mock identity provider

#[derive(Clone, Default)]
pub struct MockIdentityProvider {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    loading_seen: Arc<Mutex<Vec<bool>>>,
    observer: Option<watch::Receiver<SignupState>>,
    failure: Option<String>,
    hang: bool,
}

impl MockIdentityProvider {
    pub fn failing(code: &str) -> Self {
        Self {
            failure: Some(code.to_string()),
            ..Default::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Default::default()
        }
    }

    pub fn observing(mut self, observer: watch::Receiver<SignupState>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// (email, password) pairs received so far
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn loading_seen(&self) -> Vec<bool> {
        self.loading_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_up_user(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<AuthCredential, IdentityError> {
        self.calls
            .lock()
            .unwrap()
            .push((email.as_str().to_string(), password.expose().to_string()));
        if let Some(observer) = &self.observer {
            let loading = observer.borrow().is_loading();
            self.loading_seen.lock().unwrap().push(loading);
        }
        if self.hang {
            std::future::pending::<()>().await;
        }

        match &self.failure {
            Some(code) => Err(IdentityError::new(code.clone(), "mock failure")),
            None => Ok(AuthCredential::new(
                format!("uid-{}", email.as_str()),
                email.clone(),
            )),
        }
    }
}

// mock profile repository

#[derive(Clone, Default)]
pub struct MockProfileRepository {
    created: Arc<Mutex<Vec<UserProfile>>>,
    loading_seen: Arc<Mutex<Vec<bool>>>,
    observer: Option<watch::Receiver<SignupState>>,
    failure: Option<ProfileError>,
}

impl MockProfileRepository {
    pub fn failing(error: ProfileError) -> Self {
        Self {
            failure: Some(error),
            ..Default::default()
        }
    }

    pub fn observing(mut self, observer: watch::Receiver<SignupState>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn created(&self) -> Vec<UserProfile> {
        self.created.lock().unwrap().clone()
    }

    pub fn loading_seen(&self) -> Vec<bool> {
        self.loading_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserProfileRepository for MockProfileRepository {
    async fn create_user(&self, profile: &UserProfile) -> Result<(), ProfileError> {
        if let Some(observer) = &self.observer {
            let loading = observer.borrow().is_loading();
            self.loading_seen.lock().unwrap().push(loading);
        }
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.created.lock().unwrap().push(profile.clone());
        Ok(())
    }
}
