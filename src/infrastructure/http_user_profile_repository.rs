use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{
    error::ProfileError,
    models::user::{Role, UserProfile},
    repositories::user_profile_repository::UserProfileRepository,
    services::auth_error_message::auth_code,
};

/// Body of `POST /users`. Field names are the ones the accounts service expects.
#[derive(Serialize)]
struct CreateUserRequest<'a> {
    uid: &'a str,
    username: &'a str,
    firstname: &'a str,
    lastname: &'a str,
    email: &'a str,
    lastlogin: String,
    role: Role,
}

impl<'a> From<&'a UserProfile> for CreateUserRequest<'a> {
    fn from(profile: &'a UserProfile) -> Self {
        Self {
            uid: profile.uid(),
            username: profile.username().as_str(),
            firstname: profile.first_name(),
            lastname: profile.last_name(),
            email: profile.email().as_str(),
            lastlogin: profile
                .last_login()
                .map(|at| at.to_rfc3339())
                .unwrap_or_default(),
            role: profile.role(),
        }
    }
}

#[derive(Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
}

/// Profile persistence through the storefront's user-accounts service.
#[derive(Clone)]
pub struct HttpUserProfileRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserProfileRepository {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl UserProfileRepository for HttpUserProfileRepository {
    async fn create_user(&self, profile: &UserProfile) -> Result<(), ProfileError> {
        let response = self
            .client
            .post(format!("{}/users", self.base_url))
            .json(&CreateUserRequest::from(profile))
            .send()
            .await
            .map_err(|e| ProfileError::with_code(auth_code::NETWORK_REQUEST_FAILED, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(uid = profile.uid(), %status, "accounts service stored profile");
            return Ok(());
        }

        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        let code = match (body.code, status) {
            (Some(code), _) => Some(code),
            (None, StatusCode::CONFLICT) => Some(auth_code::PROFILE_ALREADY_EXISTS.to_string()),
            (None, _) => None,
        };
        warn!(uid = profile.uid(), %status, code = code.as_deref(), "accounts service rejected profile");

        Err(ProfileError::new(code, body.message))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::post,
    };
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        domain::models::user::{EmailAddress, Username},
        test_support::spawn_server,
    };

    type Received = Arc<Mutex<Vec<Value>>>;

    async fn fake_users(State(received): State<Received>, Json(body): Json<Value>) -> Response {
        received.lock().unwrap().push(body.clone());
        match body["username"].as_str() {
            Some("taken") => (StatusCode::CONFLICT, Json(json!({"message": "username taken"}))).into_response(),
            Some("crash") => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "db down", "code": "profile/storage"})),
            )
                .into_response(),
            Some("silent") => StatusCode::BAD_GATEWAY.into_response(),
            _ => StatusCode::CREATED.into_response(),
        }
    }

    async fn repository() -> (HttpUserProfileRepository, Received) {
        let received = Received::default();
        let router = Router::new()
            .route("/users", post(fake_users))
            .with_state(received.clone());
        let base = spawn_server(router).await;
        (
            HttpUserProfileRepository::new(reqwest::Client::new(), format!("{base}/")),
            received,
        )
    }

    fn profile(username: &str) -> UserProfile {
        UserProfile::new(
            "uid-1".to_string(),
            Username::new(username.to_string()).unwrap(),
            EmailAddress::new("bob@x.com".to_string()).unwrap(),
            Role::Customer,
        )
    }

    #[tokio::test]
    async fn test_create_user_positive() {
        let (repository, received) = repository().await;

        repository.create_user(&profile("bob")).await.unwrap();

        let received = received.lock().unwrap();
        assert_eq!(
            received[0],
            json!({
                "uid": "uid-1",
                "username": "bob",
                "firstname": "",
                "lastname": "",
                "email": "bob@x.com",
                "lastlogin": "",
                "role": 3
            })
        );
        assert!(received[0].get("password").is_none());
    }

    #[tokio::test]
    async fn test_conflict_without_code() {
        let (repository, _) = repository().await;

        let err = repository.create_user(&profile("taken")).await.unwrap_err();

        assert_eq!(err.code(), Some(auth_code::PROFILE_ALREADY_EXISTS));
        assert_eq!(err.message(), Some("username taken"));
    }

    #[tokio::test]
    async fn test_backend_code_is_kept() {
        let (repository, _) = repository().await;

        let err = repository.create_user(&profile("crash")).await.unwrap_err();

        assert_eq!(err.code(), Some("profile/storage"));
        assert_eq!(err.message(), Some("db down"));
    }

    #[tokio::test]
    async fn test_empty_error_body() {
        let (repository, _) = repository().await;

        let err = repository.create_user(&profile("silent")).await.unwrap_err();

        assert_eq!(err.code(), None);
        assert_eq!(err.message(), None);
    }
}
