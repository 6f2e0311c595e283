use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{
    error::IdentityError,
    models::{
        credential::{AuthCredential, Password},
        user::EmailAddress,
    },
    services::{auth_error_message::auth_code, identity_provider::IdentityProvider},
};

pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Deserialize)]
struct SignUpResponse {
    #[serde(rename = "localId")]
    local_id: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Email/password signup against the Identity Toolkit REST API.
#[derive(Clone)]
pub struct FirebaseIdentityProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl FirebaseIdentityProvider {
    pub fn new(client: reqwest::Client, endpoint: String, api_key: String) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn sign_up_user(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<AuthCredential, IdentityError> {
        let url = format!("{}/accounts:signUp", self.endpoint);
        let request = SignUpRequest {
            email: email.as_str(),
            password: password.expose(),
            return_secure_token: true,
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| IdentityError::new(auth_code::NETWORK_REQUEST_FAILED, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body = response.json::<SignUpResponse>().await.map_err(|e| {
                IdentityError::new(
                    auth_code::INTERNAL_ERROR,
                    format!("malformed signUp response: {e}"),
                )
            })?;
            debug!(uid = %body.local_id, "identity provider accepted signup");
            return Ok(AuthCredential::new(body.local_id, email.clone()));
        }

        let message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope.error.message,
            Err(_) => format!("identity provider returned {status}"),
        };
        let code = code_for_rest_message(&message);
        warn!(%status, code, message = %message, "identity provider rejected signup");

        Err(IdentityError::new(code, message))
    }
}

/// Translate a REST error message such as `WEAK_PASSWORD : ...` into the
/// client SDK style code the message mapper understands.
fn code_for_rest_message(message: &str) -> &'static str {
    let key = message.split(" : ").next().unwrap_or(message).trim();
    match key {
        "EMAIL_EXISTS" => auth_code::EMAIL_ALREADY_IN_USE,
        "INVALID_EMAIL" => auth_code::INVALID_EMAIL,
        "WEAK_PASSWORD" => auth_code::WEAK_PASSWORD,
        "MISSING_PASSWORD" => auth_code::MISSING_PASSWORD,
        "OPERATION_NOT_ALLOWED" => auth_code::OPERATION_NOT_ALLOWED,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => auth_code::TOO_MANY_REQUESTS,
        key if key.starts_with("API key not valid") => auth_code::INVALID_API_KEY,
        _ => auth_code::INTERNAL_ERROR,
    }
}
