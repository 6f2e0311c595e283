use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    domain::{
        models::{
            callback_url::CallbackUrl,
            notice::Notice,
            signup_form::{FormHints, SignupForm},
            user::{Role, UserProfile},
        },
        repositories::user_profile_repository::UserProfileRepository,
        services::identity_provider::IdentityProvider,
    },
    presentation::views::signup_page::SignupPage,
    usecase::{
        register_user_usecase::RegisterUserUsecase,
        signup_flow::{SignupFlow, SignupOutcome, SignupState},
    },
};

// Request

#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

impl CallbackQuery {
    fn callback(&self) -> CallbackUrl {
        CallbackUrl::from_query(self.callback_url.as_deref())
    }
}

// Response

/// json for a successful registration
#[derive(Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: ProfileInfo,
    pub redirect: String,
    pub notice: Notice,
}

#[derive(Serialize, Deserialize)]
pub struct ProfileInfo {
    pub uid: String,
    pub username: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "lastlogin")]
    pub last_login: String,
    pub role: Role,
}

impl From<UserProfile> for ProfileInfo {
    fn from(profile: UserProfile) -> Self {
        Self {
            uid: profile.uid().to_string(),
            username: profile.username().as_str().to_string(),
            first_name: profile.first_name().to_string(),
            last_name: profile.last_name().to_string(),
            email: profile.email().as_str().to_string(),
            last_login: profile
                .last_login()
                .map(|at| at.to_rfc3339())
                .unwrap_or_default(),
            role: profile.role(),
        }
    }
}

/// json for a submission rejected by validation
#[derive(Serialize, Deserialize)]
pub struct ValidationFailedResponse {
    pub error: String,
    pub hints: FormHints,
}

/// json for a failed registration
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/* Router Function and Handler Function */

/// Signup routes, both the html form and the json api.
pub fn create_signup_router<I, R>(register_service: RegisterUserUsecase<I, R>) -> Router
where
    I: IdentityProvider + 'static,
    R: UserProfileRepository + 'static,
{
    let state = AppState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/signup", get(signup_page).post(submit_signup::<I, R>))
        .route("/api/register", post(register::<I, R>))
        .route("/api/signup/hints", post(signup_hints))
        .with_state(state)
}

pub struct AppState<I: IdentityProvider, R: UserProfileRepository> {
    pub register_service: Arc<RegisterUserUsecase<I, R>>,
}

impl<I: IdentityProvider, R: UserProfileRepository> Clone for AppState<I, R> {
    fn clone(&self) -> Self {
        Self {
            register_service: Arc::clone(&self.register_service),
        }
    }
}

fn render_page(status: StatusCode, page: SignupPage<'_>) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            error!(error = %err, "failed to render signup page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

// handler function

async fn signup_page(Query(query): Query<CallbackQuery>) -> Response {
    let form = SignupForm::default();
    let hints = FormHints::default();
    render_page(
        StatusCode::OK,
        SignupPage::new(&SignupState::Idle, &form, &hints, None, &query.callback()),
    )
}

/// handler function for the html form post
async fn submit_signup<I, R>(
    State(state): State<AppState<I, R>>,
    Query(query): Query<CallbackQuery>,
    Form(form): Form<SignupForm>,
) -> Response
where
    I: IdentityProvider + 'static,
    R: UserProfileRepository + 'static,
{
    let callback = query.callback();
    let flow = SignupFlow::new(state.register_service.clone());

    match flow.submit(&form, &callback).await {
        SignupOutcome::Registered { notice, .. } => {
            let hints = FormHints::default();
            render_page(
                StatusCode::OK,
                SignupPage::new(&flow.state(), &form, &hints, Some(&notice), &callback),
            )
        }
        SignupOutcome::Rejected(hints) => render_page(
            StatusCode::UNPROCESSABLE_ENTITY,
            SignupPage::new(&flow.state(), &form, &hints, None, &callback),
        ),
        SignupOutcome::Failed { notice, .. } => {
            let hints = FormHints::default();
            render_page(
                StatusCode::BAD_REQUEST,
                SignupPage::new(&flow.state(), &form, &hints, Some(&notice), &callback),
            )
        }
    }
}

/// handler function for json registration
async fn register<I, R>(
    State(state): State<AppState<I, R>>,
    Query(query): Query<CallbackQuery>,
    Json(payload): Json<SignupForm>,
) -> Response
where
    I: IdentityProvider + 'static,
    R: UserProfileRepository + 'static,
{
    let flow = SignupFlow::new(state.register_service.clone());

    match flow.submit(&payload, &query.callback()).await {
        SignupOutcome::Registered {
            registration,
            notice,
            redirect,
        } => {
            let response = RegisterResponse {
                user: registration.profile.into(),
                redirect: redirect.as_str().to_string(),
                notice,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        SignupOutcome::Rejected(hints) => {
            let response = ValidationFailedResponse {
                error: "Validation failed".to_string(),
                hints,
            };
            (StatusCode::UNPROCESSABLE_ENTITY, Json(response)).into_response()
        }
        SignupOutcome::Failed { code, notice } => {
            let response = ErrorResponse {
                error: ErrorDetail {
                    code,
                    message: notice.message,
                },
            };
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
    }
}

/// handler function for keystroke validation
async fn signup_hints(Json(payload): Json<SignupForm>) -> Json<FormHints> {
    Json(payload.keystroke_hints())
}
