mod config;
mod domain;
mod infrastructure;
mod presentation;
mod telemetry;
#[cfg(test)]
mod test_support;
mod usecase;

use axum::{Router, routing::get};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    config::{AppConfig, ProfileBackend},
    domain::{
        repositories::user_profile_repository::UserProfileRepository,
        services::identity_provider::IdentityProvider,
    },
    infrastructure::{
        firebase_identity_provider::FirebaseIdentityProvider,
        http_user_profile_repository::HttpUserProfileRepository, profile_store::ProfileStore,
        sea_orm_user_profile_repository::SeaOrmUserProfileRepository,
    },
    presentation::handlers::signup_handler::create_signup_router,
    usecase::register_user_usecase::RegisterUserUsecase,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    telemetry::init_tracing(&config.logging);

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;
    let identity_provider = FirebaseIdentityProvider::new(
        client.clone(),
        config.identity.endpoint.clone(),
        config.identity.api_key.clone(),
    );

    let profile_store = match &config.profile_backend {
        ProfileBackend::Http { base_url } => {
            ProfileStore::Remote(HttpUserProfileRepository::new(client.clone(), base_url.clone()))
        }
        ProfileBackend::Database { url } => {
            let mut opt = ConnectOptions::new(url.clone());
            opt.max_connections(10)
                .min_connections(1)
                .sqlx_logging(true);
            let db = Database::connect(opt).await?;
            let repository = SeaOrmUserProfileRepository::new(db);
            repository.ensure_schema().await?;
            ProfileStore::Database(repository)
        }
    };

    let register_user_usecase = RegisterUserUsecase::new(identity_provider, profile_store);
    let app = create_app(register_user_usecase);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "signup service listening");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn create_app<I, R>(register_user_usecase: RegisterUserUsecase<I, R>) -> Router
where
    I: IdentityProvider + 'static,
    R: UserProfileRepository + 'static,
{
    Router::new()
        .route("/", get(|| async { "VidShop" }))
        .merge(create_signup_router(register_user_usecase))
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
