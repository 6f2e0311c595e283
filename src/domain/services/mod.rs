pub mod auth_error_message;
pub mod identity_provider;
