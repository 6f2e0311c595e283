pub mod callback_url;
pub mod credential;
pub mod notice;
pub mod signup_form;
pub mod user;
