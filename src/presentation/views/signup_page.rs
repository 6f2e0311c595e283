use askama::Template;

use crate::{
    domain::models::{
        callback_url::CallbackUrl,
        notice::{Notice, NoticeLevel},
        signup_form::{FormHints, SignupForm},
    },
    usecase::signup_flow::SignupState,
};

/// Seconds the success toast stays up before the browser follows the redirect.
pub const REDIRECT_DELAY_SECS: u8 = 2;

/// Signup page. Passwords are never echoed back into the form.
///
/// Once the state is `Redirected` the form is replaced by the notice and a
/// timed refresh to the callback path.
#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupPage<'a> {
    loading: bool,
    redirect: &'a str,
    redirect_delay_secs: u8,
    action: String,
    username: &'a str,
    email: &'a str,
    username_hint: &'a str,
    email_hint: &'a str,
    password_hint: &'a str,
    confirm_password_hint: &'a str,
    notice_level: &'a str,
    notice_message: &'a str,
}

impl<'a> SignupPage<'a> {
    pub fn new(
        state: &'a SignupState,
        form: &'a SignupForm,
        hints: &'a FormHints,
        notice: Option<&'a Notice>,
        callback: &CallbackUrl,
    ) -> Self {
        Self {
            loading: state.is_loading(),
            redirect: match state {
                SignupState::Redirected { target } => target.as_str(),
                _ => "",
            },
            redirect_delay_secs: REDIRECT_DELAY_SECS,
            action: signup_action(callback),
            username: &form.username,
            email: &form.email,
            username_hint: hint(&hints.username),
            email_hint: hint(&hints.email),
            password_hint: hint(&hints.password),
            confirm_password_hint: hint(&hints.confirm_password),
            notice_level: match notice.map(|n| n.level) {
                Some(NoticeLevel::Success) => "success",
                Some(NoticeLevel::Error) => "error",
                None => "",
            },
            notice_message: notice.map(|n| n.message.as_str()).unwrap_or(""),
        }
    }
}

fn hint(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn signup_action(callback: &CallbackUrl) -> String {
    match serde_urlencoded::to_string([("callbackUrl", callback.as_str())]) {
        Ok(query) => format!("/signup?{query}"),
        Err(_) => "/signup".to_string(),
    }
}
