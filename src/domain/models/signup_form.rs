use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const PASSWORD_REQUIRED: &str = "Enter password (at least 6 characters).";

/// Raw signup form as posted by the page. Field names follow the form inputs.
#[derive(Clone, Default, Deserialize, Validate)]
#[cfg_attr(test, derive(Serialize))]
pub struct SignupForm {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "should be greater than 5 characters"))]
    pub password: String,

    #[serde(default, rename = "cpassword")]
    #[validate(must_match(other = "password", message = "Passwords does not match"))]
    pub confirm_password: String,
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Inline hints shown under the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_password: Option<String>,
}

impl FormHints {
    pub fn is_clean(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }
}

impl SignupForm {
    /// Hints for the current input. Runs on every keystroke and again on submit.
    ///
    /// A password length problem hides the confirmation mismatch hint.
    pub fn hints(&self) -> FormHints {
        let Err(errors) = self.validate() else {
            return FormHints::default();
        };

        let mut hints = FormHints::default();
        for (field, field_errors) in errors.field_errors() {
            let Some(error) = field_errors.first() else {
                continue;
            };
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {field}"));

            match &*field {
                "username" => hints.username = Some(message),
                "email" => hints.email = Some(message),
                "password" if self.password.is_empty() => {
                    hints.password = Some(PASSWORD_REQUIRED.to_string())
                }
                "password" => hints.password = Some(message),
                "confirm_password" => hints.confirm_password = Some(message),
                _ => {}
            }
        }

        if hints.password.is_some() {
            hints.confirm_password = None;
        }
        hints
    }

    /// Hints while typing. Fields still left empty stay quiet until submit.
    pub fn keystroke_hints(&self) -> FormHints {
        let mut hints = self.hints();
        let untouched = |value: &str| value.trim().is_empty();
        if untouched(&self.username) {
            hints.username = None;
        }
        if untouched(&self.email) {
            hints.email = None;
        }
        if self.password.is_empty() {
            hints.password = None;
        }
        if self.confirm_password.is_empty() {
            hints.confirm_password = None;
        }
        hints
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn form(password: &str, confirm_password: &str) -> SignupForm {
        SignupForm {
            username: "bob".to_string(),
            email: "bob@x.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }

    #[test]
    fn test_valid_form_has_no_hints() {
        assert!(form("abcdef", "abcdef").hints().is_clean());
    }

    #[rstest]
    #[case("a")]
    #[case("abcde")]
    fn test_short_password_hint_masks_mismatch(#[case] password: &str) {
        let hints = form(password, "something-else").hints();
        assert_eq!(
            hints.password.as_deref(),
            Some("should be greater than 5 characters")
        );
        assert_eq!(hints.confirm_password, None);
    }

    #[test]
    fn test_mismatch_hint() {
        let hints = form("abcdef", "abcdeg").hints();
        assert_eq!(hints.password, None);
        assert_eq!(
            hints.confirm_password.as_deref(),
            Some("Passwords does not match")
        );
    }

    #[test]
    fn test_required_hints() {
        let hints = SignupForm {
            username: "  ".to_string(),
            ..Default::default()
        }
        .hints();

        assert_eq!(hints.username.as_deref(), Some("Username is required"));
        assert_eq!(hints.email.as_deref(), Some("Enter a valid email address"));
        assert_eq!(hints.password.as_deref(), Some(PASSWORD_REQUIRED));
        assert_eq!(hints.confirm_password, None);
    }

    #[test]
    fn test_keystroke_hints_skip_untouched_fields() {
        assert!(SignupForm::default().keystroke_hints().is_clean());

        let hints = SignupForm {
            username: "bob".to_string(),
            email: "bob@".to_string(),
            password: "abc".to_string(),
            ..Default::default()
        }
        .keystroke_hints();

        assert_eq!(hints.username, None);
        assert_eq!(hints.email.as_deref(), Some("Enter a valid email address"));
        assert_eq!(
            hints.password.as_deref(),
            Some("should be greater than 5 characters")
        );
        assert_eq!(hints.confirm_password, None);
    }

    #[test]
    fn test_keystroke_mismatch_once_confirmation_typed() {
        let hints = form("abcdef", "abc").keystroke_hints();
        assert_eq!(hints.password, None);
        assert_eq!(
            hints.confirm_password.as_deref(),
            Some("Passwords does not match")
        );
    }

    #[test]
    fn test_debug_hides_passwords() {
        let rendered = format!("{:?}", form("topsecret", "topsecret"));
        assert!(rendered.contains("bob@x.com"));
        assert!(!rendered.contains("topsecret"));
    }

    #[test]
    fn test_deserializes_form_field_names() {
        let form: SignupForm =
            serde_urlencoded::from_str("username=bob&email=bob%40x.com&password=abcdef&cpassword=abcdef")
                .unwrap();
        assert_eq!(form.email, "bob@x.com");
        assert_eq!(form.confirm_password, "abcdef");
    }
}
