pub const DEFAULT_CALLBACK_URL: &str = "/";

/// Where the browser goes after a successful signup.
///
/// Only same-site absolute paths are kept, so the `callbackUrl` parameter
/// cannot bounce users to another host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackUrl(String);

impl CallbackUrl {
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(path) if is_same_site_path(path) => Self(path.to_string()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CallbackUrl {
    fn default() -> Self {
        Self(DEFAULT_CALLBACK_URL.to_string())
    }
}

fn is_same_site_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.starts_with("/\\")
        && !path.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("/cart"), "/cart")]
    #[case(Some("/products/42?tab=reviews"), "/products/42?tab=reviews")]
    #[case(None, "/")]
    #[case(Some(""), "/")]
    #[case(Some("https://evil.example"), "/")]
    #[case(Some("//evil.example"), "/")]
    #[case(Some("/\\evil.example"), "/")]
    #[case(Some("/a\r\nSet-Cookie: x"), "/")]
    fn test_from_query(#[case] query: Option<&str>, #[case] expected: &str) {
        assert_eq!(CallbackUrl::from_query(query).as_str(), expected);
    }
}
