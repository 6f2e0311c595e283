/// Error codes understood by [`map_auth_code_to_message`].
pub mod auth_code {
    pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
    pub const MISSING_PASSWORD: &str = "auth/missing-password";
    pub const OPERATION_NOT_ALLOWED: &str = "auth/operation-not-allowed";
    pub const TOO_MANY_REQUESTS: &str = "auth/too-many-requests";
    pub const NETWORK_REQUEST_FAILED: &str = "auth/network-request-failed";
    pub const INVALID_API_KEY: &str = "auth/invalid-api-key";
    pub const INTERNAL_ERROR: &str = "auth/internal-error";
    pub const PROFILE_ALREADY_EXISTS: &str = "profile/already-exists";
}

pub const FALLBACK_MESSAGE: &str = "Something went wrong, please try again";

pub fn map_auth_code_to_message(code: &str) -> String {
    let message = match code {
        auth_code::EMAIL_ALREADY_IN_USE => "Email already in use",
        auth_code::INVALID_EMAIL => "Email provided is invalid",
        auth_code::WEAK_PASSWORD => "Password should be at least 6 characters",
        auth_code::MISSING_PASSWORD => "Password is required",
        auth_code::OPERATION_NOT_ALLOWED => "Email/password signup is currently disabled",
        auth_code::TOO_MANY_REQUESTS => "Too many attempts, please try again later",
        auth_code::NETWORK_REQUEST_FAILED => "Network error, check your connection and try again",
        auth_code::PROFILE_ALREADY_EXISTS => "Username or email is already registered",
        _ => FALLBACK_MESSAGE,
    };
    message.to_string()
}
