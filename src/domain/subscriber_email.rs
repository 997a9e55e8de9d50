use crate::utils::{is_empty_or_whitespace, is_too_long};
use validator::ValidateEmail;

#[derive(Debug, Clone)]
pub struct SubscriberEmail(String);

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl SubscriberEmail {
    pub const MAX_LENGTH: usize = 255;

    pub fn parse(s: String) -> Result<SubscriberEmail, String> {
        if is_empty_or_whitespace(&s) {
            Err("The email field is required.".to_string())
        } else if is_too_long(&s, Self::MAX_LENGTH) {
            Err(format!(
                "The email field must not be greater than {} characters.",
                Self::MAX_LENGTH
            ))
        } else if !s.validate_email() {
            Err("The email field must be a valid email address.".to_string())
        } else {
            Ok(Self(s))
        }
    }
}
