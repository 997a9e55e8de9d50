use crate::utils::{is_empty_or_whitespace, is_too_long};

#[derive(Debug, Clone)]
pub struct SubscriberName(String);

impl AsRef<str> for SubscriberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SubscriberName {
    pub const MAX_LENGTH: usize = 255;

    pub fn parse(s: String) -> Result<SubscriberName, String> {
        if is_empty_or_whitespace(&s) {
            Err("The name field is required.".to_string())
        } else if is_too_long(&s, Self::MAX_LENGTH) {
            Err(format!(
                "The name field must not be greater than {} characters.",
                Self::MAX_LENGTH
            ))
        } else {
            Ok(Self(s))
        }
    }
}
