use crate::utils::{is_empty_or_whitespace, is_too_long};
use regex::Regex;
use std::sync::LazyLock;

static USERNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.~-]*$").expect("Username pattern is a valid regular expression.")
});

/// Login name of an admin account.
#[derive(Debug)]
pub struct Username(String);

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Username {
    pub fn parse(s: String) -> Result<Username, String> {
        let contains_forbidden_characters = !USERNAME_PATTERN.is_match(&s);

        if is_empty_or_whitespace(&s) || is_too_long(&s, 70) || contains_forbidden_characters {
            Err(format!("{} is not a valid username.", s))
        } else {
            Ok(Self(s))
        }
    }
}
