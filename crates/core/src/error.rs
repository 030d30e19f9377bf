//! Errors raised while building cookie options from strings.

use thiserror::Error;

/// Errors that can occur when turning attribute strings into [`CookieOptions`].
///
/// Store operations never return these: unknown names degrade to `None` or a
/// no-op, and typed options are passed through uninspected.
///
/// [`CookieOptions`]: crate::CookieOptions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CookieError {
    #[error("Unknown cookie attribute: {0}")]
    UnknownAttribute(String),

    #[error("Invalid SameSite value: {0} (expected strict, lax or none)")]
    InvalidSameSite(String),

    #[error("Invalid Max-Age value: {0}")]
    InvalidMaxAge(String),

    #[error("Invalid Expires value: {0}")]
    InvalidExpires(String),

    #[error("Invalid value for flag {name}: {value}")]
    InvalidFlag { name: String, value: String },
}

pub type Result<T> = std::result::Result<T, CookieError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_attribute_display() {
        let error = CookieError::UnknownAttribute("colour".to_string());
        assert_eq!(error.to_string(), "Unknown cookie attribute: colour");
    }

    #[test]
    fn test_invalid_flag_display() {
        let error = CookieError::InvalidFlag {
            name: "secure".to_string(),
            value: "maybe".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid value for flag secure: maybe");
    }
}
