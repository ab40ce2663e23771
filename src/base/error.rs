use thiserror::Error;

/// Directive tokens a cookie name must never collide with.
///
/// Compared case-insensitively: `Path`, `MAX-AGE` and `SameSite` are all
/// rejected.
pub const RESERVED_NAMES: [&str; 6] = ["expires", "max-age", "path", "domain", "secure", "samesite"];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CookieError {
    #[error("Cookie name is empty")]
    InvalidName,
    #[error(
        "Cookie name cannot be one of [\"expires\", \"max-age\", \"path\", \"domain\", \"secure\", \"samesite\"], got {name:?}"
    )]
    ReservedName { name: String },
    #[error("Cookie {name:?} could not be serialized: {message}")]
    Serialization { name: String, message: String },
}

impl CookieError {
    pub fn reserved_name(name: impl Into<String>) -> Self {
        CookieError::ReservedName { name: name.into() }
    }

    pub fn serialization(name: impl Into<String>, message: impl Into<String>) -> Self {
        CookieError::Serialization {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Check a name before anything is written to the store.
    pub fn check_name(name: &str) -> Result<(), CookieError> {
        if name.is_empty() {
            return Err(CookieError::InvalidName);
        }
        if RESERVED_NAMES
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(name))
        {
            return Err(CookieError::reserved_name(name));
        }
        Ok(())
    }

    /// True for errors raised by name validation.
    pub fn is_name_error(&self) -> bool {
        matches!(
            self,
            CookieError::InvalidName | CookieError::ReservedName { .. }
        )
    }
}
