//! Ergonomic error context helpers.
//!
//! Provides an extension trait for adding context to `Result` types,
//! converting `serde_json` errors into context-rich `CookieError` variants.

use crate::base::error::CookieError;

/// Extension trait for adding cookie context to serde Results.
pub trait SerdeResultExt<T> {
    /// Attach the cookie name to a serialization failure.
    ///
    /// # Example
    /// ```ignore
    /// use cookiekit::base::context::SerdeResultExt;
    ///
    /// let text = serde_json::to_string(&prefs).cookie_context("prefs")?;
    /// // Error: "Cookie \"prefs\" could not be serialized: ..."
    /// ```
    fn cookie_context(self, name: &str) -> Result<T, CookieError>;
}

impl<T> SerdeResultExt<T> for Result<T, serde_json::Error> {
    fn cookie_context(self, name: &str) -> Result<T, CookieError> {
        self.map_err(|e| CookieError::serialization(name, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_context() {
        let result: Result<serde_json::Value, serde_json::Error> = serde_json::from_str("{oops");
        let err = result.cookie_context("prefs").unwrap_err();

        match err {
            CookieError::Serialization { name, message } => {
                assert_eq!(name, "prefs");
                assert!(!message.is_empty());
            }
            _ => panic!("Expected Serialization"),
        }
    }

    #[test]
    fn test_cookie_context_passes_ok() {
        let result: Result<u32, serde_json::Error> = serde_json::from_str("7");
        assert_eq!(result.cookie_context("n"), Ok(7));
    }
}
