use crate::base::error::{CookieError, RESERVED_NAMES};

#[test]
fn test_empty_name_rejected() {
    assert_eq!(CookieError::check_name(""), Err(CookieError::InvalidName));
}

#[test]
fn test_reserved_names_any_case() {
    for reserved in RESERVED_NAMES {
        let upper = reserved.to_ascii_uppercase();
        let err = CookieError::check_name(&upper).unwrap_err();
        assert_eq!(err, CookieError::reserved_name(upper.clone()));
        assert!(err.is_name_error());
    }
    assert!(CookieError::check_name("SameSite").is_err());
    assert!(CookieError::check_name("Max-Age").is_err());
}

#[test]
fn test_near_miss_names_allowed() {
    // Only whole-token matches are reserved.
    assert!(CookieError::check_name("paths").is_ok());
    assert!(CookieError::check_name("my-domain").is_ok());
    assert!(CookieError::check_name("maxage").is_ok());
    assert!(CookieError::check_name("session").is_ok());
}

#[test]
fn test_error_messages() {
    let err = CookieError::reserved_name("Path");
    assert!(err.to_string().contains("\"Path\""));
    assert_eq!(CookieError::InvalidName.to_string(), "Cookie name is empty");

    let err = CookieError::serialization("prefs", "key must be a string");
    assert!(!err.is_name_error());
    assert!(err.to_string().contains("key must be a string"));
}
