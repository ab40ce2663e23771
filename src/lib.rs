//! # cookiekit
//!
//! Read, write and enumerate cookies through a flat `document.cookie`-style
//! string.
//!
//! ## Features
//!
//! - **Codec**: `encodeURIComponent`-compatible percent encoding, so names
//!   and values never break the `name=value; name=value` layout
//! - **Expiration policy**: seconds, `"2d"`-style shorthand, absolute
//!   dates, session and never-expiring cookies
//! - **Default policy**: expire, path, domain, Secure and SameSite applied
//!   to every write that leaves them out
//! - **JSON values**: objects are stored as JSON text and parsed back on read
//! - **In-memory store**: browser-like cookie string for use off-browser
//!   and in tests
//!
//! ## Quick Start
//!
//! ```rust
//! use cookiekit::cookies::document::DocumentCookieStore;
//! use cookiekit::cookies::manager::CookieManager;
//! use cookiekit::cookies::policy::CookieConfig;
//! use serde_json::json;
//!
//! let cookies = CookieManager::with_config(
//!     DocumentCookieStore::new(),
//!     CookieConfig::new().expire("7d").path("/"),
//! );
//!
//! cookies.set("user", json!({"id": 42, "name": "ada"}), None)?;
//! assert_eq!(cookies.get("user").unwrap(), json!({"id": 42, "name": "ada"}));
//! # Ok::<(), cookiekit::base::error::CookieError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types and error context helpers
//! - [`cookies`] - Cookie manager, policy, codec and stores

pub mod base;
pub mod cookies;
