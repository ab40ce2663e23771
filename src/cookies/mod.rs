//! Cookie codec, expiration policy and cookie string emulation.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`manager`] | [`CookieManager`](manager::CookieManager): `configure`, `get`, `set`, `remove`, `is_available`, `keys` |
//! | [`policy`] | Default policy and per-call overrides |
//! | [`expire`] | Duration shorthand and `max-age` / `expires` resolution |
//! | [`codec`] | Percent encoding, cookie string parsing, write composition |
//! | [`document`] | [`CookieStore`](document::CookieStore) and the in-memory `document.cookie` |
//! | [`canonical_cookie`] | A cookie held by the in-memory store |
//! | [`registry`] | One shared manager per host application |
//!
//! # Duration shorthand
//!
//! | Suffix | Seconds |
//! |--------|---------|
//! | `y` | 31104000 (12 × 30 days) |
//! | `m` | 2592000 (30 days) |
//! | `d` | 86400 |
//! | `h` | 3600 |
//! | `min` | 60 |
//! | `s` | 1 |
//!
//! ```rust
//! use cookiekit::cookies::manager::CookieManager;
//! use cookiekit::cookies::policy::SetOptions;
//!
//! let cookies = CookieManager::default();
//! cookies.set("session", "abc", Some(&SetOptions::new().expire("30min")))?;
//! assert!(cookies.is_available("session"));
//! assert!(cookies.remove("session", None).is_some());
//! assert!(!cookies.is_available("session"));
//! # Ok::<(), cookiekit::base::error::CookieError>(())
//! ```

pub mod canonical_cookie;
pub mod codec;
pub mod document;
pub mod expire;
pub mod manager;
pub mod policy;
pub mod registry;
