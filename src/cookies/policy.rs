//! Default cookie policy and per-call overrides.
//!
//! A [`CookiePolicy`] is what a [`CookieManager`](crate::cookies::manager::CookieManager)
//! falls back to when a write does not say otherwise. It is built from a
//! [`CookieConfig`], in which every field is optional: fields left out take
//! the hardcoded default, never a previously configured value.
//!
//! ```rust
//! use cookiekit::cookies::policy::{CookieConfig, CookiePolicy, SameSite};
//!
//! let config = CookieConfig::from_json(r#"{"expire": "7d", "sameSite": "Strict"}"#)?;
//! let policy = CookiePolicy::from(config);
//! assert_eq!(policy.path, "/");
//! assert_eq!(policy.same_site, SameSite::Strict);
//! # Ok::<(), serde_json::Error>(())
//! ```

use crate::cookies::expire::{Expire, ExpiryDirective};
use serde::de::{self, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PATH: &str = "/";

/// The `SameSite` attribute of a cookie write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    /// Attribute is left out of the write.
    Unspecified,
    /// `SameSite=None`
    NoRestriction,
    #[default]
    Lax,
    Strict,
}

impl SameSite {
    /// Attribute value, or `None` when the attribute is omitted.
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            SameSite::Unspecified => None,
            SameSite::NoRestriction => Some("None"),
            SameSite::Lax => Some("Lax"),
            SameSite::Strict => Some("Strict"),
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute().unwrap_or(""))
    }
}

impl FromStr for SameSite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" => Ok(SameSite::Unspecified),
            "none" => Ok(SameSite::NoRestriction),
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            _ => Err(format!("unknown SameSite value {:?}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for SameSite {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Policy fields, all optional.
///
/// Used both to configure a manager and as per-call options for a single
/// write. Empty `path` and `domain` strings count as absent. When
/// configuring a manager, a session `expire` and `SameSite::Unspecified`
/// also count as absent and fall back to `"1d"` and `Lax`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieConfig {
    pub expire: Option<Expire>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: Option<bool>,
    pub same_site: Option<SameSite>,
}

impl CookieConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from JSON with camelCase keys (`expire`, `path`, `domain`,
    /// `secure`, `sameSite`).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn expire(mut self, expire: impl Into<Expire>) -> Self {
        self.expire = Some(expire.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }
}

/// Per-call overrides for [`CookieManager::set`](crate::cookies::manager::CookieManager::set).
pub type SetOptions = CookieConfig;

/// Per-call overrides for [`CookieManager::remove`](crate::cookies::manager::CookieManager::remove).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    pub path: Option<String>,
    pub domain: Option<String>,
}

impl RemoveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// Resolved default policy of a manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePolicy {
    pub expire: Expire,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            expire: Expire::default(),
            path: DEFAULT_PATH.to_string(),
            domain: None,
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

impl From<CookieConfig> for CookiePolicy {
    fn from(config: CookieConfig) -> Self {
        let defaults = CookiePolicy::default();
        Self {
            expire: config
                .expire
                .filter(|e| !e.is_session())
                .unwrap_or(defaults.expire),
            path: non_empty(config.path).unwrap_or(defaults.path),
            domain: non_empty(config.domain),
            secure: config.secure.unwrap_or(defaults.secure),
            same_site: config
                .same_site
                .filter(|s| *s != SameSite::Unspecified)
                .unwrap_or(defaults.same_site),
        }
    }
}

impl CookiePolicy {
    /// Merge per-call options over this policy for one write.
    pub fn attributes_for(&self, options: Option<&SetOptions>) -> CookieAttributes {
        let options = options.cloned().unwrap_or_default();
        let expire = options.expire.as_ref().unwrap_or(&self.expire);
        CookieAttributes {
            expiry: expire.directive(),
            domain: non_empty(options.domain).or_else(|| self.domain.clone()),
            path: non_empty(options.path).unwrap_or_else(|| self.path.clone()),
            secure: options.secure.unwrap_or(self.secure),
            same_site: options.same_site.unwrap_or(self.same_site),
        }
    }

    /// Scope of a removal: per-call path and domain, else the policy's.
    pub fn scope_for(&self, options: Option<&RemoveOptions>) -> (Option<String>, String) {
        let options = options.cloned().unwrap_or_default();
        (
            non_empty(options.domain).or_else(|| self.domain.clone()),
            non_empty(options.path).unwrap_or_else(|| self.path.clone()),
        )
    }
}

/// Attributes of a single cookie write, after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    pub expiry: ExpiryDirective,
    pub domain: Option<String>,
    pub path: String,
    pub secure: bool,
    pub same_site: SameSite,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
