use crate::base::error::CookieError;
use crate::cookies::codec::{self, CookieValue};
use crate::cookies::document::{CookieStore, DocumentCookieStore};
use crate::cookies::policy::{CookieConfig, CookiePolicy, RemoveOptions, SetOptions};
use parking_lot::RwLock;

#[cfg(feature = "json")]
use crate::base::context::SerdeResultExt;

/// Reads, writes and enumerates cookies on a [`CookieStore`].
///
/// Holds the default policy applied to writes that leave an attribute out.
/// All operations take `&self`, so one manager can be shared behind an
/// `Arc` (see [`CookieRegistry`](crate::cookies::registry::CookieRegistry)).
///
/// # Example
/// ```rust
/// use cookiekit::cookies::manager::CookieManager;
/// use cookiekit::cookies::document::DocumentCookieStore;
/// use cookiekit::cookies::policy::SetOptions;
///
/// let cookies = CookieManager::new(DocumentCookieStore::new());
/// cookies
///     .set("theme", "dark", None)?
///     .set("lang", "en", Some(&SetOptions::new().expire("1y")))?;
///
/// assert_eq!(cookies.get("theme").unwrap(), "dark");
/// assert_eq!(cookies.keys(), vec!["theme", "lang"]);
/// # Ok::<(), cookiekit::base::error::CookieError>(())
/// ```
pub struct CookieManager<S: CookieStore = DocumentCookieStore> {
    store: S,
    policy: RwLock<CookiePolicy>,
}

impl Default for CookieManager<DocumentCookieStore> {
    fn default() -> Self {
        Self::new(DocumentCookieStore::new())
    }
}

impl<S: CookieStore> CookieManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, CookieConfig::default())
    }

    pub fn with_config(store: S, config: CookieConfig) -> Self {
        Self {
            store,
            policy: RwLock::new(CookiePolicy::from(config)),
        }
    }

    /// Replace the default policy.
    ///
    /// Fields missing from `config` go back to their hardcoded defaults,
    /// not to whatever was configured before.
    pub fn configure(&self, config: CookieConfig) {
        let policy = CookiePolicy::from(config);
        tracing::debug!(?policy, "cookie policy replaced");
        *self.policy.write() = policy;
    }

    /// Snapshot of the current default policy.
    pub fn policy(&self) -> CookiePolicy {
        self.policy.read().clone()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Value of the first cookie named `name`.
    ///
    /// Values wrapped in `{}` are parsed as JSON; if that fails the raw
    /// text is returned. An empty value reads as absent.
    pub fn get(&self, name: &str) -> Option<CookieValue> {
        let value = codec::lookup(&self.store.read(), name)?;
        if value.is_empty() {
            return None;
        }

        if codec::looks_like_json_object(&value) {
            match serde_json::from_str(&value) {
                Ok(json) => return Some(CookieValue::Json(json)),
                Err(e) => {
                    tracing::debug!(name = %name, error = %e, "cookie value is not JSON, returning text");
                }
            }
        }

        Some(CookieValue::Text(value))
    }

    /// Write a cookie. Attributes missing from `options` come from the
    /// default policy.
    ///
    /// Fails without writing if `name` is empty or is a directive keyword.
    pub fn set(
        &self,
        name: &str,
        value: impl Into<CookieValue>,
        options: Option<&SetOptions>,
    ) -> Result<&Self, CookieError> {
        CookieError::check_name(name)?;

        let value = value.into();
        let attrs = self.policy.read().attributes_for(options);
        let directive = codec::set_directive(name, &value, &attrs);

        tracing::debug!(name = %name, directive = %directive, "writing cookie");
        self.store.write(&directive);
        Ok(self)
    }

    /// Expire a cookie. Returns `None`, writing nothing, when `name` is
    /// empty or not currently set.
    pub fn remove(&self, name: &str, options: Option<&RemoveOptions>) -> Option<&Self> {
        if name.is_empty() || !self.is_available(name) {
            return None;
        }

        let (domain, path) = self.policy.read().scope_for(options);
        let directive = codec::remove_directive(name, domain.as_deref(), &path);

        tracing::debug!(name = %name, directive = %directive, "removing cookie");
        self.store.write(&directive);
        Some(self)
    }

    /// Whether a cookie named `name` is currently visible.
    pub fn is_available(&self, name: &str) -> bool {
        !name.is_empty() && codec::lookup(&self.store.read(), name).is_some()
    }

    /// Names of all visible cookies, in store order.
    pub fn keys(&self) -> Vec<String> {
        codec::names(&self.store.read())
    }

    /// Serialize `value` to JSON and write it.
    #[cfg(feature = "json")]
    pub fn set_serialized<T: serde::Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
        options: Option<&SetOptions>,
    ) -> Result<&Self, CookieError> {
        CookieError::check_name(name)?;
        let json = serde_json::to_value(value).cookie_context(name)?;
        self.set(name, json, options)
    }

    /// Read a cookie written by [`set_serialized`](Self::set_serialized).
    #[cfg(feature = "json")]
    pub fn get_deserialized<T: serde::de::DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<T>, CookieError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };

        let parsed: Result<T, serde_json::Error> = match value {
            CookieValue::Json(json) => serde_json::from_value(json),
            CookieValue::Text(text) => match serde_json::from_str(&text) {
                Ok(v) => Ok(v),
                // Bare strings are stored without quotes
                Err(_) => serde_json::from_value(serde_json::Value::String(text)),
            },
        };
        parsed.cookie_context(name).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::expire::Expire;
    use crate::cookies::policy::SameSite;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every write and reads back a fixed string.
    #[derive(Default)]
    struct RecordingStore {
        contents: String,
        writes: Mutex<Vec<String>>,
    }

    impl RecordingStore {
        fn with_contents(contents: &str) -> Self {
            Self {
                contents: contents.to_string(),
                writes: Mutex::new(Vec::new()),
            }
        }

        fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl CookieStore for RecordingStore {
        fn read(&self) -> String {
            self.contents.clone()
        }

        fn write(&self, directive: &str) {
            self.writes.lock().unwrap().push(directive.to_string());
        }
    }

    #[test]
    fn test_set_default_directive() {
        let manager = CookieManager::new(RecordingStore::default());
        manager.set("a", "1", None).unwrap();
        assert_eq!(
            manager.store().writes(),
            vec!["a=1; max-age=86400; path=/; SameSite=Lax"]
        );
    }

    #[test]
    fn test_set_rejects_bad_names_without_writing() {
        let manager = CookieManager::new(RecordingStore::default());
        assert_eq!(manager.set("", "x", None).err(), Some(CookieError::InvalidName));
        assert!(matches!(
            manager.set("Path", "x", None),
            Err(CookieError::ReservedName { .. })
        ));
        assert!(manager.store().writes().is_empty());
    }

    #[test]
    fn test_set_expire_variants() {
        let manager = CookieManager::new(RecordingStore::default());
        manager
            .set("k", "v", Some(&SetOptions::new().expire("2d")))
            .unwrap()
            .set("k", "v", Some(&SetOptions::new().expire(0)))
            .unwrap()
            .set("k", "v", Some(&SetOptions::new().expire(-1)))
            .unwrap()
            .set("k", "v", Some(&SetOptions::new().expire("tomorrow")))
            .unwrap();

        assert_eq!(
            manager.store().writes(),
            vec![
                "k=v; max-age=172800; path=/; SameSite=Lax",
                "k=v; path=/; SameSite=Lax",
                "k=v; expires=Fri, 31 Dec 9999 23:59:59 GMT; path=/; SameSite=Lax",
                "k=v; expires=tomorrow; path=/; SameSite=Lax",
            ]
        );
    }

    #[test]
    fn test_configure_replaces_wholesale() {
        let manager = CookieManager::new(RecordingStore::default());
        manager.configure(
            CookieConfig::new()
                .path("/app")
                .domain("example.com")
                .secure(true)
                .same_site(SameSite::Strict)
                .expire("2h"),
        );
        manager.set("k", "v", None).unwrap();

        manager.configure(CookieConfig::new().secure(true));
        manager.set("k", "v", None).unwrap();

        assert_eq!(
            manager.store().writes(),
            vec![
                "k=v; max-age=7200; domain=example.com; path=/app; Secure; SameSite=Strict",
                "k=v; max-age=86400; path=/; Secure; SameSite=Lax",
            ]
        );
    }

    #[test]
    fn test_configure_falsy_values_fall_back() {
        let manager = CookieManager::new(RecordingStore::default());
        manager.configure(CookieConfig::from_json(r#"{"expire": 0, "sameSite": ""}"#).unwrap());
        manager.set("k", "v", None).unwrap();

        assert_eq!(manager.policy(), CookiePolicy::default());
        assert_eq!(
            manager.store().writes(),
            vec!["k=v; max-age=86400; path=/; SameSite=Lax"]
        );
    }

    #[test]
    fn test_options_do_not_touch_policy() {
        let manager = CookieManager::new(RecordingStore::default());
        let before = manager.policy();
        manager
            .set("k", "v", Some(&SetOptions::new().path("/x").secure(true)))
            .unwrap();
        assert_eq!(manager.policy(), before);
    }

    #[test]
    fn test_get_parses_json_objects() {
        let store = RecordingStore::with_contents(
            "obj=%7B%22a%22%3A1%7D; bad=%7Bnope%7D; list=%5B1%5D; empty=",
        );
        let manager = CookieManager::new(store);

        assert_eq!(manager.get("obj").unwrap(), json!({"a": 1}));
        assert_eq!(manager.get("bad").unwrap(), "{nope}");
        assert_eq!(manager.get("list").unwrap(), "[1]");
        assert_eq!(manager.get("empty"), None);
        assert_eq!(manager.get("missing"), None);
    }

    #[test]
    fn test_is_available_counts_empty_values() {
        let manager = CookieManager::new(RecordingStore::with_contents("empty=; a%20b=1"));
        assert!(manager.is_available("empty"));
        assert!(manager.is_available("a b"));
        assert!(!manager.is_available("a%20b"));
        assert!(!manager.is_available(""));
    }

    #[test]
    fn test_remove_writes_epoch_directive() {
        let manager = CookieManager::with_config(
            RecordingStore::with_contents("a=1"),
            CookieConfig::new().domain("example.com"),
        );
        assert!(manager.remove("a", Some(&RemoveOptions::new().path("/app"))).is_some());
        assert!(manager.remove("missing", None).is_none());
        assert!(manager.remove("", None).is_none());

        assert_eq!(
            manager.store().writes(),
            vec!["a=; expires=Thu, 01 Jan 1970 00:00:00 GMT; domain=example.com; path=/app; SameSite=Lax"]
        );
    }

    #[test]
    fn test_set_json_value() {
        let manager = CookieManager::new(RecordingStore::default());
        manager
            .set("prefs", json!({"dark": true}), Some(&SetOptions::new().expire(Expire::Session)))
            .unwrap();
        assert_eq!(
            manager.store().writes(),
            vec!["prefs=%7B%22dark%22%3Atrue%7D; path=/; SameSite=Lax"]
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_serialized_helpers() {
        #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
        struct Prefs {
            dark: bool,
            size: u32,
        }

        let manager = CookieManager::default();
        let prefs = Prefs { dark: true, size: 14 };
        manager.set_serialized("prefs", &prefs, None).unwrap();
        manager.set_serialized("count", &7_u32, None).unwrap();
        manager.set_serialized("who", "ada", None).unwrap();

        assert_eq!(manager.get_deserialized::<Prefs>("prefs").unwrap(), Some(prefs));
        assert_eq!(manager.get_deserialized::<u32>("count").unwrap(), Some(7));
        assert_eq!(manager.get_deserialized::<String>("who").unwrap(), Some("ada".to_string()));
        assert_eq!(manager.get_deserialized::<u32>("missing").unwrap(), None);

        let err = manager.get_deserialized::<u32>("who").unwrap_err();
        assert!(matches!(err, CookieError::Serialization { .. }));
        assert_eq!(
            manager.set_serialized("secure", &1, None).err(),
            Some(CookieError::reserved_name("secure"))
        );
    }
}
