use cookiekit::cookies::document::DocumentCookieStore;
use cookiekit::cookies::manager::CookieManager;
use cookiekit::cookies::policy::CookieConfig;
use cookiekit::cookies::registry::{CookieRegistry, COOKIE_KEY};
use std::sync::Arc;

struct Header {
    cookies: Arc<CookieManager>,
}

struct Settings {
    cookies: Arc<CookieManager>,
}

#[test]
fn test_components_share_policy_and_store() {
    let registry = CookieRegistry::new();
    registry.provide(CookieManager::with_config(
        DocumentCookieStore::new(),
        CookieConfig::new().expire("30d"),
    ));

    let header = Header {
        cookies: registry.cookie().unwrap(),
    };
    let settings = Settings {
        cookies: registry.inject(COOKIE_KEY).unwrap(),
    };

    settings.cookies.set("lang", "fr", None).unwrap();
    assert_eq!(header.cookies.get("lang").unwrap(), "fr");

    settings.cookies.configure(CookieConfig::new().path("/settings"));
    assert_eq!(header.cookies.policy().path, "/settings");
}

#[test]
fn test_manager_from_json_config() {
    let config = CookieConfig::from_json(r#"{"expire": "1y", "sameSite": "Strict"}"#).unwrap();
    let registry = CookieRegistry::new();
    let cookies = registry.provide(CookieManager::with_config(DocumentCookieStore::new(), config));

    cookies.set("consent", "yes", None).unwrap();
    assert!(registry.cookie().unwrap().is_available("consent"));
}
