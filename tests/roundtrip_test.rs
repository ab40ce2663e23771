use cookiekit::base::error::CookieError;
use cookiekit::cookies::codec::looks_like_json_object;
use cookiekit::cookies::document::DocumentCookieStore;
use cookiekit::cookies::manager::CookieManager;
use proptest::prelude::*;
use std::collections::HashMap;

fn cookie_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ;=%,_.é-]{1,16}".prop_filter("reserved or prefixed name", |name| {
        CookieError::check_name(name).is_ok()
            && !name.starts_with("__Host-")
            && !name.starts_with("__Secure-")
    })
}

fn cookie_value() -> impl Strategy<Value = String> {
    "\\PC{1,32}".prop_filter("JSON-shaped value", |value| !looks_like_json_object(value))
}

proptest! {
    #[test]
    fn prop_set_then_get_round_trips(name in cookie_name(), value in cookie_value()) {
        let cookies = CookieManager::new(DocumentCookieStore::new());
        cookies.set(&name, value.as_str(), None).unwrap();

        prop_assert!(cookies.is_available(&name));
        prop_assert_eq!(cookies.get(&name).unwrap().into_text(), value);
        prop_assert_eq!(cookies.keys(), vec![name]);
    }

    #[test]
    fn prop_keys_have_no_duplicates(
        pairs in prop::collection::vec((cookie_name(), cookie_value()), 1..12)
    ) {
        let cookies = CookieManager::new(DocumentCookieStore::new());
        let mut expected = HashMap::new();
        let mut order = Vec::new();
        for (name, value) in &pairs {
            cookies.set(name, value.as_str(), None).unwrap();
            if expected.insert(name.clone(), value.clone()).is_none() {
                order.push(name.clone());
            }
        }

        // First write fixes the position, later writes only change the value
        prop_assert_eq!(cookies.keys(), order);
        for (name, value) in &expected {
            prop_assert_eq!(&cookies.get(name).unwrap().into_text(), value);
        }
    }
}
