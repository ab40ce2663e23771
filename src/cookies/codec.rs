//! Cookie string codec.
//!
//! Names and values are percent-encoded with the `encodeURIComponent`
//! character set, so a written pair never contains a raw `;` or `=`.
//! Everything else in the cookie string is treated as opaque text.

use crate::cookies::expire::EPOCH_EXPIRES;
use crate::cookies::policy::CookieAttributes;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;
use std::fmt;

/// Characters left alone by `encodeURIComponent`: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Percent-decode. Malformed UTF-8 sequences leave the input unchanged.
pub fn decode_component(input: &str) -> String {
    match percent_decode_str(input).decode_utf8() {
        Ok(Cow::Borrowed(decoded)) => decoded.to_string(),
        Ok(Cow::Owned(decoded)) => decoded,
        Err(_) => input.to_string(),
    }
}

/// Raw `(name, value)` pairs of a cookie string, in order.
///
/// Segments without `=` are skipped.
pub fn entries(cookie_string: &str) -> impl Iterator<Item = (&str, &str)> {
    cookie_string
        .split(';')
        .filter_map(|segment| segment.split_once('='))
        .map(|(name, value)| (name.trim(), value.trim()))
}

/// Decoded value of the first entry whose decoded name is `name`.
pub fn lookup(cookie_string: &str, name: &str) -> Option<String> {
    entries(cookie_string)
        .find(|(raw_name, _)| decode_component(raw_name) == name)
        .map(|(_, raw_value)| decode_component(raw_value))
}

/// Decoded names of a cookie string, in order.
pub fn names(cookie_string: &str) -> Vec<String> {
    entries(cookie_string)
        .map(|(raw_name, _)| decode_component(raw_name))
        .collect()
}

/// A value looks like a JSON object when it is wrapped in braces.
pub fn looks_like_json_object(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('{') && value.ends_with('}')
}

/// A cookie value.
#[derive(Debug, Clone, PartialEq)]
pub enum CookieValue {
    Text(String),
    /// Stored as its JSON text.
    Json(serde_json::Value),
}

impl CookieValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CookieValue::Text(text) => Some(text),
            CookieValue::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            CookieValue::Json(value) => Some(value),
            CookieValue::Text(_) => None,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            CookieValue::Text(text) => text,
            other => other.to_string(),
        }
    }
}

/// The text stored for the value. JSON strings are stored bare.
impl fmt::Display for CookieValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookieValue::Text(text) | CookieValue::Json(serde_json::Value::String(text)) => {
                f.write_str(text)
            }
            CookieValue::Json(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for CookieValue {
    fn from(text: &str) -> Self {
        CookieValue::Text(text.to_string())
    }
}

impl From<String> for CookieValue {
    fn from(text: String) -> Self {
        CookieValue::Text(text)
    }
}

impl From<&String> for CookieValue {
    fn from(text: &String) -> Self {
        CookieValue::Text(text.clone())
    }
}

impl From<serde_json::Value> for CookieValue {
    fn from(value: serde_json::Value) -> Self {
        CookieValue::Json(value)
    }
}

impl PartialEq<&str> for CookieValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<serde_json::Value> for CookieValue {
    fn eq(&self, other: &serde_json::Value) -> bool {
        self.as_json() == Some(other)
    }
}

/// Compose the write for `name=value` with its attributes.
///
/// Attribute order: expiry, domain, path, Secure, SameSite.
pub fn set_directive(name: &str, value: &CookieValue, attrs: &CookieAttributes) -> String {
    let mut directive = format!(
        "{}={}{}",
        encode_component(name),
        encode_component(&value.to_string()),
        attrs.expiry
    );
    if let Some(domain) = &attrs.domain {
        directive.push_str("; domain=");
        directive.push_str(domain);
    }
    directive.push_str("; path=");
    directive.push_str(&attrs.path);
    if attrs.secure {
        directive.push_str("; Secure");
    }
    if let Some(same_site) = attrs.same_site.attribute() {
        directive.push_str("; SameSite=");
        directive.push_str(same_site);
    }
    directive
}

/// Compose the write that evicts `name` from the given scope.
pub fn remove_directive(name: &str, domain: Option<&str>, path: &str) -> String {
    let mut directive = format!("{}=; expires={}", encode_component(name), EPOCH_EXPIRES);
    if let Some(domain) = domain {
        directive.push_str("; domain=");
        directive.push_str(domain);
    }
    directive.push_str("; path=");
    directive.push_str(path);
    directive.push_str("; SameSite=Lax");
    directive
}
