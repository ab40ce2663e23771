//! The flat cookie string a [`CookieManager`](crate::cookies::manager::CookieManager)
//! reads and writes.
//!
//! [`CookieStore`] is the seam to the embedding runtime: in a browser it is
//! `document.cookie`. [`DocumentCookieStore`] emulates that string in memory,
//! applying writes the way a browser does (scoping by domain and path,
//! eviction by `max-age`/`expires`, overwrite in place).

use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::policy::SameSite;
use parking_lot::Mutex;
use std::sync::Arc;
use time::{OffsetDateTime, PrimitiveDateTime};
use url::Url;

/// A `document.cookie`-style string.
pub trait CookieStore {
    /// All visible cookies as `name=value` pairs joined by `; `.
    fn read(&self) -> String;

    /// Apply one `name=value[; attribute]*` write.
    fn write(&self, directive: &str);
}

impl<T: CookieStore + ?Sized> CookieStore for Arc<T> {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&self, directive: &str) {
        (**self).write(directive)
    }
}

impl<T: CookieStore + ?Sized> CookieStore for &T {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&self, directive: &str) {
        (**self).write(directive)
    }
}

#[derive(Default)]
struct Jar {
    cookies: Vec<CanonicalCookie>,
    next_index: u64,
}

/// In-memory cookie string.
#[derive(Default)]
pub struct DocumentCookieStore {
    url: Option<Url>,
    jar: Mutex<Jar>,
}

impl DocumentCookieStore {
    /// A store with no document URL: every cookie is visible and any
    /// domain is accepted.
    ///
    /// Writes are still checked against the `__Secure-` and `__Host-` name
    /// prefix rules; a `__Host-id` write without `Secure` is dropped.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store for the document at `url`.
    pub fn for_url(url: Url) -> Self {
        Self {
            url: Some(url),
            jar: Mutex::new(Jar::default()),
        }
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Number of cookies held, including ones not visible to the document.
    pub fn len(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        self.jar
            .lock()
            .cookies
            .iter()
            .filter(|c| !c.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.jar.lock().cookies.clear();
    }

    /// Snapshot of all unexpired cookies in write order.
    pub fn cookies(&self) -> Vec<CanonicalCookie> {
        let now = OffsetDateTime::now_utc();
        let mut jar = self.jar.lock();
        jar.cookies.retain(|c| !c.is_expired(now));
        jar.cookies.clone()
    }

    fn host(&self) -> &str {
        self.url
            .as_ref()
            .and_then(|u| u.host_str())
            .unwrap_or("")
    }

    fn is_secure_origin(&self) -> bool {
        self.url.as_ref().map_or(true, |u| u.scheme() == "https")
    }

    fn is_visible(&self, cookie: &CanonicalCookie) -> bool {
        let Some(url) = &self.url else {
            return true;
        };
        domain_matches(&cookie.domain, self.host(), cookie.host_only)
            && path_matches(&cookie.path, url.path())
            && (!cookie.secure || url.scheme() == "https")
    }

    /// Parse a write into a cookie, or `None` if a browser would drop it.
    fn parse_directive(&self, directive: &str, now: OffsetDateTime) -> Option<Parsed> {
        let parsed = match cookie::Cookie::parse(directive) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unparseable cookie write");
                return None;
            }
        };

        let host = self.host().to_lowercase();
        let (domain, host_only) = match parsed.domain() {
            Some(d) => {
                let d = d.trim_start_matches('.').to_lowercase();
                if self.url.is_some() && !domain_matches(&d, &host, false) {
                    tracing::debug!(domain = %d, host = %host, "cookie domain does not match document");
                    return None;
                }
                (d, false)
            }
            None => (host, true),
        };

        let path = match parsed.path() {
            Some(p) if p.starts_with('/') => p.to_string(),
            _ => self.default_path(),
        };

        let secure = parsed.secure().unwrap_or(false);
        if secure && !self.is_secure_origin() {
            tracing::debug!(name = %parsed.name(), "Secure cookie written from an insecure document");
            return None;
        }

        // Max-Age wins over Expires
        let expiry = match (parsed.max_age(), parsed.expires_datetime()) {
            (Some(max_age), _) if max_age <= time::Duration::ZERO => Expiry::Evict,
            (Some(max_age), _) => Expiry::At(
                now.checked_add(max_age)
                    .unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc()),
            ),
            (None, Some(at)) if at <= now => Expiry::Evict,
            (None, Some(at)) => Expiry::At(at),
            (None, None) => Expiry::Session,
        };

        let same_site = match parsed.same_site() {
            Some(cookie::SameSite::Lax) => SameSite::Lax,
            Some(cookie::SameSite::Strict) => SameSite::Strict,
            Some(cookie::SameSite::None) => SameSite::NoRestriction,
            None => SameSite::Unspecified,
        };

        let mut c = CanonicalCookie::new(
            parsed.name().to_string(),
            parsed.value().to_string(),
            domain,
            path,
        );
        c.secure = secure;
        c.host_only = host_only;
        c.same_site = same_site;
        c.expiration_time = match expiry {
            Expiry::At(at) => Some(at),
            _ => None,
        };

        if !c.has_valid_prefix(self.is_secure_origin()) {
            tracing::debug!(name = %c.name, "cookie prefix requirements not met");
            return None;
        }

        Some(Parsed {
            cookie: c,
            evict: matches!(expiry, Expiry::Evict),
        })
    }

    /// RFC 6265 default-path of the document URL.
    fn default_path(&self) -> String {
        let path = self.url.as_ref().map_or("/", |u| u.path());
        match path.rfind('/') {
            Some(0) | None => "/".to_string(),
            Some(idx) => path[..idx].to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Expiry {
    Session,
    At(OffsetDateTime),
    Evict,
}

struct Parsed {
    cookie: CanonicalCookie,
    evict: bool,
}

impl CookieStore for DocumentCookieStore {
    fn read(&self) -> String {
        let now = OffsetDateTime::now_utc();
        let mut jar = self.jar.lock();
        jar.cookies.retain(|c| !c.is_expired(now));

        let mut visible: Vec<&CanonicalCookie> =
            jar.cookies.iter().filter(|c| self.is_visible(c)).collect();

        // Longest path first, then write order
        visible.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_index.cmp(&b.creation_index))
        });

        visible
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, directive: &str) {
        let now = OffsetDateTime::now_utc();
        let Some(Parsed { mut cookie, evict }) = self.parse_directive(directive, now) else {
            return;
        };

        let mut jar = self.jar.lock();
        let existing = jar.cookies.iter().position(|c| c.is_same_key(&cookie));

        match (existing, evict) {
            (Some(idx), true) => {
                jar.cookies.remove(idx);
            }
            (None, true) => {}
            (Some(idx), false) => {
                cookie.creation_index = jar.cookies[idx].creation_index;
                jar.cookies[idx] = cookie;
            }
            (None, false) => {
                cookie.creation_index = jar.next_index;
                jar.next_index += 1;
                jar.cookies.push(cookie);
            }
        }
    }
}

/// Check if cookie domain matches request host.
/// Implements RFC 6265 domain matching.
fn domain_matches(cookie_domain: &str, request_host: &str, host_only: bool) -> bool {
    if host_only {
        // Host-only cookie: exact match required
        return cookie_domain.eq_ignore_ascii_case(request_host);
    }

    // Domain cookie: suffix match
    let cookie_domain = cookie_domain.trim_start_matches('.');

    if request_host.eq_ignore_ascii_case(cookie_domain) {
        return true;
    }

    // Check if request_host ends with .cookie_domain
    if request_host.len() > cookie_domain.len() {
        let split = request_host.len() - cookie_domain.len();
        if let (Some(suffix), Some(before)) =
            (request_host.get(split..), request_host.get(..split))
        {
            return suffix.eq_ignore_ascii_case(cookie_domain) && before.ends_with('.');
        }
    }

    false
}

/// Check if request path matches cookie path.
/// Implements RFC 6265 path matching.
fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }

    if let Some(rest) = request_path.strip_prefix(cookie_path) {
        // Cookie path is a prefix
        return cookie_path.ends_with('/') || rest.starts_with('/');
    }

    false
}
