use crate::cookies::policy::SameSite;
use time::OffsetDateTime;

/// A cookie held by [`DocumentCookieStore`](crate::cookies::document::DocumentCookieStore).
///
/// Name and value are kept exactly as written, i.e. still percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// Position in write order. Preserved when the cookie is overwritten.
    pub creation_index: u64,
    pub expiration_time: Option<OffsetDateTime>,
    pub secure: bool,
    pub host_only: bool,
    pub same_site: SameSite,
}

impl CanonicalCookie {
    pub fn new(name: String, value: String, domain: String, path: String) -> Self {
        Self {
            name,
            value,
            domain,
            path,
            creation_index: 0,
            expiration_time: None,
            secure: false,
            host_only: true,
            same_site: SameSite::Unspecified,
        }
    }

    /// Session cookies never expire on their own.
    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        self.expiration_time
            .is_some_and(|expiry| expiry <= current_time)
    }

    /// Same storage slot: name, domain and path all match.
    pub fn is_same_key(&self, other: &CanonicalCookie) -> bool {
        self.name == other.name
            && self.domain.eq_ignore_ascii_case(&other.domain)
            && self.path == other.path
    }

    /// Validate __Secure- and __Host- cookie prefixes per RFC 6265bis.
    /// - __Secure- cookies MUST have the Secure attribute
    /// - __Host- cookies MUST have Secure, Path="/", and no Domain attribute
    pub fn has_valid_prefix(&self, secure_origin: bool) -> bool {
        if self.name.starts_with("__Secure-") && (!self.secure || !secure_origin) {
            return false;
        }

        if self.name.starts_with("__Host-")
            && (!self.secure || self.path != "/" || !self.host_only || !secure_origin)
        {
            return false;
        }

        true
    }
}
