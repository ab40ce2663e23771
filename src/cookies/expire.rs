//! Expiration policy: classify an [`Expire`] value into the directive
//! appended to a cookie write.
//!
//! | Input | Directive |
//! |-------|-----------|
//! | `Session`, `MaxAge(0)`, `""`, `"0"` | none (session cookie) |
//! | `Never`, `MaxAge(-1)` | `expires=Fri, 31 Dec 9999 23:59:59 GMT` |
//! | `MaxAge(n)` | `max-age=n` |
//! | `Text("2d")` and friends | `max-age=172800` |
//! | any other `Text` | `expires=<text>` verbatim |
//! | `At(datetime)` | `expires=<IMF-fixdate>` |

use serde::de::{self, Deserialize, Deserializer};
use std::fmt;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Expiry written for cookies that should outlive any session.
pub const FAR_FUTURE_EXPIRES: &str = "Fri, 31 Dec 9999 23:59:59 GMT";

/// Expiry written to evict a cookie.
pub const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// When a cookie expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expire {
    /// No expiration directive; the cookie lives for the session.
    Session,
    /// Far-future expiry.
    Never,
    /// Lifetime in seconds. `0` means session, `-1` means never.
    MaxAge(i64),
    /// Duration shorthand (`"30min"`, `"1y"`) or a literal expires date.
    Text(String),
    /// Absolute expiry.
    At(OffsetDateTime),
}

impl Default for Expire {
    fn default() -> Self {
        Expire::Text("1d".to_string())
    }
}

impl Expire {
    /// Values that resolve to no expiration directive.
    pub fn is_session(&self) -> bool {
        match self {
            Expire::Session | Expire::MaxAge(0) => true,
            Expire::Text(text) => reads_as_zero(text),
            _ => false,
        }
    }

    /// Resolve into the directive appended to the cookie write.
    pub fn directive(&self) -> ExpiryDirective {
        match self {
            Expire::Session | Expire::MaxAge(0) => ExpiryDirective::None,
            Expire::Never | Expire::MaxAge(-1) => {
                ExpiryDirective::Expires(FAR_FUTURE_EXPIRES.to_string())
            }
            Expire::MaxAge(seconds) => ExpiryDirective::MaxAge(*seconds),
            Expire::Text(text) if reads_as_zero(text) => ExpiryDirective::None,
            Expire::Text(text) => match DurationShorthand::parse(text) {
                Some(shorthand) => ExpiryDirective::MaxAge(shorthand.as_seconds()),
                None => {
                    tracing::warn!(
                        value = %text,
                        "unrecognized duration, passing it through as a literal expires date"
                    );
                    ExpiryDirective::Expires(text.clone())
                }
            },
            Expire::At(at) => match http_date(*at) {
                Some(date) => ExpiryDirective::Expires(date),
                None => {
                    tracing::warn!(at = %at, "expiry date cannot be formatted, writing a session cookie");
                    ExpiryDirective::None
                }
            },
        }
    }
}

/// Empty text and text that reads as the number zero carry no expiry.
fn reads_as_zero(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.parse::<f64>().is_ok_and(|n| n == 0.0)
}

/// Format as an IMF-fixdate in UTC (`Fri, 31 Dec 9999 23:59:59 GMT`).
///
/// `None` when the instant has no representable UTC date.
pub fn http_date(at: OffsetDateTime) -> Option<String> {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    at.checked_to_offset(UtcOffset::UTC)?.format(format).ok()
}

impl From<i64> for Expire {
    fn from(seconds: i64) -> Self {
        Expire::MaxAge(seconds)
    }
}

impl From<i32> for Expire {
    fn from(seconds: i32) -> Self {
        Expire::MaxAge(i64::from(seconds))
    }
}

impl From<f64> for Expire {
    fn from(seconds: f64) -> Self {
        if seconds == f64::INFINITY {
            Expire::Never
        } else {
            // saturating; NaN becomes 0
            Expire::MaxAge(seconds as i64)
        }
    }
}

impl From<&str> for Expire {
    fn from(text: &str) -> Self {
        Expire::Text(text.to_string())
    }
}

impl From<String> for Expire {
    fn from(text: String) -> Self {
        Expire::Text(text)
    }
}

impl From<OffsetDateTime> for Expire {
    fn from(at: OffsetDateTime) -> Self {
        Expire::At(at)
    }
}

impl From<std::time::Duration> for Expire {
    fn from(duration: std::time::Duration) -> Self {
        Expire::MaxAge(i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
    }
}

impl From<time::Duration> for Expire {
    fn from(duration: time::Duration) -> Self {
        Expire::MaxAge(duration.whole_seconds())
    }
}

impl<'de> Deserialize<'de> for Expire {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExpireVisitor;

        impl de::Visitor<'_> for ExpireVisitor {
            type Value = Expire;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number of seconds or a duration/date string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Expire, E> {
                Ok(Expire::MaxAge(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Expire, E> {
                Ok(Expire::MaxAge(i64::try_from(v).unwrap_or(i64::MAX)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Expire, E> {
                Ok(Expire::from(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Expire, E> {
                Ok(Expire::from(v))
            }
        }

        deserializer.deserialize_any(ExpireVisitor)
    }
}

/// Units accepted by duration shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl DurationUnit {
    /// Parse a unit suffix, case-insensitively.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "y" => Some(DurationUnit::Year),
            "m" => Some(DurationUnit::Month),
            "d" => Some(DurationUnit::Day),
            "h" => Some(DurationUnit::Hour),
            "min" => Some(DurationUnit::Minute),
            "s" => Some(DurationUnit::Second),
            _ => None,
        }
    }

    /// Seconds per unit. Months are 30 days, years are 12 such months.
    pub fn seconds(self) -> i64 {
        match self {
            DurationUnit::Year => 31_104_000,
            DurationUnit::Month => 2_592_000,
            DurationUnit::Day => 86_400,
            DurationUnit::Hour => 3_600,
            DurationUnit::Minute => 60,
            DurationUnit::Second => 1,
        }
    }
}

/// A duration written as `<digits><unit>`, e.g. `"7d"` or `"30MIN"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationShorthand {
    pub amount: u64,
    pub unit: DurationUnit,
}

impl DurationShorthand {
    /// Parse `^\d+(y|m|d|h|min|s)$`, case-insensitive.
    pub fn parse(text: &str) -> Option<Self> {
        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len());
        let (digits, suffix) = text.split_at(split);
        if digits.is_empty() {
            return None;
        }
        let unit = DurationUnit::from_suffix(suffix)?;
        // Only overflow can fail here.
        let amount = digits.parse::<u64>().unwrap_or(u64::MAX);
        Some(Self { amount, unit })
    }

    pub fn as_seconds(&self) -> i64 {
        i64::try_from(self.amount)
            .unwrap_or(i64::MAX)
            .saturating_mul(self.unit.seconds())
    }
}

/// Expiration clause of a cookie write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryDirective {
    None,
    MaxAge(i64),
    Expires(String),
}

impl fmt::Display for ExpiryDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryDirective::None => Ok(()),
            ExpiryDirective::MaxAge(seconds) => write!(f, "; max-age={}", seconds),
            ExpiryDirective::Expires(date) => write!(f, "; expires={}", date),
        }
    }
}
