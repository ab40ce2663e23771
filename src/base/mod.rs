//! Base types and error handling.
//!
//! - [`CookieError`](error::CookieError): failures raised by cookie writes
//! - [`SerdeResultExt`](context::SerdeResultExt): attach a cookie name to serde failures

pub mod context;
pub mod error;

#[cfg(test)]
mod tests;
