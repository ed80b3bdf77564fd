//! Authentication module for Gazette.
//!
//! This module maps an `Authorization` header to a registered user and
//! issues API keys at registration.

mod api_key;
mod registration;

pub use api_key::{authenticate, parse_authorization};
pub use registration::{register, MAX_NAME_LENGTH};
