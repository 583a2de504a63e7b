//! Basic `Authorization` header parsing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Credentials carried by a Basic authorization header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// Login email.
    pub email: String,
    /// Clear-text password.
    pub password: String,
}

/// Parse `Basic <base64(email:password)>`.
///
/// The password is everything after the first `:`, so it may itself
/// contain colons. Returns `None` for any malformed value.
pub fn parse_basic_auth(header: &str) -> Option<BasicCredentials> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}
