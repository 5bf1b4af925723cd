use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::error::InputError;

pub const STUN_SCHEME: &str = "stun:";

const OCTET: &str = r"(?:25[0-5]|2[0-4][0-9]|1?[0-9][0-9]?)";
const PORT: &str =
    r"(?:[1-9][0-9]{0,3}|[1-5][0-9]{4}|6[0-4][0-9]{3}|65[0-4][0-9]{2}|655[0-2][0-9]|6553[0-5])";

static STUN_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let host = r"(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}";
    let ipv4 = format!(r"{OCTET}\.{OCTET}\.{OCTET}\.{OCTET}");
    Regex::new(&format!(r"^stun:(?:{host}|{ipv4})(?::{PORT})?$"))
        .expect("STUN URL pattern is a valid regex")
});

/// A scheme-qualified STUN server address that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StunAddress(String);

impl StunAddress {
    /// Wraps an already normalized address, rejecting it unless it matches the
    /// `stun:host[:port]` grammar.
    pub fn new(normalized: &str) -> Result<Self, InputError> {
        if is_valid_stun_url(normalized) {
            Ok(Self(normalized.to_string()))
        } else {
            Err(InputError::InvalidAddress(normalized.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StunAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize_stun_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with(STUN_SCHEME) {
        url.to_string()
    } else {
        format!("{STUN_SCHEME}{url}")
    }
}

pub fn is_valid_stun_url(url: &str) -> bool {
    STUN_URL_RE.is_match(url)
}

/// Normalizes and validates every raw entry. The whole list is rejected if
/// it is empty or if any entry is invalid.
pub fn prepare_addresses(raw: &[String]) -> Result<Vec<StunAddress>, InputError> {
    if raw.is_empty() {
        return Err(InputError::Empty);
    }
    raw.iter()
        .map(|entry| StunAddress::new(&normalize_stun_url(entry)))
        .collect()
}
