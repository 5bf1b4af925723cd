use thiserror::Error;

/// Problems with the operator-supplied server list. Any of these stops the
/// run before a single probe is started.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid JSON array format: {0}")]
    MalformedList(String),
    #[error("No STUN servers given")]
    Empty,
    #[error("Please enter valid STUN server URLs (rejected: {0})")]
    InvalidAddress(String),
}
