pub mod negotiation;
pub mod orchestrator;
pub mod probe;
pub mod result;
pub mod webrtc_negotiator;

#[cfg(test)]
pub mod test_utils;

pub mod prelude {
    pub use super::orchestrator::probe_all;
    pub use super::probe::{DEFAULT_PROBE_TIMEOUT, Prober};
    pub use super::result::{ProbeOutcome, ProbeStatus, ResultSet};
    pub use super::webrtc_negotiator::WebRtcNegotiator;
}

use std::fmt::Write;

/// Formats an error together with its chain of causes.
pub(crate) fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, "\n\nCaused by: {}", src);
        err = src;
    }
    s
}
