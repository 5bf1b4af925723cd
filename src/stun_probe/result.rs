use serde::Serialize;

use crate::input::address::StunAddress;

/// Classification of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// A server-reflexive candidate was gathered through the server.
    Working,
    /// Gathering completed without a server-reflexive candidate, or setup was rejected.
    Failed,
    /// Neither of the above happened before the probe deadline.
    TimedOut,
}

impl ProbeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProbeStatus::Working => "✅ Working",
            ProbeStatus::Failed => "❌ Failed",
            ProbeStatus::TimedOut => "❌ Timeout",
        }
    }

    /// Coarse class used for styling: everything but `Working` is a failure.
    pub fn class(&self) -> &'static str {
        match self {
            ProbeStatus::Working => "success",
            ProbeStatus::Failed | ProbeStatus::TimedOut => "fail",
        }
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub server: StunAddress,
    pub status: ProbeStatus,
}

impl ProbeOutcome {
    pub fn new(server: StunAddress, status: ProbeStatus) -> Self {
        Self { server, status }
    }

    pub fn label(&self) -> &'static str {
        self.status.label()
    }

    pub fn status_class(&self) -> &'static str {
        self.status.class()
    }
}

/// Outcomes index-aligned with the address list they were produced from.
pub type ResultSet = Vec<ProbeOutcome>;
