use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until, timeout_at};

use super::negotiation::{CandidateKind, GatheringEvent, Negotiation, Negotiator};
use super::report;
use super::result::{ProbeOutcome, ProbeStatus};
use crate::input::address::StunAddress;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(5000);

/// State of one probe: the open ICE context and whether a verdict was reached.
pub(crate) struct ProbeSession {
    server: StunAddress,
    negotiation: Option<Box<dyn Negotiation>>,
    outcome: Option<ProbeOutcome>,
}

impl ProbeSession {
    pub(crate) fn new(server: StunAddress) -> Self {
        Self {
            server,
            negotiation: None,
            outcome: None,
        }
    }

    pub(crate) fn attach(&mut self, negotiation: Box<dyn Negotiation>) {
        self.negotiation = Some(negotiation);
    }

    /// Records the verdict and closes the ICE context. Only the first call
    /// decides; later calls return that same outcome and touch nothing.
    pub(crate) async fn settle(&mut self, status: ProbeStatus) -> ProbeOutcome {
        match &self.outcome {
            Some(settled) => {
                log::trace!(
                    "Discarding {status:?} for {}, already settled as {:?}",
                    self.server,
                    settled.status
                );
                settled.clone()
            }
            None => {
                let outcome = ProbeOutcome::new(self.server.clone(), status);
                self.outcome = Some(outcome.clone());
                if let Some(negotiation) = self.negotiation.take() {
                    negotiation.close().await;
                }
                log::debug!("{} settled as {status:?}", self.server);
                outcome
            }
        }
    }
}

fn classify(event: GatheringEvent) -> Option<ProbeStatus> {
    match event {
        GatheringEvent::Candidate(CandidateKind::ServerReflexive) => Some(ProbeStatus::Working),
        GatheringEvent::Candidate(_) => None,
        GatheringEvent::GatheringComplete => Some(ProbeStatus::Failed),
    }
}

/// Checks a single STUN server by gathering ICE candidates through it.
#[derive(Clone)]
pub struct Prober {
    negotiator: Arc<dyn Negotiator>,
    timeout: Duration,
}

impl Prober {
    pub fn new(negotiator: Arc<dyn Negotiator>, timeout: Duration) -> Self {
        Self {
            negotiator,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves to `Working` on the first server-reflexive candidate, `Failed`
    /// when gathering completes without one or setup is rejected, and
    /// `TimedOut` once the deadline passes. Never fails.
    pub async fn probe(&self, server: &StunAddress) -> ProbeOutcome {
        let deadline = Instant::now() + self.timeout;
        let (events, mut gathering) = mpsc::unbounded_channel();
        let mut session = ProbeSession::new(server.clone());

        match self.negotiator.open(server, events).await {
            Ok(negotiation) => session.attach(negotiation),
            Err(e) => {
                log::warn!("Negotiation setup for {server} failed: {}", report(&e));
                return session.settle(ProbeStatus::Failed).await;
            }
        }

        loop {
            let status = match timeout_at(deadline, gathering.recv()).await {
                Ok(Some(event)) => match classify(event) {
                    Some(status) => status,
                    None => continue,
                },
                // The context went quiet for good; only the deadline can end it.
                Ok(None) => {
                    sleep_until(deadline).await;
                    ProbeStatus::TimedOut
                }
                Err(_) => ProbeStatus::TimedOut,
            };
            return session.settle(status).await;
        }
    }
}
