use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::negotiation::{
    CandidateKind, EventSender, GatheringEvent, Negotiation, NegotiationError, Negotiator,
};
use crate::input::address::StunAddress;

/// What a scripted server does once its context is opened.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub fail_setup: bool,
    /// Events with their delay in milliseconds, relative to the previous event.
    pub events: Vec<(u64, GatheringEvent)>,
}

impl Script {
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn setup_fails() -> Self {
        Self {
            fail_setup: true,
            events: vec![],
        }
    }

    pub fn then(mut self, delay_ms: u64, event: GatheringEvent) -> Self {
        self.events.push((delay_ms, event));
        self
    }

    pub fn then_candidate(self, delay_ms: u64, kind: CandidateKind) -> Self {
        self.then(delay_ms, GatheringEvent::Candidate(kind))
    }

    pub fn then_complete(self, delay_ms: u64) -> Self {
        self.then(delay_ms, GatheringEvent::GatheringComplete)
    }
}

/// Stands in for a real ICE stack: replays a script per server and counts
/// how often contexts are closed.
#[derive(Default)]
pub struct ScriptedNegotiator {
    scripts: HashMap<String, Script>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl ScriptedNegotiator {
    pub fn with(mut self, server: &str, script: Script) -> Self {
        self.scripts.insert(server.to_string(), script);
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

pub struct ScriptedNegotiation {
    closed: Arc<AtomicUsize>,
    // Keeps the event channel open until the probe closes us.
    _events: EventSender,
}

#[async_trait]
impl Negotiator for ScriptedNegotiator {
    async fn open(
        &self,
        server: &StunAddress,
        events: EventSender,
    ) -> Result<Box<dyn Negotiation>, NegotiationError> {
        let script = self.scripts.get(server.as_str()).cloned().unwrap_or_default();
        if script.fail_setup {
            return Err(NegotiationError::Offer("scripted offer rejection".into()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);

        let sender = events.clone();
        tokio::spawn(async move {
            for (delay_ms, event) in script.events {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                let _ = sender.send(event);
            }
        });

        Ok(Box::new(ScriptedNegotiation {
            closed: self.closed.clone(),
            _events: events,
        }))
    }
}

#[async_trait]
impl Negotiation for ScriptedNegotiation {
    async fn close(self: Box<Self>) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Counts closes for sessions driven by hand.
pub struct CountingNegotiation {
    pub closed: Arc<AtomicUsize>,
}

#[async_trait]
impl Negotiation for CountingNegotiation {
    async fn close(self: Box<Self>) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn address(input: &str) -> StunAddress {
    StunAddress::new(input).expect(input)
}
