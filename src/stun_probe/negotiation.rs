use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::input::address::StunAddress;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum NegotiationError {
    #[error("could not open ICE context")]
    Context(#[source] BoxError),
    #[error("could not create data channel")]
    DataChannel(#[source] BoxError),
    #[error("offer creation rejected")]
    Offer(#[source] BoxError),
    #[error("local description rejected")]
    LocalDescription(#[source] BoxError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Host,
    ServerReflexive,
    PeerReflexive,
    Relay,
    Unknown,
}

/// What an ICE context reports while gathering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatheringEvent {
    Candidate(CandidateKind),
    GatheringComplete,
}

pub type EventSender = UnboundedSender<GatheringEvent>;

/// Opens ICE contexts that gather candidates against a single STUN server.
#[async_trait]
pub trait Negotiator: Send + Sync {
    /// Opens a context with `server` as its only ICE server, attaches a data
    /// channel, and applies a local offer so gathering starts. Events are
    /// pushed to `events` for as long as the returned handle is open.
    ///
    /// On error the implementation has already released whatever it opened.
    async fn open(
        &self,
        server: &StunAddress,
        events: EventSender,
    ) -> Result<Box<dyn Negotiation>, NegotiationError>;
}

/// An open ICE context. Closing it releases sockets and stops events.
#[async_trait]
pub trait Negotiation: Send {
    async fn close(self: Box<Self>);
}
