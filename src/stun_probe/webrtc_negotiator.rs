use std::sync::Arc;

use async_trait::async_trait;
use webrtc::api::{API, APIBuilder};
use webrtc::data_channel::RTCDataChannel;
use webrtc::ice_transport::ice_candidate::RTCIceCandidate;
use webrtc::ice_transport::ice_candidate_type::RTCIceCandidateType;
use webrtc::ice_transport::ice_gatherer_state::RTCIceGathererState;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;

use super::negotiation::{
    CandidateKind, EventSender, GatheringEvent, Negotiation, NegotiationError, Negotiator,
};
use crate::input::address::StunAddress;

/// Gathers candidates with a webrtc-rs peer connection per probe.
pub struct WebRtcNegotiator {
    api: API,
}

impl WebRtcNegotiator {
    pub fn new() -> Self {
        Self {
            api: APIBuilder::new().build(),
        }
    }
}

impl Default for WebRtcNegotiator {
    fn default() -> Self {
        Self::new()
    }
}

struct WebRtcNegotiation {
    server: StunAddress,
    peer_connection: RTCPeerConnection,
    _data_channel: Arc<RTCDataChannel>,
}

fn candidate_kind(typ: RTCIceCandidateType) -> CandidateKind {
    match typ {
        RTCIceCandidateType::Host => CandidateKind::Host,
        RTCIceCandidateType::Srflx => CandidateKind::ServerReflexive,
        RTCIceCandidateType::Prflx => CandidateKind::PeerReflexive,
        RTCIceCandidateType::Relay => CandidateKind::Relay,
        RTCIceCandidateType::Unspecified => CandidateKind::Unknown,
    }
}

fn forward_gathering_events(peer_connection: &RTCPeerConnection, events: EventSender) {
    let candidate_events = events.clone();
    peer_connection.on_ice_candidate(Box::new(move |candidate: Option<RTCIceCandidate>| {
        // `None` marks the end of gathering, which the state handler reports.
        if let Some(candidate) = candidate {
            let _ = candidate_events.send(GatheringEvent::Candidate(candidate_kind(candidate.typ)));
        }
        Box::pin(async {})
    }));

    peer_connection.on_ice_gathering_state_change(Box::new(move |state: RTCIceGathererState| {
        if state == RTCIceGathererState::Complete {
            let _ = events.send(GatheringEvent::GatheringComplete);
        }
        Box::pin(async {})
    }));
}

/// Gathering only starts once something needs a transport and a local
/// description has been applied.
async fn start_gathering(
    peer_connection: &RTCPeerConnection,
) -> Result<Arc<RTCDataChannel>, NegotiationError> {
    let data_channel = peer_connection
        .create_data_channel("", None)
        .await
        .map_err(|e| NegotiationError::DataChannel(e.into()))?;
    let offer = peer_connection
        .create_offer(None)
        .await
        .map_err(|e| NegotiationError::Offer(e.into()))?;
    peer_connection
        .set_local_description(offer)
        .await
        .map_err(|e| NegotiationError::LocalDescription(e.into()))?;
    Ok(data_channel)
}

async fn close_peer_connection(server: &StunAddress, peer_connection: &RTCPeerConnection) {
    if let Err(e) = peer_connection.close().await {
        log::debug!("Closing peer connection for {server} failed: {e}");
    }
}

#[async_trait]
impl Negotiator for WebRtcNegotiator {
    async fn open(
        &self,
        server: &StunAddress,
        events: EventSender,
    ) -> Result<Box<dyn Negotiation>, NegotiationError> {
        let config = RTCConfiguration {
            ice_servers: vec![RTCIceServer {
                urls: vec![server.to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };

        let peer_connection = self
            .api
            .new_peer_connection(config)
            .await
            .map_err(|e| NegotiationError::Context(e.into()))?;

        forward_gathering_events(&peer_connection, events);

        match start_gathering(&peer_connection).await {
            Ok(data_channel) => Ok(Box::new(WebRtcNegotiation {
                server: server.clone(),
                peer_connection,
                _data_channel: data_channel,
            })),
            Err(e) => {
                close_peer_connection(server, &peer_connection).await;
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Negotiation for WebRtcNegotiation {
    async fn close(self: Box<Self>) {
        close_peer_connection(&self.server, &self.peer_connection).await;
    }
}
