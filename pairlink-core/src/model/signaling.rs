use crate::model::session::SessionId;
use serde::{Deserialize, Serialize};

/// Frames a participant sends to the relay, tagged by their `type` field.
///
/// Only the fields the relay routes on are modelled. The payload of
/// offer/answer/candidate frames stays in the received text and is
/// forwarded untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum SignalMessage {
    /// Host opens (or takes over) a session.
    Create { room_id: SessionId },

    /// Participant asks to pair with the host of an existing session.
    Join { room_id: SessionId },

    Offer { room_id: SessionId },

    Answer { room_id: SessionId },

    /// ICE candidate for NAT traversal.
    Candidate { room_id: SessionId },

    /// Any other `type` tag. Ignored by the relay.
    #[serde(other)]
    Unknown,
}

impl SignalMessage {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Frames the relay itself originates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Pushed to the receiver when a sender joins its session.
    UserJoined,

    /// Rejected join, or the host of the session went away.
    Error { message: String },
}

impl ServerEvent {
    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
