//! # Host Boundary Envelopes
//!
//! The two wire shapes that cross the host boundary, one per direction:
//! [`HostMessage`] on the host → page channel and [`BrowserCommand`] on the
//! page → host channel. Both channels are FIFO; neither reorders or
//! deduplicates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound signal: the host's command listener is attached and the page may
/// start registering for messages.
pub const MSG_COMMAND_READY: &str = "NewTab:CommandReady";

/// Inbound message carrying an observed topic update.
pub const MSG_OBSERVE: &str = "NewTab:Observe";

/// Inbound message carrying the bulk page-state snapshot.
pub const MSG_STATE: &str = "NewTab:State";

/// A message delivered on the host → page channel.
///
/// The `name` field is the demultiplexing key; `data` is the payload and is
/// null for pure signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostMessage {
    /// The topic or channel id this message demultiplexes on.
    pub name: String,

    /// The payload, null when the message carries none.
    #[serde(default)]
    pub data: Value,
}

impl HostMessage {
    /// Create a message with a payload.
    pub fn new(name: impl Into<String>, data: Value) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Create a payload-less signal.
    pub fn signal(name: impl Into<String>) -> Self {
        Self::new(name, Value::Null)
    }

    /// Classify the message name into the fixed set of routes the relay
    /// handles itself. Everything else is delivered to registered listeners
    /// only.
    #[must_use]
    pub fn route(&self) -> InboundRoute {
        match self.name.as_str() {
            MSG_COMMAND_READY => InboundRoute::CommandReady,
            MSG_OBSERVE => InboundRoute::Observe,
            MSG_STATE => InboundRoute::State,
            _ => InboundRoute::Other,
        }
    }
}

/// The fixed set of inbound routes the relay demultiplexes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundRoute {
    /// The host is ready for commands; registration may begin.
    CommandReady,
    /// A topic update to feed through the observe dispatch table.
    Observe,
    /// The bulk state snapshot answering `NewTab:GetInitialState`.
    State,
    /// Any other name.
    Other,
}

/// A command dispatched on the page → host channel.
///
/// Serialized adjacently tagged as `{command, data}`. The set is closed:
/// these two commands are the entire outbound vocabulary of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "data")]
pub enum BrowserCommand {
    /// Ask the host to deliver messages named `topic` to this page.
    #[serde(rename = "NewTab:Register")]
    Register {
        #[serde(rename = "type")]
        topic: String,
    },

    /// Request the initial page-state snapshot. No payload.
    #[serde(rename = "NewTab:GetInitialState")]
    GetInitialState,
}

impl BrowserCommand {
    /// Create a registration command for `topic`.
    pub fn register(topic: impl Into<String>) -> Self {
        Self::Register {
            topic: topic.into(),
        }
    }

    /// The wire name of this command.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register { .. } => "NewTab:Register",
            Self::GetInitialState => "NewTab:GetInitialState",
        }
    }
}
