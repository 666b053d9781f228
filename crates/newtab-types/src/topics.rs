//! # Observed Topics
//!
//! The finite set of host notifications the relay's dispatch table handles.
//! Each recognized topic is a [`TopicUpdate`] variant carrying its typed
//! payload; everything else falls out of [`TopicUpdate::parse`] as an
//! explicit unknown.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Request to refresh the thumbnails of every tile pointing at a url.
pub const TOPIC_THUMBNAIL: &str = "page-thumbnail:create";

/// Pref: whether the new-tab page is enabled at all.
pub const TOPIC_ENABLED: &str = "browser.newtabpage.enabled";

/// Pref: whether enhanced (suggested) tiles are shown.
pub const TOPIC_ENHANCED: &str = "browser.newtabpage.enhanced";

/// Pref: grid row count.
pub const TOPIC_ROWS: &str = "browser.newtabpage.rows";

/// Pref: grid column count.
pub const TOPIC_COLUMNS: &str = "browser.newtabpage.columns";

/// Payload of a `NewTab:Observe` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservePayload {
    /// The observed topic name.
    pub topic: String,

    /// The topic's value, shaped per topic.
    #[serde(default)]
    pub data: Value,
}

/// Errors from classifying an observed topic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopicError {
    /// The topic is not in the dispatch table.
    #[error("Unrecognized topic: {topic}")]
    UnknownTopic { topic: String },

    /// The topic is known but its payload has the wrong shape.
    #[error("Bad payload for topic {topic}: expected {expected}")]
    Payload {
        topic: String,
        expected: &'static str,
    },
}

/// A recognized topic update with its typed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicUpdate {
    /// Refresh the thumbnail of every tile whose url matches.
    CreateThumbnail(String),

    /// The enabled pref changed.
    Enabled(bool),

    /// The enhanced pref changed.
    Enhanced(bool),

    /// The grid row count changed.
    Rows(u32),

    /// The grid column count changed.
    Columns(u32),
}

impl TopicUpdate {
    /// Classify a `(topic, data)` pair into a typed update.
    ///
    /// # Errors
    ///
    /// - `TopicError::UnknownTopic` - the topic is not recognized
    /// - `TopicError::Payload` - the payload does not match the topic's shape
    pub fn parse(topic: &str, data: &Value) -> Result<Self, TopicError> {
        match topic {
            TOPIC_THUMBNAIL => data
                .as_str()
                .map(|url| Self::CreateThumbnail(url.to_owned()))
                .ok_or_else(|| payload_error(topic, "url string")),
            TOPIC_ENABLED => data
                .as_bool()
                .map(Self::Enabled)
                .ok_or_else(|| payload_error(topic, "bool")),
            TOPIC_ENHANCED => data
                .as_bool()
                .map(Self::Enhanced)
                .ok_or_else(|| payload_error(topic, "bool")),
            TOPIC_ROWS => parse_dimension(data)
                .map(Self::Rows)
                .ok_or_else(|| payload_error(topic, "non-negative integer")),
            TOPIC_COLUMNS => parse_dimension(data)
                .map(Self::Columns)
                .ok_or_else(|| payload_error(topic, "non-negative integer")),
            _ => Err(TopicError::UnknownTopic {
                topic: topic.to_owned(),
            }),
        }
    }

    /// The wire name of this update's topic.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::CreateThumbnail(_) => TOPIC_THUMBNAIL,
            Self::Enabled(_) => TOPIC_ENABLED,
            Self::Enhanced(_) => TOPIC_ENHANCED,
            Self::Rows(_) => TOPIC_ROWS,
            Self::Columns(_) => TOPIC_COLUMNS,
        }
    }

    /// True for the topics that feed the customize panel's selected-state
    /// indicator.
    #[must_use]
    pub fn affects_customize_panel(&self) -> bool {
        matches!(self, Self::Enabled(_) | Self::Enhanced(_))
    }
}

fn payload_error(topic: &str, expected: &'static str) -> TopicError {
    TopicError::Payload {
        topic: topic.to_owned(),
        expected,
    }
}

fn parse_dimension(data: &Value) -> Option<u32> {
    data.as_u64().and_then(|value| u32::try_from(value).ok())
}
