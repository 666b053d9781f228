//! # Grid Sites
//!
//! The grid slot entity as the relay sees it. The relay never renders a
//! tile; it only matches urls for thumbnail refreshes and serializes link
//! payloads when the grid is snapshotted for the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One occupied slot in the new-tab grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Destination url of the tile.
    pub url: String,

    /// The serializable link payload backing the tile. Opaque to the relay;
    /// it is handed to the host verbatim when the grid is snapshotted.
    pub link: Value,
}

impl Site {
    /// Create a site for `url` backed by `link`.
    pub fn new(url: impl Into<String>, link: Value) -> Self {
        Self {
            url: url.into(),
            link,
        }
    }
}
