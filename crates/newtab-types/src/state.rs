//! # Page State
//!
//! The flat configuration record the relay owns for the lifetime of the
//! page. Fields change only through the observe dispatch table or the bulk
//! state snapshot, which keeps the relay the single source of truth for
//! page configuration.

use serde::{Deserialize, Serialize};

/// The page configuration record.
///
/// This is also the wire shape of the `NewTab:State` payload the host sends
/// in answer to `NewTab:GetInitialState`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    /// Whether the new-tab page is enabled at all.
    pub enabled: bool,

    /// Whether enhanced (suggested) tiles are shown.
    pub enhanced: bool,

    /// Grid row count.
    pub rows: u32,

    /// Grid column count.
    pub columns: u32,

    /// Whether the page is being shown in a private-browsing window.
    pub private_browsing_mode: bool,

    /// Whether the first-run intro has already been shown.
    pub intro_shown: bool,
}
