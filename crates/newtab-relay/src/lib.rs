//! # NewTab Relay - Message Bridge for the New-Tab Page
//!
//! One relay exists per page. It bridges host-originated messages to
//! page-local callbacks and page-local commands to the host:
//!
//! ```text
//! ┌──────────────┐                      ┌──────────────┐
//! │     Host     │    HostMessage       │  PageRelay   │ ──→ registered
//! │  (browser    │ ───────────────────→ │              │     listeners
//! │   process)   │                      │              │ ──→ grid / page /
//! │              │ ←─────────────────── │              │     customize /
//! └──────────────┘    BrowserCommand    └──────────────┘     undo dialog
//! ```
//!
//! The relay owns the page state record and the listener registry
//! exclusively; all mutation happens on its receive loop. Outbound sends
//! are fire-and-forget: a lost command is logged, never surfaced.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod ports;
pub mod relay;
pub mod strings;
pub mod testing;

// Re-export main types
pub use ports::{CustomizePanel, LinkStorage, PageModules, PageView, TileGrid, UndoDialog};
pub use relay::{
    command_channel, host_channel, CommandSender, HostReceiver, ListenerFn, PageRelay, RelayError,
};
pub use strings::{format_positional, StringBundle, STRING_PREFIX};
