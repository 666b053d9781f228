//! # NewTab Shared Types
//!
//! This crate contains every type that crosses a module boundary on the
//! new-tab page: the host-boundary envelopes, the recognized observe
//! topics, the page state record, and the grid site entity.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: wire names and payload shapes are defined
//!   here, once, and pinned by serde attributes.
//! - **Closed Command Set**: the page → host command vocabulary is an enum,
//!   so a payload-shape mismatch is a compile error rather than a silently
//!   malformed event.

pub mod envelope;
pub mod errors;
pub mod sites;
pub mod state;
pub mod topics;

pub use envelope::{BrowserCommand, HostMessage, InboundRoute};
pub use errors::StorageError;
pub use sites::Site;
pub use state::PageState;
pub use topics::{ObservePayload, TopicError, TopicUpdate};
