//! # Page Module Ports
//!
//! Narrow interfaces to the page-local UI modules. The relay never renders
//! anything; it pokes these seams and nothing else. Real implementations
//! live with the UI modules; the recording doubles in [`crate::testing`]
//! cover tests.

use async_trait::async_trait;
use newtab_types::{Site, StorageError};
use serde_json::Value;
use std::sync::Arc;

/// The tile grid.
pub trait TileGrid: Send + Sync {
    /// Whether the grid has finished its first layout. Thumbnail refreshes
    /// before that point are dropped.
    fn ready(&self) -> bool;

    /// Current slots in grid order. Empty slots are `None`.
    fn sites(&self) -> Vec<Option<Site>>;

    /// Request a thumbnail refresh for the tile in `slot`.
    fn refresh_thumbnail(&self, slot: usize);
}

/// The page chrome: visual attributes and one-time initialization.
pub trait PageView: Send + Sync {
    /// Mirror the enabled pref onto the page's visual attributes.
    fn update_attributes(&self, enabled: bool);

    /// Bring up the rest of the page. Invoked at most once per page
    /// lifetime; the relay guards re-entry.
    fn init(&self);
}

/// The customize panel's selected-state indicator.
pub trait CustomizePanel: Send + Sync {
    /// Refresh the indicator from the current enabled/enhanced pair.
    fn update_selected(&self, enabled: bool, enhanced: bool);
}

/// The undo dialog shown after a tile is removed.
pub trait UndoDialog: Send + Sync {
    /// Dismiss the dialog if it is showing.
    fn hide(&self);
}

/// Persistence seam for grid links; the undo flow reads through this.
#[async_trait]
pub trait LinkStorage: Send + Sync {
    /// Open the backing store.
    async fn open(&self) -> Result<(), StorageError>;

    /// Load the persisted link payload.
    async fn load(&self) -> Result<Value, StorageError>;
}

/// The page modules the relay is wired to.
///
/// Injected at construction; the relay holds the only long-lived
/// references and no module ever reaches for a global.
#[derive(Clone)]
pub struct PageModules {
    /// The tile grid.
    pub grid: Arc<dyn TileGrid>,

    /// The page chrome.
    pub page: Arc<dyn PageView>,

    /// The customize panel.
    pub customize: Arc<dyn CustomizePanel>,

    /// The undo dialog.
    pub undo: Arc<dyn UndoDialog>,
}
