//! # Test Doubles
//!
//! Recording implementations of the page module ports, plus the
//! always-failing storage double. Shared by the unit tests in this crate
//! and the integration suite.

use crate::ports::{CustomizePanel, LinkStorage, PageModules, PageView, TileGrid, UndoDialog};
use async_trait::async_trait;
use newtab_types::{Site, StorageError};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Grid double: fixed slots plus a log of refresh requests.
#[derive(Default)]
pub struct RecordingGrid {
    ready: Mutex<bool>,
    slots: Mutex<Vec<Option<Site>>>,
    refreshed: Mutex<Vec<usize>>,
}

impl RecordingGrid {
    /// A ready grid holding `slots`.
    #[must_use]
    pub fn ready_with_slots(slots: Vec<Option<Site>>) -> Self {
        Self {
            ready: Mutex::new(true),
            slots: Mutex::new(slots),
            refreshed: Mutex::new(Vec::new()),
        }
    }

    /// Flip the ready flag.
    pub fn set_ready(&self, ready: bool) {
        *self.ready.lock() = ready;
    }

    /// Slots whose thumbnails were asked to refresh, in request order.
    #[must_use]
    pub fn refreshed(&self) -> Vec<usize> {
        self.refreshed.lock().clone()
    }
}

impl TileGrid for RecordingGrid {
    fn ready(&self) -> bool {
        *self.ready.lock()
    }

    fn sites(&self) -> Vec<Option<Site>> {
        self.slots.lock().clone()
    }

    fn refresh_thumbnail(&self, slot: usize) {
        self.refreshed.lock().push(slot);
    }
}

/// Page chrome double: records attribute updates and init calls.
#[derive(Default)]
pub struct RecordingPage {
    attributes: Mutex<Vec<bool>>,
    inits: Mutex<u32>,
}

impl RecordingPage {
    /// How many times full page initialization ran.
    #[must_use]
    pub fn init_count(&self) -> u32 {
        *self.inits.lock()
    }

    /// Every attribute update, in call order.
    #[must_use]
    pub fn attribute_updates(&self) -> Vec<bool> {
        self.attributes.lock().clone()
    }
}

impl PageView for RecordingPage {
    fn update_attributes(&self, enabled: bool) {
        self.attributes.lock().push(enabled);
    }

    fn init(&self) {
        *self.inits.lock() += 1;
    }
}

/// Customize panel double: records selected-state refreshes.
#[derive(Default)]
pub struct RecordingCustomize {
    updates: Mutex<Vec<(bool, bool)>>,
}

impl RecordingCustomize {
    /// Every `(enabled, enhanced)` refresh, in call order.
    #[must_use]
    pub fn updates(&self) -> Vec<(bool, bool)> {
        self.updates.lock().clone()
    }
}

impl CustomizePanel for RecordingCustomize {
    fn update_selected(&self, enabled: bool, enhanced: bool) {
        self.updates.lock().push((enabled, enhanced));
    }
}

/// Undo dialog double: counts hide requests.
#[derive(Default)]
pub struct RecordingUndo {
    hides: Mutex<u32>,
}

impl RecordingUndo {
    /// How many times the dialog was asked to hide.
    #[must_use]
    pub fn hide_count(&self) -> u32 {
        *self.hides.lock()
    }
}

impl UndoDialog for RecordingUndo {
    fn hide(&self) {
        *self.hides.lock() += 1;
    }
}

/// One recording double per port, wired into a single [`PageModules`].
pub struct RecordingModules {
    /// The grid double.
    pub grid: Arc<RecordingGrid>,
    /// The page chrome double.
    pub page: Arc<RecordingPage>,
    /// The customize panel double.
    pub customize: Arc<RecordingCustomize>,
    /// The undo dialog double.
    pub undo: Arc<RecordingUndo>,
}

impl RecordingModules {
    /// Doubles around an empty, ready grid.
    #[must_use]
    pub fn new() -> Self {
        Self::with_grid(RecordingGrid::ready_with_slots(Vec::new()))
    }

    /// Doubles around the given grid.
    #[must_use]
    pub fn with_grid(grid: RecordingGrid) -> Self {
        Self {
            grid: Arc::new(grid),
            page: Arc::new(RecordingPage::default()),
            customize: Arc::new(RecordingCustomize::default()),
            undo: Arc::new(RecordingUndo::default()),
        }
    }

    /// The port bundle the relay takes at construction.
    #[must_use]
    pub fn modules(&self) -> PageModules {
        PageModules {
            grid: self.grid.clone(),
            page: self.page.clone(),
            customize: self.customize.clone(),
            undo: self.undo.clone(),
        }
    }
}

impl Default for RecordingModules {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage double whose every request fails.
///
/// Stands in for the page's link storage in error-path tests; the error
/// codes match what a broken backing store reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct FaultyStorage;

#[async_trait]
impl LinkStorage for FaultyStorage {
    async fn open(&self) -> Result<(), StorageError> {
        Err(StorageError::Open)
    }

    async fn load(&self) -> Result<Value, StorageError> {
        Err(StorageError::Save)
    }
}
