//! # NewTab Runtime
//!
//! A self-contained session for the page relay. The binary wires the two
//! host-boundary channels, spawns a scripted host task, and drives the
//! relay through the real startup sequence, logging every hop.
//!
//! ## Startup Sequence
//!
//! 1. Relay constructed with its page modules and string table
//! 2. Host signals `NewTab:CommandReady`
//! 3. Relay registers `NewTab:Observe` and `NewTab:State`, then requests
//!    the initial state
//! 4. Host answers with a `NewTab:State` snapshot
//! 5. Relay applies the snapshot and initializes the page
//! 6. Host pushes a few observe notifications and closes the channel

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use newtab_relay::{
    command_channel, host_channel, CustomizePanel, PageModules, PageRelay, PageView, StringBundle,
    TileGrid, UndoDialog,
};
use newtab_types::envelope::{MSG_COMMAND_READY, MSG_OBSERVE, MSG_STATE};
use newtab_types::topics::{TOPIC_ROWS, TOPIC_THUMBNAIL};
use newtab_types::{BrowserCommand, HostMessage, PageState, Site};
use serde_json::json;
use tokio::sync::mpsc;

/// Grid stand-in: a fixed set of slots, refreshes are logged.
struct LogGrid {
    slots: Vec<Option<Site>>,
}

impl TileGrid for LogGrid {
    fn ready(&self) -> bool {
        true
    }

    fn sites(&self) -> Vec<Option<Site>> {
        self.slots.clone()
    }

    fn refresh_thumbnail(&self, slot: usize) {
        info!(slot, "Refreshing tile thumbnail");
    }
}

struct LogPage;

impl PageView for LogPage {
    fn update_attributes(&self, enabled: bool) {
        debug!(enabled, "Page attributes updated");
    }

    fn init(&self) {
        info!("Page initialized");
    }
}

struct LogCustomize;

impl CustomizePanel for LogCustomize {
    fn update_selected(&self, enabled: bool, enhanced: bool) {
        debug!(enabled, enhanced, "Customize panel refreshed");
    }
}

struct LogUndo;

impl UndoDialog for LogUndo {
    fn hide(&self) {
        info!("Undo dialog hidden");
    }
}

fn demo_sites() -> Vec<Option<Site>> {
    vec![
        Some(Site::new(
            "https://example.com/",
            json!({ "url": "https://example.com/", "title": "Example" }),
        )),
        None,
        Some(Site::new(
            "https://rust-lang.org/",
            json!({ "url": "https://rust-lang.org/", "title": "Rust" }),
        )),
    ]
}

fn demo_strings() -> StringBundle {
    let mut strings = HashMap::new();
    strings.insert(
        "newtab.undo.removedLabel".to_owned(),
        "Thumbnail removed.".to_owned(),
    );
    strings.insert(
        "newtab.suggested.explain".to_owned(),
        "Suggested because you visit %1$S often".to_owned(),
    );
    StringBundle::new(strings)
}

/// The scripted host: acknowledges registrations, answers the initial
/// state request, pushes a couple of observe notifications, then hangs up.
async fn run_host(
    to_page: mpsc::UnboundedSender<HostMessage>,
    mut from_page: mpsc::UnboundedReceiver<BrowserCommand>,
) -> Result<()> {
    to_page
        .send(HostMessage::signal(MSG_COMMAND_READY))
        .context("page dropped the inbound channel")?;

    while let Some(command) = from_page.recv().await {
        match command {
            BrowserCommand::Register { topic } => {
                info!(topic = %topic, "Host: page registered");
            }
            BrowserCommand::GetInitialState => {
                info!("Host: initial state requested");
                let snapshot = PageState {
                    enabled: true,
                    enhanced: false,
                    rows: 3,
                    columns: 5,
                    private_browsing_mode: false,
                    intro_shown: true,
                };
                to_page
                    .send(HostMessage::new(
                        MSG_STATE,
                        serde_json::to_value(snapshot)
                            .context("state snapshot is serializable")?,
                    ))
                    .context("page dropped the inbound channel")?;
                break;
            }
        }
    }

    // A couple of live updates before the session ends.
    to_page
        .send(HostMessage::new(
            MSG_OBSERVE,
            json!({ "topic": TOPIC_ROWS, "data": 4 }),
        ))
        .context("page dropped the inbound channel")?;
    to_page
        .send(HostMessage::new(
            MSG_OBSERVE,
            json!({ "topic": TOPIC_THUMBNAIL, "data": "https://rust-lang.org/" }),
        ))
        .context("page dropped the inbound channel")?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    let (to_page, from_host) = host_channel();
    let (to_browser, from_page) = command_channel();

    let modules = PageModules {
        grid: Arc::new(LogGrid {
            slots: demo_sites(),
        }),
        page: Arc::new(LogPage),
        customize: Arc::new(LogCustomize),
        undo: Arc::new(LogUndo),
    };
    let mut relay = PageRelay::new(to_browser, modules, demo_strings());

    info!("Starting relay session");
    let host = tokio::spawn(run_host(to_page, from_page));

    relay.run(from_host).await;
    host.await.context("host task panicked")??;

    let state = relay.state();
    info!(
        enabled = state.enabled,
        rows = state.rows,
        columns = state.columns,
        commands_sent = relay.commands_sent(),
        "Relay session finished"
    );

    let snapshot = relay
        .stringify_sites()
        .context("failed to snapshot the grid")?;
    info!(slots = snapshot.len(), "Grid snapshot serialized");

    if let Some(label) = relay.new_tab_string_with("suggested.explain", &["rust-lang.org"]) {
        info!(label = %label, "Sample localized string");
    }

    Ok(())
}
