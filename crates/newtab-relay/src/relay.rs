//! # Page Relay
//!
//! Defines [`PageRelay`], the single bridge between the embedding host and
//! the page-local UI modules, together with the typed channel constructors
//! for both directions of the host boundary.

use crate::ports::PageModules;
use crate::strings::StringBundle;
use newtab_types::envelope::{MSG_OBSERVE, MSG_STATE};
use newtab_types::{
    BrowserCommand, HostMessage, InboundRoute, ObservePayload, PageState, TopicError, TopicUpdate,
};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A page-local callback invoked with the payload of every matching
/// message.
pub type ListenerFn = Box<dyn FnMut(&Value) + Send>;

/// Sender half of the page → host command channel.
pub type CommandSender = mpsc::UnboundedSender<BrowserCommand>;

/// Receiver half of the host → page message channel.
pub type HostReceiver = mpsc::UnboundedReceiver<HostMessage>;

/// Create the host → page message channel.
#[must_use]
pub fn host_channel() -> (mpsc::UnboundedSender<HostMessage>, HostReceiver) {
    mpsc::unbounded_channel()
}

/// Create the page → host command channel.
#[must_use]
pub fn command_channel() -> (CommandSender, mpsc::UnboundedReceiver<BrowserCommand>) {
    mpsc::unbounded_channel()
}

/// Errors from relay operations.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A site's link payload could not be serialized for the host.
    #[error("Failed to serialize site link: {0}")]
    SerializeSite(#[from] serde_json::Error),
}

/// The in-page message relay.
///
/// One instance is constructed per page context and handed explicitly to
/// any module that needs it. The relay exclusively owns the page state and
/// the listener registry; both are touched only from its receive loop.
pub struct PageRelay {
    /// Registered callbacks by message name, in registration order.
    listeners: HashMap<String, Vec<ListenerFn>>,

    /// The page configuration record.
    state: PageState,

    /// Outbound command channel to the host.
    to_browser: CommandSender,

    /// The injected page modules.
    modules: PageModules,

    /// Flat copy of the localized string table.
    strings: StringBundle,

    /// Whether full page initialization has already run.
    page_initialized: bool,

    /// Commands successfully handed to the host channel.
    commands_sent: u64,
}

impl PageRelay {
    /// Create a relay wired to `to_browser` and the given page modules.
    #[must_use]
    pub fn new(to_browser: CommandSender, modules: PageModules, strings: StringBundle) -> Self {
        Self {
            listeners: HashMap::new(),
            state: PageState::default(),
            to_browser,
            modules,
            strings,
            page_initialized: false,
            commands_sent: 0,
        }
    }

    /// Current page state.
    #[must_use]
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Number of commands successfully handed to the host channel.
    #[must_use]
    pub fn commands_sent(&self) -> u64 {
        self.commands_sent
    }

    /// Drain the host → page channel until the host closes it.
    ///
    /// This is the page's inbound subscription for its whole lifetime;
    /// there is no unsubscribe path, page teardown drops the channel.
    pub async fn run(&mut self, mut from_host: HostReceiver) {
        while let Some(message) = from_host.recv().await {
            self.handle_message(message);
        }
        debug!("Host channel closed, relay loop finished");
    }

    /// Demultiplex one inbound envelope.
    ///
    /// Known routes are handled first (readiness, observe, state), then the
    /// payload is fanned out to every listener registered under the
    /// envelope's name, in registration order.
    pub fn handle_message(&mut self, message: HostMessage) {
        match message.route() {
            InboundRoute::CommandReady => self.announce(),
            InboundRoute::Observe => self.handle_observe(&message.data),
            InboundRoute::State => self.handle_state(&message.data),
            InboundRoute::Other => {}
        }
        self.notify_listeners(&message);
    }

    /// Register `callback` for messages named `name` and tell the host this
    /// page wants them.
    ///
    /// Duplicate registrations are kept: each one is invoked once per
    /// message, in registration order. That is intentional fan-out, not a
    /// defect to deduplicate.
    pub fn register_listener<F>(&mut self, name: impl Into<String>, callback: F)
    where
        F: FnMut(&Value) + Send + 'static,
    {
        let name = name.into();
        self.listeners
            .entry(name.clone())
            .or_default()
            .push(Box::new(callback));
        debug!(name = %name, "Listener registered");
        self.send_to_browser(BrowserCommand::register(name));
    }

    /// Hand a command to the host.
    ///
    /// Fire-and-forget: returns whether the command reached the channel. A
    /// closed host side is logged and swallowed; it never reaches the
    /// caller as an error.
    pub fn send_to_browser(&mut self, command: BrowserCommand) -> bool {
        let name = command.name();
        match self.to_browser.send(command) {
            Ok(()) => {
                self.commands_sent += 1;
                debug!(command = name, "Command sent");
                true
            }
            Err(_) => {
                warn!(command = name, "Command dropped (host channel closed)");
                false
            }
        }
    }

    /// Apply one recognized topic update.
    pub fn observe(&mut self, update: TopicUpdate) {
        match &update {
            TopicUpdate::CreateThumbnail(url) => self.refresh_thumbnails(url),
            TopicUpdate::Enabled(enabled) => {
                self.state.enabled = *enabled;
                self.modules.page.update_attributes(*enabled);
                if *enabled {
                    self.init_page();
                } else {
                    self.modules.undo.hide();
                }
            }
            TopicUpdate::Enhanced(enhanced) => self.state.enhanced = *enhanced,
            TopicUpdate::Rows(rows) => self.state.rows = *rows,
            TopicUpdate::Columns(columns) => self.state.columns = *columns,
        }
        if update.affects_customize_panel() {
            self.modules
                .customize
                .update_selected(self.state.enabled, self.state.enhanced);
        }
    }

    /// Bulk-apply the host's state snapshot.
    ///
    /// The four plain fields are stored directly; enabled and enhanced
    /// re-enter [`PageRelay::observe`] so their side effects apply
    /// uniformly. This is the single seeding entry point at startup.
    pub fn set_state(&mut self, snapshot: PageState) {
        self.state.private_browsing_mode = snapshot.private_browsing_mode;
        self.state.rows = snapshot.rows;
        self.state.columns = snapshot.columns;
        self.state.intro_shown = snapshot.intro_shown;
        self.observe(TopicUpdate::Enabled(snapshot.enabled));
        self.observe(TopicUpdate::Enhanced(snapshot.enhanced));
        self.init_page();
    }

    /// Raw localized template for `name`, or `None` when the table has no
    /// such key.
    #[must_use]
    pub fn new_tab_string(&self, name: &str) -> Option<String> {
        self.strings.get(name).map(ToOwned::to_owned)
    }

    /// Localized template for `name` with positional placeholders
    /// substituted from `args`.
    #[must_use]
    pub fn new_tab_string_with(&self, name: &str, args: &[&str]) -> Option<String> {
        self.strings.format(name, args)
    }

    /// Serializable snapshot of the grid: one entry per slot, `None` for an
    /// empty slot, else the JSON form of that site's link payload. Order
    /// and count match the grid.
    ///
    /// # Errors
    ///
    /// `RelayError::SerializeSite` if a link payload cannot be serialized.
    pub fn stringify_sites(&self) -> Result<Vec<Option<String>>, RelayError> {
        self.modules
            .grid
            .sites()
            .iter()
            .map(|slot| {
                slot.as_ref()
                    .map(|site| serde_json::to_string(&site.link))
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(RelayError::from)
    }

    /// Register the relay's own routes with the host and request the
    /// initial state. Runs once the host signals readiness.
    fn announce(&mut self) {
        self.send_to_browser(BrowserCommand::register(MSG_OBSERVE));
        self.send_to_browser(BrowserCommand::register(MSG_STATE));
        self.send_to_browser(BrowserCommand::GetInitialState);
    }

    fn handle_observe(&mut self, data: &Value) {
        let payload: ObservePayload = match serde_json::from_value(data.clone()) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "Malformed observe payload");
                return;
            }
        };
        match TopicUpdate::parse(&payload.topic, &payload.data) {
            Ok(update) => self.observe(update),
            Err(TopicError::UnknownTopic { topic }) => {
                debug!(topic = %topic, "Ignoring unrecognized topic");
            }
            Err(error @ TopicError::Payload { .. }) => {
                warn!(%error, "Dropping observe update");
            }
        }
    }

    fn handle_state(&mut self, data: &Value) {
        match serde_json::from_value::<PageState>(data.clone()) {
            Ok(snapshot) => self.set_state(snapshot),
            Err(error) => warn!(%error, "Malformed state snapshot"),
        }
    }

    fn notify_listeners(&mut self, message: &HostMessage) {
        match self.listeners.get_mut(&message.name) {
            Some(callbacks) => {
                for callback in callbacks.iter_mut() {
                    callback(&message.data);
                }
            }
            None => debug!(name = %message.name, "No listeners for message"),
        }
    }

    fn refresh_thumbnails(&self, url: &str) {
        if !self.modules.grid.ready() {
            return;
        }
        for (slot, site) in self.modules.grid.sites().iter().enumerate() {
            if site.as_ref().is_some_and(|site| site.url == url) {
                self.modules.grid.refresh_thumbnail(slot);
            }
        }
    }

    fn init_page(&mut self) {
        if self.page_initialized {
            return;
        }
        self.page_initialized = true;
        self.modules.page.init();
    }
}
