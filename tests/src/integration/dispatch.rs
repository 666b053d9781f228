//! # Listener Dispatch
//!
//! Exercises the listener registry against the live relay: fan-out order,
//! duplicate registrations, unrecognized topics, and the fire-and-forget
//! outbound contract.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use serde_json::json;

    use newtab_relay::testing::{RecordingGrid, RecordingModules};
    use newtab_relay::{command_channel, PageRelay, StringBundle};
    use newtab_types::envelope::MSG_OBSERVE;
    use newtab_types::{BrowserCommand, HostMessage, PageState, Site};

    fn relay_with(
        recording: &RecordingModules,
    ) -> (
        PageRelay,
        tokio::sync::mpsc::UnboundedReceiver<BrowserCommand>,
    ) {
        let (to_browser, from_page) = command_channel();
        let relay = PageRelay::new(to_browser, recording.modules(), StringBundle::default());
        (relay, from_page)
    }

    #[test]
    fn test_fan_out_preserves_registration_order() {
        let recording = RecordingModules::new();
        let (mut relay, mut from_page) = relay_with(&recording);

        let order = Arc::new(Mutex::new(Vec::new()));
        for label in ["grid", "undo", "customize"] {
            let order = order.clone();
            relay.register_listener("NewTab:PinState", move |_| order.lock().push(label));
        }

        relay.handle_message(HostMessage::new("NewTab:PinState", json!({ "pinned": [] })));

        assert_eq!(*order.lock(), vec!["grid", "undo", "customize"]);

        // One registration command per listener, in order.
        for _ in 0..3 {
            assert!(matches!(
                from_page.try_recv().unwrap(),
                BrowserCommand::Register { topic } if topic == "NewTab:PinState"
            ));
        }
        assert!(from_page.try_recv().is_err());
    }

    #[test]
    fn test_listener_receives_payload_once_per_message() {
        let recording = RecordingModules::new();
        let (mut relay, _from_page) = relay_with(&recording);

        let payloads = Arc::new(Mutex::new(Vec::new()));
        let sink = payloads.clone();
        relay.register_listener("NewTab:PinState", move |data| {
            sink.lock().push(data.clone());
        });

        relay.handle_message(HostMessage::new("NewTab:PinState", json!(1)));
        relay.handle_message(HostMessage::new("NewTab:PinState", json!(2)));

        assert_eq!(*payloads.lock(), vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_unrecognized_topic_leaves_state_untouched() {
        let recording = RecordingModules::new();
        let (mut relay, _from_page) = relay_with(&recording);

        relay.handle_message(HostMessage::new(
            MSG_OBSERVE,
            json!({ "topic": "browser.newtabpage.someday", "data": 12 }),
        ));

        assert_eq!(*relay.state(), PageState::default());
        assert_eq!(recording.page.init_count(), 0);
    }

    #[test]
    fn test_send_failure_never_reaches_listeners() {
        let recording = RecordingModules::new();
        let (mut relay, from_page) = relay_with(&recording);
        drop(from_page);

        let hits = Arc::new(Mutex::new(0u32));
        let sink = hits.clone();
        // Registration tries to notify a host that is gone; the listener
        // must still be live.
        relay.register_listener("NewTab:PinState", move |_| *sink.lock() += 1);
        relay.handle_message(HostMessage::new("NewTab:PinState", json!(null)));

        assert_eq!(*hits.lock(), 1);
        assert_eq!(relay.commands_sent(), 0);
    }

    #[test]
    fn test_observe_and_listeners_share_one_envelope() {
        let recording = RecordingModules::new();
        let (mut relay, _from_page) = relay_with(&recording);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        relay.register_listener(MSG_OBSERVE, move |data| sink.lock().push(data.clone()));

        let envelope = json!({ "topic": "browser.newtabpage.rows", "data": 6 });
        relay.handle_message(HostMessage::new(MSG_OBSERVE, envelope.clone()));

        // The dispatch table applied the update and the listener saw the
        // same payload.
        assert_eq!(relay.state().rows, 6);
        assert_eq!(*seen.lock(), vec![envelope]);
    }

    #[test]
    fn test_grid_snapshot_after_live_updates() {
        let link = json!({ "url": "https://example.com/", "title": "Example" });
        let grid = RecordingGrid::ready_with_slots(vec![
            None,
            Some(Site::new("https://example.com/", link.clone())),
        ]);
        let recording = RecordingModules::with_grid(grid);
        let (mut relay, _from_page) = relay_with(&recording);

        relay.handle_message(HostMessage::new(
            MSG_OBSERVE,
            json!({ "topic": "page-thumbnail:create", "data": "https://example.com/" }),
        ));

        assert_eq!(recording.grid.refreshed(), vec![1]);
        let snapshot = relay.stringify_sites().expect("links are serializable");
        assert_eq!(snapshot[0], None);
        assert_eq!(snapshot[1], Some(serde_json::to_string(&link).unwrap()));
    }
}
