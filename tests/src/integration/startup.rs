//! # Startup Handshake
//!
//! Exercises the full startup sequence over real channels:
//!
//! 1. Host signals `NewTab:CommandReady`
//! 2. Relay registers `NewTab:Observe` then `NewTab:State`
//! 3. Relay requests the initial state
//! 4. Host answers with a `NewTab:State` snapshot
//! 5. Relay seeds its state and initializes the page exactly once

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tokio::time::timeout;

    use newtab_relay::testing::RecordingModules;
    use newtab_relay::{command_channel, host_channel, PageRelay, StringBundle};
    use newtab_types::envelope::{MSG_COMMAND_READY, MSG_OBSERVE, MSG_STATE};
    use newtab_types::{BrowserCommand, HostMessage, PageState};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// The snapshot the scripted host answers with.
    fn initial_snapshot() -> PageState {
        PageState {
            enabled: true,
            enhanced: false,
            rows: 3,
            columns: 4,
            private_browsing_mode: false,
            intro_shown: true,
        }
    }

    // =========================================================================
    // STARTUP SEQUENCE
    // =========================================================================

    #[tokio::test]
    async fn test_startup_command_order_on_the_wire() {
        let (to_page, from_host) = host_channel();
        let (to_browser, mut from_page) = command_channel();
        let recording = RecordingModules::new();
        let mut relay = PageRelay::new(to_browser, recording.modules(), StringBundle::default());

        // Scripted host: signal readiness, then answer the state request and
        // hang up.
        let host = tokio::spawn(async move {
            to_page.send(HostMessage::signal(MSG_COMMAND_READY)).unwrap();

            let mut received = Vec::new();
            while let Some(command) = from_page.recv().await {
                let is_state_request = command == BrowserCommand::GetInitialState;
                received.push(command);
                if is_state_request {
                    to_page
                        .send(HostMessage::new(
                            MSG_STATE,
                            serde_json::to_value(initial_snapshot()).unwrap(),
                        ))
                        .unwrap();
                    break;
                }
            }
            received
        });

        // The relay loop ends when the host drops its sender.
        timeout(Duration::from_secs(1), relay.run(from_host))
            .await
            .expect("relay loop should finish once the host hangs up");

        let received = timeout(Duration::from_secs(1), host)
            .await
            .expect("host task should finish")
            .expect("host task should not panic");

        assert_eq!(
            received,
            vec![
                BrowserCommand::register(MSG_OBSERVE),
                BrowserCommand::register(MSG_STATE),
                BrowserCommand::GetInitialState,
            ]
        );

        // The snapshot was applied and the page came up exactly once.
        assert_eq!(*relay.state(), initial_snapshot());
        assert_eq!(recording.page.init_count(), 1);
        assert_eq!(recording.page.attribute_updates(), vec![true]);
        assert_eq!(relay.commands_sent(), 3);
    }

    #[tokio::test]
    async fn test_later_enable_does_not_reinit_page() {
        let (to_page, from_host) = host_channel();
        let (to_browser, mut from_page) = command_channel();
        let recording = RecordingModules::new();
        let mut relay = PageRelay::new(to_browser, recording.modules(), StringBundle::default());

        let host = tokio::spawn(async move {
            to_page.send(HostMessage::signal(MSG_COMMAND_READY)).unwrap();
            while let Some(command) = from_page.recv().await {
                if command == BrowserCommand::GetInitialState {
                    to_page
                        .send(HostMessage::new(
                            MSG_STATE,
                            serde_json::to_value(initial_snapshot()).unwrap(),
                        ))
                        .unwrap();
                    break;
                }
            }
            // The pref flips off and on again after startup.
            for enabled in [false, true] {
                to_page
                    .send(HostMessage::new(
                        MSG_OBSERVE,
                        serde_json::json!({
                            "topic": "browser.newtabpage.enabled",
                            "data": enabled
                        }),
                    ))
                    .unwrap();
            }
        });

        timeout(Duration::from_secs(1), relay.run(from_host))
            .await
            .expect("relay loop should finish once the host hangs up");
        host.await.expect("host task should not panic");

        assert!(relay.state().enabled);
        assert_eq!(recording.page.init_count(), 1);
        assert_eq!(recording.undo.hide_count(), 1);
    }

    #[tokio::test]
    async fn test_disabled_snapshot_still_initializes_page() {
        let (to_page, from_host) = host_channel();
        let (to_browser, _from_page) = command_channel();
        let recording = RecordingModules::new();
        let mut relay = PageRelay::new(to_browser, recording.modules(), StringBundle::default());

        let snapshot = PageState {
            enabled: false,
            ..initial_snapshot()
        };
        to_page
            .send(HostMessage::new(
                MSG_STATE,
                serde_json::to_value(snapshot).unwrap(),
            ))
            .unwrap();
        drop(to_page);

        timeout(Duration::from_secs(1), relay.run(from_host))
            .await
            .expect("relay loop should finish");

        assert!(!relay.state().enabled);
        assert_eq!(recording.page.init_count(), 1);
        assert_eq!(recording.undo.hide_count(), 1);
    }
}
