//! Integration tests for events

#[cfg(test)]
mod tests {
    use irrpkg_events::*;

    #[tokio::test]
    async fn test_event_sender_emit() {
        let (tx, mut rx) = channel();

        tx.emit_error("test error");
        tx.emit_debug("test debug");

        let event1 = rx.recv().await.unwrap();
        assert!(matches!(event1, AppEvent::General(GeneralEvent::Error { .. })));
        assert_eq!(event1.log_level(), tracing::Level::ERROR);

        let event2 = rx.recv().await.unwrap();
        assert!(matches!(
            event2,
            AppEvent::General(GeneralEvent::DebugLog { .. })
        ));
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_warning("ignored");
    }

    #[test]
    fn test_testing_channel_is_a_warning() {
        let event = AppEvent::Recipe(RecipeEvent::RequirementDeclared {
            recipe: "irrlicht-engine".to_string(),
            reference: "irrlicht/1.8.4@mpusz/testing".to_string(),
            transitive_headers: true,
            transitive_libs: true,
            testing_channel: true,
        });
        assert_eq!(event.log_level(), tracing::Level::WARN);
        assert_eq!(event.log_target(), "irrpkg::events::recipe");
    }

    #[test]
    fn test_event_serialization_tags() {
        let event = AppEvent::Package(PackageEvent::DirectoryPruned {
            path: "/pkg/lib/cmake".into(),
            existed: true,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "package");
        assert_eq!(json["event"]["type"], "DirectoryPruned");
    }
}
