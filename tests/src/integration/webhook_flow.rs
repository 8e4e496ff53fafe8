//! # Webhook Flow
//!
//! Full receiver pipeline behind the axum router, driven with
//! `tower::ServiceExt::oneshot`.
//!
//! ```text
//! Partner ──POST──► webhook_router ──► SignedMessageVerifier
//!                          │ 204
//!                          └─spawn──► parse_event ──► InMemoryEventBus ──► listeners
//! ```

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::Router;
    use tokio::time::timeout;
    use tower::ServiceExt;

    use fsb_01_signature_verification::{
        ManualTimeSource, ReplayTracking, SignedMessageVerifier, VerifierOptions,
    };
    use fsb_03_webhook_gateway::{headers, webhook_router, WebhookState};
    use shared_bus::InMemoryEventBus;
    use shared_types::{epoch_anchor, EventType, FsbEvent, ProductFlag};

    use crate::fixtures::{announcement_body, ping_body, product_updated_body, Partner};

    const ROUTE: &str = "/webhooks/freestuff";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Receiver {
        app: Router,
        bus: Arc<InMemoryEventBus>,
        verifier: Arc<SignedMessageVerifier>,
    }

    fn receiver(partner: &Partner, options: impl FnOnce(VerifierOptions) -> VerifierOptions) -> Receiver {
        let verifier = Arc::new(
            SignedMessageVerifier::new(options(VerifierOptions::new(partner.verifying_key())))
                .unwrap(),
        );
        let bus = Arc::new(InMemoryEventBus::new());
        let state = WebhookState::new(verifier.clone(), bus.clone());
        Receiver {
            app: webhook_router(state, ROUTE).unwrap(),
            bus,
            verifier,
        }
    }

    async fn text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_ping_reaches_listener() {
        let partner = Partner::new(1);
        let rx = receiver(&partner, |o| o);
        let mut pings = rx.bus.subscribe(EventType::Ping);

        let response = rx
            .app
            .oneshot(partner.request(ROUTE, "ping-1", &ping_body(true)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let event = timeout(Duration::from_secs(1), pings.recv())
            .await
            .expect("timeout")
            .expect("event");
        assert!(matches!(event, FsbEvent::Ping { ref data, .. } if data.manual));
    }

    /// Offset `"100"` on a clock a few seconds past it.
    #[tokio::test]
    async fn test_known_ping_at_fixed_offset() {
        let partner = Partner::new(9);
        let clock = Arc::new(ManualTimeSource::new(
            epoch_anchor() + chrono::Duration::seconds(100) + chrono::Duration::seconds(5),
        ));
        let verifier = Arc::new(
            SignedMessageVerifier::with_time_source(
                VerifierOptions::new(partner.verifying_key()),
                clock,
            )
            .unwrap(),
        );
        let bus = Arc::new(InMemoryEventBus::new());
        let app = webhook_router(WebhookState::new(verifier, bus.clone()), ROUTE).unwrap();
        let mut pings = bus.subscribe(EventType::Ping);

        let body = r#"{"type":"fsb:event:ping","timestamp":100,"data":{"manual":true}}"#;
        let response = app
            .oneshot(partner.request_at(ROUTE, "m1", "100", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let event = timeout(Duration::from_secs(1), pings.recv())
            .await
            .expect("timeout")
            .expect("event");
        let FsbEvent::Ping { timestamp, data } = event else {
            panic!("expected ping");
        };
        assert!(data.manual);
        assert_eq!(timestamp, epoch_anchor() + chrono::Duration::seconds(100));
    }

    #[tokio::test]
    async fn test_product_update_flags_survive_pipeline() {
        let partner = Partner::new(2);
        let rx = receiver(&partner, |o| o);
        let mut updates = rx.bus.subscribe(EventType::ProductUpdated);

        // STAFF_PICK | TRASH
        let body = product_updated_body(321, 0b01001);
        let response = rx
            .app
            .oneshot(partner.request(ROUTE, "product-1", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let event = timeout(Duration::from_secs(1), updates.recv())
            .await
            .expect("timeout")
            .expect("event");
        let FsbEvent::ProductUpdated { data, .. } = event else {
            panic!("expected product_updated");
        };
        assert_eq!(data.id, 321);
        assert!(data.flags.has(ProductFlag::Trash));
        assert!(data.flags.has(ProductFlag::StaffPick));
        assert!(!data.flags.has(ProductFlag::Thirdparty));
        assert_eq!(data.until, None);
    }

    #[tokio::test]
    async fn test_announcement_and_once_listener() {
        let partner = Partner::new(3);
        let rx = receiver(&partner, |o| o);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        rx.bus.once(EventType::AnnouncementCreated, move |event| {
            if let FsbEvent::AnnouncementCreated { data, .. } = event {
                counter.fetch_add(data.resolved_products.len(), Ordering::SeqCst);
            }
        });
        let mut announcements = rx.bus.subscribe(EventType::AnnouncementCreated);

        for (i, ids) in [vec![1, 2, 3], vec![4]].into_iter().enumerate() {
            let response = rx
                .app
                .clone()
                .oneshot(partner.request(ROUTE, &format!("ann-{i}"), &announcement_body(&ids)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
            timeout(Duration::from_secs(1), announcements.recv())
                .await
                .expect("timeout")
                .expect("event");
        }

        // Only the first announcement reached the once-listener.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_listener_panic_does_not_block_others() {
        let partner = Partner::new(4);
        let rx = receiver(&partner, |o| o);
        rx.bus.on(EventType::Ping, |_| panic!("listener bug"));
        let mut pings = rx.bus.subscribe(EventType::Ping);

        let response = rx
            .app
            .oneshot(partner.request(ROUTE, "ping-panic", &ping_body(false)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let event = timeout(Duration::from_secs(1), pings.recv()).await;
        assert!(matches!(event, Ok(Some(FsbEvent::Ping { .. }))));
    }

    #[tokio::test]
    async fn test_compatibility_mismatch_after_verification() {
        let partner = Partner::new(5);
        let rx = receiver(&partner, |o| o);
        let mut pings = rx.bus.subscribe(EventType::Ping);

        let mut request = partner.request(ROUTE, "compat-1", &ping_body(true));
        request
            .headers_mut()
            .insert(headers::COMPATIBILITY_DATE, "2025-01-01".parse().unwrap());

        let response = rx.app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(text(response).await, "Incompatible compatibility date");

        // Verification ran first, so the id is spent.
        assert_eq!(rx.verifier.replay_cache_len(), 1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(matches!(pings.try_recv(), Ok(None)));
    }

    #[tokio::test]
    async fn test_legacy_tracking_accepts_replays() {
        let partner = Partner::new(6);
        let rx = receiver(&partner, |o| o.with_replay_tracking(ReplayTracking::Legacy));

        for _ in 0..2 {
            let response = rx
                .app
                .clone()
                .oneshot(partner.request(ROUTE, "legacy-1", &ping_body(false)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }
        assert_eq!(rx.verifier.replay_cache_len(), 0);
    }

    #[tokio::test]
    async fn test_wrong_partner_key() {
        let partner = Partner::new(7);
        let impostor = Partner::new(8);
        let rx = receiver(&partner, |o| o);

        let response = rx
            .app
            .oneshot(impostor.request(ROUTE, "forged-1", &ping_body(true)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(text(response).await, "Verification failed: invalid-signature");
    }
}
