use duet_client::Role;
use duet_core::MessageKind;

use crate::integration::init_tracing;
use crate::utils::{MockBackend, SessionHarness};

#[tokio::test]
async fn test_gathered_candidates_follow_the_offer_to_the_relay() {
    init_tracing();

    let backend = MockBackend::new("caller").with_local_candidates(&["l1", "l2"]);
    let mut caller = SessionHarness::with_role(backend, "r1", Role::Initiator);

    caller.session.start_as_initiator().await.unwrap();
    let results = caller.pump_link_events().await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(
        caller.sink.kinds().await,
        vec![
            MessageKind::Offer,
            MessageKind::IceCandidate,
            MessageKind::IceCandidate
        ]
    );
    assert_eq!(caller.sink.candidates().await, vec!["l1", "l2"]);
    assert!(
        caller
            .sink
            .sent()
            .await
            .iter()
            .all(|m| m.room_id.as_str() == "r1")
    );
}
