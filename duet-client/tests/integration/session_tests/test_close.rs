use duet_client::NegotiationState;

use crate::integration::init_tracing;
use crate::utils::{SessionHarness, candidate, offer};

#[tokio::test]
async fn test_close_releases_link_and_discards_queue() {
    init_tracing();

    let mut caller = SessionHarness::initiator("r1");
    caller.session.start_as_initiator().await.unwrap();
    caller.signal(&candidate("r1", "c1")).await.unwrap();
    assert_eq!(caller.session.pending_candidates(), 1);

    caller.session.close().await;

    assert_eq!(caller.state(), NegotiationState::Closed);
    assert_eq!(caller.session.pending_candidates(), 0);
    assert!(!caller.session.has_peer_link());
    assert!(caller.backend.log().closed);
    assert!(caller.backend.applied_candidates().is_empty());
}

#[tokio::test]
async fn test_closed_session_ignores_signals() {
    init_tracing();

    let mut callee = SessionHarness::responder("r1");
    callee.session.close().await;
    callee.session.close().await;

    callee.signal(&offer("r1", "late-offer")).await.unwrap();
    callee.signal(&candidate("r1", "late")).await.unwrap();

    assert_eq!(callee.state(), NegotiationState::Closed);
    assert_eq!(callee.session.pending_candidates(), 0);
    assert!(callee.sink.sent().await.is_empty());
    assert_eq!(callee.backend.log().links_created, 0);
}
