use duet_client::{ClientError, NegotiationState};
use duet_core::ProtocolError;

use crate::integration::init_tracing;
use crate::utils::{SessionHarness, candidate, offer};

#[tokio::test]
async fn test_messages_for_other_rooms_are_ignored() {
    init_tracing();

    let mut callee = SessionHarness::responder("r1");

    let result = callee.signal(&offer("r2", "foreign-offer")).await;
    assert!(matches!(result, Err(ClientError::Routing { .. })));

    let result = callee.signal(&candidate("r2", "c1")).await;
    assert!(matches!(result, Err(ClientError::Routing { .. })));

    assert_eq!(callee.state(), NegotiationState::Idle);
    assert_eq!(callee.session.pending_candidates(), 0);
    assert!(!callee.session.has_peer_link());
    assert!(callee.sink.sent().await.is_empty());
}

#[tokio::test]
async fn test_malformed_messages_leave_session_untouched() {
    init_tracing();

    let mut callee = SessionHarness::responder("r1");
    callee.signal(&candidate("r1", "c1")).await.unwrap();

    let garbage = callee.signal("not json at all").await;
    assert!(matches!(
        garbage,
        Err(ClientError::Protocol(ProtocolError::Malformed(_)))
    ));

    let no_room = callee.signal(r#"{"offer":{"type":"offer","sdp":"x"}}"#).await;
    assert!(matches!(
        no_room,
        Err(ClientError::Protocol(ProtocolError::MissingRoomId))
    ));

    let mixed = callee
        .signal(r#"{"roomId":"r1","offer":{"type":"offer","sdp":"o"},"answer":{"type":"answer","sdp":"a"}}"#)
        .await;
    assert!(matches!(
        mixed,
        Err(ClientError::Protocol(ProtocolError::AmbiguousPayload))
    ));

    assert_eq!(callee.state(), NegotiationState::Idle);
    assert_eq!(callee.session.pending_candidates(), 1);
    assert!(callee.sink.sent().await.is_empty());
}
