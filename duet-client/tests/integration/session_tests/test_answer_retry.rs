use duet_client::{ClientError, LinkEvent, NegotiationState};

use crate::integration::init_tracing;
use crate::utils::{SessionHarness, offer};

#[tokio::test]
async fn test_unsent_answer_leaves_callee_awaiting_remote() {
    init_tracing();

    let mut callee = SessionHarness::responder("r1");
    callee.sink.fail_next_sends(1);

    let result = callee.signal(&offer("r1", "offer-1")).await;

    assert!(matches!(result, Err(ClientError::RelayClosed)));
    assert_eq!(callee.state(), NegotiationState::AwaitingRemote);
    assert!(callee.sink.answers().await.is_empty());
    assert_eq!(callee.backend.log().remote_descriptions.len(), 1);
}

#[tokio::test]
async fn test_retried_offer_settles_connected_after_early_track() {
    init_tracing();

    let mut callee = SessionHarness::responder("r1");
    callee.sink.fail_next_sends(1);
    assert!(callee.signal(&offer("r1", "offer-1")).await.is_err());

    callee
        .link_tx
        .send(LinkEvent::RemoteTrack {
            stream_id: "s1".to_owned(),
            media: "s1-playback".to_owned(),
        })
        .unwrap();
    let results = callee.pump_link_events().await;
    assert!(results.iter().all(|r| r.is_ok()));
    assert!(callee.session.remote_media_surfaced());
    assert_eq!(callee.state(), NegotiationState::AwaitingRemote);

    callee.signal(&offer("r1", "offer-2")).await.unwrap();

    assert_eq!(callee.state(), NegotiationState::Connected);
    assert_eq!(callee.sink.answers().await.len(), 1);
    assert_eq!(callee.remote_media_events(), 1);
    assert_eq!(callee.backend.log().links_created, 1);
}
