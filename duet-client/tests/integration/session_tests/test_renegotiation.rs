use duet_client::{ClientError, NegotiationState};

use crate::integration::init_tracing;
use crate::utils::{SessionHarness, answer, candidate};

#[tokio::test]
async fn test_renegotiation_reuses_the_peer_link() {
    init_tracing();

    let mut caller = SessionHarness::initiator("r1");
    caller.session.start_as_initiator().await.unwrap();
    caller.signal(&answer("r1", "answer-1")).await.unwrap();
    assert_eq!(caller.state(), NegotiationState::Establishing);

    caller.session.renegotiate().await.unwrap();
    assert_eq!(caller.state(), NegotiationState::OfferSent);

    // Candidates keep applying immediately: a remote description is already in place.
    caller.signal(&candidate("r1", "c1")).await.unwrap();
    assert_eq!(caller.backend.applied_candidates(), vec!["c1"]);

    caller.signal(&answer("r1", "answer-2")).await.unwrap();

    assert_eq!(caller.state(), NegotiationState::Establishing);
    assert_eq!(
        caller.sink.offers().await,
        vec!["caller-offer-1", "caller-offer-2"]
    );
    let log = caller.backend.log();
    assert_eq!(log.links_created, 1);
    assert_eq!(log.media_attached, 1);
    assert_eq!(log.remote_descriptions.len(), 2);
}

#[tokio::test]
async fn test_renegotiation_needs_an_established_session() {
    init_tracing();

    let mut caller = SessionHarness::initiator("r1");

    let idle = caller.session.renegotiate().await;
    assert!(matches!(
        idle,
        Err(ClientError::InvalidState {
            state: NegotiationState::Idle,
            ..
        })
    ));

    caller.session.start_as_initiator().await.unwrap();
    let offer_sent = caller.session.renegotiate().await;
    assert!(matches!(
        offer_sent,
        Err(ClientError::InvalidState {
            state: NegotiationState::OfferSent,
            ..
        })
    ));
    assert_eq!(caller.sink.offers().await.len(), 1);
}
