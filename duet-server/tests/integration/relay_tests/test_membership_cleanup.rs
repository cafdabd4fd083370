use duet_core::RoomId;

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{TestPeer, announce, offer};

#[test]
fn test_disconnect_removes_member_and_empty_room() {
    init_tracing();

    let service = create_test_relay();
    let room = RoomId::new("r1").unwrap();
    let mut a = TestPeer::connect(&service);
    let mut b = TestPeer::connect(&service);

    a.send(&service, &announce("r1")).unwrap();
    b.send(&service, &announce("r1")).unwrap();
    assert_eq!(service.registry().member_count(&room), 2);

    let a_id = a.connection.id();
    service.disconnect(a.connection);
    assert!(!service.is_member(&room, &a_id));
    assert_eq!(service.registry().member_count(&room), 1);

    let delivery = b.send(&service, &offer("r1", "o")).unwrap();
    assert_eq!(delivery.delivered, 0, "departed member gets nothing");

    service.disconnect(b.connection);
    assert_eq!(service.registry().room_count(), 0);
}

#[test]
fn test_rejoin_after_cleanup_starts_fresh_room() {
    init_tracing();

    let service = create_test_relay();
    let room = RoomId::new("r1").unwrap();

    let mut old = TestPeer::connect(&service);
    old.send(&service, &announce("r1")).unwrap();
    service.disconnect(old.connection);
    assert_eq!(service.registry().room_count(), 0);

    let mut fresh = TestPeer::connect(&service);
    let delivery = fresh.send(&service, &announce("r1")).unwrap();

    assert!(delivery.joined);
    assert_eq!(delivery.delivered, 0);
    assert_eq!(service.registry().member_count(&room), 1);
}
