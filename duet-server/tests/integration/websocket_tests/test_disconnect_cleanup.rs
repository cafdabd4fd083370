use std::time::Duration;

use duet_core::RoomId;

use crate::integration::{init_tracing, spawn_test_server};
use crate::utils::{WsTestClient, announce};

async fn wait_for_room_count(server: &crate::integration::TestServer, expected: usize) -> bool {
    for _ in 0..50 {
        if server.service.registry().room_count() == expected {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn test_closing_sockets_empties_rooms() {
    init_tracing();

    let server = spawn_test_server().await;
    let room = RoomId::new("r1").unwrap();
    let mut a = WsTestClient::connect(server.addr).await.expect("connect A");
    let mut b = WsTestClient::connect(server.addr).await.expect("connect B");

    a.send_text(&announce("r1")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    b.send_text(&announce("r1")).await.unwrap();
    a.recv_text().await.unwrap();
    assert_eq!(server.service.registry().member_count(&room), 2);

    a.close().await.unwrap();
    for _ in 0..50 {
        if server.service.registry().member_count(&room) == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(server.service.registry().member_count(&room), 1);

    b.close().await.unwrap();
    assert!(wait_for_room_count(&server, 0).await, "empty room is deleted");
}
