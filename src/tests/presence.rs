use crate::{
    application::PeerManager,
    application::network::presence::{Announcement, PresenceService},
    domain::EngineEvent,
    tests::support::{NullBeacon, test_state},
};
use std::net::SocketAddr;
use uuid::Uuid;

#[tokio::test]
async fn announcement_upserts_and_publishes() {
    let state = test_state("local");
    let peers = PeerManager::new(state.clone());
    let service = PresenceService::new(NullBeacon, state.clone(), peers.clone());

    let mut events = state.subscribe();

    let other = Uuid::new_v4();
    let packet = Announcement {
        id: other,
        name: "alice".into(),
        port: 45678,
    };
    let data = serde_json::to_vec(&packet).unwrap();
    let src: SocketAddr = "192.168.1.7:45677".parse().unwrap();

    service.handle_announcement(&data, src).await;

    let record = peers.get(&other).await.unwrap();
    assert_eq!(record.name, "alice");
    assert_eq!(record.addr, src.ip());
    assert_eq!(record.port, 45678);

    match events.try_recv().unwrap() {
        EngineEvent::PeerDiscovered(peer) => assert_eq!(peer.id, other),
        event => panic!("unexpected event: {event:?}"),
    }

    // A repeat announcement refreshes silently.
    service.handle_announcement(&data, src).await;
    assert!(events.try_recv().is_err());
    assert_eq!(peers.snapshot().await.len(), 1);
}

#[tokio::test]
async fn own_announcement_is_ignored() {
    let state = test_state("local");
    let peers = PeerManager::new(state.clone());
    let service = PresenceService::new(NullBeacon, state.clone(), peers.clone());

    let mut events = state.subscribe();

    let packet = Announcement {
        id: state.identity().id,
        name: state.identity().name.clone(),
        port: 45678,
    };
    let data = serde_json::to_vec(&packet).unwrap();

    service
        .handle_announcement(&data, "192.168.1.7:45677".parse().unwrap())
        .await;

    assert!(peers.snapshot().await.is_empty());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn malformed_datagram_is_ignored() {
    let state = test_state("local");
    let peers = PeerManager::new(state.clone());
    let service = PresenceService::new(NullBeacon, state.clone(), peers.clone());

    service
        .handle_announcement(b"\xffgarbage", "192.168.1.7:45677".parse().unwrap())
        .await;

    assert!(peers.snapshot().await.is_empty());
}
