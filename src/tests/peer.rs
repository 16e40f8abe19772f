use crate::{application::PeerManager, domain::PeerRecord, tests::support::test_state};
use std::{
    net::IpAddr,
    time::{Duration, SystemTime},
};
use uuid::Uuid;

fn addr(last: u8) -> IpAddr {
    IpAddr::from([192, 168, 1, last])
}

#[tokio::test]
async fn upsert_keeps_one_record_per_id() {
    let peers = PeerManager::new(test_state("local"));
    let id = Uuid::new_v4();

    assert!(peers.upsert(id, "alice".into(), addr(2), 45678).await);
    assert!(!peers.upsert(id, "alice-renamed".into(), addr(3), 45679).await);

    let snapshot = peers.snapshot().await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "alice-renamed");
    assert_eq!(snapshot[0].addr, addr(3));
    assert_eq!(snapshot[0].port, 45679);
}

#[tokio::test]
async fn snapshot_order_is_stable() {
    let peers = PeerManager::new(test_state("local"));

    for name in ["carol", "alice", "bob"] {
        peers.upsert(Uuid::new_v4(), name.into(), addr(9), 45678).await;
    }

    let names: Vec<String> = peers.snapshot().await.into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);

    let again: Vec<String> = peers.snapshot().await.into_iter().map(|p| p.name).collect();
    assert_eq!(names, again);
}

#[tokio::test]
async fn stale_peer_is_hidden_and_evicted() {
    let state = test_state("local");
    let peers = PeerManager::new(state.clone());

    let fresh = Uuid::new_v4();
    peers.upsert(fresh, "bob".into(), addr(4), 45678).await;

    let ttl = state.config().peer_ttl();
    let mut stale = PeerRecord::new(Uuid::new_v4(), "carol".into(), addr(5), 45678);
    stale.last_seen = SystemTime::now() - (ttl + Duration::from_secs(1));
    let stale_id = stale.id;
    peers.insert(stale).await;

    // Hidden from reads before any sweep has run.
    assert!(peers.get(&stale_id).await.is_none());
    let snapshot = peers.snapshot().await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, fresh);

    let evicted = peers.evict_stale().await;
    assert_eq!(evicted, vec![stale_id]);
    assert!(peers.get(&fresh).await.is_some());
}

#[tokio::test]
async fn touch_refreshes_liveness() {
    let state = test_state("local");
    let peers = PeerManager::new(state.clone());

    let ttl = state.config().peer_ttl();
    let mut record = PeerRecord::new(Uuid::new_v4(), "dave".into(), addr(6), 45678);
    record.last_seen = SystemTime::now() - (ttl + Duration::from_secs(1));
    let id = record.id;
    peers.insert(record).await;

    assert!(peers.get(&id).await.is_none());
    assert!(peers.touch(id).await);
    assert!(peers.get(&id).await.is_some());

    assert!(!peers.touch(Uuid::new_v4()).await);
}
