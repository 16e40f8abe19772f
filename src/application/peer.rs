use crate::{application::AppState, domain::PeerRecord};
use std::{net::IpAddr, sync::Arc, time::SystemTime};
use tracing::info;
use uuid::Uuid;

pub struct PeerManager {
    state: Arc<AppState>,
}

impl PeerManager {
    pub fn new(state: Arc<AppState>) -> Arc<Self> {
        Arc::new(Self { state })
    }

    /// Insert-or-refresh by id. Returns true when the peer was not known.
    pub async fn upsert(&self, id: Uuid, name: String, addr: IpAddr, port: u16) -> bool {
        let mut peers = self.state.peers.write().await;

        if let Some(peer) = peers.get_mut(&id) {
            peer.name = name;
            peer.addr = addr;
            peer.port = port;
            peer.last_seen = SystemTime::now();
            false
        } else {
            info!("🟢 Peer discovered: {name} ({id})");
            peers.insert(id, PeerRecord::new(id, name, addr, port));
            true
        }
    }

    pub async fn insert(&self, peer: PeerRecord) {
        self.state.peers.write().await.insert(peer.id, peer);
    }

    /// Refreshes last_seen only. An inbound message is as good as an
    /// announcement for liveness.
    pub async fn touch(&self, id: Uuid) -> bool {
        match self.state.peers.write().await.get_mut(&id) {
            Some(peer) => {
                peer.last_seen = SystemTime::now();
                true
            }
            None => false,
        }
    }

    /// Returns the record only while it is fresh. Staleness applies here
    /// lazily even if the background sweep has not run yet.
    pub async fn get(&self, id: &Uuid) -> Option<PeerRecord> {
        let ttl = self.state.config().peer_ttl();

        self.state
            .peers
            .read()
            .await
            .get(id)
            .filter(|peer| peer.age() <= ttl)
            .cloned()
    }

    /// All currently-reachable peers, sorted by name then id so a single
    /// snapshot has a stable order and no duplicate ids.
    pub async fn snapshot(&self) -> Vec<PeerRecord> {
        let ttl = self.state.config().peer_ttl();

        let mut peers: Vec<PeerRecord> = self
            .state
            .peers
            .read()
            .await
            .values()
            .filter(|peer| peer.age() <= ttl)
            .cloned()
            .collect();

        peers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        peers
    }

    /// Removes every record older than the TTL and returns their ids.
    pub async fn evict_stale(&self) -> Vec<Uuid> {
        let ttl = self.state.config().peer_ttl();
        let mut peers = self.state.peers.write().await;

        let expired: Vec<Uuid> = peers
            .values()
            .filter(|peer| peer.age() > ttl)
            .map(|peer| peer.id)
            .collect();

        for id in &expired {
            peers.remove(id);
            info!("🔴 Peer expired: {id}");
        }

        expired
    }
}
