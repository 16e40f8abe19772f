use crate::domain::Message;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Conversations {
    by_peer: HashMap<Uuid, Vec<Message>>,
    seen: HashSet<Uuid>,
}

/// Per-peer message history, append-only, in memory for the process run.
pub struct MessageStore {
    inner: RwLock<Conversations>,
}

impl MessageStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: RwLock::new(Conversations::default()),
        })
    }

    /// Appends to the tail of the peer's conversation. Returns false and
    /// leaves the history untouched when the message id was seen before.
    pub async fn append(&self, peer_id: Uuid, message: Message) -> bool {
        let mut inner = self.inner.write().await;

        if !inner.seen.insert(message.id) {
            return false;
        }

        inner.by_peer.entry(peer_id).or_default().push(message);
        true
    }

    /// Full conversation in append order; empty if none exists yet.
    pub async fn get(&self, peer_id: &Uuid) -> Vec<Message> {
        self.inner
            .read()
            .await
            .by_peer
            .get(peer_id)
            .cloned()
            .unwrap_or_default()
    }
}
