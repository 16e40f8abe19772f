use crate::{
    application::{
        AppState, MessageStore, PeerManager,
        network::transport::interface::{TransportError, TransportInterface, TransportResult},
    },
    domain::{Message, PeerRecord, codec},
};
use std::{net::SocketAddr, path::Path, sync::Arc};
use tokio::fs;
use tracing::info;
use uuid::Uuid;

/// Outbound send path. Blocks the caller until the frame is written to
/// the remote peer or the configured timeout elapses.
pub struct TransportSender<T: TransportInterface> {
    adapter: Arc<T>,
    state: Arc<AppState>,
    peers: Arc<PeerManager>,
    history: Arc<MessageStore>,
}

impl<T: TransportInterface> TransportSender<T> {
    pub fn new(
        adapter: Arc<T>,
        state: Arc<AppState>,
        peers: Arc<PeerManager>,
        history: Arc<MessageStore>,
    ) -> Self {
        Self {
            adapter,
            state,
            peers,
            history,
        }
    }

    pub async fn send_text(&self, to_id: Uuid, content: String) -> TransportResult<Message> {
        let peer = self.resolve(to_id).await?;
        let message = Message::text(self.state.identity(), to_id, content);

        self.dispatch(&peer, message).await
    }

    pub async fn send_file(&self, to_id: Uuid, path: &Path) -> TransportResult<Message> {
        let peer = self.resolve(to_id).await?;

        let contents = fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        let message = Message::file(
            self.state.identity(),
            to_id,
            file_name,
            codec::encode(&contents),
        );

        self.dispatch(&peer, message).await
    }

    async fn resolve(&self, to_id: Uuid) -> TransportResult<PeerRecord> {
        self.peers
            .get(&to_id)
            .await
            .ok_or(TransportError::AddressStale(to_id))
    }

    /// History is appended only after the adapter reports the frame as
    /// written; a failed send leaves no trace in the conversation.
    async fn dispatch(&self, peer: &PeerRecord, message: Message) -> TransportResult<Message> {
        let target = SocketAddr::new(peer.addr, peer.port);
        self.adapter.send(target, &message).await?;

        info!(to = %peer.id, is_file = message.is_file, "⬆️  Message sent");

        self.history.append(message.to_id, message.clone()).await;
        Ok(message)
    }
}
