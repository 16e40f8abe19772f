use crate::{
    application::{
        AppState, MessageStore, PeerManager,
        network::transport::interface::{TransportInterface, TransportResult},
    },
    domain::{EngineEvent, Message},
};
use std::{sync::Arc, time::Duration};
use tokio::{io, time};
use tracing::{debug, info, warn};

/// Inbound demultiplexer: accepts connections, drains each on its own
/// task, and feeds history and the event bridge.
pub struct TransportReceiver<T: TransportInterface> {
    adapter: Arc<T>,
    state: Arc<AppState>,
    peers: Arc<PeerManager>,
    history: Arc<MessageStore>,
}

impl<T: TransportInterface> Clone for TransportReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
            state: self.state.clone(),
            peers: self.peers.clone(),
            history: self.history.clone(),
        }
    }
}

impl<T: TransportInterface> TransportReceiver<T> {
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

    /// Listener loop for the process lifetime. Each accepted connection
    /// gets its own task, so a stalled or half-open peer cannot hold up
    /// delivery from the others.
    pub async fn run(&self) -> io::Result<()> {
        loop {
            match self.adapter.accept().await {
                Ok((stream, _src)) => {
                    let receiver = self.clone();

                    tokio::spawn(async move {
                        if let Err(err) = receiver.drain(stream).await {
                            warn!("Inbound transport error: {err}");
                        }
                    });
                }
                Err(err) => {
                    warn!("Inbound accept error: {err}");
                    // Back off so a wedged listener does not spin the loop.
                    time::sleep(Duration::from_millis(200)).await;
                }
            }
        }
    }

    /// Accepts one connection and drains it on the caller's task.
    pub async fn poll_once(&self) -> TransportResult<()> {
        let (stream, _src) = self.adapter.accept().await?;
        self.drain(stream).await
    }

    /// Drains one connection's frames. Frames on a single connection
    /// reach the store in send order.
    async fn drain(&self, mut stream: T::Stream) -> TransportResult<()> {
        while let Some(message) = self.adapter.read_message(&mut stream).await? {
            self.handle_message(message).await;
        }

        Ok(())
    }

    pub async fn handle_message(&self, message: Message) {
        if message.to_id != self.state.identity().id {
            debug!(to = %message.to_id, "Message addressed to another node");
        }

        self.peers.touch(message.from_id).await;

        if self.history.append(message.from_id, message.clone()).await {
            info!(from = %message.from_id, is_file = message.is_file, "📨 Message received");
            self.state.publish(EngineEvent::MessageReceived(message));
        } else {
            debug!(id = %message.id, "Dropped duplicate message");
        }
    }
}
