use crate::{
    application::{
        AppState, MessageStore, PeerManager,
        network::{
            presence::{BeaconInterface, PresenceService},
            transport::{
                TransportInterface, TransportReceiver, TransportResult, TransportSender,
            },
        },
    },
    domain::{Config, EngineEvent, Identity, Message, PeerRecord},
    infra::network::{tcp::TcpTransport, udp::UdpBeacon},
};
use std::{path::Path, sync::Arc};
use tokio::{io, sync::broadcast};
use uuid::Uuid;

/// The messaging engine: public API for a UI layer plus the long-running
/// discovery and transport services behind it.
pub struct Engine<B: BeaconInterface, T: TransportInterface> {
    state: Arc<AppState>,
    peers: Arc<PeerManager>,
    history: Arc<MessageStore>,
    presence: PresenceService<B>,
    receiver: TransportReceiver<T>,
    sender: TransportSender<T>,
}

impl Engine<UdpBeacon, TcpTransport> {
    pub async fn new_default(config: Config) -> io::Result<Self> {
        let state = AppState::new(config).await?;

        let beacon = UdpBeacon::new(state.config().beacon_port).await?;
        let transport =
            TcpTransport::new(state.config().transport_port, state.config().send_timeout())
                .await?;

        Ok(Self::new(state, beacon, transport))
    }
}

impl<B: BeaconInterface, T: TransportInterface> Engine<B, T> {
    pub fn new(state: Arc<AppState>, beacon_adapter: B, transport_adapter: T) -> Self {
        let transport_adapter = Arc::new(transport_adapter);

        let peers = PeerManager::new(state.clone());
        let history = MessageStore::new();

        let presence = PresenceService::new(beacon_adapter, state.clone(), peers.clone());
        let receiver = TransportReceiver::new(
            transport_adapter.clone(),
            state.clone(),
            peers.clone(),
            history.clone(),
        );
        let sender = TransportSender::new(
            transport_adapter,
            state.clone(),
            peers.clone(),
            history.clone(),
        );

        Self {
            state,
            peers,
            history,
            presence,
            receiver,
            sender,
        }
    }

    pub fn identity(&self) -> &Identity {
        self.state.identity()
    }

    /// Cheap, non-blocking snapshot of currently-reachable peers; safe to
    /// poll repeatedly.
    pub async fn peers(&self) -> Vec<PeerRecord> {
        self.peers.snapshot().await
    }

    pub async fn messages(&self, peer_id: Uuid) -> Vec<Message> {
        self.history.get(&peer_id).await
    }

    pub async fn send_message(&self, to_id: Uuid, content: String) -> TransportResult<Message> {
        self.sender.send_text(to_id, content).await
    }

    /// Reads the local file, encodes it, then behaves as `send_message`.
    pub async fn send_file(
        &self,
        to_id: Uuid,
        path: impl AsRef<Path>,
    ) -> TransportResult<Message> {
        self.sender.send_file(to_id, path.as_ref()).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.state.subscribe()
    }

    pub async fn run(&self) -> io::Result<()> {
        #[cfg(unix)]
        {
            use tokio::signal::{
                self,
                unix::{SignalKind, signal},
            };
            let ctrl_c = signal::ctrl_c();
            let mut sigterm = signal(SignalKind::terminate()).expect("bind SIGTERM");
            let mut sighup = signal(SignalKind::hangup()).expect("bind SIGHUP");

            tokio::select! {
                res = self._run() => res?,

                _ = ctrl_c => {
                    tracing::info!("🛑 SIGINT");
                }

                _ = sigterm.recv() => {
                    tracing::info!("🛑 SIGTERM");
                }

                _ = sighup.recv() => {
                    tracing::info!("🛑 SIGHUP");
                }
            }
        }

        #[cfg(not(unix))]
        {
            use tokio::signal;

            let ctrl_c = signal::ctrl_c();

            tokio::select! {
                res = self._run() => res?,

                _ = ctrl_c => {
                    tracing::info!("🛑 SIGINT");
                }
            }
        }

        tracing::info!("✅ Patter gracefully shutdown");
        Ok(())
    }

    async fn _run(&self) -> io::Result<()> {
        tracing::info!(
            id = %self.state.identity().id,
            name = %self.state.identity().name,
            ip = %self.state.local_ip(),
            "Patter engine up"
        );

        tokio::try_join!(self.presence.run(), self.receiver.run())?;
        Ok(())
    }
}
