use crate::{
    application::{
        AppState, PeerManager,
        network::presence::interface::{Announcement, BeaconInterface},
    },
    domain::EngineEvent,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::{io, time};
use tracing::{debug, warn};

/// Makes this node's presence known and keeps the peer table alive:
/// a periodic announce loop, a receive loop, and a staleness sweep.
pub struct PresenceService<B: BeaconInterface> {
    adapter: B,
    state: Arc<AppState>,
    peers: Arc<PeerManager>,
}

impl<B: BeaconInterface> PresenceService<B> {
    pub fn new(adapter: B, state: Arc<AppState>, peers: Arc<PeerManager>) -> Self {
        Self {
            adapter,
            state,
            peers,
        }
    }

    pub async fn run(&self) -> io::Result<()> {
        tokio::try_join!(self.run_announce(), self.run_recv(), self.run_sweep())?;
        Ok(())
    }

    /// Transient send failures are logged and retried next cycle;
    /// beaconing never halts.
    async fn run_announce(&self) -> io::Result<()> {
        let interval = self.state.config().beacon_interval();

        loop {
            match serde_json::to_vec(&self.announcement()) {
                Ok(data) => {
                    if let Err(err) = self.adapter.broadcast(&data).await {
                        warn!("Beacon send error: {err}");
                    }
                }
                Err(err) => warn!("Beacon encode error: {err}"),
            }

            time::sleep(interval).await;
        }
    }

    async fn run_recv(&self) -> io::Result<()> {
        loop {
            match self.adapter.recv().await {
                Ok((data, src)) => self.handle_announcement(&data, src).await,
                Err(err) => {
                    warn!("Beacon recv error: {err}");
                    // Back off so a wedged socket does not spin the loop.
                    time::sleep(Duration::from_millis(200)).await;
                }
            }
        }
    }

    async fn run_sweep(&self) -> io::Result<()> {
        let interval = self.state.config().beacon_interval();

        loop {
            time::sleep(interval).await;

            for id in self.peers.evict_stale().await {
                self.state.publish(EngineEvent::PeerExpired(id));
            }
        }
    }

    pub async fn handle_announcement(&self, data: &[u8], src: SocketAddr) {
        let Ok(packet) = serde_json::from_slice::<Announcement>(data) else {
            debug!(src = %src, "Ignoring malformed announcement");
            return;
        };

        // Our own broadcasts loop back through the same socket.
        if packet.id == self.state.identity().id {
            return;
        }

        let is_new = self
            .peers
            .upsert(packet.id, packet.name, src.ip(), packet.port)
            .await;

        if is_new && let Some(record) = self.peers.get(&packet.id).await {
            self.state.publish(EngineEvent::PeerDiscovered(record));
        }
    }

    fn announcement(&self) -> Announcement {
        let identity = self.state.identity();

        Announcement {
            id: identity.id,
            name: identity.name.clone(),
            port: self.state.config().transport_port,
        }
    }
}
