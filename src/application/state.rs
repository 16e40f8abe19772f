use crate::domain::{BroadcastChannel, Config, EngineEvent, Identity, PeerRecord};
use std::{collections::HashMap, net::IpAddr, sync::Arc};
use tokio::{
    io,
    sync::{RwLock, broadcast},
};
use uuid::Uuid;

/// Shared engine state, explicitly owned and handed to each component so
/// the engine stays testable without a live network.
pub struct AppState {
    config: Config,
    identity: Identity,
    local_ip: IpAddr,
    events: BroadcastChannel<EngineEvent>,
    pub(crate) peers: RwLock<HashMap<Uuid, PeerRecord>>,
}

impl AppState {
    pub async fn new(config: Config) -> io::Result<Arc<Self>> {
        let identity = Identity::load_or_generate(config.display_name.clone()).await?;

        Ok(Self::with_identity(config, identity))
    }

    pub fn with_identity(config: Config, identity: Identity) -> Arc<Self> {
        let local_ip = local_ip_address::local_ip().unwrap_or(IpAddr::from([127, 0, 0, 1]));

        Arc::new(Self {
            config,
            identity,
            local_ip,
            events: BroadcastChannel::new(100),
            peers: Default::default(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn local_ip(&self) -> IpAddr {
        self.local_ip
    }

    /// Fans an event out to all attached consumers. Nobody listening is
    /// fine; the UI subscribes whenever it wants to.
    pub fn publish(&self, event: EngineEvent) {
        let _ = self.events.sender().send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }
}
