use crate::{
    application::AppState,
    application::network::presence::BeaconInterface,
    domain::{Config, Identity},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::io;

/// Beacon adapter that announces into the void and never hears anything,
/// so engine tests run without touching the network.
pub struct NullBeacon;

impl BeaconInterface for NullBeacon {
    async fn broadcast(&self, _data: &[u8]) -> io::Result<()> {
        Ok(())
    }

    async fn recv(&self) -> io::Result<(Vec<u8>, SocketAddr)> {
        Ok(std::future::pending().await)
    }
}

pub fn test_state(name: &str) -> Arc<AppState> {
    AppState::with_identity(Config::default(), Identity::generate(name))
}
