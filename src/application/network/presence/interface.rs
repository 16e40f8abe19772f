use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::io;
use uuid::Uuid;

pub trait BeaconInterface {
    async fn broadcast(&self, data: &[u8]) -> io::Result<()>;

    async fn recv(&self) -> io::Result<(Vec<u8>, SocketAddr)>;
}

/// Discovery datagram announcing a node on the local segment. The sender
/// address is taken from the datagram itself; only the transport port
/// travels in the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub name: String,
    pub port: u16,
}
