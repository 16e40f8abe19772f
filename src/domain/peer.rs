use serde::Serialize;
use std::{
    net::IpAddr,
    time::{Duration, SystemTime},
};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct PeerRecord {
    pub id: Uuid,
    pub name: String,
    pub addr: IpAddr,
    pub port: u16,
    pub last_seen: SystemTime,
}

impl PeerRecord {
    pub fn new(id: Uuid, name: String, addr: IpAddr, port: u16) -> Self {
        Self {
            id,
            name,
            addr,
            port,
            last_seen: SystemTime::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.last_seen.elapsed().unwrap_or_default()
    }
}
