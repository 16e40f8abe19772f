use crate::utils::fs::config_file;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::{fs, io};

const BEACON_PORT: u16 = 45677;
const TRANSPORT_PORT: u16 = 45678;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides the hostname-derived display name.
    pub display_name: Option<String>,
    pub beacon_port: u16,
    pub transport_port: u16,
    pub beacon_interval_secs: u64,
    /// A peer silent for longer than this disappears from the peer table.
    pub peer_ttl_secs: u64,
    pub send_timeout_secs: u64,
}

impl Config {
    pub async fn init() -> io::Result<Self> {
        let path = config_file()?;

        if path.exists() {
            let contents = fs::read_to_string(path).await?;
            toml::from_str(&contents).map_err(io::Error::other)
        } else {
            let cfg = Self::default();
            let contents = toml::to_string_pretty(&cfg).map_err(io::Error::other)?;

            fs::write(path, contents).await?;
            Ok(cfg)
        }
    }

    pub fn beacon_interval(&self) -> Duration {
        Duration::from_secs(self.beacon_interval_secs)
    }

    pub fn peer_ttl(&self) -> Duration {
        Duration::from_secs(self.peer_ttl_secs)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_name: None,
            beacon_port: BEACON_PORT,
            transport_port: TRANSPORT_PORT,
            beacon_interval_secs: 2,
            peer_ttl_secs: 8,
            send_timeout_secs: 5,
        }
    }
}
