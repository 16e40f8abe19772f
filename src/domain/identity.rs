use crate::utils::fs::device_id_file;
use serde::Serialize;
use tokio::{fs, io};
use uuid::Uuid;

/// This node's stable id and display name, fixed for the process lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
}

impl Identity {
    /// Loads the persisted device id, generating one on first run. The
    /// display name defaults to the machine hostname unless overridden.
    pub async fn load_or_generate(name_override: Option<String>) -> io::Result<Self> {
        let file = device_id_file()?;

        let id = if file.exists() {
            let contents = fs::read_to_string(&file).await?;
            Uuid::parse_str(contents.trim()).map_err(io::Error::other)?
        } else {
            let id = Uuid::new_v4();
            fs::write(&file, id.to_string()).await?;
            id
        };

        Ok(Self {
            id,
            name: name_override.unwrap_or_else(default_name),
        })
    }

    /// Fresh throwaway identity, not persisted anywhere.
    pub fn generate(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

fn default_name() -> String {
    let hostname = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "anonymous".to_string());

    hostname
        .strip_suffix(".local")
        .unwrap_or(&hostname)
        .to_string()
}
