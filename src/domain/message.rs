use crate::domain::Identity;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// One chat message. This struct is also the wire payload: a file
/// transfer is a message with `is_file` set and the encoded bytes in
/// `file_data`, a text message carries neither file field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub from_id: Uuid,
    pub from_name: String,
    pub to_id: Uuid,
    pub content: String,
    pub timestamp: i64,
    pub is_file: bool,
    pub file_name: Option<String>,
    pub file_data: Option<String>,
}

impl Message {
    pub fn text(from: &Identity, to_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_id: from.id,
            from_name: from.name.clone(),
            to_id,
            content,
            timestamp: unix_millis(),
            is_file: false,
            file_name: None,
            file_data: None,
        }
    }

    pub fn file(from: &Identity, to_id: Uuid, file_name: String, file_data: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_id: from.id,
            from_name: from.name.clone(),
            to_id,
            content: String::new(),
            timestamp: unix_millis(),
            is_file: true,
            file_name: Some(file_name),
            file_data: Some(file_data),
        }
    }
}

fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
