use crate::domain::{Message, PeerRecord};
use serde::Serialize;
use uuid::Uuid;

/// Events pushed to whatever consumer is attached, in arrival order.
#[derive(Debug, Clone, Serialize)]
pub enum EngineEvent {
    PeerDiscovered(PeerRecord),
    PeerExpired(Uuid),
    MessageReceived(Message),
}
