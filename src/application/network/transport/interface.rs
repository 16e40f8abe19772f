use crate::domain::Message;
use std::{fmt, future::Future, net::SocketAddr};
use tokio::io;
use uuid::Uuid;

/// Adapters are shared across tasks and every accepted connection is
/// drained on its own task, hence the Send bounds on the futures.
pub trait TransportInterface: Send + Sync + 'static {
    type Stream: TransportStream;

    /// Waits for the next inbound connection.
    fn accept(&self) -> impl Future<Output = TransportResult<(Self::Stream, SocketAddr)>> + Send;

    /// Reads the next framed message from an accepted connection. Returns
    /// None once the remote side has closed the stream cleanly.
    fn read_message(
        &self,
        stream: &mut Self::Stream,
    ) -> impl Future<Output = TransportResult<Option<Message>>> + Send;

    /// Delivers one message to a peer's last-known address. Success means
    /// the frame was fully written to the established connection.
    fn send(
        &self,
        target: SocketAddr,
        message: &Message,
    ) -> impl Future<Output = TransportResult<()>> + Send;
}

pub trait TransportStream: Send + 'static {}

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug)]
pub enum TransportError {
    /// Connection refused or timed out on the send path.
    PeerUnreachable(String),
    /// The target id is not (or no longer) in the peer table; the caller
    /// should re-resolve before retrying.
    AddressStale(Uuid),
    /// Payload too large or structurally invalid for the wire.
    Serialization(String),
    Io(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeerUnreachable(err) => write!(f, "Peer unreachable: {err}"),
            Self::AddressStale(id) => write!(f, "Peer {id} is not in the peer table"),
            Self::Serialization(err) => write!(f, "Invalid payload: {err}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
