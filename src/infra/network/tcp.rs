use crate::{
    application::network::transport::{
        TransportError, TransportInterface, TransportResult, TransportStream,
    },
    domain::Message,
};
use std::{net::SocketAddr, time::Duration};
use tokio::{
    io::{self, AsyncReadExt, AsyncWriteExt, ErrorKind},
    net::{TcpListener, TcpStream},
    time,
};

/// Upper bound for one framed message; a whole encoded file must fit.
const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Point-to-point transport: one u32 big-endian length prefix followed by
/// the JSON message, so a connection can carry several self-delimited
/// frames.
pub struct TcpTransport {
    listener: TcpListener,
    connect_timeout: Duration,
}

impl TcpTransport {
    pub async fn new(port: u16, connect_timeout: Duration) -> io::Result<Self> {
        let listener = TcpListener::bind(format!("0.0.0.0:{port}")).await?;

        Ok(Self {
            listener,
            connect_timeout,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl TransportInterface for TcpTransport {
    type Stream = TcpStream;

    async fn accept(&self) -> TransportResult<(TcpStream, SocketAddr)> {
        Ok(self.listener.accept().await?)
    }

    async fn read_message(&self, stream: &mut TcpStream) -> TransportResult<Option<Message>> {
        let mut len_buf = [0u8; 4];

        // EOF at a frame boundary is a clean close; anywhere else it is a
        // truncated frame and surfaces as an error below.
        match stream.read_exact(&mut len_buf).await {
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => return Ok(None),
            Err(err) => return Err(err.into()),
        }

        let len = u32::from_be_bytes(len_buf) as usize;
        if len > MAX_FRAME_LEN {
            return Err(TransportError::Serialization(format!(
                "frame of {len} bytes exceeds limit"
            )));
        }

        let mut buf = vec![0u8; len];
        stream.read_exact(&mut buf).await?;

        Ok(Some(serde_json::from_slice(&buf)?))
    }

    async fn send(&self, target: SocketAddr, message: &Message) -> TransportResult<()> {
        let payload = serde_json::to_vec(message)?;
        if payload.len() > MAX_FRAME_LEN {
            return Err(TransportError::Serialization(format!(
                "payload of {} bytes exceeds limit",
                payload.len()
            )));
        }

        let mut stream = time::timeout(self.connect_timeout, TcpStream::connect(target))
            .await
            .map_err(|_| {
                TransportError::PeerUnreachable(format!("connect to {target} timed out"))
            })?
            .map_err(unreachable_err)?;

        stream
            .write_all(&(payload.len() as u32).to_be_bytes())
            .await
            .map_err(unreachable_err)?;
        stream.write_all(&payload).await.map_err(unreachable_err)?;
        stream.flush().await.map_err(unreachable_err)
    }
}

impl TransportStream for TcpStream {}

fn unreachable_err(err: io::Error) -> TransportError {
    TransportError::PeerUnreachable(err.to_string())
}
