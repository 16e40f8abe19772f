use crate::application::network::presence::BeaconInterface;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::{io, net::UdpSocket};

pub struct UdpBeacon {
    socket: UdpSocket,
    broadcast_addr: SocketAddr,
}

impl UdpBeacon {
    /// Binds the shared beacon port. reuse_address (and reuse_port on
    /// unix) lets restarts and co-located nodes share the discovery port.
    pub async fn new(port: u16) -> io::Result<Self> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;

        socket.set_reuse_address(true)?;
        #[cfg(unix)]
        socket.set_reuse_port(true)?;
        socket.set_broadcast(true)?;

        let bind_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
        socket.bind(&SockAddr::from(bind_addr))?;

        let std_udp: std::net::UdpSocket = socket.into();
        std_udp.set_nonblocking(true)?;

        Ok(Self {
            socket: UdpSocket::from_std(std_udp)?,
            broadcast_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::BROADCAST), port),
        })
    }
}

impl BeaconInterface for UdpBeacon {
    async fn broadcast(&self, data: &[u8]) -> io::Result<()> {
        self.socket
            .send_to(data, self.broadcast_addr)
            .await
            .map(|_| ())
    }

    async fn recv(&self) -> io::Result<(Vec<u8>, SocketAddr)> {
        // One announcement always fits a single MTU-sized datagram.
        let mut buf = vec![0u8; 1500];
        let (len, src_addr) = self.socket.recv_from(&mut buf).await?;
        buf.truncate(len);

        Ok((buf, src_addr))
    }
}
