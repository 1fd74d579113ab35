// OSC-over-UDP chatbox sink.

use crate::error::{SendError, StartupError};
use crate::sources::StatusSink;
use rosc::{OscMessage, OscPacket, OscType};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;

/// Encode `(text, immediate)` for `address` as a single OSC message.
pub fn encode_status(address: &str, text: &str, immediate: bool) -> Result<Vec<u8>, SendError> {
    let packet = OscPacket::Message(OscMessage {
        addr: address.to_string(),
        args: vec![OscType::String(text.to_string()), OscType::Bool(immediate)],
    });
    rosc::encoder::encode(&packet).map_err(|e| SendError::Encode(format!("{e:?}")))
}

/// Fire-and-forget datagrams to the chatbox input address.
pub struct OscChatbox {
    socket: UdpSocket,
    target: SocketAddr,
    address: String,
    immediate: bool,
}

impl OscChatbox {
    pub async fn connect(
        host: &str,
        port: u16,
        address: impl Into<String>,
        immediate: bool,
    ) -> Result<Self, StartupError> {
        let target = tokio::net::lookup_host((host, port))
            .await?
            .next()
            .ok_or_else(|| StartupError::Resolve(format!("{host}:{port}")))?;
        let local = if target.is_ipv6() {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(target).await?;
        Ok(Self {
            socket,
            target,
            address: address.into(),
            immediate,
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl StatusSink for OscChatbox {
    async fn send(&self, text: &str) -> Result<(), SendError> {
        let buf = encode_status(&self.address, text, self.immediate)?;
        self.socket.send(&buf).await?;
        Ok(())
    }
}
