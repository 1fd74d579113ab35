// OSC encoding and UDP delivery to a local listener

use osc_chatbox::osc::{OscChatbox, encode_status};
use osc_chatbox::sources::StatusSink;
use rosc::{OscPacket, OscType};
use std::time::Duration;
use tokio::net::UdpSocket;

fn decode(buf: &[u8]) -> (String, Vec<OscType>) {
    match rosc::decoder::decode_udp(buf).expect("valid OSC").1 {
        OscPacket::Message(msg) => (msg.addr, msg.args),
        OscPacket::Bundle(_) => panic!("expected a message, got a bundle"),
    }
}

#[test]
fn encoded_message_carries_text_and_flag() {
    let buf = encode_status("/chatbox/input", "hello\nworld ■□", true).unwrap();
    assert_eq!(buf.len() % 4, 0);
    let (addr, args) = decode(&buf);
    assert_eq!(addr, "/chatbox/input");
    assert_eq!(
        args,
        vec![OscType::String("hello\nworld ■□".into()), OscType::Bool(true)]
    );
}

#[tokio::test]
async fn chatbox_sink_delivers_one_datagram_per_status() {
    let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let sink = OscChatbox::connect("127.0.0.1", port, "/chatbox/input", true)
        .await
        .unwrap();
    sink.send("Line one\nLine two").await.unwrap();

    let mut buf = [0u8; 1536];
    let (n, _) = tokio::time::timeout(Duration::from_secs(5), listener.recv_from(&mut buf))
        .await
        .expect("datagram should arrive")
        .unwrap();
    let (addr, args) = decode(&buf[..n]);
    assert_eq!(addr, "/chatbox/input");
    assert_eq!(
        args,
        vec![OscType::String("Line one\nLine two".into()), OscType::Bool(true)]
    );
}

#[tokio::test]
async fn unresolvable_host_is_a_startup_error() {
    let result = OscChatbox::connect("host.invalid.", 9000, "/chatbox/input", true).await;
    assert!(result.is_err());
}
