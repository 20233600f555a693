//! Integration test: run the feed client against a local WebSocket server that sends heartbeats,
//! garbage, and items, then closes. Reconnect is disabled so the client returns when the server closes.

use futures_util::{SinkExt, StreamExt};
use inbox::channel::{run_feed_client, ReconnectPolicy};
use inbox::feed::{ChannelState, LiveBoundedFeedRenderer, RecordingView, RendererOptions};
use inbox::FeedError;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    listener.local_addr().expect("local_addr").port()
}

fn text(s: &str) -> Message {
    Message::Text(s.to_string())
}

fn item_frame(id: &str) -> Message {
    let json = serde_json::json!({
        "id": id,
        "sender": "sender@example.com",
        "recipient": "qa@inbox.test",
        "subject": format!("subject {}", id),
        "receivedAt": "2024-05-01T10:00:00Z",
    });
    Message::Text(json.to_string())
}

/// Accept one WebSocket client, send `frames` in order, close, and wait for the client to go away.
async fn serve_once(frames: Vec<Message>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local_addr");
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = tokio_tungstenite::accept_async(stream)
            .await
            .expect("websocket handshake");
        for f in frames {
            ws.send(f).await.expect("send frame");
        }
        let _ = ws.close(None).await;
        while let Some(Ok(_)) = ws.next().await {}
    });
    format!("ws://{}/ws", addr)
}

fn renderer(capacity: usize) -> LiveBoundedFeedRenderer<RecordingView> {
    let options = RendererOptions::new(NonZeroUsize::new(capacity).expect("positive"));
    LiveBoundedFeedRenderer::new(options, RecordingView::default())
}

#[tokio::test]
async fn client_applies_frames_in_arrival_order() {
    let frames = vec![
        text("heartbeat"),
        text("{not json"),
        item_frame("1"),
        text("heartbeat"),
        item_frame("2"),
        item_frame("3"),
        Message::Binary(vec![1, 2, 3]),
        item_frame("4"),
    ];
    let url = serve_once(frames).await;
    let mut r = renderer(3);

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        run_feed_client(&url, &ReconnectPolicy::disabled(), &mut r),
    )
    .await
    .expect("client finished within 5s");
    assert!(result.is_ok(), "client failed: {:?}", result);

    let ids: Vec<&str> = r.feed().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "3", "2"]);
    assert_eq!(r.view().frame.len(), 3);
    assert_eq!(r.view().frame[0].link, "/inbox/4");
    assert_eq!(r.view().draws, 4);
    assert!(r.last_heartbeat().is_some());
    assert_eq!(r.state(), ChannelState::Disconnected);
}

#[tokio::test]
async fn heartbeat_then_item_over_the_wire() {
    let url = serve_once(vec![text("heartbeat"), item_frame("abc")]).await;
    let mut r = renderer(25);
    run_feed_client(&url, &ReconnectPolicy::disabled(), &mut r)
        .await
        .expect("client ran");
    assert_eq!(r.feed().len(), 1);
    assert_eq!(r.feed().newest().map(|i| i.id.as_str()), Some("abc"));
}

#[tokio::test]
async fn refused_connection_is_transport_error_without_reconnect() {
    let url = format!("ws://127.0.0.1:{}/ws", free_port());
    let mut r = renderer(25);
    let err = run_feed_client(&url, &ReconnectPolicy::disabled(), &mut r)
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, FeedError::Transport(_)), "got {:?}", err);
    assert_eq!(r.state(), ChannelState::Disconnected);
    assert!(r.feed().is_empty());
}

#[tokio::test]
async fn reconnect_gives_up_after_max_attempts() {
    let url = format!("ws://127.0.0.1:{}/ws", free_port());
    let mut r = renderer(25);
    let policy = ReconnectPolicy {
        enabled: true,
        max_delay: Duration::from_millis(10),
        max_attempts: Some(2),
    };
    let err = tokio::time::timeout(Duration::from_secs(5), run_feed_client(&url, &policy, &mut r))
        .await
        .expect("client gave up within 5s")
        .expect_err("nothing is listening");
    assert!(matches!(err, FeedError::Exhausted(2)), "got {:?}", err);
}

#[tokio::test]
async fn reconnect_keeps_feed_across_sessions() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let url = format!("ws://{}/ws", listener.local_addr().expect("local_addr"));
    tokio::spawn(async move {
        for id in ["a", "b"] {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = tokio_tungstenite::accept_async(stream)
                .await
                .expect("websocket handshake");
            ws.send(item_frame(id)).await.expect("send frame");
            let _ = ws.close(None).await;
            while let Some(Ok(_)) = ws.next().await {}
        }
        // Listener dropped here: the third connection attempt is refused.
    });

    let mut r = renderer(25);
    let policy = ReconnectPolicy {
        enabled: true,
        max_delay: Duration::from_millis(20),
        max_attempts: Some(1),
    };
    let err = tokio::time::timeout(Duration::from_secs(5), run_feed_client(&url, &policy, &mut r))
        .await
        .expect("client gave up within 5s")
        .expect_err("server stopped listening");

    assert!(matches!(err, FeedError::Exhausted(1)), "got {:?}", err);
    let ids: Vec<&str> = r.feed().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(r.state(), ChannelState::Disconnected);
}
