use crate::helpers::{UNREACHABLE_BACKEND, state_with_keywords};

use newsgate::server::serve_with_shutdown;

use news_core::InMemoryKeywordRepository;

use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// **VALUE**: Verifies the server answers over a real socket and stops on the shutdown signal.
///
/// **WHY THIS MATTERS**: Graceful shutdown is how deploys drain traffic. A server that
/// ignores the signal gets killed mid-request.
///
/// **BUG THIS CATCHES**: Would catch `with_graceful_shutdown` being dropped from the
/// serve loop.
#[tokio::test]
async fn given_running_server_when_shutdown_signalled_then_serves_then_exits() {
    // GIVEN: Server on an ephemeral port
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let state = state_with_keywords(
        UNREACHABLE_BACKEND,
        false,
        Arc::new(InMemoryKeywordRepository::new()),
    );
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(serve_with_shutdown(listener, state, async move {
        shutdown_rx.await.ok();
    }));

    // WHEN: Requesting the health route over TCP
    let mut stream = TcpStream::connect(address).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    // THEN: 200 ok
    assert!(raw.starts_with("HTTP/1.1 200"), "got {raw}");
    assert!(raw.ends_with("ok"));

    // AND: The server exits cleanly once signalled
    shutdown_tx.send(()).unwrap();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("server stops")
        .expect("task joins");
    assert!(result.is_ok());
}
