// Server module entry point
// Accept loop, connection handling and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::AppState;
use connection::accept_connection;

pub use listener::create_listener;

/// Accept connections until `shutdown` fires.
///
/// Must run inside a `LocalSet`: every connection is served by a local task,
/// so request handlers share one thread. An accept error is a server-level
/// socket failure and is returned to the caller.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                let (stream, peer_addr) = accept_result?;
                accept_connection(stream, peer_addr, &state, &active_connections);
            }

            () = shutdown.notified() => {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn raw_request(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serves_requests_until_shutdown() {
        let mut config = Config::load_from("does-not-exist/config").unwrap();
        config.logging.access_log = false;
        let state = Arc::new(AppState::new(&config));

        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let server = tokio::task::spawn_local(run(listener, state, Arc::clone(&shutdown)));

                let response = raw_request(
                    addr,
                    "GET /api/users HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
                )
                .await;
                assert!(response.starts_with("HTTP/1.1 200 OK"));
                assert!(response.contains(r#""name":"Nagendra""#));

                let response = raw_request(
                    addr,
                    "PATCH /api/users HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
                )
                .await;
                assert!(response.starts_with("HTTP/1.1 404 Not Found"));
                assert!(response.ends_with("Not Found"));

                shutdown.notify_one();
                server.await.unwrap().unwrap();
            })
            .await;
    }
}
