// Throwaway HTTP server for client tests.
// Answers each request with a canned status and body chosen by path.

use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Barrier;

/// A canned response for one request path.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn ok(path: &'static str, body: impl Into<String>) -> Self {
        Self {
            path,
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(path: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self {
            path,
            status,
            body: body.into(),
        }
    }
}

/// Start serving `routes` on an ephemeral port and return the base URL.
/// Unknown paths answer 404.
pub async fn spawn(routes: Vec<Route>) -> String {
    serve(routes, None).await
}

/// Like [`spawn`], but each response waits until `requests` requests are
/// being held at once.
pub async fn spawn_gated(routes: Vec<Route>, requests: usize) -> String {
    serve(routes, Some(Arc::new(Barrier::new(requests)))).await
}

async fn serve(routes: Vec<Route>, gate: Option<Arc<Barrier>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let routes = routes.clone();
            let gate = gate.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                if let Some(gate) = gate {
                    gate.wait().await;
                }

                let request = String::from_utf8_lossy(&request);
                let path = request
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();

                let (status, body) = routes
                    .iter()
                    .find(|route| route.path == path)
                    .map(|route| (route.status, route.body.clone()))
                    .unwrap_or((404, r#"{"message":"Not Found"}"#.to_string()));

                let response = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nx-ratelimit-limit: 60\r\nx-ratelimit-remaining: 59\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}
