use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use ghfolio_core::Error;
use ghfolio_core::github::{HttpResponse, HttpTransport};

/// How the mock answers a route.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Reply with a status code and body.
    Respond(u16, String),
    /// Fail as if the host were unreachable.
    Unreachable,
    /// Never reply.
    Hang,
}

/// Scripted transport keyed by request path and query.
///
/// Unrouted requests behave as [`MockBehavior::Unreachable`]. Every request
/// is recorded so tests can count network calls.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, MockBehavior>>,
    requests: Mutex<Vec<String>>,
    delay: Duration,
}

#[allow(dead_code, clippy::unwrap_used)]
impl MockTransport {
    /// Creates a transport with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that waits `delay` before answering.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Sets the behavior for `path` (e.g. `/users/octocat`).
    pub fn on(&self, path: &str, behavior: MockBehavior) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), behavior);
        self
    }

    /// Answers `path` with a 200 and `body`.
    pub fn ok(&self, path: &str, body: impl Into<String>) -> &Self {
        self.on(path, MockBehavior::Respond(200, body.into()))
    }

    /// Paths and queries requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made for `path`.
    pub fn calls_to(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|requested| requested.as_str() == path)
            .count()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str) -> ghfolio_core::Result<HttpResponse> {
        let parsed = url::Url::parse(url)?;
        let path = match parsed.query() {
            Some(query) => format!("{}?{query}", parsed.path()),
            None => parsed.path().to_string(),
        };

        let behavior = {
            #[allow(clippy::unwrap_used)]
            let mut requests = self.requests.lock().unwrap();
            requests.push(path.clone());
            #[allow(clippy::unwrap_used)]
            let routes = self.routes.lock().unwrap();
            routes.get(&path).cloned()
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match behavior {
            Some(MockBehavior::Respond(status, body)) => Ok(HttpResponse::new(status, body)),
            Some(MockBehavior::Hang) => std::future::pending().await,
            Some(MockBehavior::Unreachable) | None => {
                Err(Error::Transport(format!("connection refused: {url}")))
            }
        }
    }
}
