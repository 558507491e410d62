use std::time::Duration;

use crate::{query::Query, ClientOptions, Error, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Query,
    pub body: Option<String>,
    /// Sent as `Idempotency-Key`, the server applies a keyed request at most once
    pub idempotency_key: Option<String>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            body: None,
            idempotency_key: None,
        }
    }

    pub fn query(self, query: Query) -> Self {
        Self { query, ..self }
    }

    pub fn body(self, body: String) -> Self {
        Self {
            body: Some(body),
            ..self
        }
    }

    pub fn idempotency_key(self, key: impl Into<String>) -> Self {
        Self {
            idempotency_key: Some(key.into()),
            ..self
        }
    }

    /// Whether sending this request twice has the same effect as sending it once
    pub fn is_retry_safe(&self) -> bool {
        self.method == Method::Get || self.idempotency_key.is_some()
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find_map(|(k, v)| (k == key).then_some(&**v))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }
}

/// Sends a single request and hands back whatever the server said.
///
/// Non-2xx statuses are *not* errors at this level, only failures to get a response are.
pub trait Transport: Send + Sync {
    fn send(&self, req: &Request) -> Result<Response>;
}

/// The default transport: a `ureq` agent with auth, timeouts and retries
pub struct HttpAgent {
    options: ClientOptions,
    bearer_token: String,
    agent: ureq::Agent,
}

impl std::fmt::Debug for HttpAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAgent")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl HttpAgent {
    pub fn new(options: ClientOptions) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(options.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            bearer_token: format!("Bearer {}", options.api_key),
            options,
            agent,
        }
    }

    fn send_once(&self, req: &Request) -> Attempt {
        let url = crate::util::join_url(&self.options.base_url, &req.path);
        log::debug!("{} {}", req.method, url);

        let mut request = req
            .query
            .iter()
            .fold(self.agent.request(req.method.as_str(), &url), |r, (k, v)| {
                r.query(k, v)
            })
            .set("authorization", &self.bearer_token)
            .set("accept", "application/json");

        if let Some(key) = &req.idempotency_key {
            request = request.set("idempotency-key", key);
        }

        let result = match &req.body {
            Some(body) => request
                .set("content-type", "application/json")
                .send_string(body),
            None => request.call(),
        };

        let resp = match result {
            Ok(resp) | Err(ureq::Error::Status(_, resp)) => resp,
            Err(ureq::Error::Transport(err)) => {
                return match err.kind() {
                    ureq::ErrorKind::Dns
                    | ureq::ErrorKind::ConnectionFailed
                    | ureq::ErrorKind::ProxyConnect => Attempt::NotSent(Error::transport(err)),
                    _ => Attempt::Failed(Error::transport(err)),
                }
            }
        };

        let status = resp.status();
        let retry_after = resp
            .header("retry-after")
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_secs);
        let body = match resp.into_string() {
            Ok(body) => body,
            Err(err) => return Attempt::Failed(Error::transport(err)),
        };

        log::trace!("{} {} -> {}", req.method, url, status);
        Attempt::Response(Response { status, body }, retry_after)
    }
}

enum Attempt {
    Response(Response, Option<Duration>),
    /// No connection was made, so the server never saw the request
    NotSent(Error),
    /// The server may or may not have acted on the request
    Failed(Error),
}

impl Transport for HttpAgent {
    /// Sends `req`, retrying failures with a capped exponential backoff.
    ///
    /// Requests that are not retry safe (see [`Request::is_retry_safe`]) are only
    /// resent when they never left this machine or were rate limited.
    fn send(&self, req: &Request) -> Result<Response> {
        let mut attempt = 0;
        loop {
            let (result, retryable) = match self.send_once(req) {
                Attempt::Response(resp, retry_after) => {
                    let retry = should_retry(resp.status)
                        && (req.is_retry_safe() || resp.status == 429);
                    (Ok(resp), retry.then_some(retry_after))
                }
                Attempt::NotSent(err) => (Err(err), Some(None)),
                Attempt::Failed(err) => (Err(err), req.is_retry_safe().then_some(None)),
            };

            let retry_after = match retryable {
                Some(retry_after) if attempt < self.options.max_retries => retry_after,
                _ => return result,
            };

            let delay = backoff(attempt, retry_after);
            log::warn!(
                "retrying {} {} in {:?} (attempt {} of {})",
                req.method,
                req.path,
                delay,
                attempt + 1,
                self.options.max_retries
            );
            std::thread::sleep(delay);
            attempt += 1;
        }
    }
}

const fn should_retry(status: u16) -> bool {
    matches!(status, 408 | 409 | 429 | 500..=599)
}

fn backoff(attempt: u32, retry_after: Option<Duration>) -> Duration {
    const INITIAL: Duration = Duration::from_millis(500);
    const MAX: Duration = Duration::from_secs(8);

    retry_after
        .filter(|d| *d <= Duration::from_secs(60))
        .unwrap_or_else(|| INITIAL.saturating_mul(1 << attempt.min(8)).min(MAX))
}
