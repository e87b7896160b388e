use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::{COOKIE, USER_AGENT};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Session;
use crate::error::{LookupError, Result};

const CLIENT_USER_AGENT: &str = concat!("seedlang-lookup/", env!("CARGO_PKG_VERSION"));

/// One request against one URL, answered with decoded JSON.
///
/// Implementations make a single attempt per call. Any failure is returned
/// to the caller as-is.
pub trait Transport: Sync {
    fn fetch(&self, url: &str) -> Result<Value>;

    fn submit(&self, url: &str, payload: &Value) -> Result<Value>;

    fn update(&self, url: &str, payload: &Value) -> Result<Value>;
}

/// Blocking HTTP client bound to one session.
pub struct EndpointClient<'s> {
    http: Client,
    session: &'s Session,
    cookie: Option<String>,
}

impl<'s> EndpointClient<'s> {
    pub fn new(session: &'s Session, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| LookupError::Config(format!("HTTP client build failed: {err}")))?;
        Ok(Self {
            http,
            session,
            cookie: session.cookie_header(),
        })
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    fn execute(&self, method: Method, url: &str, payload: Option<&Value>) -> Result<Value> {
        info!(%method, url, "request");
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(USER_AGENT, CLIENT_USER_AGENT);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie.as_str());
        }
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send().map_err(|err| transport_error(url, &err))?;
        let status = response.status();
        debug!(%method, url, status = status.as_u16(), "response");
        if !status.is_success() {
            return Err(LookupError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.text().map_err(|err| transport_error(url, &err))?;
        decode_body(url, &body)
    }
}

impl Transport for EndpointClient<'_> {
    fn fetch(&self, url: &str) -> Result<Value> {
        self.execute(Method::GET, url, None)
    }

    fn submit(&self, url: &str, payload: &Value) -> Result<Value> {
        self.execute(Method::POST, url, Some(payload))
    }

    fn update(&self, url: &str, payload: &Value) -> Result<Value> {
        self.execute(Method::PUT, url, Some(payload))
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> LookupError {
    let detail = if err.is_timeout() {
        format!("timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    };
    LookupError::Transport {
        url: url.to_string(),
        detail,
    }
}

fn decode_body(url: &str, body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body)
        .map_err(|err| LookupError::data_shape("response body", format!("{url}: {err}")))
}
