use std::env;
use std::time::Duration;

use crate::error::{LookupError, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_MAX_CONCURRENCY: usize = 6;

const COOKIE_VAR: &str = "SEEDLANG_COOKIE";
const USER_ID_VAR: &str = "SEEDLANG_USER_ID";
const DECK_ID_VAR: &str = "SEEDLANG_DECK_ID";
const REVIEW_DECK_ID_VAR: &str = "SEEDLANG_REVIEW_DECK_ID";
const TIMEOUT_VAR: &str = "SEEDLANG_TIMEOUT_SECS";

/// Pre-baked credentials attached to every outbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    cookies: Vec<(String, String)>,
    user_id: String,
}

impl Session {
    pub fn new(cookies: Vec<(String, String)>, user_id: impl Into<String>) -> Self {
        Self {
            cookies,
            user_id: user_id.into(),
        }
    }

    /// Parses a browser-style `name=value; other=value` cookie string.
    pub fn from_cookie_string(raw: &str, user_id: impl Into<String>) -> Result<Self> {
        let mut cookies = Vec::new();
        for piece in raw.split(';') {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            let (name, value) = piece
                .split_once('=')
                .ok_or_else(|| LookupError::Config(format!("malformed cookie {piece:?}")))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(LookupError::Config(format!("cookie without a name: {piece:?}")));
            }
            cookies.push((name.to_string(), value.trim().to_string()));
        }
        Ok(Self::new(cookies, user_id))
    }

    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Value for the `Cookie` request header, `None` when no cookies are set.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        Some(pairs.join("; "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub seedlang: String,
    pub dwds: String,
    pub faztaa: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            seedlang: "https://seedlang.com".to_string(),
            dwds: "https://www.dwds.de".to_string(),
            faztaa: "https://api.faztaa.com".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub session: Session,
    pub endpoints: Endpoints,
    pub timeout: Duration,
    pub max_concurrency: usize,
    pub deck_id: Option<String>,
    pub review_deck_id: Option<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            session: Session::default(),
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            deck_id: None,
            review_deck_id: None,
        }
    }
}

impl LookupConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let user_id = non_empty(USER_ID_VAR)
            .ok_or_else(|| LookupError::Config(format!("{USER_ID_VAR} is not set")))?;
        let cookie = non_empty(COOKIE_VAR).unwrap_or_default();
        let session = Session::from_cookie_string(&cookie, user_id.trim())?;

        let timeout = match non_empty(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    LookupError::Config(format!("{TIMEOUT_VAR} must be whole seconds, got {raw:?}"))
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            session,
            timeout,
            deck_id: non_empty(DECK_ID_VAR),
            review_deck_id: non_empty(REVIEW_DECK_ID_VAR),
            ..Self::default()
        })
    }

    pub fn deck_id(&self) -> Result<&str> {
        self.deck_id
            .as_deref()
            .ok_or_else(|| LookupError::Config(format!("{DECK_ID_VAR} is not set")))
    }

    pub fn review_deck_id(&self) -> Result<&str> {
        self.review_deck_id
            .as_deref()
            .ok_or_else(|| LookupError::Config(format!("{REVIEW_DECK_ID_VAR} is not set")))
    }
}
