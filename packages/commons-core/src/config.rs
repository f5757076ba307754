//! Client configuration.
//!
//! The backend origin and request deadline, loaded from environment
//! variables and injected into every channel. [`Endpoints`] derives the
//! initial fetch URL of each resource from it.

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::model::CommunityRef;

/// Default backend origin when `MAIN_DOMAIN` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration shared by the HTTP transport and the endpoint builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without trailing slash (e.g. `https://api.example.org`).
    pub base_url: String,
    /// Per-request deadline.
    pub request_timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for the given origin with default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = normalize_base_url(&base_url.into())?;
        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// - `MAIN_DOMAIN`: backend origin (default [`DEFAULT_BASE_URL`])
    /// - `REQUEST_TIMEOUT_SECS`: request deadline (default [`DEFAULT_TIMEOUT_SECS`])
    pub fn from_env() -> Result<Self> {
        let base = env::var("MAIN_DOMAIN").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::InvalidConfig(format!("REQUEST_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self::new(base)?.with_timeout(Duration::from_secs(timeout))
    }

    /// Replace the request deadline. A zero deadline is rejected.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::InvalidConfig("request timeout must be non-zero".into()));
        }
        self.request_timeout = timeout;
        Ok(self)
    }

    /// Replace the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Endpoint builder for this origin.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            api: format!("{}/api", self.base_url),
        }
    }
}

impl Default for ClientConfig {
    /// [`ClientConfig::from_env`], or the built-in defaults when the
    /// environment holds invalid values.
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring invalid environment configuration");
            Self {
                base_url: DEFAULT_BASE_URL.to_string(),
                request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                user_agent: default_user_agent(),
            }
        })
    }
}

fn default_user_agent() -> String {
    format!("commons-core/{}", env!("CARGO_PKG_VERSION"))
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidConfig("base URL is empty".into()));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::InvalidConfig(format!(
            "base URL must be http(s): {trimmed}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Initial fetch URLs for every resource the view consumes.
///
/// Paging never goes through here: follow-up pages use the absolute
/// `next`/`previous` URLs returned by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api: String,
}

impl Endpoints {
    /// `GET {base}/api/community-members/{id}/`
    pub fn members(&self, community: &CommunityRef) -> String {
        format!(
            "{}/community-members/{}/",
            self.api,
            urlencoding::encode(community.as_str())
        )
    }

    /// `GET {base}/api/discussions/?communaute_id={id}`
    pub fn discussions(&self, community: &CommunityRef) -> String {
        format!(
            "{}/discussions/?communaute_id={}",
            self.api,
            urlencoding::encode(community.as_str())
        )
    }

    /// `GET {base}/api/fichiers/?communaute_id={id}`
    pub fn resources(&self, community: &CommunityRef) -> String {
        format!(
            "{}/fichiers/?communaute_id={}",
            self.api,
            urlencoding::encode(community.as_str())
        )
    }

    /// `GET {base}/api/community-admins/{id}/`
    pub fn admins(&self, community: &CommunityRef) -> String {
        format!(
            "{}/community-admins/{}/",
            self.api,
            urlencoding::encode(community.as_str())
        )
    }

    /// `GET {base}/api/recent-activities/?community_id={id}`
    pub fn recent_activity(&self, community: &CommunityRef) -> String {
        format!(
            "{}/recent-activities/?community_id={}",
            self.api,
            urlencoding::encode(community.as_str())
        )
    }
}
