//! Tool configuration — cookie naming and policy plus the tracking and
//! collection endpoints, with workable defaults for the stock deployment.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{TrackerError, TrackerResult};

/// Root tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Cookie carrying the session identifier.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Endpoint the browser-side tracking request is sent to.
    #[serde(default = "default_track_endpoint")]
    pub track_endpoint: String,
    /// Endpoint the server-side collect requests are sent to.
    #[serde(default = "default_collect_endpoint")]
    pub collect_endpoint: String,
    #[serde(default)]
    pub cookie: CookiePolicy,
}

/// Attributes applied when the session cookie is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookiePolicy {
    /// Cookie domain; omitted from the statement when unset.
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default = "default_cookie_path")]
    pub path: String,
    #[serde(default = "default_cookie_ttl_days")]
    pub ttl_days: i64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            track_endpoint: default_track_endpoint(),
            collect_endpoint: default_collect_endpoint(),
            cookie: CookiePolicy::default(),
        }
    }
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            domain: None,
            path: default_cookie_path(),
            ttl_days: default_cookie_ttl_days(),
        }
    }
}

impl TrackerConfig {
    /// Reject configurations that cannot produce valid client statements or
    /// outbound requests.
    pub fn validate(&self) -> TrackerResult<()> {
        if self.cookie_name.is_empty() {
            return Err(TrackerError::Config("cookie_name must not be empty".into()));
        }
        for (field, value) in [
            ("track_endpoint", &self.track_endpoint),
            ("collect_endpoint", &self.collect_endpoint),
        ] {
            if Url::parse(value).is_err() {
                return Err(TrackerError::Config(format!(
                    "{field} is not a valid URL: '{value}'"
                )));
            }
        }
        if self.cookie.ttl_days <= 0 {
            return Err(TrackerError::Config(format!(
                "cookie ttl_days must be positive, got {}",
                self.cookie.ttl_days
            )));
        }
        Ok(())
    }
}

// Default functions
fn default_cookie_name() -> String {
    "venus-cookie".to_string()
}
fn default_track_endpoint() -> String {
    "https://jupiters.watchers/track".to_string()
}
fn default_collect_endpoint() -> String {
    "https://spaceteam.com/collect".to_string()
}
fn default_cookie_path() -> String {
    "/".to_string()
}
fn default_cookie_ttl_days() -> i64 {
    365
}
