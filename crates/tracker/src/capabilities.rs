//! Host-injected collaborators. The host environment owns randomness, the
//! cookie wire format, and the browser fetch helper; the tracker only ever
//! sees them through these traits, so every capability can be swapped in
//! tests or by an embedding host.

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use venus_core::CookiePolicy;

/// Source of freshly generated identifiers.
pub trait IdSource: Send + Sync {
    /// New session identifier, UUID-v4 format.
    fn session_id(&self) -> String;
    /// New numeric event identifier.
    fn event_id(&self) -> u64;
}

/// Default id source backed by `uuid` and `rand`.
#[derive(Debug, Default)]
pub struct RandomIdSource;

impl IdSource for RandomIdSource {
    fn session_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn event_id(&self) -> u64 {
        rand::thread_rng().gen()
    }
}

/// Knows the browser wire format for persisting a cookie.
pub trait CookieSerializer: Send + Sync {
    /// Statement that stores `value` under `name` in the browser.
    fn cookie_statement(&self, name: &str, value: &str) -> String;
}

/// Renders a `document.cookie` assignment with the configured policy
/// attributes, e.g.
///
/// ```text
/// document.cookie = 'venus-cookie=5ba3d2cd-…; Domain=example.com; Path=/; Expires=Fri, 31 Dec 2027 12:00:00 GMT';
/// ```
#[derive(Debug, Clone)]
pub struct DocumentCookieWriter {
    policy: CookiePolicy,
}

impl DocumentCookieWriter {
    pub fn new(policy: CookiePolicy) -> Self {
        Self { policy }
    }
}

impl CookieSerializer for DocumentCookieWriter {
    fn cookie_statement(&self, name: &str, value: &str) -> String {
        let expires = (Utc::now() + Duration::days(self.policy.ttl_days))
            .format("%a, %d %b %Y %H:%M:%S GMT");
        let domain = match &self.policy.domain {
            Some(domain) => format!(" Domain={domain};"),
            None => String::new(),
        };
        format!(
            "document.cookie = '{name}={value};{domain} Path={path}; Expires={expires}';",
            path = self.policy.path,
        )
    }
}

/// Emits the browser statement that fires a tracking request.
pub trait RequestEmitter: Send + Sync {
    /// Statement that issues a GET-style request to `url` from the browser.
    fn request_statement(&self, url: &str) -> String;
}

/// Emits a plain `fetch("<url>");` call, or a host-specific fetch helper
/// when one is configured.
#[derive(Debug, Clone)]
pub struct FetchEmitter {
    function: String,
}

impl FetchEmitter {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
        }
    }
}

impl Default for FetchEmitter {
    fn default() -> Self {
        Self::new("fetch")
    }
}

impl RequestEmitter for FetchEmitter {
    fn request_statement(&self, url: &str) -> String {
        format!("{}(\"{}\");", self.function, url)
    }
}
