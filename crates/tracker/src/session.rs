//! Session resolution — find the visitor's session id in the request
//! cookies, or mint a new one.

use std::collections::HashMap;

use tracing::debug;

use crate::capabilities::IdSource;

/// Outcome of session resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResolution {
    /// Session identifier for this request.
    pub id: String,
    /// Whether the id was minted on this request and still has to be
    /// written back to the browser.
    pub is_new: bool,
}

/// Look up `cookie_name` in the request cookies. A present, non-empty value
/// wins; anything else mints a fresh identifier. Cookie absence is the
/// normal first-visit path, not an error.
pub fn resolve_session(
    cookies: &HashMap<String, String>,
    cookie_name: &str,
    ids: &dyn IdSource,
) -> SessionResolution {
    match cookies.get(cookie_name) {
        Some(value) if !value.is_empty() => {
            debug!(cookie = cookie_name, session = %value, "session cookie found");
            SessionResolution {
                id: value.clone(),
                is_new: false,
            }
        }
        _ => {
            let id = ids.session_id();
            debug!(cookie = cookie_name, session = %id, "session cookie absent, minted new id");
            SessionResolution { id, is_new: true }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::RandomIdSource;

    const COOKIE: &str = "venus-cookie";

    #[test]
    fn test_existing_cookie_wins() {
        let cookies = HashMap::from([(COOKIE.to_string(), "sess-1".to_string())]);
        let resolution = resolve_session(&cookies, COOKIE, &RandomIdSource);
        assert_eq!(resolution.id, "sess-1");
        assert!(!resolution.is_new);
    }

    #[test]
    fn test_absent_cookie_mints_new_id() {
        let cookies = HashMap::new();
        let resolution = resolve_session(&cookies, COOKIE, &RandomIdSource);
        assert!(resolution.is_new);
        assert!(!resolution.id.is_empty());
    }

    #[test]
    fn test_empty_cookie_treated_as_absent() {
        let cookies = HashMap::from([(COOKIE.to_string(), String::new())]);
        let resolution = resolve_session(&cookies, COOKIE, &RandomIdSource);
        assert!(resolution.is_new);
        assert!(!resolution.id.is_empty());
    }

    #[test]
    fn test_independent_resolutions_differ() {
        let cookies = HashMap::new();
        let first = resolve_session(&cookies, COOKIE, &RandomIdSource);
        let second = resolve_session(&cookies, COOKIE, &RandomIdSource);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_other_cookies_are_ignored() {
        let cookies = HashMap::from([("unrelated".to_string(), "sess-1".to_string())]);
        let resolution = resolve_session(&cookies, COOKIE, &RandomIdSource);
        assert!(resolution.is_new);
        assert_ne!(resolution.id, "sess-1");
    }
}
