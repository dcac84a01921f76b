//! Client script emission — the ordered browser-side statements returned to
//! the host: an optional cookie write followed by the tracking request.

use tracing::debug;
use url::form_urlencoded;

use venus_core::context::{DeviceInfo, PageInfo};

use crate::capabilities::{CookieSerializer, RequestEmitter};
use crate::session::SessionResolution;

/// Ordered accumulator of client-executable statements. The host runs the
/// rendered script top to bottom, so emission order is execution order.
#[derive(Debug, Clone, Default)]
pub struct ClientScript {
    statements: Vec<String>,
}

impl ClientScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one statement; earlier statements run first.
    pub fn push(&mut self, statement: impl Into<String>) {
        self.statements.push(statement.into());
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Render the script the way the browser will execute it.
    pub fn render(&self) -> String {
        self.statements.join("\n")
    }
}

/// Serialize the tracking parameters in fixed key order with standard
/// query-string percent-encoding (space becomes `+`). A missing resolution
/// is carried as an empty value so the key set stays stable.
fn track_query(session: &str, page: &PageInfo, device: &DeviceInfo) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("session", session)
        .append_pair("url", page.url.as_str())
        .append_pair("title", &page.title)
        .append_pair("resolution", device.resolution.as_deref().unwrap_or(""))
        .append_pair("ua", &device.user_agent)
        .finish()
}

/// Build the browser-side script for this request: a cookie write when the
/// session was just minted, then exactly one tracking request. Output is
/// deterministic for identical inputs; randomness lives in session
/// resolution, never here.
pub fn emit_client_script(
    session: &SessionResolution,
    cookie_name: &str,
    page: &PageInfo,
    device: &DeviceInfo,
    track_endpoint: &str,
    cookies: &dyn CookieSerializer,
    emitter: &dyn RequestEmitter,
) -> String {
    let mut script = ClientScript::new();

    // A pre-existing cookie needs no client-side rewrite.
    if session.is_new {
        script.push(cookies.cookie_statement(cookie_name, &session.id));
    }

    let final_url = format!("{track_endpoint}?{}", track_query(&session.id, page, device));
    script.push(emitter.request_statement(&final_url));

    debug!(
        session = %session.id,
        is_new = session.is_new,
        statements = script.len(),
        "client script emitted"
    );

    script.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    const TRACK: &str = "https://jupiters.watchers/track";

    struct StubCookieWriter;

    impl CookieSerializer for StubCookieWriter {
        fn cookie_statement(&self, name: &str, value: &str) -> String {
            format!("setCookie({name}={value});")
        }
    }

    /// Emits the bare URL so tests can assert on it directly.
    struct BareEmitter;

    impl RequestEmitter for BareEmitter {
        fn request_statement(&self, url: &str) -> String {
            url.to_string()
        }
    }

    fn sample_page() -> PageInfo {
        PageInfo {
            url: Url::parse("https://example.com/page").unwrap(),
            title: "Hello World".into(),
        }
    }

    fn sample_device() -> DeviceInfo {
        DeviceInfo {
            resolution: Some("1920x1080".into()),
            user_agent: "TestAgent/1.0".into(),
        }
    }

    fn resolved(id: &str, is_new: bool) -> SessionResolution {
        SessionResolution {
            id: id.into(),
            is_new,
        }
    }

    #[test]
    fn test_tracking_url_encoding() {
        let script = emit_client_script(
            &resolved("abc-123", false),
            "venus-cookie",
            &sample_page(),
            &sample_device(),
            TRACK,
            &StubCookieWriter,
            &BareEmitter,
        );
        assert_eq!(
            script,
            "https://jupiters.watchers/track?session=abc-123&url=https%3A%2F%2Fexample.com%2Fpage&title=Hello+World&resolution=1920x1080&ua=TestAgent%2F1.0"
        );
    }

    #[test]
    fn test_new_session_emits_cookie_then_tracking() {
        let script = emit_client_script(
            &resolved("sess-2", true),
            "venus-cookie",
            &sample_page(),
            &sample_device(),
            TRACK,
            &StubCookieWriter,
            &BareEmitter,
        );
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "setCookie(venus-cookie=sess-2);");
        assert!(lines[1].starts_with("https://jupiters.watchers/track?session=sess-2&"));
    }

    #[test]
    fn test_existing_session_skips_cookie_write() {
        let script = emit_client_script(
            &resolved("sess-1", false),
            "venus-cookie",
            &sample_page(),
            &sample_device(),
            TRACK,
            &StubCookieWriter,
            &BareEmitter,
        );
        assert!(!script.contains("setCookie"));
        assert_eq!(script.lines().count(), 1);
        assert!(script.contains("session=sess-1"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let emit = || {
            emit_client_script(
                &resolved("sess-3", true),
                "venus-cookie",
                &sample_page(),
                &sample_device(),
                TRACK,
                &StubCookieWriter,
                &BareEmitter,
            )
        };
        assert_eq!(emit(), emit());
    }

    #[test]
    fn test_missing_fields_pass_through_empty() {
        let page = PageInfo {
            url: Url::parse("https://example.com/page").unwrap(),
            title: String::new(),
        };
        let device = DeviceInfo {
            resolution: None,
            user_agent: "TestAgent/1.0".into(),
        };
        let script = emit_client_script(
            &resolved("abc-123", false),
            "venus-cookie",
            &page,
            &device,
            TRACK,
            &StubCookieWriter,
            &BareEmitter,
        );
        assert!(script.contains("&title=&"));
        assert!(script.contains("&resolution=&"));
    }
}
