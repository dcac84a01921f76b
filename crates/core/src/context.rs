//! Per-request context types — the read-only page, device, cookie, and
//! event data the host hands to the tool on every track request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Page the browser was on when the track request fired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub url: Url,
    pub title: String,
}

/// Device and browser context for the current request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Screen resolution, e.g. "1920x1080". Some clients never report one.
    pub resolution: Option<String>,
    pub user_agent: String,
}

/// Host-canonical view of the request, kept apart from the client-reported
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub page: SystemPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemPage {
    pub url: Url,
}

/// Everything the host knows about the incoming request. One per
/// invocation; never mutated by the tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    pub page: PageInfo,
    pub device: DeviceInfo,
    /// Cookie name → value, as received from the browser.
    pub cookies: HashMap<String, String>,
    pub timestamp: DateTime<Utc>,
    pub system: SystemInfo,
}

/// Event configuration wired up in the host dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolEvent {
    pub data: EventData,
    pub settings: EventSettings,
}

/// User-configured event fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    pub event_name: String,
}

/// Account-level settings, passed through to the collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSettings {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_context_serde() {
        let context = RequestContext {
            page: PageInfo {
                url: Url::parse("https://example.com/products").unwrap(),
                title: "Products".into(),
            },
            device: DeviceInfo {
                resolution: Some("1920x1080".into()),
                user_agent: "Mozilla/5.0".into(),
            },
            cookies: HashMap::from([("venus-cookie".to_string(), "sess-1".to_string())]),
            timestamp: Utc::now(),
            system: SystemInfo {
                page: SystemPage {
                    url: Url::parse("https://example.com/products?ref=mail").unwrap(),
                },
            },
        };

        let json = serde_json::to_string(&context).unwrap();
        let parsed: RequestContext = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.page.title, "Products");
        assert_eq!(parsed.cookies.get("venus-cookie").unwrap(), "sess-1");
        assert_eq!(
            parsed.system.page.url.as_str(),
            "https://example.com/products?ref=mail"
        );
    }

    #[test]
    fn test_tool_event_serde() {
        let event = ToolEvent {
            data: EventData {
                event_name: "page_view".into(),
            },
            settings: EventSettings {
                access_token: "tok-123".into(),
            },
        };

        let json = serde_json::to_string(&event).unwrap();
        let parsed: ToolEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.data.event_name, "page_view");
        assert_eq!(parsed.settings.access_token, "tok-123");
    }
}
