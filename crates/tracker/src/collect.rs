//! Server event emission — assemble the collect payload and hand exactly
//! two outbound requests to the transport, one per calling convention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use venus_core::context::{RequestContext, ToolEvent};
use venus_core::TrackerResult;

use crate::transport::EventTransport;

/// Event block nested inside the collect payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectEventData {
    pub name: String,
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub url: String,
}

/// Body shipped to the collection endpoint; assembled once per invocation,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectPayload {
    pub data: CollectEventData,
    pub session: String,
    pub url: String,
    pub title: String,
    pub resolution: Option<String>,
    pub ua: String,
    pub token: String,
}

impl CollectPayload {
    /// Assemble the payload from the request context, the event config, the
    /// resolved session, and a freshly generated event id.
    pub fn assemble(
        session_id: &str,
        request: &RequestContext,
        event: &ToolEvent,
        event_id: u64,
    ) -> Self {
        Self {
            data: CollectEventData {
                name: event.data.event_name.clone(),
                id: event_id,
                timestamp: request.timestamp,
                url: request.system.page.url.to_string(),
            },
            session: session_id.to_string(),
            url: request.page.url.to_string(),
            title: request.page.title.clone(),
            resolution: request.device.resolution.clone(),
            ua: request.device.user_agent.clone(),
            token: event.settings.access_token.clone(),
        }
    }
}

/// Outbound HTTP method. Requests built without an explicit method default
/// to POST, matching the implicit payload-call convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
}

/// Request body, in either of the transport's two calling conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RequestBody {
    /// Structured payload; the transport serializes it on the wire.
    Json(serde_json::Value),
    /// Pre-serialized body shipped as-is.
    Raw(String),
}

/// One fire-and-forget outbound request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl OutboundRequest {
    /// Implicit-convention request: destination plus a structured payload,
    /// nothing else spelled out.
    pub fn json(url: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::default(),
            headers: Vec::new(),
            body: RequestBody::Json(payload),
        }
    }

    /// Explicit-convention request: method, headers, and a pre-serialized
    /// body all given by the caller.
    pub fn post(url: impl Into<String>, headers: Vec<(String, String)>, body: String) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            headers,
            body: RequestBody::Raw(body),
        }
    }
}

/// Dispatch the collect payload to the collection endpoint: one request in
/// each calling convention, both carrying the same payload value. Neither
/// is awaited or retried; delivery outcomes stay with the transport.
pub fn emit_server_events(
    payload: &CollectPayload,
    collect_endpoint: &str,
    transport: &dyn EventTransport,
) -> TrackerResult<()> {
    let value = serde_json::to_value(payload)?;
    transport.dispatch(OutboundRequest::json(collect_endpoint, value));

    let body = serde_json::to_string(payload)?;
    transport.dispatch(OutboundRequest::post(
        collect_endpoint,
        vec![("Content-Type".to_string(), "application/json".to_string())],
        body,
    ));

    debug!(
        endpoint = collect_endpoint,
        event = %payload.data.name,
        session = %payload.session,
        "collect events dispatched"
    );
    Ok(())
}
