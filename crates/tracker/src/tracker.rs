//! The tracker facade — wires config and host capabilities together and
//! runs the linear per-request pass.

use std::sync::Arc;

use tracing::{debug, info};

use venus_core::context::{RequestContext, ToolEvent};
use venus_core::{TrackerConfig, TrackerResult};

use crate::capabilities::{
    CookieSerializer, DocumentCookieWriter, FetchEmitter, IdSource, RandomIdSource, RequestEmitter,
};
use crate::collect::{emit_server_events, CollectPayload};
use crate::script::emit_client_script;
use crate::session::resolve_session;
use crate::transport::{noop_transport, EventTransport};

/// Session tracker tool: resolves the session cookie, emits the browser
/// script, and dispatches the server-side collect events.
pub struct SessionTracker {
    config: TrackerConfig,
    ids: Arc<dyn IdSource>,
    cookie_writer: Arc<dyn CookieSerializer>,
    emitter: Arc<dyn RequestEmitter>,
    transport: Arc<dyn EventTransport>,
}

impl SessionTracker {
    /// Build a tracker with stock capabilities. Fails on configurations
    /// that cannot produce valid statements or requests.
    pub fn new(config: TrackerConfig) -> TrackerResult<Self> {
        config.validate()?;
        info!(
            cookie = %config.cookie_name,
            track = %config.track_endpoint,
            collect = %config.collect_endpoint,
            "session tracker initialized"
        );
        let cookie_writer = Arc::new(DocumentCookieWriter::new(config.cookie.clone()));
        Ok(Self {
            config,
            ids: Arc::new(RandomIdSource),
            cookie_writer,
            emitter: Arc::new(FetchEmitter::default()),
            transport: noop_transport(),
        })
    }

    /// Swap in a host id source.
    pub fn with_ids(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Swap in a host cookie serializer.
    pub fn with_cookie_serializer(mut self, writer: Arc<dyn CookieSerializer>) -> Self {
        self.cookie_writer = writer;
        self
    }

    /// Swap in a host request emitter.
    pub fn with_request_emitter(mut self, emitter: Arc<dyn RequestEmitter>) -> Self {
        self.emitter = emitter;
        self
    }

    /// Attach the outbound transport for server-side events.
    pub fn with_transport(mut self, transport: Arc<dyn EventTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Handle one track request: resolve the session, build the client
    /// script, dispatch both collect events, and return the script. The
    /// returned script never depends on the dispatch outcomes.
    pub fn handle(&self, request: &RequestContext, event: &ToolEvent) -> TrackerResult<String> {
        let session =
            resolve_session(&request.cookies, &self.config.cookie_name, self.ids.as_ref());

        let script = emit_client_script(
            &session,
            &self.config.cookie_name,
            &request.page,
            &request.device,
            &self.config.track_endpoint,
            self.cookie_writer.as_ref(),
            self.emitter.as_ref(),
        );

        let payload = CollectPayload::assemble(&session.id, request, event, self.ids.event_id());
        emit_server_events(&payload, &self.config.collect_endpoint, self.transport.as_ref())?;

        debug!(
            session = %session.id,
            is_new = session.is_new,
            event = %event.data.event_name,
            "track request handled"
        );
        Ok(script)
    }
}
