//! Outbound transport seam — trait for handing fire-and-forget requests to
//! whatever wire client the host runs.
//!
//! Implementations route requests onto a background sender task
//! (`ChannelTransport`), capture them for tests (`CaptureTransport`), or
//! drop them (`NoOpTransport`).

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::collect::OutboundRequest;

/// Hand-off point for outbound requests. Dispatch must not block and must
/// not surface delivery outcomes to the caller.
pub trait EventTransport: Send + Sync {
    fn dispatch(&self, request: OutboundRequest);
}

/// Drops every request; for callers that don't emit server-side events.
pub struct NoOpTransport;

impl EventTransport for NoOpTransport {
    fn dispatch(&self, _request: OutboundRequest) {}
}

/// In-memory transport that captures requests for testing.
#[derive(Default)]
pub struct CaptureTransport {
    requests: Mutex<Vec<OutboundRequest>>,
}

impl CaptureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().expect("transport mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().expect("transport mutex poisoned").len()
    }

    pub fn count_url(&self, url: &str) -> usize {
        self.requests
            .lock()
            .expect("transport mutex poisoned")
            .iter()
            .filter(|r| r.url == url)
            .count()
    }

    pub fn clear(&self) {
        self.requests.lock().expect("transport mutex poisoned").clear();
    }
}

impl EventTransport for CaptureTransport {
    fn dispatch(&self, request: OutboundRequest) {
        self.requests
            .lock()
            .expect("transport mutex poisoned")
            .push(request);
    }
}

/// Queues requests onto an unbounded channel. The host owns the receiver
/// and drains it from a background task, so the response path never waits
/// on outbound network latency.
pub struct ChannelTransport {
    sender: mpsc::UnboundedSender<OutboundRequest>,
}

impl ChannelTransport {
    /// Create the transport and the receiver the host's sender task drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl EventTransport for ChannelTransport {
    fn dispatch(&self, request: OutboundRequest) {
        let url = request.url.clone();
        if let Err(e) = self.sender.send(request) {
            metrics::counter!("collect.dropped").increment(1);
            warn!(url = %url, "outbound request dropped: {}", e);
        } else {
            metrics::counter!("collect.queued").increment(1);
            debug!(url = %url, "outbound request queued");
        }
    }
}

/// Convenience: transport for callers that don't emit server events.
pub fn noop_transport() -> Arc<dyn EventTransport> {
    Arc::new(NoOpTransport)
}

/// Convenience: capture transport for tests.
pub fn capture_transport() -> Arc<CaptureTransport> {
    Arc::new(CaptureTransport::new())
}
