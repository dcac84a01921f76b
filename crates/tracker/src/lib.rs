//! Session tracker tool — manages a session-identifier cookie per request
//! and emits both the browser-side tracking script and the server-side
//! collect events.
//!
//! # Modules
//!
//! - [`capabilities`] — Host-injected collaborators (ids, cookie serialization, request emission)
//! - [`session`] — Session-cookie resolution
//! - [`script`] — Browser-side client script emission
//! - [`collect`] — Collect payload assembly and server event emission
//! - [`transport`] — Fire-and-forget outbound request hand-off
//! - [`tracker`] — The [`SessionTracker`] facade running the per-request pass

pub mod capabilities;
pub mod collect;
pub mod script;
pub mod session;
pub mod tracker;
pub mod transport;

pub use capabilities::{
    CookieSerializer, DocumentCookieWriter, FetchEmitter, IdSource, RandomIdSource, RequestEmitter,
};
pub use collect::{CollectPayload, HttpMethod, OutboundRequest, RequestBody};
pub use script::ClientScript;
pub use session::{resolve_session, SessionResolution};
pub use tracker::SessionTracker;
pub use transport::{
    capture_transport, noop_transport, CaptureTransport, ChannelTransport, EventTransport,
    NoOpTransport,
};
