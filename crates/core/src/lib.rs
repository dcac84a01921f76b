pub mod config;
pub mod context;
pub mod error;

pub use config::{CookiePolicy, TrackerConfig};
pub use error::{TrackerError, TrackerResult};
