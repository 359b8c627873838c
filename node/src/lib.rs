//! Ballot election node — hosts one election engine for concurrent callers.
//!
//! The node is the coordinator that:
//! - Loads election configuration from TOML
//! - Serializes every operation through a single critical section
//! - Fans committed events out to subscribers
//! - Sets up structured logging

pub mod config;
pub mod error;
pub mod event_bus;
pub mod logging;
pub mod node;
pub mod tracing_spans;

pub use config::NodeConfig;
pub use error::NodeError;
pub use event_bus::EventBus;
pub use logging::{init_logging, LogFormat};
pub use node::ElectionNode;
