//! Nullable infrastructure for deterministic testing.
//!
//! The election engine talks to its collaborators (authorization, event delivery)
//! only through traits. This crate provides test-friendly implementations that:
//! - Return deterministic answers
//! - Can be controlled programmatically
//! - Record what the engine did for later assertions
//!
//! Usage: swap real implementations for nullables in tests.

pub mod authorizer;
pub mod events;

pub use authorizer::NullAuthorizer;
pub use events::NullEventSink;
