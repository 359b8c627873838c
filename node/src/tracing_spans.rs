//! Pre-built [`tracing::Span`] constructors for election node operations.
//!
//! Consistent span names and fields make it easy to filter and correlate
//! traces per election and per caller.

use ballot_types::Identity;
use tracing::{info_span, Span};

/// Span covering one public operation, from lock acquisition to commit.
pub fn operation_span(election: &str, operation: &'static str, caller: &Identity) -> Span {
    info_span!("election_op", election = %election, op = operation, caller = %caller)
}

/// Span covering a read-only query.
pub fn query_span(election: &str, query: &'static str) -> Span {
    info_span!("election_query", election = %election, query = query)
}
