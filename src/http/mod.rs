//! HTTP binding for the JSON-RPC receiver
//!
//! One POST endpoint carrying raw request bodies, plus a health probe.

pub mod handlers;
