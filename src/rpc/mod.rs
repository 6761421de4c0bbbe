//! JSON-RPC 2.0 protocol core
//!
//! Transport-agnostic envelopes, validation, dispatch and response building
//! for the receiving side, plus request construction and reply inspection for
//! the calling side.

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod request;
pub mod response;
pub mod result;
pub mod server;
pub mod types;
pub mod validator;

pub use client::{Client, HttpTransport, InProcessTransport, Transport};
pub use error::{ErrorKind, ErrorObject, ProcedureError, ProcedureResult};
pub use registry::{Arity, Procedure, Registry};
pub use request::Request;
pub use response::{Reply, Response};
pub use result::ClientResult;
pub use server::Server;
pub use types::{EntryId, RequestId, JSONRPC_VERSION};
