//! Caller side of the protocol
//!
//! [`Client`] builds requests with increasing ids, hands the encoded payload
//! to a [`Transport`], and wraps whatever comes back in [`ClientResult`]s.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::errors::{ClientError, TransportError};
use crate::rpc::request::Request;
use crate::rpc::result::ClientResult;
use crate::rpc::server::Server;
use crate::rpc::types::RequestId;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Moves one request payload to a receiver and returns its reply body, if any.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, body: String) -> Result<Option<String>, TransportError>;
}

/// Plain HTTP POST transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(endpoint, client)
    }

    pub fn with_client(endpoint: &str, client: reqwest::Client) -> Result<Self, TransportError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| TransportError::invalid_endpoint(format!("{endpoint}: {err}")))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(TransportError::invalid_endpoint(format!(
                "unsupported scheme {}",
                endpoint.scheme()
            )));
        }

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, body: String) -> Result<Option<String>, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(header::ACCEPT, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(TransportError::unexpected_status(status.as_u16()));
        }

        let text = response.text().await?;
        Ok(Some(text).filter(|text| !text.trim().is_empty()))
    }
}

/// Feeds payloads straight into a [`Server`] in the same process.
#[derive(Debug, Clone)]
pub struct InProcessTransport {
    server: Server,
}

impl InProcessTransport {
    pub fn new(server: Server) -> Self {
        Self { server }
    }
}

#[async_trait]
impl Transport for InProcessTransport {
    async fn send(&self, body: String) -> Result<Option<String>, TransportError> {
        self.server
            .handle_text(&body)
            .map_err(|err| TransportError::InProcess(err.to_string()))
    }
}

/// A caller bound to one transport. Owns the id counter for its requests.
#[derive(Debug)]
pub struct Client<T> {
    transport: T,
    next_id: AtomicI64,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self::with_first_id(transport, 1)
    }

    pub fn with_first_id(transport: T, first_id: i64) -> Self {
        Self {
            transport,
            next_id: AtomicI64::new(first_id),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Hands out the current id. The counter never wraps: ids stop at
    /// `i64::MAX - 1` and every later call fails.
    fn next_id(&self) -> Result<RequestId, ClientError> {
        self.next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
            .map(RequestId::Number)
            .map_err(|_| ClientError::IdsExhausted)
    }

    /// Builds a request carrying a fresh id, without sending it.
    pub fn construct_request(
        &self,
        method: impl Into<String>,
        params: Option<Value>,
    ) -> Result<Request, ClientError> {
        Ok(Request::call(self.next_id()?, method, params))
    }

    pub fn construct_notification(
        &self,
        method: impl Into<String>,
        params: Option<Value>,
    ) -> Request {
        Request::notification(method, params)
    }

    pub async fn send_request(
        &self,
        method: impl Into<String>,
        params: Option<Value>,
    ) -> Result<ClientResult, ClientError> {
        let request = self.construct_request(method, params)?;
        self.send(&request).await
    }

    /// Sends an already built request and wraps the reply.
    ///
    /// An empty or undecodable reply is returned as an error result rather
    /// than as a `ClientError`.
    pub async fn send(&self, request: &Request) -> Result<ClientResult, ClientError> {
        let body = serde_json::to_string(request)?;
        debug!(method = %request.method, id = ?request.id, "sending request");

        let reply = self.transport.send(body).await?;
        Ok(reply.map_or_else(ClientResult::undecodable, |text| {
            ClientResult::from_text(&text)
        }))
    }

    /// Sends a notification. Any reply body is ignored.
    pub async fn send_notification(
        &self,
        method: impl Into<String>,
        params: Option<Value>,
    ) -> Result<(), ClientError> {
        let notification = self.construct_notification(method, params);
        let body = serde_json::to_string(&notification)?;
        debug!(method = %notification.method, "sending notification");

        self.transport.send(body).await?;
        Ok(())
    }

    /// Sends several requests and notifications as one batch.
    ///
    /// No reply, or a reply that is not a JSON array, yields an empty list.
    pub async fn send_batch(&self, requests: &[Request]) -> Result<Vec<ClientResult>, ClientError> {
        let body = serde_json::to_string(requests)?;
        debug!(entries = requests.len(), "sending batch");

        let Some(text) = self.transport.send(body).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(items)) => Ok(items.into_iter().map(ClientResult::new).collect()),
            _ => Ok(Vec::new()),
        }
    }
}
