//! OBS remote client (obs-websocket v5).
//!
//! parse_endpoint -> ws:// Url
//! Transport      -> raw request/response seam (websocket in production, fake in tests)
//! Client<T>      -> typed requests grouped by resource area:
//!                   general, config, scenes, inputs, filters, scene_items,
//!                   outputs, record, stream, media_inputs, ui, sources
//!
//! One Client lives for one process invocation; nothing is cached.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::ObsConfig;
use crate::error::CliError;

pub mod requests;
pub mod transport;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use requests::*;
pub use transport::WsTransport;

/// obs-websocket request status codes the CLI reacts to.
pub mod status {
    /// The input exists but has no audio (mute/volume requests).
    pub const INVALID_RESOURCE_STATE: u16 = 604;
}

#[derive(Debug, Error)]
pub enum ObsError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("invalid endpoint '{input}': {reason}")]
    InvalidEndpoint { input: String, reason: String },

    #[error("OBS requires authentication but no password was given")]
    PasswordRequired,

    #[error("connection closed by OBS ({code}): {reason}")]
    Closed { code: u16, reason: String },

    #[error("request {request} timed out after {}s", after.as_secs_f64())]
    Timeout { request: String, after: Duration },

    #[error("request {request} failed with code {code}: {comment}")]
    Request {
        request: String,
        code: u16,
        comment: String,
    },

    #[error("unexpected message from OBS: {0}")]
    Protocol(String),

    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl ObsError {
    /// Status code of a failed request, if this is one.
    pub fn code(&self) -> Option<u16> {
        match self {
            ObsError::Request { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/* ---- Endpoint ---- */

/// Build the websocket URL for `host:port`.
///
/// Accepts bare hostnames, IPv4 literals and IPv6 literals (bracketed or not).
/// A host that already carries a `ws://`/`wss://` scheme is rejected; the port
/// is always taken from `--port`.
pub fn parse_endpoint(host: &str, port: u16) -> Result<Url, ObsError> {
    let trimmed = host.trim();
    let invalid = |reason: &str| ObsError::InvalidEndpoint {
        input: format!("{host}:{port}"),
        reason: reason.to_string(),
    };
    if trimmed.is_empty() {
        return Err(invalid("host is empty"));
    }
    if trimmed.contains("://") {
        return Err(invalid("host must not include a scheme"));
    }

    let host_part = if trimmed.contains(':') && !trimmed.starts_with('[') {
        format!("[{trimmed}]")
    } else {
        trimmed.to_string()
    };

    let url = Url::parse(&format!("ws://{host_part}:{port}"))
        .map_err(|e| invalid(&e.to_string()))?;
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(url)
}

/* ---- Transport seam ---- */

/// Raw request/response exchange with OBS.
///
/// `request` returns the `responseData` object (or `Null` when the request
/// produces none) and fails with [`ObsError::Request`] when OBS reports
/// `result: false`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn request(&mut self, request_type: &str, data: Option<Value>)
    -> Result<Value, ObsError>;

    async fn close(&mut self) -> Result<(), ObsError>;
}

/* ---- Client ---- */

pub struct Client<T> {
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Issue a request and deserialize its response data.
    pub(crate) async fn call<R: DeserializeOwned>(
        &mut self,
        request_type: &str,
        data: Option<Value>,
    ) -> Result<R, ObsError> {
        let value = self.transport.request(request_type, data).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Issue a request and deserialize one field of its response data.
    pub(crate) async fn call_field<R: DeserializeOwned>(
        &mut self,
        request_type: &str,
        data: Option<Value>,
        field: &str,
    ) -> Result<R, ObsError> {
        let mut value = self.transport.request(request_type, data).await?;
        let inner = value.get_mut(field).map(Value::take).ok_or_else(|| {
            ObsError::Protocol(format!("{request_type} response is missing '{field}'"))
        })?;
        Ok(serde_json::from_value(inner)?)
    }

    /// Issue a request whose response data is irrelevant.
    pub(crate) async fn send(
        &mut self,
        request_type: &str,
        data: Option<Value>,
    ) -> Result<(), ObsError> {
        self.transport.request(request_type, data).await.map(|_| ())
    }

    /// Close the session. Consumes the client so it cannot be used afterwards.
    pub async fn disconnect(mut self) -> Result<(), ObsError> {
        self.transport.close().await
    }

    pub fn general(&mut self) -> General<'_, T> {
        General { client: self }
    }
    pub fn config(&mut self) -> Config<'_, T> {
        Config { client: self }
    }
    pub fn scenes(&mut self) -> Scenes<'_, T> {
        Scenes { client: self }
    }
    pub fn inputs(&mut self) -> Inputs<'_, T> {
        Inputs { client: self }
    }
    pub fn filters(&mut self) -> Filters<'_, T> {
        Filters { client: self }
    }
    pub fn scene_items(&mut self) -> SceneItems<'_, T> {
        SceneItems { client: self }
    }
    pub fn outputs(&mut self) -> Outputs<'_, T> {
        Outputs { client: self }
    }
    pub fn record(&mut self) -> Record<'_, T> {
        Record { client: self }
    }
    pub fn stream(&mut self) -> Stream<'_, T> {
        Stream { client: self }
    }
    pub fn media_inputs(&mut self) -> MediaInputs<'_, T> {
        MediaInputs { client: self }
    }
    pub fn ui(&mut self) -> Ui<'_, T> {
        Ui { client: self }
    }
    pub fn sources(&mut self) -> Sources<'_, T> {
        Sources { client: self }
    }
}

/* ---- Bootstrap ---- */

/// Open the one session this process will use.
///
/// Every failure (bad endpoint, refused socket, rejected password, handshake
/// timeout) becomes [`CliError::Connection`]. There is no retry.
pub async fn connect(config: &ObsConfig) -> Result<Client<WsTransport>, CliError> {
    let endpoint = format!("{}:{}", config.host, config.port);
    let url = parse_endpoint(&config.host, config.port)
        .map_err(|e| CliError::connection(&endpoint, e))?;

    let password = config.password.as_deref().filter(|p| !p.is_empty());
    let transport = WsTransport::connect(&url, password, config.timeout())
        .await
        .map_err(|e| CliError::connection(url.as_str(), e))?;

    Ok(Client::new(transport))
}
