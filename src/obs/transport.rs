//! Websocket transport: Hello/Identify handshake and request/response pairing.

use base64::Engine;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::error::Error as WsError;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use super::{ObsError, Transport};
use crate::{log_debug, log_trace};

type ObsSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

mod op {
    pub const HELLO: u8 = 0;
    pub const IDENTIFY: u8 = 1;
    pub const IDENTIFIED: u8 = 2;
    pub const REQUEST: u8 = 6;
    pub const REQUEST_RESPONSE: u8 = 7;
}

const RPC_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct Envelope {
    op: u8,
    d: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Hello {
    obs_web_socket_version: String,
    rpc_version: u32,
    authentication: Option<AuthChallenge>,
}

#[derive(Debug, Deserialize)]
struct AuthChallenge {
    challenge: String,
    salt: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestResponse {
    request_type: String,
    request_id: String,
    request_status: RequestStatus,
    #[serde(default)]
    response_data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RequestStatus {
    result: bool,
    code: u16,
    #[serde(default)]
    comment: Option<String>,
}

/// `base64(sha256(base64(sha256(password + salt)) + challenge))`
pub fn auth_string(password: &str, challenge: &str, salt: &str) -> String {
    let b64 = base64::engine::general_purpose::STANDARD;
    let secret = b64.encode(Sha256::digest(format!("{password}{salt}").as_bytes()));
    b64.encode(Sha256::digest(format!("{secret}{challenge}").as_bytes()))
}

pub struct WsTransport {
    socket: ObsSocket,
    timeout: Duration,
    next_id: u64,
}

impl WsTransport {
    /// Open the socket and complete the handshake within `timeout`.
    pub async fn connect(
        url: &Url,
        password: Option<&str>,
        timeout_after: Duration,
    ) -> Result<Self, ObsError> {
        log_debug!("connecting to {url}");
        let handshake = async {
            let (socket, _response) = connect_async(url.as_str()).await?;
            let mut transport = WsTransport {
                socket,
                timeout: timeout_after,
                next_id: 0,
            };
            transport.identify(password).await?;
            Ok::<_, ObsError>(transport)
        };

        match timeout(timeout_after, handshake).await {
            Ok(result) => result,
            Err(_) => Err(ObsError::Timeout {
                request: "Identify".into(),
                after: timeout_after,
            }),
        }
    }

    async fn identify(&mut self, password: Option<&str>) -> Result<(), ObsError> {
        let hello = self.read_envelope().await?;
        if hello.op != op::HELLO {
            return Err(ObsError::Protocol(format!(
                "expected Hello (op 0), got op {}",
                hello.op
            )));
        }
        let hello: Hello = serde_json::from_value(hello.d)?;
        log_debug!(
            "server obs-websocket {} (rpc {})",
            hello.obs_web_socket_version,
            hello.rpc_version
        );

        let mut identify = json!({
            "rpcVersion": RPC_VERSION,
            "eventSubscriptions": 0,
        });
        if let Some(auth) = hello.authentication {
            let password = password.ok_or(ObsError::PasswordRequired)?;
            identify["authentication"] =
                Value::String(auth_string(password, &auth.challenge, &auth.salt));
        }
        self.write_envelope(op::IDENTIFY, identify).await?;

        let identified = self.read_envelope().await?;
        if identified.op != op::IDENTIFIED {
            return Err(ObsError::Protocol(format!(
                "expected Identified (op 2), got op {}",
                identified.op
            )));
        }
        log_debug!("identified");
        Ok(())
    }

    async fn write_envelope(&mut self, op: u8, d: Value) -> Result<(), ObsError> {
        let text = json!({ "op": op, "d": d }).to_string();
        log_trace!("-> {text}");
        self.socket.send(Message::Text(text)).await?;
        Ok(())
    }

    /// Next text frame as an envelope. Close frames become [`ObsError::Closed`].
    async fn read_envelope(&mut self) -> Result<Envelope, ObsError> {
        loop {
            let Some(message) = self.socket.next().await else {
                return Err(ObsError::Closed {
                    code: u16::from(CloseCode::Abnormal),
                    reason: "connection dropped".into(),
                });
            };
            match message? {
                Message::Text(text) => {
                    log_trace!("<- {text}");
                    return Ok(serde_json::from_str(&text)?);
                }
                Message::Close(frame) => {
                    let (code, reason) = frame
                        .map(|f| (u16::from(f.code), f.reason.to_string()))
                        .unwrap_or((u16::from(CloseCode::Status), String::new()));
                    return Err(ObsError::Closed { code, reason });
                }
                _ => continue,
            }
        }
    }

    async fn round_trip(
        &mut self,
        request_type: &str,
        data: Option<Value>,
    ) -> Result<Value, ObsError> {
        self.next_id += 1;
        let request_id = self.next_id.to_string();

        let mut d = json!({
            "requestType": request_type,
            "requestId": request_id,
        });
        if let Some(data) = data {
            d["requestData"] = data;
        }
        self.write_envelope(op::REQUEST, d).await?;

        loop {
            let envelope = self.read_envelope().await?;
            if envelope.op != op::REQUEST_RESPONSE {
                continue;
            }
            let response: RequestResponse = serde_json::from_value(envelope.d)?;
            if response.request_id != request_id {
                log_trace!("skipping response for request {}", response.request_id);
                continue;
            }
            if !response.request_status.result {
                return Err(ObsError::Request {
                    request: response.request_type,
                    code: response.request_status.code,
                    comment: response
                        .request_status
                        .comment
                        .unwrap_or_else(|| "no comment".into()),
                });
            }
            return Ok(response.response_data.unwrap_or(Value::Null));
        }
    }
}

impl Transport for WsTransport {
    async fn request(
        &mut self,
        request_type: &str,
        data: Option<Value>,
    ) -> Result<Value, ObsError> {
        log_debug!("request {request_type}");
        let after = self.timeout;
        match timeout(after, self.round_trip(request_type, data)).await {
            Ok(result) => result,
            Err(_) => Err(ObsError::Timeout {
                request: request_type.to_string(),
                after,
            }),
        }
    }

    async fn close(&mut self) -> Result<(), ObsError> {
        log_debug!("closing session");
        match self.socket.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
