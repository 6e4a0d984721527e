/*
[INPUT]:  WebSocket URL and subscription requests
[OUTPUT]: Raw frames and decoded market data events
[POS]:    WebSocket layer - connection handling and outbound messages
[UPDATE]: When adding new subscriptions or changing connection logic
*/

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info};

use crate::http::Result;
use crate::types::Interval;
use crate::ws::decoder::FrameDecoder;
use crate::ws::message::{MarketMessage, SubscribeMessage};

/// Production WebSocket feed URL
pub const WS_URL: &str = "wss://ws.kraken.com";
/// Sandbox WebSocket feed URL
pub const WS_SANDBOX_URL: &str = "wss://ws-sandbox.kraken.com";

const RAW_LOG_MAX_BYTES: usize = 1024;

/// WebSocket client bound to one connection and one frame decoder.
///
/// Reconnecting is the caller's responsibility; channel ids are not stable
/// across connections, so a reconnect means a fresh client with a fresh
/// decoder and new subscriptions.
#[derive(Debug)]
pub struct KrakenWebSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    decoder: FrameDecoder,
}

impl KrakenWebSocket {
    /// Connect to the production feed
    pub async fn connect() -> Result<Self> {
        Self::connect_to(WS_URL).await
    }

    /// Connect to the sandbox feed
    pub async fn connect_sandbox() -> Result<Self> {
        Self::connect_to(WS_SANDBOX_URL).await
    }

    /// Connect to an explicit feed URL
    pub async fn connect_to(url: &str) -> Result<Self> {
        let (stream, _response) = connect_async(url).await?;
        info!(url, "websocket connected");
        Ok(Self {
            stream,
            decoder: FrameDecoder::new(),
        })
    }

    /// The frame decoder bound to this connection
    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }

    /// Read the next raw frame from the transport.
    ///
    /// Returns `Ok(None)` once the connection is closed. Protocol-level
    /// ping/pong frames are handled by the transport and skipped here.
    pub async fn next_raw(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let Some(message) = self.stream.next().await else {
                return Ok(None);
            };
            match message? {
                WsMessage::Text(text) => return Ok(Some(text.as_bytes().to_vec())),
                WsMessage::Binary(bytes) => return Ok(Some(bytes.to_vec())),
                WsMessage::Close(_) => return Ok(None),
                _ => continue,
            }
        }
    }

    /// Decode one raw frame against this connection's channel registry
    pub fn decode(&mut self, input: &[u8]) -> Result<Option<MarketMessage>> {
        self.decoder.decode(input)
    }

    /// Read and decode the next event.
    ///
    /// Decode errors are returned to the caller; they are per-message and
    /// the connection stays usable. `Ok(None)` means the connection closed.
    pub async fn next_event(&mut self) -> Result<Option<MarketMessage>> {
        loop {
            let Some(payload) = self.next_raw().await? else {
                return Ok(None);
            };
            match self.decoder.decode(&payload) {
                Ok(Some(message)) => return Ok(Some(message)),
                Ok(None) => continue,
                Err(err) => {
                    debug!(
                        error = %err,
                        payload = %truncate_for_log(&String::from_utf8_lossy(&payload), RAW_LOG_MAX_BYTES),
                        "frame decode failed"
                    );
                    return Err(err);
                }
            }
        }
    }

    /// Subscribe to ticker updates for the given pairs
    pub async fn subscribe_ticker<I, S>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send_subscription(SubscribeMessage::ticker(pairs)).await
    }

    /// Subscribe to OHLC candles at the given interval
    pub async fn subscribe_ohlc<I, S>(&mut self, interval: Interval, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send_subscription(SubscribeMessage::ohlc(interval, pairs))
            .await
    }

    /// Subscribe to spread updates for the given pairs
    pub async fn subscribe_spread<I, S>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send_subscription(SubscribeMessage::spread(pairs)).await
    }

    /// Subscribe to order book updates for the given pairs.
    ///
    /// The subscription is sent and acknowledged; book data frames decode
    /// to an unsupported-channel error.
    pub async fn subscribe_book<I, S>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send_subscription(SubscribeMessage::book(pairs)).await
    }

    /// Send an application-level ping; the reqid is echoed on the pong
    pub async fn ping(&mut self, request_id: Option<i64>) -> Result<()> {
        let mut ping = serde_json::json!({"event": "ping"});
        if let Some(id) = request_id {
            ping["reqid"] = id.into();
        }
        self.stream
            .send(WsMessage::Text(ping.to_string().into()))
            .await?;
        Ok(())
    }

    /// Close the connection
    pub async fn close(&mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }

    async fn send_subscription(&mut self, message: SubscribeMessage) -> Result<()> {
        let payload = serde_json::to_string(&message)?;
        debug!(
            subscription = %message.subscription.name,
            pairs = ?message.pair,
            "ws subscription sent"
        );
        self.stream.send(WsMessage::Text(payload.into())).await?;
        Ok(())
    }
}

// The payload may come from a lossy UTF-8 conversion of raw wire bytes,
// so the cut has to land on a char boundary.
fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::with_capacity(end + 3);
    out.push_str(&value[..end]);
    out.push_str("...");
    out
}
