/*
[INPUT]:  WebSocket configuration and subscription channels
[OUTPUT]: Real-time market data events
[POS]:    WebSocket layer - real-time data streams
[UPDATE]: When adding new channels or changing connection logic
*/

pub mod client;
pub mod decoder;
pub mod message;

pub use client::{KrakenWebSocket, WS_SANDBOX_URL, WS_URL};
pub use decoder::{ChannelRegistration, FrameDecoder};
pub use message::{
    BestQuote, ClosePrice, DayPair, EventMessage, MarketMessage, Ohlc, Spread, SubscribeMessage,
    SubscriptionDetail, SubscriptionRequest, Ticker, TradeCounts,
};
