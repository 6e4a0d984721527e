/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Kraken adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod pairs;
pub mod types;
pub mod ws;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    Credentials,
    KrakenClient,
    KrakenError,
    RequestSigner,
    Result,
};

// Re-export the pair alias tables
pub use pairs::PairAliases;

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{
    EventMessage,
    FrameDecoder,
    KrakenWebSocket,
    MarketMessage,
    Ohlc,
    Spread,
    SubscribeMessage,
    Ticker,
};
