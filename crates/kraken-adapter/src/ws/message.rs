/*
[INPUT]:  Raw WebSocket frame payloads and subscription parameters
[OUTPUT]: Wire message structs and typed market data records
[POS]:    WebSocket layer - message shapes
[UPDATE]: When adding new message types or changing the wire format
*/

use serde::{Deserialize, Serialize};

use crate::types::Interval;

/// Status/event object frame.
///
/// Covers subscription acknowledgements as well as informational events
/// (system status, pong, heartbeat). Fields not present on a given event
/// default to zero values, mirroring the wire behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMessage {
    #[serde(default)]
    pub event: String,
    #[serde(default, rename = "channelID")]
    pub channel_id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub pair: String,
    #[serde(default, rename = "errorMessage")]
    pub error_message: String,
    #[serde(default, rename = "reqid")]
    pub request_id: i64,
    #[serde(default)]
    pub subscription: SubscriptionDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionDetail {
    #[serde(default)]
    pub name: String,
}

/// Subscription block of an outbound subscribe message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
}

impl SubscriptionRequest {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interval: None,
        }
    }
}

/// Outbound subscribe message.
///
/// Wire shape:
/// `{"event":"subscribe","pair":[...],"subscription":{"name":<kind>,...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribeMessage {
    pub event: String,
    pub pair: Vec<String>,
    pub subscription: SubscriptionRequest,
}

impl SubscribeMessage {
    fn new<I, S>(pairs: I, subscription: SubscriptionRequest) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            event: "subscribe".to_string(),
            pair: pairs.into_iter().map(Into::into).collect(),
            subscription,
        }
    }

    /// Subscribe to ticker updates for the given pairs
    pub fn ticker<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(pairs, SubscriptionRequest::named("ticker"))
    }

    /// Subscribe to OHLC candles at the given interval
    pub fn ohlc<I, S>(interval: Interval, pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            pairs,
            SubscriptionRequest {
                name: "ohlc".to_string(),
                interval: Some(interval.minutes()),
            },
        )
    }

    /// Subscribe to best bid/ask spread updates
    pub fn spread<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(pairs, SubscriptionRequest::named("spread"))
    }

    /// Subscribe to order book updates.
    ///
    /// Book data frames are not decoded by this crate; the subscription is
    /// still accepted by the exchange and acknowledged on the status channel.
    pub fn book<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(pairs, SubscriptionRequest::named("book"))
    }
}

/// One decoded inbound message
#[derive(Debug, Clone, PartialEq)]
pub enum MarketMessage {
    Event(EventMessage),
    Ticker(Ticker),
    Ohlc(Ohlc),
    Spread(Spread),
}

/// Best quote level of a ticker (ask or bid)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BestQuote {
    pub price: f64,
    pub whole_lot_volume: i64,
    pub lot_volume: f64,
}

/// Last trade closed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClosePrice {
    pub price: f64,
    pub lot_volume: f64,
}

/// A today/last-24-hours value pair
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayPair {
    pub today: f64,
    pub last_24h: f64,
}

/// Trade counts, today and over the last 24 hours
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TradeCounts {
    pub today: i64,
    pub last_24h: i64,
}

/// Decoded ticker event for a pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ticker {
    pub pair: String,
    pub ask: BestQuote,
    pub bid: BestQuote,
    pub close: ClosePrice,
    pub volume: DayPair,
    pub vwap: DayPair,
    pub trades: TradeCounts,
    pub low: DayPair,
    pub high: DayPair,
    pub open: DayPair,
}

/// Decoded OHLC candle event for a pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ohlc {
    pub pair: String,
    pub time: f64,
    pub end_time: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub vwap: f64,
    pub volume: f64,
    pub count: i64,
}

/// Decoded best bid/ask spread event for a pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spread {
    pub pair: String,
    pub bid: f64,
    pub ask: f64,
    pub timestamp: f64,
}
