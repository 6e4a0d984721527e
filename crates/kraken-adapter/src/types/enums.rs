/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
        }
    }
}

/// Kind of a WebSocket subscription channel.
///
/// The set is closed: anything the exchange reports that is not a known data
/// channel lands on `Unknown` and is rejected at decode time rather than
/// falling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Ticker,
    Ohlc,
    Spread,
    Book,
    Unknown,
}

impl ChannelKind {
    /// Map a subscription name from an acknowledgement to a channel kind
    pub fn from_name(name: &str) -> Self {
        match name {
            "ticker" => ChannelKind::Ticker,
            "ohlc" => ChannelKind::Ohlc,
            "spread" => ChannelKind::Spread,
            "book" => ChannelKind::Book,
            _ => ChannelKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Ticker => "ticker",
            ChannelKind::Ohlc => "ohlc",
            ChannelKind::Spread => "spread",
            ChannelKind::Book => "book",
            ChannelKind::Unknown => "unknown",
        }
    }
}

/// OHLC candle interval, restricted to the values the exchange accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    Min1,
    Min5,
    Min15,
    Min30,
    Hour1,
    Hour4,
    Day1,
    Week1,
    Day15,
}

impl Interval {
    /// Interval length in minutes, as sent on the subscription
    pub fn minutes(&self) -> u32 {
        match self {
            Interval::Min1 => 1,
            Interval::Min5 => 5,
            Interval::Min15 => 15,
            Interval::Min30 => 30,
            Interval::Hour1 => 60,
            Interval::Hour4 => 240,
            Interval::Day1 => 1440,
            Interval::Week1 => 10080,
            Interval::Day15 => 21600,
        }
    }
}
