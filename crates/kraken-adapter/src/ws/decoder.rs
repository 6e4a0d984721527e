/*
[INPUT]:  Raw inbound frame bytes and subscription acknowledgements
[OUTPUT]: Typed market data events resolved through the channel registry
[POS]:    WebSocket layer - frame dispatch and per-channel decoding
[UPDATE]: When the exchange changes frame layouts or adds channel kinds
*/

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::http::{KrakenError, Result};
use crate::types::ChannelKind;
use crate::ws::message::{
    BestQuote, ClosePrice, DayPair, EventMessage, MarketMessage, Ohlc, Spread, Ticker, TradeCounts,
};

/// Subscription metadata for one active channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelRegistration {
    pub kind: ChannelKind,
    pub pair: String,
}

/// Decodes the multiplexed inbound frame stream for one connection.
///
/// Subscription acknowledgements populate the channel registry; data frames
/// resolve their leading channel id through it. One decoder belongs to one
/// connection and must be driven from a single task - frames have to be
/// decoded in arrival order so that an acknowledgement is seen before the
/// data frames that reference it.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    channels: HashMap<i64, ChannelRegistration>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record subscription metadata for a channel id.
    ///
    /// An existing registration is overwritten; the exchange may reuse ids
    /// and the newest acknowledgement wins.
    pub fn register(&mut self, channel_id: i64, kind: ChannelKind, pair: impl Into<String>) {
        let pair = pair.into();
        debug!(
            channel = channel_id,
            kind = kind.as_str(),
            pair = %pair,
            "registered subscription channel"
        );
        self.channels
            .insert(channel_id, ChannelRegistration { kind, pair });
    }

    /// Look up subscription metadata for a channel id
    pub fn lookup(&self, channel_id: i64) -> Option<&ChannelRegistration> {
        self.channels.get(&channel_id)
    }

    /// Decode one raw frame.
    ///
    /// Returns `Ok(None)` for an empty frame, `Ok(Some(..))` for a decoded
    /// event, and an error when the frame cannot be interpreted. Decode
    /// errors are per-message; the connection remains usable.
    pub fn decode(&mut self, input: &[u8]) -> Result<Option<MarketMessage>> {
        let Some(first) = input.iter().find(|byte| !byte.is_ascii_whitespace()) else {
            return Ok(None);
        };

        match first {
            b'{' => {
                let event: EventMessage = serde_json::from_slice(input)?;
                if event.event == "subscriptionStatus" {
                    self.register(
                        event.channel_id,
                        ChannelKind::from_name(&event.subscription.name),
                        event.pair.clone(),
                    );
                }
                Ok(Some(MarketMessage::Event(event)))
            }
            b'[' => self.decode_data_frame(input).map(Some),
            other => Err(KrakenError::decode(format!(
                "unrecognized frame start byte: 0x{other:02x}"
            ))),
        }
    }

    /// Decode an array-framed data message: `[channelId, payload, ...]`
    fn decode_data_frame(&self, input: &[u8]) -> Result<MarketMessage> {
        let frame: Vec<Value> = serde_json::from_slice(input)?;

        let channel = frame
            .first()
            .and_then(Value::as_i64)
            .ok_or_else(|| KrakenError::decode("failed to decode channel id"))?;

        let meta = self
            .lookup(channel)
            .ok_or(KrakenError::UnknownChannel { channel })?;

        let payload = frame.get(1);
        match meta.kind {
            ChannelKind::Ticker => match payload {
                Some(Value::Object(data)) => {
                    let mut ticker = decode_ticker(data)?;
                    ticker.pair = meta.pair.clone();
                    Ok(MarketMessage::Ticker(ticker))
                }
                _ => Err(KrakenError::decode("invalid type for ticker event")),
            },
            ChannelKind::Ohlc => match payload {
                Some(Value::Array(data)) => {
                    let mut ohlc = decode_ohlc(data)?;
                    ohlc.pair = meta.pair.clone();
                    Ok(MarketMessage::Ohlc(ohlc))
                }
                _ => Err(KrakenError::decode("invalid type for ohlc event")),
            },
            ChannelKind::Spread => match payload {
                Some(Value::Array(data)) => {
                    let mut spread = decode_spread(data)?;
                    spread.pair = meta.pair.clone();
                    Ok(MarketMessage::Spread(spread))
                }
                _ => Err(KrakenError::decode("invalid type for spread event")),
            },
            ChannelKind::Book | ChannelKind::Unknown => Err(KrakenError::UnsupportedChannel {
                name: meta.kind.as_str().to_string(),
            }),
        }
    }
}

/// Decode a ticker payload object into a Ticker
pub fn decode_ticker(data: &Map<String, Value>) -> Result<Ticker> {
    let ask = decode_best_quote(data, "a", "ask")?;
    let bid = decode_best_quote(data, "b", "bid")?;

    let close = field_array(data, "c", "close")?;
    let (close_price, close_lot_volume) = parse_float_pair(close, "close")?;

    let volume = decode_day_pair(data, "v", "volume")?;
    let vwap = decode_day_pair(data, "p", "vwap")?;

    let trades = field_array(data, "t", "trades")?;
    if trades.len() < 2 {
        return Err(KrakenError::decode("not enough values in trades"));
    }
    let trades = TradeCounts {
        today: parse_int(&trades[0], "trades today")?,
        last_24h: parse_int(&trades[1], "trades last 24 hours")?,
    };

    let low = decode_day_pair(data, "l", "low price")?;
    let high = decode_day_pair(data, "h", "high price")?;
    let open = decode_day_pair(data, "o", "open price")?;

    Ok(Ticker {
        pair: String::new(),
        ask,
        bid,
        close: ClosePrice {
            price: close_price,
            lot_volume: close_lot_volume,
        },
        volume,
        vwap,
        trades,
        low,
        high,
        open,
    })
}

fn decode_best_quote(data: &Map<String, Value>, key: &str, field: &str) -> Result<BestQuote> {
    let quote = field_array(data, key, field)?;
    if quote.len() < 3 {
        return Err(KrakenError::decode(format!("not enough values in {field}")));
    }
    Ok(BestQuote {
        price: parse_float(&quote[0], &format!("{field} price"))?,
        whole_lot_volume: parse_int(&quote[1], &format!("{field} whole lot volume"))?,
        lot_volume: parse_float(&quote[2], &format!("{field} lot volume"))?,
    })
}

fn decode_day_pair(data: &Map<String, Value>, key: &str, field: &str) -> Result<DayPair> {
    let items = field_array(data, key, field)?;
    let (today, last_24h) = parse_float_pair(items, field)?;
    Ok(DayPair { today, last_24h })
}

/// Decode a positional OHLC payload:
/// `[time, endtime, open, high, low, close, vwap, volume, count]`
pub fn decode_ohlc(data: &[Value]) -> Result<Ohlc> {
    if data.len() < 9 {
        return Err(KrakenError::decode("not enough values in ohlc"));
    }

    Ok(Ohlc {
        pair: String::new(),
        time: parse_float(&data[0], "ohlc time")?,
        end_time: parse_float(&data[1], "ohlc end time")?,
        open: parse_float(&data[2], "open")?,
        high: parse_float(&data[3], "high")?,
        low: parse_float(&data[4], "low")?,
        close: parse_float(&data[5], "close")?,
        vwap: parse_float(&data[6], "vwap")?,
        volume: parse_float(&data[7], "volume")?,
        count: parse_int(&data[8], "count")?,
    })
}

/// Decode a spread payload: `[bid, ask, timestamp]`
pub fn decode_spread(data: &[Value]) -> Result<Spread> {
    if data.len() < 3 {
        return Err(KrakenError::decode("not enough values in spread"));
    }

    Ok(Spread {
        pair: String::new(),
        bid: parse_float(&data[0], "spread bid")?,
        ask: parse_float(&data[1], "spread ask")?,
        timestamp: parse_float(&data[2], "spread timestamp")?,
    })
}

fn field_array<'a>(data: &'a Map<String, Value>, key: &str, field: &str) -> Result<&'a Vec<Value>> {
    match data.get(key) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(KrakenError::decode(format!("invalid {field}"))),
    }
}

/// Prices, volumes and timestamps arrive as strings on the wire
fn parse_float(value: &Value, field: &str) -> Result<f64> {
    let raw = value
        .as_str()
        .ok_or_else(|| KrakenError::decode(format!("invalid {field}: not a string")))?;
    raw.parse::<f64>()
        .map_err(|err| KrakenError::decode(format!("invalid {field}: {err}")))
}

fn parse_float_pair(items: &[Value], field: &str) -> Result<(f64, f64)> {
    if items.len() != 2 {
        return Err(KrakenError::decode(format!(
            "invalid number of elements in {field}"
        )));
    }
    Ok((
        parse_float(&items[0], field)?,
        parse_float(&items[1], field)?,
    ))
}

/// Counts arrive as JSON numbers and must be exact integers
fn parse_int(value: &Value, field: &str) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| KrakenError::decode(format!("invalid {field}: not an integer")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RAW_TICKER: &[u8] = br#"[2,{"a":["3571.10000",23,"23.14437961"],"b":["3571.00000",6,"6.04250191"],"c":["3571.00000","0.01500000"],"v":["302.04621455","3263.36256626"],"p":["3571.17077","3561.39554"],"t":[655,4730],"l":["3565.80000","3545.50000"],"h":["3577.40000","3571.60000"],"o":["3571.20000","3542.30000"]}]"#;

    const TICKER_ACK: &[u8] = br#"{"channelID":2,"event":"subscriptionStatus","status":"subscribed","pair":"XBT/USD","subscription":{"name":"ticker"}}"#;

    fn decoder_with_ticker_channel() -> FrameDecoder {
        let mut decoder = FrameDecoder::new();
        let ack = decoder
            .decode(TICKER_ACK)
            .expect("ack should decode")
            .expect("ack should produce an event");
        assert!(matches!(ack, MarketMessage::Event(_)));
        decoder
    }

    #[test]
    fn ack_then_ticker_frame_round_trip() {
        let mut decoder = decoder_with_ticker_channel();

        let message = decoder
            .decode(RAW_TICKER)
            .expect("ticker should decode")
            .expect("ticker frame is not a no-op");

        let MarketMessage::Ticker(ticker) = message else {
            panic!("expected a ticker, got {message:?}");
        };
        assert_eq!(ticker.pair, "XBT/USD");
        assert_eq!(ticker.ask.price, 3571.1);
        assert_eq!(ticker.ask.whole_lot_volume, 23);
        assert_eq!(ticker.ask.lot_volume, 23.14437961);
        assert_eq!(ticker.bid.price, 3571.0);
        assert_eq!(ticker.close.price, 3571.0);
        assert_eq!(ticker.close.lot_volume, 0.015);
        assert_eq!(ticker.trades.today, 655);
        assert_eq!(ticker.trades.last_24h, 4730);
        assert_eq!(ticker.low.today, 3565.8);
        assert_eq!(ticker.low.last_24h, 3545.5);
        assert_eq!(ticker.high.today, 3577.4);
        assert_eq!(ticker.open.last_24h, 3542.3);
    }

    #[test]
    fn decode_is_deterministic() {
        let mut decoder = decoder_with_ticker_channel();
        let first = decoder.decode(RAW_TICKER).unwrap();
        let second = decoder.decode(RAW_TICKER).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_channel_is_a_decode_error() {
        let mut decoder = FrameDecoder::new();
        let err = decoder
            .decode(RAW_TICKER)
            .expect_err("unregistered channel must fail");
        assert!(matches!(err, KrakenError::UnknownChannel { channel: 2 }));
        assert!(err.is_decode_error());
    }

    #[test]
    fn book_channel_is_unsupported() {
        let mut decoder = FrameDecoder::new();
        decoder.register(3, ChannelKind::Book, "XBT/USD");

        let err = decoder
            .decode(br#"[3,[["3571.1","1.0","1548521950.1"]]]"#)
            .expect_err("book frames are not decoded");
        match err {
            KrakenError::UnsupportedChannel { name } => assert_eq!(name, "book"),
            other => panic!("expected UnsupportedChannel, got {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_unsupported() {
        let mut decoder = FrameDecoder::new();
        decoder.register(9, ChannelKind::Unknown, "XBT/USD");

        let err = decoder
            .decode(br#"[9,{}]"#)
            .expect_err("unknown kinds are rejected");
        assert!(matches!(err, KrakenError::UnsupportedChannel { .. }));
    }

    #[test]
    fn reregistration_takes_latest_metadata() {
        let mut decoder = FrameDecoder::new();
        decoder.register(5, ChannelKind::Ticker, "XBT/USD");
        decoder.register(5, ChannelKind::Spread, "ETH/USD");

        let meta = decoder.lookup(5).expect("channel registered");
        assert_eq!(meta.kind, ChannelKind::Spread);
        assert_eq!(meta.pair, "ETH/USD");

        let message = decoder
            .decode(br#"[5,["3554.80000","3554.90000","1548521950.519272"]]"#)
            .expect("spread should decode")
            .expect("spread frame is not a no-op");
        let MarketMessage::Spread(spread) = message else {
            panic!("expected a spread, got {message:?}");
        };
        assert_eq!(spread.pair, "ETH/USD");
    }

    #[test]
    fn empty_frame_is_a_no_op() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.decode(b"").unwrap(), None);
        assert_eq!(decoder.decode(b"  \n\t ").unwrap(), None);
    }

    #[test]
    fn unrecognized_leading_byte_is_a_decode_error() {
        let mut decoder = FrameDecoder::new();
        let err = decoder.decode(b"xyz").expect_err("not a JSON frame");
        assert!(err.is_decode_error());
    }

    #[test]
    fn non_integer_channel_id_is_a_decode_error() {
        let mut decoder = FrameDecoder::new();
        let err = decoder
            .decode(br#"["2",{}]"#)
            .expect_err("channel id must be an integer");
        assert_eq!(err.to_string(), "failed to decode channel id");

        let err = decoder
            .decode(br#"[2.5,{}]"#)
            .expect_err("fractional channel id must be rejected");
        assert_eq!(err.to_string(), "failed to decode channel id");
    }

    #[test]
    fn ticker_payload_must_be_an_object() {
        let mut decoder = FrameDecoder::new();
        decoder.register(2, ChannelKind::Ticker, "XBT/USD");
        let err = decoder
            .decode(br#"[2,["3571.1"]]"#)
            .expect_err("array payload is not a ticker");
        assert_eq!(err.to_string(), "invalid type for ticker event");
    }

    #[test]
    fn decode_ticker_names_failing_field() {
        let payload = json!({"a": "not-an-array"});
        let data = payload.as_object().unwrap();
        let err = decode_ticker(data).expect_err("ask must be an array");
        assert_eq!(err.to_string(), "invalid ask");

        let payload = json!({"a": ["3571.10000", 23]});
        let err = decode_ticker(payload.as_object().unwrap()).expect_err("short ask");
        assert_eq!(err.to_string(), "not enough values in ask");
    }

    #[test]
    fn decode_ticker_rejects_string_counts() {
        // Whole lot volume arrives as a JSON number; a string is a protocol
        // violation, not something to coerce.
        let payload = json!({"a": ["3571.10000", "23", "23.14437961"]});
        let err = decode_ticker(payload.as_object().unwrap()).expect_err("string count");
        assert_eq!(
            err.to_string(),
            "invalid ask whole lot volume: not an integer"
        );
    }

    #[test]
    fn decode_ohlc_matches_wire_vector() {
        let data = json!([
            "1548482894.938321",
            "1548482940.000000",
            "3569.9",
            "3569.8",
            "3569.7",
            "3569.6",
            "3569.5",
            "0.25",
            1
        ]);
        let ohlc = decode_ohlc(data.as_array().unwrap()).expect("ohlc should decode");

        assert_eq!(ohlc.time, 1548482894.938321);
        assert_eq!(ohlc.end_time, 1548482940.0);
        assert_eq!(ohlc.open, 3569.9);
        assert_eq!(ohlc.high, 3569.8);
        assert_eq!(ohlc.low, 3569.7);
        assert_eq!(ohlc.close, 3569.6);
        assert_eq!(ohlc.vwap, 3569.5);
        assert_eq!(ohlc.volume, 0.25);
        assert_eq!(ohlc.count, 1);
    }

    #[test]
    fn decode_ohlc_rejects_short_arrays() {
        let data = json!(["1548482894.938321", "1548482940.000000"]);
        let err = decode_ohlc(data.as_array().unwrap()).expect_err("short ohlc");
        assert_eq!(err.to_string(), "not enough values in ohlc");
    }

    #[test]
    fn decode_spread_matches_wire_vector() {
        let data = json!(["3554.80000", "3554.90000", "1548521950.519272"]);
        let spread = decode_spread(data.as_array().unwrap()).expect("spread should decode");

        assert_eq!(spread.bid, 3554.8);
        assert_eq!(spread.ask, 3554.9);
        assert_eq!(spread.timestamp, 1548521950.519272);
    }

    #[test]
    fn decode_spread_rejects_short_arrays() {
        let data = json!(["3554.80000", "3554.90000"]);
        let err = decode_spread(data.as_array().unwrap()).expect_err("short spread");
        assert_eq!(err.to_string(), "not enough values in spread");
    }
}
