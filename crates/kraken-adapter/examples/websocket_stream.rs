/*
[INPUT]:  Pair names to subscribe to
[OUTPUT]: Live market data printed per event
[POS]:    Examples - WebSocket market data stream
[UPDATE]: When the subscription or decode surface changes
*/

use kraken_adapter::{Interval, KrakenWebSocket, MarketMessage};

/// Example: stream ticker, OHLC and spread events for a few pairs
#[tokio::main]
async fn main() {
    let mut ws = match KrakenWebSocket::connect().await {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("Failed to connect: {}", e);
            return;
        }
    };

    if let Err(e) = ws.subscribe_ticker(["XBT/USD", "ETH/USD", "XLM/USD"]).await {
        eprintln!("Failed to subscribe to tickers: {}", e);
        return;
    }
    if let Err(e) = ws.subscribe_ohlc(Interval::Min1, ["XBT/USD"]).await {
        eprintln!("Failed to subscribe to ohlc: {}", e);
        return;
    }
    if let Err(e) = ws.subscribe_spread(["XBT/USD"]).await {
        eprintln!("Failed to subscribe to spread: {}", e);
        return;
    }

    loop {
        match ws.next_event().await {
            Ok(Some(MarketMessage::Event(event))) => {
                println!("Event: {} {}", event.event, event.status);
            }
            Ok(Some(MarketMessage::Ticker(ticker))) => {
                println!(
                    "Ticker {}: ask {} bid {}",
                    ticker.pair, ticker.ask.price, ticker.bid.price
                );
            }
            Ok(Some(MarketMessage::Ohlc(ohlc))) => {
                println!(
                    "OHLC {}: o {} h {} l {} c {} ({} trades)",
                    ohlc.pair, ohlc.open, ohlc.high, ohlc.low, ohlc.close, ohlc.count
                );
            }
            Ok(Some(MarketMessage::Spread(spread))) => {
                println!("Spread {}: bid {} ask {}", spread.pair, spread.bid, spread.ask);
            }
            Ok(None) => {
                println!("Connection closed");
                return;
            }
            Err(e) if e.is_decode_error() => {
                // Per-message failure; keep reading from the same connection.
                eprintln!("Decode error: {}", e);
            }
            Err(e) => {
                eprintln!("Transport error: {}", e);
                return;
            }
        }
    }
}
