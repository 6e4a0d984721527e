/*
[INPUT]:  Common pair names and AssetPairs responses
[OUTPUT]: Exchange-specific pair names for REST and WebSocket use
[POS]:    Data layer - pair name aliasing
[UPDATE]: When adding builtin aliases or changing lookup behavior
*/

use std::collections::HashMap;

use crate::types::AssetPairsResponse;

/// Pair name aliasing tables, built once and passed to whatever needs them.
///
/// The exchange uses different pair spellings for its REST API
/// (e.g. `XXBTZUSD`) and its WebSocket feed (e.g. `XBT/USD`). Lookups take a
/// common spelling such as `BTC/USD` or `BTCUSD` and fall back to the input
/// when no alias is known.
#[derive(Debug, Clone, Default)]
pub struct PairAliases {
    rest: HashMap<String, String>,
    ws: HashMap<String, String>,
}

impl PairAliases {
    /// Empty tables; every lookup falls through to the input
    pub fn new() -> Self {
        Self::default()
    }

    /// The static alias table for the most commonly traded pairs
    pub fn builtin() -> Self {
        let mut aliases = Self::new();

        for (common, rest) in [
            ("XBTUSD", "XXBTZUSD"),
            ("BTCUSD", "XXBTZUSD"),
            ("XLMUSD", "XXLMZUSD"),
            ("XLMBTC", "XXLMXXBT"),
            ("XLMXBT", "XXLMXXBT"),
            ("DASHUSD", "XDASHZUSD"),
            ("DASHXBT", "XDASHXXBT"),
            ("XMRUSD", "XXMRZUSD"),
            ("XMRXBT", "XXMRXXBT"),
            ("LTCXBT", "XLTCXXBT"),
            ("LTCBTC", "XLTCXXBT"),
            ("LTCUSD", "XLTCZUSD"),
        ] {
            aliases.rest.insert(common.to_string(), rest.to_string());
        }

        for (common, ws) in [
            ("BTCUSD", "XBT/USD"),
            ("XMRUSD", "XMR/USD"),
            ("DASHUSD", "DASH/USD"),
            ("LTCXBT", "LTC/XBT"),
            ("LTCBTC", "LTC/XBT"),
        ] {
            aliases.ws.insert(common.to_string(), ws.to_string());
        }

        aliases
    }

    /// Build alias tables from a live AssetPairs response.
    ///
    /// Both the altname and the websocket name resolve back to the pair's
    /// canonical REST key.
    pub fn from_asset_pairs(response: &AssetPairsResponse) -> Self {
        let mut aliases = Self::new();
        for (pair, info) in &response.result {
            if !info.altname.is_empty() {
                aliases
                    .rest
                    .insert(normalize(&info.altname), pair.clone());
            }
            if !info.wsname.is_empty() {
                aliases.ws.insert(normalize(&info.altname), info.wsname.clone());
                aliases.rest.insert(normalize(&info.wsname), pair.clone());
            }
        }
        aliases
    }

    /// Given a common pair naming, return the REST API format
    pub fn rest_pair<'a>(&'a self, input: &'a str) -> &'a str {
        match self.rest.get(&normalize(input)) {
            Some(pair) => pair,
            None => input,
        }
    }

    /// Given a common pair naming, return the WebSocket format
    pub fn ws_pair<'a>(&'a self, input: &'a str) -> &'a str {
        match self.ws.get(&normalize(input)) {
            Some(pair) => pair,
            None => input,
        }
    }
}

fn normalize(input: &str) -> String {
    input.replacen('/', "", 1).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("BTCUSD", "XXBTZUSD")]
    #[case("BTC/USD", "XXBTZUSD")]
    #[case("btcusd", "XXBTZUSD")]
    #[case("LTC/BTC", "XLTCXXBT")]
    #[case("DOGEUSD", "DOGEUSD")]
    fn builtin_rest_pairs(#[case] input: &str, #[case] expected: &str) {
        let aliases = PairAliases::builtin();
        assert_eq!(aliases.rest_pair(input), expected);
    }

    #[rstest]
    #[case("BTCUSD", "XBT/USD")]
    #[case("BTC/USD", "XBT/USD")]
    #[case("LTCBTC", "LTC/XBT")]
    #[case("ETH/USD", "ETH/USD")]
    fn builtin_ws_pairs(#[case] input: &str, #[case] expected: &str) {
        let aliases = PairAliases::builtin();
        assert_eq!(aliases.ws_pair(input), expected);
    }

    #[test]
    fn from_asset_pairs_maps_altname_and_wsname() {
        let response: AssetPairsResponse = serde_json::from_str(
            r#"{"error":[],"result":{"XXBTZUSD":{"altname":"XBTUSD","wsname":"XBT/USD"}}}"#,
        )
        .expect("response should decode");

        let aliases = PairAliases::from_asset_pairs(&response);
        assert_eq!(aliases.rest_pair("XBTUSD"), "XXBTZUSD");
        assert_eq!(aliases.rest_pair("XBT/USD"), "XXBTZUSD");
        assert_eq!(aliases.ws_pair("XBTUSD"), "XBT/USD");
    }
}
