/*
[INPUT]:  Query parameters for public endpoints
[OUTPUT]: Market metadata (server time, tradable asset pairs)
[POS]:    HTTP layer - public endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use reqwest::Method;

use crate::http::{KrakenClient, Result};
use crate::types::{AssetPairsResponse, TimeResponse};

impl KrakenClient {
    /// Query the exchange's server time
    ///
    /// GET /0/public/Time
    pub async fn server_time(&self) -> Result<TimeResponse> {
        let builder = self.public_request(Method::GET, "/0/public/Time")?;
        self.send_json(builder).await
    }

    /// Query the full set of tradable asset pairs
    ///
    /// GET /0/public/AssetPairs
    pub async fn asset_pairs(&self) -> Result<AssetPairsResponse> {
        let builder = self.public_request(Method::GET, "/0/public/AssetPairs")?;
        self.send_json(builder).await
    }
}
