/*
[INPUT]:  Order requests with API-Key/API-Sign headers
[OUTPUT]: Order responses and confirmation
[POS]:    HTTP layer - private trading endpoints (require signed requests)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use std::collections::BTreeMap;

use crate::http::{KrakenClient, Result};
use crate::types::{AddOrderRequest, AddOrderResponse, CancelOrderResponse};

impl KrakenClient {
    /// Place a new order
    ///
    /// POST /0/private/AddOrder
    /// Requires: API-Key + API-Sign headers
    pub async fn add_order(&self, order: AddOrderRequest) -> Result<AddOrderResponse> {
        self.private_post("/0/private/AddOrder", order.to_params())
            .await
    }

    /// Cancel an open order by transaction id
    ///
    /// POST /0/private/CancelOrder
    /// Requires: API-Key + API-Sign headers
    pub async fn cancel_order(&self, txid: &str) -> Result<CancelOrderResponse> {
        let mut params = BTreeMap::new();
        params.insert("txid".to_string(), txid.to_string());
        self.private_post("/0/private/CancelOrder", params).await
    }
}
