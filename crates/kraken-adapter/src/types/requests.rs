/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderSide, OrderType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOrderRequest {
    pub pair: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ref: Option<i32>,
    #[serde(default)]
    pub validate_only: bool,
}

impl AddOrderRequest {
    /// Render the request as form parameters for the AddOrder endpoint.
    ///
    /// Prices and volumes are sent with eight decimal places.
    pub(crate) fn to_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("pair".to_string(), self.pair.clone());
        params.insert("type".to_string(), self.side.as_str().to_string());
        params.insert("ordertype".to_string(), self.order_type.as_str().to_string());
        if let Some(price) = self.price {
            params.insert("price".to_string(), format!("{price:.8}"));
        }
        params.insert("volume".to_string(), format!("{:.8}", self.volume));
        if let Some(user_ref) = self.user_ref {
            params.insert("userref".to_string(), user_ref.to_string());
        }
        if self.validate_only {
            params.insert("validate".to_string(), "1".to_string());
        }
        params
    }
}
