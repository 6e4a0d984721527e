/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::models::AssetPairInfo;

// Every REST response carries an `error` array at the top level, even on
// success. A 200 with a non-empty error array is an exchange-level failure.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeResponse {
    #[serde(default)]
    pub error: Vec<String>,
    #[serde(default)]
    pub result: TimeResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeResult {
    #[serde(default)]
    pub unixtime: i64,
    #[serde(default)]
    pub rfc1123: String,
}

impl TimeResponse {
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddOrderResponse {
    #[serde(default)]
    pub error: Vec<String>,
    #[serde(default)]
    pub result: AddOrderResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddOrderResult {
    #[serde(default)]
    pub descr: OrderDescription,
    #[serde(default)]
    pub txid: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDescription {
    #[serde(default)]
    pub order: String,
}

impl AddOrderResponse {
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderResponse {
    #[serde(default)]
    pub error: Vec<String>,
    #[serde(default)]
    pub result: CancelOrderResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderResult {
    #[serde(default)]
    pub count: i64,
}

impl CancelOrderResponse {
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetPairsResponse {
    #[serde(default)]
    pub error: Vec<String>,
    #[serde(default)]
    pub result: HashMap<String, AssetPairInfo>,
}

impl AssetPairsResponse {
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}
