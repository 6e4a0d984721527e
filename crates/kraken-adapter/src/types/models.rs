/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// One entry from the AssetPairs endpoint.
///
/// Some pairs (dark pools) have no websocket name; `wsname` defaults to
/// empty for those.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetPairInfo {
    #[serde(default)]
    pub altname: String,
    #[serde(default)]
    pub wsname: String,
}
