/*
[INPUT]:  Test configuration requirements
[OUTPUT]: Shared helpers for integration tests
[POS]:    Integration tests - common setup
[UPDATE]: When test setup needs change
*/

use kraken_adapter::{ClientConfig, Credentials, KrakenClient};
use wiremock::MockServer;

/// Valid base64; signatures are never verified by the mock server
pub const TEST_API_SECRET: &str = "c2VjcmV0LXNpZ25pbmcta2V5LWZvci10ZXN0cw==";

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

#[allow(dead_code)]
pub fn test_credentials() -> Credentials {
    Credentials::new("test-api-key", TEST_API_SECRET).expect("test credentials")
}

#[allow(dead_code)]
pub fn client_for(base_url: &str) -> KrakenClient {
    KrakenClient::with_config_and_base_url(ClientConfig::default(), base_url)
        .expect("client init")
}
