/*
[INPUT]:  Endpoint path, nonce and url-encoded post body
[OUTPUT]: Signed request header value (API-Sign)
[POS]:    HTTP layer - request signing for private endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

type HmacSha512 = Hmac<Sha512>;

/// Signs private REST requests with the account's API secret.
///
/// The `API-Sign` header is
/// `base64(HMAC-SHA512(path || SHA256(nonce || postdata), secret))`
/// where `secret` is the base64-decoded API secret.
pub struct RequestSigner {
    secret: Vec<u8>,
}

impl RequestSigner {
    /// Create a new request signer from the decoded API secret
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Sign one request
    pub fn sign(&self, path: &str, nonce: i64, post_data: &str) -> String {
        let mut digest = Sha256::new();
        digest.update(nonce.to_string().as_bytes());
        digest.update(post_data.as_bytes());

        // HMAC keys of any length are accepted, so new_from_slice cannot fail.
        let mut mac = HmacSha512::new_from_slice(&self.secret)
            .unwrap_or_else(|_| unreachable!("HMAC-SHA512 accepts any key length"));
        mac.update(path.as_bytes());
        mac.update(&digest.finalize());

        BASE64.encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_matches_published_vector() {
        // Test vector from the exchange's REST authentication docs.
        let secret = BASE64
            .decode(
                "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==",
            )
            .expect("secret should be valid base64");
        let signer = RequestSigner::new(secret);

        let signature = signer.sign(
            "/0/private/AddOrder",
            1_616_492_376_594,
            "nonce=1616492376594&ordertype=limit&pair=XBTUSD&price=37500&type=buy&volume=1.25",
        );

        assert_eq!(
            signature,
            "4/dpxb3iT4tp/ZCVEwSnEsLxx0bqyhLpdfOpc6fn7OR8+UClSV5n9E6aSS8MPtnRfp32lhO6OLxkjaLiPdiYsQ=="
        );
    }

    #[test]
    fn test_sign_is_deterministic() {
        let signer = RequestSigner::new(b"secret".to_vec());
        let a = signer.sign("/0/private/CancelOrder", 1, "nonce=1&txid=ABC");
        let b = signer.sign("/0/private/CancelOrder", 1, "nonce=1&txid=ABC");
        assert_eq!(a, b);
        assert_eq!(BASE64.decode(&a).unwrap().len(), 64);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let signer = RequestSigner::new(b"topsecret".to_vec());
        let rendered = format!("{:?}", signer);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("topsecret"));
    }
}
