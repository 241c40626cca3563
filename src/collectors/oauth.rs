//! OAuth 1.0a request signing (HMAC-SHA1).

use super::CollectionError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Everything except RFC 3986 unreserved characters
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// RFC 3986 percent-encoding of UTF-8 text
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, RFC3986).to_string()
}

/// Consumer and token key pairs used to sign a request
#[derive(Clone, Copy)]
pub struct OAuthKeys<'a> {
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
    pub token: &'a str,
    pub token_secret: &'a str,
}

/// Signs a single request
pub struct OAuthSigner<'a> {
    keys: OAuthKeys<'a>,
    nonce: String,
    timestamp: i64,
}

impl<'a> OAuthSigner<'a> {
    /// Signer with a fresh random nonce and the current time
    pub fn new(keys: OAuthKeys<'a>) -> Self {
        Self {
            keys,
            nonce: uuid::Uuid::new_v4().simple().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Signer with a fixed nonce and timestamp
    pub fn with_nonce(keys: OAuthKeys<'a>, nonce: impl Into<String>, timestamp: i64) -> Self {
        Self {
            keys,
            nonce: nonce.into(),
            timestamp,
        }
    }

    fn oauth_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("oauth_consumer_key", self.keys.consumer_key.to_string()),
            ("oauth_nonce", self.nonce.clone()),
            ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp", self.timestamp.to_string()),
            ("oauth_token", self.keys.token.to_string()),
            ("oauth_version", OAUTH_VERSION.to_string()),
        ]
    }

    /// `METHOD&url&params` with every part percent-encoded
    pub fn signature_base_string(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
    ) -> String {
        let mut encoded: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .chain(
                self.oauth_params()
                    .into_iter()
                    .map(|(k, v)| (percent_encode(k), percent_encode(&v))),
            )
            .collect();
        encoded.sort();

        let parameter_string = encoded
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}&{}&{}",
            method.to_uppercase(),
            percent_encode(url),
            percent_encode(&parameter_string)
        )
    }

    /// Base64 HMAC-SHA1 of the base string
    pub fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<String, CollectionError> {
        let key = format!(
            "{}&{}",
            percent_encode(self.keys.consumer_secret),
            percent_encode(self.keys.token_secret)
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| CollectionError::Auth(e.to_string()))?;
        mac.update(self.signature_base_string(method, url, params).as_bytes());

        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<String, CollectionError> {
        let signature = self.signature(method, url, params)?;

        let mut fields = self.oauth_params();
        fields.push(("oauth_signature", signature));
        fields.sort();

        let header = fields
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {header}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from the Twitter developer documentation.
    const KEYS: OAuthKeys<'static> = OAuthKeys {
        consumer_key: "xvz1evFS4wEEPTGEFPHBog",
        consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
        token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
    };
    const URL: &str = "https://api.twitter.com/1.1/statuses/update.json";
    const PARAMS: &[(&str, &str)] = &[
        ("include_entities", "true"),
        ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
    ];

    fn signer() -> OAuthSigner<'static> {
        OAuthSigner::with_nonce(KEYS, "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg", 1318622958)
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
        assert_eq!(percent_encode("Dogs, Cats & Mice"), "Dogs%2C%20Cats%20%26%20Mice");
        assert_eq!(percent_encode("a-b.c_d~e"), "a-b.c_d~e");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
        assert_eq!(percent_encode("market trends"), "market%20trends");
        assert_eq!(percent_encode("a*b/c"), "a%2Ab%2Fc");
    }

    #[test]
    fn test_base_string() {
        let base = signer().signature_base_string("post", URL, PARAMS);
        assert!(base.starts_with(
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog"
        ));
        assert!(base.ends_with(
            "status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521"
        ));
    }

    #[test]
    fn test_signature_matches_reference() {
        let signature = signer().signature("POST", URL, PARAMS).unwrap();
        assert_eq!(signature, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn test_authorization_header() {
        let header = signer().authorization_header("POST", URL, PARAMS).unwrap();
        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.ends_with("oauth_version=\"1.0\""));
    }

    #[test]
    fn test_fresh_nonces_differ() {
        let a = OAuthSigner::new(KEYS);
        let b = OAuthSigner::new(KEYS);
        assert_ne!(a.nonce, b.nonce);
    }
}
