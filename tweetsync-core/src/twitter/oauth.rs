//! OAuth 1.0a request signing (HMAC-SHA1), as required by the v1.1 REST API.

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::config::TwitterCredentials;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 percent-encoding: only `A-Z a-z 0-9 - . _ ~` pass through.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// `METHOD&url&params`, with parameters encoded then sorted by key and value.
pub fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}

pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> Result<String> {
    let key = format!("{}&{}", percent_encode(consumer_secret), percent_encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| anyhow!("Invalid OAuth signing key: {}", e))?;
    mac.update(base_string.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Builds the `Authorization: OAuth ...` header value for one request.
/// `request_params` are the query (or form) parameters that will be sent.
pub fn authorization_header(
    credentials: &TwitterCredentials,
    method: &str,
    url: &str,
    request_params: &[(String, String)],
    nonce: &str,
    timestamp: i64,
) -> Result<String> {
    let mut oauth_params = vec![
        ("oauth_consumer_key".to_string(), credentials.consumer_key.clone()),
        ("oauth_nonce".to_string(), nonce.to_string()),
        ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        ("oauth_token".to_string(), credentials.access_token.clone()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ];

    let mut all_params = oauth_params.clone();
    all_params.extend(request_params.iter().cloned());

    let base_string = signature_base_string(method, url, &all_params);
    let signature = sign(
        &base_string,
        &credentials.consumer_secret,
        &credentials.access_token_secret,
    )?;

    oauth_params.push(("oauth_signature".to_string(), signature));
    oauth_params.sort();

    let header = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {}", header))
}

/// Same as [`authorization_header`] with a fresh nonce and the current time.
pub fn sign_request(
    credentials: &TwitterCredentials,
    method: &str,
    url: &str,
    request_params: &[(String, String)],
) -> Result<String> {
    authorization_header(
        credentials,
        method,
        url,
        request_params,
        &generate_nonce(),
        Utc::now().timestamp(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference request from the "Creating a signature" walkthrough in the
    // Twitter developer documentation.
    fn reference_credentials() -> TwitterCredentials {
        TwitterCredentials {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".to_string(),
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_string(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".to_string(),
            access_token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".to_string(),
        }
    }

    const REFERENCE_URL: &str = "https://api.twitter.com/1.1/statuses/update.json";
    const REFERENCE_NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
    const REFERENCE_TIMESTAMP: i64 = 1318622958;

    fn reference_params() -> Vec<(String, String)> {
        vec![
            (
                "status".to_string(),
                "Hello Ladies + Gentlemen, a signed OAuth request!".to_string(),
            ),
            ("include_entities".to_string(), "true".to_string()),
        ]
    }

    #[test]
    fn percent_encodes_reserved_characters() {
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("request!"), "request%21");
        assert_eq!(percent_encode("a-b.c_d~e"), "a-b.c_d~e");
    }

    #[test]
    fn base_string_matches_reference() {
        let credentials = reference_credentials();
        let mut params = vec![
            ("oauth_consumer_key".to_string(), credentials.consumer_key.clone()),
            ("oauth_nonce".to_string(), REFERENCE_NONCE.to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), REFERENCE_TIMESTAMP.to_string()),
            ("oauth_token".to_string(), credentials.access_token.clone()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];
        params.extend(reference_params());

        let base = signature_base_string("post", REFERENCE_URL, &params);
        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
             include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
             oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
             oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26\
             oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
             oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen\
             %252C%2520a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn header_carries_reference_signature() {
        let header = authorization_header(
            &reference_credentials(),
            "POST",
            REFERENCE_URL,
            &reference_params(),
            REFERENCE_NONCE,
            REFERENCE_TIMESTAMP,
        )
        .unwrap();

        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(!header.contains("status="));
    }

    #[test]
    fn nonce_is_alphanumeric() {
        let nonce = generate_nonce();
        assert_eq!(nonce.len(), 32);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(nonce, generate_nonce());
    }
}
