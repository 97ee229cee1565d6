//! OAuth 1.0a request signing
//!
//! Requests are signed one-legged with HMAC-SHA1: the app's consumer key pair and
//! the account's access token pair are both known up front, so no token dance is
//! needed. The signature and every `oauth_*` parameter travel in the query string
//! of the signed URL, which can be handed to the HTTP layer unchanged.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::RngCore;
use reqwest::Method;
use sha1::Sha1;
use url::Url;

use crate::config::Credentials;
use crate::error::{Error, Result};

/// Everything except the RFC 3986 unreserved set: ALPHA / DIGIT / "-" / "." / "_" / "~"
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// A request ready for the HTTP layer
#[derive(Clone, Debug)]
pub struct AuthenticatedRequest {
    /// HTTP method the signature was computed for
    pub method: Method,
    /// Target URL including the OAuth parameters and signature
    pub url: Url,
}

impl AuthenticatedRequest {
    /// The `oauth_signature` query value, if present
    pub fn signature(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == "oauth_signature")
            .map(|(_, v)| v.into_owned())
    }
}

/// Sign `url` for `method` with a fresh nonce and the current timestamp
pub fn sign(method: Method, url: &str, credentials: &Credentials) -> Result<AuthenticatedRequest> {
    let timestamp = chrono::Utc::now().timestamp();
    sign_with(method, url, credentials, &generate_nonce(), timestamp)
}

/// Sign `url` with an explicit nonce and timestamp
///
/// The result is fully deterministic, which makes signatures reproducible.
pub fn sign_with(
    method: Method,
    url: &str,
    credentials: &Credentials,
    nonce: &str,
    timestamp: i64,
) -> Result<AuthenticatedRequest> {
    let mut url = Url::parse(url).map_err(|e| Error::Signing(format!("bad URL {url:?}: {e}")))?;
    let base_url = base_string_uri(&url)?;

    let timestamp = timestamp.to_string();
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    for (key, value) in [
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", SIGNATURE_METHOD),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", credentials.access_token.as_str()),
        ("oauth_version", OAUTH_VERSION),
    ] {
        params.push((key.to_string(), value.to_string()));
    }

    // Sort on the encoded pairs, as the base string compares encoded bytes
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = join_pairs(&encoded);

    let base_string = format!(
        "{}&{}&{}",
        method.as_str().to_uppercase(),
        percent_encode(&base_url),
        percent_encode(&param_string)
    );

    let signing_key = format!(
        "{}&{}",
        percent_encode(&credentials.consumer_secret),
        percent_encode(&credentials.access_token_secret)
    );

    let signature = hmac_sha1(&signing_key, &base_string)?;
    encoded.push(("oauth_signature".to_string(), percent_encode(&signature)));

    url.set_query(Some(&join_pairs(&encoded)));
    tracing::trace!(base_string = %base_string, "signed request");

    Ok(AuthenticatedRequest { method, url })
}

/// `scheme://host[:port]/path` with default ports dropped
fn base_string_uri(url: &Url) -> Result<String> {
    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(Error::Signing(format!("unsupported URL scheme '{scheme}'")));
    }

    let host = url
        .host_str()
        .ok_or_else(|| Error::Signing(format!("URL '{url}' has no host")))?;

    // Url already lowercases scheme and host and drops default ports
    Ok(match url.port() {
        Some(port) => format!("{scheme}://{host}:{port}{}", url.path()),
        None => format!("{scheme}://{host}{}", url.path()),
    })
}

fn join_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

// Used for query keys and values, the base string parts and the signing key
fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

/// `oauth_nonce` value: 16 random bytes, lowercase hex
fn generate_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// `oauth_signature` value before percent-encoding
fn hmac_sha1(key: &str, base_string: &str) -> Result<String> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| Error::Signing(format!("bad signing key: {e}")))?;
    mac.update(base_string.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
