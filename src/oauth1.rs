use std::borrow::Cow;

use chrono::Utc;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode};
use sha1::Sha1;
use url::Url;
use uuid::Uuid;

use crate::credentials::Credentials;
use crate::error::{SignError, SignResult};
use crate::util;

type HmacSha1 = Hmac<Sha1>;

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Fixed `oauth_signature_method` value.
pub const OAUTH_SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Fixed `oauth_version` value.
pub const OAUTH_VERSION: &str = "1.0";

const OAUTH_PARAM_KEY_CONSUMER_KEY: &str = "oauth_consumer_key";
const OAUTH_PARAM_KEY_TOKEN: &str = "oauth_token";
const OAUTH_PARAM_KEY_SIGNATURE_METHOD: &str = "oauth_signature_method";
const OAUTH_PARAM_KEY_SIGNATURE: &str = "oauth_signature";
const OAUTH_PARAM_KEY_TIMESTAMP: &str = "oauth_timestamp";
const OAUTH_PARAM_KEY_NONCE: &str = "oauth_nonce";
const OAUTH_PARAM_KEY_VERSION: &str = "oauth_version";

// "realm" never takes part in the signature base string.
const REALM_PARAM_KEY: &str = "realm";

const AUTHORIZATION_PREFIX: &str = "Authorization: OAuth ";

/// The canonical OAuth parameter set produced by one signing operation.
///
/// Parameters are kept in rendering order (consumer key, token, signature
/// method, signature, timestamp, nonce, version) with their raw values;
/// both renderings percent-encode on the way out, so quoted header values
/// and query values escape identically.
pub struct SignedParameters {
    endpoint: String,
    query: Option<String>,
    pairs: Vec<(&'static str, String)>,
}

impl SignedParameters {
    /// Parameter name/value pairs in rendering order, values unencoded.
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn signature(&self) -> &str {
        self.value_of(OAUTH_PARAM_KEY_SIGNATURE)
    }

    pub fn nonce(&self) -> &str {
        self.value_of(OAUTH_PARAM_KEY_NONCE)
    }

    pub fn timestamp(&self) -> &str {
        self.value_of(OAUTH_PARAM_KEY_TIMESTAMP)
    }

    fn value_of(&self, key: &str) -> &str {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }

    /// Render as a full `Authorization: OAuth ...` header line.
    pub fn authorization_header(&self) -> String {
        let fields = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
            .collect::<Vec<String>>()
            .join(",");
        format!("{}{}", AUTHORIZATION_PREFIX, fields)
    }

    /// Render as the target URL with the OAuth parameters appended to its
    /// query string.
    pub fn signed_url(&self) -> String {
        let oauth_query = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, percent_encode(v)))
            .collect::<Vec<String>>()
            .join("&");
        match &self.query {
            Some(query) if !query.is_empty() => {
                format!("{}?{}&{}", self.endpoint, query, oauth_query)
            }
            _ => format!("{}?{}", self.endpoint, oauth_query),
        }
    }
}

/// Single-shot OAuth 1.0a HMAC-SHA1 signer.
///
/// Nonce and timestamp are generated per call (v4 UUID, current UTC time)
/// unless pinned through the builder, which keeps signatures reproducible
/// under test.
pub struct Signer<'a> {
    credentials: &'a Credentials,
    nonce: Option<String>,
    timestamp: Option<i64>,
}

impl<'a> Signer<'a> {
    pub fn new(credentials: &'a Credentials) -> Self {
        Signer {
            credentials,
            nonce: None,
            timestamp: None,
        }
    }

    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Parse `url` and sign it. See [`Signer::sign`].
    pub fn sign_str(&self, url: &str, http_method: &str) -> SignResult<SignedParameters> {
        let url = Url::parse(url)?;
        self.sign(&url, http_method)
    }

    /// Generate the OAuth signature for `url` with `http_method`.
    ///
    /// Query parameters already on the URL take part in the signature base
    /// string; the fragment does not. The method is uppercased before it
    /// enters the base string.
    pub fn sign(&self, url: &Url, http_method: &str) -> SignResult<SignedParameters> {
        self.credentials.ensure_complete()?;
        if url.cannot_be_a_base() {
            return Err(SignError::UnsupportedUrl(url.as_str().to_string()));
        }

        let (endpoint, query_pairs) = util::endpoint_and_query(url);
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Utc::now().timestamp())
            .to_string();
        let nonce = self
            .nonce
            .clone()
            .unwrap_or_else(|| format!("{}", Uuid::new_v4()));
        let http_method = http_method.to_ascii_uppercase();

        // protocol parameters, percent-encoded for normalization
        let basic_params = vec![
            (OAUTH_PARAM_KEY_CONSUMER_KEY, self.credentials.consumer_key.as_str()),
            (OAUTH_PARAM_KEY_TOKEN, self.credentials.token_key.as_str()),
            (OAUTH_PARAM_KEY_SIGNATURE_METHOD, OAUTH_SIGNATURE_METHOD),
            (OAUTH_PARAM_KEY_TIMESTAMP, timestamp.as_str()),
            (OAUTH_PARAM_KEY_NONCE, nonce.as_str()),
            (OAUTH_PARAM_KEY_VERSION, OAUTH_VERSION),
        ]
        .into_iter()
        .map(|(k, v)| (Cow::from(percent_encode(k)), Cow::from(percent_encode(v))))
        .collect::<Vec<(Cow<str>, Cow<str>)>>();

        // query parameters ride along in their already-encoded form
        let query_params = query_pairs
            .iter()
            .map(|&(k, v)| (Cow::from(k), Cow::from(v)))
            .collect::<Vec<(Cow<str>, Cow<str>)>>();

        // join, then byte-wise sort by key and value
        let mut params = [basic_params, query_params].concat::<(Cow<str>, Cow<str>)>();
        params.sort();

        let param_str = params
            .iter()
            .filter(|(k, _)| k != REALM_PARAM_KEY)
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<String>>()
            .join("&");

        let base_str = format!(
            "{}&{}&{}",
            percent_encode(&http_method),
            percent_encode(&endpoint),
            percent_encode(&param_str)
        );

        let sign_key = format!(
            "{}&{}",
            percent_encode(&self.credentials.consumer_secret),
            percent_encode(&self.credentials.token_secret)
        );

        // NOTE: HMAC-SHA1 accepts keys of any length, so this never fails.
        let mut mac = HmacSha1::new_varkey(sign_key.as_bytes()).unwrap();
        mac.input(base_str.as_bytes());
        let signature = base64::encode(&mac.result().code());

        let pairs = vec![
            (OAUTH_PARAM_KEY_CONSUMER_KEY, self.credentials.consumer_key.clone()),
            (OAUTH_PARAM_KEY_TOKEN, self.credentials.token_key.clone()),
            (OAUTH_PARAM_KEY_SIGNATURE_METHOD, OAUTH_SIGNATURE_METHOD.to_string()),
            (OAUTH_PARAM_KEY_SIGNATURE, signature),
            (OAUTH_PARAM_KEY_TIMESTAMP, timestamp),
            (OAUTH_PARAM_KEY_NONCE, nonce),
            (OAUTH_PARAM_KEY_VERSION, OAUTH_VERSION.to_string()),
        ];
        Ok(SignedParameters {
            endpoint,
            query: url.query().map(|q| q.to_string()),
            pairs,
        })
    }
}

fn percent_encode(input: &str) -> PercentEncode<'_> {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS)
}
