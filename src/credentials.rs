use std::fmt;

use serde::Deserialize;

use crate::error::{SignError, SignResult};

/// The long-lived OAuth 1.0a credential set held by the SSO store.
///
/// Fetched once per invocation and immutable afterwards; this tool never
/// writes it back.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token_key: String,
    pub token_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token_key: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token_key: token_key.into(),
            token_secret: token_secret.into(),
        }
    }

    /// All four fields must be populated before the set is usable for signing.
    pub fn ensure_complete(&self) -> SignResult<()> {
        let fields: [(&'static str, &str); 4] = [
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
            ("token_key", &self.token_key),
            ("token_secret", &self.token_secret),
        ];
        for &(name, value) in &fields {
            if value.is_empty() {
                return Err(SignError::EmptyCredential(name));
            }
        }
        Ok(())
    }
}

// secrets stay out of log output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token_key", &self.token_key)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_stored_record() {
        let record = r#"{
            "consumer_key": "ck",
            "consumer_secret": "cs",
            "token_key": "tk",
            "token_secret": "ts"
        }"#;
        let credentials: Credentials = serde_json::from_str(record).unwrap();
        assert_eq!(credentials.consumer_key, "ck");
        assert_eq!(credentials.consumer_secret, "cs");
        assert_eq!(credentials.token_key, "tk");
        assert_eq!(credentials.token_secret, "ts");
        assert!(credentials.ensure_complete().is_ok());
    }

    #[test]
    fn empty_fields_rejected() {
        let credentials = Credentials::new("ck", "", "tk", "ts");
        match credentials.ensure_complete() {
            Err(SignError::EmptyCredential(field)) => assert_eq!(field, "consumer_secret"),
            other => panic!("expected EmptyCredential, got {:?}", other),
        }
        let credentials = Credentials::new("ck", "cs", "tk", "");
        match credentials.ensure_complete() {
            Err(SignError::EmptyCredential(field)) => assert_eq!(field, "token_secret"),
            other => panic!("expected EmptyCredential, got {:?}", other),
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let credentials = Credentials::new("ck", "super-secret", "tk", "also-secret");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("ck"));
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("also-secret"));
    }
}
