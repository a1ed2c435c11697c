use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::credentials::Credentials;
use crate::error::{ProviderError, ProviderResult};

/// Where the SSO store keeps the credential record.
const KEYRING_SERVICE: &str = "ssosign";
const KEYRING_ACCOUNT: &str = "oauth";

/// One credential request per process invocation.
///
/// `request` consumes the store: it is issued once and resolves exactly once,
/// with either a fully populated credential set or a terminal error. There
/// are no retries and no partial results.
pub trait CredentialStore {
    fn request(self) -> ProviderResult<Credentials>;
}

/// Credential store backed by the platform keyring (Secret Service,
/// macOS Keychain, Windows Credential Manager).
///
/// The SSO store keeps one JSON document with the four credential fields
/// under a fixed service/account pair; this adapter only reads it.
pub struct KeyringStore {
    service: String,
    account: String,
}

impl KeyringStore {
    pub fn new() -> Self {
        KeyringStore {
            service: KEYRING_SERVICE.to_string(),
            account: KEYRING_ACCOUNT.to_string(),
        }
    }

    pub fn at(service: impl Into<String>, account: impl Into<String>) -> Self {
        KeyringStore {
            service: service.into(),
            account: account.into(),
        }
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        KeyringStore::new()
    }
}

impl CredentialStore for KeyringStore {
    fn request(self) -> ProviderResult<Credentials> {
        log::debug!(
            "requesting credentials from keyring entry {}/{}",
            self.service,
            self.account
        );
        let entry = keyring::Entry::new(&self.service, &self.account)
            .map_err(|e| ProviderError::Store(e.to_string()))?;
        let record = match entry.get_password() {
            Ok(record) => record,
            Err(keyring::Error::NoEntry) => return Err(ProviderError::NotFound),
            Err(e) => return Err(ProviderError::Store(e.to_string())),
        };
        let credentials: Credentials = serde_json::from_str(&record)
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        credentials
            .ensure_complete()
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        log::debug!("credentials found");
        Ok(credentials)
    }
}

/// Bounds the wait on an inner store.
///
/// The platform keyring may block indefinitely behind an unlock prompt, so
/// the inner request runs on a detached worker thread and the caller waits
/// on a channel with a deadline. An elapsed deadline is terminal for the
/// invocation, like every other provider outcome.
pub struct TimedStore<S> {
    inner: S,
    deadline: Duration,
}

impl<S> TimedStore<S> {
    pub fn new(inner: S, deadline: Duration) -> Self {
        TimedStore { inner, deadline }
    }
}

impl<S> CredentialStore for TimedStore<S>
where
    S: CredentialStore + Send + 'static,
{
    fn request(self) -> ProviderResult<Credentials> {
        let (tx, rx) = mpsc::channel();
        let inner = self.inner;
        thread::spawn(move || {
            let _ = tx.send(inner.request());
        });
        match rx.recv_timeout(self.deadline) {
            Ok(outcome) => outcome,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(ProviderError::Timeout(self.deadline)),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(ProviderError::Store(
                "credential store worker terminated without a result".to_string(),
            )),
        }
    }
}
