use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type SignResult<T> = std::result::Result<T, SignError>;
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("credential retrieval failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("signing failed: {0}")]
    Sign(#[from] SignError),
}

#[derive(Error, Debug)]
pub enum SignError {
    #[error("target URL could not be parsed: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("target URL cannot carry a signature: {0}")]
    UnsupportedUrl(String),
    #[error("credential field {0} is empty")]
    EmptyCredential(&'static str),
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("no credentials are stored for this user")]
    NotFound,
    #[error("credential store did not respond within {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("stored credential record is unusable: {0}")]
    Malformed(String),
    #[error("credential store failure: {0}")]
    Store(String),
}
