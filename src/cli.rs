use clap::{Parser, ValueEnum};

use crate::error::Result;
use crate::oauth1::Signer;
use crate::provider::CredentialStore;

/// Produce an OAuth 1.0a signature for a URL, using the credentials the
/// desktop single-sign-on store holds for the current user.
#[derive(Parser, Debug)]
#[command(name = "ssosign", version, about)]
pub struct Args {
    /// Target URL to sign, as an absolute URI.
    pub url: String,

    /// HTTP method embedded in the signature base string.
    #[arg(default_value = "POST")]
    pub method: String,

    /// Output rendering written to stdout.
    #[arg(long, value_enum, default_value = "header")]
    pub format: Format,

    /// Bound, in seconds, on waiting for the credential store.
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Format {
    /// A full `Authorization: OAuth ...` header line.
    Header,
    /// The target URL with the OAuth parameters appended to its query.
    Url,
}

/// Request credentials once, sign once, and hand back the rendering to
/// print. Every error is terminal; exit-code mapping happens in `main`.
pub fn run<S: CredentialStore>(args: &Args, store: S) -> Result<String> {
    let credentials = store.request()?;
    log::debug!("credentials found, signing url");
    let signed = Signer::new(&credentials).sign_str(&args.url, &args.method)?;
    Ok(match args.format {
        Format::Header => signed.authorization_header(),
        Format::Url => signed.signed_url(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::credentials::Credentials;
    use crate::error::{Error, ProviderError, ProviderResult};

    struct StaticStore(ProviderResult<Credentials>);

    impl CredentialStore for StaticStore {
        fn request(self) -> ProviderResult<Credentials> {
            self.0
        }
    }

    fn found() -> StaticStore {
        StaticStore(Ok(Credentials::new("ck", "cs", "tk", "ts")))
    }

    #[test]
    fn method_defaults_to_post() {
        let args = Args::parse_from(["ssosign", "http://example.com/resource"]);
        assert_eq!(args.method, "POST");
        assert_eq!(args.timeout, 60);
        assert!(matches!(args.format, Format::Header));
    }

    #[test]
    fn missing_url_is_a_usage_error() {
        // clap reports this before any provider request and exits 2
        let err = Args::try_parse_from(["ssosign"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn found_renders_header() {
        let args = Args::parse_from(["ssosign", "http://example.com/resource", "GET"]);
        let output = run(&args, found()).unwrap();
        assert!(output.starts_with("Authorization: OAuth oauth_consumer_key=\"ck\","));
        assert!(output.ends_with("oauth_version=\"1.0\""));
    }

    #[test]
    fn found_renders_signed_url() {
        let args = Args::parse_from([
            "ssosign",
            "http://example.com/resource",
            "GET",
            "--format",
            "url",
        ]);
        let output = run(&args, found()).unwrap();
        assert!(output.starts_with("http://example.com/resource?oauth_consumer_key=ck&"));
    }

    #[test]
    fn default_method_signs_like_explicit_post() {
        // the default only fills in the method; pin it through the signer
        let args = Args::parse_from(["ssosign", "http://example.com/resource"]);
        let credentials = Credentials::new("ck", "cs", "tk", "ts");
        let defaulted = Signer::new(&credentials)
            .nonce("abc123")
            .timestamp(1_400_000_000)
            .sign_str(&args.url, &args.method)
            .unwrap();
        let explicit = Signer::new(&credentials)
            .nonce("abc123")
            .timestamp(1_400_000_000)
            .sign_str("http://example.com/resource", "POST")
            .unwrap();
        assert_eq!(defaulted.signature(), explicit.signature());
    }

    #[test]
    fn not_found_yields_no_output() {
        let args = Args::parse_from(["ssosign", "http://example.com/resource"]);
        let result = run(&args, StaticStore(Err(ProviderError::NotFound)));
        assert!(matches!(
            result,
            Err(Error::Provider(ProviderError::NotFound))
        ));
    }

    #[test]
    fn sign_failure_is_distinct_from_not_found() {
        let args = Args::parse_from(["ssosign", "not a url"]);
        let result = run(&args, found());
        assert!(matches!(result, Err(Error::Sign(_))));
    }
}
