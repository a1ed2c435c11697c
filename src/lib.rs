/*!
Sign URLs with the OAuth 1.0a credentials the desktop single-sign-on store
holds for the current user.

Local programs shell out to the `ssosign` binary instead of linking the
credential-storage and signing machinery themselves:

```console
$ ssosign https://push.example.com/notify GET
Authorization: OAuth oauth_consumer_key="...",oauth_token="...",...
```

The signing core is also usable as a library:

```
use ssosign::{Credentials, Signer};

# fn run() -> ssosign::SignResult<()> {
let credentials = Credentials::new("ck", "cs", "tk", "ts");
let signed = Signer::new(&credentials)
    .nonce("abc123")
    .timestamp(1_400_000_000)
    .sign_str("http://example.com/resource", "GET")?;
println!("{}", signed.authorization_header());
# Ok(())
# }
```
*/
pub mod cli;
mod credentials;
mod error;
mod oauth1;
mod provider;
mod util;

pub use credentials::Credentials;
pub use error::{Error, ProviderError, ProviderResult, Result, SignError, SignResult};
pub use oauth1::{SignedParameters, Signer, OAUTH_SIGNATURE_METHOD, OAUTH_VERSION};
pub use provider::{CredentialStore, KeyringStore, TimedStore};
