//! Index URL resolution and credential injection.
//!
//! This module resolves the package-index URL for an ecosystem and injects
//! the encoded credential envelope into its authority as basic-auth
//! userinfo, leaving every other URL component untouched.

use crate::context::{PlatformClient, Project};
use crate::envelope::build_credential_envelope;
use crate::error::Result;
use crate::urls::SplitUrl;
use std::fmt;
use tracing::debug;

/// The default public PyPI simple index.
pub const PYPI_PUBLIC_REPOSITORY_URL: &str = "https://pypi.org/simple/";

/// The default public npm registry.
pub const NPMJS_PUBLIC_REPOSITORY_URL: &str = "https://registry.npmjs.org/";

/// Username placed ahead of the encoded envelope in basic-auth userinfo.
/// The mirror keys on the envelope, not on this value.
const INDEX_AUTH_USER: &str = "user";

/// Package ecosystem a composed index URL targets.
///
/// The set is closed: adding an ecosystem means adding a variant and its
/// default URL here, so an unknown tag cannot reach the composer at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    /// pip-style clients, PEP 503 simple index.
    Pypi,
    /// npm-style clients.
    Npm,
}

impl IndexType {
    /// The public index URL used when the caller supplies none.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_auth_rs::IndexType;
    ///
    /// assert_eq!(IndexType::Pypi.default_index_url(), "https://pypi.org/simple/");
    /// assert_eq!(IndexType::Npm.default_index_url(), "https://registry.npmjs.org/");
    /// ```
    pub fn default_index_url(&self) -> &'static str {
        match self {
            IndexType::Pypi => PYPI_PUBLIC_REPOSITORY_URL,
            IndexType::Npm => NPMJS_PUBLIC_REPOSITORY_URL,
        }
    }

    /// The ecosystem tag as configuration spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexType::Pypi => "pypi",
            IndexType::Npm => "npm",
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the index URL for the given auth context, with credentials injected.
///
/// When `index_url` is `None`, the ecosystem's public default is used. The
/// encoded envelope lands in the authority as `user:<envelope>@...`; scheme,
/// host, port, path, query, and fragment pass through byte-for-byte. An
/// authority that already carries userinfo keeps it behind the injected
/// segment rather than having it replaced.
///
/// The result goes verbatim to the package-manager invocation as its
/// index/registry URL argument.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) when the supplied
/// URL is not syntactically valid.
///
/// # Examples
///
/// ```
/// use index_auth_rs::{build_index_url, IndexType, StaticCredentials};
///
/// let auth = StaticCredentials {
///     api_key: Some("k1".to_string()),
///     ..Default::default()
/// };
/// let url = build_index_url(Some(&auth), None, None, IndexType::Pypi).unwrap();
/// assert!(url.starts_with("https://user:"));
/// assert!(url.ends_with("@pypi.org/simple/"));
/// ```
pub fn build_index_url(
    auth: Option<&dyn PlatformClient>,
    project: Option<&Project>,
    index_url: Option<&str>,
    index_type: IndexType,
) -> Result<String> {
    let index_url = index_url.unwrap_or_else(|| index_type.default_index_url());
    debug!(index = index_type.as_str(), "injecting index credentials");

    let mut url = SplitUrl::parse(index_url)?;
    let encoded = build_credential_envelope(auth, project);
    url.prepend_userinfo(&format!("{}:{}", INDEX_AUTH_USER, encoded));

    Ok(url.to_string())
}
