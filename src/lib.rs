//! Credential envelopes and authenticated index URLs for package managers.
//!
//! This crate packages a caller's authentication state into a compact,
//! versioned credential envelope and injects it into a package-index URL as
//! HTTP basic-auth userinfo, so pip-like and npm-like clients can be routed
//! through an authenticated mirror without understanding the platform's auth
//! model. It provides:
//!
//! - Precedence-based selection among machine tokens, OAuth access tokens,
//!   and static API keys
//! - A versioned, URL-safe base64 envelope encoding (and its inverse)
//! - Component-preserving credential injection for arbitrary index URLs
//! - Default public index URLs for the supported ecosystems
//!
//! # Quick Start
//!
//! ```
//! use index_auth_rs::{build_index_url, IndexType, Project, StaticCredentials};
//!
//! let auth = StaticCredentials {
//!     api_key: Some("my-api-key".to_string()),
//!     ..Default::default()
//! };
//! let project = Project::new("my-project");
//!
//! // Defaults to the public PyPI simple index when no URL is given.
//! let url = build_index_url(Some(&auth), Some(&project), None, IndexType::Pypi).unwrap();
//! assert!(url.starts_with("https://user:"));
//!
//! // Explicit mirror URLs keep every component except the userinfo.
//! let url = build_index_url(
//!     Some(&auth),
//!     Some(&project),
//!     Some("https://pkgs.example.com/team/pypi/simple/?format=json"),
//!     IndexType::Pypi,
//! )
//! .unwrap();
//! assert!(url.ends_with("@pkgs.example.com/team/pypi/simple/?format=json"));
//! ```
//!
//! # Envelope Format
//!
//! The envelope is a flat JSON mapping tagged by `version`, UTF-8 encoded,
//! then base64-encoded with the URL-safe alphabet and standard padding:
//!
//! ```text
//! {"version":"2.0","machine_id":"...","machine_token":"...","project_id":...}
//! {"version":"1.0","access_token":...,"api_key":...,"project_id":...}
//! ```
//!
//! Exactly one shape is emitted per build. Machine credentials win when the
//! context declares the capability *and* the fetch produces a token;
//! otherwise the user shape carries whatever access token and API key exist,
//! null included. Base64 is transport armor, not a security boundary; the
//! HTTPS transport provides confidentiality.

mod context;
mod envelope;
mod error;
mod registry;
mod urls;

// Re-export main types
pub use context::{PlatformClient, Project, StaticCredentials, TokenSet};
pub use envelope::{build_credential_envelope, CredentialEnvelope};
pub use error::{Error, Result};
pub use registry::{
    build_index_url, IndexType, NPMJS_PUBLIC_REPOSITORY_URL, PYPI_PUBLIC_REPOSITORY_URL,
};
pub use urls::SplitUrl;
