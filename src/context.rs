//! The auth-context seam consumed by the envelope builder.
//!
//! This module defines the read-only interface the platform auth layer must
//! provide, plus a field-backed implementation for callers that already hold
//! their credentials as plain values.

use std::fmt;

/// OAuth-style token mapping.
///
/// The mapping itself is optional on a [`PlatformClient`], and the access
/// token inside it is optional too; both absences degrade to a null
/// `access_token` field in the envelope.
#[derive(Clone, Default)]
pub struct TokenSet {
    /// The OAuth access token, if one has been issued.
    pub access_token: Option<String>,
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Reference to the project the invocation is bound to, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    /// Project identifier. May be absent even when a project reference exists.
    pub id: Option<String>,
}

impl Project {
    /// Create a project reference with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Project {
            id: Some(id.into()),
        }
    }
}

/// Read-only view of the platform's authentication state.
///
/// Machine-token acquisition is two-phase: [`has_machine_token`] reports the
/// capability, and [`fetch_machine_token`] performs the actual acquisition,
/// which may still come back empty (e.g. a transient fetch failure). The
/// envelope builder treats an empty fetch as a fall-through to user
/// credentials, never as an error.
///
/// Implementations must not mutate state visibly to the caller; a single
/// envelope build reads the context exactly once per accessor.
///
/// [`has_machine_token`]: PlatformClient::has_machine_token
/// [`fetch_machine_token`]: PlatformClient::fetch_machine_token
pub trait PlatformClient {
    /// Whether this context is configured for machine-to-machine auth.
    fn has_machine_token(&self) -> bool;

    /// Identifier of the machine this context belongs to.
    fn machine_id(&self) -> Option<&str>;

    /// Acquire the machine token. Returns `None` when the token cannot be
    /// produced; no retry is attempted by this crate.
    fn fetch_machine_token(&self) -> Option<String>;

    /// The OAuth token mapping, if the user has a session.
    fn token(&self) -> Option<&TokenSet>;

    /// Static API key, if one is configured.
    fn api_key(&self) -> Option<&str>;
}

/// [`PlatformClient`] backed by plain fields.
///
/// Useful for callers that load credentials elsewhere (config, environment)
/// and for tests. `fetch_machine_token` simply hands back the stored token.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    /// Capability flag for machine-to-machine auth.
    pub has_machine_token: bool,
    /// Machine identifier.
    pub machine_id: Option<String>,
    /// Machine token returned by `fetch_machine_token`.
    pub machine_token: Option<String>,
    /// OAuth token mapping.
    pub token: Option<TokenSet>,
    /// Static API key.
    pub api_key: Option<String>,
}

impl PlatformClient for StaticCredentials {
    fn has_machine_token(&self) -> bool {
        self.has_machine_token
    }

    fn machine_id(&self) -> Option<&str> {
        self.machine_id.as_deref()
    }

    fn fetch_machine_token(&self) -> Option<String> {
        self.machine_token.clone()
    }

    fn token(&self) -> Option<&TokenSet> {
        self.token.as_ref()
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("has_machine_token", &self.has_machine_token)
            .field("machine_id", &self.machine_id)
            .field(
                "machine_token",
                &self.machine_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token", &self.token)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
