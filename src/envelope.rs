//! Versioned credential envelopes for index basic auth.
//!
//! An envelope packages the caller's authentication state into a compact,
//! transport-safe string that rides in the userinfo segment of an index URL.
//! Exactly one envelope shape is emitted per build: machine credentials
//! (`version = "2.0"`) or user credentials (`version = "1.0"`), selected by
//! precedence, never merged.

use crate::context::{PlatformClient, Project};
use crate::error::Result;
use base64::{engine::general_purpose::URL_SAFE as BASE64_URL, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// A versioned credential envelope.
///
/// The serialized form is a flat JSON mapping tagged by `version`, carrying
/// only the fields that belong to its own variant:
///
/// ```text
/// {"version":"2.0","machine_id":...,"machine_token":...,"project_id":...}
/// {"version":"1.0","access_token":...,"api_key":...,"project_id":...}
/// ```
///
/// `project_id` may be null in either variant; `access_token` and `api_key`
/// may independently be null in the user variant. Envelopes are built fresh
/// on every call and carry no identity beyond their encoded text.
///
/// # Security Notes
///
/// - The `Debug` implementation redacts token and key material.
/// - `PartialEq` is intentionally not implemented to prevent timing attacks
///   when comparing credentials.
/// - Encoding is base64, not encryption: confidentiality comes from the
///   transport, not from the envelope.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "version")]
pub enum CredentialEnvelope {
    /// Machine-to-machine credentials.
    #[serde(rename = "2.0")]
    Machine {
        machine_id: String,
        machine_token: String,
        project_id: Option<String>,
    },

    /// End-user credentials: OAuth access token and/or static API key.
    #[serde(rename = "1.0")]
    User {
        access_token: Option<String>,
        api_key: Option<String>,
        project_id: Option<String>,
    },
}

impl fmt::Debug for CredentialEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialEnvelope::Machine {
                machine_id,
                project_id,
                ..
            } => f
                .debug_struct("Machine")
                .field("machine_id", machine_id)
                .field("machine_token", &"[REDACTED]")
                .field("project_id", project_id)
                .finish(),
            CredentialEnvelope::User {
                access_token,
                api_key,
                project_id,
            } => f
                .debug_struct("User")
                .field("access_token", &access_token.as_ref().map(|_| "[REDACTED]"))
                .field("api_key", &api_key.as_ref().map(|_| "[REDACTED]"))
                .field("project_id", project_id)
                .finish(),
        }
    }
}

impl CredentialEnvelope {
    /// Select an envelope variant from the auth context by precedence.
    ///
    /// 1. No context at all: user variant with null token and key.
    /// 2. Context declares the machine-token capability: attempt the fetch,
    ///    and emit the machine variant when both the machine id and the
    ///    fetched token are present and non-empty.
    /// 3. Otherwise, including a machine fetch that came back empty: user
    ///    variant with the context's access token and API key verbatim.
    ///
    /// The capability flag, not the fetched value, drives precedence, so a
    /// context that claims a machine token but cannot produce one falls
    /// through to user credentials instead of erroring.
    pub fn build(auth: Option<&dyn PlatformClient>, project: Option<&Project>) -> Self {
        let project_id = project.and_then(|p| p.id.clone());

        let Some(client) = auth else {
            return CredentialEnvelope::User {
                access_token: None,
                api_key: None,
                project_id,
            };
        };

        if client.has_machine_token() {
            let machine_id = client.machine_id().filter(|id| !id.is_empty());
            let machine_token = client.fetch_machine_token().filter(|t| !t.is_empty());
            if let (Some(machine_id), Some(machine_token)) = (machine_id, machine_token) {
                return CredentialEnvelope::Machine {
                    machine_id: machine_id.to_string(),
                    machine_token,
                    project_id,
                };
            }
        }

        CredentialEnvelope::User {
            access_token: client.token().and_then(|t| t.access_token.clone()),
            api_key: client.api_key().map(str::to_string),
            project_id,
        }
    }

    /// Encode this envelope as URL-safe, padded base64 over compact JSON.
    pub fn encode(&self) -> String {
        // A flat mapping of strings and nulls; serialization cannot fail.
        let json = serde_json::to_string(self).expect("envelope serialization is infallible");
        BASE64_URL.encode(json.as_bytes())
    }

    /// Decode an encoded envelope back into its variant.
    ///
    /// Strict inverse of [`encode`](Self::encode): unknown versions and
    /// missing required fields are rejected as malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_auth_rs::{build_credential_envelope, CredentialEnvelope, Project, StaticCredentials};
    ///
    /// let auth = StaticCredentials {
    ///     api_key: Some("k1".to_string()),
    ///     ..Default::default()
    /// };
    /// let encoded = build_credential_envelope(Some(&auth), Some(&Project::new("p1")));
    ///
    /// match CredentialEnvelope::decode(&encoded).unwrap() {
    ///     CredentialEnvelope::User { api_key, project_id, .. } => {
    ///         assert_eq!(api_key.as_deref(), Some("k1"));
    ///         assert_eq!(project_id.as_deref(), Some("p1"));
    ///     }
    ///     _ => panic!("expected user envelope"),
    /// }
    /// ```
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = BASE64_URL.decode(encoded)?;
        let json = String::from_utf8(bytes)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// The `version` tag this envelope serializes with.
    pub fn version(&self) -> &'static str {
        match self {
            CredentialEnvelope::Machine { .. } => "2.0",
            CredentialEnvelope::User { .. } => "1.0",
        }
    }
}

/// Build and encode the credential envelope for the given auth context.
///
/// This is the string that belongs after `user:` in index basic auth. It is
/// total: missing or partial auth data degrades to null fields, never to an
/// error.
pub fn build_credential_envelope(
    auth: Option<&dyn PlatformClient>,
    project: Option<&Project>,
) -> String {
    let envelope = CredentialEnvelope::build(auth, project);
    trace!(version = envelope.version(), "selected credential envelope");
    envelope.encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{StaticCredentials, TokenSet};

    #[test]
    fn test_encode_is_url_safe() {
        let auth = StaticCredentials {
            api_key: Some("k+/=?&".to_string()),
            ..Default::default()
        };
        let encoded = build_credential_envelope(Some(&auth), None);
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn test_version_tags() {
        let machine = CredentialEnvelope::Machine {
            machine_id: "m".to_string(),
            machine_token: "t".to_string(),
            project_id: None,
        };
        let user = CredentialEnvelope::User {
            access_token: None,
            api_key: None,
            project_id: None,
        };
        assert_eq!(machine.version(), "2.0");
        assert_eq!(user.version(), "1.0");
    }

    #[test]
    fn test_machine_serializes_without_user_fields() {
        let envelope = CredentialEnvelope::Machine {
            machine_id: "m1".to_string(),
            machine_token: "t1".to_string(),
            project_id: None,
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(
            json,
            r#"{"version":"2.0","machine_id":"m1","machine_token":"t1","project_id":null}"#
        );
    }

    #[test]
    fn test_user_serializes_without_machine_fields() {
        let envelope = CredentialEnvelope::User {
            access_token: None,
            api_key: Some("k1".to_string()),
            project_id: Some("p1".to_string()),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(
            json,
            r#"{"version":"1.0","access_token":null,"api_key":"k1","project_id":"p1"}"#
        );
    }

    #[test]
    fn test_empty_machine_values_fall_back() {
        let auth = StaticCredentials {
            has_machine_token: true,
            machine_id: Some(String::new()),
            machine_token: Some("t1".to_string()),
            api_key: Some("k1".to_string()),
            ..Default::default()
        };
        let envelope = CredentialEnvelope::build(Some(&auth), None);
        assert_eq!(envelope.version(), "1.0");
    }

    #[test]
    fn test_access_token_requires_token_mapping() {
        // No token mapping at all: null access_token, not a lookup error.
        let auth = StaticCredentials {
            token: None,
            api_key: Some("k1".to_string()),
            ..Default::default()
        };
        match CredentialEnvelope::build(Some(&auth), None) {
            CredentialEnvelope::User { access_token, .. } => assert!(access_token.is_none()),
            _ => panic!("expected user envelope"),
        }

        // Mapping present but empty: still null.
        let auth = StaticCredentials {
            token: Some(TokenSet { access_token: None }),
            ..Default::default()
        };
        match CredentialEnvelope::build(Some(&auth), None) {
            CredentialEnvelope::User { access_token, .. } => assert!(access_token.is_none()),
            _ => panic!("expected user envelope"),
        }
    }

    #[test]
    fn test_debug_redacts_machine_token() {
        let envelope = CredentialEnvelope::Machine {
            machine_id: "m1".to_string(),
            machine_token: "sfmt_super_secret".to_string(),
            project_id: None,
        };
        let debug_output = format!("{:?}", envelope);
        assert!(!debug_output.contains("sfmt_super_secret"));
        assert!(debug_output.contains("m1"), "machine id is not a secret");
        assert!(debug_output.contains("[REDACTED]"));
    }

    #[test]
    fn test_debug_redacts_user_secrets() {
        let envelope = CredentialEnvelope::User {
            access_token: Some("jwt_super_secret".to_string()),
            api_key: Some("key_super_secret".to_string()),
            project_id: Some("p1".to_string()),
        };
        let debug_output = format!("{:?}", envelope);
        assert!(!debug_output.contains("super_secret"));
        assert!(debug_output.contains("p1"), "project id is not a secret");
    }
}
