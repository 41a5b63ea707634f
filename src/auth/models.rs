//! Authentication Models
//! Mission: Define credential records, token claims and login payloads

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Claim key carrying the granted roles
pub const ROLES_CLAIM: &str = "roles";

/// Stored credential for one account
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialRecord {
    pub username: String,
    /// Encoder-prefixed password, e.g. `{noop}secret` or `{bcrypt}$2b$...`
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl CredentialRecord {
    pub fn new<I, S>(username: &str, password: &str, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Roles as a JSON array, in stable (sorted) order
    pub fn roles_claim(&self) -> Value {
        Value::Array(self.roles.iter().cloned().map(Value::String).collect())
    }
}

// Never leak the stored password through logs
impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String, // subject (username)
    pub iat: usize,  // issued at
    pub exp: usize,  // expiration timestamp
    pub jti: String, // unique token id
    /// Caller supplied claims (`roles`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Role strings carried in the `roles` claim
    pub fn roles(&self) -> Vec<String> {
        match self.extra.get(ROLES_CLAIM) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Login request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Why a credential check failed. Never shown to the client as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    UserNotFound,
    PasswordMismatch,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::UserNotFound => write!(f, "User not found"),
            AuthFailure::PasswordMismatch => write!(f, "Password mismatch"),
        }
    }
}

impl std::error::Error for AuthFailure {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_password_never_serialized_or_debug_printed() {
        let record = CredentialRecord::new("admin", "{noop}admin123", ["ADMIN"]);

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("admin123"));

        let debug = format!("{:?}", record);
        assert!(!debug.contains("admin123"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_roles_claim_is_sorted_array() {
        let record = CredentialRecord::new("ops", "{noop}x", ["USER", "ADMIN"]);
        assert_eq!(record.roles_claim(), json!(["ADMIN", "USER"]));
    }

    #[test]
    fn test_claims_flatten_roles() {
        let claims: Claims = serde_json::from_value(json!({
            "sub": "user",
            "iat": 1,
            "exp": 2,
            "jti": "abc",
            "roles": ["USER"]
        }))
        .unwrap();

        assert_eq!(claims.sub, "user");
        assert_eq!(claims.roles(), vec!["USER".to_string()]);

        let back = serde_json::to_value(&claims).unwrap();
        assert_eq!(back["roles"], json!(["USER"]));
    }

    #[test]
    fn test_claims_without_roles() {
        let claims: Claims = serde_json::from_value(json!({
            "sub": "svc",
            "iat": 1,
            "exp": 2,
            "jti": "abc"
        }))
        .unwrap();
        assert!(claims.roles().is_empty());
    }

    #[test]
    fn test_auth_failure_display() {
        assert_eq!(AuthFailure::UserNotFound.to_string(), "User not found");
        assert_eq!(AuthFailure::PasswordMismatch.to_string(), "Password mismatch");
    }
}
