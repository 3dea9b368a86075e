//! Local decoding of login-token claims.
//!
//! The token is treated as opaque proof issued by the server; the client only
//! reads the payload segment for display and session state. No signature
//! verification happens here.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Claims embedded in the login token payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiry as a unix timestamp, when the server includes one.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl UserClaims {
    /// Whether the token expiry has passed. Tokens without `exp` never expire
    /// client-side; the server remains the authority either way.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.exp {
            Some(exp) => exp <= now.timestamp(),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClaimsError {
    /// Token does not have the three dot-separated segments.
    Malformed,
    /// Payload segment is not valid base64url.
    Decode(String),
    /// Payload JSON does not carry the expected claims.
    Parse(String),
}

impl core::fmt::Display for ClaimsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClaimsError::Malformed => write!(f, "token is not a three-part token"),
            ClaimsError::Decode(msg) => write!(f, "token payload decode failed: {}", msg),
            ClaimsError::Parse(msg) => write!(f, "token claims parse failed: {}", msg),
        }
    }
}

impl std::error::Error for ClaimsError {}

/// Decode the claims of a `header.payload.signature` token.
pub fn decode_claims(token: &str) -> Result<UserClaims, ClaimsError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ClaimsError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.as_bytes())
        .map_err(|e| ClaimsError::Decode(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| ClaimsError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn token_with_payload(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.sig")
    }

    #[test]
    fn decodes_subject_email_and_roles() {
        let token = token_with_payload(&json!({
            "sub": "1",
            "email": "admin@example.com",
            "roles": ["Admin", "User"],
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.roles, vec!["Admin", "User"]);
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn roles_default_to_empty() {
        let token = token_with_payload(&json!({
            "sub": "1",
            "email": "admin@example.com",
        }));
        let claims = decode_claims(&token).unwrap();
        assert!(claims.roles.is_empty());
    }

    #[test]
    fn rejects_tokens_without_three_segments() {
        assert_eq!(decode_claims("abc"), Err(ClaimsError::Malformed));
        assert_eq!(decode_claims("a.b"), Err(ClaimsError::Malformed));
        assert_eq!(decode_claims("a.b.c.d"), Err(ClaimsError::Malformed));
    }

    #[test]
    fn rejects_non_base64_payload() {
        assert!(matches!(
            decode_claims("h.!!not-base64!!.s"),
            Err(ClaimsError::Decode(_))
        ));
    }

    #[test]
    fn rejects_payload_missing_claims() {
        let token = token_with_payload(&json!({ "iss": "someone" }));
        assert!(matches!(decode_claims(&token), Err(ClaimsError::Parse(_))));
    }

    #[test]
    fn expiry_is_checked_against_now() {
        let token = token_with_payload(&json!({
            "sub": "1",
            "email": "admin@example.com",
            "exp": 1_700_000_000,
        }));
        let claims = decode_claims(&token).unwrap();
        let before = Utc.timestamp_opt(1_699_999_999, 0).unwrap();
        let after = Utc.timestamp_opt(1_700_000_001, 0).unwrap();
        assert!(!claims.is_expired(before));
        assert!(claims.is_expired(after));
    }
}
