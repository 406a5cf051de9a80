// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! Token signing and verification.
//!
//! A single process-wide secret signs every token with a pinned algorithm
//! (HS256). The algorithm is never read from the token header itself, so a
//! token claiming `"alg": "none"` or an RSA variant fails verification
//! outright instead of being interpreted leniently.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use crate::config::Config;

/// The one algorithm this service signs and accepts.
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Token verification failure.
///
/// There is no partial acceptance: every failure class rejects the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Token could not be parsed at all
    #[error("token could not be parsed")]
    Malformed,
    /// Signature mismatch, or the token was signed with a different algorithm
    #[error("token signature is invalid")]
    BadSignature,
    /// Expiry is in the past
    #[error("token has expired")]
    Expired,
}

/// Signs and verifies claim sets with the process-wide secret.
///
/// Constructed once at startup from explicit configuration and shared
/// read-only for the life of the process. Both operations are pure and never
/// block.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(config: &Config) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // Exact expiry semantics; the default 60s leeway would accept
        // just-expired tokens.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            issuer: config.issuer.clone(),
            ttl_secs: config.token_ttl_secs,
        }
    }

    /// Stamp issuer and timing fields onto `claims` and sign the result.
    pub fn issue(&self, mut claims: Claims) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        claims.iss = self.issuer.clone();
        claims.iat = now;
        claims.exp = now + self.ttl_secs;

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding)
            .map_err(|_| TokenError::Malformed)
    }

    /// Verify a signed token and reconstruct its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of debug output.
        f.debug_struct("TokenCodec")
            .field("issuer", &self.issuer)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(secret: &str) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: secret.to_string(),
            issuer: "gatehouse-test".to_string(),
            token_ttl_secs: 3600,
        }
    }

    fn sample_claims() -> Claims {
        Claims {
            sub: "7c0a1f1e-26a7-4f12-a9f5-52a1b8d0c331".to_string(),
            name: "alice".to_string(),
            country: Some("us".to_string()),
            locale: None,
            group: vec!["admin".to_string()],
            scope: vec!["account:write".to_string()],
            iss: String::new(),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn issue_then_verify_round_trips_claims() {
        let codec = TokenCodec::new(&test_config("round-trip-secret"));
        let original = sample_claims();

        let token = codec.issue(original.clone()).expect("issue token");
        let verified = codec.verify(&token).expect("verify token");

        assert_eq!(verified.sub, original.sub);
        assert_eq!(verified.name, original.name);
        assert_eq!(verified.country, original.country);
        assert_eq!(verified.locale, original.locale);
        assert_eq!(verified.group, original.group);
        assert_eq!(verified.scope, original.scope);
        assert_eq!(verified.iss, "gatehouse-test");

        let now = Utc::now().timestamp();
        assert!(verified.iat <= now);
        assert!(now <= verified.exp);
    }

    #[test]
    fn wrong_secret_fails_with_bad_signature() {
        let signer = TokenCodec::new(&test_config("secret-a"));
        let verifier = TokenCodec::new(&test_config("secret-b"));

        let token = signer.issue(sample_claims()).expect("issue token");
        assert_eq!(verifier.verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn garbage_fails_as_malformed() {
        let codec = TokenCodec::new(&test_config("secret"));
        assert_eq!(codec.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(codec.verify(""), Err(TokenError::Malformed));
        assert_eq!(codec.verify("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn expired_token_fails_as_expired() {
        let mut config = test_config("secret");
        config.token_ttl_secs = -120;
        let codec = TokenCodec::new(&config);

        let token = codec.issue(sample_claims()).expect("issue token");
        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn foreign_algorithm_is_rejected() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let codec = TokenCodec::new(&test_config("secret"));

        // Hand-rolled token whose header claims HS384; the pinned validation
        // must refuse it regardless of what the header says.
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS384","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(
            br#"{"sub":"x","username":"x","group":[],"scope":[],"iss":"t","iat":1,"exp":9999999999}"#,
        );
        let forged = format!("{header}.{claims}.AAAA");

        assert!(codec.verify(&forged).is_err());
    }
}
