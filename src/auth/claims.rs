// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! Token claims and the per-request authentication context.

use serde::{Deserialize, Serialize};

use super::level::AuthLevel;
use crate::models::User;

/// Signed, structured identity and authorization data minted at login and
/// re-validated on every subsequent request. Never cached server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user UUID)
    pub sub: String,

    /// Display name
    #[serde(rename = "username")]
    pub name: String,

    /// Country code, if the account has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Locale, if the account has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Role-like group tags ("admin", "server", ...)
    #[serde(default)]
    pub group: Vec<String>,

    /// OAuth-style scopes; carried for forward compatibility, not consulted
    /// by the gate
    #[serde(default)]
    pub scope: Vec<String>,

    /// Issuer, stamped by the codec at issue time
    #[serde(default)]
    pub iss: String,

    /// Issued-at timestamp, stamped by the codec
    #[serde(default)]
    pub iat: i64,

    /// Expiration timestamp, stamped by the codec
    #[serde(default)]
    pub exp: i64,
}

impl Claims {
    /// Build the claim set for a user record. Timing and issuer fields are
    /// left zeroed; the codec stamps them when the token is signed.
    pub fn for_user(user: &User) -> Self {
        Self {
            sub: user.id.to_string(),
            name: user.name.clone(),
            country: user.country.clone(),
            locale: user.locale.clone(),
            group: user.groups.clone(),
            scope: Vec::new(),
            iss: String::new(),
            iat: 0,
            exp: 0,
        }
    }

    /// Access tier this claim set grants.
    pub fn level(&self) -> AuthLevel {
        AuthLevel::from_groups(&self.group)
    }
}

/// Immutable per-request bundle of claims (or anonymous) plus the raw signed
/// token. Constructed exactly once by the authentication middleware and
/// dropped at request end. Absent claims are the valid anonymous state, not
/// an error.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    claims: Option<Claims>,
    token: Option<String>,
}

impl AuthContext {
    /// Context for a request that carried no credential.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for a request whose token verified successfully.
    pub fn authenticated(claims: Claims, token: impl Into<String>) -> Self {
        Self {
            claims: Some(claims),
            token: Some(token.into()),
        }
    }

    /// Verified claims, if the caller authenticated.
    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    /// Raw signed token as presented, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Subject identifier of the caller, if authenticated.
    pub fn subject(&self) -> Option<&str> {
        self.claims.as_ref().map(|c| c.sub.as_str())
    }

    /// Caller's access tier. Anonymous callers are always `Public`.
    pub fn level(&self) -> AuthLevel {
        self.claims
            .as_ref()
            .map(Claims::level)
            .unwrap_or(AuthLevel::Public)
    }
}
