// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! # API Data Models
//!
//! Request and response structures for the account API. All wire-facing
//! types derive `Serialize`/`Deserialize` plus `ToSchema` for OpenAPI
//! documentation.
//!
//! The stored [`User`] record never serializes as-is; handlers project it
//! through [`PublicUser`], which carries no password hash or email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Stored user record.
///
/// `password` holds a PHC-format argon2id hash, never plaintext. The record
/// is owned by the store collaborator; handlers only ever hand out
/// [`PublicUser`] projections.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// PHC-format password hash
    pub password: String,
    pub country: Option<String>,
    pub locale: Option<String>,
    /// Role-like group tags carried into token claims
    pub groups: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    /// Most recently issued token, updated at login
    pub last_token: Option<String>,
}

impl User {
    /// Client-safe projection of this record.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            country: self.country.clone(),
            locale: self.locale.clone(),
            created_at: self.created_at,
            last_login: self.last_login,
        }
    }
}

/// User view returned inside response envelopes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

/// Body for POST /register.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Body for POST /login.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body for PUT /user/{id}. Every field is optional; omitted fields are left
/// untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// New plaintext password, re-hashed before storage
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}
