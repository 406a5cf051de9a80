// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! Access tiers for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ordered access tier a caller must meet or exceed for a given operation.
///
/// ## Tier Hierarchy
///
/// - `Public` - anonymous callers, no token required
/// - `User` - any authenticated account
/// - `AdminUser` - an admin acting on their own account (admins cannot
///   change other users' passwords, so this tier exists between User and Admin)
/// - `Admin` - full administrative access over other accounts
/// - `Server` - trusted service-to-service calls
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AuthLevel {
    /// No credential presented
    Public,
    /// Any authenticated account
    User,
    /// Admin restricted to self-service operations
    AdminUser,
    /// Full administrative access
    Admin,
    /// Trusted server credential
    Server,
}

impl AuthLevel {
    /// Derive the tier from a token's group list.
    ///
    /// Unknown groups grant nothing beyond `User`; an authenticated caller is
    /// never below `User`.
    pub fn from_groups(groups: &[String]) -> AuthLevel {
        let mut level = AuthLevel::User;
        for group in groups {
            let candidate = match group.to_lowercase().as_str() {
                "server" => AuthLevel::Server,
                "admin" => AuthLevel::Admin,
                "adminuser" => AuthLevel::AdminUser,
                _ => AuthLevel::User,
            };
            level = level.max(candidate);
        }
        level
    }

    /// Check whether this tier meets or exceeds the required tier.
    pub fn satisfies(&self, required: AuthLevel) -> bool {
        *self >= required
    }
}

impl Default for AuthLevel {
    /// Default is `Public` (least privilege).
    fn default() -> Self {
        AuthLevel::Public
    }
}

impl std::fmt::Display for AuthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthLevel::Public => write!(f, "public"),
            AuthLevel::User => write!(f, "user"),
            AuthLevel::AdminUser => write!(f, "adminuser"),
            AuthLevel::Admin => write!(f, "admin"),
            AuthLevel::Server => write!(f, "server"),
        }
    }
}
