// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! Per-route authorization checks.

use super::claims::AuthContext;
use super::level::AuthLevel;
use crate::error::ApiError;

/// Check the caller against a route's minimum required tier.
///
/// Access is granted when the caller's tier meets or exceeds `required`, or
/// under the self-service exception: an `AdminUser` caller may perform an
/// `Admin`-tier operation on a resource they own. Admins restricted to the
/// `AdminUser` tier can change their own password but nobody else's.
///
/// `owner` is the subject id of the resource being acted on, when the route
/// targets one.
pub fn authorize(
    ctx: &AuthContext,
    required: AuthLevel,
    owner: Option<&str>,
) -> Result<(), ApiError> {
    let caller = ctx.level();

    if caller.satisfies(required) {
        return Ok(());
    }

    if caller == AuthLevel::AdminUser
        && required == AuthLevel::Admin
        && owner.is_some()
        && owner == ctx.subject()
    {
        return Ok(());
    }

    Err(ApiError::forbidden("Insufficient Permissions"))
}
