// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! Axum extractor for the per-request authentication context.
//!
//! Handlers take `Ctx(ctx): Ctx` to receive the [`AuthContext`] the
//! middleware attached. The context is threaded explicitly as a handler
//! argument rather than looked up through any ambient mechanism.
//!
//! ```rust,ignore
//! async fn get_user(Ctx(ctx): Ctx, Path(id): Path<Uuid>) -> Result<Envelope, ApiError> {
//!     authorize(&ctx, AuthLevel::User, None)?;
//!     ...
//! }
//! ```

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use super::claims::AuthContext;

/// Extractor handing the middleware-built [`AuthContext`] to a handler.
///
/// Infallible: a request that reached a handler either carries the context
/// the middleware attached, or (in handler-level tests that skip the
/// middleware) falls back to anonymous.
pub struct Ctx(pub AuthContext);

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .unwrap_or_else(AuthContext::anonymous);
        Ok(Ctx(ctx))
    }
}
