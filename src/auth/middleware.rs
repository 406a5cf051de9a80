// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! Per-request authentication middleware.
//!
//! Runs ahead of every handler. A request without a credential is forwarded
//! as anonymous; a request with a credential either verifies and is forwarded
//! with its [`AuthContext`] attached, or is finalized as a 401 envelope
//! before any handler runs. Verification results are never cached across
//! requests.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::claims::AuthContext;
use super::token::TokenError;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticate the inbound request and attach its [`AuthContext`].
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Ok(token) => token,
        Err(response) => return response,
    };

    let ctx = match token {
        // Absent credential is the valid anonymous state, never an error.
        None => AuthContext::anonymous(),
        Some(token) => match state.codec.verify(&token) {
            Ok(claims) => AuthContext::authenticated(claims, token),
            Err(e) => {
                let message = match e {
                    TokenError::Malformed => "Invalid Token Provided",
                    TokenError::BadSignature => "Token Invalid",
                    TokenError::Expired => "Token Expired",
                };
                return ApiError::unauthorized(message).into_response();
            }
        },
    };

    request.extensions_mut().insert(ctx);
    next.run(request).await
}

/// Pull the raw signed token out of the Authorization header.
///
/// The wire contract is the bare token; a conventional `Bearer ` prefix is
/// tolerated and stripped.
fn bearer_token(request: &Request) -> Result<Option<String>, Response> {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = header.to_str().map_err(|_| {
        ApiError::unauthorized("Invalid Token Provided").into_response()
    })?;

    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return Ok(None);
    }
    Ok(Some(token.to_string()))
}
