// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! Request-level error taxonomy.
//!
//! Every handler fault funnels into [`ApiError`], whose `IntoResponse`
//! implementation is the single point that decides the client-visible message
//! and logs server-side diagnostics. The diagnostic payload itself
//! ([`InternalError`]) never reaches the wire.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::envelope::Envelope;

/// Server-side-only diagnostic wrapper around a failure cause.
///
/// Carries the underlying cause plus optional context about the operation
/// that failed and the arguments it ran with. Logged when the finalized
/// status is a server-fault class, never serialized to the client.
#[derive(Debug)]
pub struct InternalError {
    cause: String,
    operation: Option<String>,
    arguments: Option<String>,
}

impl InternalError {
    pub fn new(cause: impl std::fmt::Display) -> Self {
        Self {
            cause: cause.to_string(),
            operation: None,
            arguments: None,
        }
    }

    /// Describe the operation that failed, e.g. the store call.
    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Record the arguments the failed operation ran with.
    pub fn arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = Some(arguments.into());
        self
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }
}

/// Uniform error for every failure a handler can surface.
///
/// Taxonomy by status: 400 validation, 401 authentication, 403 authorization,
/// 404 not found, 409 conflict, 500 internal fault. The explicit message, when
/// set, always wins over a message derived from the internal cause.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: Option<String>,
    internal: Option<InternalError>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            internal: None,
        }
    }

    /// 400 - malformed or invalid payload.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 401 - missing-where-required, invalid or expired token, bad credentials.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// 403 - authenticated but insufficient tier.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// 404 - no such resource.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 409 - duplicate name or email.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// 500 - unexpected server fault. The client-visible message is derived
    /// from the cause unless one is set explicitly afterwards.
    pub fn internal(internal: InternalError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
            internal: Some(internal),
        }
    }

    /// Attach server-side diagnostics without changing the status or message.
    pub fn with_internal(mut self, internal: InternalError) -> Self {
        self.internal = Some(internal);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(ref internal) = self.internal {
                tracing::error!(
                    status = self.status.as_u16(),
                    operation = internal.operation.as_deref().unwrap_or("unknown"),
                    arguments = internal.arguments.as_deref().unwrap_or(""),
                    cause = %internal.cause,
                    "internal server error",
                );
            } else {
                tracing::error!(
                    status = self.status.as_u16(),
                    message = self.message.as_deref().unwrap_or(""),
                    "internal server error",
                );
            }
        }

        let message = self
            .message
            .or_else(|| self.internal.as_ref().map(|i| i.cause.clone()))
            .unwrap_or_else(|| "Internal Server Error".to_string());

        Envelope::error(self.status, message).into_response()
    }
}
