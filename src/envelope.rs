// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! Uniform response envelope.
//!
//! Every handler finishes by producing one of these. Named constructors build
//! a fully-formed, immutable envelope in one step, so no partially-built
//! intermediate state ever exists and nothing can be mutated after
//! finalization.
//!
//! Wire shape: `{"success":bool,"error"?,"token"?,"user"?,"userList"?}`.
//! `success` is `false` exactly when the envelope was built through the error
//! constructor, and `error` is always non-empty in that case.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::PublicUser;

/// Serialized envelope body.
#[derive(Debug, Serialize, ToSchema)]
pub struct EnvelopeBody {
    /// Whether the request succeeded
    pub success: bool,

    /// Client-visible error message; present iff `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Freshly issued token (login only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Single user payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,

    /// User collection payload
    #[serde(rename = "userList", skip_serializing_if = "Option::is_none")]
    pub user_list: Option<Vec<PublicUser>>,
}

/// A finalized response: status code plus envelope body.
#[derive(Debug)]
pub struct Envelope {
    status: StatusCode,
    body: EnvelopeBody,
}

impl Envelope {
    fn success(status: StatusCode) -> Self {
        Self {
            status,
            body: EnvelopeBody {
                success: true,
                error: None,
                token: None,
                user: None,
                user_list: None,
            },
        }
    }

    /// 200 with no payload.
    pub fn ok() -> Self {
        Self::success(StatusCode::OK)
    }

    /// 201 with no payload.
    pub fn created() -> Self {
        Self::success(StatusCode::CREATED)
    }

    /// 200 carrying a single user.
    pub fn user(user: PublicUser) -> Self {
        let mut envelope = Self::success(StatusCode::OK);
        envelope.body.user = Some(user);
        envelope
    }

    /// 200 carrying a user collection.
    pub fn user_list(users: Vec<PublicUser>) -> Self {
        let mut envelope = Self::success(StatusCode::OK);
        envelope.body.user_list = Some(users);
        envelope
    }

    /// 200 carrying a freshly issued token.
    pub fn token(token: impl Into<String>) -> Self {
        let mut envelope = Self::success(StatusCode::OK);
        envelope.body.token = Some(token.into());
        envelope
    }

    /// Error finalization. An empty message falls back to the canonical
    /// status reason so `error` is never empty when `success` is false.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string();
        }
        Self {
            status,
            body: EnvelopeBody {
                success: false,
                error: Some(message),
                token: None,
                user: None,
                user_list: None,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &EnvelopeBody {
        &self.body
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
