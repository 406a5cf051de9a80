// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::middleware::authenticate,
    envelope::EnvelopeBody,
    error::{ApiError, InternalError},
    models::{LoginRequest, PublicUser, RegisterRequest, UpdateUserRequest},
    state::AppState,
};

pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(health::get_alive))
        .route("/user", get(users::list_users))
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route(
            "/user/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ))
        .with_state(state);

    routes
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Fault barrier: a panicking handler becomes a 500 envelope instead
        // of tearing down the connection task.
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Convert an uncaught panic into the internal-error envelope.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::internal(InternalError::new(cause).operation("request handler panicked"))
        .into_response()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::get_alive,
        users::list_users,
        users::get_user,
        users::register,
        users::login,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            health::AliveResponse,
            EnvelopeBody,
            PublicUser,
            RegisterRequest,
            LoginRequest,
            UpdateUserRequest,
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Users", description = "Account registration, login and management")
    )
)]
struct ApiDoc;
