// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! User account endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    auth::{authorize, password, AuthLevel, Claims, Ctx},
    envelope::Envelope,
    error::{ApiError, InternalError},
    models::{LoginRequest, RegisterRequest, UpdateUserRequest},
    state::AppState,
};

/// Default page size when `count` is out of range.
const DEFAULT_PAGE_SIZE: usize = 50;

/// Query parameters for GET /user.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Offset into the user list; negative values normalize to 0
    #[serde(default)]
    pub start: Option<i64>,
    /// Page size; values outside 1..=10 normalize to 50
    #[serde(default)]
    pub count: Option<i64>,
}

/// Normalize paging parameters.
///
/// `count` outside 1..=10 falls back to the default of 50; `start` below 0
/// becomes 0. In-range values pass through unchanged.
pub(crate) fn clamp_page(start: i64, count: i64) -> (usize, usize) {
    let start = if start < 0 { 0 } else { start as usize };
    let count = if (1..=10).contains(&count) {
        count as usize
    } else {
        DEFAULT_PAGE_SIZE
    };
    (start, count)
}

/// List users.
#[utoipa::path(
    get,
    path = "/user",
    params(ListQuery),
    tag = "Users",
    responses(
        (status = 200, description = "Page of users", body = crate::envelope::EnvelopeBody)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    params: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Envelope, ApiError> {
    // Unparseable paging parameters normalize to the defaults, same as
    // out-of-range ones; listing never rejects on paging input.
    let params = params.map(|Query(p)| p).unwrap_or_default();
    let (start, count) = clamp_page(params.start.unwrap_or(0), params.count.unwrap_or(0));

    let store = state.store.read().await;
    let users = store.list(start, count);
    Ok(Envelope::user_list(users.iter().map(|u| u.public()).collect()))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User", body = crate::envelope::EnvelopeBody),
        (status = 403, description = "Insufficient authorization"),
        (status = 404, description = "No such user")
    )
)]
pub async fn get_user(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Envelope, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::bad_request("Invalid User ID"))?;
    authorize(&ctx, AuthLevel::User, None)?;

    let store = state.store.read().await;
    let user = store.get(&id)?;
    Ok(Envelope::user(user.public()))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    tag = "Users",
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Malformed payload"),
        (status = 409, description = "Duplicate name or email")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Envelope, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::bad_request("Invalid Request Payload"))?;

    let hash = password::hash_password(&request.password).map_err(|e| {
        ApiError::internal(
            InternalError::new(e)
                .operation("password::hash_password")
                .arguments(format!("name={}", request.name)),
        )
    })?;

    let mut store = state.store.write().await;
    store.create(request, hash)?;
    Ok(Envelope::created())
}

/// Exchange credentials for a signed token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Token issued", body = crate::envelope::EnvelopeBody),
        (status = 400, description = "Malformed payload"),
        (status = 401, description = "Unknown account or wrong password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Envelope, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::bad_request("Invalid Request Payload"))?;

    // One lock scope for the whole exchange: the account cannot be deleted
    // between the credential check and the last-login bookkeeping.
    let mut store = state.store.write().await;
    let user = store
        .find_by_name(&request.username)
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Invalid Account"))?;

    password::verify_password(&request.password, &user.password)
        .map_err(|_| ApiError::unauthorized("Invalid Password"))?;

    let token = state.codec.issue(Claims::for_user(&user)).map_err(|e| {
        ApiError::internal(
            InternalError::new(e)
                .operation("TokenCodec::issue")
                .arguments(format!("sub={}", user.id)),
        )
    })?;

    store.record_login(&user.id, &token)?;

    Ok(Envelope::token(token))
}

/// Update a user.
///
/// Requires Admin, with the self-service exception: an AdminUser-tier caller
/// may update their own record (e.g. change their own password) but nobody
/// else's.
#[utoipa::path(
    put,
    path = "/user/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated user", body = crate::envelope::EnvelopeBody),
        (status = 403, description = "Insufficient authorization"),
        (status = 404, description = "No such user")
    )
)]
pub async fn update_user(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Envelope, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::bad_request("Invalid User ID"))?;
    let owner = id.to_string();
    authorize(&ctx, AuthLevel::Admin, Some(owner.as_str()))?;

    let Json(request) = payload.map_err(|_| ApiError::bad_request("Invalid Request Payload"))?;

    let password_hash = match &request.password {
        Some(plaintext) => Some(password::hash_password(plaintext).map_err(|e| {
            ApiError::internal(
                InternalError::new(e)
                    .operation("password::hash_password")
                    .arguments(format!("id={id}")),
            )
        })?),
        None => None,
    };

    let mut store = state.store.write().await;
    let updated = store.update(&id, |user| {
        if let Some(hash) = password_hash {
            user.password = hash;
        }
        if let Some(country) = request.country {
            user.country = Some(country);
        }
        if let Some(locale) = request.locale {
            user.locale = Some(locale);
        }
    })?;

    Ok(Envelope::user(updated.public()))
}

/// Delete a user. Admin only; no self-service exception.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User deleted"),
        (status = 403, description = "Insufficient authorization"),
        (status = 404, description = "No such user")
    )
)]
pub async fn delete_user(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Envelope, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::bad_request("Invalid User ID"))?;
    authorize(&ctx, AuthLevel::Admin, None)?;

    let mut store = state.store.write().await;
    store.delete(&id)?;
    Ok(Envelope::ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthContext;
    use crate::config::Config;
    use axum::http::StatusCode;

    fn test_state() -> AppState {
        AppState::new(&Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "handlers-test-secret".to_string(),
            issuer: "gatehouse-test".to_string(),
            token_ttl_secs: 3600,
        })
    }

    async fn seed_user(state: &AppState, name: &str, email: &str, groups: &[&str]) -> Uuid {
        let hash = password::hash_password("hunter22").unwrap();
        let mut store = state.store.write().await;
        let user = store
            .create(
                RegisterRequest {
                    name: name.to_string(),
                    password: String::new(),
                    email: email.to_string(),
                    country: None,
                    locale: None,
                },
                hash,
            )
            .unwrap();
        let id = user.id;
        store
            .update(&id, |u| {
                u.groups = groups.iter().map(|g| g.to_string()).collect();
            })
            .unwrap();
        id
    }

    fn ctx_for(sub: &Uuid, groups: &[&str]) -> Ctx {
        let claims = Claims {
            sub: sub.to_string(),
            name: "caller".to_string(),
            country: None,
            locale: None,
            group: groups.iter().map(|g| g.to_string()).collect(),
            scope: Vec::new(),
            iss: "gatehouse-test".to_string(),
            iat: 0,
            exp: 0,
        };
        Ctx(AuthContext::authenticated(claims, "token"))
    }

    #[test]
    fn clamp_page_normalizes_out_of_range_counts() {
        for bad in [0, 11, -5] {
            let (_, count) = clamp_page(0, bad);
            assert_eq!(count, 50, "count={bad} should normalize to 50");
        }
        for good in 1..=10 {
            let (_, count) = clamp_page(0, good);
            assert_eq!(count, good as usize);
        }
    }

    #[test]
    fn clamp_page_normalizes_negative_start() {
        assert_eq!(clamp_page(-3, 5), (0, 5));
        assert_eq!(clamp_page(7, 5), (7, 5));
    }

    #[tokio::test]
    async fn register_returns_created_with_empty_envelope() {
        let state = test_state();
        let envelope = register(
            State(state.clone()),
            Ok(Json(RegisterRequest {
                name: "alice".to_string(),
                password: "12345678".to_string(),
                email: "a@x.com".to_string(),
                country: None,
                locale: None,
            })),
        )
        .await
        .unwrap();

        assert_eq!(envelope.status(), StatusCode::CREATED);
        assert!(envelope.body().success);
        assert!(envelope.body().user.is_none());
        assert!(envelope.body().token.is_none());

        let store = state.store.read().await;
        let stored = store.find_by_name("alice").unwrap();
        // Password is stored hashed, never plaintext.
        assert_ne!(stored.password, "12345678");
        assert!(stored.password.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn register_duplicate_name_conflicts() {
        let state = test_state();
        seed_user(&state, "alice", "a@x.com", &[]).await;

        let err = register(
            State(state),
            Ok(Json(RegisterRequest {
                name: "alice".to_string(),
                password: "12345678".to_string(),
                email: "different@x.com".to_string(),
                country: None,
                locale: None,
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.message(), Some("Username Already Exists"));
    }

    #[tokio::test]
    async fn register_duplicate_email_conflicts() {
        let state = test_state();
        seed_user(&state, "alice", "a@x.com", &[]).await;

        let err = register(
            State(state),
            Ok(Json(RegisterRequest {
                name: "bob".to_string(),
                password: "12345678".to_string(),
                email: "a@x.com".to_string(),
                country: None,
                locale: None,
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.message(), Some("Email Already In Use"));
    }

    #[tokio::test]
    async fn login_issues_token_and_records_bookkeeping() {
        let state = test_state();
        let id = seed_user(&state, "alice", "a@x.com", &[]).await;

        let envelope = login(
            State(state.clone()),
            Ok(Json(LoginRequest {
                username: "alice".to_string(),
                password: "hunter22".to_string(),
            })),
        )
        .await
        .unwrap();

        assert_eq!(envelope.status(), StatusCode::OK);
        assert!(envelope.body().success);
        let token = envelope.body().token.clone().expect("token set");
        assert!(envelope.body().user.is_none());
        assert!(envelope.body().user_list.is_none());

        // The issued token verifies against the same codec.
        let claims = state.codec.verify(&token).unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.name, "alice");

        let store = state.store.read().await;
        let stored = store.get(&id).unwrap();
        assert!(stored.last_login.is_some());
        assert_eq!(stored.last_token.as_deref(), Some(token.as_str()));
    }

    #[tokio::test]
    async fn login_unknown_account_is_unauthorized() {
        let state = test_state();
        let err = login(
            State(state),
            Ok(Json(LoginRequest {
                username: "nobody".to_string(),
                password: "whatever".to_string(),
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), Some("Invalid Account"));
    }

    #[tokio::test]
    async fn login_for_deleted_account_is_unauthorized() {
        let state = test_state();
        let id = seed_user(&state, "alice", "a@x.com", &[]).await;
        {
            let mut store = state.store.write().await;
            store.delete(&id).unwrap();
        }

        // A deleted account fails the same way an unknown one does.
        let err = login(
            State(state),
            Ok(Json(LoginRequest {
                username: "alice".to_string(),
                password: "hunter22".to_string(),
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), Some("Invalid Account"));
    }

    #[tokio::test]
    async fn login_wrong_password_is_unauthorized() {
        let state = test_state();
        seed_user(&state, "alice", "a@x.com", &[]).await;

        let err = login(
            State(state),
            Ok(Json(LoginRequest {
                username: "alice".to_string(),
                password: "not-the-password".to_string(),
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), Some("Invalid Password"));
    }

    #[tokio::test]
    async fn list_users_is_public_and_pages() {
        let state = test_state();
        for i in 0..3 {
            seed_user(&state, &format!("user{i}"), &format!("u{i}@x.com"), &[]).await;
        }

        let envelope = list_users(
            State(state),
            Ok(Query(ListQuery {
                start: Some(0),
                count: Some(2),
            })),
        )
        .await
        .unwrap();

        let list = envelope.body().user_list.as_ref().unwrap();
        assert_eq!(list.len(), 2);
    }

    #[tokio::test]
    async fn get_user_requires_user_tier() {
        let state = test_state();
        let id = seed_user(&state, "alice", "a@x.com", &[]).await;

        let err = get_user(
            Ctx(AuthContext::anonymous()),
            State(state.clone()),
            Ok(Path(id)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let envelope = get_user(ctx_for(&id, &[]), State(state), Ok(Path(id)))
            .await
            .unwrap();
        assert_eq!(envelope.body().user.as_ref().unwrap().name, "alice");
    }

    #[tokio::test]
    async fn get_user_missing_is_not_found() {
        let state = test_state();
        let caller = seed_user(&state, "alice", "a@x.com", &[]).await;

        let err = get_user(
            ctx_for(&caller, &[]),
            State(state),
            Ok(Path(Uuid::new_v4())),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), Some("User Not Found"));
    }

    #[tokio::test]
    async fn adminuser_updates_own_record_only() {
        let state = test_state();
        let own = seed_user(&state, "alice", "a@x.com", &["adminuser"]).await;
        let other = seed_user(&state, "bob", "b@x.com", &[]).await;

        // Own record: allowed.
        let envelope = update_user(
            ctx_for(&own, &["adminuser"]),
            State(state.clone()),
            Ok(Path(own)),
            Ok(Json(UpdateUserRequest {
                country: Some("us".to_string()),
                ..Default::default()
            })),
        )
        .await
        .unwrap();
        assert_eq!(
            envelope.body().user.as_ref().unwrap().country.as_deref(),
            Some("us")
        );

        // Someone else's record: 403.
        let err = update_user(
            ctx_for(&own, &["adminuser"]),
            State(state),
            Ok(Path(other)),
            Ok(Json(UpdateUserRequest::default())),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn update_rehashes_password() {
        let state = test_state();
        let admin = seed_user(&state, "root", "root@x.com", &["admin"]).await;
        let target = seed_user(&state, "alice", "a@x.com", &[]).await;

        update_user(
            ctx_for(&admin, &["admin"]),
            State(state.clone()),
            Ok(Path(target)),
            Ok(Json(UpdateUserRequest {
                password: Some("new-password".to_string()),
                ..Default::default()
            })),
        )
        .await
        .unwrap();

        let store = state.store.read().await;
        let stored = store.get(&target).unwrap();
        assert!(password::verify_password("new-password", &stored.password).is_ok());
        assert!(password::verify_password("hunter22", &stored.password).is_err());
    }

    #[tokio::test]
    async fn delete_requires_admin() {
        let state = test_state();
        let admin = seed_user(&state, "root", "root@x.com", &["admin"]).await;
        let target = seed_user(&state, "alice", "a@x.com", &[]).await;

        // A plain user cannot delete, not even themselves.
        let err = delete_user(ctx_for(&target, &[]), State(state.clone()), Ok(Path(target)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let envelope = delete_user(ctx_for(&admin, &["admin"]), State(state.clone()), Ok(Path(target)))
            .await
            .unwrap();
        assert_eq!(envelope.status(), StatusCode::OK);

        // Gone now.
        let err = delete_user(ctx_for(&admin, &["admin"]), State(state), Ok(Path(target)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
