// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Liveness response.
#[derive(Debug, Serialize, ToSchema)]
pub struct AliveResponse {
    pub alive: bool,
}

/// Liveness probe.
///
/// Always returns 200 with `{"alive":true}` while the process is running.
/// Public: the authentication middleware forwards anonymous callers.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = AliveResponse)
    )
)]
pub async fn get_alive() -> Json<AliveResponse> {
    Json(AliveResponse { alive: true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn alive_reports_true() {
        let Json(body) = get_alive().await;
        assert!(body.alive);
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"alive":true}"#
        );
    }
}
