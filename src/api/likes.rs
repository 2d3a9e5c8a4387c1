// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    api::extract::{ValidJson, ValidQuery},
    auth::{AuthPayload, Permission},
    error::ApiError,
    models::{LikeQuery, LikeRequest},
    rpc::post_service::{CreateOrUpdateLike, GetLikeRequest, Like},
    state::AppState,
};

pub const CREATE: Permission = Permission::new("like", "create");
pub const READ: Permission = Permission::new("like", "read");

/// Like or dislike a post as the caller. A second call overwrites the status.
#[utoipa::path(
    post,
    path = "/v1/likes",
    request_body = LikeRequest,
    tag = "Likes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = Like),
        (status = 400),
        (status = 401),
        (status = 403)
    )
)]
pub async fn create_or_update_like(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    ValidJson(request): ValidJson<LikeRequest>,
) -> Result<Json<Like>, ApiError> {
    let like = state
        .likes
        .create_or_update(&CreateOrUpdateLike {
            user_id: payload.user_id(),
            post_id: request.post_id,
            status: request.status,
        })
        .await?;
    Ok(Json(like))
}

/// The caller's like on a post.
#[utoipa::path(
    get,
    path = "/v1/likes/user-post",
    params(LikeQuery),
    tag = "Likes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = Like),
        (status = 401),
        (status = 403),
        (status = 404)
    )
)]
pub async fn get_user_like(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    ValidQuery(query): ValidQuery<LikeQuery>,
) -> Result<Json<Like>, ApiError> {
    let like = state
        .likes
        .get(&GetLikeRequest {
            user_id: payload.user_id(),
            post_id: query.post_id,
        })
        .await?;
    Ok(Json(like))
}
