// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    api::extract::{ValidJson, ValidPath, ValidQuery},
    auth::{AuthPayload, Permission},
    error::ApiError,
    models::{CommentListQuery, CreateCommentRequest, ResponseOk, UpdateCommentRequest},
    rpc::post_service::{
        Comment, CreateComment, GetAllCommentsResponse, GetCommentQuery, UpdateComment,
    },
    state::AppState,
};

pub const CREATE: Permission = Permission::new("comment", "create");
pub const UPDATE: Permission = Permission::new("comment", "update");
pub const DELETE: Permission = Permission::new("comment", "delete");

#[utoipa::path(
    get,
    path = "/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment identifier")),
    tag = "Comments",
    responses((status = 200, body = Comment), (status = 404))
)]
pub async fn get_comment(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<Comment>, ApiError> {
    Ok(Json(state.comments.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/v1/comments",
    params(CommentListQuery),
    tag = "Comments",
    responses((status = 200, body = GetAllCommentsResponse), (status = 400))
)]
pub async fn list_comments(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<CommentListQuery>,
) -> Result<Json<GetAllCommentsResponse>, ApiError> {
    let comments = state
        .comments
        .get_all(&GetCommentQuery {
            page: query.page,
            limit: query.limit,
            post_id: query.post_id,
            user_id: query.user_id,
            sort_by_date: query.sort_by_date.as_str().to_string(),
        })
        .await?;
    Ok(Json(comments))
}

/// Comment on a post as the caller.
#[utoipa::path(
    post,
    path = "/v1/comments",
    request_body = CreateCommentRequest,
    tag = "Comments",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, body = Comment),
        (status = 400),
        (status = 401),
        (status = 403)
    )
)]
pub async fn create_comment(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    ValidJson(request): ValidJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = state
        .comments
        .create(&CreateComment {
            post_id: request.post_id,
            user_id: payload.user_id(),
            description: request.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[utoipa::path(
    put,
    path = "/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment identifier")),
    request_body = UpdateCommentRequest,
    tag = "Comments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = Comment),
        (status = 401),
        (status = 403),
        (status = 404)
    )
)]
pub async fn update_comment(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    ValidJson(request): ValidJson<UpdateCommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state
        .comments
        .update(&UpdateComment {
            id,
            user_id: payload.user_id(),
            description: request.description,
        })
        .await?;
    Ok(Json(comment))
}

#[utoipa::path(
    delete,
    path = "/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment identifier")),
    tag = "Comments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = ResponseOk),
        (status = 401),
        (status = 403),
        (status = 404)
    )
)]
pub async fn delete_comment(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
) -> Result<Json<ResponseOk>, ApiError> {
    state.comments.delete(id).await?;
    tracing::info!(comment_id = id, user_id = payload.user_id(), "Comment deleted");
    Ok(Json(ResponseOk::new("successfully deleted")))
}
