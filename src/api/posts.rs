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
    models::{CreatePostRequest, PostListQuery, ResponseOk, UpdatePostRequest},
    rpc::post_service::{ChangePost, CreatePost, GetAllPostsRequest, GetAllPostsResponse, Post},
    state::AppState,
};

pub const CREATE: Permission = Permission::new("post", "create");
pub const UPDATE: Permission = Permission::new("post", "update");
pub const DELETE: Permission = Permission::new("post", "delete");

/// Fetch a post and count the view.
#[utoipa::path(
    get,
    path = "/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    tag = "Posts",
    responses((status = 200, body = Post), (status = 404))
)]
pub async fn get_post(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<Post>, ApiError> {
    if let Err(err) = state.posts.view_inc(id).await {
        tracing::warn!(post_id = id, error = %err, "Failed to count post view");
    }
    Ok(Json(state.posts.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/v1/posts",
    params(PostListQuery),
    tag = "Posts",
    responses((status = 200, body = GetAllPostsResponse), (status = 400))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<PostListQuery>,
) -> Result<Json<GetAllPostsResponse>, ApiError> {
    let posts = state
        .posts
        .get_all(&GetAllPostsRequest {
            page: query.page,
            limit: query.limit,
            user_id: query.user_id,
            category_id: query.category_id,
            sort_by_date: query.sort_by_date.as_str().to_string(),
        })
        .await?;
    Ok(Json(posts))
}

/// Publish a post authored by the caller.
#[utoipa::path(
    post,
    path = "/v1/posts",
    request_body = CreatePostRequest,
    tag = "Posts",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, body = Post),
        (status = 400),
        (status = 401),
        (status = 403)
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    ValidJson(request): ValidJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state
        .posts
        .create(&CreatePost {
            title: request.title,
            description: request.description,
            image_url: request.image_url,
            user_id: payload.user_id(),
            category_id: request.category_id,
        })
        .await?;

    tracing::info!(post_id = post.id, user_id = payload.user_id(), "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// Edit a post. The post service only accepts edits by the author.
#[utoipa::path(
    put,
    path = "/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    request_body = UpdatePostRequest,
    tag = "Posts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = Post),
        (status = 401),
        (status = 403),
        (status = 404)
    )
)]
pub async fn update_post(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    ValidJson(request): ValidJson<UpdatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    let post = state
        .posts
        .update(&ChangePost {
            id,
            user_id: payload.user_id(),
            title: request.title,
            description: request.description,
            image_url: request.image_url,
        })
        .await?;
    Ok(Json(post))
}

#[utoipa::path(
    delete,
    path = "/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    tag = "Posts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = ResponseOk),
        (status = 401),
        (status = 403),
        (status = 404)
    )
)]
pub async fn delete_post(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
) -> Result<Json<ResponseOk>, ApiError> {
    state.posts.delete(id).await?;
    tracing::info!(post_id = id, user_id = payload.user_id(), "Post deleted");
    Ok(Json(ResponseOk::new("successfully deleted")))
}
