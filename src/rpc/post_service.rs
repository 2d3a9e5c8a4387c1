// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Clients for the post service.
//!
//! The post service hosts four RPC services behind one address: posts,
//! categories, comments and likes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transport::{call, RpcTransport};
use super::{Empty, IdRequest, RpcError};

// =============================================================================
// Posts
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub user_id: i64,
    pub category_id: i64,
    pub views_count: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePost {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub user_id: i64,
    pub category_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePost {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetAllPostsRequest {
    pub page: i32,
    pub limit: i32,
    pub user_id: i64,
    pub category_id: i64,
    pub sort_by_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct GetAllPostsResponse {
    pub posts: Vec<Post>,
    pub count: i32,
}

/// Typed client for `PostService`.
#[derive(Clone)]
pub struct PostServiceClient {
    transport: Arc<dyn RpcTransport>,
}

impl PostServiceClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    pub async fn create(&self, request: &CreatePost) -> Result<Post, RpcError> {
        call(&*self.transport, "PostService/Create", request).await
    }

    pub async fn get(&self, id: i64) -> Result<Post, RpcError> {
        call(&*self.transport, "PostService/Get", &IdRequest { id }).await
    }

    pub async fn get_all(&self, request: &GetAllPostsRequest) -> Result<GetAllPostsResponse, RpcError> {
        call(&*self.transport, "PostService/GetAll", request).await
    }

    pub async fn update(&self, request: &ChangePost) -> Result<Post, RpcError> {
        call(&*self.transport, "PostService/Update", request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Empty, RpcError> {
        call(&*self.transport, "PostService/Delete", &IdRequest { id }).await
    }

    /// Count one view of a post.
    pub async fn view_inc(&self, id: i64) -> Result<Empty, RpcError> {
        call(&*self.transport, "PostService/ViewInc", &IdRequest { id }).await
    }
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCategory {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCategory {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetAllCategoriesRequest {
    pub limit: i32,
    pub page: i32,
    pub search: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct GetAllCategoriesResponse {
    pub categories: Vec<Category>,
    pub count: i32,
}

/// Typed client for `CategoryService`.
#[derive(Clone)]
pub struct CategoryServiceClient {
    transport: Arc<dyn RpcTransport>,
}

impl CategoryServiceClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    pub async fn create(&self, request: &CreateCategory) -> Result<Category, RpcError> {
        call(&*self.transport, "CategoryService/Create", request).await
    }

    pub async fn get(&self, id: i64) -> Result<Category, RpcError> {
        call(&*self.transport, "CategoryService/Get", &IdRequest { id }).await
    }

    pub async fn get_all(
        &self,
        request: &GetAllCategoriesRequest,
    ) -> Result<GetAllCategoriesResponse, RpcError> {
        call(&*self.transport, "CategoryService/GetAll", request).await
    }

    pub async fn update(&self, request: &UpdateCategory) -> Result<Category, RpcError> {
        call(&*self.transport, "CategoryService/Update", request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Empty, RpcError> {
        call(&*self.transport, "CategoryService/Delete", &IdRequest { id }).await
    }
}

// =============================================================================
// Comments
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateComment {
    pub post_id: i64,
    pub user_id: i64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateComment {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetCommentQuery {
    pub page: i32,
    pub limit: i32,
    pub post_id: i64,
    pub user_id: i64,
    pub sort_by_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct GetAllCommentsResponse {
    pub comments: Vec<Comment>,
    pub count: i32,
}

/// Typed client for `CommentService`.
#[derive(Clone)]
pub struct CommentServiceClient {
    transport: Arc<dyn RpcTransport>,
}

impl CommentServiceClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    pub async fn create(&self, request: &CreateComment) -> Result<Comment, RpcError> {
        call(&*self.transport, "CommentService/Create", request).await
    }

    pub async fn get(&self, id: i64) -> Result<Comment, RpcError> {
        call(&*self.transport, "CommentService/Get", &IdRequest { id }).await
    }

    pub async fn get_all(&self, request: &GetCommentQuery) -> Result<GetAllCommentsResponse, RpcError> {
        call(&*self.transport, "CommentService/GetAll", request).await
    }

    pub async fn update(&self, request: &UpdateComment) -> Result<Comment, RpcError> {
        call(&*self.transport, "CommentService/Update", request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Empty, RpcError> {
        call(&*self.transport, "CommentService/Delete", &IdRequest { id }).await
    }
}

// =============================================================================
// Likes
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Like {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    /// `true` for a like, `false` for a dislike
    pub status: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrUpdateLike {
    pub user_id: i64,
    pub post_id: i64,
    pub status: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetLikeRequest {
    pub user_id: i64,
    pub post_id: i64,
}

/// Typed client for `LikeService`.
#[derive(Clone)]
pub struct LikeServiceClient {
    transport: Arc<dyn RpcTransport>,
}

impl LikeServiceClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    pub async fn create_or_update(&self, request: &CreateOrUpdateLike) -> Result<Like, RpcError> {
        call(&*self.transport, "LikeService/CreateOrUpdateLike", request).await
    }

    pub async fn get(&self, request: &GetLikeRequest) -> Result<Like, RpcError> {
        call(&*self.transport, "LikeService/GetLike", request).await
    }
}
