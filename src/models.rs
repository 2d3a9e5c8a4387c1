// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request bodies and query parameters accepted by the REST API. Every type
//! derives `Deserialize` and `Validate`; bodies derive `ToSchema` and queries
//! `IntoParams` for the OpenAPI document.
//!
//! Response bodies are the backend messages themselves (see [`crate::rpc`]),
//! except for [`ResponseOk`].
//!
//! ## Model Categories
//!
//! - **Categories**: Post categories
//! - **Posts**: Authored content
//! - **Comments**: Replies attached to a post
//! - **Likes**: Per-user like/dislike of a post
//! - **Users**: Account management
//! - **Auth**: Registration, login and password recovery

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Default page size of list endpoints.
pub const DEFAULT_LIMIT: i32 = 10;
/// Default page of list endpoints (1-based).
pub const DEFAULT_PAGE: i32 = 1;

fn default_limit() -> i32 {
    DEFAULT_LIMIT
}

fn default_page() -> i32 {
    DEFAULT_PAGE
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ResponseOk {
    pub message: String,
}

impl ResponseOk {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// Pagination & Sorting
// =============================================================================

/// Paging and free-text search shared by the category and user listings.
#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: i32,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i32,
    #[serde(default)]
    pub search: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            search: String::new(),
        }
    }
}

/// Creation-date order of a post listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Creation-date order of a comment listing; `none` keeps backend order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommentOrder {
    Asc,
    #[default]
    Desc,
    None,
}

impl CommentOrder {
    /// Wire value; the backend reads an empty string as unsorted.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentOrder::Asc => "asc",
            CommentOrder::Desc => "desc",
            CommentOrder::None => "",
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PostListQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: i32,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i32,
    /// Only posts by this author
    #[serde(default)]
    #[validate(range(min = 0))]
    pub user_id: i64,
    /// Only posts in this category
    #[serde(default)]
    #[validate(range(min = 0))]
    pub category_id: i64,
    #[serde(default)]
    pub sort_by_date: SortOrder,
}

impl Default for PostListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            user_id: 0,
            category_id: 0,
            sort_by_date: SortOrder::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct CommentListQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: i32,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i32,
    /// Only comments on this post
    #[serde(default)]
    #[validate(range(min = 0))]
    pub post_id: i64,
    /// Only comments by this author
    #[serde(default)]
    #[validate(range(min = 0))]
    pub user_id: i64,
    #[serde(default)]
    pub sort_by_date: CommentOrder,
}

impl Default for CommentListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            post_id: 0,
            user_id: 0,
            sort_by_date: CommentOrder::default(),
        }
    }
}

// =============================================================================
// Category Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
}

// =============================================================================
// Post Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[validate(range(min = 1))]
    pub category_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

// =============================================================================
// Comment Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateCommentRequest {
    #[validate(range(min = 1))]
    pub post_id: i64,
    #[validate(length(min = 1))]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1))]
    pub description: String,
}

// =============================================================================
// Like Models
// =============================================================================

/// Like (`true`) or dislike (`false`) a post; repeats overwrite the status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct LikeRequest {
    #[validate(range(min = 1))]
    pub post_id: i64,
    #[serde(default)]
    pub status: bool,
}

#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct LikeQuery {
    #[validate(range(min = 1))]
    pub post_id: i64,
}

// =============================================================================
// User Models
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// User type that can be assigned through the API.
///
/// `admin` exists on verified credentials but is never assigned here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    User,
    Superadmin,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::User => "user",
            AccountType::Superadmin => "superadmin",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 30))]
    pub first_name: String,
    #[validate(length(min = 2, max = 30))]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[validate(email)]
    pub email: String,
    pub gender: Gender,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub profile_image_url: String,
    #[serde(rename = "type")]
    pub user_type: AccountType,
    #[validate(length(min = 6, max = 16))]
    pub password: String,
}

/// Profile update. The email and password are changed through `/auth`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 30))]
    pub first_name: String,
    #[validate(length(min = 2, max = 30))]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    pub gender: Gender,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub profile_image_url: String,
    /// Only a superadmin may set this
    #[serde(rename = "type", default)]
    pub user_type: Option<AccountType>,
}

// =============================================================================
// Auth Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 30))]
    pub first_name: String,
    #[validate(length(min = 2, max = 30))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 16))]
    pub password: String,
}

/// Email plus the one-time code mailed to it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct VerifyRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 16))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 6, max = 16))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_json() -> serde_json::Value {
        json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "gender": "female",
            "type": "user",
            "password": "secret1"
        })
    }

    #[test]
    fn list_query_defaults() {
        let query: ListQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.limit, 10);
        assert_eq!(query.page, 1);
        assert!(query.search.is_empty());
        assert!(query.validate().is_ok());
    }

    #[test]
    fn list_query_rejects_non_positive_paging() {
        let query: ListQuery = serde_json::from_value(json!({"limit": 0})).unwrap();
        assert!(query.validate().is_err());
        let query: ListQuery = serde_json::from_value(json!({"page": -1})).unwrap();
        assert!(query.validate().is_err());
    }

    #[test]
    fn sort_orders_parse_known_values_only() {
        let query: PostListQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.sort_by_date, SortOrder::Desc);

        let query: PostListQuery = serde_json::from_value(json!({"sort_by_date": "asc"})).unwrap();
        assert_eq!(query.sort_by_date.as_str(), "asc");

        assert!(serde_json::from_value::<PostListQuery>(json!({"sort_by_date": "none"})).is_err());
        assert!(serde_json::from_value::<PostListQuery>(json!({"sort_by_date": "up"})).is_err());

        let query: CommentListQuery =
            serde_json::from_value(json!({"sort_by_date": "none"})).unwrap();
        assert_eq!(query.sort_by_date, CommentOrder::None);
        assert_eq!(query.sort_by_date.as_str(), "");
    }

    #[test]
    fn create_user_valid() {
        let request: CreateUserRequest = serde_json::from_value(user_json()).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.user_type, AccountType::User);
        assert_eq!(request.gender, Gender::Female);
    }

    #[test]
    fn create_user_field_rules() {
        let mut body = user_json();
        body["first_name"] = json!("A");
        let request: CreateUserRequest = serde_json::from_value(body).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));

        let mut body = user_json();
        body["email"] = json!("not-an-email");
        let request: CreateUserRequest = serde_json::from_value(body).unwrap();
        assert!(request.validate().unwrap_err().field_errors().contains_key("email"));

        let mut body = user_json();
        body["password"] = json!("12345678901234567");
        let request: CreateUserRequest = serde_json::from_value(body).unwrap();
        assert!(request.validate().unwrap_err().field_errors().contains_key("password"));
    }

    #[test]
    fn create_user_enumerations() {
        let mut body = user_json();
        body["gender"] = json!("other");
        assert!(serde_json::from_value::<CreateUserRequest>(body).is_err());

        let mut body = user_json();
        body["type"] = json!("admin");
        assert!(serde_json::from_value::<CreateUserRequest>(body).is_err());
    }

    #[test]
    fn update_user_type_is_optional() {
        let request: UpdateUserRequest = serde_json::from_value(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "gender": "female"
        }))
        .unwrap();
        assert!(request.user_type.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn category_title_bounds() {
        assert!(CategoryRequest { title: "Rust".into() }.validate().is_ok());
        assert!(CategoryRequest { title: String::new() }.validate().is_err());
        assert!(CategoryRequest { title: "x".repeat(101) }.validate().is_err());
    }

    #[test]
    fn post_requires_title_and_category() {
        let request: CreatePostRequest =
            serde_json::from_value(json!({"title": "", "category_id": 0})).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("category_id"));
    }

    #[test]
    fn like_defaults_to_dislike() {
        let request: LikeRequest = serde_json::from_value(json!({"post_id": 3})).unwrap();
        assert!(!request.status);
        assert!(request.validate().is_ok());
    }
}
