// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{protect, Payload, Permission},
    models::{
        AccountType, CategoryRequest, CommentOrder, CreateCommentRequest, CreatePostRequest,
        CreateUserRequest, ForgotPasswordRequest, Gender, LikeRequest, LoginRequest,
        RegisterRequest, ResponseOk, SortOrder, UpdateCommentRequest, UpdatePasswordRequest,
        UpdatePostRequest, UpdateUserRequest, VerifyRequest,
    },
    rpc::{
        auth_service::AuthResponse,
        post_service::{
            Category, Comment, GetAllCategoriesResponse, GetAllCommentsResponse,
            GetAllPostsResponse, Like, Post,
        },
        user_service::{GetAllUsersResponse, User},
    },
    state::AppState,
};

pub mod auth;
pub mod categories;
pub mod comments;
pub mod extract;
pub mod health;
pub mod likes;
pub mod posts;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub fn router(state: AppState) -> Router {
    let verifier = state.verifier.clone();
    let guarded = |route: MethodRouter<AppState>, permission: Permission| {
        protect(route, &verifier, permission)
    };

    let v1_routes = Router::new()
        // Categories
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Posts
        .route(
            "/posts",
            get(posts::list_posts).merge(guarded(post(posts::create_post), posts::CREATE)),
        )
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .merge(guarded(put(posts::update_post), posts::UPDATE))
                .merge(guarded(delete(posts::delete_post), posts::DELETE)),
        )
        // Comments
        .route(
            "/comments",
            get(comments::list_comments)
                .merge(guarded(post(comments::create_comment), comments::CREATE)),
        )
        .route(
            "/comments/{id}",
            get(comments::get_comment)
                .merge(guarded(put(comments::update_comment), comments::UPDATE))
                .merge(guarded(delete(comments::delete_comment), comments::DELETE)),
        )
        // Likes
        .route(
            "/likes",
            guarded(post(likes::create_or_update_like), likes::CREATE),
        )
        .route(
            "/likes/user-post",
            guarded(get(likes::get_user_like), likes::READ),
        )
        // Users
        .route(
            "/users",
            get(users::list_users).merge(guarded(post(users::create_user), users::CREATE)),
        )
        .route(
            "/users/{id}",
            get(users::get_user)
                .merge(guarded(put(users::update_user), users::UPDATE))
                .merge(guarded(delete(users::delete_user), users::DELETE)),
        )
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/verify", post(auth::verify))
        .route("/auth/login", post(auth::login))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route(
            "/auth/verify-forgot-password",
            post(auth::verify_forgot_password),
        )
        .route(
            "/auth/update-password",
            guarded(post(auth::update_password), auth::UPDATE_PASSWORD),
        );

    let health_routes = Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Access token issued by the auth service"))
                        .build(),
                ),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        categories::create_category,
        categories::get_category,
        categories::list_categories,
        categories::update_category,
        categories::delete_category,
        posts::get_post,
        posts::list_posts,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        comments::get_comment,
        comments::list_comments,
        comments::create_comment,
        comments::update_comment,
        comments::delete_comment,
        likes::create_or_update_like,
        likes::get_user_like,
        users::create_user,
        users::get_user,
        users::list_users,
        users::update_user,
        users::delete_user,
        auth::register,
        auth::verify,
        auth::login,
        auth::forgot_password,
        auth::verify_forgot_password,
        auth::update_password,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Category,
            Post,
            Comment,
            Like,
            User,
            AuthResponse,
            GetAllCategoriesResponse,
            GetAllPostsResponse,
            GetAllCommentsResponse,
            GetAllUsersResponse,
            CategoryRequest,
            CreatePostRequest,
            UpdatePostRequest,
            CreateCommentRequest,
            UpdateCommentRequest,
            LikeRequest,
            CreateUserRequest,
            UpdateUserRequest,
            RegisterRequest,
            VerifyRequest,
            LoginRequest,
            ForgotPasswordRequest,
            UpdatePasswordRequest,
            ResponseOk,
            SortOrder,
            CommentOrder,
            Gender,
            AccountType,
            Payload,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Categories", description = "Post categories"),
        (name = "Posts", description = "Post publishing and browsing"),
        (name = "Comments", description = "Comments on posts"),
        (name = "Likes", description = "Likes and dislikes of posts"),
        (name = "Users", description = "User accounts"),
        (name = "Auth", description = "Registration, login and password recovery"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
