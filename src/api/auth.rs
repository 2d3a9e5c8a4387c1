// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account registration, login and password recovery.
//!
//! Tokens are issued by the auth service; the gateway only relays them.

use axum::{extract::State, Json};

use crate::{
    api::extract::ValidJson,
    auth::{AuthPayload, Permission},
    error::ApiError,
    models::{
        ForgotPasswordRequest, LoginRequest, RegisterRequest, ResponseOk, UpdatePasswordRequest,
        VerifyRequest,
    },
    rpc::{
        auth_service::{self as wire, AuthResponse},
        RpcCode,
    },
    state::AppState,
};

pub const UPDATE_PASSWORD: Permission = Permission::new("user", "update-password");

/// Start a registration; the auth service mails a confirmation code.
#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 200, body = ResponseOk),
        (status = 400, description = "Invalid registration data"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<RegisterRequest>,
) -> Result<Json<ResponseOk>, ApiError> {
    match state.users.get_by_email(&request.email).await {
        Ok(_) => return Err(ApiError::conflict("email already registered")),
        Err(err) if err.code() == Some(RpcCode::NotFound) => {}
        Err(err) => return Err(err.into()),
    }

    state
        .auth
        .register(&wire::RegisterRequest {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
        })
        .await?;
    Ok(Json(ResponseOk::new("success")))
}

/// Confirm a registration code and receive the first access token.
#[utoipa::path(
    post,
    path = "/v1/auth/verify",
    request_body = VerifyRequest,
    tag = "Auth",
    responses(
        (status = 200, body = AuthResponse),
        (status = 400),
        (status = 403, description = "Wrong or expired code")
    )
)]
pub async fn verify(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<VerifyRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response = state
        .auth
        .verify(&wire::VerifyCodeRequest {
            email: request.email,
            code: request.code,
        })
        .await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, body = AuthResponse),
        (status = 400),
        (status = 403, description = "Wrong email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response = state
        .auth
        .login(&wire::LoginRequest {
            email: request.email,
            password: request.password,
        })
        .await?;
    tracing::info!(user_id = response.id, "User logged in");
    Ok(Json(response))
}

/// Mail a password recovery code to a registered address.
#[utoipa::path(
    post,
    path = "/v1/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    tag = "Auth",
    responses(
        (status = 200, body = ResponseOk),
        (status = 400),
        (status = 404, description = "No account with this email")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<ForgotPasswordRequest>,
) -> Result<Json<ResponseOk>, ApiError> {
    state.users.get_by_email(&request.email).await?;
    state
        .auth
        .forgot_password(&wire::UserEmail {
            email: request.email,
        })
        .await?;
    Ok(Json(ResponseOk::new("Verification code has been sent!")))
}

/// Exchange a recovery code for an access token.
#[utoipa::path(
    post,
    path = "/v1/auth/verify-forgot-password",
    request_body = VerifyRequest,
    tag = "Auth",
    responses(
        (status = 200, body = AuthResponse),
        (status = 400),
        (status = 403, description = "Wrong or expired code")
    )
)]
pub async fn verify_forgot_password(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<VerifyRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response = state
        .auth
        .verify_forgot_password(&wire::VerifyCodeRequest {
            email: request.email,
            code: request.code,
        })
        .await?;
    Ok(Json(response))
}

/// Set a new password for the caller.
#[utoipa::path(
    post,
    path = "/v1/auth/update-password",
    request_body = UpdatePasswordRequest,
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = ResponseOk),
        (status = 400),
        (status = 401),
        (status = 403)
    )
)]
pub async fn update_password(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    ValidJson(request): ValidJson<UpdatePasswordRequest>,
) -> Result<Json<ResponseOk>, ApiError> {
    state
        .auth
        .update_password(&wire::UpdatePasswordRequest {
            user_id: payload.user_id(),
            password: request.password,
        })
        .await?;
    tracing::info!(user_id = payload.user_id(), "Password updated");
    Ok(Json(ResponseOk::new("Password has been updated!")))
}
