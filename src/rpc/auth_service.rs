// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client for the remote authentication service.
//!
//! The auth service owns credential issuance: registration confirmation,
//! login and password recovery all return an access token minted remotely.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transport::{call, RpcTransport};
use super::{Empty, RpcError};

#[derive(Debug, Clone, Serialize)]
pub struct VerifyTokenRequest<'a> {
    pub access_token: &'a str,
    pub resource: &'a str,
    pub action: &'a str,
}

/// Identity and permission decision for a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyTokenResponse {
    pub id: String,
    pub user_id: i64,
    #[serde(default)]
    pub email: String,
    pub user_type: String,
    pub issued_at: DateTime<Utc>,
    pub expired_at: DateTime<Utc>,
    #[serde(default)]
    pub has_permission: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserEmail {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePasswordRequest {
    pub user_id: i64,
    pub password: String,
}

/// Authenticated user with a freshly issued access token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AuthResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub created_at: String,
    pub access_token: String,
}

/// Typed client for `AuthService`.
#[derive(Clone)]
pub struct AuthServiceClient {
    transport: Arc<dyn RpcTransport>,
}

impl AuthServiceClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    pub async fn verify_token(
        &self,
        request: &VerifyTokenRequest<'_>,
    ) -> Result<VerifyTokenResponse, RpcError> {
        call(&*self.transport, "AuthService/VerifyToken", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Empty, RpcError> {
        call(&*self.transport, "AuthService/Register", request).await
    }

    /// Confirm a registration code; the reply carries the first access token.
    pub async fn verify(&self, request: &VerifyCodeRequest) -> Result<AuthResponse, RpcError> {
        call(&*self.transport, "AuthService/Verify", request).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, RpcError> {
        call(&*self.transport, "AuthService/Login", request).await
    }

    pub async fn forgot_password(&self, request: &UserEmail) -> Result<Empty, RpcError> {
        call(&*self.transport, "AuthService/ForgotPassword", request).await
    }

    pub async fn verify_forgot_password(
        &self,
        request: &VerifyCodeRequest,
    ) -> Result<AuthResponse, RpcError> {
        call(&*self.transport, "AuthService/VerifyForgotPassword", request).await
    }

    pub async fn update_password(
        &self,
        request: &UpdatePasswordRequest,
    ) -> Result<Empty, RpcError> {
        call(&*self.transport, "AuthService/UpdatePassword", request).await
    }

    pub async fn ping(&self) -> Result<(), RpcError> {
        self.transport.ping().await
    }
}
