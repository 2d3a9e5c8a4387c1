// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential verification against the remote auth service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{AuthError, Payload, PayloadFields, UserType};
use crate::rpc::auth_service::{VerifyTokenRequest, VerifyTokenResponse};
use crate::rpc::{AuthServiceClient, RpcCode, RpcError};

/// Reason the auth service attaches to rejections of expired tokens.
const TOKEN_EXPIRED_REASON: &str = "token_expired";

/// Resource/action label a route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permission {
    pub resource: &'static str,
    pub action: &'static str,
}

impl Permission {
    pub const fn new(resource: &'static str, action: &'static str) -> Self {
        Self { resource, action }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

/// Identity and permission decision returned by a verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedCredential {
    pub id: String,
    pub user_id: i64,
    pub email: String,
    pub user_type: String,
    pub issued_at: DateTime<Utc>,
    pub expired_at: DateTime<Utc>,
    pub has_permission: bool,
}

impl VerifiedCredential {
    /// Build the request payload from the verified fields.
    pub fn to_payload(&self) -> Result<Payload, AuthError> {
        let user_type = UserType::from_str(&self.user_type).ok_or(AuthError::InvalidCredential)?;

        Payload::new(PayloadFields {
            id: self.id.clone(),
            user_id: self.user_id,
            email: self.email.clone(),
            user_type,
            issued_at: self.issued_at,
            expired_at: self.expired_at,
        })
    }
}

impl From<VerifyTokenResponse> for VerifiedCredential {
    fn from(response: VerifyTokenResponse) -> Self {
        Self {
            id: response.id,
            user_id: response.user_id,
            email: response.email,
            user_type: response.user_type,
            issued_at: response.issued_at,
            expired_at: response.expired_at,
            has_permission: response.has_permission,
        }
    }
}

/// Validates a raw credential for a resource/action pair.
///
/// Implementations make at most one remote call per invocation and never
/// retry; a failed verification is final for the request.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(
        &self,
        access_token: &str,
        permission: Permission,
    ) -> Result<VerifiedCredential, AuthError>;
}

pub type SharedVerifier = Arc<dyn CredentialVerifier>;

/// [`CredentialVerifier`] backed by `AuthService/VerifyToken`.
#[derive(Clone)]
pub struct RpcVerifier {
    auth: AuthServiceClient,
}

impl RpcVerifier {
    pub fn new(auth: AuthServiceClient) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl CredentialVerifier for RpcVerifier {
    async fn verify(
        &self,
        access_token: &str,
        permission: Permission,
    ) -> Result<VerifiedCredential, AuthError> {
        let request = VerifyTokenRequest {
            access_token,
            resource: permission.resource,
            action: permission.action,
        };

        self.auth
            .verify_token(&request)
            .await
            .map(VerifiedCredential::from)
            .map_err(verification_error)
    }
}

/// Map a backend failure onto the authorization taxonomy.
fn verification_error(err: RpcError) -> AuthError {
    match err.code() {
        Some(RpcCode::Unauthenticated | RpcCode::InvalidArgument)
            if err.reason() == Some(TOKEN_EXPIRED_REASON) =>
        {
            AuthError::ExpiredCredential
        }
        Some(RpcCode::Unauthenticated | RpcCode::InvalidArgument | RpcCode::NotFound) => {
            AuthError::InvalidCredential
        }
        Some(RpcCode::PermissionDenied) => AuthError::Forbidden,
        _ => AuthError::VerifierUnavailable(err.to_string()),
    }
}
