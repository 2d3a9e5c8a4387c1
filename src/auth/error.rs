// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authorization error type.
///
/// The first five variants are raised by the authorization middleware and end
/// the request. `PayloadNotBound` and `PayloadMalformed` are raised when a
/// handler reads the identity on a route that was wired without the
/// middleware, and are reported as server errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer credential in the request
    MissingCredential,
    /// Credential rejected by the auth service
    InvalidCredential,
    /// Credential past its expiry
    ExpiredCredential,
    /// Auth service could not be reached or answered garbage
    VerifierUnavailable(String),
    /// Credential is valid but the subject may not perform the action
    Forbidden,
    /// Handler asked for the identity on a route without the middleware
    PayloadNotBound,
    /// Identity bound for this request is unusable
    PayloadMalformed,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::InvalidCredential => "invalid_credential",
            AuthError::ExpiredCredential => "expired_credential",
            AuthError::VerifierUnavailable(_) => "verifier_unavailable",
            AuthError::Forbidden => "forbidden",
            AuthError::PayloadNotBound => "payload_not_bound",
            AuthError::PayloadMalformed => "payload_malformed",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential
            | AuthError::InvalidCredential
            | AuthError::ExpiredCredential
            | AuthError::VerifierUnavailable(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::PayloadNotBound | AuthError::PayloadMalformed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredential => write!(f, "Authorization header is not provided"),
            AuthError::InvalidCredential => write!(f, "Access token is invalid"),
            AuthError::ExpiredCredential => write!(f, "Access token has expired"),
            AuthError::VerifierUnavailable(msg) => {
                write!(f, "Access token could not be verified: {msg}")
            }
            AuthError::Forbidden => write!(f, "You are not allowed to perform this action"),
            AuthError::PayloadNotBound => {
                write!(f, "Authorization payload is not bound to this request")
            }
            AuthError::PayloadMalformed => write!(f, "Authorization payload is malformed"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
