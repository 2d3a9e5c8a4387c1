// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::rpc::{RpcCode, RpcError};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// Backend failures keep their meaning across the gateway boundary.
impl From<RpcError> for ApiError {
    fn from(err: RpcError) -> Self {
        let status = match &err {
            RpcError::Unavailable(_) => StatusCode::BAD_GATEWAY,
            RpcError::Encode(_) | RpcError::Decode(_) => StatusCode::BAD_GATEWAY,
            RpcError::Status { code, .. } => match code {
                RpcCode::InvalidArgument | RpcCode::FailedPrecondition => StatusCode::BAD_REQUEST,
                RpcCode::NotFound => StatusCode::NOT_FOUND,
                RpcCode::AlreadyExists => StatusCode::CONFLICT,
                RpcCode::PermissionDenied => StatusCode::FORBIDDEN,
                RpcCode::Unauthenticated => StatusCode::UNAUTHORIZED,
                RpcCode::Unavailable => StatusCode::BAD_GATEWAY,
                RpcCode::Internal | RpcCode::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };

        if status.is_server_error() {
            tracing::warn!(error = %err, "Backend call failed");
        }

        let message = match err {
            RpcError::Status { message, .. } if !message.is_empty() => message,
            other => other.to_string(),
        };
        Self::new(status, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
