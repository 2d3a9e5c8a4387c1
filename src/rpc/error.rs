// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Backend RPC errors.

use serde::{Deserialize, Serialize};

/// Status code reported by a backend service.
///
/// Codes arrive as snake_case strings; anything unrecognised maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpcCode {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    Unauthenticated,
    FailedPrecondition,
    Unavailable,
    Internal,
    #[serde(other)]
    Unknown,
}

impl RpcCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcCode::InvalidArgument => "invalid_argument",
            RpcCode::NotFound => "not_found",
            RpcCode::AlreadyExists => "already_exists",
            RpcCode::PermissionDenied => "permission_denied",
            RpcCode::Unauthenticated => "unauthenticated",
            RpcCode::FailedPrecondition => "failed_precondition",
            RpcCode::Unavailable => "unavailable",
            RpcCode::Internal => "internal",
            RpcCode::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RpcCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error body returned by a backend service on a non-2xx reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcStatusBody {
    pub code: RpcCode,
    #[serde(default)]
    pub message: String,
    /// Machine-readable detail, e.g. `token_expired`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RpcError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("backend returned {code}: {message}")]
    Status {
        code: RpcCode,
        message: String,
        reason: Option<String>,
    },

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl RpcError {
    pub fn status(code: RpcCode, message: impl Into<String>) -> Self {
        RpcError::Status {
            code,
            message: message.into(),
            reason: None,
        }
    }

    /// Status code of a backend rejection, `None` for transport failures.
    pub fn code(&self) -> Option<RpcCode> {
        match self {
            RpcError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            RpcError::Status { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }
}

impl From<RpcStatusBody> for RpcError {
    fn from(body: RpcStatusBody) -> Self {
        RpcError::Status {
            code: body.code,
            message: body.message,
            reason: body.reason,
        }
    }
}
