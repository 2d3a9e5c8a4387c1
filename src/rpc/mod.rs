// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Backend RPC Clients
//!
//! Typed clients for the services behind the gateway:
//!
//! - `AuthService` - token verification and credential issuance
//! - `UserService` - user accounts
//! - `PostService`, `CategoryService`, `CommentService`, `LikeService` -
//!   content, all hosted by the post service
//!
//! Each client wraps a shared [`RpcTransport`]; production uses
//! [`HttpTransport`], tests substitute an in-memory fake.

pub mod auth_service;
pub mod error;
pub mod post_service;
pub mod transport;
pub mod user_service;

#[cfg(test)]
pub(crate) mod testing;

use serde::{Deserialize, Serialize};

pub use auth_service::AuthServiceClient;
pub use error::{RpcCode, RpcError};
pub use post_service::{
    CategoryServiceClient, CommentServiceClient, LikeServiceClient, PostServiceClient,
};
pub use transport::{HttpTransport, RpcTransport};
pub use user_service::UserServiceClient;

/// Request addressing a single entity.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IdRequest {
    pub id: i64,
}

/// Empty response message.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Empty {}
