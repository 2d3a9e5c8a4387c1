// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client for the user service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transport::{call, RpcTransport};
use super::{Empty, IdRequest, RpcError};

/// A platform user as returned by the user service.
///
/// Password hashes are never part of this message, even if the backend sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub gender: String,
    pub username: String,
    pub profile_image_url: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub gender: String,
    pub username: String,
    pub profile_image_url: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub gender: String,
    pub username: String,
    pub profile_image_url: String,
    /// Only set when the caller may change user types
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetAllUsersRequest {
    pub limit: i32,
    pub page: i32,
    pub search: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct GetAllUsersResponse {
    pub users: Vec<User>,
    pub count: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetByEmailRequest<'a> {
    pub email: &'a str,
}

/// Typed client for `UserService`.
#[derive(Clone)]
pub struct UserServiceClient {
    transport: Arc<dyn RpcTransport>,
}

impl UserServiceClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    pub async fn create(&self, request: &CreateUser) -> Result<User, RpcError> {
        call(&*self.transport, "UserService/Create", request).await
    }

    pub async fn get(&self, id: i64) -> Result<User, RpcError> {
        call(&*self.transport, "UserService/Get", &IdRequest { id }).await
    }

    pub async fn get_all(&self, request: &GetAllUsersRequest) -> Result<GetAllUsersResponse, RpcError> {
        call(&*self.transport, "UserService/GetAll", request).await
    }

    pub async fn update(&self, request: &UpdateUser) -> Result<User, RpcError> {
        call(&*self.transport, "UserService/Update", request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Empty, RpcError> {
        call(&*self.transport, "UserService/Delete", &IdRequest { id }).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User, RpcError> {
        call(
            &*self.transport,
            "UserService/GetByEmail",
            &GetByEmailRequest { email },
        )
        .await
    }
}
