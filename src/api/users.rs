// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    api::extract::{ValidJson, ValidPath, ValidQuery},
    auth::{AuthPayload, Permission, UserType},
    error::ApiError,
    models::{AccountType, CreateUserRequest, ListQuery, ResponseOk, UpdateUserRequest},
    rpc::user_service::{CreateUser, GetAllUsersRequest, GetAllUsersResponse, UpdateUser, User},
    state::AppState,
};

pub const CREATE: Permission = Permission::new("user", "create");
pub const UPDATE: Permission = Permission::new("user", "update");
pub const DELETE: Permission = Permission::new("user", "delete");

/// Create a user account.
///
/// Any `type` other than `user` requires a superadmin caller.
#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = CreateUserRequest,
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, body = User),
        (status = 400, description = "Invalid user data"),
        (status = 401),
        (status = 403, description = "Not authorized (superadmin required for privileged types)"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    ValidJson(request): ValidJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if request.user_type != AccountType::User
        && !payload.user_type().has_privilege(UserType::Superadmin)
    {
        tracing::info!(
            user_id = payload.user_id(),
            requested_type = request.user_type.as_str(),
            "Rejected privileged user creation by non-superadmin"
        );
        return Err(ApiError::forbidden(
            "only a superadmin can create privileged users",
        ));
    }

    let user = state
        .users
        .create(&CreateUser {
            first_name: request.first_name,
            last_name: request.last_name,
            phone_number: request.phone_number,
            email: request.email,
            gender: request.gender.as_str().to_string(),
            username: request.username,
            profile_image_url: request.profile_image_url,
            user_type: request.user_type.as_str().to_string(),
            password: request.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    tag = "Users",
    responses((status = 200, body = User), (status = 404))
)]
pub async fn get_user(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/v1/users",
    params(ListQuery),
    tag = "Users",
    responses((status = 200, body = GetAllUsersResponse), (status = 400))
)]
pub async fn list_users(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<ListQuery>,
) -> Result<Json<GetAllUsersResponse>, ApiError> {
    let users = state
        .users
        .get_all(&GetAllUsersRequest {
            limit: query.limit,
            page: query.page,
            search: query.search,
        })
        .await?;
    Ok(Json(users))
}

/// Update a user profile.
///
/// Changing `type` requires a superadmin caller.
#[utoipa::path(
    put,
    path = "/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = User),
        (status = 400),
        (status = 401),
        (status = 403, description = "Not authorized (superadmin required to change type)"),
        (status = 404)
    )
)]
pub async fn update_user(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    ValidJson(request): ValidJson<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    if request.user_type.is_some() && !payload.user_type().has_privilege(UserType::Superadmin) {
        tracing::info!(
            user_id = payload.user_id(),
            target_user_id = id,
            "Rejected user type change by non-superadmin"
        );
        return Err(ApiError::forbidden("only a superadmin can change the user type"));
    }

    let user = state
        .users
        .update(&UpdateUser {
            id,
            first_name: request.first_name,
            last_name: request.last_name,
            phone_number: request.phone_number,
            gender: request.gender.as_str().to_string(),
            username: request.username,
            profile_image_url: request.profile_image_url,
            user_type: request.user_type.map(|t| t.as_str().to_string()),
        })
        .await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = ResponseOk),
        (status = 401),
        (status = 403),
        (status = 404)
    )
)]
pub async fn delete_user(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
) -> Result<Json<ResponseOk>, ApiError> {
    state.users.delete(id).await?;
    tracing::info!(target_user_id = id, user_id = payload.user_id(), "User deleted");
    Ok(Json(ResponseOk::new("successfully deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{acting_as, Harness};
    use crate::models::Gender;
    use crate::rpc::{testing::FakeTransport, RpcCode, RpcError};
    use serde_json::json;

    fn user_json(id: i64, user_type: &str) -> serde_json::Value {
        json!({
            "id": id,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "gender": "female",
            "type": user_type,
            "created_at": "2026-10-16T10:00:00Z"
        })
    }

    fn new_user(user_type: AccountType) -> CreateUserRequest {
        CreateUserRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone_number: String::new(),
            email: "ada@example.com".into(),
            gender: Gender::Female,
            username: String::new(),
            profile_image_url: String::new(),
            user_type,
            password: "secret1".into(),
        }
    }

    fn update(user_type: Option<AccountType>) -> UpdateUserRequest {
        UpdateUserRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone_number: String::new(),
            gender: Gender::Female,
            username: "ada".into(),
            profile_image_url: String::new(),
            user_type,
        }
    }

    #[tokio::test]
    async fn create_user_forwards_enumerations_as_strings() {
        let harness =
            Harness::users(FakeTransport::new().with_reply("UserService/Create", user_json(3, "user")));

        let (status, Json(user)) = create_user(
            State(harness.state.clone()),
            acting_as(3, UserType::User),
            ValidJson(new_user(AccountType::User)),
        )
        .await
        .expect("user creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user.user_type, "user");

        let request = harness.users.request_for("UserService/Create");
        assert_eq!(request["gender"], "female");
        assert_eq!(request["type"], "user");
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let harness = Harness::users(FakeTransport::new().with_error(
            "UserService/Create",
            RpcError::status(RpcCode::AlreadyExists, "email already registered"),
        ));

        let err = create_user(
            State(harness.state.clone()),
            acting_as(3, UserType::User),
            ValidJson(new_user(AccountType::User)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn privileged_creation_requires_superadmin() {
        let harness = Harness::users(
            FakeTransport::new().with_reply("UserService/Create", user_json(4, "superadmin")),
        );

        for caller in [UserType::User, UserType::Admin] {
            let err = create_user(
                State(harness.state.clone()),
                acting_as(3, caller),
                ValidJson(new_user(AccountType::Superadmin)),
            )
            .await
            .unwrap_err();
            assert_eq!(err.status, StatusCode::FORBIDDEN);
        }
        assert!(harness.users.calls().is_empty());

        let (status, Json(user)) = create_user(
            State(harness.state.clone()),
            acting_as(1, UserType::Superadmin),
            ValidJson(new_user(AccountType::Superadmin)),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user.user_type, "superadmin");
        assert_eq!(harness.users.request_for("UserService/Create")["type"], "superadmin");
    }

    #[tokio::test]
    async fn profile_update_leaves_type_out() {
        let harness =
            Harness::users(FakeTransport::new().with_reply("UserService/Update", user_json(3, "user")));

        let Json(user) = update_user(
            ValidPath(3),
            State(harness.state.clone()),
            acting_as(3, UserType::User),
            ValidJson(update(None)),
        )
        .await
        .unwrap();
        assert_eq!(user.user_type, "user");

        let request = harness.users.request_for("UserService/Update");
        assert_eq!(request["id"], 3);
        assert!(request.get("type").is_none());
    }

    #[tokio::test]
    async fn type_change_requires_superadmin() {
        let harness =
            Harness::users(FakeTransport::new().with_reply("UserService/Update", user_json(3, "superadmin")));

        for caller in [UserType::User, UserType::Admin] {
            let err = update_user(
                ValidPath(3),
                State(harness.state.clone()),
                acting_as(3, caller),
                ValidJson(update(Some(AccountType::Superadmin))),
            )
            .await
            .unwrap_err();
            assert_eq!(err.status, StatusCode::FORBIDDEN);
        }
        assert!(harness.users.calls().is_empty());

        let Json(user) = update_user(
            ValidPath(3),
            State(harness.state.clone()),
            acting_as(1, UserType::Superadmin),
            ValidJson(update(Some(AccountType::Superadmin))),
        )
        .await
        .unwrap();
        assert_eq!(user.user_type, "superadmin");
        assert_eq!(harness.users.request_for("UserService/Update")["type"], "superadmin");
    }

    #[tokio::test]
    async fn list_users_passes_paging() {
        let harness = Harness::users(FakeTransport::new().with_reply(
            "UserService/GetAll",
            json!({"users": [user_json(3, "user")], "count": 1}),
        ));

        let Json(response) = list_users(
            State(harness.state.clone()),
            ValidQuery(ListQuery {
                limit: 5,
                page: 2,
                search: "ada".into(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.count, 1);
        assert_eq!(
            harness.users.request_for("UserService/GetAll"),
            json!({"limit": 5, "page": 2, "search": "ada"})
        );
    }

    #[tokio::test]
    async fn get_and_delete_address_the_path_id() {
        let harness = Harness::users(
            FakeTransport::new()
                .with_reply("UserService/Get", user_json(3, "user"))
                .with_reply("UserService/Delete", json!({})),
        );

        let Json(user) = get_user(ValidPath(3), State(harness.state.clone()))
            .await
            .unwrap();
        assert_eq!(user.id, 3);

        let Json(deleted) = delete_user(
            ValidPath(3),
            State(harness.state.clone()),
            acting_as(1, UserType::Superadmin),
        )
        .await
        .unwrap();
        assert_eq!(deleted.message, "successfully deleted");
        assert_eq!(harness.users.request_for("UserService/Delete"), json!({"id": 3}));
    }
}
