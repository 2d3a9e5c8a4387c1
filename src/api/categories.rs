// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    api::extract::{ValidJson, ValidPath, ValidQuery},
    error::ApiError,
    models::{CategoryRequest, ListQuery, ResponseOk},
    rpc::post_service::{
        Category, CreateCategory, GetAllCategoriesRequest, GetAllCategoriesResponse,
        UpdateCategory,
    },
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/v1/categories",
    request_body = CategoryRequest,
    tag = "Categories",
    responses(
        (status = 201, body = Category),
        (status = 400, description = "Invalid title")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state
        .categories
        .create(&CreateCategory {
            title: request.title,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/v1/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    tag = "Categories",
    responses((status = 200, body = Category), (status = 404))
)]
pub async fn get_category(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.categories.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/v1/categories",
    params(ListQuery),
    tag = "Categories",
    responses((status = 200, body = GetAllCategoriesResponse))
)]
pub async fn list_categories(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<ListQuery>,
) -> Result<Json<GetAllCategoriesResponse>, ApiError> {
    let categories = state
        .categories
        .get_all(&GetAllCategoriesRequest {
            limit: query.limit,
            page: query.page,
            search: query.search,
        })
        .await?;
    Ok(Json(categories))
}

#[utoipa::path(
    put,
    path = "/v1/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    request_body = CategoryRequest,
    tag = "Categories",
    responses((status = 200, body = Category), (status = 404))
)]
pub async fn update_category(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
    ValidJson(request): ValidJson<CategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let category = state
        .categories
        .update(&UpdateCategory {
            id,
            title: request.title,
        })
        .await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/v1/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    tag = "Categories",
    responses((status = 200, body = ResponseOk), (status = 404))
)]
pub async fn delete_category(
    ValidPath(id): ValidPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<ResponseOk>, ApiError> {
    state.categories.delete(id).await?;
    Ok(Json(ResponseOk::new("successfully deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::Harness;
    use crate::rpc::{testing::FakeTransport, RpcCode, RpcError};
    use serde_json::json;

    fn category_json(id: i64, title: &str) -> serde_json::Value {
        json!({"id": id, "title": title, "created_at": "2026-10-16T10:00:00Z"})
    }

    #[tokio::test]
    async fn create_category_forwards_title() {
        let harness = Harness::posts(
            FakeTransport::new().with_reply("CategoryService/Create", category_json(1, "Rust")),
        );

        let (status, Json(category)) = create_category(
            State(harness.state.clone()),
            ValidJson(CategoryRequest {
                title: "Rust".into(),
            }),
        )
        .await
        .expect("category creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(category.id, 1);
        assert_eq!(category.title, "Rust");
        assert_eq!(
            harness.posts.request_for("CategoryService/Create"),
            json!({"title": "Rust"})
        );
    }

    #[tokio::test]
    async fn list_categories_passes_paging() {
        let harness = Harness::posts(FakeTransport::new().with_reply(
            "CategoryService/GetAll",
            json!({"categories": [category_json(1, "Rust"), category_json(2, "Go")], "count": 2}),
        ));

        let Json(response) = list_categories(
            State(harness.state.clone()),
            ValidQuery(ListQuery {
                search: "r".into(),
                ..ListQuery::default()
            }),
        )
        .await
        .expect("category listing succeeds");

        assert_eq!(response.count, 2);
        assert_eq!(response.categories.len(), 2);
        assert_eq!(
            harness.posts.request_for("CategoryService/GetAll"),
            json!({"limit": 10, "page": 1, "search": "r"})
        );
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let harness = Harness::posts(FakeTransport::new().with_error(
            "CategoryService/Get",
            RpcError::status(RpcCode::NotFound, "category not found"),
        ));

        let err = get_category(ValidPath(9), State(harness.state.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "category not found");
    }

    #[tokio::test]
    async fn update_and_delete_address_the_path_id() {
        let harness = Harness::posts(
            FakeTransport::new()
                .with_reply("CategoryService/Update", category_json(3, "Systems"))
                .with_reply("CategoryService/Delete", json!({})),
        );

        let Json(category) = update_category(
            ValidPath(3),
            State(harness.state.clone()),
            ValidJson(CategoryRequest {
                title: "Systems".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(category.title, "Systems");
        assert_eq!(
            harness.posts.request_for("CategoryService/Update"),
            json!({"id": 3, "title": "Systems"})
        );

        let Json(ok) = delete_category(ValidPath(3), State(harness.state.clone()))
            .await
            .unwrap();
        assert_eq!(ok.message, "successfully deleted");
        assert_eq!(
            harness.posts.request_for("CategoryService/Delete"),
            json!({"id": 3})
        );
    }
}
