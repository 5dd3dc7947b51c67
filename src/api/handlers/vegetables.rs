//! Vegetable CRUD handlers mounted under `/api/hdataset`.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::VEGETABLE_TAG;
use crate::api::dto::{
    CreateVegetableRequest, ErrorResponse, UpdateVegetableRequest, VegetableResponse,
};
use crate::error::AppResult;
use crate::state::AppState;

/// Mount point of these routes; used to build `Location` headers.
pub const BASE_PATH: &str = "/api/hdataset";

pub fn vegetable_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_vegetables, create_vegetable))
        .routes(routes!(get_vegetable, update_vegetable, delete_vegetable))
}

/// GET /api/hdataset - List all vegetables
#[utoipa::path(
    get,
    path = "/",
    tag = VEGETABLE_TAG,
    responses(
        (status = 200, description = "All vegetables ordered by id", body = Vec<VegetableResponse>)
    )
)]
async fn list_vegetables(State(state): State<AppState>) -> AppResult<Json<Vec<VegetableResponse>>> {
    let vegetables = state.services.vegetables.list_vegetables().await?;
    Ok(Json(
        vegetables.into_iter().map(VegetableResponse::from).collect(),
    ))
}

/// GET /api/hdataset/{id} - Get a vegetable by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = VEGETABLE_TAG,
    params(
        ("id" = i32, Path, description = "Vegetable id")
    ),
    responses(
        (status = 200, description = "Vegetable found", body = VegetableResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Vegetable not found", body = ErrorResponse)
    )
)]
async fn get_vegetable(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<VegetableResponse>> {
    let Path(id) = id?;
    let vegetable = state.services.vegetables.get_vegetable(id).await?;
    Ok(Json(VegetableResponse::from(vegetable)))
}

/// POST /api/hdataset - Create a vegetable
///
/// The id is assigned by storage; any id in the body is ignored.
#[utoipa::path(
    post,
    path = "/",
    tag = VEGETABLE_TAG,
    request_body = CreateVegetableRequest,
    responses(
        (status = 201, description = "Vegetable created", body = VegetableResponse,
            headers(("Location" = String, description = "URL of the created vegetable"))),
        (status = 400, description = "Malformed body", body = ErrorResponse)
    )
)]
async fn create_vegetable(
    State(state): State<AppState>,
    payload: Result<Json<CreateVegetableRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(payload) = payload?;
    let vegetable = state
        .services
        .vegetables
        .create_vegetable(payload.into_new_vegetable())
        .await?;

    let location = format!("{}/{}", BASE_PATH, vegetable.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(VegetableResponse::from(vegetable)),
    )
        .into_response())
}

/// PUT /api/hdataset/{id} - Replace a vegetable
///
/// The body id must equal the path id.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = VEGETABLE_TAG,
    params(
        ("id" = i32, Path, description = "Vegetable id")
    ),
    request_body = UpdateVegetableRequest,
    responses(
        (status = 204, description = "Vegetable replaced"),
        (status = 400, description = "Id mismatch or malformed body", body = ErrorResponse),
        (status = 404, description = "Vegetable not found", body = ErrorResponse)
    )
)]
async fn update_vegetable(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateVegetableRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    state
        .services
        .vegetables
        .update_vegetable(id, payload.into_vegetable())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/hdataset/{id} - Delete a vegetable
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = VEGETABLE_TAG,
    params(
        ("id" = i32, Path, description = "Vegetable id")
    ),
    responses(
        (status = 204, description = "Vegetable deleted"),
        (status = 404, description = "Vegetable not found", body = ErrorResponse)
    )
)]
async fn delete_vegetable(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    state.services.vegetables.delete_vegetable(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
