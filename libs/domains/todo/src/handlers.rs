use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        DefaultBodyLimit, Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, EXPECTED_VERSION_HEADER, IdPath, JsonBody, MAX_BODY_BYTES, decode_json,
    errors::responses::{
        BadRequestResponse, EditConflictResponse, InternalServerErrorResponse, NotFoundResponse,
        UnprocessableEntityResponse,
    },
    reject_body,
    validation::Validator,
};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::filters::{ListItemsParams, Metadata, read_item_list_params, validate_filters};
use crate::models::{
    CreateItem, Item, ItemEnvelope, ItemListEnvelope, ItemStatus, MessageEnvelope, UpdateItem,
};
use crate::repository::ItemRepository;
use crate::service::ItemService;

pub const TAG: &str = "todo";

/// OpenAPI documentation for the Todo API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, update_item, delete_item),
    components(
        schemas(
            Item,
            ItemStatus,
            CreateItem,
            UpdateItem,
            Metadata,
            ItemEnvelope,
            ItemListEnvelope,
            MessageEnvelope
        ),
        responses(
            BadRequestResponse,
            UnprocessableEntityResponse,
            NotFoundResponse,
            EditConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Todo item endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<R> = State<Arc<ItemService<R>>>;

/// Create the todo router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/v1/todo", get(list_items).post(create_item))
        .route(
            "/v1/todo/{id}",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(shared_service)
}

/// List items with filtering, sorting and pagination
#[utoipa::path(
    get,
    path = "/v1/todo",
    tag = TAG,
    params(ListItemsParams),
    responses(
        (status = 200, description = "One page of items", body = ItemListEnvelope),
        (status = 400, response = BadRequestResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): SharedService<R>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<ItemListEnvelope>, AppError> {
    let Query(qs) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut v = Validator::new();
    let (query, filters) = read_item_list_params(&qs, &mut v);
    validate_filters(&mut v, &filters);
    if !v.valid() {
        return Err(v.into());
    }

    let (items, metadata) = service.list_items(query, filters).await?;
    Ok(Json(ItemListEnvelope { items, metadata }))
}

/// Create an item
#[utoipa::path(
    post,
    path = "/v1/todo",
    tag = TAG,
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = ItemEnvelope,
            headers(("Location" = String, description = "URL of the new item"))),
        (status = 400, response = BadRequestResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): SharedService<R>,
    JsonBody(input): JsonBody<CreateItem>,
) -> Result<impl IntoResponse, AppError> {
    let item = service.create_item(input).await?;

    let location = HeaderValue::from_str(&format!("/v1/todo/{}", item.id))
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ItemEnvelope { items: item }),
    ))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/v1/todo/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemEnvelope),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): SharedService<R>,
    IdPath(id): IdPath,
) -> Result<Json<ItemEnvelope>, AppError> {
    let item = service.get_item(id).await?;
    Ok(Json(ItemEnvelope { items: item }))
}

/// Partially update an item
///
/// Only supplied fields change. A `version` in the body or an
/// `X-Expected-Version` header must match the stored version.
#[utoipa::path(
    patch,
    path = "/v1/todo/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Expected-Version" = Option<i32>, Header, description = "Version the client last read")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = ItemEnvelope),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = EditConflictResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): SharedService<R>,
    IdPath(id): IdPath,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ItemEnvelope>, AppError> {
    let current = service.get_item(id).await?;

    let body = body.map_err(reject_body)?;
    let patch: UpdateItem = decode_json(&body)?;
    let expected_version = expected_version(&headers)?;

    let item = service
        .update_item(current, patch, expected_version)
        .await?;
    Ok(Json(ItemEnvelope { items: item }))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/v1/todo/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = MessageEnvelope),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): SharedService<R>,
    IdPath(id): IdPath,
) -> Result<Json<MessageEnvelope>, AppError> {
    service.delete_item(id).await?;
    Ok(Json(MessageEnvelope {
        message: "item successfully deleted".to_string(),
    }))
}

fn expected_version(headers: &HeaderMap) -> Result<Option<i32>, AppError> {
    let Some(value) = headers.get(EXPECTED_VERSION_HEADER) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<i32>().ok())
        .map(Some)
        .ok_or_else(|| {
            AppError::BadRequest(format!("{EXPECTED_VERSION_HEADER} header must be an integer"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_version_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(expected_version(&headers).unwrap(), None);

        headers.insert(EXPECTED_VERSION_HEADER, HeaderValue::from_static("3"));
        assert_eq!(expected_version(&headers).unwrap(), Some(3));

        headers.insert(EXPECTED_VERSION_HEADER, HeaderValue::from_static("three"));
        assert!(matches!(
            expected_version(&headers),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_openapi_documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/v1/todo"));
        assert!(paths.contains_key("/v1/todo/{id}"));
        assert!(doc.components.is_some());
    }
}
