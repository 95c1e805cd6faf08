use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::products::ProductError;

use super::{
    models::{ApiResponse, HealthResponse, ProductRequest, RenameRequest},
    AppState,
};

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            backend: state.backend.to_string(),
            uptime_secs,
        }),
    )
}

pub async fn list_products(State(state): State<AppState>) -> Response {
    match state.service.get_all() {
        Ok(products) => ok(StatusCode::OK, products),
        Err(err) => product_error_response(err),
    }
}

pub async fn get_product(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.service.get_one(id) {
        Ok(product) => ok(StatusCode::OK, product),
        Err(err) => product_error_response(err),
    }
}

pub async fn store_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Response {
    let fields = match payload {
        Ok(Json(req)) => match req.validate() {
            Ok(fields) => fields,
            Err(msg) => return error_response(StatusCode::BAD_REQUEST, msg),
        },
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    match state
        .service
        .store(&fields.name, &fields.category, fields.count, fields.price)
    {
        Ok(product) => {
            log::info!("🆕 Product {} created", product.id);
            ok(StatusCode::CREATED, product)
        }
        Err(err) => product_error_response(err),
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let fields = match payload {
        Ok(Json(req)) => match req.validate() {
            Ok(fields) => fields,
            Err(msg) => return error_response(StatusCode::BAD_REQUEST, msg),
        },
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    match state.service.update(
        id,
        &fields.name,
        &fields.category,
        fields.count,
        fields.price,
    ) {
        Ok(product) => ok(StatusCode::OK, product),
        Err(err) => product_error_response(err),
    }
}

pub async fn update_product_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RenameRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let name = match payload {
        Ok(Json(req)) => match req.validate() {
            Ok(name) => name,
            Err(msg) => return error_response(StatusCode::BAD_REQUEST, msg),
        },
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    match state.service.update_name(id, &name) {
        Ok(product) => ok(StatusCode::OK, product),
        Err(err) => product_error_response(err),
    }
}

pub async fn delete_product(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.service.delete(id) {
        Ok(()) => {
            log::info!("🗑️ Product {} deleted", id);
            ok(StatusCode::OK, format!("product {} deleted", id))
        }
        Err(err) => product_error_response(err),
    }
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "endpoint not found")
}

fn parse_id(raw: &str) -> Result<i64, Response> {
    raw.trim().parse::<i64>().map_err(|err| {
        log::warn!("Invalid product id {}: {}", raw, err);
        error_response(StatusCode::BAD_REQUEST, "invalid product id")
    })
}

fn ok<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(ApiResponse::data(status.as_u16(), data))).into_response()
}

pub(super) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::error(status.as_u16(), message))).into_response()
}

fn product_error_response(err: ProductError) -> Response {
    match &err {
        ProductError::NotFound(id) => {
            error_response(StatusCode::NOT_FOUND, format!("product {} not found", id))
        }
        ProductError::InvalidPrice(_) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
        ProductError::ConstraintViolation(msg) => {
            log::warn!("Constraint violation: {}", msg);
            error_response(StatusCode::CONFLICT, "product conflicts with existing data")
        }
        other => {
            log::error!("Product operation failed: {:?}", other);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "an error occurred while processing your request",
            )
        }
    }
}
