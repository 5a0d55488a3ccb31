use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{CarDto, Page};
use crate::service::CarService;

pub fn router() -> Router<CarService> {
    Router::new()
        .route("/", post(create_car).get(list_cars))
        .route("/pagination", get(list_cars_paginated))
        .route(
            "/chassis/{chassis}",
            get(get_car_by_chassis)
                .delete(delete_car_by_chassis)
                .patch(update_car_by_chassis),
        )
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_page_size")]
    size: u32,
}

fn default_page_size() -> u32 {
    10
}

async fn create_car(
    State(service): State<CarService>,
    Json(body): Json<Option<CarDto>>,
) -> Result<(StatusCode, Json<CarDto>), AppError> {
    let created = service.create(body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_cars(State(service): State<CarService>) -> Result<Json<Vec<CarDto>>, AppError> {
    Ok(Json(service.list_all().await?))
}

async fn list_cars_paginated(
    State(service): State<CarService>,
    Query(params): Query<PageQuery>,
) -> Result<Json<Page<CarDto>>, AppError> {
    Ok(Json(service.list_paginated(params.page, params.size).await?))
}

async fn get_car_by_chassis(
    State(service): State<CarService>,
    Path(chassis): Path<String>,
) -> Result<Json<CarDto>, AppError> {
    Ok(Json(service.get_by_chassis(&chassis).await?))
}

async fn delete_car_by_chassis(
    State(service): State<CarService>,
    Path(chassis): Path<String>,
) -> Result<StatusCode, AppError> {
    service.delete_by_chassis(&chassis).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_car_by_chassis(
    State(service): State<CarService>,
    Path(chassis): Path<String>,
    Json(body): Json<Option<CarDto>>,
) -> Result<Json<CarDto>, AppError> {
    Ok(Json(service.update_by_chassis(&chassis, body).await?))
}
