use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Persisted car record. The id and both timestamps are assigned by the
/// storage backend; `date_created` never changes after the insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: i64,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub color: Option<String>,
    pub engine: Option<String>,
    pub chassis: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// Wire representation exchanged with clients, used both as input and as
/// output. Every field is optional; timestamps never leave the
/// persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarDto {
    pub id: Option<i64>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub color: Option<String>,
    pub engine: Option<String>,
    pub chassis: Option<String>,
}

/// Field set handed to the storage backend for inserts and updates.
/// Carries no identifier: the backend assigns one on insert, and updates
/// address an existing record by its id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarDraft {
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub color: Option<String>,
    pub engine: Option<String>,
    pub chassis: Option<String>,
}

impl From<Car> for CarDto {
    fn from(car: Car) -> Self {
        Self {
            id: Some(car.id),
            model: car.model,
            manufacturer: car.manufacturer,
            color: car.color,
            engine: car.engine,
            chassis: car.chassis,
        }
    }
}

impl From<&CarDto> for CarDraft {
    /// A client-supplied id is discarded here.
    fn from(dto: &CarDto) -> Self {
        Self {
            model: dto.model.clone(),
            manufacturer: dto.manufacturer.clone(),
            color: dto.color.clone(),
            engine: dto.engine.clone(),
            chassis: dto.chassis.clone(),
        }
    }
}
