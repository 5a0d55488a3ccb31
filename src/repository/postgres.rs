use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::{Car, CarDraft, Page};
use crate::repository::{CarRepository, RepositoryError};

const CAR_COLUMNS: &str = "id, model, manufacturer, color, engine, chassis, date_created, date_updated";

#[derive(Clone)]
pub struct PgCarRepository {
    pool: PgPool,
}

impl PgCarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn save(&self, draft: &CarDraft) -> Result<Car, RepositoryError> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO cars (model, manufacturer, color, engine, chassis, date_created, date_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            CAR_COLUMNS
        );

        let car = sqlx::query_as::<_, Car>(&query)
            .bind(&draft.model)
            .bind(&draft.manufacturer)
            .bind(&draft.color)
            .bind(&draft.engine)
            .bind(&draft.chassis)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(car)
    }

    async fn find_all(&self) -> Result<Vec<Car>, RepositoryError> {
        let query = format!("SELECT {} FROM cars", CAR_COLUMNS);

        let cars = sqlx::query_as::<_, Car>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(cars)
    }

    async fn find_page(&self, page: u32, size: u32) -> Result<Page<Car>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM cars ORDER BY id ASC LIMIT $1 OFFSET $2",
            CAR_COLUMNS
        );

        let content = sqlx::query_as::<_, Car>(&query)
            .bind(i64::from(size))
            .bind(i64::from(page) * i64::from(size))
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(content, total as u64, page, size))
    }

    async fn find_by_chassis(&self, chassis: &str) -> Result<Option<Car>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM cars WHERE chassis ILIKE '%' || $1 || '%' ORDER BY id ASC LIMIT 1",
            CAR_COLUMNS
        );

        let car = sqlx::query_as::<_, Car>(&query)
            .bind(chassis)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    async fn delete_by_chassis(&self, chassis: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cars WHERE chassis ILIKE '%' || $1 || '%'")
            .bind(chassis)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn update(&self, id: i64, draft: &CarDraft) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE cars SET model = $1, manufacturer = $2, color = $3, engine = $4, chassis = $5, \
             date_updated = $6 WHERE id = $7",
        )
        .bind(&draft.model)
        .bind(&draft.manufacturer)
        .bind(&draft.color)
        .bind(&draft.engine)
        .bind(&draft.chassis)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
