use std::sync::Arc;

use anyhow::Context;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{CarDraft, CarDto, Page};
use crate::repository::CarRepository;

/// Request-facing operations over the car store.
///
/// Holds no mutable state of its own; one instance is shared across all
/// in-flight requests.
#[derive(Clone)]
pub struct CarService {
    repo: Arc<dyn CarRepository>,
}

impl CarService {
    pub fn new(repo: Arc<dyn CarRepository>) -> Self {
        Self { repo }
    }

    /// Persists a new car record and echoes the caller's payload back.
    /// The generated id is only visible through the read operations.
    pub async fn create(&self, input: Option<CarDto>) -> Result<CarDto, AppError> {
        let input = verify_input(input)?;

        tracing::info!("{} Starting car record save flow", API_NAME);
        let draft = CarDraft::from(&input);
        let saved = self
            .repo
            .save(&draft)
            .await
            .context("Error creating new car")?;
        tracing::info!("{} Saved car record with id {}", API_NAME, saved.id);

        Ok(input)
    }

    pub async fn list_all(&self) -> Result<Vec<CarDto>, AppError> {
        tracing::info!("{} Listing all car records", API_NAME);
        let cars = self.repo.find_all().await.context("Error listing cars")?;
        tracing::info!("{} Total cars found: {}", API_NAME, cars.len());

        Ok(cars.into_iter().map(CarDto::from).collect())
    }

    /// Pagination inputs are taken as given; a page past the end of the
    /// data yields an empty content list with the true total.
    pub async fn list_paginated(&self, page: u32, size: u32) -> Result<Page<CarDto>, AppError> {
        tracing::info!(
            "{} Listing car records with pagination: page {}, size {}",
            API_NAME,
            page,
            size
        );
        let car_page = self
            .repo
            .find_page(page, size)
            .await
            .context("Error listing cars with pagination")?;
        tracing::info!(
            "{} Total cars pagination found: {}",
            API_NAME,
            car_page.total_elements
        );

        Ok(car_page.map(CarDto::from))
    }

    pub async fn get_by_chassis(&self, chassis: &str) -> Result<CarDto, AppError> {
        verify_chassis(chassis)?;

        tracing::info!("{} Searching car by chassis: {}", API_NAME, chassis);
        let car = self
            .repo
            .find_by_chassis(chassis)
            .await
            .context("Error searching car by chassis")?
            .ok_or_else(|| AppError::NotFound(format!("Car not found for chassis: {}", chassis)))?;
        tracing::info!("{} Car found with id {}", API_NAME, car.id);

        Ok(CarDto::from(car))
    }

    /// Removes every record whose chassis contains the given string.
    /// Zero matches is still a successful delete.
    pub async fn delete_by_chassis(&self, chassis: &str) -> Result<(), AppError> {
        verify_chassis(chassis)?;

        tracing::info!("{} Deleting car records by chassis: {}", API_NAME, chassis);
        let removed = self
            .repo
            .delete_by_chassis(chassis)
            .await
            .context("Error deleting car by chassis")?;
        tracing::info!(
            "{} Deleted {} car record(s) for chassis: {}",
            API_NAME,
            removed,
            chassis
        );

        Ok(())
    }

    /// Overwrites the record matched by `chassis` with the caller's
    /// payload, keeping the record's original id.
    pub async fn update_by_chassis(
        &self,
        chassis: &str,
        input: Option<CarDto>,
    ) -> Result<CarDto, AppError> {
        verify_chassis(chassis)?;
        let input = verify_input(input)?;

        tracing::info!("{} Updating car record by chassis: {}", API_NAME, chassis);
        let existing = self
            .repo
            .find_by_chassis(chassis)
            .await
            .context("Error searching car by chassis")?
            .ok_or_else(|| AppError::NotFound(format!("Car not found for chassis: {}", chassis)))?;

        let draft = CarDraft::from(&input);
        self.repo
            .update(existing.id, &draft)
            .await
            .context("Error updating car by chassis")?;
        tracing::info!(
            "{} Car updated successfully for chassis: {}",
            API_NAME,
            chassis
        );

        Ok(CarDto {
            id: Some(existing.id),
            model: draft.model,
            manufacturer: draft.manufacturer,
            color: draft.color,
            engine: draft.engine,
            chassis: draft.chassis,
        })
    }
}

fn verify_input(input: Option<CarDto>) -> Result<CarDto, AppError> {
    input.ok_or_else(|| AppError::Validation("Car payload cannot be null".to_string()))
}

fn verify_chassis(chassis: &str) -> Result<(), AppError> {
    if chassis.trim().is_empty() {
        return Err(AppError::Validation(
            "Chassis cannot be null or blank".to_string(),
        ));
    }
    Ok(())
}
