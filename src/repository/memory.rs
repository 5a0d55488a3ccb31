use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{Car, CarDraft, Page};
use crate::repository::{CarRepository, RepositoryError};

/// In-process backend with the same observable behavior as the Postgres
/// one. Backs the test suites and storage-free deployments.
#[derive(Debug, Default)]
pub struct InMemoryCarRepository {
    state: Mutex<Store>,
}

#[derive(Debug, Default)]
struct Store {
    cars: Vec<Car>,
    next_id: i64,
}

impl InMemoryCarRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_store<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        let mut store = self.state.lock().expect("car store lock poisoned");
        f(&mut store)
    }
}

fn chassis_contains(car: &Car, needle: &str) -> bool {
    car.chassis
        .as_deref()
        .is_some_and(|c| c.to_lowercase().contains(&needle.to_lowercase()))
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    async fn save(&self, draft: &CarDraft) -> Result<Car, RepositoryError> {
        Ok(self.with_store(|store| {
            store.next_id += 1;
            let now = Utc::now();
            let car = Car {
                id: store.next_id,
                model: draft.model.clone(),
                manufacturer: draft.manufacturer.clone(),
                color: draft.color.clone(),
                engine: draft.engine.clone(),
                chassis: draft.chassis.clone(),
                date_created: now,
                date_updated: now,
            };
            store.cars.push(car.clone());
            car
        }))
    }

    async fn find_all(&self) -> Result<Vec<Car>, RepositoryError> {
        Ok(self.with_store(|store| store.cars.clone()))
    }

    async fn find_page(&self, page: u32, size: u32) -> Result<Page<Car>, RepositoryError> {
        Ok(self.with_store(|store| {
            let mut sorted = store.cars.clone();
            sorted.sort_by_key(|car| car.id);
            let total = sorted.len() as u64;
            let content = sorted
                .into_iter()
                .skip(page as usize * size as usize)
                .take(size as usize)
                .collect();
            Page::new(content, total, page, size)
        }))
    }

    async fn find_by_chassis(&self, chassis: &str) -> Result<Option<Car>, RepositoryError> {
        Ok(self.with_store(|store| {
            store
                .cars
                .iter()
                .filter(|car| chassis_contains(car, chassis))
                .min_by_key(|car| car.id)
                .cloned()
        }))
    }

    async fn delete_by_chassis(&self, chassis: &str) -> Result<u64, RepositoryError> {
        Ok(self.with_store(|store| {
            let before = store.cars.len();
            store.cars.retain(|car| !chassis_contains(car, chassis));
            (before - store.cars.len()) as u64
        }))
    }

    async fn update(&self, id: i64, draft: &CarDraft) -> Result<(), RepositoryError> {
        self.with_store(|store| {
            if let Some(car) = store.cars.iter_mut().find(|car| car.id == id) {
                car.model = draft.model.clone();
                car.manufacturer = draft.manufacturer.clone();
                car.color = draft.color.clone();
                car.engine = draft.engine.clone();
                car.chassis = draft.chassis.clone();
                car.date_updated = Utc::now();
            }
        });
        Ok(())
    }
}
