use async_trait::async_trait;

use crate::models::{Car, CarDraft, Page};
use crate::repository::RepositoryError;

/// Storage contract for car records.
///
/// The service layer only talks to this trait, so any backend that honors
/// the documented semantics can sit behind it.
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Inserts a new record. The backend assigns the id and both
    /// timestamps.
    async fn save(&self, draft: &CarDraft) -> Result<Car, RepositoryError>;

    /// Every record, in the backend's natural order.
    async fn find_all(&self) -> Result<Vec<Car>, RepositoryError>;

    /// One page of records sorted ascending by id. `page` is zero-based.
    async fn find_page(&self, page: u32, size: u32) -> Result<Page<Car>, RepositoryError>;

    /// First record whose chassis contains the given string, matched
    /// case-insensitively, lowest id first.
    async fn find_by_chassis(&self, chassis: &str) -> Result<Option<Car>, RepositoryError>;

    /// Deletes every record whose chassis contains the given string
    /// (case-insensitive). Returns the number of records removed.
    async fn delete_by_chassis(&self, chassis: &str) -> Result<u64, RepositoryError>;

    /// Overwrites the data fields of the record with the given id and
    /// refreshes `date_updated`. `date_created` is left untouched.
    /// A missing id is not an error; the update simply affects nothing.
    async fn update(&self, id: i64, draft: &CarDraft) -> Result<(), RepositoryError>;
}
