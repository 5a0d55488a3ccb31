#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tracing_test::traced_test;

    use crate::error::AppError;
    use crate::models::{Car, CarDraft, CarDto, Page};
    use crate::repository::{CarRepository, InMemoryCarRepository, RepositoryError};
    use crate::service::CarService;

    /// Backend that fails every call, standing in for a broken database.
    struct FailingCarRepository;

    fn backend_failure() -> RepositoryError {
        RepositoryError::Backend("database connection refused".to_string())
    }

    #[async_trait]
    impl CarRepository for FailingCarRepository {
        async fn save(&self, _draft: &CarDraft) -> Result<Car, RepositoryError> {
            Err(backend_failure())
        }

        async fn find_all(&self) -> Result<Vec<Car>, RepositoryError> {
            Err(backend_failure())
        }

        async fn find_page(&self, _page: u32, _size: u32) -> Result<Page<Car>, RepositoryError> {
            Err(backend_failure())
        }

        async fn find_by_chassis(&self, _chassis: &str) -> Result<Option<Car>, RepositoryError> {
            Err(backend_failure())
        }

        async fn delete_by_chassis(&self, _chassis: &str) -> Result<u64, RepositoryError> {
            Err(backend_failure())
        }

        async fn update(&self, _id: i64, _draft: &CarDraft) -> Result<(), RepositoryError> {
            Err(backend_failure())
        }
    }

    fn service_with_memory_repo() -> (CarService, Arc<InMemoryCarRepository>) {
        let repo = Arc::new(InMemoryCarRepository::new());
        (CarService::new(repo.clone()), repo)
    }

    fn failing_service() -> CarService {
        CarService::new(Arc::new(FailingCarRepository))
    }

    fn sample_dto(chassis: &str) -> CarDto {
        CarDto {
            id: None,
            model: Some("TOYOTA".to_string()),
            manufacturer: Some("Corolla".to_string()),
            color: Some("Silver".to_string()),
            engine: Some("1.8L".to_string()),
            chassis: Some(chassis.to_string()),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn create_should_save_car_and_echo_input() {
        let (service, repo) = service_with_memory_repo();
        let input = sample_dto("ABC123");

        let result = service.create(Some(input.clone())).await.unwrap();

        assert_eq!(result, input);
        assert!(logs_contain("Saved car record with id"));

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].model.as_deref(), Some("TOYOTA"));
        assert_eq!(stored[0].chassis.as_deref(), Some("ABC123"));
    }

    #[tokio::test]
    async fn create_should_discard_client_supplied_id() {
        let (service, repo) = service_with_memory_repo();
        let mut input = sample_dto("ABC123");
        input.id = Some(999);

        // The echo keeps the caller's id, the stored record does not.
        let result = service.create(Some(input)).await.unwrap();
        assert_eq!(result.id, Some(999));

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored[0].id, 1);
    }

    #[tokio::test]
    async fn create_should_fail_when_input_is_absent() {
        let (service, _) = service_with_memory_repo();

        let err = service.create(None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_should_wrap_repository_failure() {
        let err = failing_service()
            .create(Some(sample_dto("ABC123")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn get_by_chassis_should_return_car_when_substring_matches() {
        let (service, _) = service_with_memory_repo();
        service.create(Some(sample_dto("xABC123"))).await.unwrap();

        let result = service.get_by_chassis("abc").await.unwrap();

        assert_eq!(result.chassis.as_deref(), Some("xABC123"));
        assert_eq!(result.id, Some(1));
    }

    #[tokio::test]
    async fn get_by_chassis_should_fail_with_not_found_when_no_match() {
        let (service, _) = service_with_memory_repo();
        service.create(Some(sample_dto("ABC123"))).await.unwrap();

        let err = service.get_by_chassis("XYZ789").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_by_chassis_should_fail_when_chassis_is_blank() {
        let (service, _) = service_with_memory_repo();

        for chassis in ["", "   "] {
            let err = service.get_by_chassis(chassis).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn get_by_chassis_should_wrap_repository_failure() {
        let err = failing_service().get_by_chassis("ABC123").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn delete_by_chassis_should_remove_all_matching_records() {
        let (service, repo) = service_with_memory_repo();
        service.create(Some(sample_dto("ABC123"))).await.unwrap();
        service.create(Some(sample_dto("zzabc123zz"))).await.unwrap();
        service.create(Some(sample_dto("OTHER"))).await.unwrap();

        service.delete_by_chassis("abc123").await.unwrap();

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].chassis.as_deref(), Some("OTHER"));
    }

    #[tokio::test]
    async fn delete_by_chassis_should_succeed_when_nothing_matches() {
        let (service, _) = service_with_memory_repo();

        service.delete_by_chassis("XYZ789").await.unwrap();
    }

    #[tokio::test]
    async fn delete_by_chassis_should_fail_when_chassis_is_blank() {
        let (service, _) = service_with_memory_repo();

        let err = service.delete_by_chassis(" ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_by_chassis_should_wrap_repository_failure() {
        let err = failing_service().delete_by_chassis("ABC123").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn update_by_chassis_should_preserve_existing_record_id() {
        let (service, repo) = service_with_memory_repo();
        service.create(Some(sample_dto("ABC123"))).await.unwrap();

        let mut replacement = sample_dto("ABC123");
        replacement.id = Some(42);
        replacement.model = Some("HONDA".to_string());

        let result = service
            .update_by_chassis("ABC123", Some(replacement))
            .await
            .unwrap();

        assert_eq!(result.id, Some(1));
        assert_eq!(result.model.as_deref(), Some("HONDA"));

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored[0].id, 1);
        assert_eq!(stored[0].model.as_deref(), Some("HONDA"));
    }

    #[tokio::test]
    async fn update_by_chassis_should_keep_date_created() {
        let (service, repo) = service_with_memory_repo();
        service.create(Some(sample_dto("ABC123"))).await.unwrap();
        let created = repo.find_all().await.unwrap()[0].date_created;

        service
            .update_by_chassis("ABC123", Some(sample_dto("ABC123")))
            .await
            .unwrap();

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored[0].date_created, created);
        assert!(stored[0].date_updated >= created);
    }

    #[tokio::test]
    async fn update_by_chassis_should_fail_with_not_found_when_no_match() {
        let (service, _) = service_with_memory_repo();

        let err = service
            .update_by_chassis("XYZ789", Some(sample_dto("XYZ789")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_by_chassis_should_fail_on_blank_chassis_or_absent_input() {
        let (service, _) = service_with_memory_repo();

        let err = service
            .update_by_chassis("", Some(sample_dto("ABC123")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service.update_by_chassis("ABC123", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_by_chassis_should_wrap_repository_failure() {
        let err = failing_service()
            .update_by_chassis("ABC123", Some(sample_dto("ABC123")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn list_all_should_return_empty_sequence_for_empty_store() {
        let (service, _) = service_with_memory_repo();

        let result = service.list_all().await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn list_all_should_convert_every_record() {
        let (service, _) = service_with_memory_repo();
        service.create(Some(sample_dto("ABC123"))).await.unwrap();
        service.create(Some(sample_dto("DEF456"))).await.unwrap();

        let result = service.list_all().await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, Some(1));
        assert_eq!(result[1].id, Some(2));
    }

    #[tokio::test]
    async fn list_paginated_should_report_single_record() {
        let (service, _) = service_with_memory_repo();
        service.create(Some(sample_dto("ABC123"))).await.unwrap();

        let page = service.list_paginated(0, 10).await.unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.page, 0);
        assert_eq!(page.size, 10);
    }

    #[tokio::test]
    async fn list_paginated_should_split_pages_in_id_order() {
        let (service, _) = service_with_memory_repo();
        for chassis in ["A1", "B2", "C3"] {
            service.create(Some(sample_dto(chassis))).await.unwrap();
        }

        let first = service.list_paginated(0, 2).await.unwrap();
        assert_eq!(first.content.len(), 2);
        assert_eq!(first.total_elements, 3);
        assert_eq!(first.content[0].id, Some(1));
        assert_eq!(first.content[1].id, Some(2));

        let second = service.list_paginated(1, 2).await.unwrap();
        assert_eq!(second.content.len(), 1);
        assert_eq!(second.total_elements, 3);
        assert_eq!(second.content[0].id, Some(3));

        let past_the_end = service.list_paginated(5, 2).await.unwrap();
        assert!(past_the_end.content.is_empty());
        assert_eq!(past_the_end.total_elements, 3);
    }

    #[tokio::test]
    async fn list_paginated_should_wrap_repository_failure() {
        let err = failing_service().list_paginated(0, 10).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
