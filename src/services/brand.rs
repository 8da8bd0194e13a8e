//! Brand use cases.

use crate::domain::brand::{Brand, BrandDraft};
use crate::forms::brand::SaveBrandForm;
use crate::forms::query::ListQueryForm;
use crate::repository::{BrandReader, EntityReader, EntityWriter};
use crate::services::entity::{
    Page, delete_existing, ensure_exists, find_by_id, list_entities, save_draft,
};
use crate::services::{ServiceError, ServiceResult};

pub fn list_brands<R>(repo: &R, form: ListQueryForm) -> ServiceResult<Page<Brand>>
where
    R: EntityReader<Brand> + ?Sized,
{
    list_entities(repo, form)
}

pub fn get_brand<R>(repo: &R, id: i32) -> ServiceResult<Brand>
where
    R: EntityReader<Brand> + ?Sized,
{
    find_by_id(repo, id)
}

/// Creates a brand, or updates the one named by the form id.
///
/// The name must not be used by another live brand.
pub fn save_brand<R>(repo: &R, form: SaveBrandForm) -> ServiceResult<Brand>
where
    R: EntityReader<Brand> + EntityWriter<Brand> + BrandReader + ?Sized,
{
    let draft = BrandDraft::try_from(form)?;

    let name_taken = repo
        .get_brand_by_name(&draft.name)?
        .is_some_and(|existing| Some(existing.id) != draft.id);
    if name_taken {
        return Err(ServiceError::Conflict(format!(
            "brand with name {} already exists",
            draft.name
        )));
    }

    if let Some(id) = draft.id {
        ensure_exists::<Brand, _>(repo, id)?;
    }

    save_draft::<Brand, _>(repo, &draft)
}

pub fn delete_brand<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: EntityReader<Brand> + EntityWriter<Brand> + ?Sized,
{
    delete_existing::<Brand, _>(repo, id)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{BrandId, BrandName};
    use crate::pagination::Paging;
    use crate::repository::errors::{ConstraintKind, RepositoryError};
    use crate::repository::mock::MockBrandRepository;

    fn brand(id: i32, name: &str) -> Brand {
        let now = Utc::now().naive_utc();
        Brand {
            id: BrandId::new(id).unwrap(),
            name: BrandName::new(name).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn query(page: Option<&str>, limit: Option<&str>, sort: Option<&str>) -> ListQueryForm {
        ListQueryForm {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
            sort: sort.map(str::to_string),
            ..ListQueryForm::default()
        }
    }

    #[test]
    fn list_returns_page_with_metadata() {
        let mut repo = MockBrandRepository::new();
        repo.expect_list()
            .withf(|query| {
                query.pagination.page == 1
                    && query.pagination.per_page == 5
                    && query.order_by == "id"
            })
            .times(1)
            .returning(|_| Ok((11, vec![brand(1, "Honda"), brand(2, "Toyota")])));

        let page = list_brands(&repo, query(None, None, None)).unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.paging,
            Paging {
                page: 1,
                rows_per_page: 5,
                total_rows: 11,
                total_pages: 3,
            }
        );
    }

    #[test]
    fn page_past_the_end_is_empty_with_true_totals() {
        let mut repo = MockBrandRepository::new();
        repo.expect_list().times(1).returning(|_| Ok((11, vec![])));

        let page = list_brands(&repo, query(Some("9"), None, None)).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.paging.page, 9);
        assert_eq!(page.paging.total_pages, 3);
    }

    #[test]
    fn invalid_page_or_limit_skips_storage() {
        let mut repo = MockBrandRepository::new();
        repo.expect_list().never();

        for raw in ["0", "-1"] {
            assert!(matches!(
                list_brands(&repo, query(Some(raw), None, None)),
                Err(ServiceError::InvalidParameter(_))
            ));
            assert!(matches!(
                list_brands(&repo, query(None, Some(raw), None)),
                Err(ServiceError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn invalid_sort_skips_storage() {
        let mut repo = MockBrandRepository::new();
        repo.expect_list().never();

        let err = list_brands(&repo, query(None, None, Some("ABC"))).unwrap_err();

        assert!(matches!(err, ServiceError::InvalidSort(_)));
        assert!(err.to_string().contains("ABC"));
    }

    #[test]
    fn lowercase_sort_is_accepted() {
        let mut repo = MockBrandRepository::new();
        repo.expect_list().times(1).returning(|_| Ok((0, vec![])));

        assert!(list_brands(&repo, query(None, None, Some("desc"))).is_ok());
    }

    #[test]
    fn missing_brand_is_not_found() {
        let mut repo = MockBrandRepository::new();
        repo.expect_get().returning(|_| Ok(None));

        let err = get_brand(&repo, 5).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref message) if message == "brand with ID 5 not found"));
    }

    #[test]
    fn duplicate_name_is_a_conflict() {
        let mut repo = MockBrandRepository::new();
        repo.expect_get_brand_by_name()
            .returning(|_| Ok(Some(brand(1, "Honda"))));
        repo.expect_save().never();

        let form = SaveBrandForm {
            id: None,
            name: "Honda".to_string(),
        };

        assert!(matches!(
            save_brand(&repo, form),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn renaming_to_own_name_is_allowed() {
        let mut repo = MockBrandRepository::new();
        repo.expect_get_brand_by_name()
            .returning(|_| Ok(Some(brand(1, "Honda"))));
        repo.expect_get().returning(|_| Ok(Some(brand(1, "Honda"))));
        repo.expect_save()
            .times(1)
            .returning(|draft| Ok(brand(1, draft.name.as_str())));

        let form = SaveBrandForm {
            id: Some(1),
            name: "Honda".to_string(),
        };

        assert_eq!(save_brand(&repo, form).unwrap().name.as_str(), "Honda");
    }

    #[test]
    fn unique_index_race_is_reported_without_driver_text() {
        let mut repo = MockBrandRepository::new();
        repo.expect_get_brand_by_name().returning(|_| Ok(None));
        repo.expect_save().times(1).returning(|_| {
            Err(RepositoryError::ConstraintViolation {
                kind: ConstraintKind::Unique,
                detail: "UNIQUE constraint failed: brands.name".to_string(),
            })
        });

        let form = SaveBrandForm {
            id: None,
            name: "Honda".to_string(),
        };

        let err = save_brand(&repo, form).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(err.to_string(), "brand conflicts with an existing record");
    }

    #[test]
    fn updating_missing_brand_is_not_found() {
        let mut repo = MockBrandRepository::new();
        repo.expect_get_brand_by_name().returning(|_| Ok(None));
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_save().never();

        let form = SaveBrandForm {
            id: Some(9),
            name: "Mazda".to_string(),
        };

        assert!(matches!(
            save_brand(&repo, form),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn delete_checks_existence_first() {
        let mut repo = MockBrandRepository::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_delete().never();

        assert!(matches!(
            delete_brand(&repo, 3),
            Err(ServiceError::NotFound(_))
        ));

        let mut repo = MockBrandRepository::new();
        repo.expect_get().returning(|id| Ok(Some(brand(id.get(), "Kia"))));
        repo.expect_delete().times(1).returning(|_| Ok(()));

        assert!(delete_brand(&repo, 3).is_ok());
    }
}
