use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::brand::{Brand as DomainBrand, BrandDraft as DomainBrandDraft};
use crate::domain::types::{BrandId, BrandName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::brands)]
/// Diesel model for [`crate::domain::brand::Brand`].
pub struct Brand {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::brands)]
/// Insertable form of [`Brand`].
pub struct NewBrand<'a> {
    pub name: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::brands)]
/// Data used when updating a [`Brand`] record.
pub struct UpdateBrand<'a> {
    pub name: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Brand> for DomainBrand {
    type Error = TypeConstraintError;

    fn try_from(brand: Brand) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BrandId::new(brand.id)?,
            name: BrandName::new(brand.name)?,
            created_at: brand.created_at,
            updated_at: brand.updated_at,
        })
    }
}

impl<'a> From<&'a DomainBrandDraft> for NewBrand<'a> {
    fn from(draft: &'a DomainBrandDraft) -> Self {
        Self {
            name: draft.name.as_str(),
        }
    }
}

impl<'a> UpdateBrand<'a> {
    pub fn new(draft: &'a DomainBrandDraft, updated_at: NaiveDateTime) -> Self {
        Self {
            name: draft.name.as_str(),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn brand_into_domain() {
        let now = Utc::now().naive_utc();
        let db_brand = Brand {
            id: 3,
            name: "Toyota".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let domain = DomainBrand::try_from(db_brand).unwrap();
        assert_eq!(domain.id.get(), 3);
        assert_eq!(domain.name.as_str(), "Toyota");
        assert_eq!(domain.created_at, now);
    }

    #[test]
    fn invalid_row_is_rejected() {
        let now = Utc::now().naive_utc();
        let db_brand = Brand {
            id: 0,
            name: "Toyota".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        assert_eq!(
            DomainBrand::try_from(db_brand),
            Err(TypeConstraintError::NonPositiveId)
        );
    }

    #[test]
    fn from_domain_draft_creates_new_brand() {
        let draft = DomainBrandDraft::new(None, BrandName::new("BMW").unwrap());
        let new: NewBrand = (&draft).into();
        assert_eq!(new.name, "BMW");
    }
}
