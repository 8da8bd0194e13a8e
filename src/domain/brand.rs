use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::Entity;
use crate::domain::types::{BrandId, BrandName};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Brand {
    pub id: BrandId,
    pub name: BrandName,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert-or-update payload for a [`Brand`].
#[derive(Clone, Debug, PartialEq)]
pub struct BrandDraft {
    pub id: Option<BrandId>,
    pub name: BrandName,
}

impl BrandDraft {
    #[must_use]
    pub fn new(id: Option<BrandId>, name: BrandName) -> Self {
        Self { id, name }
    }
}

impl Entity for Brand {
    type Id = BrandId;
    type Draft = BrandDraft;

    const NAME: &'static str = "brand";

    fn id(&self) -> BrandId {
        self.id
    }
}
