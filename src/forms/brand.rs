use serde::Deserialize;
use validator::Validate;

use crate::domain::brand::BrandDraft;
use crate::domain::types::{BrandId, BrandName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Payload of `POST /brands` and `PUT /brands`.
pub struct SaveBrandForm {
    /// Present when updating an existing brand.
    pub id: Option<i32>,
    #[validate(length(min = 1))]
    pub name: String,
}

impl TryFrom<SaveBrandForm> for BrandDraft {
    type Error = FormError;

    fn try_from(form: SaveBrandForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let id = form.id.map(BrandId::new).transpose()?;
        Ok(BrandDraft::new(id, BrandName::new(form.name)?))
    }
}
