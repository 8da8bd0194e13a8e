use std::path::PathBuf;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Amount, BrandId, Color, VehicleId, VehicleModel};
use crate::domain::vehicle::{VehicleDraft, VehicleStatus};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// JSON payload describing a vehicle.
pub struct SaveVehicleForm {
    pub id: Option<i32>,
    pub brand_id: i32,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 1886))]
    pub production_year: i32,
    #[validate(length(min = 1))]
    pub color: String,
    #[serde(default)]
    pub is_automatic: bool,
    #[validate(range(min = 0))]
    pub sale_price: i64,
    #[validate(range(min = 0))]
    pub stock: i32,
    pub status: String,
}

impl TryFrom<SaveVehicleForm> for VehicleDraft {
    type Error = FormError;

    fn try_from(form: SaveVehicleForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(VehicleDraft {
            id: form.id.map(VehicleId::new).transpose()?,
            brand_id: BrandId::new(form.brand_id)?,
            model: VehicleModel::new(form.model)?,
            production_year: form.production_year,
            color: Color::new(form.color)?,
            is_automatic: form.is_automatic,
            sale_price: Amount::new(form.sale_price)?,
            stock: form.stock,
            status: form.status.parse::<VehicleStatus>()?,
            img_path: None,
        })
    }
}

#[derive(MultipartForm)]
/// Multipart payload of `POST /vehicles`: the vehicle as JSON plus its picture.
pub struct UploadVehicleForm {
    pub vehicle: Text<String>,
    #[multipart(limit = "10MB")]
    pub image: TempFile,
}

/// Vehicle draft paired with the uploaded picture waiting to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleUpload {
    pub draft: VehicleDraft,
    /// Temporary location of the uploaded file.
    pub source: PathBuf,
    pub extension: String,
}

impl TryFrom<&UploadVehicleForm> for VehicleUpload {
    type Error = FormError;

    fn try_from(form: &UploadVehicleForm) -> Result<Self, Self::Error> {
        let vehicle: SaveVehicleForm = serde_json::from_str(form.vehicle.as_str())
            .map_err(|e| FormError::InvalidJson(e.to_string()))?;
        let file_name = form.image.file_name.as_deref().unwrap_or_default();

        Ok(VehicleUpload {
            draft: VehicleDraft::try_from(vehicle)?,
            source: form.image.file.path().to_path_buf(),
            extension: image_extension(file_name)?,
        })
    }
}

/// Returns the extension of an uploaded file name, which must have exactly one.
pub fn image_extension(file_name: &str) -> Result<String, FormError> {
    match file_name.split('.').collect::<Vec<_>>().as_slice() {
        [stem, extension] if !stem.is_empty() && !extension.is_empty() => {
            Ok(extension.to_lowercase())
        }
        _ => Err(FormError::InvalidFileName(file_name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civic() -> SaveVehicleForm {
        SaveVehicleForm {
            id: None,
            brand_id: 1,
            model: "Civic".to_string(),
            production_year: 2021,
            color: "Black".to_string(),
            is_automatic: true,
            sale_price: 420_000_000,
            stock: 3,
            status: "New".to_string(),
        }
    }

    #[test]
    fn form_converts_into_draft() {
        let draft = VehicleDraft::try_from(civic()).unwrap();
        assert_eq!(draft.status, VehicleStatus::New);
        assert_eq!(draft.model.as_str(), "Civic");
        assert!(draft.img_path.is_none());
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut form = civic();
        form.stock = -1;
        assert!(matches!(
            VehicleDraft::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut form = civic();
        form.status = "broken".to_string();
        assert!(matches!(
            VehicleDraft::try_from(form),
            Err(FormError::Constraint(_))
        ));
    }

    #[test]
    fn file_name_needs_exactly_one_extension() {
        assert_eq!(image_extension("car.PNG").unwrap(), "png");
        assert!(image_extension("car").is_err());
        assert!(image_extension("car.tar.gz").is_err());
        assert!(image_extension(".png").is_err());
        assert!(image_extension("").is_err());
    }
}
