use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::Entity;
use crate::domain::types::{Amount, BrandId, Color, TypeConstraintError, VehicleId, VehicleModel};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub brand_id: BrandId,
    pub model: VehicleModel,
    pub production_year: i32,
    pub color: Color,
    pub is_automatic: bool,
    pub sale_price: Amount,
    pub stock: i32,
    pub status: VehicleStatus,
    /// File name of the uploaded picture, relative to the upload directory.
    pub img_path: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    New,
    Used,
}

impl Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleStatus::New => write!(f, "new"),
            VehicleStatus::Used => write!(f, "used"),
        }
    }
}

impl FromStr for VehicleStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(VehicleStatus::New),
            "used" => Ok(VehicleStatus::Used),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown vehicle status: {other}"
            ))),
        }
    }
}

/// Insert-or-update payload for a [`Vehicle`].
///
/// A `None` image path leaves the stored picture untouched on update.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleDraft {
    pub id: Option<VehicleId>,
    pub brand_id: BrandId,
    pub model: VehicleModel,
    pub production_year: i32,
    pub color: Color,
    pub is_automatic: bool,
    pub sale_price: Amount,
    pub stock: i32,
    pub status: VehicleStatus,
    pub img_path: Option<String>,
}

impl Entity for Vehicle {
    type Id = VehicleId;
    type Draft = VehicleDraft;

    const NAME: &'static str = "vehicle";

    fn id(&self) -> VehicleId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!("NEW".parse::<VehicleStatus>(), Ok(VehicleStatus::New));
        assert_eq!(VehicleStatus::Used.to_string(), "used");
        assert!("broken".parse::<VehicleStatus>().is_err());
    }
}
