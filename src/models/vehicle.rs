use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{Amount, BrandId, Color, TypeConstraintError, VehicleId, VehicleModel};
use crate::domain::vehicle::{Vehicle as DomainVehicle, VehicleDraft as DomainVehicleDraft};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::vehicles)]
/// Diesel model for [`crate::domain::vehicle::Vehicle`].
pub struct Vehicle {
    pub id: i32,
    pub brand_id: i32,
    pub model: String,
    pub production_year: i32,
    pub color: String,
    pub is_automatic: bool,
    pub sale_price: i64,
    pub stock: i32,
    pub status: String,
    pub img_path: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vehicles)]
/// Insertable form of [`Vehicle`].
pub struct NewVehicle<'a> {
    pub brand_id: i32,
    pub model: &'a str,
    pub production_year: i32,
    pub color: &'a str,
    pub is_automatic: bool,
    pub sale_price: i64,
    pub stock: i32,
    pub status: String,
    pub img_path: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::vehicles)]
/// Data used when updating a [`Vehicle`] record. `None` image paths are skipped.
pub struct UpdateVehicle<'a> {
    pub brand_id: i32,
    pub model: &'a str,
    pub production_year: i32,
    pub color: &'a str,
    pub is_automatic: bool,
    pub sale_price: i64,
    pub stock: i32,
    pub status: String,
    pub img_path: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Vehicle> for DomainVehicle {
    type Error = TypeConstraintError;

    fn try_from(vehicle: Vehicle) -> Result<Self, Self::Error> {
        Ok(Self {
            id: VehicleId::new(vehicle.id)?,
            brand_id: BrandId::new(vehicle.brand_id)?,
            model: VehicleModel::new(vehicle.model)?,
            production_year: vehicle.production_year,
            color: Color::new(vehicle.color)?,
            is_automatic: vehicle.is_automatic,
            sale_price: Amount::new(vehicle.sale_price)?,
            stock: vehicle.stock,
            status: vehicle.status.parse()?,
            img_path: vehicle.img_path,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        })
    }
}

impl<'a> From<&'a DomainVehicleDraft> for NewVehicle<'a> {
    fn from(draft: &'a DomainVehicleDraft) -> Self {
        Self {
            brand_id: draft.brand_id.get(),
            model: draft.model.as_str(),
            production_year: draft.production_year,
            color: draft.color.as_str(),
            is_automatic: draft.is_automatic,
            sale_price: draft.sale_price.get(),
            stock: draft.stock,
            status: draft.status.to_string(),
            img_path: draft.img_path.as_deref(),
        }
    }
}

impl<'a> UpdateVehicle<'a> {
    pub fn new(draft: &'a DomainVehicleDraft, updated_at: NaiveDateTime) -> Self {
        Self {
            brand_id: draft.brand_id.get(),
            model: draft.model.as_str(),
            production_year: draft.production_year,
            color: draft.color.as_str(),
            is_automatic: draft.is_automatic,
            sale_price: draft.sale_price.get(),
            stock: draft.stock,
            status: draft.status.to_string(),
            img_path: draft.img_path.as_deref(),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::VehicleStatus;
    use chrono::Utc;

    #[test]
    fn vehicle_into_domain() {
        let now = Utc::now().naive_utc();
        let db_vehicle = Vehicle {
            id: 1,
            brand_id: 2,
            model: "Civic".to_string(),
            production_year: 2022,
            color: "Red".to_string(),
            is_automatic: true,
            sale_price: 350_000_000,
            stock: 4,
            status: "used".to_string(),
            img_path: Some("a.png".to_string()),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let domain = DomainVehicle::try_from(db_vehicle).unwrap();
        assert_eq!(domain.brand_id.get(), 2);
        assert_eq!(domain.status, VehicleStatus::Used);
        assert_eq!(domain.sale_price.get(), 350_000_000);
        assert_eq!(domain.img_path.as_deref(), Some("a.png"));
    }
}
