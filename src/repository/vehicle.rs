use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::types::VehicleId;
use crate::domain::vehicle::{Vehicle, VehicleDraft, VehicleStatus};
use crate::models::vehicle::{
    NewVehicle as DbNewVehicle, UpdateVehicle as DbUpdateVehicle, Vehicle as DbVehicle,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, EntityReader, EntityWriter, ListQuery, parse_bool_filter, parse_filter,
    unknown_filter,
};
use crate::schema::vehicles;

type BoxedVehicleQuery = vehicles::BoxedQuery<'static, Sqlite>;

fn live_vehicles() -> BoxedVehicleQuery {
    vehicles::table
        .filter(vehicles::deleted_at.is_null())
        .into_boxed::<Sqlite>()
}

fn filtered_vehicles(query: &ListQuery) -> RepositoryResult<BoxedVehicleQuery> {
    let mut items = live_vehicles();
    for (field, value) in &query.filter {
        items = match field.as_str() {
            "id" => items.filter(vehicles::id.eq(parse_filter::<i32>(field, value)?)),
            "brand_id" => items.filter(vehicles::brand_id.eq(parse_filter::<i32>(field, value)?)),
            "model" => items.filter(vehicles::model.eq(value.clone())),
            "production_year" => {
                items.filter(vehicles::production_year.eq(parse_filter::<i32>(field, value)?))
            }
            "color" => items.filter(vehicles::color.eq(value.clone())),
            "is_automatic" => {
                items.filter(vehicles::is_automatic.eq(parse_bool_filter(field, value)?))
            }
            "status" => {
                let status = value
                    .parse::<VehicleStatus>()
                    .map_err(RepositoryError::from)?;
                items.filter(vehicles::status.eq(status.to_string()))
            }
            other => return Err(unknown_filter(other)),
        };
    }
    Ok(items)
}

fn into_domain(vehicle: DbVehicle) -> RepositoryResult<Vehicle> {
    Vehicle::try_from(vehicle).map_err(RepositoryError::from)
}

/// Loads the live vehicles among `ids`, keyed by id.
pub(crate) fn live_vehicles_by_id(
    conn: &mut SqliteConnection,
    ids: Vec<i32>,
) -> RepositoryResult<HashMap<VehicleId, Vehicle>> {
    live_vehicles()
        .filter(vehicles::id.eq_any(ids))
        .load::<DbVehicle>(conn)?
        .into_iter()
        .map(|row| into_domain(row).map(|vehicle| (vehicle.id, vehicle)))
        .collect()
}

impl EntityReader<Vehicle> for DieselRepository {
    fn get(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        let mut conn = self.conn()?;
        live_vehicles()
            .filter(vehicles::id.eq(id.get()))
            .first::<DbVehicle>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Vehicle>)> {
        let mut conn = self.conn()?;

        let total = filtered_vehicles(query)?
            .count()
            .get_result::<i64>(&mut conn)?;

        let items = order_by!(filtered_vehicles(query)?, vehicles::id, query.order_by.as_str(), query.sort, {
            "id" => vehicles::id,
            "brand_id" => vehicles::brand_id,
            "model" => vehicles::model,
            "production_year" => vehicles::production_year,
            "color" => vehicles::color,
            "is_automatic" => vehicles::is_automatic,
            "sale_price" => vehicles::sale_price,
            "stock" => vehicles::stock,
            "status" => vehicles::status,
            "created_at" => vehicles::created_at,
            "updated_at" => vehicles::updated_at,
        })?;

        let vehicles = items
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .load::<DbVehicle>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((usize::try_from(total).unwrap_or_default(), vehicles))
    }
}

impl EntityWriter<Vehicle> for DieselRepository {
    fn save(&self, draft: &VehicleDraft) -> RepositoryResult<Vehicle> {
        let mut conn = self.conn()?;

        let db_vehicle = match draft.id {
            None => diesel::insert_into(vehicles::table)
                .values(DbNewVehicle::from(draft))
                .get_result::<DbVehicle>(&mut conn)?,
            Some(id) => diesel::update(
                vehicles::table
                    .filter(vehicles::id.eq(id.get()))
                    .filter(vehicles::deleted_at.is_null()),
            )
            .set(DbUpdateVehicle::new(draft, Utc::now().naive_utc()))
            .get_result::<DbVehicle>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?,
        };

        into_domain(db_vehicle)
    }

    fn delete(&self, id: VehicleId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::update(
            vehicles::table
                .filter(vehicles::id.eq(id.get()))
                .filter(vehicles::deleted_at.is_null()),
        )
        .set(vehicles::deleted_at.eq(Some(Utc::now().naive_utc())))
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
