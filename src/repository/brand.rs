use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::brand::{Brand, BrandDraft};
use crate::domain::types::{BrandId, BrandName};
use crate::models::brand::{Brand as DbBrand, NewBrand as DbNewBrand, UpdateBrand as DbUpdateBrand};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    BrandReader, DieselRepository, EntityReader, EntityWriter, ListQuery, parse_filter,
    unknown_filter,
};
use crate::schema::brands;

type BoxedBrandQuery = brands::BoxedQuery<'static, Sqlite>;

fn live_brands() -> BoxedBrandQuery {
    brands::table
        .filter(brands::deleted_at.is_null())
        .into_boxed::<Sqlite>()
}

fn filtered_brands(query: &ListQuery) -> RepositoryResult<BoxedBrandQuery> {
    let mut items = live_brands();
    for (field, value) in &query.filter {
        items = match field.as_str() {
            "id" => items.filter(brands::id.eq(parse_filter::<i32>(field, value)?)),
            "name" => items.filter(brands::name.eq(value.clone())),
            other => return Err(unknown_filter(other)),
        };
    }
    Ok(items)
}

impl EntityReader<Brand> for DieselRepository {
    fn get(&self, id: BrandId) -> RepositoryResult<Option<Brand>> {
        let mut conn = self.conn()?;
        let db_brand = live_brands()
            .filter(brands::id.eq(id.get()))
            .first::<DbBrand>(&mut conn)
            .optional()?;

        db_brand
            .map(|brand| Brand::try_from(brand).map_err(RepositoryError::from))
            .transpose()
    }

    fn list(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Brand>)> {
        let mut conn = self.conn()?;

        let total = filtered_brands(query)?.count().get_result::<i64>(&mut conn)?;

        let items = order_by!(filtered_brands(query)?, brands::id, query.order_by.as_str(), query.sort, {
            "id" => brands::id,
            "name" => brands::name,
            "created_at" => brands::created_at,
            "updated_at" => brands::updated_at,
        })?;

        let brands = items
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .load::<DbBrand>(&mut conn)?
            .into_iter()
            .map(|brand| Brand::try_from(brand).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((usize::try_from(total).unwrap_or_default(), brands))
    }
}

impl EntityWriter<Brand> for DieselRepository {
    fn save(&self, draft: &BrandDraft) -> RepositoryResult<Brand> {
        let mut conn = self.conn()?;

        let db_brand = match draft.id {
            None => diesel::insert_into(brands::table)
                .values(DbNewBrand::from(draft))
                .get_result::<DbBrand>(&mut conn)?,
            Some(id) => diesel::update(
                brands::table
                    .filter(brands::id.eq(id.get()))
                    .filter(brands::deleted_at.is_null()),
            )
            .set(DbUpdateBrand::new(draft, Utc::now().naive_utc()))
            .get_result::<DbBrand>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?,
        };

        Ok(Brand::try_from(db_brand)?)
    }

    fn delete(&self, id: BrandId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::update(
            brands::table
                .filter(brands::id.eq(id.get()))
                .filter(brands::deleted_at.is_null()),
        )
        .set(brands::deleted_at.eq(Some(Utc::now().naive_utc())))
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl BrandReader for DieselRepository {
    fn get_brand_by_name(&self, name: &BrandName) -> RepositoryResult<Option<Brand>> {
        let mut conn = self.conn()?;
        let db_brand = live_brands()
            .filter(brands::name.eq(name.as_str().to_string()))
            .first::<DbBrand>(&mut conn)
            .optional()?;

        db_brand
            .map(|brand| Brand::try_from(brand).map_err(RepositoryError::from))
            .transpose()
    }
}
