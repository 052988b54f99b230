use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductStore;
use crate::domain::product::{Product, ProductInput};
use crate::schema::products;

use super::models::{NewProductRow, ProductChangeset, ProductRow};

#[derive(Clone)]
pub struct DieselProductStore {
    pool: DbPool,
}

impl DieselProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductStore for DieselProductStore {
    fn create(&self, input: ProductInput) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row: ProductRow = diesel::insert_into(products::table)
            .values(&NewProductRow {
                id: Uuid::new_v4(),
                name: input.name,
                description: input.description,
                price: input.price,
                image_url: input.image_url,
                category: input.category,
                available: input.available,
            })
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn update(&self, id: Uuid, input: ProductInput) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row: ProductRow = diesel::update(products::table.find(id))
            .set(&ProductChangeset {
                name: input.name,
                description: input.description,
                price: input.price,
                image_url: input.image_url,
                category: input.category,
                available: input.available,
                updated_at: Utc::now(),
            })
            .get_result(&mut conn)
            .optional()?
            .ok_or(DomainError::NotFound("Product"))?;

        Ok(row.into())
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(products::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(DomainError::NotFound("Product"));
        }
        Ok(())
    }

    fn toggle_availability(&self, id: Uuid) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row: ProductRow = diesel::update(products::table.find(id))
            .set((
                products::available.eq(diesel::dsl::not(products::available)),
                products::updated_at.eq(Utc::now()),
            ))
            .get_result(&mut conn)
            .optional()?
            .ok_or(DomainError::NotFound("Product"))?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    fn list_all(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .order(products::created_at.desc())
            .select(ProductRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn list_available(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .filter(products::available.eq(true))
            .order(products::created_at.desc())
            .select(ProductRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
