//! Resource queries

use crate::{
    models::{Address, Phone, Resource},
    Error, Result,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct ResourceRepository {
    pool: PgPool,
}

impl ResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: i64) -> Result<Option<Resource>> {
        let resource = sqlx::query_as::<_, Resource>(
            "SELECT id, name, long_description, email, website FROM resources WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(resource)
    }

    pub async fn addresses(&self, resource_id: i64) -> Result<Vec<Address>> {
        let addresses = sqlx::query_as::<_, Address>(
            "SELECT id, address_1, address_2, city, state_province, postal_code, country
             FROM addresses
             WHERE resource_id = $1
             ORDER BY id ASC",
        )
        .bind(resource_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(addresses)
    }

    pub async fn phones(&self, resource_id: i64) -> Result<Vec<Phone>> {
        let phones = sqlx::query_as::<_, Phone>(
            "SELECT id, resource_id, number, service_type
             FROM phones
             WHERE resource_id = $1
             ORDER BY id ASC",
        )
        .bind(resource_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(phones)
    }
}
