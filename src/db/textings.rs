//! Texting recipient and log queries

use crate::{models::TextingRecipient, Error, Result};
use sqlx::PgPool;

#[derive(Clone)]
pub struct TextingRepository {
    pool: PgPool,
}

impl TextingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a recipient or refresh the stored name for an existing phone
    /// number (phone numbers are unique).
    pub async fn upsert_recipient(
        &self,
        recipient_name: Option<&str>,
        phone_number: &str,
    ) -> Result<TextingRecipient> {
        let recipient = sqlx::query_as::<_, TextingRecipient>(
            "INSERT INTO texting_recipients (recipient_name, phone_number)
             VALUES ($1, $2)
             ON CONFLICT (phone_number)
             DO UPDATE SET recipient_name = EXCLUDED.recipient_name
             RETURNING id, recipient_name, phone_number",
        )
        .bind(recipient_name)
        .bind(phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(recipient)
    }

    /// Log that a service triggered a text to a recipient.
    pub async fn record_texting(&self, recipient_id: i64, service_id: i64) -> Result<()> {
        sqlx::query("INSERT INTO textings (texting_recipient_id, service_id) VALUES ($1, $2)")
            .bind(recipient_id)
            .bind(service_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(())
    }
}
