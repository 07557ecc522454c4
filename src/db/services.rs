//! Service queries: lookups, tag-match counting, moderation writes and
//! transactional batch creation.

use crate::{
    models::{
        Address, Category, Eligibility, Note, Resource, Schedule, ScheduleDay, Service,
        ServiceDetail, ServiceStatus,
    },
    services::normalize::NewService,
    services::ranking::TagKind,
    Error, Result,
};
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::HashMap;

const SERVICE_COLUMNS: &str = "id, resource_id, name, status, certified, certified_at, \
     alternate_name, long_description, eligibility, fee, wait_time, application_process, \
     required_documents, url, email, interpretation_services";

#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: i64) -> Result<Option<Service>> {
        let service = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(service)
    }

    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(services)
    }

    pub async fn pending(&self) -> Result<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE status = $1 ORDER BY name ASC"
        ))
        .bind(ServiceStatus::Pending)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(services)
    }

    /// Services manually promoted for a category, ordered by feature rank.
    pub async fn featured_by_category(&self, category_id: i64) -> Result<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services
             WHERE id IN (
                 SELECT cs.service_id
                 FROM categories_services cs
                 WHERE cs.category_id = $1 AND cs.feature_rank > 0
                 ORDER BY cs.feature_rank ASC
             )"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(services)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(count)
    }

    /// Count matching tags per service for the requested tag set, scoped to
    /// services whose owning resource belongs to the site.
    ///
    /// Services with zero matches are simply absent. `COUNT(DISTINCT ...)`
    /// dedupes at the join level so duplicate (service, tag) rows never
    /// double-count.
    pub async fn tag_match_counts(
        &self,
        kind: TagKind,
        tag_ids: &[i64],
        site_id: i64,
    ) -> Result<Vec<(i64, i64)>> {
        // Table and column names come from the TagKind enum, not from user input.
        let sql = format!(
            "SELECT t.service_id, COUNT(DISTINCT t.{tag_column}) AS n_tags
             FROM {join_table} t
             INNER JOIN services s ON s.id = t.service_id
             INNER JOIN resources_sites rs ON rs.resource_id = s.resource_id
             WHERE t.{tag_column} = ANY($1) AND rs.site_id = $2
             GROUP BY t.service_id",
            tag_column = kind.tag_column(),
            join_table = kind.join_table(),
        );

        let counts = sqlx::query_as::<_, (i64, i64)>(&sql)
            .bind(tag_ids)
            .bind(site_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(counts)
    }

    pub async fn update_status(&self, id: i64, status: ServiceStatus) -> Result<Service> {
        let service = sqlx::query_as::<_, Service>(&format!(
            "UPDATE services SET status = $2 WHERE id = $1 RETURNING {SERVICE_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(service)
    }

    pub async fn certify(&self, id: i64) -> Result<Service> {
        let service = sqlx::query_as::<_, Service>(&format!(
            "UPDATE services SET certified = TRUE, certified_at = NOW()
             WHERE id = $1 RETURNING {SERVICE_COLUMNS}"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(service)
    }

    /// Persist a batch of normalized records atomically: one transaction,
    /// all-or-nothing. Returns the new service ids in input order.
    pub async fn create_batch(&self, records: &[NewService]) -> Result<Vec<i64>> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let mut ids = Vec::with_capacity(records.len());

        for record in records {
            let id = insert_service(&mut tx, record)
                .await
                .map_err(map_insert_error)?;
            ids.push(id);
        }

        tx.commit().await.map_err(Error::Database)?;
        Ok(ids)
    }

    /// Resolve the nested association graph for a set of services.
    ///
    /// One query per association table instead of one large join, so row
    /// duplication never amplifies the transferred data.
    pub async fn load_details(&self, services: Vec<Service>) -> Result<Vec<ServiceDetail>> {
        if services.is_empty() {
            return Ok(Vec::new());
        }

        let service_ids: Vec<i64> = services.iter().map(|s| s.id).collect();
        let resource_ids: Vec<i64> = services.iter().map(|s| s.resource_id).collect();

        let mut schedules = self.schedules_for(&service_ids).await?;
        let mut notes = self.notes_for(&service_ids).await?;
        let mut addresses = self.addresses_for(&service_ids).await?;
        let mut categories = self.tags_for::<Category>(TagKind::Category, &service_ids).await?;
        let mut eligibilities = self
            .tags_for::<Eligibility>(TagKind::Eligibility, &service_ids)
            .await?;
        let resources = self.resources_by_id(&resource_ids).await?;

        Ok(services
            .into_iter()
            .map(|service| {
                let resource = resources.get(&service.resource_id).cloned();
                ServiceDetail {
                    schedule: schedules.remove(&service.id),
                    notes: notes.remove(&service.id).unwrap_or_default(),
                    addresses: addresses.remove(&service.id).unwrap_or_default(),
                    categories: categories.remove(&service.id).unwrap_or_default(),
                    eligibilities: eligibilities.remove(&service.id).unwrap_or_default(),
                    resource,
                    service,
                }
            })
            .collect())
    }

    async fn schedules_for(&self, service_ids: &[i64]) -> Result<HashMap<i64, Schedule>> {
        let rows = sqlx::query(
            "SELECT s.id, s.service_id FROM schedules s WHERE s.service_id = ANY($1)",
        )
        .bind(service_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut by_schedule: HashMap<i64, i64> = HashMap::new();
        let mut schedules: HashMap<i64, Schedule> = HashMap::new();
        let mut schedule_ids = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.get("id");
            let service_id: i64 = row.get("service_id");
            by_schedule.insert(id, service_id);
            schedule_ids.push(id);
            schedules.insert(
                service_id,
                Schedule {
                    id,
                    schedule_days: Vec::new(),
                },
            );
        }

        if schedule_ids.is_empty() {
            return Ok(schedules);
        }

        let day_rows = sqlx::query(
            "SELECT id, schedule_id, day, opens_at, closes_at, open_time, open_day,
                    close_time, close_day
             FROM schedule_days
             WHERE schedule_id = ANY($1)
             ORDER BY id ASC",
        )
        .bind(&schedule_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        for row in day_rows {
            let schedule_id: i64 = row.get("schedule_id");
            let Some(service_id) = by_schedule.get(&schedule_id) else {
                continue;
            };
            if let Some(schedule) = schedules.get_mut(service_id) {
                schedule.schedule_days.push(ScheduleDay {
                    id: row.get("id"),
                    day: row.get("day"),
                    opens_at: row.get("opens_at"),
                    closes_at: row.get("closes_at"),
                    open_time: row.get("open_time"),
                    open_day: row.get("open_day"),
                    close_time: row.get("close_time"),
                    close_day: row.get("close_day"),
                });
            }
        }

        Ok(schedules)
    }

    async fn notes_for(&self, service_ids: &[i64]) -> Result<HashMap<i64, Vec<Note>>> {
        let rows = sqlx::query(
            "SELECT id, service_id, note FROM notes WHERE service_id = ANY($1) ORDER BY id ASC",
        )
        .bind(service_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut notes: HashMap<i64, Vec<Note>> = HashMap::new();
        for row in rows {
            let service_id: i64 = row.get("service_id");
            notes.entry(service_id).or_default().push(Note {
                id: row.get("id"),
                note: row.get("note"),
            });
        }

        Ok(notes)
    }

    async fn addresses_for(&self, service_ids: &[i64]) -> Result<HashMap<i64, Vec<Address>>> {
        let rows = sqlx::query(
            "SELECT a.id, a.address_1, a.address_2, a.city, a.state_province, a.postal_code,
                    a.country, sa.service_id
             FROM addresses a
             INNER JOIN addresses_services sa ON sa.address_id = a.id
             WHERE sa.service_id = ANY($1)
             ORDER BY a.id ASC",
        )
        .bind(service_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut addresses: HashMap<i64, Vec<Address>> = HashMap::new();
        for row in rows {
            let service_id: i64 = row.get("service_id");
            addresses.entry(service_id).or_default().push(Address {
                id: row.get("id"),
                address_1: row.get("address_1"),
                address_2: row.get("address_2"),
                city: row.get("city"),
                state_province: row.get("state_province"),
                postal_code: row.get("postal_code"),
                country: row.get("country"),
            });
        }

        Ok(addresses)
    }

    async fn tags_for<T>(
        &self,
        kind: TagKind,
        service_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<T>>>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let table = match kind {
            TagKind::Category => "categories",
            TagKind::Eligibility => "eligibilities",
        };
        // Identifiers come from the TagKind enum, not from user input.
        let sql = format!(
            "SELECT t.*, j.service_id AS __service_id
             FROM {table} t
             INNER JOIN {join_table} j ON j.{tag_column} = t.id
             WHERE j.service_id = ANY($1)
             ORDER BY t.name ASC",
            join_table = kind.join_table(),
            tag_column = kind.tag_column(),
        );

        let rows = sqlx::query(&sql)
            .bind(service_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let mut tags: HashMap<i64, Vec<T>> = HashMap::new();
        for row in rows {
            let service_id: i64 = row.get("__service_id");
            let tag = T::from_row(&row).map_err(Error::Database)?;
            tags.entry(service_id).or_default().push(tag);
        }

        Ok(tags)
    }

    async fn resources_by_id(&self, resource_ids: &[i64]) -> Result<HashMap<i64, Resource>> {
        let resources = sqlx::query_as::<_, Resource>(
            "SELECT id, name, long_description, email, website
             FROM resources
             WHERE id = ANY($1)",
        )
        .bind(resource_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(resources.into_iter().map(|r| (r.id, r)).collect())
    }
}

async fn insert_service(
    tx: &mut Transaction<'_, Postgres>,
    record: &NewService,
) -> sqlx::Result<i64> {
    let service_id: i64 = sqlx::query_scalar(
        "INSERT INTO services (resource_id, name, status, alternate_name, long_description,
                               eligibility, fee, wait_time, application_process,
                               required_documents, url, email, interpretation_services)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
         RETURNING id",
    )
    .bind(record.resource_id)
    .bind(&record.name)
    .bind(record.status)
    .bind(&record.alternate_name)
    .bind(&record.long_description)
    .bind(&record.eligibility)
    .bind(&record.fee)
    .bind(&record.wait_time)
    .bind(&record.application_process)
    .bind(&record.required_documents)
    .bind(&record.url)
    .bind(&record.email)
    .bind(&record.interpretation_services)
    .fetch_one(&mut **tx)
    .await?;

    if let Some(schedule) = &record.schedule {
        let schedule_id: i64 =
            sqlx::query_scalar("INSERT INTO schedules (service_id) VALUES ($1) RETURNING id")
                .bind(service_id)
                .fetch_one(&mut **tx)
                .await?;

        for day in &schedule.schedule_days {
            sqlx::query(
                "INSERT INTO schedule_days (schedule_id, day, opens_at, closes_at, open_time,
                                            open_day, close_time, close_day)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(schedule_id)
            .bind(&day.day)
            .bind(day.opens_at)
            .bind(day.closes_at)
            .bind(&day.open_time)
            .bind(&day.open_day)
            .bind(&day.close_time)
            .bind(&day.close_day)
            .execute(&mut **tx)
            .await?;
        }
    }

    for note in &record.notes {
        sqlx::query("INSERT INTO notes (service_id, note) VALUES ($1, $2)")
            .bind(service_id)
            .bind(note)
            .execute(&mut **tx)
            .await?;
    }

    for address in &record.addresses {
        let address_id = match address.id {
            // Reference to an existing address; the FK enforces existence.
            Some(id) => id,
            None => {
                // city/state_province/postal_code are NOT NULL with '' defaults;
                // absent payload fields mean empty, not NULL.
                sqlx::query_scalar(
                    "INSERT INTO addresses (address_1, address_2, city, state_province,
                                            postal_code, country)
                     VALUES ($1, $2, $3, $4, $5, $6)
                     RETURNING id",
                )
                .bind(&address.address_1)
                .bind(&address.address_2)
                .bind(address.city.as_deref().unwrap_or(""))
                .bind(address.state_province.as_deref().unwrap_or(""))
                .bind(address.postal_code.as_deref().unwrap_or(""))
                .bind(&address.country)
                .fetch_one(&mut **tx)
                .await?
            }
        };

        sqlx::query("INSERT INTO addresses_services (address_id, service_id) VALUES ($1, $2)")
            .bind(address_id)
            .bind(service_id)
            .execute(&mut **tx)
            .await?;
    }

    for category_id in &record.category_ids {
        sqlx::query("INSERT INTO categories_services (category_id, service_id) VALUES ($1, $2)")
            .bind(category_id)
            .bind(service_id)
            .execute(&mut **tx)
            .await?;
    }

    for eligibility_id in &record.eligibility_ids {
        sqlx::query(
            "INSERT INTO eligibilities_services (eligibility_id, service_id) VALUES ($1, $2)",
        )
        .bind(eligibility_id)
        .bind(service_id)
        .execute(&mut **tx)
        .await?;
    }

    Ok(service_id)
}

/// Foreign-key violations inside a batch mean the payload referenced an
/// unknown category/eligibility/address id; report that as bad input rather
/// than a server fault.
fn map_insert_error(e: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some("23503") {
            return Error::InvalidInput("unknown associated record id".to_string());
        }
    }
    Error::Database(e)
}
