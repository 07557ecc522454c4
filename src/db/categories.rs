//! Category queries

use crate::{
    models::{Category, CategoryCounts, ServiceStatus},
    Error, Result,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: i64) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, top_level, featured FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(category)
    }

    /// List categories, optionally scoped to a site and filtered by the
    /// top-level flag. Absent filters impose no constraint.
    pub async fn list(&self, site_id: Option<i64>, top_level: Option<bool>) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT c.id, c.name, c.top_level, c.featured
             FROM categories c
             WHERE ($1::BIGINT IS NULL
                    OR EXISTS (SELECT 1 FROM categories_sites cs
                               WHERE cs.category_id = c.id AND cs.site_id = $1))
               AND ($2::BOOLEAN IS NULL OR c.top_level = $2)
             ORDER BY c.name ASC",
        )
        .bind(site_id)
        .bind(top_level)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(categories)
    }

    pub async fn featured(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, top_level, featured
             FROM categories
             WHERE featured = TRUE
             ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(categories)
    }

    /// Direct children of one category. Duplicate relationship rows collapse
    /// via DISTINCT.
    pub async fn children(&self, parent_id: i64) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT DISTINCT c.id, c.name, c.top_level, c.featured
             FROM categories c
             INNER JOIN category_relationships r ON r.child_id = c.id
             WHERE r.parent_id = $1
             ORDER BY c.name ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(categories)
    }

    pub async fn list_all(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, top_level, featured FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(categories)
    }

    /// All parent/child edges of the category relationship graph.
    pub async fn relationship_edges(&self) -> Result<Vec<(i64, i64)>> {
        let edges = sqlx::query_as::<_, (i64, i64)>(
            "SELECT parent_id, child_id FROM category_relationships",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(edges)
    }

    /// Per-category counts of approved services and of the distinct
    /// resources owning them, ordered by category name.
    pub async fn counts(&self) -> Result<Vec<CategoryCounts>> {
        let counts = sqlx::query_as::<_, CategoryCounts>(
            "SELECT c.name,
                    COUNT(s.id) AS services,
                    COUNT(DISTINCT s.resource_id) AS resources
             FROM categories c
             LEFT JOIN categories_services cs ON cs.category_id = c.id
             LEFT JOIN services s ON s.id = cs.service_id AND s.status = $1
             GROUP BY c.id, c.name
             ORDER BY c.name ASC",
        )
        .bind(ServiceStatus::Approved)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(counts)
    }
}
