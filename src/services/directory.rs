//! Directory query service - orchestration of listings, search and creation
//!
//! Combines the repositories with the pure core (normalizer, ranker,
//! hierarchy resolver). Filters combine with AND semantics; an absent filter
//! imposes no constraint.

use crate::{
    db::{CategoryRepository, ResourceRepository, ServiceRepository},
    models::{Category, CategoryCounts, CategoryNode, RankedService, ServiceDetail},
    services::{
        hierarchy,
        normalize::{self, ServiceInput},
        ranking::{self, TagKind},
    },
    Error, Result,
};
use std::collections::HashMap;

pub struct DirectoryService {
    categories: CategoryRepository,
    resources: ResourceRepository,
    services: ServiceRepository,
    default_site_id: i64,
}

impl DirectoryService {
    pub fn new(
        categories: CategoryRepository,
        resources: ResourceRepository,
        services: ServiceRepository,
        default_site_id: i64,
    ) -> Self {
        Self {
            categories,
            resources,
            services,
            default_site_id,
        }
    }

    pub async fn category(&self, id: i64) -> Result<Category> {
        self.categories.find(id).await?.ok_or(Error::NotFound {
            entity: "category",
            id,
        })
    }

    pub async fn list_categories(
        &self,
        site_id: Option<i64>,
        top_level: Option<bool>,
    ) -> Result<Vec<Category>> {
        self.categories.list(site_id, top_level).await
    }

    pub async fn featured_categories(&self) -> Result<Vec<Category>> {
        self.categories.featured().await
    }

    pub async fn category_children(&self, id: i64) -> Result<Vec<Category>> {
        // 404 for unknown parents rather than an empty list.
        self.category(id).await?;
        self.categories.children(id).await
    }

    pub async fn category_counts(&self) -> Result<Vec<CategoryCounts>> {
        self.categories.counts().await
    }

    /// Top-level categories with their direct children resolved.
    pub async fn category_tree(&self) -> Result<Vec<CategoryNode>> {
        let categories = self.categories.list_all().await?;
        let edges = self.categories.relationship_edges().await?;
        Ok(hierarchy::build_tree(&categories, &edges))
    }

    pub async fn service(&self, id: i64) -> Result<ServiceDetail> {
        let service = self.services.find(id).await?.ok_or(Error::NotFound {
            entity: "service",
            id,
        })?;
        let mut details = self.services.load_details(vec![service]).await?;
        details.pop().ok_or(Error::NotFound {
            entity: "service",
            id,
        })
    }

    pub async fn pending_services(&self) -> Result<Vec<ServiceDetail>> {
        let services = self.services.pending().await?;
        self.services.load_details(services).await
    }

    pub async fn featured_services(&self, category_id: i64) -> Result<Vec<ServiceDetail>> {
        let services = self.services.featured_by_category(category_id).await?;
        self.services.load_details(services).await
    }

    pub async fn service_count(&self) -> Result<i64> {
        self.services.count().await
    }

    /// Search services by tag set, ranked by relevance.
    ///
    /// `raw_tag_ids` is the comma-separated id list from the request; an
    /// empty set yields an empty result, never "all services".
    pub async fn search_services(
        &self,
        kind: TagKind,
        raw_tag_ids: &str,
        site_id: Option<i64>,
    ) -> Result<Vec<RankedService>> {
        let tag_ids = ranking::parse_tag_ids(raw_tag_ids)?;
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let site_id = site_id.unwrap_or(self.default_site_id);
        let counts = self.services.tag_match_counts(kind, &tag_ids, site_id).await?;

        let matched_ids: Vec<i64> = counts.iter().map(|(service_id, _)| *service_id).collect();
        let counts_by_id: HashMap<i64, i64> = counts.into_iter().collect();

        let services = self.services.find_by_ids(&matched_ids).await?;
        let details = self.services.load_details(services).await?;

        let mut hits: Vec<RankedService> = details
            .into_iter()
            .map(|detail| {
                let matching_tags = counts_by_id.get(&detail.service.id).copied().unwrap_or(0);
                RankedService {
                    detail,
                    matching_tags,
                }
            })
            .collect();

        ranking::order_by_relevance(&mut hits);
        Ok(hits)
    }

    /// Normalize and persist a batch of services under one resource.
    ///
    /// Normalization failures abort the whole batch and report every invalid
    /// record together; persistence is all-or-nothing in one transaction.
    pub async fn create_services(
        &self,
        resource_id: i64,
        inputs: Vec<ServiceInput>,
    ) -> Result<Vec<ServiceDetail>> {
        self.resources
            .find(resource_id)
            .await?
            .ok_or(Error::NotFound {
                entity: "resource",
                id: resource_id,
            })?;

        let records = normalize::normalize_batch(inputs, resource_id)?;
        let ids = self.services.create_batch(&records).await?;

        tracing::info!(resource_id, created = ids.len(), "batch-created services");

        let services = self.services.find_by_ids(&ids).await?;
        let mut details = self.services.load_details(services).await?;
        // find_by_ids carries no ordering guarantee; restore input order.
        let position: HashMap<i64, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        details.sort_by_key(|d| position.get(&d.service.id).copied().unwrap_or(usize::MAX));
        Ok(details)
    }
}
