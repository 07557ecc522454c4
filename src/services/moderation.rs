//! Moderation service - service lifecycle transitions
//!
//! All transition logic lives in [`apply`]; callers never branch on raw
//! status values. Deactivation additionally removes the service from the
//! external search index, best-effort.

use crate::{
    clients::SearchIndexClient,
    db::ServiceRepository,
    models::{Service, ServiceStatus},
    Error, Result,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
    Deactivate,
}

impl ModerationAction {
    fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
            ModerationAction::Deactivate => "deactivate",
        }
    }
}

/// Outcome of applying a moderation action to a service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The transition is legal; persist the new status.
    Applied(ServiceStatus),
    /// The service is already in the target state. Reported as 304.
    NotModified,
    /// Illegal transition for the current state. Reported as 412.
    Blocked,
}

/// Compute the transition for `action` given the current status.
///
/// - approve/reject are only legal from `pending` and idempotent-neutral
///   when the service already carries the target status
/// - deactivate is only legal from `approved`
pub fn apply(current: ServiceStatus, action: ModerationAction) -> Transition {
    use ServiceStatus::*;

    match (action, current) {
        (ModerationAction::Approve, Pending) => Transition::Applied(Approved),
        (ModerationAction::Approve, Approved) => Transition::NotModified,
        (ModerationAction::Approve, _) => Transition::Blocked,

        (ModerationAction::Reject, Pending) => Transition::Applied(Rejected),
        (ModerationAction::Reject, Rejected) => Transition::NotModified,
        (ModerationAction::Reject, _) => Transition::Blocked,

        (ModerationAction::Deactivate, Approved) => Transition::Applied(Inactive),
        (ModerationAction::Deactivate, _) => Transition::Blocked,
    }
}

pub struct ModerationService {
    services: ServiceRepository,
    search_index: Arc<dyn SearchIndexClient>,
}

impl ModerationService {
    pub fn new(services: ServiceRepository, search_index: Arc<dyn SearchIndexClient>) -> Self {
        Self {
            services,
            search_index,
        }
    }

    /// Approve a pending service (POST /services/:id/approve).
    pub async fn approve(&self, service_id: i64) -> Result<Service> {
        self.transition(service_id, ModerationAction::Approve).await
    }

    /// Reject a pending service (POST /services/:id/reject).
    pub async fn reject(&self, service_id: i64) -> Result<Service> {
        self.transition(service_id, ModerationAction::Reject).await
    }

    /// Deactivate an approved service (DELETE /services/:id).
    ///
    /// On success the service is removed from the external search index.
    /// That call is fire-and-forget: a failure is logged and the request
    /// still succeeds.
    pub async fn deactivate(&self, service_id: i64) -> Result<Service> {
        let service = self
            .transition(service_id, ModerationAction::Deactivate)
            .await?;

        if let Err(e) = self.search_index.remove_service(service_id).await {
            tracing::warn!(
                service_id,
                error = %e,
                "failed to remove deactivated service from search index"
            );
        }

        Ok(service)
    }

    /// Certify a service (POST /services/:id/certify).
    ///
    /// Certification is orthogonal to the moderation lifecycle and is legal
    /// in every status.
    pub async fn certify(&self, service_id: i64) -> Result<Service> {
        let service = self.find(service_id).await?;
        self.services.certify(service.id).await
    }

    /// Read-check-write: the status is loaded, validated against the state
    /// machine and only then persisted. No intermediate state is written.
    async fn transition(&self, service_id: i64, action: ModerationAction) -> Result<Service> {
        let service = self.find(service_id).await?;

        match apply(service.status, action) {
            Transition::Applied(next) => {
                tracing::info!(
                    service_id,
                    from = service.status.as_str(),
                    to = next.as_str(),
                    "service status transition"
                );
                self.services.update_status(service_id, next).await
            }
            Transition::NotModified => Err(Error::NotModified),
            Transition::Blocked => Err(Error::Precondition(format!(
                "cannot {} service {} in status {}",
                action.as_str(),
                service_id,
                service.status.as_str()
            ))),
        }
    }

    async fn find(&self, service_id: i64) -> Result<Service> {
        self.services
            .find(service_id)
            .await?
            .ok_or(Error::NotFound {
                entity: "service",
                id: service_id,
            })
    }
}
