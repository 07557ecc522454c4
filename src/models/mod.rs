//! Domain entities returned by repositories and services.
//!
//! These are already-shaped in-memory records; JSON field selection for the
//! wire format is the presentation layer's job (serde derives here).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation lifecycle of a service. Stored as `smallint`; the numeric
/// values are part of the schema and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Pending = 0,
    Approved = 1,
    Rejected = 2,
    Inactive = 3,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Pending => "pending",
            ServiceStatus::Approved => "approved",
            ServiceStatus::Rejected => "rejected",
            ServiceStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub top_level: bool,
    pub featured: bool,
}

/// A top-level category annotated with its direct children (one level deep).
#[derive(Debug, Clone, Serialize)]
pub struct CategoryNode {
    pub id: i64,
    pub name: String,
    pub top_level: bool,
    pub featured: bool,
    pub children: Vec<Category>,
}

/// Per-category counts of approved services and resources.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryCounts {
    pub name: String,
    pub services: i64,
    pub resources: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Resource {
    pub id: i64,
    pub name: String,
    pub long_description: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Service {
    pub id: i64,
    pub resource_id: i64,
    pub name: String,
    pub status: ServiceStatus,
    pub certified: bool,
    pub certified_at: Option<DateTime<Utc>>,
    pub alternate_name: Option<String>,
    pub long_description: Option<String>,
    pub eligibility: Option<String>,
    pub fee: Option<String>,
    pub wait_time: Option<String>,
    pub application_process: Option<String>,
    pub required_documents: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
    pub interpretation_services: Option<String>,
}

/// A service with its nested association graph resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDetail {
    #[serde(flatten)]
    pub service: Service,
    pub schedule: Option<Schedule>,
    pub notes: Vec<Note>,
    pub addresses: Vec<Address>,
    pub categories: Vec<Category>,
    pub eligibilities: Vec<Eligibility>,
    pub resource: Option<Resource>,
}

/// A ranked search hit: the resolved service plus how many of the requested
/// tags it matched.
#[derive(Debug, Clone, Serialize)]
pub struct RankedService {
    #[serde(flatten)]
    pub detail: ServiceDetail,
    pub matching_tags: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Address {
    pub id: i64,
    pub address_1: String,
    pub address_2: Option<String>,
    pub city: String,
    pub state_province: String,
    pub postal_code: String,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Phone {
    pub id: i64,
    pub resource_id: i64,
    pub number: String,
    pub service_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ScheduleDay {
    pub id: i64,
    pub day: Option<String>,
    pub opens_at: Option<i32>,
    pub closes_at: Option<i32>,
    pub open_time: Option<String>,
    pub open_day: Option<String>,
    pub close_time: Option<String>,
    pub close_day: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    pub id: i64,
    pub schedule_days: Vec<ScheduleDay>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Eligibility {
    pub id: i64,
    pub name: String,
    pub feature_rank: Option<i32>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TextingRecipient {
    pub id: i64,
    pub recipient_name: Option<String>,
    pub phone_number: String,
}
