//! Attribute normalization for service creation
//!
//! Client payloads arrive in the serialization-oriented shape (nested
//! `schedule`, `notes`, `addresses`, tag references). This module turns each
//! payload into the creation-oriented [`NewService`] record the persistence
//! layer expects, drops everything outside the allowed field set and injects
//! the governing `resource_id` so a payload can never reassign a service to
//! another resource.
//!
//! Normalization is pure and per-record; batch normalization reports every
//! invalid record's errors together instead of stopping at the first.

use crate::{
    error::{FieldError, RecordErrors},
    models::ServiceStatus,
    Error, Result,
};
use serde::Deserialize;

/// Raw client payload for one service. Only the fields enumerated here are
/// accepted; anything else in the JSON body is silently dropped during
/// deserialization (notably `id`, `status` and `resource_id`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceInput {
    pub name: Option<String>,
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
    pub schedule: Option<ScheduleInput>,
    #[serde(default)]
    pub notes: Vec<NoteInput>,
    #[serde(default)]
    pub addresses: Vec<AddressInput>,
    #[serde(default)]
    pub categories: Vec<TagRef>,
    #[serde(default)]
    pub eligibilities: Vec<TagRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleInput {
    #[serde(default)]
    pub schedule_days: Vec<ScheduleDayInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleDayInput {
    pub day: Option<String>,
    pub opens_at: Option<i32>,
    pub closes_at: Option<i32>,
    pub open_time: Option<String>,
    pub open_day: Option<String>,
    pub close_time: Option<String>,
    pub close_day: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteInput {
    pub note: String,
}

/// Address payload. An `id` references an existing address to associate;
/// without one, a new address row is created alongside the service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressInput {
    pub id: Option<i64>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Tag reference: clients only ever send `{ "id": N }` for categories and
/// eligibilities. New tag rows are never created from this path.
#[derive(Debug, Clone, Deserialize)]
pub struct TagRef {
    pub id: i64,
}

/// Shape-normalized record ready for persistence.
#[derive(Debug, Clone)]
pub struct NewService {
    pub resource_id: i64,
    pub status: ServiceStatus,
    pub name: String,
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
    pub schedule: Option<ScheduleInput>,
    pub notes: Vec<String>,
    pub addresses: Vec<AddressInput>,
    /// Ordered-unique ids of existing categories to associate.
    pub category_ids: Vec<i64>,
    /// Ordered-unique ids of existing eligibilities to associate.
    pub eligibility_ids: Vec<i64>,
}

/// Normalize one payload under the governing resource.
///
/// Services created through this batch path initialize as `approved` rather
/// than the `pending` default used elsewhere: it is the trusted
/// bulk-ingestion path.
pub fn normalize(input: ServiceInput, resource_id: i64) -> std::result::Result<NewService, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = match input.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        Some(_) => {
            errors.push(FieldError::new("name", "must not be blank"));
            String::new()
        }
        None => {
            errors.push(FieldError::new("name", "is required"));
            String::new()
        }
    };

    for (i, address) in input.addresses.iter().enumerate() {
        // A bare reference needs no fields; a new address needs the basics.
        if address.id.is_none() && address.address_1.as_deref().unwrap_or("").trim().is_empty() {
            errors.push(FieldError::new(
                "addresses",
                format!("address {i} must carry an id or an address_1"),
            ));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewService {
        resource_id,
        status: ServiceStatus::Approved,
        name,
        alternate_name: input.alternate_name,
        long_description: input.long_description,
        eligibility: input.eligibility,
        fee: input.fee,
        wait_time: input.wait_time,
        application_process: input.application_process,
        required_documents: input.required_documents,
        url: input.url,
        email: input.email,
        interpretation_services: input.interpretation_services,
        schedule: input.schedule,
        notes: input.notes.into_iter().map(|n| n.note).collect(),
        addresses: input.addresses,
        category_ids: ordered_unique(input.categories),
        eligibility_ids: ordered_unique(input.eligibilities),
    })
}

/// Normalize a whole batch. Every record is normalized independently; if any
/// fail, the combined error lists each invalid record with its position.
pub fn normalize_batch(inputs: Vec<ServiceInput>, resource_id: i64) -> Result<Vec<NewService>> {
    let mut records = Vec::with_capacity(inputs.len());
    let mut failures = Vec::new();

    for (index, input) in inputs.into_iter().enumerate() {
        match normalize(input, resource_id) {
            Ok(record) => records.push(record),
            Err(errors) => failures.push(RecordErrors { index, errors }),
        }
    }

    if failures.is_empty() {
        Ok(records)
    } else {
        Err(Error::Validation(failures))
    }
}

fn ordered_unique(tags: Vec<TagRef>) -> Vec<i64> {
    let mut ids = Vec::with_capacity(tags.len());
    for tag in tags {
        if !ids.contains(&tag.id) {
            ids.push(tag.id);
        }
    }
    ids
}
