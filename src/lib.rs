//! Wayfinder - community resource directory REST API
//!
//! A thin business layer over Postgres: category listings and hierarchy,
//! tag-relevance service search, a service moderation state machine and
//! outbound texting. See the module docs under `services` for the core
//! contracts.

pub mod api;
pub mod clients;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

pub use error::{Error, Result};
