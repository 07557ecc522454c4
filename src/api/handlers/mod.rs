//! HTTP request handlers

pub mod categories;
pub mod services;
pub mod textings;
