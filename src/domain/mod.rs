//! Core domain types and logic.

pub mod price_record;
pub mod date_parse;
pub mod dataset;
pub mod indicator;
pub mod signal;
pub mod analysis;
pub mod settings;
pub mod config_validation;
pub mod error;
