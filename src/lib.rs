//! niftysma: moving-average trend signals for a CSV of daily stock closes.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], command-line presentation in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
