//! Configuration validation.
//!
//! Validates every config field before a dataset is loaded. All keys are
//! optional; present keys must hold usable values.

use crate::domain::error::NiftySmaError;
use crate::domain::indicator::IndicatorWindows;
use crate::domain::settings::CleaningMode;
use crate::ports::config_port::ConfigPort;

pub fn validate_settings_config(config: &dyn ConfigPort) -> Result<(), NiftySmaError> {
    validate_data_path(config)?;
    validate_mode(config)?;
    validate_windows(config)?;
    validate_tail_rows(config)?;
    Ok(())
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), NiftySmaError> {
    match config.get_string("data", "path") {
        Some(p) if p.trim().is_empty() => Err(invalid("data", "path", "path must not be empty")),
        _ => Ok(()),
    }
}

fn validate_mode(config: &dyn ConfigPort) -> Result<(), NiftySmaError> {
    if let Some(mode) = config.get_string("data", "mode") {
        mode.parse::<CleaningMode>()
            .map_err(|reason| invalid("data", "mode", &reason))?;
    }
    Ok(())
}

fn validate_windows(config: &dyn ConfigPort) -> Result<(), NiftySmaError> {
    let short = parse_positive(config, "indicators", "short_window")?
        .unwrap_or(IndicatorWindows::DEFAULT_SHORT);
    let long = parse_positive(config, "indicators", "long_window")?
        .unwrap_or(IndicatorWindows::DEFAULT_LONG);
    IndicatorWindows::new(short, long)?;
    Ok(())
}

fn validate_tail_rows(config: &dyn ConfigPort) -> Result<(), NiftySmaError> {
    parse_count(config, "display", "tail_rows")?;
    Ok(())
}

/// Parses an optional non-negative integer key.
pub fn parse_count(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<usize>, NiftySmaError> {
    config
        .get_string(section, key)
        .map(|raw| {
            raw.trim().parse::<usize>().map_err(|_| {
                invalid(
                    section,
                    key,
                    &format!("{} must be a non-negative integer", key),
                )
            })
        })
        .transpose()
}

/// Parses an optional positive integer key.
pub fn parse_positive(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<usize>, NiftySmaError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(0) | Err(_) => Err(invalid(
                section,
                key,
                &format!("{} must be a positive integer", key),
            )),
            Ok(v) => Ok(Some(v)),
        },
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> NiftySmaError {
    NiftySmaError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
