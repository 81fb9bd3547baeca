//! Runtime settings for loading and presenting a price dataset.

use crate::domain::indicator::IndicatorWindows;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How rows that fail to clean are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleaningMode {
    /// Reject the whole load on the first bad row.
    Strict,
    /// Drop bad rows and carry on.
    #[default]
    Lenient,
}

impl FromStr for CleaningMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(CleaningMode::Strict),
            "lenient" => Ok(CleaningMode::Lenient),
            other => Err(format!("unknown mode {:?} (expected strict or lenient)", other)),
        }
    }
}

impl fmt::Display for CleaningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleaningMode::Strict => write!(f, "strict"),
            CleaningMode::Lenient => write!(f, "lenient"),
        }
    }
}

pub const DEFAULT_TAIL_ROWS: usize = 20;
pub const DEFAULT_CURRENCY: &str = "₹";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_path: Option<PathBuf>,
    pub mode: CleaningMode,
    pub windows: IndicatorWindows,
    pub tail_rows: usize,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: None,
            mode: CleaningMode::default(),
            windows: IndicatorWindows::default(),
            tail_rows: DEFAULT_TAIL_ROWS,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}
