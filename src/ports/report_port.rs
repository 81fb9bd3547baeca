//! Report generation port trait.

use crate::domain::analysis::Analysis;
use crate::domain::error::NiftySmaError;
use std::io::Write;

/// Port for presenting an analysis.
pub trait ReportPort {
    fn write(&self, analysis: &Analysis, out: &mut dyn Write) -> Result<(), NiftySmaError>;
}
