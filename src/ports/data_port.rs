//! Price data source port.

use crate::domain::error::NiftySmaError;
use crate::domain::price_record::RawPriceRow;
use crate::domain::settings::CleaningMode;

pub trait PriceSource {
    /// Reads every row of the source. Structurally broken rows are dropped in
    /// `Lenient` mode and returned as `BadRow` in `Strict` mode.
    fn load_rows(&self, mode: CleaningMode) -> Result<Vec<RawPriceRow>, NiftySmaError>;

    /// Human-readable name of the source, for log lines.
    fn describe(&self) -> String;
}
