//! Plain-text report: recent rows, latest values and the trend signal.

use crate::domain::analysis::Analysis;
use crate::domain::error::NiftySmaError;
use crate::domain::signal::Signal;
use crate::ports::report_port::ReportPort;
use std::io::Write;

pub const NO_DATA_MESSAGE: &str = "No data available for the selected stock.";

pub struct TextReportAdapter {
    currency: String,
    tail_rows: usize,
}

impl TextReportAdapter {
    pub fn new(currency: &str, tail_rows: usize) -> Self {
        Self {
            currency: currency.to_string(),
            tail_rows,
        }
    }

    fn money(&self, value: f64) -> String {
        format!("{}{:.2}", self.currency, value)
    }
}

pub fn title(analysis: &Analysis) -> String {
    match (&analysis.instrument, &analysis.category) {
        (Some(i), Some(c)) => format!("Stock Trend for {} ({})", i, c),
        (Some(i), None) => format!("Stock Trend for {}", i),
        (None, Some(c)) => format!("Stock Trend ({})", c),
        (None, None) => "Stock Trend".to_string(),
    }
}

pub fn signal_line(signal: Signal, short: usize, long: usize) -> String {
    match signal {
        Signal::Bullish => format!(
            "Bullish Signal: SMA {} above SMA {} (Golden Cross)",
            short, long
        ),
        Signal::Bearish => format!(
            "Bearish Signal: SMA {} below SMA {} (Death Cross)",
            short, long
        ),
        Signal::Undefined => NO_DATA_MESSAGE.to_string(),
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, analysis: &Analysis, out: &mut dyn Write) -> Result<(), NiftySmaError> {
        let short = analysis.series.windows.short();
        let long = analysis.series.windows.long();

        writeln!(out, "{}", title(analysis))?;

        let latest = match analysis.latest {
            Some(v) => v,
            None => {
                writeln!(out, "{}", NO_DATA_MESSAGE)?;
                return Ok(());
            }
        };

        let first_date = analysis.series.points.first().map_or(latest.date, |p| p.date);
        writeln!(
            out,
            "{} points, {} to {}",
            analysis.series.len(),
            first_date,
            latest.date
        )?;

        let tail = analysis.tail(self.tail_rows);
        if !tail.is_empty() {
            let short_label = format!("SMA {}", short);
            let long_label = format!("SMA {}", long);
            writeln!(out)?;
            writeln!(
                out,
                "{:<12}{:>12}{:>12}{:>12}",
                "Date", "Close", short_label, long_label
            )?;
            for p in tail {
                writeln!(
                    out,
                    "{:<12}{:>12.2}{:>12.2}{:>12.2}",
                    p.date.to_string(),
                    p.close,
                    p.sma_short,
                    p.sma_long
                )?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Latest Close: {}", self.money(latest.close))?;
        writeln!(out, "SMA {}: {}", short, self.money(latest.sma_short))?;
        writeln!(out, "SMA {}: {}", long, self.money(latest.sma_long))?;
        writeln!(out)?;
        writeln!(out, "{}", signal_line(analysis.signal, short, long))?;
        Ok(())
    }
}
