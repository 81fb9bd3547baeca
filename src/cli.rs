//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_export::CsvExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report::TextReportAdapter;
use crate::domain::analysis::{Analysis, Selection, analyze};
use crate::domain::config_validation::{parse_count, parse_positive, validate_settings_config};
use crate::domain::dataset::Dataset;
use crate::domain::error::NiftySmaError;
use crate::domain::indicator::IndicatorWindows;
use crate::domain::settings::{CleaningMode, DEFAULT_CURRENCY, DEFAULT_TAIL_ROWS, Settings};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "niftysma",
    about = "SMA trend signals for a CSV of daily stock closes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that loads the dataset.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// INI config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Price CSV (overrides [data] path)
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Fail on the first bad row instead of dropping it
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List categories
    Categories {
        #[command(flatten)]
        data: DataArgs,
    },
    /// List stocks, optionally within one category
    Stocks {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long)]
        category: Option<String>,
    },
    /// Show moving averages and the trend signal for one stock
    Analyze {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        stock: Option<String>,
        /// Number of recent rows to show
        #[arg(long)]
        tail: Option<usize>,
        /// Also write the full enriched series as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Load the dataset and print a summary
    Check {
        #[command(flatten)]
        data: DataArgs,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Command::Categories { data } => resolve_settings(&data)
            .and_then(|s| load_dataset(&s))
            .and_then(|ds| run_categories(&ds, &mut out)),
        Command::Stocks { data, category } => resolve_settings(&data)
            .and_then(|s| load_dataset(&s))
            .and_then(|ds| run_stocks(&ds, category.as_deref(), &mut out)),
        Command::Analyze {
            data,
            category,
            stock,
            tail,
            output,
        } => resolve_settings(&data).and_then(|s| {
            let ds = load_dataset(&s)?;
            let selection = Selection::new(category.as_deref(), stock.as_deref());
            run_analyze_pipeline(&ds, &s, &selection, tail, output.as_deref(), &mut out)
                .map(|_| ())
        }),
        Command::Check { data } => resolve_settings(&data).and_then(|s| {
            let ds = load_dataset(&s)?;
            run_check(&ds, &s, &mut out)
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, NiftySmaError> {
    FileConfigAdapter::from_file(path).map_err(|e| NiftySmaError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Validates `config` and converts it to `Settings`; absent keys take defaults.
pub fn build_settings(config: &dyn ConfigPort) -> Result<Settings, NiftySmaError> {
    validate_settings_config(config)?;

    let mode = match config.get_string("data", "mode") {
        Some(m) => m.parse::<CleaningMode>().map_err(|reason| NiftySmaError::ConfigInvalid {
            section: "data".into(),
            key: "mode".into(),
            reason,
        })?,
        None => CleaningMode::default(),
    };

    let short = parse_positive(config, "indicators", "short_window")?
        .unwrap_or(IndicatorWindows::DEFAULT_SHORT);
    let long = parse_positive(config, "indicators", "long_window")?
        .unwrap_or(IndicatorWindows::DEFAULT_LONG);

    Ok(Settings {
        data_path: config
            .get_string("data", "path")
            .map(|p| PathBuf::from(p.trim())),
        mode,
        windows: IndicatorWindows::new(short, long)?,
        tail_rows: parse_count(config, "display", "tail_rows")?.unwrap_or(DEFAULT_TAIL_ROWS),
        currency: config
            .get_string("display", "currency")
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    })
}

/// Config file settings (or defaults) with command-line overrides applied.
pub fn resolve_settings(args: &DataArgs) -> Result<Settings, NiftySmaError> {
    let mut settings = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "loading config");
            build_settings(&load_config(path)?)?
        }
        None => Settings::default(),
    };

    if let Some(data) = &args.data {
        settings.data_path = Some(data.clone());
    }
    if args.strict {
        settings.mode = CleaningMode::Strict;
    }
    Ok(settings)
}

pub fn load_dataset(settings: &Settings) -> Result<Dataset, NiftySmaError> {
    let path = settings
        .data_path
        .clone()
        .ok_or_else(|| NiftySmaError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;
    Dataset::load(&CsvAdapter::new(path), settings.mode)
}

pub fn run_categories(dataset: &Dataset, out: &mut dyn Write) -> Result<(), NiftySmaError> {
    for category in dataset.categories() {
        writeln!(out, "{}", category)?;
    }
    Ok(())
}

pub fn run_stocks(
    dataset: &Dataset,
    category: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), NiftySmaError> {
    for instrument in dataset.instruments(category) {
        writeln!(out, "{}", instrument)?;
    }
    Ok(())
}

/// Analyzes one selection, prints the text report to `out` and, when
/// `export_path` is given, writes the enriched series there as CSV.
pub fn run_analyze_pipeline(
    dataset: &Dataset,
    settings: &Settings,
    selection: &Selection,
    tail: Option<usize>,
    export_path: Option<&Path>,
    out: &mut dyn Write,
) -> Result<Analysis, NiftySmaError> {
    let analysis = analyze(dataset, selection, settings.windows);
    info!(
        instrument = analysis.instrument.as_deref().unwrap_or("-"),
        points = analysis.series.len(),
        signal = %analysis.signal,
        "analysis complete"
    );

    let report = TextReportAdapter::new(&settings.currency, tail.unwrap_or(settings.tail_rows));
    report.write(&analysis, out)?;

    if let Some(path) = export_path {
        let mut file = BufWriter::new(File::create(path)?);
        CsvExportAdapter::new().write(&analysis, &mut file)?;
        file.flush()?;
        info!(path = %path.display(), "wrote enriched series");
    }

    Ok(analysis)
}

pub fn run_check(
    dataset: &Dataset,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<(), NiftySmaError> {
    writeln!(out, "mode: {}", settings.mode)?;
    writeln!(out, "records: {}", dataset.len())?;
    writeln!(out, "instruments: {}", dataset.instruments(None).len())?;
    writeln!(out, "categories: {}", dataset.categories().len())?;
    match dataset.date_range() {
        Some((min, max)) => writeln!(out, "date range: {} to {}", min, max)?,
        None => writeln!(out, "date range: none")?,
    }
    Ok(())
}
