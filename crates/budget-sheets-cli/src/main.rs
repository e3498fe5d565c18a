//! Orçamento CLI - public budget dashboard in the terminal

use anyhow::{bail, Context, Result};
use budget_sheets::prelude::*;
use budget_sheets::{sheet_names, Column, CsvWriteOptions, CsvWriter};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "orcamento")]
#[command(
    author,
    version,
    about = "Currency-formatted budget tables with styled XLSX export"
)]
struct Cli {
    /// Dashboard configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every configured table with its row styles
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ShowFormat::Text)]
        format: ShowFormat,
    },

    /// Write all tables to a styled workbook
    Export {
        /// Output file (default: the configured export file name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write amounts as numbers with a currency format instead of text
        #[arg(long)]
        numbers: bool,
    },

    /// Print chart data as JSON, or the charted table
    Chart {
        /// `compare` or a single value column
        #[arg(long, default_value = "compare")]
        view: ChartView,

        /// Draw a single column as a pie chart
        #[arg(long)]
        pie: bool,

        /// Print the charted table instead of chart data
        #[arg(long, conflicts_with = "pie")]
        table: bool,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input spreadsheet file
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShowFormat {
    Text,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Show { format } => show(&load_config(cli.config.as_deref())?, format),
        Commands::Export { output, numbers } => {
            export(&load_config(cli.config.as_deref())?, output, numbers)
        }
        Commands::Chart { view, pie, table } => {
            let config = load_config(cli.config.as_deref())?;
            if table {
                chart_table(&config)
            } else {
                chart(&config, &view, pie)
            }
        }
        Commands::Sheets { input } => list_sheets(&input),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display())),
        None => Ok(DashboardConfig::default()),
    }
}

/// Load every table; failed tables are reported and skipped
fn load_dashboard(config: &DashboardConfig) -> Dashboard {
    let dashboard = Dashboard::load(config);
    for failure in &dashboard.failures {
        eprintln!("Warning: skipping '{}': {}", failure.name, failure.error);
    }
    dashboard
}

fn show(config: &DashboardConfig, format: ShowFormat) -> Result<()> {
    let dashboard = load_dashboard(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (i, section) in dashboard.sections.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        match format {
            ShowFormat::Text => write_text(&mut out, section)?,
            ShowFormat::Csv => write_csv(&mut out, section)?,
        }
    }

    if dashboard.is_empty() {
        bail!("No tables could be loaded");
    }
    Ok(())
}

fn write_text<W: Write>(out: &mut W, section: &Section) -> Result<()> {
    let palette = RowPalette::screen();
    let headers: Vec<&str> = section.table.headers().collect();

    writeln!(out, "== {} ==", section.name)?;
    writeln!(out, "{}", headers.join("\t"))?;
    for row in section.styled_rows(&palette) {
        writeln!(out, "[{}]\t{}", row.style.as_str(), row.cells.join("\t"))?;
    }
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, section: &Section) -> Result<()> {
    let mut table = section.table.to_display_table();
    let styles = section
        .table
        .row_styles()
        .iter()
        .map(|s| CellValue::text(s.as_str()))
        .collect();
    table.push_column(Column::with_kind("ESTILO", ColumnKind::Text, styles))?;

    writeln!(out, "# {}", section.name)?;
    let text = CsvWriter::write_to_string(&table, &CsvWriteOptions::default())
        .with_context(|| format!("Failed to format '{}' as CSV", section.name))?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

fn export(config: &DashboardConfig, output: Option<PathBuf>, numbers: bool) -> Result<()> {
    let dashboard = load_dashboard(config);
    if dashboard.is_empty() {
        bail!("No tables could be loaded; nothing to export");
    }

    let path = output.unwrap_or_else(|| PathBuf::from(&config.export_file_name));
    let numeric_cells = if numbers {
        NumericCells::Number
    } else {
        NumericCells::Text
    };
    let options = ExportOptions::default().with_numeric_cells(numeric_cells);

    export_to_file(&dashboard.sections, &path, &options)
        .with_context(|| format!("Failed to export '{}'", path.display()))?;

    info!(path = %path.display(), sheets = dashboard.sections.len(), "exported workbook");
    eprintln!(
        "Wrote {} sheets to '{}'",
        dashboard.sections.len(),
        path.display()
    );
    Ok(())
}

fn chart(config: &DashboardConfig, view: &ChartView, pie: bool) -> Result<()> {
    let chart_config = config
        .chart
        .as_ref()
        .ok_or(ChartViewError::NotConfigured)?;
    let chart = build_chart(chart_config, view, pie)
        .with_context(|| format!("Failed to build chart '{}'", view))?;

    let json = serde_json::to_string_pretty(&chart).context("Failed to serialize chart")?;
    println!("{}", json);
    Ok(())
}

fn chart_table(config: &DashboardConfig) -> Result<()> {
    let chart_config = config
        .chart
        .as_ref()
        .ok_or(ChartViewError::NotConfigured)?;
    let section = chart_table_section(chart_config).context("Failed to load chart table")?;

    let stdout = io::stdout();
    write_text(&mut stdout.lock(), &section)
}

fn list_sheets(input: &Path) -> Result<()> {
    let names =
        sheet_names(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    for (i, name) in names.iter().enumerate() {
        println!("{}\t{}", i, name);
    }

    Ok(())
}
