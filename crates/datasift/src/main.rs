//! CLI entry point for the data-quality analyzer.

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};
use datasift::reporting::format_issue_location;
use datasift::{
    AnalyzerConfig, CleaningOptions, CleaningSummary, DataCleaner, DataQualityAnalyzer, Dataset,
    IssueKind, QualityReport, export, ingest,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    author = "datasift contributors",
    version,
    about = "Data quality analysis and cleaning",
    long_about = "Find missing values, duplicate rows and outliers in CSV or JSON data, \
                  and clean them.\n\n\
                  EXAMPLES:\n  \
                  # Analyze a file\n  \
                  datasift analyze customers.csv\n\n  \
                  # Machine-readable report\n  \
                  datasift analyze customers.csv --json | jq .report.total_issues\n\n  \
                  # Remove duplicates, fill gaps and write the result\n  \
                  datasift clean customers.csv --remove-duplicates --fill-missing -o clean.csv"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Suppress progress output (only show warnings and the final result)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Minimum numeric values a column needs for outlier detection
    #[arg(long, default_value = "11", global = true)]
    min_samples: usize,

    /// Z-score beyond which a value counts as an outlier
    #[arg(long, default_value = "3.0", global = true)]
    z_threshold: f64,

    /// Output JSON to stdout instead of a human-readable summary
    ///
    /// Disables all logs so stdout only carries the JSON document.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a CSV or JSON file and list its issues
    Analyze {
        /// Path to the CSV or JSON file
        file: PathBuf,

        /// Maximum number of issues to list
        #[arg(long, default_value = "20")]
        show: usize,
    },

    /// Clean a CSV or JSON file and report what changed
    Clean(CleanArgs),
}

#[derive(Args, Debug)]
struct CleanArgs {
    /// Path to the CSV or JSON file
    file: PathBuf,

    /// Remove repeated rows, keeping the first occurrence
    #[arg(long)]
    remove_duplicates: bool,

    /// Fill missing cells with --fill-value
    #[arg(long)]
    fill_missing: bool,

    /// Text written into missing cells
    #[arg(long, default_value = datasift::DEFAULT_FILL_VALUE)]
    fill_value: String,

    /// Remove rows holding an outlier
    #[arg(long)]
    remove_outliers: bool,

    /// Write the cleaned data as CSV to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl CleanArgs {
    fn options(&self) -> CleaningOptions {
        CleaningOptions::builder()
            .remove_duplicates(self.remove_duplicates)
            .fill_missing_values(self.fill_missing)
            .fill_value(&self.fill_value)
            .remove_outliers(self.remove_outliers)
            .build()
    }
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.quiet, cli.json);

    let config = AnalyzerConfig::builder()
        .min_outlier_samples(cli.min_samples)
        .z_score_threshold(cli.z_threshold)
        .build()?;
    debug!("Analyzer configuration: {:?}", config);
    let analyzer = DataQualityAnalyzer::new(config);

    match &cli.command {
        Command::Analyze { file, show } => run_analyze(&analyzer, file, *show, cli.json),
        Command::Clean(args) => run_clean(analyzer, args, cli.json),
    }
}

fn load_dataset(analyzer: &DataQualityAnalyzer, file: &Path) -> Result<Dataset> {
    if !file.exists() {
        return Err(anyhow!("Input file not found: {}", file.display()));
    }

    info!("Loading dataset from: {}", file.display());
    let dataset = ingest::load_file(file)?.analyze(analyzer)?;
    Ok(dataset)
}

fn run_analyze(
    analyzer: &DataQualityAnalyzer,
    file: &Path,
    show: usize,
    json_output: bool,
) -> Result<()> {
    let dataset = load_dataset(analyzer, file)?;
    let report = QualityReport::from_dataset(&dataset);

    if json_output {
        let output = serde_json::json!({
            "report": report,
            "issues": dataset.issues(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_quality_report(&dataset, &report, show);
    Ok(())
}

fn run_clean(analyzer: DataQualityAnalyzer, args: &CleanArgs, json_output: bool) -> Result<()> {
    let options = args.options();
    if !options.has_any_operation() {
        return Err(anyhow!(
            "No cleaning operation selected. Use --remove-duplicates, --fill-missing or --remove-outliers."
        ));
    }

    let dataset = load_dataset(&analyzer, &args.file)?;
    let cleaner = DataCleaner::new(analyzer);
    let (cleaned, summary) = cleaner.clean_with_summary(&dataset, &options)?;

    if let Some(ref output) = args.output {
        export::write_csv(&cleaned, output)?;
    }

    if json_output {
        let output = serde_json::json!({
            "summary": summary,
            "report": QualityReport::from_dataset(&cleaned),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_cleaning_summary(&cleaned, &summary, args.output.as_deref());
    Ok(())
}

/// Print the analysis of a dataset.
///
/// Uses `println!` rather than logging: this is the command's result and
/// must show regardless of log level.
fn print_quality_report(dataset: &Dataset, report: &QualityReport, show: usize) {
    println!();
    println!("{}", "=".repeat(80));
    println!("DATA QUALITY REPORT");
    println!("{}", "=".repeat(80));
    println!();

    println!("DATASET OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  Name: {}", report.dataset_name);
    println!("  Source: {}", report.source);
    println!("  Rows: {}", report.row_count);
    println!("  Columns: {}", report.column_count);
    println!("  Completeness: {:.1}%", report.completeness * 100.0);
    println!();

    println!("ISSUES BY TYPE");
    println!("{}", "-".repeat(40));
    println!("  Missing values: {}", report.issue_counts.missing);
    println!("  Duplicate rows: {}", report.issue_counts.duplicate);
    println!("  Outliers: {}", report.issue_counts.outlier);
    println!("  Total: {}", report.total_issues);
    println!();

    if !report.columns.is_empty() {
        println!("ISSUES BY COLUMN");
        println!("{}", "-".repeat(40));
        println!("{:<24} {:<10} {:<10}", "Column", "Missing", "Outliers");
        for column in &report.columns {
            println!(
                "{:<24} {:<10} {:<10}",
                truncate_str(&column.column, 23),
                column.missing,
                column.outliers
            );
        }
        println!();
    }

    println!("ISSUES");
    println!("{}", "-".repeat(40));
    if dataset.issues().is_empty() {
        println!("  No data quality issues detected");
    } else {
        for issue in dataset.issues().iter().take(show) {
            let location = format_issue_location(issue).unwrap_or_default();
            println!("  - [{}] {} ({})", issue.kind, issue.description, location);
        }
        if dataset.issues().len() > show {
            println!("  ... and {} more", dataset.issues().len() - show);
        }
    }
    println!();
    println!("{}", "=".repeat(80));
}

/// Print what a cleaning run changed.
fn print_cleaning_summary(cleaned: &Dataset, summary: &CleaningSummary, output: Option<&Path>) {
    println!();
    println!("{}", "=".repeat(80));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!("Dataset: {}", cleaned.name());
    if let Some(output) = output {
        println!("Output:  {}", output.display());
    }
    println!();

    println!("Cleaning Summary:");
    println!("  Duration: {}ms", summary.duration_ms);
    println!(
        "  Rows: {} -> {} ({} removed)",
        summary.rows_before, summary.rows_after, summary.rows_removed
    );
    println!("  Duplicates removed: {}", summary.duplicates_removed);
    println!("  Cells filled: {}", summary.cells_filled);
    println!("  Outlier rows removed: {}", summary.outliers_removed);
    println!(
        "  Issues: {} -> {}",
        summary.issues_before, summary.issues_after
    );

    let remaining: Vec<String> = [IssueKind::Missing, IssueKind::Duplicate, IssueKind::Outlier]
        .into_iter()
        .map(|kind| (kind, cleaned.issues_of_kind(kind).count()))
        .filter(|(_, count)| *count > 0)
        .map(|(kind, count)| format!("{count} {kind}"))
        .collect();
    if !remaining.is_empty() {
        println!("  Remaining: {}", remaining.join(", "));
    }
    println!();
    println!("{}", "=".repeat(80));
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
