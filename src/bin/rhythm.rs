//! Rhythm CLI - Command-line interface for the rhythm engine
//!
//! Commands:
//! - analyze: Run the full pipeline over two CSV tables and emit a report
//! - validate: Check a CSV table against its column contract
//! - sample: Generate a synthetic demo dataset
//! - schema: Print the expected input and report formats

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rhythm_engine::ingest::{
    parse_wellbeing_csv, parse_work_csv, write_wellbeing_csv, write_work_csv,
};
use rhythm_engine::report::render_report_csv;
use rhythm_engine::sample::{default_start_date, SampleGenerator, DEFAULT_SAMPLE_DAYS};
use rhythm_engine::schema::{validate_columns, TableKind};
use rhythm_engine::session::{AnalysisReport, AnalysisSession};
use rhythm_engine::types::RhythmStatus;
use rhythm_engine::{AnalysisError, ENGINE_VERSION, PRODUCER_NAME};

/// Rhythm - compute engine for work/wellbeing rhythm analysis
#[derive(Parser)]
#[command(name = "rhythm")]
#[command(author = "Rhythm of the Machines")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Analyze work and wellbeing metrics into a rhythm report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis pipeline over two CSV tables
    Analyze {
        /// Work table CSV path (use - for stdin)
        #[arg(short, long)]
        work: PathBuf,

        /// Wellbeing table CSV path (use - for stdin)
        #[arg(short = 'b', long)]
        wellbeing: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "auto")]
        format: OutputFormat,
    },

    /// Validate a CSV table against its column contract
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Which table contract to check against
        #[arg(short, long, value_enum)]
        kind: KindArg,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a synthetic demo dataset
    Sample {
        /// Where to write the work table CSV
        #[arg(long)]
        work_out: PathBuf,

        /// Where to write the wellbeing table CSV
        #[arg(long)]
        wellbeing_out: PathBuf,

        /// Number of days to generate
        #[arg(long, default_value_t = DEFAULT_SAMPLE_DAYS)]
        days: usize,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print expected table formats
    Schema {
        /// Which format to print
        #[arg(value_enum)]
        table: SchemaTable,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Work,
    Wellbeing,
}

impl From<KindArg> for TableKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Work => TableKind::Work,
            KindArg::Wellbeing => TableKind::Wellbeing,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Text for a terminal, JSON otherwise
    Auto,
    /// Human-readable summary
    Text,
    /// Compact JSON report
    Json,
    /// Pretty-printed JSON report
    JsonPretty,
    /// Derived-report CSV (joined columns + score columns)
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaTable {
    /// Work table input format
    Work,
    /// Wellbeing table input format
    Wellbeing,
    /// Derived report output format
    Report,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RhythmCliError> {
    match cli.command {
        Commands::Analyze {
            work,
            wellbeing,
            output,
            format,
        } => cmd_analyze(&work, &wellbeing, &output, format),

        Commands::Validate { input, kind, json } => cmd_validate(&input, kind.into(), json),

        Commands::Sample {
            work_out,
            wellbeing_out,
            days,
            seed,
        } => cmd_sample(&work_out, &wellbeing_out, days, seed),

        Commands::Schema { table } => {
            cmd_schema(table);
            Ok(())
        }
    }
}

fn cmd_analyze(
    work_path: &Path,
    wellbeing_path: &Path,
    output: &Path,
    format: OutputFormat,
) -> Result<(), RhythmCliError> {
    if is_stdin(work_path) && is_stdin(wellbeing_path) {
        return Err(RhythmCliError::BothStdin);
    }

    let work = parse_work_csv(&read_input(work_path)?)?;
    let wellbeing = parse_wellbeing_csv(&read_input(wellbeing_path)?)?;

    let session = AnalysisSession::new(work, wellbeing);
    let report = session.analyze()?;

    let format = resolve_format(format, output);
    let rendered = match format {
        OutputFormat::Text => render_text_report(&report),
        OutputFormat::Json => serde_json::to_string(&report)? + "\n",
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&report)? + "\n",
        OutputFormat::Csv => render_report_csv(&report.score)?,
        // resolve_format never returns Auto
        OutputFormat::Auto => render_text_report(&report),
    };

    write_output(output, &rendered)?;
    Ok(())
}

fn cmd_validate(input: &Path, kind: TableKind, json: bool) -> Result<(), RhythmCliError> {
    let data = read_input(input)?;
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .map_err(AnalysisError::from)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let result = validate_columns(&headers, kind);
    let report = ValidationReport {
        kind: kind.as_str().to_string(),
        ok: result.is_ok(),
        message: match &result {
            Ok(()) => "Valid format".to_string(),
            Err(e) => e.to_string(),
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Table kind: {}", report.kind);
        println!("Columns:    {}", headers.join(", "));
        println!("Result:     {}", report.message);
    }

    result.map_err(RhythmCliError::from)
}

fn cmd_sample(
    work_out: &Path,
    wellbeing_out: &Path,
    days: usize,
    seed: Option<u64>,
) -> Result<(), RhythmCliError> {
    let mut generator = match seed {
        Some(seed) => SampleGenerator::with_seed(seed),
        None => SampleGenerator::new(),
    };
    let (work, wellbeing) = generator.generate(days, default_start_date());

    let work_file = fs::File::create(work_out)?;
    write_work_csv(&work, work_file)?;

    let wellbeing_file = fs::File::create(wellbeing_out)?;
    write_wellbeing_csv(&wellbeing, wellbeing_file)?;

    println!(
        "Wrote {} days of sample data to {} and {}",
        days,
        work_out.display(),
        wellbeing_out.display()
    );
    Ok(())
}

fn cmd_schema(table: SchemaTable) {
    match table {
        SchemaTable::Work => {
            println!("Work table (CSV)");
            println!();
            println!("Required columns: date, work_hours, tasks_completed");
            println!("  - date:            calendar date, YYYY-MM-DD");
            println!("  - work_hours:      non-negative real");
            println!("  - tasks_completed: non-negative integer");
            println!();
            println!("Extra columns (e.g. server_uptime) are carried into the");
            println!("derived report but ignored by the engine.");
        }
        SchemaTable::Wellbeing => {
            println!("Wellbeing table (CSV)");
            println!();
            println!("Required columns: date, mood_score, stress_level, sleep_hours");
            println!("  - date:         calendar date, YYYY-MM-DD");
            println!("  - mood_score:   real, expected range 1-10");
            println!("  - stress_level: real, expected range 1-10");
            println!("  - sleep_hours:  non-negative real");
            println!();
            println!("Extra columns are carried into the derived report but");
            println!("ignored by the engine.");
        }
        SchemaTable::Report => {
            println!("Derived report (CSV)");
            println!();
            println!("One row per joined day: the joined table's columns plus");
            println!("rhythm_score, machine_score, and human_score appended,");
            println!("with the same scalar values repeated on every row.");
        }
    }
}

// Helper functions

fn is_stdin(path: &Path) -> bool {
    path.to_string_lossy() == "-"
}

fn read_input(path: &Path) -> Result<String, RhythmCliError> {
    if is_stdin(path) {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("Reading CSV from terminal; pipe a file or press Ctrl-D to finish");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn write_output(path: &Path, data: &str) -> Result<(), RhythmCliError> {
    if is_stdin(path) {
        let mut stdout = io::stdout();
        stdout.write_all(data.as_bytes())?;
        stdout.flush()?;
        Ok(())
    } else {
        fs::write(path, data)?;
        Ok(())
    }
}

fn resolve_format(format: OutputFormat, output: &Path) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_stdin(output) && atty::is(atty::Stream::Stdout) {
                OutputFormat::Text
            } else {
                OutputFormat::Json
            }
        }
        other => other,
    }
}

fn render_text_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let score = &report.score;
    let status = RhythmStatus::classify(score.rhythm_score);

    out.push_str(&format!("{PRODUCER_NAME} report {}\n", report.report_id));
    out.push_str(&format!(
        "Period: {} to {} ({} days)\n\n",
        score.days.first().map(|d| d.date.to_string()).unwrap_or_default(),
        score.days.last().map(|d| d.date.to_string()).unwrap_or_default(),
        score.days.len()
    ));

    out.push_str(&format!(
        "Rhythm score:  {} ({})\n",
        score.rhythm_score,
        status.as_str()
    ));
    out.push_str(&format!("Machine score: {}\n", score.machine_score));
    out.push_str(&format!("Human score:   {}\n\n", score.human_score));

    out.push_str(&format!("Avg work hours: {}\n", score.avg_work_hours));
    out.push_str(&format!("Avg mood:       {}\n", score.avg_mood));
    out.push_str(&format!("Avg stress:     {}\n", score.avg_stress));
    out.push_str(&format!("Avg sleep:      {}\n", score.avg_sleep));
    match score.correlation {
        Some(correlation) => {
            out.push_str(&format!("Work/mood correlation: {correlation}\n"))
        }
        None => out.push_str("Work/mood correlation: undefined (no variance)\n"),
    }

    out.push_str("\nAnomalies:\n");
    if report.anomalies.is_empty() {
        out.push_str("  none detected\n");
    } else {
        for anomaly in &report.anomalies {
            out.push_str(&format!(
                "  [{}] {} - {}\n",
                anomaly.severity.as_str().to_uppercase(),
                anomaly.title,
                anomaly.description
            ));
        }
    }

    out.push_str("\nInsights:\n");
    for insight in &report.insights {
        out.push_str(&format!(
            "  {} ({})\n    {}\n    -> {}\n",
            insight.title,
            insight.topic.as_str(),
            insight.description,
            insight.recommendation
        ));
    }

    out
}

// Error types

#[derive(Debug)]
enum RhythmCliError {
    Io(io::Error),
    Analysis(AnalysisError),
    Json(serde_json::Error),
    BothStdin,
}

impl From<io::Error> for RhythmCliError {
    fn from(e: io::Error) -> Self {
        RhythmCliError::Io(e)
    }
}

impl From<AnalysisError> for RhythmCliError {
    fn from(e: AnalysisError) -> Self {
        RhythmCliError::Analysis(e)
    }
}

impl From<serde_json::Error> for RhythmCliError {
    fn from(e: serde_json::Error) -> Self {
        RhythmCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<RhythmCliError> for CliError {
    fn from(e: RhythmCliError) -> Self {
        match e {
            RhythmCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            RhythmCliError::Analysis(e) => {
                let (code, hint) = match &e {
                    AnalysisError::MissingColumns { kind, .. } => (
                        "SCHEMA_ERROR",
                        format!("Run 'rhythm schema {kind}' to see the expected format"),
                    ),
                    AnalysisError::UnknownKind(_) => (
                        "SCHEMA_ERROR",
                        "Table kind must be 'work' or 'wellbeing'".to_string(),
                    ),
                    AnalysisError::Csv(_) => (
                        "CSV_ERROR",
                        "Check the CSV framing (quoting, row lengths)".to_string(),
                    ),
                    AnalysisError::MalformedValue { .. } => (
                        "MALFORMED_VALUE",
                        "Fix the offending cell; numeric columns must parse as numbers".to_string(),
                    ),
                    AnalysisError::DateParse { .. } => (
                        "MALFORMED_VALUE",
                        "Dates must be formatted YYYY-MM-DD".to_string(),
                    ),
                    AnalysisError::DuplicateDate { .. } => (
                        "DUPLICATE_DATE",
                        "Each date may appear at most once per table".to_string(),
                    ),
                    AnalysisError::EmptyJoin => (
                        "EMPTY_JOIN",
                        "Ensure both tables cover at least one common date".to_string(),
                    ),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint),
                }
            }
            RhythmCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            RhythmCliError::BothStdin => CliError {
                code: "BOTH_STDIN".to_string(),
                message: "Only one of --work/--wellbeing may read from stdin".to_string(),
                hint: Some("Pass at least one table as a file path".to_string()),
            },
        }
    }
}

#[derive(serde::Serialize)]
struct ValidationReport {
    kind: String,
    ok: bool,
    message: String,
}
