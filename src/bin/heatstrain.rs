//! Heatstrain CLI - Command-line interface for the Heatstrain engine
//!
//! Commands:
//! - compute: Replay a recorded feed and score it once (batch mode)
//! - run: Drive a monitor from feed events on stdin (streaming mode)
//! - validate: Check a user profile for fields that degrade the scores
//! - doctor: Diagnose configuration and baseline files
//! - schema: Print input and output schemas

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, Level};

use heatstrain::baseline::BaselineTracker;
use heatstrain::encoder::{HeatRiskReport, REPORT_VERSION};
use heatstrain::types::{IssueSeverity, ProfileIssue};
use heatstrain::{
    EngineConfig, FeedEvent, HeatRiskError, HeatRiskMonitor, ReportEncoder, UserProfile,
    HEATSTRAIN_VERSION, PRODUCER_NAME,
};

/// Heatstrain - On-device heat strain scoring for wearable telemetry
#[derive(Parser)]
#[command(name = "heatstrain")]
#[command(version = HEATSTRAIN_VERSION)]
#[command(about = "Score heat strain risk from wearable telemetry", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded feed and score it once (batch mode)
    Compute {
        /// User profile JSON file
        #[arg(short, long)]
        profile: PathBuf,

        /// Feed events file (use - for stdin)
        #[arg(short, long)]
        feed: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Feed format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,

        /// Engine configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Load baseline state from file
        #[arg(long)]
        load_baseline: Option<PathBuf>,

        /// Save baseline state to file after processing
        #[arg(long)]
        save_baseline: Option<PathBuf>,
    },

    /// Drive a monitor from feed events on stdin (streaming mode)
    Run {
        /// User profile JSON file
        #[arg(short, long)]
        profile: PathBuf,

        /// Engine configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Load baseline state from file
        #[arg(long)]
        load_baseline: Option<PathBuf>,

        /// Save baseline state to file on exit
        #[arg(long)]
        save_baseline: Option<PathBuf>,

        /// Flush output after each report
        #[arg(long, default_value = "true")]
        flush: bool,
    },

    /// Check a user profile for fields that degrade the scores
    Validate {
        /// User profile JSON file (use - for stdin)
        #[arg(short, long)]
        profile: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration and baseline files
    Doctor {
        /// Check engine configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Check baseline state file
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print
        #[arg(value_enum)]
        schema_type: SchemaType,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one event per line)
    Ndjson,
    /// JSON array of events
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Feed event schema
    Input,
    /// User profile schema
    Profile,
    /// Report schema (heatstrain.report.v1)
    Output,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Control lines accepted by `run` alongside feed events
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Control {
    /// Score the current state and emit a report
    Compute,
    /// Drop the held result and emit an idle report
    Reset,
    /// Advance the baseline clock
    Tick { at_ms: u64 },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StreamLine {
    Control(Control),
    Feed(FeedEvent),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

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

fn init_logging(verbose: u8, format: LogFormat) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(cli: Cli) -> Result<(), HeatstrainCliError> {
    match cli.command {
        Commands::Compute {
            profile,
            feed,
            output,
            input_format,
            output_format,
            config,
            load_baseline,
            save_baseline,
        } => cmd_compute(
            &profile,
            &feed,
            &output,
            input_format,
            output_format,
            config.as_deref(),
            load_baseline.as_deref(),
            save_baseline.as_deref(),
        ),

        Commands::Run {
            profile,
            config,
            load_baseline,
            save_baseline,
            flush,
        } => cmd_run(
            &profile,
            config.as_deref(),
            load_baseline.as_deref(),
            save_baseline.as_deref(),
            flush,
        ),

        Commands::Validate { profile, json } => cmd_validate(&profile, json),

        Commands::Doctor {
            config,
            baseline,
            json,
        } => cmd_doctor(config.as_deref(), baseline.as_deref(), json),

        Commands::Schema {
            schema_type,
            json_schema,
        } => cmd_schema(schema_type, json_schema),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_compute(
    profile: &Path,
    feed: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    config: Option<&Path>,
    load_baseline: Option<&Path>,
    save_baseline: Option<&Path>,
) -> Result<(), HeatstrainCliError> {
    let profile = UserProfile::from_json(&read_input(profile)?)?;
    let mut monitor = build_monitor(config, load_baseline)?;

    let feed_data = read_input(feed)?;
    let events = match input_format {
        InputFormat::Ndjson => parse_ndjson(&feed_data)?,
        InputFormat::Json => serde_json::from_str::<Vec<FeedEvent>>(&feed_data)?,
    };

    if events.is_empty() {
        return Err(HeatstrainCliError::NoEvents);
    }

    info!(events = events.len(), "replaying feed");
    for event in &events {
        monitor.ingest(event);
    }
    monitor.compute(&profile);

    if let Some(path) = save_baseline {
        fs::write(path, monitor.save_baseline()?)?;
    }

    let report = ReportEncoder::new().encode(&monitor.snapshot());
    let output_data = format_report(&report, &output_format)?;

    if output.to_string_lossy() == "-" {
        println!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_run(
    profile: &Path,
    config: Option<&Path>,
    load_baseline: Option<&Path>,
    save_baseline: Option<&Path>,
    flush: bool,
) -> Result<(), HeatstrainCliError> {
    let profile = UserProfile::from_json(&fs::read_to_string(profile)?)?;
    let mut monitor = build_monitor(config, load_baseline)?;
    let encoder = ReportEncoder::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let parsed: StreamLine = serde_json::from_str(trimmed).map_err(|e| {
            HeatstrainCliError::ParseError(format!("line {}: {}", index + 1, e))
        })?;

        let emit = match parsed {
            StreamLine::Feed(event) => {
                monitor.ingest(&event);
                false
            }
            StreamLine::Control(Control::Tick { at_ms }) => {
                monitor.tick(at_ms);
                false
            }
            StreamLine::Control(Control::Compute) => {
                monitor.compute(&profile);
                true
            }
            StreamLine::Control(Control::Reset) => {
                if monitor.reset().is_none() {
                    debug!("reset requested while idle");
                }
                true
            }
        };

        if emit {
            let report = encoder.encode(&monitor.snapshot());
            writeln!(stdout, "{}", serde_json::to_string(&report)?)?;
            if flush {
                stdout.flush()?;
            }
        }
    }
    stdout.flush()?;

    if let Some(path) = save_baseline {
        fs::write(path, monitor.save_baseline()?)?;
    }

    Ok(())
}

fn cmd_validate(profile: &Path, json: bool) -> Result<(), HeatstrainCliError> {
    let profile = UserProfile::from_json(&read_input(profile)?)?;
    let issues = profile.check();

    let report = ValidationReport {
        valid: profile.validate().is_ok(),
        errors: count_severity(&issues, IssueSeverity::Error),
        warnings: count_severity(&issues, IssueSeverity::Warning),
        issues,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Profile Validation");
        println!("==================");
        println!("Errors:   {}", report.errors);
        println!("Warnings: {}", report.warnings);

        if !report.issues.is_empty() {
            println!("\nIssues:");
            for issue in &report.issues {
                let tag = match issue.severity {
                    IssueSeverity::Warning => "[WARN]",
                    IssueSeverity::Error => "[ERR]",
                };
                println!("  {} {}: {}", tag, issue.field, issue.message);
            }
        }
    }

    profile.validate()?;
    Ok(())
}

fn cmd_doctor(
    config: Option<&Path>,
    baseline: Option<&Path>,
    json: bool,
) -> Result<(), HeatstrainCliError> {
    let mut checks: Vec<DoctorCheck> = vec![
        DoctorCheck::ok(
            "heatstrain_version",
            format!("Heatstrain version {}", HEATSTRAIN_VERSION),
        ),
        DoctorCheck::ok("report_version", format!("Output schema: {}", REPORT_VERSION)),
    ];

    if let Some(path) = config {
        checks.push(check_file(path, "config", |content| {
            let config = EngineConfig::from_json(content)?;
            Ok(format!(
                "Config valid (baseline refresh every {} ms)",
                config.baseline_refresh_interval_ms
            ))
        }));
    }

    if let Some(path) = baseline {
        checks.push(check_file(path, "baseline", |content| {
            let baseline = BaselineTracker::from_json(content)?.baseline();
            BaselineTracker::default().absorb(baseline)?;
            Ok(format!(
                "Baseline valid (floor {:.1} °F)",
                baseline.min_skin_temp_f
            ))
        }));
    }

    checks.push(if atty::is(atty::Stream::Stdin) {
        DoctorCheck::ok("stdin", "stdin is a TTY (interactive mode)".to_string())
    } else {
        DoctorCheck::ok("stdin", "stdin is a pipe (streaming mode ready)".to_string())
    });

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: HEATSTRAIN_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Heatstrain Doctor Report");
        println!("========================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    if report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error))
    {
        Err(HeatstrainCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType, json_schema: bool) -> Result<(), HeatstrainCliError> {
    match (schema_type, json_schema) {
        (SchemaType::Input, true) => println!("{}", input_json_schema()),
        (SchemaType::Profile, true) => println!("{}", profile_json_schema()),
        (SchemaType::Output, true) => println!("{}", output_json_schema()),
        (SchemaType::Input, false) => {
            println!("Feed events (one JSON object per line):");
            println!();
            println!("1. reading - A value published on a sensor channel");
            println!("   {{\"kind\":\"reading\",\"channel\":\"skin\",\"value\":93.4,\"at_ms\":1720000000000}}");
            println!("   channel: skin | ambient | humidity (or sensor_data/skintemp, ...)");
            println!("   value: number or numeric string; anything else is cached as NaN");
            println!();
            println!("2. error - The collector failed to read a channel");
            println!("   {{\"kind\":\"error\",\"channel\":\"skin\",\"name\":\"PERMISSION_DENIED\"}}");
            println!();
            println!("Streaming mode also accepts control lines:");
            println!("   {{\"kind\":\"compute\"}}  {{\"kind\":\"reset\"}}  {{\"kind\":\"tick\",\"at_ms\":...}}");
        }
        (SchemaType::Profile, false) => {
            println!("User profile (JSON object):");
            println!();
            println!("- age: 22, 27, 32, ... 67 (blank uses the configured default)");
            println!("- restingHR: resting heart rate in bpm (blank uses the configured default)");
            println!("- workIntensity: 1-8");
            println!("- clothing, activity, sleep: 1-5");
            println!("- obesity, diabetes, highBloodPressure, cardiovascularDisease: booleans");
            println!("- medications: comma-separated names");
        }
        (SchemaType::Output, false) => {
            println!("Output Schema: {}", REPORT_VERSION);
            println!();
            println!("- report_version, computed_at_utc");
            println!("- producer: {{ name, version, instance_id }}");
            println!("- state: idle | computed");
            println!("- sample: {{ skin_temp_f, ambient_temp_f, humidity_pct }}");
            println!("- baseline: {{ min_skin_temp_f, last_updated_at_ms }}");
            println!("- scores: {{ mpsi, heat_index_f, heat_risk_level, personal_score, final_score }}");
            println!("- assessment: colored score views and recommendations");
            println!("- quality: {{ missing_channels, baseline_established, invalid_scores }}");
        }
    }

    Ok(())
}

// Helper functions

fn read_input(path: &Path) -> Result<String, HeatstrainCliError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn build_monitor(
    config: Option<&Path>,
    load_baseline: Option<&Path>,
) -> Result<HeatRiskMonitor, HeatstrainCliError> {
    let config = match config {
        Some(path) => EngineConfig::from_json(&fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    let mut monitor = HeatRiskMonitor::with_config(config);

    if let Some(path) = load_baseline {
        monitor.load_baseline(&fs::read_to_string(path)?)?;
    }

    Ok(monitor)
}

fn parse_ndjson(data: &str) -> Result<Vec<FeedEvent>, HeatstrainCliError> {
    data.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line.trim()).map_err(|e| {
                HeatstrainCliError::ParseError(format!("line {}: {}", index + 1, e))
            })
        })
        .collect()
}

fn format_report(
    report: &HeatRiskReport,
    format: &OutputFormat,
) -> Result<String, HeatstrainCliError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string(report)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(report)?,
    })
}

fn count_severity(issues: &[ProfileIssue], severity: IssueSeverity) -> usize {
    issues.iter().filter(|i| i.severity == severity).count()
}

fn check_file(
    path: &Path,
    name: &str,
    parse: impl FnOnce(&str) -> Result<String, HeatRiskError>,
) -> DoctorCheck {
    if !path.exists() {
        return DoctorCheck {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: format!("{} does not exist", path.display()),
        };
    }

    let (status, message) = match fs::read_to_string(path) {
        Ok(content) => match parse(&content) {
            Ok(message) => (CheckStatus::Ok, message),
            Err(e) => (CheckStatus::Error, format!("Invalid {}: {}", name, e)),
        },
        Err(e) => (CheckStatus::Error, format!("Cannot read {}: {}", path.display(), e)),
    };

    DoctorCheck {
        name: name.to_string(),
        status,
        message,
    }
}

fn input_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "heatstrain.feed_event",
        "description": "Heatstrain sensor feed event",
        "oneOf": [
            {
                "type": "object",
                "required": ["kind", "channel", "value"],
                "properties": {
                    "kind": { "const": "reading" },
                    "channel": {
                        "type": "string",
                        "enum": [
                            "skin", "ambient", "humidity",
                            "sensor_data/skintemp", "sensor_data/ambtemp", "sensor_data/humidity"
                        ]
                    },
                    "value": {},
                    "at_ms": { "type": "integer", "minimum": 0 }
                }
            },
            {
                "type": "object",
                "required": ["kind", "name"],
                "properties": {
                    "kind": { "const": "error" },
                    "channel": { "type": "string" },
                    "name": { "type": "string" }
                }
            }
        ]
    })
    .to_string()
}

fn profile_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "heatstrain.user_profile",
        "type": "object",
        "properties": {
            "age": { "type": ["integer", "null"], "enum": [22, 27, 32, 37, 42, 47, 52, 57, 62, 67, 72, null] },
            "restingHR": { "type": ["integer", "null"], "minimum": 0 },
            "workIntensity": { "type": "integer", "description": "1-8; other values apply no work intensity" },
            "clothing": { "type": ["integer", "null"], "minimum": 1, "maximum": 5 },
            "activity": { "type": ["integer", "null"], "minimum": 1, "maximum": 5 },
            "sleep": { "type": ["integer", "null"], "minimum": 1, "maximum": 5 },
            "obesity": { "type": "boolean" },
            "diabetes": { "type": "boolean" },
            "highBloodPressure": { "type": "boolean" },
            "cardiovascularDisease": { "type": "boolean" },
            "medications": { "type": "string" }
        }
    })
    .to_string()
}

fn output_json_schema() -> String {
    let nullable_number = serde_json::json!({ "type": ["number", "null"] });
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": REPORT_VERSION,
        "description": "Heatstrain heat risk report",
        "type": "object",
        "required": ["report_version", "producer", "computed_at_utc", "state", "assessment", "quality"],
        "properties": {
            "report_version": { "type": "string" },
            "producer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "version": { "type": "string" },
                    "instance_id": { "type": "string" }
                }
            },
            "computed_at_utc": { "type": "string", "format": "date-time" },
            "state": { "type": "string", "enum": ["idle", "computed"] },
            "sample": {
                "type": "object",
                "properties": {
                    "skin_temp_f": nullable_number,
                    "ambient_temp_f": nullable_number,
                    "humidity_pct": nullable_number
                }
            },
            "baseline": {
                "type": "object",
                "properties": {
                    "min_skin_temp_f": { "type": "number" },
                    "last_updated_at_ms": { "type": "integer" }
                }
            },
            "scores": {
                "type": ["object", "null"],
                "properties": {
                    "mpsi": nullable_number,
                    "heat_index_f": nullable_number,
                    "heat_risk_level": { "type": ["integer", "null"], "minimum": 1, "maximum": 5 },
                    "personal_score": nullable_number,
                    "final_score": nullable_number
                }
            },
            "assessment": { "type": "object" },
            "quality": {
                "type": "object",
                "properties": {
                    "missing_channels": { "type": "array", "items": { "type": "string" } },
                    "baseline_established": { "type": "boolean" },
                    "invalid_scores": { "type": "array", "items": { "type": "string" } }
                }
            }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum HeatstrainCliError {
    Io(io::Error),
    Engine(HeatRiskError),
    Json(serde_json::Error),
    NoEvents,
    DoctorFailed,
    ParseError(String),
}

impl From<io::Error> for HeatstrainCliError {
    fn from(e: io::Error) -> Self {
        HeatstrainCliError::Io(e)
    }
}

impl From<HeatRiskError> for HeatstrainCliError {
    fn from(e: HeatRiskError) -> Self {
        HeatstrainCliError::Engine(e)
    }
}

impl From<serde_json::Error> for HeatstrainCliError {
    fn from(e: serde_json::Error) -> Self {
        HeatstrainCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<HeatstrainCliError> for CliError {
    fn from(e: HeatstrainCliError) -> Self {
        let (code, message, hint) = match e {
            HeatstrainCliError::Io(e) => ("IO_ERROR", e.to_string(), "Check file paths and permissions"),
            HeatstrainCliError::Engine(e) => {
                let (code, hint) = match &e {
                    HeatRiskError::MissingField(_) | HeatRiskError::InvalidProfile(_) => {
                        ("PROFILE_ERROR", "Run 'heatstrain validate' for details")
                    }
                    HeatRiskError::InvalidBaseline(_) => {
                        ("BASELINE_ERROR", "Run 'heatstrain doctor --baseline <file>' for details")
                    }
                    HeatRiskError::ConfigError(_) => {
                        ("CONFIG_ERROR", "Run 'heatstrain doctor --config <file>' for details")
                    }
                    HeatRiskError::UnknownChannel(_) => {
                        ("CHANNEL_ERROR", "Run 'heatstrain schema input' for channel names")
                    }
                    HeatRiskError::JsonError(_) | HeatRiskError::EncodingError(_) => {
                        ("ENCODING_ERROR", "Check JSON syntax")
                    }
                };
                (code, e.to_string(), hint)
            }
            HeatstrainCliError::Json(e) => ("JSON_ERROR", e.to_string(), "Check JSON syntax"),
            HeatstrainCliError::NoEvents => (
                "NO_EVENTS",
                "No feed events found in input".to_string(),
                "Ensure the feed file is not empty",
            ),
            HeatstrainCliError::DoctorFailed => (
                "DOCTOR_FAILED",
                "One or more health checks failed".to_string(),
                "Review the doctor report for details",
            ),
            HeatstrainCliError::ParseError(msg) => (
                "PARSE_ERROR",
                msg,
                "Run 'heatstrain schema input' for the feed format",
            ),
        };

        CliError {
            code: code.to_string(),
            message,
            hint: Some(hint.to_string()),
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    valid: bool,
    errors: usize,
    warnings: usize,
    issues: Vec<ProfileIssue>,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

impl DoctorCheck {
    fn ok(name: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message,
        }
    }
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
