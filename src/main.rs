extern crate scenario_reports;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use scenario_reports::output::{FileOutput, SinkOutput};
use scenario_reports::reports::strip_nulls;
use scenario_reports::{aggregate_feature_reports, FeatureReport, ReportNode, Validator};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct ReportArgs {
    /// Schema document to validate against instead of the built-in one.
    #[arg(long, global = true)]
    schema: Option<PathBuf>,
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge feature report files into one scenario report.
    Aggregate(AggregateArgs),
    /// Check a report file against a schema definition.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct AggregateArgs {
    #[arg(required = true)]
    feature_reports: Vec<PathBuf>,
    #[arg(long, default_value = "scenario")]
    scenario_id: String,
    #[arg(long)]
    scenario_name: Option<String>,
    #[arg(long, short, default_value = ".")]
    output_dir: PathBuf,
    #[arg(long, default_value = "default_scenario_report")]
    file_name: String,
    /// Aggregate and validate without writing anything.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    input_file: PathBuf,
    #[arg(long, short, default_value = "FeatureReport")]
    definition: String,
}

fn main() -> anyhow::Result<()> {
    let args = ReportArgs::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(schema_path) = &args.schema {
        Validator::install_shared(Validator::from_path(schema_path)?)?;
    }

    match args.command {
        Command::Aggregate(aggregate_args) => aggregate(aggregate_args),
        Command::Validate(validate_args) => validate(validate_args),
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    serde_json::from_reader(BufReader::new(
        File::open(path).with_context(|| format!("opening {}", path.display()))?,
    ))
    .with_context(|| format!("parsing {}", path.display()))
}

fn aggregate(args: AggregateArgs) -> anyhow::Result<()> {
    let feature_reports = args
        .feature_reports
        .iter()
        .map(|path| {
            FeatureReport::from_value(read_json(path)?)
                .with_context(|| format!("reading feature report {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let scenario_name = args
        .scenario_name
        .clone()
        .unwrap_or_else(|| args.scenario_id.clone());
    let scenario_report = aggregate_feature_reports(
        &args.scenario_id,
        &scenario_name,
        &args.output_dir.display().to_string(),
        feature_reports,
    )?;

    if args.dry_run {
        scenario_report.save_json_report(&SinkOutput, &args.file_name)?;
    } else {
        let output = FileOutput::new(args.output_dir.clone(), "{}.{}".to_string());
        scenario_report.save_json_report(&output, &args.file_name)?;
    }

    Ok(())
}

fn validate(args: ValidateArgs) -> anyhow::Result<()> {
    let value = strip_nulls(read_json(&args.input_file)?);
    let violations = Validator::shared()?.validate(&args.definition, &value);

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("{violation}");
        }
        bail!(
            "{} does not conform to {}: {} violation(s)",
            args.input_file.display(),
            args.definition,
            violations.len()
        );
    }
    info!("{} is a valid {}", args.input_file.display(), args.definition);

    Ok(())
}
