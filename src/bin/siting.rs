//! Siting Runner
//!
//! Loads a terrain image, then submits a batch of object records in order,
//! either committing the ones that pass or only reporting on them.

use clap::{Parser, ValueEnum};
use luna_siting::core::types::GridPosition;
use luna_siting::terrain::{HeightField, TerrainSummary};
use luna_siting::{
    ObjectId, ObjectRegistry, Point, SitingConfig, SitingEngine, SitingError, ValidationReport,
};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Siting Runner - validate lunar base placements against a terrain image
#[derive(Parser, Debug)]
#[command(name = "siting")]
#[command(about = "Validate infrastructure placements against a height image")]
struct Args {
    /// Grayscale height image (.jpg, .jpeg, .png, .tiff)
    #[arg(long)]
    terrain: PathBuf,

    /// JSON file holding an array of object records, submitted in order
    #[arg(long)]
    objects: Option<PathBuf>,

    /// TOML file overriding rule tables and terrain limits
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report on every record without committing any of them
    #[arg(long)]
    dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum Submission {
    Accepted { id: ObjectId },
    Rejected { message: String },
    Checked { report: ValidationReport },
}

#[derive(Serialize)]
struct RunOutput {
    terrain: TerrainSummary,
    submissions: Vec<Submission>,
    accepted: usize,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("luna_siting=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), SitingError> {
    let config = match &args.config {
        Some(path) => SitingConfig::load(path)?,
        None => SitingConfig::default(),
    };
    let engine = SitingEngine::new(config);

    let bytes = std::fs::read(&args.terrain)?;
    let filename = args.terrain.to_string_lossy();
    let field = engine.load_terrain(&bytes, &filename)?;

    let records: Vec<Value> = match &args.objects {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Vec::new(),
    };

    let mut registry = ObjectRegistry::new();
    let submissions = records
        .iter()
        .map(|record| submit(&engine, record, &mut registry, &field, args.dry_run))
        .collect();

    let output = RunOutput {
        terrain: field.summarize(),
        submissions,
        accepted: registry.len(),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Text => print_text(&output, &records, &field),
    }

    Ok(())
}

fn submit(
    engine: &SitingEngine,
    record: &Value,
    registry: &mut ObjectRegistry,
    field: &HeightField,
    dry_run: bool,
) -> Submission {
    if dry_run {
        return Submission::Checked {
            report: engine.validate_all(record, registry, field),
        };
    }

    match engine.evaluate(record, registry, field) {
        Ok(object) => Submission::Accepted {
            id: registry.insert(object),
        },
        Err(verdict) => Submission::Rejected {
            message: verdict.message,
        },
    }
}

fn print_text(output: &RunOutput, records: &[Value], field: &HeightField) {
    let dims = output.terrain.dimensions;
    let stats = output.terrain.statistics;
    println!("Terrain: {}x{}", dims.width, dims.height);
    println!(
        "Elevation: min {:.1}, max {:.1}, mean {:.2}",
        stats.min_height, stats.max_height, stats.mean_height
    );
    println!();

    for (i, (submission, record)) in output.submissions.iter().zip(records).enumerate() {
        let label = record
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("<untyped>");
        match submission {
            Submission::Accepted { id } => println!("[{}] {} accepted as ID {}", i + 1, label, id),
            Submission::Rejected { message } => {
                println!("[{}] {} rejected: {}", i + 1, label, message)
            }
            Submission::Checked { report } => {
                println!("[{}] {}: {}", i + 1, label, report.message);
                for advisory in &report.advisories {
                    println!("      note: {:?}", advisory);
                }
            }
        }

        if let Some(slope) = grid_of(record).and_then(|g| field.steepest_neighbour_slope(g)) {
            println!("      steepest neighbour slope {:.1}°", slope);
        }
    }

    println!();
    println!("{} of {} records accepted", output.accepted, records.len());
}

fn grid_of(record: &Value) -> Option<GridPosition> {
    let position = record.get("position")?;
    let x = position.get("x")?.as_f64()?;
    let y = position.get("y")?.as_f64()?;
    GridPosition::from_point(&Point::new(x, y))
}
