use std::path::PathBuf;

use clap::Args;
use visionquest_core::export::{export_csv, export_pdf};
use visionquest_core::{AssessmentSimulator, Config, LogSummary, PatientProfile, SimulationConfig};

use super::render;

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of sessions to generate
    #[arg(long, default_value = "10")]
    count: usize,
    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    /// Patient name (defaults to config patient.default_name)
    #[arg(long)]
    name: Option<String>,
    /// Patient age (defaults to config patient.default_age)
    #[arg(long)]
    age: Option<u32>,
    /// Write the log as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write a PDF report to this path
    #[arg(long)]
    pdf: Option<PathBuf>,
    /// Print the log and summary as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let defaults = config.default_patient();
    let age = args.age.unwrap_or(defaults.age() as u32);
    let patient = PatientProfile::with_age(args.name.unwrap_or(defaults.name), age);

    let mut sim = AssessmentSimulator::new(SimulationConfig {
        seed: args.seed,
        ..SimulationConfig::default()
    });
    let log = sim.fill_log(&patient, args.count);
    let summary = LogSummary::from_log(&log);

    if args.json {
        let out = serde_json::json!({ "records": log, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render::log_table(&log));
        println!();
        print!("{}", render::summary_text(&summary));
    }

    if let Some(path) = args.csv {
        match export_csv(&log, &path)? {
            Some(p) => eprintln!("csv written to {}", p.display()),
            None => eprintln!("nothing to export"),
        }
    }
    if let Some(path) = args.pdf {
        match export_pdf(&patient, &log, &path)? {
            Some(p) => eprintln!("pdf written to {}", p.display()),
            None => eprintln!("nothing to export"),
        }
    }
    Ok(())
}
