use clap::Args;
use visionquest_core::{AssessmentSimulator, Config, ExerciseKind, PatientProfile, SimulationConfig};

#[derive(Args)]
pub struct QuickArgs {
    /// Exercise to run (vergence, fusion, jump-vergence, smooth-pursuit, accommodative-rock)
    #[arg(long, default_value = "vergence")]
    exercise: ExerciseKind,
    /// Patient name (defaults to config patient.default_name)
    #[arg(long)]
    name: Option<String>,
    /// Patient age (defaults to config patient.default_age)
    #[arg(long)]
    age: Option<u32>,
    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

pub fn run(args: QuickArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let defaults = config.default_patient();
    let age = args.age.unwrap_or(defaults.age() as u32);
    let patient = PatientProfile::with_age(args.name.unwrap_or(defaults.name), age);

    let mut sim = AssessmentSimulator::new(SimulationConfig {
        seed: args.seed,
        ..SimulationConfig::default()
    });
    let session = sim.quick_session(&patient, args.exercise);

    eprintln!("Started {} training for {}!", args.exercise, patient.name);
    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}
