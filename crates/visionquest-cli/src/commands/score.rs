use clap::Args;
use visionquest_core::{
    score_breakdown, ClinicalMeasurement, Completion, Difficulty, PatientRatings,
    TherapistRatings,
};

#[derive(Args)]
pub struct ScoreArgs {
    /// Six therapist ratings (0-100), comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    therapist: Vec<u32>,
    /// Patient clarity rating (1-10)
    #[arg(long)]
    clarity: u32,
    /// Patient comfort rating (1-10)
    #[arg(long)]
    comfort: u32,
    /// Post-exercise near point of convergence (cm)
    #[arg(long)]
    post_npc: f64,
    /// Post-exercise near point of accommodation (cm)
    #[arg(long)]
    post_npa: f64,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let values: [u32; 6] = args
        .therapist
        .as_slice()
        .try_into()
        .map_err(|_| "expected exactly six therapist ratings")?;
    let therapist = TherapistRatings::from_values(values);
    // Difficulty and completion do not enter the formula.
    let patient = PatientRatings::new(
        args.clarity,
        args.comfort,
        Difficulty::Moderate,
        Completion::Completed,
    );
    let post = ClinicalMeasurement::new(args.post_npc, args.post_npa);

    let breakdown = score_breakdown(&therapist, &patient, &post);
    println!("{}", serde_json::to_string_pretty(&breakdown)?);
    Ok(())
}
