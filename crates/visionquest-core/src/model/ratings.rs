use serde::{Deserialize, Serialize};

pub const MAX_THERAPIST_RATING: u8 = 100;
pub const MIN_PATIENT_RATING: u8 = 1;
pub const MAX_PATIENT_RATING: u8 = 10;

/// Six therapist sliders, each clamped to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapistRatings {
    pub fixation_stability: u8,
    pub fusion_range: u8,
    pub convergence_quality: u8,
    pub accommodation_facility: u8,
    pub binocular_coordination: u8,
    pub attention: u8,
}

impl TherapistRatings {
    /// Build from six values in slider order.
    pub fn from_values(values: [u32; 6]) -> Self {
        let [a, b, c, d, e, f] = values.map(clamp_therapist);
        Self {
            fixation_stability: a,
            fusion_range: b,
            convergence_quality: c,
            accommodation_facility: d,
            binocular_coordination: e,
            attention: f,
        }
    }

    pub fn values(&self) -> [u8; 6] {
        [
            self.fixation_stability,
            self.fusion_range,
            self.convergence_quality,
            self.accommodation_facility,
            self.binocular_coordination,
            self.attention,
        ]
    }

    pub fn mean(&self) -> f64 {
        let sum: u32 = self.values().iter().map(|&v| v as u32).sum();
        sum as f64 / 6.0
    }
}

impl Default for TherapistRatings {
    fn default() -> Self {
        Self::from_values([50; 6])
    }
}

fn clamp_therapist(value: u32) -> u8 {
    value.min(MAX_THERAPIST_RATING as u32) as u8
}

fn clamp_patient(value: u32) -> u8 {
    value.clamp(MIN_PATIENT_RATING as u32, MAX_PATIENT_RATING as u32) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    Completed,
    Partial,
    Abandoned,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
        }
    }
}

impl Completion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Completion::Completed => "completed",
            Completion::Partial => "partial",
            Completion::Abandoned => "abandoned",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "moderate" => Ok(Difficulty::Moderate),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

impl std::str::FromStr for Completion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "completed" => Ok(Completion::Completed),
            "partial" => Ok(Completion::Partial),
            "abandoned" => Ok(Completion::Abandoned),
            other => Err(format!("unknown completion status: {other}")),
        }
    }
}

/// Patient self-report after an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRatings {
    pub clarity: u8,
    pub comfort: u8,
    pub difficulty: Difficulty,
    pub completion: Completion,
}

impl PatientRatings {
    /// `clarity` and `comfort` are clamped to `1..=10`.
    pub fn new(clarity: u32, comfort: u32, difficulty: Difficulty, completion: Completion) -> Self {
        Self {
            clarity: clamp_patient(clarity),
            comfort: clamp_patient(comfort),
            difficulty,
            completion,
        }
    }
}

impl Default for PatientRatings {
    fn default() -> Self {
        Self::new(5, 5, Difficulty::Moderate, Completion::Completed)
    }
}
