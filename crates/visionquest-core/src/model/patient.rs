use serde::{Deserialize, Serialize};

pub const MIN_AGE: u8 = 3;
pub const MAX_AGE: u8 = 100;

/// Patients younger than this are treated as children by default.
const ADULT_AGE: u8 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientCategory {
    Child,
    Adult,
}

impl PatientCategory {
    pub fn for_age(age: u8) -> Self {
        if age < ADULT_AGE {
            PatientCategory::Child
        } else {
            PatientCategory::Adult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatientCategory::Child => "child",
            PatientCategory::Adult => "adult",
        }
    }
}

impl std::str::FromStr for PatientCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "child" => Ok(PatientCategory::Child),
            "adult" => Ok(PatientCategory::Adult),
            other => Err(format!("unknown patient category: {other}")),
        }
    }
}

/// Display identity of the patient. No persistence, no identity beyond the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub name: String,
    age: u8,
    pub category: PatientCategory,
}

impl PatientProfile {
    /// Build a profile, clamping `age` into `MIN_AGE..=MAX_AGE`.
    pub fn new(name: impl Into<String>, age: u32, category: PatientCategory) -> Self {
        Self {
            name: name.into(),
            age: age.clamp(MIN_AGE as u32, MAX_AGE as u32) as u8,
            category,
        }
    }

    /// Build a profile whose category is derived from the (clamped) age.
    pub fn with_age(name: impl Into<String>, age: u32) -> Self {
        let clamped = age.clamp(MIN_AGE as u32, MAX_AGE as u32) as u8;
        Self::new(name, clamped as u32, PatientCategory::for_age(clamped))
    }

    pub fn age(&self) -> u8 {
        self.age
    }
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self::with_age("John Doe", 8)
    }
}
