use serde::{Deserialize, Serialize};

/// Shown when an exercise has no configured targets.
pub const DEFAULT_TARGET_GLYPH: &str = "●";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Vergence,
    Fusion,
    JumpVergence,
    SmoothPursuit,
    AccommodativeRock,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 5] = [
        ExerciseKind::Vergence,
        ExerciseKind::Fusion,
        ExerciseKind::JumpVergence,
        ExerciseKind::SmoothPursuit,
        ExerciseKind::AccommodativeRock,
    ];

    /// Human-readable label, as shown in tables and reports.
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseKind::Vergence => "Vergence",
            ExerciseKind::Fusion => "Fusion",
            ExerciseKind::JumpVergence => "Jump Vergence",
            ExerciseKind::SmoothPursuit => "Smooth Pursuit",
            ExerciseKind::AccommodativeRock => "Accommodative Rock",
        }
    }

    /// Stable key used in config files and CSV output.
    pub fn key(&self) -> &'static str {
        match self {
            ExerciseKind::Vergence => "vergence",
            ExerciseKind::Fusion => "fusion",
            ExerciseKind::JumpVergence => "jump_vergence",
            ExerciseKind::SmoothPursuit => "smooth_pursuit",
            ExerciseKind::AccommodativeRock => "accommodative_rock",
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ExerciseKind {
    type Err = String;

    /// Accepts the key, the label, or kebab-case ("jump-vergence").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        ExerciseKind::ALL
            .into_iter()
            .find(|kind| kind.key() == normalized)
            .ok_or_else(|| format!("unknown exercise: {s}"))
    }
}

/// Per-exercise configuration chosen on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSettings {
    pub kind: ExerciseKind,
    #[serde(default)]
    pub targets: Vec<String>,
}

impl ExerciseSettings {
    pub fn new(kind: ExerciseKind, targets: Vec<String>) -> Self {
        Self { kind, targets }
    }

    /// Glyph for the given frame index, cycling through the targets.
    /// An empty target list falls back to [`DEFAULT_TARGET_GLYPH`].
    pub fn target_glyph(&self, index: usize) -> &str {
        if self.targets.is_empty() {
            return DEFAULT_TARGET_GLYPH;
        }
        &self.targets[index % self.targets.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_labels_and_kebab_case() {
        assert_eq!("vergence".parse::<ExerciseKind>(), Ok(ExerciseKind::Vergence));
        assert_eq!("Jump Vergence".parse::<ExerciseKind>(), Ok(ExerciseKind::JumpVergence));
        assert_eq!("smooth-pursuit".parse::<ExerciseKind>(), Ok(ExerciseKind::SmoothPursuit));
        assert_eq!("ACCOMMODATIVE_ROCK".parse::<ExerciseKind>(), Ok(ExerciseKind::AccommodativeRock));
        assert!("pencil push-ups".parse::<ExerciseKind>().is_err());
    }

    #[test]
    fn empty_targets_fall_back_to_default_glyph() {
        let settings = ExerciseSettings::new(ExerciseKind::Fusion, Vec::new());
        assert_eq!(settings.target_glyph(0), DEFAULT_TARGET_GLYPH);
        assert_eq!(settings.target_glyph(7), DEFAULT_TARGET_GLYPH);
    }

    #[test]
    fn targets_cycle_by_index() {
        let settings =
            ExerciseSettings::new(ExerciseKind::Vergence, vec!["★".into(), "▲".into()]);
        assert_eq!(settings.target_glyph(0), "★");
        assert_eq!(settings.target_glyph(1), "▲");
        assert_eq!(settings.target_glyph(2), "★");
    }
}
