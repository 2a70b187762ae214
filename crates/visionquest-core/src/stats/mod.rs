//! Aggregate statistics over the session log.
//!
//! Every aggregate returns `None` on an empty log instead of failing.

mod summary;

pub use summary::{
    max_score, mean_score, measurement_delta, most_frequent_exercise, LogSummary,
    MeasurementDelta,
};
