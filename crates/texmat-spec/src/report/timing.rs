//! Stage timing entries.

use serde::{Deserialize, Serialize};

/// Duration of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    /// Stage name (e.g., "depth", "normal", "roughness").
    pub stage: String,
    /// Duration in milliseconds.
    pub duration_ms: u64,
}

impl StageTiming {
    /// Creates a new stage timing entry.
    ///
    /// ```
    /// use texmat_spec::report::StageTiming;
    ///
    /// let timing = StageTiming::new("normal", 42);
    /// assert_eq!(timing.stage, "normal");
    /// ```
    pub fn new(stage: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            stage: stage.into(),
            duration_ms,
        }
    }
}
