//! The single persisted setting: the profile sampling step.

use serde::{Deserialize, Serialize};

/// Default sampling step in mesh coordinate units.
pub const DEFAULT_STEP: f64 = 0.5;

/// User configuration persisted by the host between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Arc-length distance between samples along the profile line.
    #[serde(default = "default_step")]
    pub step: f64,
}

impl ProfileConfig {
    /// Create a configuration with an explicit step.
    pub fn new(step: f64) -> Self {
        Self { step }
    }

    /// Check whether the step can drive a computation.
    pub fn is_valid(&self) -> bool {
        self.step > 0.0 && self.step.is_finite()
    }

    /// The configured step, or the default when invalid.
    pub fn step_or_default(&self) -> f64 {
        if self.is_valid() {
            self.step
        } else {
            DEFAULT_STEP
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self { step: DEFAULT_STEP }
    }
}

fn default_step() -> f64 {
    DEFAULT_STEP
}
