//! Per-level expected outcomes and the contrasts between them

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expected outcome under each treatment level
///
/// `control` is E[Y | do(A=0)] and `treated` is E[Y | do(A=1)]; the
/// fields are ordered by treatment level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectVector {
    /// Expected outcome with treatment withheld everywhere
    pub control: f64,
    /// Expected outcome with treatment given everywhere
    pub treated: f64,
}

impl EffectVector {
    /// Create an effect vector from per-level expected outcomes
    pub fn new(control: f64, treated: f64) -> Self {
        Self { control, treated }
    }

    /// Expected outcome for one treatment level
    pub fn expected_outcome(&self, level: u8) -> Option<f64> {
        match level {
            0 => Some(self.control),
            1 => Some(self.treated),
            _ => None,
        }
    }

    /// Both expected outcomes in level order
    pub fn as_array(&self) -> [f64; 2] {
        [self.control, self.treated]
    }

    /// Causal difference: treated minus control
    pub fn difference(&self) -> f64 {
        self.treated - self.control
    }

    /// Causal ratio: treated over control
    ///
    /// Undefined when the control mean is exactly zero.
    pub fn ratio(&self) -> Result<f64> {
        if self.control == 0.0 {
            return Err(Error::DivisionByZero(format!(
                "causal ratio with zero control mean (treated mean {})",
                self.treated
            )));
        }
        Ok(self.treated / self.control)
    }
}

impl fmt::Display for EffectVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "E[Y|do(A=0)] = {:.6}, E[Y|do(A=1)] = {:.6}",
            self.control, self.treated
        )
    }
}

/// Contrast applied to an effect vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectMeasure {
    /// Treated minus control
    Difference,
    /// Treated over control
    Ratio,
}

impl EffectMeasure {
    /// Apply the measure to an effect vector
    pub fn apply(&self, effects: &EffectVector) -> Result<f64> {
        match self {
            EffectMeasure::Difference => Ok(effects.difference()),
            EffectMeasure::Ratio => effects.ratio(),
        }
    }

    /// Human-readable measure name for logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            EffectMeasure::Difference => "causal difference",
            EffectMeasure::Ratio => "causal ratio",
        }
    }
}

impl fmt::Display for EffectMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
