//! Solver configuration and numeric reporting policy.

use serde::{Deserialize, Serialize};

/// How the solver treats loads and supports that do not sit on a generated node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Drop the item from the analysis and log a warning.
    #[default]
    Lenient,
    /// Fail the solve with [`SolveError::OffBeam`](crate::SolveError::OffBeam).
    Strict,
}

/// Options controlling a solve and the precision of its reported values.
///
/// Missing fields take their default when deserialised, so partial
/// configurations are accepted.
///
/// # Examples
/// ```
/// use beamx::{Placement, SolverOptions};
///
/// let options: SolverOptions = serde_json::from_str(r#"{ "placement": "strict" }"#).unwrap();
/// assert_eq!(options.placement, Placement::Strict);
/// assert_eq!(options.decimals, 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Treatment of off-node loads and supports.
    pub placement: Placement,
    /// Magnitudes below this threshold are reported as exactly zero.
    pub zero_tolerance: f64,
    /// Decimal places kept for displacements, forces and reactions.
    pub decimals: u32,
    /// Decimal places kept when displaying stiffness matrices.
    pub stiffness_decimals: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            placement: Placement::Lenient,
            zero_tolerance: 1.0e-5,
            decimals: 5,
            stiffness_decimals: 1,
        }
    }
}

impl SolverOptions {
    /// Options that reject off-node items instead of dropping them.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            placement: Placement::Strict,
            ..Self::default()
        }
    }

    /// Round `value` to [`decimals`](Self::decimals) places and snap
    /// floating-point noise to zero.
    ///
    /// # Examples
    /// ```
    /// use beamx::SolverOptions;
    ///
    /// let options = SolverOptions::default();
    /// assert_eq!(options.round(1.234_567_89), 1.23457);
    /// assert_eq!(options.round(-3.0e-7), 0.0);
    /// ```
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        self.snap(round_to(value, self.decimals))
    }

    /// Replace magnitudes below [`zero_tolerance`](Self::zero_tolerance) with zero.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        if value.abs() < self.zero_tolerance {
            0.0
        } else {
            value
        }
    }

    /// Round a stiffness coefficient for display.
    #[must_use]
    pub fn round_stiffness(&self, value: f64) -> f64 {
        round_to(value, self.stiffness_decimals)
    }
}

/// Round to a fixed number of decimal places, mapping `-0.0` to `0.0`.
fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10_f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
