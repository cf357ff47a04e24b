//! End-to-end shaft analysis.

use serde::Serialize;
use tracing::{debug, info};

use crate::diagrams::ShaftDiagrams;
use crate::errors::DomainError;
use crate::forces::ForceSet;
use crate::reactions::ReactionSet;
use crate::shaft::ShaftSpec;
use crate::stress::StressSummary;

/// Everything derived from one [`ShaftSpec`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShaftAnalysis {
    /// Inputs that produced the results.
    pub spec: ShaftSpec,
    /// Gear mesh forces.
    pub forces: ForceSet,
    /// Bearing reactions.
    pub reactions: ReactionSet,
    /// Shear, moment, axial and torque diagrams.
    pub diagrams: ShaftDiagrams,
    /// Stresses and factors of safety at each station.
    pub stress: StressSummary,
}

/// Solve a shaft: mesh forces, reactions, diagrams and stresses.
///
/// # Errors
///
/// Returns [`DomainError`] when the inputs are not physically meaningful or the
/// resulting diagrams fail to close.
///
/// # Examples
/// ```
/// use shaftx::{solve, ShaftSpec};
///
/// let analysis = solve(&ShaftSpec::default()).expect("reference shaft solves");
/// assert_eq!(analysis.diagrams.shear_y.value_at(24.75), 0.0);
/// assert_eq!(analysis.diagrams.moment_y.jumps().len(), 1);
/// ```
pub fn solve(spec: &ShaftSpec) -> Result<ShaftAnalysis, DomainError> {
    let forces = ForceSet::derive(spec)?;
    let reactions = ReactionSet::solve(spec, &forces)?;
    let loads = reactions.station_loads(spec, &forces);
    let diagrams = ShaftDiagrams::build(&loads, spec.shaft_end)?;
    let stress = StressSummary::evaluate(spec, &diagrams);

    if let Some(critical) = stress.critical_point() {
        info!(
            station = %critical.label,
            von_mises = critical.von_mises,
            factor_of_safety = critical.yield_factor_of_safety,
            "shaft solved"
        );
    }
    debug!(stations = loads.len(), "analysis complete");

    Ok(ShaftAnalysis {
        spec: spec.clone(),
        forces,
        reactions,
        diagrams,
        stress,
    })
}
