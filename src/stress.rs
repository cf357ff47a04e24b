//! Nominal stresses and factors of safety at each station of a solid round shaft.

use std::f64::consts::PI;

use serde::Serialize;

use crate::diagrams::{Diagram, Interpolation, ShaftDiagrams};
use crate::shaft::ShaftSpec;

/// Pounds per square inch in one kpsi.
const PSI_PER_KPSI: f64 = 1_000.0;

/// Stress state at one station.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StressPoint {
    /// Name of the station.
    pub label: String,
    /// Axial position in inches.
    pub position: f64,
    /// Resultant bending moment in lb-in.
    pub bending_moment: f64,
    /// Torque in lb-in.
    pub torque: f64,
    /// Axial force in pounds.
    pub axial_force: f64,
    /// Bending stress in psi.
    pub bending_stress: f64,
    /// Axial stress in psi.
    pub axial_stress: f64,
    /// Torsional shear stress in psi.
    pub shear_stress: f64,
    /// Von Mises equivalent stress in psi.
    pub von_mises: f64,
    /// Yield strength divided by the von Mises stress.
    pub yield_factor_of_safety: f64,
    /// Ultimate strength divided by the von Mises stress.
    pub ultimate_factor_of_safety: f64,
}

/// Stress state at every station and the station that governs the design.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StressSummary {
    /// One entry per station, free end first.
    pub points: Vec<StressPoint>,
    /// Index into `points` of the largest von Mises stress.
    pub critical: usize,
}

impl StressSummary {
    /// Evaluate the combined stress at each station of `spec`.
    ///
    /// Moments are linear between stations, so their extremes lie at the stations.
    /// Where a diagram jumps or steps, the larger magnitude on either side is used.
    #[must_use]
    pub fn evaluate(spec: &ShaftSpec, diagrams: &ShaftDiagrams) -> Self {
        let d = spec.shaft_diameter;
        let section_modulus = PI * d.powi(3) / 32.0;
        let polar_modulus = PI * d.powi(3) / 16.0;
        let area = PI * d.powi(2) / 4.0;
        let yield_strength = spec.yield_strength_kpsi * PSI_PER_KPSI;
        let ultimate_strength = spec.ultimate_strength_kpsi * PSI_PER_KPSI;

        let points: Vec<StressPoint> = spec
            .stations()
            .into_iter()
            .map(|(label, position)| {
                let moment_y = governing(&diagrams.moment_y, position);
                let moment_z = governing(&diagrams.moment_z, position);
                let bending_moment = moment_y.hypot(moment_z);
                let torque = governing(&diagrams.torque, position);
                let axial_force = governing(&diagrams.axial, position);

                let bending_stress = bending_moment / section_modulus;
                let axial_stress = axial_force / area;
                let shear_stress = torque / polar_modulus;
                let von_mises =
                    ((bending_stress + axial_stress).powi(2) + 3.0 * shear_stress.powi(2)).sqrt();

                StressPoint {
                    label,
                    position,
                    bending_moment,
                    torque,
                    axial_force,
                    bending_stress,
                    axial_stress,
                    shear_stress,
                    von_mises,
                    yield_factor_of_safety: factor_of_safety(yield_strength, von_mises),
                    ultimate_factor_of_safety: factor_of_safety(ultimate_strength, von_mises),
                }
            })
            .collect();

        let critical = points
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.von_mises.total_cmp(&b.von_mises))
            .map_or(0, |(index, _)| index);

        Self { points, critical }
    }

    /// Station with the largest von Mises stress.
    #[must_use]
    pub fn critical_point(&self) -> Option<&StressPoint> {
        self.points.get(self.critical)
    }
}

/// Largest magnitude of `diagram` at `position`, looking at both sides of it.
fn governing(diagram: &Diagram, position: f64) -> f64 {
    let before = diagram
        .samples()
        .iter()
        .rev()
        .find(|sample| sample.position < position)
        .map_or(0.0, |sample| sample.value.abs());
    let at = diagram
        .samples()
        .iter()
        .filter(|sample| sample.position == position)
        .map(|sample| sample.value.abs())
        .fold(0.0, f64::max);
    // Step diagrams hold the previous value up to the station.
    match diagram.interpolation() {
        Interpolation::Step => before.max(at),
        Interpolation::Linear => at,
    }
}

/// Strength over stress, unbounded for an unloaded section.
fn factor_of_safety(strength: f64, stress: f64) -> f64 {
    if stress == 0.0 {
        f64::INFINITY
    } else {
        strength / stress.abs()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::solver::solve;

    #[test]
    fn free_end_is_unstressed() {
        let spec = ShaftSpec::default();
        let analysis = solve(&spec).expect("reference shaft solves");
        let free_end = &analysis.stress.points[0];
        assert_eq!(free_end.von_mises, 0.0);
        assert!(free_end.yield_factor_of_safety.is_infinite());
    }

    #[test]
    fn critical_station_carries_the_largest_stress() {
        let spec = ShaftSpec::default();
        let analysis = solve(&spec).expect("reference shaft solves");
        let critical = analysis.stress.critical_point().expect("stations exist");
        for point in &analysis.stress.points {
            assert!(point.von_mises <= critical.von_mises);
        }
        assert_relative_eq!(
            critical.yield_factor_of_safety,
            96_000.0 / critical.von_mises,
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn torque_is_taken_from_the_loaded_side_of_a_station() {
        let spec = ShaftSpec::default();
        let analysis = solve(&spec).expect("reference shaft solves");
        // Gear C delivers a quarter of its torque inboard and the rest outboard.
        let c = &analysis.stress.points[3];
        assert_eq!(c.label, "gear C");
        assert_relative_eq!(c.torque, 0.75 * analysis.forces.torque, max_relative = 1.0e-9);
        assert_relative_eq!(
            c.shear_stress,
            16.0 * c.torque / (PI * 1.5_f64.powi(3)),
            max_relative = 1.0e-9
        );
    }

    #[test]
    fn unloaded_section_has_unbounded_factor_of_safety() {
        assert!(factor_of_safety(96_000.0, 0.0).is_infinite());
        assert_relative_eq!(factor_of_safety(96_000.0, -48_000.0), 2.0);
    }
}
