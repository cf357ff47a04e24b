//! Gear mesh forces derived from transmitted power and speed.

use std::f64::consts::PI;

use nalgebra::Vector3;
use serde::Serialize;
use tracing::debug;

use crate::errors::DomainError;
use crate::geometry::{axis_point, Force, Moment};
use crate::shaft::{GearSpec, ShaftSpec, ToothForm};

/// Foot-pounds per second in one horsepower.
pub const FOOT_POUNDS_PER_SECOND_PER_HP: f64 = 550.0;
/// Inches per foot.
pub const INCHES_PER_FOOT: f64 = 12.0;
/// Largest accepted imbalance between input and output torque fractions.
const TORQUE_FRACTION_TOLERANCE: f64 = 1.0e-9;

/// Forces exerted on the shaft by one gear mesh.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeshForce {
    /// Label of the gear.
    pub label: String,
    /// Axial position in inches.
    pub position: f64,
    /// Magnitude of the tangential force in pounds.
    pub tangential: f64,
    /// Magnitude of the radial force in pounds.
    pub radial: f64,
    /// Magnitude of the axial force in pounds.
    pub axial: f64,
    /// Load the mesh transfers to the shaft axis: the axial force, the radial
    /// force toward the shaft in the x-y plane, and the radial magnitude again in
    /// the x-z plane, where every mesh pushes in the same (-z) sense.
    pub load: Force,
    /// Couple the offset mesh load applies about the shaft axis at `position`.
    pub couple: Moment,
}

impl MeshForce {
    /// Torque this mesh adds to (positive) or removes from the shaft, in lb-in.
    #[must_use]
    pub fn torque(&self) -> f64 {
        self.couple.x
    }
}

/// Forces derived once from a [`ShaftSpec`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForceSet {
    /// Transmitted power in lb-in/s.
    pub power: f64,
    /// Angular speed in rad/s.
    pub angular_speed: f64,
    /// Transmitted torque in lb-in.
    pub torque: f64,
    /// One entry per gear, in shaft order.
    pub meshes: Vec<MeshForce>,
}

impl ForceSet {
    /// Derive the mesh forces for every gear on the shaft.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the shaft fails validation or when the torque
    /// fractions delivered through the gears do not balance.
    ///
    /// # Examples
    /// ```
    /// use shaftx::{ForceSet, ShaftSpec};
    ///
    /// let forces = ForceSet::derive(&ShaftSpec::default()).expect("valid shaft");
    /// assert_eq!(forces.meshes.len(), 3);
    /// assert!(forces.meshes[0].axial > 0.0);
    /// ```
    pub fn derive(spec: &ShaftSpec) -> Result<Self, DomainError> {
        spec.validate()?;
        let power = spec.power_hp * FOOT_POUNDS_PER_SECOND_PER_HP * INCHES_PER_FOOT;
        let angular_speed = spec.speed_rpm * 2.0 * PI / 60.0;
        let torque = power / angular_speed;

        let meshes: Vec<MeshForce> = spec
            .gears
            .iter()
            .map(|gear| mesh_force(gear, power, angular_speed))
            .collect();

        let net_fraction: f64 = meshes.iter().map(MeshForce::torque).sum::<f64>() / torque;
        if net_fraction.abs() > TORQUE_FRACTION_TOLERANCE {
            return Err(DomainError::UnbalancedTorque { net_fraction });
        }

        debug!(
            power,
            angular_speed, torque, "derived transmitted torque from power and speed"
        );
        for mesh in &meshes {
            debug!(
                gear = %mesh.label,
                tangential = mesh.tangential,
                radial = mesh.radial,
                axial = mesh.axial,
                "mesh forces"
            );
        }

        Ok(Self {
            power,
            angular_speed,
            torque,
            meshes,
        })
    }

    /// Sum of the axial mesh loads in pounds.
    #[must_use]
    pub fn net_axial(&self) -> f64 {
        self.meshes.iter().map(|mesh| mesh.load.x).sum()
    }
}

/// Resolve one gear's tangential force into its components.
fn mesh_force(gear: &GearSpec, power: f64, angular_speed: f64) -> MeshForce {
    let radius = gear.pitch_radius();
    let tangential = gear.torque_fraction * power / (angular_speed * radius);
    let (axial, radial) = match gear.teeth {
        ToothForm::Helical {
            axial_ratio,
            radial_ratio,
        } => (tangential * axial_ratio, tangential * radial_ratio),
        ToothForm::Spur { pressure_angle_deg } => {
            (0.0, pressure_angle_deg.to_radians().tan() * tangential)
        }
    };

    // The radial force points from the contact side toward the shaft centre.
    let side = gear.contact.sign();
    let contact_force = Force::new(axial, -side * radial, gear.tangential.sign() * tangential);
    let contact = axis_point(gear.position) + Vector3::new(0.0, side * radius, 0.0);
    let couple = contact_force.moment_about(contact, axis_point(gear.position));
    let load = Force::new(axial, -side * radial, -radial);

    MeshForce {
        label: gear.label.clone(),
        position: gear.position,
        tangential,
        radial,
        axial,
        load,
        couple,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::shaft::{MeshSide, Sense};

    fn reference() -> ForceSet {
        ForceSet::derive(&ShaftSpec::default()).expect("reference shaft is valid")
    }

    #[test]
    fn torque_follows_from_power_and_speed() {
        let forces = reference();
        let omega = (700.0 + 1.346 * 16.0) * 2.0 * PI / 60.0;
        assert_relative_eq!(forces.power, 170.0 * 550.0 * 12.0);
        assert_relative_eq!(forces.angular_speed, omega, max_relative = 1.0e-12);
        assert_relative_eq!(forces.torque, forces.power / omega, max_relative = 1.0e-12);
    }

    #[test]
    fn helical_gear_uses_fixed_ratios() {
        let forces = reference();
        let o = &forces.meshes[0];
        let expected = forces.power / (4.0 * forces.angular_speed * 5.0);
        assert_relative_eq!(o.tangential, expected, max_relative = 1.0e-12);
        assert_relative_eq!(o.axial, o.tangential * 6.0 / 14.0, max_relative = 1.0e-12);
        assert_relative_eq!(o.radial, o.tangential * 7.0 / 14.0, max_relative = 1.0e-12);
        assert_eq!(o.load, Force::new(o.axial, o.radial, -o.radial));
    }

    #[test]
    fn spur_gears_use_pressure_angle() {
        let forces = reference();
        let tan20 = 20.0_f64.to_radians().tan();
        for mesh in &forces.meshes[1..] {
            assert_eq!(mesh.axial, 0.0);
            assert_relative_eq!(mesh.radial, tan20 * mesh.tangential, max_relative = 1.0e-12);
        }
        let c = &forces.meshes[1];
        assert_relative_eq!(
            c.tangential,
            forces.power / (forces.angular_speed * 10.0),
            max_relative = 1.0e-12
        );
        assert!(c.load.y < 0.0);
        let d = &forces.meshes[2];
        assert_relative_eq!(
            d.tangential,
            0.75 * forces.power / (forces.angular_speed * 10.0),
            max_relative = 1.0e-12
        );
        assert!(d.load.y > 0.0);
    }

    #[test]
    fn mesh_torques_carry_their_fractions() {
        let forces = reference();
        let torques: Vec<f64> = forces.meshes.iter().map(MeshForce::torque).collect();
        assert_relative_eq!(torques[0], 0.25 * forces.torque, max_relative = 1.0e-12);
        assert_relative_eq!(torques[1], -forces.torque, max_relative = 1.0e-12);
        assert_relative_eq!(torques[2], 0.75 * forces.torque, max_relative = 1.0e-12);
    }

    #[test]
    fn axial_load_at_pitch_radius_bends_the_xy_plane() {
        let forces = reference();
        let o = &forces.meshes[0];
        assert_relative_eq!(o.couple.z, o.axial * 5.0, max_relative = 1.0e-12);
        assert_eq!(o.couple.y, 0.0);
        assert_relative_eq!(forces.net_axial(), o.axial);
    }

    #[test]
    fn unbalanced_fractions_are_rejected() {
        let mut spec = ShaftSpec::default();
        spec.gears[2].torque_fraction = 0.5;
        let error = ForceSet::derive(&spec).expect_err("torque does not balance");
        match error {
            DomainError::UnbalancedTorque { net_fraction } => {
                assert_relative_eq!(net_fraction, -0.25, epsilon = 1.0e-12);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_speed_never_divides() {
        let spec = ShaftSpec {
            speed_rpm: 0.0,
            ..ShaftSpec::default()
        };
        assert_eq!(
            ForceSet::derive(&spec),
            Err(DomainError::NonPositiveSpeed { speed_rpm: 0.0 })
        );
    }

    #[test]
    fn flipping_contact_side_flips_torque() {
        let mut gear = ShaftSpec::default().gears[1].clone();
        gear.contact = MeshSide::NegativeY;
        gear.tangential = Sense::Negative;
        let mesh = mesh_force(&gear, 1000.0, 10.0);
        assert_relative_eq!(mesh.torque(), 100.0, max_relative = 1.0e-12);
        assert!(mesh.load.y > 0.0);
    }

    #[test]
    fn every_mesh_loads_the_xz_plane_with_its_radial_force() {
        let forces = reference();
        for mesh in &forces.meshes {
            assert_eq!(mesh.load.z, -mesh.radial);
        }
        let mut gear = ShaftSpec::default().gears[1].clone();
        gear.tangential = Sense::Positive;
        let mesh = mesh_force(&gear, 1000.0, 10.0);
        assert_eq!(mesh.load.z, -mesh.radial);
        assert_relative_eq!(mesh.torque(), 100.0, max_relative = 1.0e-12);
    }
}
