//! Bearing reactions from global force and moment equilibrium.

use nalgebra::Vector3;
use serde::Serialize;
use tracing::debug;

use crate::errors::DomainError;
use crate::forces::ForceSet;
use crate::geometry::{axis_point, Force, Moment};
use crate::shaft::{Bearing, ShaftSpec};

/// A concentrated load acting at one station along the shaft.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointLoad {
    /// Name of the station.
    pub label: String,
    /// Axial position in inches.
    pub position: f64,
    /// Force applied on the shaft axis, in pounds.
    pub force: Force,
    /// Concentrated couple applied at the station, in lb-in.
    pub couple: Moment,
}

/// Gear loads (mesh force plus weight) in shaft order.
#[must_use]
pub fn applied_loads(spec: &ShaftSpec, forces: &ForceSet) -> Vec<PointLoad> {
    spec.gears
        .iter()
        .zip(&forces.meshes)
        .map(|(gear, mesh)| PointLoad {
            label: format!("gear {}", gear.label),
            position: gear.position,
            force: Force::new(mesh.load.x, mesh.load.y - gear.weight, mesh.load.z),
            couple: mesh.couple,
        })
        .collect()
}

/// Reactions at the two bearings.
///
/// Bearings resist transverse load in both planes; only the thrust bearing resists
/// axial load and neither resists torque.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReactionSet {
    /// Reaction at the bearing nearest the free end.
    pub near: Force,
    /// Reaction at the far bearing.
    pub far: Force,
}

impl ReactionSet {
    /// Solve the reactions for the loads described by `forces`.
    ///
    /// In each transverse plane the moment balance about the near bearing gives the
    /// far reaction, including the concentrated couples of offset axial loads; force
    /// balance then gives the near reaction.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when `spec` fails validation or `forces` does not hold
    /// one mesh per gear.
    pub fn solve(spec: &ShaftSpec, forces: &ForceSet) -> Result<Self, DomainError> {
        spec.validate()?;
        if spec.gears.len() != forces.meshes.len() {
            return Err(DomainError::MeshCountMismatch {
                gears: spec.gears.len(),
                meshes: forces.meshes.len(),
            });
        }
        let loads = applied_loads(spec, forces);
        let span = spec.far_bearing - spec.near_bearing;

        let mut moment_y = 0.0;
        let mut moment_z = 0.0;
        let mut total = Force::default();
        for load in &loads {
            let arm = load.position - spec.near_bearing;
            // A couple about z bends the x-y plane opposite to a couple about y in x-z.
            moment_y += load.force.y * arm + load.couple.z;
            moment_z += load.force.z * arm - load.couple.y;
            total = (total.to_vector() + load.force.to_vector()).into();
        }

        let far_y = -moment_y / span;
        let far_z = -moment_z / span;
        let near_y = -total.y - far_y;
        let near_z = -total.z - far_z;

        let thrust = -total.x;
        let (near_x, far_x) = match spec.thrust_bearing {
            Bearing::Near => (thrust, 0.0),
            Bearing::Far => (0.0, thrust),
        };

        let reactions = Self {
            near: Force::new(near_x, near_y, near_z),
            far: Force::new(far_x, far_y, far_z),
        };
        debug!(near = ?reactions.near, far = ?reactions.far, "solved bearing reactions");
        Ok(reactions)
    }

    /// Every load on the shaft, reactions included, in order of position.
    #[must_use]
    pub fn station_loads(&self, spec: &ShaftSpec, forces: &ForceSet) -> Vec<PointLoad> {
        let mut loads = Vec::with_capacity(spec.gears.len() + 2);
        loads.push(PointLoad {
            label: "near bearing".to_string(),
            position: spec.near_bearing,
            force: self.near,
            couple: Moment::default(),
        });
        loads.extend(applied_loads(spec, forces));
        loads.push(PointLoad {
            label: "far bearing".to_string(),
            position: spec.far_bearing,
            force: self.far,
            couple: Moment::default(),
        });
        loads
    }

    /// Net force and net moment about `pivot` (inches from the free end) of every
    /// load on the shaft. Both vanish when the shaft is in equilibrium.
    #[must_use]
    pub fn residual(&self, spec: &ShaftSpec, forces: &ForceSet, pivot: f64) -> (Force, Moment) {
        let pivot = axis_point(pivot);
        let mut net_force = Vector3::<f64>::zeros();
        let mut net_moment = Vector3::<f64>::zeros();
        for load in self.station_loads(spec, forces) {
            net_force += load.force.to_vector();
            net_moment += load
                .force
                .moment_about(axis_point(load.position), pivot)
                .to_vector()
                + load.couple.to_vector();
        }
        (net_force.into(), net_moment.into())
    }
}
