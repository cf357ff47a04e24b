//! Vector types in shaft coordinates.
//!
//! The x axis runs along the shaft from the free end, y and z span the two
//! transverse planes. Forces are in pounds, moments in pound-inches.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Cartesian vector representing a force in pounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Force {
    /// Axial component along the shaft.
    pub x: f64,
    /// Transverse component in the x-y plane.
    pub y: f64,
    /// Transverse component in the x-z plane.
    pub z: f64,
}

impl Force {
    /// Create a [`Force`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the force into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Moment of this force about `pivot` when it acts at `point`.
    #[must_use]
    pub fn moment_about(self, point: Vector3<f64>, pivot: Vector3<f64>) -> Moment {
        (point - pivot).cross(&self.to_vector()).into()
    }
}

impl From<Vector3<f64>> for Force {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Force> for Vector3<f64> {
    fn from(value: Force) -> Self {
        value.to_vector()
    }
}

/// Cartesian vector representing a moment in pound-inches.
///
/// The x component is torque about the shaft axis; z bends the shaft in the x-y
/// plane and y bends it in the x-z plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    /// Torque about the shaft axis.
    pub x: f64,
    /// Moment about the y axis.
    pub y: f64,
    /// Moment about the z axis.
    pub z: f64,
}

impl Moment {
    /// Create a [`Moment`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the moment into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Moment {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Moment> for Vector3<f64> {
    fn from(value: Moment) -> Self {
        value.to_vector()
    }
}

/// Point on the shaft axis at `position` inches from the free end.
#[must_use]
pub fn axis_point(position: f64) -> Vector3<f64> {
    Vector3::new(position, 0.0, 0.0)
}

/// Convenience helper for creating [`Force`] instances.
///
/// # Examples
/// ```
/// use shaftx::force;
///
/// let load = force(0.0, -35.0, 0.0);
/// assert_eq!(load.y, -35.0);
/// ```
#[must_use]
pub const fn force(x: f64, y: f64, z: f64) -> Force {
    Force::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_to_vector_roundtrip() {
        let load = Force::new(1.0, 2.0, 3.0);
        let vector: Vector3<f64> = load.into();
        assert_eq!(vector, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(Force::from(vector), load);
    }

    #[test]
    fn force_defaults_to_zero() {
        assert_eq!(Force::default(), Force::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn transverse_load_bends_about_the_perpendicular_axis() {
        let load = force(0.0, 10.0, 0.0);
        let moment = load.moment_about(axis_point(4.0), axis_point(1.0));
        assert_eq!(moment, Moment::new(0.0, 0.0, 30.0));
    }

    #[test]
    fn offset_tangential_load_produces_torque() {
        let load = force(0.0, 0.0, -2.0);
        let moment = load.moment_about(Vector3::new(0.0, -5.0, 0.0), axis_point(0.0));
        assert_eq!(moment.x, 10.0);
    }
}
