//! Piecewise shear, axial, torque and bending-moment diagrams.
//!
//! Step diagrams hold the value just after each station ("post" interpolation).
//! Bending moments integrate the shear exactly because shear is constant between
//! stations; a concentrated couple shows up as a [`Jump`] with two samples at the
//! same position.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::errors::DomainError;
use crate::reactions::PointLoad;

/// Relative tolerance used when checking that a diagram closes.
pub const CLOSURE_TOLERANCE: f64 = 1.0e-6;

/// Transverse bending plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Plane {
    /// Loads along y.
    Xy,
    /// Loads along z.
    Xz,
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plane::Xy => f.write_str("x-y plane"),
            Plane::Xz => f.write_str("x-z plane"),
        }
    }
}

/// Physical quantity plotted by a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// Internal transverse force.
    Shear(Plane),
    /// Internal bending moment.
    BendingMoment(Plane),
    /// Internal axial force.
    Axial,
    /// Internal torque.
    Torque,
}

impl Quantity {
    /// Unit of the diagram values.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Quantity::Shear(_) | Quantity::Axial => "lb",
            Quantity::BendingMoment(_) | Quantity::Torque => "lb-in",
        }
    }

    /// How a plotter should join consecutive samples.
    #[must_use]
    pub fn interpolation(self) -> Interpolation {
        match self {
            Quantity::BendingMoment(_) => Interpolation::Linear,
            _ => Interpolation::Step,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Shear(plane) => write!(f, "shear force ({plane})"),
            Quantity::BendingMoment(plane) => write!(f, "bending moment ({plane})"),
            Quantity::Axial => f.write_str("axial force"),
            Quantity::Torque => f.write_str("torque"),
        }
    }
}

/// Rendering hint for a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Hold each value until the next sample.
    Step,
    /// Join samples with straight lines.
    Linear,
}

/// One point of a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DiagramSample {
    /// Axial position in inches.
    pub position: f64,
    /// Value of the quantity.
    pub value: f64,
}

/// Discontinuity in a linear diagram caused by a concentrated couple.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Jump {
    /// Axial position in inches.
    pub position: f64,
    /// Value immediately before the discontinuity.
    pub before: f64,
    /// Value immediately after the discontinuity.
    pub after: f64,
}

impl Jump {
    /// Signed change across the discontinuity.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.after - self.before
    }
}

/// Ordered samples of one quantity along the shaft.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagram {
    /// Quantity and plane shown.
    quantity: Quantity,
    /// How consecutive samples are joined.
    interpolation: Interpolation,
    /// Samples in order of position.
    samples: Vec<DiagramSample>,
    /// Discontinuities, each also present as two samples.
    jumps: Vec<Jump>,
}

impl Diagram {
    /// Quantity shown by this diagram.
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Rendering hint for the plotting tool.
    #[must_use]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Samples in order of position; a jump contributes two samples.
    #[must_use]
    pub fn samples(&self) -> &[DiagramSample] {
        &self.samples
    }

    /// Discontinuities of the diagram.
    #[must_use]
    pub fn jumps(&self) -> &[Jump] {
        &self.jumps
    }

    /// Largest absolute value of the diagram.
    #[must_use]
    pub fn max_abs(&self) -> f64 {
        self.samples
            .iter()
            .map(|sample| sample.value.abs())
            .fold(0.0, f64::max)
    }

    /// Evaluate the diagram at `position`.
    ///
    /// Values are right-continuous: at a station or a jump the value just after it is
    /// returned. Positions outside the sampled range evaluate to zero.
    #[must_use]
    pub fn value_at(&self, position: f64) -> f64 {
        let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) else {
            return 0.0;
        };
        if position < first.position || position > last.position {
            return 0.0;
        }
        let index = self
            .samples
            .iter()
            .rposition(|sample| sample.position <= position)
            .unwrap_or(0);
        let current = self.samples[index];
        match (self.interpolation, self.samples.get(index + 1)) {
            (Interpolation::Linear, Some(next)) if next.position > current.position => {
                let t = (position - current.position) / (next.position - current.position);
                current.value + t * (next.value - current.value)
            }
            _ => current.value,
        }
    }

    /// Step diagram holding the running sum of `contributions` after each station.
    ///
    /// `positions` has one more entry than `contributions`: the final position closes
    /// the diagram. The running sum after the last contributing station must vanish
    /// within tolerance and is then stored as exactly zero.
    fn running_sum(
        quantity: Quantity,
        positions: &[f64],
        contributions: &[f64],
    ) -> Result<Self, DomainError> {
        let scale: f64 = contributions.iter().map(|value| value.abs()).sum();
        let closing = contributions.iter().rposition(|value| *value != 0.0);

        let mut samples = Vec::with_capacity(positions.len());
        let mut total = 0.0;
        for (index, position) in positions.iter().enumerate() {
            total += contributions.get(index).copied().unwrap_or(0.0);
            let value = match closing {
                Some(closing) if index >= closing => {
                    check_closure(quantity, total, scale)?;
                    0.0
                }
                _ => total,
            };
            samples.push(DiagramSample {
                position: *position,
                value,
            });
        }

        Ok(Self {
            quantity,
            interpolation: quantity.interpolation(),
            samples,
            jumps: Vec::new(),
        })
    }

    /// Linear diagram integrating a step diagram, with jumps where `couples` is
    /// non-zero. Couples are indexed like the samples of `shear`.
    fn integrate(
        quantity: Quantity,
        shear: &Diagram,
        couples: &[f64],
        closes_at: f64,
    ) -> Result<Self, DomainError> {
        let mut samples = Vec::with_capacity(shear.samples.len() + couples.len());
        let mut jumps = Vec::new();
        let mut moment = 0.0;
        let mut scale = 0.0;
        let mut previous: Option<DiagramSample> = None;

        for (index, sample) in shear.samples.iter().enumerate() {
            if let Some(previous) = previous {
                moment += previous.value * (sample.position - previous.position);
            }
            let couple = couples.get(index).copied().unwrap_or(0.0);
            if couple != 0.0 {
                samples.push(DiagramSample {
                    position: sample.position,
                    value: moment,
                });
                let before = moment;
                moment += couple;
                jumps.push(Jump {
                    position: sample.position,
                    before,
                    after: moment,
                });
            }
            samples.push(DiagramSample {
                position: sample.position,
                value: moment,
            });
            scale = f64::max(scale, moment.abs());
            if sample.position >= closes_at {
                check_closure(quantity, moment, scale)?;
            }
            previous = Some(*sample);
        }

        Ok(Self {
            quantity,
            interpolation: quantity.interpolation(),
            samples,
            jumps,
        })
    }
}

/// Fail when `residual` is not negligible against `scale`.
fn check_closure(quantity: Quantity, residual: f64, scale: f64) -> Result<(), DomainError> {
    if residual.abs() <= CLOSURE_TOLERANCE * scale {
        Ok(())
    } else {
        Err(DomainError::Unbalanced {
            quantity: quantity.to_string(),
            residual,
        })
    }
}

/// The six diagrams of a solved shaft.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShaftDiagrams {
    /// Shear in the x-y plane.
    pub shear_y: Diagram,
    /// Shear in the x-z plane, drawn with the opposite sign to `shear_y`: the
    /// negated running sum of the z loads.
    pub shear_z: Diagram,
    /// Axial force.
    pub axial: Diagram,
    /// Torque.
    pub torque: Diagram,
    /// Bending moment in the x-y plane.
    pub moment_y: Diagram,
    /// Bending moment in the x-z plane, integrating `shear_z`.
    pub moment_z: Diagram,
}

impl ShaftDiagrams {
    /// Build every diagram from the loads of a shaft in equilibrium.
    ///
    /// `loads` must be in order of position, reactions included; the diagrams run
    /// from 0 to `shaft_end`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Unbalanced`] when a diagram does not close beyond its
    /// last load.
    pub fn build(loads: &[PointLoad], shaft_end: f64) -> Result<Self, DomainError> {
        let positions: Vec<f64> = std::iter::once(0.0)
            .chain(loads.iter().map(|load| load.position))
            .chain(std::iter::once(shaft_end))
            .collect();
        let far_bearing = loads.last().map_or(0.0, |load| load.position);

        // The free end carries no load; contributions line up with `positions`.
        let column = |component: fn(&PointLoad) -> f64| -> Vec<f64> {
            std::iter::once(0.0).chain(loads.iter().map(component)).collect()
        };

        let shear_y = Diagram::running_sum(
            Quantity::Shear(Plane::Xy),
            &positions,
            &column(|load| load.force.y),
        )?;
        let shear_z = Diagram::running_sum(
            Quantity::Shear(Plane::Xz),
            &positions,
            &column(|load| -load.force.z),
        )?;
        let axial = Diagram::running_sum(Quantity::Axial, &positions, &column(|load| load.force.x))?;
        let torque =
            Diagram::running_sum(Quantity::Torque, &positions, &column(|load| load.couple.x))?;
        let moment_y = Diagram::integrate(
            Quantity::BendingMoment(Plane::Xy),
            &shear_y,
            &column(|load| -load.couple.z),
            far_bearing,
        )?;
        let moment_z = Diagram::integrate(
            Quantity::BendingMoment(Plane::Xz),
            &shear_z,
            &column(|load| -load.couple.y),
            far_bearing,
        )?;

        debug!(
            max_shear_y = shear_y.max_abs(),
            max_shear_z = shear_z.max_abs(),
            max_moment_y = moment_y.max_abs(),
            max_moment_z = moment_z.max_abs(),
            "built shaft diagrams"
        );

        Ok(Self {
            shear_y,
            shear_z,
            axial,
            torque,
            moment_y,
            moment_z,
        })
    }

    /// All six diagrams in plotting order.
    #[must_use]
    pub fn all(&self) -> [&Diagram; 6] {
        [
            &self.shear_y,
            &self.shear_z,
            &self.axial,
            &self.moment_y,
            &self.moment_z,
            &self.torque,
        ]
    }
}
