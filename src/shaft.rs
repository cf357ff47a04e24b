//! Input description of a gear-loaded shaft.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Direction along a transverse or axial axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    /// Along the positive axis.
    Positive,
    /// Along the negative axis.
    Negative,
}

impl Sense {
    /// Return `1.0` or `-1.0`.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Sense::Positive => 1.0,
            Sense::Negative => -1.0,
        }
    }
}

/// Side of the shaft, along y, on which a gear's teeth engage its mate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshSide {
    /// Teeth engage above the shaft axis.
    PositiveY,
    /// Teeth engage below the shaft axis.
    NegativeY,
}

impl MeshSide {
    /// Sign of the contact offset along y.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            MeshSide::PositiveY => 1.0,
            MeshSide::NegativeY => -1.0,
        }
    }
}

/// Tooth geometry that relates the tangential force to the other components.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum ToothForm {
    /// Helical teeth; axial and radial forces are fixed ratios of the tangential force.
    Helical {
        /// Axial force divided by tangential force.
        axial_ratio: f64,
        /// Radial force divided by tangential force.
        radial_ratio: f64,
    },
    /// Straight teeth; the radial force follows from the pressure angle and there is
    /// no axial force.
    Spur {
        /// Pressure angle in degrees.
        pressure_angle_deg: f64,
    },
}

/// Bearing that absorbs the axial load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bearing {
    /// Bearing nearest the free end.
    Near,
    /// Bearing at the far end of the span.
    Far,
}

/// A gear mounted on the shaft.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GearSpec {
    /// Short name used in reports and errors.
    pub label: String,
    /// Axial position in inches from the free end.
    pub position: f64,
    /// Pitch diameter in inches.
    pub pitch_diameter: f64,
    /// Concentrated weight in pounds, acting along -y.
    pub weight: f64,
    /// Share of the transmitted torque carried through this mesh.
    pub torque_fraction: f64,
    /// Tooth geometry.
    pub teeth: ToothForm,
    /// Side of the shaft where the teeth engage.
    pub contact: MeshSide,
    /// Direction of the tangential force along z.
    pub tangential: Sense,
}

impl GearSpec {
    /// Pitch radius in inches.
    #[must_use]
    pub fn pitch_radius(&self) -> f64 {
        self.pitch_diameter / 2.0
    }
}

/// Pressure angle of the spur meshes, in degrees.
pub const PRESSURE_ANGLE_DEG: f64 = 20.0;
/// Share of the transmitted torque delivered through the helical gear O.
pub const GEAR_O_TORQUE_FRACTION: f64 = 0.25;
/// Share of the transmitted torque delivered through the input gear C.
pub const GEAR_C_TORQUE_FRACTION: f64 = 1.0;
/// Share of the transmitted torque delivered through gear D.
pub const GEAR_D_TORQUE_FRACTION: f64 = 0.75;
/// Axial-to-tangential force ratio of the helical gear O.
pub const HELICAL_AXIAL_RATIO: f64 = 6.0 / 14.0;
/// Radial-to-tangential force ratio of the helical gear O.
pub const HELICAL_RADIAL_RATIO: f64 = 7.0 / 14.0;

/// Immutable description of a shaft, its supports, gears and material.
///
/// [`Default`] reproduces the reference gearbox countershaft: 170 hp at
/// 721.536 rpm through three gears between bearings at 0.5 in and 24.5 in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaftSpec {
    /// Transmitted power in horsepower.
    pub power_hp: f64,
    /// Rotational speed in revolutions per minute.
    pub speed_rpm: f64,
    /// Position of the bearing nearest the free end, in inches. Zero places it at
    /// the free end with no overhang.
    pub near_bearing: f64,
    /// Position of the far bearing, in inches.
    pub far_bearing: f64,
    /// Overall shaft length in inches; diagrams run from 0 to here.
    pub shaft_end: f64,
    /// Nominal shaft diameter in inches.
    pub shaft_diameter: f64,
    /// Gears in order of increasing position.
    pub gears: Vec<GearSpec>,
    /// Bearing that absorbs the axial load.
    pub thrust_bearing: Bearing,
    /// Ultimate tensile strength in kpsi.
    pub ultimate_strength_kpsi: f64,
    /// Yield strength in kpsi.
    pub yield_strength_kpsi: f64,
}

impl Default for ShaftSpec {
    fn default() -> Self {
        let spur = ToothForm::Spur {
            pressure_angle_deg: PRESSURE_ANGLE_DEG,
        };
        Self {
            power_hp: 170.0,
            speed_rpm: 700.0 + 1.346 * 16.0,
            near_bearing: 0.5,
            far_bearing: 24.5,
            shaft_end: 25.0,
            shaft_diameter: 1.5,
            gears: vec![
                GearSpec {
                    label: "O".to_string(),
                    position: 6.5,
                    pitch_diameter: 10.0,
                    weight: 35.0,
                    torque_fraction: GEAR_O_TORQUE_FRACTION,
                    teeth: ToothForm::Helical {
                        axial_ratio: HELICAL_AXIAL_RATIO,
                        radial_ratio: HELICAL_RADIAL_RATIO,
                    },
                    contact: MeshSide::NegativeY,
                    tangential: Sense::Negative,
                },
                GearSpec {
                    label: "C".to_string(),
                    position: 14.0,
                    pitch_diameter: 20.0,
                    weight: 35.0,
                    torque_fraction: GEAR_C_TORQUE_FRACTION,
                    teeth: spur,
                    contact: MeshSide::PositiveY,
                    tangential: Sense::Negative,
                },
                GearSpec {
                    label: "D".to_string(),
                    position: 20.0,
                    pitch_diameter: 20.0,
                    weight: 35.0,
                    torque_fraction: GEAR_D_TORQUE_FRACTION,
                    teeth: spur,
                    contact: MeshSide::NegativeY,
                    tangential: Sense::Negative,
                },
            ],
            thrust_bearing: Bearing::Far,
            ultimate_strength_kpsi: 116.0,
            yield_strength_kpsi: 96.0,
        }
    }
}

impl ShaftSpec {
    /// Position of a bearing in inches.
    #[must_use]
    pub fn bearing_position(&self, bearing: Bearing) -> f64 {
        match bearing {
            Bearing::Near => self.near_bearing,
            Bearing::Far => self.far_bearing,
        }
    }

    /// Named stations from the free end to the shaft end, in order.
    ///
    /// A near bearing at the free end replaces the free-end station.
    #[must_use]
    pub fn stations(&self) -> Vec<(String, f64)> {
        let mut stations = Vec::with_capacity(self.gears.len() + 4);
        if self.near_bearing != 0.0 {
            stations.push(("free end".to_string(), 0.0));
        }
        stations.push(("near bearing".to_string(), self.near_bearing));
        stations.extend(
            self.gears
                .iter()
                .map(|gear| (format!("gear {}", gear.label), gear.position)),
        );
        stations.push(("far bearing".to_string(), self.far_bearing));
        stations.push(("shaft end".to_string(), self.shaft_end));
        stations
    }

    /// Check that the description is physically meaningful.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] for non-finite values, non-positive speed, power,
    /// diameters or strengths, negative weights, unusable tooth forms, or stations
    /// that are not strictly increasing from the free end.
    pub fn validate(&self) -> Result<(), DomainError> {
        let scalars = [
            ("power_hp", self.power_hp),
            ("speed_rpm", self.speed_rpm),
            ("near_bearing", self.near_bearing),
            ("far_bearing", self.far_bearing),
            ("shaft_end", self.shaft_end),
            ("shaft_diameter", self.shaft_diameter),
            ("ultimate_strength_kpsi", self.ultimate_strength_kpsi),
            ("yield_strength_kpsi", self.yield_strength_kpsi),
        ];
        for (field, value) in scalars {
            require_finite(field, value)?;
        }
        if self.speed_rpm <= 0.0 {
            return Err(DomainError::NonPositiveSpeed {
                speed_rpm: self.speed_rpm,
            });
        }
        if self.power_hp <= 0.0 {
            return Err(DomainError::NonPositivePower {
                power_hp: self.power_hp,
            });
        }
        require_positive("shaft_diameter", self.shaft_diameter)?;
        require_positive("ultimate_strength_kpsi", self.ultimate_strength_kpsi)?;
        require_positive("yield_strength_kpsi", self.yield_strength_kpsi)?;
        if self.gears.is_empty() {
            return Err(DomainError::MissingGears);
        }
        for gear in &self.gears {
            validate_gear(gear)?;
        }

        let stations = self.stations();
        for pair in stations.windows(2) {
            let (previous, previous_position) = &pair[0];
            let (station, position) = &pair[1];
            if position <= previous_position {
                return Err(DomainError::NonIncreasingPositions {
                    station: station.clone(),
                    position: *position,
                    previous: previous.clone(),
                    previous_position: *previous_position,
                });
            }
        }
        Ok(())
    }
}

/// Validate the per-gear scalars and tooth form.
fn validate_gear(gear: &GearSpec) -> Result<(), DomainError> {
    require_finite(&format!("gear {} position", gear.label), gear.position)?;
    require_finite(&format!("gear {} weight", gear.label), gear.weight)?;
    require_finite(
        &format!("gear {} torque_fraction", gear.label),
        gear.torque_fraction,
    )?;
    require_positive(
        &format!("gear {} pitch_diameter", gear.label),
        gear.pitch_diameter,
    )?;
    if gear.weight < 0.0 {
        return Err(DomainError::NegativeWeight {
            gear: gear.label.clone(),
            weight: gear.weight,
        });
    }
    let invalid = |reason: String| DomainError::InvalidToothForm {
        gear: gear.label.clone(),
        reason,
    };
    match gear.teeth {
        ToothForm::Helical {
            axial_ratio,
            radial_ratio,
        } => {
            if !(axial_ratio.is_finite() && axial_ratio >= 0.0) {
                return Err(invalid(format!(
                    "axial ratio must be finite and non-negative (received {axial_ratio})"
                )));
            }
            if !(radial_ratio.is_finite() && radial_ratio >= 0.0) {
                return Err(invalid(format!(
                    "radial ratio must be finite and non-negative (received {radial_ratio})"
                )));
            }
        }
        ToothForm::Spur { pressure_angle_deg } => {
            if !(pressure_angle_deg.is_finite()
                && pressure_angle_deg >= 0.0
                && pressure_angle_deg < 90.0)
            {
                return Err(invalid(format!(
                    "pressure angle must lie in [0, 90) degrees (received {pressure_angle_deg})"
                )));
            }
        }
    }
    Ok(())
}

/// Reject NaN and infinite inputs.
fn require_finite(field: &str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonFinite {
            field: field.to_string(),
            value,
        })
    }
}

/// Reject zero and negative dimensions.
fn require_positive(field: &str, value: f64) -> Result<(), DomainError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::NonPositiveDimension {
            field: field.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shaft_is_valid() {
        let spec = ShaftSpec::default();
        spec.validate().expect("reference shaft is valid");
        assert_eq!(spec.gears.len(), 3);
        assert_eq!(spec.stations().len(), 7);
    }

    #[test]
    fn stations_run_from_free_end_to_shaft_end() {
        let positions: Vec<f64> = ShaftSpec::default()
            .stations()
            .into_iter()
            .map(|(_, position)| position)
            .collect();
        assert_eq!(positions, vec![0.0, 0.5, 6.5, 14.0, 20.0, 24.5, 25.0]);
    }

    #[test]
    fn near_bearing_may_sit_at_the_free_end() {
        let spec = ShaftSpec {
            near_bearing: 0.0,
            ..ShaftSpec::default()
        };
        assert_eq!(spec.validate(), Ok(()));
        let stations = spec.stations();
        assert_eq!(stations[0], ("near bearing".to_string(), 0.0));
        assert_eq!(stations.len(), 6);

        let behind = ShaftSpec {
            near_bearing: -0.5,
            ..ShaftSpec::default()
        };
        assert!(matches!(
            behind.validate(),
            Err(DomainError::NonIncreasingPositions { .. })
        ));
    }

    #[test]
    fn negative_speed_is_rejected() {
        let spec = ShaftSpec {
            speed_rpm: -10.0,
            ..ShaftSpec::default()
        };
        assert_eq!(
            spec.validate(),
            Err(DomainError::NonPositiveSpeed { speed_rpm: -10.0 })
        );
    }

    #[test]
    fn out_of_order_gear_is_rejected() {
        let mut spec = ShaftSpec::default();
        spec.gears[1].position = 5.0;
        let error = spec.validate().expect_err("gear C before gear O");
        assert!(matches!(
            error,
            DomainError::NonIncreasingPositions { ref station, .. } if station == "gear C"
        ));
    }

    #[test]
    fn gear_beyond_far_bearing_is_rejected() {
        let mut spec = ShaftSpec::default();
        spec.gears[2].position = 24.5;
        let error = spec.validate().expect_err("gear D on the far bearing");
        assert!(matches!(
            error,
            DomainError::NonIncreasingPositions { ref station, .. } if station == "far bearing"
        ));
    }

    #[test]
    fn negative_weight_and_diameter_are_rejected() {
        let mut spec = ShaftSpec::default();
        spec.gears[0].weight = -1.0;
        assert!(matches!(
            spec.validate(),
            Err(DomainError::NegativeWeight { .. })
        ));

        let mut spec = ShaftSpec::default();
        spec.gears[1].pitch_diameter = 0.0;
        assert!(matches!(
            spec.validate(),
            Err(DomainError::NonPositiveDimension { .. })
        ));
    }

    #[test]
    fn right_angle_pressure_angle_is_rejected() {
        let mut spec = ShaftSpec::default();
        spec.gears[1].teeth = ToothForm::Spur {
            pressure_angle_deg: 90.0,
        };
        assert!(matches!(
            spec.validate(),
            Err(DomainError::InvalidToothForm { .. })
        ));
    }

    #[test]
    fn empty_gear_list_is_rejected() {
        let spec = ShaftSpec {
            gears: Vec::new(),
            ..ShaftSpec::default()
        };
        assert_eq!(spec.validate(), Err(DomainError::MissingGears));
    }

    #[test]
    fn json_overrides_only_named_fields() {
        let spec: ShaftSpec =
            serde_json::from_str(r#"{ "power_hp": 50.0, "thrust_bearing": "near" }"#)
                .expect("partial spec parses");
        assert_eq!(spec.power_hp, 50.0);
        assert_eq!(spec.thrust_bearing, Bearing::Near);
        assert_eq!(spec.gears, ShaftSpec::default().gears);
    }

    #[test]
    fn tooth_form_is_tagged_in_json() {
        let json = serde_json::to_value(ShaftSpec::default()).expect("spec serialises");
        assert_eq!(json["gears"][0]["teeth"]["form"], "helical");
        assert_eq!(json["gears"][1]["contact"], "positive_y");
    }
}
