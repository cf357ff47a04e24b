#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod diagrams;
pub mod errors;
pub mod forces;
pub mod geometry;
pub mod reactions;
pub mod shaft;
pub mod solver;
pub mod stress;

pub use diagrams::{
    Diagram, DiagramSample, Interpolation, Jump, Plane, Quantity, ShaftDiagrams,
    CLOSURE_TOLERANCE,
};
pub use errors::DomainError;
pub use forces::{ForceSet, MeshForce};
pub use geometry::{force, Force, Moment};
pub use reactions::{PointLoad, ReactionSet};
pub use shaft::{Bearing, GearSpec, MeshSide, Sense, ShaftSpec, ToothForm};
pub use solver::{solve, ShaftAnalysis};
pub use stress::{StressPoint, StressSummary};
