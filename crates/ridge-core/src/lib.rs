//! Ridge core model builder: columns plus compressed sparse rows.

pub mod model;
pub mod range;
pub mod types;

pub use model::{
    CoefficientView, ConstraintView, InspectOptions, Model, ModelError, ModelSnapshot,
    ObjectiveView, RowView, SnapshotMetadata, VariableView,
};
pub use range::{ConstraintRange, VarRange};
pub use types::{Bounds, Sense, VarCategory, VarOptions};
