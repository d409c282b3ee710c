//! Model module for building optimization models.
//!
//! The core [`Model`] type owns per-variable column arrays and per-constraint
//! rows in compressed sparse form.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Methods for adding variables, constraints, and objectives
//! - [`storage`]: Counts, per-column accessors, row views, raw contract arrays
//! - [`metadata`]: Variable and constraint naming and metadata
//! - [`lp_format`]: LP-style text rendering
//! - [`inspect`]: Model inspection and snapshots

mod builder;
mod error;
mod inspect;
mod lp_format;
mod metadata;
mod storage;

use std::collections::BTreeMap;

use ridge_expr::{ConstraintId, VariableId};

use crate::types::{Sense, VarCategory};

pub use error::ModelError;
pub use inspect::{
    CoefficientView, ConstraintView, InspectOptions, ModelSnapshot, SnapshotMetadata, VariableView,
};
pub use storage::{ObjectiveView, RowView};

/// Builder and owner of one mixed-integer linear program.
///
/// Variables and constraints are opaque integer handles into parallel
/// column arrays and CSR row storage; rows are append-only. Registration
/// failures roll the model back to its exact pre-call state.
#[derive(Debug, Clone)]
pub struct Model {
    sense: Sense,
    // Column arrays, all of length num_variables().
    pub(crate) col_objective: Vec<f64>,
    pub(crate) col_lower: Vec<f64>,
    pub(crate) col_upper: Vec<f64>,
    pub(crate) col_category: Vec<VarCategory>,
    pub(crate) col_name: Vec<Option<String>>,
    // CSR row storage; row i spans entry indices
    // [row_begins[i], row_begins[i+1]) (to num_entries() for the last row).
    pub(crate) row_begins: Vec<usize>,
    pub(crate) row_lower: Vec<f64>,
    pub(crate) row_upper: Vec<f64>,
    pub(crate) entry_vars: Vec<VariableId>,
    pub(crate) entry_coeffs: Vec<f64>,
    objective_offset: f64,
    // Duplicate-merge scratch: per variable, the registration epoch that
    // last touched it and the entry slot it wrote. Grown lazily to
    // num_variables() and reused across registrations.
    merge_epoch: u64,
    scratch_epoch: Vec<u64>,
    scratch_slot: Vec<usize>,
    // Lazy-allocated metadata storage
    pub(crate) constraint_names: Option<BTreeMap<ConstraintId, String>>,
    pub(crate) variable_metadata: Option<BTreeMap<VariableId, serde_json::Value>>,
    pub(crate) constraint_metadata: Option<BTreeMap<ConstraintId, serde_json::Value>>,
}

impl Model {
    /// Create a new empty minimization model.
    pub fn new() -> Self {
        Self::with_sense(Sense::Minimize)
    }

    /// Create a new empty model with the given optimization sense.
    pub fn with_sense(sense: Sense) -> Self {
        Self {
            sense,
            col_objective: Vec::new(),
            col_lower: Vec::new(),
            col_upper: Vec::new(),
            col_category: Vec::new(),
            col_name: Vec::new(),
            row_begins: Vec::new(),
            row_lower: Vec::new(),
            row_upper: Vec::new(),
            entry_vars: Vec::new(),
            entry_coeffs: Vec::new(),
            objective_offset: 0.0,
            merge_epoch: 0,
            scratch_epoch: Vec::new(),
            scratch_slot: Vec::new(),
            constraint_names: None,
            variable_metadata: None,
            constraint_metadata: None,
        }
    }

    /// Get the optimization sense.
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Update the optimization sense.
    pub fn set_sense(&mut self, sense: Sense) {
        self.sense = sense;
    }

    /// Constant added to the objective dot-product.
    pub fn objective_offset(&self) -> f64 {
        self.objective_offset
    }

    pub(crate) fn set_objective_offset(&mut self, offset: f64) {
        self.objective_offset = offset;
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        if id.index() < self.col_objective.len() {
            Ok(())
        } else {
            Err(ModelError::InvalidVariableId(id))
        }
    }

    pub(crate) fn ensure_constraint_exists(&self, id: ConstraintId) -> Result<(), ModelError> {
        if id.index() < self.row_begins.len() {
            Ok(())
        } else {
            Err(ModelError::InvalidConstraintId(id))
        }
    }

    /// Entry span of row `index`.
    pub(crate) fn row_span(&self, index: usize) -> (usize, usize) {
        let begin = self.row_begins[index];
        let end = self
            .row_begins
            .get(index + 1)
            .copied()
            .unwrap_or(self.entry_vars.len());
        (begin, end)
    }

    /// Start a registration epoch and size the scratch to the current
    /// column count. Epochs are never reused, so slots stamped by a rolled
    /// back registration can never alias a later row.
    pub(crate) fn begin_merge_epoch(&mut self) -> u64 {
        self.merge_epoch += 1;
        let columns = self.col_objective.len();
        if self.scratch_epoch.len() < columns {
            self.scratch_epoch.resize(columns, 0);
            self.scratch_slot.resize(columns, 0);
        }
        self.merge_epoch
    }

    /// Drop every row and entry appended at or after the given marks.
    pub(crate) fn truncate_rows(&mut self, row_mark: usize, entry_mark: usize) {
        self.row_begins.truncate(row_mark);
        self.row_lower.truncate(row_mark);
        self.row_upper.truncate(row_mark);
        self.entry_vars.truncate(entry_mark);
        self.entry_coeffs.truncate(entry_mark);
    }

    pub(crate) fn stamp_or_merge(&mut self, epoch: u64, var: VariableId, coeff: f64) {
        let column = var.index();
        if self.scratch_epoch[column] == epoch {
            self.entry_coeffs[self.scratch_slot[column]] += coeff;
        } else {
            self.scratch_epoch[column] = epoch;
            self.scratch_slot[column] = self.entry_vars.len();
            self.entry_vars.push(var);
            self.entry_coeffs.push(coeff);
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
