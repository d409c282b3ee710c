//! Model inspection and snapshot methods.

use std::collections::HashSet;

use ridge_expr::{ConstraintId, VariableId};

use crate::model::Model;
use crate::types::{Bounds, Sense, VarCategory};

/// View of a variable in a model snapshot.
#[derive(Debug, Clone)]
pub struct VariableView {
    pub id: VariableId,
    pub name: Option<String>,
    pub objective_coefficient: f64,
    pub bounds: Bounds,
    pub category: VarCategory,
    pub metadata: Option<serde_json::Value>,
}

/// View of a constraint in a model snapshot.
#[derive(Debug, Clone)]
pub struct ConstraintView {
    pub id: ConstraintId,
    pub name: Option<String>,
    pub bounds: Bounds,
    pub nnz: usize,
    pub metadata: Option<serde_json::Value>,
}

/// View of a row entry in a model snapshot.
#[derive(Debug, Clone)]
pub struct CoefficientView {
    pub constraint_id: ConstraintId,
    pub variable_id: VariableId,
    pub value: f64,
}

/// Metadata about a model snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotMetadata {
    pub sense: Sense,
    pub variables: usize,
    pub constraints: usize,
    pub entries: usize,
    pub objective_offset: f64,
}

/// A materialized snapshot of a model.
#[derive(Debug, Clone)]
pub struct ModelSnapshot {
    pub variables: Vec<VariableView>,
    pub constraints: Vec<ConstraintView>,
    pub coefficients: Option<Vec<CoefficientView>>,
    pub metadata: SnapshotMetadata,
}

/// Options for inspecting a model.
#[derive(Debug, Clone, Default)]
pub struct InspectOptions {
    pub include_coefficients: bool,
    pub variable_filter: Option<Vec<VariableId>>,
    pub constraint_filter: Option<Vec<ConstraintId>>,
}

impl Model {
    /// Inspect the model structure and return a structured snapshot.
    pub fn inspect(&self, options: InspectOptions) -> ModelSnapshot {
        let InspectOptions {
            include_coefficients,
            variable_filter,
            constraint_filter,
        } = options;

        let var_filter: Option<HashSet<VariableId>> =
            variable_filter.map(|ids| ids.into_iter().collect());
        let con_filter: Option<HashSet<ConstraintId>> =
            constraint_filter.map(|ids| ids.into_iter().collect());

        let variables = self
            .variables()
            .filter(|id| var_filter.as_ref().is_none_or(|f| f.contains(id)))
            .map(|id| VariableView {
                id,
                name: self.stored_variable_name(id).map(str::to_string),
                objective_coefficient: self.objective_coefficients()[id.index()],
                bounds: Bounds::new(
                    self.column_lower_bounds()[id.index()],
                    self.column_upper_bounds()[id.index()],
                ),
                category: self.column_categories()[id.index()],
                metadata: self.variable_metadata(id).cloned(),
            })
            .collect();

        let mut coefficients = include_coefficients.then(Vec::new);
        let mut constraints = Vec::new();
        for row in self.rows() {
            let id = row.id();
            if con_filter.as_ref().is_some_and(|f| !f.contains(&id)) {
                continue;
            }
            constraints.push(ConstraintView {
                id,
                name: self.constraint_name(id).map(str::to_string),
                bounds: row.bounds(),
                nnz: row.len(),
                metadata: self.constraint_metadata(id).cloned(),
            });
            if let Some(list) = coefficients.as_mut() {
                for term in row.terms() {
                    if var_filter.as_ref().is_some_and(|f| !f.contains(&term.var)) {
                        continue;
                    }
                    list.push(CoefficientView {
                        constraint_id: id,
                        variable_id: term.var,
                        value: term.coeff,
                    });
                }
            }
        }

        ModelSnapshot {
            variables,
            constraints,
            coefficients,
            metadata: SnapshotMetadata {
                sense: self.sense(),
                variables: self.num_variables(),
                constraints: self.num_constraints(),
                entries: self.num_entries(),
                objective_offset: self.objective_offset(),
            },
        }
    }
}
