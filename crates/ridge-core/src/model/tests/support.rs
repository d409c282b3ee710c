//! Shared helpers for model scenario tests.

use ridge_expr::{ConstraintId, LinearExpr, VariableId};

use crate::model::Model;
use crate::types::VarOptions;

/// The three-product plan: maximize `5a + 4b + 3c` subject to
/// `2a + 3b + c <= 5`, `4a + b + 2c <= 11`, `3a + 4b + 2c <= 8`.
pub(super) fn production_model() -> (Model, [VariableId; 3]) {
    let mut model = Model::new();
    let a = model.add_variable(VarOptions::new()).expect("variable a");
    let b = model.add_variable(VarOptions::new()).expect("variable b");
    let c = model.add_variable(VarOptions::new()).expect("variable c");

    model
        .maximize(&(a * 5.0 + b * 4.0 + c * 3.0))
        .expect("objective");
    model
        .add_constraint((a * 2.0 + b * 3.0 + c * 1.0).le_scalar(5.0))
        .expect("row 0");
    model
        .add_constraint((a * 4.0 + b * 1.0 + c * 2.0).le_scalar(11.0))
        .expect("row 1");
    model
        .add_constraint((a * 3.0 + b * 4.0 + c * 2.0).le_scalar(8.0))
        .expect("row 2");

    (model, [a, b, c])
}

/// A row's entries as plain (handle, coefficient) pairs.
pub(super) fn row_pairs(model: &Model, index: u32) -> Vec<(u32, f64)> {
    model
        .constraint(ConstraintId::new(index))
        .expect("row exists")
        .terms()
        .map(|t| (t.var.inner(), t.coeff))
        .collect()
}
