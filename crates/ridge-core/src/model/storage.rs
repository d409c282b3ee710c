//! Counts, per-column accessors, row views, and the raw read contract
//! handed to backend adapters.

use ridge_expr::{ConstraintId, LinearExpr, Term, VariableId};

use crate::model::error::ModelError;
use crate::model::Model;
use crate::types::{Bounds, VarCategory};

/// Lazy view over one constraint row's span of the shared entry arrays.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    id: ConstraintId,
    vars: &'a [VariableId],
    coeffs: &'a [f64],
    lower: f64,
    upper: f64,
}

impl RowView<'_> {
    pub fn id(&self) -> ConstraintId {
        self.id
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.lower, self.upper)
    }

    /// Number of stored entries in this row.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate the row's (variable, coefficient) entries.
    pub fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.vars
            .iter()
            .zip(self.coeffs)
            .map(|(var, coeff)| Term::new(*var, *coeff))
    }
}

/// Non-materializing view of the objective: one term per column.
#[derive(Debug, Clone, Copy)]
pub struct ObjectiveView<'a> {
    coefficients: &'a [f64],
    offset: f64,
}

impl ObjectiveView<'_> {
    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl LinearExpr for ObjectiveView<'_> {
    fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.coefficients
            .iter()
            .enumerate()
            .map(|(column, coeff)| Term::new(VariableId::new(column as u32), *coeff))
    }

    fn constant(&self) -> f64 {
        self.offset
    }
}

impl Model {
    // ── Counts ──────────────────────────────────────────────

    /// Number of variables (columns).
    pub fn num_variables(&self) -> usize {
        self.col_objective.len()
    }

    /// Number of constraints (rows).
    pub fn num_constraints(&self) -> usize {
        self.row_begins.len()
    }

    /// Number of stored row entries.
    pub fn num_entries(&self) -> usize {
        self.entry_vars.len()
    }

    // ── Per-variable accessors ──────────────────────────────

    pub fn objective_coefficient(&self, id: VariableId) -> Result<f64, ModelError> {
        self.ensure_variable_exists(id)?;
        Ok(self.col_objective[id.index()])
    }

    pub fn lower_bound(&self, id: VariableId) -> Result<f64, ModelError> {
        self.ensure_variable_exists(id)?;
        Ok(self.col_lower[id.index()])
    }

    pub fn upper_bound(&self, id: VariableId) -> Result<f64, ModelError> {
        self.ensure_variable_exists(id)?;
        Ok(self.col_upper[id.index()])
    }

    pub fn variable_bounds(&self, id: VariableId) -> Result<Bounds, ModelError> {
        self.ensure_variable_exists(id)?;
        Ok(Bounds::new(self.col_lower[id.index()], self.col_upper[id.index()]))
    }

    pub fn category(&self, id: VariableId) -> Result<VarCategory, ModelError> {
        self.ensure_variable_exists(id)?;
        Ok(self.col_category[id.index()])
    }

    // ── Per-constraint accessors ────────────────────────────

    /// View one row's bounds and entry span.
    pub fn constraint(&self, id: ConstraintId) -> Result<RowView<'_>, ModelError> {
        self.ensure_constraint_exists(id)?;
        let (begin, end) = self.row_span(id.index());
        Ok(RowView {
            id,
            vars: &self.entry_vars[begin..end],
            coeffs: &self.entry_coeffs[begin..end],
            lower: self.row_lower[id.index()],
            upper: self.row_upper[id.index()],
        })
    }

    pub fn constraint_bounds(&self, id: ConstraintId) -> Result<Bounds, ModelError> {
        self.ensure_constraint_exists(id)?;
        Ok(Bounds::new(self.row_lower[id.index()], self.row_upper[id.index()]))
    }

    // ── Whole-model views ───────────────────────────────────

    /// All variable handles in creation order.
    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        (0..self.num_variables()).map(|i| VariableId::new(i as u32))
    }

    /// All constraint handles in creation order.
    pub fn constraint_ids(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        (0..self.num_constraints()).map(|i| ConstraintId::new(i as u32))
    }

    /// All rows as lazy views.
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        (0..self.num_constraints()).map(move |index| {
            let (begin, end) = self.row_span(index);
            RowView {
                id: ConstraintId::new(index as u32),
                vars: &self.entry_vars[begin..end],
                coeffs: &self.entry_coeffs[begin..end],
                lower: self.row_lower[index],
                upper: self.row_upper[index],
            }
        })
    }

    /// The objective as an expression-like view over the columns.
    pub fn objective(&self) -> ObjectiveView<'_> {
        ObjectiveView {
            coefficients: &self.col_objective,
            offset: self.objective_offset(),
        }
    }

    // ── Raw contract arrays for backend adapters ────────────

    pub fn objective_coefficients(&self) -> &[f64] {
        &self.col_objective
    }

    pub fn column_lower_bounds(&self) -> &[f64] {
        &self.col_lower
    }

    pub fn column_upper_bounds(&self) -> &[f64] {
        &self.col_upper
    }

    pub fn column_categories(&self) -> &[VarCategory] {
        &self.col_category
    }

    pub fn column_names(&self) -> &[Option<String>] {
        &self.col_name
    }

    pub fn row_begins(&self) -> &[usize] {
        &self.row_begins
    }

    pub fn row_lower_bounds(&self) -> &[f64] {
        &self.row_lower
    }

    pub fn row_upper_bounds(&self) -> &[f64] {
        &self.row_upper
    }

    pub fn entry_variables(&self) -> &[VariableId] {
        &self.entry_vars
    }

    pub fn entry_coefficients(&self) -> &[f64] {
        &self.entry_coeffs
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::VarOptions;
    use ridge_expr::LinearExpr as _;

    #[test]
    fn row_view_exposes_span_and_bounds() {
        let mut model = Model::new();
        let x = model.add_variable(VarOptions::new()).unwrap();
        let y = model.add_variable(VarOptions::new()).unwrap();
        let c = model
            .add_constraint((x * 2.0 + y * 3.0).le_scalar(6.0))
            .unwrap();

        let row = model.constraint(c).unwrap();
        assert_eq!(row.id(), c);
        assert_eq!(row.len(), 2);
        assert_eq!(row.upper_bound(), 6.0);
        let coeffs: Vec<f64> = row.terms().map(|t| t.coeff).collect();
        assert_eq!(coeffs, vec![2.0, 3.0]);
    }

    #[test]
    fn reading_an_unknown_constraint_fails() {
        let model = Model::new();
        assert!(model.constraint(ConstraintId::new(0)).is_err());
    }

    #[test]
    fn whole_model_views_walk_creation_order() {
        let mut model = Model::new();
        model.add_variables(3, VarOptions::new()).unwrap();
        let handles: Vec<u32> = model.variables().map(VariableId::inner).collect();
        assert_eq!(handles, vec![0, 1, 2]);
    }

    #[test]
    fn objective_view_is_expression_like() {
        let mut model = Model::new();
        let x = model.add_variable(VarOptions::new()).unwrap();
        let y = model.add_variable(VarOptions::new()).unwrap();
        model.set_objective(&(x * 2.0 + y * 1.0 + 4.0)).unwrap();

        let objective = model.objective();
        assert_eq!(objective.constant(), 4.0);
        let coeffs: Vec<f64> = objective.terms().map(|t| t.coeff).collect();
        assert_eq!(coeffs, vec![2.0, 1.0]);
    }

    #[test]
    fn raw_arrays_have_contract_lengths() {
        let mut model = Model::new();
        let x = model.add_variable(VarOptions::new()).unwrap();
        model.add_constraint((x * 1.0).le_scalar(1.0)).unwrap();

        assert_eq!(model.objective_coefficients().len(), model.num_variables());
        assert_eq!(model.column_lower_bounds().len(), model.num_variables());
        assert_eq!(model.row_begins().len(), model.num_constraints());
        assert_eq!(model.entry_variables().len(), model.num_entries());
        assert_eq!(model.entry_coefficients().len(), model.num_entries());
    }
}
