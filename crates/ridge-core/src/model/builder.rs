//! Model builder methods for adding variables, constraints, and objectives.

use std::time::Instant;

use ridge_expr::{ConstraintId, Expr, LinearConstraint, LinearExpr, RangeConstraint, VariableId};

use crate::model::error::ModelError;
use crate::model::Model;
use crate::range::{ConstraintRange, VarRange};
use crate::types::{Sense, VarCategory, VarOptions};

impl Model {
    // ── Variables ───────────────────────────────────────────

    /// Add a variable to the model; the handle equals the pre-insertion
    /// variable count.
    pub fn add_variable(&mut self, options: VarOptions) -> Result<VariableId, ModelError> {
        let offset = self.push_columns(1, options)?;
        Ok(VariableId::new(offset as u32))
    }

    /// Add a variable with an explicit name.
    pub fn add_named_variable(
        &mut self,
        options: VarOptions,
        name: impl Into<String>,
    ) -> Result<VariableId, ModelError> {
        let id = self.add_variable(options)?;
        self.col_name[id.index()] = Some(name.into());
        Ok(id)
    }

    /// Add `count` variables sharing the same options. The returned block
    /// is addressed by position.
    pub fn add_variables(
        &mut self,
        count: usize,
        options: VarOptions,
    ) -> Result<VarRange<usize, fn(usize) -> i64>, ModelError> {
        let offset = self.push_columns(count, options)?;
        Ok(VarRange::contiguous(offset, count))
    }

    /// Add `count` variables addressed through a caller-supplied key
    /// mapping. Keys of any shape work (use tuples for multi-arity); the
    /// mapping must land in `[0, count)` and is bounds-checked at every
    /// lookup.
    pub fn add_variables_with<K, F>(
        &mut self,
        count: usize,
        id_of: F,
        options: VarOptions,
    ) -> Result<VarRange<K, F>, ModelError>
    where
        F: Fn(K) -> i64,
    {
        let offset = self.push_columns(count, options)?;
        Ok(VarRange::new(offset, count, id_of))
    }

    /// Bulk creation with per-slot names generated eagerly.
    pub fn add_named_variables(
        &mut self,
        count: usize,
        name_of: impl Fn(usize) -> String,
        options: VarOptions,
    ) -> Result<VarRange<usize, fn(usize) -> i64>, ModelError> {
        let offset = self.push_columns(count, options)?;
        for slot in 0..count {
            self.col_name[offset + slot] = Some(name_of(slot));
        }
        Ok(VarRange::contiguous(offset, count))
    }

    /// Keyed bulk creation with per-slot names generated eagerly.
    pub fn add_named_variables_with<K, F>(
        &mut self,
        count: usize,
        id_of: F,
        name_of: impl Fn(usize) -> String,
        options: VarOptions,
    ) -> Result<VarRange<K, F>, ModelError>
    where
        F: Fn(K) -> i64,
    {
        let offset = self.push_columns(count, options)?;
        for slot in 0..count {
            self.col_name[offset + slot] = Some(name_of(slot));
        }
        Ok(VarRange::new(offset, count, id_of))
    }

    /// Append `count` entries to every column array.
    fn push_columns(&mut self, count: usize, options: VarOptions) -> Result<usize, ModelError> {
        if options.bounds.lower.is_nan()
            || options.bounds.upper.is_nan()
            || options.bounds.lower > options.bounds.upper
        {
            return Err(ModelError::InvalidVariableBounds {
                lower: options.bounds.lower,
                upper: options.bounds.upper,
            });
        }
        if !options.objective.is_finite() {
            return Err(ModelError::InvalidCoefficient {
                coefficient: options.objective,
            });
        }

        let offset = self.col_objective.len();
        let new_len = offset + count;
        self.col_objective.resize(new_len, options.objective);
        self.col_lower.resize(new_len, options.bounds.lower);
        self.col_upper.resize(new_len, options.bounds.upper);
        self.col_category.resize(new_len, options.category);
        self.col_name.resize_with(new_len, || None);

        tracing::debug!(
            component = "model",
            operation = "add_variables",
            status = "success",
            count,
            total = new_len,
            category = options.category.as_str(),
            "Appended variable columns"
        );
        Ok(offset)
    }

    // ── Objective ───────────────────────────────────────────

    /// Reset the objective to the merged contribution of `expr`'s terms
    /// and set the objective offset to its constant.
    pub fn set_objective<E: LinearExpr>(&mut self, expr: &E) -> Result<(), ModelError> {
        self.validate_terms(expr)?;
        self.col_objective.fill(0.0);
        for term in expr.terms() {
            self.col_objective[term.var.index()] += term.coeff;
        }
        self.set_objective_offset(expr.constant());
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = self.sense().as_str(),
            terms = expr.terms().count(),
            "Set objective function"
        );
        Ok(())
    }

    /// Accumulate `expr` into the objective instead of resetting it.
    pub fn add_to_objective<E: LinearExpr>(&mut self, expr: &E) -> Result<(), ModelError> {
        self.validate_terms(expr)?;
        for term in expr.terms() {
            self.col_objective[term.var.index()] += term.coeff;
        }
        self.set_objective_offset(self.objective_offset() + expr.constant());
        Ok(())
    }

    /// Set the sense to minimize and reset the objective to `expr`.
    pub fn minimize<E: LinearExpr>(&mut self, expr: &E) -> Result<(), ModelError> {
        self.set_sense(Sense::Minimize);
        self.set_objective(expr)
    }

    /// Set the sense to maximize and reset the objective to `expr`.
    pub fn maximize<E: LinearExpr>(&mut self, expr: &E) -> Result<(), ModelError> {
        self.set_sense(Sense::Maximize);
        self.set_objective(expr)
    }

    fn validate_terms<E: LinearExpr>(&self, expr: &E) -> Result<(), ModelError> {
        for term in expr.terms() {
            self.ensure_variable_exists(term.var)?;
            if !term.coeff.is_finite() {
                return Err(ModelError::InvalidCoefficient {
                    coefficient: term.coeff,
                });
            }
        }
        Ok(())
    }

    // ── Constraints ─────────────────────────────────────────

    /// Register one constraint row from a descriptor.
    ///
    /// Duplicate variable references within the row are merged in place;
    /// the stored bounds already exclude the expression's own constant.
    pub fn add_constraint<C: LinearConstraint>(
        &mut self,
        constraint: C,
    ) -> Result<ConstraintId, ModelError> {
        let lower = constraint.lower_bound();
        let upper = constraint.upper_bound();
        self.register_row(&constraint, lower, upper)
    }

    /// Register `lower <= expr <= upper` without going through the
    /// relational operators.
    pub fn add_ranged_constraint(
        &mut self,
        expr: Expr,
        lower: f64,
        upper: f64,
    ) -> Result<ConstraintId, ModelError> {
        self.add_constraint(RangeConstraint::new(expr, lower, upper))
    }

    /// Register one constraint per key.
    ///
    /// `build` returns the descriptor for a key or `None` to decline;
    /// chain candidate builders with `or_else` on the caller side. A
    /// declined key is an error and rolls back every row this call
    /// registered. The returned block is addressed by `id_of`, which must
    /// map each key to its position in key order.
    pub fn add_constraints<K, I, F, B, C>(
        &mut self,
        keys: I,
        id_of: F,
        mut build: B,
    ) -> Result<ConstraintRange<K, F>, ModelError>
    where
        I: IntoIterator<Item = K>,
        F: Fn(K) -> i64,
        B: FnMut(&K) -> Option<C>,
        C: LinearConstraint,
    {
        let row_mark = self.num_constraints();
        let entry_mark = self.num_entries();
        let mut count = 0usize;

        for (key_index, key) in keys.into_iter().enumerate() {
            let Some(descriptor) = build(&key) else {
                self.truncate_rows(row_mark, entry_mark);
                return Err(ModelError::UnresolvedConstraint { key_index });
            };
            if let Err(err) = self.add_constraint(descriptor) {
                self.truncate_rows(row_mark, entry_mark);
                return Err(err);
            }
            count += 1;
        }

        tracing::debug!(
            component = "model",
            operation = "add_constraints",
            status = "success",
            rows = count,
            total = self.num_constraints(),
            "Registered constraint block"
        );
        Ok(ConstraintRange::new(row_mark, count, id_of))
    }

    fn register_row<C: LinearConstraint>(
        &mut self,
        constraint: &C,
        lower: f64,
        upper: f64,
    ) -> Result<ConstraintId, ModelError> {
        if lower.is_nan() || upper.is_nan() {
            return Err(ModelError::InvalidConstraintBounds { lower, upper });
        }
        // Validate every term before the first append so a failure cannot
        // leave a partial row or stale scratch stamps behind.
        let mut terms_in = 0usize;
        for term in constraint.terms() {
            self.ensure_variable_exists(term.var)?;
            if !term.coeff.is_finite() {
                return Err(ModelError::InvalidCoefficient {
                    coefficient: term.coeff,
                });
            }
            terms_in += 1;
        }

        let started = Instant::now();
        let epoch = self.begin_merge_epoch();
        let begin = self.entry_vars.len();
        self.row_begins.push(begin);
        self.row_lower.push(lower);
        self.row_upper.push(upper);
        for term in constraint.terms() {
            self.stamp_or_merge(epoch, term.var, term.coeff);
        }

        let id = ConstraintId::new((self.num_constraints() - 1) as u32);
        tracing::debug!(
            component = "model",
            operation = "add_constraint",
            status = "success",
            constraint = id.inner(),
            terms_in,
            entries = self.entry_vars.len() - begin,
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Registered constraint row"
        );
        Ok(id)
    }

    // ── Indexed mutation (no reference-holding builders) ────

    /// Replace a row's bound pair through its handle.
    pub fn set_constraint_bounds(
        &mut self,
        id: ConstraintId,
        lower: f64,
        upper: f64,
    ) -> Result<(), ModelError> {
        self.ensure_constraint_exists(id)?;
        if lower.is_nan() || upper.is_nan() {
            return Err(ModelError::InvalidConstraintBounds { lower, upper });
        }
        self.row_lower[id.index()] = lower;
        self.row_upper[id.index()] = upper;
        Ok(())
    }

    /// Overwrite a variable's objective coefficient.
    pub fn set_objective_coefficient(
        &mut self,
        id: VariableId,
        value: f64,
    ) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        if !value.is_finite() {
            return Err(ModelError::InvalidCoefficient { coefficient: value });
        }
        self.col_objective[id.index()] = value;
        Ok(())
    }

    /// Overwrite a variable's lower bound.
    pub fn set_lower_bound(&mut self, id: VariableId, value: f64) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        if value.is_nan() {
            return Err(ModelError::InvalidVariableBounds {
                lower: value,
                upper: self.col_upper[id.index()],
            });
        }
        self.col_lower[id.index()] = value;
        Ok(())
    }

    /// Overwrite a variable's upper bound.
    pub fn set_upper_bound(&mut self, id: VariableId, value: f64) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        if value.is_nan() {
            return Err(ModelError::InvalidVariableBounds {
                lower: self.col_lower[id.index()],
                upper: value,
            });
        }
        self.col_upper[id.index()] = value;
        Ok(())
    }

    /// Change a variable's domain category.
    pub fn set_category(&mut self, id: VariableId, category: VarCategory) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        self.col_category[id.index()] = category;
        Ok(())
    }
}
