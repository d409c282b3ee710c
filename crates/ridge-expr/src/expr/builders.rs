//! Builder functions for constructing expressions from raw columns.

use crate::expr::core::Expr;
use crate::expr::error::LinearExprError;
use crate::expr::term::Term;
use crate::expr::traits::LinearExpr;
use crate::ids::VariableId;

/// Zip separate variable and coefficient vectors into an expression.
///
/// Zero coefficients are filtered out; non-finite coefficients and length
/// mismatches are rejected.
pub fn linear_terms(
    variables: Vec<VariableId>,
    coefficients: Vec<f64>,
) -> Result<Expr, LinearExprError> {
    if variables.len() != coefficients.len() {
        return Err(LinearExprError::MismatchedLengths);
    }
    if let Some(coeff) = coefficients.iter().find(|c| !c.is_finite()) {
        return Err(LinearExprError::NonFiniteCoefficient { coefficient: *coeff });
    }
    let terms = variables
        .into_iter()
        .zip(coefficients)
        .filter(|(_, coeff)| *coeff != 0.0)
        .map(|(var, coeff)| Term::new(var, coeff))
        .collect();
    Ok(Expr::with_terms(terms, 0.0))
}

/// Concatenate several expressions into one, summing their constants.
///
/// Duplicate variable terms are NOT merged; call `simplify()` on the
/// result if consolidation is needed.
pub fn linear_sum<E: LinearExpr>(exprs: impl IntoIterator<Item = E>) -> Expr {
    let mut terms = Vec::new();
    let mut constant = 0.0;
    for expr in exprs {
        terms.extend(expr.terms());
        constant += expr.constant();
    }
    Expr::with_terms(terms, constant)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn linear_terms_rejects_mismatched_lengths() {
        let result = linear_terms(vec![VariableId::new(1), VariableId::new(2)], vec![1.0]);
        assert_eq!(result.unwrap_err(), LinearExprError::MismatchedLengths);
    }

    #[test]
    fn linear_terms_rejects_non_finite_coefficients() {
        let result = linear_terms(vec![VariableId::new(1)], vec![f64::NAN]);
        assert!(matches!(
            result.unwrap_err(),
            LinearExprError::NonFiniteCoefficient { .. }
        ));
    }

    #[test]
    fn linear_terms_filters_zero_coefficients() {
        let expr = linear_terms(
            vec![VariableId::new(1), VariableId::new(2)],
            vec![0.0, 3.5],
        )
        .expect("linear_terms should succeed");

        let terms: Vec<(u32, f64)> = expr
            .terms()
            .iter()
            .map(|t| (t.var.inner(), t.coeff))
            .collect();
        assert_eq!(terms, vec![(2, 3.5)]);
    }

    #[test]
    fn linear_sum_concatenates_terms_and_constants() {
        let left = VariableId::new(1) * 1.0 + 2.0;
        let right = VariableId::new(2) * 2.0 + 3.0;
        let summed = linear_sum(vec![left, right]);
        assert_eq!(summed.terms().len(), 2);
        assert_eq!(summed.constant(), 5.0);
    }
}
