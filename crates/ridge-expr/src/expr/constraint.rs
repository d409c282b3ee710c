//! Constraint descriptors produced by expression comparisons.
//!
//! Descriptors are pure values: they carry the compared expression with its
//! constant intact and absorb that constant into the bounds lazily
//! (`bound - constant`), so chaining a second bound onto a one-sided
//! descriptor stays exact. Terms are stored as written, unsimplified;
//! duplicate merging happens at model registration.

use crate::expr::core::Expr;
use crate::expr::term::Term;
use crate::expr::traits::LinearExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl ComparisonSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "le",
            ComparisonSense::GreaterEqual => "ge",
            ComparisonSense::Equal => "eq",
        }
    }
}

/// The row contract consumed at registration: a term sequence plus the
/// effective lower/upper bound pair (constants already absorbed).
pub trait LinearConstraint {
    fn terms(&self) -> impl Iterator<Item = Term> + '_;
    fn lower_bound(&self) -> f64;
    fn upper_bound(&self) -> f64;
}

/// Relational descriptor: expression, sense, and the raw comparison scalar.
#[derive(Debug, Clone)]
pub struct ConstraintExpr {
    expr: Expr,
    sense: ComparisonSense,
    scalar: f64,
}

impl ConstraintExpr {
    pub fn new(expr: Expr, sense: ComparisonSense, scalar: f64) -> Self {
        Self {
            expr,
            sense,
            scalar,
        }
    }

    /// `lhs <= rhs` over two expressions: keeps lhs terms as written,
    /// negates the rhs terms, and folds both constants into the bound.
    pub fn less_equal<L: LinearExpr + ?Sized, R: LinearExpr + ?Sized>(lhs: &L, rhs: &R) -> Self {
        let combined = lhs.to_expr().plus(rhs.to_expr().negate());
        Self::new(combined, ComparisonSense::LessEqual, 0.0)
    }

    /// `lhs == rhs` over two expressions.
    pub fn equal<L: LinearExpr + ?Sized, R: LinearExpr + ?Sized>(lhs: &L, rhs: &R) -> Self {
        let combined = lhs.to_expr().plus(rhs.to_expr().negate());
        Self::new(combined, ComparisonSense::Equal, 0.0)
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    /// Right-hand side with the expression constant absorbed.
    pub fn rhs(&self) -> f64 {
        self.scalar - self.expr.constant()
    }

    pub fn into_parts(self) -> (Expr, ComparisonSense, f64) {
        let rhs = self.rhs();
        (self.expr, self.sense, rhs)
    }

    /// Chain an upper bound onto a lower-bound descriptor.
    pub fn and_le(self, upper: f64) -> RangeConstraint {
        let lower = match self.sense {
            ComparisonSense::GreaterEqual | ComparisonSense::Equal => self.scalar,
            ComparisonSense::LessEqual => f64::NEG_INFINITY,
        };
        RangeConstraint::new(self.expr, lower, upper)
    }

    /// Chain a lower bound onto an upper-bound descriptor.
    pub fn and_ge(self, lower: f64) -> RangeConstraint {
        let upper = match self.sense {
            ComparisonSense::LessEqual | ComparisonSense::Equal => self.scalar,
            ComparisonSense::GreaterEqual => f64::INFINITY,
        };
        RangeConstraint::new(self.expr, lower, upper)
    }
}

impl LinearConstraint for ConstraintExpr {
    fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.expr.terms().iter().copied()
    }

    fn lower_bound(&self) -> f64 {
        match self.sense {
            ComparisonSense::LessEqual => f64::NEG_INFINITY,
            ComparisonSense::GreaterEqual | ComparisonSense::Equal => self.rhs(),
        }
    }

    fn upper_bound(&self) -> f64 {
        match self.sense {
            ComparisonSense::GreaterEqual => f64::INFINITY,
            ComparisonSense::LessEqual | ComparisonSense::Equal => self.rhs(),
        }
    }
}

/// Two-sided descriptor: `lower <= expr <= upper` with raw bound scalars.
///
/// `lower > upper` is allowed; an infeasible row is valid, inert model
/// state and a solver concern.
#[derive(Debug, Clone)]
pub struct RangeConstraint {
    expr: Expr,
    lower: f64,
    upper: f64,
}

impl RangeConstraint {
    pub fn new(expr: Expr, lower: f64, upper: f64) -> Self {
        Self { expr, lower, upper }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }
}

impl LinearConstraint for RangeConstraint {
    fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.expr.terms().iter().copied()
    }

    fn lower_bound(&self) -> f64 {
        self.lower - self.expr.constant()
    }

    fn upper_bound(&self) -> f64 {
        self.upper - self.expr.constant()
    }
}

impl From<ConstraintExpr> for RangeConstraint {
    fn from(c: ConstraintExpr) -> Self {
        let lower = match c.sense {
            ComparisonSense::LessEqual => f64::NEG_INFINITY,
            ComparisonSense::GreaterEqual | ComparisonSense::Equal => c.scalar,
        };
        let upper = match c.sense {
            ComparisonSense::GreaterEqual => f64::INFINITY,
            ComparisonSense::LessEqual | ComparisonSense::Equal => c.scalar,
        };
        RangeConstraint::new(c.expr, lower, upper)
    }
}

impl<T: LinearConstraint> LinearConstraint for &T {
    fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        (**self).terms()
    }

    fn lower_bound(&self) -> f64 {
        (**self).lower_bound()
    }

    fn upper_bound(&self) -> f64 {
        (**self).upper_bound()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::ids::VariableId;

    fn x() -> VariableId {
        VariableId::new(0)
    }

    fn y() -> VariableId {
        VariableId::new(1)
    }

    fn z() -> VariableId {
        VariableId::new(2)
    }

    fn term_pairs<C: LinearConstraint>(c: &C) -> Vec<(u32, f64)> {
        c.terms().map(|t| (t.var.inner(), t.coeff)).collect()
    }

    #[test]
    fn expr_vs_expr_keeps_lhs_and_negates_rhs() {
        let lhs = -(x() * 3.2) - 2.0;
        let rhs = y() * 6.0 + 7.0 - z();
        let c = lhs.le_expr(&rhs);
        assert_eq!(c.sense(), ComparisonSense::LessEqual);
        assert_eq!(c.rhs(), 9.0);
        assert_eq!(
            term_pairs(&c),
            vec![(0, -3.2), (1, -6.0), (2, 1.0)]
        );
    }

    #[test]
    fn ge_swaps_operands_onto_le() {
        let lhs = x() * 1.0 + 3.0;
        let rhs = y() * 1.0 + 7.0;
        let c = lhs.ge_expr(&rhs);
        assert_eq!(c.sense(), ComparisonSense::LessEqual);
        // rhs - lhs <= 0, i.e. y - x <= 3 - 7.
        assert_eq!(c.rhs(), -4.0);
        assert_eq!(term_pairs(&c), vec![(1, 1.0), (0, -1.0)]);
    }

    #[test]
    fn equality_with_scalar_absorbs_constant() {
        let e = y() * 6.0 + 7.0 - z();
        let c = e.eq_scalar(-2.0);
        assert_eq!(c.lower_bound(), -9.0);
        assert_eq!(c.upper_bound(), -9.0);
        assert_eq!(term_pairs(&c), vec![(1, 6.0), (2, -1.0)]);
    }

    #[test]
    fn scalar_bounds_are_one_sided() {
        let e = x() * 1.0 + 3.0;
        let lb = e.clone().ge_scalar(10.0);
        assert_eq!(lb.lower_bound(), 7.0);
        assert!(lb.upper_bound().is_infinite());

        let ub = e.le_scalar(10.0);
        assert_eq!(ub.upper_bound(), 7.0);
        assert!(ub.lower_bound().is_infinite());
    }

    #[test]
    fn chaining_builds_a_range() {
        let e = x() * 1.0 + 1.0;
        let chained = e.clone().ge_scalar(2.0).and_le(10.0);
        assert_eq!(chained.lower_bound(), 1.0);
        assert_eq!(chained.upper_bound(), 9.0);

        let direct = e.between(2.0, 10.0);
        assert_eq!(chained.lower_bound(), direct.lower_bound());
        assert_eq!(chained.upper_bound(), direct.upper_bound());
    }

    #[test]
    fn range_conversion_matches_sense_bounds() {
        let c = (x() * 2.0).le_scalar(4.0);
        let r = RangeConstraint::from(c.clone());
        assert_eq!(r.lower_bound(), c.lower_bound());
        assert_eq!(r.upper_bound(), c.upper_bound());
    }

    #[test]
    fn inverted_range_is_allowed() {
        let r = (x() * 1.0).between(5.0, 1.0);
        assert!(r.lower_bound() > r.upper_bound());
    }

    #[test]
    fn terms_stay_unsimplified() {
        let c = (x() * 2.0 + x() * 3.0).le_scalar(1.0);
        assert_eq!(c.terms().count(), 2);
    }
}
