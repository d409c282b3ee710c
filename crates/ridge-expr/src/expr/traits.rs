//! The expression contract shared by dense and lazy term producers.

use crate::expr::constraint::{ComparisonSense, ConstraintExpr, RangeConstraint};
use crate::expr::core::Expr;
use crate::expr::term::Term;
use crate::ids::VariableId;

/// Anything exposing a finite term sequence plus a constant.
///
/// Implemented by [`VariableId`] (one unit term), [`Term`], [`Expr`], and
/// the lazy [`crate::expr::Xsum`] aggregate, so all of them can appear in
/// objectives and constraint comparisons interchangeably.
pub trait LinearExpr {
    /// Iterate the (variable, coefficient) terms. Restartable.
    fn terms(&self) -> impl Iterator<Item = Term> + '_;

    /// The constant part of the expression.
    fn constant(&self) -> f64;

    /// Materialize into a dense [`Expr`].
    fn to_expr(&self) -> Expr {
        Expr::with_terms(self.terms().collect(), self.constant())
    }

    // ── Comparisons producing constraint descriptors ────────

    /// `self <= rhs`.
    fn le_expr<E: LinearExpr>(&self, rhs: &E) -> ConstraintExpr {
        ConstraintExpr::less_equal(self, rhs)
    }

    /// `self >= rhs`, normalized by swapping operands onto `<=`.
    fn ge_expr<E: LinearExpr>(&self, rhs: &E) -> ConstraintExpr {
        ConstraintExpr::less_equal(rhs, self)
    }

    /// `self == rhs`.
    fn eq_expr<E: LinearExpr>(&self, rhs: &E) -> ConstraintExpr {
        ConstraintExpr::equal(self, rhs)
    }

    /// `self <= c`: upper-bound descriptor.
    fn le_scalar(&self, c: f64) -> ConstraintExpr {
        ConstraintExpr::new(self.to_expr(), ComparisonSense::LessEqual, c)
    }

    /// `self >= c`: lower-bound descriptor.
    fn ge_scalar(&self, c: f64) -> ConstraintExpr {
        ConstraintExpr::new(self.to_expr(), ComparisonSense::GreaterEqual, c)
    }

    /// `self == c`: equality descriptor.
    fn eq_scalar(&self, c: f64) -> ConstraintExpr {
        ConstraintExpr::new(self.to_expr(), ComparisonSense::Equal, c)
    }

    /// `lb <= self <= ub` in one call.
    fn between(&self, lower: f64, upper: f64) -> RangeConstraint {
        RangeConstraint::new(self.to_expr(), lower, upper)
    }
}

impl LinearExpr for VariableId {
    fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        std::iter::once(Term::new(*self, 1.0))
    }

    fn constant(&self) -> f64 {
        0.0
    }
}

impl LinearExpr for Term {
    fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        std::iter::once(*self)
    }

    fn constant(&self) -> f64 {
        0.0
    }
}

impl LinearExpr for Expr {
    fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        Expr::terms(self).iter().copied()
    }

    fn constant(&self) -> f64 {
        Expr::constant(self)
    }
}

impl<T: LinearExpr> LinearExpr for &T {
    fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        (**self).terms()
    }

    fn constant(&self) -> f64 {
        (**self).constant()
    }
}
