//! Materialized linear expression: ordered terms + constant.
//!
//! Duplicate references to the same variable are preserved in insertion
//! order; they only merge through [`Expr::simplify`] or at model
//! registration time.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::expr::term::Term;
use crate::ids::VariableId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expr {
    constant: f64,
    terms: Vec<Term>,
}

impl Expr {
    // ── Constructors ────────────────────────────────────────

    /// Empty expression (no terms, constant zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Expression from terms and a constant.
    pub fn with_terms(terms: Vec<Term>, constant: f64) -> Self {
        Self { constant, terms }
    }

    /// Just a constant, no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            constant,
            terms: Vec::new(),
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Consume and return the term list.
    pub fn into_terms(self) -> Vec<Term> {
        self.terms
    }

    /// Consume and return (terms, constant).
    pub fn into_parts(self) -> (Vec<Term>, f64) {
        (self.terms, self.constant)
    }

    // ── Operations (value-returning, chained by move) ───────

    /// Append another expression's terms and constant.
    pub fn plus(mut self, other: Expr) -> Self {
        self.constant += other.constant;
        self.terms.extend(other.terms);
        self
    }

    /// Flip the sign of every term and the constant.
    pub fn negate(mut self) -> Self {
        self.constant = -self.constant;
        for term in &mut self.terms {
            term.coeff = -term.coeff;
        }
        self
    }

    /// Scale all terms and the constant by a factor.
    pub fn scale(mut self, by: f64) -> Self {
        self.constant *= by;
        for term in &mut self.terms {
            term.coeff *= by;
        }
        self
    }

    /// Add a constant offset.
    pub fn add_constant(mut self, value: f64) -> Self {
        self.constant += value;
        self
    }

    /// Merge duplicate variables and drop zero coefficients.
    ///
    /// Terms are stable-sorted by variable handle, equal handles are summed,
    /// and terms whose merged coefficient is exactly zero are removed. The
    /// constant is untouched. Idempotent.
    pub fn simplify(mut self) -> Self {
        self.terms.sort_by_key(|term| term.var);
        let mut merged: Vec<Term> = Vec::with_capacity(self.terms.len());
        for term in self.terms {
            match merged.last_mut() {
                Some(last) if last.var == term.var => last.coeff += term.coeff,
                _ => merged.push(term),
            }
        }
        merged.retain(|term| term.coeff != 0.0);
        Self {
            constant: self.constant,
            terms: merged,
        }
    }
}

// ── Conversions feeding the operator overloads ──────────────

impl From<VariableId> for Expr {
    fn from(var: VariableId) -> Self {
        Self {
            constant: 0.0,
            terms: vec![Term::new(var, 1.0)],
        }
    }
}

impl From<Term> for Expr {
    fn from(term: Term) -> Self {
        Self {
            constant: 0.0,
            terms: vec![term],
        }
    }
}

impl From<f64> for Expr {
    fn from(constant: f64) -> Self {
        Self::from_constant(constant)
    }
}

// ── Operator overloads ──────────────────────────────────────

// Every +/- pairing of handles, terms, expressions, and scalars funnels
// through `Expr`. Subtraction negates the subtrahend's terms and constant.
macro_rules! impl_add_sub {
    ($(($lhs:ty, $rhs:ty)),* $(,)?) => {$(
        impl Add<$rhs> for $lhs {
            type Output = Expr;

            fn add(self, rhs: $rhs) -> Expr {
                Expr::from(self).plus(Expr::from(rhs))
            }
        }

        impl Sub<$rhs> for $lhs {
            type Output = Expr;

            fn sub(self, rhs: $rhs) -> Expr {
                Expr::from(self).plus(Expr::from(rhs).negate())
            }
        }
    )*};
}

impl_add_sub!(
    (VariableId, VariableId),
    (VariableId, Term),
    (VariableId, Expr),
    (VariableId, f64),
    (Term, VariableId),
    (Term, Term),
    (Term, Expr),
    (Term, f64),
    (Expr, VariableId),
    (Expr, Term),
    (Expr, Expr),
    (Expr, f64),
    (f64, VariableId),
    (f64, Term),
    (f64, Expr),
);

impl Mul<f64> for Expr {
    type Output = Expr;

    fn mul(self, rhs: f64) -> Expr {
        self.scale(rhs)
    }
}

impl Mul<Expr> for f64 {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        rhs.scale(self)
    }
}

impl Div<f64> for Expr {
    type Output = Expr;

    fn div(self, rhs: f64) -> Expr {
        self.scale(1.0 / rhs)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.negate()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn x() -> VariableId {
        VariableId::new(1)
    }

    fn y() -> VariableId {
        VariableId::new(2)
    }

    #[test]
    fn term_plus_term_is_expr() {
        let e = x() * 2.0 + y() * 3.0;
        assert_eq!(e.terms().len(), 2);
        assert_eq!(e.constant(), 0.0);
    }

    #[test]
    fn scalar_addition_goes_to_constant() {
        let e = x() * 2.0 + 5.0;
        assert_eq!(e.constant(), 5.0);
        assert_eq!(e.terms().len(), 1);
    }

    #[test]
    fn subtraction_negates_subtrahend() {
        let e = (x() * 2.0 + 3.0) - (y() * 4.0 + 1.0);
        assert_eq!(e.constant(), 2.0);
        assert_eq!(e.terms()[0].coeff, 2.0);
        assert_eq!(e.terms()[1].coeff, -4.0);
    }

    #[test]
    fn duplicates_are_kept_until_simplified() {
        let e = x() * 2.0 + x() * 3.0;
        assert_eq!(e.terms().len(), 2);
    }

    #[test]
    fn scale_touches_terms_and_constant() {
        let e = (x() * 2.0 + 3.0) * 2.0;
        assert_eq!(e.constant(), 6.0);
        assert_eq!(e.terms()[0].coeff, 4.0);
    }

    #[test]
    fn division_scales_by_reciprocal() {
        let e = (x() * 2.0 + 4.0) / 2.0;
        assert_eq!(e.constant(), 2.0);
        assert_eq!(e.terms()[0].coeff, 1.0);
    }

    #[test]
    fn negation_flips_everything() {
        let e = -(x() * 2.0 + 3.0);
        assert_eq!(e.constant(), -3.0);
        assert_eq!(e.terms()[0].coeff, -2.0);
    }

    #[test]
    fn simplify_merges_and_drops_zeros() {
        let e = (x() * 2.0 + x() * 3.0 + y() * 1.0 + y() * -1.0 + 7.0).simplify();
        assert_eq!(e.terms().len(), 1);
        assert_eq!(e.terms()[0].var, x());
        assert_eq!(e.terms()[0].coeff, 5.0);
        assert_eq!(e.constant(), 7.0);
    }

    #[test]
    fn simplify_sums_duplicate_coefficients() {
        let e = (x() * 2.0 + x() * 3.0 + y() * 1.0).simplify();
        assert_eq!(e.terms().len(), 2);
        assert_eq!(e.terms()[0], Term::new(x(), 5.0));
        assert_eq!(e.terms()[1], Term::new(y(), 1.0));
    }

    #[test]
    fn simplify_is_idempotent() {
        let e = x() * 2.0 + y() * 0.5 + x() * -2.0 + 1.5;
        let once = e.clone().simplify();
        let twice = once.clone().simplify();
        assert_eq!(once, twice);
    }

    #[test]
    fn simplify_orders_by_handle() {
        let e = (y() * 1.0 + x() * 1.0).simplify();
        assert_eq!(e.terms()[0].var, x());
        assert_eq!(e.terms()[1].var, y());
    }
}
