//! Keyed aggregation: build an expression from an iterable of keys plus
//! lookup closures, without materializing the term list.

use crate::expr::term::Term;
use crate::expr::traits::LinearExpr;
use crate::ids::VariableId;

/// Lazy sum of `coeff_of(key) * var_of(key)` over a finite key sequence.
///
/// Keys are held by value; the closures run on every iteration (results are
/// never memoized), so lookups observe caller state at use time. Constant
/// is always zero.
#[derive(Debug, Clone)]
pub struct Xsum<K, V, C> {
    keys: Vec<K>,
    var_of: V,
    coeff_of: C,
}

/// Sum the variables mapped from `keys`, each with coefficient one.
pub fn xsum<K, V>(keys: impl IntoIterator<Item = K>, var_of: V) -> Xsum<K, V, fn(&K) -> f64>
where
    V: Fn(&K) -> VariableId,
{
    xsum_with(keys, var_of, |_| 1.0)
}

/// Sum `coeff_of(key) * var_of(key)` over `keys`.
pub fn xsum_with<K, V, C>(keys: impl IntoIterator<Item = K>, var_of: V, coeff_of: C) -> Xsum<K, V, C>
where
    V: Fn(&K) -> VariableId,
    C: Fn(&K) -> f64,
{
    Xsum {
        keys: keys.into_iter().collect(),
        var_of,
        coeff_of,
    }
}

impl<K, V, C> LinearExpr for Xsum<K, V, C>
where
    V: Fn(&K) -> VariableId,
    C: Fn(&K) -> f64,
{
    fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.keys
            .iter()
            .map(|key| Term::new((self.var_of)(key), (self.coeff_of)(key)))
    }

    fn constant(&self) -> f64 {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::expr::constraint::LinearConstraint;

    #[test]
    fn one_term_per_key_with_unit_coefficients() {
        let agg = xsum(0u32..3, |k| VariableId::new(*k));
        let terms: Vec<Term> = agg.terms().collect();
        assert_eq!(terms.len(), 3);
        assert!(terms.iter().all(|t| t.coeff == 1.0));
        assert_eq!(agg.constant(), 0.0);
    }

    #[test]
    fn coefficient_lookup_is_applied_per_key() {
        let costs = [2.0, 4.0, 8.0];
        let agg = xsum_with(0usize..3, |k| VariableId::new(*k as u32), |k| costs[*k]);
        let coeffs: Vec<f64> = agg.terms().map(|t| t.coeff).collect();
        assert_eq!(coeffs, vec![2.0, 4.0, 8.0]);
    }

    #[test]
    fn iteration_is_restartable() {
        let agg = xsum(0u32..4, |k| VariableId::new(*k));
        assert_eq!(agg.terms().count(), 4);
        assert_eq!(agg.terms().count(), 4);
    }

    #[test]
    fn usable_wherever_expressions_are() {
        let agg = xsum_with(0u32..2, |k| VariableId::new(*k), |k| f64::from(*k) + 1.0);
        let c = agg.le_scalar(5.0);
        assert_eq!(c.rhs(), 5.0);
        assert_eq!(c.terms().count(), 2);
    }

    #[test]
    fn lookups_observe_caller_state_at_use_time() {
        let scale = std::cell::Cell::new(1.0);
        let agg = xsum_with(0u32..2, |k| VariableId::new(*k), |_| scale.get());
        assert!(agg.terms().all(|t| t.coeff == 1.0));

        scale.set(9.0);
        assert!(agg.terms().all(|t| t.coeff == 9.0));
    }
}
