//! Bounds-checked adapters from caller-chosen keys to contiguous handles.
//!
//! A range stores only `{offset, count, id_of}` and never a model
//! reference, so it stays valid across later model growth. The id closure
//! is owned by the range and re-evaluated on every call; capturing
//! closures observe caller state at call time and results are never
//! memoized. Multi-arity keys are expressed as tuples.

use std::marker::PhantomData;

use ridge_expr::{ConstraintId, LinearExpr, Term, VariableId};

use crate::model::ModelError;

/// A block of variables created by one bulk registration, addressable by
/// caller key or by position.
#[derive(Debug, Clone)]
pub struct VarRange<K, F> {
    offset: usize,
    count: usize,
    id_of: F,
    _key: PhantomData<fn(K)>,
}

impl<K, F> VarRange<K, F>
where
    F: Fn(K) -> i64,
{
    pub(crate) fn new(offset: usize, count: usize, id_of: F) -> Self {
        Self {
            offset,
            count,
            id_of,
            _key: PhantomData,
        }
    }

    /// Map a key through the id closure to a handle in this block.
    ///
    /// Errors if the closure result falls outside `[0, count)`; the result
    /// is never clamped.
    pub fn get(&self, key: K) -> Result<VariableId, ModelError> {
        let id = (self.id_of)(key);
        if id < 0 || id as usize >= self.count {
            return Err(ModelError::KeyOutOfRange {
                id,
                count: self.count,
            });
        }
        Ok(VariableId::new((self.offset + id as usize) as u32))
    }

    /// Direct positional lookup, bounds-checked against the block size.
    pub fn at(&self, index: usize) -> Result<VariableId, ModelError> {
        if index >= self.count {
            return Err(ModelError::IndexOutOfRange {
                index,
                count: self.count,
            });
        }
        Ok(VariableId::new((self.offset + index) as u32))
    }

    /// Number of variables in the block.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Handle of the first variable in the block.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Walk the contiguous handle block in creation order.
    pub fn iter(&self) -> impl Iterator<Item = VariableId> + '_ {
        (self.offset..self.offset + self.count).map(|i| VariableId::new(i as u32))
    }
}

impl VarRange<usize, fn(usize) -> i64> {
    /// Identity-keyed block, as returned by plain bulk creation.
    pub(crate) fn contiguous(offset: usize, count: usize) -> Self {
        Self::new(offset, count, |i| i as i64)
    }
}

/// A variable block is itself an expression: the unit-coefficient sum of
/// its variables.
impl<K, F> LinearExpr for VarRange<K, F>
where
    F: Fn(K) -> i64,
{
    fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.iter().map(|var| Term::new(var, 1.0))
    }

    fn constant(&self) -> f64 {
        0.0
    }
}

/// A block of constraints created by one bulk registration, addressable by
/// caller key or by position.
#[derive(Clone)]
pub struct ConstraintRange<K, F> {
    offset: usize,
    count: usize,
    id_of: F,
    _key: PhantomData<fn(K)>,
}

impl<K, F> std::fmt::Debug for ConstraintRange<K, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintRange")
            .field("offset", &self.offset)
            .field("count", &self.count)
            .field("id_of", &"<closure>")
            .finish()
    }
}

impl<K, F> ConstraintRange<K, F>
where
    F: Fn(K) -> i64,
{
    pub(crate) fn new(offset: usize, count: usize, id_of: F) -> Self {
        Self {
            offset,
            count,
            id_of,
            _key: PhantomData,
        }
    }

    /// Map a key through the id closure to a handle in this block.
    pub fn get(&self, key: K) -> Result<ConstraintId, ModelError> {
        let id = (self.id_of)(key);
        if id < 0 || id as usize >= self.count {
            return Err(ModelError::KeyOutOfRange {
                id,
                count: self.count,
            });
        }
        Ok(ConstraintId::new((self.offset + id as usize) as u32))
    }

    /// Direct positional lookup, bounds-checked against the block size.
    pub fn at(&self, index: usize) -> Result<ConstraintId, ModelError> {
        if index >= self.count {
            return Err(ModelError::IndexOutOfRange {
                index,
                count: self.count,
            });
        }
        Ok(ConstraintId::new((self.offset + index) as u32))
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn iter(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        (self.offset..self.offset + self.count).map(|i| ConstraintId::new(i as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_key_mapping_round_trips() {
        let range: VarRange<usize, _> = VarRange::new(0, 5, |i: usize| 4 - i as i64);
        for i in 0..5usize {
            let var = range.get(i).expect("key in range");
            assert_eq!(var.inner() as i64, 4 - i as i64);
        }
        assert!(matches!(
            range.get(5),
            Err(ModelError::KeyOutOfRange { id: -1, count: 5 })
        ));
    }

    #[test]
    fn offset_shifts_handles() {
        let range: VarRange<usize, _> = VarRange::new(10, 3, |i: usize| i as i64);
        assert_eq!(range.get(2).unwrap().inner(), 12);
        assert_eq!(range.at(0).unwrap().inner(), 10);
    }

    #[test]
    fn positional_lookup_is_bounds_checked() {
        let range = VarRange::contiguous(4, 2);
        assert_eq!(range.at(1).unwrap().inner(), 5);
        assert!(matches!(
            range.at(2),
            Err(ModelError::IndexOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn tuple_keys_cover_multi_arity() {
        let width = 3i64;
        let grid: VarRange<(i64, i64), _> = VarRange::new(0, 6, move |(r, c): (i64, i64)| {
            r * width + c
        });
        assert_eq!(grid.get((1, 2)).unwrap().inner(), 5);
        assert!(grid.get((2, 0)).is_err());
        assert!(grid.get((-1, 0)).is_err());
    }

    #[test]
    fn id_closure_reads_caller_state_at_call_time() {
        let shift = std::cell::Cell::new(0i64);
        let range: VarRange<usize, _> = VarRange::new(0, 4, |i: usize| i as i64 + shift.get());
        assert_eq!(range.get(1).unwrap().inner(), 1);

        shift.set(2);
        assert_eq!(range.get(1).unwrap().inner(), 3);
    }

    #[test]
    fn range_is_a_unit_sum_expression() {
        let range = VarRange::contiguous(2, 3);
        let terms: Vec<Term> = LinearExpr::terms(&range).collect();
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0].var.inner(), 2);
        assert!(terms.iter().all(|t| t.coeff == 1.0));
        assert_eq!(LinearExpr::constant(&range), 0.0);
    }

    #[test]
    fn constraint_range_lookup() {
        let range: ConstraintRange<usize, _> = ConstraintRange::new(1, 2, |i: usize| i as i64);
        assert_eq!(range.get(0).unwrap().inner(), 1);
        assert!(range.get(2).is_err());
        assert_eq!(range.iter().count(), 2);
    }
}
