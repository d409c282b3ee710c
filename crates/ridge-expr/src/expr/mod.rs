//! Linear expressions, terms, and constraint descriptors.

mod builders;
mod constraint;
mod core;
mod error;
mod term;
mod traits;
mod xsum;

pub use self::builders::{linear_sum, linear_terms};
pub use self::constraint::{ComparisonSense, ConstraintExpr, LinearConstraint, RangeConstraint};
pub use self::core::Expr;
pub use self::error::LinearExprError;
pub use self::term::Term;
pub use self::traits::LinearExpr;
pub use self::xsum::{xsum, xsum_with, Xsum};
