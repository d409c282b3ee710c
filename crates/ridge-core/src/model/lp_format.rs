//! LP-style text rendering, derived purely from the read contract.
//!
//! One line per non-trivial constraint bound: a ranged row emits an upper
//! line and a `{label}_low` lower line, an equality emits a single `=`
//! line. Zero-coefficient entries are skipped and unit coefficients render
//! without a magnitude.

use std::fmt::{self, Write as _};

use ridge_expr::{ConstraintId, Term, VariableId};

use crate::model::Model;
use crate::types::{Sense, VarCategory};

impl Model {
    /// Render the model as LP-format text.
    pub fn lp_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_lp(&mut out);
        out
    }

    /// Write LP-format text into `out`.
    pub fn write_lp<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        match self.sense() {
            Sense::Minimize => writeln!(out, "Minimize")?,
            Sense::Maximize => writeln!(out, "Maximize")?,
        }
        self.write_terms(out, self.objective_terms())?;
        writeln!(out)?;

        writeln!(out, "Subject To")?;
        for row in self.rows() {
            let label = self.row_label(row.id());
            let lower = row.lower_bound();
            let upper = row.upper_bound();

            if lower == upper {
                write!(out, "{label}: ")?;
                self.write_terms(out, row.terms())?;
                writeln!(out, " = {}", format_number(upper))?;
                continue;
            }
            if upper.is_finite() {
                write!(out, "{label}: ")?;
                self.write_terms(out, row.terms())?;
                writeln!(out, " <= {}", format_number(upper))?;
            }
            if lower.is_finite() {
                write!(out, "{label}_low: ")?;
                self.write_terms(out, row.terms())?;
                writeln!(out, " >= {}", format_number(lower))?;
            }
        }

        self.write_bounds_section(out)?;
        self.write_category_section(out, "General", VarCategory::Integer)?;
        self.write_category_section(out, "Binary", VarCategory::Binary)?;
        writeln!(out, "End")
    }

    fn objective_terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.objective_coefficients()
            .iter()
            .enumerate()
            .map(|(column, coeff)| Term::new(VariableId::new(column as u32), *coeff))
    }

    fn row_label(&self, id: ConstraintId) -> String {
        match self.constraint_name(id) {
            Some(name) => name.to_string(),
            None => format!("R{}", id.inner()),
        }
    }

    fn lp_variable_name(&self, id: VariableId) -> String {
        self.variable_name(id)
            .unwrap_or_else(|_| format!("x{}", id.inner()))
    }

    /// Write a term sequence, skipping zeros. Unit coefficients render
    /// bare; the sign comes from the separator, never from the magnitude.
    fn write_terms<W: fmt::Write>(
        &self,
        out: &mut W,
        terms: impl Iterator<Item = Term>,
    ) -> fmt::Result {
        let mut first = true;
        for term in terms {
            if term.coeff == 0.0 {
                continue;
            }
            let negative = term.coeff < 0.0;
            if first {
                if negative {
                    out.write_char('-')?;
                }
                first = false;
            } else if negative {
                out.write_str(" - ")?;
            } else {
                out.write_str(" + ")?;
            }
            let magnitude = term.coeff.abs();
            if magnitude != 1.0 {
                write!(out, "{} ", format_number(magnitude))?;
            }
            out.write_str(&self.lp_variable_name(term.var))?;
        }
        if first {
            out.write_char('0')?;
        }
        Ok(())
    }

    /// One line per variable with a non-default bound (default is
    /// `[0, +inf)`).
    fn write_bounds_section<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let lower = self.column_lower_bounds();
        let upper = self.column_upper_bounds();
        let non_default = self
            .variables()
            .filter(|v| lower[v.index()] != 0.0 || upper[v.index()] != f64::INFINITY);
        let mut header_written = false;

        for var in non_default {
            if !header_written {
                writeln!(out, "Bounds")?;
                header_written = true;
            }
            let name = self.lp_variable_name(var);
            let lb = lower[var.index()];
            let ub = upper[var.index()];

            if lb == ub {
                writeln!(out, "{name} = {}", format_number(ub))?;
                continue;
            }
            if lb != 0.0 {
                if lb == f64::NEG_INFINITY {
                    write!(out, "-Inf <= ")?;
                } else {
                    write!(out, "{} <= ", format_number(lb))?;
                }
            }
            write!(out, "{name}")?;
            if ub != f64::INFINITY {
                write!(out, " <= {}", format_number(ub))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_category_section<W: fmt::Write>(
        &self,
        out: &mut W,
        heading: &str,
        category: VarCategory,
    ) -> fmt::Result {
        let categories = self.column_categories();
        let mut header_written = false;
        for var in self.variables() {
            if categories[var.index()] != category {
                continue;
            }
            if !header_written {
                writeln!(out, "{heading}")?;
                header_written = true;
            }
            write!(out, " {}", self.lp_variable_name(var))?;
        }
        if header_written {
            writeln!(out)?;
        }
        Ok(())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_lp(f)
    }
}

/// Render a finite float without trailing zeros.
fn format_number(value: f64) -> String {
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-Inf".to_string()
        } else {
            "Inf".to_string()
        };
    }
    let normalized = if value == 0.0 { 0.0 } else { value };
    let mut rendered = format!("{normalized:.12}");
    while rendered.ends_with('0') {
        rendered.pop();
    }
    if rendered.ends_with('.') {
        rendered.pop();
    }
    rendered
}
