//! Naming and metadata for variables and constraints.
//!
//! Variable names live in the name column; unnamed variables materialize
//! the deterministic `x{index}` form only when read. Constraint names and
//! the free-form metadata payloads live in lazily allocated maps.

use std::collections::BTreeMap;

use ridge_expr::{ConstraintId, VariableId};

use crate::model::error::ModelError;
use crate::model::Model;

impl Model {
    /// Set name for a variable.
    pub fn set_variable_name(&mut self, id: VariableId, name: String) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        self.col_name[id.index()] = Some(name);
        Ok(())
    }

    /// Get a variable's name, falling back to the deterministic default.
    pub fn variable_name(&self, id: VariableId) -> Result<String, ModelError> {
        self.ensure_variable_exists(id)?;
        Ok(match &self.col_name[id.index()] {
            Some(name) => name.clone(),
            None => format!("x{}", id.inner()),
        })
    }

    /// Get a variable's explicitly stored name, if any.
    pub fn stored_variable_name(&self, id: VariableId) -> Option<&str> {
        self.col_name.get(id.index())?.as_deref()
    }

    /// Lookup a variable by its stored name.
    pub fn variable_by_name(&self, name: &str) -> Option<VariableId> {
        self.col_name
            .iter()
            .position(|stored| stored.as_deref() == Some(name))
            .map(|index| VariableId::new(index as u32))
    }

    /// Set name for a constraint.
    pub fn set_constraint_name(
        &mut self,
        id: ConstraintId,
        name: String,
    ) -> Result<(), ModelError> {
        self.ensure_constraint_exists(id)?;
        self.constraint_names
            .get_or_insert_with(BTreeMap::new)
            .insert(id, name);
        Ok(())
    }

    /// Get name for a constraint.
    pub fn constraint_name(&self, id: ConstraintId) -> Option<&str> {
        self.constraint_names
            .as_ref()
            .and_then(|names| names.get(&id).map(String::as_str))
    }

    /// Lookup a constraint by name.
    pub fn constraint_by_name(&self, name: &str) -> Option<ConstraintId> {
        self.constraint_names.as_ref().and_then(|names| {
            names
                .iter()
                .find_map(|(id, value)| (value == name).then_some(*id))
        })
    }

    /// Set metadata for a variable.
    pub fn set_variable_metadata(
        &mut self,
        id: VariableId,
        metadata: serde_json::Value,
    ) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        self.variable_metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(id, metadata);
        Ok(())
    }

    /// Get metadata for a variable.
    pub fn variable_metadata(&self, id: VariableId) -> Option<&serde_json::Value> {
        self.variable_metadata
            .as_ref()
            .and_then(|meta| meta.get(&id))
    }

    /// Set metadata for a constraint.
    pub fn set_constraint_metadata(
        &mut self,
        id: ConstraintId,
        metadata: serde_json::Value,
    ) -> Result<(), ModelError> {
        self.ensure_constraint_exists(id)?;
        self.constraint_metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(id, metadata);
        Ok(())
    }

    /// Get metadata for a constraint.
    pub fn constraint_metadata(&self, id: ConstraintId) -> Option<&serde_json::Value> {
        self.constraint_metadata
            .as_ref()
            .and_then(|meta| meta.get(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VarOptions;
    use ridge_expr::LinearExpr;

    #[test]
    fn variable_names_default_deterministically() {
        let mut model = Model::new();
        let a = model.add_variable(VarOptions::new()).unwrap();
        let b = model.add_named_variable(VarOptions::new(), "load").unwrap();

        assert_eq!(model.variable_name(a).unwrap(), "x0");
        assert_eq!(model.variable_name(b).unwrap(), "load");
        assert!(model.stored_variable_name(a).is_none());
    }

    #[test]
    fn variable_lookup_by_name_ignores_defaults() {
        let mut model = Model::new();
        let a = model.add_variable(VarOptions::new()).unwrap();
        model.set_variable_name(a, "gen".to_string()).unwrap();

        assert_eq!(model.variable_by_name("gen"), Some(a));
        assert_eq!(model.variable_by_name("x0"), None);
    }

    #[test]
    fn constraint_names_round_trip() {
        let mut model = Model::new();
        let x = model.add_variable(VarOptions::new()).unwrap();
        let c = model.add_constraint((x * 1.0).le_scalar(1.0)).unwrap();

        assert!(model.constraint_name(c).is_none());
        model.set_constraint_name(c, "cap".to_string()).unwrap();
        assert_eq!(model.constraint_name(c), Some("cap"));
        assert_eq!(model.constraint_by_name("cap"), Some(c));
    }

    #[test]
    fn metadata_is_lazily_allocated() {
        let mut model = Model::new();
        let x = model.add_variable(VarOptions::new()).unwrap();
        assert!(model.variable_metadata(x).is_none());

        model
            .set_variable_metadata(x, serde_json::json!({"unit": "MW"}))
            .unwrap();
        assert_eq!(
            model.variable_metadata(x).unwrap()["unit"],
            serde_json::json!("MW")
        );
    }
}
