//! In-memory optimization model.

use std::collections::HashMap;

use crate::constraint::{ConstraintBounds, ConstraintId, ConstraintRef};
use crate::error::{EvalError, ModelError, Result};
use crate::expr::Expr;

use super::{Evaluable, OptimizationModel, VarId, VariableLookup};

#[derive(Debug, Clone)]
struct Variable {
    name: String,
    value: Option<f64>,
}

#[derive(Debug, Clone)]
struct Constraint {
    name: String,
    body: Expr,
    bounds: ConstraintBounds,
    active: bool,
}

/// A model holding variables, expression-bodied constraints and an optional
/// dual suffix.
///
/// # Example
///
/// ```
/// use slackscope_core::{ConstraintBounds, Expr, LinearModel, OptimizationModel};
///
/// let mut model = LinearModel::new();
/// let x = model.add_variable("x");
/// let c = model.add_constraint("min_x", Expr::var(x), ConstraintBounds::at_least(5.0));
/// model.set_value(x, 7.0).unwrap();
///
/// assert_eq!(model.active_constraints(), vec![c.clone()]);
/// assert_eq!(model.dual(&c), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearModel {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    duals: Option<HashMap<ConstraintId, f64>>,
}

impl LinearModel {
    /// Creates an empty model without a dual suffix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an unassigned variable.
    pub fn add_variable(&mut self, name: impl Into<String>) -> VarId {
        self.variables.push(Variable {
            name: name.into(),
            value: None,
        });
        VarId(self.variables.len() - 1)
    }

    /// Assigns a value to `var`.
    pub fn set_value(&mut self, var: VarId, value: f64) -> Result<()> {
        self.variable_mut(var)?.value = Some(value);
        Ok(())
    }

    /// Removes the value of `var`.
    pub fn clear_value(&mut self, var: VarId) -> Result<()> {
        self.variable_mut(var)?.value = None;
        Ok(())
    }

    /// Returns the declared name of `var`.
    pub fn variable_name(&self, var: VarId) -> Option<&str> {
        self.variables.get(var.0).map(|v| v.name.as_str())
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Declares an active constraint `bounds.lower <= body <= bounds.upper`.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        body: impl Into<Expr>,
        bounds: ConstraintBounds,
    ) -> ConstraintRef {
        let name = name.into();
        let id = ConstraintId(self.constraints.len());
        self.constraints.push(Constraint {
            name: name.clone(),
            body: body.into(),
            bounds,
            active: true,
        });
        ConstraintRef::new(id, name)
    }

    /// Excludes `constraint` from [`OptimizationModel::active_constraints`].
    pub fn deactivate(&mut self, constraint: &ConstraintRef) -> Result<()> {
        self.constraint_mut(constraint)?.active = false;
        Ok(())
    }

    /// Re-includes a deactivated constraint.
    pub fn activate(&mut self, constraint: &ConstraintRef) -> Result<()> {
        self.constraint_mut(constraint)?.active = true;
        Ok(())
    }

    /// Declares the dual suffix. Constraints without a stored value still
    /// report no dual.
    pub fn enable_duals(&mut self) {
        self.duals.get_or_insert_with(HashMap::new);
    }

    /// Stores a dual value, declaring the suffix if needed.
    pub fn set_dual(&mut self, constraint: &ConstraintRef, value: f64) -> Result<()> {
        self.constraint(constraint)?;
        self.duals
            .get_or_insert_with(HashMap::new)
            .insert(constraint.id, value);
        Ok(())
    }

    /// Drops the dual suffix entirely.
    pub fn clear_duals(&mut self) {
        self.duals = None;
    }

    pub fn has_dual_suffix(&self) -> bool {
        self.duals.is_some()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    fn variable_mut(&mut self, var: VarId) -> Result<&mut Variable> {
        self.variables
            .get_mut(var.0)
            .ok_or(ModelError::Eval(EvalError::UnknownVariable { variable: var }))
    }

    fn constraint(&self, constraint: &ConstraintRef) -> Result<&Constraint> {
        self.constraints
            .get(constraint.id.0)
            .ok_or_else(|| ModelError::UnknownConstraint(constraint.to_string()))
    }

    fn constraint_mut(&mut self, constraint: &ConstraintRef) -> Result<&mut Constraint> {
        self.constraints
            .get_mut(constraint.id.0)
            .ok_or_else(|| ModelError::UnknownConstraint(constraint.to_string()))
    }
}

impl VariableLookup for LinearModel {
    fn value(&self, variable: VarId) -> std::result::Result<Option<f64>, EvalError> {
        self.variables
            .get(variable.0)
            .map(|v| v.value)
            .ok_or(EvalError::UnknownVariable { variable })
    }
}

impl OptimizationModel for LinearModel {
    fn active_constraints(&self) -> Vec<ConstraintRef> {
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| c.active)
            .map(|(idx, c)| ConstraintRef::new(ConstraintId(idx), c.name.clone()))
            .collect()
    }

    fn constraint_body(&self, constraint: &ConstraintRef) -> Result<&dyn Evaluable> {
        Ok(&self.constraint(constraint)?.body)
    }

    fn constraint_bounds(&self, constraint: &ConstraintRef) -> Result<ConstraintBounds> {
        Ok(self.constraint(constraint)?.bounds)
    }

    fn dual(&self, constraint: &ConstraintRef) -> Option<f64> {
        self.duals.as_ref()?.get(&constraint.id).copied()
    }
}
