//! Test utilities for slackscope-core
//!
//! Provides small model fixtures shared by the diagnostics crates' tests.

use crate::constraint::{ConstraintBounds, ConstraintRef};
use crate::expr::Expr;
use crate::model::{LinearModel, VarId};

/// A model with one variable `x` and one constraint `c` on `x` alone.
#[derive(Debug, Clone)]
pub struct SingleVarModel {
    pub model: LinearModel,
    pub x: VarId,
    pub c: ConstraintRef,
}

impl SingleVarModel {
    /// Creates the model with `x` unassigned.
    pub fn unassigned(bounds: ConstraintBounds) -> Self {
        let mut model = LinearModel::new();
        let x = model.add_variable("x");
        let c = model.add_constraint("c", Expr::var(x), bounds);
        Self { model, x, c }
    }

    /// Creates the model with `x = value`.
    pub fn assigned(bounds: ConstraintBounds, value: f64) -> Self {
        let mut fixture = Self::unassigned(bounds);
        fixture
            .model
            .set_value(fixture.x, value)
            .expect("fixture variable exists");
        fixture
    }
}

/// A small production-planning model used across tests.
///
/// Variables `x = 5`, `y = 5`, `z` unassigned; constraints in order:
/// - `capacity`: `x + y <= 12` (slack 2)
/// - `balance`:  `x + y == 10` (binding)
/// - `minimum`:  `x >= 7`      (violated by 2)
/// - `window`:   `1 <= y <= 5` (binding on the upper side)
/// - `pending`:  `x + z >= 0`  (undefined)
#[derive(Debug, Clone)]
pub struct PlanningFixture {
    pub model: LinearModel,
    pub x: VarId,
    pub y: VarId,
    pub z: VarId,
    pub capacity: ConstraintRef,
    pub balance: ConstraintRef,
    pub minimum: ConstraintRef,
    pub window: ConstraintRef,
    pub pending: ConstraintRef,
}

impl PlanningFixture {
    pub fn new() -> Self {
        let mut model = LinearModel::new();
        let x = model.add_variable("x");
        let y = model.add_variable("y");
        let z = model.add_variable("z");

        let capacity = model.add_constraint(
            "capacity",
            Expr::var(x) + Expr::var(y),
            ConstraintBounds::at_most(12.0),
        );
        let balance = model.add_constraint(
            "balance",
            Expr::linear([(1.0, x), (1.0, y)], 0.0),
            ConstraintBounds::equal_to(10.0),
        );
        let minimum = model.add_constraint("minimum", Expr::var(x), ConstraintBounds::at_least(7.0));
        let window = model.add_constraint("window", Expr::var(y), ConstraintBounds::between(1.0, 5.0));
        let pending = model.add_constraint(
            "pending",
            Expr::var(x) + Expr::var(z),
            ConstraintBounds::at_least(0.0),
        );

        model.set_value(x, 5.0).expect("fixture variable exists");
        model.set_value(y, 5.0).expect("fixture variable exists");

        Self {
            model,
            x,
            y,
            z,
            capacity,
            balance,
            minimum,
            window,
            pending,
        }
    }
}

impl Default for PlanningFixture {
    fn default() -> Self {
        Self::new()
    }
}
