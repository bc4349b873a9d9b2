//! Expression trees for constraint bodies.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::EvalError;
use crate::model::{Evaluable, VarId, VariableLookup};

/// An expression tree node for constraint bodies.
///
/// Expressions are evaluated against a [`VariableLookup`] and produce an
/// `f64`. Arithmetic that has no finite result (division by zero, overflow)
/// evaluates to NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(f64),
    Var(VarId),
    /// `coef * var`, the building block of linear expressions.
    Term {
        coef: f64,
        var: VarId,
    },
    Sum(Vec<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Abs(Box<Expr>),
    Min(Box<Expr>, Box<Expr>),
    Max(Box<Expr>, Box<Expr>),

    /// A node the modeling layer could not build. Evaluating it always fails.
    Malformed(String),
}

impl Expr {
    // Constructors for common expressions

    pub fn constant(value: f64) -> Self {
        Expr::Const(value)
    }

    pub fn var(var: VarId) -> Self {
        Expr::Var(var)
    }

    pub fn term(coef: f64, var: VarId) -> Self {
        Expr::Term { coef, var }
    }

    /// `constant + sum(coef * var)`.
    pub fn linear(terms: impl IntoIterator<Item = (f64, VarId)>, constant: f64) -> Self {
        let mut parts: Vec<Expr> = terms
            .into_iter()
            .map(|(coef, var)| Expr::term(coef, var))
            .collect();
        if constant != 0.0 {
            parts.push(Expr::Const(constant));
        }
        Expr::Sum(parts)
    }

    pub fn sum(parts: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Sum(parts.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Expr::Pow(Box::new(base), Box::new(exponent))
    }

    pub fn abs(expr: Expr) -> Self {
        Expr::Abs(Box::new(expr))
    }

    pub fn min(left: Expr, right: Expr) -> Self {
        Expr::Min(Box::new(left), Box::new(right))
    }

    pub fn max(left: Expr, right: Expr) -> Self {
        Expr::Max(Box::new(left), Box::new(right))
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Expr::Malformed(reason.into())
    }

    /// Evaluates the expression, mapping non-finite results to NaN.
    pub fn eval(&self, lookup: &dyn VariableLookup) -> Result<f64, EvalError> {
        let value = eval_node(self, lookup)?;
        Ok(if value.is_finite() { value } else { f64::NAN })
    }
}

fn eval_var(var: VarId, lookup: &dyn VariableLookup) -> Result<f64, EvalError> {
    lookup
        .value(var)?
        .ok_or(EvalError::Unassigned { variable: var })
}

fn eval_node(expr: &Expr, lookup: &dyn VariableLookup) -> Result<f64, EvalError> {
    let value = match expr {
        Expr::Const(v) => *v,
        Expr::Var(var) => eval_var(*var, lookup)?,
        Expr::Term { coef, var } => coef * eval_var(*var, lookup)?,
        Expr::Sum(parts) => {
            let mut total = 0.0;
            for part in parts {
                total += eval_node(part, lookup)?;
            }
            total
        }
        Expr::Add(l, r) => eval_node(l, lookup)? + eval_node(r, lookup)?,
        Expr::Sub(l, r) => eval_node(l, lookup)? - eval_node(r, lookup)?,
        Expr::Mul(l, r) => eval_node(l, lookup)? * eval_node(r, lookup)?,
        Expr::Div(l, r) => {
            let numerator = eval_node(l, lookup)?;
            let denominator = eval_node(r, lookup)?;
            if denominator == 0.0 {
                f64::NAN
            } else {
                numerator / denominator
            }
        }
        Expr::Pow(base, exponent) => eval_node(base, lookup)?.powf(eval_node(exponent, lookup)?),
        Expr::Neg(inner) => -eval_node(inner, lookup)?,
        Expr::Abs(inner) => eval_node(inner, lookup)?.abs(),
        // f64::min/max drop NaN operands, which would hide an undefined side.
        Expr::Min(l, r) => {
            let (a, b) = (eval_node(l, lookup)?, eval_node(r, lookup)?);
            if a.is_nan() || b.is_nan() {
                f64::NAN
            } else {
                a.min(b)
            }
        }
        Expr::Max(l, r) => {
            let (a, b) = (eval_node(l, lookup)?, eval_node(r, lookup)?);
            if a.is_nan() || b.is_nan() {
                f64::NAN
            } else {
                a.max(b)
            }
        }
        Expr::Malformed(reason) => return Err(EvalError::Malformed(reason.clone())),
    };
    Ok(value)
}

impl Evaluable for Expr {
    fn evaluate(&self, lookup: &dyn VariableLookup) -> Result<f64, EvalError> {
        self.eval(lookup)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Const(value)
    }
}

impl From<VarId> for Expr {
    fn from(var: VarId) -> Self {
        Expr::Var(var)
    }
}

// Implement std::ops traits for operator syntax

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(Box::new(self), Box::new(rhs))
    }
}

impl Add<f64> for Expr {
    type Output = Expr;

    fn add(self, rhs: f64) -> Self::Output {
        self + Expr::Const(rhs)
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(Box::new(self), Box::new(rhs))
    }
}

impl Sub<f64> for Expr {
    type Output = Expr;

    fn sub(self, rhs: f64) -> Self::Output {
        self - Expr::Const(rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(Box::new(self), Box::new(rhs))
    }
}

impl Mul<Expr> for f64 {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Self::Output {
        Expr::Const(self) * rhs
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(Box::new(self), Box::new(rhs))
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        Expr::Neg(Box::new(self))
    }
}
