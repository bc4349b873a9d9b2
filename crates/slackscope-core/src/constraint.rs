//! Constraint handles and bound descriptors.
//!
//! A [`ConstraintRef`] identifies a constraint inside the model that produced
//! it. Bounds are explicit sum types so that "no limit" is never confused with
//! a finite value such as zero.

use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a constraint within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintId(pub usize);

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference to a constraint for identification.
///
/// Identity is the [`ConstraintId`]; the name is carried for display only.
///
/// # Example
///
/// ```
/// use slackscope_core::{ConstraintId, ConstraintRef};
///
/// let a = ConstraintRef::new(ConstraintId(0), "demand");
/// let b = ConstraintRef::new(ConstraintId(0), "renamed");
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "demand");
/// ```
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintRef {
    /// Identifier assigned by the model.
    pub id: ConstraintId,
    /// Name of the constraint.
    pub name: String,
}

impl ConstraintRef {
    /// Creates a new constraint reference.
    pub fn new(id: ConstraintId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the constraint name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for ConstraintRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for ConstraintRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ConstraintRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.id)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// One side of a constraint's bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Bound {
    /// A finite limit.
    Finite(f64),
    /// No limit on this side.
    Unbounded,
}

impl Bound {
    /// Creates a bound from a raw value. Non-finite values mean "no limit".
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Bound::Finite(value)
        } else {
            Bound::Unbounded
        }
    }

    /// Creates a bound from an optional value.
    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(Bound::Unbounded, Bound::new)
    }

    /// Returns the finite value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Bound::Finite(v) => Some(*v),
            Bound::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }
}

impl From<Option<f64>> for Bound {
    fn from(value: Option<f64>) -> Self {
        Bound::from_option(value)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Finite(v) => write!(f, "{}", v),
            Bound::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Lower and upper bounds of a constraint.
///
/// # Example
///
/// ```
/// use slackscope_core::{Bound, ConstraintBounds};
///
/// let eq = ConstraintBounds::equal_to(10.0);
/// assert!(eq.is_equality());
///
/// let ge = ConstraintBounds::at_least(5.0);
/// assert_eq!(ge.lower, Bound::Finite(5.0));
/// assert_eq!(ge.upper, Bound::Unbounded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintBounds {
    pub lower: Bound,
    pub upper: Bound,
}

impl ConstraintBounds {
    pub fn new(lower: Bound, upper: Bound) -> Self {
        Self { lower, upper }
    }

    /// `body >= lower`.
    pub fn at_least(lower: f64) -> Self {
        Self::new(Bound::new(lower), Bound::Unbounded)
    }

    /// `body <= upper`.
    pub fn at_most(upper: f64) -> Self {
        Self::new(Bound::Unbounded, Bound::new(upper))
    }

    /// `body == value`.
    pub fn equal_to(value: f64) -> Self {
        Self::new(Bound::new(value), Bound::new(value))
    }

    /// `lower <= body <= upper`.
    pub fn between(lower: f64, upper: f64) -> Self {
        Self::new(Bound::new(lower), Bound::new(upper))
    }

    /// No bound on either side.
    pub fn free() -> Self {
        Self::new(Bound::Unbounded, Bound::Unbounded)
    }

    /// Returns true when both sides are finite and equal.
    pub fn is_equality(&self) -> bool {
        matches!((self.lower, self.upper), (Bound::Finite(l), Bound::Finite(u)) if l == u)
    }

    /// Returns true when neither side is bounded.
    pub fn is_free(&self) -> bool {
        self.lower.is_unbounded() && self.upper.is_unbounded()
    }

    /// Returns the bounds as a `(lower, upper)` pair.
    pub fn as_pair(&self) -> (Bound, Bound) {
        (self.lower, self.upper)
    }
}

impl fmt::Display for ConstraintBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower, self.upper) {
            _ if self.is_equality() => write!(f, "== {}", self.lower),
            (Bound::Finite(l), Bound::Unbounded) => write!(f, ">= {}", l),
            (Bound::Unbounded, Bound::Finite(u)) => write!(f, "<= {}", u),
            (Bound::Finite(l), Bound::Finite(u)) => write!(f, "in [{}, {}]", l, u),
            (Bound::Unbounded, Bound::Unbounded) => f.write_str("free"),
        }
    }
}
