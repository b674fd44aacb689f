//! Arithmetic operation kinds and the process-wide dispatch table.
//!
//! The set of operations is closed. [`OperationRegistry`] is the single source
//! of truth for which kinds are valid: it is built once on first use and never
//! mutated, so concurrent requests read it without locking.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::Operands;

/// Arithmetic operation applied to an ordered pair of operands.
///
/// # Examples
/// ```
/// use calculations::domain::OperationKind;
///
/// let kind: OperationKind = "division".parse().expect("known kind");
/// assert_eq!(kind, OperationKind::Division);
/// assert_eq!(kind.as_str(), "division");
/// assert!("exponentiation".parse::<OperationKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// `a + b`
    Addition,
    /// `a - b`
    Subtraction,
    /// `a * b`
    Multiplication,
    /// `a / b`
    Division,
}

impl OperationKind {
    /// Every recognised kind.
    pub const ALL: [Self; 4] = [
        Self::Addition,
        Self::Subtraction,
        Self::Multiplication,
        Self::Division,
    ];

    /// Wire and storage spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when an operation kind is not one of the recognised kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation: {kind}")]
pub struct UnknownOperation {
    /// The rejected input.
    pub kind: String,
}

impl FromStr for OperationKind {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownOperation { kind: s.to_owned() })
    }
}

/// Numeric-domain failures raised by operation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    /// The divisor was zero.
    #[error("cannot divide by zero")]
    DivisionByZero,
    /// The result overflowed the representable range.
    #[error("result is not a finite number")]
    NonFiniteResult,
}

/// Pure two-argument numeric function.
pub type BinaryOperation = fn(f64, f64) -> Result<f64, ArithmeticError>;

fn finite(value: f64) -> Result<f64, ArithmeticError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ArithmeticError::NonFiniteResult)
    }
}

fn add(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    finite(a + b)
}

fn subtract(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    finite(a - b)
}

fn multiply(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    finite(a * b)
}

fn divide(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    finite(a / b)
}

/// An operation kind paired with its function.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedOperation {
    kind: OperationKind,
    function: BinaryOperation,
}

impl ResolvedOperation {
    /// The resolved kind.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Apply the function to the operands in order.
    ///
    /// # Examples
    /// ```
    /// use calculations::domain::{ArithmeticError, OperationRegistry, Operands};
    ///
    /// let division = OperationRegistry::global().resolve("division").expect("known");
    /// assert_eq!(division.apply(&Operands::new(10.0, 4.0)), Ok(2.5));
    /// assert_eq!(
    ///     division.apply(&Operands::new(5.0, 0.0)),
    ///     Err(ArithmeticError::DivisionByZero)
    /// );
    /// ```
    pub fn apply(&self, operands: &Operands) -> Result<f64, ArithmeticError> {
        (self.function)(operands.first(), operands.second())
    }
}

/// Immutable mapping from operation kind to function.
#[derive(Debug)]
pub struct OperationRegistry {
    table: HashMap<OperationKind, BinaryOperation>,
}

static REGISTRY: OnceLock<OperationRegistry> = OnceLock::new();

impl OperationRegistry {
    /// The process-wide registry, built on first access.
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::standard)
    }

    fn standard() -> Self {
        let table = HashMap::from([
            (OperationKind::Addition, add as BinaryOperation),
            (OperationKind::Subtraction, subtract as BinaryOperation),
            (OperationKind::Multiplication, multiply as BinaryOperation),
            (OperationKind::Division, divide as BinaryOperation),
        ]);
        Self { table }
    }

    /// Look up the function for a raw operation kind.
    pub fn resolve(&self, kind: &str) -> Result<ResolvedOperation, UnknownOperation> {
        let parsed: OperationKind = kind.parse()?;
        self.table
            .get(&parsed)
            .map(|function| ResolvedOperation {
                kind: parsed,
                function: *function,
            })
            .ok_or_else(|| UnknownOperation {
                kind: kind.to_owned(),
            })
    }
}
