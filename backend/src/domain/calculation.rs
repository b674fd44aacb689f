//! Calculation records and the value types that feed them.
//!
//! A [`Calculation`] stores an operation kind, its two operands and the derived
//! result. The result is never supplied by callers; the lifecycle service
//! recomputes it whenever the kind or operands change.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OperationKind, UserId};

/// Identifier of a calculation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationId(Uuid);

impl CalculationId {
    /// Generate a fresh v4 identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CalculationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CalculationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Reasons a list of numbers cannot be used as operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OperandsError {
    /// The list did not hold exactly two values.
    #[error("inputs must contain exactly two numbers, got {len}")]
    Arity { len: usize },
    /// A value was NaN or infinite.
    #[error("inputs must be finite numbers")]
    NonFinite,
}

/// Ordered pair of finite operands.
///
/// Serialises as a two-element JSON array.
///
/// # Examples
/// ```
/// use calculations::domain::{Operands, OperandsError};
///
/// let operands = Operands::try_from(vec![3.0, 4.0]).expect("two numbers");
/// assert_eq!(operands.first(), 3.0);
/// assert_eq!(operands.second(), 4.0);
/// assert_eq!(
///     Operands::try_from(vec![1.0]),
///     Err(OperandsError::Arity { len: 1 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Operands([f64; 2]);

impl Operands {
    /// Pair two values without checking them.
    ///
    /// Use [`TryFrom`] for caller input; this is for values already known to
    /// be finite, such as rows read back from storage.
    pub const fn new(first: f64, second: f64) -> Self {
        Self([first, second])
    }

    pub fn first(&self) -> f64 {
        self.0[0]
    }

    pub fn second(&self) -> f64 {
        self.0[1]
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}

impl TryFrom<Vec<f64>> for Operands {
    type Error = OperandsError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        let pair: [f64; 2] = value
            .as_slice()
            .try_into()
            .map_err(|_| OperandsError::Arity { len: value.len() })?;
        if pair.iter().any(|v| !v.is_finite()) {
            return Err(OperandsError::NonFinite);
        }
        Ok(Self(pair))
    }
}

impl From<Operands> for [f64; 2] {
    fn from(value: Operands) -> Self {
        value.0
    }
}

/// A persisted calculation.
///
/// ## Invariants
/// - `result` equals `operation_kind` applied to `inputs` in order.
/// - `id` and `owner_id` never change after creation.
/// - `revision` starts at 1 and increases by one per committed update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Calculation {
    pub id: CalculationId,
    pub owner_id: UserId,
    pub operation_kind: OperationKind,
    pub inputs: Operands,
    pub result: f64,
    pub revision: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values needed to persist a new calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCalculation {
    pub owner_id: UserId,
    pub operation_kind: OperationKind,
    pub inputs: Operands,
    pub result: f64,
}

/// Stored fields to overwrite in one update.
///
/// Absent fields keep their stored value. The lifecycle service always sets
/// `result` alongside any change to the kind or operands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationPatch {
    pub operation_kind: Option<OperationKind>,
    pub inputs: Option<Operands>,
    pub result: Option<f64>,
}

impl CalculationPatch {
    /// Apply the present fields to `calculation`.
    pub fn apply_to(&self, calculation: &mut Calculation) {
        if let Some(kind) = self.operation_kind {
            calculation.operation_kind = kind;
        }
        if let Some(inputs) = self.inputs {
            calculation.inputs = inputs;
        }
        if let Some(result) = self.result {
            calculation.result = result;
        }
    }
}

/// Caller-editable fields of an existing calculation.
///
/// `result` is not editable; it is always recomputed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationChanges {
    pub operation_kind: Option<String>,
    pub inputs: Option<Vec<f64>>,
}

impl CalculationChanges {
    pub fn is_empty(&self) -> bool {
        self.operation_kind.is_none() && self.inputs.is_none()
    }
}
