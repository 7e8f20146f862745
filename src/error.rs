use std::{fmt, error::Error};
use crate::{Weight, MultisetId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatesError {
    ContractViolation(Vec<Weight>),
    UnsupportedCostFunction(String),
    InvariantViolation(String),
    WayOutOfBounds { total: Weight, weight: Weight, bound: Weight },
    WeightOverflow,
    MultisetMissingForId(MultisetId),
}

impl PlatesError {
    pub fn description(&self) -> &str {
        use PlatesError::*;

        match self {
            ContractViolation(_) => "Not all weights could be found in source",
            UnsupportedCostFunction(_) => "Unrecognized cost function",
            InvariantViolation(_) => "Internal invariant violated",
            WayOutOfBounds { .. } => "Combined weight is out of bounds",
            WeightOverflow => "Sum of weights overflows",
            MultisetMissingForId(_) => "Multiset is missing for ID",
        }
    }
}

impl fmt::Display for PlatesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use PlatesError::*;

        match self {
            ContractViolation(leftover) => {
                write!(f, "Not all weights could be found in source (left over: {:?})", leftover)
            }
            UnsupportedCostFunction(name) => write!(f, "Unrecognized cost function: {}", name),
            InvariantViolation(what) => write!(f, "Internal invariant violated: {}", what),
            WayOutOfBounds { total, weight, bound } => write!(
                f,
                "Combined weight {} + {} is out of bounds (maximum is {})",
                total, weight, bound
            ),
            MultisetMissingForId(id) => write!(f, "Multiset is missing for ID {}", id.get()),
            _ => write!(f, "{}", self.description()),
        }
    }
}

impl Error for PlatesError {}
