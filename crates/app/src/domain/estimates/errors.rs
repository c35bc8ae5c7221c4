//! Estimates service errors.

use thiserror::Error;
use tiffin::estimate::EstimateError;

use crate::domain::{
    errors::{ErrorClass, LookupError},
    estimates::store::EstimateStoreError,
};

/// Failures of the estimate build.
#[derive(Debug, Error)]
pub enum EstimatesServiceError {
    /// The cart was invalid, referenced unknown records or is not
    /// serviceable.
    #[error(transparent)]
    Calculation(#[from] EstimateError),

    /// A catalog lookup failed.
    #[error("catalog lookup failed")]
    Lookup(#[from] LookupError),

    /// Persisting the estimate failed; no estimate was written.
    #[error("failed to persist estimate")]
    Storage(#[from] EstimateStoreError),
}

impl EstimatesServiceError {
    /// The transport-facing class of this failure.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Calculation(EstimateError::Cart(_) | EstimateError::PriceOverflow) => {
                ErrorClass::Validation
            }
            Self::Calculation(
                EstimateError::SomeMerchantNotFound | EstimateError::SomeItemNotFound,
            ) => ErrorClass::NotFound,
            Self::Calculation(EstimateError::DistanceTooFar) => ErrorClass::Infeasible,
            Self::Lookup(_) | Self::Storage(_) => ErrorClass::Internal,
        }
    }
}
