use thiserror::Error;
use super::catalog::{ProductType, Turnaround};

/// Configuration errors raised instead of pricing an order at a silent discount.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    #[error("Unknown product type: {0}")]
    UnknownProductType(String),
    #[error("Unknown turnaround time: {0}")]
    UnknownTurnaround(String),
    #[error("Pricing table has no rule for product type {0}")]
    MissingProductRule(ProductType),
    #[error("Pricing table has no rule for turnaround time {0}")]
    MissingTurnaroundRule(Turnaround),
    #[error("Pricing rule {key} must be a non-negative number, got {value}")]
    InvalidRule { key: String, value: f64 },
}
