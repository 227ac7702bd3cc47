use std::fmt;
use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::pricing::{ProductType, Turnaround};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => f.write_str("pending"),
        }
    }
}

/// A submitted print job as stored in the orders table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: String,
    pub client_id: String,
    pub event_name: String,
    pub software_type: ProductType,
    pub dimensions: String,
    pub turnaround_time: Turnaround,
    pub has_darkroom_file: bool,
    pub price: f64,
    pub status: OrderStatus,
    /// Assigned by the table when the record is inserted.
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for the orders table.
///
/// Serializes to the row shape `{event_name, software_type, dimensions,
/// turnaround_time, has_darkroom_file, price}`; ownership travels separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCreate {
    #[serde(skip)]
    pub client_id: String,
    pub event_name: String,
    pub software_type: ProductType,
    pub dimensions: String,
    pub turnaround_time: Turnaround,
    pub has_darkroom_file: bool,
    pub price: f64,
}
