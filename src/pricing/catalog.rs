use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use super::error::PricingError;

/// Products a client can order. The wire names are the values stored in the
/// `software_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Photo booth package; the only product that offers the darkroom file add-on.
    #[serde(rename = "darkroom_booth_3")]
    DarkroomBooth3,
    Photoshop,
    Illustrator,
    AfterEffects,
}

impl ProductType {
    pub const ALL: [ProductType; 4] = [
        ProductType::DarkroomBooth3,
        ProductType::Photoshop,
        ProductType::Illustrator,
        ProductType::AfterEffects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::DarkroomBooth3 => "darkroom_booth_3",
            ProductType::Photoshop => "photoshop",
            ProductType::Illustrator => "illustrator",
            ProductType::AfterEffects => "after_effects",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|product| product.as_str() == s)
            .ok_or_else(|| PricingError::UnknownProductType(s.to_string()))
    }
}

/// Delivery-speed tiers, slowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Turnaround {
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "2d")]
    TwoDays,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "12h")]
    TwelveHours,
}

impl Turnaround {
    pub const ALL: [Turnaround; 4] = [
        Turnaround::ThreeDays,
        Turnaround::TwoDays,
        Turnaround::OneDay,
        Turnaround::TwelveHours,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Turnaround::ThreeDays => "3d",
            Turnaround::TwoDays => "2d",
            Turnaround::OneDay => "1d",
            Turnaround::TwelveHours => "12h",
        }
    }
}

impl fmt::Display for Turnaround {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Turnaround {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| PricingError::UnknownTurnaround(s.to_string()))
    }
}
