use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use super::catalog::{ProductType, Turnaround};
use super::error::PricingError;

/// Pricing for one product type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRule {
    #[serde(default)]
    pub base: f64,
    /// Flat surcharge for the darkroom file add-on. `None` means the product
    /// does not offer the add-on and the flag is ignored.
    #[serde(default)]
    pub add_on_surcharge: Option<f64>,
}

/// Pricing for one turnaround tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRule {
    #[serde(default)]
    pub fee: f64,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

fn check_value(key: String, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidRule { key, value })
    }
}

impl ProductRule {
    /// Rejects negative or non-finite amounts.
    pub fn check(&self, product: ProductType) -> Result<(), PricingError> {
        check_value(format!("products.{product}.base"), self.base)?;
        if let Some(surcharge) = self.add_on_surcharge {
            check_value(format!("products.{product}.add_on_surcharge"), surcharge)?;
        }
        Ok(())
    }
}

impl TierRule {
    /// Rejects negative or non-finite amounts.
    pub fn check(&self, tier: Turnaround) -> Result<(), PricingError> {
        check_value(format!("turnarounds.{tier}.fee"), self.fee)?;
        check_value(format!("turnarounds.{tier}.multiplier"), self.multiplier)
    }
}

/// The single source of pricing truth, injected into [`super::PricingEngine`].
///
/// The default is the flat fee-by-urgency table: no base price, a fee per
/// turnaround tier, and a surcharge of 10 for the darkroom file on the
/// darkroom booth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPricingTable")]
pub struct PricingTable {
    pub products: BTreeMap<ProductType, ProductRule>,
    pub turnarounds: BTreeMap<Turnaround, TierRule>,
}

/// Table as written in configuration: keys are wire names, checked against
/// the vocabulary on load.
#[derive(Deserialize)]
struct RawPricingTable {
    #[serde(default)]
    products: BTreeMap<String, ProductRule>,
    #[serde(default)]
    turnarounds: BTreeMap<String, TierRule>,
}

impl TryFrom<RawPricingTable> for PricingTable {
    type Error = PricingError;

    fn try_from(raw: RawPricingTable) -> Result<Self, Self::Error> {
        let products = raw
            .products
            .into_iter()
            .map(|(key, rule)| {
                let product = key.parse::<ProductType>()?;
                rule.check(product)?;
                Ok((product, rule))
            })
            .collect::<Result<_, PricingError>>()?;
        let turnarounds = raw
            .turnarounds
            .into_iter()
            .map(|(key, rule)| {
                let tier = key.parse::<Turnaround>()?;
                rule.check(tier)?;
                Ok((tier, rule))
            })
            .collect::<Result<_, PricingError>>()?;
        Ok(Self { products, turnarounds })
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        let products = ProductType::ALL
            .into_iter()
            .map(|product| {
                let add_on_surcharge = (product == ProductType::DarkroomBooth3).then_some(10.0);
                (product, ProductRule { base: 0.0, add_on_surcharge })
            })
            .collect();

        let turnarounds = [
            (Turnaround::ThreeDays, 15.0),
            (Turnaround::TwoDays, 20.0),
            (Turnaround::OneDay, 25.0),
            (Turnaround::TwelveHours, 30.0),
        ]
        .into_iter()
        .map(|(tier, fee)| (tier, TierRule { fee, multiplier: 1.0 }))
        .collect();

        Self { products, turnarounds }
    }
}

impl PricingTable {
    pub fn product(&self, product: ProductType) -> Option<&ProductRule> {
        self.products.get(&product)
    }

    pub fn turnaround(&self, tier: Turnaround) -> Option<&TierRule> {
        self.turnarounds.get(&tier)
    }

    /// Fails on the first product type or turnaround tier the table does not
    /// price, so an incomplete table is caught at startup rather than at
    /// submission.
    pub fn check_complete(&self) -> Result<(), PricingError> {
        if let Some(product) = ProductType::ALL.into_iter().find(|p| !self.products.contains_key(p)) {
            return Err(PricingError::MissingProductRule(product));
        }
        if let Some(tier) = Turnaround::ALL.into_iter().find(|t| !self.turnarounds.contains_key(t)) {
            return Err(PricingError::MissingTurnaroundRule(tier));
        }
        Ok(())
    }
}
