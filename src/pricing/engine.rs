use tracing::{instrument, warn};
use super::catalog::{ProductType, Turnaround};
use super::error::PricingError;
use super::table::PricingTable;

/// Computes order prices from an injected [`PricingTable`].
///
/// Pure: the engine holds no state besides the table, so identical inputs
/// always produce identical prices.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    table: PricingTable,
}

impl PricingEngine {
    pub fn new(table: PricingTable) -> Self {
        Self { table }
    }

    /// `(base + tier fee + add-on surcharge) * tier multiplier`, rounded to cents.
    ///
    /// # Errors
    /// [`PricingError::MissingProductRule`] or [`PricingError::MissingTurnaroundRule`]
    /// when the table does not cover the inputs, [`PricingError::InvalidRule`]
    /// when a rule it uses holds a negative or non-finite amount.
    pub fn compute_price(
        &self,
        product: ProductType,
        turnaround: Turnaround,
        has_add_on_file: bool,
    ) -> Result<f64, PricingError> {
        let product_rule = self
            .table
            .product(product)
            .ok_or(PricingError::MissingProductRule(product))?;
        let tier_rule = self
            .table
            .turnaround(turnaround)
            .ok_or(PricingError::MissingTurnaroundRule(turnaround))?;
        product_rule.check(product)?;
        tier_rule.check(turnaround)?;

        let mut price = product_rule.base + tier_rule.fee;
        if has_add_on_file {
            price += product_rule.add_on_surcharge.unwrap_or(0.0);
        }
        Ok(round_to_cents(price * tier_rule.multiplier))
    }

    /// Prices raw form values, failing on anything outside the vocabulary.
    pub fn quote(
        &self,
        product: &str,
        turnaround: &str,
        has_add_on_file: bool,
    ) -> Result<f64, PricingError> {
        self.compute_price(product.parse()?, turnaround.parse()?, has_add_on_file)
    }

    /// Legacy fallback pricing: unknown products and tiers contribute nothing
    /// instead of failing. Never used for order submission.
    #[instrument(skip(self))]
    pub fn quote_lenient(&self, product: &str, turnaround: &str, has_add_on_file: bool) -> f64 {
        let product_rule = match product.parse::<ProductType>() {
            Ok(product) => self.table.product(product),
            Err(e) => {
                warn!(error = %e, "Pricing unknown product at zero");
                None
            }
        };
        let tier_rule = match turnaround.parse::<Turnaround>() {
            Ok(tier) => self.table.turnaround(tier),
            Err(e) => {
                warn!(error = %e, "Pricing unknown turnaround at zero");
                None
            }
        };

        let mut price = product_rule.map_or(0.0, |rule| rule.base);
        price += tier_rule.map_or(0.0, |rule| rule.fee);
        if has_add_on_file {
            price += product_rule.and_then(|rule| rule.add_on_surcharge).unwrap_or(0.0);
        }
        round_to_cents(price * tier_rule.map_or(1.0, |rule| rule.multiplier))
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
