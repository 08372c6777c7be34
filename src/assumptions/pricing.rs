//! Pricing, acquisition cost schedule and unit-economics targets

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Blended CAC by projection month with a default for unlisted months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacSchedule {
    points: BTreeMap<u32, f64>,
    default: f64,
}

impl CacSchedule {
    pub fn new(points: BTreeMap<u32, f64>, default: f64) -> Self {
        Self { points, default }
    }

    /// Exact-month lookup; no interpolation between listed months
    pub fn get(&self, month: u32) -> f64 {
        self.points.get(&month).copied().unwrap_or(self.default)
    }

    pub fn default_value(&self) -> f64 {
        self.default
    }

    pub fn points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.points.iter().map(|(&m, &c)| (m, c))
    }
}

impl Default for CacSchedule {
    fn default() -> Self {
        let points = [
            (1, 60.0),
            (2, 55.0),
            (3, 50.0),
            (6, 40.0),
            (12, 35.0),
            (18, 32.0),
            (24, 30.0),
        ]
        .into_iter()
        .collect();

        Self { points, default: 35.0 }
    }
}

/// Steady-state inputs for unit-economics validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEconomicsInputs {
    pub monthly_retention: f64,
    pub blended_cac: f64,
    pub product_dev: f64,
    pub sales_marketing: f64,
    pub general_admin: f64,
    pub ltv_cac_target: f64,
    pub payback_target_months: f64,
    pub gross_margin_target: f64,
    /// Margin above this (but below target) still rates "Good"
    pub gross_margin_floor: f64,
}

impl UnitEconomicsInputs {
    pub fn fixed_monthly_opex(&self) -> f64 {
        self.product_dev + self.sales_marketing + self.general_admin
    }
}

impl Default for UnitEconomicsInputs {
    fn default() -> Self {
        Self {
            monthly_retention: 0.95,
            blended_cac: 35.0,
            product_dev: 25_000.0,
            sales_marketing: 30_000.0,
            general_admin: 15_000.0,
            ltv_cac_target: 3.0,
            payback_target_months: 12.0,
            gross_margin_target: 0.70,
            gross_margin_floor: 0.60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingAssumptions {
    /// Pro tier monthly price, used as ARPU
    pub arpu: f64,
    pub cac: CacSchedule,
    /// Churn substituted when a phase has zero churn, for LTV lifetime
    pub ltv_fallback_churn: f64,
    pub unit_economics: UnitEconomicsInputs,
}

impl Default for PricingAssumptions {
    fn default() -> Self {
        Self {
            arpu: 15.0,
            cac: CacSchedule::default(),
            ltv_fallback_churn: 0.05,
            unit_economics: UnitEconomicsInputs::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cac_lookup() {
        let cac = CacSchedule::default();

        assert_eq!(cac.get(1), 60.0);
        assert_eq!(cac.get(6), 40.0);
        assert_eq!(cac.get(24), 30.0);
        // Unlisted months fall back to the default
        assert_eq!(cac.get(9), 35.0);
        assert_eq!(cac.get(4), 35.0);
        assert_eq!(cac.get(100), 35.0);
    }

    #[test]
    fn test_fixed_opex() {
        assert_eq!(UnitEconomicsInputs::default().fixed_monthly_opex(), 70_000.0);
    }
}
