//! Steady-state unit-economics validation
//!
//! Independent of the month-by-month projection: evaluates a single mature
//! subscriber at the blended CAC and fixed opex, then grades the result
//! against the targets in [`UnitEconomicsInputs`].

use crate::assumptions::{Assumptions, UnitEconomicsInputs};
use serde::{Deserialize, Serialize};

/// Health grade for one metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    NeedsImprovement,
    Poor,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::NeedsImprovement => "Needs Improvement",
            HealthStatus::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub metric: String,
    pub value: f64,
    pub target: f64,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEconomicsReport {
    // Revenue and cost per user
    pub arpu: f64,
    pub cost_per_user: f64,
    pub gross_profit_per_user: f64,
    pub gross_margin: f64,

    // Lifetime value
    pub monthly_retention: f64,
    pub customer_lifetime_months: f64,
    pub ltv: f64,

    // Acquisition efficiency
    pub cac: f64,
    pub ltv_cac_ratio: f64,
    pub payback_months: f64,
    pub magic_number: f64,

    // Steady-state break-even
    pub fixed_monthly_opex: f64,
    pub users_needed_for_break_even: u64,
    pub mrr_needed_for_break_even: f64,

    pub health_checks: Vec<HealthCheck>,
}

impl UnitEconomicsReport {
    pub fn is_healthy(&self) -> bool {
        self.health_checks
            .iter()
            .all(|c| matches!(c.status, HealthStatus::Excellent | HealthStatus::Good))
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub struct UnitEconomics;

impl UnitEconomics {
    /// Evaluate unit economics for the given assumptions
    pub fn validate(assumptions: &Assumptions) -> UnitEconomicsReport {
        let inputs = &assumptions.pricing.unit_economics;
        let arpu = assumptions.pricing.arpu;
        let cost_per_user = assumptions.costs.cogs_per_user();

        let gross_margin = if arpu != 0.0 { 1.0 - cost_per_user / arpu } else { 0.0 };
        let gross_profit_per_user = arpu * gross_margin;

        let customer_lifetime_months = ratio(1.0, 1.0 - inputs.monthly_retention);
        let ltv = arpu * customer_lifetime_months * gross_margin;

        let cac = inputs.blended_cac;
        let ltv_cac_ratio = ratio(ltv, cac);
        let payback_months = ratio(cac, gross_profit_per_user);
        let magic_number = ratio(gross_profit_per_user * 12.0, cac);

        let fixed_monthly_opex = inputs.fixed_monthly_opex();
        let users_needed = ratio(fixed_monthly_opex, gross_profit_per_user);
        let users_needed_for_break_even = if users_needed > 0.0 { users_needed.floor() as u64 } else { 0 };
        let mrr_needed_for_break_even = ratio(fixed_monthly_opex, gross_margin);

        let health_checks = health_checks(inputs, ltv_cac_ratio, payback_months, gross_margin);

        log::info!(
            "Unit economics: LTV ${:.2}, CAC ${:.2}, LTV/CAC {:.2}x, payback {:.1} months",
            ltv, cac, ltv_cac_ratio, payback_months
        );

        UnitEconomicsReport {
            arpu,
            cost_per_user,
            gross_profit_per_user,
            gross_margin,
            monthly_retention: inputs.monthly_retention,
            customer_lifetime_months,
            ltv,
            cac,
            ltv_cac_ratio,
            payback_months,
            magic_number,
            fixed_monthly_opex,
            users_needed_for_break_even,
            mrr_needed_for_break_even,
            health_checks,
        }
    }
}

fn health_checks(
    inputs: &UnitEconomicsInputs,
    ltv_cac_ratio: f64,
    payback_months: f64,
    gross_margin: f64,
) -> Vec<HealthCheck> {
    let ltv_cac_status = if ltv_cac_ratio > inputs.ltv_cac_target {
        HealthStatus::Excellent
    } else {
        HealthStatus::NeedsImprovement
    };

    let payback_status = if payback_months < inputs.payback_target_months {
        HealthStatus::Excellent
    } else {
        HealthStatus::NeedsImprovement
    };

    let margin_status = if gross_margin > inputs.gross_margin_target {
        HealthStatus::Excellent
    } else if gross_margin > inputs.gross_margin_floor {
        HealthStatus::Good
    } else {
        HealthStatus::Poor
    };

    vec![
        HealthCheck {
            metric: "ltv_cac_ratio".to_string(),
            value: ltv_cac_ratio,
            target: inputs.ltv_cac_target,
            status: ltv_cac_status,
        },
        HealthCheck {
            metric: "payback_months".to_string(),
            value: payback_months,
            target: inputs.payback_target_months,
            status: payback_status,
        },
        HealthCheck {
            metric: "gross_margin".to_string(),
            value: gross_margin,
            target: inputs.gross_margin_target,
            status: margin_status,
        },
    ]
}
