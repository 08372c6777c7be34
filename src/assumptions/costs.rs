//! Cost structure: per-user COGS and the stepped operating expense schedule

use serde::{Deserialize, Serialize};

/// `base + per_month * months`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCost {
    pub base: f64,
    #[serde(default)]
    pub per_month: f64,
}

impl LinearCost {
    pub const fn flat(base: f64) -> Self {
        Self { base, per_month: 0.0 }
    }

    pub const fn growing(base: f64, per_month: f64) -> Self {
        Self { base, per_month }
    }

    pub fn at(&self, months: u32) -> f64 {
        self.base + months as f64 * self.per_month
    }
}

/// Operating expense lines for one regime of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpexLines {
    pub product_dev: LinearCost,
    pub sales_marketing: LinearCost,
    pub general_admin: LinearCost,
}

/// Evaluated operating expense for a month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OpexBreakdown {
    pub product_dev: f64,
    pub sales_marketing: f64,
    pub general_admin: f64,
}

impl OpexBreakdown {
    pub fn total(&self) -> f64 {
        self.product_dev + self.sales_marketing + self.general_admin
    }
}

/// Opex schedule with a single step increase
///
/// Up to and including `step_month` the early lines are evaluated at the
/// calendar month. After it, the late lines are evaluated at months elapsed
/// since the step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpexSchedule {
    pub step_month: u32,
    pub early: OpexLines,
    pub late: OpexLines,
}

impl OpexSchedule {
    pub fn breakdown(&self, month: u32) -> OpexBreakdown {
        let (lines, elapsed) = if month <= self.step_month {
            (&self.early, month)
        } else {
            (&self.late, month - self.step_month)
        };

        OpexBreakdown {
            product_dev: lines.product_dev.at(elapsed),
            sales_marketing: lines.sales_marketing.at(elapsed),
            general_admin: lines.general_admin.at(elapsed),
        }
    }
}

impl Default for OpexSchedule {
    fn default() -> Self {
        Self {
            step_month: 6,
            early: OpexLines {
                product_dev: LinearCost::flat(25_000.0),
                sales_marketing: LinearCost::growing(20_000.0, 3_000.0),
                general_admin: LinearCost::flat(15_000.0),
            },
            late: OpexLines {
                product_dev: LinearCost::growing(30_000.0, 2_000.0),
                sales_marketing: LinearCost::growing(40_000.0, 5_000.0),
                general_admin: LinearCost::growing(20_000.0, 1_000.0),
            },
        }
    }
}

/// All cost assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAssumptions {
    /// AI API spend per user per month
    pub api_cost_per_user: f64,
    /// Hosting and storage per user per month
    pub infra_cost_per_user: f64,
    pub opex: OpexSchedule,
}

impl CostAssumptions {
    pub fn cogs_per_user(&self) -> f64 {
        self.api_cost_per_user + self.infra_cost_per_user
    }
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            api_cost_per_user: 3.50,
            infra_cost_per_user: 0.50,
            opex: OpexSchedule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opex_before_step() {
        let opex = OpexSchedule::default();

        let m1 = opex.breakdown(1);
        assert_eq!(m1.product_dev, 25_000.0);
        assert_eq!(m1.sales_marketing, 23_000.0);
        assert_eq!(m1.general_admin, 15_000.0);
        assert_eq!(m1.total(), 63_000.0);

        // Month 6 is still on the early schedule
        assert_eq!(opex.breakdown(6).total(), 78_000.0);
    }

    #[test]
    fn test_opex_after_step() {
        let opex = OpexSchedule::default();

        let m7 = opex.breakdown(7);
        assert_eq!(m7.product_dev, 32_000.0);
        assert_eq!(m7.sales_marketing, 45_000.0);
        assert_eq!(m7.general_admin, 21_000.0);

        assert_eq!(opex.breakdown(12).total(), 138_000.0);
        assert_eq!(opex.breakdown(24).total(), 234_000.0);
    }

    #[test]
    fn test_cogs_per_user() {
        assert_eq!(CostAssumptions::default().cogs_per_user(), 4.0);
    }
}
