//! Projection summary statistics and fundraising readiness

use super::breakeven::{calculate_break_even, BreakEvenResult};
use super::rows::{MonthlyProjection, ProjectionResult};
use serde::{Deserialize, Serialize};

/// Month at which fundraising readiness is assessed
pub const READINESS_MONTH: u32 = 12;

const TARGET_ARR: f64 = 1_000_000.0;
const TARGET_MONTHLY_GROWTH: f64 = 0.10;
const TARGET_GROSS_MARGIN: f64 = 0.70;
const TARGET_LTV_CAC: f64 = 3.0;
const MAX_CHURN: f64 = 0.05;

/// Summary statistics for a projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub final_users: u64,
    pub final_paying_users: u64,
    pub final_mrr: f64,
    pub final_arr: f64,
    pub cumulative_revenue: f64,
    pub cumulative_costs: f64,
    pub net_income: f64,
    /// Compound monthly growth between the first and last month
    pub avg_monthly_user_growth: f64,
    pub avg_monthly_mrr_growth: f64,
    pub break_even: BreakEvenResult,
    pub fundraising: Option<FundraisingReadiness>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessAssessment {
    Ready,
    NearlyReady,
    NotReady,
}

impl ReadinessAssessment {
    fn from_score(score: u32) -> Self {
        match score {
            s if s >= 4 => ReadinessAssessment::Ready,
            3 => ReadinessAssessment::NearlyReady,
            _ => ReadinessAssessment::NotReady,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadinessAssessment::Ready => "Ready to raise",
            ReadinessAssessment::NearlyReady => "Nearly ready",
            ReadinessAssessment::NotReady => "Not ready",
        }
    }
}

/// One pass/fail readiness criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessCheck {
    pub metric: String,
    pub value: f64,
    pub threshold: f64,
    pub passed: bool,
}

impl ReadinessCheck {
    fn at_least(metric: &str, value: f64, threshold: f64) -> Self {
        Self {
            metric: metric.to_string(),
            value,
            threshold,
            passed: value >= threshold,
        }
    }

    fn at_most(metric: &str, value: f64, threshold: f64) -> Self {
        Self {
            metric: metric.to_string(),
            value,
            threshold,
            passed: value <= threshold,
        }
    }
}

/// Series-A style checklist evaluated on a single month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundraisingReadiness {
    pub month: u32,
    pub checks: Vec<ReadinessCheck>,
    pub score: u32,
    pub assessment: ReadinessAssessment,
}

impl FundraisingReadiness {
    pub fn evaluate(row: &MonthlyProjection) -> Self {
        let checks = vec![
            ReadinessCheck::at_least("arr", row.arr, TARGET_ARR),
            ReadinessCheck::at_least("monthly_user_growth", row.monthly_growth_rate(), TARGET_MONTHLY_GROWTH),
            ReadinessCheck::at_least("gross_margin", row.gross_margin, TARGET_GROSS_MARGIN),
            ReadinessCheck::at_least("ltv_cac_ratio", row.ltv_cac_ratio, TARGET_LTV_CAC),
            ReadinessCheck::at_most("churn_rate", row.churn_rate, MAX_CHURN),
        ];
        let score = checks.iter().filter(|c| c.passed).count() as u32;

        Self {
            month: row.month,
            checks,
            score,
            assessment: ReadinessAssessment::from_score(score),
        }
    }

    pub fn max_score(&self) -> u32 {
        self.checks.len() as u32
    }
}

/// `(last / first)^(1 / (n - 1)) - 1`
fn compound_growth(first: f64, last: f64, n: usize) -> f64 {
    if n < 2 || first <= 0.0 {
        return 0.0;
    }
    (last / first).powf(1.0 / (n - 1) as f64) - 1.0
}

impl ProjectionResult {
    pub fn break_even(&self) -> BreakEvenResult {
        calculate_break_even(&self.rows)
    }

    pub fn fundraising_readiness(&self) -> Option<FundraisingReadiness> {
        self.month(READINESS_MONTH).map(FundraisingReadiness::evaluate)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let cumulative_revenue: f64 = self.rows.iter().map(|r| r.mrr).sum();
        let cumulative_costs: f64 = self.rows.iter().map(|r| r.total_costs()).sum();

        let (first, last) = match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return ProjectionSummary::default(),
        };
        let n = self.rows.len();

        ProjectionSummary {
            total_months: n as u32,
            final_users: last.total_users,
            final_paying_users: last.paying_users,
            final_mrr: last.mrr,
            final_arr: last.arr,
            cumulative_revenue,
            cumulative_costs,
            net_income: cumulative_revenue - cumulative_costs,
            avg_monthly_user_growth: compound_growth(first.total_users as f64, last.total_users as f64, n),
            avg_monthly_mrr_growth: compound_growth(first.mrr, last.mrr, n),
            break_even: self.break_even(),
            fundraising: self.fundraising_readiness(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(month: u32, total_users: u64, mrr: f64) -> MonthlyProjection {
        let mut row = MonthlyProjection::new(month);
        row.total_users = total_users;
        row.mrr = mrr;
        row.arr = mrr * 12.0;
        row.total_cogs = 100.0;
        row.operating_expense = 1_000.0;
        row.net_profit = mrr - 1_100.0;
        row
    }

    #[test]
    fn test_empty_summary() {
        let summary = ProjectionResult::new().summary();

        assert_eq!(summary.total_months, 0);
        assert_eq!(summary.cumulative_revenue, 0.0);
        assert!(!summary.break_even.reached);
        assert!(summary.fundraising.is_none());
    }

    #[test]
    fn test_cumulative_totals_and_growth() {
        let mut result = ProjectionResult::new();
        result.add_row(row(1, 100, 1_000.0));
        result.add_row(row(2, 200, 2_000.0));
        result.add_row(row(3, 400, 4_000.0));

        let summary = result.summary();
        assert_eq!(summary.total_months, 3);
        assert_relative_eq!(summary.cumulative_revenue, 7_000.0);
        assert_relative_eq!(summary.cumulative_costs, 3_300.0);
        assert_relative_eq!(summary.net_income, 3_700.0);
        assert_relative_eq!(summary.avg_monthly_user_growth, 1.0, epsilon = 1e-12);
        assert_relative_eq!(summary.avg_monthly_mrr_growth, 1.0, epsilon = 1e-12);
        assert_eq!(summary.break_even.month, Some(3));
    }

    #[test]
    fn test_growth_guards() {
        assert_eq!(compound_growth(0.0, 100.0, 5), 0.0);
        assert_eq!(compound_growth(10.0, 100.0, 1), 0.0);
    }

    #[test]
    fn test_readiness_scoring() {
        let mut strong = MonthlyProjection::new(12);
        strong.arr = 1_200_000.0;
        strong.total_users = 110_000;
        strong.new_users = 10_000;
        strong.gross_margin = 0.75;
        strong.ltv_cac_ratio = 4.0;
        strong.churn_rate = 0.05;

        let readiness = FundraisingReadiness::evaluate(&strong);
        assert_eq!(readiness.score, 5);
        assert_eq!(readiness.max_score(), 5);
        assert_eq!(readiness.assessment, ReadinessAssessment::Ready);

        let mut middling = strong.clone();
        middling.gross_margin = 0.5;
        middling.ltv_cac_ratio = 1.0;
        assert_eq!(FundraisingReadiness::evaluate(&middling).assessment, ReadinessAssessment::NearlyReady);

        assert_eq!(
            FundraisingReadiness::evaluate(&MonthlyProjection::new(12)).assessment,
            ReadinessAssessment::NotReady
        );
    }

    #[test]
    fn test_default_plan_readiness_at_month_12() {
        use crate::assumptions::Assumptions;
        use crate::projection::{ProjectionConfig, ProjectionEngine};

        let result = ProjectionEngine::new(Assumptions::default_plan(), ProjectionConfig::default())
            .project_user_growth(24);
        let summary = result.summary();

        let readiness = summary.fundraising.unwrap();
        assert_eq!(readiness.month, 12);
        assert_eq!(readiness.checks.len(), 5);
        // Churn of 5% in the growth phase passes
        assert!(readiness.checks.iter().any(|c| c.metric == "churn_rate" && c.passed));
        assert!(!summary.break_even.reached);
        assert!(summary.net_income < 0.0);
        assert_eq!(summary.final_users, result.last().unwrap().total_users);
    }
}
