//! Core projection engine for month-by-month user growth and profitability

use crate::assumptions::Assumptions;
use super::state::GrowthState;
use super::rows::{MonthlyProjection, ProjectionResult};
use chrono::{Days, NaiveDate};

/// Paying users churn at half the phase churn rate
pub const PAYING_CHURN_MULTIPLIER: f64 = 0.5;

/// Default horizon
pub const DEFAULT_PROJECTION_MONTHS: u32 = 24;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Number of months to project
    pub projection_months: u32,

    /// Month labels are `start_date + 30 * month` days
    pub start_date: NaiveDate,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            projection_months: DEFAULT_PROJECTION_MONTHS,
            start_date: chrono::Local::now().date_naive(),
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    /// Project the configured number of months
    pub fn project(&self) -> ProjectionResult {
        self.project_user_growth(self.config.projection_months)
    }

    /// Project `months` months; zero months yields an empty series
    pub fn project_user_growth(&self, months: u32) -> ProjectionResult {
        let mut result = ProjectionResult::new();
        let mut state = GrowthState::from_assumptions(&self.assumptions.growth);

        for _month in 1..=months {
            state.advance_month();

            let row = self.calculate_month(&state);
            state.close_month(row.total_users, row.paying_users);
            result.add_row(row);
        }

        if let Some(last) = result.last() {
            log::info!(
                "Projected {} months: {} users, {} paying, MRR ${:.0}",
                months, last.total_users, last.paying_users, last.mrr
            );
        }

        result
    }

    /// Calculate one month from the prior month's closing balances
    ///
    /// Order matters: churn is taken from the prior balance before this
    /// month's new and viral users are added.
    fn calculate_month(&self, state: &GrowthState) -> MonthlyProjection {
        let month = state.month;
        let growth = &self.assumptions.growth;
        let mut row = MonthlyProjection::new(month);

        row.period = self.period_label(month);

        match growth.phase_for(month) {
            Some(phase) => {
                row.phase = phase.name.clone();
                row.signup_base = phase.signup_base(month);
                row.viral_coefficient = phase.viral_coefficient;
                row.churn_rate = phase.churn_rate;
            }
            None => log::warn!("No growth phase configured for month {}", month),
        }
        row.free_to_paid_rate = growth.conversion.rate(month);

        self.calculate_users(state, &mut row);
        self.calculate_financials(&mut row);

        log::debug!(
            "Month {:>2}: users={} paying={} mrr={:.0} net={:.0}",
            month, row.total_users, row.paying_users, row.mrr, row.net_profit
        );

        row
    }

    /// User and subscriber balances
    fn calculate_users(&self, state: &GrowthState, row: &mut MonthlyProjection) {
        let prior_users = state.total_users;
        let prior_paying = state.paying_users;

        row.viral_signups = (prior_users as f64 * row.viral_coefficient) as u64;
        row.new_users = (row.signup_base + row.viral_signups as f64) as u64;
        row.churned_users = (prior_users as f64 * row.churn_rate) as u64;
        // Balances saturate at u64::MAX on very long horizons
        row.total_users = prior_users
            .saturating_add(row.new_users)
            .saturating_sub(row.churned_users);

        row.new_paying = (row.new_users as f64 * row.free_to_paid_rate) as u64;
        row.churned_paying =
            (prior_paying as f64 * row.churn_rate * PAYING_CHURN_MULTIPLIER) as u64;
        row.paying_users = prior_paying
            .saturating_add(row.new_paying)
            .saturating_sub(row.churned_paying);
    }

    /// Revenue, costs, margins and unit economics
    fn calculate_financials(&self, row: &mut MonthlyProjection) {
        let pricing = &self.assumptions.pricing;
        let costs = &self.assumptions.costs;

        // Revenue
        row.arpu = pricing.arpu;
        row.mrr = row.paying_users as f64 * row.arpu;
        row.arr = row.mrr * 12.0;

        // COGS scales with all users, free and paying
        row.api_cost = row.total_users as f64 * costs.api_cost_per_user;
        row.infra_cost = row.total_users as f64 * costs.infra_cost_per_user;
        row.total_cogs = row.api_cost + row.infra_cost;

        let opex = costs.opex.breakdown(row.month);
        row.product_dev = opex.product_dev;
        row.sales_marketing = opex.sales_marketing;
        row.general_admin = opex.general_admin;
        row.operating_expense = opex.total();

        // Profitability
        row.gross_profit = row.mrr - row.total_cogs;
        row.net_profit = row.gross_profit - row.operating_expense;
        row.gross_margin = if row.mrr > 0.0 {
            row.gross_profit / row.mrr
        } else {
            0.0
        };

        // Unit economics
        row.cac = pricing.cac.get(row.month);
        let churn = if row.churn_rate > 0.0 {
            row.churn_rate
        } else {
            pricing.ltv_fallback_churn
        };
        let lifetime_months = if churn > 0.0 { 1.0 / churn } else { 0.0 };
        row.ltv = row.arpu * lifetime_months * row.gross_margin;
        row.ltv_cac_ratio = if row.cac > 0.0 { row.ltv / row.cac } else { 0.0 };
    }

    fn period_label(&self, month: u32) -> String {
        self.config
            .start_date
            .checked_add_days(Days::new(30 * u64::from(month)))
            .map(|date| date.format("%Y-%m").to_string())
            .unwrap_or_default()
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }
}
