//! Monthly projection output structures

use serde::{Deserialize, Serialize};

/// One month of the user/revenue/profit projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjection {
    // Timing
    pub month: u32,
    /// Calendar label (YYYY-MM)
    pub period: String,
    pub phase: String,

    // Users
    pub signup_base: f64,
    pub viral_signups: u64,
    pub new_users: u64,
    pub churned_users: u64,
    pub total_users: u64,
    pub new_paying: u64,
    pub churned_paying: u64,
    pub paying_users: u64,

    // Rates
    pub viral_coefficient: f64,
    pub churn_rate: f64,
    pub free_to_paid_rate: f64,

    // Revenue
    pub arpu: f64,
    pub mrr: f64,
    pub arr: f64,

    // Costs
    pub api_cost: f64,
    pub infra_cost: f64,
    pub total_cogs: f64,
    pub product_dev: f64,
    pub sales_marketing: f64,
    pub general_admin: f64,
    pub operating_expense: f64,

    // Profitability
    pub gross_profit: f64,
    pub gross_margin: f64,
    pub net_profit: f64,

    // Unit economics
    pub cac: f64,
    pub ltv: f64,
    pub ltv_cac_ratio: f64,
}

impl MonthlyProjection {
    /// Create an empty row for a month
    pub fn new(month: u32) -> Self {
        Self {
            month,
            period: String::new(),
            phase: String::new(),
            signup_base: 0.0,
            viral_signups: 0,
            new_users: 0,
            churned_users: 0,
            total_users: 0,
            new_paying: 0,
            churned_paying: 0,
            paying_users: 0,
            viral_coefficient: 0.0,
            churn_rate: 0.0,
            free_to_paid_rate: 0.0,
            arpu: 0.0,
            mrr: 0.0,
            arr: 0.0,
            api_cost: 0.0,
            infra_cost: 0.0,
            total_cogs: 0.0,
            product_dev: 0.0,
            sales_marketing: 0.0,
            general_admin: 0.0,
            operating_expense: 0.0,
            gross_profit: 0.0,
            gross_margin: 0.0,
            net_profit: 0.0,
            cac: 0.0,
            ltv: 0.0,
            ltv_cac_ratio: 0.0,
        }
    }

    pub fn total_costs(&self) -> f64 {
        self.total_cogs + self.operating_expense
    }

    /// New users relative to the users carried in from earlier months
    pub fn monthly_growth_rate(&self) -> f64 {
        let carried = self.total_users as f64 - self.new_users as f64;
        if carried > 0.0 {
            self.new_users as f64 / carried
        } else {
            0.0
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Monthly rows, month 1 first
    pub rows: Vec<MonthlyProjection>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, row: MonthlyProjection) {
        self.rows.push(row);
    }

    /// Row for a 1-indexed month
    pub fn month(&self, month: u32) -> Option<&MonthlyProjection> {
        if month == 0 {
            return None;
        }
        self.rows.get(month as usize - 1)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&MonthlyProjection> {
        self.rows.last()
    }
}
