//! Break-even detection over a projected series

use super::rows::MonthlyProjection;
use serde::{Deserialize, Serialize};

/// First month with positive net profit, if any
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    pub reached: bool,
    pub month: Option<u32>,
    pub period: Option<String>,
    pub users_at_break_even: Option<u64>,
    pub paying_users_at_break_even: Option<u64>,
    pub mrr_at_break_even: Option<f64>,
}

impl BreakEvenResult {
    /// Series that never turns profitable
    pub fn not_reached() -> Self {
        Self::default()
    }

    fn at(row: &MonthlyProjection) -> Self {
        Self {
            reached: true,
            month: Some(row.month),
            period: Some(row.period.clone()),
            users_at_break_even: Some(row.total_users),
            paying_users_at_break_even: Some(row.paying_users),
            mrr_at_break_even: Some(row.mrr),
        }
    }
}

/// Scan for the first month whose net profit is strictly positive
///
/// Later months are not inspected, so a series that dips back into a loss
/// still reports the first profitable month.
pub fn calculate_break_even(rows: &[MonthlyProjection]) -> BreakEvenResult {
    match rows.iter().find(|row| row.net_profit > 0.0) {
        Some(row) => {
            log::info!(
                "Break-even reached in month {} ({} paying users, MRR ${:.0})",
                row.month, row.paying_users, row.mrr
            );
            BreakEvenResult::at(row)
        }
        None => {
            log::info!("Break-even not reached within {} months", rows.len());
            BreakEvenResult::not_reached()
        }
    }
}
