//! User-growth and profitability projection

mod state;
mod engine;
mod rows;
mod breakeven;
mod summary;

pub use state::GrowthState;
pub use engine::{ProjectionEngine, ProjectionConfig, PAYING_CHURN_MULTIPLIER, DEFAULT_PROJECTION_MONTHS};
pub use rows::{MonthlyProjection, ProjectionResult};
pub use breakeven::{calculate_break_even, BreakEvenResult};
pub use summary::{
    ProjectionSummary, FundraisingReadiness, ReadinessCheck, ReadinessAssessment, READINESS_MONTH,
};
