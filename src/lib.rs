//! GTM Model - market sizing and financial projections for a research-tool SaaS launch
//!
//! This library provides:
//! - TAM/SAM/SOM market sizing with a full derivation trail
//! - Month-by-month user growth, revenue and cost projections
//! - Break-even detection, summary statistics and fundraising readiness
//! - Steady-state unit-economics validation
//! - 90-day go-to-market roadmap (channel mix, weekly plan)
//! - Flat CSV export and parallel scenario comparison

pub mod error;
pub mod assumptions;
pub mod market;
pub mod projection;
pub mod economics;
pub mod roadmap;
pub mod export;
pub mod scenario;

// Re-export commonly used types
pub use error::{Error, Result};
pub use assumptions::Assumptions;
pub use market::{MarketFunnelCalculator, MarketEstimate, FilterStep};
pub use projection::{
    ProjectionEngine, ProjectionConfig, ProjectionResult, MonthlyProjection, BreakEvenResult,
    calculate_break_even,
};
pub use economics::{UnitEconomics, UnitEconomicsReport};
pub use scenario::{ScenarioRunner, ScenarioOutcome};
