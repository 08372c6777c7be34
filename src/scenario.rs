//! Scenario runner for batch projections
//!
//! Holds one base set of assumptions and runs projections against it, or
//! against named variants in parallel.

use crate::assumptions::Assumptions;
use crate::projection::{
    BreakEvenResult, ProjectionConfig, ProjectionEngine, ProjectionResult, ProjectionSummary,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Result of one named scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub break_even: BreakEvenResult,
    pub summary: ProjectionSummary,
}

/// Pre-loaded scenario runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let mut aggressive = runner.assumptions().clone();
/// aggressive.pricing.arpu = 20.0;
///
/// let outcomes = runner.run_variants(
///     &[("base".to_string(), runner.assumptions().clone()), ("aggressive".to_string(), aggressive)],
///     ProjectionConfig::default(),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with the default plan
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default_plan(),
        }
    }

    /// Create runner by loading assumptions from a JSON file
    pub fn from_json_path(path: &std::path::Path) -> crate::Result<Self> {
        Ok(Self {
            base_assumptions: Assumptions::from_json_path(path)?,
        })
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Run a single projection with the given config
    pub fn run(&self, config: ProjectionConfig) -> ProjectionResult {
        ProjectionEngine::new(self.base_assumptions.clone(), config).project()
    }

    /// Run the base assumptions under several configs
    pub fn run_batch(&self, configs: &[ProjectionConfig]) -> Vec<ProjectionResult> {
        configs
            .par_iter()
            .map(|config| self.run(config.clone()))
            .collect()
    }

    /// Run named assumption variants in parallel; outcomes keep input order
    pub fn run_variants(
        &self,
        variants: &[(String, Assumptions)],
        config: ProjectionConfig,
    ) -> Vec<ScenarioOutcome> {
        log::info!("Running {} scenarios over {} months", variants.len(), config.projection_months);

        variants
            .par_iter()
            .map(|(name, assumptions)| {
                let result = ProjectionEngine::new(assumptions.clone(), config.clone()).project();
                let summary = result.summary();
                ScenarioOutcome {
                    name: name.clone(),
                    break_even: summary.break_even.clone(),
                    summary,
                }
            })
            .collect()
    }

    /// Get reference to base assumptions
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config(months: u32) -> ProjectionConfig {
        ProjectionConfig {
            projection_months: months,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_run_matches_engine() {
        let runner = ScenarioRunner::new();
        let direct = ProjectionEngine::new(Assumptions::default_plan(), config(12)).project();

        assert_eq!(runner.run(config(12)), direct);
    }

    #[test]
    fn test_run_batch() {
        let runner = ScenarioRunner::new();
        let results = runner.run_batch(&[config(6), config(12), config(24)]);

        let lens: Vec<_> = results.iter().map(|r| r.len()).collect();
        assert_eq!(lens, vec![6, 12, 24]);
    }

    #[test]
    fn test_variants_keep_order_and_respond_to_pricing() {
        let runner = ScenarioRunner::new();
        let base = runner.assumptions().clone();
        let mut premium = base.clone();
        premium.pricing.arpu = 30.0;

        let outcomes = runner.run_variants(
            &[("base".to_string(), base), ("premium".to_string(), premium)],
            config(24),
        );

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].name, "base");
        assert_eq!(outcomes[1].name, "premium");
        assert!(!outcomes[0].break_even.reached);
        assert!(outcomes[1].summary.cumulative_revenue > outcomes[0].summary.cumulative_revenue);
        assert_eq!(outcomes[0].break_even, outcomes[0].summary.break_even);
    }

    #[test]
    fn test_empty_variants() {
        assert!(ScenarioRunner::new().run_variants(&[], config(12)).is_empty());
    }
}
