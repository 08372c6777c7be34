//! Planning assumptions: market sizing, growth, costs, pricing and channels

mod market;
mod growth;
mod costs;
mod pricing;
mod channels;
pub mod loader;

pub use market::{
    MarketAssumptions, MarketSegment, SegmentComponent, TopDownEstimate, FilterAssumption,
    ReferenceEstimate, BeachheadFunnel, RevenuePotentialAssumptions,
};
pub use growth::{GrowthAssumptions, GrowthPhase, SignupSchedule, ConversionRamp};
pub use costs::{CostAssumptions, OpexSchedule, OpexLines, OpexBreakdown, LinearCost};
pub use pricing::{PricingAssumptions, CacSchedule, UnitEconomicsInputs};
pub use channels::{Channel, ChannelKind, default_channels};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for every planning constant
///
/// Built once and handed to each engine; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    pub market: MarketAssumptions,
    pub growth: GrowthAssumptions,
    pub costs: CostAssumptions,
    pub pricing: PricingAssumptions,
    pub channels: Vec<Channel>,
}

impl Assumptions {
    /// Documented default plan
    pub fn default_plan() -> Self {
        Self {
            market: MarketAssumptions::default(),
            growth: GrowthAssumptions::default(),
            costs: CostAssumptions::default(),
            pricing: PricingAssumptions::default(),
            channels: default_channels(),
        }
    }

    /// Load and validate assumptions from a JSON document
    pub fn from_json_path(path: &Path) -> Result<Self> {
        loader::load_json(path)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges and table shape
    pub fn validate(&self) -> Result<()> {
        let market = &self.market;
        for segment in &market.segments {
            check_fraction(&format!("segment '{}' relevant fraction", segment.key), segment.relevant_fraction)?;
        }
        check_fraction("top-down research fraction", market.top_down.research_synthesis_fraction)?;
        for filter in &market.sam_filters {
            check_fraction(&format!("SAM filter '{}'", filter.label), filter.retention_fraction)?;
        }
        let beachhead = &market.beachhead;
        for (label, value) in [
            ("beachhead language fraction", beachhead.language_fraction),
            ("beachhead research fraction", beachhead.actively_researching_fraction),
            ("beachhead awareness rate", beachhead.awareness_rate),
            ("beachhead signup rate", beachhead.signup_rate),
            ("beachhead activation rate", beachhead.activation_rate),
            ("beachhead market share", beachhead.target_market_share),
            ("alternative SOM fraction", market.alternative_som_fraction),
            ("SOM conversion rate", market.revenue.conversion_rate),
        ] {
            check_fraction(label, value)?;
        }

        self.validate_phases()?;

        let ramp = &self.growth.conversion;
        for month in 1..=ramp.launch_months + 1 {
            check_fraction(&format!("conversion rate at month {}", month), ramp.rate(month))?;
        }
        check_fraction("conversion cap", ramp.cap)?;

        if self.pricing.arpu <= 0.0 {
            return Err(Error::InvalidAssumption(format!(
                "ARPU must be positive, got {}",
                self.pricing.arpu
            )));
        }
        check_non_negative("API cost per user", self.costs.api_cost_per_user)?;
        check_non_negative("infrastructure cost per user", self.costs.infra_cost_per_user)?;
        check_non_negative("default CAC", self.pricing.cac.default_value())?;
        for (month, cac) in self.pricing.cac.points() {
            check_non_negative(&format!("CAC at month {}", month), cac)?;
        }
        check_fraction("LTV fallback churn", self.pricing.ltv_fallback_churn)?;
        check_fraction("monthly retention", self.pricing.unit_economics.monthly_retention)?;

        for channel in &self.channels {
            check_non_negative(&format!("channel '{}' budget", channel.key), channel.budget)?;
            check_non_negative(&format!("channel '{}' CAC", channel.key), channel.cac)?;
        }

        Ok(())
    }

    /// Phases must start at month 1, be contiguous, and only the last may be open-ended
    fn validate_phases(&self) -> Result<()> {
        let phases = &self.growth.phases;
        if phases.is_empty() {
            return Err(Error::InvalidAssumption("growth phase table is empty".to_string()));
        }

        let mut expected_first = 1;
        for (idx, phase) in phases.iter().enumerate() {
            if phase.first_month != expected_first {
                return Err(Error::InvalidAssumption(format!(
                    "phase '{}' starts at month {}, expected {}",
                    phase.name, phase.first_month, expected_first
                )));
            }
            check_fraction(&format!("phase '{}' churn", phase.name), phase.churn_rate)?;
            check_non_negative(&format!("phase '{}' viral coefficient", phase.name), phase.viral_coefficient)?;

            match phase.last_month {
                Some(last) if last < phase.first_month => {
                    return Err(Error::InvalidAssumption(format!(
                        "phase '{}' ends (month {}) before it starts (month {})",
                        phase.name, last, phase.first_month
                    )));
                }
                Some(last) => expected_first = last + 1,
                None if idx + 1 != phases.len() => {
                    return Err(Error::InvalidAssumption(format!(
                        "only the last phase may be open-ended, '{}' is not last",
                        phase.name
                    )));
                }
                None => {}
            }
        }

        Ok(())
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_plan()
    }
}

fn check_fraction(label: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidAssumption(format!(
            "{} must be within [0, 1], got {}",
            label, value
        )))
    }
}

fn check_non_negative(label: &str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidAssumption(format!(
            "{} must be non-negative, got {}",
            label, value
        )))
    }
}
