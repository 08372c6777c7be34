//! Market estimate records and their derivation trail

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStage {
    Tam,
    Sam,
    Som,
}

impl MarketStage {
    pub fn label(&self) -> &'static str {
        match self {
            MarketStage::Tam => "TAM",
            MarketStage::Sam => "SAM",
            MarketStage::Som => "SOM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sensitivity {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// One applied SAM filter and the population left after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterStep {
    pub label: String,
    pub retention_fraction: f64,
    pub rationale: String,
    pub remaining: u64,
}

/// Ordered derivation record attached to an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodologyNote {
    /// Bottom-up segment contribution
    Segment { label: String, population: u64 },
    BottomUpTotal { population: u64 },
    TopDown {
        global_knowledge_workers: u64,
        fraction: f64,
        population: u64,
    },
    /// Arithmetic mean of two methodologies
    Blend { bottom_up: u64, top_down: u64 },
    Filter(FilterStep),
    /// Beachhead funnel stage: population after applying `rate`
    FunnelStage { label: String, rate: f64, remaining: u64 },
    /// Informational estimate that does not feed the final value
    Validation {
        label: String,
        population: u64,
        rationale: String,
    },
}

/// Revenue implied by the obtainable market
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenuePotential {
    pub arpu_monthly: f64,
    pub conversion_rate: f64,
    pub paying_customers: u64,
    pub mrr: f64,
    pub arr: f64,
}

/// One stage of the TAM/SAM/SOM funnel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEstimate {
    pub stage: MarketStage,
    pub population_count: u64,
    pub methodology_notes: Vec<MethodologyNote>,
    pub confidence_level: ConfidenceLevel,
    pub sources: Vec<String>,
    /// Second-track estimate (top-down reference for SAM, SAM share for SOM)
    pub alternative_estimate: Option<u64>,
    pub penetration_of_tam: Option<f64>,
    pub penetration_of_sam: Option<f64>,
    pub timeframe_months: Option<u32>,
    pub revenue_potential: Option<RevenuePotential>,
}

impl MarketEstimate {
    pub(crate) fn new(stage: MarketStage, population_count: u64, confidence_level: ConfidenceLevel) -> Self {
        Self {
            stage,
            population_count,
            methodology_notes: Vec::new(),
            confidence_level,
            sources: Vec::new(),
            alternative_estimate: None,
            penetration_of_tam: None,
            penetration_of_sam: None,
            timeframe_months: None,
            revenue_potential: None,
        }
    }

    /// Filter steps in application order
    pub fn filter_steps(&self) -> impl Iterator<Item = &FilterStep> {
        self.methodology_notes.iter().filter_map(|note| match note {
            MethodologyNote::Filter(step) => Some(step),
            _ => None,
        })
    }
}

/// Entry in the append-only assumptions log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionRecord {
    pub category: MarketStage,
    pub assumption: String,
    pub rationale: String,
    pub sensitivity: Sensitivity,
    pub impact_if_wrong: String,
}

/// `part / whole`, or 0 when the whole is empty
pub fn penetration(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
