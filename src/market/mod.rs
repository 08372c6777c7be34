//! Market sizing: TAM/SAM/SOM estimates with their derivation trail

mod types;
mod funnel;

pub use types::{
    MarketStage, ConfidenceLevel, Sensitivity, FilterStep, MethodologyNote, RevenuePotential,
    MarketEstimate, AssumptionRecord, penetration,
};
pub use funnel::{MarketFunnelCalculator, MarketSizing, DEFAULT_SOM_TIMEFRAME_MONTHS};
