//! 90-day go-to-market roadmap: channel mix and weekly plan

mod metrics;
mod channels;
mod plan;
pub mod loader;

pub use metrics::KeyMetrics;
pub use channels::{ChannelPlan, ChannelAllocation};
pub use plan::{WeekPlan, WeeklyPlan, DatedWeek};
pub use loader::{load_weekly_plan, load_weekly_plan_from_reader, DEFAULT_WEEKLY_PLAN_PATH};
