//! Load the weekly plan from CSV
//!
//! Columns: `week,phase,focus,budget_usd,tasks,key_metrics`. Tasks are
//! `;`-separated; `key_metrics` is a JSON object of numeric targets or free
//! text.

use super::metrics::KeyMetrics;
use super::plan::{WeekPlan, WeeklyPlan};
use crate::error::{Error, Result};
use csv::Reader;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_WEEKLY_PLAN_PATH: &str = "data/roadmap/weekly_plan.csv";

/// Raw CSV row matching weekly_plan.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    week: u32,
    phase: String,
    focus: String,
    budget_usd: f64,
    #[serde(default)]
    tasks: String,
    #[serde(default)]
    key_metrics: String,
}

impl CsvRow {
    fn to_week(self, line: u64) -> Result<WeekPlan> {
        if self.week == 0 {
            return Err(Error::InvalidRecord {
                line,
                reason: "week numbers start at 1".to_string(),
            });
        }
        if !self.budget_usd.is_finite() || self.budget_usd < 0.0 {
            return Err(Error::InvalidRecord {
                line,
                reason: format!("invalid budget {}", self.budget_usd),
            });
        }

        let tasks = self
            .tasks
            .split(';')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        Ok(WeekPlan {
            week: self.week,
            phase: self.phase.trim().to_string(),
            focus: self.focus.trim().to_string(),
            budget_usd: self.budget_usd,
            tasks,
            key_metrics: KeyMetrics::ingest(&self.key_metrics),
        })
    }
}

/// Load the weekly plan from a CSV file
pub fn load_weekly_plan<P: AsRef<Path>>(path: P) -> Result<WeeklyPlan> {
    let path = path.as_ref();
    let plan = load_weekly_plan_from_reader(std::fs::File::open(path)?)?;
    log::info!("Loaded {} plan weeks from {}", plan.weeks.len(), path.display());
    Ok(plan)
}

/// Load the weekly plan from any CSV reader
pub fn load_weekly_plan_from_reader<R: Read>(reader: R) -> Result<WeeklyPlan> {
    let mut reader = Reader::from_reader(reader);
    let mut weeks: Vec<WeekPlan> = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        // Header is line 1
        let line = index as u64 + 2;
        let row: CsvRow = result?;
        let week = row.to_week(line)?;

        if weeks.iter().any(|w| w.week == week.week) {
            return Err(Error::InvalidRecord {
                line,
                reason: format!("duplicate week {}", week.week),
            });
        }
        weeks.push(week);
    }

    Ok(WeeklyPlan::new(weeks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    const SAMPLE: &str = "\
week,phase,focus,budget_usd,tasks,key_metrics
2,Phase 1,Cohort,1000,Onboard users; Run interviews,\"{\"\"activation_rate\"\": 0.35}\"
1,Phase 1,Recruitment,500,\"Post on Twitter; Share in r/PhD, r/GradSchool; \",{'signups': 30}
";

    #[test]
    fn test_load_from_reader() {
        let plan = load_weekly_plan_from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(plan.weeks.len(), 2);
        let first = plan.week(1).unwrap();
        assert_eq!(plan.weeks[0].week, 1);
        assert_eq!(first.tasks, vec!["Post on Twitter", "Share in r/PhD, r/GradSchool"]);
        assert!(!first.key_metrics.is_structured());

        let second = plan.week(2).unwrap();
        assert_eq!(second.key_metrics.get("activation_rate"), Some(0.35));
        assert_relative_eq!(plan.total_budget(), 1_500.0);
        assert_eq!(plan.total_tasks(), 4);
    }

    #[test]
    fn test_invalid_rows() {
        let zero_week = "week,phase,focus,budget_usd,tasks,key_metrics\n0,P,F,10,a,\n";
        let err = load_weekly_plan_from_reader(zero_week.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 2, .. }));

        let negative = "week,phase,focus,budget_usd,tasks,key_metrics\n1,P,F,10,a,\n2,P,F,-5,b,\n";
        let err = load_weekly_plan_from_reader(negative.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 3, .. }));

        let duplicate = "week,phase,focus,budget_usd,tasks,key_metrics\n1,P,F,10,a,\n1,P,G,10,b,\n";
        let err = load_weekly_plan_from_reader(duplicate.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 3, .. }));

        let bad_budget = "week,phase,focus,budget_usd,tasks,key_metrics\n1,P,F,lots,a,\n";
        let err = load_weekly_plan_from_reader(bad_budget.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let plan = load_weekly_plan(file.path()).unwrap();
        assert_eq!(plan.weeks.len(), 2);
    }

    #[test]
    fn test_bundled_plan() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_WEEKLY_PLAN_PATH);
        let plan = load_weekly_plan(path).unwrap();

        assert_eq!(plan.weeks.len(), 12);
        assert_relative_eq!(plan.total_budget(), 50_000.0);
        assert_eq!(plan.total_tasks(), 60);
        assert!(plan.weeks.iter().all(|w| w.key_metrics.is_structured()));
        assert_eq!(plan.week(6).unwrap().key_metrics.get("upvotes"), Some(800.0));
        assert_eq!(plan.phases().len(), 3);
    }
}
