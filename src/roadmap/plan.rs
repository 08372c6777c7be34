//! 90-day weekly launch plan

use super::metrics::KeyMetrics;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One week of the launch plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    /// 1-indexed week number
    pub week: u32,
    pub phase: String,
    pub focus: String,
    pub budget_usd: f64,
    pub tasks: Vec<String>,
    pub key_metrics: KeyMetrics,
}

impl WeekPlan {
    pub fn num_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// First day of the week for a plan starting on `plan_start`
    pub fn start_date(&self, plan_start: NaiveDate) -> Option<NaiveDate> {
        plan_start.checked_add_days(Days::new(7 * u64::from(self.week.saturating_sub(1))))
    }

    /// Last day of the week (start + 6 days)
    pub fn end_date(&self, plan_start: NaiveDate) -> Option<NaiveDate> {
        self.start_date(plan_start)?.checked_add_days(Days::new(6))
    }
}

/// A plan week pinned to calendar dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedWeek {
    pub week: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub phase: String,
    pub focus: String,
    pub budget_usd: f64,
    pub num_tasks: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub weeks: Vec<WeekPlan>,
}

impl WeeklyPlan {
    pub fn new(mut weeks: Vec<WeekPlan>) -> Self {
        weeks.sort_by_key(|w| w.week);
        Self { weeks }
    }

    pub fn total_budget(&self) -> f64 {
        self.weeks.iter().map(|w| w.budget_usd).sum()
    }

    pub fn total_tasks(&self) -> usize {
        self.weeks.iter().map(|w| w.num_tasks()).sum()
    }

    pub fn week(&self, week: u32) -> Option<&WeekPlan> {
        self.weeks.iter().find(|w| w.week == week)
    }

    /// Distinct phases in week order
    pub fn phases(&self) -> Vec<&str> {
        let mut phases: Vec<&str> = Vec::new();
        for week in &self.weeks {
            if !phases.contains(&week.phase.as_str()) {
                phases.push(&week.phase);
            }
        }
        phases
    }

    /// Budget per phase, in phase order
    pub fn budget_by_phase(&self) -> Vec<(String, f64)> {
        self.phases()
            .into_iter()
            .map(|phase| {
                let budget = self
                    .weeks
                    .iter()
                    .filter(|w| w.phase == phase)
                    .map(|w| w.budget_usd)
                    .sum();
                (phase.to_string(), budget)
            })
            .collect()
    }

    /// Calendar rows; weeks whose dates overflow are skipped
    pub fn dated(&self, plan_start: NaiveDate) -> Vec<DatedWeek> {
        self.weeks
            .iter()
            .filter_map(|w| {
                Some(DatedWeek {
                    week: w.week,
                    start_date: w.start_date(plan_start)?,
                    end_date: w.end_date(plan_start)?,
                    phase: w.phase.clone(),
                    focus: w.focus.clone(),
                    budget_usd: w.budget_usd,
                    num_tasks: w.num_tasks(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(week: u32, phase: &str, budget: f64, tasks: usize) -> WeekPlan {
        WeekPlan {
            week,
            phase: phase.to_string(),
            focus: format!("Focus {}", week),
            budget_usd: budget,
            tasks: (0..tasks).map(|i| format!("Task {}", i)).collect(),
            key_metrics: KeyMetrics::RawText(String::new()),
        }
    }

    #[test]
    fn test_totals_and_phases() {
        let plan = WeeklyPlan::new(vec![
            week(3, "Launch", 300.0, 1),
            week(1, "Beta", 100.0, 2),
            week(2, "Beta", 200.0, 3),
        ]);

        assert_eq!(plan.weeks[0].week, 1);
        assert_eq!(plan.total_budget(), 600.0);
        assert_eq!(plan.total_tasks(), 6);
        assert_eq!(plan.phases(), vec!["Beta", "Launch"]);
        assert_eq!(
            plan.budget_by_phase(),
            vec![("Beta".to_string(), 300.0), ("Launch".to_string(), 300.0)]
        );
        assert_eq!(plan.week(2).unwrap().num_tasks(), 3);
        assert!(plan.week(9).is_none());
    }

    #[test]
    fn test_week_dates() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let plan = WeeklyPlan::new(vec![week(1, "Beta", 0.0, 0), week(3, "Beta", 0.0, 0)]);

        let dated = plan.dated(start);
        assert_eq!(dated[0].start_date, start);
        assert_eq!(dated[0].end_date, NaiveDate::from_ymd_opt(2026, 1, 11).unwrap());
        assert_eq!(dated[1].start_date, NaiveDate::from_ymd_opt(2026, 1, 19).unwrap());
        assert_eq!(dated[1].end_date, NaiveDate::from_ymd_opt(2026, 1, 25).unwrap());
    }
}
