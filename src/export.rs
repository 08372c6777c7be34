//! Flat CSV export of projections, the market assumptions log and the weekly plan

use crate::error::Result;
use crate::market::AssumptionRecord;
use crate::projection::MonthlyProjection;
use crate::roadmap::WeeklyPlan;
use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Flat weekly plan record
#[derive(Debug, Serialize)]
struct WeekRecord<'a> {
    week: u32,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    phase: &'a str,
    focus: &'a str,
    tasks: String,
    num_tasks: usize,
    budget_usd: f64,
    key_metrics: String,
}

fn write_records<W: Write, T: Serialize>(writer: W, records: impl IntoIterator<Item = T>) -> Result<usize> {
    let mut wtr = Writer::from_writer(writer);
    let mut count = 0;
    for record in records {
        wtr.serialize(record)?;
        count += 1;
    }
    wtr.flush()?;
    Ok(count)
}

/// One record per projected month, headed by field names
pub fn write_projections<W: Write>(writer: W, rows: &[MonthlyProjection]) -> Result<usize> {
    write_records(writer, rows)
}

pub fn write_assumptions_log<W: Write>(writer: W, log: &[AssumptionRecord]) -> Result<usize> {
    write_records(writer, log)
}

/// Weekly plan with calendar dates relative to `plan_start`
pub fn write_weekly_plan<W: Write>(writer: W, plan: &WeeklyPlan, plan_start: NaiveDate) -> Result<usize> {
    let records = plan.weeks.iter().map(|w| WeekRecord {
        week: w.week,
        start_date: w.start_date(plan_start),
        end_date: w.end_date(plan_start),
        phase: &w.phase,
        focus: &w.focus,
        tasks: w.tasks.join("; "),
        num_tasks: w.num_tasks(),
        budget_usd: w.budget_usd,
        key_metrics: w.key_metrics.to_text(),
    });
    write_records(writer, records)
}

pub fn write_projections_to_path(path: &Path, rows: &[MonthlyProjection]) -> Result<usize> {
    let count = write_projections(File::create(path)?, rows)?;
    log::info!("Wrote {} projection rows to {}", count, path.display());
    Ok(count)
}

pub fn write_assumptions_log_to_path(path: &Path, log: &[AssumptionRecord]) -> Result<usize> {
    let count = write_assumptions_log(File::create(path)?, log)?;
    log::info!("Wrote {} assumption records to {}", count, path.display());
    Ok(count)
}

pub fn write_weekly_plan_to_path(path: &Path, plan: &WeeklyPlan, plan_start: NaiveDate) -> Result<usize> {
    let count = write_weekly_plan(File::create(path)?, plan, plan_start)?;
    log::info!("Wrote {} plan weeks to {}", count, path.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::market::MarketFunnelCalculator;
    use crate::projection::{ProjectionConfig, ProjectionEngine};
    use crate::roadmap::load_weekly_plan_from_reader;

    fn to_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_projection_export() {
        let config = ProjectionConfig {
            projection_months: 3,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };
        let result = ProjectionEngine::new(Assumptions::default_plan(), config).project();

        let mut buf = Vec::new();
        let count = write_projections(&mut buf, &result.rows).unwrap();
        assert_eq!(count, 3);

        let text = to_string(buf);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("month,period,phase,signup_base,viral_signups,new_users"));
        assert!(lines[0].ends_with("cac,ltv,ltv_cac_ratio"));
        assert!(lines[3].starts_with("3,2026-04,Launch,"));

        // Rows parse back with the same header
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let parsed: Vec<MonthlyProjection> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(parsed[2].total_users, 5_085);
        assert_eq!(parsed[2].paying_users, 470);
    }

    #[test]
    fn test_assumptions_log_export() {
        let mut calculator = MarketFunnelCalculator::new(Assumptions::default_plan().market);
        calculator.compute_all(12);

        let mut buf = Vec::new();
        let count = write_assumptions_log(&mut buf, calculator.assumptions_log()).unwrap();
        assert_eq!(count, calculator.assumptions_log().len());

        let text = to_string(buf);
        assert!(text.starts_with("category,assumption,rationale,sensitivity,impact_if_wrong"));
        assert!(text.contains("Tam,"));
    }

    #[test]
    fn test_weekly_plan_export() {
        let csv_text = "week,phase,focus,budget_usd,tasks,key_metrics\n\
                        1,Beta,Recruit,500,Post; Email,\"{\"\"signups\"\": 30}\"\n";
        let plan = load_weekly_plan_from_reader(csv_text.as_bytes()).unwrap();
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();

        let mut buf = Vec::new();
        write_weekly_plan(&mut buf, &plan, start).unwrap();

        let text = to_string(buf);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "week,start_date,end_date,phase,focus,tasks,num_tasks,budget_usd,key_metrics"
        );
        assert_eq!(lines[1], "1,2026-01-05,2026-01-11,Beta,Recruit,Post; Email,2,500.0,signups=30");
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projections.csv");
        let result = ProjectionEngine::new(Assumptions::default_plan(), ProjectionConfig::default())
            .project_user_growth(2);

        assert_eq!(write_projections_to_path(&path, &result.rows).unwrap(), 2);
        assert!(std::fs::read_to_string(&path).unwrap().lines().count() == 3);
    }
}
