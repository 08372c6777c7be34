//! Compare conservative, base and aggressive launch scenarios
//!
//! Usage: run_scenarios [months] [output.csv]

use anyhow::{Context, Result};
use gtm_model::assumptions::{Assumptions, SignupSchedule};
use gtm_model::projection::{ProjectionConfig, DEFAULT_PROJECTION_MONTHS};
use gtm_model::ScenarioRunner;
use serde::Serialize;
use std::time::Instant;

/// Scale signups, virality and churn; conversion is untouched
fn scaled(base: &Assumptions, signups: f64, viral: f64, churn: f64) -> Assumptions {
    let mut assumptions = base.clone();
    for phase in &mut assumptions.growth.phases {
        match &mut phase.signups {
            SignupSchedule::Literal { monthly } => {
                for value in monthly.iter_mut() {
                    *value *= signups;
                }
            }
            SignupSchedule::Compounding { base: first, .. } => *first *= signups,
        }
        phase.viral_coefficient *= viral;
        phase.churn_rate = (phase.churn_rate * churn).min(1.0);
    }
    assumptions
}

#[derive(Serialize)]
struct OutcomeRecord<'a> {
    scenario: &'a str,
    final_users: u64,
    final_paying_users: u64,
    final_mrr: f64,
    cumulative_revenue: f64,
    net_income: f64,
    break_even_month: Option<u32>,
    readiness_score: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let months = match args.get(1) {
        Some(arg) => arg.parse::<u32>().with_context(|| format!("invalid month count '{}'", arg))?,
        None => DEFAULT_PROJECTION_MONTHS,
    };
    let output_path = args.get(2).map(String::as_str).unwrap_or("scenario_comparison.csv");

    let runner = ScenarioRunner::new();
    let base = runner.assumptions().clone();
    let variants = vec![
        ("conservative".to_string(), scaled(&base, 0.7, 0.8, 1.25)),
        ("base".to_string(), base.clone()),
        ("aggressive".to_string(), scaled(&base, 1.3, 1.2, 0.8)),
    ];

    let config = ProjectionConfig {
        projection_months: months,
        ..ProjectionConfig::default()
    };

    let start = Instant::now();
    let outcomes = runner.run_variants(&variants, config);
    let elapsed = start.elapsed();

    println!("Scenario comparison over {} months ({:.2?})", months, elapsed);
    println!("{:<14} {:>12} {:>10} {:>12} {:>16} {:>12}",
        "Scenario", "Users", "Paying", "Final MRR", "Net Income", "Break-even");
    println!("{}", "-".repeat(80));

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {}", output_path))?;

    for outcome in &outcomes {
        let summary = &outcome.summary;
        let break_even = outcome
            .break_even
            .month
            .map(|m| format!("month {}", m))
            .unwrap_or_else(|| "-".to_string());

        println!("{:<14} {:>12} {:>10} {:>12.0} {:>16.0} {:>12}",
            outcome.name,
            summary.final_users,
            summary.final_paying_users,
            summary.final_mrr,
            summary.net_income,
            break_even,
        );

        writer.serialize(OutcomeRecord {
            scenario: &outcome.name,
            final_users: summary.final_users,
            final_paying_users: summary.final_paying_users,
            final_mrr: summary.final_mrr,
            cumulative_revenue: summary.cumulative_revenue,
            net_income: summary.net_income,
            break_even_month: outcome.break_even.month,
            readiness_score: summary.fundraising.as_ref().map(|r| r.score),
        })?;
    }
    writer.flush()?;

    println!("\nComparison written to {}", output_path);
    Ok(())
}
