//! GTM Model CLI
//!
//! Command-line interface for market sizing, projections and launch planning

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gtm_model::{
    assumptions::Assumptions,
    economics::UnitEconomics,
    export,
    market::{MarketEstimate, MethodologyNote, DEFAULT_SOM_TIMEFRAME_MONTHS},
    projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, DEFAULT_PROJECTION_MONTHS},
    roadmap::{load_weekly_plan, ChannelPlan, DEFAULT_WEEKLY_PLAN_PATH},
    MarketFunnelCalculator,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Months printed as milestones
const MILESTONE_MONTHS: [u32; 4] = [3, 6, 12, 24];

#[derive(Parser, Debug)]
#[command(name = "gtm-model", version, about = "Market sizing and SaaS financial projections")]
struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(long, global = true, help = "Assumptions JSON file (defaults to the built-in plan)")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Project users, revenue and profit month by month
    Project {
        #[arg(long, default_value_t = DEFAULT_PROJECTION_MONTHS)]
        months: u32,
        /// First day of the projection (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Write every projected month to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compute TAM, SAM and SOM with their derivation trail
    Market {
        #[arg(long, default_value_t = DEFAULT_SOM_TIMEFRAME_MONTHS)]
        timeframe_months: u32,
        /// Write the assumptions log to this CSV file
        #[arg(long)]
        assumptions_csv: Option<PathBuf>,
    },
    /// Validate steady-state unit economics
    Economics,
    /// Show the channel mix and the 90-day weekly plan
    Roadmap {
        #[arg(long, default_value = DEFAULT_WEEKLY_PLAN_PATH)]
        plan: PathBuf,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Write the dated weekly plan to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the active assumptions as JSON
    DumpConfig,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let assumptions = load_assumptions(cli.config.as_deref())?;

    match cli.command {
        Commands::Project { months, start_date, output } => {
            let mut config = ProjectionConfig {
                projection_months: months,
                ..ProjectionConfig::default()
            };
            if let Some(date) = start_date {
                config.start_date = date;
            }
            run_project(assumptions, config, output.as_deref(), cli.json)
        }
        Commands::Market { timeframe_months, assumptions_csv } => {
            run_market(assumptions, timeframe_months, assumptions_csv.as_deref(), cli.json)
        }
        Commands::Economics => run_economics(&assumptions, cli.json),
        Commands::Roadmap { plan, start_date, output } => {
            let start = start_date.unwrap_or_else(|| chrono::Local::now().date_naive());
            run_roadmap(&assumptions, &plan, start, output.as_deref(), cli.json)
        }
        Commands::DumpConfig => {
            println!("{}", assumptions.to_json_pretty()?);
            Ok(())
        }
    }
}

fn load_assumptions(path: Option<&Path>) -> Result<Assumptions> {
    match path {
        Some(path) => Assumptions::from_json_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display())),
        None => Ok(Assumptions::default_plan()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_project(
    assumptions: Assumptions,
    config: ProjectionConfig,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let engine = ProjectionEngine::new(assumptions, config);
    let result = engine.project();
    let summary = result.summary();

    if let Some(path) = output {
        export::write_projections_to_path(path, &result.rows)
            .with_context(|| format!("writing projections to {}", path.display()))?;
    }

    if json {
        #[derive(Serialize)]
        struct ProjectionOutput<'a> {
            rows: &'a ProjectionResult,
            summary: &'a gtm_model::projection::ProjectionSummary,
        }
        return print_json(&ProjectionOutput { rows: &result, summary: &summary });
    }

    println!("GTM Model - {} month projection", result.len());
    println!("=================================\n");

    println!("{:>5} {:>8} {:<8} {:>12} {:>10} {:>12} {:>14} {:>8}",
        "Month", "Period", "Phase", "Users", "Paying", "MRR", "Net Profit", "LTV/CAC");
    println!("{}", "-".repeat(86));
    for month in MILESTONE_MONTHS {
        if let Some(row) = result.month(month) {
            println!("{:>5} {:>8} {:<8} {:>12} {:>10} {:>12.0} {:>14.0} {:>8.2}",
                row.month,
                row.period,
                row.phase,
                row.total_users,
                row.paying_users,
                row.mrr,
                row.net_profit,
                row.ltv_cac_ratio,
            );
        }
    }

    println!("\nSummary:");
    println!("  Cumulative Revenue: ${:.0}", summary.cumulative_revenue);
    println!("  Cumulative Costs:   ${:.0}", summary.cumulative_costs);
    println!("  Net Income:         ${:.0}", summary.net_income);
    println!("  Avg User Growth:    {:.1}%/month", summary.avg_monthly_user_growth * 100.0);

    let break_even = &summary.break_even;
    match (break_even.month, break_even.mrr_at_break_even) {
        (Some(month), Some(mrr)) => println!("  Break-even:         month {} (MRR ${:.0})", month, mrr),
        _ => println!("  Break-even:         not reached within {} months", result.len()),
    }

    if let Some(readiness) = &summary.fundraising {
        println!("\nFundraising readiness (month {}): {}/{} - {}",
            readiness.month, readiness.score, readiness.max_score(), readiness.assessment.label());
        for check in &readiness.checks {
            println!("  [{}] {:<22} {:>14.3} (threshold {})",
                if check.passed { "x" } else { " " }, check.metric, check.value, check.threshold);
        }
    }

    if let Some(path) = output {
        println!("\nProjection written to {}", path.display());
    }

    Ok(())
}

fn print_estimate(estimate: &MarketEstimate) {
    println!("{}: {:>14} ({:?} confidence)",
        estimate.stage.label(), estimate.population_count, estimate.confidence_level);

    for note in &estimate.methodology_notes {
        match note {
            MethodologyNote::Segment { label, population } => {
                println!("    {:<40} {:>14}", label, population)
            }
            MethodologyNote::BottomUpTotal { population } => {
                println!("    {:<40} {:>14}", "Bottom-up total", population)
            }
            MethodologyNote::TopDown { global_knowledge_workers, fraction, population } => {
                println!("    Top-down: {} x {:.0}% = {}", global_knowledge_workers, fraction * 100.0, population)
            }
            MethodologyNote::Blend { bottom_up, top_down } => {
                println!("    Blend of bottom-up {} and top-down {}", bottom_up, top_down)
            }
            MethodologyNote::Filter(step) => {
                println!("    x {:>5.1}% {:<32} -> {:>12}", step.retention_fraction * 100.0, step.label, step.remaining)
            }
            MethodologyNote::FunnelStage { label, rate, remaining } => {
                println!("    x {:>5.1}% {:<32} -> {:>12}", rate * 100.0, label, remaining)
            }
            MethodologyNote::Validation { label, population, .. } => {
                println!("    (validation) {:<27} {:>14}", label, population)
            }
        }
    }

    if let Some(alt) = estimate.alternative_estimate {
        println!("    Alternative estimate: {}", alt);
    }
    if let Some(p) = estimate.penetration_of_tam {
        println!("    Penetration of TAM: {:.4}%", p * 100.0);
    }
    if let Some(p) = estimate.penetration_of_sam {
        println!("    Penetration of SAM: {:.4}%", p * 100.0);
    }
    if let Some(revenue) = &estimate.revenue_potential {
        println!("    Revenue potential: {} paying, MRR ${:.0}, ARR ${:.0}",
            revenue.paying_customers, revenue.mrr, revenue.arr);
    }
}

fn run_market(
    assumptions: Assumptions,
    timeframe_months: u32,
    assumptions_csv: Option<&Path>,
    json: bool,
) -> Result<()> {
    let mut calculator = MarketFunnelCalculator::new(assumptions.market);
    let sizing = calculator.compute_all(timeframe_months);

    if let Some(path) = assumptions_csv {
        export::write_assumptions_log_to_path(path, calculator.assumptions_log())
            .with_context(|| format!("writing assumptions log to {}", path.display()))?;
    }

    if json {
        return print_json(&sizing);
    }

    println!("Market Sizing");
    println!("=============\n");
    for estimate in [&sizing.tam, &sizing.sam, &sizing.som] {
        print_estimate(estimate);
        println!();
    }
    println!("{} assumptions recorded", calculator.assumptions_log().len());

    Ok(())
}

fn run_economics(assumptions: &Assumptions, json: bool) -> Result<()> {
    let report = UnitEconomics::validate(assumptions);

    if json {
        return print_json(&report);
    }

    println!("Unit Economics");
    println!("==============\n");
    println!("  ARPU:              ${:.2}", report.arpu);
    println!("  Cost per user:     ${:.2}", report.cost_per_user);
    println!("  Gross margin:      {:.1}%", report.gross_margin * 100.0);
    println!("  Lifetime:          {:.1} months", report.customer_lifetime_months);
    println!("  LTV:               ${:.2}", report.ltv);
    println!("  CAC:               ${:.2}", report.cac);
    println!("  LTV/CAC:           {:.2}x", report.ltv_cac_ratio);
    println!("  Payback:           {:.1} months", report.payback_months);
    println!("  Magic number:      {:.2}", report.magic_number);
    println!("  Break-even users:  {}", report.users_needed_for_break_even);
    println!("  Break-even MRR:    ${:.0}", report.mrr_needed_for_break_even);
    println!();
    for check in &report.health_checks {
        println!("  {:<16} {:>8.2} (target {}) {}",
            check.metric, check.value, check.target, check.status.label());
    }

    Ok(())
}

fn run_roadmap(
    assumptions: &Assumptions,
    plan_path: &Path,
    start: NaiveDate,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let channels = ChannelPlan::from_channels(&assumptions.channels);
    let plan = load_weekly_plan(plan_path)
        .with_context(|| format!("loading weekly plan from {}", plan_path.display()))?;

    if let Some(path) = output {
        export::write_weekly_plan_to_path(path, &plan, start)
            .with_context(|| format!("writing weekly plan to {}", path.display()))?;
    }

    if json {
        #[derive(Serialize)]
        struct RoadmapOutput<'a> {
            channels: &'a ChannelPlan,
            weeks: Vec<gtm_model::roadmap::DatedWeek>,
        }
        return print_json(&RoadmapOutput { channels: &channels, weeks: plan.dated(start) });
    }

    println!("Acquisition Channels");
    println!("====================\n");
    for channel in &channels.channels {
        println!("  {:<32} {:>6} users  ${:>8.0}  CAC ${:>5.0}  {:>5.1}% of budget",
            channel.name, channel.expected_users, channel.budget, channel.cac, channel.budget_share * 100.0);
    }
    println!("  Total: {} users for ${:.0}, blended CAC ${:.2}\n",
        channels.total_expected_users, channels.total_budget, channels.blended_cac);

    println!("90-Day Plan");
    println!("===========\n");
    for week in plan.dated(start) {
        println!("  Week {:>2} {} - {}  {:<28} {:<28} ${:>6.0}  {} tasks",
            week.week, week.start_date, week.end_date, week.phase, week.focus, week.budget_usd, week.num_tasks);
    }
    println!("\n  Total budget: ${:.0}, {} tasks", plan.total_budget(), plan.total_tasks());

    Ok(())
}
