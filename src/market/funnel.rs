//! TAM -> SAM -> SOM calculator
//!
//! Two tracks are kept side by side:
//! - the official numbers (bottom-up/top-down blend for TAM, filter chain for
//!   SAM, beachhead capture funnel for SOM)
//! - validation numbers (external SAM reference, SOM as a share of SAM) that
//!   are recorded on the estimate but never feed the official value.
//!
//! SOM is therefore not a strict sub-filter of SAM.

use crate::assumptions::MarketAssumptions;
use super::types::{
    AssumptionRecord, ConfidenceLevel, FilterStep, MarketEstimate, MarketStage, MethodologyNote,
    RevenuePotential, Sensitivity, penetration,
};
use serde::{Deserialize, Serialize};

/// Default SOM horizon
pub const DEFAULT_SOM_TIMEFRAME_MONTHS: u32 = 12;

/// All three stages computed together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSizing {
    pub tam: MarketEstimate,
    pub sam: MarketEstimate,
    pub som: MarketEstimate,
}

/// Market funnel calculator with per-stage caches
///
/// Requesting SAM or SOM before their prerequisite computes the prerequisite
/// first. Every computation appends to the assumptions log.
#[derive(Debug, Clone)]
pub struct MarketFunnelCalculator {
    assumptions: MarketAssumptions,
    tam: Option<MarketEstimate>,
    sam: Option<MarketEstimate>,
    som: Option<MarketEstimate>,
    assumptions_log: Vec<AssumptionRecord>,
}

impl MarketFunnelCalculator {
    pub fn new(assumptions: MarketAssumptions) -> Self {
        Self {
            assumptions,
            tam: None,
            sam: None,
            som: None,
            assumptions_log: Vec::new(),
        }
    }

    /// Compute TAM, replacing any cached value
    pub fn compute_tam(&mut self) -> MarketEstimate {
        let estimate = build_tam(&self.assumptions, &mut self.assumptions_log);
        self.tam = Some(estimate.clone());
        estimate
    }

    /// Compute SAM from the cached TAM (computed first if absent)
    pub fn compute_sam(&mut self) -> MarketEstimate {
        let tam_population = self.tam().population_count;
        let estimate = build_sam(&self.assumptions, tam_population, &mut self.assumptions_log);
        self.sam = Some(estimate.clone());
        estimate
    }

    /// Compute SOM over `timeframe_months` from the cached SAM (computed first if absent)
    pub fn compute_som(&mut self, timeframe_months: u32) -> MarketEstimate {
        let sam_population = self.sam().population_count;
        let tam_population = self.tam().population_count;
        let estimate = build_som(
            &self.assumptions,
            tam_population,
            sam_population,
            timeframe_months,
            &mut self.assumptions_log,
        );
        self.som = Some(estimate.clone());
        estimate
    }

    /// Cached TAM, computing it if absent
    pub fn tam(&mut self) -> &MarketEstimate {
        let Self { assumptions, tam, assumptions_log, .. } = self;
        tam.get_or_insert_with(|| build_tam(assumptions, assumptions_log))
    }

    /// Cached SAM, computing it (and TAM) if absent
    pub fn sam(&mut self) -> &MarketEstimate {
        let tam_population = self.tam().population_count;
        let Self { assumptions, sam, assumptions_log, .. } = self;
        sam.get_or_insert_with(|| build_sam(assumptions, tam_population, assumptions_log))
    }

    /// Cached SOM, computing the chain with the default timeframe if absent
    pub fn som(&mut self) -> &MarketEstimate {
        let sam_population = self.sam().population_count;
        let tam_population = self.tam().population_count;
        let Self { assumptions, som, assumptions_log, .. } = self;
        som.get_or_insert_with(|| {
            build_som(
                assumptions,
                tam_population,
                sam_population,
                DEFAULT_SOM_TIMEFRAME_MONTHS,
                assumptions_log,
            )
        })
    }

    /// Run the full chain
    pub fn compute_all(&mut self, timeframe_months: u32) -> MarketSizing {
        let tam = self.compute_tam();
        let sam = self.compute_sam();
        let som = self.compute_som(timeframe_months);
        MarketSizing { tam, sam, som }
    }

    pub fn cached_tam(&self) -> Option<&MarketEstimate> {
        self.tam.as_ref()
    }

    pub fn cached_sam(&self) -> Option<&MarketEstimate> {
        self.sam.as_ref()
    }

    pub fn cached_som(&self) -> Option<&MarketEstimate> {
        self.som.as_ref()
    }

    /// Every assumption recorded so far, oldest first
    pub fn assumptions_log(&self) -> &[AssumptionRecord] {
        &self.assumptions_log
    }

    pub fn assumptions(&self) -> &MarketAssumptions {
        &self.assumptions
    }
}

fn build_tam(market: &MarketAssumptions, log: &mut Vec<AssumptionRecord>) -> MarketEstimate {
    let bottom_up = market.bottom_up_total();
    let top_down = market.top_down.population();
    let final_population = ((u128::from(bottom_up) + u128::from(top_down)) / 2) as u64;

    let mut estimate = MarketEstimate::new(MarketStage::Tam, final_population, ConfidenceLevel::Medium);
    for segment in &market.segments {
        estimate.methodology_notes.push(MethodologyNote::Segment {
            label: segment.label.clone(),
            population: segment.population(),
        });
    }
    estimate.methodology_notes.push(MethodologyNote::BottomUpTotal { population: bottom_up });
    estimate.methodology_notes.push(MethodologyNote::TopDown {
        global_knowledge_workers: market.top_down.global_knowledge_workers,
        fraction: market.top_down.research_synthesis_fraction,
        population: top_down,
    });
    estimate.methodology_notes.push(MethodologyNote::Blend { bottom_up, top_down });
    estimate.sources = market.tam_sources.clone();
    estimate.penetration_of_tam = Some(1.0);

    log.push(AssumptionRecord {
        category: MarketStage::Tam,
        assumption: format!(
            "{:.0}% of global knowledge workers ({}) do research synthesis work",
            market.top_down.research_synthesis_fraction * 100.0,
            market.top_down.global_knowledge_workers
        ),
        rationale: "Based on job description analysis and McKinsey productivity studies".to_string(),
        sensitivity: Sensitivity::High,
        impact_if_wrong: "TAM could be 50% lower or 2x higher".to_string(),
    });

    log::info!(
        "TAM calculated: {} users (bottom-up {}, top-down {})",
        final_population, bottom_up, top_down
    );
    estimate
}

fn build_sam(
    market: &MarketAssumptions,
    tam_population: u64,
    log: &mut Vec<AssumptionRecord>,
) -> MarketEstimate {
    let mut retained = tam_population as f64;
    let mut steps = Vec::with_capacity(market.sam_filters.len());
    for filter in &market.sam_filters {
        retained *= filter.retention_fraction;
        let step = FilterStep {
            label: filter.label.clone(),
            retention_fraction: filter.retention_fraction,
            rationale: filter.rationale.clone(),
            remaining: retained as u64,
        };
        log::debug!("SAM filter '{}' x{} -> {}", step.label, step.retention_fraction, step.remaining);
        steps.push(step);
    }
    let sam_population = retained as u64;

    // Medium-high, rounded down on the three-level scale
    let mut estimate = MarketEstimate::new(MarketStage::Sam, sam_population, ConfidenceLevel::Medium);
    estimate
        .methodology_notes
        .extend(steps.into_iter().map(MethodologyNote::Filter));

    let reference = &market.sam_reference;
    estimate.methodology_notes.push(MethodologyNote::Validation {
        label: reference.label.clone(),
        population: reference.population,
        rationale: reference.rationale.clone(),
    });
    estimate.alternative_estimate = Some(reference.population);
    estimate.penetration_of_tam = Some(penetration(sam_population, tam_population));
    estimate.sources = market.sam_sources.clone();

    if let Some(last) = market.sam_filters.last() {
        log.push(AssumptionRecord {
            category: MarketStage::Sam,
            assumption: format!(
                "Only {:.0}% pass the final filter ({})",
                last.retention_fraction * 100.0,
                last.label
            ),
            rationale: "Many free alternatives exist (Google Docs, free Notion, ChatGPT free tier)"
                .to_string(),
            sensitivity: Sensitivity::High,
            impact_if_wrong: "Could be 70-80% if the value proposition is strong".to_string(),
        });
    }

    log::info!(
        "SAM calculated: {} users ({:.1}% of TAM, validation reference {})",
        sam_population,
        penetration(sam_population, tam_population) * 100.0,
        reference.population
    );
    estimate
}

fn build_som(
    market: &MarketAssumptions,
    tam_population: u64,
    sam_population: u64,
    timeframe_months: u32,
    log: &mut Vec<AssumptionRecord>,
) -> MarketEstimate {
    let funnel = &market.beachhead;
    let segment_population = match market.segment(&funnel.segment_key) {
        Some(segment) => segment.population(),
        None => {
            log::warn!("Beachhead segment '{}' not found in TAM segments", funnel.segment_key);
            0
        }
    };

    let potential = (segment_population as f64
        * funnel.language_fraction
        * funnel.actively_researching_fraction) as u64;
    let aware = (potential as f64 * funnel.awareness_rate) as u64;
    let signups = (aware as f64 * funnel.signup_rate) as u64;
    let activated = (signups as f64 * funnel.activation_rate) as u64;
    let captured = (activated as f64 * funnel.target_market_share) as u64;

    let som_population = if captured > tam_population {
        log::warn!("SOM {} exceeds TAM {}, clamping", captured, tam_population);
        tam_population
    } else {
        captured
    };

    let mut estimate = MarketEstimate::new(MarketStage::Som, som_population, ConfidenceLevel::Medium);
    estimate.methodology_notes.extend([
        MethodologyNote::Segment {
            label: funnel.name.clone(),
            population: segment_population,
        },
        MethodologyNote::FunnelStage {
            label: "Potential users".to_string(),
            rate: funnel.language_fraction * funnel.actively_researching_fraction,
            remaining: potential,
        },
        MethodologyNote::FunnelStage {
            label: "Awareness".to_string(),
            rate: funnel.awareness_rate,
            remaining: aware,
        },
        MethodologyNote::FunnelStage {
            label: "Sign-ups".to_string(),
            rate: funnel.signup_rate,
            remaining: signups,
        },
        MethodologyNote::FunnelStage {
            label: "Activated users".to_string(),
            rate: funnel.activation_rate,
            remaining: activated,
        },
        MethodologyNote::FunnelStage {
            label: "Market share".to_string(),
            rate: funnel.target_market_share,
            remaining: captured,
        },
    ]);

    let alternative = (sam_population as f64 * market.alternative_som_fraction) as u64;
    estimate.methodology_notes.push(MethodologyNote::Validation {
        label: "Share of SAM".to_string(),
        population: alternative,
        rationale: format!(
            "{:.0}% of SAM (conservative top-down)",
            market.alternative_som_fraction * 100.0
        ),
    });
    estimate.alternative_estimate = Some(alternative);
    estimate.penetration_of_tam = Some(penetration(som_population, tam_population));
    estimate.penetration_of_sam = Some(penetration(som_population, sam_population));
    estimate.timeframe_months = Some(timeframe_months);

    let revenue = &market.revenue;
    let paying_customers = (som_population as f64 * revenue.conversion_rate) as u64;
    let mrr = paying_customers as f64 * revenue.arpu_monthly;
    estimate.revenue_potential = Some(RevenuePotential {
        arpu_monthly: revenue.arpu_monthly,
        conversion_rate: revenue.conversion_rate,
        paying_customers,
        mrr,
        arr: mrr * 12.0,
    });

    log.push(AssumptionRecord {
        category: MarketStage::Som,
        assumption: format!(
            "Can capture {:.0}% market share in the beachhead ({}) in {} months",
            funnel.target_market_share * 100.0,
            funnel.name,
            timeframe_months
        ),
        rationale: "Strong positioning, clear differentiation, dedicated focus".to_string(),
        sensitivity: Sensitivity::VeryHigh,
        impact_if_wrong: "SOM could be 5% (pessimistic) to 15% (optimistic)".to_string(),
    });

    log::info!(
        "SOM calculated: {} users in {} months ({} paying, MRR ${:.0})",
        som_population, timeframe_months, paying_customers, mrr
    );
    estimate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::MarketAssumptions;
    use approx::assert_relative_eq;

    fn calculator() -> MarketFunnelCalculator {
        MarketFunnelCalculator::new(MarketAssumptions::default())
    }

    #[test]
    fn test_tam_blends_methodologies() {
        let tam = calculator().compute_tam();

        // (78.5M bottom-up + 300M top-down) / 2
        assert_eq!(tam.stage, MarketStage::Tam);
        assert_eq!(tam.population_count, 189_250_000);
        assert_eq!(tam.confidence_level, ConfidenceLevel::Medium);
        assert!(tam.methodology_notes.contains(&MethodologyNote::Blend {
            bottom_up: 78_500_000,
            top_down: 300_000_000,
        }));
        let segments = tam
            .methodology_notes
            .iter()
            .filter(|n| matches!(n, MethodologyNote::Segment { .. }))
            .count();
        assert_eq!(segments, 7);
    }

    #[test]
    fn test_sam_filter_chain() {
        let mut calc = calculator();
        let sam = calc.compute_sam();

        assert_eq!(sam.population_count, 14_307_300);
        assert_eq!(sam.confidence_level, ConfidenceLevel::Medium);
        let steps: Vec<_> = sam.filter_steps().collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].remaining, 37_850_000);
        assert_eq!(steps[3].remaining, sam.population_count);
        // Remaining population never grows along the chain
        assert!(steps.windows(2).all(|w| w[1].remaining <= w[0].remaining));

        // The validation reference is recorded but does not drive SAM
        assert_eq!(sam.alternative_estimate, Some(50_000_000));
        assert_relative_eq!(
            sam.penetration_of_tam.unwrap(),
            14_307_300.0 / 189_250_000.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_som_beachhead_funnel() {
        let mut calc = calculator();
        let som = calc.compute_som(12);

        assert_eq!(som.population_count, 1_248);
        assert_eq!(som.timeframe_months, Some(12));
        assert_eq!(som.alternative_estimate, Some(572_292));
        assert_ne!(som.alternative_estimate, Some(som.population_count));

        let stages: Vec<u64> = som
            .methodology_notes
            .iter()
            .filter_map(|n| match n {
                MethodologyNote::FunnelStage { remaining, .. } => Some(*remaining),
                _ => None,
            })
            .collect();
        assert_eq!(stages, vec![3_120_000, 156_000, 31_200, 12_480, 1_248]);

        let revenue = som.revenue_potential.unwrap();
        assert_eq!(revenue.paying_customers, 124);
        assert_relative_eq!(revenue.mrr, 1_860.0);
        assert_relative_eq!(revenue.arr, 22_320.0);
    }

    #[test]
    fn test_stage_ordering_invariant() {
        let sizing = calculator().compute_all(12);

        assert!(sizing.som.population_count <= sizing.sam.population_count);
        assert!(sizing.sam.population_count <= sizing.tam.population_count);
    }

    #[test]
    fn test_som_never_exceeds_tam() {
        // Tiny top-down pulls TAM below the beachhead segment
        let mut market = MarketAssumptions::default();
        market.top_down.global_knowledge_workers = 0;
        for segment in market.segments.iter_mut().filter(|s| s.key != "academics") {
            segment.relevant_fraction = 0.0;
        }
        market.beachhead.language_fraction = 1.0;
        market.beachhead.actively_researching_fraction = 1.0;
        market.beachhead.awareness_rate = 1.0;
        market.beachhead.signup_rate = 1.0;
        market.beachhead.activation_rate = 1.0;
        market.beachhead.target_market_share = 1.0;

        let mut calc = MarketFunnelCalculator::new(market);
        let som = calc.compute_som(12);
        let tam = calc.cached_tam().unwrap();

        assert_eq!(tam.population_count, 6_500_000);
        assert_eq!(som.population_count, tam.population_count);
    }

    #[test]
    fn test_auto_chain_matches_explicit_chain() {
        let mut explicit = calculator();
        explicit.compute_tam();
        explicit.compute_sam();
        let explicit_som = explicit.compute_som(12);

        let mut auto = calculator();
        let auto_som = auto.compute_som(12);

        assert_eq!(auto_som, explicit_som);
        assert_eq!(auto.cached_tam(), explicit.cached_tam());
        assert_eq!(auto.cached_sam(), explicit.cached_sam());

        let mut sam_only = calculator();
        assert_eq!(sam_only.compute_sam(), explicit.cached_sam().unwrap().clone());
    }

    #[test]
    fn test_accessors_compute_once() {
        let mut calc = calculator();
        assert!(calc.cached_tam().is_none());

        let first = calc.sam().population_count;
        let second = calc.sam().population_count;
        assert_eq!(first, second);
        // One TAM record and one SAM record, no duplicates from the second access
        assert_eq!(calc.assumptions_log().len(), 2);

        calc.som();
        assert_eq!(calc.cached_som().unwrap().timeframe_months, Some(DEFAULT_SOM_TIMEFRAME_MONTHS));
        assert_eq!(calc.assumptions_log().len(), 3);
    }

    #[test]
    fn test_assumptions_log_is_append_only() {
        let mut calc = calculator();
        calc.compute_tam();
        calc.compute_tam();
        calc.compute_som(6);

        let categories: Vec<_> = calc.assumptions_log().iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![MarketStage::Tam, MarketStage::Tam, MarketStage::Sam, MarketStage::Som]
        );
        assert_eq!(calc.assumptions_log()[3].sensitivity, Sensitivity::VeryHigh);
    }

    #[test]
    fn test_huge_top_down_does_not_overflow() {
        let mut market = MarketAssumptions::default();
        market.top_down.global_knowledge_workers = u64::MAX;
        market.top_down.research_synthesis_fraction = 1.0;

        let mut assumptions = crate::assumptions::Assumptions::default_plan();
        assumptions.market = market.clone();
        assert!(assumptions.validate().is_ok());

        let mut calc = MarketFunnelCalculator::new(market);
        let sizing = calc.compute_all(12);

        let expected = ((u128::from(u64::MAX) + 78_500_000) / 2) as u64;
        assert_eq!(sizing.tam.population_count, expected);
        assert!(sizing.sam.population_count <= sizing.tam.population_count);
        assert!(sizing.som.population_count <= sizing.tam.population_count);
    }

    #[test]
    fn test_zero_population_penetration() {
        let mut market = MarketAssumptions::default();
        market.top_down.global_knowledge_workers = 0;
        for segment in market.segments.iter_mut() {
            segment.relevant_fraction = 0.0;
        }

        let mut calc = MarketFunnelCalculator::new(market);
        let som = calc.compute_som(12);

        assert_eq!(calc.cached_tam().unwrap().population_count, 0);
        assert_eq!(calc.cached_sam().unwrap().penetration_of_tam, Some(0.0));
        assert_eq!(som.population_count, 0);
        assert_eq!(som.penetration_of_tam, Some(0.0));
        assert_eq!(som.penetration_of_sam, Some(0.0));
    }
}
