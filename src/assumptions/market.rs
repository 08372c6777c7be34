//! Market-sizing inputs: population segments, filter ratios and the
//! beachhead capture funnel

use serde::{Deserialize, Serialize};

/// One counted sub-population inside a segment (e.g. "postdocs")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentComponent {
    pub label: String,
    pub count: u64,
}

impl SegmentComponent {
    pub fn new(label: &str, count: u64) -> Self {
        Self {
            label: label.to_string(),
            count,
        }
    }
}

/// Named population segment used by the bottom-up TAM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSegment {
    /// Stable key, referenced by the beachhead funnel
    pub key: String,
    pub label: String,
    pub components: Vec<SegmentComponent>,
    /// Share of the summed components that actually does research work
    #[serde(default = "default_fraction")]
    pub relevant_fraction: f64,
}

fn default_fraction() -> f64 {
    1.0
}

impl MarketSegment {
    pub fn new(key: &str, label: &str, components: Vec<SegmentComponent>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            components,
            relevant_fraction: 1.0,
        }
    }

    pub fn with_relevant_fraction(mut self, fraction: f64) -> Self {
        self.relevant_fraction = fraction;
        self
    }

    /// Raw head count before the relevance fraction
    pub fn gross_count(&self) -> u64 {
        self.components.iter().fold(0u64, |acc, c| acc.saturating_add(c.count))
    }

    /// Population counted towards TAM (truncated)
    pub fn population(&self) -> u64 {
        (self.gross_count() as f64 * self.relevant_fraction) as u64
    }
}

/// Global knowledge workers times the share doing research synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDownEstimate {
    pub global_knowledge_workers: u64,
    pub research_synthesis_fraction: f64,
    pub source: String,
}

impl TopDownEstimate {
    pub fn population(&self) -> u64 {
        (self.global_knowledge_workers as f64 * self.research_synthesis_fraction) as u64
    }
}

/// Multiplicative narrowing applied when deriving SAM from TAM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterAssumption {
    pub label: String,
    pub retention_fraction: f64,
    pub rationale: String,
}

impl FilterAssumption {
    pub fn new(label: &str, retention_fraction: f64, rationale: &str) -> Self {
        Self {
            label: label.to_string(),
            retention_fraction,
            rationale: rationale.to_string(),
        }
    }
}

/// Fixed external reference number used for sanity checks only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEstimate {
    pub label: String,
    pub population: u64,
    pub rationale: String,
    pub source: String,
}

/// Beachhead-segment capture funnel behind the official SOM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeachheadFunnel {
    pub name: String,
    /// Key of the TAM segment the beachhead is drawn from
    pub segment_key: String,
    pub language_fraction: f64,
    pub actively_researching_fraction: f64,
    pub awareness_rate: f64,
    pub signup_rate: f64,
    pub activation_rate: f64,
    pub target_market_share: f64,
}

/// Revenue derivatives attached to SOM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePotentialAssumptions {
    pub conversion_rate: f64,
    pub arpu_monthly: f64,
}

/// All market-sizing constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    pub segments: Vec<MarketSegment>,
    pub top_down: TopDownEstimate,
    pub sam_filters: Vec<FilterAssumption>,
    pub sam_reference: ReferenceEstimate,
    pub beachhead: BeachheadFunnel,
    /// SOM_alt = SAM x this fraction
    pub alternative_som_fraction: f64,
    pub revenue: RevenuePotentialAssumptions,
    pub tam_sources: Vec<String>,
    pub sam_sources: Vec<String>,
}

impl MarketAssumptions {
    pub fn segment(&self, key: &str) -> Option<&MarketSegment> {
        self.segments.iter().find(|s| s.key == key)
    }

    /// Sum of all bottom-up segment populations
    pub fn bottom_up_total(&self) -> u64 {
        self.segments
            .iter()
            .fold(0u64, |acc, segment| acc.saturating_add(segment.population()))
    }

    /// Combined retention of every SAM filter
    pub fn combined_retention(&self) -> f64 {
        self.sam_filters.iter().map(|f| f.retention_fraction).product()
    }
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        let segments = vec![
            MarketSegment::new(
                "academics",
                "Academics",
                vec![
                    SegmentComponent::new("PhD students", 4_000_000),
                    SegmentComponent::new("Professors & researchers", 8_000_000),
                    SegmentComponent::new("Postdocs", 1_000_000),
                ],
            ),
            MarketSegment::new(
                "corporate_researchers",
                "Corporate Researchers",
                vec![
                    SegmentComponent::new("R&D professionals", 12_000_000),
                    SegmentComponent::new("Market researchers", 5_000_000),
                ],
            ),
            MarketSegment::new(
                "consultants",
                "Consultants",
                vec![
                    SegmentComponent::new("Management consultants", 2_000_000),
                    SegmentComponent::new("Independent consultants", 3_000_000),
                ],
            ),
            MarketSegment::new(
                "journalists_writers",
                "Journalists & Writers",
                vec![
                    SegmentComponent::new("Journalists", 1_500_000),
                    SegmentComponent::new("Content writers", 8_000_000),
                ],
            ),
            // Only a fifth of graduate students do serious research
            MarketSegment::new(
                "students",
                "Students",
                vec![SegmentComponent::new("Graduate students", 35_000_000)],
            )
            .with_relevant_fraction(0.20),
            MarketSegment::new(
                "analysts",
                "Analysts",
                vec![
                    SegmentComponent::new("Financial analysts", 3_000_000),
                    SegmentComponent::new("Data analysts", 5_000_000),
                    SegmentComponent::new("Business analysts", 4_000_000),
                ],
            ),
            MarketSegment::new(
                "other_knowledge_workers",
                "Other Knowledge Workers",
                vec![
                    SegmentComponent::new("Lawyers", 5_000_000),
                    SegmentComponent::new("Doctors doing research", 2_000_000),
                    SegmentComponent::new("Engineers (technical writing)", 8_000_000),
                ],
            ),
        ];

        Self {
            segments,
            top_down: TopDownEstimate {
                global_knowledge_workers: 1_200_000_000,
                research_synthesis_fraction: 0.25,
                source: "McKinsey Global Institute".to_string(),
            },
            sam_filters: vec![
                FilterAssumption::new(
                    "English language",
                    0.20,
                    "English is the lingua franca of research, but not everyone is comfortable with it",
                ),
                FilterAssumption::new(
                    "Digital tool adoption",
                    0.90,
                    "High digital adoption in developed markets",
                ),
                FilterAssumption::new(
                    "AI tool willingness",
                    0.70,
                    "Gartner 2025: 68% of knowledge workers use AI tools",
                ),
                FilterAssumption::new(
                    "Paid tool willingness",
                    0.60,
                    "SaaS penetration in the productivity space",
                ),
            ],
            sam_reference: ReferenceEstimate {
                label: "Current AI productivity users".to_string(),
                population: 50_000_000,
                rationale: "Users of Notion AI, ChatGPT Plus, Mem.ai, etc.".to_string(),
                source: "Gartner AI Adoption Survey 2025".to_string(),
            },
            beachhead: BeachheadFunnel {
                name: "Academic Researchers & PhD Students".to_string(),
                segment_key: "academics".to_string(),
                language_fraction: 0.30,
                actively_researching_fraction: 0.80,
                awareness_rate: 0.05,
                signup_rate: 0.20,
                activation_rate: 0.40,
                target_market_share: 0.10,
            },
            alternative_som_fraction: 0.04,
            revenue: RevenuePotentialAssumptions {
                conversion_rate: 0.10,
                arpu_monthly: 15.0,
            },
            tam_sources: vec![
                "UNESCO Institute for Statistics".to_string(),
                "World Bank Development Indicators".to_string(),
                "OECD Science & Technology Indicators".to_string(),
                "McKinsey Global Institute".to_string(),
                "IBISWorld Industry Reports".to_string(),
            ],
            sam_sources: vec![
                "Gartner AI Adoption Survey".to_string(),
                "Statista SaaS Penetration Data".to_string(),
            ],
        }
    }
}
