//! Phase-dependent user growth parameters and the free-to-paid ramp

use serde::{Deserialize, Serialize};

/// How a phase produces its monthly signup base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignupSchedule {
    /// Literal net-new signups per month, indexed from the phase's first month
    Literal { monthly: Vec<f64> },
    /// `base * growth^(month - first_month + 1)`
    Compounding { base: f64, monthly_growth: f64 },
}

/// One row of the growth phase table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPhase {
    pub name: String,
    pub first_month: u32,
    /// Inclusive; `None` means the phase runs to the end of the projection
    pub last_month: Option<u32>,
    pub signups: SignupSchedule,
    pub viral_coefficient: f64,
    pub churn_rate: f64,
}

impl GrowthPhase {
    pub fn contains(&self, month: u32) -> bool {
        month >= self.first_month && self.last_month.map_or(true, |last| month <= last)
    }

    /// Signup base for a month inside this phase
    pub fn signup_base(&self, month: u32) -> f64 {
        let offset = month.saturating_sub(self.first_month);
        match &self.signups {
            SignupSchedule::Literal { monthly } => {
                monthly.get(offset as usize).copied().unwrap_or(0.0)
            }
            SignupSchedule::Compounding { base, monthly_growth } => {
                base * monthly_growth.powf((offset + 1) as f64)
            }
        }
    }
}

/// Free-to-paid conversion ramp
///
/// Launch months: `launch_base + month * launch_step`.
/// Afterwards: `min(cap, steady_base + (month - launch_months) * steady_step)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRamp {
    pub launch_months: u32,
    pub launch_base: f64,
    pub launch_step: f64,
    pub steady_base: f64,
    pub steady_step: f64,
    pub cap: f64,
}

impl ConversionRamp {
    pub fn rate(&self, month: u32) -> f64 {
        if month <= self.launch_months {
            self.launch_base + month as f64 * self.launch_step
        } else {
            self.cap
                .min(self.steady_base + (month - self.launch_months) as f64 * self.steady_step)
        }
    }
}

impl Default for ConversionRamp {
    fn default() -> Self {
        Self {
            launch_months: 3,
            launch_base: 0.05,
            launch_step: 0.015,
            steady_base: 0.08,
            steady_step: 0.003,
            cap: 0.10,
        }
    }
}

/// Growth table plus starting balances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthAssumptions {
    pub phases: Vec<GrowthPhase>,
    pub conversion: ConversionRamp,
    #[serde(default)]
    pub starting_users: u64,
    #[serde(default)]
    pub starting_paying_users: u64,
}

impl GrowthAssumptions {
    /// Phase governing a month; months past the table use the last phase
    pub fn phase_for(&self, month: u32) -> Option<&GrowthPhase> {
        self.phases
            .iter()
            .find(|p| p.contains(month))
            .or_else(|| self.phases.last())
    }
}

impl Default for GrowthAssumptions {
    fn default() -> Self {
        Self {
            phases: vec![
                GrowthPhase {
                    name: "Launch".to_string(),
                    first_month: 1,
                    last_month: Some(3),
                    signups: SignupSchedule::Literal {
                        monthly: vec![100.0, 1000.0, 3900.0],
                    },
                    viral_coefficient: 0.15,
                    churn_rate: 0.08,
                },
                GrowthPhase {
                    name: "Scaling".to_string(),
                    first_month: 4,
                    last_month: Some(6),
                    signups: SignupSchedule::Compounding {
                        base: 3000.0,
                        monthly_growth: 1.20,
                    },
                    viral_coefficient: 0.25,
                    churn_rate: 0.06,
                },
                GrowthPhase {
                    name: "Growth".to_string(),
                    first_month: 7,
                    last_month: Some(12),
                    signups: SignupSchedule::Compounding {
                        base: 5000.0,
                        monthly_growth: 1.15,
                    },
                    viral_coefficient: 0.30,
                    churn_rate: 0.05,
                },
                GrowthPhase {
                    name: "Mature".to_string(),
                    first_month: 13,
                    last_month: None,
                    signups: SignupSchedule::Compounding {
                        base: 8000.0,
                        monthly_growth: 1.10,
                    },
                    viral_coefficient: 0.35,
                    churn_rate: 0.04,
                },
            ],
            conversion: ConversionRamp::default(),
            starting_users: 0,
            starting_paying_users: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_phase_lookup() {
        let growth = GrowthAssumptions::default();

        assert_eq!(growth.phase_for(1).unwrap().name, "Launch");
        assert_eq!(growth.phase_for(3).unwrap().name, "Launch");
        assert_eq!(growth.phase_for(4).unwrap().name, "Scaling");
        assert_eq!(growth.phase_for(12).unwrap().name, "Growth");
        assert_eq!(growth.phase_for(13).unwrap().name, "Mature");
        assert_eq!(growth.phase_for(60).unwrap().name, "Mature");
    }

    #[test]
    fn test_signup_bases() {
        let growth = GrowthAssumptions::default();
        let base = |m: u32| growth.phase_for(m).unwrap().signup_base(m);

        assert_eq!(base(1), 100.0);
        assert_eq!(base(2), 1000.0);
        assert_eq!(base(3), 3900.0);
        assert_relative_eq!(base(4), 3000.0 * 1.20, epsilon = 1e-9);
        assert_relative_eq!(base(6), 3000.0 * 1.20_f64.powi(3), epsilon = 1e-9);
        assert_relative_eq!(base(7), 5000.0 * 1.15, epsilon = 1e-9);
        assert_relative_eq!(base(13), 8000.0 * 1.10, epsilon = 1e-9);
        assert_relative_eq!(base(24), 8000.0 * 1.10_f64.powi(12), epsilon = 1e-6);
    }

    #[test]
    fn test_literal_schedule_runs_out() {
        let phase = GrowthPhase {
            name: "Short".to_string(),
            first_month: 1,
            last_month: None,
            signups: SignupSchedule::Literal { monthly: vec![10.0] },
            viral_coefficient: 0.0,
            churn_rate: 0.0,
        };

        assert_eq!(phase.signup_base(1), 10.0);
        assert_eq!(phase.signup_base(2), 0.0);
    }

    #[test]
    fn test_conversion_ramp() {
        let ramp = ConversionRamp::default();

        assert_relative_eq!(ramp.rate(1), 0.065, epsilon = 1e-12);
        assert_relative_eq!(ramp.rate(3), 0.095, epsilon = 1e-12);
        assert_relative_eq!(ramp.rate(4), 0.083, epsilon = 1e-12);
        assert_relative_eq!(ramp.rate(9), 0.098, epsilon = 1e-12);
        // Capped at 10%
        assert_eq!(ramp.rate(10), 0.10);
        assert_eq!(ramp.rate(24), 0.10);
    }
}
