//! Acquisition channel mix and blended CAC

use crate::assumptions::{Channel, ChannelKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelAllocation {
    pub key: String,
    pub name: String,
    pub kind: ChannelKind,
    pub expected_users: u64,
    pub cac: f64,
    pub budget: f64,
    pub timeline: String,
    pub success_criteria: String,
    /// Share of total expected users
    pub user_share: f64,
    /// Share of total budget
    pub budget_share: f64,
}

/// Channel plan with totals and mix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelPlan {
    pub channels: Vec<ChannelAllocation>,
    pub total_expected_users: u64,
    pub total_budget: f64,
    pub blended_cac: f64,
}

impl ChannelPlan {
    pub fn from_channels(channels: &[Channel]) -> Self {
        let total_expected_users: u64 = channels.iter().map(|c| c.expected_users).sum();
        let total_budget: f64 = channels.iter().map(|c| c.budget).sum();

        let blended_cac = if total_expected_users > 0 {
            total_budget / total_expected_users as f64
        } else {
            0.0
        };

        let channels = channels
            .iter()
            .map(|c| ChannelAllocation {
                key: c.key.clone(),
                name: c.name.clone(),
                kind: c.kind,
                expected_users: c.expected_users,
                cac: c.cac,
                budget: c.budget,
                timeline: c.timeline.clone(),
                success_criteria: c.success_criteria.clone(),
                user_share: if total_expected_users > 0 {
                    c.expected_users as f64 / total_expected_users as f64
                } else {
                    0.0
                },
                budget_share: if total_budget > 0.0 { c.budget / total_budget } else { 0.0 },
            })
            .collect();

        log::debug!(
            "Channel plan: {} users for ${:.0}, blended CAC ${:.2}",
            total_expected_users, total_budget, blended_cac
        );

        Self {
            channels,
            total_expected_users,
            total_budget,
            blended_cac,
        }
    }

    pub fn channel(&self, key: &str) -> Option<&ChannelAllocation> {
        self.channels.iter().find(|c| c.key == key)
    }
}
