//! Acquisition channel assumptions for the 90-day launch

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    LaunchPlatform,
    Organic,
    Paid,
    Viral,
    Community,
    Partnership,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub key: String,
    pub name: String,
    pub kind: ChannelKind,
    pub expected_users: u64,
    pub cac: f64,
    pub budget: f64,
    pub timeline: String,
    pub success_criteria: String,
}

/// Default channel mix
pub fn default_channels() -> Vec<Channel> {
    vec![
        Channel {
            key: "product_hunt".to_string(),
            name: "Product Hunt".to_string(),
            kind: ChannelKind::LaunchPlatform,
            expected_users: 800,
            cac: 20.0,
            budget: 5_000.0,
            timeline: "Week 6".to_string(),
            success_criteria: "#1 Product of the Day, 800+ upvotes".to_string(),
        },
        Channel {
            key: "seo_content".to_string(),
            name: "SEO & Content Marketing".to_string(),
            kind: ChannelKind::Organic,
            expected_users: 1_200,
            cac: 15.0,
            budget: 10_000.0,
            timeline: "Weeks 5-12".to_string(),
            success_criteria: "500+ organic visitors/week by Month 3".to_string(),
        },
        Channel {
            key: "google_ads".to_string(),
            name: "Google Ads (Search)".to_string(),
            kind: ChannelKind::Paid,
            expected_users: 1_500,
            cac: 50.0,
            budget: 25_000.0,
            timeline: "Weeks 9-12".to_string(),
            success_criteria: "CAC < $50, conversion rate > 8%".to_string(),
        },
        Channel {
            key: "referrals".to_string(),
            name: "Referral Program".to_string(),
            kind: ChannelKind::Viral,
            expected_users: 600,
            cac: 10.0,
            budget: 3_000.0,
            timeline: "Weeks 3-12".to_string(),
            success_criteria: "Viral coefficient > 0.3".to_string(),
        },
        Channel {
            key: "social_media".to_string(),
            name: "Social Media (Twitter, Reddit)".to_string(),
            kind: ChannelKind::Community,
            expected_users: 500,
            cac: 25.0,
            budget: 8_000.0,
            timeline: "Weeks 1-12".to_string(),
            success_criteria: "2000+ engaged followers by Month 3".to_string(),
        },
        Channel {
            key: "partnerships".to_string(),
            name: "Academic Partnerships".to_string(),
            kind: ChannelKind::Partnership,
            expected_users: 400,
            cac: 30.0,
            budget: 4_000.0,
            timeline: "Weeks 7-12".to_string(),
            success_criteria: "3+ partnerships, 400+ users".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_channels() {
        let channels = default_channels();

        assert_eq!(channels.len(), 6);
        let ads = channels.iter().find(|c| c.key == "google_ads").unwrap();
        assert_eq!(ads.kind, ChannelKind::Paid);
        assert_eq!(ads.expected_users, 1_500);
        assert_eq!(ads.cac, 50.0);
        assert_eq!(ads.budget, 25_000.0);
        assert_eq!(ads.timeline, "Weeks 9-12");
        assert_eq!(ads.success_criteria, "CAC < $50, conversion rate > 8%");

        let referrals = channels.iter().find(|c| c.key == "referrals").unwrap();
        assert_eq!(referrals.cac, 10.0);
        assert_eq!(referrals.budget, 3_000.0);
    }
}
