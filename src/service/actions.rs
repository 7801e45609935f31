//! Compiled-in civic action catalogue

use std::collections::BTreeMap;

use crate::model::action::{ActionCatalog, ActionPoint, LeverageLevel, Rating, StatValue};

fn action(
    id: &str,
    title: &str,
    description: &str,
    icon: &str,
    (impact, effort): (Rating, Rating),
    action: &str,
    stats: [(&str, StatValue); 3],
) -> ActionPoint {
    ActionPoint {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        impact,
        effort,
        action: action.to_string(),
        action_url: format!("/{id}"),
        stats: stats
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    }
}

fn level(
    description: &str,
    examples: [&str; 3],
    effectiveness_score: f64,
    implementation_difficulty: f64,
    current_initiatives: u32,
) -> LeverageLevel {
    LeverageLevel {
        description: description.to_string(),
        examples: examples.iter().map(|e| e.to_string()).collect(),
        effectiveness_score,
        implementation_difficulty,
        current_initiatives,
    }
}

/// Eight action cards and the ten-rung leverage ladder
pub fn compiled_in() -> ActionCatalog {
    let action_points = vec![
        action(
            "report",
            "Report Incidents",
            "Contribute to the data by reporting incidents you witness or experience.",
            "alert-triangle",
            (Rating::Medium, Rating::Low),
            "Use the SafeTransit app to report incidents in real-time",
            [
                ("reportsLastMonth", 1247u64.into()),
                ("avgResponseTime", "18 minutes".into()),
                ("resolutionRate", "72%".into()),
            ],
        ),
        action(
            "community",
            "Join Community Initiatives",
            "Participate in local safety groups and community watch programs.",
            "users",
            (Rating::High, Rating::Medium),
            "Find local safety groups in your area",
            [
                ("activeGroups", 87u64.into()),
                ("totalMembers", 12500u64.into()),
                ("areasWithGroups", "68% of transit hubs".into()),
            ],
        ),
        action(
            "awareness",
            "Raise Awareness",
            "Share information about safety issues and solutions with your network.",
            "share",
            (Rating::Medium, Rating::Low),
            "Share this website and its data on social media",
            [
                ("socialShares", 8720u64.into()),
                ("peopleReached", "~2.1 million".into()),
                ("awarenessIncrease", "23% in target areas".into()),
            ],
        ),
        action(
            "feedback",
            "Provide Feedback",
            "Give feedback to transit authorities about safety concerns and suggestions.",
            "message-square",
            (Rating::High, Rating::Medium),
            "Submit feedback to transit authorities",
            [
                ("feedbackSubmitted", 3450u64.into()),
                ("implementationRate", "41%".into()),
                ("avgImplementationTime", "4.2 months".into()),
            ],
        ),
        action(
            "policy",
            "Advocate for Policy Change",
            "Support policies that improve safety in public transportation.",
            "file-text",
            (Rating::VeryHigh, Rating::High),
            "Sign petitions and contact your representatives",
            [
                ("activePetitions", 12u64.into()),
                ("totalSignatures", 145000u64.into()),
                ("policiesChanged", 7u64.into()),
            ],
        ),
        action(
            "donate",
            "Support NGOs",
            "Donate to organizations working on women's safety in public transport.",
            "heart",
            (Rating::High, Rating::Low),
            "Donate to partner NGOs",
            [
                ("partneredNGOs", 23u64.into()),
                ("totalDonations", "₹1.8 crore".into()),
                ("womenSupported", 28500u64.into()),
            ],
        ),
        action(
            "alerts",
            "Enable Safety Alerts",
            "Stay informed about safety conditions in your area.",
            "bell",
            (Rating::Low, Rating::VeryLow),
            "Subscribe to safety alerts",
            [
                ("subscribedUsers", 42700u64.into()),
                ("alertsLastMonth", 187u64.into()),
                ("userSafetyRating", "4.2/5".into()),
            ],
        ),
        action(
            "training",
            "Take Safety Training",
            "Learn safety skills and strategies for public transportation.",
            "shield",
            (Rating::Medium, Rating::Medium),
            "Register for a free online safety course",
            [
                ("availableCourses", 8u64.into()),
                ("completedTrainings", 15200u64.into()),
                ("safetyConfidenceIncrease", "68%".into()),
            ],
        ),
    ];

    let leverage_points_analysis = BTreeMap::from([
        (
            "parameters".to_string(),
            level(
                "Changing parameters like budget allocations or staffing levels",
                [
                    "Increasing police presence at stations",
                    "Extending CCTV coverage to more areas",
                    "Adding more emergency phones",
                ],
                0.35,
                0.4,
                12,
            ),
        ),
        (
            "buffers".to_string(),
            level(
                "Adjusting the size of stabilizing stocks and buffers",
                [
                    "Increasing reserve emergency response teams",
                    "Expanding backup power for safety systems",
                    "Creating redundant reporting channels",
                ],
                0.42,
                0.45,
                8,
            ),
        ),
        (
            "structure".to_string(),
            level(
                "Changing the physical structure of the system",
                [
                    "Redesigning transit stations for better visibility",
                    "Creating women-only sections in trains and buses",
                    "Implementing better lighting in transit corridors",
                ],
                0.58,
                0.65,
                15,
            ),
        ),
        (
            "delays".to_string(),
            level(
                "Adjusting the length of delays in feedback loops",
                [
                    "Reducing emergency response times",
                    "Accelerating incident reporting processing",
                    "Shortening time between reporting and action",
                ],
                0.67,
                0.55,
                11,
            ),
        ),
        (
            "feedbackLoops".to_string(),
            level(
                "Strengthening or creating feedback mechanisms",
                [
                    "Creating community feedback channels for safety measures",
                    "Implementing real-time safety rating systems",
                    "Establishing regular safety audits with public input",
                ],
                0.78,
                0.6,
                9,
            ),
        ),
        (
            "information".to_string(),
            level(
                "Improving information flows and transparency",
                [
                    "Publishing real-time safety data dashboards",
                    "Creating incident mapping applications",
                    "Implementing transparent reporting on resolution status",
                ],
                0.82,
                0.5,
                14,
            ),
        ),
        (
            "rules".to_string(),
            level(
                "Changing the rules and policies of the system",
                [
                    "Mandating safety features in all public transport",
                    "Creating stricter penalties for harassment",
                    "Requiring safety training for all transit staff",
                ],
                0.75,
                0.7,
                7,
            ),
        ),
        (
            "selfOrganization".to_string(),
            level(
                "Enabling system self-organization and adaptation",
                [
                    "Supporting community-led safety initiatives",
                    "Creating frameworks for local safety solutions",
                    "Enabling decentralized safety reporting networks",
                ],
                0.88,
                0.65,
                6,
            ),
        ),
        (
            "goals".to_string(),
            level(
                "Changing the goals of the system",
                [
                    "Shifting from incident response to prevention",
                    "Prioritizing women's perception of safety in metrics",
                    "Making safety a primary KPI for transit authorities",
                ],
                0.92,
                0.75,
                5,
            ),
        ),
        (
            "paradigms".to_string(),
            level(
                "Changing the mindset or paradigm from which the system arises",
                [
                    "Shifting from viewing safety as women's responsibility to societal responsibility",
                    "Moving from reactive to proactive safety approaches",
                    "Changing cultural attitudes about women in public spaces",
                ],
                0.95,
                0.9,
                3,
            ),
        ),
    ]);

    ActionCatalog {
        action_points,
        leverage_points_analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_in_catalog_is_valid() {
        let catalog = compiled_in();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.action_points.len(), 8);
        assert_eq!(catalog.leverage_points_analysis.len(), 10);
    }

    #[test]
    fn test_action_urls_follow_ids() {
        for point in compiled_in().action_points {
            assert_eq!(point.action_url, format!("/{}", point.id));
            assert_eq!(point.stats.len(), 3);
        }
    }
}
