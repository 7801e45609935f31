//! Compiled-in floor values served when every live source fails

use crate::model::AreaScore;
use crate::model::SnapshotPayload;
use crate::model::systems::{
    ElementCategory, LeveragePoint, Relationship, SystemElement, SystemsMap,
};

fn area(id: &str, name: &str, score: f64, insights: &str) -> AreaScore {
    AreaScore {
        id: id.to_string(),
        name: name.to_string(),
        score,
        insights: insights.to_string(),
    }
}

/// Illustrative Delhi snapshot; `capturedAt` is stamped at acquisition time
pub fn safety_snapshot() -> SnapshotPayload {
    SnapshotPayload {
        overall_score: 0.62,
        areas: vec![
            area(
                "delhi_central",
                "Central Delhi",
                0.78,
                "Dense metro coverage and staffed stations; bus stops after 9 PM remain poorly lit.",
            ),
            area(
                "delhi_south",
                "South Delhi",
                0.85,
                "Highest CCTV coverage in the city and the fastest average police response.",
            ),
            area(
                "delhi_north",
                "North Delhi",
                0.45,
                "Crowded interchanges and few functional panic buttons on buses.",
            ),
            area(
                "delhi_east",
                "East Delhi",
                0.67,
                "Improved lighting along arterial roads; reporting rates are still low.",
            ),
        ],
        narrative: "Metro corridors are markedly safer than buses and auto-rickshaw stands. \
                    Evening and night travel account for most reported incidents, and under a \
                    quarter of incidents are ever reported."
            .to_string(),
        captured_at: None,
    }
}

fn element(
    id: &str,
    name: &str,
    description: &str,
    connections: &[&str],
    category: ElementCategory,
) -> SystemElement {
    SystemElement {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        connections: connections.iter().map(|c| c.to_string()).collect(),
        category,
    }
}

fn relationship(from: &str, to: &str, description: &str, strength: f64) -> Relationship {
    Relationship {
        from: from.to_string(),
        to: to.to_string(),
        description: description.to_string(),
        strength,
    }
}

fn leverage(id: &str, name: &str, description: &str, impact: f64) -> LeveragePoint {
    LeveragePoint {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        impact,
    }
}

/// Causal factors behind transit safety
pub fn systems_map() -> SystemsMap {
    use ElementCategory::*;

    SystemsMap {
        elements: vec![
            element(
                "infrastructure",
                "Transit Infrastructure",
                "Stations, stops, vehicles and the walking routes between them",
                &["surveillance", "lighting", "crowding"],
                Physical,
            ),
            element(
                "surveillance",
                "Surveillance & Security",
                "CCTV, security staff and panic buttons",
                &["enforcement"],
                Institutional,
            ),
            element(
                "enforcement",
                "Law Enforcement",
                "Police presence and response protocols",
                &["reporting"],
                Institutional,
            ),
            element(
                "crowding",
                "Crowding & Peak Hours",
                "Passenger density during rush hours",
                &["awareness"],
                Social,
            ),
            element(
                "awareness",
                "Community Awareness",
                "Knowledge of rights and reporting channels",
                &["reporting"],
                Social,
            ),
            element(
                "lighting",
                "Lighting & Visibility",
                "Illumination in and around transit areas",
                &["surveillance"],
                Physical,
            ),
            element(
                "reporting",
                "Reporting Mechanisms",
                "Apps, hotlines and staff who take incident reports",
                &["enforcement"],
                Institutional,
            ),
            element(
                "funding",
                "Safety Funding",
                "Budget allocated to safety infrastructure and programs",
                &["infrastructure", "awareness"],
                Economic,
            ),
        ],
        relationships: vec![
            relationship(
                "infrastructure",
                "surveillance",
                "Station design determines where cameras can see",
                0.8,
            ),
            relationship(
                "surveillance",
                "enforcement",
                "Footage and alarms trigger police response",
                0.7,
            ),
            relationship(
                "crowding",
                "awareness",
                "Crowded services make bystander vigilance harder",
                0.6,
            ),
            relationship(
                "lighting",
                "surveillance",
                "Well-lit areas make cameras effective",
                0.75,
            ),
            relationship(
                "reporting",
                "enforcement",
                "Fast reporting shortens response times",
                0.85,
            ),
            relationship(
                "funding",
                "infrastructure",
                "Budget sets the pace of infrastructure upgrades",
                0.9,
            ),
        ],
        leverage_points: vec![
            leverage(
                "lp_lighting",
                "Well-lit Transit Stops",
                "Targeted lighting at high-risk stops",
                0.8,
            ),
            leverage(
                "lp_reporting_app",
                "Real-time Reporting App",
                "One-touch reporting with live tracking",
                0.9,
            ),
            leverage(
                "lp_women_carriages",
                "Women-only Carriages",
                "Dedicated space during peak hours",
                0.7,
            ),
            leverage(
                "lp_community_watch",
                "Community Watch Program",
                "Trained volunteers who observe and report",
                0.65,
            ),
        ],
    }
}
