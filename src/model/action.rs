//! Civic action points and the leverage-level analysis shown beside them

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coarse impact or effort rating of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Rating {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

/// A single headline figure on an action card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum StatValue {
    Count(u64),
    Text(String),
}

impl From<u64> for StatValue {
    fn from(value: u64) -> Self {
        StatValue::Count(value)
    }
}

impl From<&str> for StatValue {
    fn from(value: &str) -> Self {
        StatValue::Text(value.to_string())
    }
}

/// Something a commuter can do about transit safety
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionPoint {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub impact: Rating,
    pub effort: Rating,
    pub action: String,
    pub action_url: String,
    /// Keyed by camelCase stat name
    pub stats: BTreeMap<String, StatValue>,
}

/// One rung of the leverage ladder, from parameters up to paradigms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeverageLevel {
    pub description: String,
    pub examples: Vec<String>,
    pub effectiveness_score: f64,
    pub implementation_difficulty: f64,
    pub current_initiatives: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionCatalog {
    pub action_points: Vec<ActionPoint>,
    /// Keyed by camelCase level name
    pub leverage_points_analysis: BTreeMap<String, LeverageLevel>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionCatalogError {
    #[error("action id '{0}' appears more than once")]
    DuplicateId(String),

    #[error("{field} is {value}, expected a value in [0, 1]")]
    OutOfRange { field: String, value: f64 },
}

impl ActionCatalog {
    /// Check action id uniqueness and leverage score ranges
    pub fn validate(&self) -> Result<(), ActionCatalogError> {
        let mut seen = HashSet::new();
        for point in &self.action_points {
            if !seen.insert(point.id.as_str()) {
                return Err(ActionCatalogError::DuplicateId(point.id.clone()));
            }
        }

        for (key, level) in &self.leverage_points_analysis {
            check_unit(&format!("{key}.effectivenessScore"), level.effectiveness_score)?;
            check_unit(
                &format!("{key}.implementationDifficulty"),
                level.implementation_difficulty,
            )?;
        }

        Ok(())
    }
}

fn check_unit(field: &str, value: f64) -> Result<(), ActionCatalogError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ActionCatalogError::OutOfRange {
            field: field.to_string(),
            value,
        })
    }
}
