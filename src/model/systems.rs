//! Systems map: the causal factors behind transit safety and where to intervene

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ElementCategory {
    Social,
    Physical,
    Institutional,
    Economic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SystemElement {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Ids of elements this one influences
    #[serde(default)]
    pub connections: Vec<String>,
    pub category: ElementCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub description: String,
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeveragePoint {
    pub id: String,
    pub name: String,
    pub description: String,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemsMap {
    pub elements: Vec<SystemElement>,
    pub relationships: Vec<Relationship>,
    pub leverage_points: Vec<LeveragePoint>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SystemsMapError {
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{field} is {value}, expected a value in [0, 1]")]
    OutOfRange { field: String, value: f64 },

    #[error("{field} refers to unknown element '{id}'")]
    UnknownElement { field: String, id: String },
}

impl SystemsMap {
    /// Check id uniqueness, weight ranges and element references
    pub fn validate(&self) -> Result<(), SystemsMapError> {
        let mut element_ids = HashSet::new();
        for element in &self.elements {
            if !element_ids.insert(element.id.as_str()) {
                return Err(SystemsMapError::DuplicateId {
                    kind: "element",
                    id: element.id.clone(),
                });
            }
        }

        for element in &self.elements {
            for target in &element.connections {
                if !element_ids.contains(target.as_str()) {
                    return Err(SystemsMapError::UnknownElement {
                        field: format!("elements[{}].connections", element.id),
                        id: target.clone(),
                    });
                }
            }
        }

        for (i, rel) in self.relationships.iter().enumerate() {
            check_unit(format!("relationships[{i}].strength"), rel.strength)?;
            for endpoint in [&rel.from, &rel.to] {
                if !element_ids.contains(endpoint.as_str()) {
                    return Err(SystemsMapError::UnknownElement {
                        field: format!("relationships[{i}]"),
                        id: endpoint.clone(),
                    });
                }
            }
        }

        let mut point_ids = HashSet::new();
        for point in &self.leverage_points {
            check_unit(format!("leveragePoints[{}].impact", point.id), point.impact)?;
            if !point_ids.insert(point.id.as_str()) {
                return Err(SystemsMapError::DuplicateId {
                    kind: "leverage point",
                    id: point.id.clone(),
                });
            }
        }

        Ok(())
    }
}

fn check_unit(field: String, value: f64) -> Result<(), SystemsMapError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SystemsMapError::OutOfRange { field, value })
    }
}
