//! Safety snapshot model
//!
//! A snapshot is built once from a decoded payload and never changes
//! afterwards. Decoding accepts the current camelCase shape as well as the
//! older `safetyIndex` shape still emitted by some upstream sources.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Safety score for one area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaScore {
    pub id: String,
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub insights: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("{field} is {value}, expected a value in [0, 1]")]
    ScoreOutOfRange { field: String, value: f64 },

    #[error("area id '{0}' appears more than once")]
    DuplicateAreaId(String),
}

/// Decoded but not yet validated snapshot data
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireSnapshot")]
pub struct SnapshotPayload {
    pub overall_score: f64,
    pub areas: Vec<AreaScore>,
    pub narrative: String,
    pub captured_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireSnapshot {
    Current(CurrentWire),
    Legacy(LegacyWire),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentWire {
    overall_score: f64,
    areas: Vec<AreaScore>,
    #[serde(default)]
    narrative: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    captured_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyWire {
    safety_index: LegacyIndex,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyIndex {
    overall: f64,
    #[serde(default)]
    by_area: Vec<LegacyArea>,
}

#[derive(Deserialize)]
struct LegacyArea {
    id: String,
    name: String,
    score: f64,
}

/// Timestamps are advisory: anything unreadable decodes as absent and the
/// acquisition stamps the call time instead.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(parse_timestamp))
}

/// Parse RFC 3339, a naive date-time (taken as UTC) or a bare date
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    tracing::debug!(value = raw, "Ignoring unreadable timestamp");
    None
}

impl From<WireSnapshot> for SnapshotPayload {
    fn from(wire: WireSnapshot) -> Self {
        match wire {
            WireSnapshot::Current(c) => Self {
                overall_score: c.overall_score,
                areas: c.areas,
                narrative: c.narrative,
                captured_at: c.captured_at.or(c.timestamp),
            },
            WireSnapshot::Legacy(l) => Self {
                overall_score: l.safety_index.overall,
                areas: l
                    .safety_index
                    .by_area
                    .into_iter()
                    .map(|a| AreaScore {
                        id: a.id,
                        name: a.name,
                        score: a.score,
                        insights: String::new(),
                    })
                    .collect(),
                narrative: String::new(),
                captured_at: l.timestamp,
            },
        }
    }
}

/// Point-in-time safety assessment for a location
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafetySnapshot {
    overall_score: f64,
    areas: Vec<AreaScore>,
    narrative: String,
    captured_at: DateTime<Utc>,
}

impl SafetySnapshot {
    /// Validate a payload and freeze it into a snapshot
    ///
    /// `now` becomes `capturedAt` when the payload carries no timestamp.
    pub fn from_payload(
        payload: SnapshotPayload,
        now: DateTime<Utc>,
    ) -> Result<Self, SnapshotError> {
        check_score("overallScore", payload.overall_score)?;

        let mut seen = HashSet::new();
        for area in &payload.areas {
            check_score(&format!("areas[{}].score", area.id), area.score)?;
            if !seen.insert(area.id.as_str()) {
                return Err(SnapshotError::DuplicateAreaId(area.id.clone()));
            }
        }

        Ok(Self {
            overall_score: payload.overall_score,
            areas: payload.areas,
            narrative: payload.narrative,
            captured_at: payload.captured_at.unwrap_or(now),
        })
    }

    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    pub fn areas(&self) -> &[AreaScore] {
        &self.areas
    }

    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

fn check_score(field: &str, value: f64) -> Result<(), SnapshotError> {
    // NaN fails the range check as well
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SnapshotError::ScoreOutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

/// Human readable bucket for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    VerySafe,
    Safe,
    Moderate,
    Unsafe,
    VeryUnsafe,
}

impl SafetyLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            SafetyLevel::VerySafe
        } else if score >= 0.6 {
            SafetyLevel::Safe
        } else if score >= 0.4 {
            SafetyLevel::Moderate
        } else if score >= 0.2 {
            SafetyLevel::Unsafe
        } else {
            SafetyLevel::VeryUnsafe
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SafetyLevel::VerySafe => "Very Safe",
            SafetyLevel::Safe => "Safe",
            SafetyLevel::Moderate => "Moderate",
            SafetyLevel::Unsafe => "Unsafe",
            SafetyLevel::VeryUnsafe => "Very Unsafe",
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score as a whole percentage, as shown on the dashboard
pub fn score_percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}
