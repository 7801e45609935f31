use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Place an acquisition is made for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in kilometers
    pub radius_km: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, radius_km: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            radius_km,
        }
    }

    /// Central Delhi with a 10 km radius
    pub fn delhi() -> Self {
        Self::new("Delhi", 28.6139, 77.2090, 10.0)
    }

    /// Check coordinate ranges and radius
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("location name must not be empty".to_string());
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!("latitude {} outside [-90, 90]", self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!("longitude {} outside [-180, 180]", self.longitude));
        }
        if !(self.radius_km > 0.0 && self.radius_km.is_finite()) {
            return Err(format!("radius {} must be a positive number", self.radius_km));
        }
        Ok(())
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::delhi()
    }
}
