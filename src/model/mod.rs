pub mod action;
pub mod config;
pub mod location;
pub mod snapshot;
pub mod systems;

pub use action::ActionCatalog;
pub use config::{AcquisitionSettings, Config};
pub use location::Location;
pub use snapshot::{AreaScore, SafetyLevel, SafetySnapshot, SnapshotError, SnapshotPayload};
pub use systems::{SystemsMap, SystemsMapError};
