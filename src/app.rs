//! Application state and service initialization
//!
//! Builds one acquisition policy per kind of data from the configuration.
//! Missing credentials disable a tier; they never stop the server.

use std::sync::Arc;

use crate::model::{
    AcquisitionSettings, ActionCatalog, Config, Location, SafetySnapshot, SystemsMap,
};
use crate::service::acquisition::{GenerativeTier, RemoteTier};
use crate::service::{
    AcquisitionPolicy, AcquisitionRequest, GeminiGenerator, TextGenerator, actions,
};

/// Which tiers are backed by a real source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStatus {
    pub remote_safety: bool,
    pub remote_systems: bool,
    pub generative: bool,
}

/// Application state shared by all handlers
pub struct AppState {
    pub safety_policy: AcquisitionPolicy<SafetySnapshot>,
    pub systems_policy: AcquisitionPolicy<SystemsMap>,
    pub settings: AcquisitionSettings,
    pub default_location: Location,
    pub sources: SourceStatus,
    pub actions: ActionCatalog,
}

impl AppState {
    /// Initialize all services from configuration
    pub fn new(config: Config) -> Result<Self, AppError> {
        let generator: Option<Arc<dyn TextGenerator>> = match config.gemini_api_key.as_deref() {
            Some(key) => {
                let generator = GeminiGenerator::new(key, config.gemini_model.clone())
                    .map_err(|e| AppError::InvalidConfig(e.to_string()))?;
                tracing::info!(model = %generator.model(), "Generative fallback enabled");
                Some(Arc::new(generator))
            }
            None => {
                tracing::info!("GEMINI_API_KEY not set, generative fallback disabled");
                None
            }
        };

        let api_key = config.data_api_key.as_deref();
        let safety_remote = RemoteTier::from_parts(api_key, config.safety_data_url.as_ref())
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;
        let systems_remote = RemoteTier::from_parts(api_key, config.systems_data_url.as_ref())
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;

        let sources = SourceStatus {
            remote_safety: safety_remote.is_configured(),
            remote_systems: systems_remote.is_configured(),
            generative: generator.is_some(),
        };
        tracing::info!(
            remote_safety = sources.remote_safety,
            remote_systems = sources.remote_systems,
            generative = sources.generative,
            "Acquisition sources configured"
        );

        let generation_timeout = config.acquisition.generation_timeout();

        let state = Self::from_policies(
            AcquisitionPolicy::standard(
                safety_remote,
                GenerativeTier::from_generator(generator.clone(), generation_timeout),
            ),
            AcquisitionPolicy::standard(
                systems_remote,
                GenerativeTier::from_generator(generator, generation_timeout),
            ),
            config.acquisition,
            config.default_location,
            sources,
        );
        state
            .actions
            .validate()
            .map_err(|e| AppError::InvalidCatalog(e.to_string()))?;

        Ok(state)
    }

    /// Assemble state from prebuilt policies
    pub fn from_policies(
        safety_policy: AcquisitionPolicy<SafetySnapshot>,
        systems_policy: AcquisitionPolicy<SystemsMap>,
        settings: AcquisitionSettings,
        default_location: Location,
        sources: SourceStatus,
    ) -> Self {
        Self {
            safety_policy,
            systems_policy,
            settings,
            default_location,
            sources,
            actions: actions::compiled_in(),
        }
    }

    /// Request for `location` with the configured live endpoint wait
    pub fn request_for(&self, location: Location) -> AcquisitionRequest {
        AcquisitionRequest::new(location, self.settings.remote_timeout())
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Compiled-in action catalogue failed validation
    #[error("Invalid action catalogue: {0}")]
    InvalidCatalog(String),
}
