//! The three data sources an acquisition can draw from

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::{Acquirable, AcquisitionError, AcquisitionRequest};
use crate::service::extraction::extract_typed;
use crate::service::llm::TextGenerator;
use crate::service::remote::{RemoteDataClient, RemoteError};

/// One candidate source in an acquisition
#[async_trait]
pub trait Tier<T: Acquirable>: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Upper bound on a single attempt, enforced by the policy
    fn timeout(&self, request: &AcquisitionRequest) -> Option<Duration>;

    /// Produce an unvalidated payload
    async fn fetch(&self, request: &AcquisitionRequest) -> Result<T::Payload, AcquisitionError>;
}

/// Live data endpoint
pub struct RemoteTier<T> {
    endpoint: Option<(RemoteDataClient, Url)>,
    _target: PhantomData<fn() -> T>,
}

impl<T> RemoteTier<T> {
    /// A tier that can reach `url`
    pub fn new(client: RemoteDataClient, url: Url) -> Self {
        Self {
            endpoint: Some((client, url)),
            _target: PhantomData,
        }
    }

    /// A tier with no endpoint or credential; every attempt fails without I/O
    pub fn unconfigured() -> Self {
        Self {
            endpoint: None,
            _target: PhantomData,
        }
    }

    /// Build from optional configuration values
    pub fn from_parts(api_key: Option<&str>, url: Option<&Url>) -> Result<Self, RemoteError> {
        match (api_key, url) {
            (Some(key), Some(url)) => Ok(Self::new(RemoteDataClient::new(key)?, url.clone())),
            _ => Ok(Self::unconfigured()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}

#[async_trait]
impl<T: Acquirable> Tier<T> for RemoteTier<T> {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn timeout(&self, request: &AcquisitionRequest) -> Option<Duration> {
        Some(request.max_wait)
    }

    async fn fetch(&self, request: &AcquisitionRequest) -> Result<T::Payload, AcquisitionError> {
        let (client, url) = self.endpoint.as_ref().ok_or_else(|| {
            AcquisitionError::SourceUnavailable("no live data credential configured".to_string())
        })?;

        let query = T::remote_query(&request.location);
        Ok(client
            .fetch_json::<T::Payload>(url, &query, request.max_wait)
            .await?)
    }
}

/// Text generation service prompted to emit JSON
pub struct GenerativeTier<T> {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
    _target: PhantomData<fn() -> T>,
}

impl<T> GenerativeTier<T> {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self {
            generator: Some(generator),
            timeout,
            _target: PhantomData,
        }
    }

    /// No credential configured; the tier is skipped
    pub fn unconfigured() -> Self {
        Self {
            generator: None,
            timeout: Duration::ZERO,
            _target: PhantomData,
        }
    }

    pub fn from_generator(generator: Option<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        match generator {
            Some(generator) => Self::new(generator, timeout),
            None => Self::unconfigured(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }
}

#[async_trait]
impl<T: Acquirable> Tier<T> for GenerativeTier<T> {
    fn name(&self) -> &'static str {
        "generative"
    }

    fn timeout(&self, _request: &AcquisitionRequest) -> Option<Duration> {
        self.generator.as_ref().map(|_| self.timeout)
    }

    async fn fetch(&self, request: &AcquisitionRequest) -> Result<T::Payload, AcquisitionError> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            AcquisitionError::SourceUnavailable("no generation credential configured".to_string())
        })?;

        let prompt = T::generation_prompt(&request.location);
        let text = generator.generate(&prompt).await?;

        tracing::debug!(
            kind = T::KIND,
            response_length = text.len(),
            "Extracting JSON object from generated text"
        );

        Ok(extract_typed::<T::Payload>(&text)?)
    }
}

/// Compiled-in floor value
pub struct StaticTier<T: Acquirable> {
    payload: T::Payload,
}

impl<T: Acquirable> StaticTier<T> {
    /// The floor value shipped with the binary
    pub fn compiled_in() -> Self {
        Self {
            payload: T::static_payload(),
        }
    }

    /// A floor serving `payload` instead
    pub fn with_payload(payload: T::Payload) -> Self {
        Self { payload }
    }
}

#[async_trait]
impl<T: Acquirable> Tier<T> for StaticTier<T> {
    fn name(&self) -> &'static str {
        "static"
    }

    fn timeout(&self, _request: &AcquisitionRequest) -> Option<Duration> {
        None
    }

    async fn fetch(&self, _request: &AcquisitionRequest) -> Result<T::Payload, AcquisitionError> {
        Ok(self.payload.clone())
    }
}
