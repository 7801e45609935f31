//! Tiered data acquisition
//!
//! An acquisition walks an ordered list of tiers (live endpoint, generated
//! text, compiled-in floor) and returns the first value that decodes and
//! validates. Tier failures are logged and swallowed; the caller only sees
//! [`AcquisitionError::AllTiersExhausted`], which the compiled-in floor
//! makes unreachable in production.
//!
//! Tiers run strictly one after another. Dropping the future returned by
//! [`AcquisitionPolicy::acquire`] aborts the in-flight call and no later
//! tier runs.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::model::{Location, SafetySnapshot, SnapshotPayload, SystemsMap};

pub mod error;
pub mod fallback;
pub mod prompts;
pub mod tiers;

pub use error::AcquisitionError;
pub use tiers::{GenerativeTier, RemoteTier, StaticTier, Tier};

/// A value that can be produced by the tiered policy
pub trait Acquirable: Sized + Send + Sync + 'static {
    /// Decoded, not yet validated form
    type Payload: DeserializeOwned + Clone + Send + Sync + 'static;

    /// Name used in logs
    const KIND: &'static str;

    /// Query parameters for the live endpoint
    fn remote_query(_location: &Location) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn generation_prompt(location: &Location) -> String;

    fn static_payload() -> Self::Payload;

    /// Validate `payload` and build the final value
    fn finalize(payload: Self::Payload, now: DateTime<Utc>) -> Result<Self, AcquisitionError>;
}

impl Acquirable for SafetySnapshot {
    type Payload = SnapshotPayload;

    const KIND: &'static str = "safety_snapshot";

    fn remote_query(location: &Location) -> Vec<(&'static str, String)> {
        vec![
            ("lat", location.latitude.to_string()),
            ("lon", location.longitude.to_string()),
            ("radius", location.radius_km.to_string()),
        ]
    }

    fn generation_prompt(location: &Location) -> String {
        prompts::build_snapshot_prompt(location)
    }

    fn static_payload() -> Self::Payload {
        fallback::safety_snapshot()
    }

    fn finalize(payload: Self::Payload, now: DateTime<Utc>) -> Result<Self, AcquisitionError> {
        Ok(SafetySnapshot::from_payload(payload, now)?)
    }
}

impl Acquirable for SystemsMap {
    type Payload = SystemsMap;

    const KIND: &'static str = "systems_map";

    fn generation_prompt(location: &Location) -> String {
        prompts::build_systems_prompt(location)
    }

    fn static_payload() -> Self::Payload {
        fallback::systems_map()
    }

    fn finalize(payload: Self::Payload, _now: DateTime<Utc>) -> Result<Self, AcquisitionError> {
        payload.validate()?;
        Ok(payload)
    }
}

/// Inputs to one acquisition
#[derive(Debug, Clone, PartialEq)]
pub struct AcquisitionRequest {
    pub location: Location,
    /// Bounded wait for the live endpoint
    pub max_wait: Duration,
}

impl AcquisitionRequest {
    pub fn new(location: Location, max_wait: Duration) -> Self {
        Self { location, max_wait }
    }
}

/// Result of attempting a single tier
#[derive(Debug)]
pub enum TierOutcome<T> {
    Success(T),
    Failure(AcquisitionError),
}

impl<T> TierOutcome<T> {
    fn from_result(result: Result<T, AcquisitionError>) -> Self {
        match result {
            Ok(value) => TierOutcome::Success(value),
            Err(e) => TierOutcome::Failure(e),
        }
    }
}

/// Ordered fallback chain for one kind of data
pub struct AcquisitionPolicy<T: Acquirable> {
    tiers: Vec<Box<dyn Tier<T>>>,
}

impl<T: Acquirable> AcquisitionPolicy<T> {
    /// Chain of arbitrary tiers, tried in the given order
    pub fn new(tiers: Vec<Box<dyn Tier<T>>>) -> Self {
        Self { tiers }
    }

    /// Live endpoint, then generated text, then the compiled-in floor
    pub fn standard(remote: RemoteTier<T>, generative: GenerativeTier<T>) -> Self {
        Self::new(vec![
            Box::new(remote),
            Box::new(generative),
            Box::new(StaticTier::<T>::compiled_in()),
        ])
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Produce a value from the first tier that succeeds
    pub async fn acquire(&self, request: &AcquisitionRequest) -> Result<T, AcquisitionError> {
        let start_time = Instant::now();

        for tier in &self.tiers {
            match attempt(tier.as_ref(), request).await {
                TierOutcome::Success(value) => {
                    tracing::info!(
                        kind = T::KIND,
                        tier = tier.name(),
                        location = %request.location.name,
                        elapsed_ms = start_time.elapsed().as_millis(),
                        "Acquisition succeeded"
                    );
                    return Ok(value);
                }
                TierOutcome::Failure(e) => {
                    tracing::warn!(
                        kind = T::KIND,
                        tier = tier.name(),
                        location = %request.location.name,
                        error = %e,
                        "Acquisition tier failed, falling back"
                    );
                }
            }
        }

        tracing::error!(
            kind = T::KIND,
            location = %request.location.name,
            tiers = ?self.tier_names(),
            "Every acquisition tier failed"
        );
        Err(AcquisitionError::AllTiersExhausted)
    }
}

/// Run one tier under its timeout and validate what it returns
async fn attempt<T: Acquirable>(tier: &dyn Tier<T>, request: &AcquisitionRequest) -> TierOutcome<T> {
    let fetched = match tier.timeout(request) {
        Some(limit) => match tokio::time::timeout(limit, tier.fetch(request)).await {
            Ok(result) => result,
            Err(_) => Err(AcquisitionError::SourceUnavailable(format!(
                "timed out after {}ms",
                limit.as_millis()
            ))),
        },
        None => tier.fetch(request).await,
    };

    TierOutcome::from_result(fetched.and_then(|payload| T::finalize(payload, Utc::now())))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::TimeZone;

    use super::*;
    use crate::model::AreaScore;
    use crate::service::llm::{GenerationError, TextGenerator};
    use crate::service::remote::RemoteDataClient;
    use crate::service::remote::test_support::{closed, serve, silent};

    const WAIT: Duration = Duration::from_millis(300);

    /// Generator returning fixed text and counting calls
    struct StubGenerator {
        text: Result<String, String>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl StubGenerator {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                text: Ok(text.to_string()),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                text: Err("quota exceeded".to_string()),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            })
        }

        fn slow(text: &str, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                text: Ok(text.to_string()),
                delay,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.text.clone().map_err(GenerationError::Request)
        }
    }

    /// Tier that only counts how often it runs
    struct CountingTier(Arc<AtomicUsize>);

    #[async_trait]
    impl Tier<SafetySnapshot> for CountingTier {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn timeout(&self, _request: &AcquisitionRequest) -> Option<Duration> {
            None
        }

        async fn fetch(&self, _request: &AcquisitionRequest) -> Result<SnapshotPayload, AcquisitionError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(fallback::safety_snapshot())
        }
    }

    fn request() -> AcquisitionRequest {
        AcquisitionRequest::new(Location::delhi(), WAIT)
    }

    fn generative(generator: &Arc<StubGenerator>) -> GenerativeTier<SafetySnapshot> {
        GenerativeTier::new(generator.clone(), Duration::from_secs(2))
    }

    fn remote(url: url::Url) -> RemoteTier<SafetySnapshot> {
        RemoteTier::new(RemoteDataClient::new("test-key").unwrap(), url)
    }

    fn static_snapshot() -> SafetySnapshot {
        SafetySnapshot::from_payload(fallback::safety_snapshot(), Utc::now()).unwrap()
    }

    const GENERATED: &str = "Here is the assessment you asked for:\n\
        {\"overallScore\": 0.55, \"areas\": [\
            {\"id\": \"central\", \"name\": \"Central\", \"score\": 0.7, \"insights\": \"busy\"},\
            {\"id\": \"north\", \"name\": \"North\", \"score\": 0.4, \"insights\": \"dark\"}],\
         \"narrative\": \"Generated.\"}\n\
        Let me know if you need anything else.";

    #[tokio::test]
    async fn test_remote_success_short_circuits() {
        let body = r#"{
            "overallScore": 0.71,
            "areas": [{"id": "a", "name": "A", "score": 0.9, "insights": "x"}],
            "narrative": "live",
            "capturedAt": "2024-05-05T12:00:00Z"
        }"#;
        let url = serve("200 OK", body.to_string()).await;
        let generator = StubGenerator::replying(GENERATED);
        let policy = AcquisitionPolicy::standard(remote(url), generative(&generator));

        let snapshot = policy.acquire(&request()).await.unwrap();

        assert_eq!(snapshot.overall_score(), 0.71);
        assert_eq!(snapshot.narrative(), "live");
        assert_eq!(
            snapshot.areas(),
            &[AreaScore {
                id: "a".to_string(),
                name: "A".to_string(),
                score: 0.9,
                insights: "x".to_string(),
            }]
        );
        assert_eq!(
            snapshot.captured_at(),
            Utc.with_ymd_and_hms(2024, 5, 5, 12, 0, 0).unwrap()
        );
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_legacy_shape_short_circuits() {
        let body = r#"{
            "safetyIndex": {
                "overall": 0.65,
                "byArea": [
                    {"id": "delhi_central", "name": "Central Delhi", "score": 0.72},
                    {"id": "delhi_north", "name": "North Delhi", "score": 0.48}
                ],
                "byTimeOfDay": [{"time": "night", "score": 0.41}]
            },
            "timestamp": "2024-03-01T10:00:00"
        }"#;
        let url = serve("200 OK", body.to_string()).await;
        let generator = StubGenerator::replying(GENERATED);
        let policy = AcquisitionPolicy::standard(remote(url), generative(&generator));

        let snapshot = policy.acquire(&request()).await.unwrap();

        assert_eq!(generator.calls(), 0);
        assert_eq!(snapshot.overall_score(), 0.65);
        assert_eq!(
            snapshot.areas(),
            &[
                AreaScore {
                    id: "delhi_central".to_string(),
                    name: "Central Delhi".to_string(),
                    score: 0.72,
                    insights: String::new(),
                },
                AreaScore {
                    id: "delhi_north".to_string(),
                    name: "North Delhi".to_string(),
                    score: 0.48,
                    insights: String::new(),
                },
            ]
        );
        assert!(snapshot.narrative().is_empty());
        assert_eq!(
            snapshot.captured_at(),
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_generated_naive_timestamp_is_kept() {
        let text = "{\"overallScore\": 0.5, \"areas\": [], \"narrative\": \"n\", \
                    \"capturedAt\": \"2024-03-01T10:00:00\"}";
        let generator = StubGenerator::replying(text);
        let policy =
            AcquisitionPolicy::standard(RemoteTier::unconfigured(), generative(&generator));

        let snapshot = policy.acquire(&request()).await.unwrap();
        assert_eq!(snapshot.overall_score(), 0.5);
        assert_eq!(
            snapshot.captured_at(),
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_remote_server_error_falls_to_generative() {
        let url = serve("500 Internal Server Error", "{}".to_string()).await;
        let generator = StubGenerator::replying(GENERATED);
        let policy = AcquisitionPolicy::standard(remote(url), generative(&generator));

        let snapshot = policy.acquire(&request()).await.unwrap();

        assert_eq!(generator.calls(), 1);
        assert_eq!(snapshot.overall_score(), 0.55);
        assert_eq!(snapshot.areas().len(), 2);
        assert_eq!(snapshot.narrative(), "Generated.");
    }

    #[tokio::test]
    async fn test_remote_timeout_falls_to_generative() {
        let url = silent().await;
        let generator = StubGenerator::replying(GENERATED);
        let policy = AcquisitionPolicy::standard(remote(url), generative(&generator));

        let started = Instant::now();
        let snapshot = policy.acquire(&request()).await.unwrap();

        assert!(started.elapsed() >= WAIT);
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(generator.calls(), 1);
        assert_eq!(snapshot.overall_score(), 0.55);
    }

    #[tokio::test]
    async fn test_remote_invalid_scores_rejected() {
        let body = r#"{"overallScore": 1.7, "areas": [], "narrative": ""}"#;
        let url = serve("200 OK", body.to_string()).await;
        let generator = StubGenerator::replying(GENERATED);
        let policy = AcquisitionPolicy::standard(remote(url), generative(&generator));

        let snapshot = policy.acquire(&request()).await.unwrap();
        assert_eq!(generator.calls(), 1);
        assert_eq!(snapshot.overall_score(), 0.55);
    }

    #[tokio::test]
    async fn test_generated_legacy_shape_with_trailing_commentary() {
        let text = "{\"safetyIndex\":{\"overall\":0.6,\"byArea\":[{\"id\":\"c\",\"name\":\"Central Delhi\",\"score\":0.72}]}}\n\
                    These figures are illustrative.";
        let generator = StubGenerator::replying(text);
        let policy =
            AcquisitionPolicy::standard(RemoteTier::unconfigured(), generative(&generator));

        let snapshot = policy.acquire(&request()).await.unwrap();
        assert_eq!(snapshot.overall_score(), 0.6);
        assert_eq!(snapshot.areas()[0].name, "Central Delhi");
    }

    #[tokio::test]
    async fn test_generated_out_of_range_area_falls_to_static() {
        let text = "{\"overallScore\": 0.5, \"areas\": [{\"id\": \"a\", \"name\": \"A\", \"score\": 1.4}], \"narrative\": \"\"}";
        let generator = StubGenerator::replying(text);
        let policy =
            AcquisitionPolicy::standard(RemoteTier::unconfigured(), generative(&generator));

        let snapshot = policy.acquire(&request()).await.unwrap();
        assert_eq!(generator.calls(), 1);
        assert_eq!(snapshot.areas(), static_snapshot().areas());
    }

    #[tokio::test]
    async fn test_generated_duplicate_ids_fall_to_static() {
        let text = "{\"overallScore\": 0.5, \"areas\": [\
            {\"id\": \"a\", \"name\": \"A\", \"score\": 0.3},\
            {\"id\": \"a\", \"name\": \"B\", \"score\": 0.4}]}";
        let generator = StubGenerator::replying(text);
        let policy =
            AcquisitionPolicy::standard(RemoteTier::unconfigured(), generative(&generator));

        let snapshot = policy.acquire(&request()).await.unwrap();
        assert_eq!(snapshot.overall_score(), static_snapshot().overall_score());
    }

    #[tokio::test]
    async fn test_unparseable_generation_falls_to_static() {
        let generator = StubGenerator::replying("I cannot help with that.");
        let policy =
            AcquisitionPolicy::standard(RemoteTier::unconfigured(), generative(&generator));

        let snapshot = policy.acquire(&request()).await.unwrap();
        assert_eq!(snapshot.narrative(), static_snapshot().narrative());
    }

    #[tokio::test]
    async fn test_generation_error_falls_to_static() {
        let generator = StubGenerator::failing();
        let policy =
            AcquisitionPolicy::standard(RemoteTier::unconfigured(), generative(&generator));

        let snapshot = policy.acquire(&request()).await.unwrap();
        assert_eq!(generator.calls(), 1);
        assert_eq!(snapshot.areas(), static_snapshot().areas());
    }

    #[tokio::test]
    async fn test_slow_generation_times_out() {
        let generator = StubGenerator::slow(GENERATED, Duration::from_secs(5));
        let tier: GenerativeTier<SafetySnapshot> =
            GenerativeTier::new(generator.clone(), Duration::from_millis(100));
        let policy = AcquisitionPolicy::standard(RemoteTier::unconfigured(), tier);

        let snapshot = policy.acquire(&request()).await.unwrap();
        assert_eq!(snapshot.areas(), static_snapshot().areas());
    }

    #[tokio::test]
    async fn test_no_credentials_serves_static_with_call_time() {
        let policy: AcquisitionPolicy<SafetySnapshot> =
            AcquisitionPolicy::standard(RemoteTier::unconfigured(), GenerativeTier::unconfigured());

        let before = Utc::now();
        let snapshot = policy.acquire(&request()).await.unwrap();
        let after = Utc::now();

        assert_eq!(snapshot.overall_score(), 0.62);
        assert_eq!(snapshot.areas(), static_snapshot().areas());
        assert!(snapshot.captured_at() >= before && snapshot.captured_at() <= after);
    }

    #[tokio::test]
    async fn test_delhi_unreachable_remote_without_generator() {
        let location = Location::new("Delhi", 28.6139, 77.2090, 10.0);
        let policy: AcquisitionPolicy<SafetySnapshot> = AcquisitionPolicy::standard(
            remote(closed().await),
            GenerativeTier::unconfigured(),
        );

        let before = Utc::now();
        let snapshot = policy
            .acquire(&AcquisitionRequest::new(location, WAIT))
            .await
            .unwrap();

        assert_eq!(snapshot.areas(), static_snapshot().areas());
        assert_eq!(snapshot.narrative(), static_snapshot().narrative());
        assert!(snapshot.captured_at() >= before);
    }

    #[tokio::test]
    async fn test_broken_floor_exhausts_all_tiers() {
        let mut broken = fallback::safety_snapshot();
        broken.overall_score = 2.0;
        let policy = AcquisitionPolicy::new(vec![
            Box::new(RemoteTier::<SafetySnapshot>::unconfigured()),
            Box::new(GenerativeTier::<SafetySnapshot>::unconfigured()),
            Box::new(StaticTier::<SafetySnapshot>::with_payload(broken)),
        ]);

        let result = policy.acquire(&request()).await;
        assert_eq!(result, Err(AcquisitionError::AllTiersExhausted));
    }

    #[tokio::test]
    async fn test_cancellation_stops_later_tiers() {
        let generator = StubGenerator::slow(GENERATED, Duration::from_secs(5));
        let later = Arc::new(AtomicUsize::new(0));
        let policy = AcquisitionPolicy::new(vec![
            Box::new(GenerativeTier::new(generator.clone(), Duration::from_secs(10))),
            Box::new(CountingTier(later.clone())),
        ]);

        let cancelled =
            tokio::time::timeout(Duration::from_millis(50), policy.acquire(&request())).await;

        assert!(cancelled.is_err());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(generator.calls(), 1);
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_independent() {
        let policy: AcquisitionPolicy<SafetySnapshot> =
            AcquisitionPolicy::standard(RemoteTier::unconfigured(), GenerativeTier::unconfigured());

        let first = policy.acquire(&request()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = policy.acquire(&request()).await.unwrap();

        assert!(second.captured_at() > first.captured_at());
        assert_eq!(first.areas(), second.areas());
    }

    #[tokio::test]
    async fn test_systems_map_generated_with_dangling_reference_falls_back() {
        let text = r#"Sure! {"elements": [{"id": "a", "name": "A", "description": "", "connections": ["ghost"], "category": "social"}], "relationships": [], "leveragePoints": []}"#;
        let generator = StubGenerator::replying(text);
        let policy: AcquisitionPolicy<SystemsMap> = AcquisitionPolicy::standard(
            RemoteTier::unconfigured(),
            GenerativeTier::new(generator.clone(), Duration::from_secs(2)),
        );

        let map = policy.acquire(&request()).await.unwrap();
        assert_eq!(generator.calls(), 1);
        assert_eq!(map, fallback::systems_map());
    }

    #[tokio::test]
    async fn test_systems_map_from_generator() {
        let text = r#"```json
{"elements": [{"id": "a", "name": "A", "description": "d", "connections": [], "category": "economic"}],
 "relationships": [],
 "leveragePoints": [{"id": "lp", "name": "L", "description": "d", "impact": 0.4}]}
```"#;
        let generator = StubGenerator::replying(text);
        let policy: AcquisitionPolicy<SystemsMap> = AcquisitionPolicy::standard(
            RemoteTier::unconfigured(),
            GenerativeTier::new(generator.clone(), Duration::from_secs(2)),
        );

        let map = policy.acquire(&request()).await.unwrap();
        assert_eq!(map.elements.len(), 1);
        assert_eq!(map.leverage_points[0].impact, 0.4);
    }

    #[test]
    fn test_standard_tier_order() {
        let policy: AcquisitionPolicy<SafetySnapshot> =
            AcquisitionPolicy::standard(RemoteTier::unconfigured(), GenerativeTier::unconfigured());
        assert_eq!(policy.tier_names(), vec!["remote", "generative", "static"]);
    }

    #[test]
    fn test_snapshot_remote_query() {
        let query = SafetySnapshot::remote_query(&Location::delhi());
        assert_eq!(
            query,
            vec![
                ("lat", "28.6139".to_string()),
                ("lon", "77.209".to_string()),
                ("radius", "10".to_string()),
            ]
        );
    }
}
