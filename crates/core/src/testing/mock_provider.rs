//! Mock places provider for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::geo::GeoPoint;
use crate::provider::{PlacesProvider, ProviderError, RawPlace};

/// Which provider operation was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Nearby,
    Text,
}

/// A recorded upstream call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub center: GeoPoint,
    pub radius_m: f64,
    /// Place types for nearby calls; empty for text calls.
    pub included_types: Vec<String>,
    /// Query string for text calls.
    pub query: Option<String>,
}

/// Produces results per call, for tests that need tile-specific answers.
type CallHandler = Box<dyn Fn(&RecordedCall) -> Result<Vec<RawPlace>, ProviderError> + Send + Sync>;

/// Picks the calls that get a targeted delay.
type DelayPredicate = Box<dyn Fn(&RecordedCall) -> bool + Send + Sync>;

/// Mock implementation of the PlacesProvider trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable results for every call
/// - Track calls for assertions
/// - Simulate failures and slow responses
pub struct MockProvider {
    /// Results returned when no handler is set.
    results: Arc<RwLock<Vec<RawPlace>>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// If set, the next call fails with this error.
    next_error: Arc<RwLock<Option<ProviderError>>>,
    /// If set, every call fails with this error.
    error: Arc<RwLock<Option<ProviderError>>>,
    /// Delay applied before answering.
    delay: Arc<RwLock<Option<Duration>>>,
    /// Delay applied only to calls matching the predicate.
    targeted_delay: Arc<RwLock<Option<(Duration, DelayPredicate)>>>,
    /// Per-call handler (optional).
    handler: Arc<RwLock<Option<CallHandler>>>,
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("results", &"<results>")
            .field("calls", &"<calls>")
            .field("next_error", &"<next_error>")
            .field("error", &"<error>")
            .field("delay", &"<delay>")
            .field("targeted_delay", &"<targeted_delay>")
            .field("handler", &"<handler>")
            .finish()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider that returns no places.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
            targeted_delay: Arc::new(RwLock::new(None)),
            handler: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the results to return for subsequent calls.
    pub async fn set_results(&self, results: Vec<RawPlace>) {
        *self.results.write().await = results;
    }

    /// Get recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Clear recorded calls.
    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }

    /// Get the number of calls made.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: ProviderError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every call fail with the given error, or clear it with `None`.
    pub async fn set_error(&self, error: Option<ProviderError>) {
        *self.error.write().await = error;
    }

    /// Delay every call by the given duration.
    pub async fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write().await = delay;
    }

    /// Delay only the calls for which `predicate` returns true.
    pub async fn set_delay_for<F>(&self, delay: Duration, predicate: F)
    where
        F: Fn(&RecordedCall) -> bool + Send + Sync + 'static,
    {
        *self.targeted_delay.write().await = Some((delay, Box::new(predicate)));
    }

    /// Set a handler that decides each call's answer from the call itself.
    pub async fn set_handler<F>(&self, handler: F)
    where
        F: Fn(&RecordedCall) -> Result<Vec<RawPlace>, ProviderError> + Send + Sync + 'static,
    {
        *self.handler.write().await = Some(Box::new(handler));
    }

    /// Clear the call handler.
    pub async fn clear_handler(&self) {
        *self.handler.write().await = None;
    }

    async fn respond(&self, call: RecordedCall) -> Result<Vec<RawPlace>, ProviderError> {
        self.calls.write().await.push(call.clone());

        let targeted = self
            .targeted_delay
            .read()
            .await
            .as_ref()
            .filter(|(_, predicate)| predicate(&call))
            .map(|(delay, _)| *delay);
        let delay = match targeted {
            Some(delay) => Some(delay),
            None => *self.delay.read().await,
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        if let Some(error) = self.error.read().await.clone() {
            return Err(error);
        }

        if let Some(handler) = self.handler.read().await.as_ref() {
            return handler(&call);
        }

        Ok(self.results.read().await.clone())
    }
}

#[async_trait]
impl PlacesProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search_nearby(
        &self,
        center: GeoPoint,
        radius_m: f64,
        included_types: &[String],
    ) -> Result<Vec<RawPlace>, ProviderError> {
        self.respond(RecordedCall {
            kind: CallKind::Nearby,
            center,
            radius_m,
            included_types: included_types.to_vec(),
            query: None,
        })
        .await
    }

    async fn search_text(
        &self,
        center: GeoPoint,
        radius_m: f64,
        text_query: &str,
    ) -> Result<Vec<RawPlace>, ProviderError> {
        self.respond(RecordedCall {
            kind: CallKind::Text,
            center,
            radius_m,
            included_types: Vec::new(),
            query: Some(text_query.to_string()),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_records_calls() {
        let provider = MockProvider::new();
        provider
            .set_results(vec![fixtures::raw_place("a", 1.0, 2.0)])
            .await;

        let places = provider
            .search_nearby(GeoPoint::new(1.0, 2.0), 1000.0, &["cafe".to_string()])
            .await
            .unwrap();
        assert_eq!(places.len(), 1);

        provider
            .search_text(GeoPoint::new(1.0, 2.0), 5000.0, "tea")
            .await
            .unwrap();

        let calls = provider.recorded_calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].kind, CallKind::Nearby);
        assert_eq!(calls[1].query.as_deref(), Some("tea"));
    }

    #[tokio::test]
    async fn test_next_error_is_one_shot() {
        let provider = MockProvider::new();
        provider.set_next_error(ProviderError::Timeout).await;

        let center = GeoPoint::new(0.0, 0.0);
        assert!(provider.search_text(center, 1000.0, "x").await.is_err());
        assert!(provider.search_text(center, 1000.0, "x").await.is_ok());
    }

    #[tokio::test]
    async fn test_clear_handler_and_recorded() {
        let provider = MockProvider::new();
        provider
            .set_results(vec![fixtures::raw_place("default", 1.0, 2.0)])
            .await;
        provider
            .set_handler(|_| Ok(vec![fixtures::raw_place("handled", 1.0, 2.0)]))
            .await;

        let center = GeoPoint::new(1.0, 2.0);
        let places = provider.search_text(center, 1000.0, "x").await.unwrap();
        assert_eq!(places[0].id, "handled");

        provider.clear_handler().await;
        let places = provider.search_text(center, 1000.0, "x").await.unwrap();
        assert_eq!(places[0].id, "default");

        assert_eq!(provider.call_count().await, 2);
        provider.clear_recorded().await;
        assert_eq!(provider.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_targeted_delay_only_hits_matching_calls() {
        let provider = MockProvider::new();
        provider
            .set_delay_for(Duration::from_millis(300), |call| call.radius_m > 2000.0)
            .await;

        let center = GeoPoint::new(0.0, 0.0);
        let start = std::time::Instant::now();
        provider.search_text(center, 1000.0, "x").await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(300));

        let start = std::time::Instant::now();
        provider.search_text(center, 3000.0, "x").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
