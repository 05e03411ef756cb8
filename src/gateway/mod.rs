//! Model gateway: retry, timeout, circuit breaking, and cost accounting
//! around external text-generation and embedding providers

pub mod backoff;
pub mod breaker;
pub mod openai;
pub mod pricing;
pub mod provider;

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::model::Config;

pub use backoff::BackoffSchedule;
pub use breaker::{CircuitBreaker, Clock, MonotonicClock};
pub use openai::OpenAiCompatProvider;
pub use provider::{ChatRequest, ChatTurn, Completion, CompletionProvider, ProviderError};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("model call to '{provider}' timed out after {attempts} attempt(s)")]
    Timeout { provider: String, attempts: u32 },

    #[error("circuit for '{provider}' is open, retry in {}s", retry_in.as_secs())]
    CircuitOpen { provider: String, retry_in: Duration },

    #[error("provider '{provider}' failed: {source}")]
    Provider {
        provider: String,
        #[source]
        source: ProviderError,
    },

    #[error("no provider registered under '{0}'")]
    UnknownProvider(String),
}

/// Successful call with cost and latency metadata attached. Returned to the
/// caller for aggregation, never persisted by the gateway itself.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub content: String,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub cost_usd: f64,
    pub latency_ms: u64,
}

/// Wraps every provider call in timeout + retry with exponential backoff,
/// guarded by one circuit breaker per provider. Owns all breaker state
/// explicitly; nothing here is ambient or global.
pub struct ModelGateway {
    providers: HashMap<String, Arc<dyn CompletionProvider>>,
    breakers: Mutex<HashMap<String, Arc<CircuitBreaker>>>,
    backoff: BackoffSchedule,
    max_retries: u32,
    call_timeout: Duration,
    failure_threshold: u32,
    recovery: Duration,
    embedding_model: String,
    embedding_dimensions: u32,
    clock: Arc<dyn Clock>,
}

impl ModelGateway {
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(MonotonicClock))
    }

    /// Construct with an explicit time source for the breaker state machine
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            providers: HashMap::new(),
            breakers: Mutex::new(HashMap::new()),
            backoff: BackoffSchedule::new(config.retry_base_delay, config.retry_max_delay),
            max_retries: config.max_retries,
            call_timeout: config.call_timeout,
            failure_threshold: config.breaker_failure_threshold,
            recovery: config.breaker_recovery,
            embedding_model: config.embedding_model.clone(),
            embedding_dimensions: config.embedding_dimensions,
            clock,
        }
    }

    pub fn register_provider(
        &mut self,
        name: impl Into<String>,
        provider: Arc<dyn CompletionProvider>,
    ) {
        self.providers.insert(name.into(), provider);
    }

    /// Issue one chat completion through the resilience stack
    pub async fn invoke(
        &self,
        provider_name: &str,
        request: ChatRequest,
    ) -> Result<GatewayResponse, GatewayError> {
        let provider = self.provider(provider_name)?;
        let started = Instant::now();
        let model = request.model.clone();

        let completion = self
            .execute(provider_name, || {
                let provider = Arc::clone(&provider);
                let request = request.clone();
                async move { provider.complete(&request).await }
            })
            .await?;

        let latency_ms = started.elapsed().as_millis() as u64;
        let cost_usd = pricing::cost_usd(&model, completion.input_tokens, completion.output_tokens);

        tracing::debug!(
            provider = provider_name,
            model = %model,
            input_tokens = completion.input_tokens,
            output_tokens = completion.output_tokens,
            latency_ms,
            "model call completed"
        );

        Ok(GatewayResponse {
            content: completion.content,
            model,
            input_tokens: completion.input_tokens,
            output_tokens: completion.output_tokens,
            cost_usd,
            latency_ms,
        })
    }

    /// Generate an embedding vector for a text string
    pub async fn embed(
        &self,
        provider_name: &str,
        text: &str,
    ) -> Result<Vec<f32>, GatewayError> {
        let provider = self.provider(provider_name)?;
        let model = self.embedding_model.clone();
        let dimensions = self.embedding_dimensions;
        let text = text.to_string();

        self.execute(provider_name, || {
            let provider = Arc::clone(&provider);
            let model = model.clone();
            let text = text.clone();
            async move { provider.embed(&model, &text, dimensions).await }
        })
        .await
    }

    fn provider(&self, name: &str) -> Result<Arc<dyn CompletionProvider>, GatewayError> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| GatewayError::UnknownProvider(name.to_string()))
    }

    fn breaker(&self, name: &str) -> Arc<CircuitBreaker> {
        let mut breakers = self.breakers.lock().expect("breaker map poisoned");
        Arc::clone(breakers.entry(name.to_string()).or_insert_with(|| {
            Arc::new(CircuitBreaker::new(
                name,
                self.failure_threshold,
                self.recovery,
            ))
        }))
    }

    /// Retry loop shared by completions and embeddings. The breaker is
    /// re-checked before every attempt so calls queued behind an opening
    /// circuit fail fast instead of burning retries.
    async fn execute<T, F, Fut>(&self, provider_name: &str, op: F) -> Result<T, GatewayError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let breaker = self.breaker(provider_name);
        let mut last_error: Option<GatewayError> = None;

        for attempt in 0..=self.max_retries {
            if let Err(retry_in) = breaker.check(self.clock.as_ref()) {
                return Err(GatewayError::CircuitOpen {
                    provider: provider_name.to_string(),
                    retry_in,
                });
            }

            match tokio::time::timeout(self.call_timeout, op()).await {
                Ok(Ok(value)) => {
                    breaker.record_success();
                    return Ok(value);
                }
                Ok(Err(error)) if !error.is_retryable() => {
                    return Err(GatewayError::Provider {
                        provider: provider_name.to_string(),
                        source: error,
                    });
                }
                Ok(Err(error)) => {
                    breaker.record_failure(self.clock.as_ref());
                    tracing::warn!(
                        provider = provider_name,
                        attempt = attempt + 1,
                        error = %error,
                        "retryable provider failure"
                    );
                    last_error = Some(GatewayError::Provider {
                        provider: provider_name.to_string(),
                        source: error,
                    });
                }
                Err(_) => {
                    breaker.record_failure(self.clock.as_ref());
                    tracing::warn!(
                        provider = provider_name,
                        attempt = attempt + 1,
                        timeout_secs = self.call_timeout.as_secs(),
                        "model call timed out"
                    );
                    last_error = Some(GatewayError::Timeout {
                        provider: provider_name.to_string(),
                        attempts: attempt + 1,
                    });
                }
            }

            if attempt < self.max_retries {
                tokio::time::sleep(self.backoff.delay(attempt)).await;
            }
        }

        Err(last_error.expect("retry loop ran at least once"))
    }
}

#[cfg(test)]
mod tests {
    use super::breaker::test_support::ManualClock;
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Provider scripted to fail a fixed number of times before succeeding
    struct FlakyProvider {
        failures_remaining: AtomicU32,
        failure: fn() -> ProviderError,
        calls: AtomicU32,
    }

    impl FlakyProvider {
        fn new(failures: u32, failure: fn() -> ProviderError) -> Self {
            Self {
                failures_remaining: AtomicU32::new(failures),
                failure,
                calls: AtomicU32::new(0),
            }
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionProvider for FlakyProvider {
        async fn complete(&self, request: &ChatRequest) -> Result<Completion, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self
                .failures_remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err((self.failure)());
            }
            Ok(Completion {
                content: format!("echo:{}", request.model),
                input_tokens: 100,
                output_tokens: 50,
            })
        }

        async fn embed(
            &self,
            _model: &str,
            _text: &str,
            dimensions: u32,
        ) -> Result<Vec<f32>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![0.0; dimensions as usize])
        }
    }

    /// Provider whose calls never resolve, to drive the timeout path
    struct HangingProvider;

    #[async_trait]
    impl CompletionProvider for HangingProvider {
        async fn complete(&self, _request: &ChatRequest) -> Result<Completion, ProviderError> {
            std::future::pending().await
        }

        async fn embed(
            &self,
            _model: &str,
            _text: &str,
            _dimensions: u32,
        ) -> Result<Vec<f32>, ProviderError> {
            std::future::pending().await
        }
    }

    fn test_config() -> Config {
        Config {
            max_retries: 2,
            retry_base_delay: Duration::from_millis(50),
            retry_max_delay: Duration::from_millis(200),
            call_timeout: Duration::from_secs(5),
            breaker_failure_threshold: 5,
            breaker_recovery: Duration::from_secs(60),
            ..Config::default()
        }
    }

    fn gateway_with(
        config: &Config,
        provider: Arc<dyn CompletionProvider>,
        clock: Arc<dyn Clock>,
    ) -> ModelGateway {
        let mut gateway = ModelGateway::with_clock(config, clock);
        gateway.register_provider("test", provider);
        gateway
    }

    fn request() -> ChatRequest {
        ChatRequest::new("gpt-4o", "system", "user text")
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_failures_then_succeeds() {
        let provider = Arc::new(FlakyProvider::new(2, || ProviderError::RateLimited));
        let gateway = gateway_with(&test_config(), provider.clone(), Arc::new(ManualClock::new()));

        let response = gateway.invoke("test", request()).await.unwrap();
        assert_eq!(response.content, "echo:gpt-4o");
        assert_eq!(provider.call_count(), 3);
        assert!(response.cost_usd > 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn non_retryable_error_propagates_without_retry() {
        let provider = Arc::new(FlakyProvider::new(10, || ProviderError::Http { status: 400 }));
        let gateway = gateway_with(&test_config(), provider.clone(), Arc::new(ManualClock::new()));

        let error = gateway.invoke("test", request()).await.unwrap_err();
        assert!(matches!(
            error,
            GatewayError::Provider {
                source: ProviderError::Http { status: 400 },
                ..
            }
        ));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_exhaustion_surfaces_provider_error() {
        let provider = Arc::new(FlakyProvider::new(10, || ProviderError::Server { status: 503 }));
        let gateway = gateway_with(&test_config(), provider.clone(), Arc::new(ManualClock::new()));

        let error = gateway.invoke("test", request()).await.unwrap_err();
        assert!(matches!(error, GatewayError::Provider { .. }));
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_typed_and_counts_attempts() {
        let config = Config {
            max_retries: 1,
            call_timeout: Duration::from_secs(2),
            ..test_config()
        };
        let gateway = gateway_with(&config, Arc::new(HangingProvider), Arc::new(ManualClock::new()));

        let error = gateway.invoke("test", request()).await.unwrap_err();
        match error {
            GatewayError::Timeout { attempts, .. } => assert_eq!(attempts, 2),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn circuit_opens_after_consecutive_timeouts() {
        let config = Config {
            max_retries: 0,
            call_timeout: Duration::from_secs(1),
            ..test_config()
        };
        let clock = Arc::new(ManualClock::new());
        let gateway = gateway_with(&config, Arc::new(HangingProvider), clock.clone());

        for _ in 0..5 {
            let error = gateway.invoke("test", request()).await.unwrap_err();
            assert!(matches!(error, GatewayError::Timeout { .. }));
        }

        // sixth call must fail fast with a circuit error, not a timeout
        let error = gateway.invoke("test", request()).await.unwrap_err();
        match error {
            GatewayError::CircuitOpen { retry_in, .. } => {
                assert!(retry_in <= Duration::from_secs(60));
            }
            other => panic!("expected circuit open, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn circuit_allows_probe_after_recovery_window() {
        let config = Config {
            max_retries: 0,
            ..test_config()
        };
        let clock = Arc::new(ManualClock::new());
        let provider = Arc::new(FlakyProvider::new(5, || ProviderError::Server { status: 500 }));
        let gateway = gateway_with(&config, provider.clone(), clock.clone());

        for _ in 0..5 {
            let _ = gateway.invoke("test", request()).await.unwrap_err();
        }
        assert!(matches!(
            gateway.invoke("test", request()).await.unwrap_err(),
            GatewayError::CircuitOpen { .. }
        ));
        assert_eq!(provider.call_count(), 5);

        clock.advance(Duration::from_secs(61));
        let response = gateway.invoke("test", request()).await.unwrap();
        assert_eq!(response.model, "gpt-4o");
        assert_eq!(provider.call_count(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn embed_goes_through_resilience_stack() {
        let provider = Arc::new(FlakyProvider::new(0, || ProviderError::RateLimited));
        let gateway = gateway_with(&test_config(), provider.clone(), Arc::new(ManualClock::new()));

        let vector = gateway.embed("test", "some legal text").await.unwrap();
        assert_eq!(vector.len(), 1536);
    }

    #[tokio::test]
    async fn unknown_provider_is_rejected() {
        let gateway = ModelGateway::new(&test_config());
        let error = gateway.invoke("nope", request()).await.unwrap_err();
        assert!(matches!(error, GatewayError::UnknownProvider(_)));
    }
}
