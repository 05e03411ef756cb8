//! Engine configuration loaded from environment variables

use std::time::Duration;

const ENV_EXTRACTION_PROVIDER: &str = "DOCKET_EXTRACTION_PROVIDER";
const ENV_EXTRACTION_MODEL: &str = "DOCKET_EXTRACTION_MODEL";
const ENV_REASONING_PROVIDER: &str = "DOCKET_REASONING_PROVIDER";
const ENV_REASONING_MODEL: &str = "DOCKET_REASONING_MODEL";
const ENV_EMBEDDING_MODEL: &str = "DOCKET_EMBEDDING_MODEL";
const ENV_EMBEDDING_DIMENSIONS: &str = "DOCKET_EMBEDDING_DIMENSIONS";
const ENV_MAX_RETRIES: &str = "DOCKET_LLM_MAX_RETRIES";
const ENV_RETRY_BASE_DELAY_MS: &str = "DOCKET_LLM_RETRY_BASE_DELAY_MS";
const ENV_RETRY_MAX_DELAY_MS: &str = "DOCKET_LLM_RETRY_MAX_DELAY_MS";
const ENV_CALL_TIMEOUT_SECS: &str = "DOCKET_LLM_CALL_TIMEOUT_SECONDS";
const ENV_BREAKER_THRESHOLD: &str = "DOCKET_BREAKER_FAILURE_THRESHOLD";
const ENV_BREAKER_RECOVERY_SECS: &str = "DOCKET_BREAKER_RECOVERY_SECONDS";
const ENV_COMPARISON_CONCURRENCY: &str = "DOCKET_COMPARISON_CONCURRENCY";
const ENV_CORPUS_RESULT_LIMIT: &str = "DOCKET_CORPUS_RESULT_LIMIT";

/// Tunables for the gateway, pipeline, and comparison engine
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider handling fact extraction and classification
    pub extraction_provider: String,
    pub extraction_model: String,
    /// Provider handling scoring, reasoning, decision, and advisory stages
    pub reasoning_provider: String,
    pub reasoning_model: String,
    pub embedding_model: String,
    pub embedding_dimensions: u32,

    /// Retries after the first attempt
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub retry_max_delay: Duration,
    /// Hard timeout per individual model call
    pub call_timeout: Duration,

    /// Consecutive failures before a provider circuit opens
    pub breaker_failure_threshold: u32,
    pub breaker_recovery: Duration,

    /// Concurrent pipeline executions in a comparison fan-out
    pub comparison_concurrency: usize,
    /// Result cap for corpus similarity search
    pub corpus_result_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction_provider: "openai".to_string(),
            extraction_model: "gpt-4o".to_string(),
            reasoning_provider: "anthropic".to_string(),
            reasoning_model: "claude-sonnet-4-20250514".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            embedding_dimensions: 1536,
            max_retries: 2,
            retry_base_delay: Duration::from_millis(300),
            retry_max_delay: Duration::from_millis(3000),
            call_timeout: Duration::from_secs(120),
            breaker_failure_threshold: 5,
            breaker_recovery: Duration::from_secs(60),
            comparison_concurrency: 4,
            corpus_result_limit: 6,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            extraction_provider: env_string(ENV_EXTRACTION_PROVIDER, defaults.extraction_provider),
            extraction_model: env_string(ENV_EXTRACTION_MODEL, defaults.extraction_model),
            reasoning_provider: env_string(ENV_REASONING_PROVIDER, defaults.reasoning_provider),
            reasoning_model: env_string(ENV_REASONING_MODEL, defaults.reasoning_model),
            embedding_model: env_string(ENV_EMBEDDING_MODEL, defaults.embedding_model),
            embedding_dimensions: env_parse(ENV_EMBEDDING_DIMENSIONS, defaults.embedding_dimensions),
            max_retries: env_parse(ENV_MAX_RETRIES, defaults.max_retries),
            retry_base_delay: Duration::from_millis(env_parse(
                ENV_RETRY_BASE_DELAY_MS,
                defaults.retry_base_delay.as_millis() as u64,
            )),
            retry_max_delay: Duration::from_millis(env_parse(
                ENV_RETRY_MAX_DELAY_MS,
                defaults.retry_max_delay.as_millis() as u64,
            )),
            call_timeout: Duration::from_secs(env_parse(
                ENV_CALL_TIMEOUT_SECS,
                defaults.call_timeout.as_secs(),
            )),
            breaker_failure_threshold: env_parse(
                ENV_BREAKER_THRESHOLD,
                defaults.breaker_failure_threshold,
            ),
            breaker_recovery: Duration::from_secs(env_parse(
                ENV_BREAKER_RECOVERY_SECS,
                defaults.breaker_recovery.as_secs(),
            )),
            comparison_concurrency: env_parse(
                ENV_COMPARISON_CONCURRENCY,
                defaults.comparison_concurrency,
            )
            .max(1),
            corpus_result_limit: env_parse(ENV_CORPUS_RESULT_LIMIT, defaults.corpus_result_limit),
        }
    }
}

fn env_string(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
