//! Inference API client: cache lookup, concurrency-gated retrying dispatch.

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheKey, ResponseCache};
use crate::classify;
use crate::limit::ConcurrencyLimit;
use crate::request::InferenceRequest;
use crate::retry::{retry, RetryPolicy};
use crate::transport::{Dispatcher, BASE_API_URL};
use crate::Result;

/// Client for a remote text-inference API with retries, a concurrency bound,
/// and optional in-memory response caching.
///
/// One instance is bound to one model. The concurrency gate and the cache are
/// shared by all calls issued through the instance; nothing is shared across
/// instances or persisted across restarts.
pub struct ApiClient {
    dispatcher: Dispatcher,
    limit: ConcurrencyLimit,
    cache: Option<ResponseCache>,
    retry_policy: RetryPolicy,
}

impl ApiClient {
    /// Create a client with default configuration for `model`.
    pub fn new(model: &str) -> Self {
        ApiClientBuilder::new().build(model)
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Issue one logical request and return the response body.
    ///
    /// Flow: cache lookup (hit returns immediately, touching neither the gate
    /// nor the retrier) -> retry loop over gate-limited single attempts ->
    /// cache store on success. A fatal or exhausted failure propagates the
    /// original error unchanged.
    pub async fn make_request(&self, request: InferenceRequest) -> Result<Value> {
        // Key over the caller payload only, before the dispatcher injects the
        // model and response format.
        let key = self
            .cache
            .as_ref()
            .map(|_| CacheKey::from_payload(request.payload()));

        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(cached) = cache.lookup(key) {
                return Ok(cached);
            }
        }

        let response = retry(&self.retry_policy, classify::is_retryable, || {
            self.dispatch_once(&request)
        })
        .await?;

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.store(key, response.clone());
        }
        Ok(response)
    }

    /// One gate-limited dispatch attempt. The permit is scoped to the network
    /// round trip and dropped before any backoff sleep in the caller.
    async fn dispatch_once(&self, request: &InferenceRequest) -> Result<Value> {
        let _permit = self.limit.acquire().await?;
        self.dispatcher.dispatch(request).await
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    base_url: String,
    max_concurrent: Option<usize>,
    cache: bool,
    api_key: Option<String>,
    retry_policy: RetryPolicy,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: BASE_API_URL.to_string(),
            max_concurrent: None,
            cache: false,
            api_key: None,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Override the API base URL (primarily for testing with mock servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Cap the number of HTTP requests in flight at once. Unset = unlimited.
    pub fn max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = Some(n);
        self
    }

    /// Memoize request/response pairs in memory to avoid duplicate requests.
    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    /// Use a fixed bearer credential instead of reading `OPENAI_API_KEY` from
    /// the environment at each dispatch.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Replace the default backoff policy. Mainly useful in tests.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn build(self, model: &str) -> ApiClient {
        debug!(
            model,
            base_url = self.base_url.as_str(),
            max_concurrent = ?self.max_concurrent,
            cache = self.cache,
            "building inference client"
        );
        ApiClient {
            dispatcher: Dispatcher::new(self.base_url, model.to_string(), self.api_key),
            limit: ConcurrencyLimit::new(self.max_concurrent),
            cache: self.cache.then(ResponseCache::new),
            retry_policy: self.retry_policy,
        }
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
