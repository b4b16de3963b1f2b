//! # inference-client
//!
//! Resilient client for remote text-inference APIs.
//!
//! The crate wraps a minimal request dispatcher in a resilience layer:
//! failures are classified as retryable or fatal, retryable failures are
//! retried with jittered exponential backoff, in-flight dispatches are
//! bounded by a concurrency gate, and identical requests can be memoized in
//! memory.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`ApiClient`] orchestration and builder |
//! | [`request`] | Per-call request payload and options |
//! | [`transport`] | Single-attempt HTTP dispatch and endpoint routing |
//! | [`classify`] | Retryable/fatal error classification |
//! | [`retry`] | Generic jittered exponential backoff loop |
//! | [`limit`] | Bounded concurrency gate |
//! | [`cache`] | In-memory response cache |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inference_client::{ApiClient, InferenceRequest};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> inference_client::Result<()> {
//!     let client = ApiClient::builder()
//!         .max_concurrent(1)
//!         .build("gpt-3.5-turbo");
//!
//!     let response = client
//!         .make_request(
//!             InferenceRequest::new()
//!                 .field("prompt", json!("Why did the chicken cross the road?"))
//!                 .field("max_tokens", json!(9)),
//!         )
//!         .await?;
//!     println!("{response}");
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod classify;
pub mod client;
pub mod limit;
pub mod request;
pub mod retry;
pub mod transport;

pub mod error;

pub use cache::{CacheKey, ResponseCache};
pub use client::{ApiClient, ApiClientBuilder};
pub use error::Error;
pub use limit::ConcurrencyLimit;
pub use request::InferenceRequest;
pub use retry::{retry, RetryPolicy};
pub use transport::BASE_API_URL;

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;
