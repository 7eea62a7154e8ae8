//! Resilient API client
//!
//! Wraps an [`HttpTransport`] with per-attempt deadlines, cancellation, classification
//! of every failure into an [`ApiError`], and bounded retries of transient failures.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::{parse_api_error, ApiError, TransportFailure};
use crate::infrastructure::observability::{record_api_request, record_retry};

use super::abort::{AbortController, AbortReason, AbortSignal};
use super::retry::RetryPolicy;
use super::transport::{ApiRequest, ApiResponse, HttpTransport};

fn abort_failure(reason: AbortReason) -> TransportFailure {
    match reason {
        AbortReason::Cancelled => TransportFailure::Cancelled,
        AbortReason::TimedOut => TransportFailure::TimedOut,
    }
}

#[derive(Debug, Clone)]
pub struct ResilientClient {
    transport: Arc<dyn HttpTransport>,
    request_timeout: Option<Duration>,
    retry_policy: RetryPolicy,
}

impl ResilientClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            request_timeout: None,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Deadline applied to each individual attempt
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Run a single attempt
    ///
    /// The attempt gets its own child controller so a per-attempt timeout classifies as
    /// `TIMEOUT` while an abort of `signal` classifies with the caller's reason.
    pub async fn execute(
        &self,
        request: &ApiRequest,
        signal: &AbortSignal,
    ) -> Result<ApiResponse, ApiError> {
        if let Some(reason) = signal.reason() {
            return Err(parse_api_error(abort_failure(reason)));
        }

        let mut attempt = AbortController::child_of(signal, self.request_timeout);
        let attempt_signal = attempt.signal();
        let start = Instant::now();

        let result = tokio::select! {
            biased;
            reason = attempt_signal.aborted() => Err(abort_failure(reason)),
            result = self.transport.send(request) => result,
        };
        attempt.settle();

        let duration = start.elapsed();
        let result = result.map_err(parse_api_error);

        let outcome = match &result {
            Ok(_) => "success".to_string(),
            Err(error) => error.error_code.as_string(),
        };
        record_api_request(request.method.as_str(), &request.path, &outcome, duration);

        match &result {
            Ok(response) => debug!(
                method = %request.method,
                path = %request.path,
                status = response.status,
                duration_ms = duration.as_millis() as u64,
                "Request succeeded"
            ),
            Err(error) => debug!(
                method = %request.method,
                path = %request.path,
                error_code = %error.error_code,
                retryable = error.is_retryable,
                duration_ms = duration.as_millis() as u64,
                "Request failed"
            ),
        }

        result
    }

    /// Run attempts until one succeeds, a failure is not retryable, or `policy` runs out
    ///
    /// Backoff sleeps race `signal`; cancellation ends the loop immediately.
    pub async fn execute_with_retry(
        &self,
        request: &ApiRequest,
        signal: &AbortSignal,
        policy: &RetryPolicy,
    ) -> Result<ApiResponse, ApiError> {
        let max_attempts = policy.max_attempts.max(1);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let error = match self.execute(request, signal).await {
                Ok(response) => {
                    if attempt > 1 {
                        info!(path = %request.path, attempt = attempt, "Request succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(error) => error,
            };

            if signal.is_aborted() || !error.is_retryable {
                return Err(error);
            }

            if attempt >= max_attempts {
                warn!(
                    path = %request.path,
                    attempts = attempt,
                    error_code = %error.error_code,
                    "Retries exhausted"
                );
                return Err(error);
            }

            let backoff = policy.backoff_for(attempt);
            record_retry(&request.path, &error.error_code.as_string());
            info!(
                path = %request.path,
                attempt = attempt,
                backoff_ms = backoff.as_millis() as u64,
                error_code = %error.error_code,
                "Retrying after backoff"
            );

            tokio::select! {
                biased;
                reason = signal.aborted() => {
                    return Err(parse_api_error(abort_failure(reason)));
                }
                _ = tokio::time::sleep(backoff) => {}
            }
        }
    }

    /// Execute with the client's retry policy and decode the JSON body
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        signal: &AbortSignal,
    ) -> Result<T, ApiError> {
        let response = self
            .execute_with_retry(request, signal, &self.retry_policy)
            .await?;

        response.json().map_err(|e| {
            parse_api_error(TransportFailure::Error {
                message: format!("Failed to parse response: {}", e),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiErrorCode, BackendErrorBody};
    use crate::infrastructure::http::abort::create_abort_controller;
    use crate::infrastructure::http::transport::mock::MockHttpTransport;
    use serde_json::{json, Value};

    fn client(transport: Arc<MockHttpTransport>) -> ResilientClient {
        ResilientClient::new(transport)
    }

    fn busy() -> TransportFailure {
        TransportFailure::Server {
            status: 503,
            body: BackendErrorBody::new("SERVICE_UNAVAILABLE", "Busy").with_retryable(true),
        }
    }

    fn no_response() -> TransportFailure {
        TransportFailure::NoResponse {
            message: "connection refused".to_string(),
        }
    }

    #[tokio::test]
    async fn test_execute_success() {
        let transport = Arc::new(MockHttpTransport::new().with_response(200, json!({ "ok": true })));
        let client = client(transport.clone());

        let response = client
            .execute(&ApiRequest::get("/matches"), &AbortSignal::never())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_execute_classifies_failure() {
        let transport = Arc::new(MockHttpTransport::new().with_failure(no_response()));
        let client = client(transport);

        let error = client
            .execute(&ApiRequest::get("/matches"), &AbortSignal::never())
            .await
            .unwrap_err();

        assert_eq!(error.error_code, ApiErrorCode::NetworkError);
        assert!(error.is_network_error);
        assert!(error.is_retryable);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_backend_retryable_then_succeeds() {
        let transport = Arc::new(
            MockHttpTransport::new()
                .with_failure(busy())
                .with_failure(busy())
                .with_response(201, json!({ "registration_id": "r1" })),
        );
        let client = client(transport.clone());
        let start = Instant::now();

        let response = client
            .execute_with_retry(
                &ApiRequest::post("/registrations"),
                &AbortSignal::never(),
                &RetryPolicy::default(),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(transport.call_count(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_exhausted_returns_last_error() {
        let transport = Arc::new(
            MockHttpTransport::new()
                .with_failure(no_response())
                .with_failure(no_response())
                .with_failure(no_response())
                .with_response(200, json!({})),
        );
        let client = client(transport.clone());

        let error = client
            .execute_with_retry(
                &ApiRequest::post("/registrations"),
                &AbortSignal::never(),
                &RetryPolicy::default(),
            )
            .await
            .unwrap_err();

        assert_eq!(error.error_code, ApiErrorCode::NetworkError);
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_is_not_retried() {
        let transport = Arc::new(
            MockHttpTransport::new()
                .with_failure(TransportFailure::Server {
                    status: 422,
                    body: BackendErrorBody::new("VALIDATION_ERROR", "Bad input"),
                })
                .with_response(200, json!({})),
        );
        let client = client(transport.clone());

        let error = client
            .execute_with_retry(
                &ApiRequest::post("/registrations"),
                &AbortSignal::never(),
                &RetryPolicy::default(),
            )
            .await
            .unwrap_err();

        assert!(error.is_validation_error());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_plain_http_status_is_not_retried() {
        let transport = Arc::new(
            MockHttpTransport::new().with_failure(TransportFailure::HttpStatus { status: 500 }),
        );
        let client = client(transport.clone());

        let error = client
            .execute_with_retry(
                &ApiRequest::get("/matches"),
                &AbortSignal::never(),
                &RetryPolicy::default(),
            )
            .await
            .unwrap_err();

        assert_eq!(error.error_code, ApiErrorCode::Http(500));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_timeout_is_retried() {
        let transport = Arc::new(
            MockHttpTransport::new()
                .with_hang()
                .with_response(200, json!({ "ok": true })),
        );
        let client = client(transport.clone()).with_request_timeout(Some(Duration::from_secs(5)));
        let start = Instant::now();

        let response = client
            .execute_with_retry(
                &ApiRequest::get("/matches"),
                &AbortSignal::never(),
                &RetryPolicy::default(),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(transport.call_count(), 2);
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_response_within_deadline_succeeds() {
        let transport = Arc::new(MockHttpTransport::new().with_delayed_response(
            Duration::from_millis(150),
            200,
            json!({ "ok": true }),
        ));
        let client = client(transport.clone()).with_request_timeout(Some(Duration::from_millis(200)));
        let start = tokio::time::Instant::now();

        let response = client
            .execute(&ApiRequest::get("/matches"), &AbortSignal::never())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(start.elapsed(), Duration::from_millis(150));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_timeout_classified_as_timeout() {
        let transport = Arc::new(MockHttpTransport::new().with_hang());
        let client = client(transport).with_request_timeout(Some(Duration::from_millis(200)));

        let error = client
            .execute(&ApiRequest::get("/matches"), &AbortSignal::never())
            .await
            .unwrap_err();

        assert_eq!(error.error_code, ApiErrorCode::Timeout);
        assert!(error.is_retryable);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_in_flight_is_terminal() {
        let transport = Arc::new(
            MockHttpTransport::new()
                .with_hang()
                .with_response(200, json!({})),
        );
        let client = client(transport.clone());
        let controller = create_abort_controller(None);
        let signal = controller.signal();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            controller.cancel();
        });

        let error = client
            .execute_with_retry(&ApiRequest::get("/matches"), &signal, &RetryPolicy::default())
            .await
            .unwrap_err();

        assert!(error.is_cancelled());
        assert!(!error.is_retryable);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_backoff() {
        let transport = Arc::new(
            MockHttpTransport::new()
                .with_failure(no_response())
                .with_response(200, json!({})),
        );
        let client = client(transport.clone());
        let controller = create_abort_controller(None);
        let signal = controller.signal();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            controller.cancel();
        });

        let start = Instant::now();
        let error = client
            .execute_with_retry(&ApiRequest::get("/matches"), &signal, &RetryPolicy::default())
            .await
            .unwrap_err();

        assert!(error.is_cancelled());
        assert_eq!(transport.call_count(), 1);
        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_already_cancelled_makes_no_call() {
        let transport = Arc::new(MockHttpTransport::new().with_response(200, json!({})));
        let client = client(transport.clone());
        let controller = create_abort_controller(None);
        controller.cancel();

        let error = client
            .execute_with_retry(
                &ApiRequest::get("/matches"),
                &controller.signal(),
                &RetryPolicy::default(),
            )
            .await
            .unwrap_err();

        assert!(error.is_cancelled());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_request_sent_on_every_attempt() {
        let transport = Arc::new(
            MockHttpTransport::new()
                .with_failure(busy())
                .with_response(200, json!({})),
        );
        let client = client(transport.clone());
        let request = ApiRequest::post("/registrations").with_idempotency_key("key-1");

        client
            .execute_with_retry(&request, &AbortSignal::never(), &RetryPolicy::default())
            .await
            .unwrap();

        let keys: Vec<Option<String>> = transport
            .requests()
            .iter()
            .map(|r| r.idempotency_key().map(str::to_string))
            .collect();
        assert_eq!(keys, vec![Some("key-1".to_string()), Some("key-1".to_string())]);
    }

    #[tokio::test]
    async fn test_execute_json_decodes() {
        let transport = Arc::new(MockHttpTransport::new().with_response(200, json!([1, 2, 3])));
        let client = client(transport);

        let values: Vec<Value> = client
            .execute_json(&ApiRequest::get("/matches"), &AbortSignal::never())
            .await
            .unwrap();

        assert_eq!(values.len(), 3);
    }

    #[tokio::test]
    async fn test_execute_json_decode_failure() {
        let transport = Arc::new(MockHttpTransport::new().with_response(200, json!({ "not": "a list" })));
        let client = client(transport);

        let error = client
            .execute_json::<Vec<Value>>(&ApiRequest::get("/matches"), &AbortSignal::never())
            .await
            .unwrap_err();

        assert_eq!(error.error_code, ApiErrorCode::UnknownError);
        assert!(!error.is_retryable);
    }
}
