//! HTTP infrastructure - Transport, abort handles, retries and the resilient client

mod abort;
mod client;
mod retry;
mod transport;

pub use abort::{create_abort_controller, AbortController, AbortReason, AbortSignal};
pub use client::ResilientClient;
pub use retry::{RetryConfig, RetryPolicy};
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, MultipartPart, ReqwestTransport, RequestBody,
    IDEMPOTENCY_KEY_HEADER,
};

#[cfg(test)]
pub use transport::mock::MockHttpTransport;
