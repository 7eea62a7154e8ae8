//! HTTP transport seam
//!
//! `ApiRequest`/`ApiResponse` describe one exchange with the backend. `HttpTransport`
//! sends it; the reqwest implementation turns every failure into a `TransportFailure`
//! for the classifier.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{BackendErrorBody, DomainError, TransportFailure, UploadFile};

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// One part of a `multipart/form-data` body
#[derive(Debug, Clone)]
pub enum MultipartPart {
    Json { name: String, value: Value },
    Text { name: String, value: String },
    File { name: String, file: UploadFile },
}

impl MultipartPart {
    pub fn name(&self) -> &str {
        match self {
            MultipartPart::Json { name, .. }
            | MultipartPart::Text { name, .. }
            | MultipartPart::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<MultipartPart>),
}

/// Transport-neutral request description
///
/// Paths are relative to the transport's base URL. The request is replayable so retries
/// send exactly the same thing.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_header("Authorization", format!("Bearer {}", token))
    }

    pub fn with_idempotency_key(self, key: &str) -> Self {
        self.with_header(IDEMPOTENCY_KEY_HEADER, key)
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn with_multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// First header value matching `name` case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.header(IDEMPOTENCY_KEY_HEADER)
    }
}

/// Successful (2xx) response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json_value(status: u16, value: &Value) -> Self {
        Self::new(status, value.to_string())
    }

    /// Decode the body; an empty body decodes as JSON `null`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        if self.body.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Trait for sending requests (for mocking)
#[async_trait]
pub trait HttpTransport: Send + Sync + std::fmt::Debug {
    /// Send one request; non-2xx responses come back as failures
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportFailure>;
}

/// Real transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build_form(parts: &[MultipartPart]) -> Result<Form, TransportFailure> {
        let mut form = Form::new();

        for part in parts {
            form = match part {
                MultipartPart::Json { name, value } => {
                    let part = Part::text(value.to_string())
                        .mime_str("application/json")
                        .map_err(map_reqwest_error)?;
                    form.part(name.clone(), part)
                }
                MultipartPart::Text { name, value } => form.text(name.clone(), value.clone()),
                MultipartPart::File { name, file } => {
                    let part = Part::bytes(file.content().to_vec())
                        .file_name(file.name().to_string())
                        .mime_str(file.mime_type())
                        .map_err(map_reqwest_error)?;
                    form.part(name.clone(), part)
                }
            };
        }

        Ok(form)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportFailure> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.url(&request.path));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Multipart(parts) => builder.multipart(Self::build_form(parts)?),
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            return Err(match BackendErrorBody::from_response_body(&text) {
                Some(body) => TransportFailure::Server {
                    status: status.as_u16(),
                    body,
                },
                None => TransportFailure::HttpStatus {
                    status: status.as_u16(),
                },
            });
        }

        Ok(ApiResponse::new(status.as_u16(), body))
    }
}

fn map_reqwest_error(error: reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
        TransportFailure::TimedOut
    } else if error.is_builder() || error.is_decode() {
        TransportFailure::Error {
            message: error.to_string(),
        }
    } else if error.is_connect() || error.is_request() || error.is_body() {
        TransportFailure::NoResponse {
            message: error.to_string(),
        }
    } else {
        TransportFailure::Unrecognized
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug, Clone)]
    enum Reply {
        Immediate(Result<ApiResponse, TransportFailure>),
        Delayed(Duration, Result<ApiResponse, TransportFailure>),
        Hang,
    }

    /// Scripted transport that answers in order and records every request
    #[derive(Debug, Default)]
    pub struct MockHttpTransport {
        replies: Mutex<VecDeque<Reply>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl MockHttpTransport {
        pub fn new() -> Self {
            Self::default()
        }

        fn push(self, reply: Reply) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        pub fn with_response(self, status: u16, body: Value) -> Self {
            self.push(Reply::Immediate(Ok(ApiResponse::json_value(status, &body))))
        }

        pub fn with_failure(self, failure: TransportFailure) -> Self {
            self.push(Reply::Immediate(Err(failure)))
        }

        pub fn with_delayed_response(self, delay: Duration, status: u16, body: Value) -> Self {
            self.push(Reply::Delayed(delay, Ok(ApiResponse::json_value(status, &body))))
        }

        /// The next call never completes on its own
        pub fn with_hang(self) -> Self {
            self.push(Reply::Hang)
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for MockHttpTransport {
        async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportFailure> {
            self.requests.lock().unwrap().push(request.clone());
            let reply = self.replies.lock().unwrap().pop_front();

            match reply {
                Some(Reply::Immediate(result)) => result,
                Some(Reply::Delayed(delay, result)) => {
                    tokio::time::sleep(delay).await;
                    result
                }
                Some(Reply::Hang) => std::future::pending().await,
                None => Err(TransportFailure::Error {
                    message: format!("No mock response for {} {}", request.method, request.path),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::post("/registrations")
            .with_idempotency_key("abc")
            .with_bearer_token("tok")
            .with_query("status", "pending")
            .with_json(json!({ "a": 1 }));

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.idempotency_key(), Some("abc"));
        assert_eq!(request.header("authorization"), Some("Bearer tok"));
        assert_eq!(request.query, vec![("status".to_string(), "pending".to_string())]);
        assert!(matches!(request.body, RequestBody::Json(_)));
    }

    #[test]
    fn test_url_joining() {
        let transport = ReqwestTransport::new("http://localhost:8080/api/").unwrap();

        assert_eq!(transport.base_url(), "http://localhost:8080/api");
        assert_eq!(transport.url("/matches"), "http://localhost:8080/api/matches");
        assert_eq!(transport.url("matches"), "http://localhost:8080/api/matches");
    }

    #[test]
    fn test_response_json() {
        let response = ApiResponse::json_value(200, &json!({ "id": "t1" }));
        let value: Value = response.json().unwrap();
        assert_eq!(value["id"], "t1");

        let empty = ApiResponse::new(204, Bytes::new());
        let unit: Option<Value> = empty.json().unwrap();
        assert!(unit.is_none());

        let broken = ApiResponse::new(200, "not json");
        assert!(broken.json::<Value>().is_err());
    }

    #[test]
    fn test_build_form_rejects_bad_mime() {
        let parts = vec![MultipartPart::File {
            name: "payment_receipt".to_string(),
            file: UploadFile::new("r.pdf", "not a mime", Bytes::from_static(b"%PDF")),
        }];

        let result = ReqwestTransport::build_form(&parts);
        assert!(matches!(result, Err(TransportFailure::Error { .. })));
    }

    #[test]
    fn test_multipart_part_names() {
        let part = MultipartPart::Json {
            name: "registration".to_string(),
            value: json!({}),
        };
        assert_eq!(part.name(), "registration");
    }
}
