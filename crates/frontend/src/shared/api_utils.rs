//! API utilities for frontend-backend communication
//!
//! Shared HTTP plumbing: the error type every backend call returns, URL
//! construction, JSON request helpers and the request timeout race.

use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::pin::pin;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("request timed out after {0} ms")]
    Timeout(u32),
}

impl FetchError {
    /// Text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Network(_) => "네트워크 연결을 확인해주세요.".to_string(),
            FetchError::Status(code) => {
                format!("서버 오류가 발생했습니다 ({}). 잠시 후 다시 시도해주세요.", code)
            }
            FetchError::Decode(_) => "응답 형식을 해석할 수 없습니다.".to_string(),
            FetchError::Timeout(_) => {
                "응답 시간이 초과되었습니다. 잠시 후 다시 시도해주세요.".to_string()
            }
        }
    }
}

/// HTTP client for the portal backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBackend {
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Build a full API URL from a path
    ///
    /// # Example
    /// ```rust,ignore
    /// let url = backend.url("/api/v1/posts/12");
    /// ```
    pub fn url(&self, path: &str) -> String {
        api_url(&self.base_url, path)
    }
}

pub fn api_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Percent-encoded `k=v&k=v` string
pub fn query_string(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode a response body; blank bodies mean "no data"
pub fn decode_body<T: DeserializeOwned>(text: &str) -> Result<Option<T>, FetchError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text).map(Some).map_err(|e| {
        let preview: String = text.chars().take(100).collect();
        FetchError::Decode(format!("{} (body: {})", e, preview))
    })
}

async fn read_body<T: DeserializeOwned>(response: Response) -> Result<Option<T>, FetchError> {
    if response.status() == 204 {
        return Ok(None);
    }
    let text = response
        .text()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    decode_body(&text)
}

pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<Option<T>, FetchError> {
    log::debug!("GET {}", url);
    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    log::debug!("GET {} -> {}", url, response.status());

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }
    read_body(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<Option<T>, FetchError> {
    log::debug!("POST {}", url);
    let response = Request::post(url)
        .header("Accept", "application/json")
        .json(body)
        .map_err(|e| FetchError::Decode(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    log::debug!("POST {} -> {}", url, response.status());

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }
    read_body(response).await
}

/// Race `fut` against `deadline`; the deadline winning yields `FetchError::Timeout`
pub async fn with_timeout<T, F, D>(fut: F, deadline: D, timeout_ms: u32) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
    D: Future<Output = ()>,
{
    let fut = pin!(fut);
    let deadline = pin!(deadline);
    match select(fut, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(FetchError::Timeout(timeout_ms)),
    }
}

/// Browser timer used as the deadline for `with_timeout`
pub fn deadline(timeout_ms: u32) -> gloo_timers::future::TimeoutFuture {
    gloo_timers::future::TimeoutFuture::new(timeout_ms)
}

/// Hands out a fresh deadline for every request it guards
#[derive(Clone, Copy)]
pub struct RequestTimer<F> {
    pub make_deadline: F,
    pub timeout_ms: u32,
}

impl<F, D> RequestTimer<F>
where
    F: Fn() -> D,
    D: Future<Output = ()>,
{
    pub async fn guard<T, Fut>(&self, fut: Fut) -> Result<T, FetchError>
    where
        Fut: Future<Output = Result<T, FetchError>>,
    {
        with_timeout(fut, (self.make_deadline)(), self.timeout_ms).await
    }
}

/// `RequestTimer` backed by browser timers
pub fn browser_timer(
    timeout_ms: u32,
) -> RequestTimer<impl Fn() -> gloo_timers::future::TimeoutFuture + Copy> {
    RequestTimer {
        make_deadline: move || deadline(timeout_ms),
        timeout_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{pending, ready};

    #[test]
    fn test_api_url() {
        assert_eq!(
            api_url("http://localhost:8083/", "/api/v1/posts/3"),
            "http://localhost:8083/api/v1/posts/3"
        );
        assert_eq!(api_url("", "/api/v1/posts/3"), "/api/v1/posts/3");
    }

    #[test]
    fn test_query_string_encodes_values() {
        let qs = query_string(&[("q", "서산시 해미면".to_string()), ("display", "20".to_string())]);
        assert_eq!(
            qs,
            "q=%EC%84%9C%EC%82%B0%EC%8B%9C%20%ED%95%B4%EB%AF%B8%EB%A9%B4&display=20"
        );
    }

    #[test]
    fn test_decode_body() {
        let empty: Option<Vec<u32>> = decode_body("  ").unwrap();
        assert_eq!(empty, None);
        let items: Option<Vec<u32>> = decode_body("[1,2]").unwrap();
        assert_eq!(items, Some(vec![1, 2]));
        let err = decode_body::<Vec<u32>>("<html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_timeout_wins_over_pending_request() {
        let result: Result<u32, FetchError> =
            block_on(with_timeout(pending(), ready(()), 10_000));
        assert_eq!(result, Err(FetchError::Timeout(10_000)));
    }

    #[test]
    fn test_finished_request_beats_pending_deadline() {
        let result = block_on(with_timeout(ready(Ok(7)), pending::<()>(), 10_000));
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn test_timer_guards_each_request_separately() {
        let timer = RequestTimer {
            make_deadline: || ready(()),
            timeout_ms: 500,
        };
        let done = block_on(timer.guard(ready(Ok("list"))));
        let hung: Result<&str, FetchError> = block_on(timer.guard(pending()));
        assert_eq!(done, Ok("list"));
        assert_eq!(hung, Err(FetchError::Timeout(500)));
    }
}
