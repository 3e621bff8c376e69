/// JSON-over-HTTP source client with timeout and bounded retry.
///
/// Every request carries a per-request timeout. Transient failures (timeouts, connect errors,
/// 429 and 5xx responses) are retried up to `max_retries` times with capped exponential
/// backoff. Decoding failures are never retried: the same body would fail again.
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::CommonError;

#[derive(Clone, Debug)]
pub struct JsonSourceConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub max_error_body_bytes: usize,
}

impl Default for JsonSourceConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 1,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_millis(5_000),
            max_error_body_bytes: 8 * 1024,
        }
    }
}

#[derive(Clone)]
pub struct JsonSource {
    config: JsonSourceConfig,
    http: reqwest::Client,
}

impl JsonSource {
    pub fn new(config: JsonSourceConfig) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("restaurant-explorer")
            .build()?;
        Ok(Self { config, http })
    }

    /// GET `url` and decode the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CommonError> {
        self.request_with_retry(|| async {
            let resp = self
                .http
                .get(url)
                .timeout(self.config.timeout)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = read_limited_text(resp, self.config.max_error_body_bytes).await;
                return Err(CommonError::UpstreamStatus { status, body });
            }

            let bytes = resp.bytes().await?;
            debug!(url, bytes = bytes.len(), "response body received");
            Ok(serde_json::from_slice::<T>(&bytes)?)
        })
        .await
    }

    async fn request_with_retry<T, Fut, F>(&self, mut f: F) -> Result<T, CommonError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, CommonError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match f().await {
                Ok(v) => return Ok(v),
                Err(e) => {
                    if attempt > self.config.max_retries || !should_retry(&e) {
                        return Err(e);
                    }
                    let delay = backoff_delay(
                        self.config.initial_backoff,
                        self.config.max_backoff,
                        attempt - 1,
                    );
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "source request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

fn should_retry(err: &CommonError) -> bool {
    match err {
        CommonError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request() || e.is_body(),
        CommonError::UpstreamStatus { status, .. } => {
            *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
        }
        CommonError::InvalidJson(_) => false,
    }
}

fn backoff_delay(initial: Duration, max: Duration, exponent: u32) -> Duration {
    let mult = 1u128.checked_shl(exponent).unwrap_or(u128::MAX);
    let base_ms = initial.as_millis().saturating_mul(mult);
    let capped_ms = std::cmp::min(base_ms, max.as_millis()) as u64;
    let jitter_cap = std::cmp::max(1, capped_ms / 4);
    Duration::from_millis(capped_ms.saturating_add(pseudo_jitter_ms(jitter_cap)))
}

fn pseudo_jitter_ms(max_inclusive: u64) -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
        .subsec_nanos() as u64;
    nanos % (max_inclusive + 1)
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode as AxumStatus;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::Router;

    use super::*;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn fast_config(max_retries: u32) -> JsonSourceConfig {
        JsonSourceConfig {
            timeout: Duration::from_secs(5),
            max_retries,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
            max_error_body_bytes: 16,
        }
    }

    async fn flaky(State(hits): State<Arc<AtomicUsize>>) -> Response {
        if hits.fetch_add(1, Ordering::SeqCst) == 0 {
            (AxumStatus::SERVICE_UNAVAILABLE, "warming up").into_response()
        } else {
            axum::Json(vec![1, 2, 3]).into_response()
        }
    }

    #[test]
    fn backoff_is_capped() {
        let d = backoff_delay(Duration::from_millis(200), Duration::from_millis(1_000), 10);
        assert!(d >= Duration::from_millis(1_000));
        assert!(d <= Duration::from_millis(1_250));
    }

    #[test]
    fn client_errors_are_not_retried() {
        let err = CommonError::UpstreamStatus {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert!(!should_retry(&err));
        let err = CommonError::UpstreamStatus {
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        assert!(should_retry(&err));
    }

    #[tokio::test]
    async fn decodes_json_body() {
        let base = serve(Router::new().route("/data.json", get(|| async { axum::Json(vec!["a", "b"]) }))).await;
        let source = JsonSource::new(fast_config(0)).unwrap();
        let body: Vec<String> = source.get_json(&format!("{base}/data.json")).await.unwrap();
        assert_eq!(body, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn retries_once_on_server_error() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/data.json", get(flaky))
            .with_state(Arc::clone(&hits));
        let base = serve(app).await;

        let source = JsonSource::new(fast_config(1)).unwrap();
        let body: Vec<u32> = source.get_json(&format!("{base}/data.json")).await.unwrap();
        assert_eq!(body, vec![1, 2, 3]);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_without_retry_budget() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/data.json", get(flaky))
            .with_state(Arc::clone(&hits));
        let base = serve(app).await;

        let source = JsonSource::new(fast_config(0)).unwrap();
        let err = source
            .get_json::<Vec<u32>>(&format!("{base}/data.json"))
            .await
            .unwrap_err();
        match err {
            CommonError::UpstreamStatus { status, body } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "warming up");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_json_is_reported() {
        let base = serve(Router::new().route("/data.json", get(|| async { "<html>" }))).await;
        let source = JsonSource::new(fast_config(3)).unwrap();
        let err = source
            .get_json::<Vec<u32>>(&format!("{base}/data.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommonError::InvalidJson(_)));
    }
}
