//! HTTP client for the analysis server.
//!
//! Posts `{code, language}` to `/analyze`, `/format` and `/share`. Only
//! `/format` treats a non-2xx status as a failure; the other endpoints report
//! problems in the body.

use anyhow::Result;
use async_trait::async_trait;
use codescope_core::{
    AnalysisRequest, AnalysisResponse, AnalysisService, CodeScopeError, CodeScopeResult,
    FormatResponse, HealthResponse, ShareResponse,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::ClientConfig;

/// Analysis service reached over HTTP.
#[derive(Clone)]
pub struct HttpAnalysisService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAnalysisService {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> CodeScopeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CodeScopeError::config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> CodeScopeResult<Self> {
        Self::new(&config.server_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post(&self, path: &str, request: &AnalysisRequest) -> CodeScopeResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, language = %request.language, bytes = request.code.len(), "POST");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        debug!(url = %url, status = %response.status(), "Response received");
        Ok(response)
    }

    /// Check whether the server answers `/api/health` with `status: ok`.
    pub async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                let health: HealthResponse = match resp.json().await {
                    Ok(health) => health,
                    Err(_) => return Ok(false),
                };
                Ok(health.status == "ok")
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: &AnalysisRequest) -> CodeScopeResult<AnalysisResponse> {
        // Error bodies arrive with 4xx/5xx codes and still decode.
        let response = self.post("/analyze", request).await?;
        decode(response).await
    }

    async fn format(&self, request: &AnalysisRequest) -> CodeScopeResult<FormatResponse> {
        let response = self.post("/format", request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CodeScopeError::Status {
                operation: "Format",
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        decode(response).await
    }

    async fn share(&self, request: &AnalysisRequest) -> CodeScopeResult<ShareResponse> {
        let response = self.post("/share", request).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> CodeScopeResult<T> {
    let body = response.text().await.map_err(transport)?;
    Ok(serde_json::from_str(&body)?)
}

fn transport(e: reqwest::Error) -> CodeScopeError {
    CodeScopeError::transport(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn service(base_url: &str) -> HttpAnalysisService {
        HttpAnalysisService::new(base_url, Duration::from_secs(5)).unwrap()
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("f = open('data.txt')", "python")
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let svc = service("http://127.0.0.1:5000//");
        assert_eq!(svc.base_url(), "http://127.0.0.1:5000");
    }

    #[tokio::test]
    async fn test_analyze_posts_code_and_language() {
        let router = Router::new().route(
            "/analyze",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "memory_leaks": [{
                        "line": 1,
                        "severity": "high",
                        "issue": format!("{} / {}", body["language"].as_str().unwrap_or(""), body["code"].as_str().unwrap_or("")),
                        "fix": "Use 'with open(...) as f:' instead"
                    }],
                    "code_analysis": [],
                    "ai_analysis": []
                }))
            }),
        );
        let base = spawn(router).await;

        let response = service(&base).analyze(&request()).await.unwrap();

        assert_eq!(response.leaks().len(), 1);
        assert_eq!(response.leaks()[0].issue, "python / f = open('data.txt')");
        assert!(response.style_issues().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_decodes_error_body_on_server_error() {
        let router = Router::new().route(
            "/analyze",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Analysis failed: invalid syntax"})),
                )
            }),
        );
        let base = spawn(router).await;

        let response = service(&base).analyze(&request()).await.unwrap();

        assert_eq!(response.error.as_deref(), Some("Analysis failed: invalid syntax"));
    }

    #[tokio::test]
    async fn test_analyze_non_json_body_is_decode_error() {
        let router = Router::new().route("/analyze", post(|| async { "<html>oops</html>" }));
        let base = spawn(router).await;

        let err = service(&base).analyze(&request()).await.unwrap_err();

        assert!(matches!(err, CodeScopeError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = service(&format!("http://{}", addr))
            .analyze(&request())
            .await
            .unwrap_err();

        assert!(matches!(err, CodeScopeError::Transport(_)));
    }

    #[tokio::test]
    async fn test_format_success() {
        let router = Router::new().route(
            "/format",
            post(|| async { Json(json!({"formatted": "f = open('data.txt')\n", "language": "python"})) }),
        );
        let base = spawn(router).await;

        let response = service(&base).format(&request()).await.unwrap();

        assert_eq!(response.formatted.as_deref(), Some("f = open('data.txt')\n"));
        assert_eq!(response.language.as_deref(), Some("python"));
    }

    #[tokio::test]
    async fn test_format_non_success_status_fails() {
        let router = Router::new().route(
            "/format",
            post(|| async {
                (StatusCode::BAD_REQUEST, Json(json!({"error": "No code provided"})))
            }),
        );
        let base = spawn(router).await;

        let err = service(&base).format(&request()).await.unwrap_err();

        match &err {
            CodeScopeError::Status { status, reason, .. } => {
                assert_eq!(*status, 400);
                assert_eq!(reason, "Bad Request");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Format failed: Bad Request");
    }

    #[tokio::test]
    async fn test_share_returns_url() {
        let router = Router::new().route(
            "/share",
            post(|| async { Json(json!({"url": "https://e/x"})) }),
        );
        let base = spawn(router).await;

        let response = service(&base).share(&request()).await.unwrap();

        assert_eq!(response.url.as_deref(), Some("https://e/x"));
    }

    #[tokio::test]
    async fn test_share_missing_endpoint_is_decode_error() {
        let base = spawn(Router::new()).await;

        let err = service(&base).share(&request()).await.unwrap_err();

        assert!(matches!(err, CodeScopeError::Decode(_)));
    }

    #[tokio::test]
    async fn test_health_check() {
        let router = Router::new().route("/api/health", get(|| async { Json(json!({"status": "ok"})) }));
        let base = spawn(router).await;
        assert!(service(&base).health_check().await.unwrap());

        let degraded = Router::new().route("/api/health", get(|| async { Json(json!({"status": "starting"})) }));
        let base = spawn(degraded).await;
        assert!(!service(&base).health_check().await.unwrap());

        let base = spawn(Router::new()).await;
        assert!(!service(&base).health_check().await.unwrap());
    }
}
