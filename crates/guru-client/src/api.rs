//! 백테스트 서버 HTTP 클라이언트.
//!
//! # 엔드포인트
//!
//! - `GET  /api/symbols?market_type=crypto` → `{ "symbols": [...] }`
//! - `POST /api/backtest` (JSON) → `BacktestResult`
//! - `POST /api/backtest/upload` (multipart) → `BacktestResult`
//!
//! 2xx가 아닌 응답은 모두 실패로 처리하며, 본문의 `detail` 문자열이 있으면
//! 사용자 메시지로 사용합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use guru_client::{BacktestApi, HttpBacktestApi};
//! use guru_core::MarketType;
//!
//! let api = HttpBacktestApi::new("http://localhost:8000")?;
//! let symbols = api.fetch_symbols(MarketType::Forex).await?;
//! ```

use async_trait::async_trait;
use guru_core::{ApiConfig, BacktestRequest, BacktestResult, MarketType, UploadRequest};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// 종목 목록 경로.
pub const SYMBOLS_PATH: &str = "/api/symbols";
/// 전략 설명 백테스트 경로.
pub const BACKTEST_PATH: &str = "/api/backtest";
/// 스크립트 업로드 백테스트 경로.
pub const UPLOAD_PATH: &str = "/api/backtest/upload";

/// 백테스트 서버와의 통신 인터페이스.
///
/// 각 호출은 정확히 한 번 성공 또는 실패로 완료됩니다. 재시도하지 않습니다.
#[async_trait]
pub trait BacktestApi: Send + Sync {
    /// 시장 유형의 거래 가능한 종목 목록 조회.
    async fn fetch_symbols(&self, market_type: MarketType) -> ClientResult<Vec<String>>;

    /// 백테스트 실행. 요청 변형에 따라 JSON 또는 multipart로 전송합니다.
    async fn run_backtest(&self, request: &BacktestRequest) -> ClientResult<BacktestResult>;
}

#[derive(Debug, Deserialize)]
struct SymbolsResponse {
    symbols: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// reqwest 기반 [`BacktestApi`] 구현.
#[derive(Debug, Clone)]
pub struct HttpBacktestApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBacktestApi {
    /// 기본 HTTP 클라이언트로 생성합니다 (타임아웃 없음).
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// 설정에서 생성합니다.
    ///
    /// 기본 URL은 [`ApiConfig::base_url`] 규칙으로 결정됩니다.
    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = config
            .base_url()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_client(builder.build()?, base_url))
    }

    /// 미리 구성한 reqwest 클라이언트로 생성합니다.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// 기본 URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn upload_form(request: &UploadRequest) -> ClientResult<Form> {
        let file = Part::bytes(request.script.content.clone())
            .file_name(request.script.file_name.clone())
            .mime_str(request.script.mime_type())?;

        let form = request
            .params
            .form_fields()
            .into_iter()
            .fold(Form::new().part("file", file), |form, (name, value)| {
                form.text(name, value)
            });

        Ok(form)
    }

    /// 2xx 응답이면 본문을 역직렬화하고, 아니면 `detail`을 추출해 에러로 변환합니다.
    async fn read_json<T>(response: reqwest::Response) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail)
                .and_then(|d| d.as_str().map(str::to_string));

            debug!(status = status.as_u16(), ?detail, "Backtest API returned error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl BacktestApi for HttpBacktestApi {
    async fn fetch_symbols(&self, market_type: MarketType) -> ClientResult<Vec<String>> {
        debug!(%market_type, "Fetching symbol directory");

        let response = self
            .client
            .get(self.url(SYMBOLS_PATH))
            .query(&[("market_type", market_type.as_str())])
            .send()
            .await?;

        let body: SymbolsResponse = Self::read_json(response).await?;
        Ok(body.symbols)
    }

    async fn run_backtest(&self, request: &BacktestRequest) -> ClientResult<BacktestResult> {
        let builder = match request {
            BacktestRequest::Description(req) => {
                self.client.post(self.url(BACKTEST_PATH)).json(req)
            }
            BacktestRequest::Upload(req) => self
                .client
                .post(self.url(UPLOAD_PATH))
                .multipart(Self::upload_form(req)?),
        };

        debug!(method = %request.method(), symbol = %request.params().symbol, "Posting backtest request");

        let response = builder.send().await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpBacktestApi::new("http://localhost:8000/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.url(SYMBOLS_PATH), "http://localhost:8000/api/symbols");
    }

    #[test]
    fn test_from_config_development_default() {
        let api = HttpBacktestApi::from_config(&ApiConfig::default()).unwrap();
        assert_eq!(api.base_url(), guru_core::DEVELOPMENT_API_URL);
    }

    #[test]
    fn test_from_config_production_requires_origin() {
        let config = ApiConfig {
            environment: guru_core::Environment::Production,
            ..Default::default()
        };
        let err = HttpBacktestApi::from_config(&config).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
