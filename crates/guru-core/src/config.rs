//! 설정 관리.
//!
//! 설정은 다음 순서로 병합됩니다 (뒤쪽이 우선):
//! 1. 기본값
//! 2. 설정 파일 (`config/guru.toml`, 없으면 건너뜀)
//! 3. `GURU__` 접두사 환경 변수 (예: `GURU__API__ENVIRONMENT=production`)
//! 4. `GURU_API_URL` 환경 변수 (API 기본 URL 오버라이드)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{GuruError, GuruResult};

/// 개발 환경에서 사용하는 로컬 백테스트 서버 주소.
pub const DEVELOPMENT_API_URL: &str = "http://localhost:8000";

/// API 기본 URL 오버라이드 환경 변수.
pub const API_URL_ENV: &str = "GURU_API_URL";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/guru.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GuruConfig {
    /// 백테스트 API 설정
    #[serde(default)]
    pub api: ApiConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 배포 환경.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// 로컬 개발 서버를 대상으로 함
    #[default]
    #[serde(alias = "dev")]
    Development,
    /// 프론트엔드와 같은 origin의 API를 사용
    #[serde(alias = "prod")]
    Production,
}

/// 백테스트 API 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    /// 명시적 API 기본 URL (설정 시 최우선)
    #[serde(default)]
    pub url: Option<String>,
    /// 배포 환경
    #[serde(default)]
    pub environment: Environment,
    /// 운영 환경의 origin (예: "https://guru.example.com")
    #[serde(default)]
    pub origin: Option<String>,
    /// 요청 타임아웃 (초). 지정하지 않으면 타임아웃 없음
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl ApiConfig {
    /// 실제 요청에 사용할 기본 URL을 결정합니다.
    pub fn base_url(&self) -> GuruResult<String> {
        resolve_base_url(self.url.as_deref(), self.environment, self.origin.as_deref())
    }

    /// 요청 타임아웃을 Duration으로 반환합니다.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// API 기본 URL 결정 규칙.
///
/// - 비어 있지 않은 오버라이드가 있으면 그대로 사용
/// - 운영 환경은 같은 origin 사용 (`origin` 필수)
/// - 개발 환경은 [`DEVELOPMENT_API_URL`]
///
/// 결과의 끝 `/`는 제거됩니다.
pub fn resolve_base_url(
    override_url: Option<&str>,
    environment: Environment,
    origin: Option<&str>,
) -> GuruResult<String> {
    fn non_empty(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }

    let url = match (non_empty(override_url), environment) {
        (Some(url), _) => url.to_string(),
        (None, Environment::Production) => non_empty(origin)
            .ok_or_else(|| {
                GuruError::Config(
                    "운영 환경에서는 api.origin 또는 GURU_API_URL 설정이 필요합니다".to_string(),
                )
            })?
            .to_string(),
        (None, Environment::Development) => DEVELOPMENT_API_URL.to_string(),
    };

    Ok(url.trim_end_matches('/').to_string())
}

impl GuruConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> GuruResult<Self> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            .set_default("api.environment", "development")?
            .set_default("logging.level", "warn")?
            .set_default("logging.format", "compact")?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("GURU")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: GuruConfig = builder.build()?.try_deserialize()?;

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api.url = Some(url);
            }
        }

        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> GuruResult<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_takes_precedence() {
        let url = resolve_base_url(
            Some("https://api.example.com/"),
            Environment::Production,
            Some("https://guru.example.com"),
        )
        .unwrap();
        assert_eq!(url, "https://api.example.com");
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let url = resolve_base_url(Some("  "), Environment::Development, None).unwrap();
        assert_eq!(url, DEVELOPMENT_API_URL);
    }

    #[test]
    fn test_production_uses_origin() {
        let url =
            resolve_base_url(None, Environment::Production, Some("https://guru.example.com"))
                .unwrap();
        assert_eq!(url, "https://guru.example.com");
    }

    #[test]
    fn test_production_without_origin_fails() {
        let err = resolve_base_url(None, Environment::Production, None).unwrap_err();
        assert!(matches!(err, GuruError::Config(_)));
    }

    #[test]
    fn test_api_url_env_overrides_file() {
        let path = std::env::temp_dir().join(format!("guru-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[api]\nurl = \"http://file.example.com\"\nenvironment = \"production\"\n",
        )
        .unwrap();

        // GURU_API_URL을 읽는 테스트는 이것 하나뿐
        std::env::set_var(API_URL_ENV, "https://env.example.com/");
        let loaded = GuruConfig::load(&path);
        std::env::remove_var(API_URL_ENV);
        std::fs::remove_file(&path).ok();

        let config = loaded.unwrap();
        assert_eq!(config.api.environment, Environment::Production);
        assert_eq!(config.api.url.as_deref(), Some("https://env.example.com/"));
        assert_eq!(config.api.base_url().unwrap(), "https://env.example.com");
    }

    #[test]
    fn test_request_timeout() {
        let mut api = ApiConfig::default();
        assert!(api.request_timeout().is_none());

        api.request_timeout_secs = Some(30);
        assert_eq!(api.request_timeout(), Some(Duration::from_secs(30)));
    }
}
