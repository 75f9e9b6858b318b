//! 백테스트 클라이언트의 공통 에러 타입.
//!
//! 설정 로드, 도메인 값 파싱 등 코어 크레이트에서 발생하는 에러를 정의합니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum GuruError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),
}

/// 코어 작업을 위한 Result 타입.
pub type GuruResult<T> = Result<T, GuruError>;

impl From<serde_json::Error> for GuruError {
    fn from(err: serde_json::Error) -> Self {
        GuruError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for GuruError {
    fn from(err: config::ConfigError) -> Self {
        GuruError::Config(err.to_string())
    }
}

impl From<std::io::Error> for GuruError {
    fn from(err: std::io::Error) -> Self {
        GuruError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GuruError::Config("missing origin".to_string());
        assert_eq!(err.to_string(), "설정 에러: missing origin");
    }

    #[test]
    fn test_error_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let guru: GuruError = err.into();
        assert!(matches!(guru, GuruError::Serialization(_)));
    }
}
