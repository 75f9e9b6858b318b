//! 클라이언트 에러 타입.
//!
//! - `ClientError` - 네트워크/서버 에러 (제출 컨트롤러 경계에서 처리)
//! - `ValidationError` - 네트워크 호출 전 입력 검증 에러
//! - `SessionError` - 현재 상태에서 허용되지 않는 사용자 동작

use guru_core::MarketType;
use thiserror::Error;

/// 백테스트 API 호출 에러.
#[derive(Debug, Error)]
pub enum ClientError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    Network(String),

    /// 2xx가 아닌 응답
    #[error("API error {status}: {}", .detail.as_deref().unwrap_or("(no detail)"))]
    Api {
        /// HTTP 상태 코드
        status: u16,
        /// 서버가 보낸 `detail` 메시지
        detail: Option<String>,
    },

    /// 응답 본문 파싱 실패
    #[error("Decode error: {0}")]
    Decode(String),

    /// 클라이언트 설정 에러
    #[error("Config error: {0}")]
    Config(String),
}

/// 클라이언트 작업을 위한 Result 타입.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// 사용자에게 보여줄 서버 메시지. 없으면 `None`.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            ClientError::Api {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => Some(detail),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if err.is_builder() {
            ClientError::Config(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// 요청 생성 전 입력 검증 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 업로드 방식인데 파일이 없음
    #[error("로봇 스크립트 파일을 선택하세요")]
    MissingScript,

    /// 날짜 형식 오류
    #[error("잘못된 날짜 형식: {0} (YYYY-MM-DD)")]
    InvalidDate(String),

    /// 시작일이 종료일보다 같거나 늦음
    #[error("시작일({start})은 종료일({end})보다 앞서야 합니다")]
    DateRange {
        /// 시작일
        start: String,
        /// 종료일
        end: String,
    },

    /// 초기 자본이 숫자가 아니거나 0 이하
    #[error("초기 자본은 0보다 큰 숫자여야 합니다: {0}")]
    InvalidCapital(String),

    /// 종목 미선택
    #[error("종목을 선택하세요")]
    MissingSymbol,

    /// 불러온 종목 목록에 없는 심볼
    #[error("{market_type} 종목 목록에 없는 심볼입니다: {symbol}")]
    UnknownSymbol {
        /// 선택된 심볼
        symbol: String,
        /// 선택된 시장 유형
        market_type: MarketType,
    },
}

/// 세션 동작 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// 이미 제출이 진행 중 (트리거 비활성)
    #[error("백테스트가 이미 실행 중입니다")]
    SubmissionInFlight,

    /// 아직 결과가 없어 결과 화면을 열 수 없음
    #[error("표시할 백테스트 결과가 없습니다")]
    ResultsUnavailable,

    /// 입력 검증 실패 (네트워크 호출 없음)
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
