//! 백테스트 요청 모델.
//!
//! 요청은 항상 두 가지 중 하나입니다:
//! - `Description` - 자연어 전략 설명 (JSON 본문)
//! - `Upload` - 로봇 스크립트 파일 (multipart 폼)
//!
//! 두 변형은 `BacktestParams` 공통 필드를 공유합니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{GuruError, GuruResult};
use crate::format::format_date;
use crate::types::{MarketType, Timeframe};

/// 업로드 가능한 스크립트 확장자.
pub const ACCEPTED_SCRIPT_EXTENSIONS: [&str; 2] = ["py", "txt"];

/// 입력 방식 (입력 화면의 탭).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    /// 전략 설명 텍스트
    #[default]
    Description,
    /// 스크립트 파일 업로드
    Upload,
}

impl fmt::Display for InputMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMethod::Description => write!(f, "description"),
            InputMethod::Upload => write!(f, "upload"),
        }
    }
}

/// 두 요청 변형이 공유하는 백테스트 파라미터.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestParams {
    /// 종목 심볼 (예: "BTC/USD")
    pub symbol: String,
    /// 시작일
    pub start_date: NaiveDate,
    /// 종료일
    pub end_date: NaiveDate,
    /// 초기 자본
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub initial_capital: Decimal,
    /// 타임프레임
    pub timeframe: Timeframe,
    /// 시장 유형
    pub market_type: MarketType,
}

impl BacktestParams {
    /// multipart 폼 필드 목록 (파일 제외).
    ///
    /// 초기 자본은 문자열로 전송됩니다.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("symbol", self.symbol.clone()),
            ("start_date", format_date(&self.start_date)),
            ("end_date", format_date(&self.end_date)),
            ("initial_capital", self.initial_capital.normalize().to_string()),
            ("timeframe", self.timeframe.to_string()),
            ("market_type", self.market_type.to_string()),
        ]
    }
}

/// 전략 설명 기반 요청 (`POST /api/backtest` JSON 본문).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionRequest {
    /// 자연어 전략 설명
    pub strategy_description: String,
    /// 공통 파라미터
    #[serde(flatten)]
    pub params: BacktestParams,
}

/// 업로드할 로봇 스크립트.
///
/// 내용은 해석하지 않고 그대로 전달합니다.
#[derive(Clone, PartialEq, Eq)]
pub struct ScriptFile {
    /// 파일 이름 (확장자 포함)
    pub file_name: String,
    /// 파일 내용
    pub content: Vec<u8>,
}

impl ScriptFile {
    /// 스크립트 파일을 생성합니다. 확장자가 `.py` / `.txt`가 아니면 실패합니다.
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> GuruResult<Self> {
        let file_name = file_name.into();
        if !is_accepted_script(&file_name) {
            return Err(GuruError::InvalidInput(format!(
                "지원하지 않는 스크립트 형식: {} (.py, .txt만 가능)",
                file_name
            )));
        }
        Ok(Self {
            file_name,
            content: content.into(),
        })
    }

    /// 디스크에서 스크립트 파일을 읽습니다.
    pub fn from_path<P: AsRef<Path>>(path: P) -> GuruResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| GuruError::InvalidInput(format!("잘못된 파일 경로: {}", path.display())))?
            .to_string();

        if !is_accepted_script(&file_name) {
            return Err(GuruError::InvalidInput(format!(
                "지원하지 않는 스크립트 형식: {} (.py, .txt만 가능)",
                file_name
            )));
        }

        let content = std::fs::read(path)?;
        Ok(Self { file_name, content })
    }

    /// multipart 파트의 MIME 타입.
    pub fn mime_type(&self) -> &'static str {
        if self.file_name.to_lowercase().ends_with(".py") {
            "text/x-python"
        } else {
            "text/plain"
        }
    }
}

impl fmt::Debug for ScriptFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptFile")
            .field("file_name", &self.file_name)
            .field("bytes", &self.content.len())
            .finish()
    }
}

/// 파일 이름이 허용된 스크립트 확장자인지 확인합니다 (대소문자 무시).
pub fn is_accepted_script(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_SCRIPT_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

/// 스크립트 업로드 요청 (`POST /api/backtest/upload` multipart 폼).
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    /// 로봇 스크립트
    pub script: ScriptFile,
    /// 공통 파라미터
    pub params: BacktestParams,
}

/// 백테스트 요청. 제출마다 정확히 하나의 변형만 존재합니다.
#[derive(Debug, Clone, PartialEq)]
pub enum BacktestRequest {
    /// 전략 설명 요청
    Description(DescriptionRequest),
    /// 스크립트 업로드 요청
    Upload(UploadRequest),
}

impl BacktestRequest {
    /// 이 요청을 만든 입력 방식.
    pub fn method(&self) -> InputMethod {
        match self {
            BacktestRequest::Description(_) => InputMethod::Description,
            BacktestRequest::Upload(_) => InputMethod::Upload,
        }
    }

    /// 공통 파라미터.
    pub fn params(&self) -> &BacktestParams {
        match self {
            BacktestRequest::Description(req) => &req.params,
            BacktestRequest::Upload(req) => &req.params,
        }
    }
}
