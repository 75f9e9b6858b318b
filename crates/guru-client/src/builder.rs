//! 입력 필드 보관 및 백테스트 요청 생성 (Request Builder).
//!
//! 입력 방식 탭을 바꿔도 공통 필드(종목, 기간, 자본, 타임프레임, 시장)는 유지됩니다.
//! 입력 방식은 제출 시 어떤 요청 변형을 만들지만 결정합니다.

use std::str::FromStr;

use chrono::{Months, NaiveDate, Utc};
use guru_core::{
    format::{format_date, parse_date},
    BacktestParams, BacktestRequest, DescriptionRequest, InputMethod, MarketType, ScriptFile,
    Timeframe, UploadRequest,
};
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::symbols::SymbolDirectory;

/// 초기 자본 기본값.
pub const DEFAULT_INITIAL_CAPITAL: &str = "10000";

/// 기본 백테스트 기간: 오늘과 정확히 1년 전 (달력 기준).
///
/// 2월 29일의 1년 전은 2월 28일입니다.
pub fn default_date_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

/// 사용자가 입력 중인 필드.
///
/// 숫자/날짜 필드는 입력 그대로 문자열로 보관하고 제출 시 변환합니다.
#[derive(Debug, Clone)]
pub struct RequestDraft {
    /// 현재 입력 방식
    pub method: InputMethod,
    /// 시장 유형
    pub market_type: MarketType,
    /// 선택된 종목
    pub symbol: Option<String>,
    /// 시작일 (YYYY-MM-DD)
    pub start_date: String,
    /// 종료일 (YYYY-MM-DD)
    pub end_date: String,
    /// 초기 자본 (텍스트 입력)
    pub initial_capital: String,
    /// 타임프레임
    pub timeframe: Timeframe,
    /// 전략 설명
    pub strategy_description: String,
    /// 업로드할 스크립트
    pub script: Option<ScriptFile>,
}

impl RequestDraft {
    /// 기본값으로 초안을 만듭니다. 기간은 `today` 기준 최근 1년입니다.
    pub fn new(today: NaiveDate) -> Self {
        let (start, end) = default_date_range(today);
        Self {
            method: InputMethod::default(),
            market_type: MarketType::default(),
            symbol: None,
            start_date: format_date(&start),
            end_date: format_date(&end),
            initial_capital: DEFAULT_INITIAL_CAPITAL.to_string(),
            timeframe: Timeframe::default(),
            strategy_description: String::new(),
            script: None,
        }
    }

    /// 오늘(UTC) 기준 초안.
    pub fn for_today() -> Self {
        Self::new(Utc::now().date_naive())
    }

    /// 현재 입력 방식에 맞는 요청을 하나 만듭니다.
    ///
    /// 검증 순서: 스크립트 파일 → 날짜 형식 → 기간 → 자본 → 종목 선택 → 종목 목록 포함 여부.
    /// 첫 번째 실패만 보고합니다.
    pub fn build(&self, directory: &SymbolDirectory) -> Result<BacktestRequest, ValidationError> {
        let script = match self.method {
            InputMethod::Upload => Some(self.script.clone().ok_or(ValidationError::MissingScript)?),
            InputMethod::Description => None,
        };

        let params = self.build_params(directory)?;

        Ok(match script {
            Some(script) => BacktestRequest::Upload(UploadRequest { script, params }),
            None => BacktestRequest::Description(DescriptionRequest {
                strategy_description: self.strategy_description.clone(),
                params,
            }),
        })
    }

    fn build_params(&self, directory: &SymbolDirectory) -> Result<BacktestParams, ValidationError> {
        let start_date = parse_date(&self.start_date)
            .map_err(|_| ValidationError::InvalidDate(self.start_date.clone()))?;
        let end_date = parse_date(&self.end_date)
            .map_err(|_| ValidationError::InvalidDate(self.end_date.clone()))?;

        if start_date >= end_date {
            return Err(ValidationError::DateRange {
                start: format_date(&start_date),
                end: format_date(&end_date),
            });
        }

        let initial_capital = parse_capital(&self.initial_capital)?;

        let symbol = self
            .symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingSymbol)?;

        // 다른 시장의 목록이 남아 있는 경우도 거부
        if directory.market_type() != Some(self.market_type) || !directory.contains(symbol) {
            return Err(ValidationError::UnknownSymbol {
                symbol: symbol.to_string(),
                market_type: self.market_type,
            });
        }

        Ok(BacktestParams {
            symbol: symbol.to_string(),
            start_date,
            end_date,
            initial_capital,
            timeframe: self.timeframe,
            market_type: self.market_type,
        })
    }
}

fn parse_capital(input: &str) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidCapital(input.to_string());
    let value = Decimal::from_str(input.trim()).map_err(|_| invalid())?;
    if value <= Decimal::ZERO {
        return Err(invalid());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn crypto_directory() -> SymbolDirectory {
        let mut dir = SymbolDirectory::new();
        dir.apply_loaded(
            MarketType::Crypto,
            MarketType::Crypto,
            vec!["BTC/USD".to_string(), "ETH/USD".to_string()],
            None,
        );
        dir
    }

    fn draft() -> RequestDraft {
        let mut draft = RequestDraft::new(ymd(2024, 6, 15));
        draft.symbol = Some("BTC/USD".to_string());
        draft.strategy_description = "SMA 20 et 50, RSI 14".to_string();
        draft
    }

    #[test]
    fn test_default_date_range_is_one_calendar_year() {
        assert_eq!(
            default_date_range(ymd(2024, 6, 15)),
            (ymd(2023, 6, 15), ymd(2024, 6, 15))
        );
        // 윤년: 365일 빼기와 다름
        assert_eq!(default_date_range(ymd(2025, 3, 1)).0, ymd(2024, 3, 1));
        assert_eq!(default_date_range(ymd(2024, 2, 29)).0, ymd(2023, 2, 28));
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = RequestDraft::new(ymd(2024, 6, 15));

        assert_eq!(draft.method, InputMethod::Description);
        assert_eq!(draft.market_type, MarketType::Crypto);
        assert_eq!(draft.timeframe, Timeframe::D1);
        assert_eq!(draft.initial_capital, "10000");
        assert_eq!(draft.start_date, "2023-06-15");
        assert_eq!(draft.end_date, "2024-06-15");
        assert!(draft.symbol.is_none());
    }

    #[test]
    fn test_description_method_builds_description_request() {
        let request = draft().build(&crypto_directory()).unwrap();

        match request {
            BacktestRequest::Description(req) => {
                assert_eq!(req.strategy_description, "SMA 20 et 50, RSI 14");
                assert_eq!(req.params.symbol, "BTC/USD");
                assert_eq!(req.params.initial_capital, dec!(10000));
            }
            other => panic!("expected description request, got {:?}", other),
        }
    }

    #[test]
    fn test_description_is_sent_as_typed() {
        let mut draft = draft();
        draft.strategy_description = "  SMA 20 et 50\n".to_string();

        match draft.build(&crypto_directory()).unwrap() {
            BacktestRequest::Description(req) => {
                assert_eq!(req.strategy_description, "  SMA 20 et 50\n");
            }
            other => panic!("expected description request, got {:?}", other),
        }
    }

    #[test]
    fn test_upload_method_builds_upload_request() {
        let mut draft = draft();
        draft.method = InputMethod::Upload;
        draft.script = Some(ScriptFile::new("robot.py", b"def run(): pass".to_vec()).unwrap());

        let request = draft.build(&crypto_directory()).unwrap();
        assert_eq!(request.method(), InputMethod::Upload);
        assert!(matches!(request, BacktestRequest::Upload(_)));
    }

    #[test]
    fn test_upload_without_script_is_rejected() {
        let mut draft = draft();
        draft.method = InputMethod::Upload;

        assert_eq!(
            draft.build(&crypto_directory()),
            Err(ValidationError::MissingScript)
        );
    }

    #[test]
    fn test_switching_method_keeps_shared_fields() {
        let mut draft = draft();
        draft.script = Some(ScriptFile::new("robot.txt", b"x".to_vec()).unwrap());
        let directory = crypto_directory();

        let description = draft.build(&directory).unwrap();
        draft.method = InputMethod::Upload;
        let upload = draft.build(&directory).unwrap();

        assert_eq!(description.params(), upload.params());
    }

    #[test]
    fn test_date_validation() {
        let mut draft = draft();
        draft.start_date = "2024-13-01".to_string();
        assert_eq!(
            draft.build(&crypto_directory()),
            Err(ValidationError::InvalidDate("2024-13-01".to_string()))
        );

        draft.start_date = "2024-06-15".to_string();
        assert!(matches!(
            draft.build(&crypto_directory()),
            Err(ValidationError::DateRange { .. })
        ));
    }

    #[test]
    fn test_capital_validation() {
        let mut draft = draft();
        for bad in ["abc", "", "0", "-100"] {
            draft.initial_capital = bad.to_string();
            assert_eq!(
                draft.build(&crypto_directory()),
                Err(ValidationError::InvalidCapital(bad.to_string()))
            );
        }

        draft.initial_capital = " 2500.75 ".to_string();
        let request = draft.build(&crypto_directory()).unwrap();
        assert_eq!(request.params().initial_capital, dec!(2500.75));
    }

    #[test]
    fn test_symbol_must_belong_to_directory() {
        let mut draft = draft();
        draft.symbol = None;
        assert_eq!(
            draft.build(&crypto_directory()),
            Err(ValidationError::MissingSymbol)
        );

        draft.symbol = Some("EUR/USD".to_string());
        assert!(matches!(
            draft.build(&crypto_directory()),
            Err(ValidationError::UnknownSymbol { .. })
        ));

        // 목록이 다른 시장의 것이면 거부
        draft.symbol = Some("BTC/USD".to_string());
        draft.market_type = MarketType::Forex;
        assert!(matches!(
            draft.build(&crypto_directory()),
            Err(ValidationError::UnknownSymbol { .. })
        ));
    }
}
