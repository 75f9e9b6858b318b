//! 백테스트 엔진이 반환하는 결과 페이로드.
//!
//! 지표 값은 엔진이 계산한 그대로 표시만 하며, 클라이언트에서 다시 계산하지 않습니다.
//! 퍼센트 값(`total_return`, `max_drawdown`, `win_rate`, `pnl_pct`)은
//! 이미 100이 곱해진 값입니다.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::types::{Percentage, Price};

/// 백테스트 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// 총 수익률 (%)
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_return: Percentage,
    /// 샤프 비율
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub sharpe_ratio: Decimal,
    /// 최대 낙폭 (%, 크기)
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub max_drawdown: Percentage,
    /// 승률 (%)
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub win_rate: Percentage,
    /// 총 거래 수
    pub total_trades: u64,
    /// 프로핏 팩터
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub profit_factor: Decimal,
    /// 기간별 자본 (시간순)
    #[serde(default, serialize_with = "serialize_float_seq")]
    pub equity_curve: Vec<Price>,
    /// 거래 내역 (시간순)
    #[serde(default)]
    pub trades: Vec<Trade>,
    /// 최적화 제안
    #[serde(default)]
    pub optimization_suggestions: Vec<Suggestion>,
}

/// 포지션 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// 매수 포지션
    Long,
    /// 매도 포지션
    Short,
}

impl Position {
    /// 표시용 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Long => "long",
            Position::Short => "short",
        }
    }
}

/// 개별 거래 기록.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// 진입일 (엔진이 보낸 문자열 그대로)
    pub entry_date: String,
    /// 청산일
    pub exit_date: String,
    /// 진입 가격
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub entry_price: Price,
    /// 청산 가격
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub exit_price: Price,
    /// 포지션 방향
    pub position: Position,
    /// 손익
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub pnl: Decimal,
    /// 손익률 (%)
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub pnl_pct: Percentage,
}

/// 최적화 제안.
///
/// `priority`는 보통 critical/high/medium/low 중 하나지만
/// 엔진이 다른 값을 보내도 그대로 보관합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// 제안 분류 (자유 형식)
    #[serde(rename = "type")]
    pub kind: String,
    /// 우선순위
    pub priority: String,
    /// 제목
    pub title: String,
    /// 설명
    pub description: String,
    /// 권장 조치
    pub recommendation: String,
}

fn serialize_float_seq<S>(values: &[Decimal], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(values.iter().map(|v| v.to_f64().unwrap_or_default()))
}
