//! 거래 내역 테이블.
//!
//! 앞에서부터 최대 [`TRADE_TABLE_LIMIT`]건만 표시하고, 나머지는 푸터로 알립니다.

use guru_core::{format_currency, format_percent, BacktestResult, Position, Trade};
use serde::Serialize;

use super::metrics::Tone;

/// 표시할 최대 거래 수.
pub const TRADE_TABLE_LIMIT: usize = 50;

/// 포지션 배지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionBadge {
    pub position: Position,
    pub tone: Tone,
}

impl From<Position> for PositionBadge {
    fn from(position: Position) -> Self {
        let tone = match position {
            Position::Long => Tone::Gain,
            Position::Short => Tone::Loss,
        };
        Self { position, tone }
    }
}

impl PositionBadge {
    /// 배지 텍스트 (`LONG` / `SHORT`).
    pub fn text(&self) -> String {
        self.position.as_str().to_uppercase()
    }
}

/// 테이블 한 행. 숫자는 모두 포맷된 문자열입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeRow {
    pub entry_date: String,
    pub exit_date: String,
    pub position: PositionBadge,
    pub entry_price: String,
    pub exit_price: String,
    pub pnl: String,
    pub pnl_pct: String,
    pub pnl_tone: Tone,
}

impl From<&Trade> for TradeRow {
    fn from(trade: &Trade) -> Self {
        Self {
            entry_date: trade.entry_date.clone(),
            exit_date: trade.exit_date.clone(),
            position: trade.position.into(),
            entry_price: format_currency(&trade.entry_price),
            exit_price: format_currency(&trade.exit_price),
            pnl: format_currency(&trade.pnl),
            pnl_pct: format_percent(&trade.pnl_pct),
            pnl_tone: Tone::from_sign(&trade.pnl),
        }
    }
}

/// 거래 테이블.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeTableView {
    pub rows: Vec<TradeRow>,
    /// 전체 거래 수
    pub total: usize,
}

impl TradeTableView {
    /// 테이블 제목 (`거래 내역 (73)`).
    pub fn title(&self) -> String {
        format!("거래 내역 ({})", self.total)
    }

    /// 표시되지 않은 거래 수.
    pub fn omitted(&self) -> usize {
        self.total - self.rows.len()
    }

    /// 잘린 경우의 푸터 (`전체 73건 중 처음 50건 표시`).
    pub fn footer(&self) -> Option<String> {
        (self.omitted() > 0).then(|| {
            format!(
                "전체 {}건 중 처음 {}건 표시",
                self.total,
                self.rows.len()
            )
        })
    }
}

/// 기본 한도로 거래 테이블을 만듭니다.
pub fn to_trade_table_view(result: &BacktestResult) -> TradeTableView {
    to_trade_table_view_with_limit(result, TRADE_TABLE_LIMIT)
}

/// 지정한 한도로 거래 테이블을 만듭니다. 순서는 유지됩니다.
pub fn to_trade_table_view_with_limit(result: &BacktestResult, limit: usize) -> TradeTableView {
    TradeTableView {
        rows: result.trades.iter().take(limit).map(TradeRow::from).collect(),
        total: result.trades.len(),
    }
}
