//! 결과 페이로드 → 화면 데이터 변환.
//!
//! 모든 함수는 순수 함수입니다. 같은 결과에 대해 항상 같은 출력을 만들고
//! 값을 다시 계산하지 않습니다.

pub mod equity;
pub mod metrics;
pub mod suggestions;
pub mod trades;

pub use equity::{to_equity_series, EquityPoint, EquitySeries, EquitySummary, EQUITY_X_LABEL};
pub use metrics::{format_drawdown, to_metric_cards, MetricCard, MetricKind, Tone};
pub use suggestions::{severity_for, to_suggestion_views, Severity, SuggestionView};
pub use trades::{
    to_trade_table_view, to_trade_table_view_with_limit, PositionBadge, TradeRow, TradeTableView,
    TRADE_TABLE_LIMIT,
};

use guru_core::BacktestResult;
use serde::Serialize;

/// 결과 화면 전체 데이터.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub cards: Vec<MetricCard>,
    pub equity: EquitySeries,
    pub trades: TradeTableView,
    pub suggestions: Vec<SuggestionView>,
}

impl ResultsView {
    /// 결과에서 화면 데이터를 만듭니다.
    pub fn from_result(result: &BacktestResult) -> Self {
        Self {
            cards: to_metric_cards(result),
            equity: to_equity_series(result),
            trades: to_trade_table_view(result),
            suggestions: to_suggestion_views(result),
        }
    }
}
