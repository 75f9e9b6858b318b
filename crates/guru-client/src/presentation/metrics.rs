//! 지표 카드.
//!
//! 여섯 개의 카드를 고정 순서로 만듭니다. 값은 엔진이 보낸 그대로 포맷만 합니다.

use guru_core::{format_decimal, format_percent, BacktestResult, DecimalExt};
use rust_decimal::Decimal;
use serde::Serialize;

/// 값의 색조.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// 이익 (녹색)
    Gain,
    /// 손실 (빨간색)
    Loss,
    /// 중립
    Neutral,
}

impl Tone {
    /// 0 이상이면 이익, 음수면 손실.
    pub fn from_sign(value: &Decimal) -> Self {
        if value.is_non_negative() {
            Tone::Gain
        } else {
            Tone::Loss
        }
    }
}

/// 지표 종류 (표시 순서).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    TotalReturn,
    SharpeRatio,
    MaxDrawdown,
    WinRate,
    TotalTrades,
    ProfitFactor,
}

impl MetricKind {
    /// 카드 순서.
    pub const ALL: [MetricKind; 6] = [
        MetricKind::TotalReturn,
        MetricKind::SharpeRatio,
        MetricKind::MaxDrawdown,
        MetricKind::WinRate,
        MetricKind::TotalTrades,
        MetricKind::ProfitFactor,
    ];

    /// 카드 제목.
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::TotalReturn => "총 수익률",
            MetricKind::SharpeRatio => "샤프 비율",
            MetricKind::MaxDrawdown => "최대 낙폭",
            MetricKind::WinRate => "승률",
            MetricKind::TotalTrades => "총 거래",
            MetricKind::ProfitFactor => "프로핏 팩터",
        }
    }
}

/// 지표 카드 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub kind: MetricKind,
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
}

impl MetricCard {
    fn new(kind: MetricKind, value: String, tone: Tone) -> Self {
        Self {
            kind,
            label: kind.label(),
            value,
            tone,
        }
    }
}

/// 최대 낙폭은 크기로 오므로 음수 퍼센트로 표시합니다 (`12.34` → `-12.34%`).
///
/// 손실 지표이므로 0도 `-0.00%`로 표시합니다.
pub fn format_drawdown(value: &Decimal) -> String {
    format!("-{}%", format_decimal(&value.abs(), 2))
}

/// 결과에서 지표 카드 여섯 개를 만듭니다.
pub fn to_metric_cards(result: &BacktestResult) -> Vec<MetricCard> {
    MetricKind::ALL
        .iter()
        .map(|&kind| match kind {
            MetricKind::TotalReturn => MetricCard::new(
                kind,
                format_percent(&result.total_return),
                Tone::from_sign(&result.total_return),
            ),
            MetricKind::SharpeRatio => {
                MetricCard::new(kind, format_decimal(&result.sharpe_ratio, 2), Tone::Neutral)
            }
            MetricKind::MaxDrawdown => {
                MetricCard::new(kind, format_drawdown(&result.max_drawdown), Tone::Loss)
            }
            MetricKind::WinRate => {
                MetricCard::new(kind, format_percent(&result.win_rate), Tone::Neutral)
            }
            MetricKind::TotalTrades => {
                MetricCard::new(kind, result.total_trades.to_string(), Tone::Neutral)
            }
            MetricKind::ProfitFactor => {
                MetricCard::new(kind, format_decimal(&result.profit_factor, 2), Tone::Neutral)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn result(total_return: Decimal, max_drawdown: Decimal) -> BacktestResult {
        BacktestResult {
            total_return,
            sharpe_ratio: dec!(1.234),
            max_drawdown,
            win_rate: dec!(55),
            total_trades: 42,
            profit_factor: dec!(1.755),
            equity_curve: Vec::new(),
            trades: Vec::new(),
            optimization_suggestions: Vec::new(),
        }
    }

    #[test]
    fn test_card_order_and_values() {
        let cards = to_metric_cards(&result(dec!(2.0), dec!(12.34)));

        let kinds: Vec<_> = cards.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, MetricKind::ALL.to_vec());

        let values: Vec<_> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(
            values,
            vec!["+2.00%", "1.23", "-12.34%", "+55.00%", "42", "1.76"]
        );
        assert_eq!(cards[0].tone, Tone::Gain);
        assert_eq!(cards[2].tone, Tone::Loss);
        assert_eq!(cards[3].tone, Tone::Neutral);
    }

    #[test]
    fn test_negative_total_return_is_loss() {
        let cards = to_metric_cards(&result(dec!(-3.456), dec!(0)));

        assert_eq!(cards[0].value, "-3.46%");
        assert_eq!(cards[0].tone, Tone::Loss);
        assert_eq!(cards[0].label, "총 수익률");
    }

    #[test]
    fn test_format_drawdown() {
        assert_eq!(format_drawdown(&dec!(12.34)), "-12.34%");
        assert_eq!(format_drawdown(&dec!(-5)), "-5.00%");
        assert_eq!(format_drawdown(&dec!(0)), "-0.00%");
        assert_eq!(format_drawdown(&dec!(0.001)), "-0.00%");
    }
}
