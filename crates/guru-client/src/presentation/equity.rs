//! 자산 곡선 차트 시리즈.
//!
//! X축은 기간 인덱스("day"), Y축은 통화 단위 자본입니다.
//! 인덱스는 실제 날짜가 아니라 곡선에서의 위치입니다.

use guru_core::{format_currency, BacktestResult, Price, CURRENCY_SYMBOL};
use serde::Serialize;

/// X축 레이블.
pub const EQUITY_X_LABEL: &str = "day";

/// 차트 포인트.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EquityPoint {
    /// 기간 인덱스 (0부터)
    pub index: usize,
    /// 자본
    pub equity: Price,
}

/// 요약 통계 (텍스트 렌더링용).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EquitySummary {
    pub first: Price,
    pub last: Price,
    pub min: Price,
    pub max: Price,
}

/// 자산 곡선 시리즈.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquitySeries {
    pub x_label: &'static str,
    pub y_label: String,
    pub points: Vec<EquityPoint>,
}

impl EquitySeries {
    /// `(index, equity)` 쌍.
    pub fn pairs(&self) -> Vec<(usize, Price)> {
        self.points.iter().map(|p| (p.index, p.equity)).collect()
    }

    /// 빈 곡선인지 확인.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 툴팁 문자열 (`day 3: $10,500.00`).
    pub fn tooltip(point: &EquityPoint) -> String {
        format!(
            "{} {}: {}",
            EQUITY_X_LABEL,
            point.index,
            format_currency(&point.equity)
        )
    }

    /// 첫 값, 마지막 값, 최소, 최대. 빈 곡선이면 `None`.
    pub fn summary(&self) -> Option<EquitySummary> {
        let first = self.points.first()?.equity;
        let last = self.points.last()?.equity;

        let (min, max) = self
            .points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(p.equity), max.max(p.equity)));

        Some(EquitySummary {
            first,
            last,
            min,
            max,
        })
    }
}

/// `equity_curve[i]` → `(i, equity_curve[i])`, 순서 유지.
pub fn to_equity_series(result: &BacktestResult) -> EquitySeries {
    let points = result
        .equity_curve
        .iter()
        .enumerate()
        .map(|(index, &equity)| EquityPoint { index, equity })
        .collect();

    EquitySeries {
        x_label: EQUITY_X_LABEL,
        y_label: format!("자본 ({})", CURRENCY_SYMBOL),
        points,
    }
}
