//! 결과 리포트 터미널 렌더링.
//!
//! 표시 값은 모두 [`ResultsView`]가 만든 문자열을 그대로 사용합니다.

use std::fmt::Write;

use guru_client::presentation::{EquitySeries, Severity, SuggestionView, Tone, TradeTableView};
use guru_client::ResultsView;
use guru_core::{format_currency, MarketType};

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Gain => "▲",
        Tone::Loss => "▼",
        Tone::Neutral => " ",
    }
}

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "🔴",
        Severity::Warning => "🟠",
        Severity::Info => "🔵",
        Severity::Success => "🟢",
        Severity::Neutral => "⚪",
    }
}

/// 결과 리포트 전체.
pub fn render_results(view: &ResultsView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n📊 백테스트 결과");
    let _ = writeln!(out, "{}", RULE);
    for card in &view.cards {
        let _ = writeln!(
            out,
            "  {} {:<12} {:>14}",
            tone_marker(card.tone),
            card.label,
            card.value
        );
    }

    out.push_str(&render_equity(&view.equity));
    out.push_str(&render_trades(&view.trades));
    out.push_str(&render_suggestions(&view.suggestions));
    out
}

/// 자산 곡선 요약.
pub fn render_equity(series: &EquitySeries) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n📈 자산 곡선 ({} {}개, {})",
        series.x_label,
        series.points.len(),
        series.y_label
    );
    let _ = writeln!(out, "{}", THIN_RULE);

    match series.summary() {
        Some(summary) => {
            let _ = writeln!(out, "  시작: {}", format_currency(&summary.first));
            let _ = writeln!(out, "  종료: {}", format_currency(&summary.last));
            let _ = writeln!(out, "  최저: {}", format_currency(&summary.min));
            let _ = writeln!(out, "  최고: {}", format_currency(&summary.max));
        }
        None => {
            let _ = writeln!(out, "  (데이터 없음)");
        }
    }
    out
}

/// 거래 내역 테이블.
pub fn render_trades(table: &TradeTableView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n📋 {}", table.title());
    let _ = writeln!(out, "{}", THIN_RULE);

    if table.rows.is_empty() {
        let _ = writeln!(out, "  (거래 없음)");
        return out;
    }

    let _ = writeln!(
        out,
        "  {:<10} {:<10} {:<5} {:>14} {:>14} {:>13} {:>9}",
        "진입일", "청산일", "방향", "진입가", "청산가", "손익", "손익률"
    );
    for row in &table.rows {
        let _ = writeln!(
            out,
            "  {:<10} {:<10} {:<5} {:>14} {:>14} {:>13} {:>9} {}",
            row.entry_date,
            row.exit_date,
            row.position.text(),
            row.entry_price,
            row.exit_price,
            row.pnl,
            row.pnl_pct,
            tone_marker(row.pnl_tone)
        );
    }

    if let Some(footer) = table.footer() {
        let _ = writeln!(out, "  … {}", footer);
    }
    out
}

/// 최적화 제안 목록.
pub fn render_suggestions(suggestions: &[SuggestionView]) -> String {
    let mut out = String::new();
    if suggestions.is_empty() {
        return out;
    }

    let _ = writeln!(out, "\n💡 최적화 제안");
    let _ = writeln!(out, "{}", THIN_RULE);
    for view in suggestions {
        let s = &view.suggestion;
        let _ = writeln!(
            out,
            "  {} [{}] {} ({})",
            severity_marker(view.severity),
            s.priority,
            s.title,
            s.kind
        );
        let _ = writeln!(out, "     {}", s.description);
        let _ = writeln!(out, "     → {}", s.recommendation);
    }
    out
}

/// 종목 목록.
pub fn render_symbols(market_type: MarketType, symbols: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n📋 {} 종목 목록 ({}개)", market_type, symbols.len());
    let _ = writeln!(out, "{}", THIN_RULE);
    for symbol in symbols {
        let _ = writeln!(out, "  {}", symbol);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use guru_core::{BacktestResult, Position, Suggestion, Trade};
    use rust_decimal_macros::dec;

    fn result(trades: usize) -> BacktestResult {
        BacktestResult {
            total_return: dec!(-3.456),
            sharpe_ratio: dec!(0.5),
            max_drawdown: dec!(12.34),
            win_rate: dec!(40),
            total_trades: trades as u64,
            profit_factor: dec!(0.9),
            equity_curve: vec![dec!(10000), dec!(10500), dec!(9800)],
            trades: (0..trades)
                .map(|_| Trade {
                    entry_date: "2024-01-02".to_string(),
                    exit_date: "2024-01-09".to_string(),
                    entry_price: dec!(1.085),
                    exit_price: dec!(1.0801),
                    position: Position::Short,
                    pnl: dec!(49),
                    pnl_pct: dec!(0.45),
                })
                .collect(),
            optimization_suggestions: vec![Suggestion {
                kind: "risk".to_string(),
                priority: "urgent".to_string(),
                title: "Réduire le levier".to_string(),
                description: "Drawdown élevé".to_string(),
                recommendation: "Limiter la taille des positions".to_string(),
            }],
        }
    }

    #[test]
    fn test_render_results_sections() {
        let text = render_results(&ResultsView::from_result(&result(73)));

        assert!(text.contains("총 수익률"));
        assert!(text.contains("-3.46%"));
        assert!(text.contains("-12.34%"));
        assert!(text.contains("최저: $9,800.00"));
        assert!(text.contains("거래 내역 (73)"));
        assert!(text.contains("전체 73건 중 처음 50건 표시"));
        assert!(text.contains("⚪ [urgent] Réduire le levier"));
        assert_eq!(text.matches("SHORT").count(), 50);
    }

    #[test]
    fn test_render_empty_sections() {
        let mut empty = result(0);
        empty.equity_curve.clear();
        empty.optimization_suggestions.clear();
        let view = ResultsView::from_result(&empty);

        assert!(render_trades(&view.trades).contains("(거래 없음)"));
        assert!(render_equity(&view.equity).contains("(데이터 없음)"));
        assert!(render_suggestions(&view.suggestions).is_empty());
    }

    #[test]
    fn test_render_symbols() {
        let text = render_symbols(
            MarketType::Forex,
            &["EUR/USD".to_string(), "GBP/USD".to_string()],
        );
        assert!(text.contains("forex 종목 목록 (2개)"));
        assert!(text.contains("  GBP/USD"));
    }
}
