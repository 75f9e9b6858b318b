//! 최적화 제안 목록.

use guru_core::{BacktestResult, Suggestion};
use serde::Serialize;

/// 제안 카드의 표시 심각도.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Success,
    /// 알 수 없는 우선순위
    Neutral,
}

/// 우선순위 → 심각도.
///
/// 정확히 일치하는 값만 인식하고 나머지는 모두 [`Severity::Neutral`]입니다.
pub fn severity_for(priority: &str) -> Severity {
    match priority {
        "critical" => Severity::Error,
        "high" => Severity::Warning,
        "medium" => Severity::Info,
        "low" => Severity::Success,
        _ => Severity::Neutral,
    }
}

/// 제안과 심각도.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionView {
    pub severity: Severity,
    pub suggestion: Suggestion,
}

impl From<&Suggestion> for SuggestionView {
    fn from(suggestion: &Suggestion) -> Self {
        Self {
            severity: severity_for(&suggestion.priority),
            suggestion: suggestion.clone(),
        }
    }
}

/// 모든 제안을 받은 순서대로 변환합니다.
pub fn to_suggestion_views(result: &BacktestResult) -> Vec<SuggestionView> {
    result
        .optimization_suggestions
        .iter()
        .map(SuggestionView::from)
        .collect()
}
