//! 입력/결과 화면 전환 (View Router).
//!
//! 결과 화면으로의 자동 전환은 제출이 성공했을 때만 일어납니다.
//! 결과 화면은 세션에서 첫 결과를 받은 뒤부터 계속 열 수 있습니다.

use std::fmt;
use std::sync::Arc;

use guru_core::BacktestResult;
use tracing::debug;

use crate::error::SessionError;

/// 화면.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// 입력 화면
    #[default]
    Input,
    /// 결과 화면
    Results,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Input => write!(f, "input"),
            View::Results => write!(f, "results"),
        }
    }
}

/// 현재 화면과 마지막 결과.
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    view: View,
    result: Option<Arc<BacktestResult>>,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 화면.
    pub fn view(&self) -> View {
        self.view
    }

    /// 결과 화면을 열 수 있는지 확인.
    pub fn results_enabled(&self) -> bool {
        self.result.is_some()
    }

    /// 표시 중인 결과.
    pub fn result(&self) -> Option<&Arc<BacktestResult>> {
        self.result.as_ref()
    }

    /// 제출 성공. 결과를 통째로 교체하고 결과 화면으로 전환합니다.
    pub fn on_submission_succeeded(&mut self, result: Arc<BacktestResult>) {
        self.result = Some(result);
        self.view = View::Results;
        debug!(view = %self.view, "Switched to results view");
    }

    /// 사용자가 화면을 선택합니다.
    pub fn select(&mut self, view: View) -> Result<(), SessionError> {
        if view == View::Results && !self.results_enabled() {
            return Err(SessionError::ResultsUnavailable);
        }
        self.view = view;
        Ok(())
    }
}
