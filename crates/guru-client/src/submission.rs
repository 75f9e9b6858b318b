//! 백테스트 요청 수명주기 (Submission Controller).
//!
//! 상태 전이:
//!
//! ```text
//! Idle ──Started──▶ Submitting ──Completed──▶ Succeeded
//!   ▲                   │
//!   │                   └──Rejected──▶ Failed
//!   └──(다음 Started)───────────────────────┘
//! ```
//!
//! 한 번에 하나의 요청만 진행됩니다. `Submitting` 동안에는 새 제출이 거부됩니다.
//! 새 제출을 시작하면 이전 에러 메시지는 지워지지만, 이전 결과는
//! [`crate::router::ViewRouter`]가 계속 보관합니다.

use std::sync::Arc;

use guru_core::{submission_span, BacktestRequest, BacktestResult};
use tracing::{error, info, Instrument};
use uuid::Uuid;

use crate::api::BacktestApi;
use crate::error::{ClientError, ClientResult, SessionError, ValidationError};

/// 서버가 `detail`을 보내지 않았을 때의 사용자 메시지.
pub const GENERIC_FAILURE_MESSAGE: &str = "백테스트 실행 중 오류가 발생했습니다";

/// 제출 상태.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    /// 대기
    #[default]
    Idle,
    /// 요청 진행 중
    Submitting,
    /// 마지막 요청 성공
    Succeeded(Arc<BacktestResult>),
    /// 마지막 요청 실패 (사용자 메시지)
    Failed(String),
}

/// 상태 전이 이벤트.
#[derive(Debug, Clone)]
pub enum SubmissionEvent {
    /// 요청 발송
    Started,
    /// 네트워크 호출 전 검증 실패
    Invalid(String),
    /// 응답 수신 (성공)
    Completed(Arc<BacktestResult>),
    /// 응답 수신 (실패)
    Rejected(String),
}

impl SubmissionState {
    /// 이벤트를 적용한 다음 상태를 반환합니다.
    ///
    /// 진행 중이 아닐 때 도착한 응답과 진행 중에 발생한 검증 실패는 무시합니다.
    pub fn apply(&self, event: SubmissionEvent) -> SubmissionState {
        match (self, event) {
            (_, SubmissionEvent::Started) => SubmissionState::Submitting,
            (SubmissionState::Submitting, SubmissionEvent::Completed(result)) => {
                SubmissionState::Succeeded(result)
            }
            (SubmissionState::Submitting, SubmissionEvent::Rejected(message)) => {
                SubmissionState::Failed(message)
            }
            (SubmissionState::Submitting, SubmissionEvent::Invalid(_)) => {
                SubmissionState::Submitting
            }
            (_, SubmissionEvent::Invalid(message)) => SubmissionState::Failed(message),
            (state, _) => state.clone(),
        }
    }

    /// 요청이 진행 중인지 확인.
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// 제출 트리거가 활성 상태인지 확인.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    /// 표시할 에러 메시지.
    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// 마지막 성공 결과.
    pub fn result(&self) -> Option<&Arc<BacktestResult>> {
        match self {
            SubmissionState::Succeeded(result) => Some(result),
            _ => None,
        }
    }
}

/// 진행 중인 제출 식별자.
///
/// [`SubmissionController::begin`]에서 발급되며, 같은 티켓으로만 완료할 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    id: Uuid,
}

impl SubmissionTicket {
    /// 제출 ID (로그 상관관계용).
    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// 사용자에게 보여줄 실패 메시지. 서버 `detail`이 없으면 일반 메시지.
pub fn failure_message(err: &ClientError) -> String {
    err.server_detail()
        .unwrap_or(GENERIC_FAILURE_MESSAGE)
        .to_string()
}

/// 제출 상태 머신.
#[derive(Debug, Default)]
pub struct SubmissionController {
    state: SubmissionState,
    in_flight: Option<Uuid>,
}

impl SubmissionController {
    /// 대기 상태로 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 상태.
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    fn transition(&mut self, event: SubmissionEvent) {
        self.state = self.state.apply(event);
    }

    /// 새 제출을 시작합니다. 이전 에러는 지워집니다.
    pub fn begin(&mut self) -> Result<SubmissionTicket, SessionError> {
        if self.state.is_submitting() {
            return Err(SessionError::SubmissionInFlight);
        }

        let id = Uuid::new_v4();
        self.in_flight = Some(id);
        self.transition(SubmissionEvent::Started);
        Ok(SubmissionTicket { id })
    }

    /// 네트워크 호출 없이 검증 실패를 기록합니다.
    pub fn reject_invalid(&mut self, error: &ValidationError) {
        self.transition(SubmissionEvent::Invalid(error.to_string()));
    }

    /// 요청 결과를 반영합니다.
    ///
    /// 성공 시 결과를 반환합니다. 진행 중인 티켓이 아니면 아무것도 바꾸지 않습니다.
    pub fn finish(
        &mut self,
        ticket: SubmissionTicket,
        outcome: ClientResult<BacktestResult>,
    ) -> Option<Arc<BacktestResult>> {
        if self.in_flight != Some(ticket.id) {
            info!(submission_id = %ticket.id, "Ignoring response for inactive submission");
            return None;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                let result = Arc::new(result);
                info!(
                    submission_id = %ticket.id,
                    total_trades = result.total_trades,
                    "Backtest completed"
                );
                self.transition(SubmissionEvent::Completed(Arc::clone(&result)));
                Some(result)
            }
            Err(err) => {
                error!(submission_id = %ticket.id, error = %err, "Backtest request failed");
                self.transition(SubmissionEvent::Rejected(failure_message(&err)));
                None
            }
        }
    }

    /// 요청을 발송하고 응답을 기다려 반영합니다.
    pub async fn submit(
        &mut self,
        api: &dyn BacktestApi,
        request: &BacktestRequest,
    ) -> Result<Option<Arc<BacktestResult>>, SessionError> {
        let ticket = self.begin()?;
        let span = submission_span!(ticket.id(), request.method(), request.params().symbol);

        let outcome = async {
            info!("Submitting backtest");
            api.run_backtest(request).await
        }
        .instrument(span)
        .await;

        Ok(self.finish(ticket, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn result() -> BacktestResult {
        BacktestResult {
            total_return: Decimal::ONE,
            sharpe_ratio: Decimal::ONE,
            max_drawdown: Decimal::ONE,
            win_rate: Decimal::ONE,
            total_trades: 1,
            profit_factor: Decimal::ONE,
            equity_curve: Vec::new(),
            trades: Vec::new(),
            optimization_suggestions: Vec::new(),
        }
    }

    #[test]
    fn test_reducer_transitions() {
        let idle = SubmissionState::Idle;
        let submitting = idle.apply(SubmissionEvent::Started);
        assert!(submitting.is_submitting());
        assert!(!submitting.can_submit());

        let succeeded = submitting.apply(SubmissionEvent::Completed(Arc::new(result())));
        assert!(succeeded.result().is_some());

        let failed = SubmissionState::Submitting.apply(SubmissionEvent::Rejected("boom".into()));
        assert_eq!(failed.error(), Some("boom"));

        // 새 제출은 에러를 지움
        assert_eq!(failed.apply(SubmissionEvent::Started), SubmissionState::Submitting);
    }

    #[test]
    fn test_reducer_ignores_stray_events() {
        assert_eq!(
            SubmissionState::Idle.apply(SubmissionEvent::Rejected("late".into())),
            SubmissionState::Idle
        );
        assert_eq!(
            SubmissionState::Submitting.apply(SubmissionEvent::Invalid("x".into())),
            SubmissionState::Submitting
        );
        assert_eq!(
            SubmissionState::Idle.apply(SubmissionEvent::Invalid("x".into())),
            SubmissionState::Failed("x".into())
        );
    }

    #[test]
    fn test_begin_rejects_while_in_flight() {
        let mut controller = SubmissionController::new();
        let _ticket = controller.begin().unwrap();

        assert_eq!(controller.begin(), Err(SessionError::SubmissionInFlight));
    }

    #[test]
    fn test_finish_with_detail_and_fallback() {
        let mut controller = SubmissionController::new();

        let ticket = controller.begin().unwrap();
        controller.finish(
            ticket,
            Err(ClientError::Api {
                status: 400,
                detail: Some("Symbole inconnu".to_string()),
            }),
        );
        assert_eq!(controller.state().error(), Some("Symbole inconnu"));

        let ticket = controller.begin().unwrap();
        assert_eq!(controller.state().error(), None);
        controller.finish(ticket, Err(ClientError::Network("refused".into())));
        assert_eq!(controller.state().error(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn test_finish_ignores_unknown_ticket() {
        let mut controller = SubmissionController::new();
        let stale = controller.begin().unwrap();
        controller.finish(stale, Err(ClientError::Network("x".into())));

        let current = controller.begin().unwrap();
        assert!(controller.finish(stale, Ok(result())).is_none());
        assert!(controller.state().is_submitting());

        assert!(controller.finish(current, Ok(result())).is_some());
        assert!(controller.state().result().is_some());
    }

    #[test]
    fn test_reject_invalid_sets_message() {
        let mut controller = SubmissionController::new();
        controller.reject_invalid(&ValidationError::MissingScript);

        assert_eq!(
            controller.state().error(),
            Some("로봇 스크립트 파일을 선택하세요")
        );
    }
}
