//! 세션 상태 컨테이너.
//!
//! 종목 목록, 입력 초안, 제출 상태, 화면 라우터를 하나로 묶습니다.
//! 모든 전이는 `&mut self`를 통해 일어나므로 한 번에 하나의 이벤트만 처리됩니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! let api = Arc::new(HttpBacktestApi::from_config(&config.api)?);
//! let mut session = Session::new(api, RequestDraft::for_today());
//! session.start().await;
//!
//! session.draft_mut().strategy_description = "SMA 20/50 크로스".into();
//! session.submit().await?;
//!
//! if let Some(view) = session.results_view() {
//!     println!("{}", view.trades.title());
//! }
//! ```
//!
//! 이벤트 루프에서 `Submitting` 상태를 그려야 하면 [`Session::prepare_submission`]과
//! [`Session::complete_submission`]으로 나눠서 호출합니다.

use std::sync::Arc;

use guru_core::{BacktestRequest, BacktestResult, InputMethod, MarketType};
use tracing::{debug, warn};

use crate::api::BacktestApi;
use crate::builder::RequestDraft;
use crate::error::{ClientResult, SessionError};
use crate::presentation::ResultsView;
use crate::router::{View, ViewRouter};
use crate::submission::{SubmissionController, SubmissionState, SubmissionTicket};
use crate::symbols::{DirectoryUpdate, SymbolDirectory};

/// 발송 대기 중인 제출.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    /// 완료 시 돌려줄 티켓
    pub ticket: SubmissionTicket,
    /// 보낼 요청
    pub request: BacktestRequest,
}

/// 백테스트 클라이언트 세션.
pub struct Session {
    api: Arc<dyn BacktestApi>,
    draft: RequestDraft,
    directory: SymbolDirectory,
    submission: SubmissionController,
    router: ViewRouter,
}

impl Session {
    /// 새 세션. 종목 목록은 [`Session::start`]에서 불러옵니다.
    pub fn new(api: Arc<dyn BacktestApi>, draft: RequestDraft) -> Self {
        Self {
            api,
            draft,
            directory: SymbolDirectory::new(),
            submission: SubmissionController::new(),
            router: ViewRouter::new(),
        }
    }

    /// 세션 시작: 현재 시장 유형의 종목 목록을 불러옵니다.
    pub async fn start(&mut self) -> DirectoryUpdate {
        self.reload_symbols().await
    }

    /// 현재 시장 유형의 종목 목록을 다시 불러옵니다.
    pub async fn reload_symbols(&mut self) -> DirectoryUpdate {
        let market_type = self.draft.market_type;
        let outcome = self.api.fetch_symbols(market_type).await;
        self.apply_symbols(market_type, outcome)
    }

    /// 시장 유형을 바꾸고 종목 목록을 다시 불러옵니다.
    pub async fn set_market_type(&mut self, market_type: MarketType) -> DirectoryUpdate {
        if self.draft.market_type != market_type {
            debug!(from = %self.draft.market_type, to = %market_type, "Market type changed");
        }
        self.draft.market_type = market_type;
        self.reload_symbols().await
    }

    /// 종목 목록 응답을 반영합니다.
    ///
    /// 응답을 기다리는 동안 시장 유형이 바뀌었다면 응답을 버립니다.
    pub fn apply_symbols(
        &mut self,
        loaded_for: MarketType,
        outcome: ClientResult<Vec<String>>,
    ) -> DirectoryUpdate {
        let update = self.directory.apply_outcome(
            loaded_for,
            self.draft.market_type,
            outcome,
            self.draft.symbol.as_deref(),
        );

        if let DirectoryUpdate::Replaced { selection } = &update {
            self.draft.symbol = selection.clone();
        }
        update
    }

    /// 입력 방식 탭 전환. 다른 필드는 그대로입니다.
    pub fn set_method(&mut self, method: InputMethod) {
        self.draft.method = method;
    }

    pub fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut RequestDraft {
        &mut self.draft
    }

    pub fn directory(&self) -> &SymbolDirectory {
        &self.directory
    }

    pub fn submission_state(&self) -> &SubmissionState {
        self.submission.state()
    }

    /// 제출 트리거 활성 여부.
    pub fn can_submit(&self) -> bool {
        self.submission.state().can_submit()
    }

    /// 입력 화면에 표시할 에러 메시지.
    pub fn error_message(&self) -> Option<&str> {
        self.submission.state().error()
    }

    pub fn view(&self) -> View {
        self.router.view()
    }

    pub fn results_enabled(&self) -> bool {
        self.router.results_enabled()
    }

    /// 화면 전환. 결과가 없으면 결과 화면을 열 수 없습니다.
    pub fn select_view(&mut self, view: View) -> Result<(), SessionError> {
        self.router.select(view)
    }

    /// 마지막으로 받은 결과.
    pub fn result(&self) -> Option<&Arc<BacktestResult>> {
        self.router.result()
    }

    /// 결과 화면 데이터.
    pub fn results_view(&self) -> Option<ResultsView> {
        self.router
            .result()
            .map(|result| ResultsView::from_result(result))
    }

    /// 요청을 만들고 `Submitting` 상태로 들어갑니다.
    ///
    /// 검증에 실패하면 네트워크 호출 없이 에러 메시지만 기록합니다.
    pub fn prepare_submission(&mut self) -> Result<PendingSubmission, SessionError> {
        if !self.can_submit() {
            return Err(SessionError::SubmissionInFlight);
        }

        let request = self.build_request()?;
        let ticket = self.submission.begin()?;
        Ok(PendingSubmission { ticket, request })
    }

    /// 응답을 반영합니다. 성공하면 결과 화면으로 전환합니다.
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: ClientResult<BacktestResult>,
    ) -> &SubmissionState {
        if let Some(result) = self.submission.finish(ticket, outcome) {
            self.router.on_submission_succeeded(result);
        }
        self.submission.state()
    }

    /// 검증, 발송, 응답 반영을 한 번에 수행합니다.
    pub async fn submit(&mut self) -> Result<&SubmissionState, SessionError> {
        if !self.can_submit() {
            return Err(SessionError::SubmissionInFlight);
        }

        let request = self.build_request()?;
        let api = Arc::clone(&self.api);

        if let Some(result) = self.submission.submit(api.as_ref(), &request).await? {
            self.router.on_submission_succeeded(result);
        }
        Ok(self.submission.state())
    }

    fn build_request(&mut self) -> Result<BacktestRequest, SessionError> {
        self.draft.build(&self.directory).map_err(|err| {
            warn!(error = %err, "Backtest request rejected before submission");
            self.submission.reject_invalid(&err);
            SessionError::from(err)
        })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("draft", &self.draft)
            .field("directory", &self.directory)
            .field("submission", &self.submission)
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}
