//! # Guru Client
//!
//! 백테스트 서버와 통신하고 결과를 화면용 데이터로 변환합니다.
//!
//! 구성 요소 (의존 순서):
//! - [`symbols`] - 시장 유형별 종목 목록 로더
//! - [`builder`] - 입력 필드로부터 요청 생성 및 검증
//! - [`submission`] - 요청 수명주기 (Idle → Submitting → Succeeded/Failed)
//! - [`presentation`] - 결과 페이로드 → 지표 카드, 차트 시리즈, 거래 테이블, 제안
//! - [`router`] - 입력/결과 화면 전환
//! - [`session`] - 위 구성 요소를 묶는 상태 컨테이너
//!
//! 서버와의 통신은 [`api::BacktestApi`] trait 뒤에 있습니다.

pub mod api;
pub mod builder;
pub mod error;
pub mod presentation;
pub mod router;
pub mod session;
pub mod submission;
pub mod symbols;

pub use api::{BacktestApi, HttpBacktestApi};
pub use builder::{default_date_range, RequestDraft, DEFAULT_INITIAL_CAPITAL};
pub use error::{ClientError, ClientResult, SessionError, ValidationError};
pub use presentation::ResultsView;
pub use router::{View, ViewRouter};
pub use session::{PendingSubmission, Session};
pub use submission::{
    failure_message, SubmissionController, SubmissionEvent, SubmissionState, SubmissionTicket,
    GENERIC_FAILURE_MESSAGE,
};
pub use symbols::{DirectoryUpdate, SymbolDirectory};
