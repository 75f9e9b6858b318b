//! # Guru Core
//!
//! 백테스트 클라이언트의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 백테스트 요청 (전략 설명 / 스크립트 업로드)
//! - 백테스트 결과 페이로드 (지표, 자산 곡선, 거래, 최적화 제안)
//! - 시장 유형 및 타임프레임 정의
//! - 통화/퍼센트 포맷팅
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use format::*;
pub use logging::*;
pub use types::*;
