//! 백테스트 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 시장별 종목 목록 조회
//! - 전략 설명 / 스크립트 업로드 백테스트 실행
//! - 저장된 결과 JSON 다시 보기
//! - 결과 리포트 터미널 렌더링

pub mod commands;
pub mod render;
