//! CLI 명령어 구현 모듈.

pub mod run;
pub mod show;
pub mod symbols;
