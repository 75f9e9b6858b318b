//! 백테스트 요청/결과 도메인 모델.

mod request;
mod result;

pub use request::*;
pub use result::*;
