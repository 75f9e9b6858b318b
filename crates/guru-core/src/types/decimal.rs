//! 금융 값 표현을 위한 Decimal 유틸리티.

use rust_decimal::{Decimal, RoundingStrategy};

/// 가격/자본 타입.
pub type Price = Decimal;

/// 퍼센트 타입 (`12.5` = 12.5%, 엔진이 이미 100을 곱해 보냄).
pub type Percentage = Decimal;

/// Decimal 표시용 확장 트레이트.
pub trait DecimalExt {
    /// 0.5를 0에서 먼 쪽으로 올리는 반올림 (표시용).
    fn round_display(&self, dp: u32) -> Decimal;

    /// 음수가 아닌지 확인합니다 (0 포함).
    fn is_non_negative(&self) -> bool;
}

impl DecimalExt for Decimal {
    fn round_display(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }

    fn is_non_negative(&self) -> bool {
        *self >= Decimal::ZERO
    }
}
