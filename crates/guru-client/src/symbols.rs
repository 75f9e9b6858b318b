//! 시장 유형별 종목 목록 (Symbol Directory).
//!
//! 세션 시작 시, 그리고 시장 유형이 바뀔 때마다 다시 불러옵니다.
//! 로드 실패는 치명적이지 않습니다: 로그만 남기고 기존 목록과 선택을 유지합니다.

use guru_core::MarketType;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// 목록 갱신 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryUpdate {
    /// 목록이 교체됨. `selection`은 보정된 선택 종목
    Replaced {
        /// 새 선택 (빈 목록이면 `None`)
        selection: Option<String>,
    },
    /// 다른 시장 유형에 대한 응답이라 버림
    Stale,
    /// 로드 실패 (기존 목록 유지)
    Failed,
}

/// 현재 불러온 종목 목록.
#[derive(Debug, Clone, Default)]
pub struct SymbolDirectory {
    market_type: Option<MarketType>,
    symbols: Vec<String>,
}

impl SymbolDirectory {
    /// 빈 목록을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 마지막으로 성공적으로 불러온 시장 유형.
    pub fn market_type(&self) -> Option<MarketType> {
        self.market_type
    }

    /// 종목 목록 (서버 순서 유지).
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// 종목이 목록에 있는지 확인.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// 현재 선택을 이 목록 기준으로 보정합니다.
    ///
    /// 선택이 목록에 있으면 유지하고, 없거나 비어 있으면 첫 종목을 선택합니다.
    pub fn reconcile_selection(&self, selected: Option<&str>) -> Option<String> {
        match selected {
            Some(symbol) if self.contains(symbol) => Some(symbol.to_string()),
            _ => self.symbols.first().cloned(),
        }
    }

    /// 로드된 목록을 반영합니다.
    ///
    /// `loaded_for`가 현재 선택된 `active` 시장과 다르면 응답을 버립니다.
    pub fn apply_loaded(
        &mut self,
        loaded_for: MarketType,
        active: MarketType,
        symbols: Vec<String>,
        selected: Option<&str>,
    ) -> DirectoryUpdate {
        if loaded_for != active {
            debug!(%loaded_for, %active, "Discarding stale symbol directory");
            return DirectoryUpdate::Stale;
        }

        self.market_type = Some(loaded_for);
        self.symbols = symbols;

        let selection = self.reconcile_selection(selected);
        info!(
            market_type = %loaded_for,
            count = self.symbols.len(),
            selection = selection.as_deref().unwrap_or("-"),
            "Symbol directory loaded"
        );

        DirectoryUpdate::Replaced { selection }
    }

    /// 로드 결과(성공/실패)를 반영합니다.
    pub fn apply_outcome(
        &mut self,
        loaded_for: MarketType,
        active: MarketType,
        outcome: ClientResult<Vec<String>>,
        selected: Option<&str>,
    ) -> DirectoryUpdate {
        match outcome {
            Ok(symbols) => self.apply_loaded(loaded_for, active, symbols, selected),
            Err(err) => self.apply_failure(loaded_for, &err),
        }
    }

    /// 로드 실패를 기록합니다. 목록은 바뀌지 않습니다.
    pub fn apply_failure(&self, market_type: MarketType, error: &ClientError) -> DirectoryUpdate {
        warn!(%market_type, error = %error, "Failed to load symbol directory");
        DirectoryUpdate::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keeps_selection_present_in_new_list() {
        let mut dir = SymbolDirectory::new();
        let update = dir.apply_loaded(
            MarketType::Crypto,
            MarketType::Crypto,
            symbols(&["BTC/USD", "ETH/USD"]),
            Some("ETH/USD"),
        );

        assert_eq!(
            update,
            DirectoryUpdate::Replaced {
                selection: Some("ETH/USD".to_string())
            }
        );
        assert_eq!(dir.market_type(), Some(MarketType::Crypto));
    }

    #[test]
    fn test_falls_back_to_first_symbol() {
        let mut dir = SymbolDirectory::new();
        let update = dir.apply_loaded(
            MarketType::Forex,
            MarketType::Forex,
            symbols(&["EUR/USD", "GBP/USD"]),
            Some("BTC/USD"),
        );

        assert_eq!(
            update,
            DirectoryUpdate::Replaced {
                selection: Some("EUR/USD".to_string())
            }
        );
    }

    #[test]
    fn test_empty_list_clears_selection() {
        let mut dir = SymbolDirectory::new();
        let update =
            dir.apply_loaded(MarketType::Forex, MarketType::Forex, Vec::new(), Some("BTC/USD"));

        assert_eq!(update, DirectoryUpdate::Replaced { selection: None });
        assert!(dir.symbols().is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_list() {
        let mut dir = SymbolDirectory::new();
        dir.apply_loaded(
            MarketType::Crypto,
            MarketType::Crypto,
            symbols(&["BTC/USD"]),
            None,
        );

        let update = dir.apply_outcome(
            MarketType::Forex,
            MarketType::Forex,
            Err(ClientError::Network("connection refused".to_string())),
            Some("BTC/USD"),
        );

        assert_eq!(update, DirectoryUpdate::Failed);
        assert_eq!(dir.symbols(), &["BTC/USD".to_string()]);
        assert_eq!(dir.market_type(), Some(MarketType::Crypto));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut dir = SymbolDirectory::new();
        let update = dir.apply_loaded(
            MarketType::Crypto,
            MarketType::Forex,
            symbols(&["BTC/USD"]),
            None,
        );

        assert_eq!(update, DirectoryUpdate::Stale);
        assert!(dir.symbols().is_empty());
        assert_eq!(dir.market_type(), None);
    }
}
