//! 종목 목록 명령어.
//!
//! ```bash
//! guru symbols -m forex
//! ```

use anyhow::Result;
use guru_client::BacktestApi;
use guru_core::MarketType;
use tracing::info;

use crate::render::render_symbols;

/// 서버에서 종목 목록을 가져와 출력합니다.
pub async fn list_symbols(api: &dyn BacktestApi, market_type: MarketType) -> Result<()> {
    let symbols = api.fetch_symbols(market_type).await?;
    info!(%market_type, count = symbols.len(), "Fetched symbols");

    print!("{}", render_symbols(market_type, &symbols));
    Ok(())
}
