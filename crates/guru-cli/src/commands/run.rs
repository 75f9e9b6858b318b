//! 백테스트 실행 명령어.
//!
//! # 사용 예시
//!
//! ```bash
//! # 전략 설명으로 BTC/USD 백테스트
//! guru run -m crypto -s BTC/USD --describe "SMA 20/50 골든크로스 매수, RSI 70 이상 매도"
//!
//! # 스크립트 업로드, 4시간봉, 결과 저장
//! guru run -m forex -s EUR/USD --script robot.py --timeframe 4h -o out/eurusd.json
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use guru_client::{BacktestApi, DirectoryUpdate, RequestDraft, Session, SessionError};
use guru_core::{InputMethod, MarketType, ScriptFile, Timeframe};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::show::save_result;
use crate::render::render_results;

/// 전략 입력.
#[derive(Debug, Clone)]
pub enum StrategyInput {
    /// 자연어 전략 설명
    Description(String),
    /// 로봇 스크립트 경로
    Script(PathBuf),
}

/// 백테스트 CLI 설정.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub market_type: MarketType,
    /// 없으면 목록의 첫 종목
    pub symbol: Option<String>,
    /// 없으면 1년 전
    pub start_date: Option<String>,
    /// 없으면 오늘
    pub end_date: Option<String>,
    pub initial_capital: String,
    pub timeframe: Timeframe,
    pub strategy: StrategyInput,
    /// 결과 JSON 저장 경로
    pub output: Option<PathBuf>,
}

/// 세션의 입력 초안에 CLI 인자를 반영합니다.
///
/// 종목 목록을 불러온 뒤에 호출해야 `symbol`이 목록 기본값을 덮어씁니다.
pub fn apply_to_session(session: &mut Session, config: &RunConfig) -> Result<()> {
    let draft = session.draft_mut();

    if let Some(symbol) = &config.symbol {
        draft.symbol = Some(symbol.clone());
    }
    if let Some(start) = &config.start_date {
        draft.start_date = start.clone();
    }
    if let Some(end) = &config.end_date {
        draft.end_date = end.clone();
    }
    draft.initial_capital = config.initial_capital.clone();
    draft.timeframe = config.timeframe;

    match &config.strategy {
        StrategyInput::Description(text) => {
            draft.strategy_description = text.clone();
            draft.method = InputMethod::Description;
        }
        StrategyInput::Script(path) => {
            draft.script = Some(ScriptFile::from_path(path)?);
            draft.method = InputMethod::Upload;
        }
    }
    Ok(())
}

/// 백테스트를 실행하고 결과를 출력합니다.
pub async fn run_backtest(api: Arc<dyn BacktestApi>, config: RunConfig) -> Result<()> {
    let mut session = Session::new(api, RequestDraft::for_today());

    if session.set_market_type(config.market_type).await == DirectoryUpdate::Failed {
        bail!("{} 종목 목록을 불러오지 못했습니다", config.market_type);
    }
    apply_to_session(&mut session, &config)?;

    let draft = session.draft();
    println!("\n📊 백테스트 실행 중...");
    println!("시장: {}", draft.market_type);
    println!("종목: {}", draft.symbol.as_deref().unwrap_or("-"));
    println!("기간: {} ~ {}", draft.start_date, draft.end_date);
    println!("초기 자본: {}", draft.initial_capital);
    println!("타임프레임: {}", draft.timeframe.label());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("백테스트 서버 응답 대기 중...");
    pb.enable_steady_tick(std::time::Duration::from_millis(120));

    let outcome = session.submit().await;
    pb.finish_and_clear();

    match outcome {
        Ok(_) => {}
        Err(SessionError::Validation(err)) => bail!("❌ {}", err),
        Err(err) => return Err(err.into()),
    }

    if let Some(message) = session.error_message() {
        bail!("❌ {}", message);
    }

    let result = session
        .result()
        .cloned()
        .ok_or_else(|| anyhow!("백테스트 결과가 없습니다"))?;
    info!(total_trades = result.total_trades, "Rendering backtest result");

    if let Some(view) = session.results_view() {
        print!("{}", render_results(&view));
    }

    if let Some(path) = &config.output {
        save_result(&result, path)?;
        println!("\n📁 결과 저장됨: {}", path.display());
    }

    Ok(())
}
