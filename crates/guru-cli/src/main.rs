//! 백테스트 클라이언트 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 외환 종목 목록 보기
//! guru symbols -m forex
//!
//! # 전략 설명으로 백테스트 (기본: 최근 1년, 일봉, 자본 10000)
//! guru run -m crypto -s BTC/USD --describe "RSI 30 이하 매수, 70 이상 매도"
//!
//! # 스크립트 업로드 백테스트 후 결과 저장
//! guru run -m forex -s EUR/USD --script robot.py -o result.json
//!
//! # 저장된 결과 다시 보기
//! guru show result.json
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{ArgGroup, Parser, Subcommand};
use guru_cli::commands::run::{run_backtest, RunConfig, StrategyInput};
use guru_cli::commands::show::show_result;
use guru_cli::commands::symbols::list_symbols;
use guru_client::HttpBacktestApi;
use guru_core::{
    init_logging, GuruConfig, LogConfig, LogFormat, MarketType, Timeframe, DEFAULT_CONFIG_PATH,
};
use tracing::{debug, error};

/// 로그 형식 환경 변수.
const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

#[derive(Parser)]
#[command(name = "guru")]
#[command(about = "Backtest Guru CLI - 전략 백테스트 클라이언트", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 백테스트 서버 URL (GURU_API_URL보다 우선)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 시장별 거래 가능 종목 목록
    Symbols {
        /// 시장 유형 (crypto, forex)
        #[arg(short, long, default_value = "crypto")]
        market: MarketType,
    },

    /// 백테스트 실행
    #[command(group(ArgGroup::new("strategy").required(true).args(["describe", "script"])))]
    Run {
        /// 시장 유형 (crypto, forex)
        #[arg(short, long, default_value = "crypto")]
        market: MarketType,

        /// 종목 심볼 (기본: 목록의 첫 종목)
        #[arg(short, long)]
        symbol: Option<String>,

        /// 시작 날짜 (YYYY-MM-DD, 기본: 1년 전)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 종료 날짜 (YYYY-MM-DD, 기본: 오늘)
        #[arg(short, long)]
        to: Option<String>,

        /// 초기 자본
        #[arg(long, default_value = guru_client::DEFAULT_INITIAL_CAPITAL)]
        capital: String,

        /// 타임프레임 (1h, 4h, 1d, 1wk)
        #[arg(long, default_value = "1d")]
        timeframe: Timeframe,

        /// 자연어 전략 설명
        #[arg(short, long)]
        describe: Option<String>,

        /// 로봇 스크립트 파일 (.py, .txt)
        #[arg(long)]
        script: Option<PathBuf>,

        /// 결과 JSON 저장 경로
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 저장된 결과 JSON 보기
    Show {
        /// 결과 파일 경로
        file: PathBuf,
    },
}

fn log_config(cli: &Cli, config: &GuruConfig) -> LogConfig {
    let env_format = std::env::var(LOG_FORMAT_ENV)
        .ok()
        .and_then(|value| value.parse().ok());

    let log_config = LogConfig::from_settings(&config.logging);
    match cli.log_format.or(env_format) {
        Some(format) => log_config.with_format(format),
        None => log_config,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GuruConfig::load(&cli.config)?;
    if let Some(url) = &cli.api_url {
        config.api.url = Some(url.clone());
    }

    init_logging(log_config(&cli, &config)).map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;
    debug!(config = %cli.config.display(), "Configuration loaded");

    let result = match cli.command {
        Commands::Symbols { market } => {
            let api = HttpBacktestApi::from_config(&config.api)?;
            list_symbols(&api, market).await
        }

        Commands::Run {
            market,
            symbol,
            from,
            to,
            capital,
            timeframe,
            describe,
            script,
            output,
        } => {
            let strategy = match (describe, script) {
                (_, Some(path)) => StrategyInput::Script(path),
                (Some(text), None) => StrategyInput::Description(text),
                (None, None) => return Err(anyhow!("--describe 또는 --script가 필요합니다")),
            };

            let api = Arc::new(HttpBacktestApi::from_config(&config.api)?);
            run_backtest(
                api,
                RunConfig {
                    market_type: market,
                    symbol,
                    start_date: from,
                    end_date: to,
                    initial_capital: capital,
                    timeframe,
                    strategy,
                    output,
                },
            )
            .await
        }

        Commands::Show { file } => show_result(&file),
    };

    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result
}
