//! 저장된 결과 보기 명령어.
//!
//! `guru run --output result.json`으로 저장한 파일을 다시 렌더링합니다.

use std::path::Path;

use anyhow::{Context, Result};
use guru_client::ResultsView;
use guru_core::BacktestResult;

use crate::render::render_results;

/// 결과 JSON 파일을 읽습니다.
pub fn load_result(path: &Path) -> Result<BacktestResult> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("결과 파일을 읽을 수 없습니다: {}", path.display()))?;
    let result = serde_json::from_str(&content)
        .with_context(|| format!("결과 파일 형식이 올바르지 않습니다: {}", path.display()))?;
    Ok(result)
}

/// 결과를 JSON 파일로 저장합니다.
pub fn save_result(result: &BacktestResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(result)?)?;
    Ok(())
}

/// 저장된 결과를 출력합니다.
pub fn show_result(path: &Path) -> Result<()> {
    let result = load_result(path)?;
    print!("{}", render_results(&ResultsView::from_result(&result)));
    Ok(())
}
