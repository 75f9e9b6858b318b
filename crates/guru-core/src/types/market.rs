//! 시장 유형 정의.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 백테스트 대상 시장 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    /// 암호화폐 시장
    #[default]
    Crypto,
    /// 외환 시장
    Forex,
}

impl MarketType {
    /// API 쿼리 파라미터 값.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::Crypto => "crypto",
            MarketType::Forex => "forex",
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "crypto" => Ok(MarketType::Crypto),
            "forex" | "fx" => Ok(MarketType::Forex),
            _ => Err(format!("Invalid market type: {}. Supported: crypto, forex", s)),
        }
    }
}
