//! 시뮬레이션 봉 간격을 위한 타임프레임 정의.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 백테스트 타임프레임.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    /// 1시간봉
    #[serde(rename = "1h")]
    H1,
    /// 4시간봉
    #[serde(rename = "4h")]
    H4,
    /// 일봉
    #[default]
    #[serde(rename = "1d")]
    D1,
    /// 주봉
    #[serde(rename = "1wk")]
    W1,
}

impl Timeframe {
    /// 지원하는 모든 타임프레임.
    pub const ALL: [Timeframe; 4] = [Timeframe::H1, Timeframe::H4, Timeframe::D1, Timeframe::W1];

    /// API 간격 문자열로 변환합니다.
    pub fn as_interval(&self) -> &'static str {
        match self {
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1d",
            Timeframe::W1 => "1wk",
        }
    }

    /// API 간격 문자열에서 파싱합니다.
    pub fn from_interval(s: &str) -> Option<Self> {
        match s {
            "1h" => Some(Timeframe::H1),
            "4h" => Some(Timeframe::H4),
            "1d" => Some(Timeframe::D1),
            "1wk" | "1w" => Some(Timeframe::W1),
            _ => None,
        }
    }

    /// 사람이 읽기 쉬운 이름.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::H1 => "1시간",
            Timeframe::H4 => "4시간",
            Timeframe::D1 => "1일",
            Timeframe::W1 => "1주",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_interval())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_interval(s)
            .ok_or_else(|| format!("Invalid timeframe: {}. Supported: 1h, 4h, 1d, 1wk", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_interval() {
        assert_eq!(Timeframe::W1.as_interval(), "1wk");
        assert_eq!(Timeframe::from_interval("4h"), Some(Timeframe::H4));
        assert_eq!(Timeframe::from_interval("1w"), Some(Timeframe::W1));
        assert_eq!(Timeframe::from_interval("15m"), None);
    }

    #[test]
    fn test_timeframe_serde_matches_interval() {
        for tf in Timeframe::ALL {
            let json = serde_json::to_string(&tf).unwrap();
            assert_eq!(json, format!("\"{}\"", tf.as_interval()));
        }
    }
}
