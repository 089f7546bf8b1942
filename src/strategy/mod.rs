pub mod daily_plan;

pub use daily_plan::{DailyPlan, PlanEntry, SummaryStats, build_daily_plan};

use crate::analyzer::FallbackPolicy;
use crate::market::MarketId;
use crate::model::{Lookback, PatternDays};
use crate::{ConfigError, ConfigResult, ConfigValidation};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::PathBuf;

/// 일일 플랜 설정
///
/// 설정 파일에 없는 항목은 기본값을 사용합니다 (xauusd, 1년, 3일 패턴, 기간 확장).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// 분석 마켓
    pub market: MarketId,
    /// 통계 조회 기간 (정수 또는 "all")
    pub period: Lookback,
    /// 패턴에 사용할 직전 캔들 수
    pub pattern_days: PatternDays,
    /// 일치 캔들이 없을 때의 완화 순서
    pub fallback_policy: FallbackPolicy,
    /// 마켓 CSV 디렉터리
    pub data_dir: PathBuf,
}

impl Default for PlanConfig {
    fn default() -> Self {
        PlanConfig {
            market: MarketId::default(),
            period: Lookback::default(),
            pattern_days: PatternDays::default(),
            fallback_policy: FallbackPolicy::default(),
            data_dir: PlanConfig::default_data_dir(),
        }
    }
}

impl PlanConfig {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from("data")
    }

    /// 기본 설정 파일 경로
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config").join("daily_plan.toml")
    }
}

impl ConfigValidation for PlanConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.period == Lookback::Days(0) {
            return Err(ConfigError::ValidationError(
                "조회 기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "데이터 디렉터리가 지정되지 않았습니다".to_string(),
            ));
        }

        Ok(())
    }
}

impl Display for PlanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PlanConfig[마켓: {}, 기간: {}, 패턴: {}일, 완화: {:?}, 데이터: {}]",
            self.market,
            self.period,
            self.pattern_days.get(),
            self.fallback_policy,
            self.data_dir.display()
        )
    }
}
