use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analyzer::pattern_matcher::{PatternQuery, filter_by_pattern};
use crate::candle_store::trailing_window;
use crate::error::AnalysisError;
use crate::model::{PERIOD_CHECKPOINTS, PatternDays, PriceBar};

/// 일치 캔들이 없을 때의 완화 순서
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// 패턴 길이는 고정하고 조회 기간을 넓힘
    #[default]
    WidenPeriod,
    /// 조회 기간은 고정하고 패턴 길이를 줄임
    ShrinkPattern,
}

/// 패턴 해석 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternResolution {
    /// 실제 사용된 조건
    pub query: PatternQuery,
    /// 실제 사용된 패턴 일수 (0 = 조건 없음)
    pub used_days: usize,
    /// 실제 사용된 조회 구간 길이
    pub used_period: usize,
    /// 일치한 캔들 (시리즈가 비어 있지 않으면 항상 1개 이상)
    pub matched: Vec<PriceBar>,
}

impl PatternResolution {
    /// 조건 없이 구간 전체를 사용한 결과인지 여부
    pub fn is_unconstrained(&self) -> bool {
        self.used_days == 0
    }

    fn everything(window: &[PriceBar]) -> PatternResolution {
        PatternResolution {
            query: PatternQuery::unconstrained(),
            used_days: 0,
            used_period: window.len(),
            matched: window.to_vec(),
        }
    }
}

/// 조회 구간 후보 목록
///
/// 요청 구간과 1/2/3/5/10년 체크포인트를 합쳐 오름차순, 중복 제거한 목록입니다.
pub fn candidate_periods(initial_period_days: usize) -> Vec<usize> {
    let mut periods: Vec<usize> = PERIOD_CHECKPOINTS
        .iter()
        .copied()
        .chain(std::iter::once(initial_period_days))
        .filter(|&days| days > 0)
        .collect();
    periods.sort_unstable();
    periods.dedup();
    periods
}

/// 기본 정책(기간 확장)으로 패턴 해석
pub fn resolve_pattern(
    full_series: &[PriceBar],
    initial_period_days: usize,
    pattern_days: PatternDays,
) -> Result<PatternResolution, AnalysisError> {
    resolve_pattern_with_policy(
        full_series,
        initial_period_days,
        pattern_days,
        FallbackPolicy::WidenPeriod,
    )
}

/// 최근 패턴과 일치하는 과거 캔들을 찾을 때까지 검색 범위를 완화합니다.
///
/// 패턴은 항상 잘리지 않은 전체 시리즈의 마지막 3개 캔들에서 만듭니다.
/// 어떤 경우에도 찾지 못하면 조건 없이 구간 전체를 돌려줍니다.
///
/// # Arguments
/// * `full_series` - 전체 시리즈 (오름차순)
/// * `initial_period_days` - 처음 시도할 조회 구간 길이
/// * `pattern_days` - 사용할 직전 캔들 수
/// * `policy` - 완화 순서
///
/// # Returns
/// * `Result<PatternResolution, AnalysisError>` - 시리즈가 비어 있으면 `InsufficientData`
pub fn resolve_pattern_with_policy(
    full_series: &[PriceBar],
    initial_period_days: usize,
    pattern_days: PatternDays,
    policy: FallbackPolicy,
) -> Result<PatternResolution, AnalysisError> {
    if full_series.is_empty() {
        return Err(AnalysisError::InsufficientData { need: 1, got: 0 });
    }

    let latest = PatternQuery::from_latest(full_series);
    if latest.is_unconstrained() {
        debug!(
            "캔들 {}개로는 패턴을 만들 수 없음, 전체 구간 사용",
            full_series.len()
        );
        return Ok(PatternResolution::everything(full_series));
    }

    let resolution = match policy {
        FallbackPolicy::WidenPeriod => {
            widen_period(full_series, latest, initial_period_days, pattern_days)
        }
        FallbackPolicy::ShrinkPattern => {
            shrink_pattern(full_series, latest, initial_period_days, pattern_days)
        }
    };

    info!(
        "패턴 해석: {} (사용 일수 {}, 구간 {}, 일치 {}개)",
        resolution.query,
        resolution.used_days,
        resolution.used_period,
        resolution.matched.len()
    );
    Ok(resolution)
}

fn widen_period(
    full_series: &[PriceBar],
    latest: PatternQuery,
    initial_period_days: usize,
    pattern_days: PatternDays,
) -> PatternResolution {
    let query = latest.limited_to(pattern_days);

    for period in candidate_periods(initial_period_days) {
        let window = trailing_window(full_series, period);
        let matched = filter_by_pattern(window, &query);
        if !matched.is_empty() {
            return PatternResolution {
                query,
                used_days: pattern_days.get(),
                used_period: period.min(full_series.len()),
                matched,
            };
        }

        debug!("구간 {}에서 일치 없음", period);
        if period >= full_series.len() {
            // 이후 후보도 같은 전체 구간
            break;
        }
    }

    PatternResolution::everything(full_series)
}

fn shrink_pattern(
    full_series: &[PriceBar],
    latest: PatternQuery,
    initial_period_days: usize,
    pattern_days: PatternDays,
) -> PatternResolution {
    let window = trailing_window(full_series, initial_period_days);

    for days in (1..=pattern_days.get()).rev() {
        let query = latest.truncated(days);
        let matched = filter_by_pattern(window, &query);
        if !matched.is_empty() {
            return PatternResolution {
                query,
                used_days: days,
                used_period: window.len(),
                matched,
            };
        }
        debug!("패턴 {}일 일치 없음", days);
    }

    PatternResolution::everything(window)
}
