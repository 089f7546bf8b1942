use serde::Serialize;

use crate::model::{CANDLE_TYPE_COUNT, CandleType, PriceBar};

/// 순위가 매겨진 유형 하나
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedType {
    pub candle_type: CandleType,
    pub percent: f64,
}

impl RankedType {
    fn empty() -> RankedType {
        RankedType {
            candle_type: CandleType::DojiBullish,
            percent: 0.0,
        }
    }
}

/// 다음 캔들 유형 확률 분포
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionDistribution {
    /// 유형별 출현 횟수 (코드 순)
    pub counts: [usize; CANDLE_TYPE_COUNT],
    /// 유형별 비율 (%)
    pub percentages: [f64; CANDLE_TYPE_COUNT],
    /// 표본 수
    pub total: usize,
    /// 1순위 유형
    pub top: RankedType,
    /// 2순위 유형 (출현 유형이 2개 미만이면 유형 0, 0%)
    pub second: RankedType,
    pub bullish_count: usize,
    pub bearish_count: usize,
    pub bullish_pct: f64,
    pub bearish_pct: f64,
}

impl PredictionDistribution {
    pub fn count(&self, candle_type: CandleType) -> usize {
        self.counts[candle_type.index()]
    }

    pub fn percent(&self, candle_type: CandleType) -> f64 {
        self.percentages[candle_type.index()]
    }

    /// 비율 내림차순 전체 순위 (동률이면 코드가 작은 유형이 앞)
    pub fn ranked(&self) -> Vec<RankedType> {
        rank(&self.percentages)
    }

    /// 1순위 유형 방향의 비율
    ///
    /// 1순위가 상승 유형이면 상승 비율, 아니면 하락 비율입니다.
    pub fn win_rate(&self) -> f64 {
        if self.top.candle_type.is_bullish() {
            self.bullish_pct
        } else {
            self.bearish_pct
        }
    }
}

fn rank(percentages: &[f64; CANDLE_TYPE_COUNT]) -> Vec<RankedType> {
    let mut ranked: Vec<RankedType> = CandleType::ALL
        .iter()
        .map(|&candle_type| RankedType {
            candle_type,
            percent: percentages[candle_type.index()],
        })
        .collect();
    // 안정 정렬: 동률은 코드 오름차순 유지
    ranked.sort_by(|a, b| b.percent.total_cmp(&a.percent));
    ranked
}

fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// 일치 캔들 집합에서 다음 캔들 유형 분포 계산
///
/// # Arguments
/// * `matched` - 패턴과 일치한 캔들
///
/// # Returns
/// * `PredictionDistribution` - 유형별 횟수/비율과 상위 2개 유형
pub fn compute_distribution(matched: &[PriceBar]) -> PredictionDistribution {
    let mut counts = [0usize; CANDLE_TYPE_COUNT];
    for bar in matched {
        counts[bar.candle_type.index()] += 1;
    }

    let total = matched.len();
    let percentages = counts.map(|count| percent_of(count, total));

    let ranked = rank(&percentages);
    let top = ranked
        .first()
        .copied()
        .filter(|entry| entry.percent > 0.0)
        .unwrap_or_else(RankedType::empty);
    let second = ranked
        .get(1)
        .copied()
        .filter(|entry| entry.percent > 0.0)
        .unwrap_or_else(RankedType::empty);

    let bullish_count: usize = CandleType::ALL
        .iter()
        .filter(|candle_type| candle_type.is_bullish())
        .map(|candle_type| counts[candle_type.index()])
        .sum();
    let bearish_count = total - bullish_count;

    PredictionDistribution {
        counts,
        percentages,
        total,
        top,
        second,
        bullish_count,
        bearish_count,
        bullish_pct: percent_of(bullish_count, total),
        bearish_pct: percent_of(bearish_count, total),
    }
}
