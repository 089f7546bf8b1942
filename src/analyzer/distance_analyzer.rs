use serde::Serialize;
use std::ops::Index;

use crate::model::{CANDLE_TYPE_COUNT, CandleType, DistanceMetrics, PriceBar};

/// 캔들 유형 하나의 평균 거리 지표
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TypeMetrics {
    /// 다섯 가지 거리 지표의 산술 평균
    pub averages: DistanceMetrics,
    /// 표본 수
    pub count: usize,
}

/// 캔들 유형별 평균 거리 지표 테이블
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsByType {
    entries: [TypeMetrics; CANDLE_TYPE_COUNT],
}

impl MetricsByType {
    pub fn get(&self, candle_type: CandleType) -> &TypeMetrics {
        &self.entries[candle_type.index()]
    }

    /// 유형 코드 오름차순으로 (유형, 지표) 순회
    pub fn iter(&self) -> impl Iterator<Item = (CandleType, &TypeMetrics)> {
        CandleType::ALL.into_iter().zip(self.entries.iter())
    }

    /// 집계에 사용된 전체 캔들 수
    pub fn total_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }
}

impl Index<CandleType> for MetricsByType {
    type Output = TypeMetrics;

    fn index(&self, candle_type: CandleType) -> &Self::Output {
        self.get(candle_type)
    }
}

/// 캔들 유형별 거리 지표 평균 계산
///
/// 표본이 없는 유형은 나눗셈 분모를 1로 두어 모든 평균이 0이 됩니다.
///
/// # Arguments
/// * `bars` - 집계 구간의 캔들 (순서 무관)
///
/// # Returns
/// * `MetricsByType` - 8개 유형 각각의 평균과 표본 수
pub fn compute_average_distances(bars: &[PriceBar]) -> MetricsByType {
    let mut sums = [DistanceMetrics::default(); CANDLE_TYPE_COUNT];
    let mut counts = [0usize; CANDLE_TYPE_COUNT];

    for bar in bars {
        let idx = bar.candle_type.index();
        sums[idx] += bar.distances;
        counts[idx] += 1;
    }

    let entries = std::array::from_fn(|idx| {
        let divisor = counts[idx].max(1) as f64;
        TypeMetrics {
            averages: sums[idx] / divisor,
            count: counts[idx],
        }
    });

    log::trace!("유형별 거리 평균 계산: {}개 캔들", bars.len());
    MetricsByType { entries }
}
