use serde::Serialize;

use crate::model::{CANDLE_TYPE_COUNT, PriceBar};

/// 상승/하락 캔들 수
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Sentiment {
    pub bullish: usize,
    pub bearish: usize,
}

impl Sentiment {
    pub fn total(&self) -> usize {
        self.bullish + self.bearish
    }

    pub fn bullish_pct(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.bullish as f64 / self.total() as f64 * 100.0
        }
    }
}

/// 캔들 유형 패리티 기준 상승/하락 집계
pub fn calculate_sentiment(bars: &[PriceBar]) -> Sentiment {
    bars.iter().fold(Sentiment::default(), |mut acc, bar| {
        if bar.is_bullish() {
            acc.bullish += 1;
        } else {
            acc.bearish += 1;
        }
        acc
    })
}

/// 유형별 출현 횟수 (코드 순)
pub fn calculate_type_distribution(bars: &[PriceBar]) -> [usize; CANDLE_TYPE_COUNT] {
    let mut counts = [0usize; CANDLE_TYPE_COUNT];
    for bar in bars {
        counts[bar.candle_type.index()] += 1;
    }
    counts
}

/// 평균 일중 변동폭 (고가 - 저가), 빈 입력은 0
pub fn average_range(bars: &[PriceBar]) -> f64 {
    if bars.is_empty() {
        return 0.0;
    }
    bars.iter().map(PriceBar::range).sum::<f64>() / bars.len() as f64
}
