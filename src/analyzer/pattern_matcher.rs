use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::model::{CandleType, PatternDays, PriceBar};

/// 직전 1~3일 캔들 유형 조건
///
/// `None`은 해당 자리의 조건이 없음을 뜻합니다 (와일드카드).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternQuery {
    /// 1일 전 유형
    pub prev1: Option<CandleType>,
    /// 2일 전 유형
    pub prev2: Option<CandleType>,
    /// 3일 전 유형
    pub prev3: Option<CandleType>,
}

impl PatternQuery {
    pub fn new(
        prev1: Option<CandleType>,
        prev2: Option<CandleType>,
        prev3: Option<CandleType>,
    ) -> PatternQuery {
        PatternQuery {
            prev1,
            prev2,
            prev3,
        }
    }

    /// 모든 캔들과 일치하는 조건
    pub fn unconstrained() -> PatternQuery {
        PatternQuery::default()
    }

    /// 시리즈 마지막 3개 캔들에서 조건 생성
    ///
    /// 가장 최근 캔들이 `prev1`이 됩니다. 캔들이 3개 미만이면 조건 없음.
    pub fn from_latest(series: &[PriceBar]) -> PatternQuery {
        match series {
            [.., third, second, last] => PatternQuery::new(
                Some(last.candle_type),
                Some(second.candle_type),
                Some(third.candle_type),
            ),
            _ => PatternQuery::unconstrained(),
        }
    }

    /// 앞에서부터 `days`개 자리만 남긴 조건
    pub fn truncated(&self, days: usize) -> PatternQuery {
        PatternQuery {
            prev1: self.prev1.filter(|_| days >= 1),
            prev2: self.prev2.filter(|_| days >= 2),
            prev3: self.prev3.filter(|_| days >= 3),
        }
    }

    /// `PatternDays` 기준으로 자른 조건
    pub fn limited_to(&self, days: PatternDays) -> PatternQuery {
        self.truncated(days.get())
    }

    /// k일 전 자리의 조건 (k = 1..=3)
    pub fn get(&self, k: usize) -> Option<CandleType> {
        match k {
            1 => self.prev1,
            2 => self.prev2,
            3 => self.prev3,
            _ => None,
        }
    }

    /// 조건이 걸린 자리 수
    pub fn specificity(&self) -> usize {
        [self.prev1, self.prev2, self.prev3]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.specificity() == 0
    }

    /// 캔들의 직전 유형 필드가 조건을 만족하는지 확인
    pub fn matches(&self, bar: &PriceBar) -> bool {
        (1..=3).all(|k| match self.get(k) {
            None => true,
            Some(expected) => bar.prev_candle(k) == Some(expected),
        })
    }
}

impl Display for PatternQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = |value: Option<CandleType>| match value {
            Some(candle_type) => candle_type.name().to_string(),
            None => "*".to_string(),
        };
        // 오래된 캔들부터 표시
        write!(
            f,
            "{} -> {} -> {}",
            slot(self.prev3),
            slot(self.prev2),
            slot(self.prev1)
        )
    }
}

/// 패턴 조건과 일치하는 캔들만 추려냅니다.
///
/// # Arguments
/// * `bars` - 검색 대상 캔들
/// * `query` - 직전 유형 조건
///
/// # Returns
/// * `Vec<PriceBar>` - 원래 순서를 유지한 일치 캔들 (비어 있을 수 있음)
pub fn filter_by_pattern(bars: &[PriceBar], query: &PatternQuery) -> Vec<PriceBar> {
    bars.iter()
        .filter(|bar| query.matches(bar))
        .copied()
        .collect()
}
