// 캔들 통계 분석기 모듈
// 캔들 유형별 지표 집계, 패턴 매칭, 다음 캔들 예측과 매매 셋업 계산을 제공합니다.

pub mod calendar_analyzer;
pub mod comparison_analyzer;
pub mod distance_analyzer;
pub mod distribution_analyzer;
pub mod fallback_resolver;
pub mod market_stats;
pub mod pattern_matcher;
pub mod trade_setup;

pub use distance_analyzer::{MetricsByType, TypeMetrics, compute_average_distances};
pub use distribution_analyzer::{PredictionDistribution, RankedType, compute_distribution};
pub use fallback_resolver::{
    FallbackPolicy, PatternResolution, candidate_periods, resolve_pattern,
    resolve_pattern_with_policy,
};
pub use pattern_matcher::{PatternQuery, filter_by_pattern};
pub use trade_setup::{
    PRICE_STEP, PredictedPrices, TradeSetup, calculate_predicted_prices, synthesize_setup,
};
