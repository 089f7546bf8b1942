mod common_test_utils;
use common_test_utils::*;

use gold_candle_plan::AnalysisError;
use gold_candle_plan::analyzer::{
    FallbackPolicy, candidate_periods, resolve_pattern, resolve_pattern_with_policy,
};
use gold_candle_plan::model::PatternDays;

fn three_days() -> PatternDays {
    PatternDays::default()
}

#[test]
fn test_candidate_periods_sorted_and_deduplicated() {
    assert_eq!(candidate_periods(365), vec![365, 730, 1095, 1825, 3650]);
    assert_eq!(
        candidate_periods(500),
        vec![365, 500, 730, 1095, 1825, 3650]
    );
    assert_eq!(
        candidate_periods(5000),
        vec![365, 730, 1095, 1825, 3650, 5000]
    );
}

#[test]
fn test_empty_series_is_error() {
    let result = resolve_pattern(&[], 365, three_days());
    assert_eq!(
        result,
        Err(AnalysisError::InsufficientData { need: 1, got: 0 })
    );
}

#[test]
fn test_short_series_uses_everything() {
    let bars = series(&[2, 3]);
    let resolution = resolve_pattern(&bars, 365, three_days()).unwrap();
    assert!(resolution.is_unconstrained());
    assert_eq!(resolution.matched.len(), 2);
}

#[test]
fn test_match_inside_initial_period() {
    // 마지막 3개 = [2, 4, 6], 같은 순서 뒤의 캔들이 일치
    let bars = series(&[2, 4, 6, 3, 2, 4, 6]);

    let resolution = resolve_pattern(&bars, 365, three_days()).unwrap();

    assert_eq!(resolution.used_days, 3);
    // 구간이 시리즈보다 길면 실제 길이를 보고
    assert_eq!(resolution.used_period, bars.len());
    assert_eq!(resolution.matched.len(), 1);
    assert_eq!(resolution.matched[0].candle_type.code(), 3);
}

#[test]
fn test_smallest_successful_window_wins() {
    // 유일한 일치는 앞쪽에 있어 최근 365개 구간 밖
    let mut codes = vec![2, 4, 6, 3];
    codes.extend(std::iter::repeat_n(1u8, 500));
    codes.extend([2, 4, 6]);
    let bars = series(&codes);

    let resolution = resolve_pattern(&bars, 365, three_days()).unwrap();

    assert_eq!(resolution.used_days, 3);
    // 730 구간이 507개 시리즈 전체를 덮음
    assert_eq!(resolution.used_period, bars.len());
    assert_eq!(resolution.matched.len(), 1);
    assert_eq!(resolution.matched[0].candle_type.code(), 3);
}

#[test]
fn test_ten_year_window_is_tried() {
    // 유일한 일치는 1825개 밖, 3650개 안쪽
    let mut codes = vec![1u8; 1000];
    codes.extend([2, 4, 6, 3]);
    codes.extend(std::iter::repeat_n(1u8, 3000));
    codes.extend([2, 4, 6]);
    let bars = series(&codes);
    assert_eq!(bars.len(), 4007);

    let resolution = resolve_pattern(&bars, 365, three_days()).unwrap();

    assert_eq!(resolution.used_days, 3);
    assert_eq!(resolution.used_period, 3650);
    assert_eq!(resolution.matched.len(), 1);
    assert_eq!(resolution.matched[0].datetime, bars[1003].datetime);
}

#[test]
fn test_match_beyond_ten_years_uses_whole_series() {
    let mut codes = vec![2u8, 4, 6, 3];
    codes.extend(std::iter::repeat_n(1u8, 3700));
    codes.extend([2, 4, 6]);
    let bars = series(&codes);

    let resolution = resolve_pattern(&bars, 365, three_days()).unwrap();

    assert!(resolution.is_unconstrained());
    assert_eq!(resolution.used_days, 0);
    assert_eq!(resolution.used_period, 3707);
    assert_eq!(resolution.matched.len(), bars.len());
}

#[test]
fn test_no_match_falls_back_to_whole_series() {
    // 2 -> 4 -> 6 패턴은 마지막에 한 번만 나타남
    let mut codes = vec![1u8; 50];
    codes.extend([2, 4, 6]);
    let bars = series(&codes);

    let resolution = resolve_pattern(&bars, 365, three_days()).unwrap();

    assert!(resolution.is_unconstrained());
    assert_eq!(resolution.used_period, bars.len());
    assert_eq!(resolution.matched.len(), bars.len());
}

#[test]
fn test_pattern_days_limits_query() {
    let bars = series(&[0, 4, 6, 3, 2, 4, 6]);

    // 3일 패턴은 첫 등장(0 -> 4 -> 6)과 다르지만 2일 패턴은 일치
    let resolution = resolve_pattern(&bars, 365, PatternDays::new(2).unwrap()).unwrap();

    assert_eq!(resolution.used_days, 2);
    assert_eq!(resolution.query.prev3, None);
    assert_eq!(resolution.matched.len(), 1);
}

#[test]
fn test_shrink_policy_reduces_pattern_length() {
    // 3일 패턴(0 -> 4 -> 6)은 과거에 없고 2일 패턴(4 -> 6)은 있음
    let bars = series(&[2, 4, 6, 3, 0, 4, 6]);

    let widened =
        resolve_pattern_with_policy(&bars, 365, three_days(), FallbackPolicy::WidenPeriod).unwrap();
    assert!(widened.is_unconstrained());

    let shrunk =
        resolve_pattern_with_policy(&bars, 365, three_days(), FallbackPolicy::ShrinkPattern)
            .unwrap();
    assert_eq!(shrunk.used_days, 2);
    assert_eq!(shrunk.used_period, bars.len());
    assert_eq!(shrunk.matched.len(), 1);
    assert_eq!(shrunk.matched[0].candle_type.code(), 3);
}

#[test]
fn test_matched_never_empty() {
    for codes in [
        vec![0u8],
        vec![7, 7, 7],
        vec![1, 2, 3, 4, 5, 6, 7, 0],
        vec![0, 0, 0, 0, 0],
    ] {
        let bars = series(&codes);
        for policy in [FallbackPolicy::WidenPeriod, FallbackPolicy::ShrinkPattern] {
            let resolution =
                resolve_pattern_with_policy(&bars, 365, three_days(), policy).unwrap();
            assert!(!resolution.matched.is_empty());
        }
    }
}
