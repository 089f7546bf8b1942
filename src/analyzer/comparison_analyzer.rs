use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::model::PriceBar;

/// 같은 날짜의 두 시장 캔들
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlignedPair {
    pub date: NaiveDate,
    pub first: PriceBar,
    pub second: PriceBar,
}

impl AlignedPair {
    pub fn same_direction(&self) -> bool {
        self.first.is_bullish() == self.second.is_bullish()
    }

    pub fn same_type(&self) -> bool {
        self.first.candle_type == self.second.candle_type
    }
}

/// 두 시리즈에서 공통 날짜만 골라 날짜 오름차순으로 짝지음
///
/// 한 시리즈에 같은 날짜가 여러 번 있으면 마지막 캔들을 사용합니다.
pub fn align_by_date(first: &[PriceBar], second: &[PriceBar]) -> Vec<AlignedPair> {
    let first_by_date: BTreeMap<NaiveDate, PriceBar> =
        first.iter().map(|bar| (bar.datetime, *bar)).collect();
    let second_by_date: HashMap<NaiveDate, PriceBar> =
        second.iter().map(|bar| (bar.datetime, *bar)).collect();

    let aligned: Vec<AlignedPair> = first_by_date
        .into_iter()
        .filter_map(|(date, first)| {
            second_by_date.get(&date).map(|second| AlignedPair {
                date,
                first,
                second: *second,
            })
        })
        .collect();

    debug!(
        "공통 날짜 {}개 (입력 {} / {})",
        aligned.len(),
        first.len(),
        second.len()
    );
    aligned
}

/// 피어슨 상관계수
///
/// 길이가 다르거나 비어 있거나 분모가 0이면 0을 반환합니다.
pub fn correlation(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.is_empty() {
        return 0.0;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut numerator, mut denom_x, mut denom_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        numerator += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    let denominator = denom_x.sqrt() * denom_y.sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn match_rate(aligned: &[AlignedPair], predicate: impl Fn(&AlignedPair) -> bool) -> f64 {
    if aligned.is_empty() {
        return 0.0;
    }
    let matches = aligned.iter().filter(|pair| predicate(pair)).count();
    matches as f64 / aligned.len() as f64 * 100.0
}

/// 공통 날짜 종가 상관계수
pub fn price_correlation(first: &[PriceBar], second: &[PriceBar]) -> f64 {
    let aligned = align_by_date(first, second);
    let (xs, ys): (Vec<f64>, Vec<f64>) = aligned
        .iter()
        .map(|pair| (pair.first.close, pair.second.close))
        .unzip();
    correlation(&xs, &ys)
}

/// 공통 날짜 일간 변화량(종가 - 시가) 상관계수
pub fn daily_change_correlation(first: &[PriceBar], second: &[PriceBar]) -> f64 {
    let aligned = align_by_date(first, second);
    let (xs, ys): (Vec<f64>, Vec<f64>) = aligned
        .iter()
        .map(|pair| (pair.first.change(), pair.second.change()))
        .unzip();
    correlation(&xs, &ys)
}

/// 방향(상승/하락)이 같은 날의 비율 (%)
pub fn direction_match(first: &[PriceBar], second: &[PriceBar]) -> f64 {
    match_rate(&align_by_date(first, second), AlignedPair::same_direction)
}

/// 캔들 유형이 같은 날의 비율 (%)
pub fn type_match(first: &[PriceBar], second: &[PriceBar]) -> f64 {
    match_rate(&align_by_date(first, second), AlignedPair::same_type)
}

/// 방향이 엇갈린 날 (날짜 오름차순)
pub fn find_divergences(first: &[PriceBar], second: &[PriceBar]) -> Vec<AlignedPair> {
    align_by_date(first, second)
        .into_iter()
        .filter(|pair| !pair.same_direction())
        .collect()
}

/// 하루치 베이시스 (두 번째 시장 - 첫 번째 시장)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasisPoint {
    pub date: NaiveDate,
    pub first_close: f64,
    pub second_close: f64,
    pub basis: f64,
    /// 첫 번째 시장 종가 대비 (%)
    pub basis_pct: f64,
}

/// 공통 날짜별 베이시스 시리즈
pub fn basis_series(first: &[PriceBar], second: &[PriceBar]) -> Vec<BasisPoint> {
    align_by_date(first, second)
        .into_iter()
        .map(|pair| {
            let basis = pair.second.close - pair.first.close;
            let basis_pct = if pair.first.close == 0.0 {
                0.0
            } else {
                basis / pair.first.close * 100.0
            };
            BasisPoint {
                date: pair.date,
                first_close: pair.first.close,
                second_close: pair.second.close,
                basis,
                basis_pct,
            }
        })
        .collect()
}

/// 두 시장의 같은 지표 한 쌍
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairedValue {
    pub first: f64,
    pub second: f64,
}

impl PairedValue {
    /// 두 번째 - 첫 번째
    pub fn diff(&self) -> f64 {
        self.second - self.first
    }
}

/// 두 시장 비교 요약
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonStats {
    pub total_days: usize,
    pub latest: AlignedPair,
    pub latest_basis: f64,
    pub avg_range: PairedValue,
    pub avg_body: PairedValue,
    pub bullish_pct: PairedValue,
    pub price_correlation: f64,
    pub daily_change_correlation: f64,
    pub direction_match: f64,
    pub type_match: f64,
}

fn paired_average(
    aligned: &[AlignedPair],
    value: impl Fn(&AlignedPair) -> (f64, f64),
) -> PairedValue {
    let n = aligned.len().max(1) as f64;
    let (sum_first, sum_second) = aligned
        .iter()
        .map(value)
        .fold((0.0, 0.0), |(acc_first, acc_second), (first, second)| {
            (acc_first + first, acc_second + second)
        });
    PairedValue {
        first: sum_first / n,
        second: sum_second / n,
    }
}

/// 공통 날짜 기준 비교 요약 (공통 날짜가 없으면 None)
pub fn comparison_stats(first: &[PriceBar], second: &[PriceBar]) -> Option<ComparisonStats> {
    let aligned = align_by_date(first, second);
    let latest = *aligned.last()?;

    let avg_range = paired_average(&aligned, |pair| (pair.first.range(), pair.second.range()));
    let avg_body = paired_average(&aligned, |pair| {
        (
            pair.first.distances.body_size,
            pair.second.distances.body_size,
        )
    });
    let bullish_ratio = paired_average(&aligned, |pair| {
        (
            f64::from(u8::from(pair.first.is_bullish())),
            f64::from(u8::from(pair.second.is_bullish())),
        )
    });

    let (closes_first, closes_second): (Vec<f64>, Vec<f64>) = aligned
        .iter()
        .map(|pair| (pair.first.close, pair.second.close))
        .unzip();
    let (changes_first, changes_second): (Vec<f64>, Vec<f64>) = aligned
        .iter()
        .map(|pair| (pair.first.change(), pair.second.change()))
        .unzip();

    Some(ComparisonStats {
        total_days: aligned.len(),
        latest,
        latest_basis: latest.second.close - latest.first.close,
        avg_range,
        avg_body,
        bullish_pct: PairedValue {
            first: bullish_ratio.first * 100.0,
            second: bullish_ratio.second * 100.0,
        },
        price_correlation: correlation(&closes_first, &closes_second),
        daily_change_correlation: correlation(&changes_first, &changes_second),
        direction_match: match_rate(&aligned, AlignedPair::same_direction),
        type_match: match_rate(&aligned, AlignedPair::same_type),
    })
}
