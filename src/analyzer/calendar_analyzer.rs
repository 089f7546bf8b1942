// 요일/주차/월/계절별 캔들 통계
// 모든 함수는 오름차순 시리즈를 받는다고 가정합니다.
// 월별 통계의 시가/종가는 해당 월의 첫/마지막 캔들에서 가져옵니다.

use chrono::{Datelike, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::model::PriceBar;

fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// 상승 비율 기준 최고/최저 항목
///
/// 최고는 0%보다, 최저는 100%보다 엄격히 나아야 선택되며 동률이면 앞선 항목이 유지됩니다.
fn best_and_worst<K: Copy>(items: impl Iterator<Item = (K, f64)>) -> (Option<K>, Option<K>) {
    let (mut best, mut best_pct) = (None, 0.0);
    let (mut worst, mut worst_pct) = (None, 100.0);
    for (key, value) in items {
        if value > best_pct {
            best_pct = value;
            best = Some(key);
        }
        if value < worst_pct {
            worst_pct = value;
            worst = Some(key);
        }
    }
    (best, worst)
}

/// 요일별 통계
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayStats {
    pub weekday: Weekday,
    pub bullish: usize,
    pub bearish: usize,
    pub total: usize,
    pub total_range: f64,
    pub total_change: f64,
    pub bullish_pct: f64,
    pub bearish_pct: f64,
    pub avg_range: f64,
    pub avg_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayReport {
    /// 월요일부터 금요일까지 5개
    pub days: Vec<WeekdayStats>,
    pub best_day: Option<Weekday>,
    pub worst_day: Option<Weekday>,
}

const TRADING_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// 요일별 상승/하락 비율과 평균 변동폭 (주말 캔들은 제외)
pub fn calculate_weekday_stats(bars: &[PriceBar]) -> WeekdayReport {
    let mut days: Vec<WeekdayStats> = TRADING_DAYS
        .iter()
        .map(|&weekday| WeekdayStats {
            weekday,
            bullish: 0,
            bearish: 0,
            total: 0,
            total_range: 0.0,
            total_change: 0.0,
            bullish_pct: 0.0,
            bearish_pct: 0.0,
            avg_range: 0.0,
            avg_change: 0.0,
        })
        .collect();

    for bar in bars {
        let weekday = bar.datetime.weekday();
        if matches!(weekday, Weekday::Sat | Weekday::Sun) {
            continue;
        }
        let stats = &mut days[weekday.num_days_from_monday() as usize];
        stats.total += 1;
        if bar.is_bullish() {
            stats.bullish += 1;
        } else {
            stats.bearish += 1;
        }
        stats.total_range += bar.range();
        stats.total_change += bar.change();
    }

    for stats in &mut days {
        stats.bullish_pct = pct(stats.bullish, stats.total);
        stats.bearish_pct = pct(stats.bearish, stats.total);
        if stats.total > 0 {
            stats.avg_range = stats.total_range / stats.total as f64;
            stats.avg_change = stats.total_change / stats.total as f64;
        }
    }

    let (best_day, worst_day) =
        best_and_worst(days.iter().map(|stats| (stats.weekday, stats.bullish_pct)));

    WeekdayReport {
        days,
        best_day,
        worst_day,
    }
}

/// 일자로 월 내 주차 계산 (1~7일 = 1주차, 22일 이후 = 4주차)
pub fn week_of_month(day_of_month: u32) -> u32 {
    match day_of_month {
        0..=7 => 1,
        8..=14 => 2,
        15..=21 => 3,
        _ => 4,
    }
}

/// 월 내 주차별 통계
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthWeekStats {
    /// 1~4
    pub week: u32,
    pub bullish: usize,
    pub bearish: usize,
    pub total: usize,
    pub total_change: f64,
    /// 해당 주차가 포함된 서로 다른 월 수
    pub months: usize,
    pub bullish_pct: f64,
    pub bearish_pct: f64,
    /// 월당 평균 변화량
    pub avg_change: f64,
}

impl MonthWeekStats {
    /// "1st Week" 형식 이름
    pub fn label(&self) -> String {
        let suffix = match self.week {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        };
        format!("{}{} Week", self.week, suffix)
    }

    /// 해당 주차의 일자 범위
    pub fn day_range(&self) -> &'static str {
        match self.week {
            1 => "Day 1-7",
            2 => "Day 8-14",
            3 => "Day 15-21",
            _ => "Day 22-31",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthWeekReport {
    pub weeks: Vec<MonthWeekStats>,
    pub best_week: Option<u32>,
    pub worst_week: Option<u32>,
}

pub fn calculate_week_of_month_stats(bars: &[PriceBar]) -> MonthWeekReport {
    let mut weeks: Vec<MonthWeekStats> = (1..=4)
        .map(|week| MonthWeekStats {
            week,
            bullish: 0,
            bearish: 0,
            total: 0,
            total_change: 0.0,
            months: 0,
            bullish_pct: 0.0,
            bearish_pct: 0.0,
            avg_change: 0.0,
        })
        .collect();
    let mut seen: [BTreeSet<(i32, u32)>; 4] = Default::default();

    for bar in bars {
        let idx = (week_of_month(bar.datetime.day()) - 1) as usize;
        let stats = &mut weeks[idx];
        stats.total += 1;
        if bar.is_bullish() {
            stats.bullish += 1;
        } else {
            stats.bearish += 1;
        }
        stats.total_change += bar.change();
        seen[idx].insert((bar.datetime.year(), bar.datetime.month()));
    }

    for (stats, months) in weeks.iter_mut().zip(seen.iter()) {
        stats.months = months.len();
        stats.bullish_pct = pct(stats.bullish, stats.total);
        stats.bearish_pct = pct(stats.bearish, stats.total);
        if stats.months > 0 {
            stats.avg_change = stats.total_change / stats.months as f64;
        }
    }

    let (best_week, worst_week) =
        best_and_worst(weeks.iter().map(|stats| (stats.week, stats.bullish_pct)));

    MonthWeekReport {
        weeks,
        best_week,
        worst_week,
    }
}

/// (연, 월) 단위 통계
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub year: i32,
    /// 1~12
    pub month: u32,
    pub open_price: f64,
    pub close_price: f64,
    pub highest_high: f64,
    pub lowest_low: f64,
    pub bullish: usize,
    pub bearish: usize,
    pub total: usize,
    pub change: f64,
    pub change_pct: f64,
    pub range: f64,
    pub bullish_pct: f64,
}

impl MonthlyStats {
    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }
}

/// 연월별 통계 (시간순)
pub fn calculate_monthly_stats(bars: &[PriceBar]) -> Vec<MonthlyStats> {
    let mut monthly: BTreeMap<(i32, u32), MonthlyStats> = BTreeMap::new();

    for bar in bars {
        let key = (bar.datetime.year(), bar.datetime.month());
        let stats = monthly.entry(key).or_insert_with(|| MonthlyStats {
            year: key.0,
            month: key.1,
            open_price: bar.open,
            close_price: bar.close,
            highest_high: bar.high,
            lowest_low: bar.low,
            bullish: 0,
            bearish: 0,
            total: 0,
            change: 0.0,
            change_pct: 0.0,
            range: 0.0,
            bullish_pct: 0.0,
        });

        stats.close_price = bar.close;
        stats.total += 1;
        if bar.is_bullish() {
            stats.bullish += 1;
        } else {
            stats.bearish += 1;
        }
        stats.highest_high = stats.highest_high.max(bar.high);
        stats.lowest_low = stats.lowest_low.min(bar.low);
    }

    monthly
        .into_values()
        .map(|mut stats| {
            stats.change = stats.close_price - stats.open_price;
            stats.change_pct = if stats.open_price > 0.0 {
                stats.change / stats.open_price * 100.0
            } else {
                0.0
            };
            stats.range = stats.highest_high - stats.lowest_low;
            stats.bullish_pct = pct(stats.bullish, stats.total);
            stats
        })
        .collect()
}

/// 달력 월별 계절성 통계
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalStats {
    /// 1~12
    pub month: u32,
    pub total_change_pct: f64,
    pub positive_years: usize,
    pub total_years: usize,
    /// 연도별 변화율 평균 (%)
    pub avg_change: f64,
    /// 상승 마감 연도 비율 (%)
    pub positive_rate: f64,
}

impl SeasonalStats {
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|month| chrono::Month::try_from(month).ok())
            .map(|month| month.name())
            .unwrap_or("-")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalReport {
    pub months: Vec<SeasonalStats>,
    pub best_month: u32,
    pub worst_month: u32,
}

/// 여러 해에 걸친 월별 평균 성과
pub fn calculate_seasonal_pattern(bars: &[PriceBar]) -> SeasonalReport {
    let mut months: Vec<SeasonalStats> = (1..=12)
        .map(|month| SeasonalStats {
            month,
            total_change_pct: 0.0,
            positive_years: 0,
            total_years: 0,
            avg_change: 0.0,
            positive_rate: 0.0,
        })
        .collect();

    for stats in calculate_monthly_stats(bars) {
        let seasonal = &mut months[(stats.month - 1) as usize];
        seasonal.total_change_pct += stats.change_pct;
        seasonal.total_years += 1;
        if stats.is_positive() {
            seasonal.positive_years += 1;
        }
    }

    for seasonal in &mut months {
        if seasonal.total_years > 0 {
            seasonal.avg_change = seasonal.total_change_pct / seasonal.total_years as f64;
        }
        seasonal.positive_rate = pct(seasonal.positive_years, seasonal.total_years);
    }

    let (mut best_month, mut best_avg) = (1, f64::NEG_INFINITY);
    let (mut worst_month, mut worst_avg) = (1, f64::INFINITY);
    for seasonal in &months {
        if seasonal.avg_change > best_avg {
            best_avg = seasonal.avg_change;
            best_month = seasonal.month;
        }
        if seasonal.avg_change < worst_avg {
            worst_avg = seasonal.avg_change;
            worst_month = seasonal.month;
        }
    }

    SeasonalReport {
        months,
        best_month,
        worst_month,
    }
}
