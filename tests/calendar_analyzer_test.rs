mod common_test_utils;
use common_test_utils::*;

use chrono::Weekday;
use gold_candle_plan::analyzer::calendar_analyzer::{
    calculate_monthly_stats, calculate_seasonal_pattern, calculate_week_of_month_stats,
    calculate_weekday_stats, week_of_month,
};

#[test]
fn test_weekday_stats_skip_weekends() {
    // 2024-01-01은 월요일
    let bars = vec![
        create_typed_bar(date(2024, 1, 1), 0, 2000.0),
        create_typed_bar(date(2024, 1, 2), 1, 2000.0),
        create_typed_bar(date(2024, 1, 3), 2, 2000.0),
        create_typed_bar(date(2024, 1, 4), 4, 2000.0),
        create_typed_bar(date(2024, 1, 5), 3, 2000.0),
        create_typed_bar(date(2024, 1, 6), 0, 2000.0),
        create_typed_bar(date(2024, 1, 8), 1, 2000.0),
    ];

    let report = calculate_weekday_stats(&bars);

    assert_eq!(report.days.len(), 5);
    let monday = &report.days[0];
    assert_eq!(monday.weekday, Weekday::Mon);
    assert_eq!(monday.total, 2);
    assert_eq!(monday.bullish_pct, 50.0);
    assert_eq!(monday.avg_range, 10.0);
    assert_eq!(monday.avg_change, 0.0);

    let total: usize = report.days.iter().map(|day| day.total).sum();
    assert_eq!(total, 6);

    assert_eq!(report.best_day, Some(Weekday::Wed));
    assert_eq!(report.worst_day, Some(Weekday::Tue));
}

#[test]
fn test_weekday_best_requires_some_bullish() {
    let bars = vec![
        create_typed_bar(date(2024, 1, 1), 1, 2000.0),
        create_typed_bar(date(2024, 1, 2), 3, 2000.0),
    ];

    let report = calculate_weekday_stats(&bars);

    assert_eq!(report.best_day, None);
    assert_eq!(report.worst_day, Some(Weekday::Mon));
}

#[test]
fn test_week_of_month_boundaries() {
    assert_eq!(week_of_month(1), 1);
    assert_eq!(week_of_month(7), 1);
    assert_eq!(week_of_month(8), 2);
    assert_eq!(week_of_month(15), 3);
    assert_eq!(week_of_month(21), 3);
    assert_eq!(week_of_month(22), 4);
    assert_eq!(week_of_month(31), 4);
}

#[test]
fn test_week_of_month_stats() {
    let bars = vec![
        create_typed_bar(date(2024, 1, 1), 0, 2000.0),
        create_typed_bar(date(2024, 1, 2), 2, 2000.0),
        create_typed_bar(date(2024, 1, 8), 1, 2000.0),
        create_typed_bar(date(2024, 2, 2), 4, 2000.0),
    ];

    let report = calculate_week_of_month_stats(&bars);

    let first = &report.weeks[0];
    assert_eq!(first.label(), "1st Week");
    assert_eq!(first.day_range(), "Day 1-7");
    assert_eq!(first.total, 3);
    assert_eq!(first.months, 2);
    assert_eq!(first.bullish_pct, 100.0);
    assert_eq!(first.avg_change, 7.5);

    let second = &report.weeks[1];
    assert_eq!(second.bearish_pct, 100.0);
    assert_eq!(report.weeks[3].label(), "4th Week");
    assert_eq!(report.weeks[3].total, 0);

    assert_eq!(report.best_week, Some(1));
    assert_eq!(report.worst_week, Some(2));
}

#[test]
fn test_monthly_stats_chronological() {
    let bars = vec![
        create_bar(date(2024, 1, 2), 2, 100.0, 106.0, 99.0, 105.0),
        create_bar(date(2024, 1, 3), 2, 105.0, 112.0, 104.0, 110.0),
        create_bar(date(2024, 2, 1), 3, 110.0, 111.0, 98.0, 99.0),
    ];

    let monthly = calculate_monthly_stats(&bars);

    assert_eq!(monthly.len(), 2);
    let january = &monthly[0];
    assert_eq!((january.year, january.month), (2024, 1));
    assert_eq!(january.open_price, 100.0);
    assert_eq!(january.close_price, 110.0);
    assert_eq!(january.highest_high, 112.0);
    assert_eq!(january.lowest_low, 99.0);
    assert_eq!(january.change, 10.0);
    assert_eq!(january.change_pct, 10.0);
    assert_eq!(january.range, 13.0);
    assert_eq!(january.bullish_pct, 100.0);
    assert!(january.is_positive());

    let february = &monthly[1];
    assert_eq!((february.year, february.month), (2024, 2));
    assert_eq!(february.change, -11.0);
    assert_eq!(february.change_pct, -10.0);
    assert_eq!(february.bearish, 1);
}

#[test]
fn test_seasonal_pattern_best_and_worst() {
    let bars = vec![
        create_bar(date(2023, 1, 3), 2, 100.0, 111.0, 99.0, 110.0),
        create_bar(date(2024, 1, 2), 2, 100.0, 106.0, 99.0, 105.0),
        create_bar(date(2024, 2, 1), 3, 100.0, 101.0, 89.0, 90.0),
    ];

    let report = calculate_seasonal_pattern(&bars);

    assert_eq!(report.months.len(), 12);
    let january = &report.months[0];
    assert_eq!(january.month_name(), "January");
    assert_eq!(january.total_years, 2);
    assert_eq!(january.positive_years, 2);
    assert_eq!(january.avg_change, 7.5);
    assert_eq!(january.positive_rate, 100.0);

    assert_eq!(report.months[2].total_years, 0);
    assert_eq!(report.months[2].avg_change, 0.0);

    assert_eq!(report.best_month, 1);
    assert_eq!(report.worst_month, 2);
}
