mod common_test_utils;
use common_test_utils::*;

use gold_candle_plan::analyzer::market_stats::{
    average_range, calculate_sentiment, calculate_type_distribution,
};

#[test]
fn test_sentiment_counts_parity() {
    let bars = series(&[0, 1, 2, 4, 7, 6]);

    let sentiment = calculate_sentiment(&bars);

    assert_eq!(sentiment.bullish, 4);
    assert_eq!(sentiment.bearish, 2);
    assert_eq!(sentiment.total(), 6);
    assert!((sentiment.bullish_pct() - 66.666_666_666).abs() < 1e-6);
}

#[test]
fn test_sentiment_empty() {
    let sentiment = calculate_sentiment(&[]);
    assert_eq!(sentiment.total(), 0);
    assert_eq!(sentiment.bullish_pct(), 0.0);
}

#[test]
fn test_type_distribution_counts() {
    let bars = series(&[3, 3, 5, 0, 3]);
    assert_eq!(
        calculate_type_distribution(&bars),
        [1, 0, 0, 3, 0, 1, 0, 0]
    );
}

#[test]
fn test_average_range() {
    let bars = vec![
        create_bar(date(2024, 1, 1), 2, 100.0, 110.0, 95.0, 106.0),
        create_bar(date(2024, 1, 2), 3, 100.0, 105.0, 80.0, 90.0),
    ];
    assert_eq!(average_range(&bars), 20.0);
    assert_eq!(average_range(&[]), 0.0);
}
