mod common_test_utils;
use common_test_utils::*;

use gold_candle_plan::DataError;
use gold_candle_plan::data_loader::{load_price_bars, load_price_bars_from_reader};
use gold_candle_plan::model::CandleType;
use std::io::Write;
use tempfile::NamedTempFile;

fn csv_with_rows(rows: &[&str]) -> String {
    let mut content = String::from(CSV_HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

#[test]
fn test_load_full_rows() {
    let content = csv_with_rows(&[
        "2024-12-20,2600.0,2620.0,2590.0,2615.0,2,,,,20.0,5.0,15.0,10.0,10.0",
        "2024-12-23,2615.0,2630.0,2600.0,2605.0,5,2.0,,,15.0,15.0,10.0,5.0,15.0",
        "2024-12-24,2605.0,2612.0,2601.0,2610.0,6.0,5.0,2.0,,7.0,2.0,5.0,4.0,4.0",
    ]);

    let bars = load_price_bars_from_reader(content.as_bytes()).unwrap();

    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].datetime, date(2024, 12, 20));
    assert_eq!(bars[0].candle_type, CandleType::FullBodyBullish);
    assert_eq!(bars[0].prev_candle_1, None);
    assert_eq!(bars[1].prev_candle_1, Some(CandleType::FullBodyBullish));
    assert_eq!(bars[2].candle_type, CandleType::LongWickBullish);
    assert_eq!(bars[2].prev_candle_1, Some(CandleType::NormalBearish));
    assert_eq!(bars[2].prev_candle_2, Some(CandleType::FullBodyBullish));
    assert_eq!(bars[2].prev_candle_3, None);
    assert_eq!(bars[1].distances.upper_wick, 15.0);
}

#[test]
fn test_skips_unclassified_rows() {
    let content = csv_with_rows(&[
        "2024-12-20,2600.0,2620.0,2590.0,2615.0,,,,,20.0,5.0,15.0,10.0,10.0",
        "2024-12-23,2615.0,2630.0,2600.0,2605.0,10,,,,15.0,15.0,10.0,5.0,15.0",
        "2024-12-24,2605.0,2612.0,2601.0,2610.0,0,10.0,,,7.0,2.0,5.0,4.0,4.0",
    ]);

    let bars = load_price_bars_from_reader(content.as_bytes()).unwrap();

    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].candle_type, CandleType::DojiBullish);
    // 범위를 벗어난 직전 유형은 없는 값으로 처리
    assert_eq!(bars[0].prev_candle_1, None);
}

#[test]
fn test_long_lower_wick_rows_are_kept() {
    let content = csv_with_rows(&[
        "2024-12-20,2600.0,2620.0,2590.0,2615.0,2,,,,20.0,5.0,15.0,10.0,10.0",
        "2024-12-23,2615.0,2630.0,2570.0,2620.0,9,2.0,,,15.0,10.0,5.0,45.0,45.0",
        "2024-12-24,2620.0,2656.0,2590.0,2655.0,8.0,9.0,2.0,,36.0,1.0,35.0,30.0,30.0",
    ]);

    let bars = load_price_bars_from_reader(content.as_bytes()).unwrap();

    assert_eq!(bars.len(), 3);
    assert_eq!(bars[1].candle_type, CandleType::LongWickBearish);
    assert_eq!(bars[2].datetime, date(2024, 12, 24));
    assert_eq!(bars[2].close, 2655.0);
    assert_eq!(bars[2].candle_type, CandleType::LongWickBullish);
    assert_eq!(bars[2].prev_candle_1, Some(CandleType::LongWickBearish));
    assert_eq!(bars[2].prev_candle_2, Some(CandleType::FullBodyBullish));
}

#[test]
fn test_derives_missing_distance_columns() {
    let content = "datetime,open,high,low,close,candle_type,prev_candle_1,prev_candle_2,prev_candle_3,rsi\n\
                   2024-12-20 00:00:00,100.0,110.0,95.0,106.0,2,,,,55.1\n";

    let bars = load_price_bars_from_reader(content.as_bytes()).unwrap();

    assert_eq!(bars.len(), 1);
    let distances = bars[0].distances;
    assert_eq!(distances.high_open_dist, 10.0);
    assert_eq!(distances.upper_wick, 4.0);
    assert_eq!(distances.body_size, 6.0);
    assert_eq!(distances.lower_wick, 5.0);
    assert_eq!(distances.open_low_dist, 5.0);
}

#[test]
fn test_invalid_date_reports_line() {
    let content = csv_with_rows(&[
        "2024-12-20,2600.0,2620.0,2590.0,2615.0,2,,,,20.0,5.0,15.0,10.0,10.0",
        "20/12/2024,2600.0,2620.0,2590.0,2615.0,2,,,,20.0,5.0,15.0,10.0,10.0",
    ]);

    let result = load_price_bars_from_reader(content.as_bytes());

    match result {
        Err(DataError::InvalidField { line, field, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(field, "datetime");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_invalid_type_text_is_error() {
    let content = csv_with_rows(&[
        "2024-12-20,2600.0,2620.0,2590.0,2615.0,2.5,,,,20.0,5.0,15.0,10.0,10.0",
    ]);

    let result = load_price_bars_from_reader(content.as_bytes());

    assert!(matches!(
        result,
        Err(DataError::InvalidField {
            field: "candle_type",
            ..
        })
    ));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    let content = csv_with_rows(&[
        "2024-12-20,2600.0,2620.0,2590.0,2615.0,2,,,,20.0,5.0,15.0,10.0,10.0",
        "2024-12-23,2615.0,2630.0,2600.0,2605.0,5,2,,,15.0,15.0,10.0,5.0,15.0",
    ]);
    file.write_all(content.as_bytes()).unwrap();

    let bars = load_price_bars(file.path()).unwrap();
    assert_eq!(bars.len(), 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_price_bars(dir.path().join("missing.csv"));
    assert!(matches!(result, Err(DataError::Io { .. })));
}
