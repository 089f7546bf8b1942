use chrono::{Duration, NaiveDate};
use gold_candle_plan::model::{CandleType, DistanceMetrics, PriceBar};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn candle_type(code: u8) -> CandleType {
    CandleType::from_code(code).unwrap()
}

/// 직전 유형이 비어 있는 단일 캔들
pub fn create_bar(datetime: NaiveDate, code: u8, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
    PriceBar {
        datetime,
        open,
        high,
        low,
        close,
        candle_type: candle_type(code),
        prev_candle_1: None,
        prev_candle_2: None,
        prev_candle_3: None,
        distances: DistanceMetrics::from_ohlc(open, high, low, close),
    }
}

/// 유형 방향에 맞는 OHLC로 캔들 생성
///
/// 상승 유형은 시가 + 5 종가, 하락 유형은 시가 - 5 종가이며
/// 고가는 몸통 위 3, 저가는 몸통 아래 2입니다.
pub fn create_typed_bar(datetime: NaiveDate, code: u8, open: f64) -> PriceBar {
    let close = if candle_type(code).is_bullish() {
        open + 5.0
    } else {
        open - 5.0
    };
    create_bar(
        datetime,
        code,
        open,
        open.max(close) + 3.0,
        open.min(close) - 2.0,
        close,
    )
}

/// 유형 코드 목록으로 연속 일자 시리즈 생성
///
/// `prev_candle_k`는 k개 앞 캔들의 유형으로 채웁니다.
pub fn create_series_from_types(start: NaiveDate, codes: &[u8]) -> Vec<PriceBar> {
    let mut bars: Vec<PriceBar> = codes
        .iter()
        .enumerate()
        .map(|(i, &code)| create_typed_bar(start + Duration::days(i as i64), code, 2000.0 + i as f64))
        .collect();
    link_prev_types(&mut bars);
    bars
}

/// 시리즈 순서대로 `prev_candle_1..3` 채우기
pub fn link_prev_types(bars: &mut [PriceBar]) {
    let types: Vec<CandleType> = bars.iter().map(|bar| bar.candle_type).collect();
    for (i, bar) in bars.iter_mut().enumerate() {
        bar.prev_candle_1 = i.checked_sub(1).map(|j| types[j]);
        bar.prev_candle_2 = i.checked_sub(2).map(|j| types[j]);
        bar.prev_candle_3 = i.checked_sub(3).map(|j| types[j]);
    }
}

/// 기본 시작일(2015-01-01) 시리즈
pub fn series(codes: &[u8]) -> Vec<PriceBar> {
    create_series_from_types(date(2015, 1, 1), codes)
}

/// 같은 패턴이 반복되는 긴 시리즈
pub fn create_repeating_series(pattern: &[u8], count: usize) -> Vec<PriceBar> {
    let codes: Vec<u8> = pattern.iter().copied().cycle().take(count).collect();
    series(&codes)
}

/// 몸통 크기만 바꾼 캔들
pub fn with_body(mut bar: PriceBar, body_size: f64) -> PriceBar {
    bar.distances.body_size = body_size;
    bar
}

pub const CSV_HEADER: &str = "datetime,open,high,low,close,candle_type,prev_candle_1,prev_candle_2,prev_candle_3,high_open_dist,upper_wick,body_size,lower_wick,open_low_dist";
