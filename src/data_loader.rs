// CSV 시세 파일을 `PriceBar` 목록으로 변환합니다.
// 데이터 수집 스크립트가 만든 파일은 지표 컬럼이 많이 섞여 있으므로
// 필요한 컬럼만 이름으로 읽고 나머지는 무시합니다.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::DataError;
use crate::model::{CandleType, DistanceMetrics, PriceBar};

#[derive(Debug, Deserialize)]
struct CsvRow {
    datetime: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    candle_type: Option<String>,
    prev_candle_1: Option<String>,
    prev_candle_2: Option<String>,
    prev_candle_3: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    high_open_dist: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    upper_wick: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    body_size: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    lower_wick: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    open_low_dist: Option<f64>,
}

/// 파일 경로에서 캔들 목록 로드
pub fn load_price_bars<P: AsRef<Path>>(path: P) -> Result<Vec<PriceBar>, DataError> {
    let path = path.as_ref();
    debug!("시세 파일 로드 시작: {}", path.display());

    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bars = load_price_bars_from_reader(file)?;

    info!("시세 파일 로드 완료: {} ({}개 캔들)", path.display(), bars.len());
    Ok(bars)
}

/// 헤더가 있는 CSV 스트림에서 캔들 목록 로드
///
/// 긴 아랫꼬리 유형(8, 9)은 긴 꼬리 유형(6, 7)으로 합칩니다.
/// 캔들 유형이 비어 있거나 0~9 범위를 벗어난 행은 건너뜁니다.
/// 순서는 파일 순서를 그대로 유지합니다.
pub fn load_price_bars_from_reader<R: Read>(reader: R) -> Result<Vec<PriceBar>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut bars = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let row: CsvRow = record.deserialize(Some(&headers))?;

        let candle_type = match parse_type_code(row.candle_type.as_deref(), line, "candle_type")? {
            Some(code) => match CandleType::from_code(fold_long_lower_wick(code)) {
                Some(candle_type) => candle_type,
                None => {
                    warn!("{}행: 지원하지 않는 캔들 유형 {} 건너뜀", line, code);
                    skipped += 1;
                    continue;
                }
            },
            None => {
                warn!("{}행: 캔들 유형 없음, 건너뜀", line);
                skipped += 1;
                continue;
            }
        };

        let datetime = parse_date(&row.datetime).ok_or_else(|| DataError::InvalidField {
            line,
            field: "datetime",
            value: row.datetime.clone(),
        })?;

        for (field, value) in [
            ("open", row.open),
            ("high", row.high),
            ("low", row.low),
            ("close", row.close),
        ] {
            if !value.is_finite() {
                return Err(DataError::InvalidField {
                    line,
                    field,
                    value: value.to_string(),
                });
            }
        }

        let derived = DistanceMetrics::from_ohlc(row.open, row.high, row.low, row.close);
        let distances = DistanceMetrics {
            high_open_dist: row.high_open_dist.unwrap_or(derived.high_open_dist),
            upper_wick: row.upper_wick.unwrap_or(derived.upper_wick),
            body_size: row.body_size.unwrap_or(derived.body_size),
            lower_wick: row.lower_wick.unwrap_or(derived.lower_wick),
            open_low_dist: row.open_low_dist.unwrap_or(derived.open_low_dist),
        };

        bars.push(PriceBar {
            datetime,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            candle_type,
            prev_candle_1: parse_prev_type(row.prev_candle_1.as_deref(), line, "prev_candle_1")?,
            prev_candle_2: parse_prev_type(row.prev_candle_2.as_deref(), line, "prev_candle_2")?,
            prev_candle_3: parse_prev_type(row.prev_candle_3.as_deref(), line, "prev_candle_3")?,
            distances,
        });
    }

    if skipped > 0 {
        warn!("분류되지 않은 행 {}개 제외", skipped);
    }
    Ok(bars)
}

/// 유형 코드 문자열 파싱
///
/// pandas가 shift 결과를 실수로 저장하므로 "6"과 "6.0"을 모두 허용합니다.
/// 빈 값은 None입니다.
fn parse_type_code(
    value: Option<&str>,
    line: u64,
    field: &'static str,
) -> Result<Option<u8>, DataError> {
    let text = match value.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(text) => text,
    };

    let invalid = || DataError::InvalidField {
        line,
        field,
        value: text.to_string(),
    };

    let number: f64 = text.parse().map_err(|_| invalid())?;
    if number.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&number) {
        return Err(invalid());
    }
    Ok(Some(number as u8))
}

/// 수집 스크립트의 긴 아랫꼬리 코드(8 상승, 9 하락)를 긴 꼬리 코드로 변환
fn fold_long_lower_wick(code: u8) -> u8 {
    match code {
        8 => CandleType::LongWickBullish.code(),
        9 => CandleType::LongWickBearish.code(),
        other => other,
    }
}

fn parse_prev_type(
    value: Option<&str>,
    line: u64,
    field: &'static str,
) -> Result<Option<CandleType>, DataError> {
    Ok(parse_type_code(value, line, field)?.and_then(|code| {
        let candle_type = CandleType::from_code(fold_long_lower_wick(code));
        if candle_type.is_none() {
            debug!("{}행 {}: 범위 밖 유형 {} 무시", line, field, code);
        }
        candle_type
    }))
}

/// "2024-12-23", "2024-12-23 00:00:00", RFC 3339 형식을 지원합니다.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}
