use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

use crate::error::AnalysisError;

/// 캔들 유형 개수
pub const CANDLE_TYPE_COUNT: usize = 8;

/// 캔들 형태 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CandleShape {
    /// 몸통 10% 미만
    Doji,
    /// 몸통 70% 초과
    FullBody,
    /// 몸통과 꼬리가 균형
    Normal,
    /// 꼬리 40% 초과
    LongWick,
}

/// 캔들 유형 (0~7)
///
/// 짝수 코드는 상승(불리시), 홀수 코드는 하락(베어리시)입니다.
/// 분류 자체는 데이터 수집 단계에서 끝난 상태로 들어옵니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CandleType {
    DojiBullish = 0,
    DojiBearish = 1,
    FullBodyBullish = 2,
    FullBodyBearish = 3,
    NormalBullish = 4,
    NormalBearish = 5,
    LongWickBullish = 6,
    LongWickBearish = 7,
}

impl CandleType {
    /// 코드 오름차순으로 정렬된 전체 유형
    pub const ALL: [CandleType; CANDLE_TYPE_COUNT] = [
        CandleType::DojiBullish,
        CandleType::DojiBearish,
        CandleType::FullBodyBullish,
        CandleType::FullBodyBearish,
        CandleType::NormalBullish,
        CandleType::NormalBearish,
        CandleType::LongWickBullish,
        CandleType::LongWickBearish,
    ];

    /// 정수 코드에서 유형 생성 (범위를 벗어나면 None)
    pub fn from_code(code: u8) -> Option<CandleType> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// 배열 인덱스로 사용할 값
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_bullish(self) -> bool {
        self.code() % 2 == 0
    }

    pub fn is_bearish(self) -> bool {
        !self.is_bullish()
    }

    pub fn shape(self) -> CandleShape {
        match self {
            CandleType::DojiBullish | CandleType::DojiBearish => CandleShape::Doji,
            CandleType::FullBodyBullish | CandleType::FullBodyBearish => CandleShape::FullBody,
            CandleType::NormalBullish | CandleType::NormalBearish => CandleShape::Normal,
            CandleType::LongWickBullish | CandleType::LongWickBearish => CandleShape::LongWick,
        }
    }

    /// 화면 표시용 이름
    pub fn name(self) -> &'static str {
        match self {
            CandleType::DojiBullish => "Doji Bullish",
            CandleType::DojiBearish => "Doji Bearish",
            CandleType::FullBodyBullish => "Full Body Bullish",
            CandleType::FullBodyBearish => "Full Body Bearish",
            CandleType::NormalBullish => "Normal Candle Bullish",
            CandleType::NormalBearish => "Normal Candle Bearish",
            CandleType::LongWickBullish => "Long Wick Bullish",
            CandleType::LongWickBearish => "Long Wick Bearish",
        }
    }

    /// 분류 기준 요약
    pub fn description(self) -> &'static str {
        match self {
            CandleType::DojiBullish => "Body < 10%, Bullish",
            CandleType::DojiBearish => "Body < 10%, Bearish",
            CandleType::FullBodyBullish => "Body > 70%, Strong Up",
            CandleType::FullBodyBearish => "Body > 70%, Strong Down",
            CandleType::NormalBullish => "Balanced, Bullish",
            CandleType::NormalBearish => "Balanced, Bearish",
            CandleType::LongWickBullish => "Wick > 40%, Bullish",
            CandleType::LongWickBearish => "Wick > 40%, Bearish",
        }
    }
}

impl TryFrom<u8> for CandleType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        CandleType::from_code(code).ok_or_else(|| format!("알 수 없는 캔들 유형 코드: {}", code))
    }
}

impl From<CandleType> for u8 {
    fn from(candle_type: CandleType) -> u8 {
        candle_type.code()
    }
}

impl Display for CandleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 매매 방향
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    /// 매수
    Buy,
    /// 매도
    Sell,
}

impl TradeSide {
    /// 예측된 캔들 유형의 방향에 대응하는 매매 방향
    pub fn for_candle(candle_type: CandleType) -> TradeSide {
        if candle_type.is_bullish() {
            TradeSide::Buy
        } else {
            TradeSide::Sell
        }
    }
}

impl Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// 캔들 한 개의 거리 지표 묶음
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceMetrics {
    /// 고가 - 시가
    pub high_open_dist: f64,
    /// 윗꼬리 길이
    pub upper_wick: f64,
    /// 몸통 길이
    pub body_size: f64,
    /// 아랫꼬리 길이
    pub lower_wick: f64,
    /// 시가 - 저가
    pub open_low_dist: f64,
}

impl DistanceMetrics {
    /// OHLC 값으로부터 거리 지표 계산
    ///
    /// CSV에 거리 컬럼이 없을 때 사용합니다.
    pub fn from_ohlc(open: f64, high: f64, low: f64, close: f64) -> DistanceMetrics {
        DistanceMetrics {
            high_open_dist: high - open,
            upper_wick: high - open.max(close),
            body_size: (close - open).abs(),
            lower_wick: open.min(close) - low,
            open_low_dist: open - low,
        }
    }
}

impl std::ops::AddAssign for DistanceMetrics {
    fn add_assign(&mut self, rhs: DistanceMetrics) {
        self.high_open_dist += rhs.high_open_dist;
        self.upper_wick += rhs.upper_wick;
        self.body_size += rhs.body_size;
        self.lower_wick += rhs.lower_wick;
        self.open_low_dist += rhs.open_low_dist;
    }
}

impl std::ops::Div<f64> for DistanceMetrics {
    type Output = DistanceMetrics;

    fn div(self, rhs: f64) -> Self::Output {
        DistanceMetrics {
            high_open_dist: self.high_open_dist / rhs,
            upper_wick: self.upper_wick / rhs,
            body_size: self.body_size / rhs,
            lower_wick: self.lower_wick / rhs,
            open_low_dist: self.open_low_dist / rhs,
        }
    }
}

/// 일봉 캔들 인터페이스
pub trait Candle: Debug + Clone {
    fn datetime(&self) -> NaiveDate;
    fn open_price(&self) -> f64;
    fn high_price(&self) -> f64;
    fn low_price(&self) -> f64;
    fn close_price(&self) -> f64;
}

/// 분류가 끝난 일봉 한 개
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub datetime: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub candle_type: CandleType,
    /// 1일 전 캔들 유형
    pub prev_candle_1: Option<CandleType>,
    /// 2일 전 캔들 유형
    pub prev_candle_2: Option<CandleType>,
    /// 3일 전 캔들 유형
    pub prev_candle_3: Option<CandleType>,
    pub distances: DistanceMetrics,
}

impl PriceBar {
    /// k일 전 캔들 유형 (k = 1..=3)
    pub fn prev_candle(&self, k: usize) -> Option<CandleType> {
        match k {
            1 => self.prev_candle_1,
            2 => self.prev_candle_2,
            3 => self.prev_candle_3,
            _ => None,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.candle_type.is_bullish()
    }

    /// 일중 변동폭 (고가 - 저가)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// 종가 - 시가
    pub fn change(&self) -> f64 {
        self.close - self.open
    }
}

impl Candle for PriceBar {
    fn datetime(&self) -> NaiveDate {
        self.datetime
    }

    fn open_price(&self) -> f64 {
        self.open
    }

    fn high_price(&self) -> f64 {
        self.high
    }

    fn low_price(&self) -> f64 {
        self.low
    }

    fn close_price(&self) -> f64 {
        self.close
    }
}

/// 기간 확장 시 사용하는 고정 체크포인트 (1/2/3/5/10년)
pub const PERIOD_CHECKPOINTS: [usize; 5] = [365, 730, 1095, 1825, 3650];

/// 분석 대상 조회 기간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LookbackRepr", into = "LookbackRepr")]
pub enum Lookback {
    /// 최근 n개 캔들
    Days(usize),
    /// 전체 시리즈
    All,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LookbackRepr {
    Days(usize),
    Keyword(String),
}

impl TryFrom<LookbackRepr> for Lookback {
    type Error = String;

    fn try_from(repr: LookbackRepr) -> Result<Self, Self::Error> {
        match repr {
            LookbackRepr::Days(days) => Ok(Lookback::Days(days)),
            LookbackRepr::Keyword(word) if word.eq_ignore_ascii_case("all") => Ok(Lookback::All),
            LookbackRepr::Keyword(word) => Err(format!("알 수 없는 기간 값: {}", word)),
        }
    }
}

impl From<Lookback> for LookbackRepr {
    fn from(lookback: Lookback) -> Self {
        match lookback {
            Lookback::Days(days) => LookbackRepr::Days(days),
            Lookback::All => LookbackRepr::Keyword("all".to_string()),
        }
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Lookback::Days(365)
    }
}

impl Lookback {
    /// 시리즈 길이에 적용했을 때의 캔들 수
    pub fn resolve(self, series_len: usize) -> usize {
        match self {
            Lookback::Days(days) => days,
            Lookback::All => series_len,
        }
    }

    /// 사람이 읽는 기간 이름
    pub fn label(self) -> &'static str {
        match self {
            Lookback::Days(days) => period_label(days),
            Lookback::All => "all data",
        }
    }
}

impl Display for Lookback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookback::Days(days) => write!(f, "{} days", days),
            Lookback::All => write!(f, "all"),
        }
    }
}

/// 캔들 수를 기간 이름으로 변환
pub fn period_label(days: usize) -> &'static str {
    match days {
        d if d >= 3650 => "10 years",
        d if d >= 1825 => "5 years",
        d if d >= 1095 => "3 years",
        d if d >= 730 => "2 years",
        _ => "1 year",
    }
}

/// 패턴에 사용할 직전 캔들 수 (1~3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PatternDays(usize);

impl PatternDays {
    pub const MAX: usize = 3;

    pub fn new(days: usize) -> Result<PatternDays, AnalysisError> {
        if !(1..=Self::MAX).contains(&days) {
            return Err(AnalysisError::InvalidPatternDays(days));
        }
        Ok(PatternDays(days))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PatternDays {
    fn default() -> Self {
        PatternDays(Self::MAX)
    }
}

impl TryFrom<usize> for PatternDays {
    type Error = AnalysisError;

    fn try_from(days: usize) -> Result<Self, Self::Error> {
        PatternDays::new(days)
    }
}

impl From<PatternDays> for usize {
    fn from(days: PatternDays) -> usize {
        days.0
    }
}
