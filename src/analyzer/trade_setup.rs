use serde::Serialize;

use crate::analyzer::distance_analyzer::MetricsByType;
use crate::model::{CandleType, DistanceMetrics, TradeSide};

/// 진입 구간 폭, 손절 여유, 익절 간격에 쓰는 고정 가격 단위
pub const PRICE_STEP: f64 = 10.0;

/// 예측 유형 하나에 대한 매매 셋업
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSetup {
    pub side: TradeSide,
    pub candle_type: CandleType,
    /// 기준 진입가
    pub entry: f64,
    /// 진입 구간 하단
    pub entry_low: f64,
    /// 진입 구간 상단
    pub entry_high: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub risk: f64,
    pub reward_1: f64,
    pub reward_2: f64,
    /// 소수점 1자리 반올림
    pub risk_reward_1: f64,
    /// 소수점 1자리 반올림
    pub risk_reward_2: f64,
    /// 영문/국문 전략 설명
    pub strategy: String,
    /// 계산에 사용한 유형 평균 지표
    pub metrics: DistanceMetrics,
}

impl TradeSetup {
    pub fn is_buy(&self) -> bool {
        self.side == TradeSide::Buy
    }

    /// 진입가 대비 손실 비율 (%)
    pub fn risk_percent(&self) -> f64 {
        if self.entry == 0.0 {
            0.0
        } else {
            self.risk / self.entry * 100.0
        }
    }
}

/// 예측 캔들의 OHLC
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictedPrices {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn ratio(reward: f64, risk: f64) -> f64 {
    if risk > 0.0 {
        round_one_decimal(reward / risk)
    } else {
        0.0
    }
}

fn strategy_text(side: TradeSide, entry_low: f64, entry_high: f64) -> String {
    match side {
        TradeSide::Buy => format!(
            "Wait for price to dip and print a lower wick inside the entry zone (${:.2} - ${:.2}), \
             then buy on a reversal signal such as a Pin Bar or Bullish Engulfing; place the stop below the wick.\n\
             가격이 진입 구간 (${:.2} - ${:.2})까지 내려와 아랫꼬리를 만드는지 기다린 뒤, \
             핀바나 상승 장악형 같은 반전 신호가 나오면 매수하고 손절은 아랫꼬리 아래에 둡니다.",
            entry_low, entry_high, entry_low, entry_high
        ),
        TradeSide::Sell => format!(
            "Wait for price to rally and print an upper wick inside the entry zone (${:.2} - ${:.2}), \
             then sell on a reversal signal such as a Pin Bar or Bearish Engulfing; place the stop above the wick.\n\
             가격이 진입 구간 (${:.2} - ${:.2})까지 올라가 윗꼬리를 만드는지 기다린 뒤, \
             핀바나 하락 장악형 같은 반전 신호가 나오면 매도하고 손절은 윗꼬리 위에 둡니다.",
            entry_low, entry_high, entry_low, entry_high
        ),
    }
}

/// 예측 유형과 유형별 평균 지표로 매매 셋업 계산
///
/// 상승 유형은 시가 아래 평균 저가 거리에서 매수, 하락 유형은 시가 위
/// 평균 고가 거리에서 매도합니다. 구간/손절/익절 간격은 모두 `PRICE_STEP`입니다.
///
/// # Arguments
/// * `open_price` - 기준 시가
/// * `predicted_type` - 예측된 캔들 유형
/// * `metrics` - 유형별 평균 거리 지표
///
/// # Returns
/// * `TradeSetup` - 진입/손절/익절 가격과 전략 설명
pub fn synthesize_setup(
    open_price: f64,
    predicted_type: CandleType,
    metrics: &MetricsByType,
) -> TradeSetup {
    let averages = metrics[predicted_type].averages;
    let side = TradeSide::for_candle(predicted_type);

    let (entry, entry_low, entry_high, stop_loss, take_profit_1, take_profit_2) = match side {
        TradeSide::Buy => {
            let entry = open_price - averages.open_low_dist;
            let entry_low = entry - PRICE_STEP;
            (
                entry,
                entry_low,
                entry,
                entry_low - PRICE_STEP,
                entry + PRICE_STEP,
                entry + 2.0 * PRICE_STEP,
            )
        }
        TradeSide::Sell => {
            let entry = open_price + averages.high_open_dist;
            let entry_high = entry + PRICE_STEP;
            (
                entry,
                entry,
                entry_high,
                entry_high + PRICE_STEP,
                entry - PRICE_STEP,
                entry - 2.0 * PRICE_STEP,
            )
        }
    };

    let risk = (entry - stop_loss).abs();
    let reward_1 = (take_profit_1 - entry).abs();
    let reward_2 = (take_profit_2 - entry).abs();

    TradeSetup {
        side,
        candle_type: predicted_type,
        entry,
        entry_low,
        entry_high,
        stop_loss,
        take_profit_1,
        take_profit_2,
        risk,
        reward_1,
        reward_2,
        risk_reward_1: ratio(reward_1, risk),
        risk_reward_2: ratio(reward_2, risk),
        strategy: strategy_text(side, entry_low, entry_high),
        metrics: averages,
    }
}

/// 시가와 유형 평균 지표로 예측 캔들의 OHLC 계산
pub fn calculate_predicted_prices(
    open_price: f64,
    averages: &DistanceMetrics,
    bullish: bool,
) -> PredictedPrices {
    let close = if bullish {
        open_price + averages.body_size
    } else {
        open_price - averages.body_size
    };

    PredictedPrices {
        open: open_price,
        high: open_price + averages.high_open_dist,
        low: open_price - averages.open_low_dist,
        close,
    }
}
