use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;
use std::fmt::Display;

use crate::analyzer::market_stats::average_range;
use crate::analyzer::{
    MetricsByType, PatternResolution, PredictedPrices, PredictionDistribution, RankedType, TradeSetup,
    calculate_predicted_prices, compute_average_distances, compute_distribution,
    resolve_pattern_with_policy, synthesize_setup,
};
use crate::candle_store::trailing_window;
use crate::error::AnalysisError;
use crate::market::MarketId;
use crate::model::{Lookback, PriceBar};
use crate::strategy::PlanConfig;

/// 미니 차트용 최근 캔들 수
pub const RECENT_CANDLE_COUNT: usize = 20;

/// 플랜 하나 (Plan A = 1순위, Plan B = 2순위)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEntry {
    /// 예측 유형과 확률
    pub prediction: RankedType,
    pub setup: TradeSetup,
    pub predicted: PredictedPrices,
}

/// 요약 지표
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    /// 1순위 유형 방향의 비율 (%)
    pub win_rate: f64,
    /// 조회 구간 평균 변동폭
    pub avg_range: f64,
    pub bullish_pct: f64,
    pub bearish_pct: f64,
}

/// 다음 거래일 매매 플랜
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPlan {
    pub market: MarketId,
    pub symbol: &'static str,
    /// 마지막 캔들 날짜
    pub as_of: NaiveDate,
    /// 기준 시가 (마지막 종가)
    pub open_price: f64,
    pub period: Lookback,
    /// 조회 구간 실제 캔들 수
    pub window_len: usize,
    pub resolution: PatternResolution,
    pub distribution: PredictionDistribution,
    pub plan_a: PlanEntry,
    pub plan_b: PlanEntry,
    pub summary: SummaryStats,
    /// 최근 캔들 (오름차순)
    pub recent: Vec<PriceBar>,
}

fn plan_entry(
    open_price: f64,
    prediction: RankedType,
    metrics: &MetricsByType,
) -> PlanEntry {
    let setup = synthesize_setup(open_price, prediction.candle_type, metrics);
    let predicted = calculate_predicted_prices(
        open_price,
        &setup.metrics,
        prediction.candle_type.is_bullish(),
    );
    PlanEntry {
        prediction,
        setup,
        predicted,
    }
}

/// 시리즈 하나로 다음 거래일 플랜을 만듭니다.
///
/// 패턴은 전체 시리즈의 마지막 3개 캔들에서 만들고, 유형별 평균 지표와
/// 평균 변동폭은 `config.period` 구간에서 계산합니다.
///
/// # Arguments
/// * `market` - 대상 마켓
/// * `series` - 날짜 오름차순 전체 시리즈
/// * `config` - 플랜 설정
///
/// # Returns
/// * `Result<DailyPlan, AnalysisError>` - 시리즈가 비어 있으면 `InsufficientData`
pub fn build_daily_plan(
    market: MarketId,
    series: &[PriceBar],
    config: &PlanConfig,
) -> Result<DailyPlan, AnalysisError> {
    let last = series
        .last()
        .ok_or(AnalysisError::InsufficientData { need: 1, got: 0 })?;
    let open_price = last.close;
    let period_days = config.period.resolve(series.len());

    debug!(
        "{} 플랜 계산 시작: 캔들 {}개, 기간 {}",
        market,
        series.len(),
        config.period
    );

    let resolution = resolve_pattern_with_policy(
        series,
        period_days,
        config.pattern_days,
        config.fallback_policy,
    )?;
    let distribution = compute_distribution(&resolution.matched);

    let window = trailing_window(series, period_days);
    let metrics = compute_average_distances(window);

    let plan_a = plan_entry(open_price, distribution.top, &metrics);
    let plan_b = plan_entry(open_price, distribution.second, &metrics);

    let summary = SummaryStats {
        win_rate: distribution.win_rate(),
        avg_range: average_range(window),
        bullish_pct: distribution.bullish_pct,
        bearish_pct: distribution.bearish_pct,
    };

    info!(
        "{} 플랜: A {} {:.1}%, B {} {:.1}% (표본 {}개)",
        market,
        plan_a.setup.side,
        plan_a.prediction.percent,
        plan_b.setup.side,
        plan_b.prediction.percent,
        distribution.total
    );

    Ok(DailyPlan {
        market,
        symbol: market.spec().symbol,
        as_of: last.datetime,
        open_price,
        period: config.period,
        window_len: window.len(),
        resolution,
        distribution,
        plan_a,
        plan_b,
        summary,
        recent: trailing_window(series, RECENT_CANDLE_COUNT).to_vec(),
    })
}

fn write_plan(f: &mut std::fmt::Formatter<'_>, label: &str, entry: &PlanEntry) -> std::fmt::Result {
    let setup = &entry.setup;
    writeln!(
        f,
        "[{}] {} - {} ({:.1}%)",
        label, setup.side, setup.candle_type, entry.prediction.percent
    )?;
    writeln!(
        f,
        "  진입 구간: ${:.2} - ${:.2} (기준 ${:.2})",
        setup.entry_low, setup.entry_high, setup.entry
    )?;
    writeln!(
        f,
        "  손절: ${:.2} (-{:.2} pts, {:.2}%)",
        setup.stop_loss,
        setup.risk,
        setup.risk_percent()
    )?;
    writeln!(
        f,
        "  TP1: ${:.2} (+{:.2} pts | R:R {}:1)",
        setup.take_profit_1, setup.reward_1, setup.risk_reward_1
    )?;
    writeln!(
        f,
        "  TP2: ${:.2} (+{:.2} pts | R:R {}:1)",
        setup.take_profit_2, setup.reward_2, setup.risk_reward_2
    )?;
    writeln!(
        f,
        "  예상 캔들: O ${:.2} H ${:.2} L ${:.2} C ${:.2}",
        entry.predicted.open, entry.predicted.high, entry.predicted.low, entry.predicted.close
    )?;
    for line in setup.strategy.lines() {
        writeln!(f, "  {}", line)?;
    }
    Ok(())
}

impl Display for DailyPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "=== {} 일일 플랜 ({} 기준) ===",
            self.symbol, self.as_of
        )?;
        writeln!(f, "시가: ${:.2}", self.open_price)?;
        writeln!(
            f,
            "기간: {} (캔들 {}개)",
            self.period.label(),
            self.window_len
        )?;
        if self.resolution.is_unconstrained() {
            writeln!(f, "패턴: 일치 없음, 전체 구간 사용")?;
        } else {
            writeln!(
                f,
                "패턴: {} ({}일, 구간 {})",
                self.resolution.query, self.resolution.used_days, self.resolution.used_period
            )?;
        }
        writeln!(f, "표본: {}개", self.distribution.total)?;
        writeln!(f)?;
        write_plan(f, "Plan A", &self.plan_a)?;
        writeln!(f)?;
        write_plan(f, "Plan B", &self.plan_b)?;
        writeln!(f)?;
        write!(
            f,
            "승률: {:.1}% | 평균 변동폭: ${:.2} | 상승: {:.1}% | 하락: {:.1}%",
            self.summary.win_rate,
            self.summary.avg_range,
            self.summary.bullish_pct,
            self.summary.bearish_pct
        )
    }
}
