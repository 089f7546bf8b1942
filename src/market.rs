use log::{debug, info};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::candle_store::CandleStore;
use crate::data_loader::load_price_bars;
use crate::error::DataError;
use crate::model::PriceBar;

/// 지원 마켓
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MarketId {
    /// 금 현물 CFD
    #[default]
    Xauusd,
    /// 금 선물 연속물
    Gc1,
}

impl MarketId {
    pub const ALL: [MarketId; 2] = [MarketId::Xauusd, MarketId::Gc1];

    /// 마켓 메타데이터
    pub fn spec(self) -> &'static MarketSpec {
        &MARKETS[&self]
    }
}

impl Display for MarketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketId::Xauusd => write!(f, "xauusd"),
            MarketId::Gc1 => write!(f, "gc1"),
        }
    }
}

impl FromStr for MarketId {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xauusd" => Ok(MarketId::Xauusd),
            "gc1" | "gc1!" => Ok(MarketId::Gc1),
            _ => Err(DataError::UnknownMarket(s.to_string())),
        }
    }
}

/// 마켓 메타데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketSpec {
    pub id: MarketId,
    /// 거래소 심볼
    pub symbol: &'static str,
    pub name: &'static str,
    pub exchange: &'static str,
    /// 상품 구분 (CFD / Futures)
    pub kind: &'static str,
    /// 데이터 디렉터리 기준 CSV 파일 이름
    pub data_file: &'static str,
}

static MARKETS: Lazy<HashMap<MarketId, MarketSpec>> = Lazy::new(|| {
    let specs = [
        MarketSpec {
            id: MarketId::Xauusd,
            symbol: "XAUUSD",
            name: "Gold Spot CFD",
            exchange: "OANDA",
            kind: "CFD",
            data_file: "xauusd_10years_data.csv",
        },
        MarketSpec {
            id: MarketId::Gc1,
            symbol: "GC1!",
            name: "Gold Futures",
            exchange: "COMEX",
            kind: "Futures",
            data_file: "gc1_10years_data.csv",
        },
    ];
    specs.into_iter().map(|spec| (spec.id, spec)).collect()
});

/// 마켓별 시리즈 캐시와 현재 선택 마켓
///
/// 각 마켓의 CSV는 처음 요청될 때 한 번만 읽고, 이후에는 캐시를 사용합니다.
#[derive(Debug)]
pub struct MarketSession {
    data_dir: PathBuf,
    current: MarketId,
    cache: HashMap<MarketId, CandleStore<PriceBar>>,
}

impl MarketSession {
    /// 새로운 세션을 생성합니다.
    ///
    /// # Arguments
    /// * `data_dir` - 마켓 CSV 파일이 있는 디렉터리
    pub fn new<P: AsRef<Path>>(data_dir: P) -> MarketSession {
        MarketSession {
            data_dir: data_dir.as_ref().to_path_buf(),
            current: MarketId::default(),
            cache: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn current_market(&self) -> MarketId {
        self.current
    }

    /// 현재 마켓 변경 (캐시는 유지)
    pub fn set_market(&mut self, market: MarketId) {
        if self.current != market {
            info!("마켓 변경: {} -> {}", self.current, market);
            self.current = market;
        }
    }

    /// 마켓 시리즈 로드 (캐시에 있으면 파일을 다시 읽지 않음)
    ///
    /// # Arguments
    /// * `market` - 로드할 마켓
    ///
    /// # Returns
    /// * `Result<&CandleStore<PriceBar>, DataError>` - 날짜 오름차순 시리즈
    pub fn load(&mut self, market: MarketId) -> Result<&CandleStore<PriceBar>, DataError> {
        match self.cache.entry(market) {
            Entry::Occupied(entry) => {
                debug!("캐시된 {} 시리즈 사용", market);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let path = self.data_dir.join(market.spec().data_file);
                info!("{} 시리즈 로드: {}", market, path.display());
                let bars = load_price_bars(&path)?;
                let store = CandleStore::new(bars, true);
                info!("{} 캔들 {}개 로드 완료", market, store.len());
                Ok(entry.insert(store))
            }
        }
    }

    /// 현재 마켓 시리즈
    pub fn series(&mut self) -> Result<&CandleStore<PriceBar>, DataError> {
        self.load(self.current)
    }

    /// 파일 대신 직접 준비한 시리즈를 캐시에 넣습니다.
    pub fn insert_series(&mut self, market: MarketId, bars: Vec<PriceBar>) {
        debug!("{} 시리즈 직접 등록: 캔들 {}개", market, bars.len());
        self.cache.insert(market, CandleStore::new(bars, true));
    }

    pub fn is_cached(&self, market: MarketId) -> bool {
        self.cache.contains_key(&market)
    }

    /// 캐시 비우기 (`None`이면 전체)
    pub fn clear_cache(&mut self, market: Option<MarketId>) {
        match market {
            Some(market) => {
                self.cache.remove(&market);
            }
            None => self.cache.clear(),
        }
    }

    /// 모든 마켓을 미리 로드합니다.
    pub fn load_all(&mut self) -> Result<(), DataError> {
        for market in MarketId::ALL {
            self.load(market)?;
        }
        Ok(())
    }
}
