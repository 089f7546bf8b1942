use crate::model::Candle;

/// 시간순 캔들 시리즈 저장소
///
/// datetime 기준 오름차순으로 정렬된 상태를 유지합니다 (가장 최근 캔들이 마지막).
/// 한 마켓의 시리즈 전체를 담으며, 분석 함수에는 슬라이스로 전달됩니다.
#[derive(Debug, Clone)]
pub struct CandleStore<T: Candle> {
    items: Vec<T>,
    pub use_duplicated_filter: bool,
}

impl<T> CandleStore<T>
where
    T: Candle,
{
    /// 새로운 CandleStore 인스턴스를 생성합니다.
    ///
    /// # Arguments
    /// * `items` - 초기 캔들 목록 (정렬되지 않아도 됨)
    /// * `use_duplicated_filter` - 같은 날짜의 캔들을 하나만 유지할지 여부
    ///
    /// # Returns
    /// * `CandleStore<T>` - 생성된 저장소 인스턴스
    pub fn new(mut items: Vec<T>, use_duplicated_filter: bool) -> CandleStore<T> {
        // 안정 정렬이므로 같은 날짜는 입력 순서가 유지됨
        items.sort_by_key(|item| item.datetime());

        if use_duplicated_filter {
            let before = items.len();
            items.dedup_by_key(|item| item.datetime());
            if items.len() < before {
                log::warn!("중복 날짜 캔들 {}개 제거", before - items.len());
            }
        }

        CandleStore {
            items,
            use_duplicated_filter,
        }
    }

    /// 캔들을 날짜 순서에 맞는 위치에 삽입합니다.
    ///
    /// 중복 필터링이 활성화된 경우, 같은 날짜의 캔들이 이미 있으면 삽입하지 않습니다.
    pub fn add(&mut self, data: T) {
        match self
            .items
            .binary_search_by_key(&data.datetime(), |item| item.datetime())
        {
            Ok(_) if self.use_duplicated_filter => {
                log::debug!("중복 캔들 무시: {}", data.datetime());
            }
            Ok(idx) => self.items.insert(idx + 1, data),
            Err(idx) => self.items.insert(idx, data),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 가장 오래된 캔들
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// 가장 최근 캔들
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// 전체 시리즈 (오름차순)
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// 최근 `days`개 캔들 구간을 반환합니다.
    ///
    /// `days`가 0이거나 시리즈 길이 이상이면 전체 시리즈를 반환합니다.
    ///
    /// # Arguments
    /// * `days` - 구간 길이
    ///
    /// # Returns
    /// * `&[T]` - 오름차순 구간 슬라이스
    pub fn window(&self, days: usize) -> &[T] {
        trailing_window(&self.items, days)
    }
}

/// 슬라이스의 마지막 `days`개 요소
///
/// `days`가 0이거나 길이 이상이면 전체를 돌려줍니다.
pub fn trailing_window<T>(items: &[T], days: usize) -> &[T] {
    if days == 0 || days >= items.len() {
        return items;
    }
    &items[items.len() - days..]
}
