use std::path::PathBuf;

/// 분석 단계 오류
///
/// 핵심 계산은 대부분 0 또는 중립 값으로 대체하지만,
/// 입력 자체가 비어 있는 경우처럼 결과를 만들 수 없을 때만 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("데이터 부족: 최소 {need}개 캔들 필요, 현재 {got}개")]
    InsufficientData { need: usize, got: usize },

    #[error("패턴 일수는 1~3 사이여야 합니다: {0}")]
    InvalidPatternDays(usize),
}

/// 시세 데이터 로드 오류
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("파일 읽기 실패: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV 파싱 실패: {0}")]
    Csv(#[from] csv::Error),

    #[error("{line}행 {field} 값이 올바르지 않음: {value:?}")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("지원되지 않는 마켓: {0}")]
    UnknownMarket(String),
}
