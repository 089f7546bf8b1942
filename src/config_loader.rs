use log::{debug, error, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// 설정 로드 오류
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// 파일 오류
    #[error("설정 파일 오류: {0}")]
    FileError(String),
    /// 파싱 오류
    #[error("설정 파싱 오류: {0}")]
    ParseError(String),
    /// 유효성 검사 오류
    #[error("설정 유효성 검사 오류: {0}")]
    ValidationError(String),
}

/// 설정 로드 결과
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 설정 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    /// 파일 확장자로 판단 (문자열 입력은 JSON 먼저 시도)
    Auto,
}

/// 로드 후 호출되는 유효성 검사
pub trait ConfigValidation {
    fn validate(&self) -> ConfigResult<()>;
}

/// 설정 파일 로더
#[derive(Debug)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// 파일에서 설정 로드
    ///
    /// # Arguments
    /// * `path` - 설정 파일 경로
    /// * `format` - 설정 파일 형식
    ///
    /// # Returns
    /// * `ConfigResult<T>` - 검증된 설정 객체 또는 오류
    pub fn load_from_file<T>(path: &Path, format: ConfigFormat) -> ConfigResult<T>
    where
        T: DeserializeOwned + ConfigValidation,
    {
        debug!("설정 파일 로드 시작: {}", path.display());

        let format = match format {
            ConfigFormat::Auto => Self::detect_format(path)?,
            explicit => explicit,
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            error!("설정 파일 읽기 실패: {} - {}", path.display(), e);
            ConfigError::FileError(format!("{}: {}", path.display(), e))
        })?;

        let config: T = Self::parse(&content, format)?;
        config.validate().inspect_err(|e| {
            error!("설정 유효성 검사 실패: {}", e);
        })?;

        info!("설정 파일 로드 완료: {}", path.display());
        Ok(config)
    }

    /// 문자열에서 설정 로드
    pub fn load_from_string<T>(content: &str, format: ConfigFormat) -> ConfigResult<T>
    where
        T: DeserializeOwned + ConfigValidation,
    {
        let config: T = match format {
            ConfigFormat::Auto => match Self::parse(content, ConfigFormat::Json) {
                Ok(config) => config,
                Err(_) => Self::parse(content, ConfigFormat::Toml)?,
            },
            explicit => Self::parse(content, explicit)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// 설정 파일 저장
    ///
    /// 확장자가 없거나 알 수 없으면 TOML로 저장합니다.
    pub fn save_to_file<T>(config: &T, path: &Path, format: ConfigFormat) -> ConfigResult<()>
    where
        T: Serialize + ConfigValidation,
    {
        config.validate()?;

        let format = match format {
            ConfigFormat::Auto => Self::detect_format(path).unwrap_or(ConfigFormat::Toml),
            explicit => explicit,
        };

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(config)
                .map_err(|e| ConfigError::ParseError(format!("JSON 직렬화 실패: {}", e)))?,
            _ => toml::to_string_pretty(config)
                .map_err(|e| ConfigError::ParseError(format!("TOML 직렬화 실패: {}", e)))?,
        };

        std::fs::write(path, content).map_err(|e| {
            error!("설정 파일 쓰기 실패: {} - {}", path.display(), e);
            ConfigError::FileError(format!("파일 쓰기 실패: {}", e))
        })?;

        info!("설정 파일 저장 완료: {}", path.display());
        Ok(())
    }

    fn parse<T: DeserializeOwned>(content: &str, format: ConfigFormat) -> ConfigResult<T> {
        match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| {
                warn!("JSON 파싱 실패: {}", e);
                ConfigError::ParseError(format!("JSON 파싱 실패: {}", e))
            }),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| {
                warn!("TOML 파싱 실패: {}", e);
                ConfigError::ParseError(format!("TOML 파싱 실패: {}", e))
            }),
            ConfigFormat::Auto => Err(ConfigError::ParseError(
                "형식이 지정되지 않음".to_string(),
            )),
        }
    }

    fn detect_format(path: &Path) -> ConfigResult<ConfigFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => {
                warn!("지원되지 않는 파일 형식: {}", path.display());
                Err(ConfigError::FileError(format!(
                    "파일 형식을 감지할 수 없음: {}",
                    path.display()
                )))
            }
        }
    }
}
