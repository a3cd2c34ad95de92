//! 로거 설정 관리
//!
//! 콘솔/파일 출력 설정과 환경변수 로딩을 담당합니다.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::level::LogLevel;

/// 콘솔 최소 레벨 환경변수
pub const ENV_LEVEL: &str = "LOGGER_LEVEL";
/// 소스 위치 출력 여부 환경변수
pub const ENV_PRINT_SOURCE: &str = "LOGGER_PRINT_SOURCE";
/// 색상 출력 여부 환경변수
pub const ENV_COLORED_OUTPUT: &str = "LOGGER_COLORED_OUTPUT";
/// 메시지 접두사 환경변수
pub const ENV_PREFIX: &str = "LOGGER_PREFIX";
/// 로그 파일 경로 환경변수 (비어 있으면 파일 출력 비활성화)
pub const ENV_FILE_PATH: &str = "LOGGER_FILE_PATH";
/// 파일 최소 레벨 환경변수
pub const ENV_FILE_LEVEL: &str = "LOGGER_FILE_LEVEL";
/// 파일 경로 날짜 접미사 환경변수
pub const ENV_FILE_APPEND_DATE: &str = "LOGGER_FILE_APPEND_DATE";

/// 파일 출력 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// 파일 출력 최소 레벨 (기본값: Info)
    pub level: LogLevel,

    /// 로그 파일의 절대/상대 경로
    pub path: String,

    /// 경로에 현재 날짜를 붙여 날마다 새 파일 사용 (기본값: false)
    pub append_date: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            path: String::new(),
            append_date: false,
        }
    }
}

impl FileConfig {
    pub fn new<P: Into<String>>(path: P) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn append_date(mut self, append_date: bool) -> Self {
        self.append_date = append_date;
        self
    }
}

/// 로거 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// 콘솔 출력 최소 레벨 (기본값: Debug)
    pub level: LogLevel,

    /// 호출 위치 "(file:line)" 출력 여부 (기본값: false)
    pub print_source: bool,

    /// 콘솔 색상 출력 여부 (기본값: true)
    ///
    /// `TERMINAL_DISABLE_COLORS`/`TERMINAL_ENABLE_COLORS` 환경변수가 항상 우선합니다.
    pub colored_output: bool,

    /// 메시지 앞에 붙는 접두사
    pub prefix: String,

    /// 파일 출력 설정 (None이면 파일 출력 없음)
    pub file: Option<FileConfig>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Debug,
            print_source: false,
            colored_output: true,
            prefix: String::new(),
            file: None,
        }
    }
}

impl LoggerConfig {
    /// 환경변수에서 설정 로드 (기본값 기준)
    pub fn from_env() -> Self {
        Self::from_env_with(Self::default())
    }

    /// 환경변수에서 설정 로드
    ///
    /// 설정되지 않은 변수는 `defaults`의 값을 유지합니다.
    pub fn from_env_with(defaults: Self) -> Self {
        let mut config = defaults;

        if let Ok(val) = std::env::var(ENV_LEVEL) {
            config.level = LogLevel::from_name(&val);
        }

        if let Ok(val) = std::env::var(ENV_PRINT_SOURCE) {
            config.print_source = parse_bool(&val);
        }

        if let Ok(val) = std::env::var(ENV_COLORED_OUTPUT) {
            config.colored_output = parse_bool(&val);
        }

        if let Ok(val) = std::env::var(ENV_PREFIX) {
            config.prefix = val;
        }

        if let Ok(val) = std::env::var(ENV_FILE_PATH) {
            config.file = if val.trim().is_empty() {
                None
            } else {
                let file = config.file.take().unwrap_or_default();
                Some(FileConfig { path: val, ..file })
            };
        }

        if let Some(file) = config.file.as_mut() {
            if let Ok(val) = std::env::var(ENV_FILE_LEVEL) {
                file.level = LogLevel::from_name(&val);
            }

            if let Ok(val) = std::env::var(ENV_FILE_APPEND_DATE) {
                file.append_date = parse_bool(&val);
            }
        }

        config
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.file {
            Some(file) if file.path.trim().is_empty() => Err(ConfigError::EmptyFilePath),
            _ => Ok(()),
        }
    }
}

/// 환경변수 불리언 해석 (`1`, `true`, `yes`, `ja`)
pub fn parse_bool(val: &str) -> bool {
    matches!(
        val.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "ja"
    )
}
