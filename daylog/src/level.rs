//! 로그 레벨
//!
//! 심각도 순서가 있는 레벨 열거형과 이름 변환, 레벨별 색상을 정의합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidLevel, ParseLevelError};

/// 로그 레벨 열거형
///
/// `Trace < Debug < Info < Warning < Error < Fatal` 순서를 가지며,
/// `설정된 레벨 <= 메시지 레벨`일 때 출력됩니다.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogLevel {
    /// 상세한 추적 정보
    Trace = 0,
    /// 디버깅 정보
    #[default]
    Debug = 1,
    /// 일반 정보
    Info = 2,
    /// 경고 상황
    #[serde(alias = "warn")]
    Warning = 3,
    /// 오류 상황 (표준 에러로 출력)
    Error = 4,
    /// 프로세스 종료 수준 오류
    #[serde(alias = "panic")]
    Fatal = 5,
}

impl LogLevel {
    /// 모든 레벨 (오름차순)
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// 로그 레벨을 문자열로 변환
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// 고정 폭(5자)으로 맞춘 레벨 이름
    pub fn padded_name(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO ",
            LogLevel::Warning => "WARN ",
            other => other.as_str(),
        }
    }

    /// ANSI 색상 코드 반환
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Trace => "\x1b[0;35m",   // 연한 자홍색
            LogLevel::Debug => "\x1b[0;32m",   // 녹색
            LogLevel::Info => "\x1b[1;34m",    // 파란색
            LogLevel::Warning => "\x1b[1;33m", // 노란색
            LogLevel::Error | LogLevel::Fatal => "\x1b[1;31m", // 빨간색
        }
    }

    /// 표준 에러로 가야 하는 레벨인지 여부
    pub fn is_stderr(&self) -> bool {
        *self >= LogLevel::Error
    }

    /// 관대한 이름 파싱
    ///
    /// 알 수 없는 이름이면 기본 로거로 경고를 남기고 `Info`를 반환합니다.
    pub fn from_name(name: &str) -> LogLevel {
        match name.parse() {
            Ok(level) => level,
            Err(_) => {
                crate::global::warning(format_args!(
                    "Unable to parse the level name '{}'. Expected 'debug', 'info', 'warn', 'error' or 'fatal'",
                    name.to_lowercase()
                ));
                LogLevel::Info
            }
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "panic" | "fatal" => Ok(LogLevel::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = InvalidLevel;

    fn try_from(code: u8) -> Result<Self, InvalidLevel> {
        LogLevel::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(InvalidLevel(code))
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> u8 {
        level as u8
    }
}
