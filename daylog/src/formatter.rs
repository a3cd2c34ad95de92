//! 로그 포매터
//!
//! 로그 한 줄의 형식화를 담당합니다.
//!
//! `[LEVEL] YYYY-MM-DD HH:MM:SS (file:line) PREFIX - message`

use chrono::{DateTime, Local};
use std::panic::Location;

use crate::level::LogLevel;
use crate::rotation::TIMESTAMP_FORMAT;

/// 색상 리셋
pub const COLOR_RESET: &str = "\x1b[0m";
/// 타임스탬프 색상 (청록색)
pub const COLOR_TIMESTAMP: &str = "\x1b[1;36m";
/// 소스 위치 색상 (자홍색)
pub const COLOR_SOURCE: &str = "\x1b[1;35m";

/// 포매팅할 로그 항목
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
    pub location: &'static Location<'static>,
    pub message: &'a str,
}

/// 로그 라인 포매터
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFormatter {
    /// 호출 위치 출력 여부
    print_source: bool,
    /// 메시지 접두사
    prefix: String,
    /// 콘솔 색상 사용 여부 (감지 결과 반영)
    colored: bool,
}

impl LineFormatter {
    pub fn new<S: Into<String>>(print_source: bool, prefix: S, colored: bool) -> Self {
        Self {
            print_source,
            prefix: prefix.into(),
            colored,
        }
    }

    pub fn print_source(&self) -> bool {
        self.print_source
    }

    pub fn set_print_source(&mut self, print_source: bool) {
        self.print_source = print_source;
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix<S: Into<String>>(&mut self, prefix: S) {
        self.prefix = prefix.into();
    }

    pub fn colored(&self) -> bool {
        self.colored
    }

    pub fn set_colored(&mut self, colored: bool) {
        self.colored = colored;
    }

    /// 파일용 일반 텍스트 라인
    pub fn format(&self, record: &Record<'_>) -> String {
        format!(
            "[{}] {}{}{} - {}",
            record.level.padded_name(),
            record.timestamp.format(TIMESTAMP_FORMAT),
            self.source_message(record.location),
            self.prefix_message(),
            record.message
        )
    }

    /// 콘솔용 라인 (색상이 꺼져 있으면 일반 텍스트와 동일)
    pub fn format_console(&self, record: &Record<'_>) -> String {
        if !self.colored {
            return self.format(record);
        }

        let color = record.level.color_code();
        let source = self.source_message(record.location);
        let source = if source.is_empty() {
            source
        } else {
            format!("{COLOR_SOURCE}{source}{COLOR_RESET}")
        };

        format!(
            "{color}[{}] {COLOR_RESET}{COLOR_TIMESTAMP}{}{COLOR_RESET}{source}{} - {color}{}{COLOR_RESET}",
            record.level.padded_name(),
            record.timestamp.format(TIMESTAMP_FORMAT),
            self.prefix_message(),
            record.message
        )
    }

    /// " (file.rs:42)" 형태의 소스 위치
    pub fn source_message(&self, location: &Location<'_>) -> String {
        if !self.print_source {
            return String::new();
        }

        let file = location.file();
        let name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        format!(" ({}:{})", name, location.line())
    }

    fn prefix_message(&self) -> String {
        let prefix = self.prefix.trim();
        if prefix.is_empty() {
            String::new()
        } else {
            format!(" {prefix}")
        }
    }
}
