//! 전역 기본 로거
//!
//! 첫 사용 시 기본 설정(Debug 콘솔, 파일 없음)으로 초기화되며
//! [`set_global_logger`]로 언제든 교체할 수 있습니다.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::config::LoggerConfig;
use crate::level::LogLevel;
use crate::logger::Logger;

/// 전역 로거 인스턴스 (싱글톤)
static GLOBAL_LOGGER: Lazy<RwLock<Arc<Logger>>> =
    Lazy::new(|| RwLock::new(Arc::new(Logger::new(LoggerConfig::default()))));

/// 전역 로거 교체
///
/// 이전 로거를 반환합니다. 이전 로거의 파일은 닫지 않습니다.
pub fn set_global_logger(logger: Logger) -> Arc<Logger> {
    let mut global = GLOBAL_LOGGER.write();
    std::mem::replace(&mut *global, Arc::new(logger))
}

/// 전역 로거 가져오기
pub fn global_logger() -> Arc<Logger> {
    GLOBAL_LOGGER.read().clone()
}

/// 전역 로거의 파일 닫기
pub fn close_file() {
    global_logger().close_file();
}

/// 이름으로 레벨 조회 (알 수 없으면 경고 후 Info)
pub fn level_by_name(name: &str) -> LogLevel {
    LogLevel::from_name(name)
}

#[track_caller]
pub fn log(level: LogLevel, args: fmt::Arguments<'_>) {
    log_at(level, Location::caller(), args);
}

/// 잠금 밖에서 기록 (Fatal 종료 중에도 다른 스레드가 교체할 수 있도록)
pub fn log_at(level: LogLevel, location: &'static Location<'static>, args: fmt::Arguments<'_>) {
    let logger = global_logger();
    logger.log_at(level, location, args);
}

#[track_caller]
pub fn log_code(code: u8, args: fmt::Arguments<'_>) {
    global_logger().log_code(code, args);
}

#[track_caller]
pub fn trace(args: fmt::Arguments<'_>) {
    log(LogLevel::Trace, args);
}

#[track_caller]
pub fn debug(args: fmt::Arguments<'_>) {
    log(LogLevel::Debug, args);
}

#[track_caller]
pub fn info(args: fmt::Arguments<'_>) {
    log(LogLevel::Info, args);
}

#[track_caller]
pub fn warning(args: fmt::Arguments<'_>) {
    log(LogLevel::Warning, args);
}

#[track_caller]
pub fn error(args: fmt::Arguments<'_>) {
    log(LogLevel::Error, args);
}

#[track_caller]
pub fn fatal(args: fmt::Arguments<'_>) {
    log(LogLevel::Fatal, args);
}
