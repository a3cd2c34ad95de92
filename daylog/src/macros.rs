//! 로깅 매크로
//!
//! `format!` 문법을 그대로 받습니다. `logger:`를 앞에 붙이면 해당 로거로,
//! 없으면 전역 로거로 기록합니다.
//!
//! ```ignore
//! daylog::info!("listening on {}", addr);
//! daylog::error!(logger: api_logger, "request failed: {}", err);
//! ```

/// 지정된 레벨로 기록
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::global::log($level, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! trace {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.trace(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::trace(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::debug(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::info(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warning {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.warning(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::warning(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.error(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::error(::std::format_args!($($arg)+))
    };
}

/// 기록 후 프로세스 종료 (종료 코드 1)
#[macro_export]
macro_rules! fatal {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.fatal(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::fatal(::std::format_args!($($arg)+))
    };
}
