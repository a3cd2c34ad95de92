//! 레벨 기반 로깅 라이브러리
//!
//! 메시지를 형식화하여 콘솔과 (선택적으로) 날짜별로 교체되는 로그 파일에 기록합니다.
//!
//! # 주요 기능
//! - **레벨 필터링**: 콘솔과 파일이 각각 독립된 최소 레벨을 가짐
//! - **날짜별 파일 관리**: 날짜가 바뀌면 다음 쓰기에서 새 파일로 교체
//! - **파일 공유**: 여러 로거가 하나의 파일 핸들에 동시에 추가 쓰기
//! - **색상 출력**: 터미널 지원 여부와 환경변수 재정의에 따라 ANSI 색상 사용
//!
//! # 사용 예시
//! ```rust,no_run
//! use daylog::{FileConfig, LogLevel, Logger, LoggerConfig};
//!
//! let config = LoggerConfig {
//!     level: LogLevel::Info,
//!     file: Some(FileConfig::new("./logs/app.log").append_date(true)),
//!     ..Default::default()
//! };
//! let logger = Logger::new(config);
//!
//! daylog::info!(logger: logger, "서버 시작: {}", 8080);
//! daylog::warning!("전역 로거로 기록");
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod formatter;
pub mod global;
pub mod level;
pub mod logger;
pub mod macros;
pub mod rotation;
pub mod sink;
pub mod terminal;

pub use config::{FileConfig, LoggerConfig};
pub use console::{Console, MemoryConsole, Stream};
pub use error::{ConfigError, InvalidLevel, ParseLevelError, SetupError, SinkError};
pub use formatter::{LineFormatter, Record};
pub use global::{close_file, global_logger, level_by_name, set_global_logger};
pub use level::LogLevel;
pub use logger::{ColorProbe, Logger, LoggerBuilder, FATAL_EXIT_CODE};
pub use rotation::{build_log_path, Clock, ManualClock, SystemClock};
pub use sink::FileSink;

/// 환경변수/전역 로거를 건드리는 테스트 직렬화
#[cfg(test)]
pub(crate) static ENV_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());
