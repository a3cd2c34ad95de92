//! 로거 파사드
//!
//! 레벨 확인, 렌더링, 콘솔/파일 라우팅을 담당합니다.
//!
//! 여러 `Logger`가 같은 [`FileSink`] 상태를 공유할 수 있습니다.
//! [`Logger::with_file`]은 다른 로거의 파일을 그대로 사용하고,
//! `clone()`은 설정을 복사하되 같은 물리 파일에 씁니다.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use tracing::debug;

use crate::config::LoggerConfig;
use crate::console::{Console, Stream};
use crate::error::{InvalidLevel, SetupError, SinkError};
use crate::formatter::{LineFormatter, Record};
use crate::level::LogLevel;
use crate::rotation::{Clock, SystemClock};
use crate::sink::FileSink;
use crate::terminal;

/// 프로세스 종료 코드 (Fatal)
pub const FATAL_EXIT_CODE: i32 = 1;

/// 색상 지원 감지 함수 (요청 여부 → 실제 사용 여부)
pub type ColorProbe = fn(bool) -> Result<bool, SetupError>;

/// 로거 파사드
#[derive(Debug)]
pub struct Logger {
    /// 콘솔 출력 최소 레벨
    level: LogLevel,
    /// 색상 출력 요청 여부 (실제 사용 여부는 formatter에 반영)
    colored_output: bool,
    formatter: LineFormatter,
    console: Console,
    file: Option<FileSink>,
    clock: Arc<dyn Clock>,
    color_probe: ColorProbe,
}

/// 로거 생성기
#[derive(Debug)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    console: Console,
    clock: Option<Arc<dyn Clock>>,
    shared_file: Option<FileSink>,
    color_probe: ColorProbe,
}

impl LoggerBuilder {
    /// 콘솔 작성기 지정 (기본값: 표준 스트림)
    pub fn console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// 시계 지정 (기본값: 시스템 시계)
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// 색상 지원 감지 함수 지정 (기본값: [`terminal::colors_supported`])
    pub fn color_probe(mut self, probe: ColorProbe) -> Self {
        self.color_probe = probe;
        self
    }

    /// 다른 로거의 파일을 공유
    pub fn share_file(mut self, other: &Logger) -> Self {
        self.shared_file = other.file.clone();
        self
    }

    #[track_caller]
    pub fn build(self) -> Logger {
        let LoggerBuilder {
            config,
            console,
            clock,
            shared_file,
            color_probe,
        } = self;

        let keep_file = shared_file.is_some();
        let file = match shared_file {
            Some(sink) => {
                let level = config.file.as_ref().map_or(sink.level(), |file| file.level);
                Some(sink.share(level))
            }
            None => config.file.as_ref().map(|file| match &clock {
                Some(clock) => FileSink::with_clock(file, clock.clone()),
                None => FileSink::new(file),
            }),
        };
        let clock = clock
            .or_else(|| file.as_ref().map(|sink| sink.clock().clone()))
            .unwrap_or_else(|| Arc::new(SystemClock));

        let mut logger = Logger {
            level: config.level,
            colored_output: config.colored_output,
            formatter: LineFormatter::new(config.print_source, config.prefix, false),
            console,
            file,
            clock,
            color_probe,
        };
        logger.setup_or_degrade(keep_file);
        logger
    }
}

impl Logger {
    /// 설정으로 새 로거 생성 (파일이 있으면 엽니다)
    #[track_caller]
    pub fn new(config: LoggerConfig) -> Self {
        Self::builder(config).build()
    }

    /// `other`의 파일을 공유하는 새 로거 생성
    ///
    /// 파일을 다시 열거나 닫지 않습니다. 파일 레벨은 `config.file`이 있으면 그 값을,
    /// 없으면 `other`의 파일 레벨을 사용합니다.
    #[track_caller]
    pub fn with_file(config: LoggerConfig, other: &Logger) -> Self {
        Self::builder(config).share_file(other).build()
    }

    pub fn builder(config: LoggerConfig) -> LoggerBuilder {
        LoggerBuilder {
            config,
            console: Console::default(),
            clock: None,
            shared_file: None,
            color_probe: terminal::colors_supported,
        }
    }

    /// 로거 셋업
    ///
    /// `keep_file`이 false이면 자신의 파일을 엽니다 (경로가 없으면 닫습니다).
    /// 파일 열기 실패는 Error 레벨로 콘솔에 보고되며 에러로 반환되지 않습니다.
    /// 색상 감지 실패 시 색상 없이 동작하고 에러를 반환합니다.
    #[track_caller]
    pub fn setup(&mut self, keep_file: bool) -> Result<(), SetupError> {
        self.console.flush();

        if !keep_file {
            let has_path = self
                .file
                .as_ref()
                .map(|sink| !sink.path().trim().is_empty());

            match has_path {
                Some(true) => {
                    let opened = self.file.as_ref().map(FileSink::open);
                    if let Some(Err(err)) = opened {
                        self.report_sink_error(&err, Location::caller());
                    }
                }
                Some(false) => {
                    if let Some(sink) = self.file.take() {
                        sink.close();
                    }
                }
                None => {}
            }
        }

        self.resolve_colors()
    }

    #[track_caller]
    fn setup_or_degrade(&mut self, keep_file: bool) {
        if let Err(err) = self.setup(keep_file) {
            self.log(LogLevel::Debug, format_args!("Logger setup failed: {err}"));
        }
    }

    fn resolve_colors(&mut self) -> Result<(), SetupError> {
        match (self.color_probe)(self.colored_output) {
            Ok(enabled) => {
                self.formatter.set_colored(enabled);
                Ok(())
            }
            Err(err) => {
                self.formatter.set_colored(false);
                Err(err)
            }
        }
    }

    /// 콘솔 최소 레벨
    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    /// 파일 최소 레벨 (파일이 없으면 None)
    pub fn file_level(&self) -> Option<LogLevel> {
        self.file.as_ref().map(FileSink::level)
    }

    /// 이 로거의 파일 레벨만 변경 (공유하는 다른 로거에는 영향 없음)
    pub fn set_file_level(&mut self, level: LogLevel) {
        if let Some(sink) = self.file.as_mut() {
            sink.set_level(level);
        }
    }

    pub fn prefix(&self) -> &str {
        self.formatter.prefix()
    }

    pub fn set_prefix<S: Into<String>>(&mut self, prefix: S) {
        self.formatter.set_prefix(prefix);
    }

    pub fn print_source(&self) -> bool {
        self.formatter.print_source()
    }

    pub fn set_print_source(&mut self, print_source: bool) {
        self.formatter.set_print_source(print_source);
    }

    /// 색상 출력 요청 변경 후 지원 여부 재감지
    pub fn set_colored_output(&mut self, colored_output: bool) -> Result<(), SetupError> {
        self.colored_output = colored_output;
        self.resolve_colors()
    }

    /// 콘솔에 실제로 색상을 쓰는지 여부
    pub fn colors_enabled(&self) -> bool {
        self.formatter.colored()
    }

    pub fn file_sink(&self) -> Option<&FileSink> {
        self.file.as_ref()
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// 현재 설정 스냅샷
    pub fn config(&self) -> LoggerConfig {
        LoggerConfig {
            level: self.level,
            print_source: self.formatter.print_source(),
            colored_output: self.colored_output,
            prefix: self.formatter.prefix().to_string(),
            file: self.file.as_ref().map(FileSink::config),
        }
    }

    /// 기반 파일 닫기
    ///
    /// 같은 파일을 공유하는 모든 로거의 파일 출력이 중단됩니다.
    pub fn close_file(&self) {
        if let Some(sink) = &self.file {
            sink.close();
        }
    }

    /// 지정된 레벨로 로그 작성
    ///
    /// `Fatal`이면 양쪽 출력 후 프로세스를 종료합니다.
    #[track_caller]
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.log_at(level, Location::caller(), args);
    }

    /// 원시 레벨 코드로 로그 작성
    ///
    /// 알 수 없는 코드는 Warning으로 처리하고 메시지 앞에 대체 사실을 붙입니다.
    #[track_caller]
    pub fn log_code(&self, code: u8, args: fmt::Arguments<'_>) {
        match LogLevel::try_from(code) {
            Ok(level) => self.log(level, args),
            Err(InvalidLevel(code)) => self.log(
                LogLevel::Warning,
                format_args!("Invalid level value given: {code}. Original message: {args}"),
            ),
        }
    }

    /// 호출 위치를 직접 지정해 로그 작성
    pub fn log_at(
        &self,
        level: LogLevel,
        location: &'static Location<'static>,
        args: fmt::Arguments<'_>,
    ) {
        let fatal = level == LogLevel::Fatal;
        if !fatal && !self.enabled(level) {
            return;
        }

        match render(args) {
            Ok(message) => self.emit(level, location, &message),
            Err(partial) => {
                debug!(level = %level, "로그 메시지 포매팅 실패");
                self.emit(
                    LogLevel::Debug,
                    location,
                    &format!("Failed to format {level} message: {partial}"),
                );
            }
        }

        if fatal {
            self.console.flush();
            std::process::exit(FATAL_EXIT_CODE);
        }
    }

    /// 이 레벨이 콘솔이나 파일 중 하나에라도 출력되는지 여부
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level <= level || self.file_level().is_some_and(|file_level| file_level <= level)
    }

    #[track_caller]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    #[track_caller]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warning, args);
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }

    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Fatal, args);
    }

    fn emit(&self, level: LogLevel, location: &'static Location<'static>, message: &str) {
        let record = Record {
            level,
            timestamp: self.clock.now(),
            location,
            message,
        };

        if let Some(sink) = self.file.as_ref().filter(|sink| sink.level() <= level) {
            if let Err(err) = sink.append(&self.formatter.format(&record), level) {
                if err.is_reportable() {
                    self.report_sink_error(&err, location);
                }
            }
        }

        if self.level <= level {
            let stream = if level.is_stderr() {
                Stream::Stderr
            } else {
                Stream::Stdout
            };
            self.console
                .write_line(stream, &self.formatter.format_console(&record));
        }
    }

    /// 파일 에러를 콘솔에만 Error 레벨로 보고
    fn report_sink_error(&self, err: &SinkError, location: &'static Location<'static>) {
        if self.level > LogLevel::Error {
            return;
        }

        let message = err.to_string();
        let record = Record {
            level: LogLevel::Error,
            timestamp: self.clock.now(),
            location,
            message: &message,
        };
        self.console
            .write_line(Stream::Stderr, &self.formatter.format_console(&record));
    }
}

impl Clone for Logger {
    /// 설정을 복사하고, 같은 물리 파일을 가리키는 새 싱크를 만듭니다.
    #[track_caller]
    fn clone(&self) -> Self {
        let mut logger = Logger {
            level: self.level,
            colored_output: self.colored_output,
            formatter: self.formatter.clone(),
            console: self.console.clone(),
            file: self.file.as_ref().map(|sink| sink.share(sink.level())),
            clock: self.clock.clone(),
            color_probe: self.color_probe,
        };
        logger.setup_or_degrade(true);
        logger
    }
}

impl Default for Logger {
    #[track_caller]
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

/// `fmt::Arguments` 렌더링 (실패 시 부분 결과 반환)
fn render(args: fmt::Arguments<'_>) -> Result<String, String> {
    let mut message = String::new();
    match fmt::write(&mut message, args) {
        Ok(()) => Ok(message),
        Err(fmt::Error) => Err(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;
    use crate::console::MemoryConsole;
    use crate::rotation::ManualClock;
    use crate::ENV_LOCK;
    use chrono::{Local, TimeZone};
    use std::fs;
    use tempfile::TempDir;

    fn fixed_clock() -> Arc<ManualClock> {
        let now = Local
            .with_ymd_and_hms(2024, 7, 1, 9, 30, 0)
            .earliest()
            .expect("Test assertion failed");
        Arc::new(ManualClock::new(now))
    }

    fn plain_config(level: LogLevel) -> LoggerConfig {
        LoggerConfig {
            level,
            colored_output: false,
            ..Default::default()
        }
    }

    fn memory_logger(config: LoggerConfig) -> (Logger, MemoryConsole) {
        let (console, capture) = Console::memory();
        let logger = Logger::builder(config)
            .console(console)
            .clock(fixed_clock())
            .build();
        (logger, capture)
    }

    fn file_lines(logger: &Logger) -> Vec<String> {
        let path = logger
            .file_sink()
            .map(FileSink::file_path)
            .expect("Test assertion failed");
        fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    struct FailingDisplay;

    impl fmt::Display for FailingDisplay {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("half")?;
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_console_threshold_for_every_level_pair() {
        for configured in LogLevel::ALL {
            let (logger, capture) = memory_logger(plain_config(configured));

            for level in LogLevel::ALL.into_iter().filter(|l| *l != LogLevel::Fatal) {
                capture.clear();
                logger.log(level, format_args!("message"));
                assert_eq!(
                    capture.len(),
                    usize::from(configured <= level),
                    "configured {configured}, logged {level}"
                );
            }
        }
    }

    #[test]
    fn test_stream_routing() {
        let (logger, capture) = memory_logger(plain_config(LogLevel::Trace));

        logger.trace(format_args!("t"));
        logger.debug(format_args!("d"));
        logger.info(format_args!("i"));
        logger.warning(format_args!("w"));
        logger.error(format_args!("e"));

        assert_eq!(capture.stdout().len(), 4);
        assert_eq!(capture.stderr().len(), 1);
    }

    #[test]
    fn test_end_to_end_console_only() {
        let (logger, capture) = memory_logger(plain_config(LogLevel::Warning));

        logger.log(LogLevel::Info, format_args!("x={}", 5));
        assert!(capture.is_empty());

        logger.log(LogLevel::Error, format_args!("boom"));
        assert!(capture.stdout().is_empty());
        assert_eq!(capture.stderr(), vec!["[ERROR] 2024-07-01 09:30:00 - boom"]);
    }

    #[test]
    fn test_file_threshold_is_independent() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let path = temp_dir.path().join("app.log");
        let config = LoggerConfig {
            file: Some(FileConfig::new(path.to_string_lossy()).level(LogLevel::Debug)),
            ..plain_config(LogLevel::Error)
        };
        let (logger, capture) = memory_logger(config);

        logger.debug(format_args!("only in file"));
        assert!(capture.is_empty());
        assert_eq!(
            file_lines(&logger),
            vec!["[DEBUG] 2024-07-01 09:30:00 - only in file"]
        );
    }

    #[test]
    fn test_clone_has_independent_file_level() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let path = temp_dir.path().join("app.log");
        let config = LoggerConfig {
            file: Some(FileConfig::new(path.to_string_lossy()).level(LogLevel::Info)),
            ..plain_config(LogLevel::Fatal)
        };
        let (logger, _capture) = memory_logger(config);

        let mut cloned = logger.clone();
        cloned.set_file_level(LogLevel::Error);

        assert_eq!(logger.file_level(), Some(LogLevel::Info));
        assert_eq!(cloned.file_level(), Some(LogLevel::Error));

        let original_sink = logger.file_sink().expect("Test assertion failed");
        let cloned_sink = cloned.file_sink().expect("Test assertion failed");
        assert!(cloned_sink.shares_file_with(original_sink));

        logger.info(format_args!("original"));
        cloned.info(format_args!("filtered"));
        cloned.error(format_args!("cloned"));

        assert_eq!(
            file_lines(&logger),
            vec![
                "[INFO ] 2024-07-01 09:30:00 - original",
                "[ERROR] 2024-07-01 09:30:00 - cloned",
            ]
        );
    }

    #[test]
    fn test_with_file_shares_handle() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let path = temp_dir.path().join("shared.log");
        let config = LoggerConfig {
            file: Some(FileConfig::new(path.to_string_lossy()).level(LogLevel::Warning)),
            ..plain_config(LogLevel::Fatal)
        };
        let (first, _capture) = memory_logger(config);

        let second_config = LoggerConfig {
            prefix: "second".to_string(),
            file: Some(FileConfig::default().level(LogLevel::Debug)),
            ..plain_config(LogLevel::Fatal)
        };
        let second = Logger::with_file(second_config, &first);

        let second_sink = second.file_sink().expect("Test assertion failed");
        assert!(second_sink.shares_file_with(first.file_sink().expect("Test assertion failed")));
        assert_eq!(second_sink.path(), path.to_string_lossy());
        assert_eq!(second.file_level(), Some(LogLevel::Debug));

        second.debug(format_args!("from second"));
        first.debug(format_args!("suppressed"));

        let lines = file_lines(&first);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(" second - from second"));

        // 공유 로거의 파일 닫기는 양쪽 모두에 적용됨
        second.close_file();
        assert!(!first.file_sink().expect("Test assertion failed").is_open());
    }

    #[test]
    fn test_broken_file_keeps_console_output() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        fs::write(temp_dir.path().join("blocker"), b"").expect("Test assertion failed");
        let path = temp_dir.path().join("blocker").join("app.log");
        let config = LoggerConfig {
            file: Some(FileConfig::new(path.to_string_lossy()).level(LogLevel::Trace)),
            ..plain_config(LogLevel::Info)
        };
        let (logger, capture) = memory_logger(config);

        // 셋업 중 열기 실패가 한 번 보고됨
        let reported = capture.stderr();
        assert_eq!(reported.len(), 1);
        assert!(reported[0].contains("Cannot access the log file"));

        logger.info(format_args!("still printed"));
        logger.info(format_args!("again"));

        assert_eq!(capture.stderr().len(), 1);
        assert_eq!(
            capture.stdout(),
            vec![
                "[INFO ] 2024-07-01 09:30:00 - still printed",
                "[INFO ] 2024-07-01 09:30:00 - again",
            ]
        );
    }

    #[test]
    fn test_setup_report_points_at_construction_site() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        fs::write(temp_dir.path().join("blocker"), b"").expect("Test assertion failed");
        let path = temp_dir.path().join("blocker").join("app.log");
        let config = LoggerConfig {
            print_source: true,
            file: Some(FileConfig::new(path.to_string_lossy())),
            ..plain_config(LogLevel::Info)
        };
        let (console, capture) = Console::memory();

        let line = line!() + 1;
        let _logger = Logger::builder(config).console(console).clock(fixed_clock()).build();

        let reported = capture.stderr();
        assert_eq!(reported.len(), 1);
        assert!(reported[0].contains(&format!("(logger.rs:{line})")));
    }

    fn failing_color_detection(_requested: bool) -> Result<bool, SetupError> {
        Err(SetupError::ColorProbe("no console".to_string()))
    }

    #[test]
    fn test_color_detection_failure_degrades_to_plain_output() {
        let config = LoggerConfig {
            level: LogLevel::Debug,
            colored_output: true,
            ..Default::default()
        };
        let (console, capture) = Console::memory();
        let mut logger = Logger::builder(config)
            .console(console)
            .clock(fixed_clock())
            .color_probe(failing_color_detection)
            .build();

        assert!(!logger.colors_enabled());
        assert_eq!(
            capture.stdout(),
            vec!["[DEBUG] 2024-07-01 09:30:00 - Logger setup failed: color support probe failed: no console"]
        );

        // 복제도 같은 감지 함수를 사용
        capture.clear();
        let cloned = logger.clone();
        assert!(!cloned.colors_enabled());
        assert_eq!(capture.len(), 1);

        assert!(logger.set_colored_output(true).is_err());
        assert!(!logger.colors_enabled());
    }

    #[test]
    fn test_blank_file_path_disables_file() {
        let config = LoggerConfig {
            file: Some(FileConfig::new("  ")),
            ..plain_config(LogLevel::Info)
        };
        let (logger, capture) = memory_logger(config);

        assert!(logger.file_sink().is_none());
        assert!(capture.is_empty());
    }

    #[test]
    fn test_invalid_level_code_becomes_warning() {
        let (logger, capture) = memory_logger(plain_config(LogLevel::Trace));

        logger.log_code(42, format_args!("odd {}", "value"));
        logger.log_code(2, format_args!("fine"));

        assert_eq!(
            capture.stdout(),
            vec![
                "[WARN ] 2024-07-01 09:30:00 - Invalid level value given: 42. Original message: odd value",
                "[INFO ] 2024-07-01 09:30:00 - fine",
            ]
        );
    }

    #[test]
    fn test_render_failure_degrades_to_debug() {
        let (logger, capture) = memory_logger(plain_config(LogLevel::Trace));

        logger.error(format_args!("value: {}", FailingDisplay));

        assert!(capture.stderr().is_empty());
        assert_eq!(
            capture.stdout(),
            vec!["[DEBUG] 2024-07-01 09:30:00 - Failed to format ERROR message: value: half"]
        );
    }

    #[test]
    fn test_source_locator_points_at_caller() {
        let mut config = plain_config(LogLevel::Trace);
        config.print_source = true;
        let (logger, capture) = memory_logger(config);

        let line = line!() + 1;
        logger.info(format_args!("here"));

        assert_eq!(
            capture.stdout(),
            vec![format!("[INFO ] 2024-07-01 09:30:00 (logger.rs:{line}) - here")]
        );
    }

    #[test]
    fn test_colored_output_respects_overrides() {
        let _guard = ENV_LOCK.lock();
        std::env::remove_var(terminal::ENV_DISABLE_COLORS);
        std::env::set_var(terminal::ENV_ENABLE_COLORS, "1");

        let config = LoggerConfig {
            level: LogLevel::Trace,
            ..Default::default()
        };
        let (mut logger, capture) = memory_logger(config);
        assert!(logger.colors_enabled());

        logger.warning(format_args!("careful"));
        let line = capture.stdout().pop().expect("Test assertion failed");
        assert!(line.starts_with("\x1b[1;33m[WARN ] \x1b[0m"));

        std::env::set_var(terminal::ENV_DISABLE_COLORS, "1");
        logger
            .set_colored_output(true)
            .expect("Test assertion failed");
        assert!(!logger.colors_enabled());

        std::env::remove_var(terminal::ENV_DISABLE_COLORS);
        std::env::remove_var(terminal::ENV_ENABLE_COLORS);
    }

    #[test]
    fn test_config_snapshot() {
        let config = LoggerConfig {
            level: LogLevel::Info,
            print_source: true,
            colored_output: false,
            prefix: "svc".to_string(),
            file: None,
        };
        let (mut logger, _capture) = memory_logger(config.clone());
        assert_eq!(logger.config(), config);

        logger.set_prefix("other");
        logger.set_level(LogLevel::Error);
        assert_eq!(logger.prefix(), "other");
        assert_eq!(logger.config().level, LogLevel::Error);
    }
}
