use anyhow::{Context, Result};
use daylog::{FileConfig, LogLevel, Logger, LoggerConfig};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // .env가 없어도 계속 진행
    dotenv().ok();

    // daylog 내부 진단 로그 (RUST_LOG로 조절)
    let filter = EnvFilter::from_default_env()
        .add_directive("info".parse().context("로깅 필터 파싱 실패")?);
    fmt().with_env_filter(filter).init();

    // 전역 로거 설정 (LOGGER_* 환경변수가 있으면 우선)
    let defaults = LoggerConfig {
        level: LogLevel::Trace,
        print_source: true,
        colored_output: true,
        prefix: "PREFIX".to_string(),
        file: Some(
            FileConfig::new("./logs/")
                .level(LogLevel::Warning)
                .append_date(true),
        ),
    };
    let config = LoggerConfig::from_env_with(defaults);
    config.validate().context("로거 설정 검증 실패")?;
    info!(file = ?config.file, "▶ 전역 로거 설정");
    daylog::set_global_logger(Logger::new(config));

    // 레벨별 출력
    daylog::trace!("You can't find me within {} hours", 5);
    daylog::debug!("Im a bunny hunter");
    daylog::info!("That should be a feature.\nOf course!");
    daylog::warning!("But it would not be safe to use it");
    daylog::error!("Now it happened");

    // 같은 파일에 기록하는 새 로거
    let other_config = LoggerConfig {
        level: LogLevel::Debug,
        print_source: false,
        colored_output: false,
        prefix: String::new(),
        file: Some(FileConfig::default().level(LogLevel::Debug)),
    };
    let other = Logger::with_file(other_config, &daylog::global_logger());

    daylog::log!(logger: other, LogLevel::Debug, "Greetings from your brother");
    daylog::info!("It's a Me, Mario");
    daylog::log!(logger: other, LogLevel::Error, "And im your brother {}", "luigi");

    // 복제 후 레벨만 변경
    let mut cloned = other.clone();
    cloned.set_level(LogLevel::Error);
    cloned.set_file_level(LogLevel::Error);
    daylog::error!(
        logger: cloned,
        "{:?} != {:?}",
        other.file_level(),
        cloned.file_level()
    );

    // 파일과 콘솔에 기록한 뒤 종료 코드 1로 종료
    daylog::fatal!("Bowser enters the room...");

    Ok(())
}
