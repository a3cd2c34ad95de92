//! 터미널 색상 지원 감지

use crate::error::SetupError;

/// 설정되어 있으면 색상을 항상 끔
pub const ENV_DISABLE_COLORS: &str = "TERMINAL_DISABLE_COLORS";
/// 설정되어 있으면 지원 여부와 관계없이 색상을 켬
pub const ENV_ENABLE_COLORS: &str = "TERMINAL_ENABLE_COLORS";

/// ANSI 색상을 실제로 사용할 수 있는지 판단
///
/// 요청되지 않았으면 `false`. 환경변수 재정의가 플랫폼 감지보다 우선합니다.
pub fn colors_supported(requested: bool) -> Result<bool, SetupError> {
    if !requested {
        return Ok(false);
    }

    if std::env::var_os(ENV_DISABLE_COLORS).is_some() {
        return Ok(false);
    }
    if std::env::var_os(ENV_ENABLE_COLORS).is_some() {
        return Ok(true);
    }

    probe()
}

#[cfg(unix)]
fn probe() -> Result<bool, SetupError> {
    // $TERM이 있으면 대부분의 터미널은 색상을 지원함
    Ok(std::env::var_os("TERM").is_some_and(|term| !term.is_empty()))
}

#[cfg(windows)]
fn probe() -> Result<bool, SetupError> {
    use std::io::IsTerminal;

    Ok(std::io::stdout().is_terminal())
}

#[cfg(not(any(unix, windows)))]
fn probe() -> Result<bool, SetupError> {
    Err(SetupError::ColorProbe(format!(
        "no terminal probe for target '{}'",
        std::env::consts::OS
    )))
}
