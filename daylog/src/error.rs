//! 에러 정의
//!
//! 로깅 경로에서 발생하는 에러는 호출자에게 전파되지 않습니다.
//! 여기의 타입들은 설정/셋업 API와 파일 싱크가 파사드에 실패를 알리는 데 사용됩니다.

use std::io;
use thiserror::Error;

/// 파일 싱크 에러
///
/// `append`/`open`이 반환하며, 파사드가 받아서 콘솔에 한 번 보고합니다.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Cannot access the log file '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write to the log file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    /// 명시적으로 닫힌 싱크
    #[error("log file is closed")]
    Closed,

    /// 열기에 실패한 뒤 핸들 없이 남아 있는 싱크
    #[error("log file is unavailable")]
    Unavailable,
}

impl SinkError {
    /// 사용자에게 보고할 가치가 있는 에러인지 여부
    ///
    /// `Closed`/`Unavailable`은 조용히 버려지는 쓰기입니다.
    pub fn is_reportable(&self) -> bool {
        matches!(self, SinkError::Open { .. } | SinkError::Write { .. })
    }
}

/// 파사드 셋업 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("color support probe failed: {0}")]
    ColorProbe(String),
}

/// 설정 검증 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("file logging is configured with an empty path")]
    EmptyFilePath,
}

/// 레벨 이름 파싱 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown level name '{0}', expected trace, debug, info, warn, error or fatal")]
pub struct ParseLevelError(pub String);

/// 범위를 벗어난 레벨 코드
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid level value: {0}")]
pub struct InvalidLevel(pub u8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reportable_errors() {
        let open = SinkError::Open {
            path: "/nope/app.log".to_string(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(open.is_reportable());
        assert!(open.to_string().starts_with("Cannot access the log file '/nope/app.log'"));

        assert!(!SinkError::Closed.is_reportable());
        assert!(!SinkError::Unavailable.is_reportable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(InvalidLevel(9).to_string(), "invalid level value: 9");
        assert!(ParseLevelError("loud".into()).to_string().contains("'loud'"));
    }
}
