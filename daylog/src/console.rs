//! 콘솔 출력
//!
//! 표준 출력/표준 에러 또는 메모리 버퍼로 한 줄씩 씁니다.
//! 콘솔 쓰기 실패는 호출자에게 전파하지 않습니다.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// 출력 스트림
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// 로거가 소유하는 콘솔 작성기
#[derive(Debug, Clone, Default)]
pub enum Console {
    /// 프로세스 표준 스트림
    #[default]
    Stdio,
    /// 메모리 내 캡처
    Memory(MemoryConsole),
}

impl Console {
    /// 메모리 콘솔과 그 캡처 핸들 생성
    pub fn memory() -> (Console, MemoryConsole) {
        let capture = MemoryConsole::default();
        (Console::Memory(capture.clone()), capture)
    }

    /// 한 줄 쓰기 (줄바꿈 포함)
    pub fn write_line(&self, stream: Stream, line: &str) {
        match self {
            Console::Stdio => {
                let _ = match stream {
                    Stream::Stdout => writeln!(io::stdout().lock(), "{line}"),
                    Stream::Stderr => writeln!(io::stderr().lock(), "{line}"),
                };
            }
            Console::Memory(capture) => capture.push(stream, line),
        }
    }

    pub fn flush(&self) {
        if let Console::Stdio = self {
            let _ = io::stdout().flush();
            let _ = io::stderr().flush();
        }
    }
}

/// 메모리 내 콘솔 (테스트용)
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    lines: Arc<Mutex<Vec<(Stream, String)>>>,
}

impl MemoryConsole {
    fn push(&self, stream: Stream, line: &str) {
        self.lines.lock().push((stream, line.to_string()));
    }

    /// 모든 줄 반환 (스트림 포함)
    pub fn get_logs(&self) -> Vec<(Stream, String)> {
        self.lines.lock().clone()
    }

    /// 특정 스트림의 줄만 반환
    pub fn lines(&self, stream: Stream) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn stdout(&self) -> Vec<String> {
        self.lines(Stream::Stdout)
    }

    pub fn stderr(&self) -> Vec<String> {
        self.lines(Stream::Stderr)
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}
