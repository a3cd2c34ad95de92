//! 공유 파일 싱크
//!
//! 하나의 OS 파일 핸들을 여러 로거가 동시에 추가 쓰기할 수 있도록 관리합니다.
//!
//! # 잠금 규칙
//! - `slot` (기본 잠금): 열린 핸들의 정체성을 보호합니다. 쓰기는 공유, 교체/닫기는 배타.
//! - `write_gate` (보조 잠금): 쓰기 경로 자체를 보호합니다. 날짜 교체 시에만 배타로 잡습니다.
//!
//! 두 잠금은 항상 `write_gate` → `slot` 순서로 획득합니다.
//! 닫기는 `slot`만 배타로 잡습니다.

use parking_lot::{Mutex, RwLock};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::FileConfig;
use crate::error::SinkError;
use crate::level::LogLevel;
use crate::rotation::{build_log_path, Clock, SystemClock};

/// 공유 파일 싱크
///
/// `Clone`은 설정(레벨, 경로, 날짜 플래그)을 복사하지만 열린 파일과 잠금은 공유합니다.
#[derive(Debug, Clone)]
pub struct FileSink {
    /// 파일 출력 최소 레벨
    level: LogLevel,
    /// 기본 경로 (날짜 접미사 이전)
    path: String,
    /// 경로에 현재 날짜를 붙일지 여부
    append_date: bool,
    clock: Arc<dyn Clock>,
    shared: Arc<SharedFile>,
}

/// 여러 싱크가 공유하는 파일 상태
#[derive(Debug, Default)]
struct SharedFile {
    slot: RwLock<FileSlot>,
    write_gate: RwLock<()>,
}

#[derive(Debug, Default)]
struct FileSlot {
    /// 열린 핸들의 경로 또는 마지막으로 열기를 시도한 경로
    target: Option<String>,
    handle: Option<OpenFile>,
    /// 명시적으로 닫혔는지 여부
    closed: bool,
}

impl FileSlot {
    fn needs_open(&self, target: &str) -> bool {
        !self.closed && self.target.as_deref() != Some(target)
    }

    fn open_at(&mut self, target: &str) -> Result<(), SinkError> {
        self.target = Some(target.to_string());
        match OpenFile::open(target) {
            Ok(handle) => {
                debug!(path = target, "로그 파일 열림");
                self.handle = Some(handle);
                Ok(())
            }
            Err(source) => {
                warn!(path = target, error = %source, "로그 파일 열기 실패");
                Err(SinkError::Open {
                    path: target.to_string(),
                    source,
                })
            }
        }
    }

    fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!(path = %handle.path, "로그 파일 닫힘");
            handle.finish();
        }
    }
}

#[derive(Debug)]
struct OpenFile {
    path: String,
    file: File,
    /// 한 줄 단위 쓰기 보장
    line_lock: Mutex<()>,
    /// 첫 쓰기 실패만 보고
    write_failed: AtomicBool,
}

impl OpenFile {
    fn open(path: &str) -> io::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_string(),
            file,
            line_lock: Mutex::new(()),
            write_failed: AtomicBool::new(false),
        })
    }

    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let written = {
            let _line = self.line_lock.lock();
            (&self.file).write_all(buf.as_bytes())
        };

        match written.and_then(|()| self.file.sync_data()) {
            Ok(()) => Ok(()),
            Err(source) if !self.write_failed.swap(true, Ordering::Relaxed) => {
                Err(SinkError::Write {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(_) => Err(SinkError::Unavailable),
        }
    }

    fn finish(self) {
        let _ = (&self.file).flush();
        let _ = self.file.sync_all();
    }
}

impl FileSink {
    /// 시스템 시계를 사용하는 새 싱크 (아직 파일을 열지 않음)
    pub fn new(config: &FileConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &FileConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            level: config.level,
            path: config.path.clone(),
            append_date: config.append_date,
            clock,
            shared: Arc::new(SharedFile::default()),
        }
    }

    /// 같은 파일을 공유하되 레벨만 다른 싱크 생성
    pub fn share(&self, level: LogLevel) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn append_date(&self) -> bool {
        self.append_date
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// 설정을 `FileConfig`로 반환
    pub fn config(&self) -> FileConfig {
        FileConfig {
            level: self.level,
            path: self.path.clone(),
            append_date: self.append_date,
        }
    }

    /// 지금 시각 기준으로 써야 할 파일 경로
    pub fn file_path(&self) -> String {
        build_log_path(&self.path, self.append_date, self.clock.today())
    }

    /// 현재 열린 핸들의 경로
    pub fn current_path(&self) -> Option<String> {
        let slot = self.shared.slot.read();
        slot.handle.as_ref().map(|handle| handle.path.clone())
    }

    pub fn is_open(&self) -> bool {
        self.shared.slot.read().handle.is_some()
    }

    /// 두 싱크가 같은 물리 파일 상태를 공유하는지 여부
    pub fn shares_file_with(&self, other: &FileSink) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// 파일 열기 (멱등)
    ///
    /// 이미 열려 있으면 아무것도 하지 않습니다. 명시적 닫힘 상태를 해제합니다.
    pub fn open(&self) -> Result<(), SinkError> {
        let _gate = self.shared.write_gate.write();
        let mut slot = self.shared.slot.write();

        slot.closed = false;
        if slot.handle.is_some() {
            return Ok(());
        }
        slot.open_at(&self.file_path())
    }

    /// 파일 닫기 (멱등)
    pub fn close(&self) {
        let mut slot = self.shared.slot.write();
        slot.release();
        slot.target = None;
        slot.closed = true;
    }

    /// 한 줄 추가 쓰기
    ///
    /// 날짜가 바뀌었으면 쓰기 전에 파일을 교체합니다.
    /// `Fatal` 레벨이면 쓰기 후 파일을 닫습니다.
    pub fn append(&self, line: &str, level: LogLevel) -> Result<(), SinkError> {
        let result = self.write_line(line);

        // 프로세스가 곧 종료되므로 파일을 닫음
        if level == LogLevel::Fatal {
            self.close();
        }

        result
    }

    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut gate = self.shared.write_gate.read();
        let mut slot = self.shared.slot.read();

        // 공유 잠금을 잡은 뒤 계산해야 교체와 경합하지 않음
        if slot.needs_open(&self.file_path()) {
            drop(slot);
            drop(gate);

            self.rotate()?;

            gate = self.shared.write_gate.read();
            slot = self.shared.slot.read();
        }

        let result = match slot.handle.as_ref() {
            Some(handle) => handle.write_line(line),
            None if slot.closed => Err(SinkError::Closed),
            None => Err(SinkError::Unavailable),
        };

        drop(slot);
        drop(gate);
        result
    }

    fn rotate(&self) -> Result<(), SinkError> {
        let _gate = self.shared.write_gate.write();
        let mut slot = self.shared.slot.write();

        // 잠금을 기다리는 동안 다른 쓰기가 이미 교체했을 수 있음
        let target = self.file_path();
        if !slot.needs_open(&target) {
            return Ok(());
        }

        if let Some(previous) = slot.target.as_deref() {
            debug!(from = previous, to = %target, "로그 파일 교체");
        }
        slot.release();
        slot.open_at(&target)
    }
}
