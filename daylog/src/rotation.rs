//! 날짜별 로그 파일 경로 관리
//!
//! 로그 파일 경로 계산과 날짜 접미사 정책, 그리고 현재 시각을 제공하는 `Clock`을 담당합니다.
//! 실제 파일 교체는 [`crate::sink::FileSink`]의 쓰기 경로에서 지연 수행됩니다.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use parking_lot::Mutex;
use std::fmt::Debug;

/// 파일 이름에 붙는 날짜 형식
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

/// 로그 라인 타임스탬프 형식 (초 단위)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 현재 로컬 시각 공급자
///
/// 날짜 교체를 테스트할 수 있도록 싱크와 파사드는 이 트레이트를 통해서만 시각을 읽습니다.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// 시스템 시계
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// 수동으로 움직이는 시계 (테스트용)
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// 지정된 날짜 정오로 설정된 시계 생성
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(local_noon(date))
    }

    pub fn set(&self, now: DateTime<Local>) {
        *self.now.lock() = now;
    }

    /// 날짜만 변경 (정오 기준)
    pub fn set_date(&self, date: NaiveDate) {
        self.set(local_noon(date));
    }

    /// 하루 앞으로 이동
    pub fn advance_day(&self) {
        let mut now = self.now.lock();
        *now += chrono::Duration::days(1);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock()
    }
}

fn local_noon(date: NaiveDate) -> DateTime<Local> {
    let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
    Local
        .from_local_datetime(&noon)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&noon))
}

/// 로그 파일 날짜 문자열
pub fn file_date(date: NaiveDate) -> String {
    date.format(FILE_DATE_FORMAT).to_string()
}

/// 경로 구분자를 `/`로 통일
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// 로그 파일 경로 생성
///
/// 날짜 접미사가 켜져 있으면 파일 경로 뒤에 `.<YYYY-MM-DD>`를 붙입니다.
/// 경로가 구분자로 끝나면(디렉토리) 날짜 자체가 파일 이름이 되므로 점을 붙이지 않습니다.
pub fn build_log_path(base: &str, append_date: bool, date: NaiveDate) -> String {
    let path = normalize_separators(base);
    if !append_date {
        return path;
    }

    let date = file_date(date);
    if path.ends_with('/') {
        format!("{path}{date}")
    } else {
        format!("{path}.{date}")
    }
}
