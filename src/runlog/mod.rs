//! 실행 로그
//!
//! 한 번의 실행마다 두 개의 파일에 이어 씁니다.
//! - `oraboot.log`: 사람이 읽는 요약 로그 (`YYYY-MM-DD HH:MM:SS [LEVEL] message`)
//! - `oraboot.trc`: 모든 조회/명령의 원본 출력을 담은 디버그 트레이스

use crate::error::Result;
use chrono::{DateTime, Local};
use colored::*;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 로그 레벨
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Ok,
    Warning,
    Error,
    Fatal,
    Begin,
    End,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Ok => "OK",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Begin => "BEGIN",
            LogLevel::End => "END",
        }
    }

    fn colored_tag(&self) -> ColoredString {
        let tag = format!("[{}]", self.as_str());
        match self {
            LogLevel::Info => tag.cyan(),
            LogLevel::Ok => tag.green().bold(),
            LogLevel::Warning => tag.yellow(),
            LogLevel::Error => tag.red().bold(),
            LogLevel::Fatal => tag.red().bold().reversed(),
            LogLevel::Begin | LogLevel::End => tag.blue().bold(),
        }
    }
}

/// 로그 한 줄
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// 로그 파일에 기록되는 형식
    pub fn format_line(&self) -> String {
        format!(
            "{} [{}] {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.level.as_str(),
            self.message
        )
    }
}

pub struct RunLog {
    log_file: Option<File>,
    trace_file: Option<File>,
    entries: Vec<LogEntry>,
    echo: bool,
}

impl RunLog {
    /// 로그/트레이스 파일을 append 모드로 열기 (디렉토리가 없으면 생성)
    pub fn open(log_path: &Path, trace_path: &Path, echo: bool) -> Result<Self> {
        for path in [log_path, trace_path] {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
        }

        let log_file = OpenOptions::new().create(true).append(true).open(log_path)?;
        let trace_file = OpenOptions::new().create(true).append(true).open(trace_path)?;

        Ok(Self {
            log_file: Some(log_file),
            trace_file: Some(trace_file),
            entries: Vec::new(),
            echo,
        })
    }

    /// 파일 없이 메모리에만 기록
    pub fn detached(echo: bool) -> Self {
        Self {
            log_file: None,
            trace_file: None,
            entries: Vec::new(),
            echo,
        }
    }

    pub fn write(&mut self, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry {
            timestamp: Local::now(),
            level,
            message: message.into(),
        };

        if self.echo {
            println!("{} {}", entry.level.colored_tag(), entry.message);
        }

        let line = entry.format_line();
        if let Some(file) = self.log_file.as_mut() {
            if let Err(e) = writeln!(file, "{}", line) {
                tracing::warn!("failed to write run log: {}", e);
            }
        }
        // 요약 로그의 모든 줄은 트레이스에도 남긴다
        if let Some(file) = self.trace_file.as_mut() {
            if let Err(e) = writeln!(file, "{}", line) {
                tracing::warn!("failed to write trace: {}", e);
            }
        }

        self.entries.push(entry);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.write(LogLevel::Info, message);
    }

    pub fn ok(&mut self, message: impl Into<String>) {
        self.write(LogLevel::Ok, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.write(LogLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.write(LogLevel::Error, message);
    }

    pub fn fatal(&mut self, message: impl Into<String>) {
        self.write(LogLevel::Fatal, message);
    }

    pub fn begin(&mut self, message: impl Into<String>) {
        self.write(LogLevel::Begin, message);
    }

    pub fn end(&mut self, message: impl Into<String>) {
        self.write(LogLevel::End, message);
    }

    /// 디버그 트레이스에 원본 출력 블록 기록
    pub fn trace(&mut self, title: &str, body: &str) {
        tracing::debug!(target: "oraboot::trace", "{}\n{}", title, body);

        let Some(file) = self.trace_file.as_mut() else {
            return;
        };

        let stamp = Local::now().format(TIMESTAMP_FORMAT);
        let body = body.trim_end();
        let result = if body.is_empty() {
            writeln!(file, "--- {} {} (no output)", stamp, title)
        } else {
            writeln!(file, "--- {} {}\n{}", stamp, title, body)
        };
        if let Err(e) = result {
            tracing::warn!("failed to write trace: {}", e);
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// 특정 레벨의 줄 수
    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    /// 특정 레벨이면서 메시지에 `needle`이 포함된 줄 수
    pub fn count_matching(&self, level: LogLevel, needle: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.level == level && e.message.contains(needle))
            .count()
    }
}
