//! Rolling file logger with an in-memory circular buffer.
//!
//! Installs a `tracing` subscriber (which also receives `log` records) that writes
//! to `<dir>/<app>.log`, rotates the file by size, and keeps the most recent lines
//! in memory for display or bug reports.

use std::collections::VecDeque;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

/// Rotate once the active file would exceed this size
pub const MAX_FILE_BYTES: u64 = 1024 * 1024;
/// Rotated files kept next to the active one
pub const KEEP_FILES: usize = 3;
/// Lines kept in memory
pub const RECENT_CAPACITY: usize = 500;

static SINK: OnceLock<SharedSink> = OnceLock::new();

#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    AlreadyInitialized,
    NotInitialized,
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "logger already initialized"),
            LoggerError::NotInitialized => write!(f, "logger not initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(e: io::Error) -> Self {
        LoggerError::Io(e)
    }
}

/// Size-rotated log file: `app.log`, `app.log.1` (newest backup) .. `app.log.N`
pub struct RollingFile {
    path: PathBuf,
    file: File,
    size: u64,
    max_bytes: u64,
    keep: usize,
}

impl RollingFile {
    pub fn open(dir: &Path, app_name: &str, max_bytes: u64, keep: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();
        Ok(Self { path, file, size, max_bytes, keep })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{}", n));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.keep == 0 {
            self.file = File::create(&self.path)?;
        } else {
            let oldest = self.backup_path(self.keep);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for n in (1..self.keep).rev() {
                let from = self.backup_path(n);
                if from.exists() {
                    fs::rename(&from, self.backup_path(n + 1))?;
                }
            }
            fs::rename(&self.path, self.backup_path(1))?;
            self.file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        }
        self.size = 0;
        Ok(())
    }

    pub fn append(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.size > 0 && self.size + bytes.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(bytes)?;
        self.size += bytes.len() as u64;
        Ok(())
    }
}

/// Fixed-size buffer of the latest lines
pub struct RecentLines {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RecentLines {
    pub fn new(capacity: usize) -> Self {
        Self { lines: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push_text(&mut self, text: &str) {
        for line in text.lines().filter(|l| !l.is_empty()) {
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(line.to_string());
        }
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

struct Sink {
    file: RollingFile,
    recent: RecentLines,
}

#[derive(Clone)]
struct SharedSink {
    inner: Arc<Mutex<Sink>>,
}

/// Buffers one formatted event and hands it to the sink when dropped
struct EventWriter {
    sink: Arc<Mutex<Sink>>,
    buf: Vec<u8>,
}

impl Write for EventWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        if let Ok(mut sink) = self.sink.lock() {
            if let Err(e) = sink.file.append(&self.buf) {
                eprintln!("rolling-logger: write failed: {}", e);
            }
            sink.recent.push_text(&String::from_utf8_lossy(&self.buf));
        }
        // Mirror to stderr for `tauri dev`
        let _ = io::stderr().write_all(&self.buf);
    }
}

impl<'a> MakeWriter<'a> for SharedSink {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter { sink: self.inner.clone(), buf: Vec::new() }
    }
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global logger writing to `<log_dir>/<app_name>.log`
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    let file = RollingFile::open(&log_dir, app_name, MAX_FILE_BYTES, KEEP_FILES)?;
    let sink = SharedSink {
        inner: Arc::new(Mutex::new(Sink { file, recent: RecentLines::new(RECENT_CAPACITY) })),
    };
    SINK.set(sink.clone()).map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing_subscriber::fmt()
        .with_writer(sink)
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    log::info!("Logging to {}", log_dir.join(format!("{}.log", app_name)).display());
    Ok(())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    SINK.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::warn!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!("{}", message);
    Ok(())
}

/// Most recent log lines, oldest first; empty before `init_logger`
pub fn recent_lines() -> Vec<String> {
    SINK.get()
        .and_then(|sink| sink.inner.lock().ok().map(|s| s.recent.snapshot()))
        .unwrap_or_default()
}
