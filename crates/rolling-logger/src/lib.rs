//! Rolling Logger
//!
//! File logger built on `tracing-subscriber`:
//! - log files rotate by size: `<app>.log`, `<app>.1.log`, ... `<app>.<N>.log`
//! - the most recent lines are kept in a circular buffer for in-app display
//! - records emitted through the `log` facade are bridged into `tracing`

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Size at which the active log file is rotated
pub const MAX_FILE_BYTES: u64 = 1024 * 1024;
/// Number of rotated files kept next to the active one
pub const MAX_ROTATED_FILES: usize = 4;
/// Lines kept in memory
pub const RECENT_CAPACITY: usize = 500;

static RECENT: OnceLock<Arc<Mutex<RecentLines>>> = OnceLock::new();

/// Bounded buffer of the most recent log lines
#[derive(Debug)]
pub struct RecentLines {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RecentLines {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

/// Writer that appends to `<dir>/<name>.log` and rotates once the file grows
/// past `max_bytes`. Every complete line is also copied into `recent`.
pub struct RollingFileWriter {
    dir: PathBuf,
    name: String,
    max_bytes: u64,
    max_rotated: usize,
    file: File,
    written: u64,
    pending: String,
    recent: Arc<Mutex<RecentLines>>,
}

impl RollingFileWriter {
    pub fn new(
        dir: impl Into<PathBuf>,
        name: &str,
        max_bytes: u64,
        max_rotated: usize,
        recent: Arc<Mutex<RecentLines>>,
    ) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let path = active_path(&dir, name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir,
            name: name.to_string(),
            max_bytes,
            max_rotated,
            file,
            written,
            pending: String::new(),
            recent,
        })
    }

    /// Path of the file currently written to
    pub fn active_path(&self) -> PathBuf {
        active_path(&self.dir, &self.name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.max_rotated == 0 {
            self.file = File::create(self.active_path())?;
            self.written = 0;
            return Ok(());
        }

        let oldest = rotated_path(&self.dir, &self.name, self.max_rotated);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_rotated).rev() {
            let from = rotated_path(&self.dir, &self.name, index);
            if from.exists() {
                fs::rename(&from, rotated_path(&self.dir, &self.name, index + 1))?;
            }
        }
        fs::rename(self.active_path(), rotated_path(&self.dir, &self.name, 1))?;

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.active_path())?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        self.pending.push_str(&String::from_utf8_lossy(buf));
        while let Some(end) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=end).collect();
            let line = line.trim_end_matches(['\r', '\n']).to_string();
            if let Ok(mut recent) = self.recent.lock() {
                recent.push(line);
            }
        }
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        self.remember(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn active_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.log", name))
}

fn rotated_path(dir: &Path, name: &str, index: usize) -> PathBuf {
    dir.join(format!("{}.{}.log", name, index))
}

/// Initialize the global logger.
///
/// Level comes from `RUST_LOG` when set, `info` otherwise. Warnings and errors
/// are mirrored to stderr.
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    let recent = RECENT
        .get_or_init(|| Arc::new(Mutex::new(RecentLines::new(RECENT_CAPACITY))))
        .clone();

    let writer = RollingFileWriter::new(&log_dir, app_name, MAX_FILE_BYTES, MAX_ROTATED_FILES, recent)
        .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.display(), e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(writer));

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    tracing::info!(
        app = app_name,
        started = %chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        "logger initialized"
    );
    Ok(())
}

fn ensure_initialized() -> Result<(), String> {
    if RECENT.get().is_none() {
        return Err("Logger not initialized".to_string());
    }
    Ok(())
}

pub fn info(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Most recent log lines, oldest first. Empty before `init_logger`.
pub fn recent_lines() -> Vec<String> {
    RECENT
        .get()
        .and_then(|recent| recent.lock().ok().map(|r| r.snapshot()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(dir: &Path, max_bytes: u64, max_rotated: usize) -> (RollingFileWriter, Arc<Mutex<RecentLines>>) {
        let recent = Arc::new(Mutex::new(RecentLines::new(3)));
        let w = RollingFileWriter::new(dir, "test", max_bytes, max_rotated, recent.clone()).unwrap();
        (w, recent)
    }

    #[test]
    fn test_recent_lines_drops_oldest() {
        let mut recent = RecentLines::new(2);
        recent.push("a".to_string());
        recent.push("b".to_string());
        recent.push("c".to_string());
        assert_eq!(recent.snapshot(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_writer_keeps_complete_lines() {
        let dir = tempfile::tempdir().unwrap();
        let (mut w, recent) = writer(dir.path(), 1024, 2);

        w.write_all(b"first line\nsecond ").unwrap();
        w.write_all(b"half\n").unwrap();

        let lines = recent.lock().unwrap().snapshot();
        assert_eq!(lines, vec!["first line".to_string(), "second half".to_string()]);

        let content = fs::read_to_string(dir.path().join("test.log")).unwrap();
        assert_eq!(content, "first line\nsecond half\n");
    }

    #[test]
    fn test_writer_rotates_by_size() {
        let dir = tempfile::tempdir().unwrap();
        let (mut w, _) = writer(dir.path(), 10, 2);

        w.write_all(b"0123456789\n").unwrap();
        w.write_all(b"abcdefghij\n").unwrap();
        w.write_all(b"ABCDEFGHIJ\n").unwrap();
        w.write_all(b"last\n").unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("test.log")).unwrap(), "last\n");
        assert_eq!(fs::read_to_string(dir.path().join("test.1.log")).unwrap(), "ABCDEFGHIJ\n");
        assert_eq!(fs::read_to_string(dir.path().join("test.2.log")).unwrap(), "abcdefghij\n");
        assert!(!dir.path().join("test.3.log").exists());
    }

    // The only test that installs the global subscriber
    #[test]
    fn test_helpers_log_after_init() {
        assert!(info("before init").is_err());
        assert!(recent_lines().is_empty());

        let dir = tempfile::tempdir().unwrap();
        init_logger(dir.path().to_path_buf(), "helpers").unwrap();

        warn("disk nearly full").unwrap();
        error("backup failed").unwrap();

        let recent = recent_lines();
        assert!(recent.iter().any(|l| l.contains("disk nearly full")), "{:?}", recent);

        let content = fs::read_to_string(dir.path().join("helpers.log")).unwrap();
        assert!(content.contains("WARN"));
        assert!(content.contains("disk nearly full"));
        assert!(content.contains("backup failed"));
    }
}
