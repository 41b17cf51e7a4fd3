//! Destinations for encoded lines.
//!
//! A [`Sink`] receives one encoded line at a time, appends the terminator and
//! writes it. The codec itself never touches I/O.
//!
//! - [`WriterSink`]: any `io::Write`, such as stderr or a buffer
//! - [`RollingFile`]: a file that is shelved and replaced every day, week or month
//!
//! ## Examples
//!
//! ```rust
//! use serde_lines::{Sink, WriterSink};
//!
//! let sink = WriterSink::new(Vec::new());
//! sink.write_line("msg=hello").unwrap();
//! assert_eq!(sink.into_inner(), b"msg=hello\n");
//! ```

use crate::Result;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default number of shelved files a [`RollingFile`] keeps.
pub const DEFAULT_KEEP: usize = 7;

const SHELVED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Writes whole lines.
pub trait Sink: Send + Sync {
    /// Writes `line` followed by a newline.
    fn write_line(&self, line: &str) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write_line(&self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_line(&self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }
}

/// A sink over any writer, flushed after every line.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink {
            writer: Mutex::new(writer),
        }
    }

    /// Runs `f` with exclusive access to the writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.writer.lock())
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterSink<std::io::Stderr> {
    pub fn stderr() -> Self {
        WriterSink::new(std::io::stderr())
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// How often a [`RollingFile`] is rotated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Day,
    Week,
    /// Thirty days.
    Month,
}

impl Period {
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        match self {
            Period::Day => TimeDelta::days(1),
            Period::Week => TimeDelta::days(7),
            Period::Month => TimeDelta::days(30),
        }
    }
}

struct OpenFile {
    file: File,
    opened: DateTime<Utc>,
}

/// A log file that is shelved once it is older than its [`Period`].
///
/// On rotation the current file is renamed to `<path>.<YYYY-MM-DD>`, after the
/// day it was opened, and only the newest `keep` shelved files are kept.
///
/// # Examples
///
/// ```rust
/// use serde_lines::{Period, RollingFile, Sink};
///
/// let dir = tempfile::tempdir().unwrap();
/// let log = RollingFile::open(dir.path().join("app.log"))
///     .unwrap()
///     .with_period(Period::Week)
///     .with_keep(4);
/// log.write_line("msg=hello").unwrap();
/// ```
pub struct RollingFile {
    path: PathBuf,
    every: Period,
    keep: usize,
    current: Mutex<OpenFile>,
}

impl RollingFile {
    /// Opens `path` for appending, rotating daily and keeping 7 files.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_at(path.as_ref(), Utc::now())
    }

    fn open_at(path: &Path, now: DateTime<Utc>) -> Result<Self> {
        Ok(RollingFile {
            path: path.to_path_buf(),
            every: Period::default(),
            keep: DEFAULT_KEEP,
            current: Mutex::new(OpenFile {
                file: append(path)?,
                opened: now,
            }),
        })
    }

    #[must_use]
    pub fn with_period(mut self, every: Period) -> Self {
        self.every = every;
        self
    }

    #[must_use]
    pub fn with_keep(mut self, keep: usize) -> Self {
        self.keep = keep;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_at(&self, line: &str, now: DateTime<Utc>) -> Result<()> {
        let mut current = self.current.lock();
        if now - current.opened > self.every.duration() {
            self.rotate(&mut current, now)?;
        }
        current.file.write_all(line.as_bytes())?;
        current.file.write_all(b"\n")?;
        Ok(())
    }

    fn rotate(&self, current: &mut OpenFile, now: DateTime<Utc>) -> Result<()> {
        current.file.flush()?;
        let shelved = self.shelved_path(current.opened);
        fs::rename(&self.path, &shelved)?;
        tracing::debug!(path = %self.path.display(), shelved = %shelved.display(), "Rotated log file");

        current.file = append(&self.path)?;
        current.opened = now;
        if let Err(e) = self.prune() {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to prune shelved logs");
        }
        Ok(())
    }

    fn shelved_path(&self, opened: DateTime<Utc>) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".");
        name.push(opened.format(SHELVED_DATE_FORMAT).to_string());
        PathBuf::from(name)
    }

    /// Removes the oldest shelved files beyond `keep`.
    ///
    /// Only names of the form `<file>.<YYYY-MM-DD>` count as shelved.
    fn prune(&self) -> Result<()> {
        let Some(file_name) = self.path.file_name().map(|n| n.to_string_lossy().into_owned())
        else {
            return Ok(());
        };
        let prefix = format!("{}.", file_name);
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut shelved: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| is_shelved(&entry.file_name().to_string_lossy(), &prefix))
            .map(|entry| entry.path())
            .collect();
        if shelved.len() <= self.keep {
            return Ok(());
        }

        shelved.sort();
        let excess = shelved.len() - self.keep;
        for old in &shelved[..excess] {
            fs::remove_file(old)?;
        }
        Ok(())
    }
}

impl Sink for RollingFile {
    fn write_line(&self, line: &str) -> Result<()> {
        self.write_at(line, Utc::now())
    }
}

fn is_shelved(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|date| NaiveDate::parse_from_str(date, SHELVED_DATE_FORMAT).is_ok())
}

fn append(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
