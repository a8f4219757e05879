// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Size-triggered rolling log file with a fixed-window archive roller.
//!
//! The active file is `{dir}/{name}`. Once a write would push it past the
//! size limit it is gzip-compressed to `{name}.{base}.gz`; older archives
//! shift up one index and the archive leaving the window is deleted.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Keeps a bounded, numbered set of compressed archives.
#[derive(Debug, Clone)]
pub struct FixedWindowRoller {
    directory: PathBuf,
    file_name: String,
    base: u32,
    count: u32,
}

impl FixedWindowRoller {
    /// `count` must be at least one.
    pub fn new(directory: impl Into<PathBuf>, file_name: &str, base: u32, count: u32) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.to_string(),
            base,
            count: count.max(1),
        }
    }

    /// Path of the archive at `index`.
    pub fn archive_path(&self, index: u32) -> PathBuf {
        self.directory
            .join(format!("{}.{}.gz", self.file_name, index))
    }

    /// Archive `active` as the newest entry of the window.
    pub fn roll(&self, active: &Path) -> io::Result<()> {
        let last = self.base.saturating_add(self.count - 1);

        match fs::remove_file(self.archive_path(last)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        for index in (self.base..last).rev() {
            let from = self.archive_path(index);
            if from.exists() {
                fs::rename(&from, self.archive_path(index + 1))?;
            }
        }

        compress(active, &self.archive_path(self.base))?;
        fs::remove_file(active)
    }
}

fn compress(source: &Path, target: &Path) -> io::Result<()> {
    let mut input = File::open(source)?;
    let mut encoder = GzEncoder::new(BufWriter::new(File::create(target)?), Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?.flush()
}

/// Log file writer that rolls once the size limit is reached.
pub struct RollingFileWriter {
    path: PathBuf,
    size_limit: u64,
    roller: FixedWindowRoller,
    file: BufWriter<File>,
    written: u64,
}

impl RollingFileWriter {
    /// Open (or create and append to) `{directory}/{file_name}`.
    pub fn new(
        directory: impl AsRef<Path>,
        file_name: &str,
        size_limit: u64,
        roller: FixedWindowRoller,
    ) -> io::Result<Self> {
        fs::create_dir_all(directory.as_ref())?;
        let path = directory.as_ref().join(file_name);
        let file = open_append(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path,
            size_limit,
            roller,
            file: BufWriter::new(file),
            written,
        })
    }

    /// Path of the active log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn roll(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.roller.roll(&self.path)?;
        self.file = BufWriter::new(open_append(&self.path)?);
        self.written = 0;
        Ok(())
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // A single oversized line still lands in a fresh file rather than
        // rolling forever.
        if self.written > 0 && self.written + buf.len() as u64 > self.size_limit {
            self.roll()?;
        }

        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn gunzip(path: &Path) -> String {
        let mut decoder = GzDecoder::new(File::open(path).unwrap());
        let mut out = String::new();
        decoder.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_rolls_when_limit_exceeded() {
        let dir = tempfile::tempdir().unwrap();
        let roller = FixedWindowRoller::new(dir.path(), "app.log", 0, 3);
        let mut writer = RollingFileWriter::new(dir.path(), "app.log", 10, roller).unwrap();

        writer.write_all(b"first-\n").unwrap();
        writer.write_all(b"second\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(gunzip(&dir.path().join("app.log.0.gz")), "first-\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("app.log")).unwrap(),
            "second\n"
        );
    }

    #[test]
    fn test_window_is_bounded_and_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let roller = FixedWindowRoller::new(dir.path(), "app.log", 0, 2);
        let mut writer = RollingFileWriter::new(dir.path(), "app.log", 4, roller).unwrap();

        for line in ["aaaa", "bbbb", "cccc", "dddd"] {
            writer.write_all(line.as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(gunzip(&dir.path().join("app.log.0.gz")), "cccc");
        assert_eq!(gunzip(&dir.path().join("app.log.1.gz")), "bbbb");
        assert!(!dir.path().join("app.log.2.gz").exists());
        assert_eq!(fs::read_to_string(dir.path().join("app.log")).unwrap(), "dddd");
    }

    #[test]
    fn test_base_index_offsets_archive_names() {
        let dir = tempfile::tempdir().unwrap();
        let roller = FixedWindowRoller::new(dir.path(), "app.log", 5, 2);
        let mut writer = RollingFileWriter::new(dir.path(), "app.log", 2, roller).unwrap();

        writer.write_all(b"xx").unwrap();
        writer.write_all(b"yy").unwrap();
        writer.flush().unwrap();

        assert!(dir.path().join("app.log.5.gz").exists());
        assert!(!dir.path().join("app.log.0.gz").exists());
    }

    #[test]
    fn test_window_at_top_of_index_range() {
        let dir = tempfile::tempdir().unwrap();
        let roller = FixedWindowRoller::new(dir.path(), "app.log", u32::MAX, 3);
        let mut writer = RollingFileWriter::new(dir.path(), "app.log", 2, roller).unwrap();

        writer.write_all(b"xx").unwrap();
        writer.write_all(b"yy").unwrap();
        writer.write_all(b"zz").unwrap();
        writer.flush().unwrap();

        let newest = dir.path().join(format!("app.log.{}.gz", u32::MAX));
        assert_eq!(gunzip(&newest), "yy");
        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "zz");
    }

    #[test]
    fn test_resumes_existing_file_size() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.log"), "12345678").unwrap();

        let roller = FixedWindowRoller::new(dir.path(), "app.log", 0, 1);
        let mut writer = RollingFileWriter::new(dir.path(), "app.log", 10, roller).unwrap();
        writer.write_all(b"abc").unwrap();
        writer.flush().unwrap();

        assert_eq!(gunzip(&dir.path().join("app.log.0.gz")), "12345678");
        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "abc");
    }
}
