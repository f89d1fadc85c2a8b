//! Flat-file sink for flushed text
//!
//! Every flush appends to a freshly named, timestamped file derived from the
//! crawl's root host, so one long crawl rotates its output across several
//! files rather than growing a single one without bound.

use crate::url::root_host;
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Errors raised by the output sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to create output directory {}: {}", path.display(), source)]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to open {}: {}", path.display(), source)]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to append to {}: {}", path.display(), source)]
    Append {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Destination for flushed buffer content
///
/// The cache buffer only ever talks to this trait, so tests can swap in an
/// in-memory or failing sink.
pub trait TextSink {
    /// Appends `content` to the sink, creating the destination if needed.
    /// Returns the path that received the content.
    fn append(&mut self, content: &str) -> Result<PathBuf, SinkError>;
}

/// Appends flushed text to timestamped files in an output directory
///
/// Filenames follow `output-<host>-<timestamp>.txt` where `<host>` is the
/// sanitized root host of the seed URL and `<timestamp>` is the UTC flush
/// time. Each call picks a new name; the file itself is opened append-mode,
/// create-if-absent, so nothing is ever overwritten.
#[derive(Debug)]
pub struct FileSink {
    dir: PathBuf,
    host_tag: String,
}

impl FileSink {
    /// Creates a sink writing into `dir`, named after the seed's root host
    ///
    /// The directory is created if it does not exist.
    pub fn new(dir: &Path, seed: &Url) -> Result<Self, SinkError> {
        std::fs::create_dir_all(dir).map_err(|e| SinkError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            dir: dir.to_path_buf(),
            host_tag: sanitize_host(&root_host(seed)),
        })
    }
}

impl TextSink for FileSink {
    fn append(&mut self, content: &str) -> Result<PathBuf, SinkError> {
        let timestamp = Utc::now().format("%Y%m%dT%H%M%S%3fZ");
        let filename = format!("output-{}-{}.txt", self.host_tag, timestamp);
        let path = self.dir.join(filename);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| SinkError::Open {
                path: path.clone(),
                source: e,
            })?;

        file.write_all(content.as_bytes())
            .map_err(|e| SinkError::Append {
                path: path.clone(),
                source: e,
            })?;

        tracing::info!("Appended {} bytes to {}", content.len(), path.display());
        Ok(path)
    }
}

/// Strips characters that are unsafe in filenames from a host string
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else (path
/// separators, colons, wildcards, control characters) is dropped. Falls back
/// to `"host"` if nothing survives.
pub fn sanitize_host(host: &str) -> String {
    let tag: String = host
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    if tag.is_empty() {
        "host".to_string()
    } else {
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seed() -> Url {
        Url::parse("https://www.example.com/start").unwrap()
    }

    #[test]
    fn test_sanitize_plain_host() {
        assert_eq!(sanitize_host("example.com"), "example.com");
    }

    #[test]
    fn test_sanitize_strips_separators() {
        assert_eq!(sanitize_host("exa/mple:com"), "examplecom");
        assert_eq!(sanitize_host("a\\b?c*d"), "abcd");
    }

    #[test]
    fn test_sanitize_keeps_ip() {
        assert_eq!(sanitize_host("127.0.0.1"), "127.0.0.1");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_host("::"), "host");
        assert_eq!(sanitize_host(""), "host");
    }

    #[test]
    fn test_append_creates_file_with_content() {
        let dir = tempdir().unwrap();
        let mut sink = FileSink::new(dir.path(), &seed()).unwrap();

        let path = sink.append("hello world").unwrap();
        assert!(path.starts_with(dir.path()));

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("output-example.com-"));
        assert!(name.ends_with(".txt"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "hello world");
    }

    #[test]
    fn test_each_flush_gets_its_own_file() {
        let dir = tempdir().unwrap();
        let mut sink = FileSink::new(dir.path(), &seed()).unwrap();

        sink.append("first").unwrap();
        // Filenames have millisecond resolution; space the flushes out.
        std::thread::sleep(std::time::Duration::from_millis(5));
        sink.append("second").unwrap();

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("deep").join("out");

        let mut sink = FileSink::new(&nested, &seed()).unwrap();
        sink.append("content").unwrap();

        assert!(nested.is_dir());
    }

    #[test]
    fn test_append_fails_on_unwritable_dir() {
        // A directory path that is actually a file cannot be created.
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "file").unwrap();

        let result = FileSink::new(&blocker.join("sub"), &seed());
        assert!(matches!(result.unwrap_err(), SinkError::CreateDir { .. }));
    }
}
