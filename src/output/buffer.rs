//! In-memory cache of extracted text
//!
//! Page text accumulates here until the configured byte threshold is
//! reached, at which point the whole buffer is flushed through the sink and
//! the cache starts a new generation.

use crate::output::sink::{SinkError, TextSink};

/// Byte-counted accumulator for extracted page text
///
/// Invariant: `size_bytes` always equals the UTF-8 encoded length of the
/// full accumulated content. It is recomputed from the whole string after
/// every mutation rather than summed incrementally.
pub struct CacheBuffer {
    content: String,
    size_bytes: usize,
    max_bytes: usize,
    flushes: u64,
    bytes_flushed: u64,
}

impl CacheBuffer {
    /// Creates an empty buffer that flushes once it holds `max_bytes`
    pub fn new(max_bytes: usize) -> Self {
        Self {
            content: String::new(),
            size_bytes: 0,
            max_bytes,
            flushes: 0,
            bytes_flushed: 0,
        }
    }

    /// Appends `text`, flushing the current generation first if the
    /// threshold would be met
    ///
    /// The threshold check happens before the append: if the buffer already
    /// holds content and `size + text` reaches `max_bytes`, the existing
    /// content is flushed through `sink` and `text` becomes the start of the
    /// next generation.
    ///
    /// On a sink failure the buffer keeps its content and the error is
    /// returned; nothing is discarded.
    pub fn add(&mut self, text: &str, sink: &mut dyn TextSink) -> Result<(), SinkError> {
        if !self.content.is_empty() && self.size_bytes + text.len() >= self.max_bytes {
            tracing::info!(
                "Cache reached {} bytes (threshold {}), flushing",
                self.size_bytes,
                self.max_bytes
            );
            self.flush(sink)?;
        }

        self.content.push_str(text);
        // Recomputed from the full buffer, not summed incrementally.
        self.size_bytes = self.content.len();
        Ok(())
    }

    /// Persists any residual content at the end of a run
    ///
    /// A no-op on an empty buffer.
    pub fn flush_if_nonempty(&mut self, sink: &mut dyn TextSink) -> Result<(), SinkError> {
        if self.content.is_empty() {
            return Ok(());
        }
        self.flush(sink)
    }

    fn flush(&mut self, sink: &mut dyn TextSink) -> Result<(), SinkError> {
        // Reset only after the sink accepted the content.
        sink.append(&self.content)?;
        self.flushes += 1;
        self.bytes_flushed += self.content.len() as u64;
        self.content.clear();
        self.size_bytes = 0;
        Ok(())
    }

    /// Current size of the accumulated content in bytes
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Returns true if no content is buffered
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of successful flushes so far
    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    /// Total bytes handed to the sink across all flushes
    pub fn bytes_flushed(&self) -> u64 {
        self.bytes_flushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Records appended content in memory
    struct MemorySink {
        writes: Vec<String>,
    }

    impl MemorySink {
        fn new() -> Self {
            Self { writes: Vec::new() }
        }
    }

    impl TextSink for MemorySink {
        fn append(&mut self, content: &str) -> Result<PathBuf, SinkError> {
            self.writes.push(content.to_string());
            Ok(PathBuf::from("memory"))
        }
    }

    /// Fails every append
    struct FailingSink;

    impl TextSink for FailingSink {
        fn append(&mut self, _content: &str) -> Result<PathBuf, SinkError> {
            Err(SinkError::Append {
                path: PathBuf::from("failing"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            })
        }
    }

    #[test]
    fn test_size_tracks_full_content() {
        let mut sink = MemorySink::new();
        let mut buffer = CacheBuffer::new(1024);

        buffer.add("hello", &mut sink).unwrap();
        buffer.add(" world", &mut sink).unwrap();

        assert_eq!(buffer.size_bytes(), "hello world".len());
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn test_size_counts_multibyte_correctly() {
        let mut sink = MemorySink::new();
        let mut buffer = CacheBuffer::new(1024);

        // "héllo" is 6 bytes, "wörld" is 6 bytes.
        buffer.add("héllo", &mut sink).unwrap();
        buffer.add("wörld", &mut sink).unwrap();

        assert_eq!(buffer.size_bytes(), 12);
    }

    #[test]
    fn test_threshold_flushes_before_append() {
        let mut sink = MemorySink::new();
        let mut buffer = CacheBuffer::new(10);

        buffer.add("12345", &mut sink).unwrap();
        assert!(sink.writes.is_empty());

        // 5 existing + 7 new >= 10: old generation flushes, new text retained.
        buffer.add("abcdefg", &mut sink).unwrap();

        assert_eq!(sink.writes, vec!["12345".to_string()]);
        assert_eq!(buffer.size_bytes(), "abcdefg".len());
    }

    #[test]
    fn test_exact_threshold_triggers_flush() {
        let mut sink = MemorySink::new();
        let mut buffer = CacheBuffer::new(10);

        buffer.add("12345", &mut sink).unwrap();
        buffer.add("67890", &mut sink).unwrap();

        assert_eq!(sink.writes.len(), 1);
        assert_eq!(buffer.size_bytes(), 5);
    }

    #[test]
    fn test_below_threshold_never_flushes() {
        let mut sink = MemorySink::new();
        let mut buffer = CacheBuffer::new(100);

        for _ in 0..9 {
            buffer.add("0123456789", &mut sink).unwrap();
        }

        assert!(sink.writes.is_empty());
        assert_eq!(buffer.size_bytes(), 90);
    }

    #[test]
    fn test_failed_flush_keeps_content() {
        let mut failing = FailingSink;
        let mut buffer = CacheBuffer::new(10);

        buffer.add("123456789", &mut failing).unwrap();
        let result = buffer.add("overflow", &mut failing);

        assert!(result.is_err());
        // The old generation survives the failed flush.
        assert_eq!(buffer.size_bytes(), 9);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.flushes(), 0);
    }

    #[test]
    fn test_flush_if_nonempty_on_empty_is_noop() {
        let mut sink = MemorySink::new();
        let mut buffer = CacheBuffer::new(10);

        buffer.flush_if_nonempty(&mut sink).unwrap();
        assert!(sink.writes.is_empty());
        assert_eq!(buffer.flushes(), 0);
    }

    #[test]
    fn test_flush_if_nonempty_persists_and_resets() {
        let mut sink = MemorySink::new();
        let mut buffer = CacheBuffer::new(1024);

        buffer.add("residual text", &mut sink).unwrap();
        buffer.flush_if_nonempty(&mut sink).unwrap();

        assert_eq!(sink.writes, vec!["residual text".to_string()]);
        assert!(buffer.is_empty());
        assert_eq!(buffer.size_bytes(), 0);
        assert_eq!(buffer.flushes(), 1);
        assert_eq!(buffer.bytes_flushed(), "residual text".len() as u64);
    }

    #[test]
    fn test_oversized_first_add_does_not_flush_empty_buffer() {
        let mut sink = MemorySink::new();
        let mut buffer = CacheBuffer::new(4);

        buffer.add("larger than the threshold", &mut sink).unwrap();

        // Nothing was buffered beforehand, so there was nothing to flush.
        assert!(sink.writes.is_empty());
        assert_eq!(buffer.size_bytes(), "larger than the threshold".len());
    }

    #[test]
    fn test_flush_counters_accumulate() {
        let mut sink = MemorySink::new();
        let mut buffer = CacheBuffer::new(4);

        buffer.add("aaaa", &mut sink).unwrap();
        buffer.add("bbbb", &mut sink).unwrap(); // flushes "aaaa"
        buffer.add("cccc", &mut sink).unwrap(); // flushes "bbbb"
        buffer.flush_if_nonempty(&mut sink).unwrap(); // flushes "cccc"

        assert_eq!(buffer.flushes(), 3);
        assert_eq!(buffer.bytes_flushed(), 12);
        assert_eq!(sink.writes.len(), 3);
    }
}
