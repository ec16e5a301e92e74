//! Source location tracking for diagnostics.
//!
//! - `Span`: byte range inside one source file
//! - `SourceMap`: owns the source files of a check run and maps spans back
//!   to paths, lines and snippets
//! - `SourceFile`: one source text with a line index
//!
//! # Examples
//!
//! ```
//! # use formula_ast::foundation::span::*;
//! # use std::path::PathBuf;
//! let mut map = SourceMap::new();
//! let file_id = map.add_file(PathBuf::from("wave.txt"), "x = 1;\ny = x * 2".to_string());
//! let span = Span::new(file_id, 7, 16);
//!
//! assert_eq!(map.snippet(&span), Some("y = x * 2"));
//! assert_eq!(map.line_col(&span), Some((2, 1)));
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Byte range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Index into [`SourceMap`] files
    pub file_id: u16,
    /// Byte offset of the first character
    pub start: u32,
    /// Byte offset one past the last character
    pub end: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(file_id: u16, start: u32, end: u32) -> Self {
        Self {
            file_id,
            start,
            end,
        }
    }

    /// Zero-length span at the start of a file.
    pub fn zero(file_id: u16) -> Self {
        Self::new(file_id, 0, 0)
    }

    /// Check if this span is zero-length.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length in bytes (zero for inverted spans).
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Smallest span covering both `self` and `other`.
    ///
    /// Spans of different files cannot be merged; `self` is returned as is.
    pub fn merge(&self, other: &Span) -> Span {
        if self.file_id != other.file_id {
            return *self;
        }
        Span {
            file_id: self.file_id,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// All source files of one check run.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

/// A single source file with line indexing.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path the source was read from (or a synthetic name)
    pub path: PathBuf,
    /// Original source text
    pub source: String,
    /// Byte offsets of each line start, followed by an EOF sentinel
    line_starts: Vec<u32>,
}

impl SourceMap {
    /// Create an empty source map.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Add a source file and return its id.
    pub fn add_file(&mut self, path: PathBuf, source: String) -> u16 {
        let file_id = u16::try_from(self.files.len()).unwrap_or(u16::MAX);
        self.files.push(SourceFile::new(path, source));
        file_id
    }

    /// Source file a span points into.
    pub fn file(&self, span: &Span) -> Option<&SourceFile> {
        self.files.get(span.file_id as usize)
    }

    /// Path of the file a span points into.
    pub fn file_path(&self, span: &Span) -> Option<&Path> {
        self.file(span).map(|file| file.path.as_path())
    }

    /// Source text covered by a span.
    pub fn snippet(&self, span: &Span) -> Option<&str> {
        self.file(span)?
            .source
            .get(span.start as usize..span.end as usize)
    }

    /// 1-based (line, column) of a span's start.
    pub fn line_col(&self, span: &Span) -> Option<(u32, u32)> {
        Some(self.file(span)?.line_col(span.start))
    }

    /// Number of files in this map.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl SourceFile {
    /// Create a new source file with precomputed line starts.
    pub fn new(path: PathBuf, source: String) -> Self {
        let line_starts = compute_line_starts(&source);
        Self {
            path,
            source,
            line_starts,
        }
    }

    /// 1-based (line, column) for a byte offset. Offsets past EOF clamp to EOF.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.source.len() as u32);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.max(1) - 1,
        };
        let line_idx = line_idx.min(self.line_count().saturating_sub(1));
        let col = offset - self.line_starts[line_idx] + 1;
        (line_idx as u32 + 1, col)
    }

    /// Text of a 1-based line, without its trailing newline.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        if line == 0 || line as usize >= self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[line as usize - 1] as usize;
        let end = self.line_starts[line as usize] as usize;
        self.source
            .get(start..end)
            .map(|text| text.trim_end_matches(['\n', '\r']))
    }

    /// Number of lines in this file.
    pub fn line_count(&self) -> usize {
        self.line_starts.len().saturating_sub(1).max(1)
    }
}

fn compute_line_starts(source: &str) -> Vec<u32> {
    let mut line_starts = vec![0];
    for (idx, ch) in source.char_indices() {
        if ch == '\n' {
            line_starts.push((idx + 1) as u32);
        }
    }
    if line_starts.last() != Some(&(source.len() as u32)) {
        line_starts.push(source.len() as u32);
    }
    line_starts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let merged = Span::new(0, 10, 20).merge(&Span::new(0, 15, 30));
        assert_eq!(merged, Span::new(0, 10, 30));
        assert_eq!(merged.len(), 20);
    }

    #[test]
    fn test_span_merge_keeps_self_across_files() {
        let span = Span::new(0, 1, 2);
        assert_eq!(span.merge(&Span::new(1, 0, 9)), span);
    }

    #[test]
    fn test_compute_line_starts() {
        assert_eq!(compute_line_starts("a = 1\nb = 2"), vec![0, 6, 11]);
        assert_eq!(compute_line_starts("a = 1\n"), vec![0, 6]);
    }

    #[test]
    fn test_source_file_line_col() {
        let file = SourceFile::new(PathBuf::from("t.txt"), "hello\nworld\n".to_string());
        assert_eq!(file.line_col(0), (1, 1));
        assert_eq!(file.line_col(6), (2, 1));
        assert_eq!(file.line_col(8), (2, 3));
        assert_eq!(file.line_col(99), (2, 7));
    }

    #[test]
    fn test_source_file_line_text() {
        let file = SourceFile::new(PathBuf::from("t.txt"), "hello\nworld\n".to_string());
        assert_eq!(file.line_text(1), Some("hello"));
        assert_eq!(file.line_text(2), Some("world"));
        assert_eq!(file.line_text(3), None);
    }

    #[test]
    fn test_source_map_lookup() {
        let mut map = SourceMap::new();
        let id = map.add_file(PathBuf::from("t.txt"), "x = 42".to_string());
        let span = Span::new(id, 4, 6);
        assert_eq!(map.snippet(&span), Some("42"));
        assert_eq!(map.line_col(&span), Some((1, 5)));
        assert!(map.file(&Span::new(7, 0, 0)).is_none());
    }
}
