// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Formula Tools
//!
//! Check harness and logging setup for the formula compiler CLIs.

use formula::{
    Compilation, Compiler, DiagnosticFormatter, Fatal, GeometryNodes, ShaderNodes, SourceMap,
    format_errors,
};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt as subscriber_fmt};
use walkdir::WalkDir;

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter.
/// Default is `info`, with compiler stages at `debug`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,formula=debug,formula_tools=debug"));

    subscriber_fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Target node tree kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Domain {
    /// Shader node trees
    #[default]
    Shader,
    /// Geometry node trees
    Geometry,
}

impl Domain {
    /// Compile one source with a fresh compiler for this domain.
    pub fn compile(self, source: &str, file_id: u16) -> Result<Compilation, Fatal> {
        match self {
            Domain::Shader => Compiler::new(ShaderNodes).compile_file(source, file_id),
            Domain::Geometry => Compiler::new(GeometryNodes).compile_file(source, file_id),
        }
    }
}

/// Failure to read the checked directory.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The path is not a directory
    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),
    /// Directory traversal failed
    #[error("directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The compiler ran to completion, possibly with diagnostics
    Compiled(Compilation),
    /// The compiler stopped on an unsupported construct or a defect
    Fatal(Fatal),
    /// The file could not be read as UTF-8 text
    Unreadable(String),
}

/// Result of checking one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// Checked file
    pub path: PathBuf,
    /// Compile result
    pub outcome: Outcome,
    /// Formatted diagnostics, fatal error or read error; empty when clean
    pub diagnostics: String,
}

impl FileReport {
    /// Compile `source` as the contents of `path`.
    pub fn check(path: &Path, source: &str, domain: Domain) -> Self {
        let mut sources = SourceMap::new();
        let file_id = sources.add_file(path.to_path_buf(), source.to_string());
        let (outcome, diagnostics) = match domain.compile(source, file_id) {
            Ok(compilation) => {
                let diagnostics = format_errors(&compilation.errors, &sources);
                (Outcome::Compiled(compilation), diagnostics)
            }
            Err(fatal) => {
                let diagnostics = DiagnosticFormatter::new(&sources).format_fatal(&fatal);
                (Outcome::Fatal(fatal), diagnostics)
            }
        };
        Self {
            path: path.to_path_buf(),
            outcome,
            diagnostics,
        }
    }

    /// Report for a file whose contents could not be read.
    pub fn unreadable(path: &Path, err: &std::io::Error) -> Self {
        let message = err.to_string();
        Self {
            path: path.to_path_buf(),
            diagnostics: format!("error: failed to read {}: {message}", path.display()),
            outcome: Outcome::Unreadable(message),
        }
    }

    /// The compilation, when the compiler ran to completion.
    pub fn compilation(&self) -> Option<&Compilation> {
        match &self.outcome {
            Outcome::Compiled(compilation) => Some(compilation),
            Outcome::Fatal(_) | Outcome::Unreadable(_) => None,
        }
    }

    /// Whether the compiler hit an unsupported construct or a defect.
    pub fn is_fatal(&self) -> bool {
        matches!(self.outcome, Outcome::Fatal(_))
    }

    /// Whether the file could not be read.
    pub fn is_unreadable(&self) -> bool {
        matches!(self.outcome, Outcome::Unreadable(_))
    }

    /// Whether the file compiled without diagnostics.
    pub fn is_clean(&self) -> bool {
        self.compilation().is_some_and(Compilation::succeeded)
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match &self.outcome {
            Outcome::Compiled(compilation) if compilation.has_syntax_errors() => {
                "no internal errors, syntax errors"
            }
            Outcome::Compiled(compilation) if !compilation.succeeded() => {
                "no internal errors, type errors"
            }
            Outcome::Compiled(_) => "no internal errors, no errors",
            Outcome::Fatal(_) => "internal error, not compiled",
            Outcome::Unreadable(_) => "unreadable, not compiled",
        };
        write!(f, "{}: {status}", self.path.display())
    }
}

/// Reports of one directory check, sorted by path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckSummary {
    /// One report per file
    pub reports: Vec<FileReport>,
}

impl CheckSummary {
    /// Number of files that hit a fatal error.
    pub fn fatal_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_fatal()).count()
    }

    /// Number of files that compiled without diagnostics.
    pub fn clean_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_clean()).count()
    }

    /// Number of files that could not be read.
    pub fn unreadable_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_unreadable()).count()
    }

    /// Whether any file hit a fatal error.
    pub fn has_fatal(&self) -> bool {
        self.fatal_count() > 0
    }
}

/// Compile every file directly inside `dir`, each independently.
///
/// Subdirectories are not entered. Files are checked in path order.
///
/// # Errors
///
/// Fails when `dir` is not a directory or cannot be traversed. Unreadable
/// files and compile failures are part of the summary.
pub fn check_directory(dir: &Path, domain: Domain) -> Result<CheckSummary, CheckError> {
    if !dir.is_dir() {
        return Err(CheckError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    // Ensure deterministic order
    files.sort();

    let mut summary = CheckSummary::default();
    for path in files {
        let report = match std::fs::read_to_string(&path) {
            Ok(source) => FileReport::check(&path, &source, domain),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read file");
                summary.reports.push(FileReport::unreadable(&path, &err));
                continue;
            }
        };
        if report.is_fatal() {
            tracing::warn!(path = %path.display(), "fatal error while compiling");
        }
        tracing::debug!(path = %path.display(), clean = report.is_clean(), "checked file");
        summary.reports.push(report);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_check_directory_reports_each_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b_error.txt"), "y = foo(1)").unwrap();
        fs::write(dir.path().join("a_clean.txt"), "y = sin(x) * 2").unwrap();
        fs::write(dir.path().join("c_fatal.txt"), "a, b = separate_xyz(v)").unwrap();
        fs::write(dir.path().join("d_syntax.txt"), "y = (1 +").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("skipped.txt"), "1").unwrap();

        let summary = check_directory(dir.path(), Domain::Shader).unwrap();

        let names: Vec<String> = summary
            .reports
            .iter()
            .map(|r| r.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_clean.txt", "b_error.txt", "c_fatal.txt", "d_syntax.txt"]);
        assert_eq!(summary.clean_count(), 1);
        assert_eq!(summary.fatal_count(), 1);
        assert!(summary.has_fatal());

        let lines: Vec<String> = summary
            .reports
            .iter()
            .map(|r| r.to_string().rsplit(": ").next().unwrap().to_string())
            .collect();
        assert_eq!(
            lines,
            vec![
                "no internal errors, no errors",
                "no internal errors, type errors",
                "internal error, not compiled",
                "no internal errors, syntax errors",
            ]
        );
    }

    #[test]
    fn test_diagnostics_point_into_the_file() {
        let report = FileReport::check(Path::new("wave.txt"), "y = foo(1)", Domain::Geometry);
        assert!(report.diagnostics.contains("wave.txt:1:5"), "{}", report.diagnostics);

        let report = FileReport::check(Path::new("split.txt"), "a, b = c", Domain::Geometry);
        assert!(report.diagnostics.starts_with("fatal: not yet supported"));
        assert!(report.diagnostics.contains("split.txt:1:1"));
    }

    #[test]
    fn test_unreadable_file_does_not_stop_the_check() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a_ok.txt"), "y = 1 + 2").unwrap();
        fs::write(dir.path().join("b_bad.txt"), [0xff, 0xfe, b'1']).unwrap();
        fs::write(dir.path().join("c_ok.txt"), "z = sin(x)").unwrap();

        let summary = check_directory(dir.path(), Domain::Geometry).unwrap();

        assert_eq!(summary.reports.len(), 3);
        assert_eq!(summary.clean_count(), 2);
        assert_eq!(summary.unreadable_count(), 1);
        assert!(!summary.has_fatal());

        let bad = &summary.reports[1];
        assert!(bad.path.ends_with("b_bad.txt"));
        assert!(matches!(bad.outcome, Outcome::Unreadable(_)));
        assert!(bad.compilation().is_none());
        assert!(bad.to_string().ends_with("b_bad.txt: unreadable, not compiled"));
        assert!(bad.diagnostics.starts_with("error: failed to read"), "{}", bad.diagnostics);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let err = check_directory(&dir.path().join("missing"), Domain::Geometry).unwrap_err();
        assert!(matches!(err, CheckError::NotADirectory(_)));
    }
}
