//! Compile-time diagnostics and fatal compiler signals.
//!
//! Two error channels exist and they never mix:
//!
//! - [`CompileError`]: a problem with the input formula. Diagnostics are
//!   collected and reported together; checking keeps going after each one.
//! - [`Fatal`]: the compiler cannot continue: a construct it does not
//!   implement yet, or a broken internal invariant. A fatal signal aborts the
//!   compile and carries no partial output.
//!
//! # Examples
//!
//! ```
//! # use formula_ast::error::*;
//! # use formula_ast::foundation::Span;
//! let error = CompileError::new(
//!     ErrorKind::UnresolvedFunction,
//!     Span::new(0, 0, 6),
//!     "no function 'foo' matches (int)".to_string(),
//! );
//! assert_eq!(error.to_string(), "error: unresolved function: no function 'foo' matches (int)");
//! ```

use crate::foundation::{SourceMap, Span};
use std::fmt;

/// Compilation diagnostic with source location and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// Category of this error
    pub kind: ErrorKind,
    /// Primary source location
    pub span: Span,
    /// Primary error message
    pub message: String,
    /// Additional notes or hints
    pub notes: Vec<String>,
}

/// Category of compilation error.
///
/// # Invariant
///
/// The discriminant values must match the ERROR_KIND_NAMES array indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    /// Syntax error (invalid token, unexpected end of input, ...)
    Syntax = 0,
    /// A value does not fit the expected type or the back end's types
    TypeMismatch = 1,
    /// No overload matches a call's name and argument types
    UnresolvedFunction = 2,
}

/// Human-readable names for error kinds.
///
/// Index matches ErrorKind discriminant.
const ERROR_KIND_NAMES: &[&str] = &[
    "syntax error",        // 0: Syntax
    "type mismatch",       // 1: TypeMismatch
    "unresolved function", // 2: UnresolvedFunction
];

impl CompileError {
    /// Creates a new error diagnostic.
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            notes: Vec::new(),
        }
    }

    /// Adds a note or hint.
    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

impl ErrorKind {
    /// Returns a human-readable name for this error kind.
    pub fn name(self) -> &'static str {
        ERROR_KIND_NAMES[self as usize]
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}: {}", self.kind.name(), self.message)
    }
}

impl std::error::Error for CompileError {}

/// Condition that aborts a whole compile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fatal {
    /// Recognized construct the compiler cannot lower yet
    #[error("not yet supported: {message}")]
    Unsupported {
        /// What is missing
        message: String,
        /// Offending construct
        span: Span,
    },
    /// Broken invariant between compiler stages
    #[error("internal compiler error: {message}")]
    Internal {
        /// Violated invariant
        message: String,
        /// Node being processed
        span: Span,
    },
}

impl Fatal {
    /// Unsupported-construct signal.
    pub fn unsupported(span: Span, message: impl Into<String>) -> Self {
        Fatal::Unsupported {
            message: message.into(),
            span,
        }
    }

    /// Internal invariant violation.
    pub fn internal(span: Span, message: impl Into<String>) -> Self {
        Fatal::Internal {
            message: message.into(),
            span,
        }
    }

    /// Location of the construct that triggered the signal.
    pub fn span(&self) -> Span {
        match self {
            Fatal::Unsupported { span, .. } | Fatal::Internal { span, .. } => *span,
        }
    }
}

/// Formats diagnostics with source code context.
///
/// Produces `file:line:col`, the offending source line and a `^^^`
/// underline, followed by notes.
///
/// # Examples
///
/// ```
/// # use formula_ast::error::*;
/// # use formula_ast::foundation::{Span, SourceMap};
/// # use std::path::PathBuf;
/// let mut sources = SourceMap::new();
/// let file_id = sources.add_file(PathBuf::from("wave.txt"), "y = foo(1)".to_string());
/// let error = CompileError::new(
///     ErrorKind::UnresolvedFunction,
///     Span::new(file_id, 4, 10),
///     "no function 'foo' matches (int)".to_string(),
/// );
///
/// let formatted = DiagnosticFormatter::new(&sources).format(&error);
/// assert!(formatted.contains("wave.txt:1:5"));
/// ```
pub struct DiagnosticFormatter<'a> {
    sources: &'a SourceMap,
}

impl<'a> DiagnosticFormatter<'a> {
    /// Creates a new diagnostic formatter.
    pub fn new(sources: &'a SourceMap) -> Self {
        Self { sources }
    }

    /// Formats a diagnostic as a string with source context.
    pub fn format(&self, error: &CompileError) -> String {
        let mut output = format!("error: {}: {}\n", error.kind.name(), error.message);
        self.push_location(&mut output, &error.span);
        for note in &error.notes {
            output.push_str(&format!("   = help: {}\n", note));
        }
        output
    }

    /// Formats a fatal signal the same way as a diagnostic.
    pub fn format_fatal(&self, fatal: &Fatal) -> String {
        let mut output = format!("fatal: {}\n", fatal);
        self.push_location(&mut output, &fatal.span());
        output
    }

    /// Formats multiple diagnostics.
    pub fn format_all(&self, errors: &[CompileError]) -> String {
        errors
            .iter()
            .map(|e| self.format(e))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn push_location(&self, output: &mut String, span: &Span) {
        let (Some(file), Some((line, col))) = (self.sources.file(span), self.sources.line_col(span))
        else {
            return;
        };
        output.push_str(&format!("  --> {}:{}:{}\n", file.path.display(), line, col));

        if let Some(source_line) = file.line_text(line) {
            output.push_str("   |\n");
            output.push_str(&format!("{:3} | {}\n", line, source_line));

            let start_col = col as usize;
            let end_col = (start_col + span.len() as usize).min(source_line.len() + 1);
            let underline = " ".repeat(start_col.saturating_sub(1))
                + &"^".repeat(end_col.saturating_sub(start_col).max(1));
            output.push_str(&format!("   | {}\n", underline));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_sources() -> SourceMap {
        let mut sources = SourceMap::new();
        sources.add_file(
            PathBuf::from("test.txt"),
            "x = foo(1);\ny = x + true".to_string(),
        );
        sources
    }

    #[test]
    fn test_error_creation() {
        let err = CompileError::new(
            ErrorKind::UnresolvedFunction,
            Span::new(0, 4, 10),
            "no function 'foo' matches (int)".to_string(),
        );

        assert_eq!(err.kind, ErrorKind::UnresolvedFunction);
        assert!(err.notes.is_empty());
    }

    #[test]
    fn test_error_kind_names() {
        assert_eq!(ErrorKind::Syntax.name(), "syntax error");
        assert_eq!(ErrorKind::TypeMismatch.name(), "type mismatch");
        assert_eq!(ErrorKind::UnresolvedFunction.name(), "unresolved function");
    }

    #[test]
    fn test_formatter_basic() {
        let sources = test_sources();
        let error = CompileError::new(
            ErrorKind::UnresolvedFunction,
            Span::new(0, 4, 10),
            "no function 'foo' matches (int)".to_string(),
        )
        .with_note("searched: shader nodes, nodes, functions".to_string());

        let formatted = DiagnosticFormatter::new(&sources).format(&error);

        assert!(formatted.contains("error: unresolved function"));
        assert!(formatted.contains("test.txt:1:5"));
        assert!(formatted.contains("x = foo(1);"));
        assert!(formatted.contains("    ^^^^^^"));
        assert!(formatted.contains("help: searched: shader nodes, nodes, functions"));
    }

    #[test]
    fn test_formatter_second_line() {
        let sources = test_sources();
        let error = CompileError::new(
            ErrorKind::TypeMismatch,
            Span::new(0, 20, 24),
            "bad operand".to_string(),
        );

        let formatted = DiagnosticFormatter::new(&sources).format(&error);
        assert!(formatted.contains("test.txt:2:9"));
        assert!(formatted.contains("y = x + true"));
    }

    #[test]
    fn test_formatter_unknown_file_skips_location() {
        let sources = SourceMap::new();
        let error = CompileError::new(ErrorKind::Syntax, Span::new(3, 0, 1), "oops".to_string());
        let formatted = DiagnosticFormatter::new(&sources).format(&error);
        assert_eq!(formatted, "error: syntax error: oops\n");
    }

    #[test]
    fn test_fatal_display_and_span() {
        let fatal = Fatal::unsupported(Span::new(0, 0, 4), "structured assignment");
        assert_eq!(fatal.to_string(), "not yet supported: structured assignment");
        assert_eq!(fatal.span(), Span::new(0, 0, 4));

        let fatal = Fatal::internal(Span::zero(0), "error node reached lowering");
        assert!(fatal.to_string().starts_with("internal compiler error"));
    }

    #[test]
    fn test_format_fatal() {
        let sources = test_sources();
        let fatal = Fatal::unsupported(Span::new(0, 0, 1), "structured assignment");
        let formatted = DiagnosticFormatter::new(&sources).format_fatal(&fatal);
        assert!(formatted.starts_with("fatal: not yet supported"));
        assert!(formatted.contains("test.txt:1:1"));
    }
}
