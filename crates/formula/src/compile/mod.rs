use formula_ast::error::{CompileError, DiagnosticFormatter, ErrorKind, Fatal};
use formula_ast::foundation::{SourceMap, Span};
use formula_ast::operation::Operation;
use formula_ast::TyProgram;
use formula_lexer::Token;
use formula_parser::{ParseError, parse_program};
use formula_resolve::{BackEnd, FunctionLibrary, type_check};
use logos::Logos;
use std::ops::Range;

pub mod lower;

pub use lower::lower;

/// Result of one compile.
///
/// Either `operations` is filled and `errors` is empty, or the other way
/// round. Fatal conditions are not represented here; [`Compiler::compile`]
/// returns them as `Err`.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    /// Operation stream for the host graph builder
    pub operations: Vec<Operation>,
    /// Syntax and type diagnostics, in source order
    pub errors: Vec<CompileError>,
    /// Typed tree, when the source parsed
    pub typed: Option<TyProgram>,
}

impl Compilation {
    /// Whether no diagnostic was raised.
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any diagnostic is a syntax error.
    pub fn has_syntax_errors(&self) -> bool {
        self.errors.iter().any(|e| e.kind == ErrorKind::Syntax)
    }

    fn failed(errors: Vec<CompileError>, typed: Option<TyProgram>) -> Self {
        Self {
            operations: Vec::new(),
            errors,
            typed,
        }
    }
}

/// Compiles formulas for one back end.
///
/// Holds no per-compile state: every [`compile`](Self::compile) call lexes,
/// parses, checks and lowers from scratch, so one compiler can be reused for
/// any number of sources.
#[derive(Debug, Clone, Default)]
pub struct Compiler<B: BackEnd> {
    backend: B,
    functions: FunctionLibrary,
}

impl<B: BackEnd> Compiler<B> {
    /// Compiler without generic functions.
    pub fn new(backend: B) -> Self {
        Self::with_functions(backend, FunctionLibrary::new())
    }

    /// Compiler that also resolves calls against `functions`.
    pub fn with_functions(backend: B, functions: FunctionLibrary) -> Self {
        Self { backend, functions }
    }

    /// The target back end.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generic functions visible to calls.
    pub fn functions(&self) -> &FunctionLibrary {
        &self.functions
    }

    /// Compile a standalone source; spans use file id 0.
    pub fn compile(&self, source: &str) -> Result<Compilation, Fatal> {
        self.compile_file(source, 0)
    }

    /// Compile the source registered as `file_id` in a [`SourceMap`].
    ///
    /// Stages run in order and stop at the first one that reports
    /// diagnostics: lexing, parsing, type checking, lowering.
    ///
    /// # Errors
    ///
    /// Returns [`Fatal`] when the source uses a construct the compiler does
    /// not support yet, or when an internal invariant breaks. Problems with
    /// the formula itself are reported in [`Compilation::errors`].
    pub fn compile_file(&self, source: &str, file_id: u16) -> Result<Compilation, Fatal> {
        // 1. Lexing
        let (tokens, lex_errors) = lex(source, file_id);
        if !lex_errors.is_empty() {
            tracing::debug!(errors = lex_errors.len(), "lexing failed");
            return Ok(Compilation::failed(lex_errors, None));
        }

        // 2. Parsing
        let (program, parse_errors) = parse_program(&tokens, file_id);
        if !parse_errors.is_empty() {
            tracing::debug!(errors = parse_errors.len(), "parsing failed");
            let errors = parse_errors
                .into_iter()
                .map(ParseError::into_diagnostic)
                .collect();
            return Ok(Compilation::failed(errors, None));
        }

        // 3. Type checking
        let checked = type_check(&program, &self.backend, &self.functions)?;
        if !checked.succeeded() {
            tracing::debug!(errors = checked.errors.len(), "type checking failed");
            return Ok(Compilation::failed(checked.errors, Some(checked.program)));
        }

        // 4. Lowering
        let operations = lower(&checked.program, &self.backend)?;
        tracing::debug!(
            statements = checked.program.body.len(),
            operations = operations.len(),
            "compiled formula"
        );
        Ok(Compilation {
            operations,
            errors: Vec::new(),
            typed: Some(checked.program),
        })
    }
}

/// Tokenize a source, reporting every invalid character.
pub fn lex(source: &str, file_id: u16) -> (Vec<(Token, Range<usize>)>, Vec<CompileError>) {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => errors.push(CompileError::new(
                ErrorKind::Syntax,
                Span::new(file_id, span.start as u32, span.end as u32),
                format!("invalid token '{}'", lexer.slice()),
            )),
        }
    }

    (tokens, errors)
}

/// Formats compilation errors with source context.
pub fn format_errors(errors: &[CompileError], source_map: &SourceMap) -> String {
    let formatter = DiagnosticFormatter::new(source_map);
    formatter.format_all(errors)
}

#[cfg(test)]
mod tests;
