//! Type checking.
//!
//! Turns an untyped [`Program`] into a [`TyProgram`] against one back end.
//! Operators become calls, every call is resolved to exactly one overload,
//! and literals are coerced into the type the back end carries them as.
//!
//! Problems with the formula are recorded as [`CompileError`]s and checking
//! continues with an error node in place of the offending expression. An
//! expression that depends on an error node fails silently, so each mistake
//! is reported once. Constructs the compiler does not implement abort the
//! whole check with a [`Fatal`].
//!
//! Variables live in one flat scope for the whole program. Reading a name
//! that was never assigned introduces it as a host input of the back end's
//! default scalar type.

use formula_ast::error::{CompileError, ErrorKind, Fatal};
use formula_ast::foundation::{DataType, Span, Value};
use formula_ast::{
    Expr, ExprKind, ExprType, Program, Stmt, StmtKind, TyExpr, TyExprKind, TyProgram, TyStmt,
    TyStmtKind,
};
use indexmap::IndexMap;

use crate::backend::BackEnd;
use crate::functions::FunctionLibrary;

/// Output of [`type_check`].
#[derive(Debug, Clone, PartialEq)]
pub struct Checked {
    /// Typed program; contains error nodes when `errors` is not empty
    pub program: TyProgram,
    /// Variables in order of first appearance, with their latest type
    pub variables: IndexMap<String, DataType>,
    /// Diagnostics in source order
    pub errors: Vec<CompileError>,
}

impl Checked {
    /// Whether the program is free of diagnostics.
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Type check a program against a back end.
///
/// Each call starts from an empty variable scope.
///
/// # Errors
///
/// Returns [`Fatal::Unsupported`] for structured assignment, that is more
/// than one target or a right-hand side with several outputs.
pub fn type_check<B: BackEnd + ?Sized>(
    program: &Program,
    backend: &B,
    functions: &FunctionLibrary,
) -> Result<Checked, Fatal> {
    let mut checker = Checker {
        backend,
        functions,
        variables: IndexMap::new(),
        errors: Vec::new(),
    };

    let body = program
        .body
        .iter()
        .map(|stmt| checker.check_stmt(stmt))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        statements = body.len(),
        variables = checker.variables.len(),
        errors = checker.errors.len(),
        "type checked program"
    );

    Ok(Checked {
        program: TyProgram { body },
        variables: checker.variables,
        errors: checker.errors,
    })
}

struct Checker<'a, B: ?Sized> {
    backend: &'a B,
    functions: &'a FunctionLibrary,
    variables: IndexMap<String, DataType>,
    errors: Vec<CompileError>,
}

impl<B: BackEnd + ?Sized> Checker<'_, B> {
    fn check_stmt(&mut self, stmt: &Stmt) -> Result<TyStmt, Fatal> {
        let kind = match &stmt.kind {
            StmtKind::Expr(expr) => TyStmtKind::Expr(self.check_expr(expr)?),
            StmtKind::Assign { targets, value } => {
                let [target] = targets.as_slice() else {
                    return Err(Fatal::unsupported(
                        stmt.span,
                        format!("assignment to {} targets", targets.len()),
                    ));
                };
                let value = self.check_expr(value)?;
                let ty = match &value.ty {
                    ExprType::Single(ty) => *ty,
                    ExprType::Multi(outputs) => {
                        return Err(Fatal::unsupported(
                            value.span,
                            format!(
                                "assigning a call with {} outputs to '{}'",
                                outputs.len(),
                                target.name
                            ),
                        ));
                    }
                };
                self.variables.insert(target.name.clone(), ty);
                TyStmtKind::Assign {
                    targets: vec![target.name.clone()],
                    value,
                }
            }
        };
        Ok(TyStmt {
            kind,
            span: stmt.span,
        })
    }

    fn check_expr(&mut self, expr: &Expr) -> Result<TyExpr, Fatal> {
        let span = expr.span;

        // `-2` is a constant, not a call to `neg`
        if let Some(value) = expr.as_literal() {
            return Ok(self.check_literal(value, span));
        }

        let typed = match &expr.kind {
            ExprKind::Literal(value) => self.check_literal(*value, span),

            ExprKind::Name(name) => self.check_name(name, span)?,

            // === Calls and operators ===
            ExprKind::Call { name, args } => {
                let args = self.check_exprs(args)?;
                self.check_call(name, args, span)
            }
            ExprKind::Binary { op, left, right } => {
                let args = vec![self.check_expr(left)?, self.check_expr(right)?];
                self.check_call(op.function_name(), args, span)
            }
            ExprKind::Unary { op, operand } => {
                let args = vec![self.check_expr(operand)?];
                self.check_call(op.function_name(), args, span)
            }

            ExprKind::Vector(items) => {
                let items = self.check_exprs(items)?;
                if items.len() != 3 {
                    self.error(
                        ErrorKind::TypeMismatch,
                        span,
                        format!("vector needs 3 components, found {}", items.len()),
                    );
                    return Ok(TyExpr::error(span));
                }
                match constant_vector(&items) {
                    Some(vector) => self.check_literal(vector, span),
                    None => self.check_call("combine_xyz", items, span),
                }
            }
        };
        Ok(typed)
    }

    fn check_exprs(&mut self, exprs: &[Expr]) -> Result<Vec<TyExpr>, Fatal> {
        exprs.iter().map(|expr| self.check_expr(expr)).collect()
    }

    fn check_literal(&mut self, value: Value, span: Span) -> TyExpr {
        match self.backend.coerce_value(value, value.natural_type()) {
            Ok((value, ty)) => TyExpr::new(TyExprKind::Const { value }, ExprType::Single(ty), span),
            Err(err) => {
                self.error(ErrorKind::TypeMismatch, span, err.to_string());
                TyExpr::error(span)
            }
        }
    }

    fn check_name(&mut self, name: &str, span: Span) -> Result<TyExpr, Fatal> {
        if let Some(&ty) = self.variables.get(name) {
            return Ok(TyExpr::new(
                TyExprKind::Var {
                    name: name.to_string(),
                    needs_instantiation: false,
                },
                ExprType::Single(ty),
                span,
            ));
        }

        let (_, ty) = self
            .backend
            .coerce_value(Value::Default, DataType::Float)
            .map_err(|err| Fatal::internal(span, format!("no default input type: {err}")))?;
        tracing::trace!(name, %ty, "introduced input variable");
        self.variables.insert(name.to_string(), ty);
        Ok(TyExpr::new(
            TyExprKind::Var {
                name: name.to_string(),
                needs_instantiation: true,
            },
            ExprType::Single(ty),
            span,
        ))
    }

    fn check_call(&mut self, name: &str, args: Vec<TyExpr>, span: Span) -> TyExpr {
        // Already reported
        if args.iter().any(|arg| arg.ty.is_unknown()) {
            return TyExpr::error(span);
        }

        let mut types = Vec::with_capacity(args.len());
        for arg in &args {
            match &arg.ty {
                ExprType::Single(ty) => types.push(*ty),
                ExprType::Multi(outputs) => {
                    self.error(
                        ErrorKind::TypeMismatch,
                        arg.span,
                        format!(
                            "call with {} outputs used as an argument of '{name}'",
                            outputs.len()
                        ),
                    );
                    return TyExpr::error(span);
                }
            }
        }

        let resolution = match self.backend.resolve_function(name, &types, self.functions) {
            Ok(resolution) => resolution,
            Err(err) => {
                let note = format!("searched {}", err.searched().join(", "));
                self.errors.push(
                    CompileError::new(ErrorKind::UnresolvedFunction, span, err.to_string())
                        .with_note(note),
                );
                return TyExpr::error(span);
            }
        };
        tracing::trace!(
            call = name,
            source = resolution.source,
            cost = resolution.cost,
            "resolved call"
        );

        let args = args
            .into_iter()
            .zip(resolution.param_types())
            .map(|(arg, &param)| self.coerce_arg(arg, param))
            .collect();
        let ty = ExprType::from_outputs(&resolution.overload.outputs);
        TyExpr::new(
            TyExprKind::Call {
                name: name.to_string(),
                overload: resolution.overload,
                args,
            },
            ty,
            span,
        )
    }

    /// Constants take the parameter type; other arguments are converted by
    /// the host's sockets.
    fn coerce_arg(&mut self, arg: TyExpr, param: DataType) -> TyExpr {
        let TyExprKind::Const { value } = arg.kind else {
            return arg;
        };
        match self.backend.coerce_value(value, param) {
            Ok((value, ty)) => TyExpr::new(TyExprKind::Const { value }, ExprType::Single(ty), arg.span),
            Err(err) => {
                self.error(ErrorKind::TypeMismatch, arg.span, err.to_string());
                TyExpr::error(arg.span)
            }
        }
    }

    fn error(&mut self, kind: ErrorKind, span: Span, message: String) {
        self.errors.push(CompileError::new(kind, span, message));
    }
}

/// Vector of three scalar constants, folded into one value.
fn constant_vector(items: &[TyExpr]) -> Option<Value> {
    let mut components = [0.0; 3];
    for (component, item) in components.iter_mut().zip(items) {
        let TyExprKind::Const { value } = &item.kind else {
            return None;
        };
        *component = value.as_scalar()?;
    }
    Some(Value::Vec3(components))
}
