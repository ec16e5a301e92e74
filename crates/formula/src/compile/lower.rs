//! Lowering of the typed tree into operations.
//!
//! A post-order walk: arguments are emitted left to right before the call
//! that consumes them, and every top-level statement ends with
//! `END_OF_STATEMENT`. Only a program that checked without diagnostics is
//! lowered, so an error node here is a compiler defect.

use formula_ast::error::Fatal;
use formula_ast::foundation::{DataType, Value};
use formula_ast::operation::Operation;
use formula_ast::template::{Callable, NodeTemplate};
use formula_ast::{TyExpr, TyExprKind, TyProgram, TyStmt, TyStmtKind};
use formula_nodes::NodeRegistry;
use formula_resolve::BackEnd;

/// Lower a checked program.
///
/// # Errors
///
/// - [`Fatal::Unsupported`] for structured assignment and calls that
///   resolved to generic functions
/// - [`Fatal::Internal`] for error nodes and templates missing from the
///   node catalog
pub fn lower<B: BackEnd + ?Sized>(program: &TyProgram, backend: &B) -> Result<Vec<Operation>, Fatal> {
    let mut lowering = Lowering {
        backend,
        registry: NodeRegistry::global(),
        operations: Vec::new(),
    };
    for stmt in &program.body {
        lowering.lower_stmt(stmt)?;
        lowering.operations.push(Operation::EndOfStatement);
    }
    Ok(lowering.operations)
}

struct Lowering<'a, B: ?Sized> {
    backend: &'a B,
    registry: &'static NodeRegistry,
    operations: Vec<Operation>,
}

impl<B: BackEnd + ?Sized> Lowering<'_, B> {
    fn lower_stmt(&mut self, stmt: &TyStmt) -> Result<(), Fatal> {
        match &stmt.kind {
            TyStmtKind::Expr(expr) => self.lower_expr(expr),
            TyStmtKind::Assign { targets, value } => {
                let [target] = targets.as_slice() else {
                    return Err(Fatal::unsupported(
                        stmt.span,
                        format!("assignment to {} targets", targets.len()),
                    ));
                };
                // Literal bindings become host inputs
                if let TyExprKind::Const { value: literal } = &value.kind {
                    let ty = single_type(value)?;
                    self.operations
                        .extend(self.backend.create_input(target, *literal, ty));
                    return Ok(());
                }
                self.lower_expr(value)?;
                self.operations.push(Operation::create_var(target.as_str()));
                Ok(())
            }
        }
    }

    fn lower_expr(&mut self, expr: &TyExpr) -> Result<(), Fatal> {
        match &expr.kind {
            TyExprKind::Const { value } => {
                let ty = single_type(expr)?;
                self.operations.push(Operation::push(*value, ty));
            }

            TyExprKind::Var {
                name,
                needs_instantiation,
            } => {
                if *needs_instantiation {
                    let ty = single_type(expr)?;
                    self.operations
                        .extend(self.backend.create_input(name, Value::Default, ty));
                }
                self.operations.push(Operation::get_var(name.as_str()));
            }

            TyExprKind::Call { name, overload, args } => {
                let template = match &overload.callable {
                    Callable::Node(template) => *template,
                    Callable::Function(function) => {
                        return Err(Fatal::unsupported(
                            expr.span,
                            format!("call '{name}' resolved to generic function '{}'", function.name),
                        ));
                    }
                };
                for arg in args {
                    self.lower_expr(arg)?;
                }
                let host_name = self.registry.host_name(template.key).ok_or_else(|| {
                    Fatal::internal(
                        expr.span,
                        format!("node '{}' is not in the catalog", template.key),
                    )
                })?;
                self.operations.push(Operation::call(NodeTemplate {
                    key: host_name,
                    ..template
                }));
            }

            TyExprKind::Error => {
                return Err(Fatal::internal(expr.span, "error node reached lowering"));
            }
        }
        Ok(())
    }
}

fn single_type(expr: &TyExpr) -> Result<DataType, Fatal> {
    match expr.ty.single() {
        Some(DataType::Unknown) | None => Err(Fatal::internal(
            expr.span,
            format!("expression of type {} has no single value", expr.ty),
        )),
        Some(ty) => Ok(ty),
    }
}
