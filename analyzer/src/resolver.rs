//! Binds parsed expressions to registry entities.

use crate::error::{ResolveError, ResolveResult};
use crate::scope::Scope;
use crate::symexpr::{Function, SymExpr};
use kinetic_parser::{parse_expr, Expr, UnaryOp};

/// Resolves identifiers against a scope and checks function calls.
pub struct Resolver<'s> {
    scope: &'s Scope,
}

impl<'s> Resolver<'s> {
    pub fn new(scope: &'s Scope) -> Self {
        Self { scope }
    }

    /// Parse and resolve expression text.
    pub fn resolve_str(&self, input: &str) -> ResolveResult<SymExpr> {
        let expr = parse_expr(input)?;
        self.resolve(&expr)
    }

    /// Resolve a parsed expression.
    ///
    /// Unbound identifiers are reported first, in source order, before any
    /// function is checked.
    pub fn resolve(&self, expr: &Expr) -> ResolveResult<SymExpr> {
        if let Some((name, span)) = expr
            .identifiers()
            .into_iter()
            .find(|(name, _)| !self.scope.is_defined(name))
        {
            return Err(ResolveError::unresolved(name, span));
        }
        self.bind(expr)
    }

    fn bind(&self, expr: &Expr) -> ResolveResult<SymExpr> {
        match expr {
            Expr::Number(n, span) => Ok(SymExpr::Number(*n, *span)),
            Expr::Var(name, span) => self
                .scope
                .lookup(name)
                .map(|symbol| SymExpr::Symbol(symbol, *span))
                .ok_or_else(|| ResolveError::unresolved(name, *span)),
            Expr::BinaryOp(op, left, right, span) => Ok(SymExpr::Binary(
                *op,
                Box::new(self.bind(left)?),
                Box::new(self.bind(right)?),
                *span,
            )),
            Expr::UnaryOp(UnaryOp::Neg, inner, span) => {
                Ok(SymExpr::Neg(Box::new(self.bind(inner)?), *span))
            }
            Expr::FnCall(call) => {
                let function = Function::from_name(&call.name)
                    .ok_or_else(|| ResolveError::unknown_function(&call.name, call.span))?;
                if !function.accepts(call.args.len()) {
                    return Err(ResolveError::arity(&call.name, call.args.len(), call.span));
                }
                let args = call
                    .args
                    .iter()
                    .map(|arg| self.bind(arg))
                    .collect::<ResolveResult<Vec<_>>>()?;
                Ok(SymExpr::Call(function, args, call.span))
            }
        }
    }
}
