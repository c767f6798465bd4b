//! The semantic provider interface.
//!
//! Parsing, macro expansion, literal-type determination, and full
//! constant-expression valuation belong to a compiler front end. The
//! analysis consumes those services through this trait so it can run
//! against any front end able to answer the queries.
//!
//! A query may emit diagnostics of its own through the engine it is
//! handed; the analysis mutes the engine while probing, so speculative
//! rejections never surface.

use crate::ast::{Expr, FunctionDecl, Type, VarDecl};
use crate::diagnostics::DiagnosticsEngine;

/// Semantic queries the analysis needs from a front end.
pub trait SemanticProvider {
    /// Is the function declaration itself, ignoring the body, eligible for
    /// the compile-time-evaluation qualifier?
    fn is_function_decl_eligible(&self, engine: &DiagnosticsEngine, func: &FunctionDecl) -> bool;

    /// Is the already-parsed body compatible with the compile-time
    /// evaluation body rules beyond declaration statements?
    fn is_function_body_eligible(&self, engine: &DiagnosticsEngine, func: &FunctionDecl) -> bool;

    /// May values of this type appear in compile-time-evaluated contexts?
    fn is_literal_type(&self, engine: &DiagnosticsEngine, ty: &Type) -> bool;

    /// Cheap syntactic pre-check: does the expression have the shape of a
    /// constant expression?
    fn is_constant_candidate(&self, engine: &DiagnosticsEngine, expr: &Expr) -> bool;

    /// Full valuation: can the variable's value be completely computed at
    /// translation time?
    fn evaluate_constant(&self, engine: &DiagnosticsEngine, var: &VarDecl) -> bool;

    /// Confirmation that the initializer is an integral constant expression
    /// for a variable of integral type.
    fn is_confirmed_integral_constant(&self, engine: &DiagnosticsEngine, var: &VarDecl) -> bool;

    /// Whether the active language-standard mode natively permits the
    /// relaxed declaration forms; selects compatibility notes over
    /// extension warnings during classification.
    fn relaxed_mode(&self) -> bool;
}
