//! Parameter type validation for candidate functions.

use crate::ast::FunctionDecl;
use crate::diagnostics::{DiagnosticsEngine, MessageId, Severity};
use crate::provider::SemanticProvider;

/// Checks that every parameter type of the function is a literal type.
///
/// The first non-literal parameter rejects the function; the diagnostic
/// cites its 1-based position and source extent. Dependent parameter
/// types are left for a later instantiation to decide.
pub fn check_parameter_types(
    engine: &DiagnosticsEngine,
    provider: &dyn SemanticProvider,
    func: &FunctionDecl,
) -> bool {
    for (index, param) in func.params.iter().enumerate() {
        if param.ty.is_dependent() {
            continue;
        }
        if !provider.is_literal_type(engine, &param.ty) {
            engine.report_with(
                Severity::Error,
                param.range.begin.clone(),
                MessageId::NonLiteralParam,
                format!(
                    "parameter {} of '{}' has non-literal type '{}'",
                    index + 1,
                    func.name,
                    param.ty
                ),
            );
            return false;
        }
    }
    true
}
