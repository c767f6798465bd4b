//! Function eligibility pass.
//!
//! Probes every not-yet-qualified function written in the primary file
//! and suggests the qualifier where the declaration, body, declaration
//! statements, and parameter types all allow it. Probing runs with the
//! diagnostics engine muted so rejection detail never reaches the
//! user-visible stream; the mute guard is released on every exit path.

use crate::analysis::AnalysisContext;
use crate::ast::{FunctionDecl, TranslationUnit};
use crate::classify::check_decl_stmt;
use crate::diagnostics::{FixIt, MessageId, QUALIFIER_INSERTION};
use crate::params::check_parameter_types;
use crate::provider::SemanticProvider;

/// Runs the function pass over a translation unit in document order.
///
/// Returns the number of functions promoted. Each promotion inserts the
/// function's identity into the context's promoted set and emits one
/// suggestion with a fix-it inserting the qualifier keyword immediately
/// before the declaration.
pub fn promote_functions(
    ctx: &mut AnalysisContext,
    provider: &dyn SemanticProvider,
    tu: &TranslationUnit,
) -> usize {
    let mut promoted = 0;

    for (id, func) in tu.functions.iter().enumerate() {
        // Only declarations written in the primary file.
        if !func.in_main_file {
            continue;
        }
        // Skip functions that already carry the qualifier.
        if func.is_constexpr {
            continue;
        }
        // The program entry point is never a candidate.
        if func.is_main {
            continue;
        }

        if !probe_function(ctx, provider, func) {
            // Rejection is silent: no diagnostic, no mutation.
            continue;
        }

        // Visible to the variable pass, which skips promoted functions.
        ctx.promoted.insert(id);

        ctx.diagnostics.suggest(
            func.loc.clone(),
            MessageId::FunctionCanBeConstexpr,
            FixIt::insertion(func.loc.clone(), QUALIFIER_INSERTION),
        );
        promoted += 1;
    }

    promoted
}

/// Speculatively checks one function under muted diagnostics.
fn probe_function(
    ctx: &AnalysisContext,
    provider: &dyn SemanticProvider,
    func: &FunctionDecl,
) -> bool {
    // Muted for the whole probe; restored on every return below.
    let _mute = ctx.diagnostics.mute();

    if !provider.is_function_decl_eligible(&ctx.diagnostics, func) {
        return false;
    }

    if !provider.is_function_body_eligible(&ctx.diagnostics, func) {
        return false;
    }

    let mut first_ext_loc = None;
    for stmt in func.decl_stmts() {
        if !check_decl_stmt(&ctx.diagnostics, provider, stmt, &mut first_ext_loc) {
            return false;
        }
    }

    check_parameter_types(&ctx.diagnostics, provider, func)
}
