//! Analysis context and the two-phase driver for one translation unit.
//!
//! Phase ordering is a hard requirement: the function pass completes in
//! full before the variable pass begins, because the variable pass skips
//! functions the first phase promoted. Promotion is threaded between the
//! phases as an explicit set of function identities, merged with the
//! qualification flags present on input; the tree itself is never
//! mutated.

use std::collections::HashSet;

use crate::ast::{FunctionDecl, FunctionId, TranslationUnit};
use crate::diagnostics::{Diagnostic, DiagnosticsEngine};
use crate::functions::promote_functions;
use crate::provider::SemanticProvider;
use crate::variables::promote_variables;

/// Shared state of one analysis run: the diagnostics engine and the set
/// of functions promoted by the function pass.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    pub diagnostics: DiagnosticsEngine,
    pub promoted: HashSet<FunctionId>,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the function carries the qualifier, either on input or by
    /// promotion during this run.
    pub fn is_promoted(&self, id: FunctionId, func: &FunctionDecl) -> bool {
        func.is_constexpr || self.promoted.contains(&id)
    }
}

/// Outcome of analyzing one translation unit.
#[derive(Debug)]
pub struct UnitAnalysis {
    /// Advisory suggestions, in emission (document) order.
    pub diagnostics: Vec<Diagnostic>,
    /// Functions promoted by the first phase.
    pub functions_promoted: usize,
    /// Local variables suggested by the second phase.
    pub variables_suggested: usize,
}

/// Runs both phases over one translation unit, in order, and drains the
/// resulting diagnostics.
pub fn analyze_unit(provider: &dyn SemanticProvider, tu: &TranslationUnit) -> UnitAnalysis {
    let mut ctx = AnalysisContext::new();

    let functions_promoted = promote_functions(&mut ctx, provider, tu);
    let variables_suggested = promote_variables(&mut ctx, provider, tu);

    UnitAnalysis {
        diagnostics: ctx.diagnostics.take(),
        functions_promoted,
        variables_suggested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{SourceLoc, Type};

    fn func(name: &str) -> FunctionDecl {
        FunctionDecl {
            name: name.into(),
            return_type: Type::int(),
            params: Vec::new(),
            body: Vec::new(),
            is_constexpr: false,
            is_main: false,
            in_main_file: true,
            decl_eligible: true,
            body_eligible: true,
            loc: SourceLoc::new("t.cc", 1, 1),
        }
    }

    #[test]
    fn test_promoted_set_merges_input_flags() {
        let mut ctx = AnalysisContext::new();
        let plain = func("plain");
        let mut qualified = func("qualified");
        qualified.is_constexpr = true;

        assert!(!ctx.is_promoted(0, &plain));
        assert!(ctx.is_promoted(1, &qualified));

        ctx.promoted.insert(0);
        assert!(ctx.is_promoted(0, &plain));
    }
}
