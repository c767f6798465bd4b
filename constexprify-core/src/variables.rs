//! Variable eligibility pass.
//!
//! Runs strictly after the function pass. Scans the bodies of primary-file
//! functions that did NOT get promoted (a promoted function's whole body
//! is already covered by its function-level suggestion) and suggests the
//! qualifier for local variables whose initializers are provably integral
//! constants.
//!
//! This pass deliberately applies no storage-duration or literal-type
//! restriction of its own; its rule set is independent of the stricter,
//! context-sensitive classification the function pass uses.

use crate::analysis::AnalysisContext;
use crate::ast::TranslationUnit;
use crate::diagnostics::{FixIt, MessageId, QUALIFIER_INSERTION};
use crate::provider::SemanticProvider;

/// Runs the variable pass over a translation unit in document order.
///
/// Returns the number of variables suggested.
pub fn promote_variables(
    ctx: &mut AnalysisContext,
    provider: &dyn SemanticProvider,
    tu: &TranslationUnit,
) -> usize {
    let mut suggested = 0;

    for (id, func) in tu.functions.iter().enumerate() {
        if !func.in_main_file {
            continue;
        }
        // Covers both functions qualified on input and functions the
        // first phase just promoted.
        if ctx.is_promoted(id, func) {
            continue;
        }

        for stmt in func.decl_stmts() {
            // Only statements declaring exactly one variable.
            let Some(var) = stmt.sole_var() else {
                continue;
            };
            if var.is_constexpr {
                continue;
            }
            let Some(init) = var.init.as_ref() else {
                continue;
            };
            if init.is_dependent() {
                continue;
            }

            // All three must hold: syntactic shape, full valuation, and
            // the integral-constant confirmation.
            if !provider.is_constant_candidate(&ctx.diagnostics, init) {
                continue;
            }
            if !provider.evaluate_constant(&ctx.diagnostics, var) {
                continue;
            }
            if !provider.is_confirmed_integral_constant(&ctx.diagnostics, var) {
                continue;
            }

            ctx.diagnostics.suggest(
                stmt.range.begin.clone(),
                MessageId::VariableCanBeConstexpr,
                FixIt::insertion(stmt.range.begin.clone(), QUALIFIER_INSERTION),
            );
            suggested += 1;
        }
    }

    suggested
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        BinOp, Decl, DeclStmt, Expr, FunctionDecl, SourceLoc, SourceRange, Stmt, StorageDuration,
        Type, VarDecl,
    };
    use crate::dump::DumpProvider;

    fn loc(line: u32) -> SourceLoc {
        SourceLoc::new("t.cc", line, 5)
    }

    fn var(name: &str, ty: Type, init: Option<Expr>, line: u32) -> VarDecl {
        VarDecl {
            name: name.into(),
            ty,
            init,
            storage: StorageDuration::Automatic,
            is_definition: true,
            is_constexpr: false,
            is_for_range_binding: false,
            loc: loc(line),
        }
    }

    fn decl_stmt(decls: Vec<Decl>, line: u32) -> Stmt {
        Stmt::Decl(DeclStmt {
            decls,
            range: SourceRange::at(loc(line)),
        })
    }

    fn host(body: Vec<Stmt>) -> FunctionDecl {
        FunctionDecl {
            name: "host".into(),
            return_type: Type::Void,
            params: Vec::new(),
            body,
            is_constexpr: false,
            is_main: false,
            in_main_file: true,
            // Body-ineligible so the function pass leaves it alone.
            decl_eligible: true,
            body_eligible: false,
            loc: loc(1),
        }
    }

    fn run(tu: &TranslationUnit) -> (usize, AnalysisContext) {
        let mut ctx = AnalysisContext::new();
        let provider = DumpProvider::for_unit(tu);
        let n = promote_variables(&mut ctx, &provider, tu);
        (n, ctx)
    }

    #[test]
    fn test_constant_initializer_suggested_at_statement_start() {
        let init = Expr::Binary {
            op: BinOp::Add,
            lhs: Box::new(Expr::IntLiteral(2)),
            rhs: Box::new(Expr::IntLiteral(2)),
        };
        let mut tu = TranslationUnit::new("t.cc");
        tu.functions.push(host(vec![decl_stmt(
            vec![Decl::Var(var("z", Type::int(), Some(init), 2))],
            2,
        )]));

        let (n, ctx) = run(&tu);
        assert_eq!(n, 1);
        let diags = ctx.diagnostics.take();
        assert_eq!(diags[0].id, MessageId::VariableCanBeConstexpr);
        assert_eq!(diags[0].loc, loc(2));
        assert_eq!(
            diags[0].fixit.as_ref().unwrap().insertion,
            QUALIFIER_INSERTION
        );
    }

    #[test]
    fn test_multi_declaration_statement_skipped() {
        let mut tu = TranslationUnit::new("t.cc");
        tu.functions.push(host(vec![decl_stmt(
            vec![
                Decl::Var(var("a", Type::int(), Some(Expr::IntLiteral(1)), 2)),
                Decl::Var(var("b", Type::int(), Some(Expr::IntLiteral(2)), 2)),
            ],
            2,
        )]));

        let (n, _) = run(&tu);
        assert_eq!(n, 0);
    }

    #[test]
    fn test_already_qualified_variable_skipped() {
        let mut v = var("done", Type::int(), Some(Expr::IntLiteral(1)), 2);
        v.is_constexpr = true;
        let mut tu = TranslationUnit::new("t.cc");
        tu.functions.push(host(vec![decl_stmt(vec![Decl::Var(v)], 2)]));

        let (n, _) = run(&tu);
        assert_eq!(n, 0);
    }

    #[test]
    fn test_opaque_initializer_skipped() {
        let mut tu = TranslationUnit::new("t.cc");
        tu.functions.push(host(vec![decl_stmt(
            vec![Decl::Var(var(
                "r",
                Type::int(),
                Some(Expr::Opaque { dependent: false }),
                2,
            ))],
            2,
        )]));

        let (n, _) = run(&tu);
        assert_eq!(n, 0);
    }

    #[test]
    fn test_dependent_initializer_skipped() {
        let init = Expr::Name {
            name: "T::value".into(),
            constant_value: None,
            dependent: true,
        };
        let mut tu = TranslationUnit::new("t.cc");
        tu.functions
            .push(host(vec![decl_stmt(vec![Decl::Var(var("d", Type::int(), Some(init), 2))], 2)]));

        let (n, _) = run(&tu);
        assert_eq!(n, 0);
    }

    #[test]
    fn test_float_initializer_not_confirmed_integral() {
        let mut tu = TranslationUnit::new("t.cc");
        tu.functions.push(host(vec![decl_stmt(
            vec![Decl::Var(var(
                "f",
                Type::Float,
                Some(Expr::FloatLiteral(2.5)),
                2,
            ))],
            2,
        )]));

        let (n, _) = run(&tu);
        assert_eq!(n, 0);
    }

    #[test]
    fn test_promoted_function_bodies_are_skipped() {
        let stmt = decl_stmt(
            vec![Decl::Var(var("y", Type::int(), Some(Expr::IntLiteral(5)), 2))],
            2,
        );
        let mut tu = TranslationUnit::new("t.cc");
        tu.functions.push(host(vec![stmt]));

        let provider = DumpProvider::for_unit(&tu);
        let mut ctx = AnalysisContext::new();
        ctx.promoted.insert(0);
        assert_eq!(promote_variables(&mut ctx, &provider, &tu), 0);
    }

    #[test]
    fn test_storage_duration_is_not_re_checked() {
        // The variable rule set is independent of the function-level
        // classifier: a static local with a constant initializer still
        // gets a variable suggestion even though it made its function
        // ineligible.
        let mut v = var("s", Type::int(), Some(Expr::IntLiteral(1)), 2);
        v.storage = StorageDuration::Static;
        let mut tu = TranslationUnit::new("t.cc");
        tu.functions.push(host(vec![decl_stmt(vec![Decl::Var(v)], 2)]));

        let (n, _) = run(&tu);
        assert_eq!(n, 1);
    }
}
