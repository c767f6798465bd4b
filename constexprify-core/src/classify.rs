//! Declaration-statement classification for candidate function bodies.
//!
//! The definition of a function eligible for compile-time evaluation may
//! contain only a restricted set of declaration forms. Classification
//! walks the inner declarations of one statement and decides accept or
//! reject per kind; the first rejection ends the probe for the enclosing
//! function. Acceptances of the relaxed forms attach a mode-dependent
//! compatibility or extension note.
//!
//! All messages flow through the engine the caller supplies; during a
//! function probe that engine is muted, so rejection detail stays
//! internal.

use crate::ast::{Decl, DeclStmt, SourceLoc, StorageDuration, VarDecl};
use crate::diagnostics::{DiagnosticsEngine, MessageId, Severity};
use crate::provider::SemanticProvider;

/// Classifies one declaration statement inside a candidate function body.
///
/// Returns false on the first inner declaration that is incompatible with
/// compile-time evaluation. `first_ext_loc` receives the location of the
/// first namespace-alias or nested-function declaration encountered, if
/// any.
pub fn check_decl_stmt(
    engine: &DiagnosticsEngine,
    provider: &dyn SemanticProvider,
    stmt: &DeclStmt,
    first_ext_loc: &mut Option<SourceLoc>,
) -> bool {
    for decl in &stmt.decls {
        match decl {
            // Assertions and using forms are always permitted.
            Decl::StaticAssert
            | Decl::UsingDecl
            | Decl::UsingDirective
            | Decl::UnresolvedUsing => continue,

            Decl::Typedef(td) | Decl::TypeAlias(td) => {
                // Aliases are fine unless the underlying type's size
                // depends on a runtime value.
                if td.underlying.is_variably_modified() {
                    engine.report_with(
                        Severity::Error,
                        td.type_range.begin.clone(),
                        MessageId::VariablyModifiedType,
                        format!(
                            "variably modified type '{}' cannot appear in a constexpr function",
                            td.underlying
                        ),
                    );
                    return false;
                }
            }

            Decl::EnumDef(tag) | Decl::RecordDef(tag) => {
                // Definitions (not mere declarations) are native only in
                // the relaxed standard mode.
                if tag.is_definition {
                    let id = if provider.relaxed_mode() {
                        MessageId::TypeDefinitionCompat
                    } else {
                        MessageId::TypeDefinition
                    };
                    engine.report(Severity::Warning, stmt.range.begin.clone(), id);
                }
            }

            // These only co-occur with other, already-classified
            // declarations.
            Decl::EnumConstant | Decl::IndirectField | Decl::ParamVar => continue,

            Decl::Var(vd) | Decl::Decomposition(vd) => {
                if !check_local_variable(engine, provider, stmt, vd) {
                    return false;
                }
            }

            Decl::NamespaceAlias | Decl::NestedFunction => {
                // Permitted as an extension; remember where it first
                // appeared.
                if first_ext_loc.is_none() {
                    *first_ext_loc = Some(stmt.range.begin.clone());
                }
            }

            Decl::Other { .. } => {
                engine.report(
                    Severity::Error,
                    stmt.range.begin.clone(),
                    MessageId::InvalidStatement,
                );
                return false;
            }
        }
    }

    true
}

/// A local variable definition may not have static or thread storage
/// duration, must be of literal type, and must be initialized (a
/// range-based iteration binding counts as initialized).
fn check_local_variable(
    engine: &DiagnosticsEngine,
    provider: &dyn SemanticProvider,
    stmt: &DeclStmt,
    vd: &VarDecl,
) -> bool {
    if vd.is_definition {
        match vd.storage {
            StorageDuration::Static => {
                engine.report_with(
                    Severity::Error,
                    vd.loc.clone(),
                    MessageId::LocalVarStatic,
                    format!(
                        "static variable '{}' not permitted in a constexpr function",
                        vd.name
                    ),
                );
                return false;
            }
            StorageDuration::Thread { dynamic_init } => {
                let kind = if dynamic_init {
                    "dynamically initialized thread-storage"
                } else {
                    "thread-storage"
                };
                engine.report_with(
                    Severity::Error,
                    vd.loc.clone(),
                    MessageId::LocalVarStatic,
                    format!(
                        "{} variable '{}' not permitted in a constexpr function",
                        kind, vd.name
                    ),
                );
                return false;
            }
            StorageDuration::Automatic => {}
        }

        if !vd.ty.is_dependent() && !provider.is_literal_type(engine, &vd.ty) {
            engine.report_with(
                Severity::Error,
                vd.loc.clone(),
                MessageId::LocalVarNonLiteralType,
                format!(
                    "variable '{}' of non-literal type '{}' not permitted in a constexpr function",
                    vd.name, vd.ty
                ),
            );
            return false;
        }

        if !vd.ty.is_dependent() && vd.init.is_none() && !vd.is_for_range_binding {
            engine.report_with(
                Severity::Error,
                vd.loc.clone(),
                MessageId::LocalVarNoInit,
                format!(
                    "uninitialized variable '{}' not permitted in a constexpr function",
                    vd.name
                ),
            );
            return false;
        }
    }

    let id = if provider.relaxed_mode() {
        MessageId::LocalVarCompat
    } else {
        MessageId::LocalVar
    };
    engine.report(Severity::Warning, stmt.range.begin.clone(), id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ArrayLen, Expr, SourceRange, TagDecl, Type, TypedefDecl};
    use crate::dump::DumpProvider;

    fn loc() -> SourceLoc {
        SourceLoc::new("t.cc", 2, 5)
    }

    fn stmt(decls: Vec<Decl>) -> DeclStmt {
        DeclStmt {
            decls,
            range: SourceRange::at(loc()),
        }
    }

    fn local(ty: Type, init: Option<Expr>) -> VarDecl {
        VarDecl {
            name: "x".into(),
            ty,
            init,
            storage: StorageDuration::Automatic,
            is_definition: true,
            is_constexpr: false,
            is_for_range_binding: false,
            loc: loc(),
        }
    }

    fn classify(decls: Vec<Decl>) -> (bool, DiagnosticsEngine) {
        let engine = DiagnosticsEngine::new();
        let provider = DumpProvider::default();
        let mut ext = None;
        let ok = check_decl_stmt(&engine, &provider, &stmt(decls), &mut ext);
        (ok, engine)
    }

    #[test]
    fn test_assertions_and_usings_accepted_silently() {
        let (ok, engine) = classify(vec![
            Decl::StaticAssert,
            Decl::UsingDecl,
            Decl::UsingDirective,
            Decl::UnresolvedUsing,
        ]);
        assert!(ok);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_alias_of_plain_type_accepted() {
        let td = TypedefDecl {
            name: "word".into(),
            underlying: Type::int(),
            type_range: SourceRange::at(loc()),
        };
        let (ok, engine) = classify(vec![Decl::TypeAlias(td)]);
        assert!(ok);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_alias_of_variably_sized_type_rejected() {
        let td = TypedefDecl {
            name: "buf".into(),
            underlying: Type::Array {
                elem: Box::new(Type::Char),
                len: ArrayLen::Variable,
            },
            type_range: SourceRange::at(loc()),
        };
        let (ok, engine) = classify(vec![Decl::Typedef(td)]);
        assert!(!ok);
        let diags = engine.take();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].id, MessageId::VariablyModifiedType);
        assert!(diags[0].message.contains("char[*]"));
    }

    #[test]
    fn test_type_definition_gets_compat_note() {
        let tag = TagDecl {
            name: "E".into(),
            is_definition: true,
        };
        let (ok, engine) = classify(vec![Decl::EnumDef(tag)]);
        assert!(ok);
        let diags = engine.take();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].id, MessageId::TypeDefinitionCompat);
        assert_eq!(diags[0].severity, Severity::Warning);
    }

    #[test]
    fn test_type_declaration_without_definition_is_silent() {
        let tag = TagDecl {
            name: "Fwd".into(),
            is_definition: false,
        };
        let (ok, engine) = classify(vec![Decl::RecordDef(tag)]);
        assert!(ok);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_static_local_rejected() {
        let mut v = local(Type::int(), Some(Expr::IntLiteral(1)));
        v.storage = StorageDuration::Static;
        let (ok, engine) = classify(vec![Decl::Var(v)]);
        assert!(!ok);
        assert_eq!(engine.take()[0].id, MessageId::LocalVarStatic);
    }

    #[test]
    fn test_thread_local_rejected_with_dynamic_init_detail() {
        let mut v = local(Type::int(), Some(Expr::Opaque { dependent: false }));
        v.storage = StorageDuration::Thread { dynamic_init: true };
        let (ok, engine) = classify(vec![Decl::Var(v)]);
        assert!(!ok);
        let diags = engine.take();
        assert_eq!(diags[0].id, MessageId::LocalVarStatic);
        assert!(diags[0].message.contains("dynamically initialized"));
    }

    #[test]
    fn test_non_literal_local_rejected() {
        let v = local(
            Type::Record {
                name: "std::string".into(),
                literal: false,
            },
            Some(Expr::Opaque { dependent: false }),
        );
        let (ok, engine) = classify(vec![Decl::Var(v)]);
        assert!(!ok);
        assert_eq!(engine.take()[0].id, MessageId::LocalVarNonLiteralType);
    }

    #[test]
    fn test_uninitialized_local_rejected() {
        let v = local(Type::int(), None);
        let (ok, engine) = classify(vec![Decl::Var(v)]);
        assert!(!ok);
        assert_eq!(engine.take()[0].id, MessageId::LocalVarNoInit);
    }

    #[test]
    fn test_for_range_binding_needs_no_initializer() {
        let mut v = local(Type::int(), None);
        v.is_for_range_binding = true;
        let (ok, engine) = classify(vec![Decl::Var(v)]);
        assert!(ok);
        // Still carries the local-variable compatibility note.
        assert_eq!(engine.take()[0].id, MessageId::LocalVarCompat);
    }

    #[test]
    fn test_accepted_local_gets_compat_note() {
        let v = local(Type::int(), Some(Expr::IntLiteral(3)));
        let (ok, engine) = classify(vec![Decl::Var(v)]);
        assert!(ok);
        let diags = engine.take();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].id, MessageId::LocalVarCompat);
    }

    #[test]
    fn test_namespace_alias_records_first_location_only() {
        let engine = DiagnosticsEngine::new();
        let provider = DumpProvider::default();
        let mut ext = None;

        let first = DeclStmt {
            decls: vec![Decl::NamespaceAlias],
            range: SourceRange::at(SourceLoc::new("t.cc", 7, 1)),
        };
        let second = DeclStmt {
            decls: vec![Decl::NestedFunction],
            range: SourceRange::at(SourceLoc::new("t.cc", 9, 1)),
        };

        assert!(check_decl_stmt(&engine, &provider, &first, &mut ext));
        assert!(check_decl_stmt(&engine, &provider, &second, &mut ext));
        assert_eq!(ext.as_ref().map(|l| l.line), Some(7));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let (ok, engine) = classify(vec![Decl::Other {
            kind: "concept".into(),
        }]);
        assert!(!ok);
        assert_eq!(engine.take()[0].id, MessageId::InvalidStatement);
    }

    #[test]
    fn test_first_reject_short_circuits() {
        let bad = Decl::Other {
            kind: "concept".into(),
        };
        let also_bad = Decl::Var({
            let mut v = local(Type::int(), None);
            v.storage = StorageDuration::Static;
            v
        });
        let (ok, engine) = classify(vec![bad, also_bad]);
        assert!(!ok);
        // Only the first rejection is recorded.
        let diags = engine.take();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].id, MessageId::InvalidStatement);
    }
}
