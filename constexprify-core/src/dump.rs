//! AST dump loading and the recorded-facts semantic provider.
//!
//! A front end serializes each translation unit as a JSON dump carrying the
//! parsed declarations plus the semantic facts recorded at parse time.
//! Loading is resilient in batch mode (bad units are skipped with a logged
//! reason) and fail-fast in strict mode; both cap the accepted file size.

use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::ast::{ArrayLen, Expr, FunctionDecl, TranslationUnit, Type, VarDecl};
use crate::consteval;
use crate::diagnostics::DiagnosticsEngine;
use crate::error::{ConstexprifyError, ConstexprifyResult};
use crate::provider::SemanticProvider;

/// Maximum dump size to load (10 MB).
/// Larger files are refused to prevent memory issues.
const MAX_DUMP_SIZE: usize = 10_000_000;

/// Result of loading a single dump - used for granular batch control.
#[derive(Debug)]
pub enum LoadResult {
    /// Successfully loaded translation unit
    Ok(TranslationUnit),
    /// Load failed (logged, can be skipped)
    Skipped(PathBuf, String),
}

/// Loads a single dump file. This is the atomic unit of work for batch
/// loading. Returns a `LoadResult` so the caller decides the error policy.
pub fn load_dump(path: &Path) -> LoadResult {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return LoadResult::Skipped(path.to_path_buf(), format!("I/O error: {}", e));
        }
    };

    if content.len() > MAX_DUMP_SIZE {
        return LoadResult::Skipped(
            path.to_path_buf(),
            format!(
                "Dump too large ({} bytes, max {})",
                content.len(),
                MAX_DUMP_SIZE
            ),
        );
    }

    match serde_json::from_str::<TranslationUnit>(&content) {
        Ok(tu) => LoadResult::Ok(tu),
        Err(e) => LoadResult::Skipped(path.to_path_buf(), format!("Front-end dump error: {}", e)),
    }
}

/// Loads a single dump, returning Result for use with the `?` operator.
/// Any failure is a front-end error, reported distinctly from advisory
/// diagnostics.
pub fn load_dump_strict(path: &Path) -> ConstexprifyResult<TranslationUnit> {
    let content =
        fs::read_to_string(path).map_err(|e| ConstexprifyError::io(path.to_path_buf(), e))?;

    if content.len() > MAX_DUMP_SIZE {
        return Err(ConstexprifyError::front_end(
            path,
            format!(
                "dump too large ({} bytes, max {})",
                content.len(),
                MAX_DUMP_SIZE
            ),
        ));
    }

    serde_json::from_str::<TranslationUnit>(&content)
        .map_err(|e| ConstexprifyError::front_end_at(path, e.to_string(), e.line(), e.column()))
}

/// Loads all dumps in parallel, skipping malformed ones (lenient mode).
pub fn load_dumps(files: &[PathBuf]) -> Vec<TranslationUnit> {
    files
        .par_iter()
        .filter_map(|file| match load_dump(file) {
            LoadResult::Ok(tu) => Some(tu),
            LoadResult::Skipped(path, reason) => {
                tracing::warn!(path = %path.display(), %reason, "skipping unit");
                None
            }
        })
        .collect()
}

/// Loads all dumps in parallel with strict error handling (fail-fast mode).
pub fn load_dumps_strict(files: &[PathBuf]) -> ConstexprifyResult<Vec<TranslationUnit>> {
    files
        .par_iter()
        .map(|path| load_dump_strict(path))
        .collect()
}

/// Semantic provider answering from the facts a front end recorded in the
/// dump, plus structural type rules and the initializer evaluator.
#[derive(Debug, Clone)]
pub struct DumpProvider {
    relaxed_mode: bool,
}

impl DumpProvider {
    /// Provider for one translation unit, adopting its recorded
    /// language-standard mode.
    pub fn for_unit(tu: &TranslationUnit) -> Self {
        Self {
            relaxed_mode: tu.relaxed_mode,
        }
    }

    fn literal(ty: &Type) -> bool {
        match ty {
            Type::Void | Type::Dependent => false,
            Type::Bool | Type::Char | Type::Int { .. } | Type::Float | Type::Enum { .. } => true,
            Type::Record { literal, .. } => *literal,
            // Pointers and references are scalar.
            Type::Pointer(_) | Type::Reference(_) => true,
            Type::Array { elem, len } => match len {
                ArrayLen::Fixed(_) => Self::literal(elem),
                ArrayLen::Variable => false,
            },
        }
    }
}

impl Default for DumpProvider {
    fn default() -> Self {
        Self { relaxed_mode: true }
    }
}

impl SemanticProvider for DumpProvider {
    fn is_function_decl_eligible(&self, _engine: &DiagnosticsEngine, func: &FunctionDecl) -> bool {
        func.decl_eligible
    }

    fn is_function_body_eligible(&self, _engine: &DiagnosticsEngine, func: &FunctionDecl) -> bool {
        func.body_eligible
    }

    fn is_literal_type(&self, _engine: &DiagnosticsEngine, ty: &Type) -> bool {
        Self::literal(ty)
    }

    fn is_constant_candidate(&self, _engine: &DiagnosticsEngine, expr: &Expr) -> bool {
        consteval::is_candidate(expr)
    }

    fn evaluate_constant(&self, _engine: &DiagnosticsEngine, var: &VarDecl) -> bool {
        var.init
            .as_ref()
            .is_some_and(|init| consteval::evaluate(init).is_some())
    }

    fn is_confirmed_integral_constant(&self, _engine: &DiagnosticsEngine, var: &VarDecl) -> bool {
        if !var.ty.is_integral() {
            return false;
        }
        var.init
            .as_ref()
            .and_then(consteval::evaluate)
            .is_some_and(|v| v.is_integral())
    }

    fn relaxed_mode(&self) -> bool {
        self.relaxed_mode
    }
}
