//! constexprify-core: advisory constexpr-suggestion analysis.
//!
//! This library analyzes the AST of a parsed program (supplied by a
//! compiler front end as a serialized dump) to find function and
//! local-variable declarations that could legally carry the
//! compile-time-evaluation qualifier but do not yet, and emits
//! warning-severity suggestions with machine-applicable insertion
//! fix-its. It never rejects or rewrites the program.
//!
//! # Analysis shape
//!
//! - **Phase 1 — functions**: every not-yet-qualified, non-entry-point
//!   function written in the primary file is probed under muted
//!   diagnostics: declaration eligibility, body eligibility, a
//!   per-statement classification of its declaration statements, and a
//!   literal-type check over its parameters. Passing functions are
//!   recorded in a promoted set and suggested.
//! - **Phase 2 — variables**: bodies of the remaining functions are
//!   scanned for sole-variable declaration statements whose initializers
//!   are provably integral constants; each gets its own suggestion.
//!
//! Phase 1 completes in full before phase 2 starts: the variable pass
//! reads the promoted set the function pass wrote.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use constexprify_core::prelude::*;
//!
//! let result = Constexprify::new("/path/to/dumps").analyze()?;
//! for diag in &result.diagnostics {
//!     println!("{}", diag.render());
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`ast`]: the dump data model (translation units, declarations, types)
//! - [`provider`]: the semantic-query seam to the front end
//! - [`dump`]: dump loading and the recorded-facts provider
//! - [`classify`]: declaration-statement classification
//! - [`params`]: parameter literal-type validation
//! - [`functions`]: the function eligibility pass
//! - [`variables`]: the variable eligibility pass
//! - [`analysis`]: analysis context and the two-phase driver
//! - [`diagnostics`]: the engine, fix-its, and scoped muting
//! - [`builder`]: fluent configuration API
//! - [`error`]: typed error handling

// Core modules (always available)
pub mod analysis;
pub mod ast;
pub mod builder;
pub mod classify;
pub mod config;
pub mod consteval;
pub mod diagnostics;
pub mod dump;
pub mod error;
pub mod functions;
pub mod logging;
pub mod params;
pub mod prelude;
pub mod provider;
pub mod report;
pub mod variables;

// Feature-gated modules
#[cfg(feature = "scan")]
pub mod scan;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{ConstexprifyError, ConstexprifyResult, IoResultExt};

// Builder API
pub use builder::{AnalysisResult, Constexprify};

// Data model
pub use ast::{
    ArrayLen, BinOp, Decl, DeclStmt, Expr, FunctionDecl, FunctionId, ParamDecl, SourceLoc,
    SourceRange, Stmt, StorageDuration, TagDecl, TranslationUnit, Type, TypedefDecl, UnaryOp,
    VarDecl,
};

// Diagnostics
pub use diagnostics::{
    Diagnostic, DiagnosticsEngine, FixIt, MessageId, MuteGuard, Severity, QUALIFIER_INSERTION,
};

// Provider seam
pub use dump::{load_dump, load_dump_strict, load_dumps, load_dumps_strict, DumpProvider, LoadResult};
pub use provider::SemanticProvider;

// Core passes
pub use analysis::{analyze_unit, AnalysisContext, UnitAnalysis};
pub use classify::check_decl_stmt;
pub use functions::promote_functions;
pub use params::check_parameter_types;
pub use variables::promote_variables;

// Constant valuation
pub use consteval::{evaluate, is_candidate, Value};

// Configuration
pub use config::{load_config, ConstexprifyConfig, OutputConfig};

// Logging
pub use logging::{init_structured_logging, log_error, log_info, log_warn};

// Reporting
pub use report::{print_json, print_plain};

// Feature-gated re-exports
#[cfg(feature = "scan")]
pub use scan::{gather_dump_files, gather_dump_files_with_excludes};
