//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use constexprify_core::prelude::*;
//! ```

// Core analysis types
pub use crate::analysis::{analyze_unit, AnalysisContext, UnitAnalysis};
pub use crate::ast::{FunctionDecl, TranslationUnit, VarDecl};
pub use crate::error::{ConstexprifyError, ConstexprifyResult};

// Diagnostics
pub use crate::diagnostics::{Diagnostic, DiagnosticsEngine, FixIt, MessageId, Severity};

// Provider seam
pub use crate::dump::{load_dump, load_dump_strict, DumpProvider};
pub use crate::provider::SemanticProvider;

// Dump discovery
#[cfg(feature = "scan")]
pub use crate::scan::gather_dump_files;

// Configuration
pub use crate::config::{load_config, ConstexprifyConfig};

// Builder API
pub use crate::builder::{AnalysisResult, Constexprify};
