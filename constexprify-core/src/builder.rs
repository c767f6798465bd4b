//! Builder pattern API for constexpr-suggestion analysis.
//!
//! Provides a fluent interface for configuring and running the analysis:
//!
//! ```rust,ignore
//! use constexprify_core::prelude::*;
//!
//! let result = Constexprify::new("/path/to/dumps")
//!     .ignore_patterns(["^test_"])
//!     .strict(false)
//!     .analyze()?;
//!
//! for diag in &result.diagnostics {
//!     println!("{}", diag.render());
//! }
//! ```

use std::path::PathBuf;

use anyhow::Result;
use regex::Regex;

use crate::analysis::analyze_unit;
use crate::ast::TranslationUnit;
use crate::diagnostics::Diagnostic;
use crate::dump::{load_dumps, load_dumps_strict, DumpProvider};
use crate::error::ConstexprifyError;

/// Builder for configuring a suggestion-analysis run.
#[derive(Debug, Clone)]
pub struct Constexprify {
    /// A dump file, or a directory to search for dumps
    root: PathBuf,

    /// Function-name patterns (regex) whose functions are left alone
    ignore: Vec<String>,

    /// Fail on the first unloadable dump instead of skipping it
    strict: bool,

    /// Custom excluded directories for dump discovery
    excluded_dirs: Vec<String>,
}

impl Constexprify {
    /// Create a new analysis builder for the given dump file or directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore: Vec::new(),
            strict: false,
            excluded_dirs: Vec::new(),
        }
    }

    /// Add function-name patterns (regex) to ignore.
    pub fn ignore_patterns(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignore.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Fail-fast on unloadable dumps instead of skipping them.
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Add directories to exclude from dump discovery.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Run the analysis and return results.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        // 1. Locate dump files
        let files = self.dump_files()?;

        // 2. Load translation units (lenient or fail-fast)
        let units = if self.strict {
            load_dumps_strict(&files)?
        } else {
            load_dumps(&files)
        };

        // 3. Analyze each unit
        self.analyze_units(units)
    }

    /// Run the analysis over already-loaded translation units.
    pub fn analyze_units(&self, mut units: Vec<TranslationUnit>) -> Result<AnalysisResult> {
        let ignore = compile_patterns(&self.ignore)?;

        let mut result = AnalysisResult::default();
        for tu in &mut units {
            // Ignored functions are removed before analysis, so neither
            // pass considers them.
            tu.functions
                .retain(|f| !ignore.iter().any(|re| re.is_match(&f.name)));

            result.functions_seen += tu.functions.len();

            // Each unit is one sequential two-phase run.
            let provider = DumpProvider::for_unit(tu);
            let unit = analyze_unit(&provider, tu);

            result.units += 1;
            result.functions_promoted += unit.functions_promoted;
            result.variables_suggested += unit.variables_suggested;
            result.diagnostics.extend(unit.diagnostics);
        }

        Ok(result)
    }

    fn dump_files(&self) -> Result<Vec<PathBuf>> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }
        self.discover_dumps()
    }

    #[cfg(feature = "scan")]
    fn discover_dumps(&self) -> Result<Vec<PathBuf>> {
        use anyhow::Context;

        let excludes: Vec<&str> = self.excluded_dirs.iter().map(String::as_str).collect();
        crate::scan::gather_dump_files_with_excludes(&self.root, &excludes)
            .with_context(|| format!("Failed to discover dumps under {}", self.root.display()))
    }

    #[cfg(not(feature = "scan"))]
    fn discover_dumps(&self) -> Result<Vec<PathBuf>> {
        Err(ConstexprifyError::invalid_argument(format!(
            "{} is not a dump file (directory discovery requires the `scan` feature)",
            self.root.display()
        ))
        .into())
    }
}

/// Compile ignore patterns once; a malformed pattern is an argument error.
fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|e| {
                ConstexprifyError::invalid_argument(format!("bad ignore pattern '{}': {}", p, e))
                    .into()
            })
        })
        .collect()
}

/// Result of running suggestion analysis.
#[derive(Debug, Default)]
pub struct AnalysisResult {
    /// Translation units analyzed
    pub units: usize,

    /// Candidate functions considered (after ignore filtering)
    pub functions_seen: usize,

    /// Functions that received a qualifier suggestion
    pub functions_promoted: usize,

    /// Local variables that received a qualifier suggestion
    pub variables_suggested: usize,

    /// All advisory diagnostics, in document order per unit
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisResult {
    /// Check if any suggestion was produced.
    pub fn has_suggestions(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Total count of suggestions.
    pub fn suggestion_count(&self) -> usize {
        self.diagnostics.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FunctionDecl, SourceLoc, Type};
    use std::fs;

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

    fn unit(names: &[&str]) -> TranslationUnit {
        let mut tu = TranslationUnit::new("t.cc");
        tu.functions = names.iter().map(|n| func(n)).collect();
        tu
    }

    #[test]
    fn test_analyze_units_basic() {
        let result = Constexprify::new(".")
            .analyze_units(vec![unit(&["alpha", "beta"])])
            .unwrap();

        assert_eq!(result.units, 1);
        assert_eq!(result.functions_seen, 2);
        assert_eq!(result.functions_promoted, 2);
        assert!(result.has_suggestions());
        assert_eq!(result.suggestion_count(), 2);
    }

    #[test]
    fn test_ignore_patterns_filter_functions() {
        let result = Constexprify::new(".")
            .ignore_patterns(["^test_"])
            .analyze_units(vec![unit(&["test_helper", "real"])])
            .unwrap();

        assert_eq!(result.functions_seen, 1);
        assert_eq!(result.functions_promoted, 1);
    }

    #[test]
    fn test_bad_ignore_pattern_is_error() {
        let err = Constexprify::new(".")
            .ignore_patterns(["(unclosed"])
            .analyze_units(vec![unit(&["f"])])
            .unwrap_err();

        let typed = err.downcast_ref::<ConstexprifyError>().unwrap();
        assert!(matches!(typed, ConstexprifyError::InvalidArgument { .. }));
    }

    #[test]
    fn test_end_to_end_from_dump_file() {
        let dir = std::env::temp_dir().join("constexprify_builder_test_e2e");
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();

        let path = dir.join("unit.ast.json");
        fs::write(&path, serde_json::to_string(&unit(&["square"])).unwrap()).unwrap();

        let result = Constexprify::new(&path).analyze().unwrap();
        assert_eq!(result.units, 1);
        assert_eq!(result.functions_promoted, 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_strict_mode_fails_on_bad_dump() {
        let dir = std::env::temp_dir().join("constexprify_builder_test_strict");
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.ast.json");
        fs::write(&path, "{ nope").unwrap();

        let err = Constexprify::new(&path).strict(true).analyze().unwrap_err();
        let typed = err.downcast_ref::<ConstexprifyError>().unwrap();
        assert!(matches!(typed, ConstexprifyError::FrontEnd { .. }));

        // Lenient mode skips the unit and completes.
        let result = Constexprify::new(&path).analyze().unwrap();
        assert_eq!(result.units, 0);

        fs::remove_dir_all(&dir).ok();
    }
}
