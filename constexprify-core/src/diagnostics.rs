//! Diagnostic recording, rendering, and scoped suppression.
//!
//! The engine collects every message the analysis produces. During a
//! function probe the engine is muted through an RAII [`MuteGuard`] so
//! that rejection diagnostics from speculative checks never leak into the
//! user-visible stream; the guard restores the previous state on every
//! exit path, early returns included.
//!
//! The user-visible output of the analysis is warning-severity suggestions
//! only, each carrying a single machine-applicable insertion [`FixIt`].

use crate::ast::SourceLoc;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::fmt;

/// The qualifier keyword inserted by every suggestion fix-it.
pub const QUALIFIER_INSERTION: &str = "constexpr ";

/// Severity of a recorded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory; the only severity that reaches the user-visible stream.
    Warning,
    /// Probe rejection detail; produced only while muted.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Stable identities for every message the analysis can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageId {
    VariablyModifiedType,
    TypeDefinition,
    TypeDefinitionCompat,
    LocalVarStatic,
    LocalVarNonLiteralType,
    LocalVarNoInit,
    LocalVar,
    LocalVarCompat,
    InvalidStatement,
    NonLiteralParam,
    FunctionCanBeConstexpr,
    VariableCanBeConstexpr,
}

impl MessageId {
    /// The fixed message text for ids that need no interpolation.
    pub fn text(self) -> &'static str {
        match self {
            MessageId::VariablyModifiedType => {
                "variably modified type cannot appear in a constexpr function"
            }
            MessageId::TypeDefinition => {
                "type definition in a constexpr function is an extension"
            }
            MessageId::TypeDefinitionCompat => {
                "type definition in a constexpr function is incompatible with older standards"
            }
            MessageId::LocalVarStatic => {
                "static or thread-storage variable not permitted in a constexpr function"
            }
            MessageId::LocalVarNonLiteralType => {
                "variable of non-literal type not permitted in a constexpr function"
            }
            MessageId::LocalVarNoInit => {
                "uninitialized variable not permitted in a constexpr function"
            }
            MessageId::LocalVar => {
                "variable declaration in a constexpr function is an extension"
            }
            MessageId::LocalVarCompat => {
                "variable declaration in a constexpr function is incompatible with older standards"
            }
            MessageId::InvalidStatement => "invalid declaration in a constexpr function",
            MessageId::NonLiteralParam => "parameter has non-literal type",
            MessageId::FunctionCanBeConstexpr => "function can be constexpr",
            MessageId::VariableCanBeConstexpr => "variable can be constexpr",
        }
    }
}

/// A machine-applicable source-text insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixIt {
    /// The text to insert.
    pub insertion: String,
    /// Insertion point.
    pub loc: SourceLoc,
}

impl FixIt {
    /// Create an insertion fix-it at a location.
    pub fn insertion(loc: SourceLoc, text: impl Into<String>) -> Self {
        Self {
            insertion: text.into(),
            loc,
        }
    }
}

/// A recorded message bound to a source location.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub loc: SourceLoc,
    pub id: MessageId,
    pub message: String,
    pub fixit: Option<FixIt>,
}

impl Diagnostic {
    /// Render as `path:line:col: severity: message`.
    pub fn render(&self) -> String {
        format!("{}: {}: {}", self.loc, self.severity, self.message)
    }
}

/// Collects diagnostics with a scoped mute facility.
///
/// Interior mutability keeps the engine shareable across the analyzer and
/// the provider within one pass; the mute state is a depth counter so
/// nested guards compose.
#[derive(Debug, Default)]
pub struct DiagnosticsEngine {
    diags: RefCell<Vec<Diagnostic>>,
    mute_depth: Cell<u32>,
}

impl DiagnosticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one [`MuteGuard`] is alive.
    pub fn is_muted(&self) -> bool {
        self.mute_depth.get() > 0
    }

    /// Acquire the muted state. Dropping the guard restores it; acquisition
    /// nests.
    #[must_use = "dropping the guard immediately unmutes the engine"]
    pub fn mute(&self) -> MuteGuard<'_> {
        self.mute_depth.set(self.mute_depth.get() + 1);
        MuteGuard { engine: self }
    }

    /// Record a message with the fixed text of its id. Dropped while muted.
    pub fn report(&self, severity: Severity, loc: SourceLoc, id: MessageId) {
        self.report_with(severity, loc, id, id.text().to_string());
    }

    /// Record a message with interpolated detail text. Dropped while muted.
    pub fn report_with(&self, severity: Severity, loc: SourceLoc, id: MessageId, message: String) {
        if self.is_muted() {
            return;
        }
        self.diags.borrow_mut().push(Diagnostic {
            severity,
            loc,
            id,
            message,
            fixit: None,
        });
    }

    /// Record a warning-severity suggestion with its insertion fix-it.
    pub fn suggest(&self, loc: SourceLoc, id: MessageId, fixit: FixIt) {
        if self.is_muted() {
            return;
        }
        self.diags.borrow_mut().push(Diagnostic {
            severity: Severity::Warning,
            loc,
            id,
            message: id.text().to_string(),
            fixit: Some(fixit),
        });
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.diags.borrow().len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.diags.borrow().is_empty()
    }

    /// Drain all recorded diagnostics, leaving the engine empty.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diags.borrow_mut())
    }
}

/// RAII witness of the muted state; restores on drop.
#[derive(Debug)]
pub struct MuteGuard<'a> {
    engine: &'a DiagnosticsEngine,
}

impl Drop for MuteGuard<'_> {
    fn drop(&mut self) {
        let depth = self.engine.mute_depth.get();
        debug_assert!(depth > 0, "mute depth underflow");
        self.engine.mute_depth.set(depth.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLoc {
        SourceLoc::new("t.cc", 4, 2)
    }

    #[test]
    fn test_report_records() {
        let engine = DiagnosticsEngine::new();
        engine.report(Severity::Warning, loc(), MessageId::TypeDefinition);
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_mute_drops_messages() {
        let engine = DiagnosticsEngine::new();
        {
            let _guard = engine.mute();
            engine.report(Severity::Error, loc(), MessageId::LocalVarStatic);
            engine.suggest(
                loc(),
                MessageId::FunctionCanBeConstexpr,
                FixIt::insertion(loc(), QUALIFIER_INSERTION),
            );
            assert!(engine.is_muted());
            assert!(engine.is_empty());
        }
        assert!(!engine.is_muted());
        engine.report(Severity::Warning, loc(), MessageId::LocalVar);
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_mute_released_on_early_return() {
        fn probe(engine: &DiagnosticsEngine, fail: bool) -> bool {
            let _guard = engine.mute();
            if fail {
                return false; // guard drops here too
            }
            true
        }

        let engine = DiagnosticsEngine::new();
        assert!(!probe(&engine, true));
        assert!(!engine.is_muted());
        assert!(probe(&engine, false));
        assert!(!engine.is_muted());
    }

    #[test]
    fn test_mute_nests() {
        let engine = DiagnosticsEngine::new();
        let outer = engine.mute();
        {
            let _inner = engine.mute();
            assert!(engine.is_muted());
        }
        assert!(engine.is_muted());
        drop(outer);
        assert!(!engine.is_muted());
    }

    #[test]
    fn test_render_format() {
        let d = Diagnostic {
            severity: Severity::Warning,
            loc: SourceLoc::new("src/main.cc", 12, 1),
            id: MessageId::FunctionCanBeConstexpr,
            message: MessageId::FunctionCanBeConstexpr.text().to_string(),
            fixit: None,
        };
        assert_eq!(
            d.render(),
            "src/main.cc:12:1: warning: function can be constexpr"
        );
    }

    #[test]
    fn test_take_drains() {
        let engine = DiagnosticsEngine::new();
        engine.report(Severity::Warning, loc(), MessageId::LocalVar);
        let drained = engine.take();
        assert_eq!(drained.len(), 1);
        assert!(engine.is_empty());
    }
}
