//! Data model for front-end AST dumps.
//!
//! One [`TranslationUnit`] is the unit of analysis: the front end parses a
//! source file under the full compiler options and hands us the declarations
//! as a serde-friendly dump, together with the semantic facts the analysis
//! cannot derive structurally (declaration/body eligibility, literal-ness of
//! record types, constant values of named entities).
//!
//! Everything here is read-only for the analysis; promotion is tracked in a
//! separate set threaded between passes, never written back into the tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a function within its translation unit (document-order index).
pub type FunctionId = usize;

/// A 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLoc {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLoc {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A half-open source extent, begin inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub begin: SourceLoc,
    pub end: SourceLoc,
}

impl SourceRange {
    pub fn new(begin: SourceLoc, end: SourceLoc) -> Self {
        Self { begin, end }
    }

    /// A zero-width range at a single location.
    pub fn at(loc: SourceLoc) -> Self {
        Self {
            begin: loc.clone(),
            end: loc,
        }
    }
}

/// Root of one parsed program. Owns all declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// The primary input file; only declarations written in it are candidates.
    pub main_file: String,
    /// Whether the active language-standard mode natively permits the
    /// relaxed declaration forms (type definitions, local variables) inside
    /// compile-time-evaluated functions. Recorded by the front end.
    pub relaxed_mode: bool,
    /// All function declarations, in document order.
    pub functions: Vec<FunctionDecl>,
}

impl TranslationUnit {
    pub fn new(main_file: impl Into<String>) -> Self {
        Self {
            main_file: main_file.into(),
            relaxed_mode: true,
            functions: Vec::new(),
        }
    }
}

/// A function declaration with its parsed body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub return_type: Type,
    pub params: Vec<ParamDecl>,
    /// Body statements in document order.
    pub body: Vec<Stmt>,
    /// Already carries the compile-time-evaluation qualifier on input.
    pub is_constexpr: bool,
    /// Program entry point; never a promotion candidate.
    pub is_main: bool,
    /// Written in the primary input file (as opposed to an include).
    pub in_main_file: bool,
    /// Front-end fact: the declaration itself (ignoring the body) satisfies
    /// the compile-time-evaluation declaration rules.
    pub decl_eligible: bool,
    /// Front-end fact: the body, as parsed, satisfies the body rules this
    /// analysis does not re-derive (control flow, expression forms).
    pub body_eligible: bool,
    /// Start of the declaration; the qualifier keyword is inserted here.
    pub loc: SourceLoc,
}

impl FunctionDecl {
    /// The declaration statements of the body, in document order.
    pub fn decl_stmts(&self) -> impl Iterator<Item = &DeclStmt> {
        self.body.iter().filter_map(|s| match s {
            Stmt::Decl(ds) => Some(ds),
            Stmt::Other => None,
        })
    }
}

/// A parameter declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: Option<String>,
    pub ty: Type,
    pub range: SourceRange,
}

/// A body statement. Only declaration statements are classified; the
/// provider's body-eligibility answer covers everything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    Decl(DeclStmt),
    Other,
}

/// A declaration statement: one or more inner declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclStmt {
    pub decls: Vec<Decl>,
    pub range: SourceRange,
}

impl DeclStmt {
    /// The sole declared variable, if this statement declares exactly one
    /// entity and that entity is a variable (or decomposition) declaration.
    pub fn sole_var(&self) -> Option<&VarDecl> {
        match self.decls.as_slice() {
            [Decl::Var(v)] | [Decl::Decomposition(v)] => Some(v),
            _ => None,
        }
    }
}

/// The closed set of declaration kinds that can appear in a declaration
/// statement. Unmodeled kinds arrive as [`Decl::Other`] and are rejected
/// by classification, so a front-end addition surfaces as a visible gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Decl {
    StaticAssert,
    UsingDecl,
    UsingDirective,
    UnresolvedUsing,
    Typedef(TypedefDecl),
    TypeAlias(TypedefDecl),
    EnumDef(TagDecl),
    RecordDef(TagDecl),
    EnumConstant,
    IndirectField,
    ParamVar,
    Var(VarDecl),
    Decomposition(VarDecl),
    NamespaceAlias,
    NestedFunction,
    Other { kind: String },
}

/// A typedef or alias declaration (non-defining).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypedefDecl {
    pub name: String,
    pub underlying: Type,
    /// Extent of the underlying type as written, cited on rejection.
    pub type_range: SourceRange,
}

/// An enum or record (class/struct) declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagDecl {
    pub name: String,
    pub is_definition: bool,
}

/// Storage duration of a local variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageDuration {
    Automatic,
    Static,
    Thread {
        /// Dynamically initialized thread storage, kept for diagnostic
        /// precision when rejecting.
        dynamic_init: bool,
    },
}

/// A variable (or decomposition) declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: String,
    pub ty: Type,
    pub init: Option<Expr>,
    pub storage: StorageDuration,
    pub is_definition: bool,
    /// Already carries the compile-time-evaluation qualifier on input.
    pub is_constexpr: bool,
    /// Implicit binding of a range-based iteration statement; these have no
    /// written initializer yet remain acceptable.
    pub is_for_range_binding: bool,
    pub loc: SourceLoc,
}

/// Structural type representation, enough to answer literal-ness,
/// dependence, and variable-modification queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    Void,
    Bool,
    Char,
    Int { unsigned: bool },
    Float,
    Enum { name: String },
    Record { name: String, literal: bool },
    Pointer(Box<Type>),
    Reference(Box<Type>),
    Array { elem: Box<Type>, len: ArrayLen },
    Dependent,
}

/// Array extent: fixed at translation time, or dependent on a runtime value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrayLen {
    Fixed(u64),
    Variable,
}

impl Type {
    /// Shorthand for the plain signed integer type.
    pub fn int() -> Self {
        Type::Int { unsigned: false }
    }

    /// True if the type involves an unresolved dependency anywhere.
    pub fn is_dependent(&self) -> bool {
        match self {
            Type::Dependent => true,
            Type::Pointer(inner) | Type::Reference(inner) => inner.is_dependent(),
            Type::Array { elem, .. } => elem.is_dependent(),
            _ => false,
        }
    }

    /// True if the type's size depends on a runtime value (a variably sized
    /// array anywhere in its composition).
    pub fn is_variably_modified(&self) -> bool {
        match self {
            Type::Array { len: ArrayLen::Variable, .. } => true,
            Type::Array { elem, .. } => elem.is_variably_modified(),
            Type::Pointer(inner) | Type::Reference(inner) => inner.is_variably_modified(),
            _ => false,
        }
    }

    /// True for types whose values are integral constants: bool, char,
    /// the integer types, and enumerations.
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            Type::Bool | Type::Char | Type::Int { .. } | Type::Enum { .. }
        )
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Bool => write!(f, "bool"),
            Type::Char => write!(f, "char"),
            Type::Int { unsigned: false } => write!(f, "int"),
            Type::Int { unsigned: true } => write!(f, "unsigned int"),
            Type::Float => write!(f, "float"),
            Type::Enum { name } => write!(f, "enum {}", name),
            Type::Record { name, .. } => write!(f, "{}", name),
            Type::Pointer(inner) => write!(f, "{} *", inner),
            Type::Reference(inner) => write!(f, "{} &", inner),
            Type::Array { elem, len: ArrayLen::Fixed(n) } => write!(f, "{}[{}]", elem, n),
            Type::Array { elem, len: ArrayLen::Variable } => write!(f, "{}[*]", elem),
            Type::Dependent => write!(f, "<dependent>"),
        }
    }
}

/// Unary operators on constant-evaluable expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
    BitNot,
}

/// Binary operators on constant-evaluable expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

/// Initializer expressions, reduced to what constant valuation needs.
///
/// Anything the front end does not model as potentially constant (calls,
/// lambdas, address-taking) arrives as [`Expr::Opaque`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    IntLiteral(i64),
    BoolLiteral(bool),
    CharLiteral(i64),
    FloatLiteral(f64),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// A reference to a named entity. Enumerators and already-qualified
    /// variables carry the value the front end computed for them.
    Name {
        name: String,
        constant_value: Option<i64>,
        dependent: bool,
    },
    Opaque {
        dependent: bool,
    },
}

impl Expr {
    /// True if any sub-expression depends on an unresolved entity.
    pub fn is_dependent(&self) -> bool {
        match self {
            Expr::IntLiteral(_)
            | Expr::BoolLiteral(_)
            | Expr::CharLiteral(_)
            | Expr::FloatLiteral(_) => false,
            Expr::Unary { operand, .. } => operand.is_dependent(),
            Expr::Binary { lhs, rhs, .. } => lhs.is_dependent() || rhs.is_dependent(),
            Expr::Conditional {
                cond,
                then_branch,
                else_branch,
            } => cond.is_dependent() || then_branch.is_dependent() || else_branch.is_dependent(),
            Expr::Name { dependent, .. } => *dependent,
            Expr::Opaque { dependent } => *dependent,
        }
    }
}
