use crate::{
    ast::{Block, CallArg, Selector, Value},
    common::AssignmentFlag,
};

/// Identifies where a statement began: the caller-supplied index of the
/// source buffer and the byte offset of the statement's leading token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceTag {
    pub source_index: u32,
    pub pos: usize,
}

impl SourceTag {
    pub(crate) fn at(source_index: u32, pos: usize) -> Self {
        SourceTag { source_index, pos }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign(AssignStmt),
    Import(ImportStmt),
    /// The `@scssphp-import-once` directive; identical payload to `Import`.
    ImportOnce(ImportStmt),
    Extend(ExtendStmt),
    Include(IncludeStmt),
    Break(SourceTag),
    Continue(SourceTag),
    Return(ValueStmt),
    Debug(ValueStmt),
    Warn(ValueStmt),
    Error(ValueStmt),
    /// `@content` inside a mixin body.
    Content(SourceTag),
    Charset(ValueStmt),
    Comment(CommentStmt),
    /// A closed child block promoted to a statement of its parent.
    Block(Box<Block>),
}

impl Stmt {
    pub fn tag(&self) -> SourceTag {
        match self {
            Stmt::Assign(s) => s.tag,
            Stmt::Import(s) | Stmt::ImportOnce(s) => s.tag,
            Stmt::Extend(s) => s.tag,
            Stmt::Include(s) => s.tag,
            Stmt::Break(tag) | Stmt::Continue(tag) | Stmt::Content(tag) => *tag,
            Stmt::Return(s) | Stmt::Debug(s) | Stmt::Warn(s) | Stmt::Error(s)
            | Stmt::Charset(s) => s.tag,
            Stmt::Comment(s) => s.tag,
            Stmt::Block(b) => b.tag,
        }
    }
}

/// A property or variable assignment. The target is a
/// [`Value::Variable`](crate::ast::Value::Variable) for `$name: ...` and a
/// [`Value::String`](crate::ast::Value::String) composite for property
/// names, which may contain interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub target: Value,
    pub value: Value,
    pub flag: Option<AssignmentFlag>,
    pub tag: SourceTag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub path: Value,
    pub tag: SourceTag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtendStmt {
    pub selectors: Vec<Selector>,
    pub tag: SourceTag,
}

/// `@include name(args)`, optionally with a trailing content block. When a
/// block follows, the statement is held pending on the block stack and
/// patched with the body when the block closes.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeStmt {
    pub name: String,
    pub args: Vec<CallArg>,
    pub body: Option<Box<Block>>,
    pub tag: SourceTag,
}

/// Shared payload of the single-value statements: `@return`, `@debug`,
/// `@warn`, `@error`, `@charset`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueStmt {
    pub value: Value,
    pub tag: SourceTag,
}

/// A `/* ... */` comment, delimiters included.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentStmt {
    pub text: String,
    pub tag: SourceTag,
}
