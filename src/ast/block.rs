use crate::ast::{
    ArgDef, IncludeStmt, Selector, SourceTag, Stmt, StringLit, Value,
};

/// A brace-delimited scope. During parsing blocks live on the parser's
/// block stack; a closed block is detached and appears in the final tree as
/// a [`Stmt::Block`] child of its parent, as the body of an `@include`, or
/// as a case of an `@if`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// Only plain rule blocks carry selectors.
    pub selectors: Option<Vec<Selector>>,
    pub children: Vec<Stmt>,
    pub tag: SourceTag,
    pub is_root: bool,
    /// Comments waiting to be flushed after the next appended statement.
    /// Always empty in the final tree.
    pub(crate) comments: Vec<Stmt>,
}

impl Block {
    pub(crate) fn new(kind: BlockKind, selectors: Option<Vec<Selector>>, tag: SourceTag) -> Self {
        Block {
            kind,
            selectors,
            children: Vec::new(),
            tag,
            is_root: false,
            comments: Vec::new(),
        }
    }

    /// Whether this block links itself into an enclosing `@if` on close
    /// instead of being appended to its parent.
    pub(crate) fn is_if_case(&self) -> bool {
        matches!(self.kind, BlockKind::ElseIf { .. } | BlockKind::Else)
    }
}

/// The semantic role of a block, determining which extra fields it carries.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    /// A plain rule block (and the root).
    Rule,
    AtRoot {
        selector: Option<Vec<Selector>>,
        with: Option<Value>,
    },
    Media {
        query: Value,
    },
    Mixin {
        name: String,
        args: Vec<ArgDef>,
    },
    Function {
        name: String,
        args: Vec<ArgDef>,
    },
    /// Holds the pending `@include` statement that is patched with this
    /// block's body when the block closes.
    Include {
        stmt: IncludeStmt,
    },
    Each {
        vars: Vec<String>,
        list: Value,
    },
    While {
        cond: Value,
    },
    For {
        var: String,
        from: Value,
        to: Value,
        /// `true` for `to` (exclusive), `false` for `through` (inclusive).
        exclusive: bool,
    },
    If {
        cond: Value,
        /// The `@else if` / `@else` blocks chained to this `@if`, in source
        /// order. They are linked here, never appended as siblings.
        cases: Vec<Block>,
    },
    ElseIf {
        cond: Value,
    },
    Else,
    NestedProperty {
        prefix: StringLit,
    },
    /// Any `@name` not in the reserved vocabulary.
    Directive {
        name: String,
        value: Option<Value>,
    },
}
