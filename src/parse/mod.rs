use std::{collections::HashSet, mem};

use crate::{
    ast::{Block, BlockKind, CommentStmt, Selector, SourceTag, Stmt, Value},
    error::{ParseError, ParseResult},
    options::Options,
};

mod base;
mod selector;
mod stylesheet;
mod value;

/// A single-use parser over one source buffer.
///
/// Lexical scanning is fused with grammar recognition: productions probe the
/// buffer with anchored regexes and literals at an integer cursor, and
/// alternatives snapshot and restore that cursor to backtrack. One parser
/// serves exactly one buffer; parsing another source requires a fresh
/// instance with its own source index.
pub(crate) struct Parser<'a> {
    buf: &'a str,
    cursor: usize,
    /// Whether matches consume trailing whitespace by default. Flipped off
    /// inside whitespace-sensitive productions (string bodies, selectors,
    /// open strings); anything that changes it must restore it.
    eat_ws_default: bool,
    in_parens: bool,
    /// The open blocks, root first. The parent of the open block is the
    /// element below it.
    stack: Vec<Block>,
    /// Start positions of block comments already captured, so a comment
    /// rescanned after a backtrack is not recorded twice.
    comments_seen: HashSet<usize>,
    /// The first `@charset`, hoisted to the front of the root on success.
    charset: Option<Stmt>,
    source_index: u32,
    source_name: String,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str, options: &Options) -> Self {
        Parser {
            // trailing control bytes are not part of the document
            buf: input.trim_end_matches(|c: char| c <= '\x1f'),
            cursor: 0,
            eat_ws_default: true,
            in_parens: false,
            stack: Vec::new(),
            comments_seen: HashSet::new(),
            charset: None,
            source_index: options.source_index,
            source_name: options.display_name().to_owned(),
        }
    }

    pub(crate) fn parse(mut self) -> ParseResult<Block> {
        let result = self.parse_stylesheet();
        result.map_err(|e| self.raw_to_parse_error(*e))
    }

    fn parse_stylesheet(&mut self) -> ParseResult<Block> {
        self.stack
            .push(Block::new(BlockKind::Rule, None, self.tag_at(0)));

        // Allow a byte-order mark at the beginning of the document.
        if self.rest().starts_with('\u{feff}') {
            self.cursor += '\u{feff}'.len_utf8();
        }
        self.whitespace();

        while self.parse_chunk()? {}

        if self.cursor != self.buf.len() {
            return Err(("parse error", self.cursor).into());
        }
        if self.stack.len() > 1 {
            return Err(("unclosed block", self.buf.len()).into());
        }

        let mut root = self.stack.pop().expect("root block");
        let pending = mem::take(&mut root.comments);
        root.children.extend(pending);
        if let Some(charset) = self.charset.take() {
            root.children.insert(0, charset);
        }
        root.is_root = true;

        Ok(root)
    }

    pub(crate) fn parse_value(mut self) -> ParseResult<Value> {
        let result = self.parse_value_list();
        result.map_err(|e| self.raw_to_parse_error(*e))
    }

    fn parse_value_list(&mut self) -> ParseResult<Value> {
        self.whitespace();
        match self.value_list()? {
            Some(value) => Ok(value),
            None => Err(("parse error", self.cursor).into()),
        }
    }

    pub(crate) fn parse_selector(mut self) -> ParseResult<Vec<Selector>> {
        let result = self.parse_selector_list();
        result.map_err(|e| self.raw_to_parse_error(*e))
    }

    fn parse_selector_list(&mut self) -> ParseResult<Vec<Selector>> {
        self.whitespace();
        match self.selectors()? {
            Some(selectors) => Ok(selectors),
            None => Err(("parse error", self.cursor).into()),
        }
    }

    pub(super) fn tag_at(&self, pos: usize) -> SourceTag {
        SourceTag::at(self.source_index, pos)
    }

    // Block stack ---------------------------------------------------------

    fn env_mut(&mut self) -> &mut Block {
        self.stack.last_mut().expect("active block")
    }

    pub(super) fn push_block(&mut self, selectors: Option<Vec<Selector>>, pos: usize) {
        let tag = self.tag_at(pos);
        // Comments before the opening brace belong inside the block.
        let pending = mem::take(&mut self.env_mut().comments);
        let mut block = Block::new(BlockKind::Rule, selectors, tag);
        block.children = pending;
        self.stack.push(block);
    }

    pub(super) fn push_special(&mut self, kind: BlockKind, pos: usize) {
        self.push_block(None, pos);
        self.env_mut().kind = kind;
    }

    pub(super) fn pop_block(&mut self) -> ParseResult<Block> {
        if self.stack.len() <= 1 {
            return Err(("unexpected }", self.cursor).into());
        }
        let mut block = self.stack.pop().expect("open block");
        // comments pending at end of block migrate to the outer scope
        let pending = mem::take(&mut block.comments);
        self.env_mut().comments.extend(pending);
        Ok(block)
    }

    /// Append a statement to the current block, flushing any buffered
    /// comments after it.
    pub(super) fn append(&mut self, stmt: Stmt) {
        let env = self.env_mut();
        env.children.push(stmt);
        let pending = mem::take(&mut env.comments);
        env.children.extend(pending);
    }

    /// Whether the current block's last child is an `@if` block, i.e.
    /// whether an `@else` is valid here.
    pub(super) fn last_is_if_block(&self) -> bool {
        matches!(
            self.stack.last().and_then(|env| env.children.last()),
            Some(Stmt::Block(block)) if matches!(block.kind, BlockKind::If { .. })
        )
    }

    pub(super) fn push_comment(&mut self, text: String, pos: usize) {
        let tag = self.tag_at(pos);
        if let Some(env) = self.stack.last_mut() {
            env.comments.push(Stmt::Comment(CommentStmt { text, tag }));
        }
    }

    // Error reporting ------------------------------------------------------

    /// Resolve a raw error's byte offset against the buffer: 1-based line
    /// by counting newlines before it, snippet running to the end of the
    /// offending line.
    fn raw_to_parse_error(&self, err: ParseError) -> Box<ParseError> {
        let (message, pos) = err.raw();
        let pos = pos.min(self.buf.len());
        let line = self.buf[..pos].matches('\n').count() + 1;
        let snippet = self.buf[pos..].lines().next().unwrap_or("").to_owned();
        Box::new(ParseError::from_loc(
            message,
            self.source_name.clone(),
            line,
            snippet,
        ))
    }
}
