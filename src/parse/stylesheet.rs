use std::mem;

use crate::{
    ast::{
        ArgDef, AssignStmt, Block, BlockKind, ExtendStmt, ImportStmt, IncludeStmt, Stmt, StringLit,
        StringPart, Value, ValueStmt,
    },
    common::QuoteKind,
    error::ParseResult,
};

use super::base::DIRECTIVE_NAME;
use super::Parser;

impl<'a> Parser<'a> {
    /// One top-level parse step: a directive, a statement, a block open, or
    /// a block close. Returns `false` when nothing matches at the cursor,
    /// which is the end of the document only when the buffer is exhausted.
    pub(super) fn parse_chunk(&mut self) -> ParseResult<bool> {
        let s = self.snapshot();

        if self.rest().starts_with('@') {
            if self.parse_directive()? {
                return Ok(true);
            }
        }

        // property shortcut: catches the common `prop: value;` before the
        // costlier selector parse. The mandatory space distinguishes a
        // property from a pseudo-selector like `a:hover`.
        if let Some(name) = self.keyword_with(false) {
            let name = name.to_owned();
            if self.literal(": ") {
                if let Some(value) = self.value_list()? {
                    if self.end_of_statement() {
                        self.append(Stmt::Assign(AssignStmt {
                            target: Value::String(StringLit::unquoted(name)),
                            value,
                            flag: None,
                            tag: self.tag_at(s),
                        }));
                        return Ok(true);
                    }
                }
            }
            self.restore(s);
        }

        // variable assignment
        if let Some(name) = self.variable() {
            if self.literal_char(':') {
                if let Some(mut value) = self.value_list()? {
                    if self.end_of_statement() {
                        let flag = Self::strip_assignment_flag(&mut value);
                        self.append(Stmt::Assign(AssignStmt {
                            target: Value::Variable(name),
                            value,
                            flag,
                            tag: self.tag_at(s),
                        }));
                        return Ok(true);
                    }
                }
            }
            self.restore(s);
        }

        // closing an html comment
        if self.literal("-->") {
            return Ok(true);
        }

        // opening a css block
        if let Some(selectors) = self.selectors()? {
            if self.literal_char('{') {
                self.push_block(Some(selectors), s);
                return Ok(true);
            }
        }
        self.restore(s);

        // property assignment, nested-property block, or both in sequence
        if let Some(name) = self.property_name()? {
            if self.literal_char(':') {
                let value = self.value_list()?;
                if self.literal_char('{') {
                    if let Some(value) = value {
                        self.append(Stmt::Assign(AssignStmt {
                            target: Value::String(name.clone()),
                            value,
                            flag: None,
                            tag: self.tag_at(s),
                        }));
                    }
                    self.push_special(BlockKind::NestedProperty { prefix: name }, s);
                    return Ok(true);
                }
                if let Some(value) = value {
                    if self.end_of_statement() {
                        self.append(Stmt::Assign(AssignStmt {
                            target: Value::String(name),
                            value,
                            flag: None,
                            tag: self.tag_at(s),
                        }));
                        return Ok(true);
                    }
                }
            }
        }
        self.restore(s);

        // closing a block
        if self.literal_char_with('}', false) {
            let block = self.pop_block()?;
            if matches!(block.kind, BlockKind::Include { .. }) {
                let mut block = block;
                let kind = mem::replace(&mut block.kind, BlockKind::Rule);
                if let BlockKind::Include { mut stmt } = kind {
                    stmt.body = Some(Box::new(block));
                    self.append(Stmt::Include(stmt));
                }
            } else if block.is_if_case() {
                self.attach_if_case(block)?;
            } else {
                self.append(Stmt::Block(Box::new(block)));
            }
            // comments just after the close belong to the outer scope
            self.whitespace();
            return Ok(true);
        }

        if self.literal_char(';') {
            return Ok(true);
        }
        if self.literal("<!--") {
            return Ok(true);
        }

        Ok(false)
    }

    /// Link a closed `@else` / `@else if` block into the `@if` chain ending
    /// at the current block's tail.
    fn attach_if_case(&mut self, case: Block) -> ParseResult<()> {
        let pos = case.tag.pos;
        if let Some(Stmt::Block(target)) = self.env_mut().children.last_mut() {
            if let BlockKind::If { cases, .. } = &mut target.kind {
                cases.push(case);
                return Ok(());
            }
        }
        Err(("unexpected @else", pos).into())
    }

    // Directives -----------------------------------------------------------

    fn parse_directive(&mut self) -> ParseResult<bool> {
        let s = self.snapshot();
        let name = match self.try_match(&DIRECTIVE_NAME) {
            Some(caps) => caps.get(1).expect("directive name").as_str(),
            None => return Ok(false),
        };

        // the reserved vocabulary is matched exactly
        let committed = match name {
            "at-root" => self.at_root_directive(s)?,
            "media" => self.media_directive(s)?,
            "mixin" => self.mixin_directive(s)?,
            "include" => self.include_directive(s)?,
            "scssphp-import-once" => self.import_directive(s, true)?,
            "import" => self.import_directive(s, false)?,
            "extend" => self.extend_directive(s)?,
            "function" => self.function_directive(s)?,
            "break" => self.statement_directive(Stmt::Break(self.tag_at(s)))?,
            "continue" => self.statement_directive(Stmt::Continue(self.tag_at(s)))?,
            "content" => self.statement_directive(Stmt::Content(self.tag_at(s)))?,
            "return" | "debug" | "warn" | "error" => self.value_directive(s, name)?,
            "each" => self.each_directive(s)?,
            "while" => self.while_directive(s)?,
            "for" => self.for_directive(s)?,
            "if" => self.if_directive(s)?,
            "else" => self.else_directive(s)?,
            "charset" => self.charset_directive(s)?,
            _ => false,
        };
        if committed {
            return Ok(true);
        }

        self.restore(s);
        self.generic_directive(s)
    }

    fn at_root_directive(&mut self, s: usize) -> ParseResult<bool> {
        let selector = self.selectors()?;
        let with = self.at_root_with()?;
        if !self.literal_char('{') {
            return Ok(false);
        }
        self.push_special(BlockKind::AtRoot { selector, with }, s);
        Ok(true)
    }

    /// The `(with: ...)` / `(without: ...)` query, which parses as a map.
    fn at_root_with(&mut self) -> ParseResult<Option<Value>> {
        let s = self.snapshot();
        if !self.rest().starts_with('(') {
            return Ok(None);
        }
        match self.expression()? {
            Some(with @ Value::Map(..)) => Ok(Some(with)),
            _ => {
                self.restore(s);
                Ok(None)
            }
        }
    }

    fn media_directive(&mut self, s: usize) -> ParseResult<bool> {
        let query = match self.value_list()? {
            Some(query) => query,
            None => return Ok(false),
        };
        if !self.literal_char('{') {
            return Ok(false);
        }
        self.push_special(BlockKind::Media { query }, s);
        Ok(true)
    }

    fn mixin_directive(&mut self, s: usize) -> ParseResult<bool> {
        let name = match self.keyword() {
            Some(name) => name.to_owned(),
            None => return Ok(false),
        };
        let args = self.argument_def()?.unwrap_or_default();
        if !self.literal_char('{') {
            return Ok(false);
        }
        self.push_special(BlockKind::Mixin { name, args }, s);
        Ok(true)
    }

    fn include_directive(&mut self, s: usize) -> ParseResult<bool> {
        let name = match self.keyword() {
            Some(name) => name.to_owned(),
            None => return Ok(false),
        };
        let mut args = Vec::new();
        if self.literal_char('(') {
            if let Some(values) = self.arg_values()? {
                args = values;
            }
            if !self.literal_char(')') {
                return Ok(false);
            }
        }
        let stmt = IncludeStmt {
            name,
            args,
            body: None,
            tag: self.tag_at(s),
        };
        if self.end_of_statement() {
            self.append(Stmt::Include(stmt));
            return Ok(true);
        }
        if self.literal_char('{') {
            self.push_special(BlockKind::Include { stmt }, s);
            return Ok(true);
        }
        Ok(false)
    }

    fn import_directive(&mut self, s: usize, once: bool) -> ParseResult<bool> {
        let after_name = self.snapshot();
        if let Some(path) = self.value_list()? {
            if self.end_of_statement() {
                self.append_import(path, s, once);
                return Ok(true);
            }
        }
        self.restore(after_name);

        // tokenizer-quirk fallback: a bare url(...)
        if let Some(path) = self.url() {
            if self.end_of_statement() {
                self.append_import(path, s, once);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn append_import(&mut self, path: Value, s: usize, once: bool) {
        let stmt = ImportStmt {
            path,
            tag: self.tag_at(s),
        };
        self.append(if once {
            Stmt::ImportOnce(stmt)
        } else {
            Stmt::Import(stmt)
        });
    }

    fn extend_directive(&mut self, s: usize) -> ParseResult<bool> {
        if let Some(selectors) = self.selectors()? {
            if self.end_of_statement() {
                self.append(Stmt::Extend(ExtendStmt {
                    selectors,
                    tag: self.tag_at(s),
                }));
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn function_directive(&mut self, s: usize) -> ParseResult<bool> {
        let name = match self.keyword() {
            Some(name) => name.to_owned(),
            None => return Ok(false),
        };
        let args = match self.argument_def()? {
            Some(args) => args,
            None => return Ok(false),
        };
        if !self.literal_char('{') {
            return Ok(false);
        }
        self.push_special(BlockKind::Function { name, args }, s);
        Ok(true)
    }

    fn statement_directive(&mut self, stmt: Stmt) -> ParseResult<bool> {
        if !self.end_of_statement() {
            return Ok(false);
        }
        self.append(stmt);
        Ok(true)
    }

    fn value_directive(&mut self, s: usize, name: &str) -> ParseResult<bool> {
        let value = match self.value_list()? {
            Some(value) => value,
            None => return Ok(false),
        };
        if !self.end_of_statement() {
            return Ok(false);
        }
        let stmt = ValueStmt {
            value,
            tag: self.tag_at(s),
        };
        self.append(match name {
            "return" => Stmt::Return(stmt),
            "debug" => Stmt::Debug(stmt),
            "warn" => Stmt::Warn(stmt),
            _ => Stmt::Error(stmt),
        });
        Ok(true)
    }

    fn each_directive(&mut self, s: usize) -> ParseResult<bool> {
        let mut vars = Vec::new();
        loop {
            match self.variable() {
                Some(name) => vars.push(name),
                None => break,
            }
            if !self.literal_char(',') {
                break;
            }
        }
        if vars.is_empty() || !self.literal("in") {
            return Ok(false);
        }
        let list = match self.value_list()? {
            Some(list) => list,
            None => return Ok(false),
        };
        if !self.literal_char('{') {
            return Ok(false);
        }
        self.push_special(BlockKind::Each { vars, list }, s);
        Ok(true)
    }

    fn while_directive(&mut self, s: usize) -> ParseResult<bool> {
        let cond = match self.expression()? {
            Some(cond) => cond,
            None => return Ok(false),
        };
        if !self.literal_char('{') {
            return Ok(false);
        }
        self.push_special(BlockKind::While { cond }, s);
        Ok(true)
    }

    fn for_directive(&mut self, s: usize) -> ParseResult<bool> {
        let var = match self.variable() {
            Some(var) => var,
            None => return Ok(false),
        };
        if !self.literal("from") {
            return Ok(false);
        }
        let from = match self.expression()? {
            Some(from) => from,
            None => return Ok(false),
        };
        // `through` is inclusive, `to` exclusive
        let exclusive = if self.literal("through") {
            false
        } else if self.literal("to") {
            true
        } else {
            return Ok(false);
        };
        let to = match self.expression()? {
            Some(to) => to,
            None => return Ok(false),
        };
        if !self.literal_char('{') {
            return Ok(false);
        }
        self.push_special(
            BlockKind::For {
                var,
                from,
                to,
                exclusive,
            },
            s,
        );
        Ok(true)
    }

    fn if_directive(&mut self, s: usize) -> ParseResult<bool> {
        let cond = match self.value_list()? {
            Some(cond) => cond,
            None => return Ok(false),
        };
        if !self.literal_char('{') {
            return Ok(false);
        }
        self.push_special(
            BlockKind::If {
                cond,
                cases: Vec::new(),
            },
            s,
        );
        Ok(true)
    }

    /// `@else` / `@else if`, valid only right after an `@if` at the current
    /// block's tail. The block is linked into that `@if` on close rather
    /// than appended.
    fn else_directive(&mut self, s: usize) -> ParseResult<bool> {
        if self.literal_char('{') {
            if !self.last_is_if_block() {
                return Err(("unexpected @else", s).into());
            }
            self.push_special(BlockKind::Else, s);
            return Ok(true);
        }
        if self.literal("if") {
            if let Some(cond) = self.value_list()? {
                if self.literal_char('{') {
                    if !self.last_is_if_block() {
                        return Err(("unexpected @else", s).into());
                    }
                    self.push_special(BlockKind::ElseIf { cond }, s);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Only the first `@charset` survives; it is hoisted to the front of
    /// the root when the parse completes.
    fn charset_directive(&mut self, s: usize) -> ParseResult<bool> {
        let value = match self.value_list()? {
            Some(value) => value,
            None => return Ok(false),
        };
        if !self.end_of_statement() {
            return Ok(false);
        }
        if self.charset.is_none() {
            self.charset = Some(Stmt::Charset(ValueStmt {
                value,
                tag: self.tag_at(s),
            }));
        }
        Ok(true)
    }

    /// Any other `@name`, kept as a generic directive block when followed
    /// by `{`.
    fn generic_directive(&mut self, s: usize) -> ParseResult<bool> {
        if !self.literal_char_with('@', false) {
            return Ok(false);
        }
        let name = match self.keyword() {
            Some(name) => name.to_owned(),
            None => {
                self.restore(s);
                return Ok(false);
            }
        };
        let value = if let Some(var) = self.variable() {
            Some(Value::Variable(var))
        } else {
            self.open_string('{', None)?.map(Value::String)
        };
        if !self.literal_char('{') {
            self.restore(s);
            return Ok(false);
        }
        self.push_special(BlockKind::Directive { name, value }, s);
        Ok(true)
    }

    // Properties -----------------------------------------------------------

    /// A property name: keywords and interpolations, whitespace-sensitive.
    fn property_name(&mut self) -> ParseResult<Option<StringLit>> {
        let old_white = self.eat_ws_default;
        self.eat_ws_default = false;
        let mut parts = Vec::new();
        loop {
            if let Some(word) = self.keyword_with(false) {
                parts.push(StringPart::Text(word.to_owned()));
                continue;
            }
            if let Some(inter) = self.interpolation(true)? {
                parts.push(StringPart::Interpolation(inter));
                continue;
            }
            break;
        }
        self.eat_ws_default = old_white;
        if parts.is_empty() {
            return Ok(None);
        }
        self.whitespace();
        Ok(Some(StringLit {
            quote: QuoteKind::None,
            parts,
        }))
    }

    /// A mixin or function parameter list. A splat that is not the final
    /// argument is a fatal error.
    fn argument_def(&mut self) -> ParseResult<Option<Vec<ArgDef>>> {
        let s = self.snapshot();
        if !self.literal_char('(') {
            return Ok(None);
        }
        let mut args = Vec::new();
        loop {
            let name = match self.variable() {
                Some(name) => name,
                None => break,
            };
            let mut default = None;
            let ss = self.snapshot();
            if self.literal_char(':') {
                match self.space_list()? {
                    Some(value) => default = Some(value),
                    None => self.restore(ss),
                }
            }
            let is_splat = self.literal("...");
            if is_splat && !self.rest().starts_with(')') {
                return Err(("... has to be after the final argument", self.cursor).into());
            }
            args.push(ArgDef {
                name,
                default,
                is_splat,
            });
            if !self.literal_char(',') {
                break;
            }
        }
        if !self.literal_char(')') {
            self.restore(s);
            return Ok(None);
        }
        Ok(Some(args))
    }
}
