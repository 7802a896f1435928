use crate::{
    ast::{
        BinaryOpValue, CallArg, Color, FunctionCallValue, FunctionValue, Interpolation, ListValue,
        MapValue, Number, StringLit, StringPart, UnaryOpValue, Value,
    },
    common::{AssignmentFlag, BinaryOp, ListSeparator, QuoteKind, UnaryOp},
    error::ParseResult,
};

use super::base::{CALC_NAME, COLOR, NOT_KEYWORD, NUMBER, OPERATOR, PROGID, URL};
use super::Parser;

/// Which token ended a string scan.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum StringToken {
    Interpolation,
    Backslash,
    Delimiter,
}

/// Which token an open-string scan stopped at.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum OpenToken {
    Quote(char),
    Interpolation,
    End,
}

impl<'a> Parser<'a> {
    /// `valueList`: comma-separated space lists, flattened when singular.
    pub(crate) fn value_list(&mut self) -> ParseResult<Option<Value>> {
        self.generic_list(Self::space_list, Some(','), true)
    }

    pub(super) fn space_list(&mut self) -> ParseResult<Option<Value>> {
        self.generic_list(Self::expression, None, true)
    }

    fn generic_list(
        &mut self,
        item: fn(&mut Self) -> ParseResult<Option<Value>>,
        delim: Option<char>,
        flatten: bool,
    ) -> ParseResult<Option<Value>> {
        let s = self.snapshot();
        let mut items = Vec::new();
        loop {
            match item(self)? {
                Some(value) => items.push(value),
                None => break,
            }
            if let Some(delim) = delim {
                if !self.literal_char(delim) {
                    break;
                }
            }
        }
        if items.is_empty() {
            self.restore(s);
            return Ok(None);
        }
        if flatten && items.len() == 1 {
            return Ok(items.pop());
        }
        let separator = if delim.is_some() {
            ListSeparator::Comma
        } else {
            ListSeparator::Space
        };
        Ok(Some(Value::List(ListValue { separator, items })))
    }

    /// A single expression: a parenthesized list or map, or a value fed to
    /// the precedence climber.
    pub(crate) fn expression(&mut self) -> ParseResult<Option<Value>> {
        let s = self.snapshot();

        if self.rest().starts_with('(') {
            self.literal_char('(');
            if self.literal_char(')') {
                return Ok(Some(Value::empty_list()));
            }

            let in_parens = self.in_parens;
            self.in_parens = true;
            // a parenthesized comma or space list; single values fall
            // through to the climber so `(1 + 2) * 3` keeps parsing
            if let Some(out) = self.value_list()? {
                if matches!(out, Value::List(..)) && self.literal_char(')') {
                    self.in_parens = in_parens;
                    return Ok(Some(out));
                }
            }
            self.in_parens = in_parens;
            self.restore(s);

            if let Some(map) = self.map()? {
                return Ok(Some(map));
            }
            self.restore(s);
        }

        match self.value()? {
            Some(lhs) => Ok(Some(self.exp_helper(lhs, 0)?)),
            None => Ok(None),
        }
    }

    /// Precedence climbing over `lhs`. Consumes operators of precedence at
    /// least `min_precedence`, recursing right when the look-ahead binds
    /// tighter.
    fn exp_helper(&mut self, lhs: Value, min_precedence: u8) -> ParseResult<Value> {
        let mut lhs = lhs;
        let mut ss = self.snapshot();
        let mut ws_before = self.prev_byte_is_whitespace();
        loop {
            let op = match self.try_match_with(&OPERATOR, false) {
                Some(caps) => {
                    let token = caps.get(1).expect("operator token").as_str();
                    BinaryOp::from_token(token).expect("operator pattern")
                }
                None => break,
            };
            if op.precedence() < min_precedence {
                break;
            }
            let ws_after = self.next_byte_is_whitespace();
            let var_after = self.rest().starts_with('$');
            self.whitespace();

            // `foo -3px` is a space list holding a negated number, not a
            // subtraction
            if op == BinaryOp::Minus && ws_before && !ws_after && !var_after {
                break;
            }

            let mut rhs = match self.value()? {
                Some(rhs) => rhs,
                None => break,
            };

            if let Some(next) = self.peek_operator() {
                if next.precedence() > op.precedence() {
                    rhs = self.exp_helper(rhs, next.precedence())?;
                }
            }

            lhs = Value::BinaryOp(Box::new(BinaryOpValue {
                op,
                lhs,
                rhs,
                in_parens: self.in_parens,
                ws_before,
                ws_after,
            }));
            ss = self.snapshot();
            ws_before = self.prev_byte_is_whitespace();
        }
        self.restore(ss);
        Ok(lhs)
    }

    fn peek_operator(&self) -> Option<BinaryOp> {
        let caps = self.peek(&OPERATOR)?;
        BinaryOp::from_token(caps.get(1)?.as_str())
    }

    fn value(&mut self) -> ParseResult<Option<Value>> {
        let first = match self.next_char() {
            Some(c) => c,
            None => return Ok(None),
        };
        let s = self.snapshot();

        // `not <value>` / `not <paren-value>`
        if self.try_match_with(&NOT_KEYWORD, false).is_some() {
            if self.whitespace() {
                if let Some(operand) = self.value()? {
                    return Ok(Some(self.unary(UnaryOp::Not, operand)));
                }
            }
            self.restore(s);
            let _ = self.try_match_with(&NOT_KEYWORD, false);
            if let Some(operand) = self.paren_value()? {
                return Ok(Some(self.unary(UnaryOp::Not, operand)));
            }
            self.restore(s);
        }

        if first == '+' {
            self.literal_char('+');
            if let Some(operand) = self.value()? {
                return Ok(Some(self.unary(UnaryOp::Plus, operand)));
            }
            self.restore(s);
        }

        // a leading `-` binds to a variable, a number, or a parenthesized
        // expression; anything else falls through to the keyword rule
        if first == '-' {
            self.literal_char_with('-', false);
            let operand = if let Some(name) = self.variable() {
                Some(Value::Variable(name))
            } else if let Some(number) = self.number() {
                Some(number)
            } else {
                self.paren_value()?
            };
            if let Some(operand) = operand {
                return Ok(Some(self.unary(UnaryOp::Neg, operand)));
            }
            self.restore(s);
        }

        if first == '(' {
            if let Some(value) = self.paren_value()? {
                return Ok(Some(value));
            }
        }

        if first == '#' {
            if let Some(inter) = self.interpolation(true)? {
                return Ok(Some(Value::Interpolation(Box::new(inter))));
            }
            if let Some(color) = self.color() {
                return Ok(Some(color));
            }
        }

        if first == '$' {
            if let Some(name) = self.variable() {
                return Ok(Some(Value::Variable(name)));
            }
        }

        if let Some(number) = self.number() {
            return Ok(Some(number));
        }

        if first == '"' || first == '\'' {
            if let Some(string) = self.string()? {
                return Ok(Some(string));
            }
        }

        if let Some(call) = self.function_call()? {
            return Ok(Some(call));
        }

        if first == 'p' || first == 'P' {
            if let Some(value) = self.progid()? {
                return Ok(Some(value));
            }
        }

        if let Some(word) = self.keyword() {
            return Ok(Some(if word == "null" {
                Value::Null
            } else {
                Value::Keyword(word.to_owned())
            }));
        }

        Ok(None)
    }

    fn unary(&self, op: UnaryOp, operand: Value) -> Value {
        Value::UnaryOp(Box::new(UnaryOpValue {
            op,
            operand,
            in_parens: self.in_parens,
        }))
    }

    fn paren_value(&mut self) -> ParseResult<Option<Value>> {
        let s = self.snapshot();
        let in_parens = self.in_parens;
        if self.literal_char('(') {
            if self.literal_char(')') {
                return Ok(Some(Value::empty_list()));
            }
            self.in_parens = true;
            if let Some(exp) = self.expression()? {
                if self.literal_char(')') {
                    self.in_parens = in_parens;
                    return Ok(Some(exp));
                }
            }
        }
        self.in_parens = in_parens;
        self.restore(s);
        Ok(None)
    }

    /// `(key: value, ...)`. A parenthesized list without colons is a list,
    /// not a map; that case is handled before this one.
    fn map(&mut self) -> ParseResult<Option<Value>> {
        let s = self.snapshot();
        if !self.literal_char('(') {
            return Ok(None);
        }
        let mut entries = Vec::new();
        loop {
            let pair_start = self.snapshot();
            let key = match self.space_list()? {
                Some(key) => key,
                None => break,
            };
            if !self.literal_char(':') {
                self.restore(pair_start);
                break;
            }
            let value = match self.space_list()? {
                Some(value) => value,
                None => {
                    self.restore(pair_start);
                    break;
                }
            };
            entries.push((key, value));
            if !self.literal_char(',') {
                break;
            }
        }
        if entries.is_empty() || !self.literal_char(')') {
            self.restore(s);
            return Ok(None);
        }
        Ok(Some(Value::Map(MapValue { entries })))
    }

    fn number(&mut self) -> Option<Value> {
        let caps = self.try_match_with(&NUMBER, false)?;
        let value = caps
            .get(1)
            .expect("numeric part")
            .as_str()
            .parse::<f64>()
            .expect("numeric literal");
        let unit = caps.get(2).map_or("", |m| m.as_str());
        self.whitespace();
        Some(Value::Number(Number::new(value, unit)))
    }

    fn color(&mut self) -> Option<Value> {
        let caps = self.try_match(&COLOR)?;
        let color = if let Some(six) = caps.get(1) {
            let num = u32::from_str_radix(six.as_str(), 16).expect("hex digits");
            Color {
                r: (num >> 16) as u8,
                g: (num >> 8) as u8,
                b: num as u8,
            }
        } else {
            let digits = caps.get(2).expect("three hex digits");
            let num = u32::from_str_radix(digits.as_str(), 16).expect("hex digits");
            // expand each nibble to a full byte
            let expand = |nibble: u32| ((nibble << 4) | nibble) as u8;
            Color {
                r: expand((num >> 8) & 0xf),
                g: expand((num >> 4) & 0xf),
                b: expand(num & 0xf),
            }
        };
        Some(Value::Color(color))
    }

    /// A quoted string with embedded interpolation.
    pub(super) fn string(&mut self) -> ParseResult<Option<Value>> {
        let s = self.snapshot();
        let quote = if self.literal_char_with('"', false) {
            QuoteKind::Double
        } else if self.literal_char_with('\'', false) {
            QuoteKind::Single
        } else {
            return Ok(None);
        };
        let delim = quote.delimiter().expect("quoted string");

        let old_white = self.eat_ws_default;
        self.eat_ws_default = false;

        let mut parts = Vec::new();
        loop {
            let (text, token) = match self.match_string_token(delim) {
                Some(found) => found,
                None => break,
            };
            if !text.is_empty() {
                parts.push(StringPart::Text(text));
            }
            match token {
                StringToken::Interpolation => {
                    self.cursor -= 2;
                    match self.interpolation(false)? {
                        Some(inter) => parts.push(StringPart::Interpolation(inter)),
                        None => {
                            self.cursor += 2;
                            parts.push(StringPart::Text("#{".to_owned()));
                        }
                    }
                }
                StringToken::Backslash => {
                    if self.literal_char_with('"', false) {
                        parts.push(StringPart::Text("\\\"".to_owned()));
                    } else if self.literal_char_with('\'', false) {
                        parts.push(StringPart::Text("\\'".to_owned()));
                    } else {
                        parts.push(StringPart::Text("\\".to_owned()));
                    }
                }
                StringToken::Delimiter => {
                    self.cursor -= delim.len_utf8();
                    break;
                }
            }
        }

        self.eat_ws_default = old_white;
        if self.literal_char(delim) {
            return Ok(Some(Value::String(StringLit { quote, parts })));
        }
        self.restore(s);
        Ok(None)
    }

    /// Scan toward the nearest of `#{`, `\`, or the delimiter, returning
    /// the text before it and which token was found, with the cursor moved
    /// past the token. A plain substring scan; anchored regexes degrade
    /// badly over long string bodies.
    fn match_string_token(&mut self, delim: char) -> Option<(String, StringToken)> {
        let rest = self.rest();
        let mut best: Option<(usize, usize, StringToken)> = None;
        for (needle, token) in [
            ("#{", StringToken::Interpolation),
            ("\\", StringToken::Backslash),
        ] {
            if let Some(pos) = rest.find(needle) {
                if best.map_or(true, |(p, ..)| pos < p) {
                    best = Some((pos, needle.len(), token));
                }
            }
        }
        if let Some(pos) = rest.find(delim) {
            if best.map_or(true, |(p, ..)| pos < p) {
                best = Some((pos, delim.len_utf8(), StringToken::Delimiter));
            }
        }
        let (pos, len, token) = best?;
        let text = rest[..pos].to_owned();
        self.cursor += pos + len;
        Some((text, token))
    }

    /// `#{ valueList }`. The whitespace flags record whether the characters
    /// adjacent to the interpolation were whitespace.
    pub(super) fn interpolation(&mut self, look_white: bool) -> ParseResult<Option<Interpolation>> {
        let old_white = self.eat_ws_default;
        self.eat_ws_default = true;
        let s = self.snapshot();

        if self.literal("#{") {
            if let Some(value) = self.value_list()? {
                if self.literal_char_with('}', false) {
                    let (left_ws, right_ws) = if look_white {
                        (
                            s > 0 && self.buf.as_bytes()[s - 1].is_ascii_whitespace(),
                            self.next_byte_is_whitespace(),
                        )
                    } else {
                        (false, false)
                    };
                    self.eat_ws_default = old_white;
                    if self.eat_ws_default {
                        self.whitespace();
                    }
                    return Ok(Some(Interpolation {
                        value,
                        left_ws,
                        right_ws,
                    }));
                }
            }
        }

        self.restore(s);
        self.eat_ws_default = old_white;
        Ok(None)
    }

    /// Read an unbounded token stream until `end` at nesting level 0.
    /// Nested strings and interpolations are parsed recursively;
    /// `nesting_open` (when given) increments the nesting level each time
    /// it appears in literal text.
    pub(super) fn open_string(
        &mut self,
        end: char,
        nesting_open: Option<char>,
    ) -> ParseResult<Option<StringLit>> {
        let old_white = self.eat_ws_default;
        self.eat_ws_default = false;

        let mut parts: Vec<StringPart> = Vec::new();
        let mut nesting = 0_usize;
        loop {
            let rest = self.rest();
            let mut best: Option<(usize, OpenToken)> = None;
            for (pos, token) in [
                (rest.find('\''), OpenToken::Quote('\'')),
                (rest.find('"'), OpenToken::Quote('"')),
                (rest.find("#{"), OpenToken::Interpolation),
                (rest.find(end), OpenToken::End),
            ]
            .into_iter()
            .filter_map(|(pos, token)| pos.map(|p| (p, token)))
            {
                if best.map_or(true, |(p, _)| pos < p) {
                    best = Some((pos, token));
                }
            }
            let (pos, token) = match best {
                Some(found) => found,
                None => break,
            };
            if pos > 0 {
                let text = &rest[..pos];
                if let Some(open) = nesting_open {
                    nesting += text.matches(open).count();
                }
                parts.push(StringPart::Text(text.to_owned()));
            }
            self.cursor += pos;
            match token {
                OpenToken::End => {
                    if nesting == 0 {
                        break;
                    }
                    nesting -= 1;
                    parts.push(StringPart::Text(end.to_string()));
                    self.cursor += end.len_utf8();
                }
                OpenToken::Quote(quote) => match self.string()? {
                    Some(string) => parts.push(StringPart::Nested(Box::new(string))),
                    None => {
                        parts.push(StringPart::Text(quote.to_string()));
                        self.cursor += quote.len_utf8();
                    }
                },
                OpenToken::Interpolation => match self.interpolation(true)? {
                    Some(inter) => parts.push(StringPart::Interpolation(inter)),
                    None => {
                        parts.push(StringPart::Text("#{".to_owned()));
                        self.cursor += 2;
                    }
                },
            }
        }

        self.eat_ws_default = old_white;
        if parts.is_empty() {
            return Ok(None);
        }
        if let Some(StringPart::Text(text)) = parts.last_mut() {
            text.truncate(text.trim_end().len());
        }
        Ok(Some(StringLit {
            quote: QuoteKind::None,
            parts,
        }))
    }

    /// `name(...)`. `alpha(k=v)` keeps its MS filter syntax raw; `calc` and
    /// `expression` bodies are captured raw to keep CSS arithmetic out of
    /// the climber; everything else gets a real argument list, falling back
    /// to a raw capture when that fails.
    fn function_call(&mut self) -> ParseResult<Option<Value>> {
        let s = self.snapshot();
        let name = match self.keyword_with(false) {
            Some(name) => name.to_owned(),
            None => return Ok(None),
        };
        if !self.literal_char('(') {
            self.restore(s);
            return Ok(None);
        }

        if name == "alpha" {
            if let Some(parts) = self.alpha_argument_list()? {
                return Ok(Some(Value::Function(FunctionValue {
                    name,
                    body: StringLit {
                        quote: QuoteKind::None,
                        parts,
                    },
                })));
            }
        }

        let raw_body = name == "expression" || CALC_NAME.is_match(&name);

        if !raw_body {
            let ss = self.snapshot();
            if let Some(args) = self.arg_values()? {
                if self.literal_char(')') {
                    return Ok(Some(Value::FunctionCall(FunctionCallValue { name, args })));
                }
            }
            self.restore(ss);
        }

        let body = self.open_string(')', Some('('))?;
        if self.literal_char(')') {
            return Ok(Some(if raw_body {
                Value::Function(FunctionValue {
                    name,
                    body: body.unwrap_or_else(|| StringLit {
                        quote: QuoteKind::None,
                        parts: Vec::new(),
                    }),
                })
            } else {
                let args = match body {
                    Some(body) => vec![CallArg::positional(Value::String(body))],
                    None => Vec::new(),
                };
                Value::FunctionCall(FunctionCallValue { name, args })
            }));
        }

        self.restore(s);
        Ok(None)
    }

    /// `key=value, ...` with the punctuation preserved as text.
    fn alpha_argument_list(&mut self) -> ParseResult<Option<Vec<StringPart>>> {
        let s = self.snapshot();
        let mut parts: Vec<StringPart> = Vec::new();
        loop {
            let name = match self.keyword() {
                Some(word) => word.to_owned(),
                None => break,
            };
            if !self.literal_char('=') {
                break;
            }
            let value = match self.expression()? {
                Some(value) => value,
                None => break,
            };
            parts.push(StringPart::Text(format!("{}=", name)));
            parts.push(StringPart::Nested(Box::new(value)));
            if !self.literal_char(',') {
                break;
            }
            parts.push(StringPart::Text(", ".to_owned()));
        }
        if parts.is_empty() || !self.literal_char(')') {
            self.restore(s);
            return Ok(None);
        }
        Ok(Some(parts))
    }

    pub(super) fn arg_values(&mut self) -> ParseResult<Option<Vec<CallArg>>> {
        let s = self.snapshot();
        let mut args = Vec::new();
        loop {
            match self.arg_value()? {
                Some(arg) => args.push(arg),
                None => break,
            }
            if !self.literal_char(',') {
                break;
            }
        }
        if args.is_empty() {
            self.restore(s);
            return Ok(None);
        }
        Ok(Some(args))
    }

    fn arg_value(&mut self) -> ParseResult<Option<CallArg>> {
        let s = self.snapshot();
        let mut name = None;
        if let Some(var) = self.variable() {
            if self.literal_char(':') {
                name = Some(var);
            } else {
                self.restore(s);
            }
        }
        match self.space_list()? {
            Some(value) => {
                let is_splat = self.literal("...");
                Ok(Some(CallArg {
                    name,
                    value,
                    is_splat,
                }))
            }
            None => {
                self.restore(s);
                Ok(None)
            }
        }
    }

    /// `progid:NAME(ARGS)` — the MS filter syntax, both halves captured
    /// raw.
    fn progid(&mut self) -> ParseResult<Option<Value>> {
        let s = self.snapshot();
        if self.try_match_with(&PROGID, false).is_some() {
            if let Some(func) = self.open_string('(', None)? {
                if self.literal_char('(') {
                    let args = self.open_string(')', Some('('))?;
                    if self.literal_char(')') {
                        let mut parts = vec![
                            StringPart::Text("progid:".to_owned()),
                            StringPart::Nested(Box::new(Value::String(func))),
                            StringPart::Text("(".to_owned()),
                        ];
                        if let Some(args) = args {
                            parts.push(StringPart::Nested(Box::new(Value::String(args))));
                        }
                        parts.push(StringPart::Text(")".to_owned()));
                        return Ok(Some(Value::String(StringLit {
                            quote: QuoteKind::None,
                            parts,
                        })));
                    }
                }
            }
        }
        self.restore(s);
        Ok(None)
    }

    /// A bare `url(...)` token, normalized to its inner text.
    pub(super) fn url(&mut self) -> Option<Value> {
        let caps = self.try_match(&URL)?;
        let inner = caps.get(1).map_or("", |m| m.as_str());
        Some(Value::String(StringLit::unquoted(format!("url({})", inner))))
    }

    /// Strip a trailing `!default` / `!global` from the right-most chain of
    /// lists, flattening any list left with a single element.
    pub(super) fn strip_assignment_flag(value: &mut Value) -> Option<AssignmentFlag> {
        if let Value::List(list) = value {
            let flag = match list.items.last() {
                Some(Value::Keyword(word)) => AssignmentFlag::from_keyword(word),
                _ => None,
            };
            if let Some(flag) = flag {
                list.items.pop();
                if list.items.len() == 1 {
                    let only = list.items.pop().expect("flattened list");
                    *value = only;
                }
                return Some(flag);
            }
            return match list.items.last_mut() {
                Some(last) => Self::strip_assignment_flag(last),
                None => None,
            };
        }
        None
    }
}
