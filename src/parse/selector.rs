use crate::{
    ast::{Selector, SelectorPart, Value},
    error::ParseResult,
};

use super::base::{
    ATTR_OPERATOR, COMBINATOR, ESCAPE, NUMBER, PLACEHOLDER_NAME, SELECTOR_END, SLASH_COMBINATOR,
    WS_RUN,
};
use super::Parser;

impl<'a> Parser<'a> {
    /// A comma-separated selector list.
    pub(crate) fn selectors(&mut self) -> ParseResult<Option<Vec<Selector>>> {
        let s = self.snapshot();
        let mut out = Vec::new();
        while let Some(selector) = self.selector()? {
            out.push(selector);
            if !self.literal_char(',') {
                break;
            }
            // tolerate consecutive commas
            while self.literal_char(',') {}
        }
        if out.is_empty() {
            self.restore(s);
            return Ok(None);
        }
        Ok(Some(out))
    }

    /// Compound selectors interleaved with combinators. Whitespace between
    /// compounds becomes an explicit `" "` descendant part.
    fn selector(&mut self) -> ParseResult<Option<Selector>> {
        let mut parts: Vec<SelectorPart> = Vec::new();
        let mut pending_descendant = false;
        loop {
            if let Some(caps) = self.try_match(&COMBINATOR) {
                parts.push(SelectorPart::text(
                    caps.get(0).expect("anchored match").as_str(),
                ));
                pending_descendant = false;
                continue;
            }
            if let Some(single) = self.selector_single()? {
                if pending_descendant {
                    parts.push(SelectorPart::text(" "));
                }
                parts.extend(single);
                pending_descendant = self.try_match(&WS_RUN).is_some();
                continue;
            }
            if let Some(caps) = self.try_match(&SLASH_COMBINATOR) {
                parts.push(SelectorPart::text(
                    caps.get(0).expect("anchored match").as_str(),
                ));
                pending_descendant = false;
                continue;
            }
            break;
        }
        if parts.is_empty() {
            return Ok(None);
        }
        Ok(Some(Selector { parts }))
    }

    /// One compound selector. Runs whitespace-sensitive; the ambient
    /// whitespace default is restored on exit.
    fn selector_single(&mut self) -> ParseResult<Option<Vec<SelectorPart>>> {
        let old_white = self.eat_ws_default;
        self.eat_ws_default = false;

        let mut parts: Vec<SelectorPart> = Vec::new();
        if self.literal_char_with('*', false) {
            parts.push(SelectorPart::text("*"));
        }

        loop {
            let first = match self.next_char() {
                Some(c) => c,
                None => break,
            };
            if self.peek(&SELECTOR_END).is_some() {
                break;
            }
            let s = self.snapshot();
            match first {
                '&' => {
                    self.cursor += 1;
                    parts.push(SelectorPart::text("&"));
                }
                '.' => {
                    self.cursor += 1;
                    parts.push(SelectorPart::text("."));
                }
                '|' => {
                    self.cursor += 1;
                    parts.push(SelectorPart::text("|"));
                }
                '\\' => match self.try_match_with(&ESCAPE, false) {
                    Some(caps) => parts.push(SelectorPart::text(
                        caps.get(0).expect("anchored match").as_str(),
                    )),
                    None => break,
                },
                '%' => {
                    self.cursor += 1;
                    match self.placeholder()? {
                        Some(part) => {
                            parts.push(SelectorPart::text("%"));
                            parts.push(part);
                        }
                        None => {
                            self.restore(s);
                            break;
                        }
                    }
                }
                '#' => {
                    if let Some(inter) = self.interpolation(true)? {
                        parts.push(SelectorPart::Interpolation(inter));
                    } else {
                        self.cursor += 1;
                        parts.push(SelectorPart::text("#"));
                    }
                }
                ':' => {
                    if !self.pseudo_selector(&mut parts)? {
                        self.restore(s);
                        break;
                    }
                }
                '[' => {
                    self.attribute_selector(&mut parts)?;
                }
                _ => {
                    if let Some(caps) = self.try_match_with(&NUMBER, false) {
                        // keyframes selectors such as `100%`
                        parts.push(SelectorPart::text(
                            caps.get(0).expect("anchored match").as_str(),
                        ));
                    } else if let Some(word) = self.keyword_with(false) {
                        parts.push(SelectorPart::text(word));
                    } else if let Some(inter) = self.interpolation(true)? {
                        parts.push(SelectorPart::Interpolation(inter));
                    } else {
                        break;
                    }
                }
            }
        }

        self.eat_ws_default = old_white;
        if parts.is_empty() {
            return Ok(None);
        }
        Ok(Some(parts))
    }

    /// `::?name`, where the name may mix keywords and interpolations,
    /// optionally followed by parenthesized arguments captured raw.
    fn pseudo_selector(&mut self, parts: &mut Vec<SelectorPart>) -> ParseResult<bool> {
        let prefix = if self.rest().starts_with("::") {
            self.cursor += 2;
            "::"
        } else {
            self.cursor += 1;
            ":"
        };
        let name = self.mixed_keyword()?;
        if name.is_empty() {
            return Ok(false);
        }
        parts.push(SelectorPart::text(prefix));
        parts.extend(name);

        let ss = self.snapshot();
        if self.literal_char_with('(', false) {
            let args = self.open_string(')', Some('('))?;
            if self.literal_char_with(')', false) {
                parts.push(SelectorPart::text("("));
                if let Some(args) = args {
                    parts.push(SelectorPart::String(args));
                }
                parts.push(SelectorPart::text(")"));
            } else {
                self.restore(ss);
            }
        }
        Ok(true)
    }

    fn mixed_keyword(&mut self) -> ParseResult<Vec<SelectorPart>> {
        let mut parts = Vec::new();
        loop {
            if let Some(word) = self.keyword_with(false) {
                parts.push(SelectorPart::text(word));
                continue;
            }
            if let Some(inter) = self.interpolation(true)? {
                parts.push(SelectorPart::Interpolation(inter));
                continue;
            }
            break;
        }
        Ok(parts)
    }

    /// `[...]`, tokenized as whitespace, strings, keywords, interpolations,
    /// and operator runs. An unterminated selector simply stops consuming;
    /// the enclosing alternative fails at its terminator instead.
    fn attribute_selector(&mut self, parts: &mut Vec<SelectorPart>) -> ParseResult<()> {
        self.cursor += 1;
        parts.push(SelectorPart::text("["));
        loop {
            if self.try_match_with(&WS_RUN, false).is_some() {
                parts.push(SelectorPart::text(" "));
                continue;
            }
            if let Some(Value::String(string)) = self.string()? {
                parts.push(SelectorPart::String(string));
                continue;
            }
            if let Some(word) = self.keyword_with(false) {
                parts.push(SelectorPart::text(word));
                continue;
            }
            if let Some(inter) = self.interpolation(false)? {
                parts.push(SelectorPart::Interpolation(inter));
                continue;
            }
            if self.literal_char_with(']', false) {
                parts.push(SelectorPart::text("]"));
                break;
            }
            if let Some(caps) = self.try_match_with(&ATTR_OPERATOR, false) {
                parts.push(SelectorPart::text(
                    caps.get(0).expect("anchored match").as_str(),
                ));
                continue;
            }
            break;
        }
        Ok(())
    }

    /// `%name`, as a word or an interpolation.
    fn placeholder(&mut self) -> ParseResult<Option<SelectorPart>> {
        if let Some(caps) = self.try_match_with(&PLACEHOLDER_NAME, false) {
            return Ok(Some(SelectorPart::text(
                caps.get(0).expect("anchored match").as_str(),
            )));
        }
        match self.interpolation(true)? {
            Some(inter) => Ok(Some(SelectorPart::Interpolation(inter))),
            None => Ok(None),
        }
    }
}
