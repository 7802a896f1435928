use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};

use super::Parser;

/// Compile an anchored probe with the shared flags: case-insensitive,
/// dot-matches-newline. Probes are compiled once and shared by every parser
/// in the process.
macro_rules! probe {
    ($name:ident, $pattern:literal) => {
        pub(super) static $name: Lazy<Regex> = Lazy::new(|| {
            RegexBuilder::new($pattern)
                .case_insensitive(true)
                .dot_matches_new_line(true)
                .build()
                .expect("valid probe pattern")
        });
    };
}

// Line comments are whitespace; block comments (group 1) are captured and
// attached to the tree.
probe!(WHITE, r"^(?://[^\n]*\s*|(/\*.*?\*/)\s*|\s+)");

// Words are permissive on purpose: `!default`, `*zoom`, and quoted font
// names all tokenize as keywords.
probe!(KEYWORD, r#"^(?:[\w*!"'-]|\\.)(?:[\w"'-]|\\.)*"#);

probe!(NUMBER, r"^([0-9]*\.?[0-9]+)([%a-zA-Z]+)?");
probe!(COLOR, r"^#(?:([0-9a-f]{6})|([0-9a-f]{3}))");

// Ordered so that multi-character operators win over their prefixes.
probe!(OPERATOR, r"^(<=>|[!=]=|[<>]=?|[*/%+-]|(?:and|or)\b|=)");
probe!(NOT_KEYWORD, r"^not");
probe!(PROGID, r"^progid:");

probe!(DIRECTIVE_NAME, r"^@([a-zA-Z-]+)");

probe!(WS_RUN, r"^\s+");
probe!(COMBINATOR, r"^[>+~]+");
// `/deep/`-style vendor combinators
probe!(SLASH_COMBINATOR, r"^/[^/]+/");
probe!(SELECTOR_END, r"^\s*[{,]");
probe!(PLACEHOLDER_NAME, r"^[\w-]+");
probe!(ATTR_OPERATOR, r"^[|~$*^=-]+");
probe!(ESCAPE, r"^\\\S");

probe!(URL, r#"^url\(\s*("[^"]*"|'[^']*'|[^)]*?)\s*\)"#);

// Matched against a whole function name, not probed at the cursor.
probe!(CALC_NAME, r"^(-[a-z]+-)?calc$");

impl<'a> Parser<'a> {
    pub(super) fn rest(&self) -> &'a str {
        &self.buf[self.cursor..]
    }

    pub(super) fn at_eof(&self) -> bool {
        self.cursor >= self.buf.len()
    }

    pub(super) fn snapshot(&self) -> usize {
        self.cursor
    }

    pub(super) fn restore(&mut self, pos: usize) {
        self.cursor = pos;
    }

    pub(super) fn next_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(super) fn prev_byte_is_whitespace(&self) -> bool {
        self.cursor > 0 && self.buf.as_bytes()[self.cursor - 1].is_ascii_whitespace()
    }

    pub(super) fn next_byte_is_whitespace(&self) -> bool {
        self.rest()
            .bytes()
            .next()
            .map_or(false, |b| b.is_ascii_whitespace())
    }

    /// Anchored probe at the cursor, advancing past the match, with the
    /// ambient whitespace behavior.
    pub(super) fn try_match(&mut self, re: &Regex) -> Option<Captures<'a>> {
        self.try_match_with(re, self.eat_ws_default)
    }

    pub(super) fn try_match_with(&mut self, re: &Regex, eat_ws: bool) -> Option<Captures<'a>> {
        let caps = re.captures(self.rest())?;
        self.cursor += caps.get(0).expect("anchored match").end();
        if eat_ws {
            self.whitespace();
        }
        Some(caps)
    }

    /// Anchored probe that never advances.
    pub(super) fn peek(&self, re: &Regex) -> Option<Captures<'a>> {
        re.captures(self.rest())
    }

    /// Case-sensitive literal with the ambient whitespace behavior.
    pub(super) fn literal(&mut self, s: &str) -> bool {
        self.literal_with(s, self.eat_ws_default)
    }

    pub(super) fn literal_with(&mut self, s: &str, eat_ws: bool) -> bool {
        if !self.rest().starts_with(s) {
            return false;
        }
        self.cursor += s.len();
        if eat_ws {
            self.whitespace();
        }
        true
    }

    pub(super) fn literal_char(&mut self, c: char) -> bool {
        self.literal_char_with(c, self.eat_ws_default)
    }

    pub(super) fn literal_char_with(&mut self, c: char, eat_ws: bool) -> bool {
        if !self.rest().starts_with(c) {
            return false;
        }
        self.cursor += c.len_utf8();
        if eat_ws {
            self.whitespace();
        }
        true
    }

    /// Skip whitespace and comments. Block comments are recorded once per
    /// start position and buffered on the current block.
    pub(super) fn whitespace(&mut self) -> bool {
        let mut found = false;
        while let Some(caps) = WHITE.captures(self.rest()) {
            if let Some(comment) = caps.get(1) {
                let start = self.cursor + comment.start();
                if self.comments_seen.insert(start) {
                    self.push_comment(comment.as_str().to_owned(), start);
                }
            }
            self.cursor += caps.get(0).expect("anchored match").end();
            found = true;
        }
        found
    }

    /// A statement terminator: `;` (consumed), a closing brace, or the end
    /// of the buffer.
    pub(super) fn end_of_statement(&mut self) -> bool {
        if self.literal_char(';') {
            return true;
        }
        self.at_eof() || self.rest().starts_with('}')
    }

    pub(super) fn keyword(&mut self) -> Option<&'a str> {
        self.keyword_with(self.eat_ws_default)
    }

    pub(super) fn keyword_with(&mut self, eat_ws: bool) -> Option<&'a str> {
        let caps = self.try_match_with(&KEYWORD, eat_ws)?;
        Some(caps.get(0).expect("anchored match").as_str())
    }

    /// `$name`. The name is captured verbatim.
    pub(super) fn variable(&mut self) -> Option<String> {
        let s = self.snapshot();
        if self.literal_char_with('$', false) {
            if let Some(name) = self.keyword() {
                return Some(name.to_owned());
            }
        }
        self.restore(s);
        None
    }
}
