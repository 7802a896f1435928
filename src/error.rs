use std::{
    error::Error,
    fmt::{self, Display},
};

pub type ParseResult<T> = Result<T, Box<ParseError>>;

/// An error produced while parsing a stylesheet.
///
/// Inside the parser, errors are raised as a bare message plus the byte
/// offset of the offending token, through the tuple `From` impls below.
/// The parser resolves that offset against the source buffer before the
/// error is returned, so every error a caller sees carries its source
/// name, line number, and snippet.
///
/// The `Display` implementation renders the diagnostic, e.g.
///
/// ```text
/// unclosed block: failed at `` input.scss on line 3
/// ```
///
/// Messages are meant for end users and may change between bugfix versions;
/// the structured accessors below are the stable surface.
#[derive(Debug, Clone)]
pub struct ParseError {
    kind: ParseErrorKind,
}

#[derive(Debug, Clone)]
enum ParseErrorKind {
    /// A raw error with no location metadata yet: a message and the byte
    /// offset it was raised at.
    Raw(String, usize),
    Located {
        message: String,
        source_name: String,
        line: usize,
        snippet: String,
    },
}

impl ParseError {
    pub(crate) fn raw(self) -> (String, usize) {
        match self.kind {
            ParseErrorKind::Raw(message, pos) => (message, pos),
            e => unreachable!("error was already located: {:?}", e),
        }
    }

    pub(crate) const fn from_loc(
        message: String,
        source_name: String,
        line: usize,
        snippet: String,
    ) -> Self {
        ParseError {
            kind: ParseErrorKind::Located {
                message,
                source_name,
                line,
                snippet,
            },
        }
    }

    /// The bare message, without location information.
    pub fn message(&self) -> &str {
        match &self.kind {
            ParseErrorKind::Raw(message, _) | ParseErrorKind::Located { message, .. } => message,
        }
    }

    /// The display name of the source this error occurred in.
    pub fn source_name(&self) -> &str {
        match &self.kind {
            ParseErrorKind::Located { source_name, .. } => source_name,
            ParseErrorKind::Raw(..) => unreachable!("raw errors are not returned to callers"),
        }
    }

    /// 1-based line number of the offending token.
    pub fn line(&self) -> usize {
        match &self.kind {
            ParseErrorKind::Located { line, .. } => *line,
            ParseErrorKind::Raw(..) => unreachable!("raw errors are not returned to callers"),
        }
    }

    /// The offending token span, up to the end of its line.
    pub fn snippet(&self) -> &str {
        match &self.kind {
            ParseErrorKind::Located { snippet, .. } => snippet,
            ParseErrorKind::Raw(..) => unreachable!("raw errors are not returned to callers"),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (message, source_name, line, snippet) = match &self.kind {
            ParseErrorKind::Located {
                message,
                source_name,
                line,
                snippet,
            } => (message, source_name, line, snippet),
            ParseErrorKind::Raw(..) => unreachable!(),
        };
        write!(
            f,
            "{}: failed at `{}` {} on line {}",
            message, snippet, source_name, line
        )
    }
}

impl From<(&str, usize)> for Box<ParseError> {
    #[inline]
    fn from(error: (&str, usize)) -> Box<ParseError> {
        Box::new(ParseError {
            kind: ParseErrorKind::Raw(error.0.to_owned(), error.1),
        })
    }
}

impl From<(String, usize)> for Box<ParseError> {
    #[inline]
    fn from(error: (String, usize)) -> Box<ParseError> {
        Box::new(ParseError {
            kind: ParseErrorKind::Raw(error.0, error.1),
        })
    }
}

impl Error for ParseError {
    #[inline]
    fn description(&self) -> &'static str {
        "stylesheet parsing error"
    }
}
