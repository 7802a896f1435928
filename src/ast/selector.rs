use crate::ast::{Interpolation, StringLit};

/// One comma-separated selector, stored as the flat sequence of tokens it
/// was written as: compound-selector pieces, combinators, and a `" "` part
/// for the implicit descendant combinator.
///
/// The parser does not resolve selectors; `&`, placeholders, and
/// interpolations survive as-is for the inheritance machinery downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub parts: Vec<SelectorPart>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    Text(String),
    Interpolation(Interpolation),
    /// A raw capture: pseudo-class arguments and quoted attribute values.
    String(StringLit),
}

impl SelectorPart {
    pub(crate) fn text<S: Into<String>>(text: S) -> Self {
        SelectorPart::Text(text.into())
    }
}
