/*!
This crate provides the front end of an SCSS-dialect stylesheet
preprocessor: a parser that turns source text into a tree of statements and
typed value expressions.

The parser is the whole of this crate. Evaluation, selector resolution,
`@import` loading, and CSS serialization are left to downstream consumers of
the produced tree. Unknown directives, undefined variables, and unknown
functions are all accepted here; rejecting them is the evaluator's job.

## Use as library

```
fn main() -> Result<(), Box<thistle::ParseError>> {
    let root = thistle::parse(
        "a { color: red; }",
        &thistle::Options::default().source_name("input.scss"),
    )?;
    assert_eq!(root.children.len(), 1);
    Ok(())
}
```

## Use as binary

```bash
thistle input.scss
```

prints the parsed tree, or a diagnostic such as

```text
unclosed block: failed at `` input.scss on line 3
```
*/

#![warn(clippy::all, clippy::cargo, clippy::dbg_macro)]
#![deny(missing_debug_implementations)]
#![allow(
    clippy::use_self,
    clippy::missing_docs_in_private_items,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::single_match_else,
    clippy::uninlined_format_args,
    clippy::float_cmp,
    clippy::too_many_lines
)]

pub use crate::common::{AssignmentFlag, BinaryOp, ListSeparator, QuoteKind, UnaryOp};
pub use crate::error::{ParseError, ParseResult};
pub use crate::options::Options;

pub mod ast;

mod common;
mod error;
mod options;
mod parse;

use crate::{
    ast::{Block, Selector, Value},
    parse::Parser,
};

/// Parse a stylesheet into its root block.
///
/// ```
/// # use thistle::{ast::Stmt, Options};
/// fn main() -> Result<(), Box<thistle::ParseError>> {
///     let root = thistle::parse("$x: 1px;", &Options::default())?;
///     assert!(matches!(root.children[0], Stmt::Assign(..)));
///     Ok(())
/// }
/// ```
pub fn parse(input: &str, options: &Options) -> ParseResult<Block> {
    Parser::new(input, options).parse()
}

/// Parse a single value list, as it would appear on the right-hand side of
/// a property.
///
/// ```
/// # use thistle::{ast::Value, Options};
/// fn main() -> Result<(), Box<thistle::ParseError>> {
///     let value = thistle::parse_value("12px", &Options::default())?;
///     assert!(matches!(value, Value::Number(..)));
///     Ok(())
/// }
/// ```
pub fn parse_value(input: &str, options: &Options) -> ParseResult<Value> {
    Parser::new(input, options).parse_value()
}

/// Parse a comma-separated selector list.
///
/// ```
/// # use thistle::Options;
/// fn main() -> Result<(), Box<thistle::ParseError>> {
///     let selectors = thistle::parse_selector(".a, .b", &Options::default())?;
///     assert_eq!(selectors.len(), 2);
///     Ok(())
/// }
/// ```
pub fn parse_selector(input: &str, options: &Options) -> ParseResult<Vec<Selector>> {
    Parser::new(input, options).parse_selector()
}
