use crate::common::{BinaryOp, ListSeparator, QuoteKind, UnaryOp};

/// A parsed, unevaluated value expression.
///
/// Arithmetic is kept as [`Value::BinaryOp`] nodes rather than being folded
/// here; whether `12px/1.5` means division or a font shorthand is for the
/// evaluator to decide.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Keyword(String),
    Variable(String),
    Number(Number),
    Color(Color),
    String(StringLit),
    Interpolation(Box<Interpolation>),
    List(ListValue),
    Map(MapValue),
    BinaryOp(Box<BinaryOpValue>),
    UnaryOp(Box<UnaryOpValue>),
    FunctionCall(FunctionCallValue),
    Function(FunctionValue),
}

/// A numeric literal with its unit kept verbatim. `0` and `0px` are distinct
/// values.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    pub value: f64,
    pub unit: String,
}

impl Number {
    pub fn new<S: Into<String>>(value: f64, unit: S) -> Self {
        Number {
            value,
            unit: unit.into(),
        }
    }
}

/// An `#rrggbb` or `#rgb` literal, expanded to 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A string composite. `quote` is [`QuoteKind::None`] for unquoted
/// composites such as open strings and interpolated identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLit {
    pub quote: QuoteKind,
    pub parts: Vec<StringPart>,
}

impl StringLit {
    pub fn unquoted<S: Into<String>>(text: S) -> Self {
        StringLit {
            quote: QuoteKind::None,
            parts: vec![StringPart::Text(text.into())],
        }
    }

    /// The literal text of this composite, ignoring interpolations and
    /// nested values.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            if let StringPart::Text(t) = part {
                out.push_str(t);
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StringPart {
    Text(String),
    Interpolation(Interpolation),
    /// A nested value inside a raw capture: a quoted string found while
    /// scanning an open string, or an expression fragment of an
    /// `alpha(opacity=...)` argument list.
    Nested(Box<Value>),
}

/// `#{...}`. The two flags record whether the character adjacent to the
/// interpolation in the source was whitespace; selector and value
/// concatenation read them later.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    pub value: Value,
    pub left_ws: bool,
    pub right_ws: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListValue {
    pub separator: ListSeparator,
    pub items: Vec<Value>,
}

/// Map entries in insertion order. Duplicate keys are preserved; resolving
/// them is the evaluator's concern.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapValue {
    pub entries: Vec<(Value, Value)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOpValue {
    pub op: BinaryOp,
    pub lhs: Value,
    pub rhs: Value,
    pub in_parens: bool,
    pub ws_before: bool,
    pub ws_after: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOpValue {
    pub op: UnaryOp,
    pub operand: Value,
    pub in_parens: bool,
}

/// An ordinary function invocation with a parsed argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallValue {
    pub name: String,
    pub args: Vec<CallArg>,
}

/// A call whose argument text is preserved raw: `alpha(opacity=50)`,
/// `calc(...)` and its vendor-prefixed forms, and `expression(...)`. Their
/// bodies use CSS syntax that must not be re-interpreted as arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionValue {
    pub name: String,
    pub body: StringLit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallArg {
    pub name: Option<String>,
    pub value: Value,
    pub is_splat: bool,
}

impl CallArg {
    pub(crate) fn positional(value: Value) -> Self {
        CallArg {
            name: None,
            value,
            is_splat: false,
        }
    }
}

/// One parameter of a mixin or function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgDef {
    pub name: String,
    pub default: Option<Value>,
    pub is_splat: bool,
}

impl Value {
    pub(crate) fn empty_list() -> Self {
        Value::List(ListValue {
            separator: ListSeparator::Undecided,
            items: Vec::new(),
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
