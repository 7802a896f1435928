use std::fmt::{self, Display, Write};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Plus => write!(f, "+"),
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "not"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BinaryOp {
    SingleEq,
    Equal,
    NotEqual,
    Spaceship,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    Plus,
    Minus,
    Mul,
    Div,
    Rem,
    And,
    Or,
}

impl BinaryOp {
    pub fn precedence(self) -> u8 {
        match self {
            Self::SingleEq => 0,
            Self::Or => 1,
            Self::And => 2,
            Self::Equal | Self::NotEqual | Self::Spaceship => 3,
            Self::GreaterThan | Self::GreaterThanEqual | Self::LessThan | Self::LessThanEqual => 4,
            Self::Plus | Self::Minus => 5,
            Self::Mul | Self::Div | Self::Rem => 6,
        }
    }

    /// The keywords `and` and `or` match case-insensitively; everything else
    /// is punctuation.
    pub(crate) fn from_token(op: &str) -> Option<Self> {
        Some(match op {
            "=" => Self::SingleEq,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<=>" => Self::Spaceship,
            ">" => Self::GreaterThan,
            ">=" => Self::GreaterThanEqual,
            "<" => Self::LessThan,
            "<=" => Self::LessThanEqual,
            "+" => Self::Plus,
            "-" => Self::Minus,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            _ if op.eq_ignore_ascii_case("and") => Self::And,
            _ if op.eq_ignore_ascii_case("or") => Self::Or,
            _ => return None,
        })
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::SingleEq => write!(f, "="),
            BinaryOp::Equal => write!(f, "=="),
            BinaryOp::NotEqual => write!(f, "!="),
            BinaryOp::Spaceship => write!(f, "<=>"),
            BinaryOp::GreaterThanEqual => write!(f, ">="),
            BinaryOp::LessThanEqual => write!(f, "<="),
            BinaryOp::GreaterThan => write!(f, ">"),
            BinaryOp::LessThan => write!(f, "<"),
            BinaryOp::Plus => write!(f, "+"),
            BinaryOp::Minus => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Rem => write!(f, "%"),
            BinaryOp::And => write!(f, "and"),
            BinaryOp::Or => write!(f, "or"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum QuoteKind {
    None,
    Single,
    Double,
}

impl QuoteKind {
    pub(crate) fn delimiter(self) -> Option<char> {
        match self {
            Self::None => None,
            Self::Single => Some('\''),
            Self::Double => Some('"'),
        }
    }
}

impl Display for QuoteKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Single => f.write_char('\''),
            Self::Double => f.write_char('"'),
        }
    }
}

/// `Undecided` is the separator of implicit groupings such as the empty list
/// `()`; space and comma are the two semantic separators.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ListSeparator {
    Undecided,
    Space,
    Comma,
}

impl ListSeparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undecided => "",
            Self::Space => " ",
            Self::Comma => ",",
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AssignmentFlag {
    Default,
    Global,
}

impl AssignmentFlag {
    pub(crate) fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "!default" => Some(Self::Default),
            "!global" => Some(Self::Global),
            _ => None,
        }
    }
}

impl Display for AssignmentFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "!default"),
            Self::Global => write!(f, "!global"),
        }
    }
}
