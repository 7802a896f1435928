pub use block::{Block, BlockKind};
pub use selector::{Selector, SelectorPart};
pub use stmt::{
    AssignStmt, CommentStmt, ExtendStmt, ImportStmt, IncludeStmt, SourceTag, Stmt, ValueStmt,
};
pub use value::{
    ArgDef, BinaryOpValue, CallArg, Color, FunctionCallValue, FunctionValue, Interpolation,
    ListValue, MapValue, Number, StringLit, StringPart, UnaryOpValue, Value,
};

mod block;
mod selector;
mod stmt;
mod value;
