pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod path;
pub mod value;

pub use ast::{CmpOp, Function, Literal, PathExpr, Predicate, SortDirection, SortKey, SortSegment, Token};
pub use evaluator::{auto_id_field, set_auto_id_field, EvalError, EvalOptions, Match};
pub use lexer::{Lexer, LexError, Position};
pub use parser::{parse, Parser, ParseError};
pub use path::{Path, PathSegment};
pub use value::Value;
