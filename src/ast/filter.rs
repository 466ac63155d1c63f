use crate::ast::{CmpOp, PathExpr};

/// A filter condition evaluated against one candidate element (`@`).
///
/// Operand paths are resolved relative to the element under test. A path
/// that resolves to nothing makes the condition false for that element,
/// never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// True when the path yields at least one match
    ///
    /// # Example
    /// ```text
    /// [?cow]
    /// ```
    Exists(Box<PathExpr>),

    /// True when any value the path yields satisfies the comparison
    ///
    /// # Example
    /// ```text
    /// [?cow > 5]
    /// ```
    Compare(Box<PathExpr>, CmpOp, Literal),

    /// True when both sides hold for the same element
    ///
    /// # Example
    /// ```text
    /// [?cow > 5 & cat = 2]
    /// ```
    And(Box<Predicate>, Box<Predicate>),
}

/// Right-hand side of a filter comparison.
///
/// A bare word on the right compares as a string, so `[?cow = moo]` and
/// `[?cow = "moo"]` mean the same thing.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
}
