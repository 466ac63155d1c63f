use regex::Regex;

use crate::ast::{Predicate, SortKey};

/// Abstract Syntax Tree node representing a parsed path expression.
///
/// The AST is the internal representation of an expression after parsing.
/// It is immutable, and one parsed expression may be evaluated against any
/// number of documents.
#[derive(Debug, Clone, PartialEq)]
pub enum PathExpr {
    // References
    /// Document root (`$`)
    ///
    /// Evaluates to the root datum no matter where evaluation currently
    /// stands, so `foo.$.bar` restarts at the top.
    Root,

    /// The current datum (`@` or `` `this` ``)
    This,

    /// One level up (`` `parent` ``)
    ///
    /// Empty at the root.
    Parent,

    // Selection
    /// Named fields of an object
    ///
    /// Several names select several children. On arrays, numeric names act
    /// as indices. A name equal to the configured auto-id field resolves to
    /// a synthetic datum carrying the element's path string.
    ///
    /// # Examples
    /// ```text
    /// foo
    /// [bar,baz]
    /// ["quoted name"]
    /// ```
    Fields(Vec<String>),

    /// Every object value or array element (`*`)
    Wildcard,

    /// Array index, negative counts from the end
    ///
    /// # Examples
    /// ```text
    /// [0]
    /// [-1]
    /// ```
    Index(i64),

    /// Array slice with Python-style bounds
    ///
    /// `[*]` is the full slice. A missing bound defaults to the start or
    /// end of the array; a missing step defaults to 1.
    ///
    /// # Examples
    /// ```text
    /// [1:3]
    /// [:2]
    /// [*]
    /// ```
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },

    // Composition
    /// Child step (`left.right`), left-associative
    Child(Box<PathExpr>, Box<PathExpr>),

    /// Descendant step (`left..right`)
    ///
    /// Matches `right` against every node of each `left` subtree,
    /// including the subtree root, in pre-order.
    Descendants(Box<PathExpr>, Box<PathExpr>),

    /// Comma-joined alternatives, results concatenated in branch order
    ///
    /// # Example
    /// ```text
    /// foo,bar.baz
    /// ```
    Union(Vec<PathExpr>),

    // Suffix operations
    /// Filter (`[?predicate]`)
    ///
    /// Keeps the elements of an array (or the values of an object) for
    /// which the predicate holds.
    Where(Predicate),

    /// Sort directive (`[/key,\key,...]`)
    ///
    /// Stable multi-key sort of array elements; keys apply left to right.
    Sort(Vec<SortKey>),

    /// Backtick named operator
    Func(Function),
}

impl PathExpr {
    /// Child step with `@`/`` `this` `` collapsed away.
    ///
    /// `@.cow`, `` `this`.cow ``, and bare `cow` all build the same node,
    /// which is what makes the three filter spellings canonical.
    pub fn child(left: PathExpr, right: PathExpr) -> PathExpr {
        match (left, right) {
            (PathExpr::This, right) => right,
            (left, PathExpr::This) => left,
            (left, right) => PathExpr::Child(Box::new(left), Box::new(right)),
        }
    }
}

/// Named operators that compute values from the current datum.
#[derive(Debug, Clone)]
pub enum Function {
    /// `` `len` `` - element count of an object or array, character count
    /// of a string
    Len,

    /// `` `sorted` `` - array elements (or object keys) in natural
    /// ascending order, one datum per element
    Sorted,

    /// `` `str()` `` - the current scalar rendered as a string
    Str,

    /// `` `split(char, segment, max_split)` `` - split a string on a
    /// character and keep one segment
    ///
    /// `segment` may be negative (counted from the end); `max_split` of -1
    /// means no limit.
    Split {
        sep: char,
        segment: i64,
        max_split: i64,
    },

    /// `` `sub(/regex/, replacement)` `` - regex substitution over a string
    ///
    /// The replacement may reference capture groups as `$1`, `$2`, ...
    Sub { regex: Regex, replacement: String },
}

// Compiled patterns compare by their source text.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Function::Len, Function::Len) => true,
            (Function::Sorted, Function::Sorted) => true,
            (Function::Str, Function::Str) => true,
            (
                Function::Split {
                    sep: a,
                    segment: b,
                    max_split: c,
                },
                Function::Split {
                    sep: x,
                    segment: y,
                    max_split: z,
                },
            ) => a == x && b == y && c == z,
            (
                Function::Sub {
                    regex: a,
                    replacement: b,
                },
                Function::Sub {
                    regex: x,
                    replacement: y,
                },
            ) => a.as_str() == x.as_str() && b == y,
            _ => false,
        }
    }
}
