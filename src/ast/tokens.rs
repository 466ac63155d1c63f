#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Integer literal
    ///
    /// Used for indices, slice bounds, and filter comparisons. A leading
    /// minus sign is part of the number.
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -1
    /// ```
    Integer(i64),

    /// Floating-point literal
    ///
    /// Only meaningful in filter comparisons.
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -0.5
    /// ```
    Float(f64),

    /// String literal enclosed in single or double quotes
    ///
    /// Serves as a quoted field name or a filter comparison literal.
    ///
    /// # Examples
    /// ```text
    /// "cpu.frequency"
    /// 'bar baz'
    /// ```
    String(String),

    /// Field name
    ///
    /// Starts with a letter, underscore, or `@`; continues with letters,
    /// digits, underscores, `@`, and interior hyphens.
    ///
    /// # Examples
    /// ```text
    /// user
    /// bar-baz
    /// @foo
    /// ```
    Identifier(String),

    /// Backtick-quoted named operator, content kept raw
    ///
    /// # Examples
    /// ```text
    /// `this`
    /// `parent`
    /// `len`
    /// `split(., 1, -1)`
    /// ```
    Named(String),

    // References
    /// Root document reference
    ///
    /// # Examples
    /// ```text
    /// $
    /// $.store
    /// ```
    Dollar,

    /// The current value under test in a filter
    ///
    /// A bare `@`; note that `@foo` is an identifier, not `@` + `foo`.
    ///
    /// # Examples
    /// ```text
    /// [?@.cow = "moo"]
    /// ```
    At,

    /// Wildcard over object values or array elements
    Star,

    // Structure
    /// Child step
    Dot,

    /// Descendant step (any depth)
    DotDot,

    /// Left bracket opening a suffix (index, slice, fields, filter, sort)
    LBracket,

    /// Right bracket
    RBracket,

    /// Left parenthesis for grouping and sort-key alternatives
    LParen,

    /// Right parenthesis
    RParen,

    /// Separates union branches, bracket field names, and sort keys
    Comma,

    /// Separates slice bounds
    Colon,

    /// Introduces a filter inside brackets
    Question,

    /// Ascending sort direction
    Slash,

    /// Descending sort direction
    Backslash,

    /// Conjunction inside a filter
    Amp,

    // Comparison
    /// Equality (`=` and `==` are interchangeable)
    Eq,

    /// Inequality
    NotEq,

    /// Less than
    Lt,

    /// Greater than
    Gt,

    /// Less than or equal
    LtEq,

    /// Greater than or equal
    GtEq,

    /// End of input
    Eof,
}
