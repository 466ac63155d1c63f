/// One key of a sort directive: a field path plus a direction.
///
/// Keys apply left to right; a later key only breaks ties left by the
/// earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    /// Dotted path walked into each element to find the key value
    pub segments: Vec<SortSegment>,
    pub direction: SortDirection,
}

/// One step of a sort-key path.
#[derive(Debug, Clone, PartialEq)]
pub enum SortSegment {
    /// A single field name
    ///
    /// # Example
    /// ```text
    /// [/cat.cow]
    /// ```
    Name(String),

    /// Parenthesized alternatives; the first field present wins
    ///
    /// # Example
    /// ```text
    /// [/cat.(cow,bow)]
    /// ```
    Group(Vec<String>),
}

/// Sort direction: `/` ascending, `\` descending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Ascending,
    Descending,
}
