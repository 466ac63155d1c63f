use std::fmt;

/// One step in a reified path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// The implicit root; renders `` `this` `` only when it is the whole
    /// path
    This,

    /// An explicit `$` step; renders only when it is the whole path
    Root,

    /// An object field (or a synthetic auto-id name)
    Field(String),

    /// An array position
    Index(usize),

    /// A named operator that computed the value, e.g. `len`
    Operator(&'static str),
}

/// The provenance of a match: the steps evaluation took from the root.
///
/// Displays in the dotted form queries use: `foo.baz`, `a.[2]`, `$`,
/// `` `this` ``. `This` and `Root` steps disappear when joined with real
/// steps, exactly as `foo.$.bar` and `` foo.`this`.bar `` read as plain
/// paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub(crate) fn new(segments: Vec<PathSegment>) -> Self {
        Path { segments }
    }

    /// The raw steps, root first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        for segment in &self.segments {
            let part = match segment {
                PathSegment::This | PathSegment::Root => continue,
                PathSegment::Field(name) => name.clone(),
                PathSegment::Index(i) => format!("[{}]", i),
                PathSegment::Operator(name) => format!("`{}`", name),
            };
            if wrote {
                write!(f, ".")?;
            }
            write!(f, "{}", part)?;
            wrote = true;
        }
        if !wrote {
            // Nothing but root steps: the path is the root itself.
            match self.segments.last() {
                Some(PathSegment::Root) => write!(f, "$")?,
                _ => write!(f, "`this`")?,
            }
        }
        Ok(())
    }
}
