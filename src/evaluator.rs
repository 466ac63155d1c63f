use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::RwLock;

use regex::Regex;
use rust_decimal::{Decimal, prelude::FromPrimitive};

use crate::{
    ast::{CmpOp, Function, Literal, PathExpr, Predicate, SortDirection, SortKey, SortSegment},
    path::{Path, PathSegment},
    value::Value,
};

static AUTO_ID_FIELD: RwLock<Option<String>> = RwLock::new(None);

/// Set the process-wide default auto-id field.
///
/// The default is read by [`PathExpr::find`]; `None` disables the
/// behavior. Set it before issuing concurrent evaluations, not during.
/// Evaluations that need their own setting should use
/// [`PathExpr::find_with`] instead.
pub fn set_auto_id_field(name: Option<String>) {
    let mut field = AUTO_ID_FIELD.write().unwrap_or_else(|e| e.into_inner());
    *field = name;
}

/// The current process-wide default auto-id field.
pub fn auto_id_field() -> Option<String> {
    AUTO_ID_FIELD
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// Per-evaluation configuration.
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// Field name that resolves to an element's path string when queried
    pub auto_id_field: Option<String>,
}

/// Errors that can occur during evaluation.
///
/// Missing fields, out-of-range indices, and type mismatches in filters
/// all resolve to "no match" instead; the only evaluation-time error is a
/// named operator applied to a value that cannot support it.
#[derive(Debug, Clone)]
pub enum EvalError {
    /// Invalid operation for the given type
    TypeError(String),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::TypeError(msg) => write!(f, "Type error: {}", msg),
        }
    }
}

impl std::error::Error for EvalError {}

/// Type noun used in error messages.
fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Boolean(_) => "boolean",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One value located by a query, together with the path that reached it.
///
/// Values found in the document are borrowed from it; values computed by
/// named operators (and auto-id substitutions) are owned scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    value: Cow<'a, Value>,
    path: Path,
}

impl Match<'_> {
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_value(self) -> Value {
        self.value.into_owned()
    }
}

impl PathExpr {
    /// Evaluate against a document, using the process-wide default
    /// auto-id field.
    ///
    /// Matches come back in evaluation order and may contain duplicates
    /// when union branches overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorrel::{parse, Value};
    /// use std::collections::BTreeMap;
    ///
    /// let doc = Value::Object(BTreeMap::from([
    ///     ("foo".to_string(), Value::Integer(1)),
    /// ]));
    ///
    /// let matches = parse("foo").unwrap().find(&doc).unwrap();
    /// assert_eq!(matches[0].value(), &Value::Integer(1));
    /// assert_eq!(matches[0].path().to_string(), "foo");
    /// ```
    pub fn find<'a>(&self, document: &'a Value) -> Result<Vec<Match<'a>>, EvalError> {
        let options = EvalOptions {
            auto_id_field: auto_id_field(),
        };
        self.find_with(document, &options)
    }

    /// Evaluate with explicit options.
    ///
    /// This is the re-entrant core: it reads no shared state, so one
    /// parsed expression may run on many threads at once.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorrel::{parse, EvalOptions, Value};
    /// use std::collections::BTreeMap;
    ///
    /// let doc = Value::Object(BTreeMap::from([
    ///     ("foo".to_string(), Value::String("baz".to_string())),
    /// ]));
    /// let options = EvalOptions {
    ///     auto_id_field: Some("id".to_string()),
    /// };
    ///
    /// let matches = parse("foo.id").unwrap().find_with(&doc, &options).unwrap();
    /// assert_eq!(matches[0].value(), &Value::String("foo".to_string()));
    /// ```
    pub fn find_with<'a>(
        &self,
        document: &'a Value,
        options: &EvalOptions,
    ) -> Result<Vec<Match<'a>>, EvalError> {
        let mut evaluator = Evaluator::new(document, options);
        let found = evaluator.eval(self, 0)?;
        Ok(found.into_iter().map(|id| evaluator.reify(id)).collect())
    }
}

type DatumId = usize;

/// One datum in the evaluation arena: a value plus its provenance.
struct Datum<'a> {
    value: Cow<'a, Value>,
    segment: PathSegment,
    parent: Option<DatumId>,
    /// Synthetic auto-id datums never have children.
    synthetic: bool,
}

/// Tree-walking interpreter over an arena of datums.
///
/// The arena only grows during one evaluation and is discarded with it;
/// parent links are plain indices, so ancestry walks never fight the
/// borrow checker.
struct Evaluator<'a> {
    arena: Vec<Datum<'a>>,
    auto_id: Option<String>,
}

impl<'a> Evaluator<'a> {
    fn new(document: &'a Value, options: &EvalOptions) -> Self {
        let root = Datum {
            value: Cow::Borrowed(document),
            segment: PathSegment::This,
            parent: None,
            synthetic: false,
        };
        Evaluator {
            arena: vec![root],
            auto_id: options.auto_id_field.clone(),
        }
    }

    fn push(
        &mut self,
        value: Cow<'a, Value>,
        segment: PathSegment,
        parent: Option<DatumId>,
    ) -> DatumId {
        self.arena.push(Datum {
            value,
            segment,
            parent,
            synthetic: false,
        });
        self.arena.len() - 1
    }

    /// The borrowed document node behind a datum, if it is one. Computed
    /// (owned) values are scalars and have no children to walk.
    fn borrowed(&self, id: DatumId) -> Option<&'a Value> {
        match &self.arena[id].value {
            Cow::Borrowed(value) => Some(*value),
            Cow::Owned(_) => None,
        }
    }

    fn reify(&self, id: DatumId) -> Match<'a> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            segments.push(self.arena[c].segment.clone());
            current = self.arena[c].parent;
        }
        segments.reverse();
        Match {
            value: self.arena[id].value.clone(),
            path: Path::new(segments),
        }
    }

    fn eval(&mut self, expr: &PathExpr, input: DatumId) -> Result<Vec<DatumId>, EvalError> {
        match expr {
            PathExpr::Root => self.eval_root(input),
            PathExpr::This => Ok(vec![input]),
            PathExpr::Parent => Ok(self.arena[input].parent.into_iter().collect()),
            PathExpr::Fields(names) => Ok(self.eval_fields(names, input)),
            PathExpr::Wildcard => Ok(self.eval_wildcard(input)),
            PathExpr::Index(index) => Ok(self.eval_index(*index, input)),
            PathExpr::Slice { start, end, step } => {
                Ok(self.eval_slice(*start, *end, *step, input))
            }
            PathExpr::Child(left, right) => self.eval_child(left, right, input),
            PathExpr::Descendants(left, right) => self.eval_descendants(left, right, input),
            PathExpr::Union(branches) => self.eval_union(branches, input),
            PathExpr::Where(predicate) => self.eval_where(predicate, input),
            PathExpr::Sort(keys) => Ok(self.eval_sort(keys, input)),
            PathExpr::Func(function) => self.eval_func(function, input),
        }
    }

    /// `$` - climb to the chain root and restart there.
    fn eval_root(&mut self, input: DatumId) -> Result<Vec<DatumId>, EvalError> {
        let mut id = input;
        while let Some(parent) = self.arena[id].parent {
            id = parent;
        }
        let value = self.arena[id].value.clone();
        Ok(vec![self.push(value, PathSegment::Root, None)])
    }

    /// Named field lookup. The auto-id name resolves first and always
    /// synthesizes, whether or not a real key shadows it.
    fn eval_fields(&mut self, names: &[String], input: DatumId) -> Vec<DatumId> {
        let mut results = Vec::new();
        for name in names {
            if self.auto_id.as_deref() == Some(name.as_str()) {
                results.push(self.push_auto_id(input, name));
                continue;
            }
            match self.borrowed(input) {
                Some(Value::Object(map)) => {
                    if let Some(child) = map.get(name) {
                        results.push(self.push(
                            Cow::Borrowed(child),
                            PathSegment::Field(name.clone()),
                            Some(input),
                        ));
                    }
                }
                Some(Value::Array(items)) => {
                    // Numeric names act as indices.
                    if let Ok(index) = name.parse::<i64>()
                        && let Some((i, child)) = array_get(items, index)
                    {
                        results.push(self.push(
                            Cow::Borrowed(child),
                            PathSegment::Index(i),
                            Some(input),
                        ));
                    }
                }
                _ => {}
            }
        }
        results
    }

    /// A synthetic datum carrying the input's id-pseudopath string.
    fn push_auto_id(&mut self, input: DatumId, name: &str) -> DatumId {
        let value = Value::String(self.pseudopath(input, name));
        self.arena.push(Datum {
            value: Cow::Owned(value),
            segment: PathSegment::Field(name.to_string()),
            parent: Some(input),
            synthetic: true,
        });
        self.arena.len() - 1
    }

    /// The ancestry path of a datum, except that any object along the
    /// chain holding a real auto-id key contributes that id's string form
    /// in place of its own segment.
    fn pseudopath(&self, id: DatumId, auto_name: &str) -> String {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            chain.push(c);
            current = self.arena[c].parent;
        }
        chain.reverse();

        let segments = chain
            .into_iter()
            .map(|c| {
                let datum = &self.arena[c];
                let shadowed = match datum.value.as_ref() {
                    Value::Object(map) => map
                        .get(auto_name)
                        .filter(|v| v.is_scalar())
                        .map(|v| PathSegment::Field(v.as_string())),
                    _ => None,
                };
                shadowed.unwrap_or_else(|| datum.segment.clone())
            })
            .collect();
        Path::new(segments).to_string()
    }

    /// `*` - every member, plus the synthetic auto-id member when
    /// configured. Scalars have no members at all.
    fn eval_wildcard(&mut self, input: DatumId) -> Vec<DatumId> {
        let mut results = Vec::new();
        match self.borrowed(input) {
            Some(Value::Object(map)) => {
                for (key, child) in map {
                    results.push(self.push(
                        Cow::Borrowed(child),
                        PathSegment::Field(key.clone()),
                        Some(input),
                    ));
                }
            }
            Some(Value::Array(items)) => {
                for (i, child) in items.iter().enumerate() {
                    results.push(self.push(
                        Cow::Borrowed(child),
                        PathSegment::Index(i),
                        Some(input),
                    ));
                }
            }
            _ => return results,
        }
        if let Some(name) = self.auto_id.clone() {
            results.push(self.push_auto_id(input, &name));
        }
        results
    }

    fn eval_index(&mut self, index: i64, input: DatumId) -> Vec<DatumId> {
        let Some(Value::Array(items)) = self.borrowed(input) else {
            return Vec::new();
        };
        match array_get(items, index) {
            Some((i, child)) => {
                vec![self.push(Cow::Borrowed(child), PathSegment::Index(i), Some(input))]
            }
            None => Vec::new(),
        }
    }

    /// Python-style slice. Scalars and objects act as a one-element
    /// sequence, so `[*]` passes them through unchanged; null yields
    /// nothing.
    fn eval_slice(
        &mut self,
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
        input: DatumId,
    ) -> Vec<DatumId> {
        if matches!(self.arena[input].value.as_ref(), Value::Null) {
            return Vec::new();
        }
        let Some(Value::Array(items)) = self.borrowed(input) else {
            return vec![input];
        };
        slice_positions(items.len(), start, end, step)
            .into_iter()
            .map(|i| self.push(Cow::Borrowed(&items[i]), PathSegment::Index(i), Some(input)))
            .collect()
    }

    fn eval_child(
        &mut self,
        left: &PathExpr,
        right: &PathExpr,
        input: DatumId,
    ) -> Result<Vec<DatumId>, EvalError> {
        let mut results = Vec::new();
        for id in self.eval(left, input)? {
            if self.arena[id].synthetic {
                // auto-id datums have no children
                continue;
            }
            results.extend(self.eval(right, id)?);
        }
        Ok(results)
    }

    fn eval_descendants(
        &mut self,
        left: &PathExpr,
        right: &PathExpr,
        input: DatumId,
    ) -> Result<Vec<DatumId>, EvalError> {
        let mut results = Vec::new();
        for id in self.eval(left, input)? {
            if self.arena[id].synthetic {
                continue;
            }
            self.descend(right, id, &mut results)?;
        }
        Ok(results)
    }

    /// Match `expr` at this datum, then under every child, pre-order.
    fn descend(
        &mut self,
        expr: &PathExpr,
        id: DatumId,
        results: &mut Vec<DatumId>,
    ) -> Result<(), EvalError> {
        results.extend(self.eval(expr, id)?);
        let children: Vec<(PathSegment, &'a Value)> = match self.borrowed(id) {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| (PathSegment::Field(k.clone()), v))
                .collect(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (PathSegment::Index(i), v))
                .collect(),
            _ => Vec::new(),
        };
        for (segment, child) in children {
            let child_id = self.push(Cow::Borrowed(child), segment, Some(id));
            self.descend(expr, child_id, results)?;
        }
        Ok(())
    }

    fn eval_union(
        &mut self,
        branches: &[PathExpr],
        input: DatumId,
    ) -> Result<Vec<DatumId>, EvalError> {
        let mut results = Vec::new();
        for branch in branches {
            results.extend(self.eval(branch, input)?);
        }
        Ok(results)
    }

    /// `[?...]` - keep the members for which the predicate holds.
    fn eval_where(
        &mut self,
        predicate: &Predicate,
        input: DatumId,
    ) -> Result<Vec<DatumId>, EvalError> {
        let members: Vec<(PathSegment, &'a Value)> = match self.borrowed(input) {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (PathSegment::Index(i), v))
                .collect(),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| (PathSegment::Field(k.clone()), v))
                .collect(),
            _ => return Ok(Vec::new()),
        };
        let mut results = Vec::new();
        for (segment, child) in members {
            let id = self.push(Cow::Borrowed(child), segment, Some(input));
            if self.matches(predicate, id) {
                results.push(id);
            }
        }
        Ok(results)
    }

    /// A failing predicate, including one that errors inside its own
    /// path, only excludes its element.
    fn matches(&mut self, predicate: &Predicate, id: DatumId) -> bool {
        match predicate {
            Predicate::Exists(path) => self
                .eval(path, id)
                .map(|found| !found.is_empty())
                .unwrap_or(false),
            Predicate::Compare(path, op, literal) => {
                let found = match self.eval(path, id) {
                    Ok(found) => found,
                    Err(_) => return false,
                };
                found
                    .iter()
                    .any(|&m| compare_literal(self.arena[m].value.as_ref(), *op, literal))
            }
            Predicate::And(left, right) => self.matches(left, id) && self.matches(right, id),
        }
    }

    /// `[/key,\key]` - stable multi-key sort of array elements. Anything
    /// that is not an array passes through unchanged.
    fn eval_sort(&mut self, keys: &[SortKey], input: DatumId) -> Vec<DatumId> {
        let Some(Value::Array(items)) = self.borrowed(input) else {
            return vec![input];
        };
        let mut decorated: Vec<(usize, &'a Value)> = items.iter().enumerate().collect();
        decorated.sort_by(|(_, a), (_, b)| sort_ordering(keys, a, b));
        decorated
            .into_iter()
            .map(|(i, v)| self.push(Cow::Borrowed(v), PathSegment::Index(i), Some(input)))
            .collect()
    }

    fn eval_func(&mut self, function: &Function, input: DatumId) -> Result<Vec<DatumId>, EvalError> {
        match function {
            Function::Len => self.eval_len(input),
            Function::Sorted => Ok(self.eval_sorted(input)),
            Function::Str => Ok(self.eval_str(input)),
            Function::Split {
                sep,
                segment,
                max_split,
            } => Ok(self.eval_split(*sep, *segment, *max_split, input)),
            Function::Sub { regex, replacement } => Ok(self.eval_sub(regex, replacement, input)),
        }
    }

    /// `` `len` `` - the one evaluation-time error source.
    fn eval_len(&mut self, input: DatumId) -> Result<Vec<DatumId>, EvalError> {
        let count = match self.arena[input].value.as_ref() {
            Value::Object(map) => map.len() as i64,
            Value::Array(items) => items.len() as i64,
            Value::String(s) => s.chars().count() as i64,
            other => {
                return Err(EvalError::TypeError(format!(
                    "cannot take the length of {}",
                    type_name(other)
                )));
            }
        };
        Ok(vec![self.push(
            Cow::Owned(Value::Integer(count)),
            PathSegment::Operator("len"),
            None,
        )])
    }

    /// `` `sorted` `` - array elements reordered, or object keys in
    /// order; one datum per element.
    fn eval_sorted(&mut self, input: DatumId) -> Vec<DatumId> {
        match self.borrowed(input) {
            Some(Value::Array(items)) => {
                let mut decorated: Vec<(usize, &'a Value)> = items.iter().enumerate().collect();
                decorated.sort_by(|(_, a), (_, b)| compare_values(a, b));
                decorated
                    .into_iter()
                    .map(|(i, v)| self.push(Cow::Borrowed(v), PathSegment::Index(i), Some(input)))
                    .collect()
            }
            Some(Value::Object(map)) => {
                // BTreeMap keys are already ascending.
                let keys: Vec<&'a String> = map.keys().collect();
                keys.into_iter()
                    .map(|key| {
                        self.push(
                            Cow::Owned(Value::String(key.clone())),
                            PathSegment::Field(key.clone()),
                            Some(input),
                        )
                    })
                    .collect()
            }
            _ => vec![input],
        }
    }

    fn eval_str(&mut self, input: DatumId) -> Vec<DatumId> {
        let value = self.arena[input].value.as_ref();
        if !value.is_scalar() {
            return Vec::new();
        }
        let rendered = value.as_string();
        vec![self.push(
            Cow::Owned(Value::String(rendered)),
            PathSegment::Operator("str()"),
            None,
        )]
    }

    fn eval_split(&mut self, sep: char, segment: i64, max_split: i64, input: DatumId) -> Vec<DatumId> {
        let Value::String(s) = self.arena[input].value.as_ref() else {
            return Vec::new();
        };
        let pieces: Vec<&str> = if max_split < 0 {
            s.split(sep).collect()
        } else {
            s.splitn((max_split as usize).saturating_add(1), sep).collect()
        };
        let index = if segment < 0 {
            segment + pieces.len() as i64
        } else {
            segment
        };
        if index < 0 || index >= pieces.len() as i64 {
            return Vec::new();
        }
        let piece = pieces[index as usize].to_string();
        vec![self.push(
            Cow::Owned(Value::String(piece)),
            PathSegment::Operator("split"),
            None,
        )]
    }

    /// `` `sub` `` yields nothing when the substitution changes nothing.
    fn eval_sub(&mut self, regex: &Regex, replacement: &str, input: DatumId) -> Vec<DatumId> {
        let Value::String(s) = self.arena[input].value.as_ref() else {
            return Vec::new();
        };
        let replaced = regex.replace_all(s, replacement);
        if replaced.as_ref() == s.as_str() {
            return Vec::new();
        }
        let replaced = replaced.into_owned();
        vec![self.push(
            Cow::Owned(Value::String(replaced)),
            PathSegment::Operator("sub"),
            None,
        )]
    }
}

/// Resolve a possibly negative index into an array position.
fn array_get(items: &[Value], index: i64) -> Option<(usize, &Value)> {
    let len = items.len() as i64;
    let resolved = if index < 0 { index + len } else { index };
    if resolved < 0 || resolved >= len {
        return None;
    }
    let i = resolved as usize;
    Some((i, &items[i]))
}

/// Positions selected by a Python-style slice over `len` elements.
fn slice_positions(len: usize, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Vec<usize> {
    let len = len as i64;
    let step = step.unwrap_or(1);
    if step == 0 {
        return Vec::new();
    }
    let resolve = |bound: i64| if bound < 0 { bound + len } else { bound };
    let mut positions = Vec::new();
    if step > 0 {
        let start = resolve(start.unwrap_or(0)).clamp(0, len);
        let end = resolve(end.unwrap_or(len)).clamp(0, len);
        let mut i = start;
        while i < end {
            positions.push(i as usize);
            i += step;
        }
    } else {
        let start = resolve(start.unwrap_or(len - 1)).clamp(-1, len - 1);
        let end = end.map_or(-1, |e| resolve(e).clamp(-1, len - 1));
        let mut i = start;
        while i > end {
            positions.push(i as usize);
            i += step;
        }
    }
    positions
}

/// Filter comparison. Numbers compare numerically; a string value under a
/// numeric literal is coerced when it parses as a number; strings compare
/// lexically; everything else never matches.
fn compare_literal(value: &Value, op: CmpOp, literal: &Literal) -> bool {
    let ordering = match literal {
        Literal::Int(n) => numeric_ordering(value, &Value::Integer(*n)),
        Literal::Float(n) => numeric_ordering(value, &Value::Float(*n)),
        Literal::Str(s) => match value {
            Value::String(v) => Some(v.as_str().cmp(s.as_str())),
            _ => None,
        },
    };
    match ordering {
        Some(ordering) => cmp_op_holds(op, ordering),
        None => false,
    }
}

fn numeric_ordering(value: &Value, literal: &Value) -> Option<Ordering> {
    match value {
        Value::Integer(_) | Value::Float(_) => Some(compare_numbers(value, literal)),
        Value::String(s) => {
            if let Ok(n) = s.parse::<i64>() {
                Some(compare_numbers(&Value::Integer(n), literal))
            } else if let Ok(n) = s.parse::<f64>() {
                Some(compare_numbers(&Value::Float(n), literal))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn cmp_op_holds(op: CmpOp, ordering: Ordering) -> bool {
    match op {
        CmpOp::Equal => ordering == Ordering::Equal,
        CmpOp::NotEqual => ordering != Ordering::Equal,
        CmpOp::LessThan => ordering == Ordering::Less,
        CmpOp::GreaterThan => ordering == Ordering::Greater,
        CmpOp::LessEqual => ordering != Ordering::Greater,
        CmpOp::GreaterEqual => ordering != Ordering::Less,
    }
}

/// Exact ordering across integers and floats. Mixed comparisons promote
/// both sides to Decimal, falling back to f64 when a value will not fit.
fn compare_numbers(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Value::Integer(a), Value::Float(b)) => {
            if let Some(a_dec) = Decimal::from_i64(*a)
                && let Some(b_dec) = Decimal::from_f64(*b)
            {
                a_dec.cmp(&b_dec)
            } else {
                (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal)
            }
        }
        (Value::Float(a), Value::Integer(b)) => {
            if let Some(a_dec) = Decimal::from_f64(*a)
                && let Some(b_dec) = Decimal::from_i64(*b)
            {
                a_dec.cmp(&b_dec)
            } else {
                a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal)
            }
        }
        _ => Ordering::Equal,
    }
}

/// Total natural order over values: null < booleans < numbers < strings
/// < arrays < objects. Used by sorts and `` `sorted` ``.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        (
            Value::Integer(_) | Value::Float(_),
            Value::Integer(_) | Value::Float(_),
        ) => compare_numbers(a, b),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (xi, yi) in x.iter().zip(y) {
                let ord = compare_values(xi, yi);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => {
            for ((xk, xv), (yk, yv)) in x.iter().zip(y) {
                let ord = xk.cmp(yk);
                if ord != Ordering::Equal {
                    return ord;
                }
                let ord = compare_values(xv, yv);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Boolean(_) => 1,
        Value::Integer(_) | Value::Float(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Multi-key comparison for sort directives. Elements missing a key sort
/// after elements that have one, in both directions.
fn sort_ordering(keys: &[SortKey], a: &Value, b: &Value) -> Ordering {
    for key in keys {
        let ka = sort_key_value(key, a);
        let kb = sort_key_value(key, b);
        let ord = match (ka, kb) {
            (Some(ka), Some(kb)) => {
                let ord = compare_values(ka, kb);
                match key.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Walk a sort-key path into an element; a parenthesized group takes the
/// first alternative present.
fn sort_key_value<'v>(key: &SortKey, element: &'v Value) -> Option<&'v Value> {
    let mut current = element;
    for segment in &key.segments {
        let map = match current {
            Value::Object(map) => map,
            _ => return None,
        };
        current = match segment {
            SortSegment::Name(name) => map.get(name)?,
            SortSegment::Group(names) => names.iter().find_map(|name| map.get(name))?,
        };
    }
    Some(current)
}
