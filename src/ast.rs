//! # Sorrel Path Expressions - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for sorrel's
//! JSONPath-derived expression language: a compact language for locating,
//! filtering, and ordering values inside JSON documents.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[nodes]** - Path expression nodes (the closed `PathExpr` enum)
//! - **[operators]** - Comparison operators used inside filters
//! - **[filter]** - Filter predicates (existence, comparison, conjunction)
//! - **[sort]** - Sort directives (key paths, alternative groups, direction)
//!
//! ## Quick Start
//!
//! ```text
//! payload.metrics[?(@.name = 'cpu.frequency')].value
//! ```
//!
//! This expression descends into `payload.metrics`, keeps the elements whose
//! `name` field equals `cpu.frequency`, and returns their `value` fields.
//!
//! ## Core Concepts
//!
//! ### Precedence
//!
//! From loosest to tightest binding:
//!
//! ```text
//! union (,)  <  child (.)  <  descendants (..)  <  bracket suffixes  <  atoms
//! ```
//!
//! A bracket suffix (`[0]`, `[1:3]`, `[*]`, `[?pred]`, `[/key]`, `[a,b]`)
//! applies to the node it follows and desugars to a child step.
//!
//! ### Atoms
//!
//! - `$` - the document root
//! - `@` - the current value (used inside filters)
//! - `name` / `"quoted name"` - a field
//! - `*` - every member of an object or array
//! - `` `this` ``, `` `parent` ``, `` `len` ``, `` `sorted` ``,
//!   `` `str()` ``, `` `split(c, i, n)` ``, `` `sub(/re/, repl)` `` -
//!   named operators
//!
//! ### Filters
//!
//! ```text
//! objects[?cow]              existence
//! objects[?cow > 5]          comparison
//! objects[?cow > 5 & cat]    conjunction
//! ```
//!
//! The spellings `[?cow]`, `[?@.cow]`, and `[?(@.cow)]` are equivalent and
//! parse to the same predicate.
//!
//! ### Sorts
//!
//! ```text
//! objects[/cow]              ascending by cow
//! objects[\cat]              descending by cat
//! objects[/cow,\cat]         by cow, ties broken by cat descending
//! objects[/cat.(cow,bow)]    nested key with alternatives
//! ```
pub mod tokens;
pub mod nodes;
pub mod operators;
pub mod filter;
pub mod sort;

pub use tokens::Token;
pub use nodes::{Function, PathExpr};
pub use operators::CmpOp;
pub use filter::{Literal, Predicate};
pub use sort::{SortDirection, SortKey, SortSegment};
