//! Execute path expressions against JSON input

use super::{json_to_value, value_to_json, CliError};
use crate::{parse, EvalOptions};

/// Options for the find operation
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// The path expression to evaluate
    pub expression: String,
    /// JSON input string
    pub input: Option<String>,
    /// Field name that resolves to an element's path string
    pub auto_id_field: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a find operation
#[derive(Debug)]
pub enum FindResult {
    /// Syntax validation passed
    SyntaxValid,
    /// The expression evaluated successfully
    Matches(Vec<FoundMatch>),
}

/// One match, converted back to JSON for output
#[derive(Debug)]
pub struct FoundMatch {
    pub value: serde_json::Value,
    pub path: String,
}

/// Parse an expression and evaluate it against the JSON input
pub fn execute_find(options: &FindOptions) -> Result<FindResult, CliError> {
    let expr = parse(&options.expression).map_err(CliError::Parse)?;

    if options.syntax_only {
        return Ok(FindResult::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let json_value: serde_json::Value =
        serde_json::from_str(json_str).map_err(CliError::Json)?;

    let document = json_to_value(json_value);
    let eval_options = EvalOptions {
        auto_id_field: options.auto_id_field.clone(),
    };

    let found = expr
        .find_with(&document, &eval_options)
        .map_err(CliError::Eval)?;

    let matches = found
        .into_iter()
        .map(|m| FoundMatch {
            path: m.path().to_string(),
            value: value_to_json(m.into_value()),
        })
        .collect();
    Ok(FindResult::Matches(matches))
}
