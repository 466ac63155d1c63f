use std::fmt;
use std::mem;

use regex::Regex;

use crate::{
    ast::{
        CmpOp, Function, Literal, PathExpr, Predicate, SortDirection, SortKey, SortSegment, Token,
    },
    lexer::{LexError, Lexer, Position},
};

/// Grammar violation found while turning tokens into an AST.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The lexer rejected the raw text
    Lex(LexError),
    /// A token that cannot appear here
    UnexpectedToken { found: Token, position: Position },
    /// The expression stopped short
    UnexpectedEnd { position: Position },
    /// A specific token was required
    ExpectedToken {
        expected: &'static str,
        found: Token,
        position: Position,
    },
    /// A `[` with no closing `]`
    UnmatchedBracket { position: Position },
    /// `[]` selects nothing
    EmptyBrackets { position: Position },
    /// `[?]` with no condition
    EmptyFilter { position: Position },
    /// A sort entry that is not `/key` or `\key`
    InvalidSortKey { position: Position },
    /// A backtick name the grammar does not know
    UnknownOperator { name: String, position: Position },
    /// A known backtick operator with malformed arguments
    InvalidOperator {
        text: String,
        reason: String,
        position: Position,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => write!(f, "{}", err),
            ParseError::UnexpectedToken { found, position } => {
                write!(f, "Unexpected token {:?} at position {}", found, position)
            }
            ParseError::UnexpectedEnd { position } => {
                write!(f, "Unexpected end of expression at position {}", position)
            }
            ParseError::ExpectedToken {
                expected,
                found,
                position,
            } => {
                write!(
                    f,
                    "Expected {}, got {:?} at position {}",
                    expected, found, position
                )
            }
            ParseError::UnmatchedBracket { position } => {
                write!(f, "Unmatched '[' at position {}", position)
            }
            ParseError::EmptyBrackets { position } => {
                write!(f, "Empty brackets at position {}", position)
            }
            ParseError::EmptyFilter { position } => {
                write!(f, "Empty filter at position {}", position)
            }
            ParseError::InvalidSortKey { position } => {
                write!(f, "Invalid sort key at position {}", position)
            }
            ParseError::UnknownOperator { name, position } => {
                write!(f, "Unknown named operator `{}` at position {}", name, position)
            }
            ParseError::InvalidOperator {
                text,
                reason,
                position,
            } => {
                write!(
                    f,
                    "Invalid named operator `{}` at position {}: {}",
                    text, position, reason
                )
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

/// Parse an expression into its AST.
///
/// This is the one parsing entry point; the returned [`PathExpr`] is
/// immutable and may be evaluated against any number of documents.
///
/// # Examples
///
/// ```
/// use sorrel::parse;
///
/// let expr = parse("payload.metrics[?(@.name = 'cpu.frequency')].value").unwrap();
/// ```
pub fn parse(input: &str) -> Result<PathExpr, ParseError> {
    let mut parser = Parser::new(Lexer::new(input))?;
    parser.parse()
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    /// Parse one complete expression; trailing tokens are an error.
    pub fn parse(&mut self) -> Result<PathExpr, ParseError> {
        let expr = self.parse_union()?;
        if self.current_token != Token::Eof {
            return Err(self.unexpected());
        }
        Ok(expr)
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    /// Take ownership of the current token and move past it.
    fn take(&mut self) -> Result<Token, ParseError> {
        let token = mem::replace(&mut self.current_token, Token::Eof);
        self.advance()?;
        Ok(token)
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token, label: &'static str) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(ParseError::ExpectedToken {
                expected: label,
                found: self.current_token.clone(),
                position: self.position(),
            });
        }
        self.advance()
    }

    fn position(&self) -> Position {
        self.lexer.token_start()
    }

    fn unexpected(&self) -> ParseError {
        if self.current_token == Token::Eof {
            ParseError::UnexpectedEnd {
                position: self.position(),
            }
        } else {
            ParseError::UnexpectedToken {
                found: self.current_token.clone(),
                position: self.position(),
            }
        }
    }

    /// Lowest precedence: comma-joined union branches.
    fn parse_union(&mut self) -> Result<PathExpr, ParseError> {
        let first = self.parse_path()?;
        if !self.check(&Token::Comma) {
            return Ok(first);
        }
        let mut branches = vec![first];
        while self.check(&Token::Comma) {
            self.advance()?;
            branches.push(self.parse_path()?);
        }
        Ok(PathExpr::Union(branches))
    }

    /// Dot-joined child steps, left-associative.
    fn parse_path(&mut self) -> Result<PathExpr, ParseError> {
        let mut left = self.parse_descendants()?;
        while self.check(&Token::Dot) {
            self.advance()?;
            let right = self.parse_descendants()?;
            left = PathExpr::child(left, right);
        }
        Ok(left)
    }

    /// `..` binds tighter than `.`.
    fn parse_descendants(&mut self) -> Result<PathExpr, ParseError> {
        let mut left = self.parse_postfix()?;
        while self.check(&Token::DotDot) {
            self.advance()?;
            let right = self.parse_postfix()?;
            left = PathExpr::Descendants(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    /// An atom followed by any number of bracket suffixes. A leading
    /// bracket applies to the current datum.
    fn parse_postfix(&mut self) -> Result<PathExpr, ParseError> {
        let mut expr = if self.check(&Token::LBracket) {
            self.parse_bracket()?
        } else {
            self.parse_atom()?
        };
        while self.check(&Token::LBracket) {
            let suffix = self.parse_bracket()?;
            expr = PathExpr::child(expr, suffix);
        }
        Ok(expr)
    }

    /// Atoms: `$`, `@`, field names, `*`, named operators, parens.
    fn parse_atom(&mut self) -> Result<PathExpr, ParseError> {
        let position = self.position();
        match self.take()? {
            Token::Dollar => Ok(PathExpr::Root),
            Token::At => Ok(PathExpr::This),
            Token::Star => Ok(PathExpr::Wildcard),
            Token::Identifier(name) => Ok(PathExpr::Fields(vec![name])),
            Token::String(name) => Ok(PathExpr::Fields(vec![name])),
            Token::Named(name) => self.named_operator(&name, position),
            Token::LParen => {
                let expr = self.parse_union()?;
                self.expect(Token::RParen, "')'")?;
                Ok(expr)
            }
            Token::Eof => Err(ParseError::UnexpectedEnd { position }),
            token => Err(ParseError::UnexpectedToken {
                found: token,
                position,
            }),
        }
    }

    fn named_operator(&mut self, name: &str, position: Position) -> Result<PathExpr, ParseError> {
        let name = name.trim();
        match name {
            "this" => Ok(PathExpr::This),
            "parent" => Ok(PathExpr::Parent),
            "len" => Ok(PathExpr::Func(Function::Len)),
            "sorted" => Ok(PathExpr::Func(Function::Sorted)),
            "str()" => Ok(PathExpr::Func(Function::Str)),
            _ if name.starts_with("split(") => Self::parse_split(name, position),
            _ if name.starts_with("sub(") => Self::parse_sub(name, position),
            _ => Err(ParseError::UnknownOperator {
                name: name.to_string(),
                position,
            }),
        }
    }

    /// `split(char, segment, max_split)` - the separator is exactly one
    /// character, the two numbers may be negative.
    fn parse_split(text: &str, position: Position) -> Result<PathExpr, ParseError> {
        let invalid = |reason: &str| ParseError::InvalidOperator {
            text: text.to_string(),
            reason: reason.to_string(),
            position,
        };
        let shape = Regex::new(r"^split\((.), ?(-?\d+), ?(-?\d+)\)$")
            .map_err(|e| invalid(&e.to_string()))?;
        let caps = shape
            .captures(text)
            .ok_or_else(|| invalid("expected split(char, segment, max_split)"))?;
        let sep = caps[1]
            .chars()
            .next()
            .ok_or_else(|| invalid("missing separator"))?;
        let segment = caps[2]
            .parse::<i64>()
            .map_err(|_| invalid("segment out of range"))?;
        let max_split = caps[3]
            .parse::<i64>()
            .map_err(|_| invalid("max_split out of range"))?;
        Ok(PathExpr::Func(Function::Split {
            sep,
            segment,
            max_split,
        }))
    }

    /// `sub(/regex/, replacement)` - the pattern compiles at parse time.
    fn parse_sub(text: &str, position: Position) -> Result<PathExpr, ParseError> {
        let invalid = |reason: &str| ParseError::InvalidOperator {
            text: text.to_string(),
            reason: reason.to_string(),
            position,
        };
        let shape =
            Regex::new(r"^sub\(/(.*)/, ?(.*)\)$").map_err(|e| invalid(&e.to_string()))?;
        let caps = shape
            .captures(text)
            .ok_or_else(|| invalid("expected sub(/regex/, replacement)"))?;
        let regex = Regex::new(caps[1].trim()).map_err(|e| invalid(&e.to_string()))?;
        let replacement = caps[2].trim().to_string();
        Ok(PathExpr::Func(Function::Sub { regex, replacement }))
    }

    /// One bracket suffix; dispatches on the first token inside.
    fn parse_bracket(&mut self) -> Result<PathExpr, ParseError> {
        let open = self.position();
        self.advance()?; // consume '['
        let expr = match &self.current_token {
            Token::RBracket => {
                return Err(ParseError::EmptyBrackets { position: open });
            }
            Token::Question => {
                self.advance()?;
                self.parse_filter(open)?
            }
            Token::Slash | Token::Backslash => self.parse_sort()?,
            Token::Star => {
                self.advance()?;
                PathExpr::Slice {
                    start: None,
                    end: None,
                    step: None,
                }
            }
            Token::Integer(_) | Token::Colon => self.parse_index_or_slice()?,
            Token::Identifier(_) | Token::String(_) => self.parse_fields()?,
            _ => return Err(self.unexpected()),
        };
        self.close_bracket(open)?;
        Ok(expr)
    }

    fn close_bracket(&mut self, open: Position) -> Result<(), ParseError> {
        if !self.check(&Token::RBracket) {
            return Err(ParseError::UnmatchedBracket { position: open });
        }
        self.advance()
    }

    /// `[n]`, `[a:b]`, `[a:]`, `[:b]`, `[a:b:c]`.
    fn parse_index_or_slice(&mut self) -> Result<PathExpr, ParseError> {
        let start = if let Token::Integer(n) = self.current_token {
            self.advance()?;
            Some(n)
        } else {
            None
        };
        if !self.check(&Token::Colon) {
            return match start {
                Some(n) => Ok(PathExpr::Index(n)),
                None => Err(self.unexpected()),
            };
        }
        self.advance()?; // ':'
        let end = if let Token::Integer(n) = self.current_token {
            self.advance()?;
            Some(n)
        } else {
            None
        };
        let step = if self.check(&Token::Colon) {
            self.advance()?;
            if let Token::Integer(n) = self.current_token {
                self.advance()?;
                Some(n)
            } else {
                None
            }
        } else {
            None
        };
        Ok(PathExpr::Slice { start, end, step })
    }

    /// `[name]`, `[name1,name2]`, `["quoted name"]`.
    fn parse_fields(&mut self) -> Result<PathExpr, ParseError> {
        let mut names = vec![self.field_name()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            names.push(self.field_name()?);
        }
        Ok(PathExpr::Fields(names))
    }

    fn field_name(&mut self) -> Result<String, ParseError> {
        let position = self.position();
        match self.take()? {
            Token::Identifier(name) | Token::String(name) => Ok(name),
            Token::Eof => Err(ParseError::UnexpectedEnd { position }),
            token => Err(ParseError::UnexpectedToken {
                found: token,
                position,
            }),
        }
    }

    /// `[/key,\key,...]` - a direction then a dotted key path per entry.
    fn parse_sort(&mut self) -> Result<PathExpr, ParseError> {
        let mut keys = vec![self.parse_sort_key()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            keys.push(self.parse_sort_key()?);
        }
        Ok(PathExpr::Sort(keys))
    }

    fn parse_sort_key(&mut self) -> Result<SortKey, ParseError> {
        let direction = match self.current_token {
            Token::Slash => SortDirection::Ascending,
            Token::Backslash => SortDirection::Descending,
            _ => {
                return Err(ParseError::InvalidSortKey {
                    position: self.position(),
                });
            }
        };
        self.advance()?;
        let mut segments = vec![self.parse_sort_segment()?];
        while self.check(&Token::Dot) {
            self.advance()?;
            segments.push(self.parse_sort_segment()?);
        }
        Ok(SortKey {
            segments,
            direction,
        })
    }

    fn parse_sort_segment(&mut self) -> Result<SortSegment, ParseError> {
        let position = self.position();
        match self.take()? {
            Token::Identifier(name) | Token::String(name) => Ok(SortSegment::Name(name)),
            Token::LParen => {
                let mut names = Vec::new();
                loop {
                    let position = self.position();
                    match self.take()? {
                        Token::Identifier(name) | Token::String(name) => names.push(name),
                        _ => return Err(ParseError::InvalidSortKey { position }),
                    }
                    if self.check(&Token::Comma) {
                        self.advance()?;
                    } else {
                        break;
                    }
                }
                if !self.check(&Token::RParen) {
                    return Err(ParseError::InvalidSortKey {
                        position: self.position(),
                    });
                }
                self.advance()?;
                Ok(SortSegment::Group(names))
            }
            _ => Err(ParseError::InvalidSortKey { position }),
        }
    }

    /// `[?...]` - an `&`-joined conjunction of conditions.
    fn parse_filter(&mut self, open: Position) -> Result<PathExpr, ParseError> {
        if self.check(&Token::RBracket) {
            return Err(ParseError::EmptyFilter { position: open });
        }
        let predicate = self.parse_predicate()?;
        Ok(PathExpr::Where(predicate))
    }

    fn parse_predicate(&mut self) -> Result<Predicate, ParseError> {
        let mut left = self.parse_condition()?;
        while self.check(&Token::Amp) {
            self.advance()?;
            let right = self.parse_condition()?;
            left = Predicate::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    /// A single condition: a bare operand path (existence) or a
    /// comparison against a literal. Parens group a nested conjunction.
    fn parse_condition(&mut self) -> Result<Predicate, ParseError> {
        if self.check(&Token::LParen) {
            self.advance()?;
            let predicate = self.parse_predicate()?;
            self.expect(Token::RParen, "')'")?;
            return Ok(predicate);
        }
        let path = self.parse_operand()?;
        let op = match self.current_token {
            Token::Eq => CmpOp::Equal,
            Token::NotEq => CmpOp::NotEqual,
            Token::Lt => CmpOp::LessThan,
            Token::Gt => CmpOp::GreaterThan,
            Token::LtEq => CmpOp::LessEqual,
            Token::GtEq => CmpOp::GreaterEqual,
            _ => return Ok(Predicate::Exists(Box::new(path))),
        };
        self.advance()?;
        let literal = self.parse_literal()?;
        Ok(Predicate::Compare(Box::new(path), op, literal))
    }

    /// Operand path inside a filter, relative to the element under test.
    /// A leading `@.` collapses, so `[?cow]`, `[?@.cow]`, and `[?(@.cow)]`
    /// all build the same predicate.
    fn parse_operand(&mut self) -> Result<PathExpr, ParseError> {
        let mut left = self.parse_operand_step()?;
        while self.check(&Token::Dot) {
            self.advance()?;
            let right = self.parse_operand_step()?;
            left = PathExpr::child(left, right);
        }
        Ok(left)
    }

    fn parse_operand_step(&mut self) -> Result<PathExpr, ParseError> {
        let mut expr = if self.check(&Token::LBracket) {
            self.parse_bracket()?
        } else {
            self.parse_operand_atom()?
        };
        while self.check(&Token::LBracket) {
            let suffix = self.parse_bracket()?;
            expr = PathExpr::child(expr, suffix);
        }
        Ok(expr)
    }

    fn parse_operand_atom(&mut self) -> Result<PathExpr, ParseError> {
        let position = self.position();
        match self.take()? {
            Token::At => Ok(PathExpr::This),
            Token::Dollar => Ok(PathExpr::Root),
            Token::Star => Ok(PathExpr::Wildcard),
            Token::Identifier(name) | Token::String(name) => Ok(PathExpr::Fields(vec![name])),
            Token::Named(name) => self.named_operator(&name, position),
            Token::Eof => Err(ParseError::UnexpectedEnd { position }),
            token => Err(ParseError::UnexpectedToken {
                found: token,
                position,
            }),
        }
    }

    /// Comparison literals: numbers, quoted strings, or bare words
    /// (which compare as strings).
    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        let position = self.position();
        match self.take()? {
            Token::Integer(n) => Ok(Literal::Int(n)),
            Token::Float(n) => Ok(Literal::Float(n)),
            Token::String(s) | Token::Identifier(s) => Ok(Literal::Str(s)),
            Token::Eof => Err(ParseError::UnexpectedEnd { position }),
            token => Err(ParseError::UnexpectedToken {
                found: token,
                position,
            }),
        }
    }
}
