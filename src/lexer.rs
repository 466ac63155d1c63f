use std::fmt;

use crate::ast::Token;

/// Character offset into the expression text.
pub type Position = usize;

/// Lexical error: the expression text contains something no token starts
/// with.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character no rule accepts
    UnexpectedChar { ch: char, position: Position },
    /// An identifier may not begin with a hyphen
    BadIdentifier { position: Position },
    /// A quoted string with no closing quote
    UnterminatedString { position: Position },
    /// A backtick name with no closing backtick
    UnterminatedName { position: Position },
    /// An unknown escape inside a quoted string
    InvalidEscape { ch: char, position: Position },
    /// A numeric literal that does not fit
    InvalidNumber { text: String, position: Position },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, position } => {
                write!(f, "Unexpected character '{}' at position {}", ch, position)
            }
            LexError::BadIdentifier { position } => {
                write!(
                    f,
                    "Identifier cannot begin with '-' at position {}",
                    position
                )
            }
            LexError::UnterminatedString { position } => {
                write!(
                    f,
                    "Unterminated string starting at position {}: missing closing quote",
                    position
                )
            }
            LexError::UnterminatedName { position } => {
                write!(
                    f,
                    "Unterminated named operator starting at position {}: missing closing backtick",
                    position
                )
            }
            LexError::InvalidEscape { ch, position } => {
                write!(f, "Invalid escape sequence '\\{}' at position {}", ch, position)
            }
            LexError::InvalidNumber { text, position } => {
                write!(f, "Invalid number '{}' at position {}", text, position)
            }
        }
    }
}

impl std::error::Error for LexError {}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    token_start: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            token_start: 0,
        }
    }

    /// Offset of the most recently returned token.
    pub fn token_start(&self) -> Position {
        self.token_start
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_identifier_start(ch: char) -> bool {
        ch.is_alphabetic() || ch == '_' || ch == '@'
    }

    fn is_identifier_char(ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == '@'
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if Self::is_identifier_char(ch) {
                result.push(ch);
                self.advance();
            } else if ch == '-' && self.peek_char(1).is_some_and(Self::is_identifier_char) {
                // A hyphen is part of the name only in the interior.
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance(); // consume backslash
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(LexError::InvalidEscape {
                                ch,
                                position: self.position,
                            });
                        }
                        None => return Err(LexError::UnterminatedString { position: start }),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    /// Backtick names keep their interior raw; operator arguments like
    /// `split(., 1, -1)` are picked apart by the parser.
    fn read_named(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // consume opening backtick

        while let Some(ch) = self.current_char() {
            if ch == '`' {
                self.advance();
                return Ok(result);
            }
            result.push(ch);
            self.advance();
        }

        Err(LexError::UnterminatedName { position: start })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut number = String::new();
        let mut is_float = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if is_float {
            match number.parse::<f64>() {
                Ok(n) => Ok(Token::Float(n)),
                Err(_) => Err(LexError::InvalidNumber {
                    text: number,
                    position: start,
                }),
            }
        } else {
            match number.parse::<i64>() {
                Ok(n) => Ok(Token::Integer(n)),
                Err(_) => Err(LexError::InvalidNumber {
                    text: number,
                    position: start,
                }),
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.position;

        match self.current_char() {
            None => Ok(Token::Eof),
            Some('$') => {
                self.advance();
                Ok(Token::Dollar)
            }
            Some('*') => {
                self.advance();
                Ok(Token::Star)
            }
            Some('.') => {
                if self.peek_char(1) == Some('.') {
                    self.advance();
                    self.advance();
                    Ok(Token::DotDot)
                } else {
                    self.advance();
                    Ok(Token::Dot)
                }
            }
            Some(',') => {
                self.advance();
                Ok(Token::Comma)
            }
            Some(':') => {
                self.advance();
                Ok(Token::Colon)
            }
            Some('?') => {
                self.advance();
                Ok(Token::Question)
            }
            Some('&') => {
                self.advance();
                Ok(Token::Amp)
            }
            Some('/') => {
                self.advance();
                Ok(Token::Slash)
            }
            Some('\\') => {
                self.advance();
                Ok(Token::Backslash)
            }
            Some('(') => {
                self.advance();
                Ok(Token::LParen)
            }
            Some(')') => {
                self.advance();
                Ok(Token::RParen)
            }
            Some('[') => {
                self.advance();
                Ok(Token::LBracket)
            }
            Some(']') => {
                self.advance();
                Ok(Token::RBracket)
            }
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                }
                self.advance();
                Ok(Token::Eq)
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::NotEq)
                } else {
                    Err(LexError::UnexpectedChar {
                        ch: '!',
                        position: self.position,
                    })
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::GtEq)
                } else {
                    self.advance();
                    Ok(Token::Gt)
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::LtEq)
                } else {
                    self.advance();
                    Ok(Token::Lt)
                }
            }
            Some('"') => Ok(Token::String(self.read_string('"')?)),
            Some('\'') => Ok(Token::String(self.read_string('\'')?)),
            Some('`') => Ok(Token::Named(self.read_named()?)),
            Some('@') => {
                if self.peek_char(1).is_some_and(Self::is_identifier_char) {
                    // `@foo` is a field name; a bare `@` is the current value.
                    Ok(Token::Identifier(self.read_identifier()))
                } else {
                    self.advance();
                    Ok(Token::At)
                }
            }
            Some('-') => {
                if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.read_number()
                } else if self.peek_char(1).is_some_and(Self::is_identifier_start) {
                    Err(LexError::BadIdentifier {
                        position: self.position,
                    })
                } else {
                    Err(LexError::UnexpectedChar {
                        ch: '-',
                        position: self.position,
                    })
                }
            }
            Some(ch) if Self::is_identifier_start(ch) => {
                Ok(Token::Identifier(self.read_identifier()))
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) => Err(LexError::UnexpectedChar {
                ch,
                position: self.position,
            }),
        }
    }
}

#[test]
fn test_path_tokens() {
    let mut lexer = Lexer::new("$.store..book[0]");
    assert_eq!(lexer.next_token().unwrap(), Token::Dollar);
    assert_eq!(lexer.next_token().unwrap(), Token::Dot);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("store".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::DotDot);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("book".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::LBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Integer(0));
    assert_eq!(lexer.next_token().unwrap(), Token::RBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_sort_and_filter_tokens() {
    let mut lexer = Lexer::new(r"[?cow>5&cat=2][/cow,\cat]");
    assert_eq!(lexer.next_token().unwrap(), Token::LBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Question);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("cow".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Gt);
    assert_eq!(lexer.next_token().unwrap(), Token::Integer(5));
    assert_eq!(lexer.next_token().unwrap(), Token::Amp);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("cat".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eq);
    assert_eq!(lexer.next_token().unwrap(), Token::Integer(2));
    assert_eq!(lexer.next_token().unwrap(), Token::RBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::LBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Slash);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("cow".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Comma);
    assert_eq!(lexer.next_token().unwrap(), Token::Backslash);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("cat".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::RBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}
