use std::fmt;

use log::{debug, trace};

use crate::ast::{Literal, Pattern, Token};

/// Flags accepted after a regex literal.
const REGEX_FLAGS: &str = "gimsux";

/// Location in the query text, 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Offset in characters from the start of the input
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors raised while splitting a query into tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// Quote opened and never closed
    UnterminatedString(Position),

    /// Regex opened with `/` and never closed
    UnterminatedRegex(Position),

    /// Regex flag outside `gimsux`
    InvalidRegexFlag { flag: char, position: Position },

    /// `-` followed by something that is not a number
    InvalidNumber { text: String, position: Position },

    /// Character that starts no token
    UnexpectedChar { ch: char, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedString(position)
            | LexError::UnterminatedRegex(position)
            | LexError::InvalidRegexFlag { position, .. }
            | LexError::InvalidNumber { position, .. }
            | LexError::UnexpectedChar { position, .. } => *position,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedString(pos) => {
                write!(f, "Unterminated string literal starting at {}", pos)
            }
            LexError::UnterminatedRegex(pos) => {
                write!(f, "Unterminated regex literal starting at {}", pos)
            }
            LexError::InvalidRegexFlag { flag, position } => write!(
                f,
                "Invalid regex flag '{}' at {} (expected one of: {})",
                flag,
                position,
                REGEX_FLAGS
            ),
            LexError::InvalidNumber { text, position } => {
                write!(f, "Invalid number '{}' at {}", text, position)
            }
            LexError::UnexpectedChar { ch, position } => {
                write!(f, "Unexpected '{}' at {}", ch, position)?;
                match ch {
                    '=' => write!(f, " (did you mean '=='?)"),
                    '&' => write!(f, " (did you mean '&&'?)"),
                    '|' => write!(f, " (did you mean '||'?)"),
                    _ => Ok(()),
                }
            }
        }
    }
}

impl std::error::Error for LexError {}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'
}

/// Parse `digits` or `digits.digits`, with an optional leading `-`.
fn parse_number(text: &str) -> Option<Literal> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !fraction.is_none_or(all_digits) {
        return None;
    }

    match fraction {
        None => match text.parse::<i64>() {
            Ok(n) => Some(Literal::Integer(n)),
            // Out of i64 range
            Err(_) => parse_float(text),
        },
        Some(_) => parse_float(text),
    }
}

fn parse_float(text: &str) -> Option<Literal> {
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Literal::Float)
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
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

    fn position_at(&self, offset: usize) -> Position {
        let mut line = 1;
        let mut column = 1;
        for ch in &self.input[..offset.min(self.input.len())] {
            if *ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Position {
            offset,
            line,
            column,
        }
    }

    fn unexpected(&self, ch: char) -> LexError {
        LexError::UnexpectedChar {
            ch,
            position: self.position_at(self.position),
        }
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

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if is_identifier_char(ch) {
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
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance(); // Consume backslash
                    match self.current_char() {
                        Some(escaped) => result.push(escaped),
                        None => break,
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString(self.position_at(start)))
    }

    fn read_regex(&mut self) -> Result<Pattern, LexError> {
        let start = self.position;
        let mut source = String::new();
        self.advance(); // Consume opening slash

        loop {
            match self.current_char() {
                None => return Err(LexError::UnterminatedRegex(self.position_at(start))),
                Some('/') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.current_char() {
                        Some('/') => source.push('/'),
                        // Other escapes belong to the regex engine
                        Some(escaped) => {
                            source.push('\\');
                            source.push(escaped);
                        }
                        None => return Err(LexError::UnterminatedRegex(self.position_at(start))),
                    }
                    self.advance();
                }
                Some(ch) => {
                    source.push(ch);
                    self.advance();
                }
            }
        }

        let mut flags = String::new();
        while let Some(ch) = self.current_char() {
            if !ch.is_ascii_alphabetic() {
                break;
            }
            if !REGEX_FLAGS.contains(ch) {
                return Err(LexError::InvalidRegexFlag {
                    flag: ch,
                    position: self.position_at(self.position),
                });
            }
            flags.push(ch);
            self.advance();
        }

        Ok(Pattern { source, flags })
    }

    fn read_negative_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        self.advance(); // Consume '-'
        let text = format!("-{}", self.read_identifier());
        match parse_number(&text) {
            Some(lit) => Ok(Token::Literal(lit)),
            None => Err(LexError::InvalidNumber {
                text,
                position: self.position_at(start),
            }),
        }
    }

    /// `not` directly followed by `-in` and a word boundary
    fn at_not_in_suffix(&self) -> bool {
        self.current_char() == Some('-')
            && self.peek_char(1).is_some_and(|c| c.eq_ignore_ascii_case(&'i'))
            && self.peek_char(2).is_some_and(|c| c.eq_ignore_ascii_case(&'n'))
            && !self.peek_char(3).is_some_and(is_identifier_char)
    }

    fn read_word(&mut self) -> Token {
        let word = self.read_identifier();

        if let Some(number) = parse_number(&word) {
            return Token::Literal(number);
        }

        match word.to_ascii_lowercase().as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            "not" if self.at_not_in_suffix() => {
                self.position += 3;
                Token::Operator("not-in".to_string())
            }
            "not" => Token::Not,
            "in" => Token::Operator("in".to_string()),
            "true" => Token::Literal(Literal::Boolean(true)),
            "false" => Token::Literal(Literal::Boolean(false)),
            "null" => Token::Literal(Literal::Null),
            _ => Token::Identifier(word),
        }
    }

    /// Read the next token, `Ok(None)` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '(' => {
                self.advance();
                Token::LParen
            }
            ')' => {
                self.advance();
                Token::RParen
            }
            '[' => {
                self.advance();
                Token::LBracket
            }
            ']' => {
                self.advance();
                Token::RBracket
            }
            ',' => {
                self.advance();
                Token::Comma
            }
            '~' => {
                self.advance();
                Token::Operator("~".to_string())
            }
            '=' => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::Operator("==".to_string())
                } else {
                    return Err(self.unexpected(ch));
                }
            }
            '!' => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::Operator("!=".to_string())
                } else {
                    self.advance();
                    Token::Not
                }
            }
            '<' | '>' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::Operator(format!("{}=", ch))
                } else {
                    Token::Operator(ch.to_string())
                }
            }
            '&' | '|' => {
                if self.peek_char(1) != Some(ch) {
                    return Err(self.unexpected(ch));
                }
                self.advance();
                self.advance();
                if ch == '&' { Token::And } else { Token::Or }
            }
            '"' | '\'' => Token::Literal(Literal::String(self.read_string(ch)?)),
            '/' => Token::Literal(Literal::Regex(self.read_regex()?)),
            '-' if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_negative_number()?
            }
            c if is_identifier_char(c) => self.read_word(),
            c => return Err(self.unexpected(c)),
        };

        trace!("token {:?}", token);
        Ok(Some(token))
    }

    /// Consume the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        debug!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }
}

/// Split a query into tokens.
///
/// # Examples
///
/// ```
/// use filterql::{tokenize, Token};
///
/// let tokens = tokenize("age >= 18").unwrap();
/// assert_eq!(tokens[0], Token::Identifier("age".to_string()));
/// assert_eq!(tokens[1], Token::Operator(">=".to_string()));
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(text).tokenize()
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("and OR Not in NOT-IN true False null");
    assert_eq!(lexer.next_token().unwrap(), Some(Token::And));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::Or));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::Not));
    assert_eq!(
        lexer.next_token().unwrap(),
        Some(Token::Operator("in".to_string()))
    );
    assert_eq!(
        lexer.next_token().unwrap(),
        Some(Token::Operator("not-in".to_string()))
    );
    assert_eq!(
        lexer.next_token().unwrap(),
        Some(Token::Literal(Literal::Boolean(true)))
    );
    assert_eq!(
        lexer.next_token().unwrap(),
        Some(Token::Literal(Literal::Boolean(false)))
    );
    assert_eq!(lexer.next_token().unwrap(), Some(Token::Literal(Literal::Null)));
    assert_eq!(lexer.next_token().unwrap(), None);
}

#[test]
fn test_parse_number() {
    assert_eq!(parse_number("8"), Some(Literal::Integer(8)));
    assert_eq!(parse_number("-6.2"), Some(Literal::Float(-6.2)));
    assert_eq!(parse_number("1."), None);
    assert_eq!(parse_number(".5"), None);
    assert_eq!(parse_number("1.2.3"), None);
    assert_eq!(parse_number("2fa"), None);
    // Too large even for f64
    assert_eq!(parse_number(&"9".repeat(400)), None);
}

#[test]
fn test_position_tracks_lines() {
    let err = tokenize("a == 1 and\nb == 'open").unwrap_err();
    let pos = err.position();
    assert_eq!(pos.line, 2);
    assert_eq!(pos.column, 6);
    assert_eq!(pos.offset, 16);
}
