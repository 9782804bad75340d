//! Tokenizer for Coral source code
//!
//! Converts raw source text into a flat [`Token`] sequence consumed by the
//! parser. The sequence is produced eagerly: [`Lexer::tokenize`] either returns
//! every token of the file or the first [`LexError`].
//!
//! Scanning is word based. A run of characters that are neither whitespace nor
//! punctuation forms a lexeme, which is classified afterwards as a keyword,
//! literal, function declaration or plain identifier. A quote only opens a
//! string literal at the start of a token. Anything that is
//! not recognised degrades to an identifier; only an unterminated string and an
//! unparsable number are lexical errors.

use super::ast::SourceLocation;
use std::fmt;

/// Keyword that introduces a function declaration lexeme.
pub const FUNCTION_KEYWORD: &str = "function";

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    NumberLiteral,
    StringLiteral,
    BoolLiteral,

    // Identifiers
    Name,
    FunctionDecl,

    // Keywords
    Intrinsic,
    Linked,
    Number,
    String,
    Bool,
    Type,
    From,

    // Punctuation
    Semicolon,  // ;
    OpenBrace,  // {
    CloseBrace, // }
    OpenParen,  // (
    CloseParen, // )
    Comma,      // ,
    Period,     // .
    Equals,     // =
}

impl TokenKind {
    /// Keyword kind for an exact lexeme, if it is one.
    pub fn keyword(lexeme: &str) -> Option<TokenKind> {
        match lexeme {
            "intrinsic" => Some(TokenKind::Intrinsic),
            "linked" => Some(TokenKind::Linked),
            "bool" => Some(TokenKind::Bool),
            "string" => Some(TokenKind::String),
            "number" => Some(TokenKind::Number),
            "type" => Some(TokenKind::Type),
            "from" => Some(TokenKind::From),
            _ => None,
        }
    }

    /// Punctuation kind for a single character, if it is one.
    pub fn punctuation(ch: char) -> Option<TokenKind> {
        match ch {
            ';' => Some(TokenKind::Semicolon),
            '{' => Some(TokenKind::OpenBrace),
            '}' => Some(TokenKind::CloseBrace),
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            ',' => Some(TokenKind::Comma),
            '.' => Some(TokenKind::Period),
            '=' => Some(TokenKind::Equals),
            _ => None,
        }
    }

    pub fn is_primitive_type(self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::String | TokenKind::Bool)
    }

    pub fn is_punctuation(self) -> bool {
        matches!(
            self,
            TokenKind::Semicolon
                | TokenKind::OpenBrace
                | TokenKind::CloseBrace
                | TokenKind::OpenParen
                | TokenKind::CloseParen
                | TokenKind::Comma
                | TokenKind::Period
                | TokenKind::Equals
        )
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Intrinsic
                | TokenKind::Linked
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::Bool
                | TokenKind::Type
                | TokenKind::From
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::NumberLiteral => "number literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::BoolLiteral => "boolean literal",
            TokenKind::Name => "identifier",
            TokenKind::FunctionDecl => "function declaration",
            TokenKind::Intrinsic => "'intrinsic'",
            TokenKind::Linked => "'linked'",
            TokenKind::Number => "'number'",
            TokenKind::String => "'string'",
            TokenKind::Bool => "'bool'",
            TokenKind::Type => "'type'",
            TokenKind::From => "'from'",
            TokenKind::Semicolon => "';'",
            TokenKind::OpenBrace => "'{'",
            TokenKind::CloseBrace => "'}'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Period => "'.'",
            TokenKind::Equals => "'='",
        };
        f.write_str(text)
    }
}

/// Payload carried by literal, name and function-declaration tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// A classified unit of source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, location: SourceLocation) -> Self {
        Self { kind, value, location }
    }

    /// A token without payload (keywords and punctuation).
    pub fn bare(kind: TokenKind, location: SourceLocation) -> Self {
        Self::new(kind, TokenValue::None, location)
    }

    /// Text payload of names, string literals and function declarations.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Declared return type of a function-declaration token.
    ///
    /// `None` for a bare `function` lexeme and for every other kind.
    pub fn return_type(&self) -> Option<&str> {
        match (self.kind, &self.value) {
            (TokenKind::FunctionDecl, TokenValue::Text(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::NumberLiteral, TokenValue::Number(n)) => write!(f, "number literal {}", n),
            (TokenKind::StringLiteral, TokenValue::Text(s)) => write!(f, "string literal \"{}\"", s),
            (TokenKind::BoolLiteral, TokenValue::Bool(b)) => write!(f, "boolean literal {}", b),
            (TokenKind::Name, TokenValue::Text(s)) => write!(f, "identifier '{}'", s),
            (TokenKind::FunctionDecl, _) => match self.return_type() {
                Some(ret) => write!(f, "function declaration returning '{}'", ret),
                None => write!(f, "function declaration"),
            },
            (kind, _) => write!(f, "{}", kind),
        }
    }
}

/// Distinguishable lexical failures
#[derive(Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    UnterminatedStringLiteral,
    InvalidNumberLiteral(String),
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

impl LexError {
    pub fn message(&self) -> String {
        match &self.kind {
            LexErrorKind::UnterminatedStringLiteral => {
                "Reached end of file while parsing string literal".to_string()
            }
            LexErrorKind::InvalidNumberLiteral(text) => {
                format!("Invalid number literal: {}", text)
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line,
            self.location.column,
            self.message()
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for Coral source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_ignored();

            let Some(ch) = self.peek() else {
                break;
            };

            let token = if ch == '"' {
                self.string_literal()?
            } else {
                let loc = self.current_location();
                self.advance();
                self.punctuation_or_word(ch, loc)?
            };
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Parse string literal; contents are taken verbatim, no escapes
    fn string_literal(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        self.advance(); // opening quote
        let mut string = String::new();

        while let Some(ch) = self.advance() {
            if ch == '"' {
                return Ok(Token::new(TokenKind::StringLiteral, TokenValue::Text(string), loc));
            }
            string.push(ch);
        }

        Err(LexError {
            kind: LexErrorKind::UnterminatedStringLiteral,
            location: loc,
        })
    }

    /// `first` has already been consumed; `loc` is where it started.
    fn punctuation_or_word(&mut self, first: char, loc: SourceLocation) -> Result<Token, LexError> {
        if let Some(kind) = TokenKind::punctuation(first) {
            return Ok(Token::bare(kind, loc));
        }

        let mut lexeme = String::new();
        lexeme.push(first);
        while let Some(ch) = self.peek() {
            if ch == '.' && is_numeric_prefix(&lexeme) {
                lexeme.push(ch);
                self.advance();
            } else if is_ignored(ch) || TokenKind::punctuation(ch).is_some() {
                break;
            } else {
                lexeme.push(ch);
                self.advance();
            }
        }

        classify(lexeme, loc)
    }

    fn skip_ignored(&mut self) {
        while let Some(ch) = self.peek() {
            if !is_ignored(ch) {
                break;
            }
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

fn is_ignored(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '\t' | '\r')
}

/// True while a lexeme could still become a number literal.
fn is_numeric_prefix(lexeme: &str) -> bool {
    lexeme.starts_with(|c: char| c.is_ascii_digit())
        && lexeme.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn is_number_lexeme(lexeme: &str) -> bool {
    !lexeme.is_empty()
        && lexeme.chars().all(|c| c.is_ascii_digit() || c == '.')
        && lexeme.chars().filter(|&c| c == '.').count() <= 1
        && lexeme.chars().any(|c| c.is_ascii_digit())
}

/// Return type of a `function` or `function<T>` lexeme.
pub(crate) fn function_return_type(lexeme: &str) -> Option<&str> {
    let rest = lexeme.strip_prefix(FUNCTION_KEYWORD)?;
    if rest.is_empty() {
        return Some("");
    }
    let inner = rest.strip_prefix('<')?.strip_suffix('>')?;
    if inner.is_empty() || inner.contains(['<', '>']) {
        None
    } else {
        Some(inner)
    }
}

fn classify(lexeme: String, loc: SourceLocation) -> Result<Token, LexError> {
    if let Some(ret) = function_return_type(&lexeme) {
        let value = TokenValue::Text(ret.to_string());
        return Ok(Token::new(TokenKind::FunctionDecl, value, loc));
    }

    match lexeme.as_str() {
        "true" => return Ok(Token::new(TokenKind::BoolLiteral, TokenValue::Bool(true), loc)),
        "false" => return Ok(Token::new(TokenKind::BoolLiteral, TokenValue::Bool(false), loc)),
        _ => {}
    }

    if let Some(kind) = TokenKind::keyword(&lexeme) {
        return Ok(Token::bare(kind, loc));
    }

    if is_number_lexeme(&lexeme) {
        // Digits with at most one '.' always parse; InvalidNumberLiteral only
        // fires if is_number_lexeme is ever widened past what f64 accepts.
        let value = lexeme.parse::<f64>().map_err(|_| LexError {
            kind: LexErrorKind::InvalidNumberLiteral(lexeme.clone()),
            location: loc,
        })?;
        return Ok(Token::new(TokenKind::NumberLiteral, TokenValue::Number(value), loc));
    }

    Ok(Token::new(TokenKind::Name, TokenValue::Text(lexeme), loc))
}
