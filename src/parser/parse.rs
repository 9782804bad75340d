//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! error types, the [`TokenCursor`] shared with declaration handlers, and the
//! top-level dispatch loop.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, cursor, namespace bookkeeping, dispatch
//! - `declarations`: the `type` declaration sub-parser
//! - `handlers`: extension points for functions, member functions and globals
//!
//! Parser methods are split across files using `impl Parser` blocks, so each
//! module extends the Parser while sharing its state.

use crate::parser::ast::*;
use crate::parser::handlers::{DeclarationHandler, InertHandler};
use crate::parser::lexer::{Token, TokenKind, TokenValue};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// Distinguishable structural failures
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    ExpectedIdentifier,
    ExpectedOpenBrace,
    ExpectedSemicolon,
    DuplicateIdentifier(String),
    DuplicateField(String),
    UnknownType(String),
    UnexpectedEndOfInput,
}

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
    /// Description of the offending token, when there was one
    pub found: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: SourceLocation) -> Self {
        ParseError {
            kind,
            location,
            found: None,
        }
    }

    /// Error located at `token`, naming it in the message.
    pub fn at_token(kind: ParseErrorKind, token: &Token) -> Self {
        ParseError {
            kind,
            location: token.location,
            found: Some(token.to_string()),
        }
    }

    pub fn message(&self) -> String {
        let base = match &self.kind {
            ParseErrorKind::ExpectedIdentifier => "Expected identifier".to_string(),
            ParseErrorKind::ExpectedOpenBrace => "Expected '{'".to_string(),
            ParseErrorKind::ExpectedSemicolon => "Expected ';'".to_string(),
            ParseErrorKind::DuplicateIdentifier(name) => {
                format!("Identifier is already taken: {}", name)
            }
            ParseErrorKind::DuplicateField(name) => format!("Duplicate field: {}", name),
            ParseErrorKind::UnknownType(name) => format!("Unknown type: {}", name),
            ParseErrorKind::UnexpectedEndOfInput => {
                "Unexpectedly ran into end of file while parsing".to_string()
            }
        };
        match (&self.kind, &self.found) {
            (
                ParseErrorKind::ExpectedIdentifier
                | ParseErrorKind::ExpectedOpenBrace
                | ParseErrorKind::ExpectedSemicolon,
                Some(found),
            ) => format!("{}, found {}", base, found),
            _ => base,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line,
            self.location.column,
            self.message()
        )
    }
}

impl std::error::Error for ParseError {}

/// Read position over the token sequence.
///
/// The cursor only moves forward. Declaration handlers receive it mutably and
/// consume whatever tokens their declaration spans.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Current token without consuming it
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Token `n` places after the current one
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Most recently consumed token
    pub fn previous(&self) -> Option<&Token> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    /// Consume the current token, if any.
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    /// Consume the current token; running out of tokens is an error.
    pub fn consume(&mut self) -> Result<Token, ParseError> {
        let end = self.end_location();
        self.advance()
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnexpectedEndOfInput, end))
    }

    /// Consume a token of `kind`, failing with `error` otherwise.
    pub fn expect(&mut self, kind: TokenKind, error: ParseErrorKind) -> Result<Token, ParseError> {
        let token = self.consume()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ParseError::at_token(error, &token))
        }
    }

    /// Consume an identifier and return its name and location.
    pub fn expect_identifier(&mut self) -> Result<(String, SourceLocation), ParseError> {
        let token = self.expect(TokenKind::Name, ParseErrorKind::ExpectedIdentifier)?;
        match token.value {
            TokenValue::Text(name) => Ok((name, token.location)),
            _ => Err(ParseError::new(ParseErrorKind::ExpectedIdentifier, token.location)),
        }
    }

    /// Location of the last token, for end-of-input errors.
    fn end_location(&self) -> SourceLocation {
        self.tokens
            .last()
            .map(|t| t.location)
            .unwrap_or(SourceLocation::new(1, 1))
    }
}

/// Recursive descent parser for Coral declarations
pub struct Parser<H: DeclarationHandler = InertHandler> {
    pub(crate) cursor: TokenCursor,
    pub(crate) handler: H,
    pub(crate) info: ParseInfo,
    /// Every top-level name declared so far
    pub(crate) namespace: FxHashSet<String>,
    /// Type name -> index into `info.types`
    pub(crate) type_index: FxHashMap<String, usize>,
}

impl Parser<InertHandler> {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_handler(tokens, InertHandler)
    }
}

impl<H: DeclarationHandler> Parser<H> {
    pub fn with_handler(tokens: Vec<Token>, handler: H) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            handler,
            info: ParseInfo::new(),
            namespace: FxHashSet::default(),
            type_index: FxHashMap::default(),
        }
    }

    /// Parse every top-level declaration.
    ///
    /// A handler that consumes nothing makes the dispatcher skip the current
    /// token, so this always terminates.
    pub fn parse(mut self) -> Result<ParseInfo, ParseError> {
        while let Some(token) = self.cursor.peek() {
            let kind = token.kind;
            let location = token.location;
            let start = self.cursor.position();

            match kind {
                TokenKind::Type => self.parse_type_declaration()?,
                TokenKind::FunctionDecl => {
                    let mut staged = Vec::new();
                    self.handler.function(&mut self.cursor, &mut staged)?;
                    self.claim_identifiers(staged.iter().map(|f| f.name.as_str()), location)?;
                    self.info.functions.append(&mut staged);
                }
                _ => {
                    let mut staged = Vec::new();
                    self.handler.global_var(&mut self.cursor, &mut staged)?;
                    self.claim_identifiers(staged.iter().map(|g| g.name.as_str()), location)?;
                    self.info.global_vars.append(&mut staged);
                }
            }

            if self.cursor.position() == start {
                self.cursor.advance();
            }
        }

        Ok(self.info)
    }

    // ===== Helper methods =====

    /// Reserve `name` in the shared namespace; the first declaration wins.
    pub(crate) fn claim_identifier(
        &mut self,
        name: &str,
        location: SourceLocation,
    ) -> Result<(), ParseError> {
        if self.namespace.contains(name) {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateIdentifier(name.to_string()),
                location,
            ));
        }
        self.namespace.insert(name.to_string());
        Ok(())
    }

    fn claim_identifiers<'a>(
        &mut self,
        names: impl IntoIterator<Item = &'a str>,
        location: SourceLocation,
    ) -> Result<(), ParseError> {
        for name in names {
            self.claim_identifier(name, location)?;
        }
        Ok(())
    }

    pub(crate) fn type_exists(&self, name: &str) -> bool {
        self.type_index.contains_key(name)
    }
}
