//! Coral source code front end
//!
//! This module turns Coral source text into a [`ParseInfo`](ast::ParseInfo):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Top-level dispatch and the token cursor (tokens → ParseInfo)
//! - `declarations`: The `type` declaration grammar
//! - [`handlers`]: Extension points for functions and global variables
//! - [`ast`]: Type table and program description definitions
//!
//! Tokenization always completes before parsing starts; the token vector is
//! moved into the parser in one piece.

pub mod ast;
mod declarations;
pub mod handlers;
pub mod lexer;
pub mod parse;

use std::fmt;

use ast::ParseInfo;
use lexer::{LexError, Lexer};
use parse::{ParseError, Parser};

/// First error hit while compiling a source file
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    Lex(LexError),
    Parse(ParseError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(e) => write!(f, "{}", e),
            CompileError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<LexError> for CompileError {
    fn from(err: LexError) -> Self {
        CompileError::Lex(err)
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}

/// Tokenize and parse `source` with the inert declaration handlers.
pub fn compile(source: &str) -> Result<ParseInfo, CompileError> {
    let tokens = Lexer::new(source).tokenize()?;
    let info = Parser::new(tokens).parse()?;
    Ok(info)
}
