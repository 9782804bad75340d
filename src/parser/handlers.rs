//! Extension points for declarations the parser does not understand itself
//!
//! The dispatcher in [`Parser::parse`](crate::parser::parse::Parser::parse)
//! only owns the `type` grammar. Function declarations, member functions and
//! global variables are handed to a [`DeclarationHandler`] together with the
//! live [`TokenCursor`]. A handler may consume any number of tokens and record
//! entries in the list it is given.
//!
//! Each list starts empty. After the handler returns, the parser claims the
//! recorded names in the shared namespace and appends the entries to its
//! tables; entries already in the tables are out of a handler's reach.

use crate::parser::ast::{FunctionInfo, GlobalVarInfo, TypeInfo};
use crate::parser::parse::{ParseError, TokenCursor};

pub trait DeclarationHandler {
    /// Called with the cursor on a top-level function-declaration token.
    fn function(
        &mut self,
        _cursor: &mut TokenCursor,
        _functions: &mut Vec<FunctionInfo>,
    ) -> Result<(), ParseError> {
        Ok(())
    }

    /// Called with the cursor on any other top-level token.
    fn global_var(
        &mut self,
        _cursor: &mut TokenCursor,
        _globals: &mut Vec<GlobalVarInfo>,
    ) -> Result<(), ParseError> {
        Ok(())
    }

    /// Called inside a type body, just after its function-declaration token
    /// was consumed. `owner` is the type still being built; recorded
    /// `methods` are appended to it.
    fn member_function(
        &mut self,
        _cursor: &mut TokenCursor,
        _owner: &TypeInfo,
        _methods: &mut Vec<FunctionInfo>,
    ) -> Result<(), ParseError> {
        Ok(())
    }
}

/// Handler that records nothing and consumes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertHandler;

impl DeclarationHandler for InertHandler {}
