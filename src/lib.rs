//! # Introduction
//!
//! `coralc` is the front end for Coral, a small statically-typed language with
//! `number`, `string` and `bool` primitives and user-defined composite types
//! with single inheritance.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → ParseInfo
//! ```
//!
//! 1. [`parser::lexer`] turns the source text into a complete token vector.
//! 2. [`parser::parse`] dispatches on each top-level declaration. `type`
//!    declarations are parsed into the type table; function declarations and
//!    global variables go to a [`parser::handlers::DeclarationHandler`].
//! 3. [`report`] prints tokens and the parse result as text.
//! 4. [`ui`] is a ratatui inspector for tokens and types; not part of the
//!    stable library API.
//!
//! ## Example
//!
//! ```
//! let info = coralc::parser::compile("type Dog { number age; }").unwrap();
//! assert_eq!(info.types[0].name, "Dog");
//! ```

pub mod cli;
pub mod parser;
pub mod report;
pub mod ui;
