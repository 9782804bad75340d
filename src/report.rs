//! Plain-text listings of tokens and parse results
//!
//! These back the `--tokens` and `--types` driver flags. The format is meant
//! for people, not for other programs, and may change.

use crate::parser::ast::{ParseInfo, TypeInfo};
use crate::parser::lexer::{Token, TokenValue};
use std::fmt::Write;

/// Payload of a token as shown in listings, empty when it has none.
pub fn token_payload(token: &Token) -> String {
    match &token.value {
        TokenValue::None => String::new(),
        TokenValue::Bool(b) => b.to_string(),
        TokenValue::Number(n) => n.to_string(),
        TokenValue::Text(s) => format!("{:?}", s),
    }
}

/// One line per token: index, location, kind and payload.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "token count {}", tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        let payload = token_payload(token);
        let location = token.location.to_string();
        let _ = write!(out, "{:>4}  {:<7} {}", index, location, token.kind);
        if !payload.is_empty() {
            let _ = write!(out, " {}", payload);
        }
        out.push('\n');
    }
    out
}

fn format_type(out: &mut String, index: usize, info: &ParseInfo, type_info: &TypeInfo) {
    let _ = write!(out, "type #{}: {}", index, type_info.name);
    if let Some(supertype) = &type_info.supertype {
        let _ = write!(out, ", super-type: {}", supertype);
    }
    out.push('\n');

    for ancestor in info.ancestors(&type_info.name).into_iter().rev() {
        for field in &ancestor.fields {
            let _ = writeln!(out, "   {} {}  (from {})", field.field_type, field.name, ancestor.name);
        }
    }
    for field in &type_info.fields {
        let _ = writeln!(out, "   {} {}", field.field_type, field.name);
    }
    for method in &type_info.methods {
        let _ = writeln!(out, "   function {}", method.name);
    }
}

/// Type table, functions and globals.
pub fn format_parse_info(info: &ParseInfo) -> String {
    let mut out = String::new();
    out.push_str("Parse Info:\n=============\n");

    let _ = writeln!(out, "Types ({}):", info.types.len());
    for (index, type_info) in info.types.iter().enumerate() {
        format_type(&mut out, index, info, type_info);
    }

    let _ = writeln!(out, "Functions ({}):", info.functions.len());
    for function in &info.functions {
        let params = function.param_types.join(", ");
        match &function.return_type {
            Some(ret) => {
                let _ = writeln!(out, "   {}({}) -> {}", function.name, params, ret);
            }
            None => {
                let _ = writeln!(out, "   {}({})", function.name, params);
            }
        }
    }

    let _ = writeln!(out, "Globals ({}):", info.global_vars.len());
    for global in &info.global_vars {
        let _ = writeln!(out, "   {} {}", global.var_type, global.name);
    }

    out
}
