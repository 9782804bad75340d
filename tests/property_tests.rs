// Property tests for the tokenizer and type parser

use coralc::parser::ast::FieldType;
use coralc::parser::compile;
use coralc::parser::lexer::{tokenize, TokenKind, TokenValue};
use proptest::prelude::*;

fn identifier() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9_]{0,8}"
}

proptest! {
    #[test]
    fn ignored_characters_yield_no_tokens(source in "[ \n\t\r]{0,64}") {
        prop_assert!(tokenize(&source).unwrap().is_empty());
    }

    #[test]
    fn string_literal_payload_is_verbatim(content in "[^\"]{0,40}") {
        let source = format!("\"{}\"", content);
        let tokens = tokenize(&source).unwrap();

        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        prop_assert_eq!(tokens[0].value.clone(), TokenValue::Text(content));
    }

    #[test]
    fn unclosed_string_always_fails(content in "[^\"]{0,40}") {
        let source = format!("\"{}", content);
        prop_assert!(tokenize(&source).is_err());
    }

    #[test]
    fn decimal_numbers_round_trip(whole in 0u32..100_000, frac in 0u32..1000) {
        let source = format!("{}.{}", whole, frac);
        let tokens = tokenize(&source).unwrap();

        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::NumberLiteral);
        prop_assert_eq!(tokens[0].value.clone(), TokenValue::Number(source.parse::<f64>().unwrap()));
    }

    #[test]
    fn multiple_periods_degrade_to_identifier(parts in prop::collection::vec(0u32..1000, 3..6)) {
        let source = parts.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(".");
        let tokens = tokenize(&source).unwrap();

        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::Name);
    }

    #[test]
    fn declared_fields_keep_order(
        name in identifier(),
        fields in prop::collection::btree_set("[a-z][a-z0-9_]{0,8}", 0..8),
    ) {
        // Keywords are not valid field names
        let fields: Vec<String> = fields
            .into_iter()
            .filter(|f| TokenKind::keyword(f).is_none() && f != "true" && f != "false" && !f.starts_with("function"))
            .collect();
        let body: String = fields.iter().map(|f| format!("number {}; ", f)).collect();
        let source = format!("type {} {{ {}}}", name, body);

        let info = compile(&source).unwrap();
        prop_assert_eq!(info.types.len(), 1);
        let names: Vec<&str> = info.types[0].fields.iter().map(|f| f.name.as_str()).collect();
        let expected: Vec<&str> = fields.iter().map(|f| f.as_str()).collect();
        prop_assert_eq!(names, expected);
        prop_assert!(info.types[0].fields.iter().all(|f| f.field_type == FieldType::Number));
    }

    #[test]
    fn redeclaring_a_type_fails(name in identifier()) {
        let source = format!("type {0} {{ }} type {0} {{ }}", name);
        prop_assert!(compile(&source).is_err());
    }
}
