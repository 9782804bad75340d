//! Type declaration parsing
//!
//! # Grammar
//!
//! ```text
//! type_decl  ::= "type" identifier [ "from" identifier ] "{" member* "}"
//! member     ::= field | function_decl
//! field      ::= field_type identifier ";"
//! field_type ::= "number" | "string" | "bool" | identifier
//! ```
//!
//! A supertype must already be declared. A field type must be a primitive,
//! the enclosing type itself, or a type declared earlier in the file. Field
//! names are unique within one body; fields inherited from a supertype are not
//! consulted, so a subtype may reuse an ancestor's field name.

use crate::parser::ast::*;
use crate::parser::handlers::DeclarationHandler;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

impl<H: DeclarationHandler> Parser<H> {
    /// Parse `type Name [from Super] { ... }` and append it to the type table.
    pub(crate) fn parse_type_declaration(&mut self) -> Result<(), ParseError> {
        self.cursor.consume()?; // 'type'

        let (name, name_loc) = self.cursor.expect_identifier()?;
        self.claim_identifier(&name, name_loc)?;
        let mut type_info = TypeInfo::new(name);

        let mut next = self.cursor.consume()?;
        if next.kind == TokenKind::From {
            let (super_name, super_loc) = self.cursor.expect_identifier()?;
            if !self.type_exists(&super_name) {
                return Err(ParseError::new(
                    ParseErrorKind::UnknownType(super_name),
                    super_loc,
                ));
            }
            type_info.supertype = Some(super_name);
            next = self.cursor.consume()?;
        }

        if next.kind != TokenKind::OpenBrace {
            return Err(ParseError::at_token(ParseErrorKind::ExpectedOpenBrace, &next));
        }

        loop {
            let token = self.cursor.consume()?;
            match token.kind {
                TokenKind::CloseBrace => break,
                TokenKind::FunctionDecl => {
                    let mut staged = Vec::new();
                    self.handler
                        .member_function(&mut self.cursor, &type_info, &mut staged)?;
                    type_info.methods.append(&mut staged);
                }
                _ => {
                    let field = self.parse_field(&type_info, &token)?;
                    type_info.fields.push(field);
                }
            }
        }

        self.type_index
            .insert(type_info.name.clone(), self.info.types.len());
        self.info.types.push(type_info);
        Ok(())
    }

    /// Parse one field whose type specifier `type_token` was already consumed.
    fn parse_field(&mut self, owner: &TypeInfo, type_token: &Token) -> Result<FieldInfo, ParseError> {
        let field_type = self.resolve_field_type(owner, type_token)?;

        let (name, name_loc) = self.cursor.expect_identifier()?;
        if owner.field(&name).is_some() {
            return Err(ParseError::new(ParseErrorKind::DuplicateField(name), name_loc));
        }

        self.cursor
            .expect(TokenKind::Semicolon, ParseErrorKind::ExpectedSemicolon)?;

        Ok(FieldInfo { name, field_type })
    }

    fn resolve_field_type(&self, owner: &TypeInfo, token: &Token) -> Result<FieldType, ParseError> {
        match token.kind {
            TokenKind::Number => Ok(FieldType::Number),
            TokenKind::String => Ok(FieldType::String),
            TokenKind::Bool => Ok(FieldType::Bool),
            TokenKind::Name => {
                let name = token.text().unwrap_or_default();
                if name == owner.name || self.type_exists(name) {
                    Ok(FieldType::Composite(name.to_string()))
                } else {
                    Err(ParseError::new(
                        ParseErrorKind::UnknownType(name.to_string()),
                        token.location,
                    ))
                }
            }
            _ => Err(ParseError::at_token(
                ParseErrorKind::UnknownType(token.to_string()),
                token,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

    fn parse(source: &str) -> Result<ParseInfo, ParseError> {
        Parser::new(tokenize(source).unwrap()).parse()
    }

    fn parse_err(source: &str) -> ParseErrorKind {
        parse(source).unwrap_err().kind
    }

    #[test]
    fn test_parse_simple_type() {
        let info = parse("type Dog { number age; }").unwrap();

        assert_eq!(info.types.len(), 1);
        let dog = &info.types[0];
        assert_eq!(dog.name, "Dog");
        assert_eq!(dog.supertype, None);
        assert_eq!(
            dog.fields,
            vec![FieldInfo {
                name: "age".to_string(),
                field_type: FieldType::Number,
            }]
        );
    }

    #[test]
    fn test_parse_supertype() {
        let info = parse("type Dog { number age; } type Cat from Dog { }").unwrap();

        assert_eq!(info.types.len(), 2);
        assert_eq!(info.types[1].name, "Cat");
        assert_eq!(info.types[1].supertype.as_deref(), Some("Dog"));
        assert!(info.types[1].fields.is_empty());
    }

    #[test]
    fn test_unknown_supertype() {
        let err = parse("type Cat from Unicorn { }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownType("Unicorn".to_string()));
        assert_eq!(err.location.column, 15);
    }

    #[test]
    fn test_supertype_cannot_be_forward_reference() {
        assert_eq!(
            parse_err("type A from B { } type B { }"),
            ParseErrorKind::UnknownType("B".to_string())
        );
        // A type is not its own supertype: it is only registered once closed
        assert_eq!(
            parse_err("type A from A { }"),
            ParseErrorKind::UnknownType("A".to_string())
        );
    }

    #[test]
    fn test_field_types() {
        let source = r#"
            type Owner { string name; }
            type Node {
                number value;
                string label;
                bool visited;
                Node next;
                Owner owner;
            }
        "#;
        let info = parse(source).unwrap();
        let node = info.type_info("Node").unwrap();
        let types: Vec<&FieldType> = node.fields.iter().map(|f| &f.field_type).collect();

        assert_eq!(
            types,
            vec![
                &FieldType::Number,
                &FieldType::String,
                &FieldType::Bool,
                &FieldType::Composite("Node".to_string()),
                &FieldType::Composite("Owner".to_string()),
            ]
        );
    }

    #[test]
    fn test_field_order_preserved() {
        let info = parse("type P { number z; number a; number m; }").unwrap();
        let names: Vec<&str> = info.types[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_unknown_field_type() {
        assert_eq!(
            parse_err("type A { Ghost g; }"),
            ParseErrorKind::UnknownType("Ghost".to_string())
        );
        // Later declarations are not visible
        assert_eq!(
            parse_err("type A { B b; } type B { }"),
            ParseErrorKind::UnknownType("B".to_string())
        );
        assert!(matches!(
            parse_err("type A { ; }"),
            ParseErrorKind::UnknownType(_)
        ));
    }

    #[test]
    fn test_duplicate_field() {
        let err = parse("type Foo { number x; number x; }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DuplicateField("x".to_string()));
        assert_eq!(err.location.column, 29);
    }

    #[test]
    fn test_inherited_field_name_may_be_reused() {
        let info = parse("type A { number x; } type B from A { string x; }").unwrap();
        assert_eq!(info.types[1].fields[0].field_type, FieldType::String);
    }

    #[test]
    fn test_duplicate_identifier() {
        let err = parse("type Foo { } type Foo { number x; }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DuplicateIdentifier("Foo".to_string()));
        assert_eq!(err.location.column, 19);
    }

    #[test]
    fn test_expected_identifier() {
        assert_eq!(parse_err("type { }"), ParseErrorKind::ExpectedIdentifier);
        assert_eq!(parse_err("type number { }"), ParseErrorKind::ExpectedIdentifier);
        assert_eq!(parse_err("type A from { }"), ParseErrorKind::ExpectedIdentifier);
        assert_eq!(parse_err("type A { number ; }"), ParseErrorKind::ExpectedIdentifier);
    }

    #[test]
    fn test_expected_open_brace() {
        assert_eq!(parse_err("type A ( )"), ParseErrorKind::ExpectedOpenBrace);
        assert_eq!(parse_err("type A { } type B from A number x; }"), ParseErrorKind::ExpectedOpenBrace);
    }

    #[test]
    fn test_expected_semicolon() {
        let err = parse("type A { number x, number y; }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedSemicolon);
        assert_eq!(err.found.as_deref(), Some("','"));
    }

    #[test]
    fn test_unexpected_end_of_input() {
        assert_eq!(parse_err("type"), ParseErrorKind::UnexpectedEndOfInput);
        assert_eq!(parse_err("type A"), ParseErrorKind::UnexpectedEndOfInput);
        assert_eq!(parse_err("type A {"), ParseErrorKind::UnexpectedEndOfInput);
        assert_eq!(parse_err("type A { number x"), ParseErrorKind::UnexpectedEndOfInput);
        assert_eq!(parse_err("type A from"), ParseErrorKind::UnexpectedEndOfInput);
        assert_eq!(parse_err("type A { } type B from A"), ParseErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_member_function_is_inert() {
        let info = parse("type A { number x; function<number> string y; }").unwrap();
        let a = &info.types[0];
        assert!(a.methods.is_empty());
        let names: Vec<&str> = a.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
    }
}
