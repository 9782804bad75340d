// Program description produced by the Coral parser

use crate::parser::lexer::Token;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Type of a field: one of the three primitives or a composite type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Number,
    String,
    Bool,
    Composite(String), // Type name
}

impl FieldType {
    /// The identifier this type is written as in source.
    pub fn name(&self) -> &str {
        match self {
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Bool => "bool",
            FieldType::Composite(name) => name,
        }
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, FieldType::Composite(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field declared directly inside a type body
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub name: String,
    pub field_type: FieldType,
}

/// A function record, produced by function and member-function handlers
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInfo {
    pub name: String,
    pub return_type: Option<String>,
    pub param_types: Vec<String>,
    pub body: Vec<Token>,
}

/// A composite type declaration: `type Name [from Super] { fields }`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeInfo {
    pub name: String,
    pub supertype: Option<String>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<FunctionInfo>,
}

impl TypeInfo {
    pub fn new(name: String) -> Self {
        TypeInfo {
            name,
            supertype: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A top-level variable declaration
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalVarInfo {
    pub var_type: String,
    pub name: String,
}

/// Everything the parser learned about a source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseInfo {
    pub types: Vec<TypeInfo>,
    pub functions: Vec<FunctionInfo>,
    pub global_vars: Vec<GlobalVarInfo>,
}

impl ParseInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a type by name.
    pub fn type_info(&self, name: &str) -> Option<&TypeInfo> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Supertype chain of `name`, nearest ancestor first.
    ///
    /// Supertypes always predate their subtypes, so the walk cannot cycle.
    pub fn ancestors(&self, name: &str) -> Vec<&TypeInfo> {
        let mut chain = Vec::new();
        let mut current = self.type_info(name).and_then(|t| t.supertype.as_deref());
        while let Some(super_name) = current {
            match self.type_info(super_name) {
                Some(info) => {
                    chain.push(info);
                    current = info.supertype.as_deref();
                }
                None => break,
            }
        }
        chain
    }

    /// All fields visible on `name`: the root ancestor's fields first, the
    /// type's own fields last. `None` if the type does not exist.
    pub fn resolved_fields(&self, name: &str) -> Option<Vec<&FieldInfo>> {
        let own = self.type_info(name)?;
        let mut fields: Vec<&FieldInfo> = Vec::new();
        for ancestor in self.ancestors(name).into_iter().rev() {
            fields.extend(ancestor.fields.iter());
        }
        fields.extend(own.fields.iter());
        Some(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, field_type: FieldType) -> FieldInfo {
        FieldInfo {
            name: name.to_string(),
            field_type,
        }
    }

    fn sample() -> ParseInfo {
        let mut animal = TypeInfo::new("Animal".to_string());
        animal.fields.push(field("age", FieldType::Number));

        let mut dog = TypeInfo::new("Dog".to_string());
        dog.supertype = Some("Animal".to_string());
        dog.fields.push(field("name", FieldType::String));

        let mut puppy = TypeInfo::new("Puppy".to_string());
        puppy.supertype = Some("Dog".to_string());
        puppy.fields.push(field("parent", FieldType::Composite("Dog".to_string())));

        ParseInfo {
            types: vec![animal, dog, puppy],
            ..ParseInfo::default()
        }
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let info = sample();
        let names: Vec<&str> = info.ancestors("Puppy").iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Dog", "Animal"]);
        assert!(info.ancestors("Animal").is_empty());
    }

    #[test]
    fn test_resolved_fields_root_first() {
        let info = sample();
        let fields = info.resolved_fields("Puppy").unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["age", "name", "parent"]);
        assert!(info.resolved_fields("Unicorn").is_none());
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::Number.to_string(), "number");
        assert_eq!(FieldType::Composite("Dog".to_string()).to_string(), "Dog");
        assert!(FieldType::Bool.is_primitive());
        assert!(!FieldType::Composite("Dog".to_string()).is_primitive());
    }
}
