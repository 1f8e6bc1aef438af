//! Pattern requests
//!
//! A [`PatternRequest`] is the caller-supplied pattern kind plus the names
//! threaded through the generated declarations. It is immutable once built;
//! validation happens in the pattern engine, which knows which fields each
//! pattern needs.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::decl::LibraryType;
use crate::GeneratorError;

/// Argument keys accepted by [`PatternRequest::from_args`]
pub const ARG_CLASS_NAME: &str = "className";
pub const ARG_PRODUCT_TYPE: &str = "productType";
pub const ARG_PRODUCT_NAME: &str = "productName";
pub const ARG_PACKAGE_NAME: &str = "packageName";

/// The eight supported patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    AbstractFactory,
    Builder,
    FactoryMethod,
    Facade,
    ChainOfResponsibility,
    Mediator,
    Visitor,
    TemplateMethod,
}

impl PatternKind {
    pub const ALL: [PatternKind; 8] = [
        PatternKind::AbstractFactory,
        PatternKind::Builder,
        PatternKind::FactoryMethod,
        PatternKind::Facade,
        PatternKind::ChainOfResponsibility,
        PatternKind::Mediator,
        PatternKind::Visitor,
        PatternKind::TemplateMethod,
    ];

    /// Short code used on the command line
    pub fn code(&self) -> &'static str {
        match self {
            PatternKind::AbstractFactory => "AFDP",
            PatternKind::Builder => "BDP",
            PatternKind::FactoryMethod => "FDP",
            PatternKind::Facade => "FCDP",
            PatternKind::ChainOfResponsibility => "CDP",
            PatternKind::Mediator => "MDP",
            PatternKind::Visitor => "VDP",
            PatternKind::TemplateMethod => "TDP",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PatternKind::AbstractFactory => "Abstract Factory",
            PatternKind::Builder => "Builder",
            PatternKind::FactoryMethod => "Factory Method",
            PatternKind::Facade => "Facade",
            PatternKind::ChainOfResponsibility => "Chain of Responsibility",
            PatternKind::Mediator => "Mediator",
            PatternKind::Visitor => "Visitor",
            PatternKind::TemplateMethod => "Template Method",
        }
    }

    /// What `className` names for this pattern
    pub fn class_role(&self) -> &'static str {
        match self {
            PatternKind::AbstractFactory => "concrete factory",
            PatternKind::Builder => "complex object",
            PatternKind::FactoryMethod => "concrete creator",
            PatternKind::Facade => "facade",
            PatternKind::ChainOfResponsibility => "abstract handler",
            PatternKind::Mediator => "concrete mediator",
            PatternKind::Visitor => "concrete visitor",
            PatternKind::TemplateMethod => "concrete template",
        }
    }

    /// Whether productType and productName are required
    pub fn needs_product(&self) -> bool {
        matches!(
            self,
            PatternKind::AbstractFactory | PatternKind::Builder | PatternKind::FactoryMethod
        )
    }

    /// Case-insensitive lookup by short code
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.code())
    }
}

impl FromStr for PatternKind {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| GeneratorError::UnrecognizedPattern(s.to_string()))
    }
}

/// Input to one generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRequest {
    pub kind: PatternKind,
    pub class_name: String,
    pub product_type: Option<String>,
    pub product_name: Option<String>,
    pub package_name: Option<String>,
}

impl PatternRequest {
    pub fn new(kind: PatternKind, class_name: impl Into<String>) -> Self {
        Self {
            kind,
            class_name: class_name.into(),
            product_type: None,
            product_name: None,
            package_name: None,
        }
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_product_name(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = Some(product_name.into());
        self
    }

    pub fn with_package(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    /// Build from an argument map; keys a pattern does not use are ignored
    pub fn from_args(kind: PatternKind, args: &HashMap<String, String>) -> Self {
        let get = |key: &str| args.get(key).map(|v| v.trim().to_string());
        Self {
            kind,
            class_name: get(ARG_CLASS_NAME).unwrap_or_default(),
            product_type: get(ARG_PRODUCT_TYPE),
            product_name: get(ARG_PRODUCT_NAME),
            package_name: get(ARG_PACKAGE_NAME),
        }
    }
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while", "_",
];

pub fn is_java_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

/// Letters, digits, `_` and `$`, not starting with a digit
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Simple names generated sources use without declaring them
///
/// A declaration with one of these names would shadow the built-in type
/// (`java.lang` or an imported `java.util` type) in every file of the package.
pub fn is_reserved_type_name(name: &str) -> bool {
    matches!(name, "String" | "Object" | "Override")
        || LibraryType::ALL.iter().any(|ty| ty.simple_name() == name)
}

/// Dot-separated identifiers: com.example.shapes
pub fn is_package_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .split('.')
            .all(|part| is_java_identifier(part) && !is_java_keyword(part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_case_insensitive() {
        assert_eq!(PatternKind::from_code("afdp"), Some(PatternKind::AbstractFactory));
        assert_eq!(PatternKind::from_code(" Cdp "), Some(PatternKind::ChainOfResponsibility));
        assert_eq!(PatternKind::from_code("FCDP"), Some(PatternKind::Facade));
        assert_eq!(PatternKind::from_code("ZZZ"), None);
    }

    #[test]
    fn test_from_str_reports_unrecognized() {
        let err = "ZZZ".parse::<PatternKind>().unwrap_err();
        assert!(matches!(err, GeneratorError::UnrecognizedPattern(ref code) if code == "ZZZ"));
    }

    #[test]
    fn test_every_kind_roundtrips_through_its_code() {
        for kind in PatternKind::ALL {
            assert_eq!(kind.code().parse::<PatternKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_from_args_ignores_unused_keys() {
        let args: HashMap<String, String> = [
            ("className", "Shop"),
            ("packageName", "com.shop"),
            ("colour", "blue"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let request = PatternRequest::from_args(PatternKind::Facade, &args);
        assert_eq!(request.class_name, "Shop");
        assert_eq!(request.package_name.as_deref(), Some("com.shop"));
        assert_eq!(request.product_type, None);
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_java_identifier("DogFactory"));
        assert!(is_java_identifier("_x$1"));
        assert!(!is_java_identifier("1Dog"));
        assert!(!is_java_identifier("Dog Factory"));
        assert!(!is_java_identifier(""));
        assert!(is_java_keyword("class"));
        assert!(is_package_name("com.example.zoo"));
        assert!(!is_package_name("com..zoo"));
        assert!(!is_package_name("com.new.zoo"));
    }

    #[test]
    fn test_reserved_type_names() {
        for name in ["String", "Object", "Override", "List", "ArrayList", "Iterator", "Objects"] {
            assert!(is_reserved_type_name(name), "{name}");
        }
        assert!(!is_reserved_type_name("Animal"));
        assert!(!is_reserved_type_name("string"));
    }
}
