/*!
# Pattern Synthesis Engine

Builds the declarations of one design pattern from a [`PatternRequest`] and
the injected [`NamingConfig`].

## Overview

Each pattern kind maps to one routine with a fixed composition of
declaration-building steps:

- `creational`: Abstract Factory, Builder, Factory Method
- `structural`: Facade
- `behavioral`: Chain of Responsibility, Mediator, Visitor, Template Method

The engine validates the request before building anything, so an invalid
request produces no declarations at all. The returned declarations are in
emission order and every same-package type they reference is declared by
the same call.
*/

mod behavioral;
mod creational;
mod structural;

use std::collections::HashSet;

use tracing::debug;

use crate::decl::{unresolved_references, Declaration};
use crate::naming::NamingConfig;
use crate::request::{
    is_java_identifier, is_java_keyword, is_package_name, is_reserved_type_name, PatternKind,
    PatternRequest,
};
use crate::{GeneratorError, Result};

/// Doc comment placed on members left for the user to fill in
pub(crate) const USER_DOC: &str = "To be implemented by the user.";

/// Product roles used by the creational patterns
pub(crate) struct Product<'r> {
    /// Product interface
    pub ty: &'r str,
    /// Concrete product class
    pub name: &'r str,
}

/// Request fields after validation
struct Target<'r> {
    pub class_name: &'r str,
    pub product: Option<Product<'r>>,
}

impl<'r> Target<'r> {
    fn product(&self, kind: PatternKind) -> Result<&Product<'r>> {
        self.product
            .as_ref()
            .ok_or_else(|| invalid(kind, "productType and productName are required"))
    }
}

/// Pattern synthesis engine over an injected naming configuration
#[derive(Debug, Clone, Default)]
pub struct PatternEngine {
    names: NamingConfig,
}

impl PatternEngine {
    pub fn new(names: NamingConfig) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &NamingConfig {
        &self.names
    }

    /// Validate `request` and build its declarations in emission order
    pub fn synthesize(&self, request: &PatternRequest) -> Result<Vec<Declaration>> {
        let kind = request.kind;
        let target = validate(request)?;
        let names = &self.names;

        let declarations = match kind {
            PatternKind::AbstractFactory => {
                creational::abstract_factory(names, target.class_name, target.product(kind)?)
            }
            PatternKind::Builder => {
                creational::builder(names, target.class_name, target.product(kind)?)
            }
            PatternKind::FactoryMethod => {
                creational::factory_method(names, target.class_name, target.product(kind)?)
            }
            PatternKind::Facade => structural::facade(names, target.class_name),
            PatternKind::ChainOfResponsibility => behavioral::chain(names, target.class_name),
            PatternKind::Mediator => behavioral::mediator(names, target.class_name),
            PatternKind::Visitor => behavioral::visitor(names, target.class_name),
            PatternKind::TemplateMethod => behavioral::template(names, target.class_name),
        };

        check_unique_names(kind, &declarations)?;
        debug_assert!(
            unresolved_references(&declarations).is_empty(),
            "{} output references undeclared types",
            kind.code()
        );

        for decl in &declarations {
            debug!(
                pattern = kind.code(),
                declaration = %decl.name,
                kind = ?decl.kind,
                fields = decl.fields.len(),
                methods = decl.methods.len(),
                "Built declaration"
            );
        }
        Ok(declarations)
    }
}

fn invalid(kind: PatternKind, message: impl Into<String>) -> GeneratorError {
    GeneratorError::InvalidRequest {
        pattern: kind,
        message: message.into(),
    }
}

fn require_identifier<'r>(
    kind: PatternKind,
    key: &str,
    value: Option<&'r str>,
) -> Result<&'r str> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(invalid(kind, format!("{key} is required")));
    }
    if !is_java_identifier(value) || is_java_keyword(value) {
        return Err(invalid(kind, format!("{key} '{value}' is not a valid identifier")));
    }
    // Every request name becomes a type in the generated package
    if is_reserved_type_name(value) {
        return Err(invalid(kind, format!("{key} '{value}' would shadow a built-in Java type")));
    }
    Ok(value)
}

fn validate(request: &PatternRequest) -> Result<Target<'_>> {
    let kind = request.kind;

    let package = request.package_name.as_deref().map(str::trim).unwrap_or_default();
    if package.is_empty() {
        return Err(invalid(kind, "packageName is required"));
    }
    if !is_package_name(package) {
        return Err(invalid(kind, format!("packageName '{package}' is not a valid package")));
    }

    let class_name = require_identifier(kind, "className", Some(request.class_name.as_str()))?;
    let product = if kind.needs_product() {
        Some(Product {
            ty: require_identifier(kind, "productType", request.product_type.as_deref())?,
            name: require_identifier(kind, "productName", request.product_name.as_deref())?,
        })
    } else {
        None
    };

    Ok(Target { class_name, product })
}

/// Two declarations with one name would land in the same file
fn check_unique_names(kind: PatternKind, declarations: &[Declaration]) -> Result<()> {
    let mut seen = HashSet::new();
    for decl in declarations {
        if !seen.insert(decl.name.as_str()) {
            return Err(invalid(
                kind,
                format!("'{}' names more than one generated declaration", decl.name),
            ));
        }
    }
    Ok(())
}
