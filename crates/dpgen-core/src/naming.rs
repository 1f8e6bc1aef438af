//! Naming configuration
//!
//! The identifier vocabulary every pattern routine draws from: interface and
//! class names for the fixed roles of each pattern, member and variable
//! names, and the two counts (chain receivers, visitor methods).
//!
//! A configuration is resolved once at startup, either from the built-in
//! defaults or from a YAML file with one section per pattern:
//!
//! ```yaml
//! AbstractFactory:
//!   interfaceName: AbstractFactory
//!   ...
//! Chain:
//!   numberOfClass: 3
//!   ...
//! ```
//!
//! Every key is required when loading from a file; a missing or malformed key
//! is a [`ConfigError`], reported before any pattern request runs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::request::{is_java_identifier, is_java_keyword, is_reserved_type_name};

/// Naming configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Cannot read naming configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Missing key or wrong value type
    #[error("Malformed naming configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A configured identifier is not usable in generated code
    #[error("Invalid identifier for {key}: '{value}'")]
    InvalidIdentifier { key: String, value: String },

    /// Two roles of one pattern share a name
    #[error("{first} and {second} are both '{value}'")]
    DuplicateName {
        first: String,
        second: String,
        value: String,
    },

    /// A configured count is out of range
    #[error("Invalid count for {key}: {value} (must be at least 1)")]
    InvalidCount { key: String, value: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AbstractFactoryNames {
    pub interface_name: String,
    /// Product contract method returning the product name
    pub get_name_method: String,
    /// Prefixed to the product type: create + Animal
    pub create_method_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuilderNames {
    pub interface_name: String,
    pub concrete_builder_name: String,
    pub children_field: String,
    pub child_param: String,
    pub add_method: String,
    pub iterator_method: String,
    pub build_part_method: String,
    pub get_result_method: String,
    /// The concrete builder's complex object field
    pub complex_object_field: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FactoryNames {
    pub creator_class_name: String,
    pub product_field: String,
    pub factory_method: String,
    pub operation_method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FacadeNames {
    pub abstract_class_name: String,
    pub operation_method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChainNames {
    /// Receiver classes are named <receiverClassName><i>
    pub receiver_class_name: String,
    pub number_of_class: u32,
    pub successor_field: String,
    pub handle_request_method: String,
    pub can_handle_method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MediatorNames {
    pub mediator_class_name: String,
    /// Abstract colleague; concrete colleagues append 1 and 2
    pub colleague_class_name: String,
    pub colleague_variable: String,
    pub state_variable: String,
    pub mediator_variable: String,
    pub mediate_method: String,
    pub set_colleagues_method: String,
    pub get_state_method: String,
    pub set_state_method: String,
    /// Per-colleague action methods append the colleague index
    pub action_method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VisitorNames {
    pub abstract_visitor_name: String,
    pub abstract_element_name: String,
    pub visitor_variable: String,
    pub element_variable: String,
    pub accept_method: String,
    pub operation_method: String,
    pub visit_element_method: String,
    pub number_of_visitor_methods: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TemplateNames {
    pub abstract_template_name: String,
    pub primitive_operation1: String,
    pub primitive_operation2: String,
}

/// Resolved naming configuration, read-only after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamingConfig {
    #[serde(rename = "AbstractFactory")]
    pub abstract_factory: AbstractFactoryNames,
    #[serde(rename = "Builder")]
    pub builder: BuilderNames,
    #[serde(rename = "Factory")]
    pub factory: FactoryNames,
    #[serde(rename = "Facade")]
    pub facade: FacadeNames,
    #[serde(rename = "Chain")]
    pub chain: ChainNames,
    #[serde(rename = "Mediator")]
    pub mediator: MediatorNames,
    #[serde(rename = "Visitor")]
    pub visitor: VisitorNames,
    #[serde(rename = "Template")]
    pub template: TemplateNames,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            abstract_factory: AbstractFactoryNames {
                interface_name: "AbstractFactory".into(),
                get_name_method: "getName".into(),
                create_method_prefix: "create".into(),
            },
            builder: BuilderNames {
                interface_name: "Builder".into(),
                concrete_builder_name: "Builder1".into(),
                children_field: "children".into(),
                child_param: "child".into(),
                add_method: "add".into(),
                iterator_method: "iterator".into(),
                build_part_method: "buildPartA".into(),
                get_result_method: "getResult".into(),
                complex_object_field: "co".into(),
            },
            factory: FactoryNames {
                creator_class_name: "Creator".into(),
                product_field: "product".into(),
                factory_method: "factoryMethod".into(),
                operation_method: "operation".into(),
            },
            facade: FacadeNames {
                abstract_class_name: "AbstractFacade".into(),
                operation_method: "operation".into(),
            },
            chain: ChainNames {
                receiver_class_name: "Receiver".into(),
                number_of_class: 3,
                successor_field: "successor".into(),
                handle_request_method: "handleRequest".into(),
                can_handle_method: "canHandle".into(),
            },
            mediator: MediatorNames {
                mediator_class_name: "Mediator".into(),
                colleague_class_name: "Colleague".into(),
                colleague_variable: "colleague".into(),
                state_variable: "state".into(),
                mediator_variable: "mediator".into(),
                mediate_method: "mediate".into(),
                set_colleagues_method: "setColleagues".into(),
                get_state_method: "getState".into(),
                set_state_method: "setState".into(),
                action_method: "action".into(),
            },
            visitor: VisitorNames {
                abstract_visitor_name: "Visitor".into(),
                abstract_element_name: "Element".into(),
                visitor_variable: "visitor".into(),
                element_variable: "element".into(),
                accept_method: "accept".into(),
                operation_method: "operation".into(),
                visit_element_method: "visitElement".into(),
                number_of_visitor_methods: 2,
            },
            template: TemplateNames {
                abstract_template_name: "AbstractClass".into(),
                primitive_operation1: "primitiveOperation1".into(),
                primitive_operation2: "primitiveOperation2".into(),
            },
        }
    }
}

impl NamingConfig {
    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!("Loaded naming configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check every identifier and count
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in self.identifiers() {
            if !is_java_identifier(value) || is_java_keyword(value) {
                return Err(ConfigError::InvalidIdentifier {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
            // Type roles are the *Name keys
            if key.ends_with("Name") && is_reserved_type_name(value) {
                return Err(ConfigError::InvalidIdentifier {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }

        // Names only need to be distinct within one pattern
        let mut seen: HashMap<(&str, &str), &str> = HashMap::new();
        for (key, value) in self.identifiers() {
            let section = key.split_once('.').map_or(key, |(section, _)| section);
            if let Some(first) = seen.insert((section, value), key) {
                return Err(ConfigError::DuplicateName {
                    first: first.to_string(),
                    second: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
        for (key, value) in [
            ("Chain.numberOfClass", self.chain.number_of_class),
            ("Visitor.numberOfVisitorMethods", self.visitor.number_of_visitor_methods),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidCount {
                    key: key.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Every configured identifier with its dotted key
    pub fn identifiers(&self) -> Vec<(&'static str, &str)> {
        let af = &self.abstract_factory;
        let b = &self.builder;
        let f = &self.factory;
        let fc = &self.facade;
        let c = &self.chain;
        let m = &self.mediator;
        let v = &self.visitor;
        let t = &self.template;
        vec![
            ("AbstractFactory.interfaceName", af.interface_name.as_str()),
            ("AbstractFactory.getNameMethod", af.get_name_method.as_str()),
            ("AbstractFactory.createMethodPrefix", af.create_method_prefix.as_str()),
            ("Builder.interfaceName", b.interface_name.as_str()),
            ("Builder.concreteBuilderName", b.concrete_builder_name.as_str()),
            ("Builder.childrenField", b.children_field.as_str()),
            ("Builder.childParam", b.child_param.as_str()),
            ("Builder.addMethod", b.add_method.as_str()),
            ("Builder.iteratorMethod", b.iterator_method.as_str()),
            ("Builder.buildPartMethod", b.build_part_method.as_str()),
            ("Builder.getResultMethod", b.get_result_method.as_str()),
            ("Builder.complexObjectField", b.complex_object_field.as_str()),
            ("Factory.creatorClassName", f.creator_class_name.as_str()),
            ("Factory.productField", f.product_field.as_str()),
            ("Factory.factoryMethod", f.factory_method.as_str()),
            ("Factory.operationMethod", f.operation_method.as_str()),
            ("Facade.abstractClassName", fc.abstract_class_name.as_str()),
            ("Facade.operationMethod", fc.operation_method.as_str()),
            ("Chain.receiverClassName", c.receiver_class_name.as_str()),
            ("Chain.successorField", c.successor_field.as_str()),
            ("Chain.handleRequestMethod", c.handle_request_method.as_str()),
            ("Chain.canHandleMethod", c.can_handle_method.as_str()),
            ("Mediator.mediatorClassName", m.mediator_class_name.as_str()),
            ("Mediator.colleagueClassName", m.colleague_class_name.as_str()),
            ("Mediator.colleagueVariable", m.colleague_variable.as_str()),
            ("Mediator.stateVariable", m.state_variable.as_str()),
            ("Mediator.mediatorVariable", m.mediator_variable.as_str()),
            ("Mediator.mediateMethod", m.mediate_method.as_str()),
            ("Mediator.setColleaguesMethod", m.set_colleagues_method.as_str()),
            ("Mediator.getStateMethod", m.get_state_method.as_str()),
            ("Mediator.setStateMethod", m.set_state_method.as_str()),
            ("Mediator.actionMethod", m.action_method.as_str()),
            ("Visitor.abstractVisitorName", v.abstract_visitor_name.as_str()),
            ("Visitor.abstractElementName", v.abstract_element_name.as_str()),
            ("Visitor.visitorVariable", v.visitor_variable.as_str()),
            ("Visitor.elementVariable", v.element_variable.as_str()),
            ("Visitor.acceptMethod", v.accept_method.as_str()),
            ("Visitor.operationMethod", v.operation_method.as_str()),
            ("Visitor.visitElementMethod", v.visit_element_method.as_str()),
            ("Template.abstractTemplateName", t.abstract_template_name.as_str()),
            ("Template.primitiveOperation1", t.primitive_operation1.as_str()),
            ("Template.primitiveOperation2", t.primitive_operation2.as_str()),
        ]
    }
}
