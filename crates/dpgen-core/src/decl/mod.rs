// Declaration model for generated Java sources
// Pattern routines build these nodes; `source_gen` renders them to text.

pub mod source_gen;
pub use source_gen::{render_file, ToSource};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Top-level declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    Interface,
    Class,
    AbstractClass,
}

/// Access modifier of a declaration or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Protected,
    Private,
    /// No modifier (package-private)
    Package,
}

/// Library types the generator may reference without declaring them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LibraryType {
    List,
    ArrayList,
    Iterator,
    Objects,
}

impl LibraryType {
    pub const ALL: [LibraryType; 4] = [
        LibraryType::List,
        LibraryType::ArrayList,
        LibraryType::Iterator,
        LibraryType::Objects,
    ];

    pub fn simple_name(&self) -> &'static str {
        match self {
            LibraryType::List => "List",
            LibraryType::ArrayList => "ArrayList",
            LibraryType::Iterator => "Iterator",
            LibraryType::Objects => "Objects",
        }
    }

    pub fn qualified_name(&self) -> &'static str {
        match self {
            LibraryType::List => "java.util.List",
            LibraryType::ArrayList => "java.util.ArrayList",
            LibraryType::Iterator => "java.util.Iterator",
            LibraryType::Objects => "java.util.Objects",
        }
    }
}

/// Reference to a type from a field, parameter, return or expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    Void,
    Boolean,
    String,
    /// A declaration in the same package, by simple name
    Named(String),
    /// A library type with optional type arguments: List<T>
    Library {
        ty: LibraryType,
        args: Vec<TypeRef>,
    },
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn list(element: TypeRef) -> Self {
        TypeRef::Library {
            ty: LibraryType::List,
            args: vec![element],
        }
    }

    pub fn array_list(element: TypeRef) -> Self {
        TypeRef::Library {
            ty: LibraryType::ArrayList,
            args: vec![element],
        }
    }

    pub fn iterator(element: TypeRef) -> Self {
        TypeRef::Library {
            ty: LibraryType::Iterator,
            args: vec![element],
        }
    }

    pub fn objects() -> Self {
        TypeRef::Library {
            ty: LibraryType::Objects,
            args: Vec::new(),
        }
    }

    /// Simple name when this refers to a same-package declaration
    pub fn as_named(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            _ => None,
        }
    }

    fn walk(&self, visit: &mut dyn FnMut(&TypeRef)) {
        visit(self);
        if let TypeRef::Library { args, .. } = self {
            for arg in args {
                arg.walk(visit);
            }
        }
    }
}

/// Expressions that can appear in generated method bodies and initializers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    Identifier(String),
    String(String),
    Boolean(bool),
    Null,
    This,
    Super,
    /// A type used as a call target: Objects.equals(..)
    TypeName(TypeRef),

    FieldAccess {
        object: Box<Expr>,
        field: String,
    },
    MethodCall {
        object: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },
    New {
        ty: TypeRef,
        args: Vec<Expr>,
    },

    Equal {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    NotEqual {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Not {
        operand: Box<Expr>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    /// this.<field>
    pub fn this_field(field: impl Into<String>) -> Self {
        Expr::FieldAccess {
            object: Box::new(Expr::This),
            field: field.into(),
        }
    }

    /// <method>(args) on the implicit receiver
    pub fn call(method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            object: None,
            method: method.into(),
            args,
        }
    }

    /// <object>.<method>(args)
    pub fn call_on(object: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            object: Some(Box::new(object)),
            method: method.into(),
            args,
        }
    }

    /// new <ty>()
    pub fn new_instance(ty: TypeRef) -> Self {
        Expr::New {
            ty,
            args: Vec::new(),
        }
    }

    fn walk_types(&self, visit: &mut dyn FnMut(&TypeRef)) {
        match self {
            Expr::TypeName(ty) => ty.walk(visit),
            Expr::New { ty, args } => {
                ty.walk(visit);
                args.iter().for_each(|arg| arg.walk_types(visit));
            }
            Expr::FieldAccess { object, .. } => object.walk_types(visit),
            Expr::MethodCall { object, args, .. } => {
                if let Some(object) = object {
                    object.walk_types(visit);
                }
                args.iter().for_each(|arg| arg.walk_types(visit));
            }
            Expr::Equal { left, right } | Expr::NotEqual { left, right } => {
                left.walk_types(visit);
                right.walk_types(visit);
            }
            Expr::Not { operand } => operand.walk_types(visit),
            Expr::Identifier(_)
            | Expr::String(_)
            | Expr::Boolean(_)
            | Expr::Null
            | Expr::This
            | Expr::Super => {}
        }
    }
}

/// Statements of a generated method body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    Expr(Expr),
    Return(Expr),
    Assign {
        target: Expr,
        value: Expr,
    },
    /// Local variable declaration: String state = ...
    Local {
        ty: TypeRef,
        name: String,
        value: Expr,
    },
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    /// super(args) as the first statement of a constructor
    SuperConstructor {
        args: Vec<Expr>,
    },
    Comment(String),
}

impl Stmt {
    pub fn comment(text: impl Into<String>) -> Self {
        Stmt::Comment(text.into())
    }

    fn walk_types(&self, visit: &mut dyn FnMut(&TypeRef)) {
        match self {
            Stmt::Expr(expr) | Stmt::Return(expr) => expr.walk_types(visit),
            Stmt::Assign { target, value } => {
                target.walk_types(visit);
                value.walk_types(visit);
            }
            Stmt::Local { ty, value, .. } => {
                ty.walk(visit);
                value.walk_types(visit);
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.walk_types(visit);
                then_branch.iter().for_each(|s| s.walk_types(visit));
                if let Some(else_branch) = else_branch {
                    else_branch.iter().for_each(|s| s.walk_types(visit));
                }
            }
            Stmt::SuperConstructor { args } => args.iter().for_each(|a| a.walk_types(visit)),
            Stmt::Comment(_) => {}
        }
    }
}

/// Method or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub ty: TypeRef,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub ty: TypeRef,
    pub name: String,
    pub visibility: Visibility,
    pub initializer: Option<Expr>,
}

impl Field {
    /// A private field without initializer
    pub fn new(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            visibility: Visibility::Private,
            initializer: None,
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn initializer(mut self, value: Expr) -> Self {
        self.initializer = Some(value);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodKind {
    Method,
    Constructor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub kind: MethodKind,
    pub name: String,
    pub return_type: TypeRef,
    pub params: Vec<Param>,
    pub visibility: Visibility,
    pub is_abstract: bool,
    /// Rendered with @Override
    pub overrides: bool,
    pub doc: Option<String>,
    pub body: Vec<Stmt>,
}

impl Method {
    /// A public concrete method with an empty body
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            kind: MethodKind::Method,
            name: name.into(),
            return_type,
            params: Vec::new(),
            visibility: Visibility::Public,
            is_abstract: false,
            overrides: false,
            doc: None,
            body: Vec::new(),
        }
    }

    /// A public constructor for `class_name`
    pub fn constructor(class_name: impl Into<String>) -> Self {
        Self {
            kind: MethodKind::Constructor,
            ..Self::new(class_name, TypeRef::Void)
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn param(mut self, ty: TypeRef, name: impl Into<String>) -> Self {
        self.params.push(Param {
            ty,
            name: name.into(),
        });
        self
    }

    /// Mark abstract; any body statements are dropped
    pub fn into_abstract(mut self) -> Self {
        self.is_abstract = true;
        self.body.clear();
        self
    }

    pub fn overriding(mut self) -> Self {
        self.overrides = true;
        self
    }

    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    pub fn stmt(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == MethodKind::Constructor
    }

    fn walk_types(&self, visit: &mut dyn FnMut(&TypeRef)) {
        if !self.is_constructor() {
            self.return_type.walk(visit);
        }
        for param in &self.params {
            param.ty.walk(visit);
        }
        for stmt in &self.body {
            stmt.walk_types(visit);
        }
    }
}

/// One generated interface or class; rendered to its own file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    pub visibility: Visibility,
    pub superclass: Option<TypeRef>,
    /// Implemented interfaces, or extended interfaces for an interface
    pub interfaces: Vec<TypeRef>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

impl Declaration {
    fn with_kind(kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            visibility: Visibility::Public,
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(DeclKind::Interface, name)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::with_kind(DeclKind::Class, name)
    }

    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self::with_kind(DeclKind::AbstractClass, name)
    }

    pub fn extends(mut self, superclass: TypeRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods.extend(methods);
        self
    }

    /// First non-constructor method with the given name
    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|m| !m.is_constructor() && m.name == name)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(|m| m.is_constructor())
    }

    pub fn abstract_methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(|m| m.is_abstract)
    }

    fn walk_types(&self, visit: &mut dyn FnMut(&TypeRef)) {
        if let Some(superclass) = &self.superclass {
            superclass.walk(visit);
        }
        for interface in &self.interfaces {
            interface.walk(visit);
        }
        for field in &self.fields {
            field.ty.walk(visit);
            if let Some(init) = &field.initializer {
                init.walk_types(visit);
            }
        }
        for method in &self.methods {
            method.walk_types(visit);
        }
    }

    /// Simple names of every same-package type this declaration mentions
    pub fn referenced_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.walk_types(&mut |ty: &TypeRef| {
            if let Some(name) = ty.as_named() {
                names.insert(name.to_string());
            }
        });
        names
    }

    /// Fully qualified library types that need an import
    pub fn imports(&self) -> BTreeSet<&'static str> {
        let mut imports = BTreeSet::new();
        self.walk_types(&mut |ty: &TypeRef| {
            if let TypeRef::Library { ty, .. } = ty {
                imports.insert(ty.qualified_name());
            }
        });
        imports
    }
}

/// Names referenced by `declarations` that none of them declares
pub fn unresolved_references(declarations: &[Declaration]) -> Vec<String> {
    let declared: BTreeSet<&str> = declarations.iter().map(|d| d.name.as_str()).collect();
    let mut missing = BTreeSet::new();
    for decl in declarations {
        for name in decl.referenced_names() {
            if !declared.contains(name.as_str()) {
                missing.insert(name);
            }
        }
    }
    missing.into_iter().collect()
}
