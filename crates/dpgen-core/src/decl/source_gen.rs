// Java source generation from the declaration model
// Output is a pure function of the declaration, package and header comment,
// so regenerating the same request is byte-identical.

use super::*;

const INDENT: &str = "  ";

/// Trait for model nodes that have a one-line source representation
pub trait ToSource {
    fn to_source(&self) -> String;
}

fn join_sources<T: ToSource>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_source())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ToSource for TypeRef {
    fn to_source(&self) -> String {
        match self {
            TypeRef::Void => "void".to_string(),
            TypeRef::Boolean => "boolean".to_string(),
            TypeRef::String => "String".to_string(),
            TypeRef::Named(name) => name.clone(),
            TypeRef::Library { ty, args } if args.is_empty() => ty.simple_name().to_string(),
            TypeRef::Library { ty, args } => {
                format!("{}<{}>", ty.simple_name(), join_sources(args))
            }
        }
    }
}

impl ToSource for Param {
    fn to_source(&self) -> String {
        format!("{} {}", self.ty.to_source(), self.name)
    }
}

impl ToSource for Expr {
    fn to_source(&self) -> String {
        match self {
            Expr::Identifier(name) => name.clone(),
            Expr::String(s) => format!("\"{}\"", escape_string(s)),
            Expr::Boolean(b) => b.to_string(),
            Expr::Null => "null".to_string(),
            Expr::This => "this".to_string(),
            Expr::Super => "super".to_string(),
            Expr::TypeName(ty) => ty.to_source(),

            Expr::FieldAccess { object, field } => format!("{}.{}", object.to_source(), field),
            Expr::MethodCall {
                object,
                method,
                args,
            } => match object {
                Some(object) => format!("{}.{}({})", object.to_source(), method, join_sources(args)),
                None => format!("{}({})", method, join_sources(args)),
            },
            Expr::New { ty, args } => format!("new {}({})", ty.to_source(), join_sources(args)),

            Expr::Equal { left, right } => {
                format!("{} == {}", left.to_source(), right.to_source())
            }
            Expr::NotEqual { left, right } => {
                format!("{} != {}", left.to_source(), right.to_source())
            }
            Expr::Not { operand } => match operand.as_ref() {
                Expr::Equal { .. } | Expr::NotEqual { .. } => format!("!({})", operand.to_source()),
                _ => format!("!{}", operand.to_source()),
            },
        }
    }
}

fn visibility_keyword(visibility: Visibility) -> Option<&'static str> {
    match visibility {
        Visibility::Public => Some("public"),
        Visibility::Protected => Some("protected"),
        Visibility::Private => Some("private"),
        Visibility::Package => None,
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_block(out: &mut String, stmts: &[Stmt], depth: usize) {
    for stmt in stmts {
        write_stmt(out, stmt, depth);
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    push_indent(out, depth);
    match stmt {
        Stmt::Expr(expr) => out.push_str(&format!("{};\n", expr.to_source())),
        Stmt::Return(expr) => out.push_str(&format!("return {};\n", expr.to_source())),
        Stmt::Assign { target, value } => {
            out.push_str(&format!("{} = {};\n", target.to_source(), value.to_source()))
        }
        Stmt::Local { ty, name, value } => out.push_str(&format!(
            "{} {} = {};\n",
            ty.to_source(),
            name,
            value.to_source()
        )),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            out.push_str(&format!("if ({}) {{\n", condition.to_source()));
            write_block(out, then_branch, depth + 1);
            push_indent(out, depth);
            match else_branch {
                Some(else_branch) => {
                    out.push_str("} else {\n");
                    write_block(out, else_branch, depth + 1);
                    push_indent(out, depth);
                    out.push_str("}\n");
                }
                None => out.push_str("}\n"),
            }
        }
        Stmt::SuperConstructor { args } => {
            out.push_str(&format!("super({});\n", join_sources(args)))
        }
        Stmt::Comment(text) => out.push_str(&format!("// {text}\n")),
    }
}

fn write_doc(out: &mut String, doc: &str, depth: usize) {
    push_indent(out, depth);
    out.push_str("/**\n");
    for line in doc.lines() {
        push_indent(out, depth);
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(&format!(" * {line}\n"));
        }
    }
    push_indent(out, depth);
    out.push_str(" */\n");
}

fn write_field(out: &mut String, field: &Field) {
    push_indent(out, 1);
    if let Some(keyword) = visibility_keyword(field.visibility) {
        out.push_str(keyword);
        out.push(' ');
    }
    out.push_str(&format!("{} {}", field.ty.to_source(), field.name));
    if let Some(init) = &field.initializer {
        out.push_str(&format!(" = {}", init.to_source()));
    }
    out.push_str(";\n");
}

fn write_method(out: &mut String, method: &Method, in_interface: bool) {
    if let Some(doc) = &method.doc {
        write_doc(out, doc, 1);
    }
    if method.overrides {
        push_indent(out, 1);
        out.push_str("@Override\n");
    }

    push_indent(out, 1);
    // Interface members are implicitly public abstract
    let implicit = in_interface && method.is_abstract;
    if !implicit {
        if let Some(keyword) = visibility_keyword(method.visibility) {
            out.push_str(keyword);
            out.push(' ');
        }
        if method.is_abstract {
            out.push_str("abstract ");
        }
    }
    if !method.is_constructor() {
        out.push_str(&method.return_type.to_source());
        out.push(' ');
    }
    out.push_str(&format!("{}({})", method.name, join_sources(&method.params)));

    if method.is_abstract {
        out.push_str(";\n");
        return;
    }
    out.push_str(" {\n");
    write_block(out, &method.body, 2);
    push_indent(out, 1);
    out.push_str("}\n");
}

impl ToSource for Declaration {
    /// The type declaration itself, without package clause or imports
    fn to_source(&self) -> String {
        let mut out = String::new();
        if let Some(keyword) = visibility_keyword(self.visibility) {
            out.push_str(keyword);
            out.push(' ');
        }
        match self.kind {
            DeclKind::Interface => out.push_str("interface "),
            DeclKind::Class => out.push_str("class "),
            DeclKind::AbstractClass => out.push_str("abstract class "),
        }
        out.push_str(&self.name);

        if let Some(superclass) = &self.superclass {
            out.push_str(&format!(" extends {}", superclass.to_source()));
        }
        if !self.interfaces.is_empty() {
            let keyword = match self.kind {
                DeclKind::Interface => "extends",
                _ => "implements",
            };
            out.push_str(&format!(" {} {}", keyword, join_sources(&self.interfaces)));
        }
        out.push_str(" {\n");

        let in_interface = self.kind == DeclKind::Interface;
        let mut first_member = true;
        if !self.fields.is_empty() {
            for field in &self.fields {
                write_field(&mut out, field);
            }
            first_member = false;
        }
        for method in &self.methods {
            if !first_member {
                out.push('\n');
            }
            write_method(&mut out, method, in_interface);
            first_member = false;
        }

        out.push_str("}\n");
        out
    }
}

/// Render a complete compilation unit for `decl` in `package`
pub fn render_file(package: &str, decl: &Declaration, file_comment: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(comment) = file_comment {
        for line in comment.lines() {
            out.push_str(&format!("// {line}\n"));
        }
    }
    out.push_str(&format!("package {package};\n\n"));

    let imports = decl.imports();
    if !imports.is_empty() {
        for import in &imports {
            out.push_str(&format!("import {import};\n"));
        }
        out.push('\n');
    }

    out.push_str(&decl.to_source());
    out
}

// Helper function to escape string characters
fn escape_string(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '"' => r#"\""#.to_string(),
            '\\' => r"\\".to_string(),
            '\n' => r"\n".to_string(),
            '\r' => r"\r".to_string(),
            '\t' => r"\t".to_string(),
            c => c.to_string(),
        })
        .collect()
}
