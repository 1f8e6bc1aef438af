// Creational patterns: Abstract Factory, Builder, Factory Method
// All three share the product contract (interface) and concrete product.

use crate::decl::{Declaration, Expr, Field, Method, Stmt, TypeRef};
use crate::naming::NamingConfig;

use super::{Product, USER_DOC};

/// Product interface with one no-arg method returning String
fn product_interface(names: &NamingConfig, product: &Product<'_>) -> Declaration {
    Declaration::interface(product.ty).method(
        Method::new(&names.abstract_factory.get_name_method, TypeRef::String).into_abstract(),
    )
}

/// Concrete product returning its own name
fn product_class(names: &NamingConfig, product: &Product<'_>) -> Declaration {
    Declaration::class(product.name)
        .implements(TypeRef::named(product.ty))
        .method(
            Method::new(&names.abstract_factory.get_name_method, TypeRef::String)
                .overriding()
                .stmt(Stmt::Return(Expr::String(product.name.to_string()))),
        )
}

pub(super) fn abstract_factory(
    names: &NamingConfig,
    class_name: &str,
    product: &Product<'_>,
) -> Vec<Declaration> {
    let af = &names.abstract_factory;
    let create_method = format!("{}{}", af.create_method_prefix, product.ty);
    let product_type = TypeRef::named(product.ty);

    let factory_interface = Declaration::interface(&af.interface_name)
        .method(Method::new(&create_method, product_type.clone()).into_abstract());

    let factory = Declaration::class(class_name)
        .implements(TypeRef::named(&af.interface_name))
        .method(
            Method::new(&create_method, product_type)
                .overriding()
                .stmt(Stmt::Return(Expr::new_instance(TypeRef::named(product.name)))),
        );

    vec![
        product_interface(names, product),
        product_class(names, product),
        factory_interface,
        factory,
    ]
}

pub(super) fn builder(
    names: &NamingConfig,
    class_name: &str,
    product: &Product<'_>,
) -> Vec<Declaration> {
    let b = &names.builder;
    let part = TypeRef::named(product.ty);
    let complex = TypeRef::named(class_name);

    // Insertion-ordered, duplicates allowed; the accessor hands out a fresh
    // single-pass iterator
    let complex_object = Declaration::class(class_name)
        .field(
            Field::new(TypeRef::list(part.clone()), &b.children_field)
                .initializer(Expr::new_instance(TypeRef::array_list(part.clone()))),
        )
        .method(
            Method::new(&b.add_method, TypeRef::Boolean)
                .param(part.clone(), &b.child_param)
                .stmt(Stmt::Return(Expr::call_on(
                    Expr::ident(&b.children_field),
                    "add",
                    vec![Expr::ident(&b.child_param)],
                ))),
        )
        .method(
            Method::new(&b.iterator_method, TypeRef::iterator(part))
                .stmt(Stmt::Return(Expr::call_on(
                    Expr::ident(&b.children_field),
                    "iterator",
                    Vec::new(),
                ))),
        );

    let builder_interface = Declaration::interface(&b.interface_name)
        .method(Method::new(&b.build_part_method, TypeRef::Void).into_abstract())
        .method(Method::new(&b.get_result_method, complex.clone()).into_abstract());

    let concrete_builder = Declaration::class(&b.concrete_builder_name)
        .implements(TypeRef::named(&b.interface_name))
        .field(
            Field::new(complex.clone(), &b.complex_object_field)
                .initializer(Expr::new_instance(complex.clone())),
        )
        .method(
            Method::new(&b.build_part_method, TypeRef::Void)
                .overriding()
                .stmt(Stmt::Expr(Expr::call_on(
                    Expr::ident(&b.complex_object_field),
                    &b.add_method,
                    vec![Expr::new_instance(TypeRef::named(product.name))],
                ))),
        )
        .method(
            Method::new(&b.get_result_method, complex)
                .overriding()
                .stmt(Stmt::Return(Expr::ident(&b.complex_object_field))),
        );

    vec![
        complex_object,
        builder_interface,
        concrete_builder,
        product_interface(names, product),
        product_class(names, product),
    ]
}

pub(super) fn factory_method(
    names: &NamingConfig,
    class_name: &str,
    product: &Product<'_>,
) -> Vec<Declaration> {
    let f = &names.factory;
    let product_type = TypeRef::named(product.ty);

    let creator = Declaration::abstract_class(&f.creator_class_name)
        .field(Field::new(product_type.clone(), &f.product_field))
        .method(Method::new(&f.factory_method, product_type.clone()).into_abstract())
        .method(
            Method::new(&f.operation_method, TypeRef::Void)
                .doc(USER_DOC)
                .stmt(Stmt::Assign {
                    target: Expr::ident(&f.product_field),
                    value: Expr::call(&f.factory_method, Vec::new()),
                }),
        );

    let concrete_creator = Declaration::class(class_name)
        .extends(TypeRef::named(&f.creator_class_name))
        .method(
            Method::new(&f.factory_method, product_type)
                .overriding()
                .stmt(Stmt::Return(Expr::new_instance(TypeRef::named(product.name)))),
        );

    vec![
        product_interface(names, product),
        product_class(names, product),
        creator,
        concrete_creator,
    ]
}
