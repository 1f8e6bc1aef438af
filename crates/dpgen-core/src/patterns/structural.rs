// Structural patterns: Facade

use crate::decl::{Declaration, Method, TypeRef};
use crate::naming::NamingConfig;

use super::USER_DOC;

pub(super) fn facade(names: &NamingConfig, class_name: &str) -> Vec<Declaration> {
    let fc = &names.facade;

    let abstract_facade = Declaration::abstract_class(&fc.abstract_class_name).method(
        Method::new(&fc.operation_method, TypeRef::Void)
            .doc(USER_DOC)
            .into_abstract(),
    );

    // Empty override, left for the caller's subsystem calls
    let facade = Declaration::class(class_name)
        .extends(TypeRef::named(&fc.abstract_class_name))
        .method(
            Method::new(&fc.operation_method, TypeRef::Void)
                .overriding()
                .doc(USER_DOC),
        );

    vec![abstract_facade, facade]
}
