// Behavioral patterns: Chain of Responsibility, Mediator, Visitor, Template Method

use crate::decl::{Declaration, Expr, Field, Method, Stmt, TypeRef, Visibility};
use crate::naming::NamingConfig;

/// Concrete colleagues of the mediator pattern
const COLLEAGUE_COUNT: u32 = 2;

fn indexed(base: &str, index: u32) -> String {
    format!("{base}{index}")
}

/// Abstract handler `class_name` followed by the receiver chain
///
/// Every receiver but the last takes a successor and falls back to the
/// handler's delegation; the last one handles unconditionally.
pub(super) fn chain(names: &NamingConfig, class_name: &str) -> Vec<Declaration> {
    let c = &names.chain;
    let handler = TypeRef::named(class_name);
    let successor = c.successor_field.as_str();
    let handle = c.handle_request_method.as_str();

    let abstract_handler = Declaration::abstract_class(class_name)
        .field(Field::new(handler.clone(), successor))
        .method(Method::constructor(class_name))
        .method(
            Method::constructor(class_name)
                .param(handler.clone(), successor)
                .stmt(Stmt::Assign {
                    target: Expr::this_field(successor),
                    value: Expr::ident(successor),
                }),
        )
        .method(Method::new(handle, TypeRef::Void).stmt(Stmt::If {
            condition: Expr::NotEqual {
                left: Box::new(Expr::ident(successor)),
                right: Box::new(Expr::Null),
            },
            then_branch: vec![Stmt::Expr(Expr::call_on(
                Expr::ident(successor),
                handle,
                Vec::new(),
            ))],
            else_branch: None,
        }))
        .method(
            Method::new(&c.can_handle_method, TypeRef::Boolean)
                .stmt(Stmt::comment("Checking run-time conditions ..."))
                .stmt(Stmt::Return(Expr::Boolean(false))),
        );

    let count = c.number_of_class;
    let mut declarations = vec![abstract_handler];
    for index in 1..=count {
        let name = indexed(&c.receiver_class_name, index);
        let receiver = Declaration::class(&name).extends(handler.clone());

        let receiver = if index < count {
            receiver
                .method(
                    Method::constructor(&name)
                        .param(handler.clone(), successor)
                        .stmt(Stmt::SuperConstructor {
                            args: vec![Expr::ident(successor)],
                        }),
                )
                .method(Method::new(handle, TypeRef::Void).overriding().stmt(Stmt::If {
                    condition: Expr::call(&c.can_handle_method, Vec::new()),
                    then_branch: vec![Stmt::comment("Handle the request here")],
                    else_branch: Some(vec![Stmt::Expr(Expr::call_on(
                        Expr::Super,
                        handle,
                        Vec::new(),
                    ))]),
                }))
        } else {
            receiver.method(
                Method::new(handle, TypeRef::Void)
                    .overriding()
                    .stmt(Stmt::comment("Must handle the request unconditionally")),
            )
        };
        declarations.push(receiver);
    }
    declarations
}

/// Abstract mediator, concrete mediator `class_name`, abstract colleague and
/// two concrete colleagues wired through it
pub(super) fn mediator(names: &NamingConfig, class_name: &str) -> Vec<Declaration> {
    let m = &names.mediator;
    let mediator_type = TypeRef::named(&m.mediator_class_name);
    let colleague_type = TypeRef::named(&m.colleague_class_name);
    let state = m.state_variable.as_str();

    let abstract_mediator = Declaration::abstract_class(&m.mediator_class_name).method(
        Method::new(&m.mediate_method, TypeRef::Void)
            .param(colleague_type.clone(), &m.colleague_variable)
            .into_abstract(),
    );

    let mut concrete_mediator = Declaration::class(class_name).extends(mediator_type.clone());
    let mut set_colleagues = Method::new(&m.set_colleagues_method, TypeRef::Void);
    for index in 1..=COLLEAGUE_COUNT {
        let ty = TypeRef::named(indexed(&m.colleague_class_name, index));
        let var = indexed(&m.colleague_variable, index);
        concrete_mediator = concrete_mediator.field(Field::new(ty.clone(), &var));
        set_colleagues = set_colleagues.param(ty, &var).stmt(Stmt::Assign {
            target: Expr::this_field(&var),
            value: Expr::ident(&var),
        });
    }

    // A change on one colleague is forwarded to the other one's action
    let mut mediate = Method::new(&m.mediate_method, TypeRef::Void)
        .overriding()
        .param(colleague_type.clone(), &m.colleague_variable);
    for (from, to) in [(1, 2), (2, 1)] {
        let source = indexed(&m.colleague_variable, from);
        let sink = indexed(&m.colleague_variable, to);
        mediate = mediate.stmt(Stmt::If {
            condition: Expr::Equal {
                left: Box::new(Expr::ident(&m.colleague_variable)),
                right: Box::new(Expr::ident(&source)),
            },
            then_branch: vec![
                Stmt::comment(format!("Performing an action on {sink}")),
                Stmt::Local {
                    ty: TypeRef::String,
                    name: state.to_string(),
                    value: Expr::call_on(Expr::ident(&source), &m.get_state_method, Vec::new()),
                },
                Stmt::Expr(Expr::call_on(
                    Expr::ident(&sink),
                    indexed(&m.action_method, to),
                    vec![Expr::ident(state)],
                )),
            ],
            else_branch: None,
        });
    }
    let concrete_mediator = concrete_mediator.method(set_colleagues).method(mediate);

    let abstract_colleague = Declaration::abstract_class(&m.colleague_class_name)
        .field(Field::new(mediator_type.clone(), &m.mediator_variable).visibility(Visibility::Protected))
        .method(
            Method::constructor(&m.colleague_class_name)
                .param(mediator_type.clone(), &m.mediator_variable)
                .stmt(Stmt::Assign {
                    target: Expr::this_field(&m.mediator_variable),
                    value: Expr::ident(&m.mediator_variable),
                }),
        );

    let mut declarations = vec![abstract_mediator, concrete_mediator, abstract_colleague];
    for index in 1..=COLLEAGUE_COUNT {
        let name = indexed(&m.colleague_class_name, index);
        let colleague = Declaration::class(&name)
            .extends(colleague_type.clone())
            .field(Field::new(TypeRef::String, state))
            .method(
                Method::constructor(&name)
                    .param(mediator_type.clone(), &m.mediator_variable)
                    .stmt(Stmt::SuperConstructor {
                        args: vec![Expr::ident(&m.mediator_variable)],
                    }),
            )
            .method(
                Method::new(&m.get_state_method, TypeRef::String)
                    .stmt(Stmt::Return(Expr::ident(state))),
            )
            // Notify only on an actual change, compared by value
            .method(
                Method::new(&m.set_state_method, TypeRef::Void)
                    .param(TypeRef::String, state)
                    .stmt(Stmt::If {
                        condition: Expr::Not {
                            operand: Box::new(Expr::call_on(
                                Expr::TypeName(TypeRef::objects()),
                                "equals",
                                vec![Expr::this_field(state), Expr::ident(state)],
                            )),
                        },
                        then_branch: vec![
                            Stmt::Assign {
                                target: Expr::this_field(state),
                                value: Expr::ident(state),
                            },
                            Stmt::comment("Implement your code here"),
                            Stmt::Expr(Expr::call_on(
                                Expr::ident(&m.mediator_variable),
                                &m.mediate_method,
                                vec![Expr::This],
                            )),
                        ],
                        else_branch: None,
                    }),
            )
            .method(
                Method::new(indexed(&m.action_method, index), TypeRef::Void)
                    .param(TypeRef::String, state)
                    .stmt(Stmt::comment("For example, synchronizing and displaying state"))
                    .stmt(Stmt::Assign {
                        target: Expr::this_field(state),
                        value: Expr::ident(state),
                    })
                    .stmt(Stmt::comment("Implement your code here")),
            );
        declarations.push(colleague);
    }
    declarations
}

/// Element hierarchy, abstract visitor with one visit method per element,
/// and concrete visitor `class_name`
pub(super) fn visitor(names: &NamingConfig, class_name: &str) -> Vec<Declaration> {
    let v = &names.visitor;
    let count = v.number_of_visitor_methods;
    let element_type = TypeRef::named(&v.abstract_element_name);
    let visitor_type = TypeRef::named(&v.abstract_visitor_name);

    let visit_method = |index: u32| {
        Method::new(indexed(&v.visit_element_method, index), TypeRef::Void).param(
            TypeRef::named(indexed(&v.abstract_element_name, index)),
            &v.element_variable,
        )
    };

    let abstract_element = Declaration::abstract_class(&v.abstract_element_name).method(
        Method::new(&v.accept_method, TypeRef::Void)
            .param(visitor_type.clone(), &v.visitor_variable)
            .into_abstract(),
    );

    let mut declarations = vec![abstract_element];
    for index in 1..=count {
        let name = indexed(&v.abstract_element_name, index);
        declarations.push(
            Declaration::class(&name)
                .extends(element_type.clone())
                .method(
                    Method::new(&v.accept_method, TypeRef::Void)
                        .overriding()
                        .param(visitor_type.clone(), &v.visitor_variable)
                        .stmt(Stmt::Expr(Expr::call_on(
                            Expr::ident(&v.visitor_variable),
                            indexed(&v.visit_element_method, index),
                            vec![Expr::This],
                        ))),
                )
                .method(
                    Method::new(indexed(&v.operation_method, index), TypeRef::String)
                        .stmt(Stmt::Return(Expr::String(format!("Hello World from {name}")))),
                ),
        );
    }

    let abstract_visitor = Declaration::abstract_class(&v.abstract_visitor_name)
        .methods((1..=count).map(|index| visit_method(index).into_abstract()));

    let concrete_visitor = Declaration::class(class_name)
        .extends(visitor_type)
        .methods((1..=count).map(|index| visit_method(index).overriding()));

    declarations.push(abstract_visitor);
    declarations.push(concrete_visitor);
    declarations
}

/// Abstract template with two protected primitive operations and a concrete
/// subclass `class_name` overriding both
///
/// No orchestrating templateMethod() is generated.
pub(super) fn template(names: &NamingConfig, class_name: &str) -> Vec<Declaration> {
    let t = &names.template;
    let primitives = [&t.primitive_operation1, &t.primitive_operation2];

    let abstract_template = Declaration::abstract_class(&t.abstract_template_name).methods(
        primitives.iter().map(|name| {
            Method::new(*name, TypeRef::Void)
                .visibility(Visibility::Protected)
                .into_abstract()
        }),
    );

    let concrete_template = Declaration::class(class_name)
        .extends(TypeRef::named(&t.abstract_template_name))
        .methods(primitives.iter().map(|name| {
            Method::new(*name, TypeRef::Void)
                .visibility(Visibility::Protected)
                .overriding()
        }));

    vec![abstract_template, concrete_template]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{render_file, DeclKind};
    use pretty_assertions::assert_eq;

    fn names_and_kinds(declarations: &[Declaration]) -> Vec<(&str, DeclKind)> {
        declarations
            .iter()
            .map(|d| (d.name.as_str(), d.kind))
            .collect()
    }

    #[test]
    fn test_chain_default_topology() {
        let names = NamingConfig::default();
        let decls = chain(&names, "Handler");

        assert_eq!(
            names_and_kinds(&decls),
            vec![
                ("Handler", DeclKind::AbstractClass),
                ("Receiver1", DeclKind::Class),
                ("Receiver2", DeclKind::Class),
                ("Receiver3", DeclKind::Class),
            ]
        );

        let handler = &decls[0];
        assert_eq!(handler.constructors().count(), 2);
        assert_eq!(handler.fields[0].ty, TypeRef::named("Handler"));
        assert_eq!(handler.fields[0].visibility, Visibility::Private);

        for receiver in &decls[1..3] {
            let ctor = receiver.constructors().next().unwrap();
            assert_eq!(ctor.params.len(), 1);
            assert_eq!(ctor.params[0].ty, TypeRef::named("Handler"));
        }
        assert_eq!(decls[3].constructors().count(), 0);
        let terminal = decls[3].find_method("handleRequest").unwrap();
        assert_eq!(
            terminal.body,
            vec![Stmt::comment("Must handle the request unconditionally")]
        );
    }

    #[test]
    fn test_chain_respects_configured_count() {
        let mut names = NamingConfig::default();
        names.chain.number_of_class = 5;
        let decls = chain(&names, "Approver");
        assert_eq!(decls.len(), 6);
        assert_eq!(decls[5].name, "Receiver5");
        assert_eq!(decls[5].constructors().count(), 0);
        assert_eq!(decls[4].constructors().count(), 1);

        names.chain.number_of_class = 1;
        let decls = chain(&names, "Approver");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[1].constructors().count(), 0);
    }

    #[test]
    fn test_receiver_source() {
        let names = NamingConfig::default();
        let decls = chain(&names, "Handler");
        let expected = "\
package com.chain;

public class Receiver2 extends Handler {
  public Receiver2(Handler successor) {
    super(successor);
  }

  @Override
  public void handleRequest() {
    if (canHandle()) {
      // Handle the request here
    } else {
      super.handleRequest();
    }
  }
}
";
        assert_eq!(render_file("com.chain", &decls[2], None), expected);
    }

    #[test]
    fn test_abstract_handler_source() {
        let names = NamingConfig::default();
        let decls = chain(&names, "Handler");
        let expected = "\
public abstract class Handler {
  private Handler successor;

  public Handler() {
  }

  public Handler(Handler successor) {
    this.successor = successor;
  }

  public void handleRequest() {
    if (successor != null) {
      successor.handleRequest();
    }
  }

  public boolean canHandle() {
    // Checking run-time conditions ...
    return false;
  }
}
";
        assert_eq!(crate::decl::ToSource::to_source(&decls[0]), expected);
    }

    #[test]
    fn test_mediator_declarations() {
        let names = NamingConfig::default();
        let decls = mediator(&names, "ChatRoom");

        assert_eq!(
            names_and_kinds(&decls),
            vec![
                ("Mediator", DeclKind::AbstractClass),
                ("ChatRoom", DeclKind::Class),
                ("Colleague", DeclKind::AbstractClass),
                ("Colleague1", DeclKind::Class),
                ("Colleague2", DeclKind::Class),
            ]
        );

        let concrete = &decls[1];
        assert_eq!(concrete.superclass, Some(TypeRef::named("Mediator")));
        assert_eq!(concrete.fields.len(), 2);
        assert_eq!(concrete.find_method("setColleagues").unwrap().params.len(), 2);
        assert!(decls[3].find_method("action1").is_some());
        assert!(decls[4].find_method("action2").is_some());
    }

    #[test]
    fn test_set_state_notifies_only_on_change() {
        let names = NamingConfig::default();
        let decls = mediator(&names, "ChatRoom");
        let expected = "\
package com.chat;

import java.util.Objects;

public class Colleague1 extends Colleague {
  private String state;

  public Colleague1(Mediator mediator) {
    super(mediator);
  }

  public String getState() {
    return state;
  }

  public void setState(String state) {
    if (!Objects.equals(this.state, state)) {
      this.state = state;
      // Implement your code here
      mediator.mediate(this);
    }
  }

  public void action1(String state) {
    // For example, synchronizing and displaying state
    this.state = state;
    // Implement your code here
  }
}
";
        assert_eq!(render_file("com.chat", &decls[3], None), expected);
    }

    #[test]
    fn test_concrete_mediator_source() {
        let names = NamingConfig::default();
        let decls = mediator(&names, "ChatRoom");
        let expected = "\
public class ChatRoom extends Mediator {
  private Colleague1 colleague1;
  private Colleague2 colleague2;

  public void setColleagues(Colleague1 colleague1, Colleague2 colleague2) {
    this.colleague1 = colleague1;
    this.colleague2 = colleague2;
  }

  @Override
  public void mediate(Colleague colleague) {
    if (colleague == colleague1) {
      // Performing an action on colleague2
      String state = colleague1.getState();
      colleague2.action2(state);
    }
    if (colleague == colleague2) {
      // Performing an action on colleague1
      String state = colleague2.getState();
      colleague1.action1(state);
    }
  }
}
";
        assert_eq!(crate::decl::ToSource::to_source(&decls[1]), expected);
    }

    #[test]
    fn test_visitor_declarations() {
        let names = NamingConfig::default();
        let decls = visitor(&names, "PrintVisitor");

        assert_eq!(
            names_and_kinds(&decls),
            vec![
                ("Element", DeclKind::AbstractClass),
                ("Element1", DeclKind::Class),
                ("Element2", DeclKind::Class),
                ("Visitor", DeclKind::AbstractClass),
                ("PrintVisitor", DeclKind::Class),
            ]
        );

        let abstract_visitor = &decls[3];
        assert_eq!(abstract_visitor.abstract_methods().count(), 2);
        let concrete = &decls[4];
        let overridden: Vec<_> = concrete
            .methods
            .iter()
            .filter(|m| m.overrides)
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(overridden, vec!["visitElement1", "visitElement2"]);

        let operation = decls[2].find_method("operation2").unwrap();
        assert_eq!(
            operation.body,
            vec![Stmt::Return(Expr::String("Hello World from Element2".into()))]
        );
    }

    #[test]
    fn test_visitor_method_count_is_configurable() {
        let mut names = NamingConfig::default();
        names.visitor.number_of_visitor_methods = 4;
        let decls = visitor(&names, "PrintVisitor");

        let abstract_visitor = decls.iter().find(|d| d.name == "Visitor").unwrap();
        let concrete = decls.iter().find(|d| d.name == "PrintVisitor").unwrap();
        assert_eq!(abstract_visitor.abstract_methods().count(), 4);
        assert_eq!(concrete.methods.iter().filter(|m| m.overrides).count(), 4);
        assert!(decls.iter().any(|d| d.name == "Element4"));
        assert!(crate::decl::unresolved_references(&decls).is_empty());
    }

    #[test]
    fn test_template_source() {
        let names = NamingConfig::default();
        let decls = template(&names, "Report");
        assert_eq!(
            names_and_kinds(&decls),
            vec![("AbstractClass", DeclKind::AbstractClass), ("Report", DeclKind::Class)]
        );
        assert!(decls[0].find_method("templateMethod").is_none());

        let expected = "\
public class Report extends AbstractClass {
  @Override
  protected void primitiveOperation1() {
  }

  @Override
  protected void primitiveOperation2() {
  }
}
";
        assert_eq!(crate::decl::ToSource::to_source(&decls[1]), expected);
    }
}
