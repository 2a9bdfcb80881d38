use restack_ast::{
    BaseType, Builder, Error, Node, NodeKind, Operator, Package, define, describe, step,
};

fn user_model(b: &mut Builder) {
    b.data("User", |b| {
        b.field("Name", |b| {
            b.ty(BaseType::String);
        });
        b.field("Age", |b| {
            b.ty(BaseType::Integer);
        });
    });
}

#[test]
fn test_children_follow_call_order() {
    let build = define(Package::new("models"), |b| {
        b.function("First", |_| {});
        b.comment_line("between");
        b.function("Second", |_| {});
        b.variable("third", |b| {
            b.ty(BaseType::Bool);
        });
    });
    let package = build.into_result().unwrap();

    let labels: Vec<_> = package.children.iter().map(Node::describe).collect();
    assert_eq!(
        labels,
        [
            "function \"First\"",
            "comment",
            "function \"Second\"",
            "variable \"third\"",
        ]
    );
}

#[test]
fn test_user_model_tree() {
    let package = define(Package::new("models"), user_model)
        .into_result()
        .unwrap();

    let [Node::Data(user)] = package.children.as_slice() else {
        panic!("Expected a single Data child");
    };
    let fields: Vec<_> = user
        .fields
        .iter()
        .map(|field| field.header.name.as_str())
        .collect();
    assert_eq!(fields, ["Name", "Age"]);
}

#[test]
fn test_field_on_comment_is_not_applicable() {
    let build = define(Package::new("models"), |b| {
        b.data("Before", |_| {});
        b.comment(|b| {
            b.text("kept");
            b.field("Name", |b| {
                b.ty(BaseType::String);
            });
        });
        b.data("After", |_| {});
    });

    assert_eq!(
        build.error,
        Some(Error::not_applicable(NodeKind::Comment, "field \"Name\""))
    );

    // siblings and the comment itself are intact
    let kinds: Vec<_> = build.package.children.iter().map(Node::kind).collect();
    assert_eq!(kinds, [NodeKind::Data, NodeKind::Comment, NodeKind::Data]);
    let Node::Comment(comment) = &build.package.children[1] else {
        panic!("Expected Comment variant");
    };
    assert_eq!(comment.lines, ["kept"]);
}

#[test]
fn test_sticky_error_set_once() {
    let build = define(Package::new("p"), |b| {
        b.literal("first failure");
        b.value(1);
        assert!(b.is_failed());
    });
    assert_eq!(
        build.error,
        Some(Error::not_applicable(NodeKind::Package, "literal"))
    );
}

#[test]
fn test_second_singular_value_rejected() {
    let build = define(Package::new("p"), |b| {
        b.variable("x", |b| {
            b.ty(BaseType::String);
            b.ty(BaseType::Integer);
        });
    });
    assert!(build.error.as_ref().is_some_and(Error::is_not_applicable));

    let Node::Variable(var) = &build.package.children[0] else {
        panic!("Expected Variable variant");
    };
    let Some(Node::TypeDef(ty)) = var.ty.as_deref() else {
        panic!("Expected TypeDef type");
    };
    assert_eq!(ty.kind, BaseType::String);
}

#[test]
fn test_describe_stops_at_failure() {
    let steps = vec![
        step(user_model),
        step(|b| {
            b.set_operator(Operator::Addition);
        }),
        step(|b| {
            b.function("Unreached", |_| {});
        }),
    ];
    let build = describe(Package::new("models"), steps);

    assert!(build.error.is_some());
    assert_eq!(build.package.children.len(), 1);
}

#[test]
fn test_control_flow_tree() {
    let package = define(Package::new("loops"), |b| {
        b.function("Count", |b| {
            b.for_(|b| {
                b.init(|b| {
                    b.assign("i", |b| {
                        b.short().value(0);
                    });
                });
                b.condition(|b| {
                    b.literal("i");
                    b.operator(Operator::LessThan);
                    b.value(10);
                });
                b.post(|b| {
                    b.assign("i", |b| {
                        b.set_operator(Operator::Increment);
                    });
                });
                b.if_(|b| {
                    b.condition(|b| {
                        b.literal("i");
                        b.set_operator(Operator::Equality);
                        b.value(5);
                    });
                    b.literal("break");
                });
            });
        });
    })
    .into_result()
    .unwrap();

    let Node::Function(count) = &package.children[0] else {
        panic!("Expected Function variant");
    };
    let Node::For(for_loop) = &count.body[0] else {
        panic!("Expected For variant");
    };
    assert!(for_loop.init.is_some());
    assert!(for_loop.post.is_some());
    assert_eq!(
        for_loop.condition.as_ref().and_then(|c| c.operator),
        Some(Operator::LessThan)
    );
    assert_eq!(for_loop.body.len(), 1);
}

#[test]
fn test_json_round_trip() {
    let package = define(Package::new("models"), |b| {
        b.version("0.3.1");
        user_model(b);
        b.method("Save", |b| {
            b.receiver("User").pointer();
            b.result("", |b| {
                b.ty(BaseType::Error);
            });
            b.returns(|b| {
                b.literal("nil");
            });
        });
    })
    .into_result()
    .unwrap();

    let json = serde_json::to_string(&package).unwrap();
    let restored: Package = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, package);
    assert_eq!(restored.header.version.as_deref(), Some("0.3.1"));
}
