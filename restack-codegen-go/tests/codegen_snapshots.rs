//! Snapshot tests for Go code generation.
//!
//! These tests verify that the generated Go code matches expected output.
//! Run `cargo insta review` to update snapshots when making intentional changes.

use restack_ast::{BaseType, Builder, Direction, MemoryLayout, Operator, Package, Scalar, define};
use restack_codegen_go::{GoRenderer, RenderConfig};

/// Build a package and render it with `config`.
fn render_with(config: RenderConfig, name: &str, body: impl FnOnce(&mut Builder)) -> String {
    let package = define(Package::new(name), body)
        .into_result()
        .expect("Failed to build package");
    GoRenderer::new(config)
        .render(&package)
        .expect("Failed to render package")
}

fn render(name: &str, body: impl FnOnce(&mut Builder)) -> String {
    render_with(RenderConfig::default(), name, body)
}

#[test]
fn test_empty_package() {
    let output = render("models", |_| {});
    insta::assert_snapshot!("empty_package", output);
}

#[test]
fn test_user_model() {
    let output = render("models", |b| {
        b.version("1.0.0");
        b.description("Package models holds persisted records.");
        b.data("User", |b| {
            b.description("User is an account holder.");
            b.field("Name", |b| {
                b.ty(BaseType::String);
            });
            b.field("Age", |b| {
                b.ty(BaseType::Integer);
            });
            b.method("Save", |b| {
                b.description("Save persists the user.");
                b.pointer();
                b.result("", |b| {
                    b.ty(BaseType::Error);
                });
                b.returns(|b| {
                    b.value(Scalar::Nil);
                });
            });
        });
    });
    insta::assert_snapshot!("user_model", output);
}

#[test]
fn test_control_flow() {
    let output = render("worker", |b| {
        b.data("Job", |b| {
            b.field("ID", |b| {
                b.sized(BaseType::Integer, MemoryLayout::Bit64);
                b.annotation("json", "id");
            });
            b.field("Payload", |b| {
                b.ty(BaseType::String);
                b.annotation("json", "payload");
            });
            b.field("Queued", |b| {
                b.ty(BaseType::Time);
                b.annotation("json", "queued_at");
            });
        });
        b.function("Drain", |b| {
            b.argument("jobs", |b| {
                b.channel(|b| {
                    b.direction(Direction::Incoming);
                    b.named("Job");
                });
            });
            b.argument("limit", |b| {
                b.ty(BaseType::Integer);
            });
            b.result("count", |b| {
                b.ty(BaseType::Integer);
            });
            b.result("err", |b| {
                b.ty(BaseType::Error);
            });
            b.loop_(|b| {
                b.condition(|b| {
                    b.literal("count");
                    b.set_operator(Operator::LessThan);
                    b.literal("limit");
                });
                b.call("receive", |b| {
                    b.literal("jobs");
                    b.result("job", |_| {});
                    b.result("ok", |_| {});
                    b.short();
                });
                b.if_(|b| {
                    b.condition(|b| {
                        b.set_operator(Operator::Not);
                        b.literal("ok");
                    });
                    b.returns(|b| {
                        b.literal("count");
                        b.value(Scalar::Nil);
                    });
                });
                b.switch(|b| {
                    b.literal("job.ID");
                    b.case(|b| {
                        b.value(0);
                        b.assign("err", |b| {
                            b.call("skip", |b| {
                                b.literal("job");
                            });
                        });
                    });
                    b.case(|b| {
                        b.assign("count", |b| {
                            b.set_operator(Operator::SelfAddition);
                            b.value(1);
                        });
                    });
                });
            });
            b.returns(|_| {});
        });
    });
    insta::assert_snapshot!("control_flow", output);
}

#[test]
fn test_configured_indent_and_receiver() {
    let config = RenderConfig::from_toml_str(
        r#"
        indent = 4
        receiver = "self"
        "#,
    )
    .expect("Failed to parse config");

    let output = render_with(config, "shapes", |b| {
        b.data("Point", |b| {
            b.field("X", |b| {
                b.ty(BaseType::Decimal);
            });
            b.field("Y", |b| {
                b.ty(BaseType::Decimal);
            });
            b.method("Sum", |b| {
                b.result("", |b| {
                    b.ty(BaseType::Decimal);
                });
                b.returns(|b| {
                    b.condition(|b| {
                        b.literal("self.X");
                        b.set_operator(Operator::Addition);
                        b.literal("self.Y");
                    });
                });
            });
        });
    });
    insta::assert_snapshot!("configured_indent_and_receiver", output);
}
