//! Go spelling rules for the source writer.

use std::fmt::Write;

use restack_codegen::{ImportCollector, Literal, Syntax};

/// [`Syntax`] for Go source files.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoSyntax;

impl Syntax for GoSyntax {
    fn literal(&self, literal: &Literal) -> String {
        match literal {
            Literal::Nil => "nil".to_string(),
            Literal::Bool(v) => v.to_string(),
            Literal::Int(v) => v.to_string(),
            Literal::UInt(v) => v.to_string(),
            Literal::Float(v) => float(*v),
            Literal::Str(s) => quote(s),
            Literal::Char(c) => quote_rune(*c),
        }
    }

    fn prelude(&self, package: &str, header: &[String], imports: &ImportCollector) -> String {
        let mut out = String::new();
        for line in header {
            if line.is_empty() {
                out.push_str("//\n");
            } else {
                let _ = writeln!(out, "// {line}");
            }
        }
        let _ = writeln!(out, "package {package}");

        let imports = imports.sorted();
        match imports.as_slice() {
            [] => {}
            [path] => {
                let _ = writeln!(out, "\nimport {}", quote(path));
            }
            paths => {
                out.push_str("\nimport (\n");
                for path in paths {
                    let _ = writeln!(out, "\t{}", quote(path));
                }
                out.push_str(")\n");
            }
        }
        out
    }
}

/// Interpreted string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => escape_common(&mut out, other),
        }
    }
    out.push('"');
    out
}

fn quote_rune(c: char) -> String {
    let mut out = String::from("'");
    match c {
        '\'' => out.push_str("\\'"),
        '\\' => out.push_str("\\\\"),
        other => escape_common(&mut out, other),
    }
    out.push('\'');
    out
}

fn escape_common(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c.is_control() && (c as u32) < 0x80 => {
            let _ = write!(out, "\\x{:02x}", c as u32);
        }
        c if c.is_control() => {
            let _ = write!(out, "\\u{:04x}", c as u32);
        }
        c => out.push(c),
    }
}

/// Float constant. Non-finite values need the `math` import.
fn float(v: f64) -> String {
    if v.is_nan() {
        "math.NaN()".to_string()
    } else if v.is_infinite() {
        format!("math.Inf({})", if v > 0.0 { 1 } else { -1 })
    } else {
        // Debug keeps a fractional part for whole numbers ("1.0")
        format!("{v:?}")
    }
}
