//! Walks a package tree and emits Go through a [`Backend`].

use log::debug;
use restack_ast::{
    Annotation, Argument, Arity, Assignment, Call, Case, Clause, Comment, Condition, Data,
    DataType, Direction, Else, Field, For, Function, Header, If, Literal, Loop, Method, Node, NodeKind,
    Package, ResultParam, Return, Scalar, Switch, TypeDef, Variable,
};
use restack_codegen::{Backend, GeneratedFile, Indent, Line, SourceWriter, Token};

use crate::{
    GoSyntax, GoTypeMapper, Position, RenderConfig, RenderError, Result,
    naming::{receiver_name, safe_name},
    operators,
};

/// Renders a [`Package`] as one Go source file.
///
/// # Example
///
/// ```
/// use restack_ast::{BaseType, Package, define};
/// use restack_codegen_go::GoRenderer;
///
/// let package = define(Package::new("models"), |b| {
///     b.data("User", |b| {
///         b.field("Name", |b| {
///             b.ty(BaseType::String);
///         });
///     });
/// })
/// .into_result()
/// .unwrap();
///
/// let source = GoRenderer::default().render(&package).unwrap();
/// assert!(source.contains("type User struct {\n\tName string\n}\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GoRenderer {
    config: RenderConfig,
}

impl GoRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render to source text. Nothing is returned for a failed render.
    pub fn render(&self, package: &Package) -> Result<String> {
        let mut writer = SourceWriter::new(GoSyntax, Indent::from_width(self.config.indent));
        self.render_to(package, &mut writer)?;
        Ok(writer.finish())
    }

    /// Render into `<package>/<file_name>`.
    pub fn render_file(&self, package: &Package, file_name: &str) -> Result<GeneratedFile> {
        let content = self.render(package)?;
        let path = format!("{}/{file_name}", package.name());
        Ok(GeneratedFile::new(path, content))
    }

    /// Drive `backend` over the package, depth first and in child order.
    pub fn render_to<B: Backend>(&self, package: &Package, backend: &mut B) -> Result<()> {
        if package.name().is_empty() {
            return Err(RenderError::incomplete(NodeKind::Package, "", "name"));
        }
        debug!(
            "rendering package {} with {} declarations",
            package.name(),
            package.children.len()
        );

        backend.start_file(package.name(), &self.header_lines(&package.header));
        let mut emitter = Emitter {
            config: &self.config,
            types: GoTypeMapper,
            out: backend,
        };
        for (i, child) in package.children.iter().enumerate() {
            if i > 0 {
                emitter.out.blank();
            }
            emitter.declaration(child)?;
        }
        Ok(())
    }

    fn header_lines(&self, header: &Header) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(generated) = &self.config.generated_header {
            lines.push(generated.clone());
        }
        if let Some(version) = header.version.as_ref().filter(|_| self.config.version_comment) {
            lines.push(format!("Version: {version}"));
        }
        if !header.description.is_empty() {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(header.description.lines().map(str::to_string));
        }
        lines
    }
}

/// Per-render walking state.
struct Emitter<'a, B> {
    config: &'a RenderConfig,
    types: GoTypeMapper,
    out: &'a mut B,
}

impl<B: Backend> Emitter<'_, B> {
    fn doc(&mut self, header: &Header) {
        if !header.description.is_empty() {
            self.out.comment(&header.description);
        }
    }

    // Declaration position.

    fn declaration(&mut self, node: &Node) -> Result<()> {
        self.doc(node.header());
        match node {
            Node::TypeDef(ty) => self.type_def(ty),
            Node::Data(data) => self.data(data),
            Node::DataType(ty) => self.data_type(ty),
            Node::Function(func) => self.function(func),
            Node::Method(method) => {
                let receiver = method.receiver.as_deref().ok_or_else(|| {
                    RenderError::incomplete(NodeKind::Method, &method.header.name, "receiver")
                })?;
                self.method(receiver, method)
            }
            Node::Variable(var) => self.variable(var, true),
            Node::Comment(comment) => {
                self.comment(comment);
                Ok(())
            }
            Node::Annotation(annotation) => {
                self.annotation(annotation);
                Ok(())
            }
            Node::Package(_)
            | Node::Field(_)
            | Node::Argument(_)
            | Node::Result(_)
            | Node::Assignment(_)
            | Node::Return(_)
            | Node::Call(_)
            | Node::If(_)
            | Node::Else(_)
            | Node::For(_)
            | Node::Clause(_)
            | Node::Loop(_)
            | Node::Switch(_)
            | Node::Case(_)
            | Node::Condition(_)
            | Node::Operator(_)
            | Node::Literal(_)
            | Node::Value(_)
            | Node::Channel(_)
            | Node::Future(_)
            | Node::Stream(_) => Err(RenderError::unhandled(node.kind(), Position::Declaration)),
        }
    }

    fn type_def(&mut self, ty: &TypeDef) -> Result<()> {
        let name = require_name(NodeKind::TypeDef, &ty.header)?;
        let target = self.primitive(ty);
        self.out.line(type_decl(name).append(target));
        Ok(())
    }

    fn data_type(&mut self, ty: &DataType) -> Result<()> {
        let name = require_name(NodeKind::DataType, &ty.header)?;
        let target = ty
            .target
            .as_deref()
            .ok_or_else(|| RenderError::incomplete(NodeKind::DataType, name, "target type"))?;
        let target = self.type_ref(target)?;
        self.out.line(type_decl(name).append(target));
        Ok(())
    }

    fn data(&mut self, data: &Data) -> Result<()> {
        let name = require_name(NodeKind::Data, &data.header)?;
        if data.fields.is_empty() {
            self.out.line(type_decl(name).keyword("struct").punct("{}"));
        } else {
            self.out.open_block(type_decl(name).keyword("struct"));
            self.fields(&data.fields)?;
            self.out.close_block();
        }

        for method in &data.methods {
            self.out.blank();
            self.doc(&method.header);
            let receiver = method.receiver.as_deref().unwrap_or(name);
            self.method(receiver, method)?;
        }
        Ok(())
    }

    /// Struct fields with names, types and tags aligned in columns.
    fn fields(&mut self, fields: &[Field]) -> Result<()> {
        let mut rows = Vec::with_capacity(fields.len());
        for field in fields {
            let ty = field.ty.as_deref().ok_or_else(|| {
                RenderError::incomplete(NodeKind::Field, &field.header.name, "type")
            })?;
            let ty = self.type_ref(ty)?;
            let tag = struct_tag(&field.header.name, &field.tags)?;
            rows.push((field, ty, tag));
        }

        let name_width = rows
            .iter()
            .map(|(field, _, _)| field.header.name.chars().count())
            .max()
            .unwrap_or(0);
        let type_width = rows
            .iter()
            .filter(|(_, _, tag)| tag.is_some())
            .map(|(_, ty, _)| width(ty))
            .max()
            .unwrap_or(0);

        for (field, ty, tag) in rows {
            self.doc(&field.header);
            let name = &field.header.name;
            let mut line = Line::new();
            // an unnamed field embeds its type
            if !name.is_empty() {
                line = line
                    .ident(name.as_str())
                    .raw(pad(name.chars().count(), name_width))
                    .space();
            }
            let ty_width = width(&ty);
            line = line.append(ty);
            if let Some(tag) = tag {
                line = line.raw(pad(ty_width, type_width)).space().raw(tag);
            }
            self.out.line(line);
        }
        Ok(())
    }

    fn function(&mut self, func: &Function) -> Result<()> {
        let name = require_name(NodeKind::Function, &func.header)?;
        let signature = self.signature(name, &func.arguments, &func.results)?;
        self.out.open_block(Line::new().keyword("func").space().append(signature));
        self.body(&func.body)?;
        self.out.close_block();
        Ok(())
    }

    fn method(&mut self, receiver_type: &str, method: &Method) -> Result<()> {
        let name = require_name(NodeKind::Method, &method.header)?;
        let receiver = match &self.config.receiver {
            Some(receiver) => receiver.clone(),
            None => receiver_name(receiver_type),
        };
        let shadowed = method
            .arguments
            .iter()
            .map(|argument| &argument.header.name)
            .chain(method.results.iter().map(|result| &result.header.name))
            .any(|param| !param.is_empty() && param_name(param) == receiver);
        if shadowed {
            return Err(RenderError::receiver_collision(name, &receiver));
        }
        let mut recv = Line::new().punct("(").ident(receiver).space();
        if method.pointer {
            recv = recv.op("*");
        }
        recv = recv.ident(receiver_type).punct(")");

        let signature = self.signature(name, &method.arguments, &method.results)?;
        self.out.open_block(
            Line::new()
                .keyword("func")
                .space()
                .append(recv)
                .space()
                .append(signature),
        );
        self.body(&method.body)?;
        self.out.close_block();
        Ok(())
    }

    /// `Name(args) results`
    fn signature(
        &mut self,
        name: &str,
        arguments: &[Argument],
        results: &[ResultParam],
    ) -> Result<Line> {
        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            let ty = argument.ty.as_deref().ok_or_else(|| {
                RenderError::incomplete(NodeKind::Argument, &argument.header.name, "type")
            })?;
            let ty = self.type_ref(ty)?;
            let mut arg = Line::new().ident(param_name(&argument.header.name)).space();
            if argument.variadic {
                arg = arg.op("...");
            }
            args.push(arg.append(ty));
        }

        let mut line = Line::new()
            .ident(name)
            .punct("(")
            .append(Line::join(args, ","))
            .punct(")");
        if let Some(results) = self.results(results)? {
            line = line.space().append(results);
        }
        Ok(line)
    }

    fn results(&mut self, results: &[ResultParam]) -> Result<Option<Line>> {
        if results.is_empty() {
            return Ok(None);
        }
        let named = results.iter().any(|r| !r.header.name.is_empty());
        let mut items = Vec::with_capacity(results.len());
        for result in results {
            let ty = result.ty.as_deref().ok_or_else(|| {
                RenderError::incomplete(NodeKind::Result, &result.header.name, "type")
            })?;
            let ty = self.type_ref(ty)?;
            if named {
                items.push(
                    Line::new()
                        .ident(param_name(&result.header.name))
                        .space()
                        .append(ty),
                );
            } else {
                items.push(ty);
            }
        }

        if items.len() == 1 && !named {
            return Ok(items.pop());
        }
        Ok(Some(
            Line::new()
                .punct("(")
                .append(Line::join(items, ","))
                .punct(")"),
        ))
    }

    fn variable(&mut self, var: &Variable, top_level: bool) -> Result<()> {
        let name = safe_name(require_name(NodeKind::Variable, &var.header)?);
        let value = match &var.assign {
            Some(assign) => Some(self.assigned_value(assign)?),
            None => None,
        };
        let ty = match var.ty.as_deref() {
            Some(ty) => Some(self.type_ref(ty)?),
            None => None,
        };

        let short = var.assign.as_ref().is_some_and(|assign| assign.short);
        if let Some(value) = value
            .as_ref()
            .filter(|_| short && !top_level && !var.constant && ty.is_none())
        {
            self.out.line(
                Line::new()
                    .ident(name)
                    .space()
                    .op(":=")
                    .space()
                    .append(value.clone()),
            );
            return Ok(());
        }

        if var.constant && value.is_none() {
            return Err(RenderError::incomplete(NodeKind::Variable, &name, "value"));
        }
        if ty.is_none() && value.is_none() {
            return Err(RenderError::incomplete(NodeKind::Variable, &name, "type"));
        }

        let keyword = if var.constant { "const" } else { "var" };
        let mut line = Line::new().keyword(keyword).space().ident(name);
        if let Some(ty) = ty {
            line = line.space().append(ty);
        }
        if let Some(value) = value {
            line = line.space().op("=").space().append(value);
        }
        self.out.line(line);
        Ok(())
    }

    fn assigned_value(&mut self, assign: &Assignment) -> Result<Line> {
        let value = assign.value.as_deref().ok_or_else(|| {
            RenderError::incomplete(NodeKind::Assignment, &assign.header.name, "value")
        })?;
        self.expression(value)
    }

    fn comment(&mut self, comment: &Comment) {
        if !comment.lines.is_empty() {
            self.out.comment(&comment.lines.join("\n"));
        }
    }

    fn annotation(&mut self, annotation: &Annotation) {
        self.out.comment(&format!(
            "@{}({})",
            annotation.header.name, annotation.content
        ));
    }

    // Statement position.

    fn body(&mut self, body: &[Node]) -> Result<()> {
        for node in body {
            self.statement(node)?;
        }
        Ok(())
    }

    fn statement(&mut self, node: &Node) -> Result<()> {
        self.doc(node.header());
        match node {
            Node::Variable(var) => self.variable(var, false),
            Node::Assignment(assign) => {
                let line = self.assignment(assign)?;
                self.out.line(line);
                Ok(())
            }
            Node::Return(ret) => self.return_(ret),
            Node::Call(call) => {
                let line = self.call_statement(call)?;
                self.out.line(line);
                Ok(())
            }
            Node::If(node) => self.if_(node),
            Node::For(node) => self.for_(node),
            Node::Loop(node) => self.loop_(node),
            Node::Switch(node) => self.switch(node),
            Node::Comment(comment) => {
                self.comment(comment);
                Ok(())
            }
            Node::Literal(literal) => {
                self.literal_lines(literal);
                Ok(())
            }
            Node::Package(_)
            | Node::TypeDef(_)
            | Node::Data(_)
            | Node::DataType(_)
            | Node::Field(_)
            | Node::Argument(_)
            | Node::Result(_)
            | Node::Method(_)
            | Node::Function(_)
            | Node::Else(_)
            | Node::Clause(_)
            | Node::Case(_)
            | Node::Condition(_)
            | Node::Operator(_)
            | Node::Annotation(_)
            | Node::Value(_)
            | Node::Channel(_)
            | Node::Future(_)
            | Node::Stream(_) => Err(RenderError::unhandled(node.kind(), Position::Statement)),
        }
    }

    fn literal_lines(&mut self, literal: &Literal) {
        for text in literal.text.lines() {
            self.out.line(Line::new().raw(text));
        }
    }

    fn assignment(&mut self, assign: &Assignment) -> Result<Line> {
        let target = require_name(NodeKind::Assignment, &assign.header)?;
        let target = Line::new().ident(target);

        let token = match assign.operator {
            Some(op) if op.arity() == Arity::Postfix => {
                if assign.value.is_some() {
                    return Err(RenderError::invalid_operator(op, NodeKind::Assignment));
                }
                return Ok(target.op(operators::token(op)));
            }
            Some(op) => operators::assignment(op)
                .ok_or_else(|| RenderError::invalid_operator(op, NodeKind::Assignment))?,
            None if assign.short => ":=",
            None => "=",
        };
        let value = self.assigned_value(assign)?;
        Ok(target.space().op(token).space().append(value))
    }

    fn return_(&mut self, ret: &Return) -> Result<()> {
        let mut values = Vec::with_capacity(ret.values.len());
        for value in &ret.values {
            values.push(self.expression(value)?);
        }
        let mut line = Line::new().keyword("return");
        if !values.is_empty() {
            line = line.space().append(Line::join(values, ","));
        }
        self.out.line(line);
        Ok(())
    }

    /// A call, binding its results when it has any.
    fn call_statement(&mut self, call: &Call) -> Result<Line> {
        let invocation = self.call(call)?;
        if call.results.is_empty() {
            return Ok(invocation);
        }
        let bindings = call
            .results
            .iter()
            .map(|result| Line::new().ident(param_name(&result.header.name)));
        let token = if call.short { ":=" } else { "=" };
        Ok(Line::join(bindings, ",")
            .space()
            .op(token)
            .space()
            .append(invocation))
    }

    fn call(&mut self, call: &Call) -> Result<Line> {
        let callee = require_name(NodeKind::Call, &call.header)?;
        let mut args = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            args.push(self.expression(argument)?);
        }
        Ok(Line::new()
            .ident(callee)
            .punct("(")
            .append(Line::join(args, ","))
            .punct(")"))
    }

    fn if_(&mut self, node: &If) -> Result<()> {
        let condition = self.required_condition(node.condition.as_ref(), NodeKind::If, &node.header)?;
        self.out
            .open_block(Line::new().keyword("if").space().append(condition));
        self.body(&node.body)?;

        let mut otherwise = node.otherwise.as_ref();
        while let Some(branch) = otherwise {
            match else_if(branch) {
                Some(nested) => {
                    let condition = self.required_condition(
                        nested.condition.as_ref(),
                        NodeKind::If,
                        &nested.header,
                    )?;
                    self.out.continue_block(
                        Line::new()
                            .keyword("else")
                            .space()
                            .keyword("if")
                            .space()
                            .append(condition),
                    );
                    self.body(&nested.body)?;
                    otherwise = nested.otherwise.as_ref();
                }
                None => {
                    self.out.continue_block(Line::new().keyword("else"));
                    self.doc(&branch.header);
                    self.body(&branch.body)?;
                    otherwise = None;
                }
            }
        }
        self.out.close_block();
        Ok(())
    }

    fn for_(&mut self, node: &For) -> Result<()> {
        let init = match &node.init {
            Some(clause) => Some(self.clause(clause)?),
            None => None,
        };
        let post = match &node.post {
            Some(clause) => Some(self.clause(clause)?),
            None => None,
        };
        let condition = match &node.condition {
            Some(condition) => Some(self.condition(condition)?),
            None => None,
        };

        let mut header = Line::new().keyword("for");
        if init.is_none() && post.is_none() {
            if let Some(condition) = condition {
                header = header.space().append(condition);
            }
        } else {
            header = header.space();
            if let Some(init) = init {
                header = header.append(init);
            }
            header = header.punct(";").space();
            if let Some(condition) = condition {
                header = header.append(condition);
            }
            header = header.punct(";");
            if let Some(post) = post {
                header = header.space().append(post);
            }
        }

        self.out.open_block(header);
        self.body(&node.body)?;
        self.out.close_block();
        Ok(())
    }

    /// Simple statement inside a `for` header.
    fn clause(&mut self, clause: &Clause) -> Result<Line> {
        let statement = clause
            .statement
            .as_deref()
            .ok_or_else(|| RenderError::incomplete(NodeKind::Clause, &clause.header.name, "statement"))?;
        match statement {
            Node::Assignment(assign) => self.assignment(assign),
            Node::Call(call) => self.call_statement(call),
            Node::Variable(var) => {
                let name = safe_name(require_name(NodeKind::Variable, &var.header)?);
                let assign = var
                    .assign
                    .as_ref()
                    .ok_or_else(|| RenderError::incomplete(NodeKind::Variable, &name, "value"))?;
                let value = self.assigned_value(assign)?;
                Ok(Line::new().ident(name).space().op(":=").space().append(value))
            }
            other => Err(RenderError::unhandled(other.kind(), Position::Statement)),
        }
    }

    fn loop_(&mut self, node: &Loop) -> Result<()> {
        let mut header = Line::new().keyword("for");
        if let Some(condition) = &node.condition {
            header = header.space().append(self.condition(condition)?);
        }
        self.out.open_block(header);
        self.body(&node.body)?;
        self.out.close_block();
        Ok(())
    }

    fn switch(&mut self, node: &Switch) -> Result<()> {
        let mut header = Line::new().keyword("switch");
        if let Some(subject) = node.subject.as_deref() {
            header = header.space().append(self.expression(subject)?);
        }
        self.out.open_block(header);
        for case in &node.cases {
            self.case(case)?;
        }
        self.out.close_block();
        Ok(())
    }

    fn case(&mut self, case: &Case) -> Result<()> {
        let label = if case.is_default() {
            Line::new().keyword("default").punct(":")
        } else {
            let mut matches = Vec::with_capacity(case.matches.len());
            for expr in &case.matches {
                matches.push(self.expression(expr)?);
            }
            Line::new()
                .keyword("case")
                .space()
                .append(Line::join(matches, ","))
                .punct(":")
        };

        // case labels sit at the switch's own level
        self.out.dedent();
        self.doc(&case.header);
        self.out.line(label);
        self.out.indent();
        self.body(&case.body)
    }

    // Expression position.

    fn expression(&mut self, node: &Node) -> Result<Line> {
        match node {
            Node::Value(value) => Ok(Line::new().literal(self.scalar(&value.value))),
            Node::Literal(literal) => Ok(Line::new().raw(literal.text.as_str())),
            Node::Call(call) => self.call(call),
            Node::Condition(condition) => self.condition(condition),
            Node::Package(_)
            | Node::TypeDef(_)
            | Node::Data(_)
            | Node::DataType(_)
            | Node::Field(_)
            | Node::Argument(_)
            | Node::Result(_)
            | Node::Variable(_)
            | Node::Assignment(_)
            | Node::Return(_)
            | Node::Method(_)
            | Node::Function(_)
            | Node::If(_)
            | Node::Else(_)
            | Node::For(_)
            | Node::Clause(_)
            | Node::Loop(_)
            | Node::Switch(_)
            | Node::Case(_)
            | Node::Operator(_)
            | Node::Comment(_)
            | Node::Annotation(_)
            | Node::Channel(_)
            | Node::Future(_)
            | Node::Stream(_) => Err(RenderError::unhandled(node.kind(), Position::Expression)),
        }
    }

    fn scalar(&mut self, value: &Scalar) -> restack_codegen::Literal {
        use restack_codegen::Literal as Lit;
        match value {
            Scalar::Nil => Lit::Nil,
            Scalar::Bool(v) => Lit::Bool(*v),
            Scalar::Int(v) => Lit::Int(*v),
            Scalar::UInt(v) => Lit::UInt(*v),
            Scalar::Float(v) => {
                if !v.is_finite() {
                    self.out.import("math");
                }
                Lit::Float(*v)
            }
            Scalar::Str(v) => Lit::Str(v.clone()),
            Scalar::Rune(v) => Lit::Char(*v),
        }
    }

    fn required_condition(
        &mut self,
        condition: Option<&Condition>,
        kind: NodeKind,
        header: &Header,
    ) -> Result<Line> {
        let condition =
            condition.ok_or_else(|| RenderError::incomplete(kind, &header.name, "condition"))?;
        self.condition(condition)
    }

    fn condition(&mut self, condition: &Condition) -> Result<Line> {
        let name = &condition.header.name;
        let left = condition
            .left
            .as_deref()
            .ok_or_else(|| RenderError::incomplete(NodeKind::Condition, name, "left operand"))?;
        let left = self.operand(left)?;

        match (condition.operator, condition.right.as_deref()) {
            (None, None) => Ok(left),
            (None, Some(_)) => Err(RenderError::incomplete(
                NodeKind::Condition,
                name,
                "operator",
            )),
            (Some(op), right) => match (op.arity(), right) {
                (Arity::Prefix, None) => Ok(Line::new().op(operators::token(op)).append(left)),
                (Arity::Binary, Some(right)) if !op.is_mutating() => {
                    let right = self.operand(right)?;
                    Ok(left
                        .space()
                        .op(operators::token(op))
                        .space()
                        .append(right))
                }
                (Arity::Binary, None) if !op.is_mutating() => Err(RenderError::incomplete(
                    NodeKind::Condition,
                    name,
                    "right operand",
                )),
                _ => Err(RenderError::invalid_operator(op, NodeKind::Condition)),
            },
        }
    }

    /// Operand of a condition; nested binary conditions are parenthesized.
    fn operand(&mut self, node: &Node) -> Result<Line> {
        let line = self.expression(node)?;
        match node {
            Node::Condition(inner) if inner.right.is_some() => {
                Ok(Line::new().punct("(").append(line).punct(")"))
            }
            _ => Ok(line),
        }
    }

    // Type position.

    fn type_ref(&mut self, node: &Node) -> Result<Line> {
        match node {
            Node::TypeDef(ty) if ty.header.name.is_empty() => Ok(self.primitive(ty)),
            Node::TypeDef(ty) => Ok(Line::new().ident(ty.header.name.as_str())),
            Node::Data(data) => Ok(Line::new().ident(require_name(NodeKind::Data, &data.header)?)),
            Node::DataType(ty) => match (ty.header.name.is_empty(), ty.target.as_deref()) {
                (false, _) => Ok(Line::new().ident(ty.header.name.as_str())),
                (true, Some(target)) => self.type_ref(target),
                (true, None) => Err(RenderError::incomplete(NodeKind::DataType, "", "name")),
            },
            Node::Channel(chan) => {
                let element = self.element(NodeKind::Channel, &chan.header, chan.element.as_deref())?;
                let prefix = match chan.direction {
                    Direction::Both => Line::new().keyword("chan"),
                    Direction::Incoming => Line::new().op("<-").keyword("chan"),
                    Direction::Outgoing => Line::new().keyword("chan").op("<-"),
                };
                Ok(prefix.space().append(element))
            }
            Node::Future(future) => {
                let element =
                    self.element(NodeKind::Future, &future.header, future.element.as_deref())?;
                Ok(Line::new().keyword("func").punct("()").space().append(element))
            }
            Node::Stream(stream) => {
                let element =
                    self.element(NodeKind::Stream, &stream.header, stream.element.as_deref())?;
                Ok(Line::new().op("<-").keyword("chan").space().append(element))
            }
            Node::Package(_)
            | Node::Field(_)
            | Node::Argument(_)
            | Node::Result(_)
            | Node::Variable(_)
            | Node::Assignment(_)
            | Node::Return(_)
            | Node::Method(_)
            | Node::Function(_)
            | Node::Call(_)
            | Node::If(_)
            | Node::Else(_)
            | Node::For(_)
            | Node::Clause(_)
            | Node::Loop(_)
            | Node::Switch(_)
            | Node::Case(_)
            | Node::Condition(_)
            | Node::Operator(_)
            | Node::Comment(_)
            | Node::Annotation(_)
            | Node::Literal(_)
            | Node::Value(_) => Err(RenderError::unhandled(node.kind(), Position::Type)),
        }
    }

    fn element(&mut self, kind: NodeKind, header: &Header, element: Option<&Node>) -> Result<Line> {
        let element =
            element.ok_or_else(|| RenderError::incomplete(kind, &header.name, "element type"))?;
        self.type_ref(element)
    }

    fn primitive(&mut self, ty: &TypeDef) -> Line {
        if let Some(path) = self.types.import_for(ty.kind) {
            self.out.import(path);
        }
        Line::new().ident(self.types.map_primitive(ty.kind, ty.memory))
    }
}

/// The `if` wrapped by an else branch that holds nothing else.
fn else_if(branch: &Else) -> Option<&If> {
    match branch.body.as_slice() {
        [Node::If(nested)]
            if branch.header.description.is_empty() && nested.header.description.is_empty() =>
        {
            Some(nested)
        }
        _ => None,
    }
}

fn require_name(kind: NodeKind, header: &Header) -> Result<&str> {
    if header.name.is_empty() {
        return Err(RenderError::incomplete(kind, "", "name"));
    }
    Ok(&header.name)
}

/// `type Name `
fn type_decl(name: &str) -> Line {
    Line::new().keyword("type").space().ident(name).space()
}

/// Parameter or binding name; unnamed ones are blank.
fn param_name(name: &str) -> String {
    if name.is_empty() {
        "_".to_string()
    } else {
        safe_name(name)
    }
}

/// Backquoted struct tag built from field annotations.
fn struct_tag(field: &str, tags: &[Annotation]) -> Result<Option<String>> {
    if tags.is_empty() {
        return Ok(None);
    }
    let mut pairs = Vec::with_capacity(tags.len());
    for tag in tags {
        let key = &tag.header.name;
        let valid_key = !key.is_empty()
            && !key
                .chars()
                .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '`' | '"' | ':'));
        // the tag itself is a raw string literal
        if !valid_key || tag.content.contains('`') {
            return Err(RenderError::invalid_tag(field, key));
        }
        pairs.push(format!("{key}:{}", crate::syntax::quote(&tag.content)));
    }
    Ok(Some(format!("`{}`", pairs.join(" "))))
}

/// Display width of a type line. Type lines never hold literals.
fn width(line: &Line) -> usize {
    line.tokens()
        .iter()
        .map(|token| match token {
            Token::Keyword(s)
            | Token::Ident(s)
            | Token::Operator(s)
            | Token::Punct(s)
            | Token::Raw(s) => s.chars().count(),
            Token::Space => 1,
            Token::Literal(_) => 0,
        })
        .sum()
}

fn pad(len: usize, column: usize) -> String {
    " ".repeat(column.saturating_sub(len))
}
