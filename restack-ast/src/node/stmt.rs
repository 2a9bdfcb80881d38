//! Statement and control-flow nodes.

use serde::{Deserialize, Serialize};

use super::{Attr, Condition, Construct, Header, Node, fill, header_access};
use crate::{Arity, Operator};

/// Push a statement into a body.
fn accept_statement(body: &mut Vec<Node>, child: Node) -> Result<(), Node> {
    if !child.kind().is_statement() {
        return Err(child);
    }
    body.push(child);
    Ok(())
}

/// Store a value, e.g. `x = 1`, `x := 1` or `x += 1`.
///
/// With an operator override the assignment renders that operator instead of
/// `=`/`:=`; a postfix operator needs no value (`i++`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Assignment {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<Node>>,
    /// Declare-and-assign rather than assign-to-existing.
    pub short: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

impl Assignment {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            header: Header::named(target),
            ..Self::default()
        }
    }
}

impl Construct for Assignment {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        match child {
            Node::Operator(op) if self.admits_operator(op.operator) => {
                self.operator = Some(op.operator);
                Ok(())
            }
            other if other.kind().is_expression() && !self.is_postfix() => {
                fill(&mut self.value, other)
            }
            other => Err(other),
        }
    }

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Short => self.short = true,
            Attr::Operator(op) if self.admits_operator(op) => self.operator = Some(op),
            other => return Err(other),
        }
        Ok(())
    }
}

impl Assignment {
    fn is_postfix(&self) -> bool {
        self.operator.is_some_and(|op| op.arity() == Arity::Postfix)
    }

    /// One operator per assignment, and a postfix one only without a value.
    fn admits_operator(&self, op: Operator) -> bool {
        self.operator.is_none() && (op.arity() != Arity::Postfix || self.value.is_none())
    }
}

/// `return` statement with ordered values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Return {
    pub header: Header,
    pub values: Vec<Node>,
}

impl Construct for Return {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        if !child.kind().is_expression() {
            return Err(child);
        }
        self.values.push(child);
        Ok(())
    }
}

/// Invocation of a function or method, optionally binding its results.
///
/// The header name is the callee expression, e.g. `user.Save`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Call {
    pub header: Header,
    pub arguments: Vec<Node>,
    /// Bindings receiving the call's outputs, by name.
    pub results: Vec<super::ResultParam>,
    /// Declare the result bindings rather than assign existing ones.
    pub short: bool,
}

impl Call {
    pub fn new(callee: impl Into<String>) -> Self {
        Self {
            header: Header::named(callee),
            ..Self::default()
        }
    }
}

impl Construct for Call {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        match child {
            Node::Result(result) => self.results.push(result),
            other if other.kind().is_expression() => self.arguments.push(other),
            other => return Err(other),
        }
        Ok(())
    }

    fn accept_attr(&mut self, attr: Attr) -> Result<(), Attr> {
        match attr {
            Attr::Short => {
                self.short = true;
                Ok(())
            }
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct If {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    pub body: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<Else>,
}

impl Construct for If {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        match child {
            Node::Condition(condition) if self.condition.is_none() => {
                self.condition = Some(condition);
                Ok(())
            }
            Node::Else(otherwise) if self.otherwise.is_none() => {
                self.otherwise = Some(otherwise);
                Ok(())
            }
            other => accept_statement(&mut self.body, other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Else {
    pub header: Header,
    pub body: Vec<Node>,
}

impl Construct for Else {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        accept_statement(&mut self.body, child)
    }
}

/// Three-clause loop: `for init; condition; post { ... }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct For {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init: Option<Clause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Clause>,
    pub body: Vec<Node>,
}

impl Construct for For {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        match child {
            Node::Condition(condition) if self.condition.is_none() => {
                self.condition = Some(condition);
                Ok(())
            }
            Node::Clause(clause) => {
                let slot = match clause.role {
                    ClauseRole::Init => &mut self.init,
                    ClauseRole::Post => &mut self.post,
                };
                if slot.is_some() {
                    return Err(Node::Clause(clause));
                }
                *slot = Some(clause);
                Ok(())
            }
            other => accept_statement(&mut self.body, other),
        }
    }
}

/// Position of a [`Clause`] in a [`For`] header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseRole {
    #[default]
    Init,
    Post,
}

/// Simple statement in a loop header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Clause {
    pub header: Header,
    pub role: ClauseRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<Box<Node>>,
}

impl Clause {
    pub fn new(role: ClauseRole) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }
}

impl Construct for Clause {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        match child {
            Node::Variable(_) | Node::Assignment(_) | Node::Call(_) => {
                fill(&mut self.statement, child)
            }
            other => Err(other),
        }
    }
}

/// Conditional or infinite loop.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Loop {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    pub body: Vec<Node>,
}

impl Construct for Loop {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        match child {
            Node::Condition(condition) if self.condition.is_none() => {
                self.condition = Some(condition);
                Ok(())
            }
            other => accept_statement(&mut self.body, other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Switch {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Box<Node>>,
    pub cases: Vec<Case>,
}

impl Construct for Switch {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        match child {
            Node::Case(case) => {
                self.cases.push(case);
                Ok(())
            }
            other if other.kind().is_expression() => fill(&mut self.subject, other),
            other => Err(other),
        }
    }
}

/// Switch arm. A case without matches is the default arm.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Case {
    pub header: Header,
    pub matches: Vec<Node>,
    pub body: Vec<Node>,
}

impl Case {
    pub fn is_default(&self) -> bool {
        self.matches.is_empty()
    }
}

impl Construct for Case {
    header_access!();

    fn accept_child(&mut self, child: Node) -> Result<(), Node> {
        match child {
            Node::Value(_) | Node::Condition(_) => {
                self.matches.push(child);
                Ok(())
            }
            other => accept_statement(&mut self.body, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Literal, OperatorNode, ResultParam, Value, Variable};

    #[test]
    fn test_assignment_single_value() {
        let mut assign = Node::from(Assignment::new("x"));
        assign.accept(Node::from(Value::new(1))).unwrap();
        assert!(assign.accept(Node::from(Value::new(2))).is_err());
        assign.accept(Attr::Short).unwrap();

        let Node::Assignment(assign) = assign else {
            panic!("Expected Assignment variant");
        };
        assert!(assign.short);
        assert_eq!(assign.value.as_deref(), Some(&Node::from(Value::new(1))));
    }

    #[test]
    fn test_assignment_operator_node() {
        let mut assign = Node::from(Assignment::new("i"));
        assign
            .accept(Node::from(OperatorNode::new(Operator::Increment)))
            .unwrap();
        let Node::Assignment(assign) = assign else {
            panic!("Expected Assignment variant");
        };
        assert_eq!(assign.operator, Some(Operator::Increment));
        assert!(assign.value.is_none());
    }

    #[test]
    fn test_postfix_assignment_takes_no_value() {
        let mut assign = Node::from(Assignment::new("i"));
        assign.accept(Attr::Operator(Operator::Increment)).unwrap();
        let err = assign.accept(Node::from(Value::new(1))).unwrap_err();
        assert!(err.is_not_applicable());

        // value first, then a postfix operator
        let mut assign = Node::from(Assignment::new("i"));
        assign.accept(Node::from(Value::new(1))).unwrap();
        assert!(assign.accept(Attr::Operator(Operator::Decrement)).is_err());
        assert!(
            assign
                .accept(Node::from(OperatorNode::new(Operator::Increment)))
                .is_err()
        );
        // compound operators still combine with a value
        assign.accept(Attr::Operator(Operator::SelfAddition)).unwrap();

        let Node::Assignment(assign) = assign else {
            panic!("Expected Assignment variant");
        };
        assert_eq!(assign.operator, Some(Operator::SelfAddition));
        assert_eq!(assign.value.as_deref(), Some(&Node::from(Value::new(1))));
    }

    #[test]
    fn test_assignment_operator_set_once() {
        let mut assign = Node::from(Assignment::new("total"));
        assign.accept(Attr::Operator(Operator::SelfAddition)).unwrap();
        assert!(assign.accept(Attr::Operator(Operator::SelfSubtraction)).is_err());
        assert!(
            assign
                .accept(Node::from(OperatorNode::new(Operator::SelfMultiplication)))
                .is_err()
        );

        let Node::Assignment(assign) = assign else {
            panic!("Expected Assignment variant");
        };
        assert_eq!(assign.operator, Some(Operator::SelfAddition));
    }

    #[test]
    fn test_call_routes_results_and_arguments() {
        let mut call = Node::from(Call::new("user.Save"));
        call.accept(Node::from(Literal::new("ctx"))).unwrap();
        call.accept(Node::from(ResultParam::new("err"))).unwrap();
        assert!(call.accept(Node::from(Variable::new("x"))).is_err());

        let Node::Call(call) = call else {
            panic!("Expected Call variant");
        };
        assert_eq!(call.arguments.len(), 1);
        assert_eq!(call.results.len(), 1);
    }

    #[test]
    fn test_if_condition_then_body() {
        let mut node = Node::from(If::default());
        node.accept(Node::from(Condition::default())).unwrap();
        node.accept(Node::from(Literal::new("return"))).unwrap();
        node.accept(Node::from(Else::default())).unwrap();

        // second condition is neither a slot nor a statement
        assert!(node.accept(Node::from(Condition::default())).is_err());
        assert!(node.accept(Node::from(Else::default())).is_err());

        let Node::If(node) = node else {
            panic!("Expected If variant");
        };
        assert!(node.condition.is_some());
        assert_eq!(node.body.len(), 1);
        assert!(node.otherwise.is_some());
    }

    #[test]
    fn test_for_clauses() {
        let mut node = Node::from(For::default());
        node.accept(Node::from(Clause::new(ClauseRole::Init))).unwrap();
        node.accept(Node::from(Clause::new(ClauseRole::Post))).unwrap();
        assert!(node.accept(Node::from(Clause::new(ClauseRole::Post))).is_err());
    }

    #[test]
    fn test_clause_accepts_simple_statements_only() {
        let mut clause = Node::from(Clause::new(ClauseRole::Init));
        assert!(clause.accept(Node::from(If::default())).is_err());
        clause.accept(Node::from(Assignment::new("i"))).unwrap();
        assert!(clause.accept(Node::from(Assignment::new("j"))).is_err());
    }

    #[test]
    fn test_case_matches_and_body() {
        let mut case = Node::from(Case::default());
        case.accept(Node::from(Value::new("a"))).unwrap();
        case.accept(Node::from(Literal::new("break"))).unwrap();
        let Node::Case(case) = case else {
            panic!("Expected Case variant");
        };
        assert_eq!(case.matches.len(), 1);
        assert_eq!(case.body.len(), 1);
        assert!(!case.is_default());
    }

    #[test]
    fn test_switch_single_subject() {
        let mut switch = Node::from(Switch::default());
        switch.accept(Node::from(Literal::new("kind"))).unwrap();
        assert!(switch.accept(Node::from(Literal::new("other"))).is_err());
        switch.accept(Node::from(Case::default())).unwrap();
    }
}
