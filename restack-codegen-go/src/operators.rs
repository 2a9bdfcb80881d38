//! Go spelling of operators.

use restack_ast::Operator;

/// Token for `op` in an expression.
pub fn token(op: Operator) -> &'static str {
    match op {
        Operator::Assign => "=",
        Operator::Define => ":=",
        Operator::Equality => "==",
        Operator::NotEquality => "!=",
        Operator::LessThan => "<",
        Operator::GreaterThan => ">",
        Operator::LessThanEqualTo => "<=",
        Operator::GreaterThanEqualTo => ">=",
        Operator::Addition => "+",
        Operator::Subtraction => "-",
        Operator::Multiplication => "*",
        Operator::Division => "/",
        Operator::Modulo => "%",
        Operator::Increment => "++",
        Operator::Decrement => "--",
        Operator::SelfAddition => "+=",
        Operator::SelfSubtraction => "-=",
        Operator::SelfMultiplication => "*=",
        Operator::SelfDivision => "/=",
        Operator::SelfModulo => "%=",
        Operator::ConditionalAnd => "&&",
        Operator::ConditionalOr => "||",
        Operator::Not => "!",
        Operator::BitwiseAnd => "&",
        Operator::BitwiseOr => "|",
        Operator::BitwiseXor => "^",
        // unary ^ is bitwise complement in Go
        Operator::BitwiseNot => "^",
        Operator::BitClear => "&^",
        Operator::LeftShift => "<<",
        Operator::RightShift => ">>",
        Operator::AddressOf => "&",
        Operator::Dereference => "*",
        Operator::Receive => "<-",
    }
}

/// Assignment token for `op`, folding binary arithmetic into its compound
/// form (`Addition` assigns with `+=`).
pub fn assignment(op: Operator) -> Option<&'static str> {
    let token = match op {
        Operator::Assign
        | Operator::Define
        | Operator::SelfAddition
        | Operator::SelfSubtraction
        | Operator::SelfMultiplication
        | Operator::SelfDivision
        | Operator::SelfModulo => token(op),
        Operator::Addition => "+=",
        Operator::Subtraction => "-=",
        Operator::Multiplication => "*=",
        Operator::Division => "/=",
        Operator::Modulo => "%=",
        Operator::BitwiseAnd => "&=",
        Operator::BitwiseOr => "|=",
        Operator::BitwiseXor => "^=",
        Operator::BitClear => "&^=",
        Operator::LeftShift => "<<=",
        Operator::RightShift => ">>=",
        _ => return None,
    };
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_mutating_tokens() {
        assert_eq!(token(Operator::SelfAddition), "+=");
        assert_eq!(token(Operator::SelfDivision), "/=");
        assert_eq!(token(Operator::ConditionalOr), "||");
        assert_eq!(token(Operator::BitwiseNot), "^");
    }

    #[test]
    fn test_assignment_tokens() {
        assert_eq!(assignment(Operator::Define), Some(":="));
        assert_eq!(assignment(Operator::Addition), Some("+="));
        assert_eq!(assignment(Operator::BitClear), Some("&^="));
        assert_eq!(assignment(Operator::Equality), None);
        assert_eq!(assignment(Operator::Increment), None);
    }
}
