use std::fmt;

use crate::ast::Literal;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Field path
    ///
    /// A run of letters, digits, underscores and dots. Dots stay part of the
    /// identifier, the converter splits them into nested keys.
    ///
    /// # Examples
    /// ```text
    /// status
    /// user.address.city
    /// _meta.created_at
    /// ```
    Identifier(String),

    /// Literal value: string, number, boolean, null or regex
    ///
    /// # Examples
    /// ```text
    /// 'admin'
    /// -6.2
    /// null
    /// /^adm/i
    /// ```
    Literal(Literal),

    /// Comparison operator, kept as its surface text
    ///
    /// The parser translates it through the operator table.
    ///
    /// # Examples
    /// ```text
    /// ==
    /// >=
    /// ~
    /// not-in
    /// ```
    Operator(String),

    // Grouping
    /// Left parenthesis, opens a group
    LParen,

    /// Right parenthesis, closes a group
    RParen,

    // Arrays
    /// Left bracket, opens an array literal
    LBracket,

    /// Right bracket
    RBracket,

    /// Comma between array elements
    Comma,

    // Logical
    /// Logical AND (`and`, `&&`)
    ///
    /// # Examples
    /// ```text
    /// age >= 18 and verified == true
    /// age >= 18 && verified == true
    /// ```
    And,

    /// Logical OR (`or`, `||`)
    Or,

    /// Negation (`not`, `!`)
    ///
    /// # Examples
    /// ```text
    /// not status == 'banned'
    /// !(a == 1 or b == 2)
    /// ```
    Not,
}

impl Token {
    /// Token class name
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Identifier(_) => "identifier",
            Token::Literal(_) => "literal",
            Token::Operator(_) => "operator",
            Token::LParen | Token::RParen => "grouping",
            Token::LBracket | Token::RBracket => "array",
            Token::Comma => "punctuation",
            Token::And | Token::Or => "boolean",
            Token::Not => "unary",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => f.write_str(name),
            Token::Literal(lit) => write!(f, "{}", lit),
            Token::Operator(op) => f.write_str(op),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::LBracket => f.write_str("["),
            Token::RBracket => f.write_str("]"),
            Token::Comma => f.write_str(","),
            Token::And => f.write_str("and"),
            Token::Or => f.write_str("or"),
            Token::Not => f.write_str("not"),
        }
    }
}
