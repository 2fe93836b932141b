use std::fmt;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (`==` → `$eq`)
    Eq,
    /// Not equal (`!=` → `$ne`)
    Ne,
    /// Less than (`<` → `$lt`)
    Lt,
    /// Less than or equal (`<=` → `$lte`)
    Lte,
    /// Greater than (`>` → `$gt`)
    Gt,
    /// Greater than or equal (`>=` → `$gte`)
    Gte,
    /// Regex match (`~` → `$regex`)
    Regex,
    /// Membership (`in` → `$in`)
    In,
    /// Non-membership (`not-in` → `$nin`)
    NotIn,
}

const OPERATOR_TABLE: [(&str, Operator); 9] = [
    ("==", Operator::Eq),
    ("!=", Operator::Ne),
    ("<", Operator::Lt),
    ("<=", Operator::Lte),
    (">", Operator::Gt),
    (">=", Operator::Gte),
    ("~", Operator::Regex),
    ("in", Operator::In),
    ("not-in", Operator::NotIn),
];

impl Operator {
    /// Look up the surface form of an operator token.
    ///
    /// Keyword operators match case-insensitively, the same way the lexer reads them.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        OPERATOR_TABLE
            .iter()
            .find(|(text, _)| text.eq_ignore_ascii_case(symbol))
            .map(|(_, op)| *op)
    }

    /// Surface form as written in a query
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Regex => "~",
            Operator::In => "in",
            Operator::NotIn => "not-in",
        }
    }

    /// Filter key emitted by the converter
    pub fn tag(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Ne => "$ne",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Regex => "$regex",
            Operator::In => "$in",
            Operator::NotIn => "$nin",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Boolean connectives joining clauses into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    /// Logical AND (`and`, `&&` → `$and`)
    And,
    /// Logical OR (`or`, `||` → `$or`)
    Or,
}

impl Connective {
    pub fn tag(&self) -> &'static str {
        match self {
            Connective::And => "$and",
            Connective::Or => "$or",
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connective::And => f.write_str("and"),
            Connective::Or => f.write_str("or"),
        }
    }
}

#[test]
fn test_operator_table_round_trip() {
    for (text, op) in OPERATOR_TABLE {
        assert_eq!(Operator::from_symbol(text), Some(op));
        assert_eq!(op.symbol(), text);
    }
    assert_eq!(Operator::from_symbol("NOT-IN"), Some(Operator::NotIn));
    assert_eq!(Operator::from_symbol("=~"), None);
}
