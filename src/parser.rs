use std::{fmt, mem};

use log::{debug, trace};

use crate::ast::{ClauseValue, Connective, Literal, Node, Operator, Token};

/// Maximum number of open groups plus pending negations at any point.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Errors raised while building the syntax tree.
///
/// `index` fields point into the token slice handed to the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Token in a position the grammar does not allow, such as a non-literal
    /// in a clause value slot or inside an array literal
    UnexpectedToken { index: usize, found: String },

    /// Operator token with no entry in the operator table
    UnknownOperator { index: usize, symbol: String },

    /// `,` outside an array literal
    StrayComma { index: usize },

    /// `)` without a matching `(`
    UnbalancedGroup { index: usize },

    /// Input ended with groups still open
    UnclosedGroup { depth: usize },

    /// Input ended inside an array literal
    UnclosedArray { index: usize },

    /// `()`
    EmptyGroup { index: usize },

    /// No tokens to parse
    EmptyExpression,

    /// A token was left over that never became part of a clause
    Incomplete { index: usize, found: String },

    /// Several top-level expressions with no connective between them
    Ambiguous { roots: usize },

    /// Groups and negations nested deeper than [`MAX_NESTING_DEPTH`]
    TooDeep { index: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { index, found } => {
                write!(f, "Unexpected token {} at index {}", found, index)
            }
            ParseError::UnknownOperator { index, symbol } => {
                write!(f, "Unknown operator '{}' at index {}", symbol, index)
            }
            ParseError::StrayComma { index } => {
                write!(f, "Unexpected ',' at index {} outside an array literal", index)
            }
            ParseError::UnbalancedGroup { index } => {
                write!(f, "Unbalanced ')' at index {}", index)
            }
            ParseError::UnclosedGroup { depth } => {
                write!(f, "Unclosed '(': {} group(s) still open at end of input", depth)
            }
            ParseError::UnclosedArray { index } => {
                write!(f, "Unclosed '[' opened at index {}", index)
            }
            ParseError::EmptyGroup { index } => {
                write!(f, "Empty group '()' closed at index {}", index)
            }
            ParseError::EmptyExpression => write!(f, "Empty expression"),
            ParseError::Incomplete { index, found } => write!(
                f,
                "Incomplete expression: {} at index {} is not part of a clause",
                found, index
            ),
            ParseError::Ambiguous { roots } => write!(
                f,
                "Ambiguous expression: {} top-level expressions are not joined by 'and' or 'or'",
                roots
            ),
            ParseError::TooDeep { index } => write!(
                f,
                "Groups and negations nested deeper than {} at index {}",
                MAX_NESTING_DEPTH, index
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Entry in a parser frame. Each carries the token index it ended at.
#[derive(Debug)]
enum Item {
    /// Token not yet reduced
    Token(usize, Token),
    /// Finished subtree
    Node(usize, Node),
    /// Closed array literal waiting to become a clause value
    List(usize, Vec<Literal>),
}

impl Item {
    fn index(&self) -> usize {
        match self {
            Item::Token(index, _) | Item::Node(index, _) | Item::List(index, _) => *index,
        }
    }

    fn describe(&self) -> String {
        match self {
            Item::Token(_, token) => format!("{} `{}`", token.kind(), token),
            Item::Node(_, _) => "group".to_string(),
            Item::List(_, _) => "array literal".to_string(),
        }
    }
}

#[derive(Debug)]
struct ArrayBuffer {
    start: usize,
    items: Vec<Literal>,
    expect_element: bool,
}

fn connective(token: &Token) -> Option<Connective> {
    match token {
        Token::And => Some(Connective::And),
        Token::Or => Some(Connective::Or),
        _ => None,
    }
}

/// Join two operands, flattening whichever side is already a group of `op`.
fn merge(op: Connective, left: Node, right: Node) -> Node {
    let mut children = match left {
        Node::Group {
            op: left_op,
            children,
        } if left_op == op => children,
        other => vec![other],
    };
    match right {
        Node::Group {
            op: right_op,
            children: right_children,
        } if right_op == op => children.extend(right_children),
        other => children.push(other),
    }
    Node::Group { op, children }
}

/// Fold every `node op node` at the end of `frame` into one group.
fn condense(frame: &mut Vec<Item>, op: Connective) {
    loop {
        let matched = match frame.as_slice() {
            [.., Item::Node(..), Item::Token(_, token), Item::Node(..)] => {
                connective(token) == Some(op)
            }
            _ => false,
        };
        if !matched {
            break;
        }

        let (Some(Item::Node(index, right)), Some(_), Some(Item::Node(_, left))) =
            (frame.pop(), frame.pop(), frame.pop())
        else {
            break;
        };
        trace!("condense {} at index {}", op, index);
        frame.push(Item::Node(index, merge(op, left, right)));
    }
}

/// Wrap the last node in `not` for every pending negation before it.
///
/// Returns how many negations were absorbed.
fn absorb_unary(frame: &mut Vec<Item>) -> usize {
    let mut absorbed = 0;
    while let [.., Item::Token(_, Token::Not), Item::Node(..)] = frame.as_slice() {
        let Some(Item::Node(index, node)) = frame.pop() else {
            break;
        };
        frame.pop();
        frame.push(Item::Node(index, Node::Not(Box::new(node))));
        absorbed += 1;
    }
    absorbed
}

/// Collapse a fully condensed frame to its single node.
fn into_root(frame: Vec<Item>, empty: ParseError) -> Result<Node, ParseError> {
    if let Some(item) = frame.iter().find(|item| !matches!(item, Item::Node(..))) {
        return Err(ParseError::Incomplete {
            index: item.index(),
            found: item.describe(),
        });
    }

    let roots = frame.len();
    let mut nodes = frame.into_iter().filter_map(|item| match item {
        Item::Node(_, node) => Some(node),
        _ => None,
    });
    match (nodes.next(), roots) {
        (None, _) => Err(empty),
        (Some(node), 1) => Ok(node),
        _ => Err(ParseError::Ambiguous { roots }),
    }
}

/// Stack-based reducer turning tokens into a [`Node`].
///
/// Precedence is not looked up in a table. `and` chains are condensed as
/// soon as each clause is built, while `or` chains are condensed only when a
/// group closes or the input ends, which makes `and` bind tighter.
pub struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    top: Vec<Item>,
    stack: Vec<Vec<Item>>,
    array: Option<ArrayBuffer>,
    /// `not` tokens waiting for their operand, across all frames
    pending_not: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            index: 0,
            top: Vec::new(),
            stack: Vec::new(),
            array: None,
            pending_not: 0,
        }
    }

    /// Start reading at token `pos` instead of the beginning.
    pub fn with_position(tokens: &'a [Token], pos: usize) -> Self {
        let mut parser = Parser::new(tokens);
        parser.index = pos;
        parser
    }

    /// Consume the tokens and return the root node.
    pub fn parse(mut self) -> Result<Node, ParseError> {
        let start = self.index;
        while let Some(token) = self.tokens.get(self.index) {
            let index = self.index;
            self.index += 1;
            self.step(index, token.clone())?;
        }
        let root = self.finish()?;
        debug!(
            "parsed tokens {}..{} into tree of depth {}",
            start,
            self.tokens.len(),
            root.depth()
        );
        Ok(root)
    }

    fn step(&mut self, index: usize, token: Token) -> Result<(), ParseError> {
        if self.array.is_some() {
            return self.step_in_array(index, token);
        }

        match token {
            Token::Literal(_) => {
                self.top.push(Item::Token(index, token));
                self.handle_clause()
            }
            Token::Not => {
                self.check_depth(index)?;
                self.check_value_slot(index, || "unary `not`".to_string())?;
                self.top.push(Item::Token(index, token));
                self.pending_not += 1;
                Ok(())
            }
            Token::Identifier(_) | Token::Operator(_) | Token::And | Token::Or => {
                self.check_value_slot(index, || format!("{} `{}`", token.kind(), token))?;
                self.top.push(Item::Token(index, token));
                Ok(())
            }
            Token::LParen => {
                self.check_depth(index)?;
                self.check_value_slot(index, || "grouping `(`".to_string())?;
                let outer = mem::take(&mut self.top);
                self.stack.push(outer);
                Ok(())
            }
            Token::RParen => self.close_group(index),
            Token::LBracket => {
                self.array = Some(ArrayBuffer {
                    start: index,
                    items: Vec::new(),
                    expect_element: true,
                });
                Ok(())
            }
            Token::RBracket => Err(ParseError::UnexpectedToken {
                index,
                found: "array `]`".to_string(),
            }),
            Token::Comma => Err(ParseError::StrayComma { index }),
        }
    }

    fn step_in_array(&mut self, index: usize, token: Token) -> Result<(), ParseError> {
        let Some(array) = self.array.as_mut() else {
            return Ok(());
        };

        match token {
            Token::Literal(lit) if array.expect_element => {
                array.items.push(lit);
                array.expect_element = false;
                Ok(())
            }
            Token::Comma if !array.expect_element => {
                array.expect_element = true;
                Ok(())
            }
            // A trailing comma leaves the buffer expecting another element
            Token::RBracket if !array.expect_element || array.items.is_empty() => {
                let items = mem::take(&mut array.items);
                self.array = None;
                self.top.push(Item::List(index, items));
                self.handle_clause()
            }
            other => Err(ParseError::UnexpectedToken {
                index,
                found: format!("{} `{}` in array literal", other.kind(), other),
            }),
        }
    }

    fn check_depth(&self, index: usize) -> Result<(), ParseError> {
        if self.stack.len() + self.pending_not >= MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep { index });
        }
        Ok(())
    }

    /// Reject anything but a literal or array after `field operator`.
    fn check_value_slot(
        &self,
        index: usize,
        found: impl FnOnce() -> String,
    ) -> Result<(), ParseError> {
        match self.top.as_slice() {
            [.., Item::Token(_, Token::Identifier(_)), Item::Token(_, Token::Operator(_))] => {
                Err(ParseError::UnexpectedToken {
                    index,
                    found: found(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Reduce a trailing `identifier operator value` into a clause.
    fn handle_clause(&mut self) -> Result<(), ParseError> {
        if !matches!(
            self.top.as_slice(),
            [.., Item::Token(_, Token::Identifier(_)), Item::Token(_, Token::Operator(_)), _]
        ) {
            return Ok(());
        }

        let (
            Some(value),
            Some(Item::Token(op_index, Token::Operator(symbol))),
            Some(Item::Token(_, Token::Identifier(field))),
        ) = (self.top.pop(), self.top.pop(), self.top.pop())
        else {
            return Ok(());
        };

        let op = Operator::from_symbol(&symbol).ok_or(ParseError::UnknownOperator {
            index: op_index,
            symbol,
        })?;

        let (index, value) = match value {
            Item::Token(index, Token::Literal(lit)) => (index, ClauseValue::Literal(lit)),
            Item::List(index, items) => (index, ClauseValue::List(items)),
            other => {
                return Err(ParseError::UnexpectedToken {
                    index: other.index(),
                    found: other.describe(),
                });
            }
        };

        trace!("clause {} {} {}", field, op, value);
        self.top.push(Item::Node(index, Node::Clause { field, op, value }));
        self.reduce();
        Ok(())
    }

    fn reduce(&mut self) {
        let absorbed = absorb_unary(&mut self.top);
        self.pending_not = self.pending_not.saturating_sub(absorbed);
        condense(&mut self.top, Connective::And);
    }

    fn close_group(&mut self, index: usize) -> Result<(), ParseError> {
        let Some(parent) = self.stack.pop() else {
            return Err(ParseError::UnbalancedGroup { index });
        };

        let mut frame = mem::replace(&mut self.top, parent);
        condense(&mut frame, Connective::Or);
        let node = into_root(frame, ParseError::EmptyGroup { index })?;

        self.top.push(Item::Node(index, node));
        self.reduce();
        Ok(())
    }

    fn finish(&mut self) -> Result<Node, ParseError> {
        if let Some(array) = &self.array {
            return Err(ParseError::UnclosedArray { index: array.start });
        }
        if !self.stack.is_empty() {
            return Err(ParseError::UnclosedGroup {
                depth: self.stack.len(),
            });
        }

        let mut frame = mem::take(&mut self.top);
        condense(&mut frame, Connective::Or);
        into_root(frame, ParseError::EmptyExpression)
    }
}

/// Parse `tokens` from index `pos` into a syntax tree.
///
/// # Examples
///
/// ```
/// use filterql::{parse, tokenize, Connective, Node};
///
/// let tokens = tokenize("a == 1 and b == 2 or c == 3").unwrap();
/// let root = parse(&tokens, 0).unwrap();
/// assert!(matches!(root, Node::Group { op: Connective::Or, .. }));
/// ```
pub fn parse(tokens: &[Token], pos: usize) -> Result<Node, ParseError> {
    Parser::with_position(tokens, pos).parse()
}
