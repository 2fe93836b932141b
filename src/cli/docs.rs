//! Documentation content for the filterql CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Logic,
    Literals,
    Output,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "fields" | "paths" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "logic" | "boolean" | "precedence" => Some(Self::Logic),
            "literals" | "literal" | "values" | "types" => Some(Self::Literals),
            "output" | "filter" | "filters" => Some(Self::Output),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"FILTERQL DOCUMENTATION

filterql compiles human-written filter expressions such as

  user.role in ['admin', 'root'] && (user.address.state == 'VA' || user.address.city == 'Springfield')

into nested filter objects for a storage query layer.

DOCUMENTATION CATEGORIES

  syntax            Clauses, dotted field paths, grouping
  operators         Comparison, regex and membership operators
  logic             and / or / not, precedence and flattening
  literals          Strings, numbers, booleans, null, regexes, arrays
  output            Shape of the produced filter object

QUICK REFERENCE

  a.b == 1          Clause: field operator value
  ==  !=  <  <=  >  >=  ~  in  not-in
  and &&  or ||  not !
  ( ... )           Grouping
  [1, 'x']          Array literal (for in / not-in)

Run 'filterql doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Logic) => Ok(LOGIC_DOC),
        Some(DocCategory::Literals) => Ok(LITERALS_DOC),
        Some(DocCategory::Output) => Ok(OUTPUT_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Clauses and Field Paths

CLAUSES
  <field> <operator> <value>
    The smallest complete expression. The field is always on the left,
    the literal value on the right.

    Examples:
      age >= 18
      status == 'active'
      role in ['admin', 'root']

FIELD PATHS
  user.address.city
    Letters, digits, underscores and dots. Dots address nested fields and
    become nested objects in the filter.

    Example:
      Query:  user.address.city == 'Springfield'
      Filter: {"user":{"address":{"city":{"$eq":"Springfield"}}}}

    Constraints:
      - No empty segments (a..b, .a and a. are rejected)
      - Field names are case-sensitive

GROUPING
  ( ... )
    Parentheses override precedence and may nest up to 64 levels.

    Example:
      a == 1 and (b == 2 or c == 3)

WHITESPACE
  Whitespace between tokens is ignored. Inside quotes and regex literals
  it is kept.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Comparison

  Operator   Filter key   Meaning
  --------   ----------   -------------------------------
  ==         $eq          equal
  !=         $ne          not equal
  <          $lt          less than
  <=         $lte         less than or equal
  >          $gt          greater than
  >=         $gte         greater than or equal
  ~          $regex       matches regex
  in         $in          value is one of a list
  not-in     $nin         value is none of a list

REGEX MATCH
  name ~ 'Jo'
    A string operand is anchored at the start: the filter holds /^Jo/.

  name ~ /^jo/i
    A regex literal is used exactly as written, flags included.

MEMBERSHIP
  role in ['admin', 'root']
  status not-in ['banned']
    The value must be an array literal. 'role in 5' is rejected.
    An empty list is allowed: 'tags in []'.

NULL CHECKS
  deleted_at == null      {"deleted_at":{"$exists":false}}
  deleted_at != null      {"deleted_at":{"$exists":true}}
"#;

const LOGIC_DOC: &str = r#"LOGIC - Connectives and Precedence

CONNECTIVES
  and, &&      both sides must hold
  or, ||       either side must hold
  not, !       negates the clause or group that follows

  Keywords are case-insensitive: AND, Or and NOT all work.

PRECEDENCE
  not binds tightest, then and, then or.

    a == 1 and b == 2 or c == 3 and d == 4 or e == 5

  groups as

    (a and b) or (c and d) or e

  Use parentheses to change it:

    a == 1 and (b == 2 or c == 3)

FLATTENING
  Chains of the same connective become one group:

    a == 1 and b == 2 and c == 3
    {"$and":[{"a":{"$eq":1}},{"b":{"$eq":2}},{"c":{"$eq":3}}]}

NEGATION
  not a == 1              {"$not":{"a":{"$eq":1}}}
  not (a == 1 or b == 2)  {"$not":{"$or":[...]}}
"#;

const LITERALS_DOC: &str = r#"LITERALS - Values

STRINGS
  'single' or "double" quotes. A backslash takes the next character
  literally: 'it\'s'.

NUMBERS
  8, -7, -6.2
    Whole numbers stay integers, numbers with a fraction are floats.

BOOLEANS AND NULL
  true, false, null (case-insensitive)

REGEXES
  /pattern/flags
    Flags: g i m s u x. Write \/ for a slash inside the pattern.

ARRAYS
  [1, 2, 'three']
    Literals separated by commas. Only valid as the value of in / not-in.
    Nested arrays and trailing commas are rejected.
"#;

const OUTPUT_DOC: &str = r#"OUTPUT - Filter Objects

SHAPE
  Each clause becomes nested single-key objects ending in an operator key:

    a.b.c in [1, 2, -3]
    {"a":{"b":{"c":{"$in":[1,2,-3]}}}}

  Groups become $and / $or arrays with at least two entries, negation
  becomes $not holding a single object.

EMIT MODES (filterql compile --emit ...)
  filter    Filter object, regexes written bare as /pattern/ (default)
  json      Strict JSON, regexes written as "/pattern/" strings
  ast       Parsed syntax tree
  tokens    Token stream, one token per line

  Add --pretty for indented output.
"#;
