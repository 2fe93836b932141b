use std::fmt;

/// Regular expression literal as written in a query.
///
/// The pattern is kept as text until the converter builds the actual regex,
/// so the grammar layer never depends on a particular regex engine.
///
/// # Examples
/// ```text
/// /^admin/
/// /smith$/i
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    /// Pattern body between the slashes, with `\/` already unescaped
    pub source: String,
    /// Trailing flag letters, in the order written
    pub flags: String,
}

impl Pattern {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Pattern {
            source: source.into(),
            flags: flags.into(),
        }
    }

    /// Build the regex this pattern describes.
    ///
    /// `i`, `m`, `s`, `x` and `u` map onto the matching builder switches.
    /// `g` has no meaning for a filter and is accepted without effect.
    pub fn compile(&self) -> Result<regex::Regex, regex::Error> {
        let mut builder = regex::RegexBuilder::new(&self.source);
        for flag in self.flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'u' => builder.unicode(true),
                _ => &mut builder,
            };
        }
        builder.build()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for ch in self.source.chars() {
            if ch == '/' {
                f.write_str("\\/")?;
            } else {
                write!(f, "{}", ch)?;
            }
        }
        write!(f, "/{}", self.flags)
    }
}

/// Literal value appearing on the right-hand side of a clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `null`
    Null,

    /// `true` / `false`
    Boolean(bool),

    /// Whole number
    ///
    /// # Examples
    /// ```text
    /// 8
    /// -7
    /// ```
    Integer(i64),

    /// Number with a fractional part
    ///
    /// # Examples
    /// ```text
    /// -6.2
    /// 0.5
    /// ```
    Float(f64),

    /// Quoted string, either quote style
    ///
    /// # Examples
    /// ```text
    /// 'admin'
    /// "Springfield"
    /// ```
    String(String),

    /// Regex literal
    Regex(Pattern),
}

impl Literal {
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Boolean(_) => "boolean",
            Literal::Integer(_) => "integer",
            Literal::Float(_) => "float",
            Literal::String(_) => "string",
            Literal::Regex(_) => "regex",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Integer(n) => write!(f, "{}", n),
            // Plain decimal with a `.`, the lexer reads neither exponents nor `6` as a float
            Literal::Float(n) => {
                let text = n.to_string();
                if n.is_finite() && !text.contains('.') {
                    write!(f, "{}.0", text)
                } else {
                    f.write_str(&text)
                }
            }
            Literal::String(s) => {
                f.write_str("'")?;
                for ch in s.chars() {
                    if ch == '\'' || ch == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", ch)?;
                }
                f.write_str("'")
            }
            Literal::Regex(p) => write!(f, "{}", p),
        }
    }
}
