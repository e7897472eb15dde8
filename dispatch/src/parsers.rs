//! Built-in argument parsers.
//!
//! Each parser implements the [`ArgumentParser`] capability trait from the
//! core crate: offered the remaining token stream, it either consumes input
//! and yields a typed value or fails with a message (and, where sensible,
//! suggestion candidates). Hosts plug in their own parsers the same way;
//! the merge engine unifies argument nodes only when their parsers report
//! the same [`type_name`](ArgumentParser::type_name).

use command_graph_core::{ArgumentError, ArgumentParser, ParsedValue, TokenCursor};

/// Parses `true` / `false` into [`ParsedValue::Bool`].
///
/// # Examples
///
/// ```
/// use command_graph_core::{ArgumentParser, ParsedValue, StaticSender, TokenCursor};
/// use command_graph_dispatch::BoolParser;
///
/// let sender = StaticSender::new("console");
/// let tokens = vec!["true".to_string()];
/// let mut cursor = TokenCursor::new(&tokens);
/// let value = BoolParser.parse(&mut cursor, &sender).unwrap();
/// assert_eq!(value, ParsedValue::Bool(true));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolParser;

impl<S> ArgumentParser<S> for BoolParser {
    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn parse(&self, cursor: &mut TokenCursor<'_>, _ctx: &S) -> Result<ParsedValue, ArgumentError> {
        let token = cursor
            .next()
            .ok_or_else(|| ArgumentError::new("expected 'true' or 'false'"))?;
        match token {
            "true" => Ok(ParsedValue::Bool(true)),
            "false" => Ok(ParsedValue::Bool(false)),
            other => Err(
                ArgumentError::new(format!("expected 'true' or 'false', found '{other}'"))
                    .with_suggestions(vec!["true".into(), "false".into()]),
            ),
        }
    }

    fn suggest(&self, _partial: &str, _ctx: &S) -> Vec<String> {
        vec!["true".into(), "false".into()]
    }
}

/// Parses a signed integer, optionally bounds-checked (inclusive).
///
/// # Examples
///
/// ```
/// use command_graph_core::{ArgumentParser, StaticSender, TokenCursor};
/// use command_graph_dispatch::IntegerParser;
///
/// let sender = StaticSender::new("console");
/// let tokens = vec!["200".to_string()];
/// let mut cursor = TokenCursor::new(&tokens);
/// let err = IntegerParser::bounded(0, 100)
///     .parse(&mut cursor, &sender)
///     .unwrap_err();
/// assert!(err.message.contains("at most"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerParser {
    min: Option<i64>,
    max: Option<i64>,
}

impl IntegerParser {
    /// Accepts any `i64`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts values in `min..=max`.
    pub fn bounded(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Accepts values `>= min`.
    pub fn at_least(min: i64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Accepts values `<= max`.
    pub fn at_most(max: i64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

impl<S> ArgumentParser<S> for IntegerParser {
    fn type_name(&self) -> &'static str {
        "integer"
    }

    fn parse(&self, cursor: &mut TokenCursor<'_>, _ctx: &S) -> Result<ParsedValue, ArgumentError> {
        let token = cursor
            .next()
            .ok_or_else(|| ArgumentError::new("expected an integer"))?;
        let value: i64 = token
            .parse()
            .map_err(|_| ArgumentError::new(format!("expected an integer, found '{token}'")))?;
        if let Some(min) = self.min {
            if value < min {
                return Err(ArgumentError::new(format!(
                    "integer must be at least {min}, found {value}"
                )));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(ArgumentError::new(format!(
                    "integer must be at most {max}, found {value}"
                )));
            }
        }
        Ok(ParsedValue::Integer(value))
    }
}

/// Parses a floating-point number.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatParser;

impl<S> ArgumentParser<S> for FloatParser {
    fn type_name(&self) -> &'static str {
        "float"
    }

    fn parse(&self, cursor: &mut TokenCursor<'_>, _ctx: &S) -> Result<ParsedValue, ArgumentError> {
        let token = cursor
            .next()
            .ok_or_else(|| ArgumentError::new("expected a number"))?;
        let value: f64 = token
            .parse()
            .map_err(|_| ArgumentError::new(format!("expected a number, found '{token}'")))?;
        if !value.is_finite() {
            return Err(ArgumentError::new(format!(
                "expected a finite number, found '{token}'"
            )));
        }
        Ok(ParsedValue::Float(value))
    }
}

/// Accepts any single token as a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordParser;

impl<S> ArgumentParser<S> for WordParser {
    fn type_name(&self) -> &'static str {
        "word"
    }

    fn parse(&self, cursor: &mut TokenCursor<'_>, _ctx: &S) -> Result<ParsedValue, ArgumentError> {
        let token = cursor
            .next()
            .ok_or_else(|| ArgumentError::new("expected a value"))?;
        Ok(ParsedValue::String(token.to_string()))
    }
}

/// Consumes every remaining token into one space-joined string.
///
/// Greedy: an argument node using this parser can have no children, which
/// the builder enforces at construction time.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyStringParser;

impl<S> ArgumentParser<S> for GreedyStringParser {
    fn type_name(&self) -> &'static str {
        "greedy_string"
    }

    fn parse(&self, cursor: &mut TokenCursor<'_>, _ctx: &S) -> Result<ParsedValue, ArgumentError> {
        let rest = cursor.take_rest();
        if rest.is_empty() {
            return Err(ArgumentError::new("expected text"));
        }
        Ok(ParsedValue::String(rest.join(" ")))
    }

    fn consumes_all(&self) -> bool {
        true
    }
}
