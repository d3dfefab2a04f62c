//! Predicate evaluation and filter chain application.

use std::cmp::Ordering;
use std::fmt;

use regex::Regex;
use serde_json::Value;

use crate::decode::Record;
use crate::error::InfoError;

/// Comparison operator of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=` exact string match.
    Exact,
    /// `~` case-insensitive substring present.
    Contains,
    /// `!` case-insensitive substring absent.
    Excludes,
    /// `%` case-insensitive regex, anchored at the start.
    Matches,
    /// `>` integer comparison.
    GreaterThan,
    /// `<` integer comparison.
    LessThan,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Operator::Exact),
            "~" => Some(Operator::Contains),
            "!" => Some(Operator::Excludes),
            "%" => Some(Operator::Matches),
            ">" => Some(Operator::GreaterThan),
            "<" => Some(Operator::LessThan),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Exact => '=',
            Operator::Contains => '~',
            Operator::Excludes => '!',
            Operator::Matches => '%',
            Operator::GreaterThan => '>',
            Operator::LessThan => '<',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One filter condition: `attr <operator> value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub attr: String,
    pub operator: Operator,
    pub value: String,
}

/// A predicate prepared for repeated evaluation.
enum Test<'a> {
    Exact(&'a str),
    Contains(String),
    Excludes(String),
    Matches(Regex),
    GreaterThan(Integer),
    LessThan(Integer),
}

/// Arbitrary-width integer, kept as its digits without leading zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Integer {
    negative: bool,
    digits: String,
}

impl Integer {
    /// Parse an optionally signed run of ASCII digits, ignoring surrounding
    /// whitespace.
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = digits.trim_start_matches('0').to_string();
        Some(Self {
            negative: negative && !digits.is_empty(),
            digits,
        })
    }

    fn magnitude_cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.magnitude_cmp(other),
            (true, true) => other.magnitude_cmp(self),
        }
    }
}

impl Predicate {
    pub fn new(attr: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            attr: attr.into(),
            operator,
            value: value.into(),
        }
    }

    /// Evaluate against a single record.
    ///
    /// # Errors
    ///
    /// Returns `InfoError::MissingAttribute` if the record lacks the
    /// attribute, `InfoError::NotNumeric` if `<`/`>` meet a non-integer
    /// record value, `InfoError::InvalidFilterValue` if the `<`/`>` value
    /// itself is not an integer and `InfoError::Pattern` if a `%` value does
    /// not compile.
    pub fn evaluate(&self, record: &Record) -> Result<bool, InfoError> {
        self.prepare()?.evaluate(&self.attr, record)
    }

    /// Keep the records that satisfy this predicate, preserving order.
    pub fn select(&self, records: Vec<Record>) -> Result<Vec<Record>, InfoError> {
        let test = self.prepare()?;
        let mut selected = Vec::with_capacity(records.len());
        for record in records {
            if test.evaluate(&self.attr, &record)? {
                selected.push(record);
            }
        }
        Ok(selected)
    }

    fn integer_value(&self) -> Result<Integer, InfoError> {
        Integer::parse(&self.value).ok_or_else(|| InfoError::InvalidFilterValue {
            attr: self.attr.clone(),
            value: self.value.clone(),
        })
    }

    fn prepare(&self) -> Result<Test<'_>, InfoError> {
        Ok(match self.operator {
            Operator::Exact => Test::Exact(&self.value),
            Operator::Contains => Test::Contains(self.value.to_lowercase()),
            Operator::Excludes => Test::Excludes(self.value.to_lowercase()),
            Operator::Matches => {
                Test::Matches(Regex::new(&format!("^(?:{})", self.value.to_lowercase()))?)
            }
            Operator::GreaterThan => Test::GreaterThan(self.integer_value()?),
            Operator::LessThan => Test::LessThan(self.integer_value()?),
        })
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.attr, self.operator, self.value)
    }
}

impl Test<'_> {
    fn evaluate(&self, attr: &str, record: &Record) -> Result<bool, InfoError> {
        let value = record
            .get(attr)
            .ok_or_else(|| InfoError::MissingAttribute(attr.to_string()))?;
        let text = attribute_text(value);

        Ok(match self {
            Test::Exact(target) => text == *target,
            Test::Contains(target) => text.to_lowercase().contains(target.as_str()),
            Test::Excludes(target) => !text.to_lowercase().contains(target.as_str()),
            Test::Matches(regex) => regex.is_match(&text.to_lowercase()),
            Test::GreaterThan(target) => parse_integer(attr, &text)? > *target,
            Test::LessThan(target) => parse_integer(attr, &text)? < *target,
        })
    }
}

/// Textual form of an attribute value; numbers are stringified.
pub(crate) fn attribute_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn parse_integer(attr: &str, text: &str) -> Result<Integer, InfoError> {
    Integer::parse(text).ok_or_else(|| InfoError::NotNumeric {
        attr: attr.to_string(),
        value: text.to_string(),
    })
}

/// Apply predicates in order, each narrowing the previous result.
///
/// An empty predicate list returns `records` unchanged.
pub fn apply(records: Vec<Record>, predicates: &[Predicate]) -> Result<Vec<Record>, InfoError> {
    predicates.iter().try_fold(records, |current, predicate| {
        let before = current.len();
        let selected = predicate.select(current)?;
        tracing::debug!(
            filter = %predicate,
            before,
            after = selected.len(),
            "applied filter"
        );
        Ok(selected)
    })
}
